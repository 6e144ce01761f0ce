//! Общие типы для всех сущностей

pub mod entity_metadata;
pub mod entity_status;

pub use entity_metadata::EntityMetadata;
pub use entity_status::EntityStatus;
