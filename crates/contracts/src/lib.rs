//! Общие контракты frontend и REST API учёта ИТ-активов:
//! DTO сущностей, авторизация и движок универсального списка.

pub mod domain;
pub mod shared;
pub mod system;
