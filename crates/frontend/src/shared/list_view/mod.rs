//! Универсальный список сущностей: поиск, фильтры, сортировка, страницы,
//! форма добавления/редактирования и подтверждение удаления.
//!
//! Логика состояния живёт в `contracts::shared::list_view::ListViewController`,
//! здесь только отрисовка и связь с REST API.

mod callbacks;
mod form_dialog;
mod page;
mod table;
mod view;

pub use callbacks::RestCallbacks;
pub use page::{apply_list_defaults, entity_list_page};
pub use view::ListView;
