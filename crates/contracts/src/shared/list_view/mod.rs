//! Универсальный список: поиск, фильтры, сортировка, пагинация и форма
//! добавления/редактирования поверх коллекции записей.
//!
//! ## Использование
//!
//! ```rust,ignore
//! use contracts::shared::list_view::{ListViewController, ListEntity};
//!
//! let mut ctl = ListViewController::new(Asset::list_config(), capability);
//! ctl.set_search_term("dell");
//! let model = ctl.sync(&records);
//! ```

mod callbacks;
mod config;
mod controller;
mod entity;
mod error;
mod filter;
mod form;
mod paginate;
mod record;
mod sort;
mod validation;

pub use callbacks::{delete_record, ListCallbacks};
pub use config::{
    Action, ActionPermissions, ColumnDef, ColumnFormat, FieldKind, ListViewConfig,
    DEFAULT_PAGE_SIZE,
};
pub use controller::{AllowedActions, ListViewController, ListViewModel, ViewState};
pub use entity::ListEntity;
#[cfg(test)]
pub(crate) use entity::edit_payload;
pub use error::ListViewError;
pub use filter::{filter_options, filter_records, matches, ActiveFilters, FilterSelection};
pub use form::{validate_draft, FormController, FormMode, FormPhase, OpenForm, SubmitRequest};
pub use paginate::{clamp_page, paginate, total_pages, Page};
pub use record::{Draft, FieldValue, Record, CREATED_AT_FIELD, ID_FIELD};
pub use sort::{compare, sort_records, SortDirection};
pub use validation::{FieldErrors, ValidationRules};
