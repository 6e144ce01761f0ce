//! Состояние формы добавления/редактирования записи.
//!
//! Переходы:
//! - `Closed` → `AddDraft` (кнопка «Добавить») → `Closed` (отмена или успешное сохранение)
//! - `Closed` → `EditDraft(id)` (выбор записи) → `Closed`
//!
//! Пока выполняется `on_add`/`on_edit`, форма находится в под-состоянии
//! `Submitting` и повторная отправка запрещена.

use super::callbacks::ListCallbacks;
use super::config::ListViewConfig;
use super::error::ListViewError;
use super::record::{Draft, FieldValue, Record};
use super::validation::{FieldErrors, ValidationRules};

/// Режим открытой формы
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Add,
    Edit { id: String },
}

/// Фаза формы для представления
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    Closed,
    AddDraft,
    EditDraft,
    Submitting,
}

/// Открытая форма с черновиком
#[derive(Debug, Clone, PartialEq)]
pub struct OpenForm {
    pub mode: FormMode,
    pub draft: Draft,
    pub field_errors: FieldErrors,
    pub submit_error: Option<String>,
    pub submitting: bool,
}

/// Что передать в callback после успешной валидации
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitRequest {
    Add(Draft),
    Edit { id: String, draft: Draft },
}

impl SubmitRequest {
    /// Передать черновик в `on_add` или `on_edit`
    pub async fn dispatch<C: ListCallbacks + ?Sized>(self, callbacks: &C) -> Result<(), String> {
        match self {
            Self::Add(draft) => callbacks.on_add(draft).await,
            Self::Edit { id, draft } => callbacks.on_edit(&id, draft).await,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormController {
    open: Option<OpenForm>,
}

impl FormController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> FormPhase {
        match &self.open {
            None => FormPhase::Closed,
            Some(form) if form.submitting => FormPhase::Submitting,
            Some(OpenForm {
                mode: FormMode::Add,
                ..
            }) => FormPhase::AddDraft,
            Some(_) => FormPhase::EditDraft,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    pub fn form(&self) -> Option<&OpenForm> {
        self.open.as_ref()
    }

    /// Открыть пустой черновик
    pub fn open_add(&mut self) -> Result<(), ListViewError> {
        self.open_with(FormMode::Add, Draft::new())
    }

    /// Открыть черновик из редактируемых полей существующей записи
    pub fn open_edit(
        &mut self,
        record: &Record,
        config: &ListViewConfig,
    ) -> Result<(), ListViewError> {
        self.open_with(
            FormMode::Edit {
                id: record.id().to_string(),
            },
            record.to_draft_for(config),
        )
    }

    fn open_with(&mut self, mode: FormMode, draft: Draft) -> Result<(), ListViewError> {
        if self.open.is_some() {
            return Err(ListViewError::DialogAlreadyOpen);
        }
        log::debug!("form opened: {:?}", mode);
        self.open = Some(OpenForm {
            mode,
            draft,
            field_errors: FieldErrors::new(),
            submit_error: None,
            submitting: false,
        });
        Ok(())
    }

    fn editable_form(&mut self) -> Result<&mut OpenForm, ListViewError> {
        match self.open.as_mut() {
            None => Err(ListViewError::NoOpenForm),
            Some(form) if form.submitting => Err(ListViewError::SubmitInProgress),
            Some(form) => Ok(form),
        }
    }

    /// Заменить черновик новым значением с изменённым полем (`None`: очистить)
    pub fn set_field(
        &mut self,
        field: &str,
        value: Option<FieldValue>,
    ) -> Result<(), ListViewError> {
        let form = self.editable_form()?;
        form.draft = match value {
            Some(v) => form.draft.with_field(field, v),
            None => form.draft.without_field(field),
        };
        form.field_errors.remove(field);
        Ok(())
    }

    /// Закрыть форму без сохранения. Во время сохранения закрыть нельзя.
    pub fn cancel(&mut self) -> Result<(), ListViewError> {
        self.editable_form()?;
        log::debug!("form cancelled");
        self.open = None;
        Ok(())
    }

    /// Проверить черновик и перейти в `Submitting`.
    ///
    /// При ошибках валидации состояние не меняется, ошибки полей сохраняются
    /// в форме и возвращаются как `ListViewError::Validation`.
    pub fn begin_submit(
        &mut self,
        config: &ListViewConfig,
    ) -> Result<SubmitRequest, ListViewError> {
        let form = self.editable_form()?;

        let errors = validate_draft(&form.draft, config);
        if !errors.is_empty() {
            log::debug!("form validation failed: {:?}", errors.keys().collect::<Vec<_>>());
            form.field_errors = errors.clone();
            return Err(ListViewError::Validation(errors));
        }

        form.field_errors.clear();
        form.submit_error = None;
        form.submitting = true;

        Ok(match &form.mode {
            FormMode::Add => SubmitRequest::Add(form.draft.clone()),
            FormMode::Edit { id } => SubmitRequest::Edit {
                id: id.clone(),
                draft: form.draft.clone(),
            },
        })
    }

    /// Результат callback: успех закрывает форму, ошибка оставляет черновик
    pub fn complete_submit(&mut self, result: Result<(), String>) -> Result<(), ListViewError> {
        let form = match self.open.as_mut() {
            Some(form) if form.submitting => form,
            Some(_) | None => return Err(ListViewError::NoOpenForm),
        };
        match result {
            Ok(()) => {
                log::debug!("form submitted");
                self.open = None;
                Ok(())
            }
            Err(message) => {
                log::warn!("form submit rejected: {}", message);
                form.submitting = false;
                form.submit_error = Some(message.clone());
                Err(ListViewError::Submission(message))
            }
        }
    }
}

/// Проверить черновик по правилам конфигурации
pub fn validate_draft(draft: &Draft, config: &ListViewConfig) -> FieldErrors {
    let mut errors = FieldErrors::new();
    for (field, rules) in &config.field_rules {
        let (kind, label) = match config.find_column(field) {
            Some(column) => (column.kind.clone(), column.label.as_str()),
            None => (Default::default(), field.as_str()),
        };
        if let Err(message) = rules.validate(draft.get(field), &kind, label) {
            errors.insert(field.clone(), message);
        }
    }
    // Тип значения проверяется и для полей без явных правил
    for column in config.form_columns() {
        if errors.contains_key(&column.field) || config.field_rules.contains_key(&column.field) {
            continue;
        }
        let rules = ValidationRules::none();
        if let Err(message) = rules.validate(draft.get(&column.field), &column.kind, &column.label)
        {
            errors.insert(column.field.clone(), message);
        }
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::list_view::config::{ColumnDef, FieldKind};
    use async_trait::async_trait;
    use futures::executor::block_on;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Calls(RefCell<Vec<String>>);

    #[async_trait(?Send)]
    impl ListCallbacks for Calls {
        async fn on_add(&self, draft: Draft) -> Result<(), String> {
            self.0.borrow_mut().push(format!("add:{}", draft.input_value("name")));
            Ok(())
        }

        async fn on_edit(&self, id: &str, draft: Draft) -> Result<(), String> {
            self.0
                .borrow_mut()
                .push(format!("edit:{}:{}", id, draft.to_json()));
            Ok(())
        }

        async fn on_delete(&self, _id: &str) -> Result<(), String> {
            Err("not expected".into())
        }
    }

    fn config() -> ListViewConfig {
        ListViewConfig::new("name")
            .column(ColumnDef::new("name", "Наименование"))
            .column(ColumnDef::new("quantity", "Количество").kind(FieldKind::Number))
    }

    #[test]
    fn test_add_flow_closes_on_success() {
        let mut form = FormController::new();
        form.open_add().unwrap();
        assert_eq!(form.phase(), FormPhase::AddDraft);

        form.set_field("name", Some("Ноутбук".into())).unwrap();
        let request = form.begin_submit(&config()).unwrap();
        assert_eq!(form.phase(), FormPhase::Submitting);
        match request {
            SubmitRequest::Add(draft) => {
                assert_eq!(draft.get("name"), Some(&FieldValue::Text("Ноутбук".into())))
            }
            other => panic!("unexpected request: {:?}", other),
        }

        form.complete_submit(Ok(())).unwrap();
        assert_eq!(form.phase(), FormPhase::Closed);
        assert!(form.form().is_none());
    }

    #[test]
    fn test_validation_failure_keeps_draft_open() {
        let mut form = FormController::new();
        form.open_add().unwrap();
        let err = form.begin_submit(&config()).unwrap_err();
        assert!(matches!(err, ListViewError::Validation(ref e) if e.contains_key("name")));
        assert_eq!(form.phase(), FormPhase::AddDraft);
        assert!(form.form().unwrap().field_errors.contains_key("name"));

        form.set_field("name", Some("x".into())).unwrap();
        assert!(form.form().unwrap().field_errors.is_empty());
    }

    #[test]
    fn test_non_numeric_input_fails_validation() {
        let mut form = FormController::new();
        form.open_add().unwrap();
        form.set_field("name", Some("Мышь".into())).unwrap();
        form.set_field("quantity", FieldKind::Number.parse_input("много"))
            .unwrap();
        let err = form.begin_submit(&config()).unwrap_err();
        assert!(matches!(err, ListViewError::Validation(ref e) if e.contains_key("quantity")));
    }

    #[test]
    fn test_submitting_blocks_resubmit_and_edits() {
        let mut form = FormController::new();
        form.open_add().unwrap();
        form.set_field("name", Some("A".into())).unwrap();
        form.begin_submit(&config()).unwrap();

        assert_eq!(form.begin_submit(&config()), Err(ListViewError::SubmitInProgress));
        assert_eq!(
            form.set_field("name", Some("B".into())),
            Err(ListViewError::SubmitInProgress)
        );
        assert_eq!(form.cancel(), Err(ListViewError::SubmitInProgress));
    }

    #[test]
    fn test_failed_submit_preserves_draft_and_unlocks() {
        let mut form = FormController::new();
        let record = Record::new("7").with("name", "Принтер");
        form.open_edit(&record, &config()).unwrap();
        assert_eq!(form.phase(), FormPhase::EditDraft);

        form.set_field("name", Some("Принтер HP".into())).unwrap();
        let request = form.begin_submit(&config()).unwrap();
        assert!(matches!(request, SubmitRequest::Edit { ref id, .. } if id == "7"));

        let err = form.complete_submit(Err("HTTP 500".into())).unwrap_err();
        assert_eq!(err, ListViewError::Submission("HTTP 500".into()));
        assert_eq!(form.phase(), FormPhase::EditDraft);
        let open = form.form().unwrap();
        assert_eq!(open.submit_error.as_deref(), Some("HTTP 500"));
        assert_eq!(
            open.draft.get("name"),
            Some(&FieldValue::Text("Принтер HP".into()))
        );

        assert!(form.begin_submit(&config()).is_ok());
    }

    #[test]
    fn test_only_one_draft_at_a_time() {
        let mut form = FormController::new();
        form.open_add().unwrap();
        assert_eq!(form.open_add(), Err(ListViewError::DialogAlreadyOpen));
        assert_eq!(
            form.open_edit(&Record::new("1"), &config()),
            Err(ListViewError::DialogAlreadyOpen)
        );
        form.cancel().unwrap();
        assert!(form.open_add().is_ok());
    }

    #[test]
    fn test_complete_without_submit_is_rejected() {
        let mut form = FormController::new();
        assert_eq!(form.complete_submit(Ok(())), Err(ListViewError::NoOpenForm));
        form.open_add().unwrap();
        assert_eq!(form.complete_submit(Ok(())), Err(ListViewError::NoOpenForm));
        assert_eq!(form.phase(), FormPhase::AddDraft);
    }

    #[test]
    fn test_dispatch_routes_request_by_mode() {
        let calls = Calls::default();
        let add = SubmitRequest::Add(Draft::new().with_field("name", "Сканер".into()));
        block_on(add.dispatch(&calls)).unwrap();

        let mut form = FormController::new();
        let record = Record::new("9").with("name", "Мышь").with("quantity", 3i64);
        form.open_edit(&record, &config()).unwrap();
        let request = form.begin_submit(&config()).unwrap();
        block_on(request.dispatch(&calls)).unwrap();

        assert_eq!(
            *calls.0.borrow(),
            vec![
                "add:Сканер".to_string(),
                r#"edit:9:{"name":"Мышь","quantity":3}"#.to_string()
            ]
        );
    }
}
