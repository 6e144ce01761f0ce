//! Контроллер универсального списка: состояние представления + вывод страницы.
//!
//! Коллекция записей принадлежит вызывающему коду и передаётся при каждом
//! выводе; контроллер хранит только состояние UI.

use super::callbacks::{delete_record, ListCallbacks};
use super::config::{Action, ListViewConfig};
use super::error::ListViewError;
use super::filter::{self, ActiveFilters, FilterSelection};
use super::form::{FormController, FormPhase, OpenForm, SubmitRequest};
use super::paginate::{clamp_page, paginate};
use super::record::{FieldValue, Record};
use super::sort::{sort_records, SortDirection};
use crate::system::auth::Capability;
use std::collections::BTreeMap;
use std::num::NonZeroUsize;

/// Состояние представления; живёт, пока смонтирован список
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub search_term: String,
    pub active_filters: ActiveFilters,
    pub sort_key: String,
    pub sort_direction: SortDirection,
    pub current_page: usize,
    pub page_size: NonZeroUsize,
    pub pending_delete_id: Option<String>,
}

impl ViewState {
    pub fn new(config: &ListViewConfig) -> Self {
        Self {
            search_term: String::new(),
            active_filters: config
                .filterable_fields
                .iter()
                .map(|f| (f.clone(), FilterSelection::All))
                .collect(),
            sort_key: config.default_sort_key.clone(),
            sort_direction: SortDirection::Ascending,
            current_page: 1,
            page_size: config.page_size,
            pending_delete_id: None,
        }
    }
}

/// Доступные текущему пользователю действия
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllowedActions {
    pub add: bool,
    pub edit: bool,
    pub delete: bool,
}

impl AllowedActions {
    pub fn resolve(config: &ListViewConfig, capability: &Capability) -> Self {
        let p = &config.permissions;
        Self {
            add: capability.allows_opt(p.required_for(Action::Add)),
            edit: capability.allows_opt(p.required_for(Action::Edit)),
            delete: capability.allows_opt(p.required_for(Action::Delete)),
        }
    }

    pub fn allows(&self, action: Action) -> bool {
        match action {
            Action::Add => self.add,
            Action::Edit => self.edit,
            Action::Delete => self.delete,
        }
    }
}

/// Результат вывода: то, что рисует таблица
#[derive(Debug, Clone, PartialEq)]
pub struct ListViewModel {
    pub rows: Vec<Record>,
    pub total_count: usize,
    pub filtered_count: usize,
    pub current_page: usize,
    pub total_pages: usize,
    /// Значения выпадающих фильтров (по всей коллекции, без «Все»)
    pub filter_options: BTreeMap<String, Vec<String>>,
    pub actions: AllowedActions,
    pub sort_key: String,
    pub sort_direction: SortDirection,
}

impl ListViewModel {
    /// Нет строк после фильтрации: показывается строка «Записи не найдены»
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListViewController {
    config: ListViewConfig,
    capability: Capability,
    state: ViewState,
    form: FormController,
}

impl ListViewController {
    pub fn new(config: ListViewConfig, capability: Capability) -> Self {
        let state = ViewState::new(&config);
        Self {
            config,
            capability,
            state,
            form: FormController::new(),
        }
    }

    pub fn config(&self) -> &ListViewConfig {
        &self.config
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn capability(&self) -> &Capability {
        &self.capability
    }

    /// Заменить права (например, после повторного входа)
    pub fn set_capability(&mut self, capability: Capability) {
        self.capability = capability;
    }

    pub fn actions(&self) -> AllowedActions {
        AllowedActions::resolve(&self.config, &self.capability)
    }

    fn ensure_allowed(&self, action: Action) -> Result<(), ListViewError> {
        if self.actions().allows(action) {
            Ok(())
        } else {
            Err(ListViewError::Forbidden(action))
        }
    }

    // ------------------------------------------------------------------
    // Вывод
    // ------------------------------------------------------------------

    /// Фильтр → сортировка → страница. Номер страницы в модели уже приведён
    /// к допустимому диапазону.
    pub fn view(&self, records: &[Record]) -> ListViewModel {
        let mut filtered = filter::filter_records(
            records,
            &self.state.search_term,
            &self.state.active_filters,
            &self.config.searchable_fields,
        );
        sort_records(&mut filtered, &self.state.sort_key, self.state.sort_direction);

        let total_pages = super::paginate::total_pages(filtered.len(), self.state.page_size);
        let current_page = clamp_page(self.state.current_page, total_pages);
        let page = paginate(&filtered, current_page, self.state.page_size);

        let filter_options = self
            .config
            .filterable_fields
            .iter()
            .map(|field| (field.clone(), filter::filter_options(records, field)))
            .collect();

        ListViewModel {
            rows: page.items.iter().map(|r| (*r).clone()).collect(),
            total_count: records.len(),
            filtered_count: filtered.len(),
            current_page,
            total_pages: page.total_pages,
            filter_options,
            actions: self.actions(),
            sort_key: self.state.sort_key.clone(),
            sort_direction: self.state.sort_direction,
        }
    }

    /// Как [`view`](Self::view), но дополнительно сохраняет приведённый номер
    /// страницы в состоянии, чтобы не остаться на пустой странице.
    pub fn sync(&mut self, records: &[Record]) -> ListViewModel {
        let model = self.view(records);
        if model.current_page != self.state.current_page {
            log::debug!(
                "current page clamped: {} -> {}",
                self.state.current_page,
                model.current_page
            );
            self.state.current_page = model.current_page;
        }
        model
    }

    // ------------------------------------------------------------------
    // Поиск, фильтры, сортировка, страницы
    // ------------------------------------------------------------------

    pub fn set_search_term(&mut self, term: &str) {
        if self.state.search_term != term {
            self.state.search_term = term.to_string();
            self.state.current_page = 1;
        }
    }

    pub fn set_filter(
        &mut self,
        field: &str,
        selection: FilterSelection,
    ) -> Result<(), ListViewError> {
        if !self.config.filterable_fields.iter().any(|f| f == field) {
            return Err(ListViewError::UnknownField(field.to_string()));
        }
        self.state.active_filters.insert(field.to_string(), selection);
        self.state.current_page = 1;
        Ok(())
    }

    /// Сбросить поиск и все фильтры
    pub fn clear_filters(&mut self) {
        self.state.search_term.clear();
        for selection in self.state.active_filters.values_mut() {
            *selection = FilterSelection::All;
        }
        self.state.current_page = 1;
    }

    /// Количество активных условий (поиск считается одним условием)
    pub fn active_filter_count(&self) -> usize {
        let filters = self
            .state
            .active_filters
            .values()
            .filter(|s| !s.is_all())
            .count();
        let search = usize::from(!self.state.search_term.trim().is_empty());
        filters + search
    }

    /// Клик по заголовку колонки. Несортируемые колонки игнорируются.
    pub fn toggle_sort(&mut self, field: &str) -> bool {
        if !self.config.is_sortable(field) {
            return false;
        }
        if self.state.sort_key == field {
            self.state.sort_direction = self.state.sort_direction.toggled();
        } else {
            self.state.sort_key = field.to_string();
            self.state.sort_direction = SortDirection::Ascending;
        }
        self.state.current_page = 1;
        log::debug!(
            "sort changed: {} {:?}",
            self.state.sort_key,
            self.state.sort_direction
        );
        true
    }

    /// Перейти на страницу; приведение к диапазону выполняет `sync`
    pub fn go_to_page(&mut self, page: usize) {
        self.state.current_page = page.max(1);
    }

    pub fn set_page_size(&mut self, page_size: usize) -> Result<(), ListViewError> {
        let size = NonZeroUsize::new(page_size).ok_or(ListViewError::InvalidPageSize)?;
        self.state.page_size = size;
        self.state.current_page = 1;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Форма
    // ------------------------------------------------------------------

    pub fn form(&self) -> Option<&OpenForm> {
        self.form.form()
    }

    pub fn form_phase(&self) -> FormPhase {
        self.form.phase()
    }

    /// Пока открыта форма или запрошено удаление, новые диалоги не открываются
    pub fn is_dialog_open(&self) -> bool {
        self.form.is_open() || self.state.pending_delete_id.is_some()
    }

    pub fn open_add(&mut self) -> Result<(), ListViewError> {
        self.ensure_allowed(Action::Add)?;
        if self.state.pending_delete_id.is_some() {
            return Err(ListViewError::DialogAlreadyOpen);
        }
        self.form.open_add()
    }

    pub fn open_edit(&mut self, record: &Record) -> Result<(), ListViewError> {
        self.ensure_allowed(Action::Edit)?;
        if self.state.pending_delete_id.is_some() {
            return Err(ListViewError::DialogAlreadyOpen);
        }
        self.form.open_edit(record, &self.config)
    }

    pub fn set_field(
        &mut self,
        field: &str,
        value: Option<FieldValue>,
    ) -> Result<(), ListViewError> {
        self.form.set_field(field, value)
    }

    /// Значение из `<input>`: разбирается по типу колонки
    pub fn set_input(&mut self, field: &str, raw: &str) -> Result<(), ListViewError> {
        let column = self
            .config
            .find_column(field)
            .ok_or_else(|| ListViewError::UnknownField(field.to_string()))?;
        let value = column.kind.parse_input(raw);
        self.form.set_field(field, value)
    }

    pub fn cancel_form(&mut self) -> Result<(), ListViewError> {
        self.form.cancel()
    }

    pub fn begin_submit(&mut self) -> Result<SubmitRequest, ListViewError> {
        self.form.begin_submit(&self.config)
    }

    pub fn complete_submit(&mut self, result: Result<(), String>) -> Result<(), ListViewError> {
        self.form.complete_submit(result)
    }

    /// Полный цикл сохранения через callbacks.
    ///
    /// Шаги те же, что у списка в браузере, где между ними контроллер
    /// отпускается: `begin_submit`, [`SubmitRequest::dispatch`], `complete_submit`.
    pub async fn submit<C: ListCallbacks + ?Sized>(
        &mut self,
        callbacks: &C,
    ) -> Result<(), ListViewError> {
        let result = self.begin_submit()?.dispatch(callbacks).await;
        self.complete_submit(result)
    }

    // ------------------------------------------------------------------
    // Удаление
    // ------------------------------------------------------------------

    /// Запросить подтверждение удаления
    pub fn request_delete(&mut self, id: &str) -> Result<(), ListViewError> {
        self.ensure_allowed(Action::Delete)?;
        if self.is_dialog_open() {
            return Err(ListViewError::DialogAlreadyOpen);
        }
        log::debug!("delete requested: {}", id);
        self.state.pending_delete_id = Some(id.to_string());
        Ok(())
    }

    pub fn cancel_delete(&mut self) {
        self.state.pending_delete_id = None;
    }

    /// Подтверждение: id забирается из состояния независимо от исхода удаления.
    /// Строку локально не убираем: список обновит источник данных.
    pub fn confirm_delete(&mut self) -> Option<String> {
        let id = self.state.pending_delete_id.take();
        if let Some(id) = &id {
            log::debug!("delete confirmed: {}", id);
        }
        id
    }

    /// Подтвердить удаление и вызвать `on_delete` через [`delete_record`].
    /// Ошибку сообщает вызывающий код (уведомление), состояние уже очищено.
    pub async fn confirm_delete_with<C: ListCallbacks + ?Sized>(
        &mut self,
        callbacks: &C,
    ) -> Result<(), ListViewError> {
        let Some(id) = self.confirm_delete() else {
            return Ok(());
        };
        delete_record(callbacks, &id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::list_view::config::{ActionPermissions, ColumnDef};
    use crate::shared::list_view::record::Draft;
    use crate::system::auth::UserRole;
    use async_trait::async_trait;
    use futures::executor::block_on;
    use std::cell::RefCell;

    fn config() -> ListViewConfig {
        ListViewConfig::new("name")
            .column(ColumnDef::new("name", "Наименование"))
            .column(ColumnDef::new("status", "Статус").enumeration(&["active", "inactive"]))
            .column(ColumnDef::new("comment", "Комментарий").not_sortable())
            .searchable(&["name", "comment"])
            .filterable(&["status"])
            .permissions(ActionPermissions::for_entity("department"))
    }

    fn controller() -> ListViewController {
        ListViewController::new(config(), Capability::admin())
    }

    fn names(model: &ListViewModel) -> Vec<String> {
        model.rows.iter().map(|r| r.display("name")).collect()
    }

    fn many(count: usize) -> Vec<Record> {
        (1..=count)
            .map(|i| Record::new(i.to_string()).with("name", format!("Item {:03}", i)))
            .collect()
    }

    #[derive(Default)]
    struct RecordingCallbacks {
        fail_with: Option<String>,
        calls: RefCell<Vec<String>>,
    }

    #[async_trait(?Send)]
    impl ListCallbacks for RecordingCallbacks {
        async fn on_add(&self, draft: Draft) -> Result<(), String> {
            self.calls
                .borrow_mut()
                .push(format!("add:{}", draft.input_value("name")));
            self.fail_with.clone().map_or(Ok(()), Err)
        }

        async fn on_edit(&self, id: &str, draft: Draft) -> Result<(), String> {
            self.calls
                .borrow_mut()
                .push(format!("edit:{}:{}", id, draft.input_value("name")));
            self.fail_with.clone().map_or(Ok(()), Err)
        }

        async fn on_delete(&self, id: &str) -> Result<(), String> {
            self.calls.borrow_mut().push(format!("delete:{}", id));
            self.fail_with.clone().map_or(Ok(()), Err)
        }
    }

    #[test]
    fn test_sort_and_filter_scenario() {
        let records = vec![
            Record::new("1").with("name", "Bravo").with("status", "active"),
            Record::new("2").with("name", "Alpha").with("status", "inactive"),
        ];
        let mut ctl = controller();
        assert_eq!(names(&ctl.view(&records)), vec!["Alpha", "Bravo"]);

        ctl.set_filter("status", FilterSelection::Value("active".into()))
            .unwrap();
        assert_eq!(names(&ctl.view(&records)), vec!["Bravo"]);
    }

    #[test]
    fn test_third_page_of_25() {
        let records = many(25);
        let mut ctl = controller();
        ctl.go_to_page(3);
        let model = ctl.view(&records);
        assert_eq!(model.rows.len(), 5);
        assert_eq!(model.total_pages, 3);
        assert_eq!(model.current_page, 3);
    }

    #[test]
    fn test_page_beyond_total_is_clamped_by_sync() {
        let records = many(25);
        let mut ctl = controller();
        ctl.go_to_page(3);
        ctl.sync(&records);

        let shrunk = many(12);
        let model = ctl.sync(&shrunk);
        assert_eq!(model.current_page, 2);
        assert_eq!(ctl.state().current_page, 2);
        assert_eq!(model.rows.len(), 2);

        ctl.go_to_page(99);
        assert!(!ctl.sync(&shrunk).rows.is_empty());
    }

    #[test]
    fn test_empty_result_is_not_an_error() {
        let mut ctl = controller();
        ctl.set_search_term("nothing matches this");
        let model = ctl.sync(&many(5));
        assert!(model.is_empty());
        assert_eq!(model.total_pages, 0);
        assert_eq!(model.current_page, 1);
        assert_eq!(model.total_count, 5);
    }

    #[test]
    fn test_page_size_covering_everything_shows_all() {
        let records = many(7);
        let mut ctl = controller();
        ctl.set_page_size(7).unwrap();
        assert_eq!(ctl.view(&records).rows, records);
    }

    #[test]
    fn test_toggle_sort() {
        let mut ctl = controller();
        assert!(ctl.toggle_sort("name"));
        assert_eq!(ctl.state().sort_direction, SortDirection::Descending);
        assert!(ctl.toggle_sort("name"));
        assert_eq!(ctl.state().sort_direction, SortDirection::Ascending);

        ctl.toggle_sort("name");
        assert!(ctl.toggle_sort("status"));
        assert_eq!(ctl.state().sort_key, "status");
        assert_eq!(ctl.state().sort_direction, SortDirection::Ascending);

        assert!(!ctl.toggle_sort("comment"));
        assert!(!ctl.toggle_sort("unknown"));
        assert_eq!(ctl.state().sort_key, "status");
    }

    #[test]
    fn test_changes_reset_page() {
        let mut ctl = controller();
        ctl.go_to_page(3);
        ctl.set_search_term("item");
        assert_eq!(ctl.state().current_page, 1);

        ctl.go_to_page(3);
        ctl.toggle_sort("status");
        assert_eq!(ctl.state().current_page, 1);

        ctl.go_to_page(3);
        ctl.set_filter("status", FilterSelection::All).unwrap();
        assert_eq!(ctl.state().current_page, 1);

        ctl.go_to_page(3);
        ctl.set_page_size(25).unwrap();
        assert_eq!(ctl.state().current_page, 1);
    }

    #[test]
    fn test_filter_options_come_from_full_collection() {
        let records = vec![
            Record::new("1").with("name", "A").with("status", "active"),
            Record::new("2").with("name", "B").with("status", "inactive"),
        ];
        let mut ctl = controller();
        ctl.set_search_term("A");
        let model = ctl.view(&records);
        assert_eq!(model.filtered_count, 1);
        assert_eq!(model.filter_options["status"], vec!["active", "inactive"]);
    }

    #[test]
    fn test_unknown_filter_field_is_rejected() {
        let mut ctl = controller();
        assert_eq!(
            ctl.set_filter("name", FilterSelection::Value("x".into())),
            Err(ListViewError::UnknownField("name".into()))
        );
    }

    #[test]
    fn test_active_filter_count_and_clear() {
        let mut ctl = controller();
        ctl.set_search_term("x");
        ctl.set_filter("status", FilterSelection::Value("active".into()))
            .unwrap();
        assert_eq!(ctl.active_filter_count(), 2);
        ctl.clear_filters();
        assert_eq!(ctl.active_filter_count(), 0);
        assert_eq!(ctl.state().active_filters["status"], FilterSelection::All);
    }

    #[test]
    fn test_empty_required_name_does_not_call_on_add() {
        let callbacks = RecordingCallbacks::default();
        let mut ctl = controller();
        ctl.open_add().unwrap();

        let result = block_on(ctl.submit(&callbacks));
        assert!(matches!(result, Err(ListViewError::Validation(ref e)) if e.contains_key("name")));
        assert!(callbacks.calls.borrow().is_empty());
        assert_eq!(ctl.form_phase(), FormPhase::AddDraft);
        assert!(ctl.form().unwrap().field_errors.contains_key("name"));
    }

    #[test]
    fn test_submit_add_and_edit_through_callbacks() {
        let callbacks = RecordingCallbacks::default();
        let mut ctl = controller();

        ctl.open_add().unwrap();
        ctl.set_input("name", "Бухгалтерия").unwrap();
        block_on(ctl.submit(&callbacks)).unwrap();
        assert_eq!(ctl.form_phase(), FormPhase::Closed);

        let record = Record::new("d-1").with("name", "ИТ");
        ctl.open_edit(&record).unwrap();
        ctl.set_input("name", "ИТ-отдел").unwrap();
        block_on(ctl.submit(&callbacks)).unwrap();

        assert_eq!(
            *callbacks.calls.borrow(),
            vec!["add:Бухгалтерия".to_string(), "edit:d-1:ИТ-отдел".to_string()]
        );
    }

    #[test]
    fn test_rejected_submit_keeps_dialog_and_draft() {
        let callbacks = RecordingCallbacks {
            fail_with: Some("HTTP 409".into()),
            ..Default::default()
        };
        let mut ctl = controller();
        ctl.open_add().unwrap();
        ctl.set_input("name", "Склад").unwrap();

        let result = block_on(ctl.submit(&callbacks));
        assert_eq!(result, Err(ListViewError::Submission("HTTP 409".into())));
        assert_eq!(ctl.form_phase(), FormPhase::AddDraft);
        assert_eq!(ctl.form().unwrap().draft.input_value("name"), "Склад");
        assert_eq!(ctl.form().unwrap().submit_error.as_deref(), Some("HTTP 409"));
    }

    #[test]
    fn test_rejected_delete_clears_pending_and_keeps_row() {
        let callbacks = RecordingCallbacks {
            fail_with: Some("HTTP 500".into()),
            ..Default::default()
        };
        let records = vec![Record::new("1").with("name", "Alpha")];
        let mut ctl = controller();

        ctl.request_delete("1").unwrap();
        assert_eq!(ctl.state().pending_delete_id.as_deref(), Some("1"));

        let result = block_on(ctl.confirm_delete_with(&callbacks));
        assert_eq!(result, Err(ListViewError::Delete("HTTP 500".into())));
        assert!(ctl.state().pending_delete_id.is_none());
        assert_eq!(names(&ctl.view(&records)), vec!["Alpha"]);
        assert_eq!(*callbacks.calls.borrow(), vec!["delete:1".to_string()]);
    }

    #[test]
    fn test_cancel_delete() {
        let mut ctl = controller();
        ctl.request_delete("1").unwrap();
        ctl.cancel_delete();
        assert!(ctl.confirm_delete().is_none());
    }

    #[test]
    fn test_dialogs_are_exclusive() {
        let mut ctl = controller();
        ctl.open_add().unwrap();
        assert_eq!(ctl.request_delete("1"), Err(ListViewError::DialogAlreadyOpen));
        ctl.cancel_form().unwrap();

        ctl.request_delete("1").unwrap();
        assert_eq!(ctl.open_add(), Err(ListViewError::DialogAlreadyOpen));
    }

    #[test]
    fn test_permissions_gate_actions() {
        let viewer = Capability::new(UserRole::Viewer, vec!["department.edit".to_string()]);
        let mut ctl = ListViewController::new(config(), viewer);

        let actions = ctl.actions();
        assert!(!actions.add);
        assert!(actions.edit);
        assert!(!actions.delete);

        assert_eq!(ctl.open_add(), Err(ListViewError::Forbidden(Action::Add)));
        assert_eq!(ctl.request_delete("1"), Err(ListViewError::Forbidden(Action::Delete)));
        assert!(ctl.open_edit(&Record::new("1").with("name", "x")).is_ok());

        ctl.set_capability(Capability::admin());
        assert!(ctl.view(&[]).actions.delete);
    }

    #[test]
    fn test_unknown_input_field() {
        let mut ctl = controller();
        ctl.open_add().unwrap();
        assert_eq!(
            ctl.set_input("serial", "X"),
            Err(ListViewError::UnknownField("serial".into()))
        );
    }
}
