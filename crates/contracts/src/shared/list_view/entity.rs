use super::config::ListViewConfig;
use super::record::Record;

/// Адаптер сущности для универсального списка
pub trait ListEntity {
    /// Представление сущности строкой таблицы
    fn to_record(&self) -> Record;

    /// Конфигурация списка: колонки, поиск, фильтры, обязательные поля
    fn list_config() -> ListViewConfig;
}

/// Тело PUT-запроса для неизменённой сущности, дополненное `id`:
/// ровно то, что отправит форма редактирования после валидации.
#[cfg(test)]
pub(crate) fn edit_payload<E: ListEntity>(entity: &E) -> serde_json::Value {
    use super::controller::ListViewController;
    use super::form::SubmitRequest;
    use crate::system::auth::Capability;

    let record = entity.to_record();
    let mut controller = ListViewController::new(E::list_config(), Capability::admin());
    controller.open_edit(&record).unwrap();
    let (id, draft) = match controller.begin_submit().unwrap() {
        SubmitRequest::Edit { id, draft } => (id, draft),
        other => panic!("unexpected request: {:?}", other),
    };
    let mut json = draft.to_json();
    json.as_object_mut()
        .unwrap()
        .insert(super::record::ID_FIELD.to_string(), id.into());
    json
}
