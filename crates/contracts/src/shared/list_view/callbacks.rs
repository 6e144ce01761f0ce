use super::error::ListViewError;
use super::record::Draft;
use async_trait::async_trait;

/// Операции сохранения, которые список делегирует вызывающему коду.
///
/// Реализация обычно обращается к REST API. Ошибка возвращается строкой,
/// которую список показывает пользователю.
#[async_trait(?Send)]
pub trait ListCallbacks {
    async fn on_add(&self, draft: Draft) -> Result<(), String>;

    async fn on_edit(&self, id: &str, draft: Draft) -> Result<(), String>;

    async fn on_delete(&self, id: &str) -> Result<(), String>;
}

/// Удалить запись через `on_delete`. Ошибка пишется в лог и возвращается
/// как `ListViewError::Delete` для уведомления.
pub async fn delete_record<C: ListCallbacks + ?Sized>(
    callbacks: &C,
    id: &str,
) -> Result<(), ListViewError> {
    callbacks.on_delete(id).await.map_err(|message| {
        log::warn!("delete of {} rejected: {}", id, message);
        ListViewError::Delete(message)
    })
}
