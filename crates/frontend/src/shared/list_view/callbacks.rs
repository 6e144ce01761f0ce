use crate::shared::api_utils::{create_item, delete_item, update_item};
use async_trait::async_trait;
use contracts::shared::list_view::{Draft, ListCallbacks};

/// Сохранение через REST: `POST {endpoint}`, `PUT/DELETE {endpoint}/{id}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestCallbacks {
    endpoint: String,
}

impl RestCallbacks {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait(?Send)]
impl ListCallbacks for RestCallbacks {
    async fn on_add(&self, draft: Draft) -> Result<(), String> {
        log::debug!("POST {}", self.endpoint);
        create_item(&self.endpoint, &draft).await
    }

    async fn on_edit(&self, id: &str, draft: Draft) -> Result<(), String> {
        log::debug!("PUT {}/{}", self.endpoint, id);
        update_item(&self.endpoint, id, &draft).await
    }

    async fn on_delete(&self, id: &str) -> Result<(), String> {
        log::debug!("DELETE {}/{}", self.endpoint, id);
        delete_item(&self.endpoint, id).await
    }
}
