use super::callbacks::RestCallbacks;
use super::view::ListView;
use crate::shared::api_utils::fetch_list;
use crate::shared::config::{app_config, ListDefaults};
use contracts::shared::list_view::{ListEntity, ListViewConfig, Record};
use leptos::prelude::*;
use leptos::task::spawn_local;
use serde::de::DeserializeOwned;

/// Размер страницы и варианты выбора из настроек приложения
pub fn apply_list_defaults(config: ListViewConfig, defaults: &ListDefaults) -> ListViewConfig {
    let options = defaults.page_size_options.clone();
    match config.clone().with_page_size(defaults.page_size) {
        Ok(config) => config.with_page_size_options(options),
        Err(e) => {
            log::warn!("lists.page_size ignored: {}", e);
            config
        }
    }
}

/// Экран списка сущности: загрузка `GET {endpoint}` и универсальный список.
pub fn entity_list_page<E>(
    title: &'static str,
    endpoint: String,
    config: ListViewConfig,
) -> impl IntoView
where
    E: ListEntity + DeserializeOwned + 'static,
{
    let config = apply_list_defaults(config, &app_config().lists);

    let (records, set_records) = signal::<Vec<Record>>(Vec::new());
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);

    let fetch = {
        let endpoint = endpoint.clone();
        Callback::new(move |_: ()| {
            let endpoint = endpoint.clone();
            set_loading.set(true);
            spawn_local(async move {
                match fetch_list::<E>(&endpoint).await {
                    Ok(items) => {
                        log::debug!("{}: {} items loaded", endpoint, items.len());
                        set_records.set(items.iter().map(ListEntity::to_record).collect());
                        set_error.set(None);
                    }
                    Err(e) => {
                        log::error!("{}: {}", endpoint, e);
                        set_error.set(Some(e));
                    }
                }
                set_loading.set(false);
            });
        })
    };

    fetch.run(());

    view! {
        <ListView
            title=title
            config=config
            records=records
            loading=loading
            load_error=error
            on_refresh=fetch
            callbacks=RestCallbacks::new(endpoint)
        />
    }
}
