use crate::domain::a007_master_data::api::endpoint;
use crate::shared::list_view::entity_list_page;
use contracts::domain::a007_master_data::aggregate::{MasterDataItem, MasterDataKind};
use leptos::prelude::*;

/// Список одного справочника; все справочники используют один и тот же экран
#[component]
#[allow(non_snake_case)]
pub fn MasterDataList(kind: MasterDataKind) -> impl IntoView {
    entity_list_page::<MasterDataItem>(
        kind.label(),
        endpoint(kind),
        MasterDataItem::list_config_for(kind),
    )
}
