use crate::domain::a001_asset::api::ENDPOINT;
use crate::shared::list_view::entity_list_page;
use contracts::domain::a001_asset::aggregate::Asset;
use contracts::shared::list_view::ListEntity;
use leptos::prelude::*;

#[component]
#[allow(non_snake_case)]
pub fn AssetList() -> impl IntoView {
    entity_list_page::<Asset>("Активы", ENDPOINT.to_string(), Asset::list_config())
}
