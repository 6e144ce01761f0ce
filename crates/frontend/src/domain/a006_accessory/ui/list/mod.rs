use crate::domain::a006_accessory::api::ENDPOINT;
use crate::shared::list_view::entity_list_page;
use contracts::domain::a006_accessory::aggregate::Accessory;
use contracts::shared::list_view::ListEntity;
use leptos::prelude::*;

#[component]
#[allow(non_snake_case)]
pub fn AccessoryList() -> impl IntoView {
    entity_list_page::<Accessory>("Аксессуары", ENDPOINT.to_string(), Accessory::list_config())
}
