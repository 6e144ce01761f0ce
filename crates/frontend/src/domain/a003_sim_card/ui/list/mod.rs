use crate::domain::a003_sim_card::api::ENDPOINT;
use crate::shared::list_view::entity_list_page;
use contracts::domain::a003_sim_card::aggregate::SimCard;
use contracts::shared::list_view::ListEntity;
use leptos::prelude::*;

#[component]
#[allow(non_snake_case)]
pub fn SimCardList() -> impl IntoView {
    entity_list_page::<SimCard>("SIM-карты", ENDPOINT.to_string(), SimCard::list_config())
}
