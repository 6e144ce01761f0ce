use crate::domain::a004_software_license::api::ENDPOINT;
use crate::shared::list_view::entity_list_page;
use contracts::domain::a004_software_license::aggregate::SoftwareLicense;
use contracts::shared::list_view::ListEntity;
use leptos::prelude::*;

#[component]
#[allow(non_snake_case)]
pub fn SoftwareLicenseList() -> impl IntoView {
    entity_list_page::<SoftwareLicense>("Лицензии ПО", ENDPOINT.to_string(), SoftwareLicense::list_config())
}
