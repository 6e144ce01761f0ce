use crate::domain::a005_purchase_order::api::ENDPOINT;
use crate::shared::list_view::entity_list_page;
use contracts::domain::a005_purchase_order::aggregate::PurchaseOrder;
use contracts::shared::list_view::ListEntity;
use leptos::prelude::*;

#[component]
#[allow(non_snake_case)]
pub fn PurchaseOrderList() -> impl IntoView {
    entity_list_page::<PurchaseOrder>("Заказы поставщикам", ENDPOINT.to_string(), PurchaseOrder::list_config())
}
