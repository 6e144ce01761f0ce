//! Tab content registry - маппинг tab.key → View

use super::tab_labels::master_data_kind_for_key;
use crate::layout::left::sidebar::is_tab_allowed;
use crate::domain::a001_asset::ui::list::AssetList;
use crate::domain::a002_employee::ui::list::EmployeeList;
use crate::domain::a003_sim_card::ui::list::SimCardList;
use crate::domain::a004_software_license::ui::list::SoftwareLicenseList;
use crate::domain::a005_purchase_order::ui::list::PurchaseOrderList;
use crate::domain::a006_accessory::ui::list::AccessoryList;
use crate::domain::a007_master_data::ui::list::MasterDataList;
use crate::system::auth::context::use_capability;
use leptos::prelude::*;

/// Рендерит контент таба по его ключу.
///
/// Таб, открытый по ссылке (`?active=`), проверяется по тем же правам, что и
/// пункт меню. Для неизвестных ключей возвращает заглушку.
pub fn render_tab_content(key: &str) -> AnyView {
    let capability = use_capability();
    let allowed = {
        let key = key.to_string();
        Memo::new(move |_| capability.with(|c| is_tab_allowed(c, &key)))
    };
    let key = key.to_string();
    (move || {
        if allowed.get() {
            tab_view(&key)
        } else {
            log::warn!("tab {} hidden: no view permission", key);
            view! { <div class="placeholder">"Нет доступа к разделу"</div> }.into_any()
        }
    })
    .into_any()
}

fn tab_view(key: &str) -> AnyView {
    match key {
        "a001_asset" => view! { <AssetList /> }.into_any(),
        "a002_employee" => view! { <EmployeeList /> }.into_any(),
        "a003_sim_card" => view! { <SimCardList /> }.into_any(),
        "a004_software_license" => view! { <SoftwareLicenseList /> }.into_any(),
        "a005_purchase_order" => view! { <PurchaseOrderList /> }.into_any(),
        "a006_accessory" => view! { <AccessoryList /> }.into_any(),
        _ => match master_data_kind_for_key(key) {
            Some(kind) => view! { <MasterDataList kind=kind /> }.into_any(),
            None => {
                log::warn!("unknown tab key: {}", key);
                view! {
                    <div class="placeholder">{format!("Раздел «{}» не найден", key)}</div>
                }
                .into_any()
            }
        },
    }
}
