//! Боковое меню с группами разделов. Группы и пункты, на которые у
//! пользователя нет прав, не показываются.

use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::{master_data_tab_key, tab_label_for_key};
use crate::shared::icons::icon;
use crate::system::auth::context::use_capability;
use contracts::domain::a007_master_data::aggregate::MasterDataKind;
use contracts::system::auth::Capability;
use leptos::prelude::*;

#[derive(Clone, Debug, PartialEq)]
pub struct MenuItem {
    pub id: String,
    pub label: &'static str,
    pub icon: &'static str,
    /// Право на просмотр раздела; `None`: доступно всем
    pub permission: Option<&'static str>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MenuGroup {
    pub id: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
    pub items: Vec<MenuItem>,
    pub permission: Option<&'static str>,
}

fn item(id: &str, icon: &'static str, permission: Option<&'static str>) -> MenuItem {
    MenuItem {
        id: id.to_string(),
        label: tab_label_for_key(id),
        icon,
        permission,
    }
}

pub fn get_menu_groups() -> Vec<MenuGroup> {
    vec![
        MenuGroup {
            id: "inventory",
            label: "Учёт",
            icon: "package",
            items: vec![
                item("a001_asset", "laptop", None),
                item("a006_accessory", "mouse", None),
                item("a003_sim_card", "smartphone", Some("sim_cards.view")),
                item("a004_software_license", "key", Some("software_licenses.view")),
            ],
            permission: None,
        },
        MenuGroup {
            id: "procurement",
            label: "Закупки",
            icon: "shopping-cart",
            items: vec![item(
                "a005_purchase_order",
                "file-text",
                Some("purchase_orders.view"),
            )],
            permission: None,
        },
        MenuGroup {
            id: "people",
            label: "Персонал",
            icon: "users",
            items: vec![item("a002_employee", "user", Some("employees.view"))],
            permission: None,
        },
        MenuGroup {
            id: "master_data",
            label: "Справочники",
            icon: "database",
            items: MasterDataKind::ALL
                .iter()
                .map(|kind| MenuItem {
                    id: master_data_tab_key(*kind),
                    label: kind.label(),
                    icon: "list",
                    permission: None,
                })
                .collect(),
            permission: Some("master_data.view"),
        },
    ]
}

/// Группы меню, видимые пользователю. Пустые группы скрываются.
pub fn visible_menu_groups(capability: &Capability) -> Vec<MenuGroup> {
    get_menu_groups()
        .into_iter()
        .filter(|group| capability.allows_opt(group.permission))
        .filter_map(|mut group| {
            group
                .items
                .retain(|item| capability.allows_opt(item.permission));
            (!group.items.is_empty()).then_some(group)
        })
        .collect()
}

/// Доступ к разделу по ключу таба: те же права, что у пункта меню и его группы.
/// Ключи, которых нет в меню, не ограничиваются.
pub fn is_tab_allowed(capability: &Capability, key: &str) -> bool {
    get_menu_groups().iter().all(|group| {
        group
            .items
            .iter()
            .filter(|item| item.id == key)
            .all(|item| {
                capability.allows_opt(group.permission) && capability.allows_opt(item.permission)
            })
    })
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let capability = use_capability();

    let expanded_groups = RwSignal::new(vec!["inventory".to_string()]);

    view! {
        <div class="app-sidebar__content">
            {move || {
                visible_menu_groups(&capability.get())
                    .into_iter()
                    .map(|group| {
                        let group_id = group.id.to_string();
                        let group_id_for_exp = group_id.clone();
                        let group_id_for_click = group_id.clone();
                        let items_stored = StoredValue::new(group.items);

                        view! {
                            <div>
                                <div
                                    class="app-sidebar__item"
                                    style:padding-left="12px"
                                    on:click=move |_| {
                                        let gid = group_id_for_click.clone();
                                        expanded_groups.update(move |items| {
                                            if let Some(pos) = items.iter().position(|x| x == &gid) {
                                                items.remove(pos);
                                            } else {
                                                items.push(gid);
                                            }
                                        });
                                    }
                                >
                                    <div class="app-sidebar__item-content">
                                        {icon(group.icon)}
                                        <span>{group.label}</span>
                                    </div>
                                    <div
                                        class="app-sidebar__chevron"
                                        class:app-sidebar__chevron--expanded=move || expanded_groups.get().contains(&group_id_for_exp)
                                    >
                                        {icon("chevron-right")}
                                    </div>
                                </div>

                                <Show when=move || expanded_groups.get().contains(&group_id)>
                                    <div class="app-sidebar__children">
                                        {items_stored.get_value().into_iter().map(|menu_item| {
                                            let item_id = StoredValue::new(menu_item.id.clone());
                                            let label = menu_item.label;
                                            view! {
                                                <div
                                                    class="app-sidebar__item"
                                                    class:app-sidebar__item--active=move || {
                                                        let iid = item_id.get_value();
                                                        ctx.active.get().as_ref().map(|a| a == &iid).unwrap_or(false)
                                                    }
                                                    style:padding-left="10px"
                                                    on:click=move |_| {
                                                        ctx.open_tab(&item_id.get_value(), label);
                                                    }
                                                >
                                                    <div class="app-sidebar__item-content">
                                                        {icon(menu_item.icon)}
                                                        <span>{label}</span>
                                                    </div>
                                                </div>
                                            }
                                        }).collect_view()}
                                    </div>
                                </Show>
                            </div>
                        }
                    })
                    .collect_view()
            }}
        </div>
    }
}
