use super::form_dialog::FormDialog;
use super::table::ListTable;
use crate::shared::components::{FilterPanel, FilterTag, PaginationControls};
use crate::shared::icons::icon;
use crate::shared::list_utils::SearchInput;
use crate::shared::modal::Modal;
use crate::system::auth::context::use_capability;
use contracts::shared::list_view::{
    delete_record, FilterSelection, FormMode, ListCallbacks, ListViewConfig, ListViewController,
    Record,
};
use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

/// Сколько показывается сообщение о неудачном удалении
const DELETE_ERROR_TIMEOUT_MS: u32 = 5_000;

/// Универсальный список.
///
/// Коллекция `records` принадлежит вызывающему коду; после успешного сохранения
/// или удаления список вызывает `on_refresh` и ждёт новую коллекцию.
#[component]
pub fn ListView<C>(
    #[prop(into)] title: String,
    config: ListViewConfig,
    #[prop(into)] records: Signal<Vec<Record>>,
    #[prop(into)] loading: Signal<bool>,
    #[prop(into)] load_error: Signal<Option<String>>,
    on_refresh: Callback<()>,
    callbacks: C,
) -> impl IntoView
where
    C: ListCallbacks + Clone + Send + Sync + 'static,
{
    let capability = use_capability();

    let columns = config.columns.clone();
    let form_columns: Vec<_> = config.form_columns().cloned().collect();
    let required_fields: Vec<String> = config
        .required_fields()
        .into_iter()
        .map(str::to_string)
        .collect();
    let searchable_fields = config.searchable_fields.clone();
    let filter_fields: Vec<(String, String)> = config
        .filterable_fields
        .iter()
        .map(|field| {
            let label = config
                .find_column(field)
                .map(|c| c.label.clone())
                .unwrap_or_else(|| field.clone());
            (field.clone(), label)
        })
        .collect();
    let page_size_options = config.page_size_options.clone();

    let controller = RwSignal::new(ListViewController::new(
        config,
        capability.get_untracked(),
    ));

    Effect::new(move |_| {
        let capability = capability.get();
        controller.update(|c| c.set_capability(capability));
    });

    let model = Memo::new(move |_| records.with(|items| controller.with(|c| c.view(items))));

    // Номер страницы, вышедший за границы после фильтрации или обновления, сохраняем приведённым
    Effect::new(move |_| {
        let page = model.with(|m| m.current_page);
        if controller.with_untracked(|c| c.state().current_page) != page {
            records.with_untracked(|items| {
                controller.update(|c| {
                    c.sync(items);
                })
            });
        }
    });

    let filters_expanded = RwSignal::new(false);
    let delete_error = RwSignal::new(None::<String>);

    let search_term = Signal::derive(move || controller.with(|c| c.state().search_term.clone()));
    let dialog_open = Signal::derive(move || controller.with(|c| c.is_dialog_open()));
    let active_filters_count = Signal::derive(move || controller.with(|c| c.active_filter_count()));

    let on_search = Callback::new(move |term: String| {
        controller.update(|c| c.set_search_term(&term));
    });

    let on_sort = Callback::new(move |field: String| {
        controller.update(|c| {
            c.toggle_sort(&field);
        });
    });

    let on_add = move || {
        controller.update(|c| {
            if let Err(e) = c.open_add() {
                log::warn!("add form not opened: {}", e);
            }
        });
    };

    let on_edit = Callback::new(move |record: Record| {
        controller.update(|c| {
            if let Err(e) = c.open_edit(&record) {
                log::warn!("edit form for {} not opened: {}", record.id(), e);
            }
        });
    });

    let on_request_delete = Callback::new(move |id: String| {
        controller.update(|c| {
            if let Err(e) = c.request_delete(&id) {
                log::warn!("delete of {} not requested: {}", id, e);
            }
        });
    });

    let on_cancel_form = Callback::new(move |_: ()| {
        controller.update(|c| {
            if let Err(e) = c.cancel_form() {
                log::debug!("form not cancelled: {}", e);
            }
        });
    });

    // Те же шаги, что `ListViewController::submit`, но контроллер в сигнале
    // не удерживается на время запроса
    let on_save = {
        let callbacks = callbacks.clone();
        Callback::new(move |_: ()| {
            let request = match controller.try_update(|c| c.begin_submit()) {
                Some(Ok(request)) => request,
                Some(Err(e)) => {
                    log::debug!("submit blocked: {}", e);
                    return;
                }
                None => return,
            };
            let callbacks = callbacks.clone();
            spawn_local(async move {
                let result = request.dispatch(&callbacks).await;
                let saved = result.is_ok();
                controller.update(|c| {
                    if let Err(e) = c.complete_submit(result) {
                        log::debug!("submit finished with error: {}", e);
                    }
                });
                if saved {
                    on_refresh.run(());
                }
            });
        })
    };

    let on_confirm_delete = Callback::new(move |_: ()| {
        let Some(id) = controller.try_update(|c| c.confirm_delete()).flatten() else {
            return;
        };
        let callbacks = callbacks.clone();
        spawn_local(async move {
            match delete_record(&callbacks, &id).await {
                Ok(()) => on_refresh.run(()),
                Err(e) => {
                    let shown = e.to_string();
                    delete_error.set(Some(shown.clone()));
                    Timeout::new(DELETE_ERROR_TIMEOUT_MS, move || {
                        delete_error.update(|e| {
                            if e.as_deref() == Some(shown.as_str()) {
                                *e = None;
                            }
                        });
                    })
                    .forget();
                }
            }
        });
    });

    let on_cancel_delete = Callback::new(move |_: ()| {
        controller.update(|c| c.cancel_delete());
    });

    let pagination = {
        let page_size_options = page_size_options.clone();
        move || {
            view! {
                <PaginationControls
                    current_page=Signal::derive(move || model.with(|m| m.current_page))
                    total_pages=Signal::derive(move || model.with(|m| m.total_pages))
                    total_count=Signal::derive(move || model.with(|m| m.filtered_count))
                    page_size=Signal::derive(move || {
                        controller.with(|c| c.state().page_size.get())
                    })
                    on_page_change=Callback::new(move |page: usize| {
                        controller.update(|c| c.go_to_page(page));
                    })
                    on_page_size_change=Callback::new(move |size: usize| {
                        controller.update(|c| {
                            if let Err(e) = c.set_page_size(size) {
                                log::warn!("page size {} rejected: {}", size, e);
                            }
                        });
                    })
                    page_size_options=page_size_options.clone()
                />
            }
        }
    };

    let filter_fields = StoredValue::new(filter_fields);
    let filter_content = move || {
        let selects = filter_fields
            .get_value()
            .into_iter()
            .map(|(field, label)| filter_select(field, label, controller, model))
            .collect_view();
        view! {
            <div class="filter-panel__fields">
                <SearchInput value=search_term on_change=on_search />
                {selects}
                <button
                    class="button button--secondary"
                    on:click=move |_| controller.update(|c| c.clear_filters())
                >
                    "Сбросить"
                </button>
            </div>
        }
    };

    let filter_tags = move || {
        let labels = filter_fields.get_value();
        let active: Vec<(String, String)> = controller.with(|c| {
            c.state()
                .active_filters
                .iter()
                .filter_map(|(field, selection)| match selection {
                    FilterSelection::Value(value) => Some((field.clone(), value.clone())),
                    FilterSelection::All => None,
                })
                .collect()
        });
        active
            .into_iter()
            .map(|(field, value)| {
                let label = labels
                    .iter()
                    .find(|(f, _)| *f == field)
                    .map(|(_, l)| l.clone())
                    .unwrap_or_else(|| field.clone());
                view! {
                    <FilterTag
                        label=format!("{}: {}", label, value)
                        on_remove=Callback::new(move |_| {
                            controller.update(|c| {
                                let _ = c.set_filter(&field, FilterSelection::All);
                            });
                        })
                    />
                }
            })
            .collect_view()
    };

    let form_title = {
        let title = title.clone();
        Signal::derive(move || {
            match controller.with(|c| c.form().map(|f| f.mode.clone())) {
                Some(FormMode::Edit { .. }) => format!("Редактирование: {}", title),
                _ => format!("Добавление: {}", title),
            }
        })
    };

    let pending_delete_name = move || {
        let id = controller.with(|c| c.state().pending_delete_id.clone())?;
        records.with(|items| {
            items
                .iter()
                .find(|r| r.id() == id)
                .map(|r| r.display("name"))
        })
    };

    let form_columns = StoredValue::new(form_columns);
    let required_fields = StoredValue::new(required_fields);

    view! {
        <div class="page">
            <div class="header">
                <div class="header__content">
                    <h1 class="header__title">{title}</h1>
                    <Show when=move || loading.get()>
                        <Spinner size=SpinnerSize::Tiny />
                    </Show>
                </div>
                <div class="header__actions">
                    <Show when=move || model.with(|m| m.actions.add)>
                        <Button
                            appearance=ButtonAppearance::Primary
                            on_click=move |_| on_add()
                            disabled=dialog_open
                        >
                            {icon("plus")}
                            "Добавить"
                        </Button>
                    </Show>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| on_refresh.run(())
                        disabled=Signal::derive(move || loading.get())
                    >
                        {icon("refresh")}
                        "Обновить"
                    </Button>
                </div>
            </div>

            {move || load_error.get().map(|e| view! {
                <div class="warning-box warning-box--error">
                    <span class="warning-box__icon">{icon("alert")}</span>
                    <span class="warning-box__text">{format!("Ошибка загрузки: {}", e)}</span>
                </div>
            })}

            {move || delete_error.get().map(|e| view! {
                <div class="warning-box warning-box--error">
                    <span class="warning-box__icon">{icon("alert")}</span>
                    <span class="warning-box__text">{e}</span>
                    <button
                        class="button button--icon warning-box__close"
                        title="Закрыть"
                        on:click=move |_| delete_error.set(None)
                    >
                        {icon("x")}
                    </button>
                </div>
            })}

            <FilterPanel
                is_expanded=filters_expanded
                active_filters_count=active_filters_count
                pagination_controls=pagination
                filter_content=filter_content
                filter_tags=filter_tags
            />

            <ListTable
                columns=columns
                searchable_fields=searchable_fields
                model=model
                search_term=search_term
                dialog_open=dialog_open
                on_sort=on_sort
                on_edit=on_edit
                on_delete=on_request_delete
            />

            <Show when=move || controller.with(|c| c.form().is_some())>
                <FormDialog
                    controller=controller
                    columns=form_columns.get_value()
                    required_fields=required_fields.get_value()
                    title=form_title
                    on_save=on_save
                    on_cancel=on_cancel_form
                />
            </Show>

            <Show when=move || controller.with(|c| c.state().pending_delete_id.is_some())>
                <Modal
                    title="Удаление записи".to_string()
                    on_close=on_cancel_delete
                    footer=ViewFn::from(move || view! {
                        <Button
                            appearance=ButtonAppearance::Primary
                            on_click=move |_| on_confirm_delete.run(())
                        >
                            "Удалить"
                        </Button>
                        <Button
                            appearance=ButtonAppearance::Secondary
                            on_click=move |_| on_cancel_delete.run(())
                        >
                            "Отмена"
                        </Button>
                    })
                >
                    <p>
                        {move || match pending_delete_name() {
                            Some(name) if !name.is_empty() => format!("Удалить «{}»?", name),
                            _ => "Удалить запись?".to_string(),
                        }}
                    </p>
                </Modal>
            </Show>
        </div>
    }
}

/// Выпадающий фильтр по одному полю: «Все» и значения из всей коллекции
fn filter_select(
    field: String,
    label: String,
    controller: RwSignal<ListViewController>,
    model: Memo<contracts::shared::list_view::ListViewModel>,
) -> impl IntoView {
    let current = {
        let field = field.clone();
        move || {
            controller.with(|c| {
                c.state()
                    .active_filters
                    .get(&field)
                    .map(|s| s.as_option().to_string())
                    .unwrap_or_default()
            })
        }
    };
    let field_for_options = field.clone();
    let options = move || {
        let current = current.clone();
        model
            .with(|m| m.filter_options.get(&field_for_options).cloned())
            .unwrap_or_default()
            .into_iter()
            .map(move |option| {
                let selected = current() == option;
                view! {
                    <option value=option.clone() selected=selected>
                        {option.clone()}
                    </option>
                }
            })
            .collect_view()
    };

    view! {
        <div class="filter-panel__field">
            <label class="form__label">{label}</label>
            <select
                class="form__select"
                on:change=move |ev| {
                    let value = event_target_value(&ev);
                    controller.update(|c| {
                        if let Err(e) = c.set_filter(&field, FilterSelection::from_option(&value)) {
                            log::warn!("filter not applied: {}", e);
                        }
                    });
                }
            >
                <option value="">"Все"</option>
                {options}
            </select>
        </div>
    }
}
