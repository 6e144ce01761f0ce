use crate::shared::icons::icon;
use crate::shared::modal::Modal;
use contracts::shared::list_view::{ColumnDef, FieldKind, FieldValue, ListViewController};
use leptos::prelude::*;
use thaw::*;

/// Форма добавления/редактирования записи.
///
/// Черновик хранится в контроллере; каждое изменение поля заменяет его целиком.
#[component]
pub fn FormDialog(
    controller: RwSignal<ListViewController>,
    /// Редактируемые колонки в порядке таблицы
    columns: Vec<ColumnDef>,
    required_fields: Vec<String>,
    #[prop(into)] title: Signal<String>,
    on_save: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let submitting = move || controller.with(|c| c.form().map(|f| f.submitting).unwrap_or(false));
    let submit_error = move || controller.with(|c| c.form().and_then(|f| f.submit_error.clone()));

    let fields = columns
        .into_iter()
        .map(|column| {
            let required = required_fields.contains(&column.field);
            form_field(column, required, controller)
        })
        .collect_view();

    let footer = move || {
        view! {
            <Button
                appearance=ButtonAppearance::Primary
                on_click=move |_| on_save.run(())
                disabled=Signal::derive(submitting)
                loading=Signal::derive(submitting)
            >
                "Сохранить"
            </Button>
            <Button
                appearance=ButtonAppearance::Secondary
                on_click=move |_| on_cancel.run(())
                disabled=Signal::derive(submitting)
            >
                "Отмена"
            </Button>
        }
    };

    view! {
        <Modal
            title=title
            on_close=on_cancel
            closable=Signal::derive(move || !submitting())
            footer=ViewFn::from(footer)
        >
            <form class="form" on:submit=move |ev| {
                ev.prevent_default();
                on_save.run(());
            }>
                {move || submit_error().map(|e| view! {
                    <div class="warning-box warning-box--error">
                        <span class="warning-box__icon">{icon("alert")}</span>
                        <span class="warning-box__text">{e}</span>
                    </div>
                })}
                {fields}
            </form>
        </Modal>
    }
}

fn form_field(column: ColumnDef, required: bool, controller: RwSignal<ListViewController>) -> AnyView {
    let field = column.field.clone();
    let field_for_error = column.field.clone();
    let error = move || {
        controller.with(|c| {
            c.form()
                .and_then(|f| f.field_errors.get(&field_for_error).cloned())
        })
    };
    let disabled = move || controller.with(|c| c.form().map(|f| f.submitting).unwrap_or(false));

    let input = field_input(column.kind, field, controller, disabled);
    let has_error = {
        let error = error.clone();
        move || error().is_some()
    };

    view! {
        <div class="form__group" class:form__group--invalid=has_error>
            <label class="form__label">
                {column.label}
                {required.then(|| view! { <span class="form__required">" *"</span> })}
            </label>
            {input}
            {move || error().map(|e| view! { <span class="form__error">{e}</span> })}
        </div>
    }
    .into_any()
}

fn field_input(
    kind: FieldKind,
    field: String,
    controller: RwSignal<ListViewController>,
    disabled: impl Fn() -> bool + Copy + Send + Sync + 'static,
) -> AnyView {
    let value = {
        let field = field.clone();
        move || {
            controller.with(|c| {
                c.form()
                    .map(|f| f.draft.input_value(&field))
                    .unwrap_or_default()
            })
        }
    };
    let on_input = {
        let field = field.clone();
        move |ev: leptos::ev::Event| {
            let raw = event_target_value(&ev);
            controller.update(|c| {
                if let Err(e) = c.set_input(&field, &raw) {
                    log::warn!("field {} not updated: {}", field, e);
                }
            });
        }
    };

    match kind {
        FieldKind::Enum(options) => {
            let current = value.clone();
            view! {
                <select class="form__select" disabled=disabled on:change=on_input>
                    <option value="">"—"</option>
                    {options
                        .into_iter()
                        .map(|option| {
                            let current = current.clone();
                            let option_for_check = option.clone();
                            view! {
                                <option
                                    value=option.clone()
                                    selected=move || current() == option_for_check
                                >
                                    {option.clone()}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
            }
            .into_any()
        }
        FieldKind::Bool => {
            let field_for_check = field.clone();
            let checked = move || {
                controller.with(|c| {
                    matches!(
                        c.form().and_then(|f| f.draft.get(&field_for_check)),
                        Some(FieldValue::Bool(true))
                    )
                })
            };
            view! {
                <input
                    type="checkbox"
                    class="form__checkbox"
                    prop:checked=checked
                    disabled=disabled
                    on:change=move |ev| {
                        let checked = event_target_checked(&ev);
                        controller.update(|c| {
                            if let Err(e) = c.set_field(&field, Some(FieldValue::Bool(checked))) {
                                log::warn!("field {} not updated: {}", field, e);
                            }
                        });
                    }
                />
            }
            .into_any()
        }
        FieldKind::Date => view! {
            <input
                type="date"
                class="form__input"
                prop:value=value
                disabled=disabled
                on:change=on_input
            />
        }
        .into_any(),
        // Текстовое поле: нечисловой ввод должен дойти до валидации
        FieldKind::Number => view! {
            <input
                type="text"
                inputmode="decimal"
                class="form__input form__input--number"
                prop:value=value
                disabled=disabled
                on:input=on_input
            />
        }
        .into_any(),
        FieldKind::Integer => view! {
            <input
                type="text"
                inputmode="numeric"
                class="form__input form__input--number"
                prop:value=value
                disabled=disabled
                on:input=on_input
            />
        }
        .into_any(),
        FieldKind::Text => view! {
            <input
                type="text"
                class="form__input"
                prop:value=value
                disabled=disabled
                on:input=on_input
            />
        }
        .into_any(),
    }
}
