use crate::shared::format::format_cell;
use crate::shared::icons::icon;
use crate::shared::list_utils::{get_sort_class, get_sort_indicator, highlight_matches};
use contracts::shared::list_view::{ColumnDef, ListViewModel, Record};
use leptos::prelude::*;

/// Таблица текущей страницы. Заголовки сортируемых колонок кликабельны,
/// совпадения поиска подсвечиваются в полях поиска.
#[component]
pub fn ListTable(
    columns: Vec<ColumnDef>,
    searchable_fields: Vec<String>,
    #[prop(into)] model: Signal<ListViewModel>,
    #[prop(into)] search_term: Signal<String>,
    /// Пока открыт диалог, кнопки строк недоступны
    #[prop(into)]
    dialog_open: Signal<bool>,
    on_sort: Callback<String>,
    on_edit: Callback<Record>,
    on_delete: Callback<String>,
) -> impl IntoView {
    let columns = StoredValue::new(columns);
    let searchable = StoredValue::new(searchable_fields);

    let has_actions = move || model.with(|m| m.actions.edit || m.actions.delete);
    let column_count = move || columns.with_value(|c| c.len()) + usize::from(has_actions());

    let header = columns
        .get_value()
        .into_iter()
        .map(|column| {
            if !column.sortable {
                return view! { <th class="table__header-cell">{column.label}</th> }.into_any();
            }
            let field = column.field.clone();
            let field_for_class = column.field.clone();
            let field_for_indicator = column.field;
            view! {
                <th
                    class="table__header-cell table__header-cell--sortable"
                    on:click=move |_| on_sort.run(field.clone())
                >
                    {column.label}
                    <span class=move || model.with(|m| get_sort_class(&m.sort_key, &field_for_class))>
                        {move || model.with(|m| {
                            get_sort_indicator(
                                &m.sort_key,
                                &field_for_indicator,
                                m.sort_direction.is_ascending(),
                            )
                        })}
                    </span>
                </th>
            }
            .into_any()
        })
        .collect_view();

    let body = move || {
        let model = model.get();
        if model.is_empty() {
            return view! {
                <tr class="table__row table__row--empty">
                    <td class="table__cell table__cell--empty" colspan=column_count().to_string()>
                        "Записи не найдены"
                    </td>
                </tr>
            }
            .into_any();
        }

        let term = search_term.get();
        let actions = model.actions;
        model
            .rows
            .into_iter()
            .map(|record| {
                let cells = columns.with_value(|cols| {
                    cols.iter()
                        .map(|column| {
                            let text =
                                format_cell(record.get(&column.field).as_deref(), column.format);
                            let content = if searchable.with_value(|s| s.contains(&column.field)) {
                                highlight_matches(&text, &term)
                            } else {
                                view! { <span>{text}</span> }.into_any()
                            };
                            view! { <td class="table__cell">{content}</td> }
                        })
                        .collect_view()
                });

                let id = record.id().to_string();
                let edit_button = actions.edit.then(|| {
                    let record = record.clone();
                    view! {
                        <button
                            class="button button--icon"
                            title="Редактировать"
                            disabled=move || dialog_open.get()
                            on:click=move |_| on_edit.run(record.clone())
                        >
                            {icon("edit")}
                        </button>
                    }
                });
                let delete_button = actions.delete.then(|| {
                    view! {
                        <button
                            class="button button--icon button--danger"
                            title="Удалить"
                            disabled=move || dialog_open.get()
                            on:click=move |_| on_delete.run(id.clone())
                        >
                            {icon("delete")}
                        </button>
                    }
                });
                let actions_cell = (actions.edit || actions.delete).then(|| {
                    view! {
                        <td class="table__cell table__cell--actions">
                            {edit_button}
                            {delete_button}
                        </td>
                    }
                });

                view! {
                    <tr class="table__row">
                        {cells}
                        {actions_cell}
                    </tr>
                }
            })
            .collect_view()
            .into_any()
    };

    view! {
        <div class="table">
            <table class="table__data table--striped">
                <thead class="table__head">
                    <tr>
                        {header}
                        <Show when=has_actions>
                            <th class="table__header-cell table__header-cell--actions">"Действия"</th>
                        </Show>
                    </tr>
                </thead>
                <tbody>{body}</tbody>
            </table>
        </div>
    }
}
