use crate::domain::a002_employee::api::ENDPOINT;
use crate::shared::list_view::entity_list_page;
use contracts::domain::a002_employee::aggregate::Employee;
use contracts::shared::list_view::ListEntity;
use leptos::prelude::*;

#[component]
#[allow(non_snake_case)]
pub fn EmployeeList() -> impl IntoView {
    entity_list_page::<Employee>("Сотрудники", ENDPOINT.to_string(), Employee::list_config())
}
