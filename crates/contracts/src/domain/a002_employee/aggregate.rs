use crate::domain::common::{EntityMetadata, EntityStatus};
use crate::shared::list_view::{
    ActionPermissions, ColumnDef, ColumnFormat, FieldKind, ListEntity, ListViewConfig, Record,
    ValidationRules,
};
use serde::{Deserialize, Serialize};

/// Сотрудник, за которым закрепляются активы
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    pub id: String,
    pub employee_code: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub designation: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub status: EntityStatus,
    #[serde(flatten)]
    pub metadata: EntityMetadata,
}

impl ListEntity for Employee {
    fn to_record(&self) -> Record {
        let record = Record::new(&self.id)
            .with("employee_code", self.employee_code.as_str())
            .with("name", self.name.as_str())
            .with("status", self.status.as_str())
            .with_opt("email", self.email.clone())
            .with_opt("phone", self.phone.clone())
            .with_opt("department", self.department.clone())
            .with_opt("designation", self.designation.clone())
            .with_opt("location", self.location.clone());
        match self.metadata.created_at {
            Some(created_at) => record.created(created_at),
            None => record,
        }
    }

    fn list_config() -> ListViewConfig {
        ListViewConfig::new("name")
            .column(ColumnDef::new("employee_code", "Табельный номер"))
            .column(ColumnDef::new("name", "ФИО"))
            .column(ColumnDef::new("email", "E-mail"))
            .column(ColumnDef::new("phone", "Телефон").not_sortable())
            .column(ColumnDef::new("department", "Подразделение"))
            .column(ColumnDef::new("designation", "Должность"))
            .column(ColumnDef::new("location", "Площадка"))
            .column(ColumnDef::new("status", "Статус").enumeration(&EntityStatus::ALL))
            .column(
                ColumnDef::new("created_at", "Создано")
                    .kind(FieldKind::Date)
                    .format(ColumnFormat::DateTime)
                    .read_only(),
            )
            .searchable(&["employee_code", "name", "email", "designation"])
            .filterable(&["department", "location", "status"])
            .required(&["employee_code", "email"])
            .rule(
                "email",
                ValidationRules::required().with_min_length(3).with_max_length(254),
            )
            .permissions(ActionPermissions::for_entity("employees"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_employee_to_record() {
        let employee: Employee = serde_json::from_str(
            r#"{"id":"e1","employee_code":"EMP-001","name":"Петров П.П.","department":"ИТ"}"#,
        )
        .unwrap();
        let record = employee.to_record();
        assert_eq!(record.display("department"), "ИТ");
        assert_eq!(record.display("status"), "active");
        assert!(record.created_at().is_none());
    }

    #[test]
    fn test_list_config_is_consistent() {
        let config = Employee::list_config();
        assert!(config.validate().is_ok());
        assert!(config.rules_for("email").is_required());
        assert!(!config.is_sortable("phone"));
    }

    #[test]
    fn test_edit_payload_matches_employee_contract() {
        let employee: Employee = serde_json::from_str(
            r#"{"id":"e1","employee_code":"T-017","name":"Петров П.П.",
                "email":"petrov@example.com","status":"inactive"}"#,
        )
        .unwrap();
        let payload = crate::shared::list_view::edit_payload(&employee);
        let back: Employee = serde_json::from_value(payload).unwrap();
        assert_eq!(back.employee_code, "T-017");
        assert_eq!(back.email.as_deref(), Some("petrov@example.com"));
        assert_eq!(back.status, EntityStatus::Inactive);
    }
}
