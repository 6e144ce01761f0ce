use crate::domain::common::EntityMetadata;
use crate::shared::list_view::{
    ActionPermissions, ColumnDef, ColumnFormat, FieldKind, ListEntity, ListViewConfig, Record,
    ValidationRules,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Жизненный цикл актива
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AssetStatus {
    #[default]
    InStock,
    Assigned,
    InRepair,
    Retired,
}

impl AssetStatus {
    pub const ALL: [&'static str; 4] = ["in_stock", "assigned", "in_repair", "retired"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InStock => "in_stock",
            Self::Assigned => "assigned",
            Self::InRepair => "in_repair",
            Self::Retired => "retired",
        }
    }
}

/// ИТ-актив (ноутбук, монитор, сервер и т.д.)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asset {
    pub id: String,
    pub asset_tag: String,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub serial_number: Option<String>,
    #[serde(default)]
    pub status: AssetStatus,
    #[serde(default)]
    pub assigned_to: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub purchase_cost: Option<f64>,
    #[serde(default)]
    pub purchase_date: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub metadata: EntityMetadata,
}

impl ListEntity for Asset {
    fn to_record(&self) -> Record {
        let record = Record::new(&self.id)
            .with("asset_tag", self.asset_tag.as_str())
            .with("name", self.name.as_str())
            .with("status", self.status.as_str())
            .with_opt("category", self.category.clone())
            .with_opt("serial_number", self.serial_number.clone())
            .with_opt("assigned_to", self.assigned_to.clone())
            .with_opt("department", self.department.clone())
            .with_opt("purchase_cost", self.purchase_cost)
            .with_opt("purchase_date", self.purchase_date);
        match self.metadata.created_at {
            Some(created_at) => record.created(created_at),
            None => record,
        }
    }

    fn list_config() -> ListViewConfig {
        ListViewConfig::new("name")
            .column(ColumnDef::new("asset_tag", "Инв. номер"))
            .column(ColumnDef::new("name", "Наименование"))
            .column(ColumnDef::new("category", "Категория"))
            .column(ColumnDef::new("serial_number", "Серийный номер"))
            .column(ColumnDef::new("status", "Статус").enumeration(&AssetStatus::ALL))
            .column(ColumnDef::new("assigned_to", "Сотрудник"))
            .column(ColumnDef::new("department", "Подразделение"))
            .column(
                ColumnDef::new("purchase_cost", "Стоимость")
                    .kind(FieldKind::Number)
                    .format(ColumnFormat::Money),
            )
            .column(
                ColumnDef::new("purchase_date", "Дата покупки")
                    .kind(FieldKind::Date)
                    .format(ColumnFormat::Date),
            )
            .column(
                ColumnDef::new("created_at", "Создано")
                    .kind(FieldKind::Date)
                    .format(ColumnFormat::DateTime)
                    .read_only(),
            )
            .searchable(&["asset_tag", "name", "serial_number", "assigned_to"])
            .filterable(&["status", "category", "department"])
            .required(&["asset_tag", "status"])
            .rule(
                "purchase_cost",
                ValidationRules::none().with_range(Some(0.0), None),
            )
            .permissions(ActionPermissions::for_entity("assets"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::list_view::{edit_payload, FieldValue};

    #[test]
    fn test_asset_from_json_to_record() {
        let json = r#"{
            "id": "5f1c",
            "asset_tag": "IT-0042",
            "name": "Dell Latitude 5420",
            "status": "assigned",
            "assigned_to": "Иванов И.И.",
            "purchase_cost": 85000.0,
            "created_at": "2024-03-15T14:02:26Z"
        }"#;
        let asset: Asset = serde_json::from_str(json).unwrap();
        let record = asset.to_record();

        assert_eq!(record.id(), "5f1c");
        assert_eq!(record.display("status"), "assigned");
        assert_eq!(
            record.get("purchase_cost").map(|v| v.into_owned()),
            Some(FieldValue::Number(85000.0))
        );
        assert!(record.created_at().is_some());
        assert!(record.get("serial_number").is_none());
    }

    #[test]
    fn test_list_config_is_consistent() {
        let config = Asset::list_config();
        assert!(config.validate().is_ok());
        assert!(config.required_fields().contains(&"name"));
        assert!(config.form_columns().all(|c| c.field != "created_at"));
    }

    #[test]
    fn test_edit_payload_matches_asset_contract() {
        let asset: Asset = serde_json::from_str(
            r#"{"id":"5f1c","asset_tag":"IT-0042","name":"Dell Latitude 5420",
                "status":"in_repair","purchase_cost":85000.0,
                "purchase_date":"2023-11-02T00:00:00Z","created_at":"2024-03-15T14:02:26Z"}"#,
        )
        .unwrap();
        let payload = edit_payload(&asset);
        assert!(payload.get("created_at").is_none());

        let back: Asset = serde_json::from_value(payload).unwrap();
        assert_eq!(back.asset_tag, "IT-0042");
        assert_eq!(back.status, AssetStatus::InRepair);
        assert_eq!(back.purchase_cost, Some(85000.0));
        assert_eq!(back.purchase_date, asset.purchase_date);
    }
}
