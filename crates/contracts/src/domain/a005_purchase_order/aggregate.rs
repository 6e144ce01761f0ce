use crate::domain::common::EntityMetadata;
use crate::shared::list_view::{
    ActionPermissions, ColumnDef, ColumnFormat, FieldKind, ListEntity, ListViewConfig, Record,
    ValidationRules,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PurchaseOrderStatus {
    #[default]
    Draft,
    Ordered,
    Received,
    Cancelled,
}

impl PurchaseOrderStatus {
    pub const ALL: [&'static str; 4] = ["draft", "ordered", "received", "cancelled"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Ordered => "ordered",
            Self::Received => "received",
            Self::Cancelled => "cancelled",
        }
    }
}

/// Заказ поставщику
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseOrder {
    pub id: String,
    pub po_number: String,
    /// Краткое описание заказа
    pub name: String,
    #[serde(default)]
    pub vendor: Option<String>,
    #[serde(default)]
    pub order_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub expected_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub total_amount: Option<f64>,
    #[serde(default)]
    pub status: PurchaseOrderStatus,
    #[serde(flatten)]
    pub metadata: EntityMetadata,
}

impl ListEntity for PurchaseOrder {
    fn to_record(&self) -> Record {
        let record = Record::new(&self.id)
            .with("po_number", self.po_number.as_str())
            .with("name", self.name.as_str())
            .with("status", self.status.as_str())
            .with_opt("vendor", self.vendor.clone())
            .with_opt("order_date", self.order_date)
            .with_opt("expected_date", self.expected_date)
            .with_opt("total_amount", self.total_amount);
        match self.metadata.created_at {
            Some(created_at) => record.created(created_at),
            None => record,
        }
    }

    fn list_config() -> ListViewConfig {
        ListViewConfig::new("order_date")
            .column(ColumnDef::new("po_number", "Номер"))
            .column(ColumnDef::new("name", "Описание"))
            .column(ColumnDef::new("vendor", "Поставщик"))
            .column(
                ColumnDef::new("order_date", "Дата заказа")
                    .kind(FieldKind::Date)
                    .format(ColumnFormat::Date),
            )
            .column(
                ColumnDef::new("expected_date", "Ожидается")
                    .kind(FieldKind::Date)
                    .format(ColumnFormat::Date),
            )
            .column(
                ColumnDef::new("total_amount", "Сумма")
                    .kind(FieldKind::Number)
                    .format(ColumnFormat::Money),
            )
            .column(
                ColumnDef::new("status", "Статус").enumeration(&PurchaseOrderStatus::ALL),
            )
            .searchable(&["po_number", "name", "vendor"])
            .filterable(&["vendor", "status"])
            .required(&["po_number", "vendor", "order_date"])
            .rule(
                "total_amount",
                ValidationRules::none().with_range(Some(0.0), None),
            )
            .permissions(ActionPermissions::for_entity("purchase_orders"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::list_view::{edit_payload, validate_draft, Draft, FieldValue};

    #[test]
    fn test_negative_amount_is_rejected() {
        let config = PurchaseOrder::list_config();
        let draft = Draft::new()
            .with_field("po_number", "PO-2024-001".into())
            .with_field("name", "Мониторы".into())
            .with_field("vendor", "ООО Поставка".into())
            .with_field("order_date", FieldKind::Date.parse_input("2024-05-01").unwrap())
            .with_field("total_amount", FieldValue::Number(-1.0));
        let errors = validate_draft(&draft, &config);
        assert_eq!(errors.keys().collect::<Vec<_>>(), vec!["total_amount"]);
    }

    #[test]
    fn test_list_config_is_consistent() {
        assert!(PurchaseOrder::list_config().validate().is_ok());
    }

    #[test]
    fn test_edit_payload_matches_purchase_order_contract() {
        let order: PurchaseOrder = serde_json::from_str(
            r#"{"id":"p1","po_number":"PO-2024-001","name":"Мониторы","vendor":"ООО Поставка",
                "order_date":"2024-05-01T00:00:00Z","total_amount":125000.5,"status":"ordered"}"#,
        )
        .unwrap();
        let back: PurchaseOrder = serde_json::from_value(edit_payload(&order)).unwrap();
        assert_eq!(back.po_number, "PO-2024-001");
        assert_eq!(back.order_date, order.order_date);
        assert_eq!(back.total_amount, Some(125000.5));
        assert_eq!(back.status, PurchaseOrderStatus::Ordered);
    }
}
