use crate::domain::common::{EntityMetadata, EntityStatus};
use crate::shared::list_view::{
    ActionPermissions, ColumnDef, ColumnFormat, FieldKind, ListEntity, ListViewConfig, Record,
    ValidationRules,
};
use serde::{Deserialize, Serialize};

/// Расходные принадлежности: мыши, кабели, гарнитуры
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Accessory {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub manufacturer: Option<String>,
    #[serde(default)]
    pub quantity: i64,
    #[serde(default)]
    pub min_quantity: Option<i64>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub unit_cost: Option<f64>,
    #[serde(default)]
    pub status: EntityStatus,
    #[serde(flatten)]
    pub metadata: EntityMetadata,
}

impl Accessory {
    /// Остаток ниже минимального
    pub fn is_low_stock(&self) -> bool {
        self.min_quantity.map(|min| self.quantity < min).unwrap_or(false)
    }
}

impl ListEntity for Accessory {
    fn to_record(&self) -> Record {
        let record = Record::new(&self.id)
            .with("name", self.name.as_str())
            .with("quantity", self.quantity)
            .with("low_stock", self.is_low_stock())
            .with("status", self.status.as_str())
            .with_opt("category", self.category.clone())
            .with_opt("manufacturer", self.manufacturer.clone())
            .with_opt("min_quantity", self.min_quantity)
            .with_opt("location", self.location.clone())
            .with_opt("unit_cost", self.unit_cost);
        match self.metadata.created_at {
            Some(created_at) => record.created(created_at),
            None => record,
        }
    }

    fn list_config() -> ListViewConfig {
        ListViewConfig::new("name")
            .column(ColumnDef::new("name", "Наименование"))
            .column(ColumnDef::new("category", "Категория"))
            .column(ColumnDef::new("manufacturer", "Производитель"))
            .column(
                ColumnDef::new("quantity", "Количество")
                    .kind(FieldKind::Integer)
                    .format(ColumnFormat::Integer),
            )
            .column(
                ColumnDef::new("min_quantity", "Мин. остаток")
                    .kind(FieldKind::Integer)
                    .format(ColumnFormat::Integer),
            )
            .column(
                ColumnDef::new("low_stock", "Дефицит")
                    .kind(FieldKind::Bool)
                    .format(ColumnFormat::YesNo)
                    .read_only(),
            )
            .column(ColumnDef::new("location", "Склад"))
            .column(
                ColumnDef::new("unit_cost", "Цена")
                    .kind(FieldKind::Number)
                    .format(ColumnFormat::Money),
            )
            .column(ColumnDef::new("status", "Статус").enumeration(&EntityStatus::ALL))
            .searchable(&["name", "manufacturer"])
            .filterable(&["category", "location", "status"])
            .rule("quantity", ValidationRules::required().with_range(Some(0.0), None))
            .rule("min_quantity", ValidationRules::none().with_range(Some(0.0), None))
            .rule("unit_cost", ValidationRules::none().with_range(Some(0.0), None))
            .permissions(ActionPermissions::for_entity("accessories"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::list_view::{edit_payload, FieldValue, ListViewController, ListViewError};
    use crate::system::auth::Capability;

    #[test]
    fn test_low_stock_flag() {
        let accessory: Accessory = serde_json::from_str(
            r#"{"id":"a1","name":"Мышь USB","quantity":2,"min_quantity":5}"#,
        )
        .unwrap();
        assert!(accessory.is_low_stock());
        let record = accessory.to_record();
        assert_eq!(
            record.get("low_stock").map(|v| v.into_owned()),
            Some(FieldValue::Bool(true))
        );
    }

    #[test]
    fn test_list_config_is_consistent() {
        assert!(Accessory::list_config().validate().is_ok());
    }

    #[test]
    fn test_edit_payload_matches_accessory_contract() {
        let accessory: Accessory = serde_json::from_str(
            r#"{"id":"a1","name":"Мышь","quantity":2,"min_quantity":5,"unit_cost":450.5}"#,
        )
        .unwrap();
        let payload = edit_payload(&accessory);
        assert!(payload.get("low_stock").is_none());
        assert!(payload["quantity"].is_i64());

        let back: Accessory = serde_json::from_value(payload).unwrap();
        assert_eq!(back.quantity, 2);
        assert_eq!(back.min_quantity, Some(5));
        assert_eq!(back.unit_cost, Some(450.5));
    }

    #[test]
    fn test_fractional_quantity_is_rejected() {
        let mut ctl = ListViewController::new(Accessory::list_config(), Capability::admin());
        ctl.open_add().unwrap();
        ctl.set_input("name", "Кабель HDMI").unwrap();
        ctl.set_input("quantity", "2.5").unwrap();
        let err = ctl.begin_submit().unwrap_err();
        assert!(matches!(err, ListViewError::Validation(ref e) if e.contains_key("quantity")));

        ctl.set_input("quantity", "2").unwrap();
        assert!(ctl.begin_submit().is_ok());
    }
}
