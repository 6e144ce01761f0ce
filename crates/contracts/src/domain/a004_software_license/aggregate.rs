use crate::domain::common::EntityMetadata;
use crate::shared::list_view::{
    ActionPermissions, ColumnDef, ColumnFormat, FieldKind, ListEntity, ListViewConfig, Record,
    ValidationRules,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LicenseType {
    #[default]
    Subscription,
    Perpetual,
    Oem,
    OpenSource,
}

impl LicenseType {
    pub const ALL: [&'static str; 4] = ["subscription", "perpetual", "oem", "open_source"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Subscription => "subscription",
            Self::Perpetual => "perpetual",
            Self::Oem => "oem",
            Self::OpenSource => "open_source",
        }
    }
}

/// Лицензия на программное обеспечение
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoftwareLicense {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub vendor: Option<String>,
    #[serde(default)]
    pub license_key: Option<String>,
    #[serde(default)]
    pub license_type: LicenseType,
    #[serde(default)]
    pub seats: Option<i64>,
    #[serde(default)]
    pub seats_used: Option<i64>,
    #[serde(default)]
    pub cost: Option<f64>,
    #[serde(default)]
    pub expiry_date: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub metadata: EntityMetadata,
}

impl SoftwareLicense {
    /// Свободные места; `None`, если количество мест не задано
    pub fn seats_available(&self) -> Option<i64> {
        self.seats
            .map(|total| (total - self.seats_used.unwrap_or(0)).max(0))
    }
}

impl ListEntity for SoftwareLicense {
    fn to_record(&self) -> Record {
        let record = Record::new(&self.id)
            .with("name", self.name.as_str())
            .with("license_type", self.license_type.as_str())
            .with_opt("vendor", self.vendor.clone())
            .with_opt("license_key", self.license_key.clone())
            .with_opt("seats", self.seats)
            .with_opt("seats_available", self.seats_available())
            .with_opt("cost", self.cost)
            .with_opt("expiry_date", self.expiry_date);
        match self.metadata.created_at {
            Some(created_at) => record.created(created_at),
            None => record,
        }
    }

    fn list_config() -> ListViewConfig {
        ListViewConfig::new("name")
            .column(ColumnDef::new("name", "Продукт"))
            .column(ColumnDef::new("vendor", "Производитель"))
            .column(ColumnDef::new("license_type", "Тип").enumeration(&LicenseType::ALL))
            .column(ColumnDef::new("license_key", "Ключ").not_sortable())
            .column(
                ColumnDef::new("seats", "Мест")
                    .kind(FieldKind::Integer)
                    .format(ColumnFormat::Integer),
            )
            .column(
                ColumnDef::new("seats_available", "Свободно")
                    .kind(FieldKind::Integer)
                    .format(ColumnFormat::Integer)
                    .read_only(),
            )
            .column(
                ColumnDef::new("cost", "Стоимость")
                    .kind(FieldKind::Number)
                    .format(ColumnFormat::Money),
            )
            .column(
                ColumnDef::new("expiry_date", "Действует до")
                    .kind(FieldKind::Date)
                    .format(ColumnFormat::Date),
            )
            .searchable(&["name", "vendor", "license_key"])
            .filterable(&["vendor", "license_type"])
            .rule("seats", ValidationRules::none().with_range(Some(1.0), None))
            .rule("cost", ValidationRules::none().with_range(Some(0.0), None))
            .permissions(ActionPermissions::for_entity("software_licenses"))
    }
}
