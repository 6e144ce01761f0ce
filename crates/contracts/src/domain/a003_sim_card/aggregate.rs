use crate::domain::common::EntityMetadata;
use crate::shared::list_view::{
    ActionPermissions, ColumnDef, ColumnFormat, FieldKind, ListEntity, ListViewConfig, Record,
    ValidationRules,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SimCardStatus {
    #[default]
    Available,
    Assigned,
    Suspended,
    Deactivated,
}

impl SimCardStatus {
    pub const ALL: [&'static str; 4] = ["available", "assigned", "suspended", "deactivated"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Assigned => "assigned",
            Self::Suspended => "suspended",
            Self::Deactivated => "deactivated",
        }
    }
}

/// Корпоративная SIM-карта
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimCard {
    pub id: String,
    /// Отображаемое имя (например, «Телефон дежурного»)
    pub name: String,
    pub sim_number: String,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub carrier: Option<String>,
    #[serde(default)]
    pub plan: Option<String>,
    #[serde(default)]
    pub monthly_cost: Option<f64>,
    #[serde(default)]
    pub status: SimCardStatus,
    #[serde(default)]
    pub assigned_to: Option<String>,
    #[serde(flatten)]
    pub metadata: EntityMetadata,
}

impl ListEntity for SimCard {
    fn to_record(&self) -> Record {
        let record = Record::new(&self.id)
            .with("name", self.name.as_str())
            .with("sim_number", self.sim_number.as_str())
            .with("status", self.status.as_str())
            .with_opt("phone_number", self.phone_number.clone())
            .with_opt("carrier", self.carrier.clone())
            .with_opt("plan", self.plan.clone())
            .with_opt("monthly_cost", self.monthly_cost)
            .with_opt("assigned_to", self.assigned_to.clone());
        match self.metadata.created_at {
            Some(created_at) => record.created(created_at),
            None => record,
        }
    }

    fn list_config() -> ListViewConfig {
        ListViewConfig::new("name")
            .column(ColumnDef::new("name", "Наименование"))
            .column(ColumnDef::new("sim_number", "ICCID"))
            .column(ColumnDef::new("phone_number", "Номер телефона"))
            .column(ColumnDef::new("carrier", "Оператор"))
            .column(ColumnDef::new("plan", "Тариф"))
            .column(
                ColumnDef::new("monthly_cost", "Абонплата")
                    .kind(FieldKind::Number)
                    .format(ColumnFormat::Money),
            )
            .column(ColumnDef::new("status", "Статус").enumeration(&SimCardStatus::ALL))
            .column(ColumnDef::new("assigned_to", "Сотрудник"))
            .searchable(&["name", "sim_number", "phone_number", "assigned_to"])
            .filterable(&["carrier", "status"])
            .required(&["sim_number"])
            .rule("sim_number", ValidationRules::required().with_min_length(10).with_max_length(22))
            .rule("monthly_cost", ValidationRules::none().with_range(Some(0.0), None))
            .permissions(ActionPermissions::for_entity("sim_cards"))
    }
}
