use crate::domain::common::{EntityMetadata, EntityStatus};
use crate::shared::list_view::{
    ActionPermissions, ColumnDef, ColumnFormat, FieldKind, ListEntity, ListViewConfig, Record,
    ValidationRules,
};
use serde::{Deserialize, Serialize};

/// Вид справочника. Все справочники имеют одинаковую структуру записи.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MasterDataKind {
    Departments,
    SubDepartments,
    Vendors,
    ItemCategories,
    Companies,
    Locations,
}

impl MasterDataKind {
    pub const ALL: [MasterDataKind; 6] = [
        Self::Departments,
        Self::SubDepartments,
        Self::Vendors,
        Self::ItemCategories,
        Self::Companies,
        Self::Locations,
    ];

    /// Сегмент пути REST API: `/api/master-data/{slug}`
    pub fn slug(&self) -> &'static str {
        match self {
            Self::Departments => "departments",
            Self::SubDepartments => "sub-departments",
            Self::Vendors => "vendors",
            Self::ItemCategories => "item-categories",
            Self::Companies => "companies",
            Self::Locations => "locations",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.slug() == slug)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Departments => "Подразделения",
            Self::SubDepartments => "Отделы",
            Self::Vendors => "Поставщики",
            Self::ItemCategories => "Категории",
            Self::Companies => "Компании",
            Self::Locations => "Площадки",
        }
    }

    /// Префикс прав: `departments.create`, `item_categories.delete`, ...
    pub fn permission_prefix(&self) -> String {
        self.slug().replace('-', "_")
    }
}

/// Запись справочника
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MasterDataItem {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: EntityStatus,
    #[serde(flatten)]
    pub metadata: EntityMetadata,
}

impl MasterDataItem {
    /// Конфигурация списка для конкретного справочника
    pub fn list_config_for(kind: MasterDataKind) -> ListViewConfig {
        Self::list_config().permissions(ActionPermissions::for_entity(&kind.permission_prefix()))
    }
}

impl ListEntity for MasterDataItem {
    fn to_record(&self) -> Record {
        let record = Record::new(&self.id)
            .with("name", self.name.as_str())
            .with("status", self.status.as_str())
            .with_opt("code", self.code.clone())
            .with_opt("description", self.description.clone());
        match self.metadata.created_at {
            Some(created_at) => record.created(created_at),
            None => record,
        }
    }

    fn list_config() -> ListViewConfig {
        ListViewConfig::new("name")
            .column(ColumnDef::new("code", "Код"))
            .column(ColumnDef::new("name", "Наименование"))
            .column(ColumnDef::new("description", "Описание").not_sortable())
            .column(ColumnDef::new("status", "Статус").enumeration(&EntityStatus::ALL))
            .column(
                ColumnDef::new("created_at", "Создано")
                    .kind(FieldKind::Date)
                    .format(ColumnFormat::DateTime)
                    .read_only(),
            )
            .searchable(&["code", "name", "description"])
            .filterable(&["status"])
            .rule("name", ValidationRules::required().with_max_length(100))
            .rule("code", ValidationRules::none().with_max_length(20))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_roundtrip_and_serde_agree() {
        for kind in MasterDataKind::ALL {
            assert_eq!(MasterDataKind::from_slug(kind.slug()), Some(kind));
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.slug()));
        }
        assert_eq!(MasterDataKind::from_slug("unknown"), None);
    }

    #[test]
    fn test_permissions_per_kind() {
        let config = MasterDataItem::list_config_for(MasterDataKind::ItemCategories);
        assert_eq!(
            config.permissions.add.as_deref(),
            Some("item_categories.create")
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_edit_payload_matches_master_data_contract() {
        let item: MasterDataItem = serde_json::from_str(
            r#"{"id":"m1","name":"Бухгалтерия","code":"ACC","created_at":"2024-03-15T14:02:26Z"}"#,
        )
        .unwrap();
        let payload = crate::shared::list_view::edit_payload(&item);
        assert!(payload.get("created_at").is_none());

        let back: MasterDataItem = serde_json::from_value(payload).unwrap();
        assert_eq!(back.name, "Бухгалтерия");
        assert_eq!(back.code.as_deref(), Some("ACC"));
        assert_eq!(back.status, EntityStatus::Active);
    }
}
