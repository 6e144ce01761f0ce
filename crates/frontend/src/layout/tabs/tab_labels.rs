//! Заголовки табов и ключи разделов.

use contracts::domain::a007_master_data::aggregate::MasterDataKind;

const MASTER_DATA_PREFIX: &str = "a007_master_data:";

/// Ключ таба справочника, например `a007_master_data:vendors`
pub fn master_data_tab_key(kind: MasterDataKind) -> String {
    format!("{}{}", MASTER_DATA_PREFIX, kind.slug())
}

/// Вид справочника по ключу таба
pub fn master_data_kind_for_key(key: &str) -> Option<MasterDataKind> {
    key.strip_prefix(MASTER_DATA_PREFIX)
        .and_then(MasterDataKind::from_slug)
}

/// Возвращает читаемый заголовок таба для данного ключа. Fallback: «Раздел».
pub fn tab_label_for_key(key: &str) -> &'static str {
    match key {
        "a001_asset" => "Активы",
        "a002_employee" => "Сотрудники",
        "a003_sim_card" => "SIM-карты",
        "a004_software_license" => "Лицензии ПО",
        "a005_purchase_order" => "Заказы поставщикам",
        "a006_accessory" => "Аксессуары",
        _ => master_data_kind_for_key(key)
            .map(|kind| kind.label())
            .unwrap_or("Раздел"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_master_data_keys() {
        let key = master_data_tab_key(MasterDataKind::SubDepartments);
        assert_eq!(key, "a007_master_data:sub-departments");
        assert_eq!(
            master_data_kind_for_key(&key),
            Some(MasterDataKind::SubDepartments)
        );
        assert_eq!(tab_label_for_key(&key), "Отделы");
    }

    #[test]
    fn test_unknown_key_label() {
        assert_eq!(tab_label_for_key("a001_asset"), "Активы");
        assert_eq!(tab_label_for_key("nope"), "Раздел");
        assert_eq!(master_data_kind_for_key("a007_master_data:nope"), None);
    }
}
