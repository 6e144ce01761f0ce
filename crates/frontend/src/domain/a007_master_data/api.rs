use contracts::domain::a007_master_data::aggregate::MasterDataKind;

/// REST endpoint справочника, например `/api/master-data/vendors`
pub fn endpoint(kind: MasterDataKind) -> String {
    format!("/api/master-data/{}", kind.slug())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_uses_slug() {
        assert_eq!(
            endpoint(MasterDataKind::ItemCategories),
            "/api/master-data/item-categories"
        );
    }
}
