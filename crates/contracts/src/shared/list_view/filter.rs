//! Фильтрация списка: поиск по подстроке + фильтры по значениям полей

use super::record::Record;
use std::collections::{BTreeMap, BTreeSet};

/// Значение выпадающего фильтра
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FilterSelection {
    /// «Все»: фильтр не применяется
    #[default]
    All,
    Value(String),
}

impl FilterSelection {
    /// Из значения `<select>`: пустая строка означает «Все»
    pub fn from_option(value: &str) -> Self {
        if value.is_empty() {
            Self::All
        } else {
            Self::Value(value.to_string())
        }
    }

    pub fn as_option(&self) -> &str {
        match self {
            Self::All => "",
            Self::Value(v) => v,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

pub type ActiveFilters = BTreeMap<String, FilterSelection>;

/// Проверяет, соответствует ли запись поисковому запросу и всем фильтрам
pub fn matches(
    record: &Record,
    search_term: &str,
    active_filters: &ActiveFilters,
    searchable_fields: &[String],
) -> bool {
    matches_search(record, search_term, searchable_fields)
        && active_filters.iter().all(|(field, selection)| match selection {
            FilterSelection::All => true,
            FilterSelection::Value(expected) => record
                .get(field)
                .map(|v| v.display() == expected.as_str())
                .unwrap_or(false),
        })
}

fn matches_search(record: &Record, search_term: &str, searchable_fields: &[String]) -> bool {
    let term = search_term.trim();
    if term.is_empty() {
        return true;
    }
    let term = term.to_lowercase();
    searchable_fields.iter().any(|field| {
        record
            .get(field)
            .map(|v| v.display().to_lowercase().contains(&term))
            .unwrap_or(false)
    })
}

/// Фильтрует список по поисковому запросу и фильтрам, сохраняя порядок
pub fn filter_records<'a>(
    records: &'a [Record],
    search_term: &str,
    active_filters: &ActiveFilters,
    searchable_fields: &[String],
) -> Vec<&'a Record> {
    records
        .iter()
        .filter(|r| matches(r, search_term, active_filters, searchable_fields))
        .collect()
}

/// Уникальные непустые значения поля, отсортированные по алфавиту.
///
/// Значение «Все» сюда не входит, его добавляет представление.
pub fn filter_options(records: &[Record], field: &str) -> Vec<String> {
    records
        .iter()
        .filter_map(|r| r.get(field).map(|v| v.display().into_owned()))
        .filter(|v| !v.trim().is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records() -> Vec<Record> {
        vec![
            Record::new("1").with("name", "Bravo").with("status", "active"),
            Record::new("2").with("name", "Alpha").with("status", "inactive"),
            Record::new("3").with("name", "Charlie Laptop").with("status", "active"),
            Record::new("4").with("name", "Delta"),
        ]
    }

    fn searchable() -> Vec<String> {
        vec!["name".to_string()]
    }

    fn ids(items: &[&Record]) -> Vec<String> {
        items.iter().map(|r| r.id().to_string()).collect()
    }

    #[test]
    fn test_empty_search_matches_everything() {
        let data = records();
        assert_eq!(filter_records(&data, "", &ActiveFilters::new(), &searchable()).len(), 4);
        assert_eq!(filter_records(&data, "   ", &ActiveFilters::new(), &searchable()).len(), 4);
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let data = records();
        let found = filter_records(&data, "LAPTOP", &ActiveFilters::new(), &searchable());
        assert_eq!(ids(&found), vec!["3"]);
    }

    #[test]
    fn test_search_only_scans_declared_fields() {
        let data = records();
        let found = filter_records(&data, "inactive", &ActiveFilters::new(), &searchable());
        assert!(found.is_empty());
    }

    #[test]
    fn test_filters_are_conjunctive_with_search() {
        let data = records();
        let mut filters = ActiveFilters::new();
        filters.insert("status".into(), FilterSelection::Value("active".into()));
        assert_eq!(ids(&filter_records(&data, "", &filters, &searchable())), vec!["1", "3"]);
        assert_eq!(ids(&filter_records(&data, "bra", &filters, &searchable())), vec!["1"]);

        filters.insert("status".into(), FilterSelection::All);
        assert_eq!(filter_records(&data, "", &filters, &searchable()).len(), 4);
    }

    #[test]
    fn test_missing_field_does_not_match_value_filter() {
        let data = records();
        let mut filters = ActiveFilters::new();
        filters.insert("status".into(), FilterSelection::Value("".into()));
        assert!(filter_records(&data, "", &filters, &searchable())
            .iter()
            .all(|r| r.id() != "4"));
    }

    #[test]
    fn test_filtering_is_idempotent() {
        let data = records();
        let mut filters = ActiveFilters::new();
        filters.insert("status".into(), FilterSelection::Value("active".into()));
        let once: Vec<Record> = filter_records(&data, "a", &filters, &searchable())
            .into_iter()
            .cloned()
            .collect();
        let twice: Vec<Record> = filter_records(&once, "a", &filters, &searchable())
            .into_iter()
            .cloned()
            .collect();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_filter_options_are_distinct_and_sorted() {
        assert_eq!(filter_options(&records(), "status"), vec!["active", "inactive"]);
    }

    #[test]
    fn test_filter_selection_option_round_trip() {
        assert_eq!(FilterSelection::from_option(""), FilterSelection::All);
        assert_eq!(FilterSelection::from_option("active").as_option(), "active");
    }
}
