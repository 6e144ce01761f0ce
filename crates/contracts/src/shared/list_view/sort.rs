//! Сортировка списка по полю

use super::record::{FieldValue, Record};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    pub fn is_ascending(self) -> bool {
        matches!(self, Self::Ascending)
    }
}

fn kind_rank(value: &FieldValue) -> u8 {
    match value {
        FieldValue::Bool(_) => 0,
        FieldValue::Number(_) => 1,
        FieldValue::Date(_) => 2,
        FieldValue::Text(_) => 3,
    }
}

fn compare_values(a: &FieldValue, b: &FieldValue) -> Ordering {
    match (a, b) {
        (FieldValue::Text(x), FieldValue::Text(y)) => x.to_lowercase().cmp(&y.to_lowercase()),
        (FieldValue::Number(x), FieldValue::Number(y)) => x.total_cmp(y),
        (FieldValue::Date(x), FieldValue::Date(y)) => x.cmp(y),
        (FieldValue::Bool(x), FieldValue::Bool(y)) => x.cmp(y),
        _ => kind_rank(a).cmp(&kind_rank(b)),
    }
}

/// Пустая строка приводится к отсутствующему значению
fn non_blank(value: Option<&FieldValue>) -> Option<&FieldValue> {
    value.filter(|v| !matches!(v, FieldValue::Text(s) if s.is_empty()))
}

/// Сравнивает две записи по указанному полю.
///
/// Отсутствующее значение равно пустой строке и меньше любого другого
/// значения; `Descending` просто меняет знак результата.
pub fn compare(a: &Record, b: &Record, sort_key: &str, direction: SortDirection) -> Ordering {
    let x = a.get(sort_key);
    let y = b.get(sort_key);
    let ascending = match (non_blank(x.as_deref()), non_blank(y.as_deref())) {
        (Some(x), Some(y)) => compare_values(x, y),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    match direction {
        SortDirection::Ascending => ascending,
        SortDirection::Descending => ascending.reverse(),
    }
}

/// Сортирует список по указанному полю. Сортировка стабильная: записи с
/// равными ключами сохраняют исходный порядок в обоих направлениях.
pub fn sort_records(items: &mut [&Record], sort_key: &str, direction: SortDirection) {
    items.sort_by(|a, b| compare(a, b, sort_key, direction));
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn names(items: &[&Record]) -> Vec<String> {
        items.iter().map(|r| r.display("name")).collect()
    }

    #[test]
    fn test_text_sort_ascending_and_descending_are_reversed() {
        let data = vec![
            Record::new("1").with("name", "Bravo"),
            Record::new("2").with("name", "alpha"),
            Record::new("3").with("name", "Charlie"),
        ];
        let mut items: Vec<&Record> = data.iter().collect();
        sort_records(&mut items, "name", SortDirection::Ascending);
        let asc = names(&items);
        assert_eq!(asc, vec!["alpha", "Bravo", "Charlie"]);

        sort_records(&mut items, "name", SortDirection::Descending);
        let mut desc = names(&items);
        desc.reverse();
        assert_eq!(asc, desc);
    }

    #[test]
    fn test_ties_keep_input_order_in_both_directions() {
        let data = vec![
            Record::new("1").with("status", "active"),
            Record::new("2").with("status", "inactive"),
            Record::new("3").with("status", "active"),
            Record::new("4").with("status", "active"),
        ];
        let mut items: Vec<&Record> = data.iter().collect();
        sort_records(&mut items, "status", SortDirection::Ascending);
        let ids: Vec<&str> = items.iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec!["1", "3", "4", "2"]);

        let mut items: Vec<&Record> = data.iter().collect();
        sort_records(&mut items, "status", SortDirection::Descending);
        let ids: Vec<&str> = items.iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec!["2", "1", "3", "4"]);
    }

    #[test]
    fn test_numbers_compare_numerically() {
        let data = vec![
            Record::new("1").with("cost", 100.0),
            Record::new("2").with("cost", 9.5),
            Record::new("3").with("cost", 20.0),
        ];
        let mut items: Vec<&Record> = data.iter().collect();
        sort_records(&mut items, "cost", SortDirection::Ascending);
        let ids: Vec<&str> = items.iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec!["2", "3", "1"]);
    }

    #[test]
    fn test_dates_compare_chronologically() {
        let early = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
        let late = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let a = Record::new("a").created(late);
        let b = Record::new("b").created(early);
        assert_eq!(compare(&a, &b, "created_at", SortDirection::Ascending), Ordering::Greater);
        assert_eq!(compare(&a, &b, "created_at", SortDirection::Descending), Ordering::Less);
    }

    #[test]
    fn test_missing_values_sort_as_minimal() {
        let data = vec![
            Record::new("1").with("name", "Bravo"),
            Record::new("2"),
            Record::new("3").with("name", "Alpha"),
        ];
        let mut items: Vec<&Record> = data.iter().collect();
        sort_records(&mut items, "name", SortDirection::Ascending);
        assert_eq!(items[0].id(), "2");

        sort_records(&mut items, "name", SortDirection::Descending);
        assert_eq!(items[2].id(), "2");
    }

    #[test]
    fn test_absent_ties_with_empty_text() {
        let data = vec![
            Record::new("1").with("name", "Alpha"),
            Record::new("2").with("name", ""),
            Record::new("3"),
            Record::new("4").with("name", ""),
        ];
        assert_eq!(compare(&data[1], &data[2], "name", SortDirection::Ascending), Ordering::Equal);

        let mut items: Vec<&Record> = data.iter().collect();
        sort_records(&mut items, "name", SortDirection::Ascending);
        let ids: Vec<&str> = items.iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec!["2", "3", "4", "1"]);

        sort_records(&mut items, "name", SortDirection::Descending);
        let ids: Vec<&str> = items.iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn test_absent_number_sorts_below_numbers() {
        let data = vec![Record::new("1").with("cost", -5.0), Record::new("2")];
        assert_eq!(compare(&data[1], &data[0], "cost", SortDirection::Ascending), Ordering::Less);
    }

    #[test]
    fn test_direction_toggle() {
        assert_eq!(SortDirection::Ascending.toggled(), SortDirection::Descending);
        assert_eq!(SortDirection::Descending.toggled(), SortDirection::Ascending);
    }
}
