//! Запись списка: непрозрачное отображение «поле → скалярное значение».
//!
//! `id` и `created_at` хранятся отдельно от остальных полей: они доступны на
//! чтение как поля с именами [`ID_FIELD`] и [`CREATED_AT_FIELD`], но через
//! [`Draft`] их изменить нельзя.

use super::config::ListViewConfig;
use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use std::borrow::Cow;
use std::collections::BTreeMap;

pub const ID_FIELD: &str = "id";
pub const CREATED_AT_FIELD: &str = "created_at";

/// Наибольшее целое, которое `f64` хранит без потери точности
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Скалярное значение поля записи
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Bool(bool),
    Date(DateTime<Utc>),
}

impl FieldValue {
    /// Строковое представление для поиска, фильтров и сравнения на равенство
    pub fn display(&self) -> Cow<'_, str> {
        match self {
            Self::Text(s) => Cow::Borrowed(s.as_str()),
            Self::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    Cow::Owned(format!("{}", *n as i64))
                } else {
                    Cow::Owned(n.to_string())
                }
            }
            Self::Bool(b) => Cow::Borrowed(if *b { "true" } else { "false" }),
            Self::Date(d) => Cow::Owned(d.to_rfc3339()),
        }
    }

    /// Пустое значение: текст без символов кроме пробелов
    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Text(s) if s.trim().is_empty())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }
}

/// Целые значения уходят в JSON как целые (`2`, не `2.0`):
/// DTO с полями `i64` не принимают дробную запись.
impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Text(s) => serializer.serialize_str(s),
            Self::Number(n) if n.fract() == 0.0 && n.abs() <= MAX_EXACT_INTEGER => {
                serializer.serialize_i64(*n as i64)
            }
            Self::Number(n) => serializer.serialize_f64(*n),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Date(d) => d.serialize(serializer),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Date(value)
    }
}

/// Строка таблицы (актив, сотрудник, лицензия и т.д.)
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    id: String,
    created_at: Option<DateTime<Utc>>,
    fields: BTreeMap<String, FieldValue>,
}

impl Record {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            created_at: None,
            fields: BTreeMap::new(),
        }
    }

    /// Дата создания проставляется источником данных, не компонентом списка
    pub fn created(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Builder: добавить доменное поле. `id`/`created_at` игнорируются.
    pub fn with(mut self, field: &str, value: impl Into<FieldValue>) -> Self {
        if !is_reserved(field) {
            self.fields.insert(field.to_string(), value.into());
        }
        self
    }

    /// Builder: добавить поле, если значение есть
    pub fn with_opt<V: Into<FieldValue>>(self, field: &str, value: Option<V>) -> Self {
        match value {
            Some(v) => self.with(field, v),
            None => self,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    /// Значение поля по имени, включая `id` и `created_at`
    pub fn get(&self, field: &str) -> Option<Cow<'_, FieldValue>> {
        match field {
            ID_FIELD => Some(Cow::Owned(FieldValue::Text(self.id.clone()))),
            CREATED_AT_FIELD => self.created_at.map(|d| Cow::Owned(FieldValue::Date(d))),
            _ => self.fields.get(field).map(Cow::Borrowed),
        }
    }

    /// Строковое значение поля; отсутствующее поле даёт пустую строку
    pub fn display(&self, field: &str) -> String {
        self.get(field)
            .map(|v| v.display().into_owned())
            .unwrap_or_default()
    }

    pub fn fields(&self) -> &BTreeMap<String, FieldValue> {
        &self.fields
    }

    /// Черновик формы редактирования: только поля редактируемых колонок.
    /// Вычисляемые колонки (`read_only`) в черновик не попадают.
    pub fn to_draft_for(&self, config: &ListViewConfig) -> Draft {
        let fields = config
            .form_columns()
            .filter_map(|column| {
                self.fields
                    .get(&column.field)
                    .map(|value| (column.field.clone(), value.clone()))
            })
            .collect();
        Draft { fields }
    }
}

fn is_reserved(field: &str) -> bool {
    field == ID_FIELD || field == CREATED_AT_FIELD
}

/// Черновик создаваемой или редактируемой записи.
///
/// Неизменяемое значение: каждое изменение поля возвращает новый `Draft`,
/// который целиком заменяет предыдущий.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Draft {
    fields: BTreeMap<String, FieldValue>,
}

impl Draft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Новый черновик с изменённым полем. `id` и `created_at` не принимаются.
    #[must_use]
    pub fn with_field(&self, field: &str, value: FieldValue) -> Self {
        let mut next = self.clone();
        if !is_reserved(field) {
            next.fields.insert(field.to_string(), value);
        }
        next
    }

    /// Новый черновик без указанного поля
    #[must_use]
    pub fn without_field(&self, field: &str) -> Self {
        let mut next = self.clone();
        next.fields.remove(field);
        next
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    /// Значение поля для `<input>`: пустая строка, если поля нет
    pub fn input_value(&self, field: &str) -> String {
        self.fields
            .get(field)
            .map(|v| match v {
                FieldValue::Date(d) => d.format("%Y-%m-%d").to_string(),
                other => other.display().into_owned(),
            })
            .unwrap_or_default()
    }

    pub fn fields(&self) -> &BTreeMap<String, FieldValue> {
        &self.fields
    }

    /// Тело запроса для REST API
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::list_view::config::{ColumnDef, FieldKind};
    use chrono::TimeZone;

    fn config() -> ListViewConfig {
        ListViewConfig::new("name")
            .column(ColumnDef::new("name", "Наименование"))
            .column(ColumnDef::new("quantity", "Количество").kind(FieldKind::Integer))
            .column(
                ColumnDef::new("low_stock", "Дефицит")
                    .kind(FieldKind::Bool)
                    .read_only(),
            )
    }

    #[test]
    fn test_record_exposes_id_and_created_at_as_fields() {
        let created = Utc.with_ymd_and_hms(2024, 3, 15, 14, 2, 26).unwrap();
        let record = Record::new("a-1").created(created).with("name", "Laptop");

        assert_eq!(record.display(ID_FIELD), "a-1");
        assert_eq!(
            record.get(CREATED_AT_FIELD).map(|v| v.into_owned()),
            Some(FieldValue::Date(created))
        );
        assert_eq!(record.display("name"), "Laptop");
        assert_eq!(record.display("missing"), "");
    }

    #[test]
    fn test_reserved_fields_cannot_be_overwritten() {
        let record = Record::new("a-1").with(ID_FIELD, "other").with("name", "x");
        assert_eq!(record.id(), "a-1");
        assert!(!record.fields().contains_key(ID_FIELD));

        let draft = record.to_draft_for(&config()).with_field(ID_FIELD, "hijack".into());
        assert!(draft.get(ID_FIELD).is_none());
        assert!(draft.to_json().get(ID_FIELD).is_none());
    }

    #[test]
    fn test_draft_is_replaced_not_mutated() {
        let first = Draft::new().with_field("name", "A".into());
        let second = first.with_field("name", "B".into());
        assert_eq!(first.get("name"), Some(&FieldValue::Text("A".into())));
        assert_eq!(second.get("name"), Some(&FieldValue::Text("B".into())));
    }

    #[test]
    fn test_number_display_drops_integer_fraction() {
        assert_eq!(FieldValue::Number(3.0).display(), "3");
        assert_eq!(FieldValue::Number(2.5).display(), "2.5");
    }

    #[test]
    fn test_draft_json_payload() {
        let draft = Draft::new()
            .with_field("name", "Monitor".into())
            .with_field("quantity", 4i64.into())
            .with_field("active", true.into());
        let json = draft.to_json();
        assert_eq!(json["name"], "Monitor");
        assert_eq!(json["quantity"], 4);
        assert_eq!(json["active"], true);
    }

    #[test]
    fn test_whole_numbers_serialize_as_integers() {
        let draft = Draft::new()
            .with_field("quantity", 4i64.into())
            .with_field("cost", 12.5.into());
        assert_eq!(draft.to_json().to_string(), r#"{"cost":12.5,"quantity":4}"#);
    }

    #[test]
    fn test_edit_draft_skips_read_only_and_unknown_fields() {
        let record = Record::new("a-1")
            .with("name", "Мышь")
            .with("quantity", 2i64)
            .with("low_stock", true)
            .with("legacy", "x");
        let draft = record.to_draft_for(&config());
        assert_eq!(draft.fields().keys().collect::<Vec<_>>(), vec!["name", "quantity"]);
        assert!(draft.to_json().get("low_stock").is_none());
    }
}
