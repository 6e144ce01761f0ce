//! Конфигурация универсального списка: колонки, поиск, фильтры, валидация, права

use super::error::ListViewError;
use super::record::FieldValue;
use super::validation::ValidationRules;
use chrono::{DateTime, NaiveDate, Utc};
use std::collections::BTreeMap;
use std::num::NonZeroUsize;

/// Семантический тип поля
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldKind {
    #[default]
    Text,
    /// Строка из фиксированного набора значений (например, статус)
    Enum(Vec<String>),
    Number,
    /// Целое число: дробный ввод отклоняется валидацией
    Integer,
    Date,
    Bool,
}

impl FieldKind {
    /// Разобрать ввод пользователя. Пустая строка означает «нет значения».
    ///
    /// Если ввод не разбирается, он сохраняется как текст: ошибку покажет
    /// валидация при отправке формы.
    pub fn parse_input(&self, raw: &str) -> Option<FieldValue> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        let parsed = match self {
            Self::Text | Self::Enum(_) => None,
            Self::Number | Self::Integer => trimmed
                .replace(' ', "")
                .replace(',', ".")
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .map(FieldValue::Number),
            Self::Date => parse_date(trimmed).map(FieldValue::Date),
            Self::Bool => match trimmed {
                "true" | "1" | "yes" | "да" => Some(FieldValue::Bool(true)),
                "false" | "0" | "no" | "нет" => Some(FieldValue::Bool(false)),
                _ => None,
            },
        };
        Some(parsed.unwrap_or_else(|| FieldValue::Text(raw.to_string())))
    }
}

fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%d.%m.%Y"))
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// Формат отображения значения в ячейке
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColumnFormat {
    #[default]
    Plain,
    Date,
    DateTime,
    Money,
    Integer,
    YesNo,
}

/// Описание колонки таблицы
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDef {
    pub field: String,
    pub label: String,
    pub kind: FieldKind,
    pub sortable: bool,
    /// Показывать поле в форме добавления/редактирования
    pub editable: bool,
    pub format: ColumnFormat,
}

impl ColumnDef {
    /// Текстовая колонка: сортируемая и редактируемая
    pub fn new(field: &str, label: &str) -> Self {
        Self {
            field: field.to_string(),
            label: label.to_string(),
            kind: FieldKind::Text,
            sortable: true,
            editable: true,
            format: ColumnFormat::Plain,
        }
    }

    pub fn kind(mut self, kind: FieldKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn enumeration(self, options: &[&str]) -> Self {
        self.kind(FieldKind::Enum(
            options.iter().map(|o| o.to_string()).collect(),
        ))
    }

    pub fn format(mut self, format: ColumnFormat) -> Self {
        self.format = format;
        self
    }

    pub fn not_sortable(mut self) -> Self {
        self.sortable = false;
        self
    }

    pub fn read_only(mut self) -> Self {
        self.editable = false;
        self
    }
}

/// Действие над записью, ограничиваемое правами
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Add,
    Edit,
    Delete,
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Add => "добавление",
            Self::Edit => "редактирование",
            Self::Delete => "удаление",
        })
    }
}

/// Имена прав, необходимых для действий. `None`: действие доступно всем.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ActionPermissions {
    pub add: Option<String>,
    pub edit: Option<String>,
    pub delete: Option<String>,
}

impl ActionPermissions {
    /// Стандартный набор прав `<entity>.create|edit|delete`
    pub fn for_entity(entity: &str) -> Self {
        Self {
            add: Some(format!("{}.create", entity)),
            edit: Some(format!("{}.edit", entity)),
            delete: Some(format!("{}.delete", entity)),
        }
    }

    pub fn required_for(&self, action: Action) -> Option<&str> {
        match action {
            Action::Add => self.add.as_deref(),
            Action::Edit => self.edit.as_deref(),
            Action::Delete => self.delete.as_deref(),
        }
    }
}

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Конфигурация экземпляра списка
#[derive(Debug, Clone, PartialEq)]
pub struct ListViewConfig {
    pub columns: Vec<ColumnDef>,
    pub searchable_fields: Vec<String>,
    pub filterable_fields: Vec<String>,
    pub field_rules: BTreeMap<String, ValidationRules>,
    pub default_sort_key: String,
    pub page_size: NonZeroUsize,
    pub page_size_options: Vec<usize>,
    pub permissions: ActionPermissions,
}

impl ListViewConfig {
    /// Пустая конфигурация; `name` обязательно во всех формах
    pub fn new(default_sort_key: &str) -> Self {
        let mut field_rules = BTreeMap::new();
        field_rules.insert("name".to_string(), ValidationRules::required());
        Self {
            columns: Vec::new(),
            searchable_fields: Vec::new(),
            filterable_fields: Vec::new(),
            field_rules,
            default_sort_key: default_sort_key.to_string(),
            page_size: NonZeroUsize::new(DEFAULT_PAGE_SIZE).unwrap_or(NonZeroUsize::MIN),
            page_size_options: vec![10, 25, 50, 100],
            permissions: ActionPermissions::default(),
        }
    }

    pub fn column(mut self, column: ColumnDef) -> Self {
        self.columns.push(column);
        self
    }

    pub fn searchable(mut self, fields: &[&str]) -> Self {
        self.searchable_fields = fields.iter().map(|f| f.to_string()).collect();
        self
    }

    pub fn filterable(mut self, fields: &[&str]) -> Self {
        self.filterable_fields = fields.iter().map(|f| f.to_string()).collect();
        self
    }

    pub fn required(mut self, fields: &[&str]) -> Self {
        for field in fields {
            self.field_rules
                .entry(field.to_string())
                .or_insert_with(ValidationRules::none)
                .required = true;
        }
        self
    }

    pub fn rule(mut self, field: &str, rules: ValidationRules) -> Self {
        self.field_rules.insert(field.to_string(), rules);
        self
    }

    pub fn permissions(mut self, permissions: ActionPermissions) -> Self {
        self.permissions = permissions;
        self
    }

    /// Задать размер страницы; ноль: ошибка конфигурации
    pub fn with_page_size(mut self, page_size: usize) -> Result<Self, ListViewError> {
        self.page_size = NonZeroUsize::new(page_size).ok_or(ListViewError::InvalidPageSize)?;
        Ok(self)
    }

    pub fn with_page_size_options(mut self, options: Vec<usize>) -> Self {
        let mut options: Vec<usize> = options.into_iter().filter(|s| *s > 0).collect();
        options.sort_unstable();
        options.dedup();
        self.page_size_options = options;
        self
    }

    pub fn find_column(&self, field: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.field == field)
    }

    pub fn is_sortable(&self, field: &str) -> bool {
        self.find_column(field).map(|c| c.sortable).unwrap_or(false)
    }

    /// Поля формы в порядке колонок
    pub fn form_columns(&self) -> impl Iterator<Item = &ColumnDef> {
        self.columns.iter().filter(|c| c.editable)
    }

    pub fn required_fields(&self) -> Vec<&str> {
        self.field_rules
            .iter()
            .filter(|(_, r)| r.is_required())
            .map(|(f, _)| f.as_str())
            .collect()
    }

    pub fn rules_for(&self, field: &str) -> ValidationRules {
        self.field_rules.get(field).copied().unwrap_or_default()
    }

    /// Проверить согласованность: ключ сортировки и фильтры ссылаются на колонки
    pub fn validate(&self) -> Result<(), ListViewError> {
        if !self.is_sortable(&self.default_sort_key) {
            return Err(ListViewError::UnknownField(self.default_sort_key.clone()));
        }
        for field in self.filterable_fields.iter().chain(self.searchable_fields.iter()) {
            if self.find_column(field).is_none() {
                return Err(ListViewError::UnknownField(field.clone()));
            }
        }
        Ok(())
    }
}
