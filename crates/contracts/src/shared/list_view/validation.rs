//! Правила валидации полей формы добавления/редактирования

use super::config::FieldKind;
use super::record::FieldValue;
use std::collections::BTreeMap;

/// Ошибки валидации: поле → сообщение для вывода под полем
pub type FieldErrors = BTreeMap<String, String>;

/// Правила проверки одного поля
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ValidationRules {
    pub required: bool,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
}

impl ValidationRules {
    /// Без ограничений
    pub const fn none() -> Self {
        Self {
            required: false,
            min: None,
            max: None,
            min_length: None,
            max_length: None,
        }
    }

    /// Обязательное поле
    pub const fn required() -> Self {
        Self {
            required: true,
            min: None,
            max: None,
            min_length: None,
            max_length: None,
        }
    }

    pub fn with_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    pub fn with_min_length(mut self, min_length: usize) -> Self {
        self.min_length = Some(min_length);
        self
    }

    pub const fn is_required(&self) -> bool {
        self.required
    }

    /// Проверить значение поля с учётом его типа
    pub fn validate(
        &self,
        value: Option<&FieldValue>,
        kind: &FieldKind,
        field_label: &str,
    ) -> Result<(), String> {
        let value = match value {
            Some(v) if !v.is_blank() => v,
            _ => {
                if self.required {
                    return Err(format!("{} не может быть пустым", field_label));
                }
                return Ok(());
            }
        };

        match (kind, value) {
            (FieldKind::Number, FieldValue::Number(n)) => self.validate_number(*n, field_label),
            (FieldKind::Number, _) => Err(format!("{} должно быть числом", field_label)),
            (FieldKind::Integer, FieldValue::Number(n)) if n.fract() != 0.0 => {
                Err(format!("{} должно быть целым числом", field_label))
            }
            (FieldKind::Integer, FieldValue::Number(n)) => self.validate_number(*n, field_label),
            (FieldKind::Integer, _) => Err(format!("{} должно быть числом", field_label)),
            (FieldKind::Date, FieldValue::Date(_)) => Ok(()),
            (FieldKind::Date, _) => Err(format!("{}: некорректная дата", field_label)),
            (FieldKind::Enum(options), FieldValue::Text(s)) => {
                if options.iter().any(|o| o == s) {
                    Ok(())
                } else {
                    Err(format!("{}: недопустимое значение «{}»", field_label, s))
                }
            }
            (FieldKind::Text, FieldValue::Text(s)) => self.validate_string(s, field_label),
            _ => Ok(()),
        }
    }

    /// Проверить строку на длину
    pub fn validate_string(&self, value: &str, field_label: &str) -> Result<(), String> {
        if self.required && value.trim().is_empty() {
            return Err(format!("{} не может быть пустым", field_label));
        }

        let len = value.chars().count();
        if let Some(min) = self.min_length {
            if len < min {
                return Err(format!(
                    "{} должен содержать минимум {} символов",
                    field_label, min
                ));
            }
        }

        if let Some(max) = self.max_length {
            if len > max {
                return Err(format!(
                    "{} не должен превышать {} символов",
                    field_label, max
                ));
            }
        }

        Ok(())
    }

    /// Проверить число на диапазон min/max
    pub fn validate_number(&self, value: f64, field_label: &str) -> Result<(), String> {
        if let Some(min) = self.min {
            if value < min {
                return Err(format!("{} должно быть не менее {}", field_label, min));
            }
        }

        if let Some(max) = self.max {
            if value > max {
                return Err(format!("{} должно быть не более {}", field_label, max));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_rejects_missing_and_blank() {
        let rules = ValidationRules::required();
        assert!(rules.validate(None, &FieldKind::Text, "Наименование").is_err());
        assert!(rules
            .validate(Some(&"   ".into()), &FieldKind::Text, "Наименование")
            .is_err());
        assert!(rules
            .validate(Some(&"Ноутбук".into()), &FieldKind::Text, "Наименование")
            .is_ok());
    }

    #[test]
    fn test_optional_blank_is_ok() {
        let rules = ValidationRules::none();
        assert!(rules.validate(None, &FieldKind::Number, "Цена").is_ok());
    }

    #[test]
    fn test_number_kind_and_range() {
        let rules = ValidationRules::none().with_range(Some(0.0), Some(100.0));
        assert!(rules
            .validate(Some(&"abc".into()), &FieldKind::Number, "Кол-во")
            .is_err());
        assert!(rules
            .validate(Some(&FieldValue::Number(-1.0)), &FieldKind::Number, "Кол-во")
            .is_err());
        assert!(rules
            .validate(Some(&FieldValue::Number(50.0)), &FieldKind::Number, "Кол-во")
            .is_ok());
    }

    #[test]
    fn test_integer_kind_rejects_fraction() {
        let rules = ValidationRules::required().with_range(Some(0.0), None);
        assert!(rules
            .validate(Some(&FieldValue::Number(2.5)), &FieldKind::Integer, "Количество")
            .is_err());
        assert!(rules
            .validate(Some(&FieldValue::Number(-1.0)), &FieldKind::Integer, "Количество")
            .is_err());
        assert!(rules
            .validate(Some(&FieldValue::Number(3.0)), &FieldKind::Integer, "Количество")
            .is_ok());
        assert!(rules
            .validate(Some(&"три".into()), &FieldKind::Integer, "Количество")
            .is_err());
    }

    #[test]
    fn test_enum_membership() {
        let kind = FieldKind::Enum(vec!["active".into(), "inactive".into()]);
        let rules = ValidationRules::required();
        assert!(rules.validate(Some(&"active".into()), &kind, "Статус").is_ok());
        assert!(rules.validate(Some(&"lost".into()), &kind, "Статус").is_err());
    }

    #[test]
    fn test_length_limits() {
        let rules = ValidationRules::none().with_min_length(2).with_max_length(4);
        assert!(rules.validate_string("a", "Код").is_err());
        assert!(rules.validate_string("abc", "Код").is_ok());
        assert!(rules.validate_string("abcde", "Код").is_err());
    }
}
