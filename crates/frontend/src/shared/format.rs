//! Форматирование значений ячеек таблицы по формату колонки.

use contracts::shared::list_view::{ColumnFormat, FieldValue};

/// Число с разделителем тысяч (пробел) и `decimals` знаками после точки.
///
/// ```rust,ignore
/// assert_eq!(format_grouped(1234.567, 2), "1 234.57");
/// ```
pub fn format_grouped(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value);
    let (sign, unsigned) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted.as_str()),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let digits: Vec<char> = integer.chars().collect();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(*c);
    }

    // "-0" после округления не показываем
    let sign = if grouped.chars().all(|c| c == '0' || c == ' ')
        && fraction.map_or(true, |f| f.chars().all(|c| c == '0'))
    {
        ""
    } else {
        sign
    };

    match fraction {
        Some(f) => format!("{}{}.{}", sign, grouped, f),
        None => format!("{}{}", sign, grouped),
    }
}

pub fn format_money(value: f64) -> String {
    format_grouped(value, 2)
}

/// Текст ячейки. Отсутствующее значение: пустая строка; значение не того
/// типа, что ожидает формат, выводится как есть.
pub fn format_cell(value: Option<&FieldValue>, format: ColumnFormat) -> String {
    let Some(value) = value else {
        return String::new();
    };
    match (format, value) {
        (ColumnFormat::Date, FieldValue::Date(d)) => d.format("%d.%m.%Y").to_string(),
        (ColumnFormat::DateTime, FieldValue::Date(d)) => d.format("%d.%m.%Y %H:%M").to_string(),
        (ColumnFormat::Money, FieldValue::Number(n)) => format_money(*n),
        (ColumnFormat::Integer, FieldValue::Number(n)) => format_grouped(*n, 0),
        (ColumnFormat::YesNo, FieldValue::Bool(b)) => (if *b { "Да" } else { "Нет" }).to_string(),
        (_, FieldValue::Date(d)) => d.format("%d.%m.%Y").to_string(),
        _ => value.display().into_owned(),
    }
}
