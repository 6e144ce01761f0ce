use super::config::Action;
use super::validation::FieldErrors;
use thiserror::Error;

/// Ошибки универсального списка
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ListViewError {
    /// Не заполнены обязательные поля или значения не прошли проверку
    #[error("Ошибка валидации: {}", format_field_errors(.0))]
    Validation(FieldErrors),

    /// Сохранение (добавление/редактирование) отклонено источником данных
    #[error("Не удалось сохранить: {0}")]
    Submission(String),

    /// Удаление отклонено источником данных
    #[error("Не удалось удалить: {0}")]
    Delete(String),

    #[error("Форма уже открыта")]
    DialogAlreadyOpen,

    #[error("Форма не открыта")]
    NoOpenForm,

    #[error("Сохранение уже выполняется")]
    SubmitInProgress,

    #[error("Недостаточно прав: {0}")]
    Forbidden(Action),

    #[error("Размер страницы должен быть больше нуля")]
    InvalidPageSize,

    #[error("Неизвестное поле: {0}")]
    UnknownField(String),
}

fn format_field_errors(errors: &FieldErrors) -> String {
    errors
        .iter()
        .map(|(field, message)| format!("{}: {}", field, message))
        .collect::<Vec<_>>()
        .join("; ")
}
