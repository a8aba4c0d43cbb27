use std::fmt;
use std::sync::LazyLock;
use regex::Regex;
use crate::domain::OrderDraft;

static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+]?[0-9\-()\s]+$").expect("phone pattern compiles"));

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

/// Checkout form fields that carry validation rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Phone,
    Email,
    Address,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Name => "name",
            Field::Phone => "phone",
            Field::Email => "email",
            Field::Address => "address",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub message: &'static str,
}

/// Field-level messages, in form order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    fn push(&mut self, field: Field, message: &'static str) {
        self.0.push(FieldError { field, message });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Drops the message for `field`, e.g. once the user edits it.
    pub fn clear(&mut self, field: Field) {
        self.0.retain(|e| e.field != field);
    }

    pub fn get(&self, field: Field) -> Option<&'static str> {
        self.0.iter().find(|e| e.field == field).map(|e| e.message)
    }

    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", error.field, error.message)?;
        }
        Ok(())
    }
}

/// Checks every rule and collects all failures; nothing short-circuits.
pub fn validate_draft(draft: &OrderDraft) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::default();

    if draft.name.trim().is_empty() {
        errors.push(Field::Name, "Имя обязательно для заполнения");
    }

    if draft.phone.trim().is_empty() {
        errors.push(Field::Phone, "Телефон обязателен для заполнения");
    } else if !PHONE_PATTERN.is_match(&draft.phone) {
        errors.push(Field::Phone, "Введите корректный номер телефона");
    }

    if draft.email.trim().is_empty() {
        errors.push(Field::Email, "Email обязателен для заполнения");
    } else if !EMAIL_PATTERN.is_match(&draft.email) {
        errors.push(Field::Email, "Введите корректный email");
    }

    if draft.address.trim().is_empty() {
        errors.push(Field::Address, "Адрес доставки обязателен");
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
