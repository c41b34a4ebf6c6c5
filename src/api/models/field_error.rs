use std::collections::BTreeMap;
use serde::Serialize;
use crate::api::ResourceService;

const TRUTHY_CHECKBOX_VALUES: [&str; 4] = ["on", "true", "1", "yes"];

#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldErrorKind {
    Blank,
    Length { min: usize, max: usize },
    NotAnInteger,
    NotANumber,
    IntegerRange { min: i64, max: i64 },
    ExclusiveRange { min: u32, max: u32 },
    UnknownIngredient { id: String },
}

impl FieldErrorKind {
    pub fn resource_name(&self) -> &'static str {
        match self {
            FieldErrorKind::Blank => "field_blank_error_message",
            FieldErrorKind::Length { .. } => "field_length_error_message_template",
            FieldErrorKind::NotAnInteger => "field_not_an_integer_error_message",
            FieldErrorKind::NotANumber => "field_not_a_number_error_message",
            FieldErrorKind::IntegerRange { .. } => "field_integer_range_error_message_template",
            FieldErrorKind::ExclusiveRange { .. } => "field_exclusive_range_error_message_template",
            FieldErrorKind::UnknownIngredient { .. } => "field_unknown_ingredient_error_message_template",
        }
    }
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct FieldError {
    pub field: &'static str,
    pub kind: FieldErrorKind,
}

impl FieldError {
    pub fn new(field: &'static str, kind: FieldErrorKind) -> Self {
        FieldError { field, kind }
    }
}

/// Groups rendered messages by field name, in the order the errors were raised.
pub fn messages_by_field(errors: &[FieldError], resource_service: &ResourceService) -> BTreeMap<&'static str, Vec<String>> {
    let mut messages: BTreeMap<&'static str, Vec<String>> = BTreeMap::new();
    for error in errors {
        let name = error.kind.resource_name();
        let message = resource_service
            .render_resource_template_string_by_name(name, &error.kind)
            .unwrap_or_else(|| name.to_string());
        messages.entry(error.field).or_default().push(message);
    }
    messages
}

pub(crate) fn require_length(field: &'static str, raw: &str, min: usize, max: usize, errors: &mut Vec<FieldError>) -> String {
    let value = raw.trim();
    let length = value.chars().count();
    if length == 0 {
        errors.push(FieldError::new(field, FieldErrorKind::Blank));
    } else if length < min || length > max {
        errors.push(FieldError::new(field, FieldErrorKind::Length { min, max }));
    }
    value.to_string()
}

pub(crate) fn require_present(field: &'static str, raw: &str, errors: &mut Vec<FieldError>) -> String {
    let value = raw.trim();
    if value.is_empty() {
        errors.push(FieldError::new(field, FieldErrorKind::Blank));
    }
    value.to_string()
}

pub(crate) fn optional_integer(field: &'static str, raw: &str, min: i64, max: i64, errors: &mut Vec<FieldError>) -> Option<u32> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }
    match value.parse::<i64>() {
        Ok(number) if number >= min && number <= max => u32::try_from(number).ok(),
        Ok(_) => {
            errors.push(FieldError::new(field, FieldErrorKind::IntegerRange { min, max }));
            None
        }
        Err(_) => {
            errors.push(FieldError::new(field, FieldErrorKind::NotAnInteger));
            None
        }
    }
}

/// Bounds are exclusive on both ends.
pub(crate) fn optional_decimal(field: &'static str, raw: &str, min: u32, max: u32, errors: &mut Vec<FieldError>) -> Option<f64> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }
    match value.parse::<f64>() {
        Ok(number) if !number.is_finite() => {
            errors.push(FieldError::new(field, FieldErrorKind::NotANumber));
            None
        }
        Ok(number) if number > f64::from(min) && number < f64::from(max) => Some(number),
        Ok(_) => {
            errors.push(FieldError::new(field, FieldErrorKind::ExclusiveRange { min, max }));
            None
        }
        Err(_) => {
            errors.push(FieldError::new(field, FieldErrorKind::NotANumber));
            None
        }
    }
}

pub(crate) fn is_checked(raw: &str) -> bool {
    let value = raw.trim().to_lowercase();
    TRUTHY_CHECKBOX_VALUES.contains(&value.as_str())
}
