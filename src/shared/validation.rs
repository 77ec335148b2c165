use validator::{ValidationError, ValidationErrors};

use crate::shared::constants::{MAX_REPORT_LIMIT, MIN_REPORT_LIMIT};

/// Rejects strings that are empty or whitespace only
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("must not be blank".into());
        return Err(err);
    }
    Ok(())
}

/// WGS84 bounds check: latitude in [-90, 90], longitude in [-180, 180]
pub fn is_valid_coordinate(lat: f64, lon: f64) -> bool {
    (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lon)
}

pub fn is_valid_report_limit(limit: i64) -> bool {
    (MIN_REPORT_LIMIT..=MAX_REPORT_LIMIT).contains(&limit)
}

/// Flatten validator output into client-facing messages.
///
/// Uses each error's message when set, otherwise `"<field>: <code>"`.
/// Struct-level errors never carry the internal `__all__` key.
pub fn validation_messages(errors: &ValidationErrors) -> Vec<String> {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |err| match (&err.message, &*field) {
                (Some(message), "__all__") => message.to_string(),
                (Some(message), field) => format!("{}: {}", field, message),
                (None, "__all__") => err.code.to_string(),
                (None, field) => format!("{}: {}", field, err.code),
            })
        })
        .collect();
    messages.sort();
    messages
}
