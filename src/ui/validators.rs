//! Field validators
//!
//! Each validator looks at one raw field string and reports the rule it
//! breaks, if any. Apart from [`required`], an empty field passes: whether a
//! field may be left blank is a separate rule.

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    Required,
    InvalidCharacters,
    NotANumber,
    OutOfRange { min: f64, max: f64 },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::Required => write!(f, "is required"),
            ValidationError::InvalidCharacters => {
                write!(f, "may only contain letters and spaces")
            }
            ValidationError::NotANumber => write!(f, "must be a number"),
            ValidationError::OutOfRange { min, max } => {
                write!(f, "must be between {} and {}", min, max)
            }
        }
    }
}

pub fn required(value: &str) -> Option<ValidationError> {
    if value.trim().is_empty() {
        Some(ValidationError::Required)
    } else {
        None
    }
}

/// Latin letters, accented vowels, ñ and whitespace
pub fn alphabetic(value: &str) -> Option<ValidationError> {
    if value.chars().all(is_name_char) {
        None
    } else {
        Some(ValidationError::InvalidCharacters)
    }
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphabetic() || c.is_whitespace() || "áéíóúÁÉÍÓÚñÑ".contains(c)
}

/// `-?digits(.digits)?` whose value lies within `[min, max]`
pub fn numeric_in_range(value: &str, min: f64, max: f64) -> Option<ValidationError> {
    if value.is_empty() {
        return None;
    }
    if !is_decimal(value) {
        return Some(ValidationError::NotANumber);
    }
    match value.parse::<f64>() {
        Ok(number) if number >= min && number <= max => None,
        Ok(_) => Some(ValidationError::OutOfRange { min, max }),
        Err(_) => Some(ValidationError::NotANumber),
    }
}

fn is_decimal(value: &str) -> bool {
    let unsigned = value.strip_prefix('-').unwrap_or(value);
    let (whole, fraction) = match unsigned.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (unsigned, None),
    };
    let all_digits = |part: &str| !part.is_empty() && part.chars().all(|c| c.is_ascii_digit());
    all_digits(whole) && fraction.map_or(true, all_digits)
}
