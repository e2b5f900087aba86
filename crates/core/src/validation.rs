//! Input validation shared by every resource.
//!
//! Request DTOs derive [`validator::Validate`]; [`validate_input`] turns the
//! resulting error map into a single field-level [`CoreError::Validation`]
//! message. The remaining helpers are used as `custom` validators on DTO
//! fields or directly by handlers.

use rust_decimal::Decimal;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::error::CoreError;
use crate::types::DbId;

/// Maximum number of fraction digits stored for money values.
pub const PRICE_SCALE: u32 = 2;

/// Exclusive upper bound of a `NUMERIC(10,2)` column: 100000000.00.
pub fn price_ceiling() -> Decimal {
    Decimal::new(10_000_000_000, PRICE_SCALE)
}

/// Run the derived validator and flatten failures into one message.
///
/// Messages are sorted by field name so responses are stable.
pub fn validate_input<T: Validate>(input: &T) -> Result<(), CoreError> {
    input
        .validate()
        .map_err(|errors| CoreError::Validation(describe_errors(&errors)))
}

/// Render a validator error map as `field: message; field: message`.
pub fn describe_errors(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(msg) => format!("{field}: {msg}"),
                None => format!("{field}: {}", e.code),
            })
        })
        .collect();
    messages.sort();
    messages.join("; ")
}

/// Reject ids that PostgreSQL could never have assigned.
pub fn validate_id(id: DbId) -> Result<(), CoreError> {
    if id > 0 {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "id must be a positive integer, got {id}"
        )))
    }
}

/// Implemented by partial-update DTOs whose fields are all optional.
pub trait Patch {
    /// True when no field was supplied.
    fn is_empty(&self) -> bool;
}

/// Reject a patch that would not change anything.
pub fn ensure_not_empty<P: Patch>(patch: &P) -> Result<(), CoreError> {
    if patch.is_empty() {
        Err(CoreError::Validation(
            "At least one field must be provided".to_string(),
        ))
    } else {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Custom field validators
// ---------------------------------------------------------------------------

/// Free text must contain something other than whitespace.
pub fn non_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::new("length").with_message("must not be empty".into()))
    } else {
        Ok(())
    }
}

/// A list of blob references must be non-empty and hold no empty names.
pub fn non_empty_items(items: &[String]) -> Result<(), ValidationError> {
    if items.is_empty() {
        return Err(ValidationError::new("length").with_message("must not be empty".into()));
    }
    if items.iter().any(|item| item.trim().is_empty()) {
        return Err(
            ValidationError::new("item").with_message("must not contain empty names".into()),
        );
    }
    Ok(())
}

/// Prices are non-negative, below [`price_ceiling`], with at most two
/// fraction digits.
pub fn valid_price(price: &Decimal) -> Result<(), ValidationError> {
    if price.is_sign_negative() {
        return Err(ValidationError::new("range").with_message("must not be negative".into()));
    }
    if *price >= price_ceiling() {
        return Err(ValidationError::new("range")
            .with_message("must be less than 100000000.00".into()));
    }
    if price.normalize().scale() > PRICE_SCALE {
        return Err(ValidationError::new("scale")
            .with_message("must have at most two decimal places".into()));
    }
    Ok(())
}
