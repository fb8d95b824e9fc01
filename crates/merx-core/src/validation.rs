//! # Validation Module
//!
//! Field-level validation rules for the Merx admin API.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Where Validation Happens                            │
//! │                                                                         │
//! │  HTTP handler ──► merx-core validators (this file) ──► repositories    │
//! │                        │                                    │           │
//! │                        │ field rules                        │ UNIQUE /  │
//! │                        │ (required, range, format)          │ CHECK     │
//! │                        ▼                                    ▼           │
//! │                   ValidationError                    DbError            │
//! │                                                                         │
//! │  Reference existence (customer, shop item, category) is checked by    │
//! │  the handlers against the store before any write.                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use merx_core::validation::{validate_email, validate_quantity};
//!
//! // Normalizes to lowercase on success
//! assert_eq!(validate_email("Alice@Example.COM").unwrap(), "alice@example.com");
//!
//! // Quantity must be >= 1
//! assert!(validate_quantity(0).is_err());
//! ```

use crate::error::{ValidationError, ValidationResult};
use crate::{MAX_LINE_QUANTITY, MAX_ORDER_LINES, MAX_PRICE_CENTS, MAX_TEXT_LENGTH};

// =============================================================================
// String Validators
// =============================================================================

/// Validates a required free-text field (names, titles).
///
/// ## Rules
/// - Must not be empty after trimming
/// - Must be at most MAX_TEXT_LENGTH characters
///
/// ## Returns
/// The trimmed value.
pub fn validate_required_text(field: &str, value: &str) -> ValidationResult<String> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.len() > MAX_TEXT_LENGTH {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_TEXT_LENGTH,
        });
    }

    Ok(value.to_string())
}

/// Validates an optional free-text field (descriptions).
///
/// ## Rules
/// - May be absent
/// - When present, must be at most MAX_TEXT_LENGTH characters
pub fn validate_optional_text(field: &str, value: Option<&str>) -> ValidationResult<Option<String>> {
    match value {
        None => Ok(None),
        Some(v) => {
            let v = v.trim();
            if v.len() > MAX_TEXT_LENGTH {
                return Err(ValidationError::TooLong {
                    field: field.to_string(),
                    max: MAX_TEXT_LENGTH,
                });
            }
            Ok(Some(v.to_string()))
        }
    }
}

/// Validates and normalizes an email address.
///
/// ## Rules
/// - Must not be empty
/// - Lowercase-normalized (uniqueness is case-insensitive)
/// - Must match a simple `local@domain.tld` shape:
///   one `@`, non-empty local part, dotted domain with an alphabetic
///   TLD of at least two characters
///
/// ## Returns
/// The trimmed, lowercased address.
///
/// ## Example
/// ```rust
/// use merx_core::validation::validate_email;
///
/// assert!(validate_email("alice@example.com").is_ok());
/// assert!(validate_email("alice.smith+shop@mail.example.org").is_ok());
/// assert!(validate_email("not-an-email").is_err());
/// assert!(validate_email("trailing@dot.").is_err());
/// ```
pub fn validate_email(email: &str) -> ValidationResult<String> {
    let email = email.trim().to_lowercase();

    if email.is_empty() {
        return Err(ValidationError::Required {
            field: "email".to_string(),
        });
    }

    let invalid = |reason: &str| ValidationError::InvalidFormat {
        field: "email".to_string(),
        reason: reason.to_string(),
    };

    let mut parts = email.splitn(2, '@');
    let local = parts.next().unwrap_or("");
    let domain = parts.next().ok_or_else(|| invalid("missing '@'"))?;

    if local.is_empty() || domain.is_empty() {
        return Err(invalid("empty local or domain part"));
    }

    let local_ok = local
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '%' | '+' | '-'))
        && !local.starts_with('.')
        && !local.ends_with('.');
    if !local_ok {
        return Err(invalid("invalid characters in local part"));
    }

    // Domain: dotted labels, each non-empty, alphanumeric or hyphen
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|l| l.is_empty()) {
        return Err(invalid("domain must be of the form domain.tld"));
    }
    let labels_ok = labels
        .iter()
        .all(|l| l.chars().all(|c| c.is_ascii_alphanumeric() || c == '-'));
    if !labels_ok {
        return Err(invalid("invalid characters in domain"));
    }

    // TLD must be alphabetic and at least two characters
    let tld = labels.last().copied().unwrap_or("");
    if tld.len() < 2 || !tld.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(invalid("invalid top-level domain"));
    }

    Ok(email)
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a line item quantity.
///
/// ## Rules
/// - Must be positive (>= 1)
/// - Must not exceed MAX_LINE_QUANTITY (999)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_LINE_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_LINE_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a price in cents.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free items)
/// - Must not exceed MAX_PRICE_CENTS, which keeps every line total and
///   order total derivable from accepted prices inside i64
///
/// ## Example
/// ```rust
/// use merx_core::validation::validate_price_cents;
///
/// assert!(validate_price_cents(1099).is_ok());  // $10.99
/// assert!(validate_price_cents(0).is_ok());     // Free item
/// assert!(validate_price_cents(-100).is_err()); // Invalid
/// ```
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 || cents > MAX_PRICE_CENTS {
        return Err(ValidationError::OutOfRange {
            field: "price_cents".to_string(),
            min: 0,
            max: MAX_PRICE_CENTS,
        });
    }

    Ok(())
}

// =============================================================================
// Collection Validators
// =============================================================================

/// Validates the number of lines in an order.
///
/// ## Rules
/// - Zero lines is allowed (the order total is then zero)
/// - Must not exceed MAX_ORDER_LINES (100)
pub fn validate_line_count(count: usize) -> ValidationResult<()> {
    if count > MAX_ORDER_LINES {
        return Err(ValidationError::OutOfRange {
            field: "lines".to_string(),
            min: 0,
            max: MAX_ORDER_LINES as i64,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_required_text() {
        assert_eq!(validate_required_text("name", " Alice ").unwrap(), "Alice");
        assert!(validate_required_text("name", "").is_err());
        assert!(validate_required_text("name", "   ").is_err());
        assert!(validate_required_text("name", &"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_optional_text() {
        assert_eq!(validate_optional_text("description", None).unwrap(), None);
        assert_eq!(
            validate_optional_text("description", Some("Books")).unwrap(),
            Some("Books".to_string())
        );
        assert!(validate_optional_text("description", Some(&"A".repeat(300))).is_err());
    }

    #[test]
    fn test_validate_email_accepts_and_normalizes() {
        assert_eq!(
            validate_email("Alice@Example.COM").unwrap(),
            "alice@example.com"
        );
        assert!(validate_email("bob.brown@mail.example.org").is_ok());
        assert!(validate_email("with+tag@example.co").is_ok());
    }

    #[test]
    fn test_validate_email_rejects() {
        assert!(validate_email("").is_err());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("alice@").is_err());
        assert!(validate_email("alice@nodot").is_err());
        assert!(validate_email("alice@example.").is_err());
        assert!(validate_email("alice@example.c").is_err());
        assert!(validate_email("alice@example.123").is_err());
        assert!(validate_email("al ice@example.com").is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(999).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-3).is_err());
        assert!(validate_quantity(1000).is_err());
    }

    #[test]
    fn test_validate_price_cents() {
        assert!(validate_price_cents(0).is_ok());
        assert!(validate_price_cents(99999).is_ok());
        assert!(validate_price_cents(MAX_PRICE_CENTS).is_ok());
        assert!(validate_price_cents(-1).is_err());
        assert!(validate_price_cents(MAX_PRICE_CENTS + 1).is_err());
        assert!(validate_price_cents(i64::MAX).is_err());
    }

    #[test]
    fn test_validate_line_count() {
        assert!(validate_line_count(0).is_ok());
        assert!(validate_line_count(100).is_ok());
        assert!(validate_line_count(101).is_err());
    }
}
