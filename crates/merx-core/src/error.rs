//! # Error Types
//!
//! Domain-specific error types for merx-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  merx-core errors (this file)                                          │
//! │  └── ValidationError  - Field and reference validation failures        │
//! │                                                                         │
//! │  merx-db errors (separate crate)                                       │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  API errors (in app)                                                   │
//! │  └── ApiError         - What clients see (status code + JSON body)     │
//! │                                                                         │
//! │  Flow: ValidationError ──► ApiError ──► 400                            │
//! │        DbError::NotFound ──► ApiError ──► 404                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field, entity, ID)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when a request doesn't meet field-level rules or
/// references an entity that does not exist. The whole write is aborted;
/// nothing partial is ever persisted.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., an invalid email address).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g., duplicate customer email).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },

    /// A stored reference does not resolve to an existing entity.
    ///
    /// ## When This Occurs
    /// - Order refers to a customer that does not exist
    /// - Order line refers to a shop item that does not exist
    /// - Shop item refers to a category that does not exist
    ///
    /// A dangling reference at write time always fails the whole operation;
    /// it is never silently stored as null.
    #[error("{entity} not found: {id}")]
    UnresolvedReference { entity: &'static str, id: String },
}

impl ValidationError {
    /// Creates an UnresolvedReference error for a given entity kind and ID.
    pub fn unresolved(entity: &'static str, id: impl Into<String>) -> Self {
        ValidationError::UnresolvedReference {
            entity,
            id: id.into(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with ValidationError.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================
