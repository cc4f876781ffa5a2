//! # Error Types
//!
//! Domain-specific error types for shelf-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  shelf-core errors (this file)                                         │
//! │  ├── ValidationError  - Why a single field was rejected                │
//! │  ├── FieldError       - ValidationError tagged with its Field          │
//! │  └── CoreError        - General domain errors                          │
//! │                                                                         │
//! │  shelf-db errors (separate crate)                                      │
//! │  └── DbError          - Storage operation failures                     │
//! │                                                                         │
//! │  App errors (apps/mobile)                                              │
//! │  └── ApiError         - What the UI sees (serialized)                  │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → UI                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Validation reasons are enum variants, never String
//! 3. Each reason has a stable machine code and a user-facing message

use thiserror::Error;

use crate::types::Field;
use crate::validation::ValidationReport;

// =============================================================================
// Validation Error
// =============================================================================

/// Why a field value was rejected.
///
/// The message is phrased to follow the field label, so a [`FieldError`]
/// reads as "Batch is required".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The field is empty (or only whitespace).
    #[error("is required")]
    EmptyField,

    /// The text contains characters outside letters, digits and spaces.
    #[error("must contain only letters, numbers and spaces")]
    InvalidCharacters,

    /// The date is not after the start of the reference day.
    #[error("must be later than today")]
    NotInFuture,

    /// The text does not parse as a whole number.
    #[error("must be a number")]
    NotANumber,

    /// The number is zero or negative.
    #[error("must be a positive number")]
    NotPositive,

    /// The batch code is missing a letter or digit, or contains spaces/symbols.
    #[error("must contain at least 1 letter and 1 number, without spaces or symbols")]
    InvalidBatchFormat,

    /// The text is longer than allowed.
    #[error("must be at most {max} characters")]
    TooLong { max: usize },

    /// The region code is not one of the 27 federative units.
    #[error("must be a Brazilian state code")]
    UnknownRegion,
}

impl ValidationError {
    /// Stable machine-readable code for the UI.
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::EmptyField => "EMPTY_FIELD",
            ValidationError::InvalidCharacters => "INVALID_CHARACTERS",
            ValidationError::NotInFuture => "NOT_IN_FUTURE",
            ValidationError::NotANumber => "NOT_A_NUMBER",
            ValidationError::NotPositive => "NOT_POSITIVE",
            ValidationError::InvalidBatchFormat => "INVALID_BATCH_FORMAT",
            ValidationError::TooLong { .. } => "TOO_LONG",
            ValidationError::UnknownRegion => "UNKNOWN_REGION",
        }
    }
}

/// A validation failure attached to the field it concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{} {reason}", .field.label())]
pub struct FieldError {
    pub field: Field,
    pub reason: ValidationError,
}

impl FieldError {
    pub fn new(field: Field, reason: ValidationError) -> Self {
        FieldError { field, reason }
    }
}

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No product with this id exists in the collection.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// The candidate product failed one or more field checks.
    ///
    /// ## User Workflow
    /// ```text
    /// Submit form
    ///      │
    ///      ▼
    /// validate_product_with(...) → { quantity: NotPositive, batch: EmptyField }
    ///      │
    ///      ▼
    /// InvalidProduct(report)
    ///      │
    ///      ▼
    /// UI highlights both fields, submission blocked
    /// ```
    #[error("Invalid product: {0}")]
    InvalidProduct(ValidationReport),

    /// Every 6-digit id is already taken.
    #[error("No free product id left")]
    IdSpaceExhausted,

    /// A single field failed validation outside a full product check.
    #[error("Validation error: {0}")]
    Validation(#[from] FieldError),
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
