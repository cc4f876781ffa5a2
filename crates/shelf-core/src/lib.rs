//! # shelf-core: Pure Business Logic for Shelf
//!
//! This crate is the **heart** of Shelf, a perishable stock tracker. It
//! contains the validation rules and the expiration classifier as pure
//! functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Shelf Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Mobile UI                                    │   │
//! │  │    Stock List ──► Details ──► Add / Edit Form                   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    App Commands (apps/mobile)                   │   │
//! │  │    list_products, create_product, update_product, ...           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ shelf-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │ validation│  │ lifecycle │  │   form    │  │   │
//! │  │   │  Product  │  │   rules   │  │  Fresh /  │  │ keystroke │  │   │
//! │  │   │  Draft    │  │  reports  │  │  Expired  │  │  + submit │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO WALL CLOCK • PURE FUNCTIONS        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    shelf-db (Storage Layer)                     │   │
//! │  │        one JSON collection under one storage key                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, ProductDraft, Field)
//! - [`region`] - The 27 Brazilian federative units
//! - [`validation`] - Field validators and the aggregate product check
//! - [`lifecycle`] - Fresh / NearExpiry / Expired classification
//! - [`id`] - 6-digit product id generation
//! - [`form`] - Add/edit form state with per-edit validation
//! - [`listing`] - Stock list filters and summary counts
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input = same output, no hidden state
//! 2. **Injected Time**: every date rule takes a reference "now"
//! 3. **Derived Status**: lifecycle status is computed on read, never stored
//! 4. **Explicit Errors**: validation failures are typed reason codes
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::{Duration, TimeZone, Utc};
//! use shelf_core::lifecycle::{classify, LifecycleStatus};
//! use shelf_core::validation::validate_batch;
//!
//! assert!(validate_batch("LT2024").is_ok());
//!
//! let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
//! let status = classify(now + Duration::days(10), now);
//! assert_eq!(status, LifecycleStatus::NearExpiry);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod form;
pub mod id;
pub mod lifecycle;
pub mod listing;
pub mod region;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, FieldError, ValidationError};
pub use form::ProductForm;
pub use lifecycle::LifecycleStatus;
pub use listing::{StockFilter, StockSummary};
pub use region::BrazilianState;
pub use types::*;
pub use validation::{ValidationReport, ValidationRules};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Products expiring within this many whole days are flagged as near expiry.
pub const NEAR_EXPIRY_DAYS: i64 = 30;

/// Maximum description length, in characters.
pub const MAX_DESCRIPTION_CHARS: usize = 500;
