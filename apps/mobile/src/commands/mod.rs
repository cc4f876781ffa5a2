//! # Commands Module
//!
//! Every operation the mobile UI calls into.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── product.rs  ◄─── Stock list, details, create / edit / delete
//! └── config.rs   ◄─── Configuration and the state picker
//! ```
//!
//! ## State Injection
//! Each command takes only the state it needs:
//! ```rust,ignore
//! // Only needs database
//! async fn delete_product(db: &DbState, id: &str)
//!
//! // Only needs config (clock and rules)
//! fn validate_product_draft(config: &ConfigState, draft: &ProductDraft)
//!
//! // Needs both
//! async fn list_products(db: &DbState, config: &ConfigState, filter: Option<StockFilter>)
//! ```

pub mod config;
pub mod product;
