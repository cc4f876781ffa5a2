//! # State Module
//!
//! Application state for the Shelf app layer.
//!
//! One type per concern, so each command takes only the state it needs:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────────┐        ┌──────────────────────────────┐      │
//! │  │       DbState        │        │         ConfigState          │      │
//! │  │                      │        │                              │      │
//! │  │  Database            │        │  store_name                  │      │
//! │  │  (SQLite pool +      │        │  strict_region → rules()     │      │
//! │  │   write lock)        │        │  utc_offset    → now()       │      │
//! │  └──────────────────────┘        └──────────────────────────────┘      │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • DbState: pool and lock are shareable                                │
//! │  • ConfigState: read-only after initialization                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod db;

pub use config::ConfigState;
pub use db::DbState;
