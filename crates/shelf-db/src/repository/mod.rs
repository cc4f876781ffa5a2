//! # Repository Module
//!
//! Storage repositories for Shelf.
//!
//! ## Layering
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  App Command                                                           │
//! │       │                                                                 │
//! │       │  db.products().add(&product)                                   │
//! │       ▼                                                                 │
//! │  ProductRepository                                                     │
//! │  ├── load_all / save_all      whole collection                          │
//! │  ├── add / update / remove    load + mutate + save, one transaction     │
//! │  └── get_by_id / count / ids                                            │
//! │       │                                                                 │
//! │       │  JSON text under "@stock_products"                             │
//! │       ▼                                                                 │
//! │  KeyValueRepository                                                    │
//! │  └── get / set / remove       string key → string value                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  key_value table                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`ProductRepository`](product::ProductRepository) - The stock collection
//! - [`KeyValueRepository`](kv::KeyValueRepository) - Raw key-value access

pub mod kv;
pub mod product;
