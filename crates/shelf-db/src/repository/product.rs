//! # Product Repository
//!
//! The stock collection: every product, serialized as one JSON array under
//! one storage key.
//!
//! ## Mutation Cycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    add / update / remove                                │
//! │                                                                         │
//! │  acquire collection write lock                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  BEGIN                                                                  │
//! │       │                                                                 │
//! │       ├── read  "@stock_products" → Vec<Product>                       │
//! │       ├── mutate in memory (append / replace by id / drop by id)        │
//! │       └── write "@stock_products" ← JSON array                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  COMMIT                                                                 │
//! │                                                                         │
//! │  Two near-simultaneous saves cannot interleave their read and write.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use sqlx::{SqliteConnection, SqlitePool};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::repository::kv;
use shelf_core::Product;

/// Storage key holding the product collection.
pub const STORAGE_KEY: &str = "@stock_products";

/// Repository for the product collection.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.products();
///
/// repo.add(&product).await?;
/// let all = repo.load_all().await?;
/// let found = repo.update(&edited).await?; // false if the id is gone
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
    write_lock: Arc<Mutex<()>>,
}

impl ProductRepository {
    /// Creates a repository sharing `write_lock` with every other handle on
    /// the same database.
    pub fn new(pool: SqlitePool, write_lock: Arc<Mutex<()>>) -> Self {
        ProductRepository { pool, write_lock }
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Loads every product, in insertion order.
    ///
    /// Empty when nothing has been stored yet. A stored value that does not
    /// decode is an error, never silently an empty list.
    pub async fn load_all(&self) -> DbResult<Vec<Product>> {
        let mut conn = self.pool.acquire().await?;
        let products = load_in(&mut conn).await?;

        debug!(count = products.len(), "Loaded products");
        Ok(products)
    }

    /// Gets a product by its id.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Product>> {
        let product = self.load_all().await?.into_iter().find(|p| p.id == id);

        debug!(id = %id, found = product.is_some(), "Looked up product");
        Ok(product)
    }

    /// Number of stored products.
    pub async fn count(&self) -> DbResult<usize> {
        Ok(self.load_all().await?.len())
    }

    /// Ids of every stored product, in insertion order.
    pub async fn ids(&self) -> DbResult<Vec<String>> {
        Ok(self.load_all().await?.into_iter().map(|p| p.id).collect())
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Replaces the whole collection.
    pub async fn save_all(&self, products: &[Product]) -> DbResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut tx = self.pool.begin().await.map_err(transaction_failed)?;

        save_in(&mut tx, products).await?;

        tx.commit().await.map_err(transaction_failed)?;
        info!(count = products.len(), "Saved product collection");
        Ok(())
    }

    /// Appends a product.
    ///
    /// ## Errors
    /// - `DbError::UniqueViolation` if a product with the same id exists
    pub async fn add(&self, product: &Product) -> DbResult<()> {
        self.modify(|products| {
            if products.iter().any(|p| p.id == product.id) {
                return Err(DbError::duplicate("id", product.id.as_str()));
            }
            products.push(product.clone());
            Ok((true, ()))
        })
        .await?;

        info!(id = %product.id, name = %product.name, "Product added");
        Ok(())
    }

    /// Replaces the stored product with the same id.
    ///
    /// Returns `false`, leaving storage untouched, when no product has
    /// that id.
    pub async fn update(&self, product: &Product) -> DbResult<bool> {
        let found = self
            .modify(|products| {
                match products.iter_mut().find(|p| p.id == product.id) {
                    Some(slot) => {
                        *slot = product.clone();
                        Ok((true, true))
                    }
                    None => Ok((false, false)),
                }
            })
            .await?;

        if found {
            info!(id = %product.id, "Product updated");
        } else {
            debug!(id = %product.id, "Update skipped, product not found");
        }
        Ok(found)
    }

    /// Removes the product with the given id.
    ///
    /// Returns `false`, leaving storage untouched, when no product has
    /// that id.
    pub async fn remove(&self, id: &str) -> DbResult<bool> {
        let found = self
            .modify(|products| {
                let before = products.len();
                products.retain(|p| p.id != id);
                let removed = products.len() != before;
                Ok((removed, removed))
            })
            .await?;

        if found {
            info!(id = %id, "Product removed");
        } else {
            debug!(id = %id, "Remove skipped, product not found");
        }
        Ok(found)
    }

    /// Runs one load + mutate + save cycle inside a transaction.
    ///
    /// `mutate` returns `(changed, value)`; the collection is written back
    /// only when `changed` is true.
    async fn modify<T, F>(&self, mutate: F) -> DbResult<T>
    where
        F: FnOnce(&mut Vec<Product>) -> DbResult<(bool, T)>,
    {
        let _guard = self.write_lock.lock().await;
        let mut tx = self.pool.begin().await.map_err(transaction_failed)?;

        let mut products = load_in(&mut tx).await?;
        let (changed, value) = mutate(&mut products)?;

        if changed {
            save_in(&mut tx, &products).await?;
        }

        tx.commit().await.map_err(transaction_failed)?;
        Ok(value)
    }
}

// =============================================================================
// Serialization
// =============================================================================

async fn load_in(conn: &mut SqliteConnection) -> DbResult<Vec<Product>> {
    match kv::get_in(conn, STORAGE_KEY).await? {
        Some(json) => {
            serde_json::from_str(&json).map_err(|e| DbError::corrupt(STORAGE_KEY, e))
        }
        None => Ok(Vec::new()),
    }
}

async fn save_in(conn: &mut SqliteConnection, products: &[Product]) -> DbResult<()> {
    let json = serde_json::to_string(products).map_err(|e| DbError::corrupt(STORAGE_KEY, e))?;
    kv::set_in(conn, STORAGE_KEY, &json).await
}

fn transaction_failed(err: sqlx::Error) -> DbError {
    DbError::TransactionFailed(err.to_string())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};
    use chrono::{Duration, TimeZone, Utc};

    fn product(id: &str, name: &str) -> Product {
        let made = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        Product {
            id: id.to_string(),
            name: name.to_string(),
            manufacturing_date: made,
            expiration_date: made + Duration::days(40),
            quantity: 10,
            batch: "LT2024".to_string(),
            barcode: "789123".to_string(),
            state: "SP".to_string(),
            image_uri: None,
            description: None,
        }
    }

    async fn db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_empty_storage_loads_empty() {
        let db = db().await;
        assert!(db.products().load_all().await.unwrap().is_empty());
        assert_eq!(db.products().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_add_preserves_insertion_order() {
        let db = db().await;
        let repo = db.products();

        repo.add(&product("300000", "Yogurt")).await.unwrap();
        repo.add(&product("100000", "Milk")).await.unwrap();
        repo.add(&product("200000", "Cheese")).await.unwrap();

        assert_eq!(repo.ids().await.unwrap(), vec!["300000", "100000", "200000"]);
    }

    #[tokio::test]
    async fn test_add_rejects_duplicate_id() {
        let db = db().await;
        let repo = db.products();

        repo.add(&product("482913", "Milk")).await.unwrap();
        let err = repo.add(&product("482913", "Other")).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));

        let all = repo.load_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name, "Milk");
    }

    #[tokio::test]
    async fn test_update_replaces_whole_record() {
        let db = db().await;
        let repo = db.products();
        repo.add(&product("482913", "Milk")).await.unwrap();
        repo.add(&product("100001", "Bread")).await.unwrap();

        let mut edited = product("482913", "Milk 2L");
        edited.quantity = 3;
        edited.description = Some("Whole".to_string());
        assert!(repo.update(&edited).await.unwrap());

        let stored = repo.get_by_id("482913").await.unwrap().unwrap();
        assert_eq!(stored, edited);
        assert_eq!(repo.ids().await.unwrap(), vec!["482913", "100001"]);
    }

    #[tokio::test]
    async fn test_update_missing_is_noop() {
        let db = db().await;
        let repo = db.products();
        repo.add(&product("482913", "Milk")).await.unwrap();

        assert!(!repo.update(&product("999999", "Ghost")).await.unwrap());
        assert_eq!(repo.ids().await.unwrap(), vec!["482913"]);
    }

    #[tokio::test]
    async fn test_remove() {
        let db = db().await;
        let repo = db.products();
        repo.add(&product("482913", "Milk")).await.unwrap();
        repo.add(&product("100001", "Bread")).await.unwrap();

        assert!(repo.remove("482913").await.unwrap());
        assert!(!repo.remove("482913").await.unwrap());
        assert_eq!(repo.ids().await.unwrap(), vec!["100001"]);
        assert_eq!(repo.get_by_id("482913").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_save_all_replaces_collection() {
        let db = db().await;
        let repo = db.products();
        repo.add(&product("482913", "Milk")).await.unwrap();

        repo.save_all(&[product("111111", "Eggs"), product("222222", "Butter")])
            .await
            .unwrap();
        assert_eq!(repo.ids().await.unwrap(), vec!["111111", "222222"]);

        repo.save_all(&[]).await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_stored_as_single_json_array() {
        let db = db().await;
        db.products().add(&product("482913", "Milk")).await.unwrap();

        let raw = db.key_values().get(STORAGE_KEY).await.unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value[0]["id"], "482913");
        assert_eq!(value[0]["expirationDate"], "2024-04-10T12:00:00Z");
    }

    #[tokio::test]
    async fn test_corrupt_payload_is_an_error() {
        let db = db().await;
        db.key_values().set(STORAGE_KEY, "{oops").await.unwrap();

        let err = db.products().load_all().await.unwrap_err();
        assert!(matches!(err, DbError::CorruptPayload { .. }));

        // Writes refuse to overwrite data they could not read
        assert!(db.products().add(&product("482913", "Milk")).await.is_err());
        assert_eq!(
            db.key_values().get(STORAGE_KEY).await.unwrap().as_deref(),
            Some("{oops")
        );
    }

    #[tokio::test]
    async fn test_concurrent_adds_are_all_kept() {
        let db = db().await;
        let a = db.products();
        let b = db.products();

        let pa = product("100001", "Milk");
        let pb = product("100002", "Bread");
        let (ra, rb) = tokio::join!(a.add(&pa), b.add(&pb));
        ra.unwrap();
        rb.unwrap();

        let mut ids = db.products().ids().await.unwrap();
        ids.sort();
        assert_eq!(ids, vec!["100001", "100002"]);
    }
}
