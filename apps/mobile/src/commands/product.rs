//! # Product Commands
//!
//! Commands behind the stock list, details, and add/edit screens.
//!
//! ## Screen Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Stock List ── list_products(filter) ──► DTOs + status badges + counts │
//! │      │                                                                  │
//! │      ├── tap item ──► get_product_details(id)                          │
//! │      │                    │                                             │
//! │      │                    ├── edit ──► load_product_for_edit(id)       │
//! │      │                    │               └── save ──► update_product  │
//! │      │                    └── delete ──► delete_product(id)            │
//! │      │                                                                  │
//! │      └── "+" ──► (form keystrokes: validate_product_draft)             │
//! │                      └── save ──► create_product(draft)                │
//! │                                                                         │
//! │  Status is derived from the configured clock on every call.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashSet;

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{field_errors, ApiError, FieldErrorDto};
use crate::state::{ConfigState, DbState};
use shelf_core::id::generate_unique_id;
use shelf_core::listing::filter_products;
use shelf_core::validation::validate_product_with;
use shelf_core::{
    BrazilianState, LifecycleStatus, Product, ProductDraft, ProductForm, StockFilter, StockSummary,
};

// =============================================================================
// DTOs
// =============================================================================

/// Product DTO for the UI: the stored record plus derived status.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    pub id: String,
    pub name: String,
    pub manufacturing_date: DateTime<Utc>,
    pub expiration_date: DateTime<Utc>,
    pub quantity: i64,
    pub batch: String,
    pub barcode: String,
    pub state: String,
    /// Full name of the state of origin, when the code is known.
    pub state_name: Option<String>,
    pub image_uri: Option<String>,
    pub description: Option<String>,
    pub status: LifecycleStatus,
    /// Whole days until expiration, rounded up. Negative once expired.
    pub days_remaining: i64,
    /// "Expiring soon" / "Expired", none for fresh products.
    pub badge: Option<String>,
}

impl ProductDto {
    pub fn from_product<Tz: TimeZone>(p: Product, now: &DateTime<Tz>) -> Self {
        let status = p.status(now);
        ProductDto {
            days_remaining: p.days_remaining(now),
            state_name: BrazilianState::from_code(&p.state).map(|s| s.name().to_string()),
            status,
            badge: status.badge().map(str::to_string),
            id: p.id,
            name: p.name,
            manufacturing_date: p.manufacturing_date,
            expiration_date: p.expiration_date,
            quantity: p.quantity,
            batch: p.batch,
            barcode: p.barcode,
            state: p.state,
            image_uri: p.image_uri,
            description: p.description,
        }
    }
}

/// The stock list screen.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockListDto {
    pub filter: StockFilter,
    pub products: Vec<ProductDto>,
    /// Counts over the whole stock, regardless of filter.
    pub summary: StockSummary,
}

/// Result of checking a draft without saving it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftCheckDto {
    pub valid: bool,
    pub errors: Vec<FieldErrorDto>,
}

/// A stored product reopened in the edit form.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditFormDto {
    pub id: String,
    pub draft: ProductDraft,
    /// Errors already present on load, e.g. an expiration date now past.
    pub errors: Vec<FieldErrorDto>,
}

// =============================================================================
// Queries
// =============================================================================

/// Lists stored products in insertion order, filtered by status.
///
/// ## Arguments
/// * `filter` - Filter chip selection (default: all)
pub async fn list_products(
    db: &DbState,
    config: &ConfigState,
    filter: Option<StockFilter>,
) -> Result<StockListDto, ApiError> {
    let filter = filter.unwrap_or_default();
    debug!(?filter, "list_products command");

    let now = config.now();
    let stock = db.inner().products().load_all().await?;

    let summary = StockSummary::from_products(&stock, &now);
    let products: Vec<ProductDto> = filter_products(&stock, filter, &now)
        .into_iter()
        .cloned()
        .map(|p| ProductDto::from_product(p, &now))
        .collect();

    info!(
        count = products.len(),
        total = summary.total,
        expired = summary.expired,
        "list_products complete"
    );

    Ok(StockListDto {
        filter,
        products,
        summary,
    })
}

/// Gets one product for the details screen.
pub async fn get_product_details(
    db: &DbState,
    config: &ConfigState,
    id: &str,
) -> Result<ProductDto, ApiError> {
    debug!(id = %id, "get_product_details command");
    let product = db
        .inner()
        .products()
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Product", id))?;
    Ok(ProductDto::from_product(product, &config.now()))
}

/// Checks a draft under the configured rules without saving it.
///
/// Failures are data here, not an error: the form shows them inline.
pub fn validate_product_draft(config: &ConfigState, draft: &ProductDraft) -> DraftCheckDto {
    let report = validate_product_with(draft, &config.now(), &config.rules());
    DraftCheckDto {
        valid: report.is_ok(),
        errors: field_errors(&report),
    }
}

/// Reopens a stored product in the edit form, re-validating its fields.
pub async fn load_product_for_edit(
    db: &DbState,
    config: &ConfigState,
    id: &str,
) -> Result<EditFormDto, ApiError> {
    debug!(id = %id, "load_product_for_edit command");
    let product = db
        .inner()
        .products()
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Product", id))?;

    let form = ProductForm::for_edit(&product, config.rules(), &config.now());
    Ok(EditFormDto {
        id: product.id,
        draft: form.draft().clone(),
        errors: field_errors(form.errors()),
    })
}

// =============================================================================
// Mutations
// =============================================================================

/// Validates a draft and stores it as a new product under a fresh id.
pub async fn create_product(
    db: &DbState,
    config: &ConfigState,
    draft: ProductDraft,
) -> Result<ProductDto, ApiError> {
    debug!(name = %draft.name, "create_product command");
    let repo = db.inner().products();
    let now = config.now();

    let taken: HashSet<String> = repo.ids().await?.into_iter().collect();
    let mut form = ProductForm::from_draft(draft, config.rules(), None);
    let product = form.submit(&now, || generate_unique_id(|id| taken.contains(id)))?;

    repo.add(&product).await?;

    info!(id = %product.id, "create_product complete");
    Ok(ProductDto::from_product(product, &now))
}

/// Validates a draft and replaces the stored product with id `id`.
///
/// ## Returns
/// The updated product, or `NOT_FOUND` if it was deleted meanwhile.
pub async fn update_product(
    db: &DbState,
    config: &ConfigState,
    id: &str,
    draft: ProductDraft,
) -> Result<ProductDto, ApiError> {
    debug!(id = %id, "update_product command");
    let now = config.now();

    let mut form = ProductForm::from_draft(draft, config.rules(), Some(id.to_string()));
    let product = form.submit(&now, || Ok(id.to_string()))?;

    if !db.inner().products().update(&product).await? {
        return Err(ApiError::not_found("Product", id));
    }

    info!(id = %id, "update_product complete");
    Ok(ProductDto::from_product(product, &now))
}

/// Deletes a product.
///
/// ## Returns
/// `NOT_FOUND` if no product has this id.
pub async fn delete_product(db: &DbState, id: &str) -> Result<(), ApiError> {
    debug!(id = %id, "delete_product command");

    if !db.inner().products().remove(id).await? {
        return Err(ApiError::not_found("Product", id));
    }

    info!(id = %id, "delete_product complete");
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
