//! # Domain Types
//!
//! Core domain types used throughout Shelf.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  ProductDraft   │   │    Product      │   │ LifecycleStatus │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  raw form text  │──►│  id (6 digits)  │──►│  Fresh          │       │
//! │  │  quantity: str  │   │  quantity: i64  │   │  NearExpiry     │       │
//! │  │  no id          │   │  persisted      │   │  Expired        │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │         validate + submit        derived on every read, never stored   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Persisted Shape
//! Products are stored as one JSON array with camelCase keys, e.g.
//! `{"id":"482913","name":"Milk 2L","manufacturingDate":"...","expirationDate":"...",
//!   "quantity":10,"batch":"LT2024","barcode":"789123","state":"SP"}`.
//! Optional fields are omitted when absent.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::lifecycle::{self, LifecycleStatus};

// =============================================================================
// Field
// =============================================================================

/// A product form field, used to key validation errors.
///
/// Declaration order is form order, so reports list errors top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Name,
    Description,
    ManufacturingDate,
    ExpirationDate,
    Quantity,
    Batch,
    Barcode,
    State,
}

impl Field {
    /// Every field, in form order.
    pub const ALL: [Field; 8] = [
        Field::Name,
        Field::Description,
        Field::ManufacturingDate,
        Field::ExpirationDate,
        Field::Quantity,
        Field::Batch,
        Field::Barcode,
        Field::State,
    ];

    /// Human-readable label shown next to the input.
    pub fn label(&self) -> &'static str {
        match self {
            Field::Name => "Product name",
            Field::Description => "Description",
            Field::ManufacturingDate => "Manufacturing date",
            Field::ExpirationDate => "Expiration date",
            Field::Quantity => "Quantity",
            Field::Batch => "Batch",
            Field::Barcode => "Barcode",
            Field::State => "State of origin",
        }
    }
}

// =============================================================================
// Product
// =============================================================================

/// A perishable product registered in stock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// 6-digit numeric identifier, immutable once assigned.
    pub id: String,

    /// Display name (letters, digits and spaces).
    pub name: String,

    #[ts(as = "String")]
    pub manufacturing_date: DateTime<Utc>,

    #[ts(as = "String")]
    pub expiration_date: DateTime<Utc>,

    /// Units in stock, always positive.
    pub quantity: i64,

    /// Manufacturer lot code, e.g. "LT2024".
    pub batch: String,

    pub barcode: String,

    /// Two-letter federative unit code of origin.
    pub state: String,

    /// Local URI of the product photo.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_uri: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Product {
    /// Lifecycle status relative to `now`.
    #[inline]
    pub fn status<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> LifecycleStatus {
        lifecycle::classify(self.expiration_date, now.with_timezone(&Utc))
    }

    /// Whole days (rounded up) until expiration.
    #[inline]
    pub fn days_remaining<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> i64 {
        lifecycle::days_remaining(self.expiration_date, now.with_timezone(&Utc))
    }

    /// Converts back to raw form input for editing.
    pub fn to_draft(&self) -> ProductDraft {
        ProductDraft {
            name: self.name.clone(),
            manufacturing_date: self.manufacturing_date,
            expiration_date: self.expiration_date,
            quantity: self.quantity.to_string(),
            batch: self.batch.clone(),
            barcode: self.barcode.clone(),
            state: self.state.clone(),
            image_uri: self.image_uri.clone(),
            description: self.description.clone().unwrap_or_default(),
        }
    }
}

// =============================================================================
// Product Draft
// =============================================================================

/// Raw product input as typed into the add/edit form.
///
/// ## Why a separate type?
/// The quantity arrives as text and may not be a number yet, the description
/// may be empty, and a new product has no id. A `Product` only exists once a
/// draft passes validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    pub name: String,

    #[ts(as = "String")]
    pub manufacturing_date: DateTime<Utc>,

    #[ts(as = "String")]
    pub expiration_date: DateTime<Utc>,

    /// Quantity exactly as typed.
    pub quantity: String,

    pub batch: String,

    pub barcode: String,

    /// Selected region code, empty when nothing is selected.
    pub state: String,

    #[serde(default)]
    pub image_uri: Option<String>,

    /// Free text, empty means no description.
    #[serde(default)]
    pub description: String,
}

impl ProductDraft {
    /// An empty form with both dates set to `now`.
    pub fn blank(now: DateTime<Utc>) -> Self {
        ProductDraft {
            name: String::new(),
            manufacturing_date: now,
            expiration_date: now,
            quantity: String::new(),
            batch: String::new(),
            barcode: String::new(),
            state: String::new(),
            image_uri: None,
            description: String::new(),
        }
    }
}

impl From<&Product> for ProductDraft {
    fn from(p: &Product) -> Self {
        p.to_draft()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Product {
        Product {
            id: "482913".to_string(),
            name: "Milk 2L".to_string(),
            manufacturing_date: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            expiration_date: Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap(),
            quantity: 10,
            batch: "LT2024".to_string(),
            barcode: "789123".to_string(),
            state: "SP".to_string(),
            image_uri: None,
            description: None,
        }
    }

    #[test]
    fn test_product_json_is_camel_case() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["expirationDate"], "2024-03-01T00:00:00Z");
        assert_eq!(json["quantity"], 10);
        assert!(json.get("imageUri").is_none());
        assert!(json.get("description").is_none());
    }

    #[test]
    fn test_product_reads_stored_js_dates() {
        let json = r#"{
            "id": "100200",
            "name": "Yogurt",
            "manufacturingDate": "2024-05-10T13:45:00.000Z",
            "expirationDate": "2024-06-10T13:45:00.000Z",
            "quantity": 3,
            "batch": "Y7",
            "barcode": "7891000",
            "state": "MG",
            "imageUri": "file:///photos/yogurt.jpg"
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.quantity, 3);
        assert_eq!(product.image_uri.as_deref(), Some("file:///photos/yogurt.jpg"));
        assert_eq!(product.description, None);
    }

    #[test]
    fn test_to_draft_keeps_fields() {
        let mut product = sample();
        product.description = Some("Whole milk".to_string());
        let draft = product.to_draft();
        assert_eq!(draft.quantity, "10");
        assert_eq!(draft.description, "Whole milk");
        assert_eq!(draft.expiration_date, product.expiration_date);
    }

    #[test]
    fn test_status_accepts_local_time() {
        let product = sample();
        let now = chrono::FixedOffset::west_opt(3 * 3600)
            .unwrap()
            .with_ymd_and_hms(2024, 2, 20, 12, 0, 0)
            .unwrap();
        assert_eq!(product.status(&now), LifecycleStatus::NearExpiry);
    }

    #[test]
    fn test_field_labels() {
        assert_eq!(Field::State.label(), "State of origin");
        assert!(Field::Name < Field::Quantity);
    }
}
