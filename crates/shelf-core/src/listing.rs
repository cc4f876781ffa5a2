//! # Stock Listing
//!
//! Filters behind the stock list's filter chips, and per-status counts.

use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::lifecycle::LifecycleStatus;
use crate::types::Product;

/// Which products the stock list shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub enum StockFilter {
    #[default]
    All,
    Expired,
    NearExpiry,
}

impl StockFilter {
    /// Whether a product with this status passes the filter.
    pub fn matches(&self, status: LifecycleStatus) -> bool {
        match self {
            StockFilter::All => true,
            StockFilter::Expired => status.is_expired(),
            StockFilter::NearExpiry => status.is_near_expiry(),
        }
    }
}

/// Products passing `filter`, in their stored order.
pub fn filter_products<'a, Tz: TimeZone>(
    products: &'a [Product],
    filter: StockFilter,
    now: &DateTime<Tz>,
) -> Vec<&'a Product> {
    products
        .iter()
        .filter(|p| filter.matches(p.status(now)))
        .collect()
}

/// Product counts per lifecycle status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StockSummary {
    pub total: usize,
    pub fresh: usize,
    pub near_expiry: usize,
    pub expired: usize,
}

impl StockSummary {
    pub fn from_products<Tz: TimeZone>(products: &[Product], now: &DateTime<Tz>) -> Self {
        products
            .iter()
            .fold(StockSummary::default(), |mut summary, product| {
                summary.total += 1;
                match product.status(now) {
                    LifecycleStatus::Fresh => summary.fresh += 1,
                    LifecycleStatus::NearExpiry => summary.near_expiry += 1,
                    LifecycleStatus::Expired => summary.expired += 1,
                }
                summary
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn product(id: &str, expires_in_days: i64, now: DateTime<Utc>) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Item {}", id),
            manufacturing_date: now - Duration::days(5),
            expiration_date: now + Duration::days(expires_in_days),
            quantity: 1,
            batch: "A1".to_string(),
            barcode: "1".to_string(),
            state: "SP".to_string(),
            image_uri: None,
            description: None,
        }
    }

    fn stock(now: DateTime<Utc>) -> Vec<Product> {
        vec![
            product("100001", 40, now),
            product("100002", -1, now),
            product("100003", 10, now),
            product("100004", -20, now),
            product("100005", 30, now),
        ]
    }

    fn ids(products: Vec<&Product>) -> Vec<&str> {
        products.into_iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_filter_keeps_order() {
        let now = Utc.with_ymd_and_hms(2024, 3, 10, 14, 0, 0).unwrap();
        let stock = stock(now);

        assert_eq!(filter_products(&stock, StockFilter::All, &now).len(), 5);
        assert_eq!(
            ids(filter_products(&stock, StockFilter::Expired, &now)),
            vec!["100002", "100004"]
        );
        assert_eq!(
            ids(filter_products(&stock, StockFilter::NearExpiry, &now)),
            vec!["100003", "100005"]
        );
    }

    #[test]
    fn test_filter_empty_stock() {
        let now = Utc.with_ymd_and_hms(2024, 3, 10, 14, 0, 0).unwrap();
        assert!(filter_products(&[], StockFilter::Expired, &now).is_empty());
        assert_eq!(StockSummary::from_products(&[], &now), StockSummary::default());
    }

    #[test]
    fn test_summary_counts() {
        let now = Utc.with_ymd_and_hms(2024, 3, 10, 14, 0, 0).unwrap();
        let summary = StockSummary::from_products(&stock(now), &now);
        assert_eq!(
            summary,
            StockSummary {
                total: 5,
                fresh: 1,
                near_expiry: 2,
                expired: 2,
            }
        );
    }

    #[test]
    fn test_filter_serializes_camel_case() {
        assert_eq!(
            serde_json::to_string(&StockFilter::NearExpiry).unwrap(),
            "\"nearExpiry\""
        );
        assert_eq!(StockFilter::default(), StockFilter::All);
    }
}
