//! # Lifecycle Module
//!
//! Classifies a product as Fresh, NearExpiry or Expired relative to a
//! reference "now". The status is derived on every read and never stored,
//! so it is always current without background updates.
//!
//! ## Classification Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   expiration < now ─────────────────────────────────► Expired          │
//! │        │ no                                                             │
//! │        ▼                                                                │
//! │   days = ceil((expiration - now) / 1 day)                              │
//! │        │                                                                │
//! │        ├── 0 < days <= 30 ──────────────────────────► NearExpiry       │
//! │        │                                                                │
//! │        └── otherwise ───────────────────────────────► Fresh            │
//! │                                                                         │
//! │  Expired compares raw timestamps; NearExpiry rounds the day count UP.  │
//! │  Boundary: now = Jan 1 00:00                                           │
//! │    Jan 31 00:00 → 30 days → NearExpiry                                 │
//! │    Feb  1 00:00 → 31 days → Fresh                                      │
//! │    Dec 31 23:59:59 (prev year) → Expired                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::NEAR_EXPIRY_DAYS;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Where a product stands relative to its expiration date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub enum LifecycleStatus {
    /// More than 30 days left.
    Fresh,
    /// Between 1 and 30 whole days left.
    NearExpiry,
    /// Expiration instant has passed.
    Expired,
}

impl LifecycleStatus {
    #[inline]
    pub fn is_expired(&self) -> bool {
        matches!(self, LifecycleStatus::Expired)
    }

    #[inline]
    pub fn is_near_expiry(&self) -> bool {
        matches!(self, LifecycleStatus::NearExpiry)
    }

    /// Badge text for the list and detail views. Fresh products get none.
    pub fn badge(&self) -> Option<&'static str> {
        match self {
            LifecycleStatus::Fresh => None,
            LifecycleStatus::NearExpiry => Some("Expiring soon"),
            LifecycleStatus::Expired => Some("Expired"),
        }
    }
}

/// Whole days until `expiration`, rounded up, at millisecond precision.
///
/// Negative once the date has passed by a full day or more. A product that
/// expired less than a day ago yields 0.
pub fn days_remaining(expiration: DateTime<Utc>, reference_now: DateTime<Utc>) -> i64 {
    let millis = (expiration - reference_now).num_milliseconds();
    let days = millis / MILLIS_PER_DAY;

    // Integer division truncates toward zero, which is already the ceiling
    // for negative values.
    if millis > 0 && millis % MILLIS_PER_DAY != 0 {
        days + 1
    } else {
        days
    }
}

/// Classifies a product by its expiration date.
///
/// ## Example
/// ```rust
/// use chrono::{TimeZone, Utc};
/// use shelf_core::lifecycle::{classify, LifecycleStatus};
///
/// let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
/// let exp = Utc.with_ymd_and_hms(2024, 1, 31, 0, 0, 0).unwrap();
/// assert_eq!(classify(exp, now), LifecycleStatus::NearExpiry);
/// ```
pub fn classify(expiration: DateTime<Utc>, reference_now: DateTime<Utc>) -> LifecycleStatus {
    if expiration < reference_now {
        return LifecycleStatus::Expired;
    }

    let days = days_remaining(expiration, reference_now);
    if days > 0 && days <= NEAR_EXPIRY_DAYS {
        LifecycleStatus::NearExpiry
    } else {
        LifecycleStatus::Fresh
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn jan_first() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_boundaries() {
        let now = jan_first();
        let jan_31 = Utc.with_ymd_and_hms(2024, 1, 31, 0, 0, 0).unwrap();
        let feb_1 = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
        let new_years_eve = Utc.with_ymd_and_hms(2023, 12, 31, 23, 59, 59).unwrap();

        assert_eq!(days_remaining(jan_31, now), 30);
        assert_eq!(classify(jan_31, now), LifecycleStatus::NearExpiry);

        assert_eq!(days_remaining(feb_1, now), 31);
        assert_eq!(classify(feb_1, now), LifecycleStatus::Fresh);

        assert_eq!(classify(new_years_eve, now), LifecycleStatus::Expired);
    }

    #[test]
    fn test_partial_days_round_up() {
        let now = jan_first();
        assert_eq!(days_remaining(now + Duration::milliseconds(1), now), 1);
        assert_eq!(days_remaining(now + Duration::hours(30 * 24 + 1), now), 31);
        assert_eq!(
            classify(now + Duration::hours(30 * 24 + 1), now),
            LifecycleStatus::Fresh
        );
        assert_eq!(
            classify(now + Duration::hours(29 * 24 + 23), now),
            LifecycleStatus::NearExpiry
        );
    }

    #[test]
    fn test_negative_days() {
        let now = jan_first();
        assert_eq!(days_remaining(now - Duration::hours(5), now), 0);
        assert_eq!(days_remaining(now - Duration::hours(36), now), -1);
        assert_eq!(days_remaining(now - Duration::days(3), now), -3);
    }

    #[test]
    fn test_expiring_exactly_now_is_fresh() {
        // Not yet expired, and zero days left is outside (0, 30]
        let now = jan_first();
        assert_eq!(classify(now, now), LifecycleStatus::Fresh);
    }

    #[test]
    fn test_end_to_end_scenario() {
        let now = Utc.with_ymd_and_hms(2024, 3, 10, 14, 0, 0).unwrap();
        assert_eq!(classify(now + Duration::days(40), now), LifecycleStatus::Fresh);
        assert_eq!(classify(now + Duration::days(10), now), LifecycleStatus::NearExpiry);
        assert_eq!(classify(now - Duration::days(1), now), LifecycleStatus::Expired);
    }

    #[test]
    fn test_badges() {
        assert_eq!(LifecycleStatus::Fresh.badge(), None);
        assert_eq!(LifecycleStatus::Expired.badge(), Some("Expired"));
        assert!(LifecycleStatus::NearExpiry.is_near_expiry());
        assert!(!LifecycleStatus::NearExpiry.is_expired());
    }
}
