//! # Configuration State
//!
//! Stores application configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`SHELF_*`)
//! 2. Defaults (this file)
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use chrono::{DateTime, FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};
use shelf_core::{ValidationRules, MAX_DESCRIPTION_CHARS, NEAR_EXPIRY_DAYS};
use std::path::PathBuf;
use tracing::warn;

/// Largest UTC offset accepted, in minutes.
const MAX_OFFSET_MINUTES: i32 = 14 * 60;

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// Store name shown in the header.
    pub store_name: String,

    /// Require the state of origin to be one of the 27 federative units.
    /// Off means any non-empty code is accepted.
    pub strict_region: bool,

    /// Local offset from UTC used to decide when "today" starts.
    /// Default: -180 (Brasília)
    pub utc_offset_minutes: i32,

    /// Products within this many days of expiring are flagged (display only).
    pub near_expiry_days: i64,

    /// Description length limit (display only).
    pub max_description_chars: usize,

    /// Database file override.
    #[serde(skip)]
    pub db_path: Option<PathBuf>,

    /// Frozen clock, for tests and demos.
    #[serde(skip)]
    pub fixed_now: Option<DateTime<Utc>>,
}

impl Default for ConfigState {
    fn default() -> Self {
        ConfigState {
            store_name: "My Shelf".to_string(),
            strict_region: true,
            utc_offset_minutes: -180,
            near_expiry_days: NEAR_EXPIRY_DAYS,
            max_description_chars: MAX_DESCRIPTION_CHARS,
            db_path: None,
            fixed_now: None,
        }
    }
}

impl ConfigState {
    /// Creates a new ConfigState from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `SHELF_DB_PATH`: Database file to use instead of the app data dir
    /// - `SHELF_STORE_NAME`: Override store name
    /// - `SHELF_STRICT_REGION`: `true` / `false`
    /// - `SHELF_UTC_OFFSET_MINUTES`: e.g. `-180`
    pub fn from_env() -> Self {
        ConfigState::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env), reading variables from `lookup`.
    ///
    /// Unparseable values are logged and ignored.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = ConfigState::default();

        if let Some(path) = lookup("SHELF_DB_PATH").filter(|p| !p.trim().is_empty()) {
            config.db_path = Some(PathBuf::from(path));
        }

        if let Some(store_name) = lookup("SHELF_STORE_NAME") {
            config.store_name = store_name;
        }

        if let Some(raw) = lookup("SHELF_STRICT_REGION") {
            match parse_bool(&raw) {
                Some(strict) => config.strict_region = strict,
                None => warn!(value = %raw, "Ignoring invalid SHELF_STRICT_REGION"),
            }
        }

        if let Some(raw) = lookup("SHELF_UTC_OFFSET_MINUTES") {
            match raw.trim().parse::<i32>() {
                Ok(minutes) if minutes.abs() <= MAX_OFFSET_MINUTES => {
                    config.utc_offset_minutes = minutes;
                }
                _ => warn!(value = %raw, "Ignoring invalid SHELF_UTC_OFFSET_MINUTES"),
            }
        }

        config
    }

    /// Returns a copy whose clock is frozen at `now`.
    pub fn with_fixed_now(mut self, now: DateTime<Utc>) -> Self {
        self.fixed_now = Some(now);
        self
    }

    /// Validation rules for product input.
    pub fn rules(&self) -> ValidationRules {
        if self.strict_region {
            ValidationRules::strict()
        } else {
            ValidationRules {
                strict_region: false,
                max_description_chars: Some(self.max_description_chars),
            }
        }
    }

    /// The configured local time zone.
    pub fn timezone(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_minutes.saturating_mul(60)).unwrap_or(Utc.fix())
    }

    /// The current local time, used as the reference for every date rule.
    pub fn now(&self) -> DateTime<FixedOffset> {
        self.fixed_now
            .unwrap_or_else(Utc::now)
            .with_timezone(&self.timezone())
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
