//! # Validation Module
//!
//! Field validators and the aggregate "can this product be saved" check.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Form sanitizers (form.rs)                                    │
//! │  ├── Strip disallowed characters on every edit                         │
//! │  └── Re-run the edited field's validator                               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── One validator per field, each returning a reason code             │
//! │  └── validate_product: every field at once, on submit                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Storage (shelf-db)                                           │
//! │  └── Unique id within the collection                                   │
//! │                                                                         │
//! │  Every validator also holds for direct/API input that skipped Layer 1  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use chrono::{Duration, TimeZone, Utc};
//! use shelf_core::validation::{validate_product, validate_quantity};
//! use shelf_core::{Field, ProductDraft, ValidationError};
//!
//! assert_eq!(validate_quantity("10"), Ok(10));
//! assert_eq!(validate_quantity("0"), Err(ValidationError::NotPositive));
//!
//! let now = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
//! let mut draft = ProductDraft::blank(now);
//! draft.name = "Milk 2L".into();
//! draft.expiration_date = now + Duration::days(40);
//! draft.quantity = "10".into();
//! draft.batch = "LT2024".into();
//! draft.barcode = "789123".into();
//! draft.state = "SP".into();
//! assert!(validate_product(&draft, &now).is_ok());
//!
//! draft.batch = "AB-12".into();
//! let report = validate_product(&draft, &now);
//! assert_eq!(report.get(Field::Batch), Some(ValidationError::InvalidBatchFormat));
//! ```

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, TimeZone, Utc};

use crate::error::{FieldError, ValidationError};
use crate::region::BrazilianState;
use crate::types::{Field, ProductDraft};
use crate::MAX_DESCRIPTION_CHARS;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Text Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty after trimming
/// - Only ASCII letters, digits and spaces
///
/// ## Example
/// ```rust
/// use shelf_core::validation::validate_name;
/// use shelf_core::ValidationError;
///
/// assert!(validate_name("Milk 2L").is_ok());
/// assert_eq!(validate_name("   "), Err(ValidationError::EmptyField));
/// assert_eq!(validate_name("Milk#1"), Err(ValidationError::InvalidCharacters));
/// ```
pub fn validate_name(name: &str) -> ValidationResult<()> {
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyField);
    }

    if !name.chars().all(is_name_char) {
        return Err(ValidationError::InvalidCharacters);
    }

    Ok(())
}

/// Characters allowed in a product name.
#[inline]
pub(crate) fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == ' '
}

/// Validates a batch (lot) code.
///
/// ## Rules
/// - Must not be empty after trimming
/// - At least one letter and at least one digit
/// - No whitespace, no symbols
///
/// Any broken sub-rule yields the same [`ValidationError::InvalidBatchFormat`].
pub fn validate_batch(batch: &str) -> ValidationResult<()> {
    if batch.trim().is_empty() {
        return Err(ValidationError::EmptyField);
    }

    let has_letter = batch.chars().any(|c| c.is_ascii_alphabetic());
    let has_digit = batch.chars().any(|c| c.is_ascii_digit());
    let has_no_spaces = !batch.chars().any(char::is_whitespace);
    let only_alphanumeric = batch.chars().all(|c| c.is_ascii_alphanumeric());

    if !(has_letter && has_digit && has_no_spaces && only_alphanumeric) {
        return Err(ValidationError::InvalidBatchFormat);
    }

    Ok(())
}

/// Validates a barcode.
///
/// Only checked on submit. Any non-blank content is accepted, since the
/// scanner reads QR, PDF417, EAN, UPC and Code 39/128 symbols alike.
pub fn validate_barcode(barcode: &str) -> ValidationResult<()> {
    if barcode.trim().is_empty() {
        return Err(ValidationError::EmptyField);
    }

    Ok(())
}

/// Validates the optional description length, counted in characters.
pub fn validate_description(description: &str, max_chars: usize) -> ValidationResult<()> {
    if description.chars().count() > max_chars {
        return Err(ValidationError::TooLong { max: max_chars });
    }

    Ok(())
}

// =============================================================================
// Region Validators
// =============================================================================

/// Validates the selected state of origin.
///
/// Only checks that something was selected: the picker restricts the
/// choices, this function does not. Use [`validate_state_code`] to enforce
/// membership for input that did not come through the picker.
pub fn validate_state(code: &str) -> ValidationResult<()> {
    if code.is_empty() {
        return Err(ValidationError::EmptyField);
    }

    Ok(())
}

/// Validates the state of origin against the 27 federative units.
pub fn validate_state_code(code: &str) -> ValidationResult<BrazilianState> {
    if code.is_empty() {
        return Err(ValidationError::EmptyField);
    }

    BrazilianState::from_code(code).ok_or(ValidationError::UnknownRegion)
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates the quantity text and returns the parsed quantity.
///
/// ## Rules
/// ```text
/// ""      → EmptyField
/// "abc"   → NotANumber
/// "1.5"   → NotANumber   (not a whole number of units)
/// "0"     → NotPositive
/// "-5"    → NotPositive
/// "10"    → Ok(10)
/// "1e3"   → Ok(1000)
/// ```
pub fn validate_quantity(text: &str) -> ValidationResult<i64> {
    let text = text.trim();

    if text.is_empty() {
        return Err(ValidationError::EmptyField);
    }

    if let Ok(qty) = text.parse::<i64>() {
        return if qty <= 0 {
            Err(ValidationError::NotPositive)
        } else {
            Ok(qty)
        };
    }

    // Not a plain integer: accept other numeric notations as long as they
    // denote a positive whole number that fits.
    let value = text
        .parse::<f64>()
        .map_err(|_| ValidationError::NotANumber)?;

    if value.is_nan() {
        return Err(ValidationError::NotANumber);
    }

    if value <= 0.0 {
        return Err(ValidationError::NotPositive);
    }

    if value.fract() != 0.0 || value >= i64::MAX as f64 {
        return Err(ValidationError::NotANumber);
    }

    Ok(value as i64)
}

// =============================================================================
// Date Validators
// =============================================================================

/// Start of the reference instant's day, in the reference's own time zone.
///
/// ## Example
/// ```rust
/// use chrono::{FixedOffset, TimeZone, Utc};
/// use shelf_core::validation::start_of_day;
///
/// // 01:00 UTC is still the previous evening in Brasília (UTC-3)
/// let brt = FixedOffset::west_opt(3 * 3600).unwrap();
/// let now = Utc.with_ymd_and_hms(2024, 6, 15, 1, 0, 0).unwrap().with_timezone(&brt);
/// assert_eq!(start_of_day(&now), Utc.with_ymd_and_hms(2024, 6, 14, 3, 0, 0).unwrap());
/// ```
pub fn start_of_day<Tz: TimeZone>(now: &DateTime<Tz>) -> DateTime<Utc> {
    now.date_naive()
        .and_hms_opt(0, 0, 0)
        .and_then(|midnight| now.timezone().from_local_datetime(&midnight).earliest())
        .map(|midnight| midnight.with_timezone(&Utc))
        .unwrap_or_else(|| now.with_timezone(&Utc))
}

/// Validates the expiration date.
///
/// ## Rules
/// - Must be strictly after midnight of the reference day
///
/// The comparison is against *today*, not against the manufacturing date.
/// An expiration later today still passes.
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Form: pick expiration date                                             │
/// │                                                                         │
/// │  User picks 2024-06-14 while it is 2024-06-15 10:00                    │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_expiration_date(date, now) ← THIS FUNCTION                   │
/// │       │                                                                 │
/// │       ├── date <= 2024-06-15 00:00? → NotInFuture                      │
/// │       │                                                                 │
/// │       └── OK → error cleared                                           │
/// │                                                                         │
/// │  Also re-run whenever the manufacturing date changes.                  │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_expiration_date<Tz: TimeZone>(
    date: DateTime<Utc>,
    reference_now: &DateTime<Tz>,
) -> ValidationResult<()> {
    if date <= start_of_day(reference_now) {
        return Err(ValidationError::NotInFuture);
    }

    Ok(())
}

// =============================================================================
// Rules
// =============================================================================

/// Which optional checks apply on top of the base field rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationRules {
    /// Require the state code to be one of the 27 federative units.
    pub strict_region: bool,

    /// Reject descriptions longer than this many characters.
    pub max_description_chars: Option<usize>,
}

impl ValidationRules {
    /// The base rules: any non-empty state code, description unchecked.
    pub const fn lenient() -> Self {
        ValidationRules {
            strict_region: false,
            max_description_chars: None,
        }
    }

    /// Base rules plus region membership and the description limit.
    pub const fn strict() -> Self {
        ValidationRules {
            strict_region: true,
            max_description_chars: Some(MAX_DESCRIPTION_CHARS),
        }
    }
}

impl Default for ValidationRules {
    fn default() -> Self {
        ValidationRules::lenient()
    }
}

// =============================================================================
// Validation Report
// =============================================================================

/// Outcome of validating a whole product: one entry per failing field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    errors: BTreeMap<Field, ValidationError>,
}

impl ValidationReport {
    /// An empty (passing) report.
    pub fn new() -> Self {
        ValidationReport::default()
    }

    /// Whether every check passed.
    #[inline]
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of failing fields.
    #[inline]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// The reason a field failed, if it did.
    pub fn get(&self, field: Field) -> Option<ValidationError> {
        self.errors.get(&field).copied()
    }

    pub fn contains(&self, field: Field) -> bool {
        self.errors.contains_key(&field)
    }

    /// Failing fields in form order.
    pub fn iter(&self) -> impl Iterator<Item = FieldError> + '_ {
        self.errors
            .iter()
            .map(|(field, reason)| FieldError::new(*field, *reason))
    }

    /// Records the outcome of one field check, replacing any previous entry.
    pub fn record<T>(&mut self, field: Field, result: ValidationResult<T>) {
        match result {
            Ok(_) => {
                self.errors.remove(&field);
            }
            Err(reason) => {
                self.errors.insert(field, reason);
            }
        }
    }

    /// `Ok(())` when passing, otherwise the report itself.
    pub fn into_result(self) -> Result<(), ValidationReport> {
        if self.is_ok() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_ok() {
            return f.write_str("no errors");
        }

        for (i, err) in self.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}", err)?;
        }
        Ok(())
    }
}

// =============================================================================
// Product Validators
// =============================================================================

/// Runs the check for a single field of a draft.
///
/// Fields without a rule (manufacturing date, and description under
/// lenient rules) always pass.
pub fn validate_field<Tz: TimeZone>(
    field: Field,
    draft: &ProductDraft,
    reference_now: &DateTime<Tz>,
    rules: &ValidationRules,
) -> ValidationResult<()> {
    match field {
        Field::Name => validate_name(&draft.name),
        Field::Description => match rules.max_description_chars {
            Some(max) => validate_description(&draft.description, max),
            None => Ok(()),
        },
        Field::ManufacturingDate => Ok(()),
        Field::ExpirationDate => validate_expiration_date(draft.expiration_date, reference_now),
        Field::Quantity => validate_quantity(&draft.quantity).map(|_| ()),
        Field::Batch => validate_batch(&draft.batch),
        Field::Barcode => validate_barcode(&draft.barcode),
        Field::State if rules.strict_region => validate_state_code(&draft.state).map(|_| ()),
        Field::State => validate_state(&draft.state),
    }
}

/// Validates every field of a candidate product under `rules`.
pub fn validate_product_with<Tz: TimeZone>(
    candidate: &ProductDraft,
    reference_now: &DateTime<Tz>,
    rules: &ValidationRules,
) -> ValidationReport {
    let mut report = ValidationReport::new();
    for field in Field::ALL {
        report.record(field, validate_field(field, candidate, reference_now, rules));
    }
    report
}

/// Validates a candidate product: name, expiration date, quantity, batch,
/// state and barcode.
///
/// Every failing field is reported, not just the first.
pub fn validate_product<Tz: TimeZone>(
    candidate: &ProductDraft,
    reference_now: &DateTime<Tz>,
) -> ValidationReport {
    validate_product_with(candidate, reference_now, &ValidationRules::lenient())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, FixedOffset};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 10, 30, 0).unwrap()
    }

    fn valid_draft() -> ProductDraft {
        let now = now();
        ProductDraft {
            name: "Milk 2L".to_string(),
            manufacturing_date: now - Duration::days(2),
            expiration_date: now + Duration::days(40),
            quantity: "10".to_string(),
            batch: "LT2024".to_string(),
            barcode: "789123".to_string(),
            state: "SP".to_string(),
            image_uri: None,
            description: String::new(),
        }
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("Milk 2L").is_ok());
        assert!(validate_name("Queijo Minas 500g").is_ok());
        assert!(validate_name("123").is_ok());

        assert_eq!(validate_name(""), Err(ValidationError::EmptyField));
        assert_eq!(validate_name("   "), Err(ValidationError::EmptyField));
        assert_eq!(validate_name("Milk#1"), Err(ValidationError::InvalidCharacters));
        assert_eq!(validate_name("Pão"), Err(ValidationError::InvalidCharacters));
        assert_eq!(validate_name("Milk\t2L"), Err(ValidationError::InvalidCharacters));
    }

    #[test]
    fn test_validate_quantity() {
        assert_eq!(validate_quantity("1"), Ok(1));
        assert_eq!(validate_quantity("100"), Ok(100));
        assert_eq!(validate_quantity(" 7 "), Ok(7));
        assert_eq!(validate_quantity("1e3"), Ok(1000));

        assert_eq!(validate_quantity("0"), Err(ValidationError::NotPositive));
        assert_eq!(validate_quantity("-5"), Err(ValidationError::NotPositive));
        assert_eq!(validate_quantity("-0.5"), Err(ValidationError::NotPositive));
        assert_eq!(validate_quantity(""), Err(ValidationError::EmptyField));
        assert_eq!(validate_quantity("abc"), Err(ValidationError::NotANumber));
        assert_eq!(validate_quantity("NaN"), Err(ValidationError::NotANumber));
        assert_eq!(validate_quantity("1.5"), Err(ValidationError::NotANumber));
        assert_eq!(validate_quantity("inf"), Err(ValidationError::NotANumber));
    }

    #[test]
    fn test_validate_batch() {
        assert!(validate_batch("AB12").is_ok());
        assert!(validate_batch("LT2024").is_ok());
        assert!(validate_batch("1a").is_ok());

        assert_eq!(validate_batch(""), Err(ValidationError::EmptyField));
        assert_eq!(validate_batch("  "), Err(ValidationError::EmptyField));
        assert_eq!(validate_batch("1234"), Err(ValidationError::InvalidBatchFormat));
        assert_eq!(validate_batch("ABCD"), Err(ValidationError::InvalidBatchFormat));
        assert_eq!(validate_batch("AB 12"), Err(ValidationError::InvalidBatchFormat));
        assert_eq!(validate_batch("AB-12"), Err(ValidationError::InvalidBatchFormat));
        assert_eq!(validate_batch(" AB12"), Err(ValidationError::InvalidBatchFormat));
    }

    #[test]
    fn test_validate_state() {
        assert!(validate_state("SP").is_ok());
        assert!(validate_state("anything").is_ok());
        assert_eq!(validate_state(""), Err(ValidationError::EmptyField));

        assert_eq!(validate_state_code("RJ"), Ok(BrazilianState::RJ));
        assert_eq!(validate_state_code("XX"), Err(ValidationError::UnknownRegion));
        assert_eq!(validate_state_code(""), Err(ValidationError::EmptyField));
    }

    #[test]
    fn test_validate_barcode() {
        assert!(validate_barcode("789123").is_ok());
        assert!(validate_barcode("https://example.com/qr").is_ok());
        assert_eq!(validate_barcode(""), Err(ValidationError::EmptyField));
        assert_eq!(validate_barcode(" \n"), Err(ValidationError::EmptyField));
    }

    #[test]
    fn test_validate_description() {
        assert!(validate_description("", 500).is_ok());
        assert!(validate_description(&"é".repeat(500), 500).is_ok());
        assert_eq!(
            validate_description(&"a".repeat(501), 500),
            Err(ValidationError::TooLong { max: 500 })
        );
    }

    #[test]
    fn test_expiration_must_be_after_midnight() {
        let now = now();
        let midnight = Utc.with_ymd_and_hms(2024, 6, 15, 0, 0, 0).unwrap();

        assert_eq!(start_of_day(&now), midnight);
        assert_eq!(
            validate_expiration_date(midnight, &now),
            Err(ValidationError::NotInFuture)
        );
        assert_eq!(
            validate_expiration_date(midnight - Duration::days(3), &now),
            Err(ValidationError::NotInFuture)
        );
        assert!(validate_expiration_date(midnight + Duration::seconds(1), &now).is_ok());
        // Earlier today than `now`, but still after midnight
        assert!(validate_expiration_date(now - Duration::hours(2), &now).is_ok());
        assert!(validate_expiration_date(now + Duration::days(1), &now).is_ok());
    }

    #[test]
    fn test_expiration_uses_local_midnight() {
        let brt = FixedOffset::west_opt(3 * 3600).unwrap();
        // 2024-06-15 01:00 UTC is 2024-06-14 22:00 in Brasília
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 1, 0, 0).unwrap();
        let date = Utc.with_ymd_and_hms(2024, 6, 14, 12, 0, 0).unwrap();

        assert!(validate_expiration_date(date, &now.with_timezone(&brt)).is_ok());
        assert_eq!(
            validate_expiration_date(date, &now),
            Err(ValidationError::NotInFuture)
        );
    }

    #[test]
    fn test_validate_product_passes_valid_draft() {
        let report = validate_product(&valid_draft(), &now());
        assert!(report.is_ok());
        assert!(report.is_empty());
        assert_eq!(report.to_string(), "no errors");
    }

    #[test]
    fn test_validate_product_flags_exactly_the_broken_field() {
        let now = now();
        let cases: [(Field, fn(&mut ProductDraft)); 6] = [
            (Field::Name, |d: &mut ProductDraft| d.name = "Milk#1".into()),
            (Field::ExpirationDate, |d: &mut ProductDraft| {
                d.expiration_date = d.manufacturing_date
            }),
            (Field::Quantity, |d: &mut ProductDraft| d.quantity = "0".into()),
            (Field::Batch, |d: &mut ProductDraft| d.batch = "ABCD".into()),
            (Field::State, |d: &mut ProductDraft| d.state = String::new()),
            (Field::Barcode, |d: &mut ProductDraft| d.barcode = "  ".into()),
        ];

        for (field, breaker) in cases {
            let mut draft = valid_draft();
            breaker(&mut draft);
            let report = validate_product(&draft, &now);
            assert!(!report.is_ok(), "{:?} should fail", field);
            assert_eq!(report.len(), 1);
            assert!(report.contains(field));
        }
    }

    #[test]
    fn test_validate_product_reports_every_failure() {
        let mut draft = valid_draft();
        draft.name = String::new();
        draft.quantity = "abc".into();
        draft.batch = "AB 12".into();

        let report = validate_product(&draft, &now());
        assert_eq!(report.len(), 3);
        assert_eq!(report.get(Field::Name), Some(ValidationError::EmptyField));
        assert_eq!(report.get(Field::Quantity), Some(ValidationError::NotANumber));
        assert_eq!(report.get(Field::Batch), Some(ValidationError::InvalidBatchFormat));
        assert_eq!(
            report.to_string(),
            "Product name is required; Quantity must be a number; \
             Batch must contain at least 1 letter and 1 number, without spaces or symbols"
        );
    }

    #[test]
    fn test_strict_rules() {
        let now = now();
        let mut draft = valid_draft();
        draft.state = "ZZ".into();
        draft.description = "x".repeat(501);

        assert!(validate_product(&draft, &now).is_ok());

        let report = validate_product_with(&draft, &now, &ValidationRules::strict());
        assert_eq!(report.get(Field::State), Some(ValidationError::UnknownRegion));
        assert_eq!(
            report.get(Field::Description),
            Some(ValidationError::TooLong { max: 500 })
        );
    }

    #[test]
    fn test_validators_are_idempotent() {
        let now = now();
        let draft = valid_draft();
        assert_eq!(validate_product(&draft, &now), validate_product(&draft, &now));
        assert_eq!(validate_batch("AB-12"), validate_batch("AB-12"));
        assert_eq!(validate_quantity("42"), validate_quantity("42"));
    }

    #[test]
    fn test_report_record_replaces_entries() {
        let mut report = ValidationReport::new();
        report.record::<()>(Field::Batch, Err(ValidationError::EmptyField));
        assert!(report.contains(Field::Batch));
        report.record(Field::Batch, Ok(()));
        assert!(report.is_ok());
        assert!(report.into_result().is_ok());
    }
}
