//! # Product Form
//!
//! State behind the add/edit product screen: the raw draft, the current
//! per-field errors and, when editing, the id being edited.
//!
//! ## Edit Cycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  keystroke ──► set_name("Milk#1")                                      │
//! │                    │                                                    │
//! │                    ├── sanitize   → "Milk1"                             │
//! │                    ├── store in draft                                   │
//! │                    └── re-validate that field → record / clear error    │
//! │                                                                         │
//! │  submit(now, allocate_id)                                              │
//! │       │                                                                 │
//! │       ├── validate every field under the form's rules                   │
//! │       │      └── failures → CoreError::InvalidProduct(report)           │
//! │       │                                                                 │
//! │       └── build Product                                                 │
//! │              ├── editing? keep the existing id                          │
//! │              └── new?     allocate_id()                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, TimeZone, Utc};

use crate::error::{CoreError, CoreResult, FieldError, ValidationError};
use crate::types::{Field, Product, ProductDraft};
use crate::validation::{
    self, is_name_char, validate_product_with, ValidationReport, ValidationRules,
};
use crate::MAX_DESCRIPTION_CHARS;

/// Add/edit form state.
#[derive(Debug, Clone)]
pub struct ProductForm {
    draft: ProductDraft,
    errors: ValidationReport,
    rules: ValidationRules,
    editing_id: Option<String>,
}

impl ProductForm {
    /// An empty form for a new product, both dates preset to `now`.
    ///
    /// No errors are shown until a field is edited or the form is submitted.
    pub fn new<Tz: TimeZone>(rules: ValidationRules, now: &DateTime<Tz>) -> Self {
        ProductForm {
            draft: ProductDraft::blank(now.with_timezone(&Utc)),
            errors: ValidationReport::new(),
            rules,
            editing_id: None,
        }
    }

    /// A form repopulated from a stored product.
    ///
    /// Name, expiration date, quantity, batch and state are re-validated
    /// immediately, so a product that has expired since it was saved opens
    /// with its expiration error already shown.
    pub fn for_edit<Tz: TimeZone>(
        product: &Product,
        rules: ValidationRules,
        now: &DateTime<Tz>,
    ) -> Self {
        let mut form = ProductForm {
            draft: product.to_draft(),
            errors: ValidationReport::new(),
            rules,
            editing_id: Some(product.id.clone()),
        };

        for field in [
            Field::Name,
            Field::ExpirationDate,
            Field::Quantity,
            Field::Batch,
            Field::State,
        ] {
            form.revalidate(field, now);
        }
        form
    }

    /// A form around input collected elsewhere, e.g. a draft the UI sends
    /// whole on save. Nothing is validated until [`submit`](Self::submit).
    pub fn from_draft(
        draft: ProductDraft,
        rules: ValidationRules,
        editing_id: Option<String>,
    ) -> Self {
        ProductForm {
            draft,
            errors: ValidationReport::new(),
            rules,
            editing_id,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn draft(&self) -> &ProductDraft {
        &self.draft
    }

    /// Current errors, one per failing field.
    pub fn errors(&self) -> &ValidationReport {
        &self.errors
    }

    pub fn error(&self, field: Field) -> Option<ValidationError> {
        self.errors.get(field)
    }

    pub fn rules(&self) -> &ValidationRules {
        &self.rules
    }

    /// Id of the product being edited, `None` for a new product.
    pub fn editing_id(&self) -> Option<&str> {
        self.editing_id.as_deref()
    }

    #[inline]
    pub fn is_editing(&self) -> bool {
        self.editing_id.is_some()
    }

    // =========================================================================
    // Setters
    // =========================================================================

    /// Sets the name, dropping anything but ASCII letters, digits and spaces.
    pub fn set_name(&mut self, text: &str) {
        self.draft.name = text.chars().filter(|c| is_name_char(*c)).collect();
        self.errors
            .record(Field::Name, validation::validate_name(&self.draft.name));
    }

    /// Sets the quantity, keeping digits only.
    pub fn set_quantity(&mut self, text: &str) {
        self.draft.quantity = text.chars().filter(char::is_ascii_digit).collect();
        self.errors.record(
            Field::Quantity,
            validation::validate_quantity(&self.draft.quantity),
        );
    }

    /// Sets the batch code, keeping ASCII letters and digits only.
    pub fn set_batch(&mut self, text: &str) {
        self.draft.batch = text.chars().filter(char::is_ascii_alphanumeric).collect();
        self.errors
            .record(Field::Batch, validation::validate_batch(&self.draft.batch));
    }

    /// Sets the barcode as typed or scanned. Checked on submit only.
    pub fn set_barcode(&mut self, text: &str) {
        self.draft.barcode = text.to_string();
    }

    pub fn set_state(&mut self, code: &str) {
        self.draft.state = code.to_string();
        let result = if self.rules.strict_region {
            validation::validate_state_code(&self.draft.state).map(|_| ())
        } else {
            validation::validate_state(&self.draft.state)
        };
        self.errors.record(Field::State, result);
    }

    /// Sets the description unless it would exceed the length limit.
    ///
    /// Returns `false` and keeps the previous text when rejected.
    pub fn set_description(&mut self, text: &str) -> bool {
        if text.chars().count() > MAX_DESCRIPTION_CHARS {
            return false;
        }
        self.draft.description = text.to_string();
        self.errors.record::<()>(Field::Description, Ok(()));
        true
    }

    pub fn set_image_uri(&mut self, uri: Option<String>) {
        self.draft.image_uri = uri;
    }

    /// Sets the manufacturing date and re-checks the expiration date.
    pub fn set_manufacturing_date<Tz: TimeZone>(&mut self, date: DateTime<Utc>, now: &DateTime<Tz>) {
        self.draft.manufacturing_date = date;
        self.revalidate(Field::ExpirationDate, now);
    }

    pub fn set_expiration_date<Tz: TimeZone>(&mut self, date: DateTime<Utc>, now: &DateTime<Tz>) {
        self.draft.expiration_date = date;
        self.revalidate(Field::ExpirationDate, now);
    }

    fn revalidate<Tz: TimeZone>(&mut self, field: Field, now: &DateTime<Tz>) {
        let result = validation::validate_field(field, &self.draft, now, &self.rules);
        self.errors.record(field, result);
    }

    // =========================================================================
    // Submit
    // =========================================================================

    /// Validates every field and builds the product.
    ///
    /// On failure the form's errors are replaced by the full report and
    /// `allocate_id` is not called.
    pub fn submit<Tz, F>(&mut self, now: &DateTime<Tz>, allocate_id: F) -> CoreResult<Product>
    where
        Tz: TimeZone,
        F: FnOnce() -> CoreResult<String>,
    {
        let report = validate_product_with(&self.draft, now, &self.rules);
        self.errors = report.clone();

        if !report.is_ok() {
            return Err(CoreError::InvalidProduct(report));
        }

        let quantity = validation::validate_quantity(&self.draft.quantity)
            .map_err(|reason| FieldError::new(Field::Quantity, reason))?;

        let id = match &self.editing_id {
            Some(id) => id.clone(),
            None => allocate_id()?,
        };

        let description = self.draft.description.trim();

        Ok(Product {
            id,
            name: self.draft.name.clone(),
            manufacturing_date: self.draft.manufacturing_date,
            expiration_date: self.draft.expiration_date,
            quantity,
            batch: self.draft.batch.clone(),
            barcode: self.draft.barcode.clone(),
            state: self.draft.state.clone(),
            image_uri: self.draft.image_uri.clone(),
            description: (!description.is_empty()).then(|| description.to_string()),
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 10, 30, 0).unwrap()
    }

    fn filled_form() -> ProductForm {
        let now = now();
        let mut form = ProductForm::new(ValidationRules::strict(), &now);
        form.set_name("Milk 2L");
        form.set_expiration_date(now + Duration::days(40), &now);
        form.set_quantity("10");
        form.set_batch("LT2024");
        form.set_barcode("789123");
        form.set_state("SP");
        form
    }

    #[test]
    fn test_new_form_has_no_errors() {
        let form = ProductForm::new(ValidationRules::lenient(), &now());
        assert!(form.errors().is_ok());
        assert!(!form.is_editing());
        assert_eq!(form.draft().expiration_date, now());
    }

    #[test]
    fn test_sanitizers_strip_disallowed_characters() {
        let mut form = ProductForm::new(ValidationRules::lenient(), &now());

        form.set_name("Milk#1 ção");
        assert_eq!(form.draft().name, "Milk1 o");
        assert_eq!(form.error(Field::Name), None);

        form.set_quantity("1a2-3.5");
        assert_eq!(form.draft().quantity, "1235");

        form.set_batch("AB-12 x");
        assert_eq!(form.draft().batch, "AB12x");
        assert_eq!(form.error(Field::Batch), None);
    }

    #[test]
    fn test_setters_record_and_clear_errors() {
        let mut form = ProductForm::new(ValidationRules::lenient(), &now());

        form.set_quantity("0");
        assert_eq!(form.error(Field::Quantity), Some(ValidationError::NotPositive));
        form.set_quantity("abc");
        assert_eq!(form.error(Field::Quantity), Some(ValidationError::EmptyField));
        form.set_quantity("5");
        assert_eq!(form.error(Field::Quantity), None);

        form.set_batch("1234");
        assert_eq!(form.error(Field::Batch), Some(ValidationError::InvalidBatchFormat));

        // Barcode is never checked per edit
        form.set_barcode("");
        assert_eq!(form.error(Field::Barcode), None);
    }

    #[test]
    fn test_state_follows_rules() {
        let mut lenient = ProductForm::new(ValidationRules::lenient(), &now());
        lenient.set_state("ZZ");
        assert_eq!(lenient.error(Field::State), None);

        let mut strict = ProductForm::new(ValidationRules::strict(), &now());
        strict.set_state("ZZ");
        assert_eq!(strict.error(Field::State), Some(ValidationError::UnknownRegion));
        strict.set_state("");
        assert_eq!(strict.error(Field::State), Some(ValidationError::EmptyField));
    }

    #[test]
    fn test_description_limit() {
        let mut form = ProductForm::new(ValidationRules::lenient(), &now());
        assert!(form.set_description("Whole milk"));
        assert!(!form.set_description(&"a".repeat(501)));
        assert_eq!(form.draft().description, "Whole milk");
        assert!(form.set_description(&"a".repeat(500)));
    }

    #[test]
    fn test_manufacturing_date_revalidates_expiration() {
        let now = now();
        let mut form = ProductForm::new(ValidationRules::lenient(), &now);

        form.draft.expiration_date = now - Duration::days(2);
        assert_eq!(form.error(Field::ExpirationDate), None);

        form.set_manufacturing_date(now - Duration::days(10), &now);
        assert_eq!(form.error(Field::ExpirationDate), Some(ValidationError::NotInFuture));

        form.set_expiration_date(now + Duration::days(5), &now);
        assert_eq!(form.error(Field::ExpirationDate), None);
    }

    #[test]
    fn test_submit_new_product() {
        let now = now();
        let mut form = filled_form();
        form.set_description("  Whole milk  ");

        let product = form.submit(&now, || Ok("123456".to_string())).unwrap();
        assert_eq!(product.id, "123456");
        assert_eq!(product.quantity, 10);
        assert_eq!(product.description.as_deref(), Some("Whole milk"));
        assert_eq!(product.status(&now), crate::LifecycleStatus::Fresh);
    }

    #[test]
    fn test_submit_blank_description_is_absent() {
        let mut form = filled_form();
        form.set_description("   ");
        let product = form.submit(&now(), || Ok("123456".to_string())).unwrap();
        assert_eq!(product.description, None);
    }

    #[test]
    fn test_submit_reports_every_failure_without_allocating() {
        let now = now();
        let mut form = ProductForm::new(ValidationRules::lenient(), &now);
        form.set_name("Milk");

        let result = form.submit(&now, || panic!("id must not be allocated"));
        match result {
            Err(CoreError::InvalidProduct(report)) => {
                // Both dates default to now, which is after midnight
                assert!(!report.contains(Field::ExpirationDate));
                assert!(report.contains(Field::Quantity));
                assert!(report.contains(Field::Batch));
                assert!(report.contains(Field::Barcode));
                assert!(report.contains(Field::State));
                assert!(!report.contains(Field::Name));
            }
            other => panic!("expected InvalidProduct, got {:?}", other),
        }
        assert_eq!(form.errors().len(), 4);
    }

    #[test]
    fn test_submit_propagates_allocation_failure() {
        let mut form = filled_form();
        let result = form.submit(&now(), || Err(CoreError::IdSpaceExhausted));
        assert!(matches!(result, Err(CoreError::IdSpaceExhausted)));
    }

    #[test]
    fn test_from_draft_submits_unsanitized_input_strictly() {
        let now = now();
        let mut draft = filled_form().draft().clone();
        draft.name = "Milk#1".to_string();
        draft.state = "ZZ".to_string();

        let mut form = ProductForm::from_draft(draft, ValidationRules::strict(), None);
        assert!(form.errors().is_ok());

        let err = form.submit(&now, || Ok("123456".to_string())).unwrap_err();
        match err {
            CoreError::InvalidProduct(report) => {
                assert_eq!(report.get(Field::Name), Some(ValidationError::InvalidCharacters));
                assert_eq!(report.get(Field::State), Some(ValidationError::UnknownRegion));
                assert_eq!(report.len(), 2);
            }
            other => panic!("expected InvalidProduct, got {:?}", other),
        }
    }

    #[test]
    fn test_edit_keeps_id_and_revalidates() {
        let saved_at = now();
        let product = filled_form()
            .submit(&saved_at, || Ok("482913".to_string()))
            .unwrap();

        // Reopened after the product expired
        let later = saved_at + Duration::days(60);
        let mut form = ProductForm::for_edit(&product, ValidationRules::strict(), &later);
        assert!(form.is_editing());
        assert_eq!(form.editing_id(), Some("482913"));
        assert_eq!(form.draft().quantity, "10");
        assert_eq!(form.error(Field::ExpirationDate), Some(ValidationError::NotInFuture));

        form.set_expiration_date(later + Duration::days(10), &later);
        form.set_quantity("4");
        let updated = form
            .submit(&later, || panic!("edit must reuse its id"))
            .unwrap();
        assert_eq!(updated.id, "482913");
        assert_eq!(updated.quantity, 4);
    }
}
