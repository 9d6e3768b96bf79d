//! Product feed types.
//!
//! Provides full product entries for catalogue submission and the reduced
//! price-only entries used for price amendments. Both travel to the same
//! endpoint wrapped as `{"product_arr": [...]}`.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::SdkError;
use crate::validate;

/// Maximum product title length in characters.
pub const MAX_TITLE_CHARS: usize = 80;

/// Default price currency.
pub const DEFAULT_CURRENCY: &str = "GBP";

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

/// A price effective from a given date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceEntry {
    /// Price in `currency` units.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,

    /// ISO currency code.
    #[serde(default = "default_currency")]
    pub currency: String,

    /// First day the price applies.
    pub effective_from: NaiveDate,
}

impl PriceEntry {
    /// Creates a GBP price.
    #[must_use]
    pub fn new(price: Decimal, effective_from: NaiveDate) -> Self {
        Self {
            price,
            currency: default_currency(),
            effective_from,
        }
    }

    /// Sets the currency.
    #[must_use]
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    /// Validates the entry.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the currency is blank.
    pub fn validate(&self) -> Result<(), SdkError> {
        validate::non_blank("currency", &self.currency)
    }
}

/// Descriptive product attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductAttribute {
    /// Colour family.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colour: Option<String>,

    /// Marketing colour name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colour_name: Option<String>,

    /// Size label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,

    /// Primary material.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,

    /// Length with unit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<String>,

    /// Width with unit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,

    /// Height with unit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,

    /// Weight with unit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,

    /// Marketplace-specific extension attributes.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub other_attribute: BTreeMap<String, String>,
}

impl ProductAttribute {
    /// Adds an extension attribute.
    #[must_use]
    pub fn with_other(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.other_attribute.insert(key.into(), value.into());
        self
    }
}

/// A full catalogue entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductEntry {
    /// Supplier SKU.
    pub vendor_sku: String,

    /// SKU of a parent or related product.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_product: Option<String>,

    /// Product title, at most 80 characters.
    pub title: String,

    /// Brand name.
    pub brand: String,

    /// Global trade item number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gtin: Option<String>,

    /// Price schedule; at least one entry.
    pub price_arr: Vec<PriceEntry>,

    /// Marketplace category.
    pub product_category: String,

    /// Long description.
    pub description: String,

    /// Bullet-point features.
    #[serde(default)]
    pub feature_arr: Vec<String>,

    /// Choking-hazard flag (0/1).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub child_hazard: Option<u8>,

    /// Age restriction label, e.g. `"18+"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_restriction: Option<String>,

    /// Product image URLs.
    pub image_url_arr: Vec<String>,

    /// Product video URLs.
    #[serde(default)]
    pub youtube_url_arr: Vec<String>,

    /// Fulfilment size class.
    pub fulfilment_class: String,

    /// Descriptive attributes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_attribute: Option<ProductAttribute>,

    /// Launch date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub launch_date: Option<NaiveDate>,

    /// Active flag (0/1).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<u8>,

    /// Visible flag (0/1).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible: Option<u8>,
}

impl ProductEntry {
    /// Creates an entry with the required fields; optional fields are unset.
    ///
    /// Call [`ProductEntry::validate`] (or submit it through a client) to check it.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        vendor_sku: impl Into<String>,
        title: impl Into<String>,
        brand: impl Into<String>,
        price_arr: Vec<PriceEntry>,
        product_category: impl Into<String>,
        description: impl Into<String>,
        image_url_arr: Vec<String>,
        fulfilment_class: impl Into<String>,
    ) -> Self {
        Self {
            vendor_sku: vendor_sku.into(),
            related_product: None,
            title: title.into(),
            brand: brand.into(),
            gtin: None,
            price_arr,
            product_category: product_category.into(),
            description: description.into(),
            feature_arr: Vec::new(),
            child_hazard: None,
            age_restriction: None,
            image_url_arr,
            youtube_url_arr: Vec::new(),
            fulfilment_class: fulfilment_class.into(),
            product_attribute: None,
            launch_date: None,
            active: None,
            visible: None,
        }
    }

    /// Builds an entry from a loose mapping.
    ///
    /// # Errors
    ///
    /// Returns a validation error if required fields are missing or invalid.
    pub fn from_value(value: Value) -> Result<Self, SdkError> {
        let entry: Self = validate::deserialize(value)?;
        entry.validate()?;
        Ok(entry)
    }

    /// Validates the entry.
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the offending field.
    pub fn validate(&self) -> Result<(), SdkError> {
        validate::non_blank("vendor_sku", &self.vendor_sku)?;
        validate::max_chars("title", &self.title, MAX_TITLE_CHARS)?;
        validate::non_empty("price_arr", &self.price_arr)?;
        self.price_arr.iter().try_for_each(PriceEntry::validate)?;
        validate::http_urls("image_url_arr", &self.image_url_arr)?;
        validate::http_urls("youtube_url_arr", &self.youtube_url_arr)
    }
}

/// A price-only update for an existing SKU.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceAmendmentEntry {
    /// Supplier SKU.
    pub vendor_sku: String,

    /// New price schedule; at least one entry.
    pub price_arr: Vec<PriceEntry>,
}

impl PriceAmendmentEntry {
    /// Creates a validated amendment.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the SKU is blank or no prices are given.
    pub fn new(
        vendor_sku: impl Into<String>,
        price_arr: Vec<PriceEntry>,
    ) -> Result<Self, SdkError> {
        let entry = Self {
            vendor_sku: vendor_sku.into(),
            price_arr,
        };
        entry.validate()?;
        Ok(entry)
    }

    /// Builds an amendment from a loose mapping.
    ///
    /// # Errors
    ///
    /// Returns a validation error if fields are missing or invalid.
    pub fn from_value(value: Value) -> Result<Self, SdkError> {
        let entry: Self = validate::deserialize(value)?;
        entry.validate()?;
        Ok(entry)
    }

    /// Validates the amendment.
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the offending field.
    pub fn validate(&self) -> Result<(), SdkError> {
        validate::non_blank("vendor_sku", &self.vendor_sku)?;
        validate::non_empty("price_arr", &self.price_arr)?;
        self.price_arr.iter().try_for_each(PriceEntry::validate)
    }
}

/// A catalogue submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductFeedRequest {
    /// Entries to create or update.
    pub product_arr: Vec<ProductEntry>,
}

impl ProductFeedRequest {
    /// Wraps entries into a request.
    #[must_use]
    pub fn new(product_arr: Vec<ProductEntry>) -> Self {
        Self { product_arr }
    }

    /// Builds a request from a loose list of product mappings.
    ///
    /// # Errors
    ///
    /// Returns a validation error if `value` is not a non-empty list of valid products.
    pub fn from_value(value: Value) -> Result<Self, SdkError> {
        let product_arr = validate::expect_non_empty_list("product_data", value)?
            .into_iter()
            .map(ProductEntry::from_value)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| e.with_context("Invalid product data"))?;
        Ok(Self { product_arr })
    }

    /// Validates every entry.
    ///
    /// # Errors
    ///
    /// Returns the first entry's validation error.
    pub fn validate(&self) -> Result<(), SdkError> {
        self.product_arr
            .iter()
            .try_for_each(ProductEntry::validate)
            .map_err(|e| e.with_context("Invalid product data"))
    }

    /// Returns the wire payload.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_payload(&self) -> Result<Value, SdkError> {
        Ok(serde_json::to_value(self)?)
    }
}

/// A batch of price amendments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceAmendmentRequest {
    /// Amendments to apply.
    pub product_arr: Vec<PriceAmendmentEntry>,
}

impl PriceAmendmentRequest {
    /// Wraps amendments into a request.
    #[must_use]
    pub fn new(product_arr: Vec<PriceAmendmentEntry>) -> Self {
        Self { product_arr }
    }

    /// Builds a request from a loose list of amendment mappings.
    ///
    /// # Errors
    ///
    /// Returns a validation error if `value` is not a non-empty list of valid amendments.
    pub fn from_value(value: Value) -> Result<Self, SdkError> {
        let product_arr = validate::expect_non_empty_list("price_data", value)?
            .into_iter()
            .map(PriceAmendmentEntry::from_value)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| e.with_context("Invalid price data"))?;
        Ok(Self { product_arr })
    }

    /// Validates every amendment.
    ///
    /// # Errors
    ///
    /// Returns the first amendment's validation error.
    pub fn validate(&self) -> Result<(), SdkError> {
        self.product_arr
            .iter()
            .try_for_each(PriceAmendmentEntry::validate)
            .map_err(|e| e.with_context("Invalid price data"))
    }

    /// Returns the wire payload.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_payload(&self) -> Result<Value, SdkError> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Checks loose product mappings for over-long titles only.
///
/// Entries without a string title are not checked.
///
/// # Errors
///
/// Returns a validation error if `value` is not a list or a title is too long.
pub fn legacy_title_guard(value: &Value) -> Result<(), SdkError> {
    let Value::Array(products) = value else {
        return Err(SdkError::validation("product_arr must be a list"));
    };
    for product in products {
        if let Some(title) = product.get("title").and_then(Value::as_str) {
            if title.chars().count() > MAX_TITLE_CHARS {
                return Err(SdkError::validation(format!(
                    "Product title exceeds {} characters: {}",
                    MAX_TITLE_CHARS, title
                )));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn price(value: &str) -> PriceEntry {
        PriceEntry::new(value.parse().expect("decimal"), date(2025, 1, 1))
    }

    fn product(title: &str) -> ProductEntry {
        ProductEntry::new(
            "TEST123",
            title,
            "Test Brand",
            vec![price("29.99")],
            "Electronics",
            "A test product",
            vec!["https://example.com/image.jpg".to_string()],
            "Small",
        )
    }

    #[test]
    fn test_price_entry_default_currency() {
        let entry = price("19.95");
        assert_eq!(entry.currency, "GBP");

        let loose: PriceEntry = serde_json::from_value(json!({
            "price": 19.95,
            "effective_from": "2025-06-15"
        }))
        .expect("valid");
        assert_eq!(loose.currency, "GBP");
        assert_eq!(loose.effective_from, date(2025, 6, 15));
    }

    #[test]
    fn test_price_entry_invalid_price() {
        let result: Result<PriceEntry, _> = serde_json::from_value(json!({
            "price": "invalid",
            "effective_from": "2025-01-01"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_price_serializes_as_number() {
        let payload = serde_json::to_value(price("29.99")).expect("serialize");
        assert_eq!(payload["price"], json!(29.99));
        assert_eq!(payload["effective_from"], "2025-01-01");
    }

    #[test]
    fn test_product_attribute_other() {
        let attr = ProductAttribute {
            colour: Some("Blue".to_string()),
            ..Default::default()
        }
        .with_other("finish", "matt");
        let payload = serde_json::to_value(&attr).expect("serialize");
        assert_eq!(
            payload,
            json!({"colour": "Blue", "other_attribute": {"finish": "matt"}})
        );
        assert_eq!(
            serde_json::to_value(ProductAttribute::default()).expect("serialize"),
            json!({})
        );
    }

    #[test]
    fn test_product_entry_valid_minimal() {
        let entry = product("Test Product");
        assert!(entry.validate().is_ok());
        assert!(entry.feature_arr.is_empty());
        assert!(entry.youtube_url_arr.is_empty());
    }

    #[test]
    fn test_product_entry_title_boundary() {
        assert!(product(&"A".repeat(80)).validate().is_ok());
        let err = product(&"A".repeat(81)).validate().expect_err("81 chars");
        assert!(err
            .to_string()
            .contains("title must be at most 80 characters"));
    }

    #[test]
    fn test_product_entry_invalid_url() {
        let mut entry = product("Test Product");
        entry.image_url_arr = vec!["not-a-valid-url".to_string()];
        let err = entry.validate().expect_err("bad url");
        assert!(err.to_string().contains("image_url_arr"));

        let mut entry = product("Test Product");
        entry.youtube_url_arr = vec!["youtube".to_string()];
        assert!(entry.validate().is_err());
    }

    #[test]
    fn test_product_entry_empty_prices() {
        let mut entry = product("Test Product");
        entry.price_arr.clear();
        let err = entry.validate().expect_err("no prices");
        assert!(err
            .to_string()
            .contains("price_arr must be a non-empty list"));
    }

    #[test]
    fn test_product_entry_missing_required_fields() {
        let err = ProductEntry::from_value(json!({"vendor_sku": "TEST123"})).expect_err("missing");
        assert!(err.is_validation());
    }

    #[test]
    fn test_product_entry_complete_payload() {
        let mut entry = product("Complete Test Product");
        entry.gtin = Some("1234567890123".to_string());
        entry.feature_arr = vec!["Waterproof".to_string()];
        entry.launch_date = Some(date(2025, 2, 1));
        entry.active = Some(1);
        entry.visible = Some(1);
        assert!(entry.validate().is_ok());

        let payload = serde_json::to_value(&entry).expect("serialize");
        assert_eq!(payload["launch_date"], "2025-02-01");
        assert_eq!(payload["active"], 1);
        assert!(payload.get("related_product").is_none());
        assert!(payload.get("product_attribute").is_none());
    }

    #[test]
    fn test_product_feed_request_from_value() {
        let request = ProductFeedRequest::from_value(json!([{
            "vendor_sku": "TEST123",
            "title": "Test Product",
            "brand": "Test Brand",
            "price_arr": [{"price": 29.99, "currency": "GBP", "effective_from": "2025-01-01"}],
            "product_category": "Electronics",
            "description": "A test product",
            "image_url_arr": ["https://example.com/image.jpg"],
            "fulfilment_class": "Small"
        }]))
        .expect("valid");
        assert_eq!(request.product_arr.len(), 1);

        let err = ProductFeedRequest::from_value(json!("not a list")).expect_err("not list");
        assert!(err.to_string().contains("product_data must be a list"));

        let err = ProductFeedRequest::from_value(json!([])).expect_err("empty");
        assert!(err
            .to_string()
            .contains("product_data must be a non-empty list"));

        let err =
            ProductFeedRequest::from_value(json!([{"vendor_sku": "TEST123"}])).expect_err("bad");
        assert!(err.to_string().contains("Invalid product data"));
    }

    #[test]
    fn test_product_feed_request_allows_empty_typed() {
        let request = ProductFeedRequest::new(Vec::new());
        assert!(request.validate().is_ok());
        assert_eq!(
            request.to_payload().expect("payload"),
            json!({"product_arr": []})
        );
    }

    #[test]
    fn test_price_amendment_request() {
        let entry = PriceAmendmentEntry::new("AMEND123", vec![price("39.99")]).expect("valid");
        let request = PriceAmendmentRequest::new(vec![entry]);
        let payload = request.to_payload().expect("payload");
        assert_eq!(payload["product_arr"][0]["vendor_sku"], "AMEND123");
        assert_eq!(payload["product_arr"][0]["price_arr"][0]["currency"], "GBP");

        let err = PriceAmendmentEntry::new("AMEND123", Vec::new()).expect_err("no prices");
        assert!(err
            .to_string()
            .contains("price_arr must be a non-empty list"));

        let err = PriceAmendmentRequest::from_value(json!([{"vendor_sku": "AMEND123"}]))
            .expect_err("missing prices");
        assert!(err.to_string().contains("Invalid price data"));

        let err = PriceAmendmentRequest::from_value(json!({})).expect_err("not list");
        assert!(err.to_string().contains("price_data must be a list"));
    }

    #[test]
    fn test_legacy_title_guard() {
        assert!(legacy_title_guard(&json!([])).is_ok());
        assert!(legacy_title_guard(&json!([{"vendor_sku": "X"}])).is_ok());
        assert!(legacy_title_guard(&json!([{"title": null}])).is_ok());

        let err = legacy_title_guard(&json!([{"title": "A".repeat(81)}])).expect_err("long");
        assert!(err
            .to_string()
            .contains("Product title exceeds 80 characters"));

        let err = legacy_title_guard(&json!("not a list")).expect_err("not list");
        assert!(err.to_string().contains("product_arr must be a list"));
    }
}
