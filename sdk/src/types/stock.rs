//! Stock availability types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::SdkError;
use crate::validate;

/// A stock level for a single product code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockItem {
    /// Supplier product code.
    pub code: String,

    /// Units available; zero marks the product out of stock.
    pub qty: i64,
}

impl StockItem {
    /// Creates a validated stock item.
    ///
    /// # Errors
    ///
    /// Returns a validation error if `code` is blank or `qty` is negative.
    pub fn new(code: impl Into<String>, qty: i64) -> Result<Self, SdkError> {
        let item = Self {
            code: code.into(),
            qty,
        };
        item.validate()?;
        Ok(item)
    }

    /// Validates the item.
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the offending field.
    pub fn validate(&self) -> Result<(), SdkError> {
        validate::non_blank("code", &self.code)?;
        validate::at_least("qty", self.qty, 0)
    }

    /// Builds a stock item from a loose JSON mapping.
    ///
    /// # Errors
    ///
    /// Returns a validation error if fields are missing, mistyped, or out of range.
    pub fn from_value(value: Value) -> Result<Self, SdkError> {
        let item: Self = validate::deserialize(value)?;
        item.validate()?;
        Ok(item)
    }
}

/// Validates a stock update and returns the raw list payload.
///
/// # Errors
///
/// Returns a validation error for an empty list or any invalid item.
pub fn stock_payload(items: &[StockItem]) -> Result<Value, SdkError> {
    validate::non_empty("stock_data", items)?;
    for item in items {
        item.validate()
            .map_err(|e| e.with_context("Invalid stock data"))?;
    }
    Ok(serde_json::to_value(items)?)
}

/// Converts loose stock data into validated items.
///
/// # Errors
///
/// Returns a validation error if `value` is not a non-empty list of valid items.
pub fn stock_items_from_value(value: Value) -> Result<Vec<StockItem>, SdkError> {
    validate::expect_non_empty_list("stock_data", value)?
        .into_iter()
        .map(|entry| {
            if !entry.is_object() {
                return Err(SdkError::validation(
                    "Each item in stock_data must be a mapping",
                ));
            }
            StockItem::from_value(entry).map_err(|e| e.with_context("Invalid stock data"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_stock_item_valid() {
        let item = StockItem::new("PROD123", 10).expect("valid item");
        assert_eq!(item.code, "PROD123");
        assert_eq!(item.qty, 10);
    }

    #[test]
    fn test_stock_item_zero_quantity() {
        assert!(StockItem::new("PROD123", 0).is_ok());
    }

    #[test]
    fn test_stock_item_negative_quantity() {
        let err = StockItem::new("PROD123", -1).expect_err("negative qty");
        assert!(err.is_validation());
        assert!(err
            .to_string()
            .contains("qty must be greater than or equal to 0"));
    }

    #[test]
    fn test_stock_item_blank_code() {
        let err = StockItem::new("", 5).expect_err("blank code");
        assert!(err.to_string().contains("code"));
    }

    #[test]
    fn test_stock_item_from_value_missing_qty() {
        let err = StockItem::from_value(json!({"code": "PROD123"})).expect_err("missing qty");
        assert!(err.to_string().contains("qty"));
    }

    #[test]
    fn test_stock_item_from_value_wrong_qty_type() {
        let err = StockItem::from_value(json!({"code": "PROD123", "qty": "ten"}))
            .expect_err("string qty");
        assert!(err.is_validation());
    }

    #[test]
    fn test_stock_payload_is_raw_list() {
        let items = vec![
            StockItem::new("PROD1", 10).expect("valid"),
            StockItem::new("PROD-2_special", 0).expect("valid"),
        ];
        let payload = stock_payload(&items).expect("payload");
        assert_eq!(
            payload,
            json!([{"code": "PROD1", "qty": 10}, {"code": "PROD-2_special", "qty": 0}])
        );
    }

    #[test]
    fn test_stock_payload_empty() {
        let err = stock_payload(&[]).expect_err("empty list");
        assert!(err
            .to_string()
            .contains("stock_data must be a non-empty list"));
    }

    #[test]
    fn test_stock_items_from_value() {
        let items = stock_items_from_value(json!([{"code": "A", "qty": 1}])).expect("valid");
        assert_eq!(items.len(), 1);

        let err = stock_items_from_value(json!({"code": "A"})).expect_err("not a list");
        assert!(err.to_string().contains("stock_data must be a list"));

        let err = stock_items_from_value(json!([{"code": "A", "qty": 1}, {"code": "B", "qty": -3}]))
            .expect_err("mixed valid/invalid");
        assert!(err.to_string().contains("Invalid stock data:"));
        assert!(err
            .to_string()
            .contains("qty must be greater than or equal to 0"));
    }
}
