//! Order types for the SDK.
//!
//! Provides order line items plus the acknowledgement and order feed requests.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::SdkError;
use crate::validate;

/// Maximum span between `from` and `to` in an order feed query.
pub const MAX_FEED_SPAN_DAYS: i64 = 35;

/// A product line within an order event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    /// Supplier product code.
    pub code: String,

    /// Number of units; at least one.
    pub qty: i64,
}

impl OrderItem {
    /// Creates a validated order item.
    ///
    /// # Errors
    ///
    /// Returns a validation error if `code` is blank or `qty` is below one.
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
        validate::at_least("qty", self.qty, 1)
    }
}

/// Acknowledges receipt of one or more orders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderAckRequest {
    /// Order numbers being acknowledged.
    pub order_arr: Vec<String>,
}

impl OrderAckRequest {
    /// Creates a validated acknowledgement request.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the list is empty or contains blank IDs.
    pub fn new<I, S>(order_numbers: I) -> Result<Self, SdkError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let request = Self {
            order_arr: order_numbers.into_iter().map(Into::into).collect(),
        };
        request.validate()?;
        Ok(request)
    }

    /// Builds a request from a loose list of order numbers.
    ///
    /// # Errors
    ///
    /// Returns a validation error if `value` is not a list of non-blank strings.
    pub fn from_value(value: Value) -> Result<Self, SdkError> {
        let order_arr = validate::expect_list("order_arr", value)?
            .into_iter()
            .map(|entry| match entry {
                Value::String(s) => Ok(s),
                other => Err(SdkError::validation(format!(
                    "order_arr entries must be strings, got {}",
                    other
                ))),
            })
            .collect::<Result<Vec<_>, _>>()?;
        let request = Self { order_arr };
        request.validate()?;
        Ok(request)
    }

    /// Validates the request.
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the offending field.
    pub fn validate(&self) -> Result<(), SdkError> {
        validate::non_empty("order_arr", &self.order_arr)?;
        if self.order_arr.iter().any(|id| id.trim().is_empty()) {
            return Err(SdkError::validation("Order IDs cannot be empty strings"));
        }
        Ok(())
    }

    /// Returns the wire payload.
    #[must_use]
    pub fn to_payload(&self) -> Value {
        let mut map = Map::new();
        map.insert(
            "order_arr".to_string(),
            Value::Array(self.order_arr.iter().cloned().map(Value::String).collect()),
        );
        Value::Object(map)
    }
}

/// Order feed filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum OrderFeedType {
    /// Every order.
    #[default]
    All,
    /// Orders not yet acknowledged.
    New,
    /// Acknowledged orders awaiting dispatch.
    Pending,
    /// Completed orders.
    Historic,
}

impl OrderFeedType {
    /// All accepted values.
    pub const VALUES: [Self; 4] = [Self::All, Self::New, Self::Pending, Self::Historic];

    /// Returns the wire value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::New => "new",
            Self::Pending => "pending",
            Self::Historic => "historic",
        }
    }
}

impl fmt::Display for OrderFeedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderFeedType {
    type Err = SdkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s.to_string()).map_err(SdkError::Validation)
    }
}

impl TryFrom<String> for OrderFeedType {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::VALUES
            .into_iter()
            .find(|t| t.as_str() == value)
            .ok_or_else(|| {
                format!(
                    "type must be one of: all, new, pending, historic (got '{}')",
                    value
                )
            })
    }
}

impl Serialize for OrderFeedType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Query parameters for the order feed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderFeedRequest {
    /// Free-text search (order number, customer name, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,

    /// Feed filter.
    #[serde(rename = "type", default)]
    pub order_type: OrderFeedType,

    /// Range start, `YYYY-MM-DD HH:MM:SS`.
    #[serde(
        rename = "from",
        alias = "from_date",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub from_date: Option<String>,

    /// Range end, `YYYY-MM-DD HH:MM:SS`.
    #[serde(
        rename = "to",
        alias = "to_date",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub to_date: Option<String>,
}

impl OrderFeedRequest {
    /// Creates a request for every order with no filters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the search term.
    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Sets the feed filter.
    #[must_use]
    pub fn with_type(mut self, order_type: OrderFeedType) -> Self {
        self.order_type = order_type;
        self
    }

    /// Sets the range start.
    #[must_use]
    pub fn with_from_date(mut self, from: impl Into<String>) -> Self {
        self.from_date = Some(from.into());
        self
    }

    /// Sets the range end.
    #[must_use]
    pub fn with_to_date(mut self, to: impl Into<String>) -> Self {
        self.to_date = Some(to.into());
        self
    }

    /// Sets both ends of the range.
    #[must_use]
    pub fn with_date_range(self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.with_from_date(from).with_to_date(to)
    }

    /// Builds a request from a loose mapping using wire (`from`/`to`) or
    /// field (`from_date`/`to_date`) names.
    ///
    /// # Errors
    ///
    /// Returns a validation error for unknown feed types or an oversized range.
    pub fn from_value(value: Value) -> Result<Self, SdkError> {
        let request: Self = validate::deserialize(value)?;
        request.validate()?;
        Ok(request)
    }

    /// Validates the request.
    ///
    /// Dates that do not parse are passed through unchecked.
    ///
    /// # Errors
    ///
    /// Returns a validation error if both dates parse and span more than 35 days.
    pub fn validate(&self) -> Result<(), SdkError> {
        let (Some(from), Some(to)) = (&self.from_date, &self.to_date) else {
            return Ok(());
        };
        let (Some(from), Some(to)) = (validate::parse_datetime(from), validate::parse_datetime(to))
        else {
            return Ok(());
        };
        if (to - from).num_days() > MAX_FEED_SPAN_DAYS {
            return Err(SdkError::validation(format!(
                "Date range cannot exceed {} days",
                MAX_FEED_SPAN_DAYS
            )));
        }
        Ok(())
    }

    /// Returns the wire payload; unset fields are omitted.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_payload(&self) -> Result<Value, SdkError> {
        Ok(serde_json::to_value(self)?)
    }
}
