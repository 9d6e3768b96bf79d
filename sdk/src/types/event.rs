//! Order lifecycle events: dispatch and cancellation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use super::order::OrderItem;
use crate::error::SdkError;
use crate::validate;

/// Delivery region served by a dispatch.
///
/// Descriptive only; `delivery_service` on the wire is a free-form string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryService {
    /// Mainland Great Britain.
    Mainland,
    /// Scottish Highlands.
    Highlands,
    /// Offshore islands.
    Islands,
    /// Northern Ireland.
    NorthernIreland,
}

impl DeliveryService {
    /// Returns the wire value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Mainland => "mainland",
            Self::Highlands => "highlands",
            Self::Islands => "islands",
            Self::NorthernIreland => "northern_ireland",
        }
    }
}

impl fmt::Display for DeliveryService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<DeliveryService> for String {
    fn from(service: DeliveryService) -> Self {
        service.as_str().to_string()
    }
}

/// Notifies the marketplace that an order has shipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchOrderRequest {
    /// Marketplace order number.
    pub order_number: String,

    /// Lines being dispatched.
    #[serde(rename = "item_arr", alias = "items", default)]
    pub items: Vec<OrderItem>,

    /// Dispatch time, `YYYY-MM-DD HH:MM:SS`.
    pub despatch_date: String,

    /// Delivery service name.
    pub delivery_service: String,

    /// Courier name.
    pub courier_name: String,

    /// Courier tracking reference.
    pub tracking_reference: String,

    /// Start of the delivery window, `YYYY-MM-DD`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub earliest_delivery: Option<String>,

    /// End of the delivery window, `YYYY-MM-DD`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latest_delivery: Option<String>,
}

impl DispatchOrderRequest {
    /// Returns a builder.
    #[must_use]
    pub fn builder() -> DispatchOrderBuilder {
        DispatchOrderBuilder::default()
    }

    /// Builds a request from a loose mapping. Lines may be given as `items`
    /// or `item_arr`.
    ///
    /// # Errors
    ///
    /// Returns a validation error if any field is missing or malformed.
    pub fn from_value(value: Value) -> Result<Self, SdkError> {
        let request: Self = validate::deserialize(value)?;
        request.validate()?;
        Ok(request)
    }

    /// Validates the request.
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the offending field.
    pub fn validate(&self) -> Result<(), SdkError> {
        validate::non_empty("items", &self.items)?;
        for item in &self.items {
            item.validate()?;
        }
        if validate::parse_datetime(&self.despatch_date).is_none() {
            return Err(SdkError::validation(
                "despatch_date must be in format YYYY-MM-DD HH:MM:SS",
            ));
        }
        let window = [&self.earliest_delivery, &self.latest_delivery];
        if window
            .into_iter()
            .flatten()
            .any(|d| validate::parse_date(d).is_none())
        {
            return Err(SdkError::validation(
                "delivery dates must be in format YYYY-MM-DD",
            ));
        }
        Ok(())
    }

    /// Returns the wire payload with lines under `item_arr`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_payload(&self) -> Result<Value, SdkError> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Builder for [`DispatchOrderRequest`].
#[derive(Debug, Clone, Default)]
pub struct DispatchOrderBuilder {
    order_number: Option<String>,
    items: Vec<OrderItem>,
    despatch_date: Option<String>,
    delivery_service: Option<String>,
    courier_name: Option<String>,
    tracking_reference: Option<String>,
    earliest_delivery: Option<String>,
    latest_delivery: Option<String>,
}

impl DispatchOrderBuilder {
    /// Sets the order number.
    #[must_use]
    pub fn order_number(mut self, order_number: impl Into<String>) -> Self {
        self.order_number = Some(order_number.into());
        self
    }

    /// Adds a dispatched line.
    #[must_use]
    pub fn item(mut self, item: OrderItem) -> Self {
        self.items.push(item);
        self
    }

    /// Replaces the dispatched lines.
    #[must_use]
    pub fn items(mut self, items: Vec<OrderItem>) -> Self {
        self.items = items;
        self
    }

    /// Sets the dispatch time (`YYYY-MM-DD HH:MM:SS`).
    #[must_use]
    pub fn despatch_date(mut self, despatch_date: impl Into<String>) -> Self {
        self.despatch_date = Some(despatch_date.into());
        self
    }

    /// Sets the delivery service.
    #[must_use]
    pub fn delivery_service(mut self, delivery_service: impl Into<String>) -> Self {
        self.delivery_service = Some(delivery_service.into());
        self
    }

    /// Sets the courier name.
    #[must_use]
    pub fn courier_name(mut self, courier_name: impl Into<String>) -> Self {
        self.courier_name = Some(courier_name.into());
        self
    }

    /// Sets the tracking reference.
    #[must_use]
    pub fn tracking_reference(mut self, tracking_reference: impl Into<String>) -> Self {
        self.tracking_reference = Some(tracking_reference.into());
        self
    }

    /// Sets the delivery window (`YYYY-MM-DD`).
    #[must_use]
    pub fn delivery_window(
        mut self,
        earliest: impl Into<String>,
        latest: impl Into<String>,
    ) -> Self {
        self.earliest_delivery = Some(earliest.into());
        self.latest_delivery = Some(latest.into());
        self
    }

    /// Sets the earliest delivery date.
    #[must_use]
    pub fn earliest_delivery(mut self, date: impl Into<String>) -> Self {
        self.earliest_delivery = Some(date.into());
        self
    }

    /// Sets the latest delivery date.
    #[must_use]
    pub fn latest_delivery(mut self, date: impl Into<String>) -> Self {
        self.latest_delivery = Some(date.into());
        self
    }

    /// Builds and validates the request.
    ///
    /// # Errors
    ///
    /// Returns a validation error if a required field is unset or any field is invalid.
    pub fn build(self) -> Result<DispatchOrderRequest, SdkError> {
        let request = DispatchOrderRequest {
            order_number: required("order_number", self.order_number)?,
            items: self.items,
            despatch_date: required("despatch_date", self.despatch_date)?,
            delivery_service: required("delivery_service", self.delivery_service)?,
            courier_name: required("courier_name", self.courier_name)?,
            tracking_reference: required("tracking_reference", self.tracking_reference)?,
            earliest_delivery: self.earliest_delivery,
            latest_delivery: self.latest_delivery,
        };
        request.validate()?;
        Ok(request)
    }
}

fn required(field: &str, value: Option<String>) -> Result<String, SdkError> {
    value.ok_or_else(|| SdkError::validation(format!("{} is required", field)))
}

/// Reason an order is being cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum CancelCode {
    /// Stock not available.
    StockNotAvailable,
    /// Unable to contact customer to arrange delivery.
    UnableToContactCustomer,
    /// Unable to deliver to address.
    UnableToDeliver,
}

impl CancelCode {
    /// All accepted codes.
    pub const VALUES: [Self; 3] = [
        Self::StockNotAvailable,
        Self::UnableToContactCustomer,
        Self::UnableToDeliver,
    ];

    /// Returns the wire value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::StockNotAvailable => "Stock not available",
            Self::UnableToContactCustomer => "Unable to contact customer to arrange delivery",
            Self::UnableToDeliver => "Unable to deliver to address",
        }
    }
}

impl fmt::Display for CancelCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CancelCode {
    type Err = SdkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s.to_string()).map_err(SdkError::Validation)
    }
}

impl TryFrom<String> for CancelCode {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::VALUES
            .into_iter()
            .find(|c| c.as_str() == value)
            .ok_or_else(|| {
                let allowed: Vec<&str> = Self::VALUES.iter().map(CancelCode::as_str).collect();
                format!(
                    "cancel_code must be one of: {} (got '{}')",
                    allowed.join(", "),
                    value
                )
            })
    }
}

impl Serialize for CancelCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Notifies the marketplace that order lines will not be fulfilled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelOrderRequest {
    /// Marketplace order number.
    pub order_number: String,

    /// Lines being cancelled.
    #[serde(rename = "item_arr", alias = "items", default)]
    pub items: Vec<OrderItem>,

    /// Cancellation code.
    pub cancel_code: CancelCode,

    /// Free-text reason; always sent, empty by default.
    #[serde(default)]
    pub cancel_reason: String,
}

impl CancelOrderRequest {
    /// Creates a validated cancellation with an empty reason.
    ///
    /// # Errors
    ///
    /// Returns a validation error if `items` is empty or contains invalid lines.
    pub fn new(
        order_number: impl Into<String>,
        items: Vec<OrderItem>,
        cancel_code: CancelCode,
    ) -> Result<Self, SdkError> {
        let request = Self {
            order_number: order_number.into(),
            items,
            cancel_code,
            cancel_reason: String::new(),
        };
        request.validate()?;
        Ok(request)
    }

    /// Sets the free-text reason.
    #[must_use]
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.cancel_reason = reason.into();
        self
    }

    /// Builds a request from a loose mapping.
    ///
    /// # Errors
    ///
    /// Returns a validation error for unknown codes or invalid lines.
    pub fn from_value(value: Value) -> Result<Self, SdkError> {
        let request: Self = validate::deserialize(value)?;
        request.validate()?;
        Ok(request)
    }

    /// Validates the request.
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the offending field.
    pub fn validate(&self) -> Result<(), SdkError> {
        validate::non_empty("items", &self.items)?;
        self.items.iter().try_for_each(OrderItem::validate)
    }

    /// Returns the wire payload with lines under `item_arr`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_payload(&self) -> Result<Value, SdkError> {
        Ok(serde_json::to_value(self)?)
    }
}
