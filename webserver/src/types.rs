//! Request and response types for the order API
//!
//! Incoming bodies are read loosely (every field optional, any JSON value)
//! so that validation can answer with the specific message the browser form
//! expects instead of a generic deserialization error.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use shared::{Order, OrderDate, OrderDraft, PizzaSlices, SliceCounts, TallySummary};

use crate::error::{WebServerError, WebServerResult};

pub const MISSING_DATE_OR_USER: &str = "Missing date or user_id";
pub const MISSING_DATE: &str = "Missing date";
pub const INVALID_DATE: &str = "Invalid date format";
pub const INVALID_PIZZA_SLICES: &str = "Invalid pizza_slices format";
pub const INVALID_JUICE_BOXES: &str = "Invalid juice_boxes format";
pub const ORDER_SUBMITTED: &str = "Order submitted successfully";

/// `?date=` query parameter shared by both order routes
#[derive(Debug, Default, Clone, Deserialize)]
pub struct DateQuery {
    pub date: Option<String>,
}

impl DateQuery {
    /// Parsed date, or the error the GET route reports
    pub fn require_date(&self) -> WebServerResult<OrderDate> {
        match self.date.as_deref().map(str::trim) {
            None | Some("") => Err(WebServerError::invalid_request(MISSING_DATE)),
            Some(raw) => parse_date(raw),
        }
    }
}

fn parse_date(raw: &str) -> WebServerResult<OrderDate> {
    OrderDate::parse(raw).map_err(|_| WebServerError::invalid_request(INVALID_DATE))
}

/// Order body as posted by the browser form
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct OrderSubmission {
    #[serde(default)]
    pub user_id: Option<Value>,
    #[serde(default)]
    pub student_name: Option<Value>,
    #[serde(default)]
    pub pizza_slices: Option<Value>,
    #[serde(default)]
    pub juice_boxes: Option<Value>,
    #[serde(default)]
    pub parent_volunteer: Option<Value>,
}

impl OrderSubmission {
    /// Validate the submission and stamp it for `date`
    ///
    /// Malformed slice data is refused here so the store only ever receives
    /// proper name-to-count mappings.
    pub fn into_draft(self, date: Option<&str>) -> WebServerResult<OrderDraft> {
        let user_id = match self.user_id {
            Some(Value::String(user_id)) if !user_id.is_empty() => user_id,
            // Opaque id; numeric ids are kept in their JSON text form
            Some(Value::Number(id)) if id.as_f64().is_some_and(|n| n != 0.0) => id.to_string(),
            _ => return Err(WebServerError::invalid_request(MISSING_DATE_OR_USER)),
        };

        let date = match date.map(str::trim) {
            None | Some("") => return Err(WebServerError::invalid_request(MISSING_DATE_OR_USER)),
            Some(raw) => parse_date(raw)?,
        };

        let pizza_slices = match self.pizza_slices {
            Some(raw @ Value::Object(_)) => serde_json::from_value::<BTreeMap<String, u32>>(raw)
                .map(PizzaSlices::Counts)
                .map_err(|_| WebServerError::invalid_request(INVALID_PIZZA_SLICES))?,
            _ => return Err(WebServerError::invalid_request(INVALID_PIZZA_SLICES)),
        };

        let juice_boxes = match self.juice_boxes {
            None => 0,
            Some(raw) => raw
                .as_u64()
                .and_then(|count| u32::try_from(count).ok())
                .ok_or_else(|| WebServerError::invalid_request(INVALID_JUICE_BOXES))?,
        };

        let draft = OrderDraft::new(user_id, date)
            .with_slices(pizza_slices)
            .with_juice_boxes(juice_boxes)
            .with_parent_volunteer(self.parent_volunteer.as_ref().is_some_and(is_truthy));

        // Only text counts as a name; anything else keeps the default
        match self.student_name {
            Some(Value::String(name)) => Ok(draft.with_student_name(name)),
            _ => Ok(draft),
        }
    }
}

/// Loose truthiness for the volunteer flag; the form posts it as text
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}

/// Body returned after a successful submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitOrderResponse {
    pub message: String,
    pub order: Order,
}

impl SubmitOrderResponse {
    pub fn new(order: Order) -> Self {
        Self {
            message: ORDER_SUBMITTED.to_string(),
            order,
        }
    }
}

/// Dashboard body for one date
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrdersResponse {
    /// Most recent orders only, newest first
    pub orders: Vec<Order>,
    pub total_slices: SliceCounts,
    pub pizzas_needed: SliceCounts,
    pub total_juice_boxes: u64,
}

impl OrdersResponse {
    pub fn new(orders: Vec<Order>, summary: TallySummary) -> Self {
        Self {
            orders,
            total_slices: summary.total_slices,
            pizzas_needed: summary.pizzas_needed,
            total_juice_boxes: summary.total_juice_boxes,
        }
    }
}
