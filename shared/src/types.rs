//! Core order types and identifiers

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::errors::{SharedError, SharedResult};

/// Name recorded when a submission leaves the student name out
pub const DEFAULT_STUDENT_NAME: &str = "Unknown";

/// Pizza types on the menu
///
/// Variant order is the display order used by every tally map.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PizzaType {
    Cheese,
    Salami,
    Veggie,
    Donair,
    Zaatar,
}

impl PizzaType {
    pub const ALL: [PizzaType; 5] = [
        PizzaType::Cheese,
        PizzaType::Salami,
        PizzaType::Veggie,
        PizzaType::Donair,
        PizzaType::Zaatar,
    ];

    /// Key used for this type inside an order's `pizza_slices` mapping
    pub fn name(self) -> &'static str {
        match self {
            PizzaType::Cheese => "Cheese",
            PizzaType::Salami => "Salami",
            PizzaType::Veggie => "Veggie",
            PizzaType::Donair => "Donair",
            PizzaType::Zaatar => "Zaatar",
        }
    }
}

impl fmt::Display for PizzaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PizzaType {
    type Err = SharedError;

    /// Case-insensitive so command line and environment values are forgiving
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        PizzaType::ALL
            .into_iter()
            .find(|pizza| pizza.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| SharedError::UnknownPizzaType { input: s.to_string() })
    }
}

/// Identifier assigned to an order by the store
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(Uuid);

impl OrderId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl Default for OrderId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Fundraiser date that partitions all orders, always rendered as `YYYY-MM-DD`
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OrderDate(NaiveDate);

impl OrderDate {
    pub fn parse(input: &str) -> SharedResult<Self> {
        NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
            .map(Self)
            .map_err(|_| SharedError::InvalidDate { input: input.to_string() })
    }

    pub fn as_naive_date(&self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for OrderDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl TryFrom<String> for OrderDate {
    type Error = SharedError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<OrderDate> for String {
    fn from(date: OrderDate) -> Self {
        date.to_string()
    }
}

impl FromStr for OrderDate {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for OrderDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// Slice counts keyed by pizza type name, exactly as submitted
///
/// Stored orders are not guaranteed to hold a name-to-count mapping, so
/// anything else is kept as `Malformed` instead of failing the whole load.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PizzaSlices {
    Counts(BTreeMap<String, u32>),
    Malformed(serde_json::Value),
}

impl PizzaSlices {
    pub fn from_counts<I>(counts: I) -> Self
    where
        I: IntoIterator<Item = (PizzaType, u32)>,
    {
        Self::Counts(
            counts
                .into_iter()
                .map(|(pizza, count)| (pizza.name().to_string(), count))
                .collect(),
        )
    }

    /// Slices requested for one type; missing keys count as zero
    ///
    /// Returns `None` when the mapping itself is malformed.
    pub fn count_for(&self, pizza: PizzaType) -> Option<u32> {
        match self {
            PizzaSlices::Counts(counts) => Some(counts.get(pizza.name()).copied().unwrap_or(0)),
            PizzaSlices::Malformed(_) => None,
        }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, PizzaSlices::Malformed(_))
    }
}

impl Default for PizzaSlices {
    fn default() -> Self {
        Self::Counts(BTreeMap::new())
    }
}

fn default_student_name() -> String {
    DEFAULT_STUDENT_NAME.to_string()
}

/// Order contents before the store has assigned an id
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrderDraft {
    pub user_id: String,
    #[serde(default = "default_student_name")]
    pub student_name: String,
    #[serde(default)]
    pub pizza_slices: PizzaSlices,
    #[serde(default)]
    pub juice_boxes: u32,
    #[serde(default)]
    pub parent_volunteer: bool,
    pub date: OrderDate,
    pub timestamp: DateTime<Utc>,
}

impl OrderDraft {
    /// New draft stamped with the current time
    pub fn new(user_id: impl Into<String>, date: OrderDate) -> Self {
        Self {
            user_id: user_id.into(),
            student_name: default_student_name(),
            pizza_slices: PizzaSlices::default(),
            juice_boxes: 0,
            parent_volunteer: false,
            date,
            timestamp: Utc::now(),
        }
    }

    pub fn with_student_name(mut self, student_name: impl Into<String>) -> Self {
        self.student_name = student_name.into();
        self
    }

    pub fn with_slices(mut self, pizza_slices: PizzaSlices) -> Self {
        self.pizza_slices = pizza_slices;
        self
    }

    pub fn with_juice_boxes(mut self, juice_boxes: u32) -> Self {
        self.juice_boxes = juice_boxes;
        self
    }

    pub fn with_parent_volunteer(mut self, parent_volunteer: bool) -> Self {
        self.parent_volunteer = parent_volunteer;
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn into_order(self, id: OrderId) -> Order {
        Order {
            id,
            user_id: self.user_id,
            student_name: self.student_name,
            pizza_slices: self.pizza_slices,
            juice_boxes: self.juice_boxes,
            parent_volunteer: self.parent_volunteer,
            date: self.date,
            timestamp: self.timestamp,
        }
    }
}

/// One persisted submission
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Order {
    #[serde(rename = "_id")]
    pub id: OrderId,
    pub user_id: String,
    #[serde(default = "default_student_name")]
    pub student_name: String,
    #[serde(default)]
    pub pizza_slices: PizzaSlices,
    #[serde(default)]
    pub juice_boxes: u32,
    #[serde(default)]
    pub parent_volunteer: bool,
    pub date: OrderDate,
    pub timestamp: DateTime<Utc>,
}
