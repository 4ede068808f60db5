//! Order Model

use chrono::{DateTime, NaiveTime, Utc};

/// A time-of-day window in which the customer accepts delivery
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeliveryWindow {
    pub id: u64,
    pub start: NaiveTime,
    pub end: NaiveTime,
}

/// Order record.
///
/// `completed_time` and `delivery_group_id` are set together when the
/// order is assigned or explicitly completed, and never cleared.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: u64,
    pub weight: f64,
    pub region: i32,
    pub delivery_hours: Vec<DeliveryWindow>,
    pub cost: u32,
    pub completed_time: Option<DateTime<Utc>>,
    pub delivery_group_id: Option<u64>,
}
