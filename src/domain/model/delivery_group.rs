//! Delivery Group Model

use chrono::{DateTime, NaiveDate, Utc};

/// One continuous outing of a courier within one working-hour interval.
///
/// Orders reference their group through `Order::delivery_group_id`; the
/// group itself holds no order list. `start_date_time`/`end_date_time`
/// bound the window actually walked; the end grows monotonically as
/// orders are added to the batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeliveryGroup {
    pub id: u64,
    pub courier_id: u64,
    pub working_hours_id: u64,
    pub assign_date: NaiveDate,
    pub start_date_time: DateTime<Utc>,
    pub end_date_time: DateTime<Utc>,
}
