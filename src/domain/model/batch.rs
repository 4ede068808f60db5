//! Courier Batch State Machine
//!
//! Tracks one courier's progress through one working-hour interval on
//! one date. The machine is pure: it computes completion times, costs
//! and group windows, and signals group persistence to the caller
//! instead of touching storage itself.
//!
//! Transitions:
//! - idle → in-transit on the first `add_order`
//! - in-transit → idle on `flush` (capacity reached, or no order fits
//!   the current region); the time cursor is NOT reset by a flush
//! - stop when the next delivery cannot finish before `shift_end`

use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use thiserror::Error;

use super::courier::{discounted_cost, CourierType, DeliveryCapacity, Shift};
use super::delivery_group::DeliveryGroup;
use super::order::Order;

/// Errors surfaced while mutating the batch state
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BatchError {
    /// The order carries no delivery window; it can never be scheduled
    #[error("order {0} has no delivery hours")]
    MissingDeliveryWindow(u64),
}

/// Result of placing one order into the batch
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Instant the delivery is finished
    pub completed_time: DateTime<Utc>,
    /// Cost to persist on the order, batch discount applied
    pub cost: u32,
    /// When set, no group is bound yet: the caller must get-or-create a
    /// group spanning this (start, end) window and bind it back
    pub new_group_window: Option<(DateTime<Utc>, DateTime<Utc>)>,
}

/// State of one courier walking one working-hour interval
#[derive(Debug, Clone)]
pub struct BatchState {
    courier_id: u64,
    working_hours_id: u64,
    courier_type: CourierType,
    capacity: DeliveryCapacity,
    available_regions: Vec<i32>,
    on_the_way: bool,
    current_region: i32,
    carried_weight: f64,
    carried_orders: u32,
    next_delivery_duration: TimeDelta,
    next_delivery_start: DateTime<Utc>,
    shift_end: DateTime<Utc>,
    group: Option<DeliveryGroup>,
}

impl BatchState {
    /// Fresh state at the start of the shift on `date`
    pub fn new(shift: &Shift, date: NaiveDate) -> Self {
        Self {
            courier_id: shift.courier_id,
            working_hours_id: shift.working_hours_id,
            courier_type: shift.courier_type,
            capacity: shift.courier_type.capacity(),
            available_regions: shift.regions.clone(),
            on_the_way: false,
            current_region: 0,
            carried_weight: 0.0,
            carried_orders: 0,
            next_delivery_duration: shift.courier_type.service_time(0),
            next_delivery_start: date.and_time(shift.start_time).and_utc(),
            shift_end: date.and_time(shift.end_time).and_utc(),
            group: None,
        }
    }

    pub fn courier_id(&self) -> u64 {
        self.courier_id
    }

    pub fn working_hours_id(&self) -> u64 {
        self.working_hours_id
    }

    pub fn is_on_the_way(&self) -> bool {
        self.on_the_way
    }

    pub fn current_region(&self) -> i32 {
        self.current_region
    }

    pub fn available_regions(&self) -> &[i32] {
        &self.available_regions
    }

    /// Earliest instant the next delivery may begin
    pub fn cursor(&self) -> DateTime<Utc> {
        self.next_delivery_start
    }

    pub fn shift_end(&self) -> DateTime<Utc> {
        self.shift_end
    }

    /// Bound delivery group, if any order was added since the last flush
    pub fn group(&self) -> Option<&DeliveryGroup> {
        self.group.as_ref()
    }

    /// Bind the persisted group created for the first order of a batch
    pub fn bind_group(&mut self, group: DeliveryGroup) {
        self.group = Some(group);
    }

    /// Weight still available in the current batch
    pub fn available_weight(&self) -> f64 {
        self.capacity.max_weight - self.carried_weight
    }

    /// True when only one order slot remains in the batch
    pub fn next_will_be_last(&self) -> bool {
        self.carried_orders + 1 == self.capacity.max_orders
    }

    /// True when the batch hit its order-count or weight limit
    pub fn needs_flush(&self) -> bool {
        self.carried_orders >= self.capacity.max_orders
            || self.carried_weight >= self.capacity.max_weight
    }

    /// True when the next delivery cannot finish inside the shift
    pub fn out_of_time(&self) -> bool {
        self.shift_end < self.next_delivery_start + self.next_delivery_duration
    }

    /// Instant at which delivering `order` next would finish: the
    /// delivery begins at the cursor or at the opening of the order's
    /// first window, whichever is later, and takes one service time.
    fn completion_for(&self, order: &Order) -> Result<DateTime<Utc>, BatchError> {
        let window = order
            .delivery_hours
            .first()
            .ok_or(BatchError::MissingDeliveryWindow(order.id))?;

        let window_opens = self
            .next_delivery_start
            .date_naive()
            .and_time(window.start)
            .and_utc();

        let start = window_opens.max(self.next_delivery_start);

        Ok(start + self.next_delivery_duration)
    }

    /// Whether delivering `order` would still finish inside the shift.
    /// Guards the gap phase, where the order's window may open too
    /// close to the end of the shift.
    pub fn fits(&self, order: &Order) -> Result<bool, BatchError> {
        Ok(self.completion_for(order)? <= self.shift_end)
    }

    /// Place an order into the batch and advance the time cursor.
    pub fn add_order(&mut self, order: &Order) -> Result<Placement, BatchError> {
        let duration = self.next_delivery_duration;
        let completed_time = self.completion_for(order)?;

        self.on_the_way = true;
        self.current_region = order.region;
        self.carried_orders += 1;
        self.carried_weight += order.weight;
        self.next_delivery_start = completed_time;

        let cost = discounted_cost(order.cost, self.carried_orders);

        let new_group_window = match self.group.as_mut() {
            Some(group) => {
                group.end_date_time = completed_time;
                None
            }
            None => Some((completed_time - duration, completed_time)),
        };

        self.next_delivery_duration = self.courier_type.service_time(self.carried_orders);

        Ok(Placement {
            completed_time,
            cost,
            new_group_window,
        })
    }

    /// Close the current batch: reset the carry and return the bound
    /// group for final persistence. The time cursor stays where the
    /// last delivery left it; only the service time resets to the
    /// first-delivery value.
    pub fn flush(&mut self) -> Option<DeliveryGroup> {
        self.on_the_way = false;
        self.carried_weight = 0.0;
        self.carried_orders = 0;
        self.current_region = 0;
        self.next_delivery_duration = self.courier_type.service_time(0);

        self.group.take()
    }
}
