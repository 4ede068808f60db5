//! Dispatch Store Port
//!
//! Contract between the core and the persistence adapter. One
//! implementation wraps a plain connection for read paths; the same
//! implementation over an open transaction backs the transactional
//! flows (bulk creates, completion, assignment).
//!
//! `pick_candidate` is the load-bearing operation: it must lock the
//! returned order row and skip rows locked by concurrent callers, so
//! parallel assignment runs partition the candidate set.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
#[cfg(test)]
use mockall::automock;
use thiserror::Error;

use crate::domain::model::courier::{Courier, CourierType, Shift};
use crate::domain::model::delivery_group::DeliveryGroup;
use crate::domain::model::order::Order;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StoreError {
    /// Query execution error
    #[error("query error: {0}")]
    Query(String),

    /// A persisted row cannot be mapped back to the domain
    #[error("corrupt record: {0}")]
    Corrupt(String),
}

/// New courier to persist, with its working-hour intervals
#[derive(Debug, Clone, PartialEq)]
pub struct NewCourier {
    pub courier_type: CourierType,
    pub regions: Vec<i32>,
    pub working_hours: Vec<(NaiveTime, NaiveTime)>,
}

/// New order to persist, with its delivery windows
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub weight: f64,
    pub region: i32,
    pub delivery_hours: Vec<(NaiveTime, NaiveTime)>,
    pub cost: u32,
}

/// Parameters of the candidate-order query.
///
/// The predicate is evaluated against time-of-day columns: a window
/// qualifies when it is already open at the cursor (`with_gap=false`)
/// or opens at/after the cursor (`with_gap=true`), and in both phases
/// stays open at the cursor.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateQuery {
    pub max_weight: f64,
    pub regions: Vec<i32>,
    pub cursor: NaiveTime,
    /// DESC weight ordering for the last slot of a batch
    pub heaviest_first: bool,
    /// Accept windows opening after the cursor (the courier waits)
    pub with_gap: bool,
}

/// Identity of a delivery group for get-or-create
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupKey {
    pub courier_id: u64,
    pub working_hours_id: u64,
    pub assign_date: NaiveDate,
    pub start_date_time: DateTime<Utc>,
    pub end_date_time: DateTime<Utc>,
}

/// Completion data written onto an order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletionRecord {
    pub delivery_group_id: u64,
    pub cost: u32,
    pub completed_time: DateTime<Utc>,
}

/// Storage operations the dispatch core consumes
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DispatchStore: Send + Sync {
    // === Couriers ===

    /// Insert couriers with their working-hour rows, returning them with ids
    async fn create_couriers(&self, couriers: &[NewCourier]) -> Result<Vec<Courier>, StoreError>;

    async fn courier_by_id(&self, id: u64) -> Result<Option<Courier>, StoreError>;

    async fn couriers_page(&self, offset: u64, limit: u64) -> Result<Vec<Courier>, StoreError>;

    /// All (courier, working-hour interval) rows of one courier type,
    /// ordered by interval start time ascending
    async fn shifts_by_type(&self, courier_type: CourierType) -> Result<Vec<Shift>, StoreError>;

    /// The courier's working-hour interval containing `at`, bounds inclusive
    async fn shift_containing(
        &self,
        courier_id: u64,
        at: NaiveTime,
    ) -> Result<Option<Shift>, StoreError>;

    // === Orders ===

    /// Insert orders with their delivery-window rows, returning them with ids
    async fn create_orders(&self, orders: &[NewOrder]) -> Result<Vec<Order>, StoreError>;

    async fn order_by_id(&self, id: u64) -> Result<Option<Order>, StoreError>;

    async fn orders_page(&self, offset: u64, limit: u64) -> Result<Vec<Order>, StoreError>;

    /// Find, lock and return one unassigned order matching the query,
    /// skipping rows locked by concurrent transactions
    async fn pick_candidate(&self, query: &CandidateQuery) -> Result<Option<Order>, StoreError>;

    /// Write completion data onto an order
    async fn mark_completed(
        &self,
        order_id: u64,
        record: &CompletionRecord,
    ) -> Result<(), StoreError>;

    async fn orders_in_group(&self, group_id: u64) -> Result<Vec<Order>, StoreError>;

    /// Count of the courier's orders completed inside [start, end]
    async fn completed_count(
        &self,
        courier_id: u64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<u64, StoreError>;

    /// Summed cost of the courier's orders completed inside [start, end];
    /// None when there are none
    async fn completed_cost_sum(
        &self,
        courier_id: u64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Option<u64>, StoreError>;

    // === Delivery groups ===

    /// Find a group matching every field of `key`, creating it if absent
    async fn get_or_create_group(&self, key: &GroupKey) -> Result<DeliveryGroup, StoreError>;

    /// Persist an updated group (final end of a flushed batch)
    async fn update_group(&self, group: &DeliveryGroup) -> Result<(), StoreError>;

    /// Groups assigned on `date`; restricted to `courier_ids` when non-empty
    async fn groups_by_date(
        &self,
        date: NaiveDate,
        courier_ids: &[u64],
    ) -> Result<Vec<DeliveryGroup>, StoreError>;
}
