//! PostgreSQL Dispatch Store
//!
//! Implements the `DispatchStore` port over any Sea-ORM connection.
//! The read paths run on the shared connection; the transactional
//! flows construct a `PgStore` over an open transaction so every
//! storage call participates in it.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use sea_orm::ConnectionTrait;

use crate::domain::model::courier::{Courier, CourierType, Shift};
use crate::domain::model::delivery_group::DeliveryGroup;
use crate::domain::model::order::Order;
use crate::domain::ports::{
    CandidateQuery, CompletionRecord, DispatchStore, GroupKey, NewCourier, NewOrder, StoreError,
};

use super::{courier_postgres, delivery_group_postgres, order_postgres};

/// Dispatch store over a Sea-ORM connection or transaction
pub struct PgStore<'a, C: ConnectionTrait> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> PgStore<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl<C: ConnectionTrait> DispatchStore for PgStore<'_, C> {
    async fn create_couriers(&self, couriers: &[NewCourier]) -> Result<Vec<Courier>, StoreError> {
        courier_postgres::create_couriers(self.conn, couriers).await
    }

    async fn courier_by_id(&self, id: u64) -> Result<Option<Courier>, StoreError> {
        courier_postgres::find_by_id(self.conn, id).await
    }

    async fn couriers_page(&self, offset: u64, limit: u64) -> Result<Vec<Courier>, StoreError> {
        courier_postgres::fetch_page(self.conn, offset, limit).await
    }

    async fn shifts_by_type(&self, courier_type: CourierType) -> Result<Vec<Shift>, StoreError> {
        courier_postgres::shifts_by_type(self.conn, courier_type).await
    }

    async fn shift_containing(
        &self,
        courier_id: u64,
        at: NaiveTime,
    ) -> Result<Option<Shift>, StoreError> {
        courier_postgres::shift_containing(self.conn, courier_id, at).await
    }

    async fn create_orders(&self, orders: &[NewOrder]) -> Result<Vec<Order>, StoreError> {
        order_postgres::create_orders(self.conn, orders).await
    }

    async fn order_by_id(&self, id: u64) -> Result<Option<Order>, StoreError> {
        order_postgres::find_by_id(self.conn, id).await
    }

    async fn orders_page(&self, offset: u64, limit: u64) -> Result<Vec<Order>, StoreError> {
        order_postgres::fetch_page(self.conn, offset, limit).await
    }

    async fn pick_candidate(&self, query: &CandidateQuery) -> Result<Option<Order>, StoreError> {
        order_postgres::pick_candidate(self.conn, query).await
    }

    async fn mark_completed(
        &self,
        order_id: u64,
        record: &CompletionRecord,
    ) -> Result<(), StoreError> {
        order_postgres::mark_completed(self.conn, order_id, record).await
    }

    async fn orders_in_group(&self, group_id: u64) -> Result<Vec<Order>, StoreError> {
        order_postgres::orders_in_group(self.conn, group_id).await
    }

    async fn completed_count(
        &self,
        courier_id: u64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<u64, StoreError> {
        order_postgres::completed_count(self.conn, courier_id, start, end).await
    }

    async fn completed_cost_sum(
        &self,
        courier_id: u64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Option<u64>, StoreError> {
        order_postgres::completed_cost_sum(self.conn, courier_id, start, end).await
    }

    async fn get_or_create_group(&self, key: &GroupKey) -> Result<DeliveryGroup, StoreError> {
        delivery_group_postgres::get_or_create(self.conn, key).await
    }

    async fn update_group(&self, group: &DeliveryGroup) -> Result<(), StoreError> {
        delivery_group_postgres::update(self.conn, group).await
    }

    async fn groups_by_date(
        &self,
        date: NaiveDate,
        courier_ids: &[u64],
    ) -> Result<Vec<DeliveryGroup>, StoreError> {
        delivery_group_postgres::all_by_date(self.conn, date, courier_ids).await
    }
}
