//! Order Use Cases
//!
//! Bulk creation, lookups and explicit completion. Completion and bulk
//! creation are each all-or-nothing: every entry of a request commits
//! or none does.

use chrono::{DateTime, Utc};
use sea_orm::{DatabaseConnection, TransactionTrait};
use tracing::info;

use crate::domain::error::CoreError;
use crate::domain::model::order::Order;
use crate::domain::ports::{CompletionRecord, DispatchStore, GroupKey, NewOrder};
use crate::infrastructure::repository::PgStore;

use super::parse_hours_interval;

/// Validated-on-entry order creation request
#[derive(Debug, Clone)]
pub struct CreateOrder {
    pub weight: f64,
    pub regions: i32,
    pub delivery_hours: Vec<String>,
    pub cost: u32,
}

/// One completion statement: courier delivered order at an instant
#[derive(Debug, Clone, Copy)]
pub struct CompleteOrder {
    pub courier_id: u64,
    pub order_id: u64,
    pub complete_time: DateTime<Utc>,
}

/// Create orders in one transaction, returning them with ids
pub async fn create_orders(
    db: &DatabaseConnection,
    orders: Vec<CreateOrder>,
) -> Result<Vec<Order>, CoreError> {
    let mut to_create = Vec::with_capacity(orders.len());
    for order in &orders {
        to_create.push(validate_order(order)?);
    }

    let tx = db
        .begin()
        .await
        .map_err(|e| CoreError::internal(e.to_string()))?;

    let created = PgStore::new(&tx).create_orders(&to_create).await?;

    tx.commit()
        .await
        .map_err(|e| CoreError::internal(e.to_string()))?;

    info!(count = created.len(), "orders created");

    Ok(created)
}

fn validate_order(order: &CreateOrder) -> Result<NewOrder, CoreError> {
    if !order.weight.is_finite() || order.weight < 0.0 {
        return Err(CoreError::invalid("order weight must be non-negative"));
    }
    if order.delivery_hours.is_empty() {
        return Err(CoreError::invalid("order needs at least one delivery window"));
    }

    let mut delivery_hours = Vec::with_capacity(order.delivery_hours.len());
    for interval in &order.delivery_hours {
        delivery_hours.push(parse_hours_interval(interval)?);
    }

    Ok(NewOrder {
        weight: order.weight,
        region: order.regions,
        delivery_hours,
        cost: order.cost,
    })
}

pub async fn order_by_id(db: &DatabaseConnection, id: u64) -> Result<Order, CoreError> {
    PgStore::new(db)
        .order_by_id(id)
        .await?
        .ok_or(CoreError::NotFound("order"))
}

pub async fn orders_page(
    db: &DatabaseConnection,
    offset: u64,
    limit: u64,
) -> Result<Vec<Order>, CoreError> {
    Ok(PgStore::new(db).orders_page(offset, limit).await?)
}

/// Complete orders against couriers in one transaction.
///
/// A repeated completion with identical arguments lands on the same
/// delivery group and is accepted; a completion against an order held
/// by a different group is a conflict.
pub async fn complete_orders(
    db: &DatabaseConnection,
    entries: Vec<CompleteOrder>,
) -> Result<Vec<Order>, CoreError> {
    let tx = db
        .begin()
        .await
        .map_err(|e| CoreError::internal(e.to_string()))?;

    let completed = run_completion(&PgStore::new(&tx), &entries).await?;

    tx.commit()
        .await
        .map_err(|e| CoreError::internal(e.to_string()))?;

    info!(count = completed.len(), "orders completed");

    Ok(completed)
}

pub(crate) async fn run_completion<S: DispatchStore + ?Sized>(
    store: &S,
    entries: &[CompleteOrder],
) -> Result<Vec<Order>, CoreError> {
    let mut completed = Vec::with_capacity(entries.len());

    for entry in entries {
        let courier = store
            .courier_by_id(entry.courier_id)
            .await?
            .ok_or(CoreError::NotFound("courier"))?;

        let mut order = store
            .order_by_id(entry.order_id)
            .await?
            .ok_or(CoreError::NotFound("order"))?;

        let complete_time = entry.complete_time;

        let shift = store
            .shift_containing(courier.id, complete_time.time())
            .await?
            .ok_or_else(|| {
                CoreError::invalid("complete time is outside the courier's working hours")
            })?;

        // a standalone completion is priced as a first delivery
        let duration = courier.courier_type.service_time(0);

        let group = store
            .get_or_create_group(&GroupKey {
                courier_id: courier.id,
                working_hours_id: shift.working_hours_id,
                assign_date: complete_time.date_naive(),
                start_date_time: complete_time - duration,
                end_date_time: complete_time,
            })
            .await?;

        if let Some(existing) = order.delivery_group_id {
            if existing != group.id {
                return Err(CoreError::AlreadyAssigned);
            }
        }

        let record = CompletionRecord {
            delivery_group_id: group.id,
            cost: order.cost,
            completed_time: complete_time,
        };
        store.mark_completed(order.id, &record).await?;

        order.completed_time = Some(complete_time);
        order.delivery_group_id = Some(group.id);
        completed.push(order);
    }

    Ok(completed)
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveTime, TimeDelta};
    use mockall::predicate::eq;

    use super::*;
    use crate::domain::model::courier::{Courier, CourierType, Shift, WorkingInterval};
    use crate::domain::model::delivery_group::DeliveryGroup;
    use crate::domain::ports::MockDispatchStore;

    fn courier(id: u64, courier_type: CourierType) -> Courier {
        Courier {
            id,
            courier_type,
            regions: vec![1],
            working_hours: vec![WorkingInterval {
                id: 100,
                start: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
                end: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
            }],
        }
    }

    fn order(id: u64, group: Option<u64>) -> Order {
        Order {
            id,
            weight: 2.0,
            region: 1,
            delivery_hours: Vec::new(),
            cost: 300,
            completed_time: group.map(|_| complete_time()),
            delivery_group_id: group,
        }
    }

    fn shift() -> Shift {
        Shift {
            courier_id: 1,
            courier_type: CourierType::Foot,
            regions: vec![1],
            working_hours_id: 100,
            start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
        }
    }

    fn complete_time() -> DateTime<Utc> {
        NaiveDate::from_ymd_opt(2026, 7, 12)
            .unwrap()
            .and_time(NaiveTime::from_hms_opt(12, 0, 0).unwrap())
            .and_utc()
    }

    fn group(id: u64) -> DeliveryGroup {
        let end = complete_time();
        DeliveryGroup {
            id,
            courier_id: 1,
            working_hours_id: 100,
            assign_date: end.date_naive(),
            start_date_time: end - TimeDelta::minutes(25),
            end_date_time: end,
        }
    }

    #[tokio::test]
    async fn test_complete_marks_order_without_discount() {
        let mut store = MockDispatchStore::new();
        store
            .expect_courier_by_id()
            .with(eq(1))
            .returning(|_| Ok(Some(courier(1, CourierType::Foot))));
        store
            .expect_order_by_id()
            .with(eq(5))
            .returning(|_| Ok(Some(order(5, None))));
        store
            .expect_shift_containing()
            .returning(|_, _| Ok(Some(shift())));
        store
            .expect_get_or_create_group()
            .withf(|key: &GroupKey| {
                key.courier_id == 1
                    && key.working_hours_id == 100
                    && key.end_date_time == complete_time()
                    && key.start_date_time == complete_time() - TimeDelta::minutes(25)
            })
            .returning(|_| Ok(group(9)));
        store
            .expect_mark_completed()
            .withf(|order_id, record| {
                *order_id == 5
                    && record.delivery_group_id == 9
                    && record.cost == 300
                    && record.completed_time == complete_time()
            })
            .returning(|_, _| Ok(()));

        let entries = [CompleteOrder {
            courier_id: 1,
            order_id: 5,
            complete_time: complete_time(),
        }];
        let completed = run_completion(&store, &entries).await.unwrap();

        assert_eq!(completed.len(), 1);
        assert_eq!(completed[0].delivery_group_id, Some(9));
        assert_eq!(completed[0].completed_time, Some(complete_time()));
        assert_eq!(completed[0].cost, 300);
    }

    #[tokio::test]
    async fn test_complete_is_idempotent_on_same_group() {
        let mut store = MockDispatchStore::new();
        store
            .expect_courier_by_id()
            .returning(|_| Ok(Some(courier(1, CourierType::Foot))));
        store
            .expect_order_by_id()
            .returning(|_| Ok(Some(order(5, Some(9)))));
        store
            .expect_shift_containing()
            .returning(|_, _| Ok(Some(shift())));
        store
            .expect_get_or_create_group()
            .returning(|_| Ok(group(9)));
        store.expect_mark_completed().returning(|_, _| Ok(()));

        let entries = [CompleteOrder {
            courier_id: 1,
            order_id: 5,
            complete_time: complete_time(),
        }];

        assert!(run_completion(&store, &entries).await.is_ok());
    }

    #[tokio::test]
    async fn test_complete_conflicts_on_foreign_group() {
        let mut store = MockDispatchStore::new();
        store
            .expect_courier_by_id()
            .returning(|_| Ok(Some(courier(1, CourierType::Foot))));
        store
            .expect_order_by_id()
            .returning(|_| Ok(Some(order(5, Some(3)))));
        store
            .expect_shift_containing()
            .returning(|_, _| Ok(Some(shift())));
        store
            .expect_get_or_create_group()
            .returning(|_| Ok(group(9)));

        let entries = [CompleteOrder {
            courier_id: 1,
            order_id: 5,
            complete_time: complete_time(),
        }];
        let err = run_completion(&store, &entries).await.unwrap_err();

        assert!(matches!(err, CoreError::AlreadyAssigned));
    }

    #[tokio::test]
    async fn test_complete_unknown_courier_is_not_found() {
        let mut store = MockDispatchStore::new();
        store.expect_courier_by_id().returning(|_| Ok(None));

        let entries = [CompleteOrder {
            courier_id: 77,
            order_id: 5,
            complete_time: complete_time(),
        }];
        let err = run_completion(&store, &entries).await.unwrap_err();

        assert!(matches!(err, CoreError::NotFound("courier")));
    }

    #[tokio::test]
    async fn test_complete_outside_working_hours_is_invalid() {
        let mut store = MockDispatchStore::new();
        store
            .expect_courier_by_id()
            .returning(|_| Ok(Some(courier(1, CourierType::Foot))));
        store
            .expect_order_by_id()
            .returning(|_| Ok(Some(order(5, None))));
        store.expect_shift_containing().returning(|_, _| Ok(None));

        let entries = [CompleteOrder {
            courier_id: 1,
            order_id: 5,
            complete_time: complete_time(),
        }];
        let err = run_completion(&store, &entries).await.unwrap_err();

        assert!(matches!(err, CoreError::Invalid(_)));
    }

    #[test]
    fn test_validate_order_rejects_bad_input() {
        let base = CreateOrder {
            weight: 2.0,
            regions: 1,
            delivery_hours: vec!["09:00-10:00".to_string()],
            cost: 100,
        };

        let mut negative = base.clone();
        negative.weight = -1.0;
        assert!(validate_order(&negative).is_err());

        let mut windowless = base.clone();
        windowless.delivery_hours.clear();
        assert!(validate_order(&windowless).is_err());

        let mut inverted = base.clone();
        inverted.delivery_hours = vec!["12:00-09:00".to_string()];
        assert!(validate_order(&inverted).is_err());

        assert!(validate_order(&base).is_ok());
    }
}
