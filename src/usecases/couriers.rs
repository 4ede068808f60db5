//! Courier Use Cases
//!
//! Bulk creation, lookups, the per-interval rating/earnings report and
//! the read-only assignments view.

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{DatabaseConnection, TransactionTrait};
use tracing::info;

use crate::domain::error::CoreError;
use crate::domain::model::courier::{Courier, CourierType};
use crate::domain::ports::{DispatchStore, NewCourier};
use crate::infrastructure::repository::PgStore;

use super::assign::{CourierAssignments, GroupAssignments};
use super::parse_hours_interval;

/// Validated-on-entry courier creation request
#[derive(Debug, Clone)]
pub struct CreateCourier {
    pub courier_type: String,
    pub regions: Vec<i32>,
    pub working_hours: Vec<String>,
}

/// Rating and earnings of a courier over an interval.
///
/// Both fields are absent when the courier completed nothing in the
/// interval; rating is additionally absent for a zero-length interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CourierMeta {
    pub rating: Option<i32>,
    pub earnings: Option<i32>,
}

/// Create couriers in one transaction, returning them with ids
pub async fn create_couriers(
    db: &DatabaseConnection,
    couriers: Vec<CreateCourier>,
) -> Result<Vec<Courier>, CoreError> {
    let mut to_create = Vec::with_capacity(couriers.len());
    for courier in &couriers {
        to_create.push(validate_courier(courier)?);
    }

    let tx = db
        .begin()
        .await
        .map_err(|e| CoreError::internal(e.to_string()))?;

    let created = PgStore::new(&tx).create_couriers(&to_create).await?;

    tx.commit()
        .await
        .map_err(|e| CoreError::internal(e.to_string()))?;

    info!(count = created.len(), "couriers created");

    Ok(created)
}

fn validate_courier(courier: &CreateCourier) -> Result<NewCourier, CoreError> {
    let courier_type: CourierType = courier
        .courier_type
        .parse()
        .map_err(|_| CoreError::invalid("courier_type must be one of FOOT, BIKE, AUTO"))?;

    if courier.regions.is_empty() {
        return Err(CoreError::invalid("courier needs at least one region"));
    }
    if courier.working_hours.is_empty() {
        return Err(CoreError::invalid(
            "courier needs at least one working-hours interval",
        ));
    }

    let mut working_hours = Vec::with_capacity(courier.working_hours.len());
    for interval in &courier.working_hours {
        working_hours.push(parse_hours_interval(interval)?);
    }

    Ok(NewCourier {
        courier_type,
        regions: courier.regions.clone(),
        working_hours,
    })
}

pub async fn courier_by_id(db: &DatabaseConnection, id: u64) -> Result<Courier, CoreError> {
    PgStore::new(db)
        .courier_by_id(id)
        .await?
        .ok_or(CoreError::NotFound("courier"))
}

pub async fn couriers_page(
    db: &DatabaseConnection,
    offset: u64,
    limit: u64,
) -> Result<Vec<Courier>, CoreError> {
    Ok(PgStore::new(db).couriers_page(offset, limit).await?)
}

/// Rating and earnings of courier `id` over `[start_date, end_date]`
pub async fn courier_meta(
    db: &DatabaseConnection,
    id: u64,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> Result<(Courier, CourierMeta), CoreError> {
    let store = PgStore::new(db);
    let courier = store
        .courier_by_id(id)
        .await?
        .ok_or(CoreError::NotFound("courier"))?;

    let meta = compute_meta(&store, &courier, start_date, end_date).await?;

    Ok((courier, meta))
}

/// Earnings are the discount-adjusted cost sum times the salary
/// multiplier; rating is completed-orders-per-hour times the rating
/// multiplier, in i32 with integer division for wire compatibility.
pub(crate) async fn compute_meta<S: DispatchStore + ?Sized>(
    store: &S,
    courier: &Courier,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> Result<CourierMeta, CoreError> {
    if start_date > end_date {
        return Err(CoreError::invalid("startDate must not be after endDate"));
    }

    let start: DateTime<Utc> = start_date.and_time(chrono::NaiveTime::MIN).and_utc();
    let end: DateTime<Utc> = end_date.and_time(chrono::NaiveTime::MIN).and_utc();

    let count = store.completed_count(courier.id, start, end).await?;
    if count == 0 {
        return Ok(CourierMeta::default());
    }

    let cost_sum = store
        .completed_cost_sum(courier.id, start, end)
        .await?
        .unwrap_or(0);

    let earnings = cost_sum as i32 * courier.courier_type.salary_ratio() as i32;

    let hours = (end - start).num_hours() as i32;
    let rating = if hours > 0 {
        Some(count as i32 / hours * courier.courier_type.rating_ratio() as i32)
    } else {
        None
    };

    Ok(CourierMeta {
        rating,
        earnings: Some(earnings),
    })
}

/// Delivery groups assigned on `date`, grouped per courier, with their
/// orders in id order
pub async fn assignments_on_date(
    db: &DatabaseConnection,
    date: NaiveDate,
    courier_id: Option<u64>,
) -> Result<Vec<CourierAssignments>, CoreError> {
    let store = PgStore::new(db);
    collect_assignments(&store, date, courier_id).await
}

pub(crate) async fn collect_assignments<S: DispatchStore + ?Sized>(
    store: &S,
    date: NaiveDate,
    courier_id: Option<u64>,
) -> Result<Vec<CourierAssignments>, CoreError> {
    let filter: Vec<u64> = courier_id.into_iter().collect();
    let mut groups = store.groups_by_date(date, &filter).await?;
    groups.sort_by_key(|g| (g.courier_id, g.id));

    let mut result: Vec<CourierAssignments> = Vec::new();
    for group in groups {
        let orders = store.orders_in_group(group.id).await?;
        if orders.is_empty() {
            continue;
        }

        let entry = GroupAssignments {
            group_id: group.id,
            orders,
        };

        match result.last_mut() {
            Some(last) if last.courier_id == group.courier_id => last.groups.push(entry),
            _ => result.push(CourierAssignments {
                courier_id: group.courier_id,
                groups: vec![entry],
            }),
        }
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockDispatchStore;

    fn courier(courier_type: CourierType) -> Courier {
        Courier {
            id: 1,
            courier_type,
            regions: vec![1],
            working_hours: Vec::new(),
        }
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 7, d).unwrap()
    }

    #[tokio::test]
    async fn test_meta_empty_interval_has_no_fields() {
        let mut store = MockDispatchStore::new();
        store.expect_completed_count().returning(|_, _, _| Ok(0));

        let meta = compute_meta(&store, &courier(CourierType::Foot), day(1), day(2))
            .await
            .unwrap();

        assert_eq!(meta, CourierMeta::default());
    }

    #[tokio::test]
    async fn test_meta_earnings_and_rating() {
        let mut store = MockDispatchStore::new();
        store.expect_completed_count().returning(|_, _, _| Ok(50));
        store
            .expect_completed_cost_sum()
            .returning(|_, _, _| Ok(Some(1000)));

        // 24-hour interval, BIKE: earnings 1000*3, rating 50/24*2
        let meta = compute_meta(&store, &courier(CourierType::Bike), day(1), day(2))
            .await
            .unwrap();

        assert_eq!(meta.earnings, Some(3000));
        assert_eq!(meta.rating, Some(4));
    }

    #[tokio::test]
    async fn test_meta_rating_floors_to_zero_on_sparse_couriers() {
        let mut store = MockDispatchStore::new();
        store.expect_completed_count().returning(|_, _, _| Ok(5));
        store
            .expect_completed_cost_sum()
            .returning(|_, _, _| Ok(Some(100)));

        // 5 orders over 24h: 5/24 floors to 0 before the multiplier
        let meta = compute_meta(&store, &courier(CourierType::Foot), day(1), day(2))
            .await
            .unwrap();

        assert_eq!(meta.rating, Some(0));
        assert_eq!(meta.earnings, Some(200));
    }

    #[tokio::test]
    async fn test_meta_zero_length_interval_has_no_rating() {
        let mut store = MockDispatchStore::new();
        store.expect_completed_count().returning(|_, _, _| Ok(3));
        store
            .expect_completed_cost_sum()
            .returning(|_, _, _| Ok(Some(500)));

        let meta = compute_meta(&store, &courier(CourierType::Auto), day(1), day(1))
            .await
            .unwrap();

        assert_eq!(meta.rating, None);
        assert_eq!(meta.earnings, Some(2000));
    }

    #[tokio::test]
    async fn test_meta_rejects_inverted_interval() {
        let store = MockDispatchStore::new();

        let err = compute_meta(&store, &courier(CourierType::Foot), day(2), day(1))
            .await
            .unwrap_err();

        assert!(matches!(err, CoreError::Invalid(_)));
    }

    #[test]
    fn test_validate_courier() {
        let base = CreateCourier {
            courier_type: "BIKE".to_string(),
            regions: vec![1, 2],
            working_hours: vec!["09:00-18:00".to_string()],
        };
        assert!(validate_courier(&base).is_ok());

        let mut bad_type = base.clone();
        bad_type.courier_type = "TRUCK".to_string();
        assert!(validate_courier(&bad_type).is_err());

        let mut no_regions = base.clone();
        no_regions.regions.clear();
        assert!(validate_courier(&no_regions).is_err());

        let mut bad_interval = base.clone();
        bad_interval.working_hours = vec!["9am-6pm".to_string()];
        assert!(validate_courier(&bad_interval).is_err());
    }
}
