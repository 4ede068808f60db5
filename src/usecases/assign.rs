//! Order Assignment By Date
//!
//! Walks every courier shift on the given date and greedily batches
//! unassigned orders into delivery groups. Courier types are processed
//! in fixed priority (FOOT, BIKE, AUTO) so the smallest-capacity
//! couriers claim low-weight orders first.
//!
//! The whole run executes inside one database transaction; candidate
//! selection locks rows with skip-locked semantics, so concurrent runs
//! partition the order set instead of deadlocking.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use sea_orm::{DatabaseConnection, TransactionTrait};
use tracing::{debug, info};

use crate::domain::error::CoreError;
use crate::domain::model::batch::BatchState;
use crate::domain::model::courier::{Shift, COURIER_TYPE_PRIORITY};
use crate::domain::model::order::Order;
use crate::domain::ports::{CandidateQuery, CompletionRecord, DispatchStore, GroupKey};
use crate::infrastructure::repository::PgStore;

/// Orders assigned to one delivery group, in assignment order
#[derive(Debug, Clone, PartialEq)]
pub struct GroupAssignments {
    pub group_id: u64,
    pub orders: Vec<Order>,
}

/// All groups assigned to one courier in this run
#[derive(Debug, Clone, PartialEq)]
pub struct CourierAssignments {
    pub courier_id: u64,
    pub groups: Vec<GroupAssignments>,
}

/// Result of one `assign_by_date` call
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentReport {
    pub date: NaiveDate,
    pub couriers: Vec<CourierAssignments>,
}

/// Per-call result aggregator. Allocated fresh for every assignment
/// run; nothing about it outlives the call.
#[derive(Debug, Default)]
struct ReportBuilder {
    couriers: BTreeMap<u64, BTreeMap<u64, Vec<Order>>>,
}

impl ReportBuilder {
    fn record(&mut self, courier_id: u64, group_id: u64, order: Order) {
        self.couriers
            .entry(courier_id)
            .or_default()
            .entry(group_id)
            .or_default()
            .push(order);
    }

    fn build(self, date: NaiveDate) -> AssignmentReport {
        let couriers = self
            .couriers
            .into_iter()
            .map(|(courier_id, groups)| CourierAssignments {
                courier_id,
                groups: groups
                    .into_iter()
                    .map(|(group_id, orders)| GroupAssignments { group_id, orders })
                    .collect(),
            })
            .collect();

        AssignmentReport { date, couriers }
    }
}

/// Assign unassigned orders to couriers for `date`.
///
/// All-or-nothing: any failure rolls the transaction back and no
/// partial assignment becomes visible.
pub async fn assign_by_date(
    db: &DatabaseConnection,
    date: NaiveDate,
) -> Result<AssignmentReport, CoreError> {
    let tx = db
        .begin()
        .await
        .map_err(|e| CoreError::internal(e.to_string()))?;

    let report = run_assignment(&PgStore::new(&tx), date).await?;

    tx.commit()
        .await
        .map_err(|e| CoreError::internal(e.to_string()))?;

    info!(
        date = %date,
        couriers = report.couriers.len(),
        "assignment finished"
    );

    Ok(report)
}

/// Drive the assignment against any store. Separated from the
/// transaction wrapper so the algorithm is testable in isolation.
pub(crate) async fn run_assignment<S: DispatchStore + ?Sized>(
    store: &S,
    date: NaiveDate,
) -> Result<AssignmentReport, CoreError> {
    let mut report = ReportBuilder::default();

    for courier_type in COURIER_TYPE_PRIORITY {
        let shifts = store.shifts_by_type(courier_type).await?;
        debug!(courier_type = %courier_type, shifts = shifts.len(), "walking shifts");

        for shift in &shifts {
            walk_shift(store, shift, date, &mut report).await?;
        }
    }

    Ok(report.build(date))
}

/// Run the batching state machine over one (courier, interval) pair.
async fn walk_shift<S: DispatchStore + ?Sized>(
    store: &S,
    shift: &Shift,
    date: NaiveDate,
    report: &mut ReportBuilder,
) -> Result<(), CoreError> {
    let mut state = BatchState::new(shift, date);

    loop {
        if state.needs_flush() {
            if let Some(group) = state.flush() {
                store.update_group(&group).await?;
            }
        }

        if state.out_of_time() {
            break;
        }

        let mut candidate = next_candidate(store, &state).await?;

        if candidate.is_none() && state.is_on_the_way() {
            // nothing left in the current region: close the batch and
            // search across all of the courier's regions once more
            if let Some(group) = state.flush() {
                store.update_group(&group).await?;
            }
            candidate = next_candidate(store, &state).await?;
        }

        let Some(order) = candidate else { break };

        // a gap-phase window can open too close to the end of the
        // shift; the delivery must still finish inside it
        if !state.fits(&order)? {
            break;
        }

        let placement = state.add_order(&order)?;

        if let Some((start, end)) = placement.new_group_window {
            let group = store
                .get_or_create_group(&GroupKey {
                    courier_id: shift.courier_id,
                    working_hours_id: shift.working_hours_id,
                    assign_date: date,
                    start_date_time: start,
                    end_date_time: end,
                })
                .await?;
            state.bind_group(group);
        }

        let group_id = state
            .group()
            .map(|g| g.id)
            .ok_or_else(|| CoreError::internal("batch state lost its delivery group"))?;

        let record = CompletionRecord {
            delivery_group_id: group_id,
            cost: placement.cost,
            completed_time: placement.completed_time,
        };
        store.mark_completed(order.id, &record).await?;

        let mut assigned = order;
        assigned.cost = record.cost;
        assigned.completed_time = Some(record.completed_time);
        assigned.delivery_group_id = Some(group_id);
        report.record(shift.courier_id, group_id, assigned);
    }

    // the shift may end mid-batch; persist the group's final end
    if let Some(group) = state.flush() {
        store.update_group(&group).await?;
    }

    Ok(())
}

/// Two-phase candidate search for the current batch state.
///
/// The first phase wants a window already open at the cursor; when the
/// batch is one order short of full it takes the heaviest fit to top
/// up the load, otherwise the lightest. The gap phase accepts the
/// lightest order whose window opens later (the courier waits).
async fn next_candidate<S: DispatchStore + ?Sized>(
    store: &S,
    state: &BatchState,
) -> Result<Option<Order>, CoreError> {
    let regions = if state.is_on_the_way() {
        vec![state.current_region()]
    } else {
        state.available_regions().to_vec()
    };

    let query = CandidateQuery {
        max_weight: state.available_weight(),
        regions,
        cursor: state.cursor().time(),
        heaviest_first: state.is_on_the_way() && state.next_will_be_last(),
        with_gap: false,
    };

    if let Some(order) = store.pick_candidate(&query).await? {
        return Ok(Some(order));
    }

    store
        .pick_candidate(&CandidateQuery {
            heaviest_first: false,
            with_gap: true,
            ..query
        })
        .await
        .map_err(CoreError::from)
}
