//! Wire DTOs
//!
//! JSON shapes of the HTTP API. Times of day travel as `HH:MM`
//! (intervals as `HH:MM-HH:MM`), dates as `YYYY-MM-DD`, instants as
//! RFC 3339, identifiers as unsigned 64-bit JSON numbers.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::model::courier::{Courier, WorkingInterval};
use crate::domain::model::order::{DeliveryWindow, Order};
use crate::usecases::assign::{AssignmentReport, CourierAssignments, GroupAssignments};
use crate::usecases::couriers::CourierMeta;

fn format_interval(start: NaiveTime, end: NaiveTime) -> String {
    format!("{}-{}", start.format("%H:%M"), end.format("%H:%M"))
}

// === Couriers ===

#[derive(Debug, Serialize, Deserialize)]
pub struct CourierDto {
    pub courier_id: u64,
    pub courier_type: String,
    pub regions: Vec<i32>,
    pub working_hours: Vec<String>,
}

impl From<&Courier> for CourierDto {
    fn from(courier: &Courier) -> Self {
        CourierDto {
            courier_id: courier.id,
            courier_type: courier.courier_type.to_string(),
            regions: courier.regions.clone(),
            working_hours: courier
                .working_hours
                .iter()
                .map(|&WorkingInterval { start, end, .. }| format_interval(start, end))
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateCourierDto {
    pub courier_type: String,
    pub regions: Vec<i32>,
    pub working_hours: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateCouriersRequest {
    pub couriers: Vec<CreateCourierDto>,
}

#[derive(Debug, Serialize)]
pub struct CreateCouriersResponse {
    pub couriers: Vec<CourierDto>,
}

#[derive(Debug, Serialize)]
pub struct CouriersPageResponse {
    pub couriers: Vec<CourierDto>,
    pub offset: u64,
    pub limit: u64,
}

#[derive(Debug, Serialize)]
pub struct CourierMetaResponse {
    #[serde(flatten)]
    pub courier: CourierDto,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub earnings: Option<i32>,
}

impl CourierMetaResponse {
    pub fn new(courier: &Courier, meta: CourierMeta) -> Self {
        CourierMetaResponse {
            courier: courier.into(),
            rating: meta.rating,
            earnings: meta.earnings,
        }
    }
}

// === Orders ===

#[derive(Debug, Serialize, Deserialize)]
pub struct OrderDto {
    pub order_id: u64,
    pub weight: f64,
    pub regions: i32,
    pub delivery_hours: Vec<String>,
    pub cost: u32,
    pub completed_time: Option<DateTime<Utc>>,
}

impl From<&Order> for OrderDto {
    fn from(order: &Order) -> Self {
        OrderDto {
            order_id: order.id,
            weight: order.weight,
            regions: order.region,
            delivery_hours: order
                .delivery_hours
                .iter()
                .map(|&DeliveryWindow { start, end, .. }| format_interval(start, end))
                .collect(),
            cost: order.cost,
            completed_time: order.completed_time,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateOrderDto {
    pub weight: f64,
    pub regions: i32,
    pub delivery_hours: Vec<String>,
    pub cost: u32,
}

#[derive(Debug, Deserialize)]
pub struct CreateOrdersRequest {
    pub orders: Vec<CreateOrderDto>,
}

#[derive(Debug, Serialize)]
pub struct CreateOrdersResponse {
    pub orders: Vec<OrderDto>,
}

#[derive(Debug, Deserialize)]
pub struct CompleteOrderDto {
    pub courier_id: u64,
    pub order_id: u64,
    pub complete_time: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CompleteOrdersRequest {
    pub complete_info: Vec<CompleteOrderDto>,
}

// === Assignments ===

#[derive(Debug, Serialize)]
pub struct GroupAssignmentsDto {
    pub group_order_id: u64,
    pub orders: Vec<OrderDto>,
}

impl From<&GroupAssignments> for GroupAssignmentsDto {
    fn from(group: &GroupAssignments) -> Self {
        GroupAssignmentsDto {
            group_order_id: group.group_id,
            orders: group.orders.iter().map(OrderDto::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CourierAssignmentsDto {
    pub courier_id: u64,
    pub orders: Vec<GroupAssignmentsDto>,
}

impl From<&CourierAssignments> for CourierAssignmentsDto {
    fn from(courier: &CourierAssignments) -> Self {
        CourierAssignmentsDto {
            courier_id: courier.courier_id,
            orders: courier.groups.iter().map(GroupAssignmentsDto::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AssignmentsResponse {
    pub date: NaiveDate,
    pub couriers: Vec<CourierAssignmentsDto>,
}

impl AssignmentsResponse {
    pub fn new(date: NaiveDate, couriers: &[CourierAssignments]) -> Self {
        AssignmentsResponse {
            date,
            couriers: couriers.iter().map(CourierAssignmentsDto::from).collect(),
        }
    }
}

impl From<&AssignmentReport> for AssignmentsResponse {
    fn from(report: &AssignmentReport) -> Self {
        AssignmentsResponse::new(report.date, &report.couriers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::courier::CourierType;

    #[test]
    fn test_courier_dto_formats_intervals() {
        let courier = Courier {
            id: 3,
            courier_type: CourierType::Auto,
            regions: vec![1, 2],
            working_hours: vec![WorkingInterval {
                id: 1,
                start: NaiveTime::from_hms_opt(8, 5, 0).unwrap(),
                end: NaiveTime::from_hms_opt(17, 30, 0).unwrap(),
            }],
        };

        let dto = CourierDto::from(&courier);
        assert_eq!(dto.courier_type, "AUTO");
        assert_eq!(dto.working_hours, vec!["08:05-17:30".to_string()]);
    }

    #[test]
    fn test_meta_response_omits_absent_fields() {
        let courier = Courier {
            id: 3,
            courier_type: CourierType::Foot,
            regions: vec![1],
            working_hours: Vec::new(),
        };

        let empty = CourierMetaResponse::new(&courier, CourierMeta::default());
        let json = serde_json::to_value(&empty).unwrap();
        assert!(json.get("rating").is_none());
        assert!(json.get("earnings").is_none());
        assert_eq!(json["courier_id"], 3);

        let full = CourierMetaResponse::new(
            &courier,
            CourierMeta {
                rating: Some(2),
                earnings: Some(400),
            },
        );
        let json = serde_json::to_value(&full).unwrap();
        assert_eq!(json["rating"], 2);
        assert_eq!(json["earnings"], 400);
    }
}
