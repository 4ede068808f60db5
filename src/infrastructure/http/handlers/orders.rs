//! Order HTTP Handlers

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use tracing::info;

use crate::di::AppState;
use crate::infrastructure::http::dto::{
    AssignmentsResponse, CompleteOrdersRequest, CreateOrdersRequest, CreateOrdersResponse,
    OrderDto,
};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::{parse_date, parse_id, PageParams};
use crate::usecases::orders;
use crate::usecases::orders::{CompleteOrder, CreateOrder};
use crate::usecases::assign;

pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateOrdersRequest>,
) -> Result<Json<CreateOrdersResponse>, ApiError> {
    info!(count = request.orders.len(), "create orders request");

    let to_create = request
        .orders
        .into_iter()
        .map(|o| CreateOrder {
            weight: o.weight,
            regions: o.regions,
            delivery_hours: o.delivery_hours,
            cost: o.cost,
        })
        .collect();

    let created = orders::create_orders(&state.db, to_create).await?;

    Ok(Json(CreateOrdersResponse {
        orders: created.iter().map(OrderDto::from).collect(),
    }))
}

pub async fn list(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PageParams>,
) -> Result<Json<Vec<OrderDto>>, ApiError> {
    let (offset, limit) = params.validated()?;

    let page = orders::orders_page(&state.db, offset, limit).await?;

    Ok(Json(page.iter().map(OrderDto::from).collect()))
}

pub async fn get_by_id(
    State(state): State<Arc<AppState>>,
    Path(order_id): Path<String>,
) -> Result<Json<OrderDto>, ApiError> {
    let id = parse_id(&order_id, "order_id")?;

    let order = orders::order_by_id(&state.db, id).await?;

    Ok(Json(OrderDto::from(&order)))
}

pub async fn complete(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CompleteOrdersRequest>,
) -> Result<Json<Vec<OrderDto>>, ApiError> {
    info!(count = request.complete_info.len(), "complete orders request");

    let entries = request
        .complete_info
        .into_iter()
        .map(|e| CompleteOrder {
            courier_id: e.courier_id,
            order_id: e.order_id,
            complete_time: e.complete_time,
        })
        .collect();

    let completed = orders::complete_orders(&state.db, entries).await?;

    Ok(Json(completed.iter().map(OrderDto::from).collect()))
}

#[derive(Debug, Deserialize)]
pub struct AssignParams {
    date: Option<String>,
}

pub async fn assign(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AssignParams>,
) -> Result<Json<Vec<AssignmentsResponse>>, ApiError> {
    let date = match params.date.as_deref() {
        Some(raw) => parse_date(raw, "date")?,
        None => Utc::now().date_naive(),
    };

    let report = assign::assign_by_date(&state.db, date).await?;

    Ok(Json(vec![AssignmentsResponse::from(&report)]))
}
