//! Courier HTTP Handlers

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use tracing::info;

use crate::di::AppState;
use crate::domain::error::CoreError;
use crate::infrastructure::http::dto::{
    AssignmentsResponse, CourierDto, CourierMetaResponse, CouriersPageResponse,
    CreateCouriersRequest, CreateCouriersResponse,
};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::{parse_date, parse_id, PageParams};
use crate::usecases::couriers;
use crate::usecases::couriers::CreateCourier;

pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateCouriersRequest>,
) -> Result<Json<CreateCouriersResponse>, ApiError> {
    info!(count = request.couriers.len(), "create couriers request");

    let to_create = request
        .couriers
        .into_iter()
        .map(|c| CreateCourier {
            courier_type: c.courier_type,
            regions: c.regions,
            working_hours: c.working_hours,
        })
        .collect();

    let created = couriers::create_couriers(&state.db, to_create).await?;

    Ok(Json(CreateCouriersResponse {
        couriers: created.iter().map(CourierDto::from).collect(),
    }))
}

pub async fn list(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PageParams>,
) -> Result<Json<CouriersPageResponse>, ApiError> {
    let (offset, limit) = params.validated()?;

    let page = couriers::couriers_page(&state.db, offset, limit).await?;

    Ok(Json(CouriersPageResponse {
        couriers: page.iter().map(CourierDto::from).collect(),
        offset,
        limit,
    }))
}

pub async fn get_by_id(
    State(state): State<Arc<AppState>>,
    Path(courier_id): Path<String>,
) -> Result<Json<CourierDto>, ApiError> {
    let id = parse_id(&courier_id, "courier_id")?;

    let courier = couriers::courier_by_id(&state.db, id).await?;

    Ok(Json(CourierDto::from(&courier)))
}

#[derive(Debug, Deserialize)]
pub struct MetaParams {
    #[serde(rename = "startDate")]
    start_date: Option<String>,
    #[serde(rename = "endDate")]
    end_date: Option<String>,
}

pub async fn meta(
    State(state): State<Arc<AppState>>,
    Path(courier_id): Path<String>,
    Query(params): Query<MetaParams>,
) -> Result<Json<CourierMetaResponse>, ApiError> {
    let id = parse_id(&courier_id, "courier_id")?;

    let start_date = required_date(params.start_date.as_deref(), "startDate")?;
    let end_date = required_date(params.end_date.as_deref(), "endDate")?;

    let (courier, meta) = couriers::courier_meta(&state.db, id, start_date, end_date).await?;

    Ok(Json(CourierMetaResponse::new(&courier, meta)))
}

fn required_date(value: Option<&str>, name: &str) -> Result<NaiveDate, ApiError> {
    let value = value.ok_or_else(|| CoreError::invalid(format!("{name} is required")))?;
    Ok(parse_date(value, name)?)
}

#[derive(Debug, Deserialize)]
pub struct AssignmentsParams {
    date: Option<String>,
    courier_id: Option<String>,
}

pub async fn assignments(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AssignmentsParams>,
) -> Result<Json<Vec<AssignmentsResponse>>, ApiError> {
    let date = match params.date.as_deref() {
        Some(raw) => parse_date(raw, "date")?,
        None => Utc::now().date_naive(),
    };
    let courier_id = params
        .courier_id
        .as_deref()
        .map(|raw| parse_id(raw, "courier_id"))
        .transpose()?;

    let assigned = couriers::assignments_on_date(&state.db, date, courier_id).await?;

    Ok(Json(vec![AssignmentsResponse::new(date, &assigned)]))
}
