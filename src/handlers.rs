//! The four admin request handlers.
//!
//! Each handler resolves the `modelName` query parameter against the
//! registry, performs exactly one logical operation through the resolved
//! [`crate::ModelOps`], and serialises the outcome to JSON. Validation
//! failures, missing records, conflicts, and database errors all flow out
//! as [`ApiError`].

use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use hyper::HeaderMap;
use serde_json::Value;

use crate::catalog;
use crate::errors::ApiError;
use crate::models::{AdminParams, ListResponse};
use crate::pagination::{PageWindow, content_range_header};
use crate::registry::AdminState;

fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::bad_request(format!("id must be numeric, got '{raw}'")))
}

/// Reduce an optional JSON body to its payload object, if any.
///
/// Requests without a JSON content type arrive as `None`; an explicit JSON
/// `null` counts as absent too.
fn payload_object(body: Option<Json<Value>>) -> Result<Option<Value>, ApiError> {
    match body {
        None => Ok(None),
        Some(Json(Value::Null)) => Ok(None),
        Some(Json(value)) if value.is_object() => Ok(Some(value)),
        Some(_) => Err(ApiError::bad_request("request body must be a JSON object")),
    }
}

/// List tables, read one record, or read a page.
///
/// Without `modelName` this lists the table names of the primary schema
/// (`page`/`limit` are ignored in that mode). With `modelName` and `id` it
/// reads one record; with `modelName` alone it serves a page plus the total
/// count, ordered by primary key.
#[utoipa::path(
    get,
    path = "/",
    params(AdminParams),
    responses(
        (status = 200, description = "Table names, a single record, or a page envelope", body = ListResponse),
        (status = 400, description = "Unknown model or non-numeric id"),
        (status = 404, description = "No record with the given id"),
        (status = 500, description = "Database failure")
    )
)]
pub async fn get_handler(
    State(state): State<AdminState>,
    Query(params): Query<AdminParams>,
) -> Result<Response, ApiError> {
    let Some(model_name) = params.model_name else {
        let tables = catalog::table_names(state.db())
            .await
            .map_err(|err| ApiError::database("Failed to fetch data", err))?;
        return Ok(Json(tables).into_response());
    };

    let ops = state.registry().resolve(&model_name)?;

    if let Some(raw_id) = params.id {
        let id = parse_id(&raw_id)?;
        let record = ops.find_by_id(state.db(), id).await?;
        return Ok(Json(record).into_response());
    }

    let window = PageWindow::new(params.page, params.limit);
    let data = ops.find_page(state.db(), window.offset(), window.limit).await?;
    let total_count = ops.count(state.db()).await?;
    let headers: HeaderMap =
        content_range_header(window.offset(), window.limit, total_count, ops.model_name());
    let body = ListResponse {
        data,
        page: window.page,
        limit: window.limit,
        total_count,
    };
    Ok((headers, Json(body)).into_response())
}

/// Create a record and echo the submitted payload back.
#[utoipa::path(
    post,
    path = "/",
    params(AdminParams),
    responses(
        (status = 200, description = "The submitted payload, echoed back"),
        (status = 400, description = "Missing modelName, unknown model, or bad body"),
        (status = 409, description = "Unique-constraint violation"),
        (status = 500, description = "Database failure")
    )
)]
pub async fn create_handler(
    State(state): State<AdminState>,
    Query(params): Query<AdminParams>,
    body: Option<Json<Value>>,
) -> Result<Json<Value>, ApiError> {
    let Some(model_name) = params.model_name else {
        return Err(ApiError::bad_request("modelName is required"));
    };
    let ops = state.registry().resolve(&model_name)?;
    let Some(payload) = payload_object(body)? else {
        return Err(ApiError::bad_request("request body is required"));
    };

    let created = ops.create(state.db(), payload.clone()).await?;
    tracing::debug!(model = %model_name, record = %created, "record created");
    Ok(Json(payload))
}

/// Update a record in place and return it.
#[utoipa::path(
    patch,
    path = "/",
    params(AdminParams),
    responses(
        (status = 200, description = "The updated record"),
        (status = 400, description = "Missing id, modelName, or body"),
        (status = 404, description = "No record with the given id"),
        (status = 409, description = "Unique-constraint violation"),
        (status = 500, description = "Database failure")
    )
)]
pub async fn update_handler(
    State(state): State<AdminState>,
    Query(params): Query<AdminParams>,
    body: Option<Json<Value>>,
) -> Result<Json<Value>, ApiError> {
    let (Some(model_name), Some(raw_id), Some(payload)) =
        (params.model_name, params.id, payload_object(body)?)
    else {
        return Err(ApiError::bad_request("ID, modelName, and data are required"));
    };

    let ops = state.registry().resolve(&model_name)?;
    let id = parse_id(&raw_id)?;
    let updated = ops.update(state.db(), id, payload).await?;
    Ok(Json(updated))
}

/// Delete a record and return its prior content.
#[utoipa::path(
    delete,
    path = "/",
    params(AdminParams),
    responses(
        (status = 200, description = "The deleted record's prior content"),
        (status = 400, description = "Missing id or modelName"),
        (status = 404, description = "No record with the given id"),
        (status = 500, description = "Database failure")
    )
)]
pub async fn delete_handler(
    State(state): State<AdminState>,
    Query(params): Query<AdminParams>,
) -> Result<Json<Value>, ApiError> {
    let (Some(model_name), Some(raw_id)) = (params.model_name, params.id) else {
        return Err(ApiError::bad_request("ID and modelName are required"));
    };

    let ops = state.registry().resolve(&model_name)?;
    let id = parse_id(&raw_id)?;
    let deleted = ops.delete(state.db(), id).await?;
    Ok(Json(deleted))
}
