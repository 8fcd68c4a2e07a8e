use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::Result,
    models::{Device, DeviceInput, DeviceListResponse, DeviceQueryParams},
    services::DeviceService,
};

/// GET /api/v1/devices
/// Returns all devices, optionally filtered with `?search=`
pub async fn list_devices(
    State(service): State<DeviceService>,
    Query(params): Query<DeviceQueryParams>,
) -> Result<Json<DeviceListResponse>> {
    let devices = service.list(params).await?;

    Ok(Json(DeviceListResponse { devices }))
}

/// GET /api/v1/devices/:id
pub async fn get_device(
    State(service): State<DeviceService>,
    Path(id): Path<i64>,
) -> Result<Json<Device>> {
    let device = service.get(id).await?;

    Ok(Json(device))
}

/// POST /api/v1/devices
pub async fn create_device(
    State(service): State<DeviceService>,
    Json(input): Json<DeviceInput>,
) -> Result<(StatusCode, Json<Device>)> {
    let device = service.create(input).await?;

    Ok((StatusCode::CREATED, Json(device)))
}

/// PUT /api/v1/devices/:id
/// Replaces the whole record; omitted optional fields fall back to their defaults
pub async fn replace_device(
    State(service): State<DeviceService>,
    Path(id): Path<i64>,
    Json(input): Json<DeviceInput>,
) -> Result<Json<Device>> {
    let device = service.replace(id, input).await?;

    Ok(Json(device))
}

/// DELETE /api/v1/devices/:id
pub async fn delete_device(
    State(service): State<DeviceService>,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    service.delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
