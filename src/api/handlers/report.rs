use axum::{extract::State, Json};

use crate::error::Result;
use crate::models::ConsumptionReport;
use crate::services::DeviceService;

/// GET /api/v1/report
/// Monthly consumption, cost, forecast and saving suggestions for all devices
pub async fn get_report(State(service): State<DeviceService>) -> Result<Json<ConsumptionReport>> {
    let report = service.report().await?;
    Ok(Json(report))
}
