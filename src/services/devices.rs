use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::models::{ConsumptionReport, Device, DeviceInput, DeviceQueryParams};
use crate::repositories::DeviceStore;
use crate::services::report;

#[derive(Clone)]
pub struct DeviceService {
    store: Arc<dyn DeviceStore>,
    default_cost_per_kwh: f64,
}

impl DeviceService {
    pub fn new(store: Arc<dyn DeviceStore>, default_cost_per_kwh: f64) -> Self {
        Self {
            store,
            default_cost_per_kwh,
        }
    }

    pub async fn list(&self, params: DeviceQueryParams) -> Result<Vec<Device>> {
        let search = params.search_term().map(str::to_string);
        self.store.list(search).await
    }

    pub async fn get(&self, id: i64) -> Result<Device> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    pub async fn create(&self, input: DeviceInput) -> Result<Device> {
        let new_device = input.validate(self.default_cost_per_kwh)?;
        let device = self.store.create(&new_device).await?;
        tracing::info!(device_id = device.id, name = %device.name, "device created");
        Ok(device)
    }

    pub async fn replace(&self, id: i64, input: DeviceInput) -> Result<Device> {
        let new_device = input.validate(self.default_cost_per_kwh)?;
        let device = self
            .store
            .replace(id, &new_device)
            .await?
            .ok_or_else(|| not_found(id))?;
        tracing::info!(device_id = device.id, "device updated");
        Ok(device)
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        if !self.store.delete(id).await? {
            return Err(not_found(id));
        }
        tracing::info!(device_id = id, "device deleted");
        Ok(())
    }

    pub async fn report(&self) -> Result<ConsumptionReport> {
        let devices = self.store.list(None).await?;
        Ok(report::build_report(&devices))
    }

    pub async fn health_check(&self) -> Result<(bool, bool)> {
        self.store.health_check().await
    }
}

fn not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Device {} not found", id))
}
