use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::error::{AppError, Result};

pub const DEFAULT_QUANTITY: i32 = 1;
pub const MAX_HOURS_PER_DAY: f64 = 24.0;
/// 1 MW. Together with the other upper bounds this keeps every report figure finite.
pub const MAX_POWER_WATTS: f64 = 1_000_000.0;
pub const MAX_QUANTITY: i32 = 10_000;
pub const MAX_COST_PER_KWH: f64 = 1_000.0;

/// A registered household appliance as stored in the `devices` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Device {
    pub id: i64,
    pub name: String,
    pub power_watts: f64,
    pub hours_per_day: f64,
    pub quantity: i32,
    pub cost_per_kwh: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for POST and PUT. Optional fields get their defaults in [`DeviceInput::validate`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceInput {
    pub name: String,
    pub power_watts: f64,
    pub hours_per_day: f64,
    #[serde(default)]
    pub quantity: Option<i32>,
    #[serde(default)]
    pub cost_per_kwh: Option<f64>,
}

/// A validated device with all defaults resolved, ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct NewDevice {
    pub name: String,
    pub power_watts: f64,
    pub hours_per_day: f64,
    pub quantity: i32,
    pub cost_per_kwh: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeviceQueryParams {
    /// Case-insensitive substring match on the device name
    pub search: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeviceListResponse {
    pub devices: Vec<Device>,
}

impl DeviceInput {
    pub fn validate(self, default_cost_per_kwh: f64) -> Result<NewDevice> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::Validation("name must not be empty".to_string()));
        }

        if !(0.0..=MAX_POWER_WATTS).contains(&self.power_watts) {
            return Err(AppError::Validation(format!(
                "power_watts must be between 0 and {}",
                MAX_POWER_WATTS
            )));
        }

        if !(0.0..=MAX_HOURS_PER_DAY).contains(&self.hours_per_day) {
            return Err(AppError::Validation(
                "hours_per_day must be between 0 and 24".to_string(),
            ));
        }

        let quantity = self.quantity.unwrap_or(DEFAULT_QUANTITY);
        if !(1..=MAX_QUANTITY).contains(&quantity) {
            return Err(AppError::Validation(format!(
                "quantity must be between 1 and {}",
                MAX_QUANTITY
            )));
        }

        let cost_per_kwh = self.cost_per_kwh.unwrap_or(default_cost_per_kwh);
        if !(0.0..=MAX_COST_PER_KWH).contains(&cost_per_kwh) {
            return Err(AppError::Validation(format!(
                "cost_per_kwh must be between 0 and {}",
                MAX_COST_PER_KWH
            )));
        }

        Ok(NewDevice {
            name,
            power_watts: self.power_watts,
            hours_per_day: self.hours_per_day,
            quantity,
            cost_per_kwh,
        })
    }
}

impl DeviceQueryParams {
    /// The search term, or `None` when absent or blank
    pub fn search_term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}
