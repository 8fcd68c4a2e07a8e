use serde::{Deserialize, Serialize};

/// Monthly consumption and cost figures for the current device list.
///
/// kWh and money figures are rounded to 2 decimals, percentages to 1 decimal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsumptionReport {
    pub device_count: usize,
    pub total_kwh: f64,
    pub total_cost: f64,
    pub average_daily_kwh: f64,
    pub forecast_kwh: f64,
    pub forecast_cost: f64,
    /// Name of the device with the highest daily draw, `null` when there are no devices
    pub top_device: Option<String>,
    pub suggestions: Vec<Suggestion>,
    pub devices: Vec<DeviceConsumption>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceConsumption {
    pub id: i64,
    pub name: String,
    pub quantity: i32,
    pub monthly_kwh: f64,
    pub monthly_cost: f64,
    pub percentage_share: f64,
}

/// Saving from cutting a heavily used device's daily usage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub device_name: String,
    pub monthly_saving: f64,
    pub message: String,
}
