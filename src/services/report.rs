use crate::models::{ConsumptionReport, Device, DeviceConsumption, Suggestion};

/// Fixed month length used for all monthly figures; not calendar-aware.
pub const DAYS_PER_MONTH: f64 = 30.0;
/// Flat projected growth applied to the current month.
pub const FORECAST_GROWTH: f64 = 1.10;
/// Devices used for more hours than this per day get a saving suggestion.
pub const SUGGESTION_MIN_HOURS: f64 = 6.0;
/// Daily hours a suggestion proposes to cut.
pub const SUGGESTION_HOURS_CUT: f64 = 2.0;
pub const MAX_SUGGESTIONS: usize = 4;

pub fn monthly_kwh(device: &Device) -> f64 {
    (device.power_watts / 1000.0)
        * device.hours_per_day
        * DAYS_PER_MONTH
        * f64::from(device.quantity)
}

pub fn monthly_cost(device: &Device) -> f64 {
    monthly_kwh(device) * device.cost_per_kwh
}

/// Monthly saving from running `device` [`SUGGESTION_HOURS_CUT`] hours less per day.
pub fn monthly_saving(device: &Device) -> f64 {
    (device.power_watts / 1000.0)
        * SUGGESTION_HOURS_CUT
        * DAYS_PER_MONTH
        * f64::from(device.quantity)
        * device.cost_per_kwh
}

fn daily_draw(device: &Device) -> f64 {
    device.power_watts * device.hours_per_day * f64::from(device.quantity)
}

/// First device with the highest power x hours x quantity.
pub fn top_device(devices: &[Device]) -> Option<&Device> {
    let mut top: Option<&Device> = None;
    for device in devices {
        match top {
            Some(current) if daily_draw(device) <= daily_draw(current) => {}
            _ => top = Some(device),
        }
    }
    top
}

pub fn suggestions(devices: &[Device]) -> Vec<Suggestion> {
    devices
        .iter()
        .filter(|d| d.hours_per_day > SUGGESTION_MIN_HOURS)
        .take(MAX_SUGGESTIONS)
        .map(|d| {
            let saving = round2(monthly_saving(d));
            Suggestion {
                device_name: d.name.clone(),
                monthly_saving: saving,
                message: format!(
                    "Reduce {} by {}h/day to save {:.2} per month",
                    d.name, SUGGESTION_HOURS_CUT, saving
                ),
            }
        })
        .collect()
}

/// Build the consumption report for a snapshot of devices.
///
/// Sums are accumulated unrounded; rounding happens only on the returned values.
pub fn build_report(devices: &[Device]) -> ConsumptionReport {
    let per_device: Vec<(f64, f64)> = devices
        .iter()
        .map(|d| (monthly_kwh(d), monthly_cost(d)))
        .collect();

    let total_kwh: f64 = per_device.iter().map(|(kwh, _)| kwh).sum();
    let total_cost: f64 = per_device.iter().map(|(_, cost)| cost).sum();

    let breakdown = devices
        .iter()
        .zip(&per_device)
        .map(|(d, &(kwh, cost))| DeviceConsumption {
            id: d.id,
            name: d.name.clone(),
            quantity: d.quantity,
            monthly_kwh: round2(kwh),
            monthly_cost: round2(cost),
            percentage_share: round1(share(kwh, total_kwh)),
        })
        .collect();

    ConsumptionReport {
        device_count: devices.len(),
        total_kwh: round2(total_kwh),
        total_cost: round2(total_cost),
        average_daily_kwh: round2(total_kwh / DAYS_PER_MONTH),
        forecast_kwh: round2(total_kwh * FORECAST_GROWTH),
        forecast_cost: round2(total_cost * FORECAST_GROWTH),
        top_device: top_device(devices).map(|d| d.name.clone()),
        suggestions: suggestions(devices),
        devices: breakdown,
    }
}

fn share(kwh: f64, total_kwh: f64) -> f64 {
    if total_kwh == 0.0 {
        0.0
    } else {
        kwh / total_kwh * 100.0
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    fn device(id: i64, name: &str, power_watts: f64, hours_per_day: f64) -> Device {
        Device {
            id,
            name: name.to_string(),
            power_watts,
            hours_per_day,
            quantity: 1,
            cost_per_kwh: 1.13,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {} to be within 1e-9 of {}",
            actual,
            expected
        );
    }

    #[test]
    fn test_empty_device_list() {
        let report = build_report(&[]);

        assert_eq!(report.device_count, 0);
        assert_eq!(report.total_kwh, 0.0);
        assert_eq!(report.total_cost, 0.0);
        assert_eq!(report.average_daily_kwh, 0.0);
        assert_eq!(report.forecast_kwh, 0.0);
        assert_eq!(report.forecast_cost, 0.0);
        assert_eq!(report.top_device, None);
        assert!(report.suggestions.is_empty());
        assert!(report.devices.is_empty());
    }

    #[test]
    fn test_single_device_scenario() {
        let d = device(1, "Heater", 100.0, 10.0);

        assert_close(monthly_kwh(&d), 30.0);
        assert_close(monthly_cost(&d), 33.9);
        assert_close(monthly_saving(&d), 6.78);

        let report = build_report(&[d]);
        assert_eq!(report.total_kwh, 30.0);
        assert_eq!(report.total_cost, 33.9);
        assert_eq!(report.average_daily_kwh, 1.0);
        assert_eq!(report.forecast_kwh, 33.0);
        assert_eq!(report.forecast_cost, 37.29);
        assert_eq!(report.top_device.as_deref(), Some("Heater"));
        assert_eq!(report.suggestions.len(), 1);
        assert_eq!(report.suggestions[0].device_name, "Heater");
        assert_eq!(report.suggestions[0].monthly_saving, 6.78);
        assert!(report.suggestions[0].message.contains("Heater"));
        assert!(report.suggestions[0].message.contains("6.78"));
        assert_eq!(report.devices[0].percentage_share, 100.0);
    }

    #[test]
    fn test_quantity_multiplies_consumption() {
        let mut d = device(1, "Bulb", 10.0, 5.0);
        d.quantity = 4;

        assert_close(monthly_kwh(&d), 6.0);
        assert_close(monthly_saving(&d), 0.01 * 2.0 * 30.0 * 4.0 * 1.13);
    }

    #[test]
    fn test_per_device_tariff() {
        let mut cheap = device(1, "A", 1000.0, 1.0);
        cheap.cost_per_kwh = 0.5;
        let mut pricey = device(2, "B", 1000.0, 1.0);
        pricey.cost_per_kwh = 2.0;

        let report = build_report(&[cheap, pricey]);
        assert_eq!(report.total_kwh, 60.0);
        assert_eq!(report.total_cost, 75.0);
        assert_eq!(report.devices[0].monthly_cost, 15.0);
        assert_eq!(report.devices[1].monthly_cost, 60.0);
    }

    #[test]
    fn test_total_is_sum_of_device_consumption() {
        let devices = vec![
            device(1, "Fridge", 150.0, 24.0),
            device(2, "TV", 90.0, 4.5),
            device(3, "Shower", 5500.0, 0.5),
            device(4, "Router", 12.0, 24.0),
        ];

        let expected: f64 = devices.iter().map(monthly_kwh).sum();
        let report = build_report(&devices);

        assert_eq!(report.total_kwh, round2(expected));
        assert_eq!(report.device_count, 4);
    }

    #[test]
    fn test_forecast_is_ten_percent_growth() {
        let devices = vec![device(1, "Fridge", 150.0, 24.0), device(2, "TV", 90.0, 4.5)];
        let total: f64 = devices.iter().map(monthly_kwh).sum();

        assert_close(total * FORECAST_GROWTH, total * 1.10);
        let report = build_report(&devices);
        assert_eq!(report.forecast_kwh, round2(total * 1.10));
    }

    #[test]
    fn test_shares_sum_to_one_hundred() {
        let devices = vec![
            device(1, "Fridge", 150.0, 24.0),
            device(2, "TV", 90.0, 4.5),
            device(3, "Shower", 5500.0, 0.5),
        ];

        let report = build_report(&devices);
        let sum: f64 = report.devices.iter().map(|d| d.percentage_share).sum();

        assert!(
            (sum - 100.0).abs() <= 0.05 * devices.len() as f64,
            "shares summed to {}",
            sum
        );
    }

    #[test]
    fn test_zero_consumption_has_zero_shares() {
        let devices = vec![device(1, "Off", 0.0, 5.0), device(2, "Idle", 100.0, 0.0)];

        let report = build_report(&devices);

        assert_eq!(report.total_kwh, 0.0);
        assert!(report.devices.iter().all(|d| d.percentage_share == 0.0));
    }

    #[test]
    fn test_top_device_prefers_highest_draw() {
        let devices = vec![device(1, "Kettle", 1000.0, 1.0), device(2, "Clock", 10.0, 1.0)];

        assert_eq!(top_device(&devices).map(|d| d.id), Some(1));
    }

    #[test]
    fn test_top_device_tie_goes_to_first() {
        let devices = vec![
            device(1, "Left", 100.0, 2.0),
            device(2, "Right", 200.0, 1.0),
        ];

        assert_eq!(top_device(&devices).map(|d| d.name.as_str()), Some("Left"));
    }

    #[test]
    fn test_top_device_counts_quantity() {
        let single = device(1, "Heater", 2000.0, 1.0);
        let mut many = device(2, "Bulbs", 60.0, 5.0);
        many.quantity = 10;

        assert_eq!(top_device(&[single, many]).map(|d| d.id), Some(2));
    }

    #[test]
    fn test_no_suggestions_for_light_usage() {
        let devices = vec![device(1, "TV", 90.0, 4.0), device(2, "Lamp", 60.0, 6.0)];

        assert!(suggestions(&devices).is_empty());
    }

    #[test]
    fn test_suggestions_capped_at_four_in_input_order() {
        let devices: Vec<Device> = (1..=6)
            .map(|i| device(i, &format!("Device {}", i), 100.0 * i as f64, 8.0))
            .collect();

        let result = suggestions(&devices);

        assert_eq!(result.len(), MAX_SUGGESTIONS);
        let names: Vec<&str> = result.iter().map(|s| s.device_name.as_str()).collect();
        assert_eq!(names, vec!["Device 1", "Device 2", "Device 3", "Device 4"]);
    }

    #[test]
    fn test_suggestions_skip_light_devices() {
        let devices = vec![
            device(1, "Lamp", 60.0, 3.0),
            device(2, "Fridge", 150.0, 24.0),
            device(3, "TV", 90.0, 6.5),
        ];

        let names: Vec<String> = suggestions(&devices)
            .into_iter()
            .map(|s| s.device_name)
            .collect();
        assert_eq!(names, vec!["Fridge".to_string(), "TV".to_string()]);
    }

    #[test]
    fn test_totals_sum_unrounded_device_figures() {
        let devices: Vec<Device> = (1..=4).map(|i| device(i, "Standby", 0.1, 1.0)).collect();

        let report = build_report(&devices);

        assert!(report.devices.iter().all(|d| d.monthly_kwh == 0.0));
        assert_eq!(report.total_kwh, 0.01);
        assert!(report.devices.iter().all(|d| d.percentage_share == 25.0));
    }

    #[test]
    fn test_report_rounds_to_output_precision() {
        let devices = vec![device(1, "Odd", 33.333, 7.77), device(2, "Even", 10.0, 1.0)];

        let report = build_report(&devices);

        // 33.333 W * 7.77 h * 30 = 7.76992... kWh
        assert_eq!(report.devices[0].monthly_kwh, 7.77);
        assert_eq!(report.devices[0].percentage_share, 96.3);
        assert_eq!(report.devices[1].percentage_share, 3.7);
        assert_eq!(report.total_kwh, 8.07);
    }

    #[test]
    fn test_report_serializes_canonical_fields() {
        let report = build_report(&[device(1, "Heater", 100.0, 10.0)]);
        let json = serde_json::to_value(&report).unwrap();

        for key in [
            "device_count",
            "total_kwh",
            "total_cost",
            "average_daily_kwh",
            "forecast_kwh",
            "forecast_cost",
            "top_device",
            "suggestions",
            "devices",
        ] {
            assert!(json.get(key).is_some(), "missing key {}", key);
        }
        assert_eq!(json["devices"][0]["monthly_kwh"], 30.0);
    }

    #[test]
    fn test_largest_accepted_devices_stay_finite() {
        use crate::models::device::{
            MAX_COST_PER_KWH, MAX_HOURS_PER_DAY, MAX_POWER_WATTS, MAX_QUANTITY,
        };

        let devices: Vec<Device> = (1..=1000)
            .map(|i| {
                let mut d = device(i, "Furnace", MAX_POWER_WATTS, MAX_HOURS_PER_DAY);
                d.quantity = MAX_QUANTITY;
                d.cost_per_kwh = MAX_COST_PER_KWH;
                d
            })
            .collect();

        let report = build_report(&devices);

        assert!(report.total_kwh.is_finite());
        assert!(report.total_cost.is_finite());
        assert!(report.forecast_cost.is_finite());
        assert!(report.suggestions.iter().all(|s| s.monthly_saving.is_finite()));

        let json = serde_json::to_string(&report).unwrap();
        let parsed: ConsumptionReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.device_count, 1000);
    }
}
