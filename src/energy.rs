//! Energy output projection from usable area and sunlight hours

use serde::Serialize;

use crate::config::PanelConfig;

/// Projected generation for one rooftop
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SolarOutput {
    pub daily_kwh: f64,
    pub yearly_kwh: f64,
    pub usable_watt_capacity: f64,
}

/// Watts per square meter of standard test irradiance
pub const IRRADIANCE_W_PER_M2: f64 = 1000.0;

pub const DAYS_PER_YEAR: f64 = 365.0;

/// Projects daily and yearly output
///
/// Inputs are not range-checked; a negative area yields negative output.
pub fn calculate_solar_output(area_m2: f64, sunlight_hours: f64, panel: &PanelConfig) -> SolarOutput {
    let usable_watt_capacity =
        area_m2 * IRRADIANCE_W_PER_M2 * panel.efficiency * panel.system_loss_factor;
    let daily_kwh = (usable_watt_capacity / 1000.0) * sunlight_hours;
    let yearly_kwh = daily_kwh * DAYS_PER_YEAR;

    SolarOutput {
        daily_kwh,
        yearly_kwh,
        usable_watt_capacity,
    }
}
