//! Installation cost, savings and payback period

use serde::Serialize;

use crate::config::EconomicsConfig;

/// Financial projection in USD
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RoiFigures {
    pub installation_cost_usd: f64,
    pub annual_savings_usd: f64,
    /// `f64::INFINITY` when savings are exactly zero
    pub payback_period_years: f64,
}

pub fn calculate_roi(yearly_kwh: f64, usable_watt_capacity: f64, economics: &EconomicsConfig) -> RoiFigures {
    let installation_cost_usd = usable_watt_capacity * economics.cost_per_watt;
    let annual_savings_usd = yearly_kwh * economics.cost_per_kwh;
    let payback_period_years = if annual_savings_usd != 0.0 {
        installation_cost_usd / annual_savings_usd
    } else {
        f64::INFINITY
    };

    RoiFigures {
        installation_cost_usd,
        annual_savings_usd,
        payback_period_years,
    }
}
