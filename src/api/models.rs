use serde::Serialize;

use crate::analysis::AnalysisResult;
use crate::estimation::AreaEstimate;
use crate::types::{Dimensions, ImageFormat};

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AnalyzeResponse {
    Complete(CompleteResponse),
    AwaitingImage { message: String },
}

#[derive(Debug, Serialize)]
pub struct CompleteResponse {
    pub location: String,
    pub sunlight_hours: f64,
    pub usable_area_m2: f64,
    pub daily_kwh: f64,
    pub yearly_kwh: f64,
    pub usable_watt_capacity: f64,
    pub installation_cost_usd: f64,
    pub annual_savings_usd: f64,
    /// `None` when the payback period is infinite
    pub payback_period_years: Option<f64>,
    pub image: ImageSummary,
    pub report: String,
    pub disclaimer: String,
    pub execution_time_ms: f64,
}

impl CompleteResponse {
    pub fn new(
        location: String,
        sunlight_hours: f64,
        result: &AnalysisResult,
        image: ImageSummary,
        report: String,
        disclaimer: String,
        execution_time_ms: f64,
    ) -> Self {
        Self {
            location,
            sunlight_hours,
            usable_area_m2: result.usable_area_m2,
            daily_kwh: result.daily_kwh,
            yearly_kwh: result.yearly_kwh,
            usable_watt_capacity: result.usable_watt_capacity,
            installation_cost_usd: result.installation_cost_usd,
            annual_savings_usd: result.annual_savings_usd,
            payback_period_years: Some(result.payback_period_years).filter(|p| p.is_finite()),
            image,
            report,
            disclaimer,
            execution_time_ms,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ImageSummary {
    pub format: ImageFormat,
    pub dimensions: Dimensions,
    pub contours_found: usize,
    pub contours_counted: usize,
}

impl ImageSummary {
    pub fn new(format: ImageFormat, estimate: &AreaEstimate) -> Self {
        Self {
            format,
            dimensions: estimate.dimensions,
            contours_found: estimate.contours.total,
            contours_counted: estimate.contours.qualifying,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
