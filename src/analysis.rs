//! Request handling: one image in, one immutable result out

use image::RgbImage;
use log::info;
use serde::Serialize;

use crate::config::AnalysisConfig;
use crate::energy::{calculate_solar_output, SolarOutput};
use crate::error::Result;
use crate::estimation::{AreaEstimate, AreaEstimator};
use crate::report::{Report, SolarReport};
use crate::roi::{calculate_roi, RoiFigures};

/// Figures produced by one analysis run
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub usable_area_m2: f64,
    pub daily_kwh: f64,
    pub yearly_kwh: f64,
    pub usable_watt_capacity: f64,
    pub installation_cost_usd: f64,
    pub annual_savings_usd: f64,
    /// Infinite when annual savings are exactly zero
    pub payback_period_years: f64,
}

impl AnalysisResult {
    /// Runs the output and ROI projections for a known area
    pub fn project(area_m2: f64, sunlight_hours: f64, config: &AnalysisConfig) -> Self {
        let output = calculate_solar_output(area_m2, sunlight_hours, &config.panel);
        let roi = calculate_roi(output.yearly_kwh, output.usable_watt_capacity, &config.economics);
        Self::from_parts(area_m2, output, roi)
    }

    pub fn from_parts(usable_area_m2: f64, output: SolarOutput, roi: RoiFigures) -> Self {
        Self {
            usable_area_m2,
            daily_kwh: output.daily_kwh,
            yearly_kwh: output.yearly_kwh,
            usable_watt_capacity: output.usable_watt_capacity,
            installation_cost_usd: roi.installation_cost_usd,
            annual_savings_usd: roi.annual_savings_usd,
            payback_period_years: roi.payback_period_years,
        }
    }
}

/// Inputs gathered from the upload form
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub image: Option<RgbImage>,
    /// Free text, shown back verbatim
    pub location: String,
    pub sunlight_hours: f64,
}

/// Estimator plus projections under one configuration
#[derive(Debug, Clone)]
pub struct RooftopAnalyzer {
    config: AnalysisConfig,
    estimator: AreaEstimator,
}

impl RooftopAnalyzer {
    /// Creates an analyzer after validating `config`
    pub fn new(config: AnalysisConfig) -> Result<Self> {
        config.validate()?;
        let estimator = AreaEstimator::new(config.estimator.clone());
        Ok(Self { config, estimator })
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Area estimate with contour counts, without the projections
    pub fn measure(&self, image: &RgbImage) -> AreaEstimate {
        self.estimator.measure(image)
    }

    pub fn analyze(&self, image: &RgbImage, sunlight_hours: f64) -> AnalysisResult {
        self.analyze_detailed(image, sunlight_hours).1
    }

    /// Like [`analyze`](Self::analyze) but also returns the estimator details
    pub fn analyze_detailed(&self, image: &RgbImage, sunlight_hours: f64) -> (AreaEstimate, AnalysisResult) {
        let estimate = self.estimator.measure(image);
        let result = AnalysisResult::project(estimate.area_m2, sunlight_hours, &self.config);

        info!(
            "analysis complete: {:.2} m², {:.2} kWh/day, payback {:.1} years",
            result.usable_area_m2, result.daily_kwh, result.payback_period_years
        );

        (estimate, result)
    }

    /// Handles one form submission; without an image nothing is computed
    pub fn handle(&self, request: AnalysisRequest) -> Report {
        match request.image {
            Some(image) => {
                let result = self.analyze(&image, request.sunlight_hours);
                Report::Complete(SolarReport {
                    location: request.location,
                    result,
                })
            }
            None => Report::AwaitingImage,
        }
    }
}

impl Default for RooftopAnalyzer {
    fn default() -> Self {
        let config = AnalysisConfig::default();
        let estimator = AreaEstimator::new(config.estimator.clone());
        Self { config, estimator }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use image::Rgb;

    #[test]
    fn test_project_reference_scenario() {
        let result = AnalysisResult::project(10.0, 6.0, &AnalysisConfig::default());
        assert_eq!(result.usable_area_m2, 10.0);
        assert!((result.usable_watt_capacity - 1530.0).abs() < 1e-9);
        assert!((result.daily_kwh - 9.18).abs() < 1e-9);
        assert!((result.yearly_kwh - 3350.7).abs() < 1e-9);
        assert!((result.installation_cost_usd - 1836.0).abs() < 1e-9);
        assert!((result.annual_savings_usd - 502.605).abs() < 1e-9);
        assert!((result.payback_period_years - 3.653).abs() < 1e-3);
    }

    #[test]
    fn test_project_zero_area() {
        let result = AnalysisResult::project(0.0, 6.0, &AnalysisConfig::default());
        assert_eq!(result.usable_watt_capacity, 0.0);
        assert_eq!(result.daily_kwh, 0.0);
        assert_eq!(result.yearly_kwh, 0.0);
        assert_eq!(result.installation_cost_usd, 0.0);
        assert_eq!(result.annual_savings_usd, 0.0);
        assert!(result.payback_period_years.is_infinite());
        assert!(result.payback_period_years > 0.0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = AnalysisConfig::default();
        config.estimator.approx_epsilon_ratio = 0.0;
        assert!(matches!(RooftopAnalyzer::new(config), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_handle_without_image() {
        let analyzer = RooftopAnalyzer::default();
        let report = analyzer.handle(AnalysisRequest {
            image: None,
            location: "Lisbon, Portugal".to_string(),
            sunlight_hours: 6.0,
        });
        assert_eq!(report, Report::AwaitingImage);
    }

    #[test]
    fn test_handle_blank_image() {
        let analyzer = RooftopAnalyzer::default();
        let report = analyzer.handle(AnalysisRequest {
            image: Some(RgbImage::from_pixel(64, 64, Rgb([120, 120, 120]))),
            location: "Lisbon, Portugal".to_string(),
            sunlight_hours: 8.5,
        });

        match report {
            Report::Complete(solar) => {
                assert_eq!(solar.location, "Lisbon, Portugal");
                assert_eq!(solar.result.usable_area_m2, 0.0);
                assert_eq!(solar.result.payback_period_years, f64::INFINITY);
            }
            Report::AwaitingImage => panic!("expected a completed report"),
        }
    }

    #[test]
    fn test_zero_sized_image_yields_zero_area() {
        let analyzer = RooftopAnalyzer::default();
        let result = analyzer.analyze(&RgbImage::new(0, 0), 6.0);
        assert_eq!(result.usable_area_m2, 0.0);
        assert_eq!(result.payback_period_years, f64::INFINITY);
    }

    #[test]
    fn test_higher_tariff_shortens_payback() {
        let mut config = AnalysisConfig::default();
        let base = AnalysisResult::project(20.0, 5.0, &config);
        config.economics.cost_per_kwh = 0.30;
        let pricier = AnalysisResult::project(20.0, 5.0, &config);
        assert!(pricier.payback_period_years < base.payback_period_years);
    }
}
