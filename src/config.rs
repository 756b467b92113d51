//! Calibration constants for the estimator and the projections
//!
//! Every number the analysis depends on lives here so it can be swapped out
//! from a JSON file or in tests. The defaults reproduce the figures of the
//! original rooftop assessment tool.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// Full configuration for one [`RooftopAnalyzer`](crate::RooftopAnalyzer)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub estimator: EstimatorConfig,
    pub panel: PanelConfig,
    pub economics: EconomicsConfig,
}

/// Edge and contour parameters for the area estimator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    /// Canny low hysteresis threshold.
    pub canny_low: f32,
    /// Canny high hysteresis threshold.
    pub canny_high: f32,
    /// Polygon simplification tolerance as a fraction of the closed contour perimeter.
    pub approx_epsilon_ratio: f64,
    /// Minimum vertex count of the simplified polygon for a contour to count as a roof segment.
    pub min_vertices: usize,
    /// Contours must enclose strictly more than this many square pixels.
    pub min_contour_area_px: f64,
    /// Divisor turning summed square pixels into square meters.
    ///
    /// This is a fixed calibration guess. It ignores image resolution,
    /// camera altitude and ground-sample distance.
    pub pixels_per_square_meter: f64,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            canny_low: 100.0,
            canny_high: 200.0,
            approx_epsilon_ratio: 0.02,
            min_vertices: 4,
            min_contour_area_px: 1000.0,
            pixels_per_square_meter: 1000.0,
        }
    }
}

/// Photovoltaic panel assumptions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    /// Fraction of incident power converted by the panel.
    pub efficiency: f64,
    /// Fraction retained after shading, wiring and inverter losses.
    pub system_loss_factor: f64,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            efficiency: 0.18,
            system_loss_factor: 0.85,
        }
    }
}

/// Prices in USD
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EconomicsConfig {
    pub cost_per_watt: f64,
    pub cost_per_kwh: f64,
}

impl Default for EconomicsConfig {
    fn default() -> Self {
        Self {
            cost_per_watt: 1.2,
            cost_per_kwh: 0.15,
        }
    }
}

impl AnalysisConfig {
    /// Rejects configurations the estimator or calculators cannot run with
    pub fn validate(&self) -> Result<()> {
        let est = &self.estimator;
        if !(est.canny_low.is_finite() && est.canny_low > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "canny_low must be positive, got {}",
                est.canny_low
            )));
        }
        if !est.canny_high.is_finite() {
            return Err(Error::InvalidConfig("canny_high must be finite".to_string()));
        }
        if est.canny_low > est.canny_high {
            return Err(Error::InvalidConfig(format!(
                "canny_low ({}) > canny_high ({})",
                est.canny_low, est.canny_high
            )));
        }
        if !(est.approx_epsilon_ratio.is_finite() && est.approx_epsilon_ratio > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "approx_epsilon_ratio must be positive, got {}",
                est.approx_epsilon_ratio
            )));
        }
        if !(est.pixels_per_square_meter.is_finite() && est.pixels_per_square_meter > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "pixels_per_square_meter must be positive, got {}",
                est.pixels_per_square_meter
            )));
        }

        let non_negative = [
            ("min_contour_area_px", est.min_contour_area_px),
            ("panel.efficiency", self.panel.efficiency),
            ("panel.system_loss_factor", self.panel.system_loss_factor),
            ("economics.cost_per_watt", self.economics.cost_per_watt),
            ("economics.cost_per_kwh", self.economics.cost_per_kwh),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }

        Ok(())
    }
}

/// Loads and validates a JSON configuration file
///
/// Missing sections and fields keep their defaults.
pub fn load_config(path: &Path) -> Result<AnalysisConfig> {
    let data = fs::read_to_string(path)?;
    let config: AnalysisConfig = serde_json::from_str(&data).map_err(|e| {
        Error::InvalidConfig(format!("failed to parse {}: {}", path.display(), e))
    })?;
    config.validate()?;
    Ok(config)
}
