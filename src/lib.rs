//! rooftop-solar - Solar potential of a rooftop from a single image
//!
//! rooftop-solar estimates usable roof area from an aerial or satellite photo
//! with edge detection, then projects energy output, installation cost,
//! savings and payback period from configurable panel and price assumptions.
//!
//! # Examples
//!
//! ## Analysing an image file
//!
//! ```no_run
//! use rooftop_solar::{open_image, RooftopAnalyzer};
//!
//! let analyzer = RooftopAnalyzer::default();
//! let image = open_image("roof.jpg")?;
//! let result = analyzer.analyze(&image, 6.0);
//!
//! println!("Usable area: {} m²", result.usable_area_m2);
//! println!("Payback: {:.1} years", result.payback_period_years);
//! # Ok::<(), rooftop_solar::Error>(())
//! ```
//!
//! ## Projections for a known area
//!
//! ```
//! use rooftop_solar::{AnalysisConfig, AnalysisResult};
//!
//! let result = AnalysisResult::project(10.0, 6.0, &AnalysisConfig::default());
//! assert!((result.usable_watt_capacity - 1530.0).abs() < 1e-9);
//! assert!((result.installation_cost_usd - 1836.0).abs() < 1e-9);
//! ```

pub mod error;
pub mod types;
pub mod config;
pub mod ingest;
pub mod estimation;
pub mod energy;
pub mod roi;
pub mod analysis;
pub mod report;
pub mod api;

pub use error::{Error, Result};
pub use types::{Dimensions, ImageFormat, SunlightHours};
pub use config::{load_config, AnalysisConfig, EconomicsConfig, EstimatorConfig, PanelConfig};
pub use ingest::{decode_image, open_image};
pub use estimation::{AreaEstimate, AreaEstimator};
pub use energy::{calculate_solar_output, SolarOutput};
pub use roi::{calculate_roi, RoiFigures};
pub use analysis::{AnalysisRequest, AnalysisResult, RooftopAnalyzer};
pub use report::{Report, SolarReport, DISCLAIMER, UPLOAD_PROMPT};
