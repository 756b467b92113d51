//! Edge-based rooftop area estimation
//!
//! Grayscale conversion, Canny edges, border tracing, polygon filtering and a
//! fixed pixel-to-meter divisor. The result is an approximation: nothing here
//! looks at image resolution, camera altitude or ground-sample distance, and
//! nested borders are summed without de-duplication.

pub mod contours;

use image::{GrayImage, Luma, RgbImage};
use imageproc::edges::canny;
use log::debug;

use crate::config::EstimatorConfig;
use crate::types::Dimensions;

pub use contours::{contour_area, simplify_closed, sum_rooftop_pixels, ContourSummary};

/// Everything the estimator learned about one image
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AreaEstimate {
    pub dimensions: Dimensions,
    pub contours: ContourSummary,
    /// Usable area in square meters, rounded to two decimals
    pub area_m2: f64,
}

/// Converts RGB to luminance with BT.601 weights (0.299, 0.587, 0.114)
///
/// Uses 14-bit fixed point with rounding.
pub fn to_grayscale(image: &RgbImage) -> GrayImage {
    const R: u32 = 4899;
    const G: u32 = 9617;
    const B: u32 = 1868;
    const HALF: u32 = 1 << 13;

    GrayImage::from_fn(image.width(), image.height(), |x, y| {
        let [r, g, b] = image.get_pixel(x, y).0;
        let luma = (r as u32 * R + g as u32 * G + b as u32 * B + HALF) >> 14;
        Luma([luma as u8])
    })
}

/// Rounds half away from zero to two decimal places
pub fn round_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Estimates usable rooftop area from a single image
#[derive(Debug, Clone, Default)]
pub struct AreaEstimator {
    config: EstimatorConfig,
}

impl AreaEstimator {
    pub fn new(config: EstimatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    /// Binary Canny edge mask (255 on edges)
    pub fn edge_mask(&self, gray: &GrayImage) -> GrayImage {
        if gray.width() == 0 || gray.height() == 0 {
            return GrayImage::new(gray.width(), gray.height());
        }
        canny(gray, self.config.canny_low, self.config.canny_high)
    }

    /// Runs the full estimator and keeps the intermediate counts
    pub fn measure(&self, image: &RgbImage) -> AreaEstimate {
        let dimensions = Dimensions::new(image.width(), image.height());
        if dimensions.pixel_count() == 0 {
            return AreaEstimate {
                dimensions,
                contours: ContourSummary::default(),
                area_m2: 0.0,
            };
        }

        let gray = to_grayscale(image);
        let edges = self.edge_mask(&gray);
        let contours = sum_rooftop_pixels(&edges, &self.config);

        let area_m2 = round_hundredths(contours.pixel_area / self.config.pixels_per_square_meter);

        debug!(
            "estimated {:.2} m² from {}x{} image",
            area_m2, dimensions.width, dimensions.height
        );

        AreaEstimate {
            dimensions,
            contours,
            area_m2,
        }
    }

    /// Usable area in square meters (never negative)
    pub fn estimate_area(&self, image: &RgbImage) -> f64 {
        self.measure(image).area_m2
    }
}
