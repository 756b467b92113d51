//! Human-readable report text

use std::fmt;

use crate::analysis::AnalysisResult;

/// Shown instead of a report when no image was supplied
pub const UPLOAD_PROMPT: &str = "Please upload a rooftop satellite image to begin analysis.";

/// Static caveat printed under every report
pub const DISCLAIMER: &str =
    "Note: This is a basic edge-based approximation. For production, use ML segmentation models.";

/// A completed analysis together with the location it was requested for
#[derive(Debug, Clone, PartialEq)]
pub struct SolarReport {
    pub location: String,
    pub result: AnalysisResult,
}

/// Outcome of one form submission
#[derive(Debug, Clone, PartialEq)]
pub enum Report {
    /// No image uploaded yet
    AwaitingImage,
    Complete(SolarReport),
}

impl fmt::Display for SolarReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = &self.result;
        writeln!(f, "Solar Installation Report")?;
        writeln!(f, "Location: {}", self.location)?;
        // Already rounded; shown as the shortest float text ("10.0", "16.12").
        writeln!(f, "Usable Rooftop Area: {:?} m²", r.usable_area_m2)?;
        writeln!(f, "Estimated Daily Output: {:.2} kWh", r.daily_kwh)?;
        writeln!(f, "Estimated Yearly Output: {:.2} kWh", r.yearly_kwh)?;
        writeln!(f, "Estimated Annual Savings: ${:.2}", r.annual_savings_usd)?;
        writeln!(f, "Estimated Installation Cost: ${:.2}", r.installation_cost_usd)?;
        writeln!(f, "Payback Period: {:.1} years", r.payback_period_years)?;
        write!(f, "{}", DISCLAIMER)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Report::AwaitingImage => write!(f, "{}", UPLOAD_PROMPT),
            Report::Complete(report) => write!(f, "{}", report),
        }
    }
}
