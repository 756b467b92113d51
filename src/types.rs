//! Core data types for rooftop-solar

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Accepted upload formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    /// JPEG / JFIF
    Jpeg,
    /// Portable Network Graphics
    Png,
}

const JPEG_MAGIC: [u8; 3] = [0xFF, 0xD8, 0xFF];
const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

impl ImageFormat {
    /// Returns the name of this format
    pub fn name(&self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "JPEG",
            ImageFormat::Png => "PNG",
        }
    }

    /// Detects the format from the leading magic bytes
    pub fn sniff(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(&PNG_MAGIC) {
            Some(ImageFormat::Png)
        } else if bytes.starts_with(&JPEG_MAGIC) {
            Some(ImageFormat::Jpeg)
        } else {
            None
        }
    }

    /// Maps a declared content type onto a format
    pub fn from_mime(mime: &mime::Mime) -> Option<Self> {
        if mime.type_() != mime::IMAGE {
            return None;
        }
        match mime.subtype().as_str() {
            "jpeg" | "jpg" | "pjpeg" => Some(ImageFormat::Jpeg),
            "png" => Some(ImageFormat::Png),
            _ => None,
        }
    }

    /// Maps a file extension (without the dot) onto a format
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Some(ImageFormat::Jpeg),
            "png" => Some(ImageFormat::Png),
            _ => None,
        }
    }
}

impl From<ImageFormat> for image::ImageFormat {
    fn from(format: ImageFormat) -> Self {
        match format {
            ImageFormat::Jpeg => image::ImageFormat::Jpeg,
            ImageFormat::Png => image::ImageFormat::Png,
        }
    }
}

/// Represents image dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Dimensions {
    /// Creates new dimensions
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Returns the total number of pixels
    pub fn pixel_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

/// Average daily sunlight hours, as picked on the 1.0..=12.0 slider in half-hour steps
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
pub struct SunlightHours(f64);

impl SunlightHours {
    pub const MIN: f64 = 1.0;
    pub const MAX: f64 = 12.0;
    pub const STEP: f64 = 0.5;
    pub const DEFAULT: f64 = 6.0;

    /// Validates a slider value
    pub fn new(hours: f64) -> Result<Self> {
        if !hours.is_finite() || hours < Self::MIN || hours > Self::MAX {
            return Err(Error::InvalidInput(format!(
                "sunlight hours must be between {} and {}, got {}",
                Self::MIN,
                Self::MAX,
                hours
            )));
        }
        if (hours / Self::STEP).fract() != 0.0 {
            return Err(Error::InvalidInput(format!(
                "sunlight hours must be a multiple of {}, got {}",
                Self::STEP,
                hours
            )));
        }
        Ok(Self(hours))
    }

    /// Parses slider text such as `"6.5"`
    pub fn parse(text: &str) -> Result<Self> {
        let hours: f64 = text
            .trim()
            .parse()
            .map_err(|_| Error::InvalidInput(format!("sunlight hours is not a number: {:?}", text)))?;
        Self::new(hours)
    }

    pub fn get(&self) -> f64 {
        self.0
    }
}

impl Default for SunlightHours {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}
