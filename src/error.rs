//! Error types for rooftop-solar

use std::fmt;
use std::io;

/// Result type for rooftop-solar operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while ingesting and analysing a rooftop image
#[derive(Debug)]
pub enum Error {
    /// I/O error
    Io(io::Error),

    /// Uploaded image contained no bytes
    EmptyImage,

    /// Image is not a JPEG or PNG
    UnsupportedFormat(String),

    /// Image bytes could not be decoded
    Decode(String),

    /// Request input outside its accepted range
    InvalidInput(String),

    /// Configuration rejected by validation or parsing
    InvalidConfig(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O error: {}", e),
            Error::EmptyImage => write!(f, "Empty image: no bytes were uploaded"),
            Error::UnsupportedFormat(msg) => write!(f, "Unsupported image format: {}", msg),
            Error::Decode(msg) => write!(f, "Failed to decode image: {}", msg),
            Error::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            Error::InvalidConfig(msg) => write!(f, "Invalid configuration: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(error: io::Error) -> Self {
        Error::Io(error)
    }
}

impl From<image::ImageError> for Error {
    fn from(error: image::ImageError) -> Self {
        match error {
            image::ImageError::Unsupported(e) => Error::UnsupportedFormat(e.to_string()),
            other => Error::Decode(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Decode("truncated".to_string());
        assert_eq!(err.to_string(), "Failed to decode image: truncated");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_image_error_conversion() {
        use image::error::{
            DecodingError, ImageFormatHint, UnsupportedError, UnsupportedErrorKind,
        };

        let decoding = image::ImageError::Decoding(DecodingError::new(
            ImageFormatHint::Exact(image::ImageFormat::Png),
            "bad chunk",
        ));
        let err: Error = decoding.into();
        assert!(matches!(err, Error::Decode(_)));

        let unsupported = image::ImageError::Unsupported(UnsupportedError::from_format_and_kind(
            ImageFormatHint::Unknown,
            UnsupportedErrorKind::GenericFeature("interlacing".to_string()),
        ));
        let err: Error = unsupported.into();
        assert!(matches!(err, Error::UnsupportedFormat(_)));
    }

    #[test]
    fn test_empty_image() {
        let err = Error::EmptyImage;
        assert!(err.to_string().contains("no bytes"));
    }

    #[test]
    fn test_invalid_config_has_no_source() {
        let err = Error::InvalidConfig("canny_low > canny_high".to_string());
        assert!(err.to_string().contains("canny_low > canny_high"));
        assert!(std::error::Error::source(&err).is_none());
    }
}
