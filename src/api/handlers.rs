use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use axum::extract::multipart::Multipart;
use log::warn;
use std::sync::Arc;
use std::time::Instant;

use crate::{AnalysisConfig, Error, RooftopAnalyzer};
use crate::ingest::decode_image_with_format;
use crate::report::{SolarReport, DISCLAIMER, UPLOAD_PROMPT};
use crate::types::{ImageFormat, SunlightHours};
use super::models::*;

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, error: impl ToString) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: error.to_string(),
        }),
    )
}

fn error_status(error: &Error) -> StatusCode {
    match error {
        Error::InvalidInput(_) => StatusCode::BAD_REQUEST,
        Error::UnsupportedFormat(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        Error::EmptyImage | Error::Decode(_) => StatusCode::UNPROCESSABLE_ENTITY,
        Error::Io(_) | Error::InvalidConfig(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<Error> for (StatusCode, Json<ErrorResponse>) {
    fn from(error: Error) -> Self {
        api_error(error_status(&error), error)
    }
}

/// Rejects a declared content type that is neither JPEG, PNG nor opaque bytes
fn check_declared_type(content_type: Option<&str>) -> Result<(), Error> {
    let Some(declared) = content_type.and_then(|c| c.parse::<mime::Mime>().ok()) else {
        return Ok(());
    };
    if declared == mime::APPLICATION_OCTET_STREAM || ImageFormat::from_mime(&declared).is_some() {
        return Ok(());
    }
    Err(Error::UnsupportedFormat(format!("declared content type {}", declared)))
}

pub async fn analyze_upload(
    State(analyzer): State<Arc<RooftopAnalyzer>>,
    mut multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let start = Instant::now();

    let mut image_data: Option<Vec<u8>> = None;
    let mut location = String::new();
    let mut sunlight = SunlightHours::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| api_error(StatusCode::BAD_REQUEST, format!("Malformed multipart body: {}", e)))?
    {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "image" => {
                let has_file_name = field.file_name().is_some_and(|n| !n.is_empty());
                check_declared_type(field.content_type())?;
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| api_error(StatusCode::BAD_REQUEST, format!("Failed to read image: {}", e)))?;

                // Browsers send an empty, unnamed part when no file was picked.
                if has_file_name || !bytes.is_empty() {
                    image_data = Some(bytes.to_vec());
                }
            }
            "location" => {
                location = field
                    .text()
                    .await
                    .map_err(|e| api_error(StatusCode::BAD_REQUEST, format!("Failed to read location: {}", e)))?;
            }
            "sunlight_hours" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| api_error(StatusCode::BAD_REQUEST, format!("Failed to read sunlight_hours: {}", e)))?;
                sunlight = SunlightHours::parse(&text)?;
            }
            _ => {}
        }
    }

    let Some(image_data) = image_data else {
        return Ok(Json(AnalyzeResponse::AwaitingImage {
            message: UPLOAD_PROMPT.to_string(),
        }));
    };

    let (format, image) = decode_image_with_format(&image_data).map_err(|e| {
        warn!("rejected upload of {} bytes: {}", image_data.len(), e);
        ApiError::from(e)
    })?;

    let (estimate, result) = analyzer.analyze_detailed(&image, sunlight.get());
    let report = SolarReport {
        location: location.clone(),
        result,
    };

    let execution_time_ms = start.elapsed().as_secs_f64() * 1000.0;

    Ok(Json(AnalyzeResponse::Complete(CompleteResponse::new(
        location,
        sunlight.get(),
        &result,
        ImageSummary::new(format, &estimate),
        report.to_string(),
        DISCLAIMER.to_string(),
        execution_time_ms,
    ))))
}

pub async fn get_config(State(analyzer): State<Arc<RooftopAnalyzer>>) -> Json<AnalysisConfig> {
    Json(analyzer.config().clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::create_router;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request};
    use image::{DynamicImage, Rgb, RgbImage};
    use std::io::Cursor;
    use tower::ServiceExt;

    const BOUNDARY: &str = "rooftop-boundary";

    enum Part<'a> {
        Text(&'a str, &'a str),
        File(&'a str, &'a str, &'a str, &'a [u8]),
    }

    fn multipart_body(parts: &[Part]) -> Vec<u8> {
        let mut body = Vec::new();
        for part in parts {
            body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
            match part {
                Part::Text(name, value) => {
                    body.extend_from_slice(
                        format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n", name, value)
                            .as_bytes(),
                    );
                }
                Part::File(name, file_name, content_type, data) => {
                    body.extend_from_slice(
                        format!(
                            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                            name, file_name, content_type
                        )
                        .as_bytes(),
                    );
                    body.extend_from_slice(data);
                    body.extend_from_slice(b"\r\n");
                }
            }
        }
        body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
        body
    }

    async fn post_analyze(parts: &[Part<'_>]) -> (StatusCode, serde_json::Value) {
        let app = create_router(RooftopAnalyzer::default());
        let request = Request::builder()
            .method("POST")
            .uri("/api/analyze")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .body(Body::from(multipart_body(parts)))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn blank_png() -> Vec<u8> {
        let img = RgbImage::from_pixel(48, 32, Rgb([100, 140, 90]));
        let mut buf = Vec::new();
        DynamicImage::ImageRgb8(img)
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .unwrap();
        buf
    }

    #[tokio::test]
    async fn test_no_image_prompts_for_upload() {
        let (status, json) = post_analyze(&[Part::Text("location", "Cairo, Egypt")]).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "awaiting_image");
        assert_eq!(json["message"], UPLOAD_PROMPT);
    }

    #[tokio::test]
    async fn test_empty_file_part_counts_as_missing() {
        let (status, json) = post_analyze(&[Part::File("image", "", "application/octet-stream", b"")]).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "awaiting_image");
    }

    #[tokio::test]
    async fn test_blank_roof_completes() {
        let png = blank_png();
        let (status, json) = post_analyze(&[
            Part::Text("location", "Cairo, Egypt"),
            Part::Text("sunlight_hours", "9.5"),
            Part::File("image", "roof.png", "image/png", &png),
        ])
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "complete");
        assert_eq!(json["location"], "Cairo, Egypt");
        assert_eq!(json["sunlight_hours"], 9.5);
        assert_eq!(json["usable_area_m2"], 0.0);
        assert!(json["payback_period_years"].is_null());
        assert_eq!(json["image"]["format"], "png");
        assert_eq!(json["image"]["dimensions"]["width"], 48);
        assert!(json["report"].as_str().unwrap().contains("Location: Cairo, Egypt"));
        assert_eq!(json["disclaimer"], DISCLAIMER);
    }

    #[tokio::test]
    async fn test_sunlight_out_of_range() {
        let png = blank_png();
        let (status, json) = post_analyze(&[
            Part::Text("sunlight_hours", "14"),
            Part::File("image", "roof.png", "image/png", &png),
        ])
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].as_str().unwrap().contains("sunlight"));
    }

    #[tokio::test]
    async fn test_non_image_upload() {
        let (status, _) = post_analyze(&[Part::File("image", "notes.txt", "text/plain", b"hello")]).await;
        assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }

    #[tokio::test]
    async fn test_corrupt_png() {
        let png = blank_png();
        let (status, json) = post_analyze(&[Part::File("image", "roof.png", "image/png", &png[..24])]).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(json["error"].as_str().unwrap().starts_with("Failed to decode image"));
    }

    #[tokio::test]
    async fn test_zero_byte_named_upload() {
        let (status, _) = post_analyze(&[Part::File("image", "roof.jpg", "image/jpeg", b"")]).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_config_endpoint() {
        let app = create_router(RooftopAnalyzer::default());
        let request = Request::builder()
            .uri("/api/config")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["economics"]["cost_per_watt"], 1.2);
        assert_eq!(json["estimator"]["min_vertices"], 4);
    }
}
