use log::info;
use std::path::Path;

use rooftop_solar::api::create_router;
use rooftop_solar::{load_config, AnalysisConfig, RooftopAnalyzer};

const DEFAULT_ADDR: &str = "0.0.0.0:3000";

#[tokio::main]
async fn main() -> rooftop_solar::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::var("ROOFTOP_SOLAR_CONFIG") {
        Ok(path) => {
            info!("loading configuration from {}", path);
            load_config(Path::new(&path))?
        }
        Err(_) => AnalysisConfig::default(),
    };
    let analyzer = RooftopAnalyzer::new(config)?;
    let app = create_router(analyzer);

    let addr = std::env::var("ROOFTOP_SOLAR_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("Rooftop solar API listening on http://{}", addr);
    info!("  POST /api/analyze (multipart/form-data: image + location + sunlight_hours)");
    info!("  GET  /api/config");

    axum::serve(listener, app).await?;

    Ok(())
}
