use rooftop_solar::{open_image, AnalysisRequest, Result, RooftopAnalyzer, SunlightHours};

const USAGE: &str = "usage: rooftop-solar [IMAGE] [LOCATION] [SUNLIGHT_HOURS]";

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let image_path = args.next();

    if matches!(image_path.as_deref(), Some("-h") | Some("--help")) {
        println!("{}", USAGE);
        return Ok(());
    }

    let location = args.next().unwrap_or_default();
    let sunlight = match args.next() {
        Some(text) => SunlightHours::parse(&text)?,
        None => SunlightHours::default(),
    };

    let image = match image_path {
        Some(path) => Some(open_image(&path)?),
        None => None,
    };

    let analyzer = RooftopAnalyzer::default();
    let report = analyzer.handle(AnalysisRequest {
        image,
        location,
        sunlight_hours: sunlight.get(),
    });

    println!("{}", report);

    Ok(())
}
