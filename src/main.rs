use clap::Parser;
use photo_analyzer::features::exif::extract_metadata;
use photo_analyzer::features::visual::DEFAULT_LUMINANCE_THRESHOLD;
use photo_analyzer::structs::AnalysisReport;
use photo_analyzer::{PhotoAnalyzer, PhotoAnalyzerError};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Analyze a photo: estimate when and where it was taken and cross-check
/// the estimate against weather, solar and edit-signature evidence.
#[derive(Parser, Debug)]
#[command(name = "photo-analyzer", version)]
struct Args {
    /// Path to the photo to analyze
    photo: PathBuf,

    /// Capture time used when the EXIF block has none, as YYYY:MM:DD HH:MM:SS
    #[arg(long)]
    time: Option<String>,

    /// Location used when the EXIF block has no usable GPS tags: a decimal
    /// "lat,lon" pair or a place name to geocode
    #[arg(long)]
    location: Option<String>,

    /// Print the report as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Mean-luminance threshold for the visual day/night call (0-255)
    #[arg(long, default_value_t = DEFAULT_LUMINANCE_THRESHOLD)]
    threshold: f64,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<(), PhotoAnalyzerError> {
    let analyzer = PhotoAnalyzer::builder()
        .luminance_threshold(args.threshold)
        .build()?;

    let metadata = extract_metadata(&args.photo)?;
    if metadata.is_empty() {
        // Terminal classification, not an error.
        println!("No embedded metadata found (possibly an AI-generated or stripped image).");
        return Ok(());
    }

    let photo_time = analyzer.resolve_photo_time(&metadata, args.time.as_deref())?;
    let location = analyzer
        .resolve_location(&metadata, args.location.as_deref())
        .await?;

    let report = analyzer
        .analyze_photo(&args.photo, photo_time, location)
        .await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&args.photo, &report);
    }
    Ok(())
}

fn print_report(photo: &std::path::Path, report: &AnalysisReport) {
    let name = photo
        .file_name()
        .map_or_else(|| photo.display().to_string(), |n| n.to_string_lossy().into_owned());

    println!("Photo:               {name}");
    println!("Time:                {}", report.photo_time.format("%Y-%m-%d %H:%M:%S"));
    println!(
        "Coordinates:         {:.4}, {:.4}",
        report.location.latitude, report.location.longitude
    );
    println!(
        "Timezone:            {} ({})",
        report.weather.timezone, report.weather.timezone_abbreviation
    );
    println!(
        "Day/night (visual):  {} (mean luminance {:.1})",
        if report.visual.is_day { "Day" } else { "Night" },
        report.visual.mean_luminance
    );
    println!("Day period (solar):  {}", report.solar_period);

    match &report.weather.hourly {
        Some(hourly) => {
            println!("Temperature:         {}", fmt_value(hourly.temperature_c, "°C"));
            println!("Cloud cover:         {}", fmt_value(hourly.cloud_cover_pct, "%"));
            println!(
                "Weather code:        {}",
                hourly
                    .weather_code
                    .map_or_else(|| "-".to_string(), |code| code.to_string())
            );
        }
        None => {
            println!("Temperature:         - (no weather data for this hour)");
            println!("Cloud cover:         -");
            println!("Weather code:        -");
        }
    }

    if report.edited {
        let trace = report.editor_name.as_deref().unwrap_or("-");
        println!("Warning:             editor signature found: {trace}");
    } else {
        println!("Editor signature:    none found");
    }
}

fn fmt_value(value: Option<f64>, unit: &str) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v}{unit}"))
}
