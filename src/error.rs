use thiserror::Error;

/// The primary error type for the photo-analyzer crate.
#[derive(Error, Debug)]
pub enum PhotoAnalyzerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // --- Feature Module Errors ---
    #[error("Metadata extraction failed: {0}")]
    Exif(#[from] crate::features::error::ExifError),

    #[error("GPS coordinate resolution failed: {0}")]
    Gps(#[from] crate::features::error::GpsError),

    #[error("Visual day/night classification failed: {0}")]
    Visual(#[from] crate::features::error::VisualError),

    #[error("Solar event computation failed: {0}")]
    Sun(#[from] crate::features::error::SunError),

    #[error("Weather data retrieval failed: {0}")]
    Weather(#[from] crate::features::error::WeatherError),

    #[error("Geocoding failed: {0}")]
    Geocode(#[from] crate::features::error::GeocodeError),

    // --- External Service Initialization Errors ---
    #[error("HTTP client initialization failed")]
    Client(#[from] reqwest::Error),

    #[error("Report serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    // --- Caller Input Errors ---
    #[error("No capture time in the photo metadata; supply one as YYYY:MM:DD HH:MM:SS")]
    MissingTime,

    #[error("Could not parse '{0}' as YYYY:MM:DD HH:MM:SS")]
    InvalidTimeInput(String),

    #[error("No usable GPS coordinates in the photo metadata; supply a place name or a decimal lat,lon pair")]
    MissingLocation,

    #[error("Could not parse '{0}' as a decimal lat,lon pair")]
    InvalidLocationInput(String),
}
