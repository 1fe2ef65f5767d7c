use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExifError {
    #[error("Could not open the photo file: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum GpsError {
    #[error("Missing GPS tag: {0}")]
    MissingTag(&'static str),

    #[error("GPS tag {0} is not a degree/minute/second rational triple")]
    MalformedTag(&'static str),

    #[error("GPS tag {0} contains a zero denominator")]
    ZeroDenominator(&'static str),

    #[error("Coordinates out of range: latitude {latitude}, longitude {longitude}")]
    OutOfRange { latitude: f64, longitude: f64 },
}

#[derive(Error, Debug)]
pub enum VisualError {
    #[error("Could not open or decode the image for brightness analysis")]
    Decode(#[from] image::ImageError),
}

#[derive(Error, Debug)]
pub enum SunError {
    /// Only reachable when a `Coordinates` value is built directly with
    /// out-of-range fields; `Coordinates::new` enforces the same ranges the
    /// solar library checks.
    #[error("Solar event times could not be computed for these coordinates")]
    InvalidCoordinates,
}

#[derive(Error, Debug)]
pub enum WeatherError {
    #[error("Weather service request failed: {0}")]
    Http(#[source] reqwest::Error),

    #[error("Weather service returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("Weather service response could not be decoded: {0}")]
    Decode(#[source] reqwest::Error),
}

#[derive(Error, Debug)]
pub enum GeocodeError {
    #[error("Geocoding request failed: {0}")]
    Http(#[source] reqwest::Error),

    #[error("Geocoding service returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("Geocoding response could not be decoded: {0}")]
    Decode(#[source] reqwest::Error),

    #[error("No location found for '{0}'")]
    NotFound(String),

    #[error("Geocoding service returned coordinates that could not be parsed")]
    MalformedResponse,
}
