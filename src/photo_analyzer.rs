use crate::PhotoAnalyzerError;
use crate::features::edit::{EditCheck, detect_editing};
use crate::features::exif::{GPS_INFO_TAG, MetadataMap, TagValue, extract_metadata};
use crate::features::geocode::geocode_place;
use crate::features::gps::{Coordinates, coordinates_from_gps_tags};
use crate::features::sun::classify_period;
use crate::features::visual::{DEFAULT_LUMINANCE_THRESHOLD, classify_brightness};
use crate::features::weather::{ARCHIVE_URL, get_weather_report};
use crate::structs::AnalysisReport;
use crate::time::{parse_exif_datetime, resolve_timestamp};
use bon::bon;
use chrono::NaiveDateTime;
use std::path::Path;
use std::time::Duration;

/// The entry point for the photo analysis pipeline.
///
/// Holds the shared HTTP client and configuration. Designed to be created
/// once and reused; it carries no per-photo state, so repeated calls are
/// independent.
///
/// ```rust,no_run
/// # use photo_analyzer::{PhotoAnalyzer, PhotoAnalyzerError};
/// # #[tokio::main]
/// # async fn main() -> Result<(), PhotoAnalyzerError> {
/// let analyzer = PhotoAnalyzer::builder()
///     .luminance_threshold(100.0) // Optionally configure parameters
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct PhotoAnalyzer {
    client: reqwest::Client,
    luminance_threshold: f64,
    archive_url: String,
}

#[bon]
impl PhotoAnalyzer {
    /// Constructs a `PhotoAnalyzer` via a builder pattern.
    ///
    /// # Builder Arguments
    ///
    /// * `luminance_threshold: f64` - (Default: `90.0`) Mean-luminance cutoff
    ///   on the 0-255 scale above which the image counts as visually "day".
    /// * `request_timeout: Duration` - (Default: 10 s) Bound on each weather
    ///   and geocoding request, so an unreachable service cannot hang an
    ///   interactive caller.
    /// * `archive_url: String` - (Default: the open-meteo archive endpoint)
    ///   Base URL of the historical weather service.
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be initialized.
    #[builder]
    pub fn new(
        #[builder(default = DEFAULT_LUMINANCE_THRESHOLD)] luminance_threshold: f64,
        #[builder(default = Duration::from_secs(10))] request_timeout: Duration,
        #[builder(default = ARCHIVE_URL.to_string())] archive_url: String,
    ) -> Result<Self, PhotoAnalyzerError> {
        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()?;
        Ok(Self {
            client,
            luminance_threshold,
            archive_url,
        })
    }

    /// Resolves the capture time: metadata tags first, then the caller's
    /// override string.
    ///
    /// # Errors
    ///
    /// * [`PhotoAnalyzerError::MissingTime`] - no metadata timestamp and no
    ///   override was supplied.
    /// * [`PhotoAnalyzerError::InvalidTimeInput`] - the override does not
    ///   parse as `YYYY:MM:DD HH:MM:SS`.
    pub fn resolve_photo_time(
        &self,
        metadata: &MetadataMap,
        fallback: Option<&str>,
    ) -> Result<NaiveDateTime, PhotoAnalyzerError> {
        if let Some(datetime) = resolve_timestamp(metadata) {
            return Ok(datetime);
        }
        let raw = fallback.ok_or(PhotoAnalyzerError::MissingTime)?;
        parse_exif_datetime(raw)
            .ok_or_else(|| PhotoAnalyzerError::InvalidTimeInput(raw.to_string()))
    }

    /// Resolves the capture location: embedded GPS tags first, then the
    /// caller's override (a decimal `lat,lon` pair, or a place name handed
    /// to the geocoder).
    ///
    /// A GPS block that fails to convert is logged and treated like an
    /// absent one, falling back to the override.
    pub async fn resolve_location(
        &self,
        metadata: &MetadataMap,
        fallback: Option<&str>,
    ) -> Result<Coordinates, PhotoAnalyzerError> {
        if let Some(TagValue::Nested(gps)) = metadata.get(GPS_INFO_TAG) {
            match coordinates_from_gps_tags(gps) {
                Ok(coords) => return Ok(coords),
                Err(error) => {
                    tracing::warn!(%error, "embedded GPS tags could not be converted");
                }
            }
        }
        let raw = fallback.ok_or(PhotoAnalyzerError::MissingLocation)?;
        if raw.contains(',') {
            let (latitude, longitude) = parse_decimal_pair(raw)
                .ok_or_else(|| PhotoAnalyzerError::InvalidLocationInput(raw.to_string()))?;
            Ok(Coordinates::new(latitude, longitude)?)
        } else {
            Ok(geocode_place(&self.client, raw).await?)
        }
    }

    /// Analyzes one photo and assembles the consolidated report.
    ///
    /// The steps run in a fixed order so that aborting failures short-circuit
    /// the rest: weather lookup (aborts on service failure), visual
    /// classification (aborts when the image cannot be decoded), metadata
    /// re-extraction for edit detection, astronomical classification. A
    /// weather response without a record for the capture hour does not abort;
    /// the report then carries a `None` hourly field.
    ///
    /// `photo_time` has no timezone and is interpreted as UTC for the solar
    /// computation.
    ///
    /// # Errors
    ///
    /// * [`PhotoAnalyzerError::Weather`] - the archive service was
    ///   unreachable, returned a non-success status, or sent an undecodable
    ///   body.
    /// * [`PhotoAnalyzerError::Visual`] - the image could not be decoded.
    /// * [`PhotoAnalyzerError::Exif`] - the file disappeared between
    ///   resolution and re-extraction.
    pub async fn analyze_photo(
        &self,
        photo: &Path,
        photo_time: NaiveDateTime,
        location: Coordinates,
    ) -> Result<AnalysisReport, PhotoAnalyzerError> {
        let weather =
            get_weather_report(&self.client, &self.archive_url, &location, photo_time).await?;
        let visual = classify_brightness(photo, self.luminance_threshold)?;

        let metadata = extract_metadata(photo)?;
        let EditCheck {
            edited,
            editor_name,
        } = detect_editing(&metadata);

        let solar_period = classify_period(&location, photo_time.and_utc())?;

        Ok(AnalysisReport {
            photo_time,
            location,
            weather,
            visual,
            solar_period,
            edited,
            editor_name,
        })
    }
}

fn parse_decimal_pair(raw: &str) -> Option<(f64, f64)> {
    let (lat, lon) = raw.split_once(',')?;
    Some((lat.trim().parse().ok()?, lon.trim().parse().ok()?))
}
