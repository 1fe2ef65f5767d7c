//! Historical weather lookup against the open-meteo archive API.

use crate::features::error::WeatherError;
use crate::features::gps::Coordinates;
use chrono::NaiveDateTime;
use reqwest::Client;
use serde::{Deserialize, Serialize};

pub const ARCHIVE_URL: &str = "https://archive-api.open-meteo.com/v1/archive";

const HOURLY_VARIABLES: &str = "temperature_2m,cloudcover,weathercode";

/// Weather conditions around the capture time, as reported by the archive.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherReport {
    /// IANA timezone resolved by the service for the coordinates.
    pub timezone: String,
    pub timezone_abbreviation: String,
    /// The hourly record matching the capture hour, or `None` when the
    /// archive responded but holds no record for that hour.
    pub hourly: Option<HourlyWeather>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HourlyWeather {
    /// The matched hour in the archive's `%Y-%m-%dT%H:00` notation.
    pub time: String,
    pub temperature_c: Option<f64>,
    pub cloud_cover_pct: Option<f64>,
    pub weather_code: Option<u16>,
}

#[derive(Debug, Deserialize)]
struct ArchiveResponse {
    timezone: String,
    timezone_abbreviation: String,
    hourly: HourlySeries,
}

/// Parallel arrays keyed by the `time` column.
#[derive(Debug, Deserialize)]
struct HourlySeries {
    time: Vec<String>,
    temperature_2m: Vec<Option<f64>>,
    cloudcover: Vec<Option<f64>>,
    weathercode: Vec<Option<u16>>,
}

/// Fetches the hourly archive for the calendar day containing `datetime` and
/// extracts the record for its hour. `archive_url` is normally
/// [`ARCHIVE_URL`]; it is a parameter so callers can point the lookup at a
/// stand-in service.
///
/// # Errors
///
/// Transport failures, non-2xx statuses and undecodable bodies are returned
/// as [`WeatherError`] and abort the analysis. A missing hourly record is
/// *not* an error; it degrades to `hourly: None` in the report.
pub async fn get_weather_report(
    client: &Client,
    archive_url: &str,
    coords: &Coordinates,
    datetime: NaiveDateTime,
) -> Result<WeatherReport, WeatherError> {
    let date = datetime.format("%Y-%m-%d").to_string();
    let params = [
        ("latitude", coords.latitude.to_string()),
        ("longitude", coords.longitude.to_string()),
        ("start_date", date.clone()),
        ("end_date", date),
        ("hourly", HOURLY_VARIABLES.to_string()),
        ("timezone", "auto".to_string()),
    ];

    let response = send_with_retry(client, archive_url, &params).await?;
    let status = response.status();
    if !status.is_success() {
        return Err(WeatherError::Status(status));
    }
    let body: ArchiveResponse = response.json().await.map_err(WeatherError::Decode)?;
    Ok(match_hour(body, datetime))
}

/// One retry on transient transport errors keeps an interactive caller from
/// hanging on a flaky connection without masking real outages.
async fn send_with_retry(
    client: &Client,
    archive_url: &str,
    params: &[(&str, String)],
) -> Result<reqwest::Response, WeatherError> {
    match client.get(archive_url).query(params).send().await {
        Ok(response) => Ok(response),
        Err(error) if error.is_timeout() || error.is_connect() => {
            tracing::warn!(%error, "weather request failed, retrying once");
            client
                .get(archive_url)
                .query(params)
                .send()
                .await
                .map_err(WeatherError::Http)
        }
        Err(error) => Err(WeatherError::Http(error)),
    }
}

/// Locates the hourly index whose timestamp string matches the capture hour
/// exactly (minutes truncated to the hour boundary).
fn match_hour(body: ArchiveResponse, datetime: NaiveDateTime) -> WeatherReport {
    let wanted = datetime.format("%Y-%m-%dT%H:00").to_string();
    let hourly = body
        .hourly
        .time
        .iter()
        .position(|time| *time == wanted)
        .map(|idx| HourlyWeather {
            time: body.hourly.time[idx].clone(),
            temperature_c: body.hourly.temperature_2m.get(idx).copied().flatten(),
            cloud_cover_pct: body.hourly.cloudcover.get(idx).copied().flatten(),
            weather_code: body.hourly.weathercode.get(idx).copied().flatten(),
        });
    if hourly.is_none() {
        tracing::debug!(hour = %wanted, "archive has no record for the requested hour");
    }
    WeatherReport {
        timezone: body.timezone,
        timezone_abbreviation: body.timezone_abbreviation,
        hourly,
    }
}
