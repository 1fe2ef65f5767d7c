use crate::features::gps::Coordinates;
use crate::features::sun::DayPeriod;
use crate::features::visual::VisualClassification;
use crate::features::weather::WeatherReport;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// The consolidated result of one photo analysis.
///
/// Either this whole structure is produced or the analysis returns a single
/// error; there is no partially filled report for aborting failures. The
/// only tolerated gap is `weather.hourly`, which is `None` when the archive
/// responded but had no record for the capture hour.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    /// Capture time as resolved from metadata or caller input.
    pub photo_time: NaiveDateTime,
    pub location: Coordinates,
    pub weather: WeatherReport,
    /// Day/night as judged from image brightness.
    pub visual: VisualClassification,
    /// Day period as judged from solar event times at the location.
    pub solar_period: DayPeriod,
    pub edited: bool,
    pub editor_name: Option<String>,
}
