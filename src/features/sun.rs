//! Astronomical day/night classification from solar event times.

use crate::features::error::SunError;
use crate::features::gps::Coordinates;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use sunrise::{Coordinates as SolarCoordinates, DawnType, SolarDay, SolarEvent};

/// Bucket of the day a timestamp falls into, based on solar events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum DayPeriod {
    Morning,
    Day,
    Evening,
    Night,
}

impl fmt::Display for DayPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DayPeriod::Morning => "Morning",
            DayPeriod::Day => "Day",
            DayPeriod::Evening => "Evening",
            DayPeriod::Night => "Night",
        };
        f.write_str(label)
    }
}

/// Solar event times for one date and location, all in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct SunTimes {
    pub dawn: DateTime<Utc>,
    pub sunrise: DateTime<Utc>,
    pub noon: DateTime<Utc>,
    pub sunset: DateTime<Utc>,
    pub dusk: DateTime<Utc>,
}

impl SunTimes {
    /// Buckets a UTC timestamp into a [`DayPeriod`].
    ///
    /// Intervals are half-open, so a timestamp exactly on an event boundary
    /// falls into the later period.
    pub fn period(&self, t: DateTime<Utc>) -> DayPeriod {
        if t < self.dawn || t >= self.dusk {
            DayPeriod::Night
        } else if t < self.noon {
            DayPeriod::Morning
        } else if t < self.sunset {
            DayPeriod::Day
        } else if t < self.dusk {
            DayPeriod::Evening
        } else {
            // Unreachable given the checks above; night is the safe default.
            DayPeriod::Night
        }
    }
}

/// Computes dawn, sunrise, solar noon, sunset and dusk for `date` at
/// `coords`. Dawn and dusk use civil twilight; noon is the midpoint of
/// sunrise and sunset.
pub fn compute_sun_times(coords: &Coordinates, date: NaiveDate) -> Result<SunTimes, SunError> {
    let coord = SolarCoordinates::new(coords.latitude, coords.longitude)
        .ok_or(SunError::InvalidCoordinates)?;

    let dawn = SolarDay::new(coord, date).event_time(SolarEvent::Dawn(DawnType::Civil));
    let sunrise = SolarDay::new(coord, date).event_time(SolarEvent::Sunrise);
    let sunset = SolarDay::new(coord, date).event_time(SolarEvent::Sunset);
    let dusk = SolarDay::new(coord, date).event_time(SolarEvent::Dusk(DawnType::Civil));
    let noon = sunrise + (sunset - sunrise) / 2;

    Ok(SunTimes {
        dawn,
        sunrise,
        noon,
        sunset,
        dusk,
    })
}

/// Classifies a UTC timestamp for the given location. Timestamps without a
/// zone must be interpreted as UTC by the caller before getting here.
pub fn classify_period(
    coords: &Coordinates,
    datetime: DateTime<Utc>,
) -> Result<DayPeriod, SunError> {
    let sun = compute_sun_times(coords, datetime.date_naive())?;
    Ok(sun.period(datetime))
}
