//! Conversion of embedded GPS sexagesimal tags into signed decimal degrees.

use crate::features::error::GpsError;
use crate::features::exif::{MetadataMap, TagValue};
use serde::{Deserialize, Serialize};

/// A validated position in signed decimal degrees (south/west negative).
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Builds a coordinate pair, rejecting values outside the valid
    /// latitude/longitude ranges.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, GpsError> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(GpsError::OutOfRange {
                latitude,
                longitude,
            });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

/// Resolves the GPS sub-tag map of a photo into decimal coordinates.
///
/// # Errors
///
/// Fails when a required tag is absent, not a rational triple, or carries a
/// zero denominator. Callers are expected to catch this and fall back to
/// externally supplied input.
pub fn coordinates_from_gps_tags(gps: &MetadataMap) -> Result<Coordinates, GpsError> {
    let latitude = dms_to_decimal(
        rational_triple(gps, "GPSLatitude")?,
        reference(gps, "GPSLatitudeRef")?,
        "GPSLatitude",
    )?;
    let longitude = dms_to_decimal(
        rational_triple(gps, "GPSLongitude")?,
        reference(gps, "GPSLongitudeRef")?,
        "GPSLongitude",
    )?;
    Coordinates::new(latitude, longitude)
}

/// `decimal = deg + min/60 + sec/3600`, negated for the 'S' and 'W'
/// hemispheres.
fn dms_to_decimal(
    dms: &[(u32, u32)],
    reference: &str,
    tag: &'static str,
) -> Result<f64, GpsError> {
    let degrees = ratio(dms[0], tag)?;
    let minutes = ratio(dms[1], tag)?;
    let seconds = ratio(dms[2], tag)?;
    let decimal = degrees + minutes / 60.0 + seconds / 3600.0;
    if reference == "S" || reference == "W" {
        Ok(-decimal)
    } else {
        Ok(decimal)
    }
}

fn ratio((num, denom): (u32, u32), tag: &'static str) -> Result<f64, GpsError> {
    if denom == 0 {
        return Err(GpsError::ZeroDenominator(tag));
    }
    Ok(f64::from(num) / f64::from(denom))
}

fn rational_triple<'a>(
    gps: &'a MetadataMap,
    tag: &'static str,
) -> Result<&'a [(u32, u32)], GpsError> {
    match gps.get(tag) {
        Some(TagValue::Rationals(rationals)) if rationals.len() >= 3 => Ok(rationals),
        Some(_) => Err(GpsError::MalformedTag(tag)),
        None => Err(GpsError::MissingTag(tag)),
    }
}

fn reference<'a>(gps: &'a MetadataMap, tag: &'static str) -> Result<&'a str, GpsError> {
    match gps.get(tag) {
        Some(TagValue::Text(text)) => Ok(text),
        Some(_) => Err(GpsError::MalformedTag(tag)),
        None => Err(GpsError::MissingTag(tag)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gps_map(
        lat: &[(u32, u32)],
        lat_ref: &str,
        lon: &[(u32, u32)],
        lon_ref: &str,
    ) -> MetadataMap {
        let mut map = MetadataMap::new();
        map.insert("GPSLatitude".to_string(), TagValue::Rationals(lat.to_vec()));
        map.insert("GPSLatitudeRef".to_string(), TagValue::Text(lat_ref.to_string()));
        map.insert("GPSLongitude".to_string(), TagValue::Rationals(lon.to_vec()));
        map.insert("GPSLongitudeRef".to_string(), TagValue::Text(lon_ref.to_string()));
        map
    }

    #[test]
    fn whole_degrees_convert_exactly() {
        let map = gps_map(
            &[(48, 1), (0, 1), (0, 1)],
            "N",
            &[(30, 1), (30, 1), (0, 1)],
            "E",
        );
        let coords = coordinates_from_gps_tags(&map).unwrap();
        assert!((coords.latitude - 48.0).abs() < 1e-9);
        assert!((coords.longitude - 30.5).abs() < 1e-9);
    }

    #[test]
    fn south_and_west_negate_the_decimal() {
        let map = gps_map(
            &[(33, 1), (52, 1), (30, 1)],
            "S",
            &[(151, 1), (12, 1), (0, 1)],
            "W",
        );
        let coords = coordinates_from_gps_tags(&map).unwrap();
        assert!((coords.latitude - (-(33.0 + 52.0 / 60.0 + 30.0 / 3600.0))).abs() < 1e-9);
        assert!((coords.longitude - (-(151.0 + 12.0 / 60.0))).abs() < 1e-9);
    }

    #[test]
    fn fractional_rationals_are_divided_out() {
        let map = gps_map(
            &[(505, 10), (0, 1), (0, 1)],
            "N",
            &[(30, 1), (0, 1), (0, 1)],
            "E",
        );
        let coords = coordinates_from_gps_tags(&map).unwrap();
        assert!((coords.latitude - 50.5).abs() < 1e-9);
    }

    #[test]
    fn zero_denominator_is_rejected() {
        let map = gps_map(
            &[(48, 0), (0, 1), (0, 1)],
            "N",
            &[(30, 1), (0, 1), (0, 1)],
            "E",
        );
        assert!(matches!(
            coordinates_from_gps_tags(&map),
            Err(GpsError::ZeroDenominator("GPSLatitude"))
        ));
    }

    #[test]
    fn missing_reference_is_rejected() {
        let mut map = gps_map(
            &[(48, 1), (0, 1), (0, 1)],
            "N",
            &[(30, 1), (0, 1), (0, 1)],
            "E",
        );
        map.remove("GPSLongitudeRef");
        assert!(matches!(
            coordinates_from_gps_tags(&map),
            Err(GpsError::MissingTag("GPSLongitudeRef"))
        ));
    }

    #[test]
    fn out_of_range_coordinates_are_rejected() {
        assert!(matches!(
            Coordinates::new(91.0, 0.0),
            Err(GpsError::OutOfRange { .. })
        ));
        assert!(matches!(
            Coordinates::new(0.0, -180.5),
            Err(GpsError::OutOfRange { .. })
        ));
        assert!(Coordinates::new(-90.0, 180.0).is_ok());
    }
}
