//! In-process EXIF extraction into a tag-name keyed metadata map.
//!
//! Tag IDs are resolved to human-readable names through the static tables of
//! the `exif` crate. GPS sub-IFD tags are grouped under a nested
//! [`GPS_INFO_TAG`] entry so callers can treat the GPS block as one unit.

use crate::features::error::ExifError;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Key of the nested GPS sub-tag map inside a [`MetadataMap`].
pub const GPS_INFO_TAG: &str = "GPSInfo";

/// Metadata of one photo: tag name to raw value.
///
/// A `BTreeMap` keeps iteration deterministic, which makes first-match
/// scans over the values (edit-signature detection) stable across runs.
pub type MetadataMap = BTreeMap<String, TagValue>;

/// A raw EXIF value in one of the shapes the analysis cares about.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TagValue {
    Int(i64),
    Float(f64),
    Text(String),
    /// Unsigned rationals as (numerator, denominator) pairs, e.g. GPS
    /// degree/minute/second triples.
    Rationals(Vec<(u32, u32)>),
    /// Sub-tag map, used for the GPS IFD.
    Nested(MetadataMap),
}

impl fmt::Display for TagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagValue::Int(v) => write!(f, "{v}"),
            TagValue::Float(v) => write!(f, "{v}"),
            TagValue::Text(v) => f.write_str(v),
            TagValue::Rationals(rationals) => {
                let parts: Vec<String> = rationals
                    .iter()
                    .map(|(num, denom)| format!("{num}/{denom}"))
                    .collect();
                f.write_str(&parts.join(" "))
            }
            TagValue::Nested(map) => {
                let parts: Vec<String> =
                    map.iter().map(|(key, value)| format!("{key}: {value}")).collect();
                f.write_str(&parts.join(", "))
            }
        }
    }
}

/// Reads the EXIF block of `path` into a [`MetadataMap`].
///
/// A file without a parseable tag block yields an empty map rather than an
/// error; interpreting that (e.g. as a likely synthetic image) is up to the
/// caller. The file handle is scoped to this function and released on every
/// exit path.
///
/// # Errors
///
/// Returns [`ExifError::Io`] when the file itself cannot be opened.
pub fn extract_metadata(path: &Path) -> Result<MetadataMap, ExifError> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);

    let exif = match exif::Reader::new().read_from_container(&mut reader) {
        Ok(exif) => exif,
        Err(error) => {
            tracing::debug!(?path, %error, "no parseable EXIF block");
            return Ok(MetadataMap::new());
        }
    };

    let mut metadata = MetadataMap::new();
    let mut gps = MetadataMap::new();
    for field in exif.fields() {
        if field.ifd_num != exif::In::PRIMARY {
            // Thumbnail IFD duplicates the interesting tags.
            continue;
        }
        let name = field.tag.to_string();
        let value = tag_value(field);
        if field.tag.0 == exif::Context::Gps {
            gps.insert(name, value);
        } else {
            metadata.insert(name, value);
        }
    }
    if !gps.is_empty() {
        metadata.insert(GPS_INFO_TAG.to_string(), TagValue::Nested(gps));
    }
    Ok(metadata)
}

fn tag_value(field: &exif::Field) -> TagValue {
    match &field.value {
        exif::Value::Short(v) if v.len() == 1 => TagValue::Int(i64::from(v[0])),
        exif::Value::Long(v) if v.len() == 1 => TagValue::Int(i64::from(v[0])),
        exif::Value::SLong(v) if v.len() == 1 => TagValue::Int(i64::from(v[0])),
        exif::Value::Float(v) if v.len() == 1 => TagValue::Float(f64::from(v[0])),
        exif::Value::Double(v) if v.len() == 1 => TagValue::Float(v[0]),
        exif::Value::Rational(rationals) => TagValue::Rationals(
            rationals.iter().map(|r| (r.num, r.denom)).collect(),
        ),
        // Ascii and everything else go through the crate's display formatting;
        // Ascii values come back wrapped in quotes, which we strip.
        _ => TagValue::Text(
            field
                .display_value()
                .to_string()
                .trim()
                .trim_matches('"')
                .to_string(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use exif::{Context, Field, In, Rational, Tag, Value};

    #[test]
    fn rational_fields_keep_numerator_and_denominator() {
        let field = Field {
            tag: Tag(Context::Gps, 2),
            ifd_num: In::PRIMARY,
            value: Value::Rational(vec![
                Rational { num: 48, denom: 1 },
                Rational { num: 30, denom: 1 },
                Rational { num: 0, denom: 1 },
            ]),
        };

        assert_eq!(
            tag_value(&field),
            TagValue::Rationals(vec![(48, 1), (30, 1), (0, 1)])
        );
    }

    #[test]
    fn ascii_fields_are_stored_without_quotes() {
        let field = Field {
            tag: Tag(Context::Tiff, 0x0131),
            ifd_num: In::PRIMARY,
            value: Value::Ascii(vec![b"Adobe Photoshop 25.0".to_vec()]),
        };

        let value = tag_value(&field);
        assert_eq!(value, TagValue::Text("Adobe Photoshop 25.0".to_string()));
    }

    #[test]
    fn display_flattens_nested_maps() {
        let mut gps = MetadataMap::new();
        gps.insert("GPSLatitudeRef".to_string(), TagValue::Text("N".to_string()));
        gps.insert(
            "GPSLatitude".to_string(),
            TagValue::Rationals(vec![(48, 1), (0, 1), (0, 1)]),
        );
        let value = TagValue::Nested(gps);

        assert_eq!(value.to_string(), "GPSLatitude: 48/1 0/1 0/1, GPSLatitudeRef: N");
    }

    #[test]
    fn image_without_exif_yields_an_empty_map() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plain.png");
        image::GrayImage::from_pixel(4, 4, image::Luma([128]))
            .save(&path)
            .unwrap();

        let metadata = extract_metadata(&path).unwrap();
        assert!(metadata.is_empty());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result = extract_metadata(Path::new("definitely/not/a/photo.jpg"));
        assert!(matches!(result, Err(ExifError::Io(_))));
    }
}
