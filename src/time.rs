//! Capture-timestamp resolution from the metadata map.

use crate::features::exif::{MetadataMap, TagValue};
use chrono::NaiveDateTime;

/// The EXIF datetime notation, also accepted for caller-supplied overrides.
pub const EXIF_DATETIME_FORMAT: &str = "%Y:%m:%d %H:%M:%S";

/// Tag names tried for the capture time, in priority order. The original
/// capture time wins over the generic image timestamp, which wins over the
/// digitization time.
const TIMESTAMP_TAGS: &[&str] = &["DateTimeOriginal", "DateTime", "DateTimeDigitized"];

/// Returns the first tag in priority order that parses as a capture
/// timestamp, or `None` when no tag exists or parses. Absence is not an
/// error; the caller may recover with externally supplied input.
pub fn resolve_timestamp(metadata: &MetadataMap) -> Option<NaiveDateTime> {
    for tag in TIMESTAMP_TAGS {
        if let Some(TagValue::Text(raw)) = metadata.get(*tag)
            && let Some(datetime) = parse_exif_datetime(raw)
        {
            tracing::debug!(tag, "resolved capture timestamp");
            return Some(datetime);
        }
    }
    None
}

/// Parses `YYYY:MM:DD HH:MM:SS`, tolerating surrounding whitespace and the
/// quoting some EXIF writers leave in ASCII values.
pub fn parse_exif_datetime(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw.trim().trim_matches('"'), EXIF_DATETIME_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    fn text_map(entries: &[(&str, &str)]) -> MetadataMap {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), TagValue::Text(v.to_string())))
            .collect()
    }

    #[test]
    fn parses_the_exact_exif_format() {
        let dt = parse_exif_datetime("2024:06:26 15:07:00").unwrap();
        assert_eq!(dt.year(), 2024);
        assert_eq!(dt.month(), 6);
        assert_eq!(dt.day(), 26);
        assert_eq!(dt.hour(), 15);
        assert_eq!(dt.minute(), 7);

        assert!(parse_exif_datetime("2024-06-26 15:07:00").is_none());
        assert!(parse_exif_datetime("not a date").is_none());
    }

    #[test]
    fn original_capture_time_wins_over_other_tags() {
        let metadata = text_map(&[
            ("DateTime", "2024:07:01 10:00:00"),
            ("DateTimeDigitized", "2024:07:02 10:00:00"),
            ("DateTimeOriginal", "2024:06:26 15:07:00"),
        ]);
        let dt = resolve_timestamp(&metadata).unwrap();
        assert_eq!(dt.day(), 26);
    }

    #[test]
    fn unparseable_candidates_fall_through_the_chain() {
        let metadata = text_map(&[
            ("DateTimeOriginal", "garbage"),
            ("DateTime", "2024:07:01 10:00:00"),
        ]);
        let dt = resolve_timestamp(&metadata).unwrap();
        assert_eq!(dt.month(), 7);
    }

    #[test]
    fn no_usable_tag_is_not_an_error() {
        assert!(resolve_timestamp(&MetadataMap::new()).is_none());
        let metadata = text_map(&[("Make", "Canon")]);
        assert!(resolve_timestamp(&metadata).is_none());
    }
}
