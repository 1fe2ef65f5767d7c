//! Detection of image-editor traces in metadata values.

use crate::features::exif::MetadataMap;
use serde::{Deserialize, Serialize};

/// Editor names and processing markers scanned for in stringified metadata
/// values, matched case-insensitively.
const EDITOR_SIGNATURES: &[&str] = &[
    "lightroom",
    "photoshop",
    "snapseed",
    "vsco",
    "gimp",
    "pixlr",
    "adobe",
    "corel",
    "paint",
    "xmp",
];

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditCheck {
    pub edited: bool,
    /// The first metadata value (lowercased) containing an editor signature.
    pub editor_name: Option<String>,
}

/// Scans every metadata value for a known editor signature. First match
/// wins; there is no scoring or aggregation of multiple matches.
pub fn detect_editing(metadata: &MetadataMap) -> EditCheck {
    for value in metadata.values() {
        let text = value.to_string().to_lowercase();
        if EDITOR_SIGNATURES.iter().any(|sig| text.contains(sig)) {
            return EditCheck {
                edited: true,
                editor_name: Some(text),
            };
        }
    }
    EditCheck {
        edited: false,
        editor_name: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::exif::TagValue;

    fn map_of(entries: &[(&str, &str)]) -> MetadataMap {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), TagValue::Text(v.to_string())))
            .collect()
    }

    #[test]
    fn photoshop_signature_matches_case_insensitively() {
        let metadata = map_of(&[("Software", "Adobe Photoshop 25.0 (Windows)")]);
        let check = detect_editing(&metadata);
        assert!(check.edited);
        assert_eq!(
            check.editor_name.as_deref(),
            Some("adobe photoshop 25.0 (windows)")
        );
    }

    #[test]
    fn clean_metadata_yields_no_match() {
        let metadata = map_of(&[
            ("Make", "Google"),
            ("Model", "Pixel 7"),
            ("DateTimeOriginal", "2024:06:26 15:07:00"),
        ]);
        let check = detect_editing(&metadata);
        assert!(!check.edited);
        assert!(check.editor_name.is_none());
    }

    #[test]
    fn signature_in_any_value_is_found() {
        let metadata = map_of(&[
            ("Make", "Canon"),
            ("UserComment", "processed in snapseed on phone"),
        ]);
        assert!(detect_editing(&metadata).edited);
    }

    #[test]
    fn first_match_in_tag_order_wins() {
        // BTreeMap iterates in key order, so "Creator" is visited before
        // "Software".
        let metadata = map_of(&[
            ("Software", "GIMP 2.10"),
            ("Creator", "exported from Lightroom"),
        ]);
        let check = detect_editing(&metadata);
        assert_eq!(
            check.editor_name.as_deref(),
            Some("exported from lightroom")
        );
    }
}
