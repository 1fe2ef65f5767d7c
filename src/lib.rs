//! # Photo Analyzer
//!
//! Estimate when and where a photograph was taken and cross-check that
//! estimate against independent evidence.
//!
//! The crate inspects a single photo's embedded metadata and visual content,
//! then reconciles a set of independently fallible extraction steps into one
//! coherent report:
//!
//! - **Metadata Extraction**: Reads the EXIF tag block into a name-keyed map;
//!   an image without one yields an empty map (often a sign of a synthetic or
//!   stripped image).
//! - **Timestamp Resolution**: Tries the capture-time tags in priority order,
//!   falling back to caller-supplied input.
//! - **Coordinate Resolution**: Converts GPS degree/minute/second tags into
//!   signed decimal degrees, falling back to a caller-supplied pair or a
//!   geocoded place name.
//! - **Visual Day/Night**: Classifies the photo by mean luminance.
//! - **Astronomical Day/Night**: Buckets the capture time into
//!   morning/day/evening/night from solar event times at the location.
//! - **Weather Cross-Check**: Fetches the historical hourly record for the
//!   capture hour from the open-meteo archive.
//! - **Edit Detection**: Scans metadata values for known editor signatures.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//! use photo_analyzer::PhotoAnalyzer;
//! use photo_analyzer::features::exif::extract_metadata;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), photo_analyzer::PhotoAnalyzerError> {
//!     let photo = Path::new("vacation.jpg");
//!     let analyzer = PhotoAnalyzer::builder().build()?;
//!
//!     let metadata = extract_metadata(photo)?;
//!     let photo_time = analyzer.resolve_photo_time(&metadata, None)?;
//!     let location = analyzer.resolve_location(&metadata, None).await?;
//!
//!     let report = analyzer.analyze_photo(photo, photo_time, location).await?;
//!     println!("{}", serde_json::to_string_pretty(&report).unwrap());
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod features;
pub mod photo_analyzer;
pub mod structs;
pub mod time;

pub use error::PhotoAnalyzerError;
pub use photo_analyzer::PhotoAnalyzer;
pub use structs::AnalysisReport;
