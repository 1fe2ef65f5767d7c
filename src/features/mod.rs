pub mod edit;
pub mod error;
pub mod exif;
pub mod geocode;
pub mod gps;
pub mod sun;
pub mod visual;
pub mod weather;
