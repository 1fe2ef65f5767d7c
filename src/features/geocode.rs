//! Forward geocoding of free-text place names via Nominatim.

use crate::features::error::GeocodeError;
use crate::features::gps::Coordinates;
use reqwest::Client;
use serde::Deserialize;

pub const SEARCH_URL: &str = "https://nominatim.openstreetmap.org/search";

// Nominatim's usage policy requires an identifying user agent.
const USER_AGENT: &str = "osint-photo-analyzer";

#[derive(Debug, Deserialize)]
struct SearchHit {
    lat: String,
    lon: String,
}

/// Resolves a place name to coordinates. "Not found" is its own error
/// variant, distinct from transport or decoding failures.
pub async fn geocode_place(client: &Client, place: &str) -> Result<Coordinates, GeocodeError> {
    let response = client
        .get(SEARCH_URL)
        .query(&[("q", place), ("format", "json"), ("limit", "1")])
        .header(reqwest::header::USER_AGENT, USER_AGENT)
        .send()
        .await
        .map_err(GeocodeError::Http)?;

    let status = response.status();
    if !status.is_success() {
        return Err(GeocodeError::Status(status));
    }

    let hits: Vec<SearchHit> = response.json().await.map_err(GeocodeError::Decode)?;
    let hit = hits
        .into_iter()
        .next()
        .ok_or_else(|| GeocodeError::NotFound(place.to_string()))?;

    parse_hit(&hit)
}

fn parse_hit(hit: &SearchHit) -> Result<Coordinates, GeocodeError> {
    // Nominatim serializes coordinates as strings.
    let latitude: f64 = hit.lat.parse().map_err(|_| GeocodeError::MalformedResponse)?;
    let longitude: f64 = hit.lon.parse().map_err(|_| GeocodeError::MalformedResponse)?;
    Coordinates::new(latitude, longitude).map_err(|_| GeocodeError::MalformedResponse)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_coordinates_are_parsed() {
        let hit = SearchHit {
            lat: "50.4500336".to_string(),
            lon: "30.5241361".to_string(),
        };
        let coords = parse_hit(&hit).unwrap();
        assert!((coords.latitude - 50.4500336).abs() < 1e-9);
        assert!((coords.longitude - 30.5241361).abs() < 1e-9);
    }

    #[test]
    fn unparseable_coordinates_are_a_malformed_response() {
        let hit = SearchHit {
            lat: "fifty".to_string(),
            lon: "30.5".to_string(),
        };
        assert!(matches!(parse_hit(&hit), Err(GeocodeError::MalformedResponse)));
    }

    #[test]
    fn out_of_range_coordinates_are_a_malformed_response() {
        let hit = SearchHit {
            lat: "95.0".to_string(),
            lon: "30.5".to_string(),
        };
        assert!(matches!(parse_hit(&hit), Err(GeocodeError::MalformedResponse)));
    }
}
