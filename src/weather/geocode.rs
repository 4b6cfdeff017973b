// src/weather/geocode.rs
// Offline place-name lookup. Not a real geocoder: unknown places fail.

use super::Coordinates;
use crate::error::WeatherError;

/// (aliases, coordinates)
const KNOWN_PLACES: &[(&[&str], Coordinates)] = &[
    (&["edinburgh"], Coordinates::new(55.9533, -3.1883)),
    (&["glasgow"], Coordinates::new(55.8642, -4.2518)),
    (&["london"], Coordinates::new(51.5072, -0.1276)),
    (&["new york", "nyc", "brooklyn", "manhattan"], Coordinates::new(40.7128, -74.0060)),
    (&["san francisco"], Coordinates::new(37.7749, -122.4194)),
    (&["los angeles"], Coordinates::new(34.0522, -118.2437)),
    (&["chicago"], Coordinates::new(41.8781, -87.6298)),
    (&["toronto"], Coordinates::new(43.6532, -79.3832)),
    (&["paris"], Coordinates::new(48.8566, 2.3522)),
    (&["berlin"], Coordinates::new(52.5200, 13.4050)),
    (&["dublin"], Coordinates::new(53.3498, -6.2603)),
    (&["sydney"], Coordinates::new(-33.8688, 151.2093)),
    (&["tokyo"], Coordinates::new(35.6762, 139.6503)),
];

/// Case-insensitive substring lookup over a fixed table of places.
///
/// When several aliases appear in the text the longest one wins. Regions and
/// countries are not places: "Manchester, England" is unresolved.
#[derive(Debug, Clone, Copy, Default)]
pub struct Gazetteer;

impl Gazetteer {
    pub fn lookup(&self, location: &str) -> Result<Coordinates, WeatherError> {
        let lower = location.trim().to_lowercase();
        if lower.is_empty() {
            return Err(WeatherError::Unresolved(location.to_string()));
        }

        KNOWN_PLACES
            .iter()
            .flat_map(|(aliases, coords)| aliases.iter().map(move |a| (*a, *coords)))
            .filter(|(alias, _)| lower.contains(alias))
            .max_by_key(|(alias, _)| alias.len())
            .map(|(_, coords)| coords)
            .ok_or_else(|| WeatherError::Unresolved(location.trim().to_string()))
    }
}
