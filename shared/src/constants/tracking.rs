/// Message a tracking record carries until a dispatcher sets one
pub static DEFAULT_MESSAGE: &str = "No message provided.";

/// Placeholder for a coordinate pair that is missing on a display projection
pub static MISSING_COORDINATES: &str = "N/A";

pub const MIN_LATITUDE: f64 = -90.0;
pub const MAX_LATITUDE: f64 = 90.0;

pub const MIN_LONGITUDE: f64 = -180.0;
pub const MAX_LONGITUDE: f64 = 180.0;

/// checks a latitude / longitude pair against the valid WGS84 ranges
pub fn is_valid_point(lat: f64, lng: f64) -> bool {
    (MIN_LATITUDE..=MAX_LATITUDE).contains(&lat) && (MIN_LONGITUDE..=MAX_LONGITUDE).contains(&lng)
}
