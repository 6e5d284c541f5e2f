//! Great-circle distance and reference-point handling.
//!
//! Distances use the haversine formula on a sphere of radius
//! [`EARTH_RADIUS_KM`]. This is a spherical model, not an ellipsoid; at
//! county scale the error is well under a percent.

use serde::{Deserialize, Serialize};

use crate::CoreError;

pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Kiambu County centre. Used whenever a live location is denied,
/// unsupported, or times out.
pub const DEFAULT_REFERENCE_POINT: GeoPoint = GeoPoint {
    lat: -1.171_1,
    lng: 36.830_4,
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Build a point, rejecting latitudes outside [-90, 90] and longitudes
    /// outside [-180, 180].
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidCoordinate`] when either component is out
    /// of range or not finite.
    pub fn try_new(lat: f64, lng: f64) -> Result<Self, CoreError> {
        let point = Self { lat, lng };
        if point.is_within_bounds() {
            Ok(point)
        } else {
            Err(CoreError::InvalidCoordinate {
                lat,
                lng,
                reason: "latitude must be within [-90, 90] and longitude within [-180, 180]"
                    .to_string(),
            })
        }
    }

    /// Combine optional latitude/longitude parts. Both must be present.
    #[must_use]
    pub fn from_parts(lat: Option<f64>, lng: Option<f64>) -> Option<Self> {
        match (lat, lng) {
            (Some(lat), Some(lng)) => Some(Self { lat, lng }),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_within_bounds(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lng)
    }

    /// Haversine distance to `other` in kilometres.
    #[must_use]
    pub fn distance_km(&self, other: &GeoPoint) -> f64 {
        haversine_km(*self, *other)
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

/// Great-circle distance between two points in kilometres.
///
/// Inputs are not validated; out-of-range degrees propagate through the
/// trigonometry unchanged.
#[must_use]
pub fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

/// Human-readable distance, one decimal place.
#[must_use]
pub fn format_distance(km: f64) -> String {
    format!("{km:.1} km away")
}

/// Google Maps directions link to `point`.
#[must_use]
pub fn directions_url(point: GeoPoint) -> String {
    format!(
        "https://www.google.com/maps/dir/?api=1&destination={},{}",
        point.lat, point.lng
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationSource {
    Live,
    Fallback,
}

impl std::fmt::Display for LocationSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LocationSource::Live => write!(f, "live"),
            LocationSource::Fallback => write!(f, "fallback"),
        }
    }
}

/// The point proximity is measured from, tagged with where it came from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReferencePoint {
    pub point: GeoPoint,
    pub source: LocationSource,
}

impl ReferencePoint {
    /// Use the live point when one was acquired, otherwise `fallback`.
    #[must_use]
    pub fn resolve(live: Option<GeoPoint>, fallback: GeoPoint) -> Self {
        match live {
            Some(point) => Self {
                point,
                source: LocationSource::Live,
            },
            None => Self {
                point: fallback,
                source: LocationSource::Fallback,
            },
        }
    }

    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.source == LocationSource::Fallback
    }
}
