//! Linear degree-to-pixel projection for the directory's mock map.
//!
//! The map has no tiles; markers are placed at a fixed number of pixels per
//! degree away from the map centre, where the viewer marker sits.

use serde::Serialize;

use crate::geo::GeoPoint;

pub const DEFAULT_MAP_CENTER: GeoPoint = GeoPoint {
    lat: -1.17,
    lng: 36.83,
};

pub const DEFAULT_PIXELS_PER_DEGREE: f64 = 800.0;

/// Offset from the map centre in screen pixels. `dy` grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PixelOffset {
    pub dx: f64,
    pub dy: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapProjection {
    pub center: GeoPoint,
    pub pixels_per_degree: f64,
}

impl Default for MapProjection {
    fn default() -> Self {
        Self {
            center: DEFAULT_MAP_CENTER,
            pixels_per_degree: DEFAULT_PIXELS_PER_DEGREE,
        }
    }
}

impl MapProjection {
    #[must_use]
    pub fn project(&self, point: GeoPoint) -> PixelOffset {
        PixelOffset {
            dx: (point.lng - self.center.lng) * self.pixels_per_degree,
            dy: -(point.lat - self.center.lat) * self.pixels_per_degree,
        }
    }
}
