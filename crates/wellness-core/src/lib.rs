pub mod app_config;
pub mod config;
pub mod directory;
pub mod facilities;
pub mod geo;
pub mod hours;
pub mod map;
pub mod proximity;
pub mod search;

#[cfg(test)]
mod test_support;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use directory::Directory;
pub use facilities::{load_facilities, Contact, FacilitiesFile, FacilityCategory, FacilityRecord};
pub use geo::{
    directions_url, format_distance, haversine_km, GeoPoint, LocationSource, ReferencePoint,
    DEFAULT_REFERENCE_POINT, EARTH_RADIUS_KM,
};
pub use hours::{
    resolve_open_status, weekly_schedule, ClockTime, DayHours, OpenStatus, ScheduleRow,
    WeeklyHours,
};
pub use map::{MapProjection, PixelOffset};
pub use proximity::{nearest, rank_by_distance, sort_by_distance, Located, RankedFacility};
pub use search::{filter_facilities, FacilityFilter};

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown facility category: {0}")]
    UnknownCategory(String),

    #[error("invalid coordinate {lat},{lng}: {reason}")]
    InvalidCoordinate { lat: f64, lng: f64, reason: String },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read facilities file {path}: {source}")]
    FacilitiesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse facilities file: {0}")]
    FacilitiesFileParse(#[source] serde_yaml::Error),

    #[error("facilities validation failed: {0}")]
    Validation(String),
}
