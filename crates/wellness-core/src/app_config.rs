use std::net::SocketAddr;
use std::path::PathBuf;

use crate::geo::GeoPoint;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub facilities_path: PathBuf,
    /// Used as the reference point whenever no live location is supplied.
    pub default_reference_point: GeoPoint,
    pub nearest_limit: usize,
}
