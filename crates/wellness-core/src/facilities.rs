use std::collections::HashSet;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::directory::Directory;
use crate::geo::GeoPoint;
use crate::hours::WeeklyHours;
use crate::{ConfigError, CoreError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FacilityCategory {
    Hospital,
    Clinic,
    Maternity,
    Dental,
    Specialized,
}

impl FacilityCategory {
    pub const ALL: [FacilityCategory; 5] = [
        FacilityCategory::Hospital,
        FacilityCategory::Clinic,
        FacilityCategory::Maternity,
        FacilityCategory::Dental,
        FacilityCategory::Specialized,
    ];

    /// Parse a user-supplied category filter. `"All"` (any case) and the
    /// empty string mean no filter and yield `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnknownCategory`] for anything else that is not a
    /// category name.
    pub fn parse_filter(raw: &str) -> Result<Option<Self>, CoreError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            return Ok(None);
        }
        trimmed.parse().map(Some)
    }
}

impl std::fmt::Display for FacilityCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FacilityCategory::Hospital => write!(f, "Hospital"),
            FacilityCategory::Clinic => write!(f, "Clinic"),
            FacilityCategory::Maternity => write!(f, "Maternity"),
            FacilityCategory::Dental => write!(f, "Dental"),
            FacilityCategory::Specialized => write!(f, "Specialized"),
        }
    }
}

impl FromStr for FacilityCategory {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.to_string().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CoreError::UnknownCategory(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub phone: String,
    pub email: String,
    pub website: Option<String>,
}

/// A facility as listed in the directory. Only `id`, `category`,
/// `location`, `hours` and `emergency` carry meaning for the core; the rest
/// is passed through for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacilityRecord {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub category: FacilityCategory,
    pub address: String,
    pub location: GeoPoint,
    pub contact: Contact,
    #[serde(default)]
    pub hours: WeeklyHours,
    #[serde(default)]
    pub services: Vec<String>,
    pub rating: Option<f32>,
    pub emergency: bool,
    pub image: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct FacilitiesFile {
    pub facilities: Vec<FacilityRecord>,
}

/// Load and validate the facility dataset from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_facilities(path: &Path) -> Result<Directory, ConfigError> {
    let content =
        std::fs::read_to_string(path).map_err(|e| ConfigError::FacilitiesFileIo {
            path: path.display().to_string(),
            source: e,
        })?;

    let file: FacilitiesFile =
        serde_yaml::from_str(&content).map_err(ConfigError::FacilitiesFileParse)?;

    validate_facilities(&file)?;

    Ok(Directory::new(file.facilities))
}

fn validate_facilities(file: &FacilitiesFile) -> Result<(), ConfigError> {
    let mut seen_ids = HashSet::new();

    for facility in &file.facilities {
        if facility.id.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "facility '{}' has an empty id",
                facility.name
            )));
        }

        if facility.name.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "facility '{}' has an empty name",
                facility.id
            )));
        }

        if !seen_ids.insert(facility.id.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate facility id: '{}'",
                facility.id
            )));
        }

        if !facility.location.is_within_bounds() {
            return Err(ConfigError::Validation(format!(
                "facility '{}' has out-of-range location {}",
                facility.id, facility.location
            )));
        }

        if let Some(rating) = facility.rating {
            if !(0.0..=5.0).contains(&rating) {
                return Err(ConfigError::Validation(format!(
                    "facility '{}' has invalid rating {rating}; must be between 0 and 5",
                    facility.id
                )));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "facilities_test.rs"]
mod tests;
