//! Immutable in-memory facility collection.
//!
//! Records live in a single arena in dataset order; an id index resolves
//! identity keys to arena slots. Nothing mutates a `Directory` after
//! construction, so it can be shared behind an `Arc` across handlers.

use std::collections::HashMap;

use crate::facilities::{FacilityCategory, FacilityRecord};
use crate::geo::GeoPoint;
use crate::proximity::{rank_by_distance, RankedFacility};
use crate::search::{filter_facilities, FacilityFilter};

#[derive(Debug, Clone, Default)]
pub struct Directory {
    facilities: Vec<FacilityRecord>,
    index: HashMap<String, usize>,
}

impl Directory {
    /// Build a directory from `facilities`. If an id repeats, lookups by
    /// that id resolve to its first occurrence.
    #[must_use]
    pub fn new(facilities: Vec<FacilityRecord>) -> Self {
        let mut index = HashMap::with_capacity(facilities.len());
        for (slot, facility) in facilities.iter().enumerate() {
            index.entry(facility.id.clone()).or_insert(slot);
        }
        Self { facilities, index }
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&FacilityRecord> {
        self.index.get(id).map(|&slot| &self.facilities[slot])
    }

    #[must_use]
    pub fn all(&self) -> &[FacilityRecord] {
        &self.facilities
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.facilities.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.facilities.is_empty()
    }

    #[must_use]
    pub fn filter(&self, filter: &FacilityFilter) -> Vec<&FacilityRecord> {
        filter_facilities(&self.facilities, filter)
    }

    /// Matching facilities with their distance from `reference`, nearest
    /// first.
    #[must_use]
    pub fn listing(
        &self,
        filter: &FacilityFilter,
        reference: GeoPoint,
    ) -> Vec<RankedFacility<'_, FacilityRecord>> {
        let matches = self.filter(filter);
        rank_by_distance(&matches, reference)
            .into_iter()
            .map(|ranked| RankedFacility {
                item: *ranked.item,
                distance_km: ranked.distance_km,
            })
            .collect()
    }

    /// Facility count for every category, in [`FacilityCategory::ALL`] order.
    /// Categories with no facilities are included with a count of zero.
    #[must_use]
    pub fn count_by_category(&self) -> Vec<(FacilityCategory, usize)> {
        FacilityCategory::ALL
            .into_iter()
            .map(|category| {
                let count = self
                    .facilities
                    .iter()
                    .filter(|f| f.category == category)
                    .count();
                (category, count)
            })
            .collect()
    }
}
