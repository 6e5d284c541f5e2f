//! Case-insensitive substring search and attribute filters.

use crate::facilities::{FacilityCategory, FacilityRecord};

/// Directory filter. Every field left as `None` places no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FacilityFilter {
    /// Matched against name, address and each service.
    pub search_term: Option<String>,
    pub category: Option<FacilityCategory>,
    pub emergency: Option<bool>,
}

impl FacilityFilter {
    #[must_use]
    pub fn matches(&self, facility: &FacilityRecord) -> bool {
        self.matches_search(facility)
            && self.category.is_none_or(|c| facility.category == c)
            && self.emergency.is_none_or(|e| facility.emergency == e)
    }

    fn matches_search(&self, facility: &FacilityRecord) -> bool {
        let Some(term) = self.search_term.as_deref() else {
            return true;
        };
        if term.is_empty() {
            return true;
        }
        let needle = term.to_lowercase();
        facility.name.to_lowercase().contains(&needle)
            || facility.address.to_lowercase().contains(&needle)
            || facility
                .services
                .iter()
                .any(|s| s.to_lowercase().contains(&needle))
    }
}

/// Records matching `filter`, in input order.
#[must_use]
pub fn filter_facilities<'a>(
    facilities: &'a [FacilityRecord],
    filter: &FacilityFilter,
) -> Vec<&'a FacilityRecord> {
    facilities.iter().filter(|f| filter.matches(f)).collect()
}
