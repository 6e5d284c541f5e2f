//! Ordering by distance from a reference point.
//!
//! Sorting never touches the input: results are fresh vectors of borrowed
//! items. Ties keep their input order because `sort_by` is stable.

use std::cmp::Ordering;

use crate::facilities::FacilityRecord;
use crate::geo::{haversine_km, GeoPoint};

/// Anything with a position on the map.
pub trait Located {
    fn location(&self) -> GeoPoint;
}

impl Located for GeoPoint {
    fn location(&self) -> GeoPoint {
        *self
    }
}

impl<T: Located + ?Sized> Located for &T {
    fn location(&self) -> GeoPoint {
        (**self).location()
    }
}

impl Located for FacilityRecord {
    fn location(&self) -> GeoPoint {
        self.location
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankedFacility<'a, T> {
    pub item: &'a T,
    pub distance_km: f64,
}

/// Items paired with their distance from `reference`, nearest first.
///
/// A NaN distance (from non-finite coordinates) sorts after every number.
#[must_use]
pub fn rank_by_distance<T: Located>(
    items: &[T],
    reference: GeoPoint,
) -> Vec<RankedFacility<'_, T>> {
    let mut ranked: Vec<RankedFacility<'_, T>> = items
        .iter()
        .map(|item| RankedFacility {
            item,
            distance_km: haversine_km(reference, item.location()),
        })
        .collect();
    ranked.sort_by(|a, b| by_distance(a.distance_km, b.distance_km));
    ranked
}

fn by_distance(a: f64, b: f64) -> Ordering {
    a.is_nan()
        .cmp(&b.is_nan())
        .then_with(|| a.partial_cmp(&b).unwrap_or(Ordering::Equal))
}

/// Items ordered nearest first.
#[must_use]
pub fn sort_by_distance<T: Located>(items: &[T], reference: GeoPoint) -> Vec<&T> {
    rank_by_distance(items, reference)
        .into_iter()
        .map(|r| r.item)
        .collect()
}

/// The `limit` items closest to `reference`.
#[must_use]
pub fn nearest<T: Located>(
    items: &[T],
    reference: GeoPoint,
    limit: usize,
) -> Vec<RankedFacility<'_, T>> {
    let mut ranked = rank_by_distance(items, reference);
    ranked.truncate(limit);
    ranked
}
