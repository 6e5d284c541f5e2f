use std::{fmt::Display, str::FromStr};

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    Extension, Json,
};
use chrono::{Datelike, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use wellness_core::{
    directions_url, format_distance, nearest, resolve_open_status, weekly_schedule, Contact,
    FacilityCategory, FacilityFilter, FacilityRecord, GeoPoint, MapProjection, OpenStatus,
    PixelOffset, ReferencePoint, ScheduleRow,
};

use crate::middleware::RequestId;

use super::{normalize_limit, ApiError, ApiResponse, AppState, ResponseMeta};

/// Blank form fields (`?lat=&lng=`) arrive as empty strings; treat them as
/// absent rather than as parse failures.
fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct ListFacilitiesQuery {
    #[serde(deserialize_with = "empty_as_none")]
    pub search: Option<String>,
    #[serde(deserialize_with = "empty_as_none")]
    pub category: Option<String>,
    #[serde(deserialize_with = "empty_as_none")]
    pub emergency: Option<bool>,
    #[serde(deserialize_with = "empty_as_none")]
    pub lat: Option<f64>,
    #[serde(deserialize_with = "empty_as_none")]
    pub lng: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct NearestQuery {
    #[serde(deserialize_with = "empty_as_none")]
    pub lat: Option<f64>,
    #[serde(deserialize_with = "empty_as_none")]
    pub lng: Option<f64>,
    #[serde(deserialize_with = "empty_as_none")]
    pub limit: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct LocationQuery {
    #[serde(deserialize_with = "empty_as_none")]
    pub lat: Option<f64>,
    #[serde(deserialize_with = "empty_as_none")]
    pub lng: Option<f64>,
}

#[derive(Debug, Serialize)]
pub(super) struct FacilityItem {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub category: FacilityCategory,
    pub address: String,
    pub location: GeoPoint,
    pub contact: Contact,
    pub services: Vec<String>,
    pub rating: Option<f32>,
    pub emergency: bool,
    pub image: Option<String>,
    pub open_status: OpenStatus,
    pub distance_km: f64,
    pub distance_label: String,
    pub directions_url: String,
    pub map_offset: PixelOffset,
}

#[derive(Debug, Serialize)]
pub(super) struct FacilityListData {
    pub reference: ReferencePoint,
    pub facilities: Vec<FacilityItem>,
}

#[derive(Debug, Serialize)]
pub(super) struct FacilityDetail {
    #[serde(flatten)]
    pub facility: FacilityItem,
    pub reference: ReferencePoint,
    pub schedule: Vec<ScheduleRow>,
}

#[derive(Debug, Serialize)]
pub(super) struct CategoryCount {
    #[serde(rename = "type")]
    pub category: FacilityCategory,
    pub count: usize,
}

/// Unwrap a query extractor, turning axum's plain-text rejection into the
/// JSON error envelope.
fn query_params<T>(
    req_id: &RequestId,
    query: Result<Query<T>, QueryRejection>,
) -> Result<T, ApiError> {
    query.map(|Query(params)| params).map_err(|rejection| {
        tracing::debug!(request_id = %req_id.0, error = %rejection, "rejected query string");
        ApiError::new(req_id.0.clone(), "bad_request", rejection.body_text())
    })
}

fn now() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}

/// Live point from the query when both parts are present, otherwise the
/// configured fallback. Out-of-range coordinates are rejected.
fn resolve_reference(
    req_id: &RequestId,
    state: &AppState,
    lat: Option<f64>,
    lng: Option<f64>,
) -> Result<ReferencePoint, ApiError> {
    let live = GeoPoint::from_parts(lat, lng)
        .map(|p| GeoPoint::try_new(p.lat, p.lng))
        .transpose()
        .map_err(|e| ApiError::new(req_id.0.clone(), "validation_error", e.to_string()))?;

    let reference = ReferencePoint::resolve(live, state.fallback_point);
    if reference.is_fallback() {
        tracing::debug!(request_id = %req_id.0, "no location in request; using fallback reference point");
    }
    Ok(reference)
}

pub(super) fn facility_item(
    facility: &FacilityRecord,
    distance_km: f64,
    now: &NaiveDateTime,
) -> FacilityItem {
    FacilityItem {
        id: facility.id.clone(),
        name: facility.name.clone(),
        category: facility.category,
        address: facility.address.clone(),
        location: facility.location,
        contact: facility.contact.clone(),
        services: facility.services.clone(),
        rating: facility.rating,
        emergency: facility.emergency,
        image: facility.image.clone(),
        open_status: resolve_open_status(&facility.hours, now),
        distance_km,
        distance_label: format_distance(distance_km),
        directions_url: directions_url(facility.location),
        map_offset: MapProjection::default().project(facility.location),
    }
}

pub(super) async fn list_facilities(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    query: Result<Query<ListFacilitiesQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<FacilityListData>>, ApiError> {
    let query = query_params(&req_id, query)?;
    let category = FacilityCategory::parse_filter(query.category.as_deref().unwrap_or(""))
        .map_err(|e| ApiError::new(req_id.0.clone(), "validation_error", e.to_string()))?;
    let reference = resolve_reference(&req_id, &state, query.lat, query.lng)?;

    let filter = FacilityFilter {
        search_term: query.search,
        category,
        emergency: query.emergency,
    };

    let now = now();
    let facilities: Vec<FacilityItem> = state
        .directory
        .listing(&filter, reference.point)
        .into_iter()
        .map(|ranked| facility_item(ranked.item, ranked.distance_km, &now))
        .collect();

    tracing::debug!(
        request_id = %req_id.0,
        count = facilities.len(),
        source = %reference.source,
        "listed facilities"
    );

    Ok(Json(ApiResponse {
        data: FacilityListData {
            reference,
            facilities,
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn list_nearest_facilities(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    query: Result<Query<NearestQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<FacilityListData>>, ApiError> {
    let query = query_params(&req_id, query)?;
    let reference = resolve_reference(&req_id, &state, query.lat, query.lng)?;
    let limit = normalize_limit(query.limit, state.nearest_limit);

    let now = now();
    let facilities = nearest(state.directory.all(), reference.point, limit)
        .into_iter()
        .map(|ranked| facility_item(ranked.item, ranked.distance_km, &now))
        .collect();

    Ok(Json(ApiResponse {
        data: FacilityListData {
            reference,
            facilities,
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn get_facility(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(id): Path<String>,
    query: Result<Query<LocationQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<FacilityDetail>>, ApiError> {
    let Some(facility) = state.directory.get(&id) else {
        tracing::debug!(request_id = %req_id.0, facility_id = %id, "facility not found");
        return Err(ApiError::new(
            req_id.0,
            "not_found",
            format!("facility '{id}' not found"),
        ));
    };
    let query = query_params(&req_id, query)?;
    let reference = resolve_reference(&req_id, &state, query.lat, query.lng)?;

    let now = now();
    let distance_km = reference.point.distance_km(&facility.location);

    Ok(Json(ApiResponse {
        data: FacilityDetail {
            facility: facility_item(facility, distance_km, &now),
            reference,
            schedule: weekly_schedule(&facility.hours, now.weekday()),
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn list_categories(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<Vec<CategoryCount>>> {
    let data = state
        .directory
        .count_by_category()
        .into_iter()
        .map(|(category, count)| CategoryCount { category, count })
        .collect();

    Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    })
}
