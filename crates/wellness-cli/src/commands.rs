//! Command handlers for the CLI.
//!
//! Handlers print to stdout. Rendering is split into `render_*` functions
//! that return strings so output can be checked without capturing stdout.

use std::fmt::{self, Write as _};

use chrono::{Datelike, NaiveDateTime};
use wellness_core::{
    directions_url, format_distance, nearest, resolve_open_status, weekly_schedule, AppConfig,
    Directory, FacilityCategory, FacilityFilter, FacilityRecord, GeoPoint, OpenStatus,
    RankedFacility, ReferencePoint,
};

use crate::LocationArgs;

/// Resolve the viewer position from CLI flags, falling back to the
/// configured default.
pub(crate) fn reference_point(
    location: LocationArgs,
    config: &AppConfig,
) -> anyhow::Result<ReferencePoint> {
    let live = GeoPoint::from_parts(location.lat, location.lng)
        .map(|p| GeoPoint::try_new(p.lat, p.lng))
        .transpose()?;
    let reference = ReferencePoint::resolve(live, config.default_reference_point);
    if reference.is_fallback() {
        tracing::info!(point = %reference.point, "no location given; using fallback reference point");
    }
    Ok(reference)
}

fn now() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}

fn find<'a>(directory: &'a Directory, id: &str) -> anyhow::Result<&'a FacilityRecord> {
    directory
        .get(id)
        .ok_or_else(|| anyhow::anyhow!("facility '{id}' not found"))
}

pub(crate) fn run_list(
    directory: &Directory,
    config: &AppConfig,
    search: Option<String>,
    category: &str,
    emergency: bool,
    location: LocationArgs,
) -> anyhow::Result<()> {
    let filter = FacilityFilter {
        search_term: search,
        category: FacilityCategory::parse_filter(category)?,
        emergency: emergency.then_some(true),
    };
    let reference = reference_point(location, config)?;

    let ranked = directory.listing(&filter, reference.point);
    if ranked.is_empty() {
        println!("No healthcare facilities found. Try adjusting your filters or search term.");
        return Ok(());
    }

    print!("{}", render_listing(&ranked, &now())?);
    Ok(())
}

pub(crate) fn run_nearest(
    directory: &Directory,
    config: &AppConfig,
    location: LocationArgs,
    limit: Option<usize>,
) -> anyhow::Result<()> {
    let reference = reference_point(location, config)?;
    let limit = limit.unwrap_or(config.nearest_limit);
    let ranked = nearest(directory.all(), reference.point, limit);
    print!("{}", render_listing(&ranked, &now())?);
    Ok(())
}

pub(crate) fn run_show(
    directory: &Directory,
    config: &AppConfig,
    id: &str,
    location: LocationArgs,
) -> anyhow::Result<()> {
    let facility = find(directory, id)?;
    let reference = reference_point(location, config)?;
    let distance_km = reference.point.distance_km(&facility.location);
    print!("{}", render_detail(facility, distance_km, &now())?);
    Ok(())
}

pub(crate) fn run_hours(
    directory: &Directory,
    id: &str,
    at: Option<NaiveDateTime>,
) -> anyhow::Result<()> {
    let facility = find(directory, id)?;
    let instant = at.unwrap_or_else(now);
    let status = resolve_open_status(&facility.hours, &instant);
    println!("{}: {}", facility.name, describe(&status));
    print!("{}", render_schedule(facility, &instant)?);
    Ok(())
}

pub(crate) fn run_categories(directory: &Directory) {
    for (category, count) in directory.count_by_category() {
        println!("{category:<12} {count} facilities");
    }
}

fn describe(status: &OpenStatus) -> String {
    let state = if status.is_open { "open" } else { "closed" };
    format!("{state} ({})", status.status)
}

pub(crate) fn render_listing(
    ranked: &[RankedFacility<'_, FacilityRecord>],
    now: &NaiveDateTime,
) -> Result<String, fmt::Error> {
    let mut out = String::new();
    for entry in ranked {
        let facility = entry.item;
        let status = resolve_open_status(&facility.hours, now);
        let emergency = if facility.emergency { " [24/7 emergency]" } else { "" };
        writeln!(
            out,
            "{:>3}  {} ({}){}  {}  {}",
            facility.id,
            facility.name,
            facility.category,
            emergency,
            format_distance(entry.distance_km),
            status.status,
        )?;
    }
    Ok(out)
}

pub(crate) fn render_detail(
    facility: &FacilityRecord,
    distance_km: f64,
    now: &NaiveDateTime,
) -> Result<String, fmt::Error> {
    let status = resolve_open_status(&facility.hours, now);
    let mut out = String::new();
    writeln!(out, "{} ({})", facility.name, facility.category)?;
    writeln!(out, "  Address:    {}", facility.address)?;
    writeln!(out, "  Phone:      {}", facility.contact.phone)?;
    writeln!(out, "  Email:      {}", facility.contact.email)?;
    if let Some(website) = &facility.contact.website {
        writeln!(out, "  Website:    {website}")?;
    }
    if let Some(rating) = facility.rating {
        writeln!(out, "  Rating:     {rating:.1}")?;
    }
    if facility.emergency {
        writeln!(out, "  Emergency:  24/7 emergency services")?;
    }
    writeln!(out, "  Distance:   {}", format_distance(distance_km))?;
    writeln!(out, "  Status:     {}", describe(&status))?;
    writeln!(out, "  Directions: {}", directions_url(facility.location))?;
    if !facility.services.is_empty() {
        writeln!(out, "  Services:   {}", facility.services.join(", "))?;
    }
    out.push_str(&render_schedule(facility, now)?);
    Ok(out)
}

pub(crate) fn render_schedule(
    facility: &FacilityRecord,
    now: &NaiveDateTime,
) -> Result<String, fmt::Error> {
    let mut out = String::from("  Opening hours:\n");
    for row in weekly_schedule(&facility.hours, now.weekday()) {
        let marker = if row.is_today { " <- today" } else { "" };
        let hours = if row.hours.is_empty() { "unknown" } else { &row.hours };
        writeln!(out, "    {:<10} {hours}{marker}", row.day)?;
    }
    Ok(out)
}

#[cfg(test)]
#[path = "commands_test.rs"]
mod tests;
