//! Opening-hours status resolution.
//!
//! Each facility carries one free-text hours string per weekday: the literal
//! `"Closed"`, the literal `"24 hours"`, or a range such as
//! `"8:00 AM - 5:00 PM"`. Resolution is fail-soft: anything that cannot be
//! understood resolves to "Hours unknown" rather than an error.
//!
//! Ranges that cross midnight (`"10:00 PM - 2:00 AM"`) are compared as-is and
//! therefore never resolve as open.

use std::sync::LazyLock;

use chrono::{Datelike, Timelike, Weekday};
use regex::Regex;
use serde::{Deserialize, Serialize};

const CLOSED: &str = "Closed";
const ALL_DAY: &str = "24 hours";

static CLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(1[0-2]|0?[1-9]):([0-5][0-9]) (AM|PM)$").expect("valid clock regex")
});

/// Seven hours strings keyed by weekday. A day missing from the source data
/// deserializes as an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyHours {
    #[serde(default)]
    pub monday: String,
    #[serde(default)]
    pub tuesday: String,
    #[serde(default)]
    pub wednesday: String,
    #[serde(default)]
    pub thursday: String,
    #[serde(default)]
    pub friday: String,
    #[serde(default)]
    pub saturday: String,
    #[serde(default)]
    pub sunday: String,
}

impl WeeklyHours {
    /// Same hours string on every day of the week.
    #[must_use]
    pub fn every_day(hours: &str) -> Self {
        Self {
            monday: hours.to_string(),
            tuesday: hours.to_string(),
            wednesday: hours.to_string(),
            thursday: hours.to_string(),
            friday: hours.to_string(),
            saturday: hours.to_string(),
            sunday: hours.to_string(),
        }
    }

    #[must_use]
    pub fn for_day(&self, day: Weekday) -> &str {
        match day {
            Weekday::Sun => &self.sunday,
            Weekday::Mon => &self.monday,
            Weekday::Tue => &self.tuesday,
            Weekday::Wed => &self.wednesday,
            Weekday::Thu => &self.thursday,
            Weekday::Fri => &self.friday,
            Weekday::Sat => &self.saturday,
        }
    }
}

/// Wall-clock time in 24-hour form. Ordered by hour, then minute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct ClockTime {
    pub hour: u32,
    pub minute: u32,
}

impl ClockTime {
    /// Parse `H:MM AM|PM` (hour 1–12, two-digit minutes, meridiem in any case).
    ///
    /// 12 AM is hour 0, 12 PM stays 12, PM hours 1–11 gain 12.
    #[must_use]
    pub fn parse_12h(text: &str) -> Option<Self> {
        let caps = CLOCK_RE.captures(text)?;
        let hour: u32 = caps[1].parse().ok()?;
        let minute: u32 = caps[2].parse().ok()?;
        let pm = caps[3].eq_ignore_ascii_case("PM");

        let hour = match (hour, pm) {
            (12, false) => 0,
            (12, true) => 12,
            (h, true) => h + 12,
            (h, false) => h,
        };

        Some(Self { hour, minute })
    }

    #[must_use]
    pub fn of<T: Timelike>(instant: &T) -> Self {
        Self {
            hour: instant.hour(),
            minute: instant.minute(),
        }
    }
}

/// A single day's hours string, classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayHours<'a> {
    Closed,
    AllDay,
    Range {
        open: ClockTime,
        close: ClockTime,
        open_text: &'a str,
        close_text: &'a str,
    },
    Unknown,
}

impl<'a> DayHours<'a> {
    #[must_use]
    pub fn parse(text: &'a str) -> Self {
        if text == CLOSED {
            return DayHours::Closed;
        }
        if text == ALL_DAY {
            return DayHours::AllDay;
        }

        let Some((open_text, close_text)) = text.split_once(" - ") else {
            return DayHours::Unknown;
        };
        let (open_text, close_text) = (open_text.trim(), close_text.trim());

        match (
            ClockTime::parse_12h(open_text),
            ClockTime::parse_12h(close_text),
        ) {
            (Some(open), Some(close)) => DayHours::Range {
                open,
                close,
                open_text,
                close_text,
            },
            _ => DayHours::Unknown,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OpenStatus {
    pub is_open: bool,
    pub status: String,
}

impl OpenStatus {
    fn open(status: impl Into<String>) -> Self {
        Self {
            is_open: true,
            status: status.into(),
        }
    }

    fn closed(status: impl Into<String>) -> Self {
        Self {
            is_open: false,
            status: status.into(),
        }
    }
}

/// Decide whether a facility is open at `now` and describe it.
///
/// Only `now`'s weekday, hour and minute are consulted; seconds and
/// timezone are ignored.
#[must_use]
pub fn resolve_open_status<T: Datelike + Timelike>(hours: &WeeklyHours, now: &T) -> OpenStatus {
    match DayHours::parse(hours.for_day(now.weekday())) {
        DayHours::Closed => OpenStatus::closed("Closed today"),
        DayHours::AllDay => OpenStatus::open("Open 24 hours"),
        DayHours::Unknown => OpenStatus::closed("Hours unknown"),
        DayHours::Range {
            open,
            close,
            open_text,
            close_text,
        } => {
            let current = ClockTime::of(now);
            if current >= open && current < close {
                OpenStatus::open(format!("Open until {close_text}"))
            } else if current < open {
                OpenStatus::closed(format!("Opens at {open_text}"))
            } else {
                OpenStatus::closed("Closed now")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleRow {
    pub day: String,
    pub hours: String,
    pub is_today: bool,
}

/// Monday-first display rows for a detail page, flagging `today`.
#[must_use]
pub fn weekly_schedule(hours: &WeeklyHours, today: Weekday) -> Vec<ScheduleRow> {
    let mut day = Weekday::Mon;
    let mut rows = Vec::with_capacity(7);
    for _ in 0..7 {
        rows.push(ScheduleRow {
            day: day_label(day).to_string(),
            hours: hours.for_day(day).to_string(),
            is_today: day == today,
        });
        day = day.succ();
    }
    rows
}

fn day_label(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

#[cfg(test)]
#[path = "hours_test.rs"]
mod tests;
