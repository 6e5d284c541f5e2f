use chrono::{NaiveDate, NaiveDateTime};

use super::*;

/// 2024-01-01 was a Monday.
fn monday_at(hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .and_then(|d| d.and_hms_opt(hour, minute, 0))
        .expect("valid test instant")
}

fn office_week() -> WeeklyHours {
    WeeklyHours {
        monday: "8:00 AM - 5:00 PM".to_string(),
        tuesday: "8:00 AM - 5:00 PM".to_string(),
        wednesday: "8:00 AM - 5:00 PM".to_string(),
        thursday: "8:00 AM - 5:00 PM".to_string(),
        friday: "8:00 AM - 5:00 PM".to_string(),
        saturday: "9:00 AM - 1:00 PM".to_string(),
        sunday: "Closed".to_string(),
    }
}

fn status(is_open: bool, text: &str) -> OpenStatus {
    OpenStatus {
        is_open,
        status: text.to_string(),
    }
}

#[test]
fn closed_literal_is_closed_today() {
    let hours = WeeklyHours::every_day("Closed");
    assert_eq!(
        resolve_open_status(&hours, &monday_at(10, 0)),
        status(false, "Closed today")
    );
}

#[test]
fn all_day_literal_is_open() {
    let hours = WeeklyHours::every_day("24 hours");
    assert_eq!(
        resolve_open_status(&hours, &monday_at(3, 15)),
        status(true, "Open 24 hours")
    );
}

#[test]
fn literals_are_case_sensitive() {
    let hours = WeeklyHours::every_day("closed");
    assert_eq!(
        resolve_open_status(&hours, &monday_at(10, 0)),
        status(false, "Hours unknown")
    );
}

#[test]
fn inside_window_is_open_until_close() {
    assert_eq!(
        resolve_open_status(&office_week(), &monday_at(14, 30)),
        status(true, "Open until 5:00 PM")
    );
}

#[test]
fn before_opening_reports_opening_time() {
    assert_eq!(
        resolve_open_status(&office_week(), &monday_at(6, 0)),
        status(false, "Opens at 8:00 AM")
    );
}

#[test]
fn after_closing_is_closed_now() {
    assert_eq!(
        resolve_open_status(&office_week(), &monday_at(19, 0)),
        status(false, "Closed now")
    );
}

#[test]
fn opening_minute_is_inclusive_and_closing_minute_exclusive() {
    let week = office_week();
    assert!(resolve_open_status(&week, &monday_at(8, 0)).is_open);
    assert_eq!(
        resolve_open_status(&week, &monday_at(7, 59)),
        status(false, "Opens at 8:00 AM")
    );
    assert!(resolve_open_status(&week, &monday_at(16, 59)).is_open);
    assert_eq!(
        resolve_open_status(&week, &monday_at(17, 0)),
        status(false, "Closed now")
    );
}

#[test]
fn malformed_string_is_hours_unknown() {
    let mut week = office_week();
    week.monday = "garbage".to_string();
    assert_eq!(
        resolve_open_status(&week, &monday_at(12, 0)),
        status(false, "Hours unknown")
    );
}

#[test]
fn half_malformed_range_is_hours_unknown() {
    let mut week = office_week();
    week.monday = "8:00 AM - late".to_string();
    assert_eq!(
        resolve_open_status(&week, &monday_at(12, 0)),
        status(false, "Hours unknown")
    );
    week.monday = "13:00 PM - 5:00 PM".to_string();
    assert_eq!(
        resolve_open_status(&week, &monday_at(12, 0)),
        status(false, "Hours unknown")
    );
}

#[test]
fn missing_day_is_hours_unknown() {
    let week: WeeklyHours =
        serde_json::from_str(r#"{"tuesday": "24 hours"}"#).expect("partial week parses");
    assert_eq!(week.monday, "");
    assert_eq!(
        resolve_open_status(&week, &monday_at(12, 0)),
        status(false, "Hours unknown")
    );
}

#[test]
fn uses_the_weekday_of_now() {
    let week = office_week();
    // 2024-01-07 was a Sunday.
    let sunday = NaiveDate::from_ymd_opt(2024, 1, 7)
        .and_then(|d| d.and_hms_opt(10, 0, 0))
        .expect("valid instant");
    assert_eq!(
        resolve_open_status(&week, &sunday),
        status(false, "Closed today")
    );

    let saturday = NaiveDate::from_ymd_opt(2024, 1, 6)
        .and_then(|d| d.and_hms_opt(12, 30, 0))
        .expect("valid instant");
    assert_eq!(
        resolve_open_status(&week, &saturday),
        status(true, "Open until 1:00 PM")
    );
}

#[test]
fn meridiem_is_case_insensitive() {
    let mut week = office_week();
    week.monday = "8:00 am - 5:00 pm".to_string();
    assert_eq!(
        resolve_open_status(&week, &monday_at(9, 0)),
        status(true, "Open until 5:00 pm")
    );
}

#[test]
fn overnight_range_never_resolves_open() {
    let mut week = office_week();
    week.monday = "10:00 PM - 2:00 AM".to_string();
    assert_eq!(
        resolve_open_status(&week, &monday_at(23, 0)),
        status(false, "Closed now")
    );
    assert_eq!(
        resolve_open_status(&week, &monday_at(1, 0)),
        status(false, "Opens at 10:00 PM")
    );
}

#[test]
fn resolve_is_idempotent() {
    let week = office_week();
    let now = monday_at(14, 30);
    assert_eq!(
        resolve_open_status(&week, &now),
        resolve_open_status(&week, &now)
    );
}

#[test]
fn parse_12h_converts_noon_and_midnight() {
    assert_eq!(
        ClockTime::parse_12h("12:00 AM"),
        Some(ClockTime { hour: 0, minute: 0 })
    );
    assert_eq!(
        ClockTime::parse_12h("12:30 PM"),
        Some(ClockTime {
            hour: 12,
            minute: 30
        })
    );
    assert_eq!(
        ClockTime::parse_12h("1:05 PM"),
        Some(ClockTime {
            hour: 13,
            minute: 5
        })
    );
    assert_eq!(
        ClockTime::parse_12h("11:59 AM"),
        Some(ClockTime {
            hour: 11,
            minute: 59
        })
    );
}

#[test]
fn parse_12h_rejects_malformed_times() {
    for bad in [
        "0:30 AM", "13:00 PM", "8:0 AM", "8:60 AM", "8:00", "8:00 XM", "8:00AM", "noon", "",
    ] {
        assert_eq!(ClockTime::parse_12h(bad), None, "accepted {bad:?}");
    }
}

#[test]
fn day_hours_keeps_range_text_as_written() {
    let parsed = DayHours::parse("9:00 AM - 1:00 PM");
    assert_eq!(
        parsed,
        DayHours::Range {
            open: ClockTime { hour: 9, minute: 0 },
            close: ClockTime {
                hour: 13,
                minute: 0
            },
            open_text: "9:00 AM",
            close_text: "1:00 PM",
        }
    );
    assert_eq!(DayHours::parse("9:00 AM to 1:00 PM"), DayHours::Unknown);
}

#[test]
fn weekly_schedule_is_monday_first_and_flags_today() {
    let rows = weekly_schedule(&office_week(), Weekday::Sat);
    let days: Vec<&str> = rows.iter().map(|r| r.day.as_str()).collect();
    assert_eq!(
        days,
        [
            "Monday",
            "Tuesday",
            "Wednesday",
            "Thursday",
            "Friday",
            "Saturday",
            "Sunday"
        ]
    );
    let today: Vec<&ScheduleRow> = rows.iter().filter(|r| r.is_today).collect();
    assert_eq!(today.len(), 1);
    assert_eq!(today[0].day, "Saturday");
    assert_eq!(today[0].hours, "9:00 AM - 1:00 PM");
    assert_eq!(rows[6].hours, "Closed");
}
