// File: crates/spc-core/src/dates.rs
// Summary: Date recognition for category values and day/month/year label formatting.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::input::PrimitiveValue;

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];
const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Calendar date carried by a category value, if it is one.
pub fn parse_date(value: &PrimitiveValue) -> Option<NaiveDate> {
    match value {
        PrimitiveValue::Date(dt) => Some(dt.date()),
        PrimitiveValue::Text(s) => parse_date_str(s.trim()),
        _ => None,
    }
}

fn parse_date_str(s: &str) -> Option<NaiveDate> {
    if s.is_empty() {
        return None;
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive())
}

pub fn is_date(value: &PrimitiveValue) -> bool { parse_date(value).is_some() }

/// `DD/MM/YYYY` rendering of a date value.
pub fn to_day_month_year(value: &PrimitiveValue) -> Option<String> {
    parse_date(value).map(|d| d.format("%d/%m/%Y").to_string())
}

/// Label text for one category value: dates in day/month/year, everything else verbatim.
pub fn category_label(value: &PrimitiveValue) -> String {
    to_day_month_year(value).unwrap_or_else(|| value.to_label())
}
