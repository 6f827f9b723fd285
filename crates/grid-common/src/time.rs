//! CF-convention time handling for gridded data.
//!
//! Time coordinates in NetCDF files are stored as numeric offsets from a
//! reference date, described by a `units` attribute such as
//! `"days since 1850-01-01 00:00:00"` and an optional `calendar` attribute.
//! Aggregation only needs the calendar year of each value, so decoding stops
//! there for the fixed-length calendars chrono cannot represent.

use std::str::FromStr;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

const SECONDS_PER_DAY: f64 = 86_400.0;

/// CF calendar of a time coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Calendar {
    /// `standard`, `gregorian`, `proleptic_gregorian`. Decoded as proleptic Gregorian.
    Standard,
    /// `noleap` / `365_day`
    NoLeap,
    /// `all_leap` / `366_day`
    AllLeap,
    /// `360_day`: twelve 30-day months
    Day360,
}

impl Calendar {
    fn year_length(&self) -> Option<u32> {
        match self {
            Calendar::Standard => None,
            Calendar::NoLeap => Some(365),
            Calendar::AllLeap => Some(366),
            Calendar::Day360 => Some(360),
        }
    }

    /// Zero-based day of year for a month/day in a fixed-length calendar.
    fn day_of_year(&self, month: u32, day: u32) -> u32 {
        const NOLEAP: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
        const ALLLEAP: [u32; 12] = [31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

        let months = month.saturating_sub(1) as usize;
        let preceding: u32 = match self {
            Calendar::Day360 => months as u32 * 30,
            Calendar::AllLeap => ALLLEAP.iter().take(months).sum(),
            Calendar::NoLeap | Calendar::Standard => NOLEAP.iter().take(months).sum(),
        };
        preceding + day.saturating_sub(1)
    }
}

impl FromStr for Calendar {
    type Err = TimeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "standard" | "gregorian" | "proleptic_gregorian" => Ok(Calendar::Standard),
            "noleap" | "365_day" => Ok(Calendar::NoLeap),
            "all_leap" | "366_day" => Ok(Calendar::AllLeap),
            "360_day" => Ok(Calendar::Day360),
            other => Err(TimeParseError::UnsupportedCalendar(other.to_string())),
        }
    }
}

/// Reference date split into components, so that dates which only exist in a
/// non-Gregorian calendar (e.g. `2000-02-30` in `360_day`) survive parsing.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ReferenceDate {
    year: i32,
    month: u32,
    day: u32,
    seconds_of_day: f64,
}

impl ReferenceDate {
    fn parse(s: &str) -> Result<Self, TimeParseError> {
        let invalid = || TimeParseError::InvalidFormat(s.to_string());

        let mut cleaned = s.trim();
        for suffix in ["UTC", "utc", "Z", "z", "+00:00", "+0000", "+00"] {
            if let Some(stripped) = cleaned.strip_suffix(suffix) {
                cleaned = stripped.trim_end();
                break;
            }
        }
        let cleaned = cleaned.replacen('T', " ", 1);
        let mut pieces = cleaned.split_whitespace();

        let date = pieces.next().ok_or_else(invalid)?;
        let (year, month, day) = parse_date_part(date).ok_or_else(invalid)?;
        if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
            return Err(invalid());
        }

        let seconds_of_day = match pieces.next() {
            Some(time) => parse_time_part(time).ok_or_else(invalid)?,
            None => 0.0,
        };

        Ok(Self {
            year,
            month,
            day,
            seconds_of_day,
        })
    }

    fn to_gregorian(self) -> Result<NaiveDateTime, TimeParseError> {
        let date = NaiveDate::from_ymd_opt(self.year, self.month, self.day).ok_or_else(|| {
            TimeParseError::InvalidFormat(format!(
                "{:04}-{:02}-{:02} is not a Gregorian date",
                self.year, self.month, self.day
            ))
        })?;
        let midnight = NaiveTime::MIN;
        let millis = (self.seconds_of_day * 1000.0).round() as i64;
        Ok(date.and_time(midnight) + Duration::milliseconds(millis))
    }
}

/// `YYYY-MM-DD`, allowing a leading minus sign and unpadded fields.
fn parse_date_part(s: &str) -> Option<(i32, u32, u32)> {
    let (sign, body) = match s.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, s),
    };
    let mut fields = body.split('-');
    let year: i32 = fields.next()?.parse().ok()?;
    let month: u32 = fields.next().map_or(Some(1), |m| m.parse().ok())?;
    let day: u32 = fields.next().map_or(Some(1), |d| d.parse().ok())?;
    if fields.next().is_some() {
        return None;
    }
    Some((sign * year, month, day))
}

/// `HH[:MM[:SS[.fff]]]` to seconds since midnight.
fn parse_time_part(s: &str) -> Option<f64> {
    let mut fields = s.split(':');
    let hours: f64 = fields.next()?.parse().ok()?;
    let minutes: f64 = fields.next().map_or(Some(0.0), |m| m.parse().ok())?;
    let seconds: f64 = fields.next().map_or(Some(0.0), |v| v.parse().ok())?;
    if fields.next().is_some() {
        return None;
    }
    Some(hours * 3600.0 + minutes * 60.0 + seconds)
}

fn step_seconds(unit: &str) -> Option<f64> {
    let seconds = match unit {
        "seconds" | "second" | "secs" | "sec" | "s" => 1.0,
        "minutes" | "minute" | "mins" | "min" => 60.0,
        "hours" | "hour" | "hrs" | "hr" | "h" => 3600.0,
        "days" | "day" | "d" => SECONDS_PER_DAY,
        "weeks" | "week" => 7.0 * SECONDS_PER_DAY,
        _ => return None,
    };
    Some(seconds)
}

/// Parsed `units`/`calendar` pair of a CF time coordinate.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeUnits {
    step_seconds: f64,
    reference: ReferenceDate,
    calendar: Calendar,
}

impl TimeUnits {
    /// Parse a CF units string such as `"hours since 1900-01-01 00:00:0.0"`.
    ///
    /// A missing calendar attribute means `standard`.
    pub fn parse(units: &str, calendar: Option<&str>) -> Result<Self, TimeParseError> {
        let invalid = || TimeParseError::InvalidUnits(units.to_string());

        let tokens: Vec<&str> = units.split_whitespace().collect();
        if tokens.len() < 3 || !tokens[1].eq_ignore_ascii_case("since") {
            return Err(invalid());
        }

        let step_seconds = step_seconds(&tokens[0].to_lowercase()).ok_or_else(invalid)?;
        let reference = ReferenceDate::parse(&tokens[2..].join(" "))?;
        let calendar = match calendar {
            Some(name) => name.parse()?,
            None => Calendar::Standard,
        };

        if calendar == Calendar::Standard {
            reference.to_gregorian()?;
        }

        Ok(Self {
            step_seconds,
            reference,
            calendar,
        })
    }

    /// Seconds since 1970-01-01 in the standard calendar.
    pub fn unix_seconds() -> Self {
        Self {
            step_seconds: 1.0,
            reference: ReferenceDate {
                year: 1970,
                month: 1,
                day: 1,
                seconds_of_day: 0.0,
            },
            calendar: Calendar::Standard,
        }
    }

    /// Calendar year of an encoded time value.
    pub fn year_of(&self, value: f64) -> Result<i32, TimeParseError> {
        if !value.is_finite() {
            return Err(TimeParseError::OutOfRange(value));
        }
        let offset_seconds = value * self.step_seconds;

        match self.calendar.year_length() {
            None => {
                let millis = offset_seconds * 1000.0;
                if millis.abs() >= i64::MAX as f64 {
                    return Err(TimeParseError::OutOfRange(value));
                }
                let datetime = self
                    .reference
                    .to_gregorian()?
                    .checked_add_signed(Duration::milliseconds(millis.round() as i64))
                    .ok_or(TimeParseError::OutOfRange(value))?;
                Ok(datetime.year())
            }
            Some(days_per_year) => {
                let day_of_year = self
                    .calendar
                    .day_of_year(self.reference.month, self.reference.day);
                let days = day_of_year as f64
                    + (self.reference.seconds_of_day + offset_seconds) / SECONDS_PER_DAY;
                let years = (days / days_per_year as f64).floor();
                if years.abs() > i32::MAX as f64 {
                    return Err(TimeParseError::OutOfRange(value));
                }
                Ok(self.reference.year + years as i32)
            }
        }
    }
}

/// A decoded-on-demand time coordinate.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeAxis {
    values: Vec<f64>,
    units: TimeUnits,
}

impl TimeAxis {
    pub fn new(values: Vec<f64>, units: TimeUnits) -> Self {
        Self { values, units }
    }

    /// Build a standard-calendar axis from timestamps.
    pub fn from_datetimes(times: &[NaiveDateTime]) -> Self {
        let values = times
            .iter()
            .map(|t| t.and_utc().timestamp() as f64)
            .collect();
        Self::new(values, TimeUnits::unix_seconds())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Year label of each time value, truncated to year granularity.
    pub fn year_labels(&self) -> Result<Vec<String>, TimeParseError> {
        self.values
            .iter()
            .map(|&v| self.units.year_of(v).map(year_label))
            .collect()
    }
}

/// Four-character, zero-padded year label.
pub fn year_label(year: i32) -> String {
    format!("{:04}", year)
}

#[derive(Debug, thiserror::Error)]
pub enum TimeParseError {
    #[error("Invalid time format: {0}")]
    InvalidFormat(String),

    #[error("Invalid time units: '{0}'. Expected '<unit> since <date>'")]
    InvalidUnits(String),

    #[error("Unsupported calendar: {0}")]
    UnsupportedCalendar(String),

    #[error("Time value out of range: {0}")]
    OutOfRange(f64),
}
