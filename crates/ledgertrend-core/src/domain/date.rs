use std::fmt::{Display, Formatter};

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;
use time::format_description::well_known::Rfc3339;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, Duration, OffsetDateTime, PrimitiveDateTime};

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");
const DATETIME_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
const DATETIME_T_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");

/// Raised when a source date value matches none of the accepted formats.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unparseable date value '{value}'")]
pub struct DateParseError {
    pub value: String,
}

/// Calendar date carried by every ledger record and series point.
///
/// Source extracts may carry a bare date, a datetime, or an RFC3339
/// timestamp; the time-of-day portion is discarded on parse because all
/// bucketing operates on calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LedgerDate(Date);

impl LedgerDate {
    pub fn parse(input: &str) -> Result<Self, DateParseError> {
        let trimmed = input.trim();

        if let Ok(date) = Date::parse(trimmed, DATE_FORMAT) {
            return Ok(Self(date));
        }
        if let Ok(datetime) = PrimitiveDateTime::parse(trimmed, DATETIME_FORMAT) {
            return Ok(Self(datetime.date()));
        }
        if let Ok(datetime) = PrimitiveDateTime::parse(trimmed, DATETIME_T_FORMAT) {
            return Ok(Self(datetime.date()));
        }
        if let Ok(datetime) = OffsetDateTime::parse(trimmed, &Rfc3339) {
            return Ok(Self(datetime.date()));
        }

        Err(DateParseError {
            value: input.to_owned(),
        })
    }

    pub const fn into_inner(self) -> Date {
        self.0
    }

    pub fn next_day(self) -> Option<Self> {
        self.0.next_day().map(Self)
    }

    /// End of the calendar week containing this date. Weeks end on Sunday.
    pub fn week_end(self) -> Self {
        let offset = 6 - i64::from(self.0.weekday().number_days_from_monday());
        Self(self.0 + Duration::days(offset))
    }

    /// Last day of the calendar month containing this date.
    pub fn month_end(self) -> Self {
        let year = self.0.year();
        let month = self.0.month();
        let last = Date::from_calendar_date(year, month, month.length(year))
            .expect("month length must be a valid day of month");
        Self(last)
    }

    pub fn format_iso(self) -> String {
        self.0
            .format(DATE_FORMAT)
            .expect("LedgerDate must be ISO formattable")
    }
}

impl Display for LedgerDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.format_iso())
    }
}

impl Serialize for LedgerDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.format_iso())
    }
}

impl<'de> Deserialize<'de> for LedgerDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value).map_err(D::Error::custom)
    }
}
