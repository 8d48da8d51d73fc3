//! Period representation
//!
//! A period is the calendar bucket a summary is scoped to: a month, an ISO
//! week, a custom date range, or everything. Month and week periods have a
//! string key (`YYYY-MM`, `YYYY-WW`) that is derived solely from a date, so
//! two dates in the same bucket always produce the same key. Zero-padding
//! makes lexicographic key order chronological.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{SpendscopeError, SpendscopeResult};

/// Bucket size used when enumerating periods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// Calendar months (e.g., "2025-01")
    #[default]
    Monthly,
    /// ISO weeks (e.g., "2025-03")
    Weekly,
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Monthly => write!(f, "monthly"),
            Self::Weekly => write!(f, "weekly"),
        }
    }
}

/// How the caller scopes a view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodMode {
    Monthly,
    Weekly,
    Custom,
    All,
}

impl PeriodMode {
    /// The bucket granularity, for modes that select by period key
    pub fn granularity(&self) -> Option<Granularity> {
        match self {
            Self::Monthly => Some(Granularity::Monthly),
            Self::Weekly => Some(Granularity::Weekly),
            Self::Custom | Self::All => None,
        }
    }
}

impl From<Granularity> for PeriodMode {
    fn from(granularity: Granularity) -> Self {
        match granularity {
            Granularity::Monthly => Self::Monthly,
            Granularity::Weekly => Self::Weekly,
        }
    }
}

impl fmt::Display for PeriodMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Monthly => write!(f, "monthly"),
            Self::Weekly => write!(f, "weekly"),
            Self::Custom => write!(f, "custom"),
            Self::All => write!(f, "all"),
        }
    }
}

/// Inclusive calendar-date bounds; `start <= end` always holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Create a range, rejecting a start after the end
    pub fn new(start: NaiveDate, end: NaiveDate) -> SpendscopeResult<Self> {
        if start > end {
            return Err(SpendscopeError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// A single-day range
    pub fn day(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Check if a date falls within the range (both ends inclusive)
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Widen the range so it includes a date
    pub fn extend_to(self, date: NaiveDate) -> Self {
        Self {
            start: self.start.min(date),
            end: self.end.max(date),
        }
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}..{}",
            self.start.format("%Y-%m-%d"),
            self.end.format("%Y-%m-%d")
        )
    }
}

/// A selectable period
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum Period {
    /// Calendar month
    Month { year: i32, month: u32 },

    /// ISO week, keyed by ISO week-numbering year
    Week { year: i32, week: u32 },

    /// Caller-supplied bounds; a missing bound defaults to the data's extent
    Custom {
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    },

    /// Every dated transaction
    All,
}

impl Period {
    /// Create a monthly period
    pub fn monthly(year: i32, month: u32) -> Self {
        Self::Month { year, month }
    }

    /// Create a weekly period (ISO week)
    pub fn weekly(year: i32, week: u32) -> Self {
        Self::Week { year, week }
    }

    /// Create a custom period
    pub fn custom(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self::Custom { start, end }
    }

    /// The month or week period containing a date
    pub fn for_date(date: NaiveDate, granularity: Granularity) -> Self {
        match granularity {
            Granularity::Monthly => Self::monthly(date.year(), date.month()),
            Granularity::Weekly => {
                let iso = date.iso_week();
                Self::weekly(iso.year(), iso.week())
            }
        }
    }

    /// The period key, for month and week periods
    pub fn key(&self) -> Option<String> {
        match self {
            Self::Month { year, month } => Some(format!("{:04}-{:02}", year, month)),
            Self::Week { year, week } => Some(format!("{:04}-{:02}", year, week)),
            Self::Custom { .. } | Self::All => None,
        }
    }

    /// The granularity of a keyed period
    pub fn granularity(&self) -> Option<Granularity> {
        match self {
            Self::Month { .. } => Some(Granularity::Monthly),
            Self::Week { .. } => Some(Granularity::Weekly),
            Self::Custom { .. } | Self::All => None,
        }
    }

    /// Parse a period key
    ///
    /// Monthly keys are `YYYY-MM`. Weekly keys are `YYYY-WW`; the
    /// `YYYY-Www` spelling is accepted too. Keys that name a month outside
    /// 1-12 or a week the ISO year does not have are malformed.
    pub fn parse_key(key: &str, granularity: Granularity) -> SpendscopeResult<Self> {
        let malformed = || match granularity {
            Granularity::Monthly => SpendscopeError::malformed_month_key(key),
            Granularity::Weekly => SpendscopeError::malformed_week_key(key),
        };

        let (year_part, number_part) = key.trim().split_once('-').ok_or_else(malformed)?;
        let number_part = match granularity {
            Granularity::Weekly => number_part
                .strip_prefix('W')
                .or_else(|| number_part.strip_prefix('w'))
                .unwrap_or(number_part),
            Granularity::Monthly => number_part,
        };

        let all_digits = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());
        if year_part.len() != 4
            || !all_digits(year_part)
            || !all_digits(number_part)
            || number_part.len() > 2
        {
            return Err(malformed());
        }

        let year: i32 = year_part.parse().map_err(|_| malformed())?;
        let number: u32 = number_part.parse().map_err(|_| malformed())?;

        match granularity {
            Granularity::Monthly => {
                if !(1..=12).contains(&number) {
                    return Err(malformed());
                }
                Ok(Self::monthly(year, number))
            }
            Granularity::Weekly => {
                if NaiveDate::from_isoywd_opt(year, number, chrono::Weekday::Mon).is_none() {
                    return Err(malformed());
                }
                Ok(Self::weekly(year, number))
            }
        }
    }

    /// The fixed calendar range of a month or week period
    ///
    /// Returns `None` for custom and all-time periods, whose bounds depend on
    /// the data.
    pub fn calendar_range(&self) -> Option<DateRange> {
        match self {
            Self::Month { year, month } => month_range(*year, *month),
            Self::Week { year, week } => week_range(*year, *week),
            Self::Custom { .. } | Self::All => None,
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Month { year, month } => write!(f, "{:04}-{:02}", year, month),
            Self::Week { year, week } => write!(f, "{:04}-{:02}", year, week),
            Self::Custom { start, end } => {
                let fmt_bound = |d: &Option<NaiveDate>| {
                    d.map(|d| d.format("%Y-%m-%d").to_string())
                        .unwrap_or_default()
                };
                write!(f, "{}..{}", fmt_bound(start), fmt_bound(end))
            }
            Self::All => write!(f, "all"),
        }
    }
}

/// First to last day of a month
///
/// The last day is the day before the first of the following month, so
/// February comes out right in leap years.
fn month_range(year: i32, month: u32) -> Option<DateRange> {
    let start = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next_month = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }?;
    Some(DateRange {
        start,
        end: next_month - Duration::days(1),
    })
}

/// Monday to Sunday of an ISO week
///
/// Walks `week - 1` weeks from January 1st, then moves to a Monday: back to
/// the start of that week when the landing day is Monday-Thursday (the week
/// holds the year's Thursday), forward to the next Monday otherwise.
fn week_range(year: i32, week: u32) -> Option<DateRange> {
    let jan_1 = NaiveDate::from_ymd_opt(year, 1, 1)?;
    let simple = jan_1 + Duration::days(i64::from(week.checked_sub(1)?) * 7);
    let weekday = i64::from(simple.weekday().number_from_monday());

    let monday = if weekday <= 4 {
        simple - Duration::days(weekday - 1)
    } else {
        simple + Duration::days(8 - weekday)
    };

    Some(DateRange {
        start: monday,
        end: monday + Duration::days(6),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_month_range_leap_years() {
        let feb_2024 = Period::monthly(2024, 2).calendar_range().unwrap();
        assert_eq!(feb_2024.start(), date(2024, 2, 1));
        assert_eq!(feb_2024.end(), date(2024, 2, 29));

        let feb_2023 = Period::monthly(2023, 2).calendar_range().unwrap();
        assert_eq!(feb_2023.end(), date(2023, 2, 28));

        let dec = Period::monthly(2024, 12).calendar_range().unwrap();
        assert_eq!(dec.end(), date(2024, 12, 31));
    }

    #[test]
    fn test_week_range_is_monday_to_sunday() {
        let range = Period::weekly(2024, 1).calendar_range().unwrap();
        assert_eq!(range.start().weekday(), Weekday::Mon);
        assert_eq!(range.end().weekday(), Weekday::Sun);
        assert_eq!(range.end() - range.start(), Duration::days(6));
        assert_eq!(range.start(), date(2024, 1, 1));
    }

    #[test]
    fn test_week_range_crossing_year_boundary() {
        // ISO week 1 of 2025 starts on Monday December 30, 2024
        let range = Period::weekly(2025, 1).calendar_range().unwrap();
        assert_eq!(range.start(), date(2024, 12, 30));
        assert_eq!(range.end(), date(2025, 1, 5));

        // 2021 starts on a Friday, so its week 1 starts January 4th
        let range = Period::weekly(2021, 1).calendar_range().unwrap();
        assert_eq!(range.start(), date(2021, 1, 4));
    }

    #[test]
    fn test_week_range_matches_iso_calendar() {
        for year in 2015..=2030 {
            let weeks = date(year, 12, 28).iso_week().week();
            for week in 1..=weeks {
                let range = Period::weekly(year, week).calendar_range().unwrap();
                let expected = NaiveDate::from_isoywd_opt(year, week, Weekday::Mon).unwrap();
                assert_eq!(range.start(), expected, "{}-W{:02}", year, week);
            }
        }
    }

    #[test]
    fn test_key_for_date() {
        assert_eq!(
            Period::for_date(date(2024, 7, 4), Granularity::Monthly).key(),
            Some("2024-07".to_string())
        );
        assert_eq!(
            Period::for_date(date(2024, 7, 4), Granularity::Weekly).key(),
            Some("2024-27".to_string())
        );
        // December 30, 2024 belongs to ISO week 1 of 2025
        assert_eq!(
            Period::for_date(date(2024, 12, 30), Granularity::Weekly).key(),
            Some("2025-01".to_string())
        );
    }

    #[test]
    fn test_key_is_stable_within_bucket() {
        let monday = date(2024, 3, 4);
        let key = Period::for_date(monday, Granularity::Weekly);
        for offset in 0..7 {
            let day = monday + Duration::days(offset);
            assert_eq!(Period::for_date(day, Granularity::Weekly), key);
        }
    }

    #[test]
    fn test_parse_key() {
        assert_eq!(
            Period::parse_key("2024-02", Granularity::Monthly).unwrap(),
            Period::monthly(2024, 2)
        );
        assert_eq!(
            Period::parse_key("2024-05", Granularity::Weekly).unwrap(),
            Period::weekly(2024, 5)
        );
        assert_eq!(
            Period::parse_key("2024-W05", Granularity::Weekly).unwrap(),
            Period::weekly(2024, 5)
        );
    }

    #[test]
    fn test_parse_key_rejects_malformed() {
        for key in ["2024", "2024-13", "2024-00", "24-01", "2024-1a", "2024-001", "", "2024/01"] {
            let err = Period::parse_key(key, Granularity::Monthly).unwrap_err();
            assert!(err.is_malformed_key(), "{}", key);
        }

        // 2023 has 52 ISO weeks, 2020 has 53
        assert!(Period::parse_key("2023-53", Granularity::Weekly).is_err());
        assert!(Period::parse_key("2020-53", Granularity::Weekly).is_ok());
        assert!(Period::parse_key("2024-00", Granularity::Weekly).is_err());
    }

    #[test]
    fn test_key_round_trip_through_parse() {
        let period = Period::for_date(date(2026, 1, 1), Granularity::Weekly);
        let key = period.key().unwrap();
        assert_eq!(Period::parse_key(&key, Granularity::Weekly).unwrap(), period);
    }

    #[test]
    fn test_date_range_validation() {
        assert!(DateRange::new(date(2024, 1, 31), date(2024, 1, 1)).is_err());
        let range = DateRange::new(date(2024, 1, 1), date(2024, 1, 31)).unwrap();
        assert!(range.contains(date(2024, 1, 31)));
        assert!(!range.contains(date(2024, 2, 1)));
        assert_eq!(range.to_string(), "2024-01-01..2024-01-31");
    }

    #[test]
    fn test_display() {
        assert_eq!(Period::monthly(2025, 1).to_string(), "2025-01");
        assert_eq!(Period::weekly(2025, 3).to_string(), "2025-03");
        assert_eq!(Period::All.to_string(), "all");
        assert_eq!(
            Period::custom(Some(date(2024, 1, 1)), None).to_string(),
            "2024-01-01.."
        );
    }
}
