//! Core date types for period selection
//!
//! - `DateRange`: an inclusive span of calendar days
//! - `PeriodKey`: the preset periods a user can pick
//! - `ComparisonKey`: how the comparison range is derived

use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use super::error::{PeriodError, PeriodResult};

/// ISO calendar-date format used at every boundary
pub const ISO_DATE: &str = "%Y-%m-%d";

/// Inclusive range of calendar days: `from` at start-of-day through `to` at end-of-day
///
/// Always satisfies `from <= to`. A range covering a single day has
/// `from == to` and a day count of 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawDateRange")]
pub struct DateRange {
    from: NaiveDate,
    to: NaiveDate,
}

#[derive(Deserialize)]
struct RawDateRange {
    from: NaiveDate,
    to: NaiveDate,
}

impl TryFrom<RawDateRange> for DateRange {
    type Error = PeriodError;

    fn try_from(raw: RawDateRange) -> Result<Self, Self::Error> {
        DateRange::new(raw.from, raw.to)
    }
}

impl DateRange {
    /// Create a new range, rejecting `from > to`
    pub fn new(from: NaiveDate, to: NaiveDate) -> PeriodResult<Self> {
        if from > to {
            return Err(PeriodError::InvalidRange {
                from: from.format(ISO_DATE).to_string(),
                to: to.format(ISO_DATE).to_string(),
            });
        }
        Ok(Self { from, to })
    }

    /// A range covering exactly one day
    pub fn single_day(day: NaiveDate) -> Self {
        Self { from: day, to: day }
    }

    /// Day-aligned copy of an explicit pair of instants
    ///
    /// Time-of-day is discarded: `from` snaps to the start of its day and
    /// `to` to the end of its day.
    pub fn from_instants(from: NaiveDateTime, to: NaiveDateTime) -> PeriodResult<Self> {
        Self::new(from.date(), to.date())
    }

    /// Parse a range from two `YYYY-MM-DD` strings
    pub fn parse(from: &str, to: &str) -> PeriodResult<Self> {
        Self::new(parse_iso_date(from)?, parse_iso_date(to)?)
    }

    /// First day of the range
    pub fn from(&self) -> NaiveDate {
        self.from
    }

    /// Last day of the range (inclusive)
    pub fn to(&self) -> NaiveDate {
        self.to
    }

    /// Instant at which the range begins
    pub fn start_of_day(&self) -> NaiveDateTime {
        self.from.and_time(NaiveTime::MIN)
    }

    /// Last representable millisecond of the range
    pub fn end_of_day(&self) -> NaiveDateTime {
        let end = NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or(NaiveTime::MIN);
        self.to.and_time(end)
    }

    /// Whole days between `from` and `to` (0 for a single-day range)
    pub fn duration_days(&self) -> i64 {
        (self.to - self.from).num_days()
    }

    /// Number of calendar days covered, counting both ends
    pub fn day_count(&self) -> i64 {
        self.duration_days() + 1
    }

    /// Iterate every day in the range in ascending order
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let count = self.day_count() as usize;
        self.from.iter_days().take(count)
    }

    /// Check if a day falls within this range
    pub fn contains(&self, day: NaiveDate) -> bool {
        day >= self.from && day <= self.to
    }

    /// Shift both endpoints back by the same number of days
    pub fn shift_back(&self, days: u64) -> PeriodResult<Self> {
        let from = sub_days(self.from, days)?;
        let to = sub_days(self.to, days)?;
        Ok(Self { from, to })
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} to {}",
            self.from.format(ISO_DATE),
            self.to.format(ISO_DATE)
        )
    }
}

/// Parse a `YYYY-MM-DD` calendar date
pub fn parse_iso_date(input: &str) -> PeriodResult<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), ISO_DATE).map_err(|e| PeriodError::InvalidDate {
        input: input.to_string(),
        reason: e.to_string(),
    })
}

pub(crate) fn sub_days(day: NaiveDate, days: u64) -> PeriodResult<NaiveDate> {
    day.checked_sub_days(Days::new(days))
        .ok_or_else(|| PeriodError::OutOfRange(format!("{} minus {} days", day, days)))
}

/// Preset analysis periods
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum PeriodKey {
    Today,
    Yesterday,
    Last7,
    #[default]
    Last28,
    Last365,
    /// User picks an explicit range
    Custom,
}

impl PeriodKey {
    /// Get all period keys in display order
    pub fn all() -> &'static [PeriodKey] {
        &[
            PeriodKey::Today,
            PeriodKey::Yesterday,
            PeriodKey::Last7,
            PeriodKey::Last28,
            PeriodKey::Last365,
            PeriodKey::Custom,
        ]
    }

    /// Wire value of this key
    pub fn as_str(&self) -> &'static str {
        match self {
            PeriodKey::Today => "today",
            PeriodKey::Yesterday => "yesterday",
            PeriodKey::Last7 => "last7",
            PeriodKey::Last28 => "last28",
            PeriodKey::Last365 => "last365",
            PeriodKey::Custom => "custom",
        }
    }

    /// Human-readable label for selectors
    pub fn label(&self) -> &'static str {
        match self {
            PeriodKey::Today => "Today",
            PeriodKey::Yesterday => "Yesterday",
            PeriodKey::Last7 => "Last 7 Days",
            PeriodKey::Last28 => "Last 28 Days",
            PeriodKey::Last365 => "Last Year",
            PeriodKey::Custom => "Custom Range...",
        }
    }

    /// Number of days a preset covers; `None` for custom ranges
    pub fn nominal_days(&self) -> Option<i64> {
        match self {
            PeriodKey::Today | PeriodKey::Yesterday => Some(1),
            PeriodKey::Last7 => Some(7),
            PeriodKey::Last28 => Some(28),
            PeriodKey::Last365 => Some(365),
            PeriodKey::Custom => None,
        }
    }
}

/// Unknown keys fall back to `last28`
impl From<&str> for PeriodKey {
    fn from(value: &str) -> Self {
        PeriodKey::all()
            .iter()
            .copied()
            .find(|k| k.as_str() == value)
            .unwrap_or_default()
    }
}

impl From<String> for PeriodKey {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl std::fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the comparison range is derived from the current one
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum ComparisonKey {
    /// Window of equal length ending the day before the current range
    #[default]
    PreviousPeriod,
    /// Current range shifted back 365 days
    PreviousYear,
    /// User picks an explicit range
    Custom,
}

impl ComparisonKey {
    /// Get all comparison keys in display order
    pub fn all() -> &'static [ComparisonKey] {
        &[
            ComparisonKey::PreviousPeriod,
            ComparisonKey::PreviousYear,
            ComparisonKey::Custom,
        ]
    }

    /// Wire value of this key
    pub fn as_str(&self) -> &'static str {
        match self {
            ComparisonKey::PreviousPeriod => "previous_period",
            ComparisonKey::PreviousYear => "previous_year",
            ComparisonKey::Custom => "custom",
        }
    }

    /// Human-readable label for selectors
    pub fn label(&self) -> &'static str {
        match self {
            ComparisonKey::PreviousPeriod => "Previous Period",
            ComparisonKey::PreviousYear => "Previous Year",
            ComparisonKey::Custom => "Custom Range...",
        }
    }
}

/// Unknown keys fall back to `previous_period`
impl From<&str> for ComparisonKey {
    fn from(value: &str) -> Self {
        ComparisonKey::all()
            .iter()
            .copied()
            .find(|k| k.as_str() == value)
            .unwrap_or_default()
    }
}

impl From<String> for ComparisonKey {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl std::fmt::Display for ComparisonKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_date_range_rejects_inverted() {
        let err = DateRange::new(date(2025, 3, 10), date(2025, 3, 1)).unwrap_err();
        assert!(matches!(err, PeriodError::InvalidRange { .. }));

        assert!(DateRange::new(date(2025, 3, 1), date(2025, 3, 1)).is_ok());
    }

    #[test]
    fn test_day_count_and_iteration() {
        let range = DateRange::new(date(2024, 2, 27), date(2024, 3, 2)).unwrap();

        // 2024 is a leap year: 27, 28, 29 Feb, 1, 2 Mar
        assert_eq!(range.duration_days(), 4);
        assert_eq!(range.day_count(), 5);

        let days: Vec<_> = range.days().collect();
        assert_eq!(days.len(), 5);
        assert_eq!(days[2], date(2024, 2, 29));
        assert_eq!(*days.last().unwrap(), date(2024, 3, 2));
    }

    #[test]
    fn test_day_boundaries() {
        let range = DateRange::single_day(date(2025, 6, 1));
        assert_eq!(range.start_of_day().to_string(), "2025-06-01 00:00:00");
        assert_eq!(range.end_of_day().to_string(), "2025-06-01 23:59:59.999");
        assert!(range.start_of_day() <= range.end_of_day());
    }

    #[test]
    fn test_from_instants_is_day_aligned() {
        let from = date(2025, 1, 5).and_hms_opt(15, 30, 0).unwrap();
        let to = date(2025, 1, 11).and_hms_opt(8, 0, 0).unwrap();
        let range = DateRange::from_instants(from, to).unwrap();

        assert_eq!(range.from(), date(2025, 1, 5));
        assert_eq!(range.to(), date(2025, 1, 11));
        assert_eq!(range.start_of_day().time(), NaiveTime::MIN);
    }

    #[test]
    fn test_parse() {
        let range = DateRange::parse("2025-01-01", " 2025-01-31").unwrap();
        assert_eq!(range.day_count(), 31);

        let err = DateRange::parse("2025-01-01", "31/01/2025").unwrap_err();
        assert!(matches!(err, PeriodError::InvalidDate { .. }));
    }

    #[test]
    fn test_serialization_is_iso() {
        let range = DateRange::new(date(2025, 1, 5), date(2025, 1, 11)).unwrap();
        let json = serde_json::to_string(&range).unwrap();
        assert_eq!(json, r#"{"from":"2025-01-05","to":"2025-01-11"}"#);

        let restored: DateRange = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, range);

        let inverted = r#"{"from":"2025-01-11","to":"2025-01-05"}"#;
        assert!(serde_json::from_str::<DateRange>(inverted).is_err());
    }

    #[test]
    fn test_period_key_fallback() {
        assert_eq!(PeriodKey::from("last7"), PeriodKey::Last7);
        assert_eq!(PeriodKey::from("last365"), PeriodKey::Last365);
        assert_eq!(PeriodKey::from("fortnight"), PeriodKey::Last28);
        assert_eq!(PeriodKey::Last365.label(), "Last Year");

        let json = serde_json::to_string(&PeriodKey::Last28).unwrap();
        assert_eq!(json, "\"last28\"");
    }

    #[test]
    fn test_comparison_key_fallback() {
        assert_eq!(ComparisonKey::from("previous_year"), ComparisonKey::PreviousYear);
        assert_eq!(ComparisonKey::from("last_quarter"), ComparisonKey::PreviousPeriod);

        let json = serde_json::to_string(&ComparisonKey::PreviousYear).unwrap();
        assert_eq!(json, "\"previous_year\"");
    }

    #[test]
    fn test_unknown_keys_deserialize_to_defaults() {
        let period: PeriodKey = serde_json::from_str("\"fortnight\"").unwrap();
        assert_eq!(period, PeriodKey::Last28);
        let period: PeriodKey = serde_json::from_str("\"yesterday\"").unwrap();
        assert_eq!(period, PeriodKey::Yesterday);

        let comparison: ComparisonKey = serde_json::from_str("\"last_quarter\"").unwrap();
        assert_eq!(comparison, ComparisonKey::PreviousPeriod);
        let comparison: ComparisonKey = serde_json::from_str("\"custom\"").unwrap();
        assert_eq!(comparison, ComparisonKey::Custom);
    }
}
