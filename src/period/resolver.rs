//! Period Resolver
//!
//! Turns preset keys into concrete day ranges anchored on "today" and derives
//! the matching comparison range.

use chrono::{Local, NaiveDate};

use super::error::PeriodResult;
use super::types::{sub_days, ComparisonKey, DateRange, PeriodKey};

/// Days subtracted for a previous-year comparison
pub const DAYS_PER_YEAR: u64 = 365;

/// Resolves period and comparison keys relative to a fixed anchor day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodResolver {
    today: NaiveDate,
}

impl PeriodResolver {
    /// Create a resolver anchored on the given day
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }

    /// Create a resolver anchored on the local calendar's current day
    pub fn now() -> Self {
        Self::new(Local::now().date_naive())
    }

    /// Anchor day
    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Concrete range for a preset period key
    ///
    /// `Custom` has no preset and resolves like `Last28`; callers with an
    /// explicit custom range never reach this.
    pub fn default_range(&self, key: PeriodKey) -> PeriodResult<DateRange> {
        let today = self.today;
        let range = match key {
            PeriodKey::Today => DateRange::single_day(today),
            PeriodKey::Yesterday => DateRange::single_day(sub_days(today, 1)?),
            PeriodKey::Last7 => DateRange::new(sub_days(today, 6)?, today)?,
            PeriodKey::Last365 => DateRange::new(sub_days(today, 364)?, today)?,
            PeriodKey::Last28 | PeriodKey::Custom => DateRange::new(sub_days(today, 27)?, today)?,
        };
        Ok(range)
    }

    /// Comparison range for `current`
    ///
    /// - `Custom` with an explicit range returns that range, day-aligned
    /// - `PreviousYear` shifts both endpoints back 365 days
    /// - otherwise the window of equal length ending the day before `current`
    pub fn comparison_range(
        &self,
        current: &DateRange,
        key: ComparisonKey,
        explicit_custom: Option<DateRange>,
    ) -> PeriodResult<DateRange> {
        match (key, explicit_custom) {
            (ComparisonKey::Custom, Some(custom)) => Ok(custom),
            (ComparisonKey::PreviousYear, _) => current.shift_back(DAYS_PER_YEAR),
            (ComparisonKey::Custom, None) => {
                tracing::debug!("Custom comparison without explicit range, using previous period");
                previous_period(current)
            }
            (ComparisonKey::PreviousPeriod, _) => previous_period(current),
        }
    }
}

impl Default for PeriodResolver {
    fn default() -> Self {
        Self::now()
    }
}

fn previous_period(current: &DateRange) -> PeriodResult<DateRange> {
    let duration = current.duration_days() as u64;
    let prev_to = sub_days(current.from(), 1)?;
    let prev_from = sub_days(prev_to, duration)?;
    DateRange::new(prev_from, prev_to)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn resolver() -> PeriodResolver {
        PeriodResolver::new(date(2025, 3, 15))
    }

    #[test]
    fn test_default_ranges_have_nominal_length() {
        let resolver = resolver();

        for key in PeriodKey::all().iter().filter(|k| **k != PeriodKey::Custom) {
            let range = resolver.default_range(*key).unwrap();
            assert!(range.to() >= range.from(), "{} is inverted", key);
            assert_eq!(Some(range.day_count()), key.nominal_days(), "{}", key);
        }
    }

    #[test]
    fn test_default_ranges_end_today() {
        let resolver = resolver();
        let today = resolver.today();

        assert_eq!(resolver.default_range(PeriodKey::Today).unwrap().to(), today);
        assert_eq!(resolver.default_range(PeriodKey::Last7).unwrap().from(), date(2025, 3, 9));
        assert_eq!(resolver.default_range(PeriodKey::Last28).unwrap().from(), date(2025, 2, 16));

        let yesterday = resolver.default_range(PeriodKey::Yesterday).unwrap();
        assert_eq!(yesterday.from(), date(2025, 3, 14));
        assert_eq!(yesterday.to(), date(2025, 3, 14));
    }

    #[test]
    fn test_custom_key_falls_back_to_last28() {
        let resolver = resolver();
        assert_eq!(
            resolver.default_range(PeriodKey::Custom).unwrap(),
            resolver.default_range(PeriodKey::Last28).unwrap()
        );
    }

    #[test]
    fn test_previous_period_same_length_adjacent() {
        let resolver = resolver();

        for key in [PeriodKey::Today, PeriodKey::Last7, PeriodKey::Last28, PeriodKey::Last365] {
            let current = resolver.default_range(key).unwrap();
            let prev = resolver
                .comparison_range(&current, ComparisonKey::PreviousPeriod, None)
                .unwrap();

            assert_eq!(prev.day_count(), current.day_count());
            assert_eq!(prev.to().succ_opt().unwrap(), current.from());
        }
    }

    #[test]
    fn test_previous_period_for_last7() {
        let resolver = resolver();
        let current = resolver.default_range(PeriodKey::Last7).unwrap();
        let prev = resolver
            .comparison_range(&current, ComparisonKey::PreviousPeriod, None)
            .unwrap();

        assert_eq!(prev.from(), date(2025, 3, 2));
        assert_eq!(prev.to(), date(2025, 3, 8));
    }

    #[test]
    fn test_previous_year_shifts_365_days() {
        let resolver = resolver();
        let current = DateRange::new(date(2024, 3, 1), date(2024, 3, 10)).unwrap();
        let prev = resolver
            .comparison_range(&current, ComparisonKey::PreviousYear, None)
            .unwrap();

        assert_eq!((current.from() - prev.from()).num_days(), 365);
        assert_eq!((current.to() - prev.to()).num_days(), 365);
        // 2024 is a leap year, so 365 days back lands one calendar day later
        assert_eq!(prev.from(), date(2023, 3, 2));
    }

    #[test]
    fn test_custom_comparison() {
        let resolver = resolver();
        let current = resolver.default_range(PeriodKey::Last7).unwrap();
        let custom = DateRange::new(date(2024, 12, 1), date(2024, 12, 31)).unwrap();

        let resolved = resolver
            .comparison_range(&current, ComparisonKey::Custom, Some(custom))
            .unwrap();
        assert_eq!(resolved, custom);

        // Without an explicit range the previous period is used
        let fallback = resolver
            .comparison_range(&current, ComparisonKey::Custom, None)
            .unwrap();
        assert_eq!(fallback.day_count(), 7);
        assert_eq!(fallback.to(), date(2025, 3, 8));
    }

    #[test]
    fn test_explicit_range_ignored_for_presets() {
        let resolver = resolver();
        let current = resolver.default_range(PeriodKey::Today).unwrap();
        let custom = DateRange::new(date(2024, 12, 1), date(2024, 12, 31)).unwrap();

        let prev = resolver
            .comparison_range(&current, ComparisonKey::PreviousYear, Some(custom))
            .unwrap();
        assert_eq!(prev, DateRange::single_day(date(2024, 3, 15)));
    }
}
