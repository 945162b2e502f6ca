//! Base synthetic series
//!
//! A fixed table of daily orders and conversion values that every period
//! query slices from. Built once at startup and shared read-only.

use chrono::{Days, NaiveDate};
use rand::Rng;
use serde::Serialize;

use super::round_to;

/// Two years of history, enough for a full previous-year comparison of `last365`
pub const DEFAULT_HISTORY_DAYS: usize = 365 * 2;

const ORDERS_MIN: f64 = 100.0;
const ORDERS_MAX: f64 = 950.0;
const CONVERSION_MIN: f64 = 0.5;
const CONVERSION_MAX: f64 = 1.1;
const VOLATILITY: f64 = 0.3;
const JITTER: f64 = 0.01;

/// One day of base metrics
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DailyMetrics {
    pub orders: u32,
    /// Conversion rate in percent (nominally 0.5 - 1.1)
    pub conversion: f64,
}

/// Immutable daily ground truth, contiguous by date
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BaseSeries {
    start: NaiveDate,
    orders: Vec<u32>,
    conversion: Vec<f64>,
}

impl BaseSeries {
    /// Generate `days` days of data ending on `end` (inclusive)
    pub fn generate<R: Rng + ?Sized>(end: NaiveDate, days: usize, rng: &mut R) -> Self {
        let start = end
            .checked_sub_days(Days::new(days.saturating_sub(1) as u64))
            .unwrap_or(NaiveDate::MIN);

        let orders = random_walk(rng, days, ORDERS_MIN, ORDERS_MAX, VOLATILITY)
            .into_iter()
            .map(|v| v.round().max(0.0) as u32)
            .collect();

        // Three decimals so the ratio keeps precision after dividing by 100
        let conversion = random_walk(rng, days, CONVERSION_MIN, CONVERSION_MAX, VOLATILITY)
            .into_iter()
            .map(|v| round_to(v, 3))
            .collect();

        tracing::debug!(start = %start, end = %end, days, "Generated base series");

        Self {
            start,
            orders,
            conversion,
        }
    }

    /// Build a series from explicit columns starting at `start`
    ///
    /// Columns of unequal length are truncated to the shorter one.
    pub fn from_columns(start: NaiveDate, mut orders: Vec<u32>, mut conversion: Vec<f64>) -> Self {
        let len = orders.len().min(conversion.len());
        orders.truncate(len);
        conversion.truncate(len);
        Self {
            start,
            orders,
            conversion,
        }
    }

    /// Number of days in the series
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// First day covered
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day covered, `None` when empty
    pub fn end(&self) -> Option<NaiveDate> {
        let last = self.len().checked_sub(1)?;
        self.start.checked_add_days(Days::new(last as u64))
    }

    /// Look up the metrics recorded for a day
    pub fn get(&self, day: NaiveDate) -> Option<DailyMetrics> {
        let offset = (day - self.start).num_days();
        if offset < 0 {
            return None;
        }
        let idx = offset as usize;
        Some(DailyMetrics {
            orders: *self.orders.get(idx)?,
            conversion: *self.conversion.get(idx)?,
        })
    }

    /// Iterate `(day, metrics)` pairs in date order
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, DailyMetrics)> + '_ {
        self.start
            .iter_days()
            .zip(self.orders.iter().zip(self.conversion.iter()))
            .map(|(day, (&orders, &conversion))| (day, DailyMetrics { orders, conversion }))
    }
}

/// Bounded random walk with a small per-point jitter
///
/// Starts uniformly in `[min, max]`; each step moves by up to
/// `±(max - min) * volatility / 2` and is clamped back into range before the
/// jitter is added.
fn random_walk<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    min: f64,
    max: f64,
    volatility: f64,
) -> Vec<f64> {
    let span = max - min;
    let mut last = min + rng.gen::<f64>() * span;

    (0..count)
        .map(|_| {
            let change = (rng.gen::<f64>() - 0.5) * span * volatility;
            last = (last + change).clamp(min, max);
            last + (rng.gen::<f64>() - 0.5) * span * JITTER
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_generate_covers_history_ending_on_anchor() {
        let mut rng = StdRng::seed_from_u64(7);
        let end = date(2025, 3, 15);
        let base = BaseSeries::generate(end, DEFAULT_HISTORY_DAYS, &mut rng);

        assert_eq!(base.len(), 730);
        assert_eq!(base.end(), Some(end));
        assert_eq!(base.start(), date(2023, 3, 17));
        assert!(base.get(end).is_some());
        assert!(base.get(date(2025, 3, 16)).is_none());
        assert!(base.get(date(2023, 3, 16)).is_none());
    }

    #[test]
    fn test_generated_values_stay_near_bounds() {
        let mut rng = StdRng::seed_from_u64(42);
        let base = BaseSeries::generate(date(2025, 1, 1), 500, &mut rng);

        // Jitter can push a value at most half a percent of the span past a bound
        for (_, day) in base.iter() {
            assert!(day.orders >= 95 && day.orders <= 955, "orders {}", day.orders);
            assert!(
                day.conversion >= 0.49 && day.conversion <= 1.11,
                "conversion {}",
                day.conversion
            );
        }
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let a = BaseSeries::generate(date(2025, 1, 1), 30, &mut StdRng::seed_from_u64(1));
        let b = BaseSeries::generate(date(2025, 1, 1), 30, &mut StdRng::seed_from_u64(1));
        assert_eq!(a, b);
    }

    #[test]
    fn test_from_columns_truncates() {
        let base = BaseSeries::from_columns(date(2025, 1, 1), vec![10, 20, 30], vec![0.5, 0.6]);
        assert_eq!(base.len(), 2);
        assert_eq!(base.end(), Some(date(2025, 1, 2)));
        assert_eq!(
            base.get(date(2025, 1, 2)),
            Some(DailyMetrics {
                orders: 20,
                conversion: 0.6
            })
        );
    }

    #[test]
    fn test_empty_series() {
        let base = BaseSeries::from_columns(date(2025, 1, 1), vec![], vec![]);
        assert!(base.is_empty());
        assert_eq!(base.end(), None);
        assert_eq!(base.get(date(2025, 1, 1)), None);
    }
}
