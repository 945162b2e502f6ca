//! Daily trend series for the current and comparison periods
//!
//! Both periods are sliced from the base series day by day, then the
//! comparison values are aligned positionally to the current period's axis.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::base::BaseSeries;
use crate::period::DateRange;

/// Chart-ready trend data on the current period's date axis
///
/// All four value vectors have exactly `dates.len()` entries.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TrendSeries {
    pub dates: Vec<NaiveDate>,
    pub current_period_orders: Vec<u32>,
    pub previous_period_orders: Vec<u32>,
    /// Conversion ratios (0..1)
    pub current_period_conv: Vec<f64>,
    pub previous_period_conv: Vec<f64>,
}

impl TrendSeries {
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

/// Values for one range, one entry per day
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RangeSlice {
    pub dates: Vec<NaiveDate>,
    pub orders: Vec<u32>,
    pub conversion: Vec<f64>,
}

/// Slice one range out of the base series
///
/// Days missing from the base series are filled with zero so the date axis
/// never has holes. Conversion is returned as a ratio.
pub fn slice_range(base: &BaseSeries, range: &DateRange) -> RangeSlice {
    let capacity = range.day_count() as usize;
    let mut slice = RangeSlice {
        dates: Vec::with_capacity(capacity),
        orders: Vec::with_capacity(capacity),
        conversion: Vec::with_capacity(capacity),
    };
    let mut missing = 0usize;

    for day in range.days() {
        slice.dates.push(day);
        match base.get(day) {
            Some(metrics) => {
                slice.orders.push(metrics.orders);
                slice.conversion.push(metrics.conversion / 100.0);
            }
            None => {
                missing += 1;
                slice.orders.push(0);
                slice.conversion.push(0.0);
            }
        }
    }

    if missing > 0 {
        tracing::debug!(range = %range, missing, "Gap-filled days outside base series");
    }

    slice
}

/// Fit `values` to `target` entries, keeping the most recent ones
///
/// Shorter input is left-padded with defaults; longer input loses its
/// oldest entries.
pub fn align_to_length<T: Copy + Default>(values: Vec<T>, target: usize) -> Vec<T> {
    let len = values.len();
    if len == target {
        return values;
    }
    if len < target {
        let mut padded = vec![T::default(); target - len];
        padded.extend(values);
        return padded;
    }
    values[len - target..].to_vec()
}

/// Build the trend series for `current` against `comparison`
pub fn compute_trend(base: &BaseSeries, current: &DateRange, comparison: &DateRange) -> TrendSeries {
    let now = slice_range(base, current);
    let before = slice_range(base, comparison);
    let target = now.dates.len();

    TrendSeries {
        current_period_orders: align_to_length(now.orders, target),
        previous_period_orders: align_to_length(before.orders, target),
        current_period_conv: align_to_length(now.conversion, target),
        previous_period_conv: align_to_length(before.conversion, target),
        dates: now.dates,
    }
}
