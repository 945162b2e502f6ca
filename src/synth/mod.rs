//! Metrics Synthesizer
//!
//! Stands in for an analytics backend by deriving every dashboard dataset
//! from a shared base series plus an injected random source:
//!
//! - **base**: the immutable daily base series
//! - **kpi**: headline KPIs with period-over-period change
//! - **trend**: daily orders/conversion aligned for charting
//! - **funnel**: session → order funnel
//! - **products**: top-grossing products
//! - **detail**: operational counters
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use chrono::NaiveDate;
//! use storepulse::period::{ComparisonKey, PeriodKey, PeriodResolver};
//! use storepulse::synth::{BaseSeries, MetricsSynthesizer};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let today = NaiveDate::from_ymd_opt(2025, 3, 15).unwrap();
//! let mut rng = StdRng::seed_from_u64(1);
//! let base = Arc::new(BaseSeries::generate(today, 730, &mut rng));
//! let mut synth = MetricsSynthesizer::seeded(base, 2);
//!
//! let resolver = PeriodResolver::new(today);
//! let current = resolver.default_range(PeriodKey::Last7).unwrap();
//! let previous = resolver.comparison_range(&current, ComparisonKey::PreviousPeriod, None).unwrap();
//!
//! let trend = synth.compute_trend(&current, &previous);
//! assert_eq!(trend.dates.len(), 7);
//! ```

pub mod base;
pub mod detail;
pub mod funnel;
pub mod kpi;
pub mod products;
pub mod trend;

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::period::DateRange;

pub use base::{BaseSeries, DailyMetrics, DEFAULT_HISTORY_DAYS};
pub use detail::{compute_detail_metrics, DetailMetrics};
pub use funnel::{compute_funnel, FunnelStage, SalesFunnelStep};
pub use kpi::{compute_kpis, pct_change, Currency, Kpi, KpiKey, KpiValues};
pub use products::{compute_top_products, default_catalog, CatalogItem, Product};
pub use trend::{align_to_length, compute_trend, slice_range, RangeSlice, TrendSeries};

/// Length of the period the base magnitudes describe
pub const BASE_PERIOD_DAYS: f64 = 28.0;

/// Scale factor for a range relative to the 28-day base period
pub fn duration_factor(days: i64) -> f64 {
    if days <= 0 {
        return 0.0;
    }
    days as f64 / BASE_PERIOD_DAYS
}

/// Round half away from zero to a number of decimals
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

/// Bundles the base series, catalog and random source behind one handle
pub struct MetricsSynthesizer<R = StdRng> {
    base: Arc<BaseSeries>,
    catalog: Vec<CatalogItem>,
    rng: R,
}

impl MetricsSynthesizer<StdRng> {
    /// Synthesizer with an OS-seeded random source
    pub fn from_entropy(base: Arc<BaseSeries>) -> Self {
        Self::new(base, StdRng::from_entropy())
    }

    /// Synthesizer with a reproducible random source
    pub fn seeded(base: Arc<BaseSeries>, seed: u64) -> Self {
        Self::new(base, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> MetricsSynthesizer<R> {
    pub fn new(base: Arc<BaseSeries>, rng: R) -> Self {
        Self {
            base,
            catalog: default_catalog(),
            rng,
        }
    }

    /// Replace the product catalog
    pub fn with_catalog(mut self, catalog: Vec<CatalogItem>) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn base(&self) -> &Arc<BaseSeries> {
        &self.base
    }

    pub fn catalog(&self) -> &[CatalogItem] {
        &self.catalog
    }

    pub fn compute_kpis(&mut self, current: &DateRange, comparison: &DateRange) -> Vec<Kpi> {
        compute_kpis(current, comparison, &mut self.rng)
    }

    pub fn compute_trend(&self, current: &DateRange, comparison: &DateRange) -> TrendSeries {
        compute_trend(&self.base, current, comparison)
    }

    pub fn compute_funnel(&mut self, current: &DateRange) -> Vec<SalesFunnelStep> {
        compute_funnel(current, &mut self.rng)
    }

    pub fn compute_top_products(&mut self, current: &DateRange) -> Vec<Product> {
        compute_top_products(current, &self.catalog, &mut self.rng)
    }

    pub fn compute_detail_metrics(&mut self) -> DetailMetrics {
        compute_detail_metrics(&mut self.rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_duration_factor() {
        assert_eq!(duration_factor(28), 1.0);
        assert_eq!(duration_factor(7), 0.25);
        assert_eq!(duration_factor(0), 0.0);
        assert_eq!(duration_factor(-3), 0.0);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(1.23456, 2), 1.23);
        assert_eq!(round_to(1.235, 1), 1.2);
        assert_eq!(round_to(-2.5, 0), -3.0);
        assert_eq!(round_to(7.0, 3), 7.0);
    }

    #[test]
    fn test_seeded_synthesizers_agree() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 15).unwrap();
        let base = Arc::new(BaseSeries::generate(today, 60, &mut StdRng::seed_from_u64(0)));
        let range = DateRange::new(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(), today).unwrap();

        let mut a = MetricsSynthesizer::seeded(base.clone(), 9);
        let mut b = MetricsSynthesizer::seeded(base, 9);

        assert_eq!(a.compute_kpis(&range, &range), b.compute_kpis(&range, &range));
        assert_eq!(a.compute_funnel(&range), b.compute_funnel(&range));
        assert_eq!(a.compute_top_products(&range), b.compute_top_products(&range));
    }

    #[test]
    fn test_custom_catalog() {
        let base = Arc::new(BaseSeries::from_columns(
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            vec![],
            vec![],
        ));
        let mut synth = MetricsSynthesizer::seeded(base, 1)
            .with_catalog(vec![CatalogItem::new("x", "Only item", 100.0)]);

        let range = DateRange::single_day(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        let products = synth.compute_top_products(&range);
        assert_eq!(products.len(), 1);
        assert_eq!(synth.catalog()[0].name, "Only item");
    }
}
