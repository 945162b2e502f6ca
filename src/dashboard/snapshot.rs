//! Dashboard state and the refresh cycle

use rand::rngs::StdRng;
use rand::Rng;
use serde::Serialize;

use super::selection::{ResolvedPeriods, Selection};
use crate::period::{DateRange, PeriodResolver, PeriodResult};
use crate::synth::{DetailMetrics, Kpi, MetricsSynthesizer, Product, SalesFunnelStep, TrendSeries};

/// Everything the dashboard renders after one refresh
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    /// A refresh is underway; views show skeletons
    pub is_loading: bool,
    /// A custom range lacks usable dates; nothing was synthesized
    pub is_incomplete: bool,
    pub current: Option<DateRange>,
    pub comparison: Option<DateRange>,
    pub kpis: Vec<Kpi>,
    pub trend: TrendSeries,
    pub funnel: Vec<SalesFunnelStep>,
    pub top_products: Vec<Product>,
    pub detail: Option<DetailMetrics>,
}

impl DashboardSnapshot {
    /// Empty snapshot shown before the first refresh completes
    pub fn loading() -> Self {
        Self {
            is_loading: true,
            ..Default::default()
        }
    }

    /// Cleared snapshot for an incomplete selection
    pub fn incomplete() -> Self {
        Self {
            is_incomplete: true,
            ..Default::default()
        }
    }

    /// Whether there is synthesized data to render
    pub fn has_data(&self) -> bool {
        self.current.is_some()
    }

    /// What to show while a refresh for `selection` waits out the debounce
    ///
    /// An incomplete selection clears results at once and never schedules a
    /// refresh. Otherwise the current data stays with the loading flag set.
    pub fn pending(&self, selection: &Selection) -> Self {
        if selection.is_incomplete() {
            return Self::incomplete();
        }
        Self {
            is_loading: true,
            is_incomplete: false,
            ..self.clone()
        }
    }
}

/// Owns the synthesizer and the latest snapshot
pub struct Dashboard<R = StdRng> {
    resolver: PeriodResolver,
    synth: MetricsSynthesizer<R>,
    snapshot: DashboardSnapshot,
}

impl<R: Rng> Dashboard<R> {
    pub fn new(resolver: PeriodResolver, synth: MetricsSynthesizer<R>) -> Self {
        Self {
            resolver,
            synth,
            snapshot: DashboardSnapshot::loading(),
        }
    }

    pub fn resolver(&self) -> &PeriodResolver {
        &self.resolver
    }

    pub fn synthesizer(&self) -> &MetricsSynthesizer<R> {
        &self.synth
    }

    pub fn snapshot(&self) -> &DashboardSnapshot {
        &self.snapshot
    }

    /// Mark a refresh as pending; prior data stays until it completes
    pub fn begin_refresh(&mut self) {
        self.snapshot.is_loading = true;
    }

    /// Recompute every dataset for `selection`
    ///
    /// An incomplete or inverted custom selection clears all results and sets
    /// the incomplete flag instead of synthesizing. Resolution errors leave
    /// the previous data in place and clear the loading flag.
    pub fn refresh(&mut self, selection: &Selection) -> PeriodResult<&DashboardSnapshot> {
        self.begin_refresh();

        let resolved = match selection.resolve(&self.resolver) {
            Ok(resolved) => resolved,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to resolve selection");
                self.snapshot.is_loading = false;
                return Err(e);
            }
        };

        self.snapshot = match resolved {
            Some(periods) => self.synthesize(&periods),
            None => {
                tracing::debug!(
                    period = %selection.period,
                    comparison = %selection.comparison,
                    "Selection incomplete, clearing results"
                );
                DashboardSnapshot::incomplete()
            }
        };

        Ok(&self.snapshot)
    }

    /// Build a full snapshot for already-resolved periods
    pub fn synthesize(&mut self, periods: &ResolvedPeriods) -> DashboardSnapshot {
        let ResolvedPeriods {
            current,
            comparison,
        } = *periods;

        let kpis = self.synth.compute_kpis(&current, &comparison);
        let trend = self.synth.compute_trend(&current, &comparison);
        let funnel = self.synth.compute_funnel(&current);
        let top_products = self.synth.compute_top_products(&current);
        let detail = self.synth.compute_detail_metrics();

        tracing::debug!(
            current = %current,
            comparison = %comparison,
            days = trend.len(),
            "Synthesized dashboard"
        );

        DashboardSnapshot {
            is_loading: false,
            is_incomplete: false,
            current: Some(current),
            comparison: Some(comparison),
            kpis,
            trend,
            funnel,
            top_products,
            detail: Some(detail),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::PartialRange;
    use crate::period::{ComparisonKey, PeriodKey};
    use crate::synth::BaseSeries;
    use chrono::NaiveDate;
    use rand::SeedableRng;
    use std::sync::Arc;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn dashboard() -> Dashboard {
        let today = date(2025, 3, 15);
        let base = Arc::new(BaseSeries::generate(today, 730, &mut StdRng::seed_from_u64(42)));
        Dashboard::new(
            PeriodResolver::new(today),
            MetricsSynthesizer::seeded(base, 7),
        )
    }

    #[test]
    fn test_starts_loading() {
        let dashboard = dashboard();
        assert!(dashboard.snapshot().is_loading);
        assert!(!dashboard.snapshot().has_data());
    }

    #[test]
    fn test_last7_previous_period() {
        let mut dashboard = dashboard();
        let selection = Selection::new(PeriodKey::Last7, ComparisonKey::PreviousPeriod);
        let snapshot = dashboard.refresh(&selection).unwrap();

        assert!(!snapshot.is_loading);
        assert!(!snapshot.is_incomplete);
        assert_eq!(snapshot.trend.dates.len(), 7);
        assert_eq!(snapshot.trend.dates[0], date(2025, 3, 9));
        assert_eq!(snapshot.trend.previous_period_orders.len(), 7);
        assert!(snapshot
            .trend
            .current_period_conv
            .iter()
            .chain(&snapshot.trend.previous_period_conv)
            .all(|c| (0.0..=1.0).contains(c)));

        assert_eq!(snapshot.kpis.len(), 4);
        assert_eq!(snapshot.funnel.len(), 6);
        assert_eq!(snapshot.top_products.len(), 7);
        assert!(snapshot.detail.is_some());
        assert_eq!(snapshot.comparison.map(|r| r.to()), Some(date(2025, 3, 8)));
    }

    #[test]
    fn test_incomplete_selection_clears_results() {
        let mut dashboard = dashboard();
        dashboard.refresh(&Selection::default()).unwrap();
        assert!(dashboard.snapshot().has_data());

        let mut selection = Selection::default();
        selection.set_custom_period(PartialRange::starting(date(2025, 1, 5)));
        let snapshot = dashboard.refresh(&selection).unwrap();

        assert!(snapshot.is_incomplete);
        assert!(!snapshot.is_loading);
        assert!(snapshot.kpis.is_empty());
        assert!(snapshot.trend.is_empty());
        assert!(snapshot.funnel.is_empty());
        assert!(snapshot.top_products.is_empty());
        assert_eq!(snapshot.detail, None);
    }

    #[test]
    fn test_error_keeps_previous_data() {
        let mut dashboard = dashboard();
        dashboard.refresh(&Selection::default()).unwrap();

        let mut selection = Selection::default();
        selection.set_custom_period(PartialRange::complete(NaiveDate::MIN, NaiveDate::MIN));
        assert!(dashboard.refresh(&selection).is_err());

        let snapshot = dashboard.snapshot();
        assert!(!snapshot.is_loading);
        assert!(snapshot.has_data());
        assert_eq!(snapshot.trend.len(), 28);
    }

    #[test]
    fn test_inverted_custom_range_clears_results() {
        let mut dashboard = dashboard();
        dashboard.refresh(&Selection::default()).unwrap();

        let mut selection = Selection::default();
        selection.set_custom_period(PartialRange::complete(date(2025, 2, 1), date(2025, 1, 1)));
        let snapshot = dashboard.refresh(&selection).unwrap();

        assert!(snapshot.is_incomplete);
        assert!(!snapshot.has_data());
    }

    #[test]
    fn test_begin_refresh_keeps_data() {
        let mut dashboard = dashboard();
        dashboard.refresh(&Selection::default()).unwrap();
        dashboard.begin_refresh();

        assert!(dashboard.snapshot().is_loading);
        assert!(dashboard.snapshot().has_data());
    }

    #[test]
    fn test_pending_incomplete_selection_clears_immediately() {
        let mut dashboard = dashboard();
        dashboard.refresh(&Selection::default()).unwrap();

        let mut selection = Selection::default();
        selection.set_custom_period(PartialRange::starting(date(2025, 1, 5)));
        let pending = dashboard.snapshot().pending(&selection);

        assert!(pending.is_incomplete);
        assert!(!pending.is_loading);
        assert!(!pending.has_data());
        assert!(pending.kpis.is_empty());
        assert!(pending.trend.is_empty());

        selection.set_custom_period(PartialRange::complete(date(2025, 1, 11), date(2025, 1, 5)));
        assert!(dashboard.snapshot().pending(&selection).is_incomplete);
    }

    #[test]
    fn test_pending_complete_selection_keeps_data_while_loading() {
        let mut dashboard = dashboard();
        dashboard.refresh(&Selection::default()).unwrap();

        let pending = dashboard
            .snapshot()
            .pending(&Selection::new(PeriodKey::Last7, ComparisonKey::PreviousYear));

        assert!(pending.is_loading);
        assert!(!pending.is_incomplete);
        assert!(pending.has_data());
        assert_eq!(pending.trend.len(), 28);
    }

    #[test]
    fn test_custom_range_outside_history_is_zero_filled() {
        let mut dashboard = dashboard();
        let mut selection = Selection::default();
        selection.set_custom_period(PartialRange::complete(date(2020, 1, 1), date(2020, 1, 10)));

        let snapshot = dashboard.refresh(&selection).unwrap();
        assert_eq!(snapshot.trend.len(), 10);
        assert!(snapshot.trend.current_period_orders.iter().all(|&o| o == 0));
    }

    #[test]
    fn test_snapshot_serializes_camel_case() {
        let mut dashboard = dashboard();
        dashboard.refresh(&Selection::default()).unwrap();
        let json = serde_json::to_value(dashboard.snapshot()).unwrap();

        assert_eq!(json["isLoading"], false);
        assert_eq!(json["isIncomplete"], false);
        assert!(json["topProducts"].is_array());
        assert!(json["trend"]["currentPeriodOrders"].is_array());
    }
}
