//! Dashboard State
//!
//! Reactive selection and snapshot signals, plus the debounced refresh that
//! feeds the snapshot from the in-browser synthesizer.

use std::sync::Arc;

use chrono::NaiveDate;
use gloo_timers::callback::Timeout;
use leptos::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use storepulse::dashboard::{LatestRequest, DEFAULT_DEBOUNCE_MS};
use storepulse::period::ISO_DATE;
use storepulse::synth::DEFAULT_HISTORY_DAYS;
use storepulse::{
    BaseSeries, ComparisonKey, Dashboard, DashboardSnapshot, MetricsSynthesizer, PartialRange,
    PeriodKey, PeriodResolver, Selection,
};

/// Dashboard state provided to all components
#[derive(Clone, Copy)]
pub struct DashboardState {
    /// Current period/comparison choices
    pub selection: RwSignal<Selection>,
    /// Latest rendered data
    pub snapshot: RwSignal<DashboardSnapshot>,
    /// Anchor day; date pickers cannot go past it
    pub today: NaiveDate,
    /// Error message to display
    pub error: RwSignal<Option<String>>,
    engine: StoredValue<Dashboard>,
    latest: StoredValue<LatestRequest>,
    pending: StoredValue<Option<Timeout>>,
}

/// Build the synthesizer and provide dashboard state to the component tree
pub fn provide_dashboard_state() {
    let resolver = PeriodResolver::now();
    let mut rng = StdRng::from_entropy();
    let base = Arc::new(BaseSeries::generate(
        resolver.today(),
        DEFAULT_HISTORY_DAYS,
        &mut rng,
    ));

    let state = DashboardState {
        selection: create_rw_signal(Selection::default()),
        snapshot: create_rw_signal(DashboardSnapshot::loading()),
        today: resolver.today(),
        error: create_rw_signal(None),
        engine: store_value(Dashboard::new(resolver, MetricsSynthesizer::new(base, rng))),
        latest: store_value(LatestRequest::new()),
        pending: store_value(None),
    };

    on_cleanup(move || state.pending.set_value(None));

    provide_context(state);
    state.schedule_refresh();
}

pub fn use_dashboard_state() -> DashboardState {
    expect_context::<DashboardState>()
}

impl DashboardState {
    pub fn set_period(&self, key: PeriodKey) {
        self.selection.update(|s| s.set_period(key));
        self.schedule_refresh();
    }

    pub fn set_comparison(&self, key: ComparisonKey) {
        self.selection.update(|s| s.set_comparison(key));
        self.schedule_refresh();
    }

    /// Update one end of the custom period
    pub fn set_custom_period(&self, from: Option<NaiveDate>, to: Option<NaiveDate>) {
        self.selection
            .update(|s| s.set_custom_period(PartialRange::new(from, to)));
        self.schedule_refresh();
    }

    /// Update one end of the custom comparison
    pub fn set_custom_comparison(&self, from: Option<NaiveDate>, to: Option<NaiveDate>) {
        self.selection
            .update(|s| s.set_custom_comparison(PartialRange::new(from, to)));
        self.schedule_refresh();
    }

    /// Show skeletons now and refresh once the selection settles
    ///
    /// An incomplete selection clears the results immediately and cancels any
    /// pending refresh. Replacing the stored timeout drops the previous one,
    /// which cancels it; the ticket check covers a callback already queued.
    pub fn schedule_refresh(&self) {
        let selection = self.selection.get_untracked();
        let pending = self.snapshot.with_untracked(|s| s.pending(&selection));
        let incomplete = pending.is_incomplete;
        self.snapshot.set(pending);

        let latest = self.latest.get_value();
        if incomplete {
            latest.supersede();
            self.pending.set_value(None);
            return;
        }

        let ticket = latest.issue();
        let state = *self;

        let timeout = Timeout::new(DEFAULT_DEBOUNCE_MS as u32, move || {
            if latest.is_current(ticket) {
                state.refresh_now();
            }
        });
        self.pending.set_value(Some(timeout));
    }

    fn refresh_now(&self) {
        let selection = self.selection.get_untracked();
        let outcome = self
            .engine
            .try_update_value(|engine| engine.refresh(&selection).map(|s| s.clone()));

        match outcome {
            Some(Ok(snapshot)) => {
                self.error.set(None);
                self.snapshot.set(snapshot);
            }
            Some(Err(e)) => {
                web_sys::console::error_1(&format!("Refresh failed: {}", e).into());
                self.show_error(&e.to_string());
                self.snapshot.update(|s| s.is_loading = false);
            }
            None => {}
        }
    }

    /// Show an error message (auto-clears after timeout)
    pub fn show_error(&self, message: &str) {
        self.error.set(Some(message.to_string()));

        let error_signal = self.error;
        Timeout::new(5000, move || {
            error_signal.set(None);
        })
        .forget();
    }
}

/// Value for an `<input type="date">`
pub fn date_input_value(day: Option<NaiveDate>) -> String {
    day.map(|d| d.format(ISO_DATE).to_string())
        .unwrap_or_default()
}

/// Parse an `<input type="date">` value; cleared inputs yield `None`
pub fn parse_date_input(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), ISO_DATE).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_input_round_trip() {
        let day = NaiveDate::from_ymd_opt(2025, 1, 5).unwrap();
        assert_eq!(date_input_value(Some(day)), "2025-01-05");
        assert_eq!(parse_date_input("2025-01-05"), Some(day));
    }

    #[test]
    fn test_cleared_input() {
        assert_eq!(date_input_value(None), "");
        assert_eq!(parse_date_input(""), None);
        assert_eq!(parse_date_input("05/01/2025"), None);
    }
}
