//! # StorePulse
//!
//! E-commerce analytics dashboard core: resolves the selected reporting
//! period and its comparison, then synthesizes every dataset the dashboard
//! renders from a shared daily base series.
//!
//! ## Modules
//!
//! - [`period`]: preset and custom date ranges, comparison derivation
//! - [`synth`]: KPIs, trend series, sales funnel, top products
//! - [`dashboard`]: selection state, refresh cycle, debouncing, display formatting
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use chrono::NaiveDate;
//! use rand::{rngs::StdRng, SeedableRng};
//! use storepulse::{BaseSeries, ComparisonKey, Dashboard, MetricsSynthesizer, PeriodKey,
//!     PeriodResolver, Selection};
//!
//! let today = NaiveDate::from_ymd_opt(2025, 3, 15).unwrap();
//! let base = Arc::new(BaseSeries::generate(today, 730, &mut StdRng::seed_from_u64(1)));
//! let mut dashboard = Dashboard::new(
//!     PeriodResolver::new(today),
//!     MetricsSynthesizer::seeded(base, 2),
//! );
//!
//! let selection = Selection::new(PeriodKey::Last7, ComparisonKey::PreviousPeriod);
//! let snapshot = dashboard.refresh(&selection).unwrap();
//!
//! assert_eq!(snapshot.trend.dates.len(), 7);
//! assert_eq!(snapshot.kpis.len(), 4);
//! ```

pub mod config;
pub mod dashboard;
pub mod period;
pub mod synth;

// Re-export top-level types for convenience
pub use period::{ComparisonKey, DateRange, PeriodError, PeriodKey, PeriodResolver, PeriodResult};

pub use synth::{
    BaseSeries, Currency, DetailMetrics, Kpi, KpiKey, MetricsSynthesizer, Product,
    SalesFunnelStep, TrendSeries,
};

pub use dashboard::{
    Dashboard, DashboardSnapshot, LatestRequest, PartialRange, ResolvedPeriods, Selection,
};

#[cfg(feature = "runtime")]
pub use dashboard::Debouncer;

pub use config::{Config, ConfigError, DashboardConfig, LoggingConfig, SynthConfig};
