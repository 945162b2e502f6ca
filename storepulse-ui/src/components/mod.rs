//! UI Components
//!
//! Reusable Leptos components for the dashboard.

pub mod detail_metrics;
pub mod header;
pub mod kpi_card;
pub mod loading;
pub mod period_selector;
pub mod sales_funnel;
pub mod toast;
pub mod top_products;
pub mod trend_chart;

pub use detail_metrics::DetailMetricsStrip;
pub use header::Header;
pub use kpi_card::{KpiCard, KpiGrid};
pub use period_selector::PeriodSelector;
pub use sales_funnel::SalesFunnel;
pub use toast::Toast;
pub use top_products::TopProducts;
pub use trend_chart::{TrendChart, TrendKind};
