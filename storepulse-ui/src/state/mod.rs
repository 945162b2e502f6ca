//! State Management
//!
//! Dashboard selection, snapshot and debounced refresh.

pub mod dashboard;

pub use dashboard::{provide_dashboard_state, use_dashboard_state, DashboardState};
