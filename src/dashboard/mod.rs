//! Dashboard model
//!
//! Ties the period selectors to the synthesizer:
//!
//! - **selection**: period/comparison choices, including half-picked custom ranges
//! - **snapshot**: the `Dashboard` refresh cycle and its rendered state
//! - **debounce**: latest-wins scheduling so rapid changes trigger one refresh
//! - **format**: number, currency and date labels for display

pub mod debounce;
pub mod format;
pub mod selection;
pub mod snapshot;

pub use debounce::{LatestRequest, Ticket, DEFAULT_DEBOUNCE_MS};
#[cfg(feature = "runtime")]
pub use debounce::Debouncer;
pub use selection::{PartialRange, ResolvedPeriods, Selection};
pub use snapshot::{Dashboard, DashboardSnapshot};
