//! Period selection
//!
//! - **types**: `DateRange`, `PeriodKey`, `ComparisonKey`
//! - **resolver**: maps keys to concrete ranges anchored on today
//! - **error**: error types
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use storepulse::period::{ComparisonKey, PeriodKey, PeriodResolver};
//!
//! let resolver = PeriodResolver::new(NaiveDate::from_ymd_opt(2025, 3, 15).unwrap());
//! let current = resolver.default_range(PeriodKey::Last7).unwrap();
//! let previous = resolver
//!     .comparison_range(&current, ComparisonKey::PreviousPeriod, None)
//!     .unwrap();
//!
//! assert_eq!(current.day_count(), 7);
//! assert_eq!(previous.to().succ_opt(), Some(current.from()));
//! ```

pub mod error;
pub mod resolver;
pub mod types;

pub use error::{PeriodError, PeriodResult};
pub use resolver::{PeriodResolver, DAYS_PER_YEAR};
pub use types::{parse_iso_date, ComparisonKey, DateRange, PeriodKey, ISO_DATE};
