//! What the user has picked in the period selectors

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::period::{
    ComparisonKey, DateRange, PeriodError, PeriodKey, PeriodResolver, PeriodResult,
};

/// A custom range that may still be missing one or both ends
///
/// Date pickers fill `from` first; until `to` is set the range is unusable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl PartialRange {
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Self { from, to }
    }

    /// Both ends known
    pub fn complete(from: NaiveDate, to: NaiveDate) -> Self {
        Self::new(Some(from), Some(to))
    }

    /// Only the start picked so far
    pub fn starting(from: NaiveDate) -> Self {
        Self::new(Some(from), None)
    }

    pub fn is_complete(&self) -> bool {
        self.from.is_some() && self.to.is_some()
    }

    /// Both ends known and in order
    pub fn is_usable(&self) -> bool {
        matches!(self.to_range(), Ok(Some(_)))
    }

    /// Convert to a `DateRange` once both ends are known
    ///
    /// Returns `Ok(None)` while incomplete and an error when the ends are
    /// inverted.
    pub fn to_range(&self) -> PeriodResult<Option<DateRange>> {
        match (self.from, self.to) {
            (Some(from), Some(to)) => DateRange::new(from, to).map(Some),
            _ => Ok(None),
        }
    }
}

impl From<DateRange> for PartialRange {
    fn from(range: DateRange) -> Self {
        Self::complete(range.from(), range.to())
    }
}

/// Concrete ranges ready for synthesis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedPeriods {
    pub current: DateRange,
    pub comparison: DateRange,
}

/// Period and comparison choices, with their optional custom ranges
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub period: PeriodKey,
    #[serde(default)]
    pub custom_period: Option<PartialRange>,
    pub comparison: ComparisonKey,
    #[serde(default)]
    pub custom_comparison: Option<PartialRange>,
}

impl Selection {
    pub fn new(period: PeriodKey, comparison: ComparisonKey) -> Self {
        Self {
            period,
            comparison,
            ..Default::default()
        }
    }

    /// Select a period; leaving `Custom` discards the custom range
    pub fn set_period(&mut self, period: PeriodKey) {
        self.period = period;
        if period != PeriodKey::Custom {
            self.custom_period = None;
        }
    }

    /// Select a comparison; leaving `Custom` discards the custom range
    pub fn set_comparison(&mut self, comparison: ComparisonKey) {
        self.comparison = comparison;
        if comparison != ComparisonKey::Custom {
            self.custom_comparison = None;
        }
    }

    /// Set the custom period range, switching the period to `Custom`
    pub fn set_custom_period(&mut self, range: PartialRange) {
        self.period = PeriodKey::Custom;
        self.custom_period = Some(range);
    }

    /// Set the custom comparison range, switching the comparison to `Custom`
    pub fn set_custom_comparison(&mut self, range: PartialRange) {
        self.comparison = ComparisonKey::Custom;
        self.custom_comparison = Some(range);
    }

    /// Whether a custom choice lacks a usable range (missing or inverted dates)
    pub fn is_incomplete(&self) -> bool {
        let pending = |key_is_custom: bool, range: &Option<PartialRange>| {
            key_is_custom && !range.map(|r| r.is_usable()).unwrap_or(false)
        };
        pending(self.period == PeriodKey::Custom, &self.custom_period)
            || pending(self.comparison == ComparisonKey::Custom, &self.custom_comparison)
    }

    /// Resolve to concrete ranges
    ///
    /// `Ok(None)` means a custom range is missing a date or has its ends
    /// inverted, and nothing should be synthesized yet. Errors come from date
    /// arithmetic leaving the supported calendar.
    pub fn resolve(&self, resolver: &PeriodResolver) -> PeriodResult<Option<ResolvedPeriods>> {
        let current = match self.period {
            PeriodKey::Custom => match custom_range(&self.custom_period)? {
                Some(range) => range,
                None => return Ok(None),
            },
            key => resolver.default_range(key)?,
        };

        let explicit = match self.comparison {
            ComparisonKey::Custom => match custom_range(&self.custom_comparison)? {
                Some(range) => Some(range),
                None => return Ok(None),
            },
            _ => None,
        };

        let comparison = resolver.comparison_range(&current, self.comparison, explicit)?;
        Ok(Some(ResolvedPeriods {
            current,
            comparison,
        }))
    }
}

fn custom_range(range: &Option<PartialRange>) -> PeriodResult<Option<DateRange>> {
    match range.map(|partial| partial.to_range()) {
        Some(Err(PeriodError::InvalidRange { from, to })) => {
            tracing::debug!(%from, %to, "Inverted custom range treated as incomplete");
            Ok(None)
        }
        Some(result) => result,
        None => Ok(None),
    }
}
