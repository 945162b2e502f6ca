//! Sales funnel from session to order

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::kpi::{fluctuation, BASE_ORDERS, BASE_SESSIONS};
use super::{duration_factor, round_to};
use crate::period::DateRange;

/// Stages of the purchase funnel, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunnelStage {
    Sessions,
    ProductPage,
    Cart,
    Shipping,
    Payment,
    Orders,
}

impl FunnelStage {
    pub fn all() -> &'static [FunnelStage] {
        &[
            FunnelStage::Sessions,
            FunnelStage::ProductPage,
            FunnelStage::Cart,
            FunnelStage::Shipping,
            FunnelStage::Payment,
            FunnelStage::Orders,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            FunnelStage::Sessions => "Total sessions",
            FunnelStage::ProductPage => "Product page sessions",
            FunnelStage::Cart => "Cart sessions",
            FunnelStage::Shipping => "Shipping sessions",
            FunnelStage::Payment => "Payment sessions",
            FunnelStage::Orders => "Orders",
        }
    }

    /// Spread of the percentage-point delta vs. the prior period
    pub fn volatility(&self) -> f64 {
        match self {
            FunnelStage::Sessions => 0.0,
            FunnelStage::ProductPage => 8.0,
            FunnelStage::Cart => 1.0,
            FunnelStage::Shipping => 0.5,
            FunnelStage::Payment => 0.3,
            FunnelStage::Orders => 0.2,
        }
    }
}

/// One funnel stage as rendered by the funnel chart
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SalesFunnelStep {
    pub step: String,
    pub count: u64,
    /// Share of the first stage, in percent (1 decimal)
    pub pct: f64,
    /// Share of the previous stage, in percent (1 decimal)
    #[serde(
        rename = "conversionFromPrev",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub conversion_from_prev: Option<f64>,
    /// Percentage-point change vs. the prior period
    pub delta_pp: f64,
}

/// Build the funnel for `current`
///
/// Intermediate stages are random fractions of sessions; the last stage is
/// the period's order count.
pub fn compute_funnel<R: Rng + ?Sized>(current: &DateRange, rng: &mut R) -> Vec<SalesFunnelStep> {
    let factor = duration_factor(current.day_count());

    let orders = (BASE_ORDERS * factor * fluctuation(rng)).round();
    let sessions = (BASE_SESSIONS * factor * fluctuation(rng)).round();
    let conversion_rate = if sessions > 0.0 {
        round_to(orders / sessions * 100.0, 1)
    } else {
        0.0
    };

    let counts = [
        sessions,
        (sessions * rng.gen_range(0.55..0.65)).round(),
        (sessions * rng.gen_range(0.04..0.06)).round(),
        (sessions * rng.gen_range(0.02..0.03)).round(),
        (sessions * (conversion_rate / 100.0) * rng.gen_range(1.1..1.3)).round(),
        orders,
    ];

    let stages: Vec<(FunnelStage, u64)> = FunnelStage::all()
        .iter()
        .copied()
        .zip(counts.iter().map(|&c| c.max(0.0) as u64))
        .collect();

    build_steps(&stages, rng)
}

/// Derive percentages and deltas for a sequence of stage counts
pub fn build_steps<R: Rng + ?Sized>(
    stages: &[(FunnelStage, u64)],
    rng: &mut R,
) -> Vec<SalesFunnelStep> {
    let first = stages.first().map(|(_, c)| *c).unwrap_or(0);

    stages
        .iter()
        .enumerate()
        .map(|(idx, &(stage, count))| {
            let pct = if first > 0 {
                round_to(count as f64 / first as f64 * 100.0, 1)
            } else {
                0.0
            };

            let conversion_from_prev = idx
                .checked_sub(1)
                .map(|prev| stages[prev].1)
                .filter(|&prev| prev > 0)
                .map(|prev| round_to(count as f64 / prev as f64 * 100.0, 1));

            let delta_pp = round_to((rng.gen::<f64>() - 0.5) * stage.volatility(), 2);

            SalesFunnelStep {
                step: stage.label().to_string(),
                count,
                pct,
                conversion_from_prev,
                delta_pp,
            }
        })
        .collect()
}
