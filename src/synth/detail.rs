//! Operational detail counters shown under the KPI cards

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Typical orders per hour (daily orders / 24)
const HOURLY_ORDERS: f64 = 166.0;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DetailMetrics {
    pub popular_products_without_stock: u32,
    pub orders_with_payments_in_authorization: u32,
    pub orders_in_last_hour: u32,
}

/// Sample a fresh set of detail counters
pub fn compute_detail_metrics<R: Rng + ?Sized>(rng: &mut R) -> DetailMetrics {
    DetailMetrics {
        popular_products_without_stock: rng.gen_range(5..20),
        orders_with_payments_in_authorization: rng.gen_range(0..5),
        orders_in_last_hour: (HOURLY_ORDERS * rng.gen_range(0.8..1.2)).floor() as u32,
    }
}
