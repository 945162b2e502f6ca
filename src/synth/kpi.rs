//! Scalar KPIs with period-over-period change

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{duration_factor, round_to};
use crate::period::DateRange;

/// Revenue over a 28-day period
pub const BASE_REVENUE: f64 = 28_000_000.0;
/// Average ticket, independent of period length
pub const BASE_AVG_TICKET: f64 = 250.0;
/// Orders over a 28-day period
pub const BASE_ORDERS: f64 = 112_000.0;
/// Sessions over a 28-day period
pub const BASE_SESSIONS: f64 = 11_200_000.0;

/// Currency a monetary KPI is expressed in
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Eur,
    Ars,
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Currency::Eur => write!(f, "EUR"),
            Currency::Ars => write!(f, "ARS"),
        }
    }
}

/// Identifier of a headline KPI
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum KpiKey {
    Revenue,
    AvgTicket,
    Orders,
    Sessions,
}

impl KpiKey {
    /// Get all KPI keys in display order
    pub fn all() -> &'static [KpiKey] {
        &[
            KpiKey::Revenue,
            KpiKey::AvgTicket,
            KpiKey::Orders,
            KpiKey::Sessions,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            KpiKey::Revenue => "Revenue",
            KpiKey::AvgTicket => "Average ticket",
            KpiKey::Orders => "Orders",
            KpiKey::Sessions => "Sessions",
        }
    }

    pub fn unit(&self) -> Option<Currency> {
        match self {
            KpiKey::Revenue | KpiKey::AvgTicket => Some(Currency::Eur),
            KpiKey::Orders | KpiKey::Sessions => None,
        }
    }

    /// Tooltip text explaining the metric
    pub fn description(&self) -> &'static str {
        match self {
            KpiKey::Revenue => {
                "Total income from sales before deducting costs. It indicates the overall \
                 financial performance and market demand for your products/services within \
                 the selected period. A rising revenue trend is generally positive, while a \
                 decline may signal a need for strategic adjustments."
            }
            KpiKey::AvgTicket => {
                "Average amount spent by a customer in a single order (Revenue / Orders). \
                 A higher average ticket can signify successful upselling, cross-selling \
                 strategies, or increased purchases of higher-value products. Analyzing this \
                 helps optimize pricing and product bundling."
            }
            KpiKey::Orders => {
                "Total number of completed transactions or purchases. This metric reflects \
                 customer demand and the effectiveness of your sales process during the \
                 chosen timeframe. An increase in orders usually indicates business growth \
                 and successful marketing efforts."
            }
            KpiKey::Sessions => {
                "Total number of visits to your online store. Each session represents a \
                 period of interaction by a user. This is a key indicator of website traffic, \
                 marketing reach, and brand visibility. More sessions can lead to more \
                 conversion opportunities."
            }
        }
    }
}

impl std::fmt::Display for KpiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KpiKey::Revenue => write!(f, "revenue"),
            KpiKey::AvgTicket => write!(f, "avg_ticket"),
            KpiKey::Orders => write!(f, "orders"),
            KpiKey::Sessions => write!(f, "sessions"),
        }
    }
}

/// A headline metric and its change against the comparison period
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Kpi {
    pub key: KpiKey,
    pub label: String,
    pub value: f64,
    pub unit: Option<Currency>,
    /// Percent change vs. the comparison period
    pub pct_change: f64,
}

impl Kpi {
    fn new(key: KpiKey, value: f64, previous: f64) -> Self {
        Self {
            key,
            label: key.label().to_string(),
            value,
            unit: key.unit(),
            pct_change: pct_change(value, previous),
        }
    }
}

/// Raw KPI magnitudes for one range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KpiValues {
    pub revenue: f64,
    pub avg_ticket: f64,
    pub orders: f64,
    pub sessions: f64,
}

impl KpiValues {
    /// Sample magnitudes for a range, scaled by its length
    pub fn sample<R: Rng + ?Sized>(range: &DateRange, rng: &mut R) -> Self {
        let factor = duration_factor(range.day_count());

        let revenue = round_to(BASE_REVENUE * factor * fluctuation(rng), 2);
        let orders = (BASE_ORDERS * factor * fluctuation(rng)).round();
        let sessions = (BASE_SESSIONS * factor * fluctuation(rng)).round();
        let avg_ticket = round_to(BASE_AVG_TICKET * rng.gen_range(0.95..1.05), 2);

        Self {
            revenue,
            avg_ticket,
            orders,
            sessions,
        }
    }

    pub fn get(&self, key: KpiKey) -> f64 {
        match key {
            KpiKey::Revenue => self.revenue,
            KpiKey::AvgTicket => self.avg_ticket,
            KpiKey::Orders => self.orders,
            KpiKey::Sessions => self.sessions,
        }
    }
}

/// Build the four KPIs for `current`, each compared against `comparison`
pub fn compute_kpis<R: Rng + ?Sized>(
    current: &DateRange,
    comparison: &DateRange,
    rng: &mut R,
) -> Vec<Kpi> {
    let now = KpiValues::sample(current, rng);
    let before = KpiValues::sample(comparison, rng);
    kpis_from_values(&now, &before)
}

/// Pair current and previous magnitudes into KPIs
pub fn kpis_from_values(current: &KpiValues, previous: &KpiValues) -> Vec<Kpi> {
    KpiKey::all()
        .iter()
        .map(|&key| Kpi::new(key, current.get(key), previous.get(key)))
        .collect()
}

/// Percent change from `previous` to `current`, rounded to 2 decimals
///
/// 0 when both are zero, 100 when only `previous` is zero.
pub fn pct_change(current: f64, previous: f64) -> f64 {
    if previous == 0.0 {
        return if current == 0.0 { 0.0 } else { 100.0 };
    }
    round_to((current - previous) / previous * 100.0, 2)
}

/// Small multiplicative noise applied per sampled magnitude
pub(crate) fn fluctuation<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.gen_range(0.98..1.02)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn range(days: u64) -> DateRange {
        let to = NaiveDate::from_ymd_opt(2025, 3, 15).unwrap();
        let from = to.checked_sub_days(chrono::Days::new(days - 1)).unwrap();
        DateRange::new(from, to).unwrap()
    }

    #[test]
    fn test_pct_change_edge_cases() {
        assert_eq!(pct_change(0.0, 0.0), 0.0);
        assert_eq!(pct_change(42.0, 0.0), 100.0);
        assert_eq!(pct_change(150.0, 100.0), 50.0);
        assert_eq!(pct_change(50.0, 100.0), -50.0);
        assert_eq!(pct_change(1.0, 3.0), -66.67);
    }

    #[test]
    fn test_kpi_shape() {
        let mut rng = StdRng::seed_from_u64(3);
        let kpis = compute_kpis(&range(28), &range(28), &mut rng);

        let keys: Vec<_> = kpis.iter().map(|k| k.key).collect();
        assert_eq!(keys, KpiKey::all());
        assert_eq!(kpis[0].unit, Some(Currency::Eur));
        assert_eq!(kpis[1].unit, Some(Currency::Eur));
        assert_eq!(kpis[2].unit, None);
        assert_eq!(kpis[3].label, "Sessions");
    }

    #[test]
    fn test_values_scale_with_duration() {
        let mut rng = StdRng::seed_from_u64(11);
        let week = KpiValues::sample(&range(7), &mut rng);
        let month = KpiValues::sample(&range(28), &mut rng);

        // 7 days is a quarter of the base, within the 2% fluctuation band
        assert!(week.revenue >= BASE_REVENUE * 0.25 * 0.98);
        assert!(week.revenue <= BASE_REVENUE * 0.25 * 1.02);
        assert!(month.orders >= BASE_ORDERS * 0.98 && month.orders <= BASE_ORDERS * 1.02);

        // Average ticket ignores duration
        assert!(week.avg_ticket >= 237.5 && week.avg_ticket <= 262.5);
        assert!(month.avg_ticket >= 237.5 && month.avg_ticket <= 262.5);
    }

    #[test]
    fn test_shorter_comparison_means_growth() {
        let mut rng = StdRng::seed_from_u64(5);
        let kpis = compute_kpis(&range(28), &range(7), &mut rng);

        // Four times the days dominates any fluctuation
        for kpi in kpis.iter().filter(|k| k.key != KpiKey::AvgTicket) {
            assert!(kpi.pct_change > 250.0, "{} {}", kpi.key, kpi.pct_change);
        }
    }

    #[test]
    fn test_zero_previous_values() {
        let current = KpiValues {
            revenue: 10.0,
            avg_ticket: 0.0,
            orders: 0.0,
            sessions: 5.0,
        };
        let previous = KpiValues {
            revenue: 0.0,
            avg_ticket: 0.0,
            orders: 0.0,
            sessions: 0.0,
        };

        let kpis = kpis_from_values(&current, &previous);
        assert_eq!(kpis[0].pct_change, 100.0);
        assert_eq!(kpis[1].pct_change, 0.0);
        assert_eq!(kpis[2].pct_change, 0.0);
        assert_eq!(kpis[3].pct_change, 100.0);
    }

    #[test]
    fn test_kpi_serializes() {
        let kpi = Kpi::new(KpiKey::AvgTicket, 251.5, 250.0);
        let json = serde_json::to_string(&kpi).unwrap();
        assert!(json.contains("\"key\":\"avg_ticket\""));
        assert!(json.contains("\"unit\":\"EUR\""));
        assert!(json.contains("\"pct_change\":0.6"));
    }
}
