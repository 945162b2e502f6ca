//! Display formatting for dashboard values
//!
//! Numbers use the continental European convention: `.` groups thousands and
//! `,` separates decimals.

use chrono::NaiveDate;

use super::selection::{PartialRange, Selection};
use crate::period::{ComparisonKey, PeriodKey};
use crate::synth::Currency;

/// Format for custom range labels, e.g. `Jan 05, 2025`
pub const LABEL_DATE: &str = "%b %d, %Y";
/// Format for chart axis ticks, e.g. `05/01`
pub const AXIS_DATE: &str = "%d/%m";

/// Group an absolute value with `.` and render `decimals` places after `,`
pub fn format_grouped(value: f64, decimals: usize) -> String {
    let rendered = format!("{:.*}", decimals, value.abs());
    let (integer, fraction) = match rendered.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (rendered.as_str(), None),
    };

    let mut out = String::with_capacity(rendered.len() + integer.len() / 3 + 1);
    let negative = value < 0.0 && rendered.bytes().any(|b| b.is_ascii_digit() && b != b'0');
    if negative {
        out.push('-');
    }
    for (idx, ch) in integer.chars().enumerate() {
        if idx > 0 && (integer.len() - idx) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    if let Some(fraction) = fraction {
        out.push(',');
        out.push_str(fraction);
    }
    out
}

/// Monetary amount with two decimals
pub fn format_currency(value: f64, currency: Currency) -> String {
    let amount = format_grouped(value, 2);
    match currency {
        Currency::Eur => format!("€{}", amount),
        Currency::Ars => format!("ARS {}", amount),
    }
}

/// Headline KPI value: currency when `unit` is set, otherwise a grouped count
pub fn format_kpi_value(value: f64, unit: Option<Currency>) -> String {
    match unit {
        Some(currency) => format_currency(value, currency),
        None => format_grouped(value.round(), 0),
    }
}

/// Unsigned percentage with two decimals, e.g. `3.25%`
pub fn format_pct_change(value: f64) -> String {
    format!("{:.2}%", value.abs())
}

/// Ratio rendered as a percentage, e.g. `0.0085` as `0.85%`
pub fn format_ratio_pct(ratio: f64, decimals: usize) -> String {
    format!("{:.*}%", decimals, ratio * 100.0)
}

pub fn format_axis_date(day: NaiveDate) -> String {
    day.format(AXIS_DATE).to_string()
}

/// Label for a custom range that may be missing one end
pub fn format_range_label(range: &PartialRange, placeholder: &str) -> String {
    match (range.from, range.to) {
        (Some(from), Some(to)) => format!(
            "{} - {}",
            from.format(LABEL_DATE),
            to.format(LABEL_DATE)
        ),
        (Some(from), None) => format!("{} - Select end date", from.format(LABEL_DATE)),
        _ => placeholder.to_string(),
    }
}

/// Selector label for the current period
pub fn period_label(selection: &Selection) -> String {
    match (selection.period, &selection.custom_period) {
        (PeriodKey::Custom, Some(range)) => format_range_label(range, "Select Custom Period"),
        (PeriodKey::Custom, None) => "Select Custom Period".to_string(),
        (key, _) => key.label().to_string(),
    }
}

/// Selector label for the comparison
pub fn comparison_label(selection: &Selection) -> String {
    match (selection.comparison, &selection.custom_comparison) {
        (ComparisonKey::Custom, Some(range)) => {
            format_range_label(range, "Select Custom Comparison")
        }
        (ComparisonKey::Custom, None) => "Select Custom Comparison".to_string(),
        (key, _) => key.label().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_grouping() {
        assert_eq!(format_grouped(0.0, 0), "0");
        assert_eq!(format_grouped(999.0, 0), "999");
        assert_eq!(format_grouped(1000.0, 0), "1.000");
        assert_eq!(format_grouped(1_234_567.891, 2), "1.234.567,89");
        assert_eq!(format_grouped(-4200.5, 1), "-4.200,5");
        assert_eq!(format_grouped(-0.001, 2), "0,00");
    }

    #[test]
    fn test_currency() {
        assert_eq!(format_currency(1234.5, Currency::Eur), "€1.234,50");
        assert_eq!(format_currency(28_000_000.0, Currency::Ars), "ARS 28.000.000,00");
    }

    #[test]
    fn test_kpi_values() {
        assert_eq!(format_kpi_value(250.126, Some(Currency::Eur)), "€250,13");
        assert_eq!(format_kpi_value(112_000.0, None), "112.000");
        assert_eq!(format_kpi_value(11_199_999.6, None), "11.200.000");
    }

    #[test]
    fn test_percentages() {
        assert_eq!(format_pct_change(-3.254), "3.25%");
        assert_eq!(format_pct_change(12.0), "12.00%");
        assert_eq!(format_ratio_pct(0.0085, 2), "0.85%");
        assert_eq!(format_ratio_pct(0.011, 1), "1.1%");
    }

    #[test]
    fn test_axis_date() {
        assert_eq!(format_axis_date(date(2025, 1, 5)), "05/01");
    }

    #[test]
    fn test_range_labels() {
        let full = PartialRange::complete(date(2025, 1, 5), date(2025, 1, 11));
        assert_eq!(format_range_label(&full, "x"), "Jan 05, 2025 - Jan 11, 2025");

        let half = PartialRange::starting(date(2025, 1, 5));
        assert_eq!(format_range_label(&half, "x"), "Jan 05, 2025 - Select end date");

        assert_eq!(format_range_label(&PartialRange::default(), "Pick"), "Pick");
    }

    #[test]
    fn test_selector_labels() {
        let mut selection = Selection::default();
        assert_eq!(period_label(&selection), "Last 28 Days");
        assert_eq!(comparison_label(&selection), "Previous Period");

        selection.set_period(PeriodKey::Custom);
        assert_eq!(period_label(&selection), "Select Custom Period");

        selection.set_custom_comparison(PartialRange::starting(date(2024, 12, 1)));
        assert_eq!(comparison_label(&selection), "Dec 01, 2024 - Select end date");
    }
}
