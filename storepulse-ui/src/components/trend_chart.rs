//! Trend Chart Component
//!
//! Order and conversion trends on HTML5 Canvas. The current period is drawn
//! solid; the comparison period dashed grey on the same date axis.

use leptos::*;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use storepulse::dashboard::format::{format_axis_date, format_grouped, format_ratio_pct};
use storepulse::TrendSeries;

use crate::components::loading::ChartSkeleton;
use crate::state::use_dashboard_state;

const CURRENT_COLOR: &str = "#2563eb";
const PREVIOUS_COLOR: &str = "#9ca3af";

const MARGIN_LEFT: f64 = 64.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 20.0;
const MARGIN_BOTTOM: f64 = 40.0;

/// Which trend a chart plots
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendKind {
    Orders,
    Conversion,
}

impl TrendKind {
    fn title(&self) -> &'static str {
        match self {
            TrendKind::Orders => "Orders",
            TrendKind::Conversion => "Conversion rate",
        }
    }

    /// Current and previous values as plot coordinates
    fn series(&self, trend: &TrendSeries) -> (Vec<f64>, Vec<f64>) {
        match self {
            TrendKind::Orders => (
                trend.current_period_orders.iter().map(|&v| v as f64).collect(),
                trend.previous_period_orders.iter().map(|&v| v as f64).collect(),
            ),
            TrendKind::Conversion => (
                trend.current_period_conv.clone(),
                trend.previous_period_conv.clone(),
            ),
        }
    }

    fn axis_label(&self, value: f64) -> String {
        match self {
            TrendKind::Orders => format_grouped(value.round(), 0),
            TrendKind::Conversion => format_ratio_pct(value, 2),
        }
    }
}

#[component]
pub fn TrendChart(kind: TrendKind) -> impl IntoView {
    let state = use_dashboard_state();
    let canvas_ref = create_node_ref::<html::Canvas>();

    // Redraw whenever the trend changes
    create_effect(move |_| {
        let snapshot = state.snapshot.get();
        if snapshot.is_loading {
            return;
        }
        if let Some(canvas) = canvas_ref.get() {
            draw_chart(&canvas, &snapshot.trend, kind);
        }
    });

    view! {
        <section class="bg-white rounded-xl shadow-sm p-6">
            <h2 class="text-lg font-semibold mb-4 text-gray-900">{kind.title()}</h2>
            <div class=move || if state.snapshot.get().is_loading { "hidden" } else { "" }>
                <canvas
                    node_ref=canvas_ref
                    width="800"
                    height="320"
                    class="w-full h-64 rounded-lg"
                />
                <ChartLegend />
            </div>
            {move || state.snapshot.get().is_loading.then(|| view! { <ChartSkeleton /> })}
        </section>
    }
}

#[component]
fn ChartLegend() -> impl IntoView {
    view! {
        <div class="flex justify-center gap-6 mt-4 text-sm text-gray-600">
            <div class="flex items-center space-x-2">
                <div class="w-6 h-0.5" style=format!("background-color: {}", CURRENT_COLOR) />
                <span>"Current period"</span>
            </div>
            <div class="flex items-center space-x-2">
                <div
                    class="w-6 h-0 border-t-2 border-dashed"
                    style=format!("border-color: {}", PREVIOUS_COLOR)
                />
                <span>"Comparison period"</span>
            </div>
        </div>
    }
}

/// Y-axis bounds covering both series with 10% headroom
pub(crate) fn value_bounds(current: &[f64], previous: &[f64]) -> (f64, f64) {
    let (min, max) = current
        .iter()
        .chain(previous)
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });

    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }

    let padding = if max > min { (max - min) * 0.1 } else { max.abs().max(1.0) * 0.1 };
    ((min - padding).max(0.0), max + padding)
}

/// Horizontal position of point `idx` out of `count`
pub(crate) fn x_position(idx: usize, count: usize, chart_width: f64) -> f64 {
    if count <= 1 {
        return MARGIN_LEFT + chart_width / 2.0;
    }
    MARGIN_LEFT + idx as f64 / (count - 1) as f64 * chart_width
}

/// Indices of at most `max_labels` evenly spaced axis ticks
pub(crate) fn tick_indices(count: usize, max_labels: usize) -> Vec<usize> {
    if count == 0 || max_labels == 0 {
        return Vec::new();
    }
    let step = count.div_ceil(max_labels).max(1);
    (0..count).step_by(step).collect()
}

fn draw_chart(canvas: &HtmlCanvasElement, trend: &TrendSeries, kind: TrendKind) {
    let ctx = match canvas.get_context("2d") {
        Ok(Some(ctx)) => match ctx.dyn_into::<CanvasRenderingContext2d>() {
            Ok(ctx) => ctx,
            Err(_) => return,
        },
        _ => return,
    };

    let width = canvas.width() as f64;
    let height = canvas.height() as f64;
    let chart_width = width - MARGIN_LEFT - MARGIN_RIGHT;
    let chart_height = height - MARGIN_TOP - MARGIN_BOTTOM;

    ctx.set_fill_style(&"#ffffff".into());
    ctx.fill_rect(0.0, 0.0, width, height);

    if trend.is_empty() {
        ctx.set_fill_style(&"#6b7280".into());
        ctx.set_font("16px sans-serif");
        let _ = ctx.fill_text("No data for selected range", width / 2.0 - 90.0, height / 2.0);
        return;
    }

    let (current, previous) = kind.series(trend);
    let (min, max) = value_bounds(&current, &previous);
    let y_of = |value: f64| MARGIN_TOP + (max - value) / (max - min) * chart_height;

    // Horizontal grid lines with y-axis labels
    ctx.set_stroke_style(&"#e5e7eb".into());
    ctx.set_line_width(1.0);
    ctx.set_font("12px sans-serif");
    for i in 0..=4 {
        let y = MARGIN_TOP + (i as f64 / 4.0) * chart_height;
        ctx.begin_path();
        ctx.move_to(MARGIN_LEFT, y);
        ctx.line_to(width - MARGIN_RIGHT, y);
        ctx.stroke();

        let value = max - (i as f64 / 4.0) * (max - min);
        ctx.set_fill_style(&"#6b7280".into());
        let _ = ctx.fill_text(&kind.axis_label(value), 5.0, y + 4.0);
    }

    let count = trend.len();
    draw_line(&ctx, &previous, count, chart_width, &y_of, PREVIOUS_COLOR, true);
    draw_line(&ctx, &current, count, chart_width, &y_of, CURRENT_COLOR, false);

    // X-axis labels
    ctx.set_fill_style(&"#6b7280".into());
    for idx in tick_indices(count, 8) {
        let x = x_position(idx, count, chart_width);
        let _ = ctx.fill_text(&format_axis_date(trend.dates[idx]), x - 15.0, height - 10.0);
    }
}

fn draw_line(
    ctx: &CanvasRenderingContext2d,
    values: &[f64],
    count: usize,
    chart_width: f64,
    y_of: &dyn Fn(f64) -> f64,
    color: &str,
    dashed: bool,
) {
    let dash = if dashed {
        js_sys::Array::of2(&JsValue::from_f64(6.0), &JsValue::from_f64(4.0))
    } else {
        js_sys::Array::new()
    };
    let _ = ctx.set_line_dash(&dash);

    ctx.set_stroke_style(&color.into());
    ctx.set_line_width(2.0);
    ctx.begin_path();
    for (idx, &value) in values.iter().enumerate() {
        let x = x_position(idx, count, chart_width);
        if idx == 0 {
            ctx.move_to(x, y_of(value));
        } else {
            ctx.line_to(x, y_of(value));
        }
    }
    ctx.stroke();

    let _ = ctx.set_line_dash(&js_sys::Array::new());
}
