//! KPI Card Component
//!
//! Displays a headline metric with its change vs. the comparison period.

use leptos::*;

use storepulse::dashboard::format::{format_kpi_value, format_pct_change};
use storepulse::Kpi;

use crate::components::loading::CardSkeleton;
use crate::state::use_dashboard_state;

/// Row of the four headline KPIs
#[component]
pub fn KpiGrid() -> impl IntoView {
    let state = use_dashboard_state();

    view! {
        <div class="grid grid-cols-2 md:grid-cols-4 gap-4">
            {move || {
                let snapshot = state.snapshot.get();
                if snapshot.is_loading {
                    (0..4).map(|_| view! { <CardSkeleton /> }).collect_view()
                } else {
                    snapshot.kpis.into_iter().map(|kpi| view! { <KpiCard kpi=kpi /> }).collect_view()
                }
            }}
        </div>
    }
}

#[component]
pub fn KpiCard(kpi: Kpi) -> impl IntoView {
    let (arrow, color) = if kpi.pct_change >= 0.0 {
        ("↑", "text-green-600")
    } else {
        ("↓", "text-red-600")
    };
    let description = kpi.key.description();

    view! {
        <div class="group relative bg-white rounded-lg p-4 shadow-sm border border-gray-200">
            <div class="flex items-center justify-between">
                <span class="text-gray-500 text-sm">{kpi.label.clone()}</span>
                <span class="text-gray-400 text-xs cursor-help" title=description>"ⓘ"</span>
            </div>

            <div class="text-2xl font-bold mt-2 text-gray-900">
                {format_kpi_value(kpi.value, kpi.unit)}
            </div>

            <div class=format!("mt-2 text-sm {}", color)>
                {arrow}
                " "
                {format_pct_change(kpi.pct_change)}
                <span class="text-gray-400">" vs comparison"</span>
            </div>

            // Tooltip
            <div class="absolute z-10 hidden group-hover:block left-0 top-full mt-2 w-72 \
                        bg-gray-900 text-white text-xs rounded-lg p-3 shadow-lg">
                {description}
            </div>
        </div>
    }
}
