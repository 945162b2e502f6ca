//! Dashboard Page
//!
//! KPIs, trends, funnel and top products for the selected period.

use leptos::*;

use crate::components::{
    DetailMetricsStrip, KpiGrid, PeriodSelector, SalesFunnel, TopProducts, TrendChart, TrendKind,
};
use crate::state::use_dashboard_state;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let state = use_dashboard_state();

    view! {
        <div class="space-y-6">
            <PeriodSelector />

            {move || {
                if state.snapshot.get().is_incomplete {
                    view! { <IncompleteNotice /> }.into_view()
                } else {
                    view! {
                        <div class="space-y-6">
                            <KpiGrid />
                            <DetailMetricsStrip />

                            <div class="grid md:grid-cols-2 gap-6">
                                <TrendChart kind=TrendKind::Orders />
                                <TrendChart kind=TrendKind::Conversion />
                            </div>

                            <div class="grid md:grid-cols-2 gap-6">
                                <TopProducts />
                                <SalesFunnel />
                            </div>
                        </div>
                    }.into_view()
                }
            }}
        </div>
    }
}

/// Shown while a custom range is still missing a date
#[component]
fn IncompleteNotice() -> impl IntoView {
    view! {
        <div class="bg-yellow-50 border border-yellow-200 text-yellow-800 rounded-xl p-6 text-center">
            <p class="font-medium">"Select both a start and an end date"</p>
            <p class="text-sm mt-1">"The dashboard updates once the custom range is complete."</p>
        </div>
    }
}
