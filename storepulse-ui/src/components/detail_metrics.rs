//! Operational counters under the KPI cards

use leptos::*;

use crate::state::use_dashboard_state;

#[component]
pub fn DetailMetricsStrip() -> impl IntoView {
    let state = use_dashboard_state();

    view! {
        {move || {
            state.snapshot.get().detail.map(|detail| view! {
                <div class="grid grid-cols-1 md:grid-cols-3 gap-4 text-sm">
                    <DetailItem
                        label="Popular products without stock"
                        value=detail.popular_products_without_stock
                        accent="text-orange-600"
                    />
                    <DetailItem
                        label="Orders with payments in authorization"
                        value=detail.orders_with_payments_in_authorization
                        accent="text-yellow-600"
                    />
                    <DetailItem
                        label="Orders in the last hour"
                        value=detail.orders_in_last_hour
                        accent="text-blue-600"
                    />
                </div>
            })
        }}
    }
}

#[component]
fn DetailItem(label: &'static str, value: u32, accent: &'static str) -> impl IntoView {
    view! {
        <div class="bg-white rounded-lg px-4 py-3 border border-gray-200 flex items-center justify-between">
            <span class="text-gray-500">{label}</span>
            <span class=format!("font-semibold {}", accent)>{value}</span>
        </div>
    }
}
