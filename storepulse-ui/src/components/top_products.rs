//! Top Products Component

use leptos::*;

use storepulse::dashboard::format::{format_currency, format_pct_change};
use storepulse::{Currency, Product};

use crate::components::loading::ListSkeleton;
use crate::state::use_dashboard_state;

#[component]
pub fn TopProducts() -> impl IntoView {
    let state = use_dashboard_state();

    view! {
        <section class="bg-white rounded-xl shadow-sm p-6">
            <h2 class="text-lg font-semibold mb-4 text-gray-900">"Top products"</h2>
            {move || {
                let snapshot = state.snapshot.get();
                if snapshot.is_loading {
                    view! { <ListSkeleton count=5 /> }.into_view()
                } else if snapshot.top_products.is_empty() {
                    view! { <p class="text-gray-400 text-sm">"No products for this period"</p> }.into_view()
                } else {
                    snapshot.top_products
                        .into_iter()
                        .enumerate()
                        .map(|(rank, product)| view! { <ProductRow rank={rank + 1} product=product /> })
                        .collect_view()
                }
            }}
        </section>
    }
}

#[component]
fn ProductRow(rank: usize, product: Product) -> impl IntoView {
    let (arrow, color) = if product.pct_change >= 0.0 {
        ("↑", "text-green-600")
    } else {
        ("↓", "text-red-600")
    };

    view! {
        <div class="flex items-center justify-between py-2 border-b border-gray-100 last:border-0">
            <div class="flex items-center space-x-3">
                <span class="text-gray-400 text-sm w-4">{rank}</span>
                <img src=product.img_url.clone() alt=product.name.clone() class="w-10 h-10 rounded" />
                <span class="text-sm text-gray-900">{product.name.clone()}</span>
            </div>
            <div class="text-right">
                <div class="text-sm font-semibold">{format_currency(product.revenue, Currency::Ars)}</div>
                <div class=format!("text-xs {}", color)>
                    {arrow}
                    " "
                    {format_pct_change(product.pct_change)}
                </div>
            </div>
        </div>
    }
}
