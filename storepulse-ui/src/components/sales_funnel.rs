//! Sales Funnel Component
//!
//! One vertical bar per stage, sized by share of total sessions.

use leptos::*;

use storepulse::dashboard::format::format_grouped;
use storepulse::SalesFunnelStep;

use crate::components::loading::ChartSkeleton;
use crate::state::use_dashboard_state;

/// Bars never shrink below this height so small stages stay visible
const MIN_BAR_PCT: f64 = 5.0;

pub(crate) fn bar_height(pct: f64) -> f64 {
    pct.clamp(MIN_BAR_PCT, 100.0)
}

#[component]
pub fn SalesFunnel() -> impl IntoView {
    let state = use_dashboard_state();

    view! {
        <section class="bg-white rounded-xl shadow-sm p-6">
            <h2 class="text-lg font-semibold mb-4 text-gray-900">"Sales funnel"</h2>
            {move || {
                let snapshot = state.snapshot.get();
                if snapshot.is_loading {
                    view! { <ChartSkeleton /> }.into_view()
                } else {
                    view! {
                        <div class="flex items-end gap-3 h-64">
                            {snapshot.funnel.into_iter().map(|step| view! { <FunnelBar step=step /> }).collect_view()}
                        </div>
                    }.into_view()
                }
            }}
        </section>
    }
}

#[component]
fn FunnelBar(step: SalesFunnelStep) -> impl IntoView {
    let delta_color = if step.delta_pp >= 0.0 { "text-green-600" } else { "text-red-600" };
    let conversion = step
        .conversion_from_prev
        .map(|c| format!("{:.1}% of previous", c));

    view! {
        <div class="flex-1 flex flex-col items-center justify-end h-full">
            <span class="text-xs font-semibold text-gray-900">{format!("{:.1}%", step.pct)}</span>
            <span class=format!("text-xs {}", delta_color)>{format!("{:+.2} pp", step.delta_pp)}</span>
            <div
                class="w-full bg-blue-500 rounded-t mt-1"
                style=format!("height: {}%", bar_height(step.pct))
                title=conversion
            />
            <span class="text-xs text-gray-500 mt-2 text-center">{step.step}</span>
            <span class="text-xs text-gray-400">{format_grouped(step.count as f64, 0)}</span>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_height_floor() {
        assert_eq!(bar_height(0.9), 5.0);
        assert_eq!(bar_height(60.0), 60.0);
        assert_eq!(bar_height(100.0), 100.0);
    }
}
