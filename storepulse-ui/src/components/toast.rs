//! Toast Notification Component
//!
//! Shows refresh errors.

use leptos::*;

use crate::state::use_dashboard_state;

#[component]
pub fn Toast() -> impl IntoView {
    let state = use_dashboard_state();

    view! {
        <div class="fixed bottom-6 right-4 z-50 space-y-2">
            {move || {
                state.error.get().map(|msg| view! {
                    <div class="flex items-center space-x-3 bg-red-600 text-white px-4 py-3 \
                                rounded-lg shadow-lg">
                        <span class="text-lg">"✕"</span>
                        <span class="text-sm font-medium">{msg}</span>
                    </div>
                })
            }}
        </div>
    }
}
