//! Header Component
//!
//! Title bar with the store name.

use leptos::*;

#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header class="bg-white border-b border-gray-200">
            <div class="container mx-auto px-4">
                <div class="flex items-center justify-between h-16">
                    <div class="flex items-center space-x-3">
                        <span class="text-2xl">"🛒"</span>
                        <div>
                            <span class="text-xl font-bold text-gray-900">"StorePulse"</span>
                            <p class="text-xs text-gray-500">"Storefront performance overview"</p>
                        </div>
                    </div>
                </div>
            </div>
        </header>
    }
}
