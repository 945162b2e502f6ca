//! Period Selector Component
//!
//! Period and comparison dropdowns, with date inputs for custom ranges.

use leptos::*;

use storepulse::dashboard::format::{comparison_label, period_label};
use storepulse::period::ISO_DATE;
use storepulse::{ComparisonKey, PartialRange, PeriodKey};

use crate::state::dashboard::{date_input_value, parse_date_input};
use crate::state::use_dashboard_state;

#[component]
pub fn PeriodSelector() -> impl IntoView {
    let state = use_dashboard_state();
    let max_date = state.today.format(ISO_DATE).to_string();

    let period = create_memo(move |_| state.selection.get().period);
    let comparison = create_memo(move |_| state.selection.get().comparison);

    let on_period = move |ev| {
        let key = PeriodKey::from(event_target_value(&ev).as_str());
        state.set_period(key);
    };
    let on_comparison = move |ev| {
        let key = ComparisonKey::from(event_target_value(&ev).as_str());
        state.set_comparison(key);
    };

    let custom_period = Signal::derive(move || state.selection.get().custom_period.unwrap_or_default());
    let custom_comparison =
        Signal::derive(move || state.selection.get().custom_comparison.unwrap_or_default());

    let max_for_period = max_date.clone();
    let max_for_comparison = max_date;

    view! {
        <section class="bg-white rounded-xl shadow-sm p-4 flex flex-wrap items-end gap-6">
            <div class="flex flex-col space-y-1">
                <label class="text-xs font-medium text-gray-500 uppercase">"Period"</label>
                <select
                    class="border border-gray-300 rounded-lg px-3 py-2 text-sm"
                    on:change=on_period
                    prop:value=move || period.get().as_str()
                >
                    {PeriodKey::all().iter().map(|key| view! {
                        <option value=key.as_str()>{key.label()}</option>
                    }).collect_view()}
                </select>
                <span class="text-xs text-gray-400">
                    {move || period_label(&state.selection.get())}
                </span>
            </div>

            {move || (period.get() == PeriodKey::Custom).then(|| {
                let max = max_for_period.clone();
                view! {
                    <DateRangeInputs
                        range=custom_period
                        max=max
                        on_change=Callback::new(move |(from, to)| state.set_custom_period(from, to))
                    />
                }
            })}

            <div class="flex flex-col space-y-1">
                <label class="text-xs font-medium text-gray-500 uppercase">"Compare to"</label>
                <select
                    class="border border-gray-300 rounded-lg px-3 py-2 text-sm"
                    on:change=on_comparison
                    prop:value=move || comparison.get().as_str()
                >
                    {ComparisonKey::all().iter().map(|key| view! {
                        <option value=key.as_str()>{key.label()}</option>
                    }).collect_view()}
                </select>
                <span class="text-xs text-gray-400">
                    {move || comparison_label(&state.selection.get())}
                </span>
            </div>

            {move || (comparison.get() == ComparisonKey::Custom).then(|| {
                let max = max_for_comparison.clone();
                view! {
                    <DateRangeInputs
                        range=custom_comparison
                        max=max
                        on_change=Callback::new(move |(from, to)| state.set_custom_comparison(from, to))
                    />
                }
            })}
        </section>
    }
}

/// Start/end date inputs for one custom range
#[component]
fn DateRangeInputs(
    #[prop(into)]
    range: Signal<PartialRange>,
    max: String,
    on_change: Callback<(Option<chrono::NaiveDate>, Option<chrono::NaiveDate>)>,
) -> impl IntoView {
    let on_from = move |ev| {
        let from = parse_date_input(&event_target_value(&ev));
        on_change.call((from, range.get_untracked().to));
    };
    let on_to = move |ev| {
        let to = parse_date_input(&event_target_value(&ev));
        on_change.call((range.get_untracked().from, to));
    };

    let max_to = max.clone();

    view! {
        <div class="flex items-end space-x-2">
            <div class="flex flex-col space-y-1">
                <label class="text-xs text-gray-500">"From"</label>
                <input
                    type="date"
                    class="border border-gray-300 rounded-lg px-3 py-2 text-sm"
                    max=max
                    prop:value=move || date_input_value(range.get().from)
                    on:change=on_from
                />
            </div>
            <div class="flex flex-col space-y-1">
                <label class="text-xs text-gray-500">"To"</label>
                <input
                    type="date"
                    class="border border-gray-300 rounded-lg px-3 py-2 text-sm"
                    max=max_to
                    prop:value=move || date_input_value(range.get().to)
                    on:change=on_to
                />
            </div>
        </div>
    }
}
