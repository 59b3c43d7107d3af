use crate::api::AttendanceRecord;
use crate::pages::attendance::utils::group_by_shift_day;
use leptos::*;

/// Per shift day head counts.
#[component]
pub fn ShiftDaySummary(#[prop(into)] records: Signal<Vec<AttendanceRecord>>) -> impl IntoView {
    view! {
        <div class="bg-surface-elevated shadow rounded-lg p-4">
            <h3 class="text-sm font-semibold text-fg mb-2">"By shift day"</h3>
            <ul class="divide-y divide-border text-sm">
                {move || records.with(|all| group_by_shift_day(all))
                    .into_iter()
                    .map(|day| view! {
                        <li class="flex justify-between py-2">
                            <span class="text-fg">{day.day.format("%a %d %b %Y").to_string()}</span>
                            <span class="text-status-success-text">{format!("{} present", day.present)}</span>
                            <span class="text-status-error-text">{format!("{} absent", day.absent)}</span>
                        </li>
                    })
                    .collect_view()}
            </ul>
        </div>
    }
}
