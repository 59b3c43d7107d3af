use crate::api::{ApiError, WorkSession};
use crate::components::{
    charts::BarChart,
    empty_state::EmptyState,
    layout::{ErrorMessage, LoadingSpinner},
};
use crate::pages::dashboard::{
    repository::RECENT_SESSION_LIMIT, utils::daily_working_hours, view_model::SessionKey,
};
use crate::pages::work_sessions::utils::session_durations;
use crate::utils::{
    duration::{format_duration, DurationStyle},
    time::{display_time_zone, format_date, format_optional_clock, today_in_display_tz},
};
use chrono::Utc;
use leptos::*;

const CHART_DAYS: u32 = 7;

#[component]
pub fn RecentSessions(sessions: Resource<SessionKey, Result<Vec<WorkSession>, ApiError>>) -> impl IntoView {
    let tz = display_time_zone();
    view! {
        <div class="space-y-4">
            {move || match sessions.get() {
                None => view! { <LoadingSpinner /> }.into_view(),
                Some(Err(err)) => view! { <ErrorMessage message=err.error /> }.into_view(),
                Some(Ok(list)) if list.is_empty() => view! {
                    <EmptyState title="No sessions yet" description="Your clock-ins will show up here." />
                }.into_view(),
                Some(Ok(list)) => {
                    let now = Utc::now();
                    let chart = daily_working_hours(&list, today_in_display_tz(), CHART_DAYS, tz, now);
                    let rows = list
                        .iter()
                        .take(RECENT_SESSION_LIMIT)
                        .map(|session| {
                            let (working, breaks) = session_durations(session, now);
                            let day = session
                                .clock_in_time
                                .map(|at| format_date(at, tz))
                                .unwrap_or_else(|| "-".into());
                            view! {
                                <tr>
                                    <td class="px-4 py-2">{day}</td>
                                    <td class="px-4 py-2">{format_optional_clock(session.clock_in_time, tz)}</td>
                                    <td class="px-4 py-2">{format_optional_clock(session.clock_out_time, tz)}</td>
                                    <td class="px-4 py-2">{format_duration(working, DurationStyle::HoursMinutes)}</td>
                                    <td class="px-4 py-2">{format_duration(breaks, DurationStyle::HoursMinutes)}</td>
                                </tr>
                            }
                        })
                        .collect_view();
                    view! {
                        <BarChart title="Hours worked (last 7 days)" data=Signal::derive(move || chart.clone()) unit="h" />
                        <div class="bg-surface-elevated shadow rounded-lg overflow-x-auto">
                            <h3 class="px-4 pt-4 text-sm font-semibold text-fg">"Recent sessions"</h3>
                            <table class="min-w-full text-sm">
                                <thead>
                                    <tr class="text-left text-fg-muted">
                                        <th class="px-4 py-2">"Date"</th>
                                        <th class="px-4 py-2">"Clock In"</th>
                                        <th class="px-4 py-2">"Clock Out"</th>
                                        <th class="px-4 py-2">"Working"</th>
                                        <th class="px-4 py-2">"Breaks"</th>
                                    </tr>
                                </thead>
                                <tbody class="divide-y divide-border">{rows}</tbody>
                            </table>
                        </div>
                    }.into_view()
                }
            }}
        </div>
    }
}
