use crate::api::ApiError;
use crate::components::{
    cards::StatCard,
    charts::BarChart,
    layout::{ErrorMessage, LoadingSpinner},
};
use crate::pages::dashboard::{
    repository::Overview,
    utils::{daily_working_hours, headcount_by_role, live_session_count, pending_leave_count},
};
use crate::utils::time::{display_time_zone, today_in_display_tz};
use chrono::Utc;
use leptos::*;

#[component]
pub fn OverviewSection(
    overview: Resource<(), Result<Overview, ApiError>>,
    #[prop(optional)] show_sessions: bool,
) -> impl IntoView {
    view! {
        {move || match overview.get() {
            None => view! { <LoadingSpinner /> }.into_view(),
            Some(Err(err)) => view! { <ErrorMessage message=err.error /> }.into_view(),
            Some(Ok(data)) => {
                let total = data.employees.len().to_string();
                let active = data.active_employees().to_string();
                let pending = pending_leave_count(&data.leaves).to_string();
                let live = live_session_count(&data.sessions).to_string();
                let headcount = headcount_by_role(&data.employees);
                let hours = daily_working_hours(
                    &data.sessions,
                    today_in_display_tz(),
                    7,
                    display_time_zone(),
                    Utc::now(),
                );
                view! {
                    <div class="grid grid-cols-1 gap-4 sm:grid-cols-2 lg:grid-cols-4">
                        <StatCard label="Employees" value=Signal::derive(move || total.clone()) />
                        <StatCard label="Active" value=Signal::derive(move || active.clone()) hint="Accounts enabled" />
                        <StatCard label="Pending leaves" value=Signal::derive(move || pending.clone()) hint="Awaiting review" />
                        <Show when=move || show_sessions>
                            <StatCard label="Open sessions" value=Signal::derive({
                                let live = live.clone();
                                move || live.clone()
                            }) hint="Clocked in right now" />
                        </Show>
                    </div>
                    <div class="grid grid-cols-1 gap-4 lg:grid-cols-2">
                        <BarChart title="Headcount by role" data=Signal::derive(move || headcount.clone()) />
                        <Show when=move || show_sessions>
                            <BarChart title="Hours worked (last 7 days)" data=Signal::derive({
                                let hours = hours.clone();
                                move || hours.clone()
                            }) unit="h" />
                        </Show>
                    </div>
                }.into_view()
            }
        }}
    }
}
