use crate::api::{ApiError, WorkSession};
use crate::components::{
    common::Badge,
    empty_state::EmptyState,
    layout::{ErrorMessage, LoadingSpinner},
};
use crate::pages::dashboard::{
    components::session_card::status_tone, utils::team_status_rows, view_model::SessionKey,
};
use crate::utils::{duration::derive_status, time::display_time_zone, timer::use_ticker};
use leptos::*;

/// Live status of each team member's latest session. Ticks while anyone is clocked in.
#[component]
pub fn TeamStatusSection(sessions: Resource<SessionKey, Result<Vec<WorkSession>, ApiError>>) -> impl IntoView {
    let tz = display_time_zone();
    let any_live = Signal::derive(move || {
        sessions.with(|loaded| {
            matches!(loaded, Some(Ok(list)) if list.iter().any(|s| derive_status(Some(s)).is_live()))
        })
    });
    let now = use_ticker(any_live);

    view! {
        <div class="bg-surface-elevated shadow rounded-lg p-6 space-y-4">
            <h3 class="text-base font-semibold text-fg">"Team status"</h3>
            {move || match sessions.get() {
                None => view! { <LoadingSpinner /> }.into_view(),
                Some(Err(err)) => view! { <ErrorMessage message=err.error /> }.into_view(),
                Some(Ok(list)) if list.is_empty() => view! {
                    <EmptyState title="No team activity" description="Nobody on your shifts has clocked in yet." />
                }.into_view(),
                Some(Ok(list)) => team_status_rows(&list, now.get(), tz)
                    .into_iter()
                    .map(|row| view! {
                        <div class="flex items-center justify-between text-sm py-2 border-b border-border">
                            <span class="font-medium text-fg">{row.employee}</span>
                            <span class="text-fg-muted">{row.clock_in}</span>
                            <span class="font-mono text-fg">{row.working}</span>
                            <Badge label=row.status.label().to_string() tone=status_tone(row.status) />
                        </div>
                    })
                    .collect_view(),
            }}
        </div>
    }
}
