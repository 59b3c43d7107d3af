use crate::api::Role;
use crate::components::{
    cards::StatCard,
    common::{Button, ButtonVariant},
    data_table::DataTable,
    layout::{ErrorMessage, Layout, LoadingSpinner, PageHeader},
    messages::Messages,
};
use crate::pages::work_sessions::{
    utils::{session_columns, session_row, summarize, within_shift_days, SessionScope},
    view_model::use_work_sessions_view_model,
};
use crate::utils::{
    duration::{derive_status, format_duration, DurationStyle},
    time::display_time_zone,
    timer::use_ticker,
};
use leptos::*;

const INPUT_CLASS: &str = "border border-border rounded-md px-3 py-1.5 text-sm";

#[component]
pub fn WorkSessionsSection(scope: SessionScope) -> impl IntoView {
    let vm = use_work_sessions_view_model(scope);
    let tz = display_time_zone();
    let include_employee = scope != SessionScope::Mine;

    let visible = Signal::derive(move || {
        let (from, to) = vm.applied_range.get();
        vm.sessions.with(|loaded| match loaded {
            Some(Ok(list)) => within_shift_days(list, from, to, tz),
            _ => Vec::new(),
        })
    });
    let any_live = Signal::derive(move || {
        visible.with(|list| list.iter().any(|s| derive_status(Some(s)).is_live()))
    });
    let now = use_ticker(any_live);
    let rows = Signal::derive(move || {
        let now = now.get();
        visible.with(|list| {
            list.iter()
                .map(|session| session_row(session, now, tz, include_employee))
                .collect::<Vec<_>>()
        })
    });
    let summary = create_memo(move |_| visible.with(|list| summarize(list, now.get())));
    let session_count = Signal::derive(move || summary.get().count.to_string());
    let total_working =
        Signal::derive(move || format_duration(summary.get().working, DurationStyle::HoursMinutes));
    let average = Signal::derive(move || format_duration(summary.get().average(), DurationStyle::HoursMinutes));
    let total_breaks =
        Signal::derive(move || format_duration(summary.get().breaks, DurationStyle::HoursMinutes));

    view! {
        <div class="space-y-4">
            <Messages messages=vm.messages />
            <div class="flex flex-wrap items-end gap-3">
                <label class="text-sm text-fg-muted">
                    "From"
                    <input type="date" class=INPUT_CLASS
                        prop:value=move || vm.range.from_signal().get()
                        on:input=move |ev| vm.range.from_signal().set(event_target_value(&ev)) />
                </label>
                <label class="text-sm text-fg-muted">
                    "To"
                    <input type="date" class=INPUT_CLASS
                        prop:value=move || vm.range.to_signal().get()
                        on:input=move |ev| vm.range.to_signal().set(event_target_value(&ev)) />
                </label>
                <Button variant=ButtonVariant::Secondary on:click=move |_| vm.apply_range()>"Apply"</Button>
                <Button variant=ButtonVariant::Secondary on:click=move |_| vm.refresh()>"Refresh"</Button>
            </div>
            {move || match vm.sessions.get() {
                None => view! { <LoadingSpinner /> }.into_view(),
                Some(Err(err)) => view! { <ErrorMessage message=err.error /> }.into_view(),
                Some(Ok(_)) => view! {
                    <div class="grid grid-cols-1 gap-4 sm:grid-cols-2 lg:grid-cols-4">
                        <StatCard label="Sessions" value=session_count />
                        <StatCard label="Time worked" value=total_working />
                        <StatCard label="Average per session" value=average />
                        <StatCard label="Time on break" value=total_breaks />
                    </div>
                    <DataTable
                        columns=session_columns(include_employee)
                        rows=rows
                        export_name="work-sessions"
                        empty_message="No sessions in this range."
                    />
                }.into_view(),
            }}
        </div>
    }
}

#[component]
pub fn WorkSessionsPage(role: Role) -> impl IntoView {
    let scope = SessionScope::for_role(role);
    let subtitle = match scope {
        SessionScope::All => "Every clock-in across the company",
        SessionScope::Team => "Sessions recorded on your shifts",
        SessionScope::Mine => "Your clock-in history with working and break time",
    };
    view! {
        <Layout>
            <PageHeader title="Work Sessions" subtitle=subtitle />
            <WorkSessionsSection scope=scope />
        </Layout>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::{helpers::provide_role, ssr::render_to_string};

    #[test]
    fn page_renders_range_controls_for_each_role() {
        for (role, subtitle) in [
            (Role::Admin, "Every clock-in across the company"),
            (Role::Manager, "Sessions recorded on your shifts"),
            (Role::Employee, "Your clock-in history"),
        ] {
            let html = render_to_string(move || {
                provide_role(role);
                view! { <WorkSessionsPage role=role /> }
            });
            assert!(html.contains(subtitle));
            assert!(html.contains("Refresh"));
        }
    }
}
