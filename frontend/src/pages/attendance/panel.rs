use crate::api::Role;
use crate::components::{
    cards::StatCard,
    common::{Button, ButtonVariant},
    data_table::DataTable,
    layout::{ErrorMessage, Layout, LoadingSpinner, PageHeader},
    messages::Messages,
};
use crate::pages::attendance::{
    components::{MarkAttendanceForm, ShiftDaySummary},
    utils::{attendance_columns, attendance_rate, attendance_rows, AttendanceScope},
    view_model::use_attendance_view_model,
};
use leptos::*;

const INPUT_CLASS: &str = "border border-border rounded-md px-3 py-1.5 text-sm";

#[component]
pub fn AttendanceSection(scope: AttendanceScope) -> impl IntoView {
    let vm = use_attendance_view_model(scope);
    let include_employee = scope != AttendanceScope::Mine;
    let records = Signal::derive(move || {
        vm.data.with(|loaded| match loaded {
            Some(Ok(data)) => data.records.clone(),
            _ => Vec::new(),
        })
    });
    let roster = Signal::derive(move || {
        vm.data.with(|loaded| match loaded {
            Some(Ok(data)) => data.roster.clone(),
            _ => Vec::new(),
        })
    });
    let rows = Signal::derive(move || records.with(|all| attendance_rows(all, include_employee)));
    let present_total = Signal::derive(move || records.with(|all| all.iter().filter(|r| r.present).count().to_string()));
    let rate = Signal::derive(move || records.with(|all| format!("{}%", attendance_rate(all))));

    view! {
        <div class="space-y-4">
            <Messages messages=vm.messages />
            <Show when=move || scope.can_mark()>
                <MarkAttendanceForm
                    form=vm.mark_form
                    roster=roster
                    pending=vm.mark_action.pending()
                    on_submit=Callback::new(move |_| vm.submit_mark())
                />
            </Show>
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
            </div>
            {move || match vm.data.get() {
                None => view! { <LoadingSpinner /> }.into_view(),
                Some(Err(err)) => view! { <ErrorMessage message=err.error /> }.into_view(),
                Some(Ok(_)) => view! {
                    <div class="grid grid-cols-1 gap-4 sm:grid-cols-2">
                        <StatCard label="Present marks" value=present_total />
                        <StatCard label="Attendance rate" value=rate hint="Within the selected range" />
                    </div>
                    <div class="grid grid-cols-1 gap-4 lg:grid-cols-3">
                        <div class="lg:col-span-2">
                            <DataTable
                                columns=attendance_columns(include_employee)
                                rows=rows
                                export_name="attendance"
                                empty_message="No attendance in this range."
                            />
                        </div>
                        <ShiftDaySummary records=records />
                    </div>
                }.into_view(),
            }}
        </div>
    }
}

#[component]
pub fn AttendancePage(role: Role) -> impl IntoView {
    let scope = AttendanceScope::for_role(role);
    let subtitle = match scope {
        AttendanceScope::All => "Everyone's attendance, grouped by shift day",
        AttendanceScope::Team => "Attendance for the shifts you manage",
        AttendanceScope::Mine => "Your attendance record",
    };
    view! {
        <Layout>
            <PageHeader title="Attendance" subtitle=subtitle />
            <AttendanceSection scope=scope />
        </Layout>
    }
}
