use crate::api::{LeaveStatus, Role};
use crate::components::{
    cards::StatCard,
    layout::{Layout, PageHeader},
    messages::Messages,
};
use crate::pages::leaves::{
    components::{LeaveApplyForm, LeaveTable},
    utils::{count_by_status, LeaveScope},
    view_model::use_leaves_view_model,
};
use leptos::*;

#[component]
pub fn LeavesSection(scope: LeaveScope) -> impl IntoView {
    let vm = use_leaves_view_model(scope);
    let count = move |status: LeaveStatus| {
        Signal::derive(move || {
            vm.leaves.with(|loaded| match loaded {
                Some(Ok(list)) => count_by_status(list, status).to_string(),
                _ => "-".to_string(),
            })
        })
    };
    let busy = vm.status_action.pending();
    let table = move || {
        if scope.can_review() {
            view! {
                <LeaveTable
                    leaves=vm.leaves
                    status_filter=vm.status_filter
                    include_employee=true
                    on_status=Callback::new(move |(id, status)| vm.change_status(id, status))
                    busy=busy
                />
            }
            .into_view()
        } else {
            view! {
                <LeaveTable
                    leaves=vm.leaves
                    status_filter=vm.status_filter
                    include_employee=false
                    busy=busy
                />
            }
            .into_view()
        }
    };

    view! {
        <div class="space-y-4">
            <Messages messages=vm.messages />
            <div class="grid grid-cols-1 gap-4 sm:grid-cols-3">
                <StatCard label="Pending" value=count(LeaveStatus::Pending) />
                <StatCard label="Approved" value=count(LeaveStatus::Approved) />
                <StatCard label="Rejected" value=count(LeaveStatus::Rejected) />
            </div>
            <Show when=move || !scope.can_review()>
                <LeaveApplyForm
                    form=vm.form
                    errors=vm.field_errors
                    proof=vm.proof
                    pending=vm.apply_action.pending()
                    on_submit=Callback::new(move |_| vm.submit())
                    on_pick_proof=Callback::new(move |ev| vm.pick_proof(ev))
                />
            </Show>
            {table}
        </div>
    }
}

#[component]
pub fn LeavesPage(role: Role) -> impl IntoView {
    let scope = LeaveScope::for_role(role);
    let subtitle = match scope {
        LeaveScope::All => "Review leave requests across the company",
        LeaveScope::Team => "Review leave requests from your team",
        LeaveScope::Mine => "Apply for leave and track your requests",
    };
    view! {
        <Layout>
            <PageHeader title="Leaves" subtitle=subtitle />
            <LeavesSection scope=scope />
        </Layout>
    }
}
