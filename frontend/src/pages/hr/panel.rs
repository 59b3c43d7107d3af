use crate::components::layout::{Layout, PageHeader};
use crate::pages::{
    attendance::{utils::AttendanceScope, AttendanceSection},
    dashboard::{components::OverviewSection, view_model::use_overview_view_model},
    employees::EmployeesSection,
    leaves::{utils::LeaveScope, LeavesSection},
};
use leptos::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HrTab {
    #[default]
    Overview,
    Employees,
    Attendance,
    Leaves,
}

impl HrTab {
    pub const ALL: [HrTab; 4] = [HrTab::Overview, HrTab::Employees, HrTab::Attendance, HrTab::Leaves];

    pub fn label(&self) -> &'static str {
        match self {
            HrTab::Overview => "Overview",
            HrTab::Employees => "Employees",
            HrTab::Attendance => "Attendance",
            HrTab::Leaves => "Leaves",
        }
    }
}

#[component]
fn OverviewTab() -> impl IntoView {
    let vm = use_overview_view_model(false);
    view! { <OverviewSection overview=vm.overview /> }
}

/// Single-route HR console; the active tab's section is built on selection.
#[component]
pub fn HrPage(#[prop(optional)] initial: HrTab) -> impl IntoView {
    let active = create_rw_signal(initial);
    let tab_class = move |tab: HrTab| {
        if active.get() == tab {
            "px-4 py-2 text-sm font-medium border-b-2 border-action-primary-bg text-fg"
        } else {
            "px-4 py-2 text-sm font-medium border-b-2 border-transparent text-fg-muted hover:text-fg"
        }
    };

    view! {
        <Layout>
            <PageHeader title="HR Console" subtitle="People, attendance and leave in one place" />
            <nav class="flex gap-2 border-b border-border mb-6" role="tablist">
                {HrTab::ALL
                    .into_iter()
                    .map(|tab| view! {
                        <button
                            type="button"
                            role="tab"
                            class=move || tab_class(tab)
                            aria-selected=move || (active.get() == tab).to_string()
                            on:click=move |_| active.set(tab)
                        >
                            {tab.label()}
                        </button>
                    })
                    .collect_view()}
            </nav>
            {move || match active.get() {
                HrTab::Overview => view! { <OverviewTab /> }.into_view(),
                HrTab::Employees => view! { <EmployeesSection /> }.into_view(),
                HrTab::Attendance => view! { <AttendanceSection scope=AttendanceScope::All /> }.into_view(),
                HrTab::Leaves => view! { <LeavesSection scope=LeaveScope::All /> }.into_view(),
            }}
        </Layout>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::Role;
    use crate::test_support::{helpers::provide_role, ssr::render_to_string};

    #[test]
    fn console_lists_every_tab() {
        let html = render_to_string(|| {
            provide_role(Role::Hr);
            view! { <HrPage /> }
        });
        for tab in HrTab::ALL {
            assert!(html.contains(tab.label()));
        }
    }

    #[test]
    fn initial_tab_builds_its_section() {
        let html = render_to_string(|| {
            provide_role(Role::Hr);
            view! { <HrPage initial=HrTab::Leaves /> }
        });
        assert!(html.contains("leave-filter"));
    }
}
