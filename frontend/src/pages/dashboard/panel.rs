use crate::components::layout::{Layout, PageHeader};
use crate::pages::dashboard::{
    components::{CurrentSessionCard, OverviewSection, RecentSessions, TeamStatusSection},
    view_model::{use_my_sessions_view_model, use_overview_view_model, use_team_sessions_view_model},
};
use leptos::*;

#[component]
pub fn AdminDashboardPage() -> impl IntoView {
    let vm = use_overview_view_model(true);
    view! {
        <Layout>
            <PageHeader title="Dashboard" subtitle="Organisation at a glance" />
            <div class="space-y-6">
                <OverviewSection overview=vm.overview show_sessions=true />
            </div>
        </Layout>
    }
}

#[component]
pub fn ManagerDashboardPage() -> impl IntoView {
    let team = use_team_sessions_view_model();
    view! {
        <Layout>
            <PageHeader title="Dashboard" subtitle="Your session and your team" />
            <div class="grid grid-cols-1 gap-6 lg:grid-cols-3">
                <div class="lg:col-span-2">
                    <TeamStatusSection sessions=team.sessions />
                </div>
                <CurrentSessionCard />
            </div>
        </Layout>
    }
}

#[component]
pub fn EmployeeDashboardPage() -> impl IntoView {
    let history = use_my_sessions_view_model();
    view! {
        <Layout>
            <PageHeader title="Dashboard" subtitle="Clock in, take breaks and review your week" />
            <div class="grid grid-cols-1 gap-6 lg:grid-cols-3">
                <div class="lg:col-span-2">
                    <RecentSessions sessions=history.sessions />
                </div>
                <CurrentSessionCard />
            </div>
        </Layout>
    }
}
