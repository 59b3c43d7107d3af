use leptos::*;
use leptos_meta::{provide_meta_context, Title};
use leptos_router::*;

use crate::{
    api::{ApiClient, Role},
    components::{guard::RequireRole, layout::LoadingSpinner},
    pages::{
        AdminDashboardPage, AttendancePage, EmployeeDashboardPage, EmployeesPage, HrPage,
        LeavesPage, LoginPage, ManagerDashboardPage, ManagerShiftsPage, ProfilePage, ShiftsPage,
        WorkSessionsPage,
    },
    state::auth::{landing_route, use_auth, AuthProvider, AuthStatus},
    utils::navigation::LOGIN_PATH,
};

/// A guarded route and the roles allowed through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteSpec {
    pub path: &'static str,
    pub roles: &'static [Role],
}

const ADMIN: &[Role] = &[Role::Admin];
const HR: &[Role] = &[Role::Hr];
const MANAGER: &[Role] = &[Role::Manager];
const EMPLOYEE: &[Role] = &[Role::Employee];

pub const PROTECTED_ROUTES: &[RouteSpec] = &[
    RouteSpec { path: "/admin/dashboard", roles: ADMIN },
    RouteSpec { path: "/admin/employees", roles: ADMIN },
    RouteSpec { path: "/admin/shifts", roles: ADMIN },
    RouteSpec { path: "/admin/attendance", roles: ADMIN },
    RouteSpec { path: "/admin/leaves", roles: ADMIN },
    RouteSpec { path: "/admin/work-sessions", roles: ADMIN },
    RouteSpec { path: "/hr", roles: HR },
    RouteSpec { path: "/manager/dashboard", roles: MANAGER },
    RouteSpec { path: "/manager/shifts", roles: MANAGER },
    RouteSpec { path: "/manager/attendance", roles: MANAGER },
    RouteSpec { path: "/manager/leaves", roles: MANAGER },
    RouteSpec { path: "/manager/work-sessions", roles: MANAGER },
    RouteSpec { path: "/employee/dashboard", roles: EMPLOYEE },
    RouteSpec { path: "/employee/attendance", roles: EMPLOYEE },
    RouteSpec { path: "/employee/leaves", roles: EMPLOYEE },
    RouteSpec { path: "/employee/work-sessions", roles: EMPLOYEE },
    RouteSpec { path: "/employee/profile", roles: EMPLOYEE },
];

pub const PUBLIC_ROUTE_PATHS: &[&str] = &[LOGIN_PATH];

pub fn roles_for(path: &str) -> Option<&'static [Role]> {
    PROTECTED_ROUTES
        .iter()
        .find(|route| route.path == path)
        .map(|route| route.roles)
}

/// Where `/` and unknown paths send the user; `None` until the session is resolved.
pub fn fallback_target(status: AuthStatus) -> Option<&'static str> {
    match status {
        AuthStatus::Loading => None,
        AuthStatus::Authenticated(role) => Some(landing_route(role)),
        AuthStatus::Unauthenticated => Some(LOGIN_PATH),
    }
}

pub fn mount_app() {
    mount_to_body(app_root);
}

pub fn app_root() -> impl IntoView {
    provide_meta_context();
    provide_context(ApiClient::new());
    view! {
        <Title text="Employee Management System" />
        <AuthProvider>
            <Router>
                <main>
                    <Routes>
                        <Route path="/login" view=LoginPage />
                        <Route path="/admin/dashboard" view=|| guarded("/admin/dashboard", || view! { <AdminDashboardPage /> }) />
                        <Route path="/admin/employees" view=|| guarded("/admin/employees", || view! { <EmployeesPage /> }) />
                        <Route path="/admin/shifts" view=|| guarded("/admin/shifts", || view! { <ShiftsPage /> }) />
                        <Route path="/admin/attendance" view=|| guarded("/admin/attendance", || view! { <AttendancePage role=Role::Admin /> }) />
                        <Route path="/admin/leaves" view=|| guarded("/admin/leaves", || view! { <LeavesPage role=Role::Admin /> }) />
                        <Route path="/admin/work-sessions" view=|| guarded("/admin/work-sessions", || view! { <WorkSessionsPage role=Role::Admin /> }) />
                        <Route path="/hr" view=|| guarded("/hr", || view! { <HrPage /> }) />
                        <Route path="/manager/dashboard" view=|| guarded("/manager/dashboard", || view! { <ManagerDashboardPage /> }) />
                        <Route path="/manager/shifts" view=|| guarded("/manager/shifts", || view! { <ManagerShiftsPage /> }) />
                        <Route path="/manager/attendance" view=|| guarded("/manager/attendance", || view! { <AttendancePage role=Role::Manager /> }) />
                        <Route path="/manager/leaves" view=|| guarded("/manager/leaves", || view! { <LeavesPage role=Role::Manager /> }) />
                        <Route path="/manager/work-sessions" view=|| guarded("/manager/work-sessions", || view! { <WorkSessionsPage role=Role::Manager /> }) />
                        <Route path="/employee/dashboard" view=|| guarded("/employee/dashboard", || view! { <EmployeeDashboardPage /> }) />
                        <Route path="/employee/attendance" view=|| guarded("/employee/attendance", || view! { <AttendancePage role=Role::Employee /> }) />
                        <Route path="/employee/leaves" view=|| guarded("/employee/leaves", || view! { <LeavesPage role=Role::Employee /> }) />
                        <Route path="/employee/work-sessions" view=|| guarded("/employee/work-sessions", || view! { <WorkSessionsPage role=Role::Employee /> }) />
                        <Route path="/employee/profile" view=|| guarded("/employee/profile", || view! { <ProfilePage /> }) />
                        <Route path="/" view=FallbackRedirect />
                        <Route path="/*any" view=FallbackRedirect />
                    </Routes>
                </main>
            </Router>
        </AuthProvider>
    }
}

fn guarded<V: IntoView + 'static>(path: &'static str, page: fn() -> V) -> View {
    let roles = roles_for(path).unwrap_or_default().to_vec();
    view! {
        <RequireRole allowed=roles>
            {move || page()}
        </RequireRole>
    }
    .into_view()
}

#[component]
fn FallbackRedirect() -> impl IntoView {
    let (auth, _) = use_auth();
    move || match fallback_target(auth.get().status) {
        Some(path) => view! { <Redirect path=path /> }.into_view(),
        None => view! { <LoadingSpinner /> }.into_view(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn every_role_has_a_guarded_landing_page() {
        for role in Role::ALL {
            let roles = roles_for(landing_route(role)).unwrap();
            assert_eq!(roles, &[role]);
        }
    }

    #[test]
    fn no_duplicate_routes() {
        let unique: HashSet<&str> = PROTECTED_ROUTES.iter().map(|route| route.path).collect();
        assert_eq!(unique.len(), PROTECTED_ROUTES.len());
        assert!(PUBLIC_ROUTE_PATHS.iter().all(|path| !unique.contains(path)));
    }

    #[test]
    fn routes_are_prefixed_by_their_role() {
        for route in PROTECTED_ROUTES {
            let prefix = match route.roles {
                [Role::Admin] => "/admin/",
                [Role::Hr] => "/hr",
                [Role::Manager] => "/manager/",
                [Role::Employee] => "/employee/",
                other => panic!("unexpected roles {:?}", other),
            };
            assert!(route.path.starts_with(prefix), "{}", route.path);
        }
    }

    #[test]
    fn navigation_only_links_to_routes_the_role_may_open() {
        for role in Role::ALL {
            for item in crate::components::layout::nav_items(role) {
                let roles = roles_for(item.href).unwrap_or_else(|| panic!("no route for {}", item.href));
                assert!(roles.contains(&role), "{} not open to {}", item.href, role);
            }
        }
    }

    #[test]
    fn fallback_follows_auth_status() {
        assert_eq!(fallback_target(AuthStatus::Loading), None);
        assert_eq!(fallback_target(AuthStatus::Unauthenticated), Some("/login"));
        assert_eq!(
            fallback_target(AuthStatus::Authenticated(Role::Hr)),
            Some("/hr")
        );
        assert_eq!(
            fallback_target(AuthStatus::Authenticated(Role::Manager)),
            Some("/manager/dashboard")
        );
    }
}
