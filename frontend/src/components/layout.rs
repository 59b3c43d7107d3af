use crate::{
    api::Role,
    state::auth::{self, use_auth},
    utils::navigation::{redirect_to, LOGIN_PATH},
};
use leptos::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub label: &'static str,
    pub href: &'static str,
}

const fn item(label: &'static str, href: &'static str) -> NavItem {
    NavItem { label, href }
}

const ADMIN_NAV: &[NavItem] = &[
    item("Dashboard", "/admin/dashboard"),
    item("Employees", "/admin/employees"),
    item("Shifts", "/admin/shifts"),
    item("Attendance", "/admin/attendance"),
    item("Leaves", "/admin/leaves"),
    item("Work Sessions", "/admin/work-sessions"),
];

const HR_NAV: &[NavItem] = &[item("HR Console", "/hr")];

const MANAGER_NAV: &[NavItem] = &[
    item("Dashboard", "/manager/dashboard"),
    item("My Shifts", "/manager/shifts"),
    item("Attendance", "/manager/attendance"),
    item("Leaves", "/manager/leaves"),
    item("Work Sessions", "/manager/work-sessions"),
];

const EMPLOYEE_NAV: &[NavItem] = &[
    item("Dashboard", "/employee/dashboard"),
    item("Attendance", "/employee/attendance"),
    item("Leaves", "/employee/leaves"),
    item("Work Sessions", "/employee/work-sessions"),
    item("Profile", "/employee/profile"),
];

pub fn nav_items(role: Role) -> &'static [NavItem] {
    match role {
        Role::Admin => ADMIN_NAV,
        Role::Hr => HR_NAV,
        Role::Manager => MANAGER_NAV,
        Role::Employee => EMPLOYEE_NAV,
    }
}

const LINK_CLASS: &str =
    "text-fg-muted hover:text-fg px-3 py-2 rounded-md text-sm font-medium hover:bg-action-ghost-bg-hover";

#[component]
pub fn Header() -> impl IntoView {
    let (auth, _set_auth) = use_auth();
    let (menu_open, set_menu_open) = create_signal(false);
    let items = move || auth.get().role().map(nav_items).unwrap_or(&[]);
    let user_label = move || {
        let state = auth.get();
        let role = state.role();
        match (state.display_name, role) {
            (Some(name), Some(role)) => format!("{} · {}", name, role.label()),
            (Some(name), None) => name,
            (None, Some(role)) => role.label().to_string(),
            (None, None) => String::new(),
        }
    };

    let logout_action = auth::use_logout_action();
    let logout_pending = logout_action.pending();
    create_effect(move |_| {
        if logout_action.value().get().is_some() {
            redirect_to(LOGIN_PATH);
        }
    });
    let on_logout = move |_| {
        if logout_pending.get_untracked() {
            return;
        }
        set_menu_open.set(false);
        logout_action.dispatch(());
    };

    view! {
        <header class="bg-surface-elevated shadow-sm border-b border-border">
            <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8">
                <div class="flex justify-between items-center h-16">
                    <h1 class="text-xl font-semibold text-fg">"Employee Management"</h1>
                    <div class="flex items-center gap-2">
                        <nav class="hidden lg:flex space-x-2">
                            {move || {
                                items()
                                    .iter()
                                    .map(|nav| view! { <a href=nav.href class=LINK_CLASS>{nav.label}</a> })
                                    .collect_view()
                            }}
                        </nav>
                        <span class="hidden sm:inline text-sm text-fg-muted px-2">{user_label}</span>
                        <button
                            on:click=on_logout
                            class=format!("{} disabled:opacity-50", LINK_CLASS)
                            disabled=move || logout_pending.get()
                        >
                            "Logout"
                        </button>
                        <button
                            type="button"
                            class="lg:hidden inline-flex items-center justify-center p-2 rounded-md text-fg-muted hover:text-fg"
                            on:click=move |_| set_menu_open.update(|open| *open = !*open)
                            aria-expanded=move || menu_open.get().to_string()
                            aria-controls="mobile-nav"
                        >
                            <span class="sr-only">
                                {move || if menu_open.get() { "Close menu" } else { "Open menu" }}
                            </span>
                            "☰"
                        </button>
                    </div>
                </div>
                <Show when=move || menu_open.get()>
                    <div id="mobile-nav" class="lg:hidden border-t border-border">
                        <nav class="px-4 py-3 space-y-1">
                            {move || {
                                items()
                                    .iter()
                                    .map(|nav| {
                                        view! {
                                            <a
                                                href=nav.href
                                                class=format!("block {}", LINK_CLASS)
                                                on:click=move |_| set_menu_open.set(false)
                                            >
                                                {nav.label}
                                            </a>
                                        }
                                    })
                                    .collect_view()
                            }}
                        </nav>
                    </div>
                </Show>
            </div>
        </header>
    }
}

#[component]
pub fn Layout(children: Children) -> impl IntoView {
    view! {
        <div class="min-h-screen bg-surface">
            <Header/>
            <main class="max-w-7xl mx-auto py-6 px-4 sm:px-6 lg:px-8">{children()}</main>
        </div>
    }
}

#[component]
pub fn PageHeader(
    #[prop(into)] title: String,
    #[prop(optional, into)] subtitle: Option<String>,
) -> impl IntoView {
    view! {
        <div class="mb-6">
            <h2 class="text-2xl font-bold text-fg">{title}</h2>
            {subtitle.map(|text| view! { <p class="mt-1 text-sm text-fg-muted">{text}</p> })}
        </div>
    }
}

#[component]
pub fn LoadingSpinner() -> impl IntoView {
    view! {
        <div class="flex justify-center items-center p-8">
            <div class="animate-spin rounded-full h-8 w-8 border-b-2 border-action-primary-bg"></div>
        </div>
    }
}

#[component]
pub fn ErrorMessage(#[prop(into)] message: String) -> impl IntoView {
    view! {
        <div class="bg-status-error-bg border border-status-error-border text-status-error-text px-4 py-3 rounded mb-4" role="alert">
            <p class="text-sm">{message}</p>
        </div>
    }
}

#[component]
pub fn SuccessMessage(#[prop(into)] message: String) -> impl IntoView {
    view! {
        <div class="bg-status-success-bg border border-status-success-border text-status-success-text px-4 py-3 rounded mb-4" role="status">
            <p class="text-sm">{message}</p>
        </div>
    }
}
