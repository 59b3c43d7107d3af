use crate::{
    api::Role,
    components::layout::LoadingSpinner,
    state::auth::{use_auth, AuthStatus},
    utils::navigation::{redirect_to, LOGIN_PATH},
};
use leptos::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Loading,
    Render,
    Redirect(&'static str),
}

/// Wrong role and no session both go to `/login`; an empty `allowed` list admits any role.
pub fn guard_decision(status: AuthStatus, allowed: &[Role]) -> GuardDecision {
    match status {
        AuthStatus::Loading => GuardDecision::Loading,
        AuthStatus::Unauthenticated => GuardDecision::Redirect(LOGIN_PATH),
        AuthStatus::Authenticated(role) if allowed.is_empty() || allowed.contains(&role) => {
            GuardDecision::Render
        }
        AuthStatus::Authenticated(_) => GuardDecision::Redirect(LOGIN_PATH),
    }
}

#[component]
pub fn RequireRole(
    #[prop(into)] allowed: Vec<Role>,
    children: ChildrenFn,
) -> impl IntoView {
    let (auth, _) = use_auth();
    let allowed = store_value(allowed);
    let decision =
        create_memo(move |_| allowed.with_value(|roles| guard_decision(auth.get().status, roles)));
    create_effect(move |_| {
        if let GuardDecision::Redirect(target) = decision.get() {
            log::info!("route guard redirecting to {}", target);
            redirect_to(target);
        }
    });
    view! {
        <Show
            when=move || decision.get() == GuardDecision::Render
            fallback=move || {
                if decision.get() == GuardDecision::Loading {
                    view! { <LoadingSpinner /> }.into_view()
                } else {
                    ().into_view()
                }
            }
        >
            {children()}
        </Show>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_waits_while_loading() {
        assert_eq!(guard_decision(AuthStatus::Loading, &[Role::Admin]), GuardDecision::Loading);
    }

    #[test]
    fn guard_redirects_unauthenticated_to_login() {
        assert_eq!(
            guard_decision(AuthStatus::Unauthenticated, &[]),
            GuardDecision::Redirect("/login")
        );
    }

    #[test]
    fn guard_checks_role_membership() {
        let managers = [Role::Admin, Role::Manager];
        assert_eq!(
            guard_decision(AuthStatus::Authenticated(Role::Manager), &managers),
            GuardDecision::Render
        );
        assert_eq!(
            guard_decision(AuthStatus::Authenticated(Role::Employee), &managers),
            GuardDecision::Redirect("/login")
        );
        assert_eq!(
            guard_decision(AuthStatus::Authenticated(Role::Employee), &[]),
            GuardDecision::Render
        );
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::RequireRole;
    use crate::api::Role;
    use crate::state::auth::{AuthState, AuthStatus};
    use crate::test_support::helpers::provide_auth_status;
    use crate::test_support::ssr::render_to_string;
    use leptos::*;

    #[test]
    fn renders_children_for_allowed_role() {
        let html = render_to_string(move || {
            provide_auth_status(AuthStatus::Authenticated(Role::Hr));
            view! {
                <RequireRole allowed=vec![Role::Admin, Role::Hr]>
                    {|| view! { <div>"protected-content"</div> }}
                </RequireRole>
            }
        });
        assert!(html.contains("protected-content"));
    }

    #[test]
    fn hides_children_for_other_roles() {
        let html = render_to_string(move || {
            provide_auth_status(AuthStatus::Authenticated(Role::Employee));
            view! {
                <RequireRole allowed=vec![Role::Admin]>
                    {|| view! { <div>"protected-content"</div> }}
                </RequireRole>
            }
        });
        assert!(!html.contains("protected-content"));
    }

    #[test]
    fn shows_spinner_while_loading() {
        let html = render_to_string(move || {
            let (auth, set_auth) = create_signal(AuthState::default());
            provide_context((auth, set_auth));
            view! {
                <RequireRole allowed=vec![Role::Admin]>
                    {|| view! { <div>"protected-content"</div> }}
                </RequireRole>
            }
        });
        assert!(!html.contains("protected-content"));
        assert!(html.contains("animate-spin"));
    }
}
