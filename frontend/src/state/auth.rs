use crate::{
    api::{ApiClient, ApiError, LoginRequest, Role},
    pages::login::repository::LoginRepository,
    state::session::SessionStore,
};
use chrono::{DateTime, Utc};
use leptos::*;
use std::rc::Rc;

pub type AuthContext = (ReadSignal<AuthState>, WriteSignal<AuthState>);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AuthStatus {
    #[default]
    Loading,
    Authenticated(Role),
    Unauthenticated,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthState {
    pub status: AuthStatus,
    pub display_name: Option<String>,
}

impl AuthState {
    pub fn authenticated(role: Role, display_name: impl Into<String>) -> Self {
        Self {
            status: AuthStatus::Authenticated(role),
            display_name: Some(display_name.into()),
        }
    }

    pub fn unauthenticated() -> Self {
        Self {
            status: AuthStatus::Unauthenticated,
            display_name: None,
        }
    }

    pub fn role(&self) -> Option<Role> {
        match self.status {
            AuthStatus::Authenticated(role) => Some(role),
            _ => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.role().is_some()
    }
}

/// Home route of each role after login and for the catch-all redirect.
pub fn landing_route(role: Role) -> &'static str {
    match role {
        Role::Admin => "/admin/dashboard",
        Role::Hr => "/hr",
        Role::Manager => "/manager/dashboard",
        Role::Employee => "/employee/dashboard",
    }
}

/// Start-up resolution: a readable, unexpired stored token authenticates; anything else
/// leaves the user logged out with storage cleared.
pub fn resolve_startup(store: &SessionStore, now: DateTime<Utc>) -> AuthState {
    match store.load(now) {
        Some(session) => AuthState::authenticated(session.role, session.display_name),
        None => AuthState::unauthenticated(),
    }
}

fn session_store() -> SessionStore {
    use_context::<ApiClient>()
        .map(|client| client.session().clone())
        .unwrap_or_else(SessionStore::browser)
}

fn create_auth_context() -> AuthContext {
    let (auth_state, set_auth_state) = create_signal(AuthState::default());
    let store = session_store();
    create_effect(move |_| {
        let resolved = resolve_startup(&store, Utc::now());
        log::debug!("startup auth status: {:?}", resolved.status);
        set_auth_state.set(resolved);
    });
    (auth_state, set_auth_state)
}

#[component]
pub fn AuthProvider(children: ChildrenFn) -> impl IntoView {
    let ctx = create_auth_context();
    provide_context::<AuthContext>(ctx);
    let (auth_state, _) = ctx;
    let children = store_value(children);
    view! {
        <Show
            when=move || auth_state.with(|state| state.status != AuthStatus::Loading)
            fallback=|| view! { <crate::components::layout::LoadingSpinner/> }
        >
            {children.with_value(|children| children())}
        </Show>
    }
}

pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().unwrap_or_else(|| create_signal(AuthState::default()))
}

pub async fn login_request(
    request: LoginRequest,
    repo: &LoginRepository,
    set_auth_state: WriteSignal<AuthState>,
) -> Result<Role, ApiError> {
    let session = repo.login(request).await?;
    let role = session.role;
    set_auth_state.set(AuthState::authenticated(role, session.display_name));
    Ok(role)
}

pub fn logout(repo: &LoginRepository, set_auth_state: WriteSignal<AuthState>) {
    repo.logout();
    set_auth_state.set(AuthState::unauthenticated());
}

fn repository() -> LoginRepository {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    LoginRepository::new_with_client(Rc::new(api))
}

pub fn use_login_action() -> Action<LoginRequest, Result<Role, ApiError>> {
    let (_auth, set_auth) = use_auth();
    let repo = repository();

    create_action(move |request: &LoginRequest| {
        let payload = request.clone();
        let repo = repo.clone();
        async move { login_request(payload, &repo, set_auth).await }
    })
}

pub fn use_logout_action() -> Action<(), ()> {
    let (_auth, set_auth) = use_auth();
    let repo = repository();

    create_action(move |_: &()| {
        let repo = repo.clone();
        async move { logout(&repo, set_auth) }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{state::session::Session, utils::jwt::encode_test_token};
    use serde_json::json;

    fn with_runtime<T>(test: impl FnOnce() -> T) -> T {
        let runtime = create_runtime();
        let result = test();
        runtime.dispose();
        result
    }

    #[test]
    fn use_auth_defaults_to_loading_without_context() {
        with_runtime(|| {
            let (state, _set_state) = use_auth();
            assert_eq!(state.get().status, AuthStatus::Loading);
        });
    }

    #[test]
    fn landing_routes_per_role() {
        assert_eq!(landing_route(Role::Admin), "/admin/dashboard");
        assert_eq!(landing_route(Role::Hr), "/hr");
        assert_eq!(landing_route(Role::Manager), "/manager/dashboard");
        assert_eq!(landing_route(Role::Employee), "/employee/dashboard");
    }

    #[test]
    fn startup_with_valid_token_is_authenticated() {
        let now = Utc::now();
        let store = SessionStore::in_memory();
        store
            .save(&Session {
                token: encode_test_token(&json!({ "role": "EMPLOYEE", "exp": now.timestamp() + 60 })),
                role: Role::Employee,
                display_name: "Priya".into(),
            })
            .unwrap();
        let state = resolve_startup(&store, now);
        assert_eq!(state.status, AuthStatus::Authenticated(Role::Employee));
        assert_eq!(state.display_name.as_deref(), Some("Priya"));
    }

    #[test]
    fn startup_without_token_is_unauthenticated() {
        let state = resolve_startup(&SessionStore::in_memory(), Utc::now());
        assert_eq!(state, AuthState::unauthenticated());
        assert!(!state.is_authenticated());
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::{
        api::test_support::{MockServer, POST},
        utils::jwt::encode_test_token,
    };
    use serde_json::json;

    #[tokio::test]
    async fn login_and_logout_update_auth_state() {
        let server = MockServer::start();
        let token = encode_test_token(&json!({
            "sub": "meera",
            "role": "HR",
            "exp": Utc::now().timestamp() + 3600
        }));
        server.mock(|when, then| {
            when.method(POST).path("/api/auth/login");
            then.status(200)
                .json_body(json!({ "token": token, "role": "HR", "name": "Meera Das" }));
        });

        let runtime = create_runtime();
        let (state, set_state) = create_signal(AuthState::default());
        let store = SessionStore::in_memory();
        let api = ApiClient::new_with_base_url(server.url("/api")).with_session(store.clone());
        let repo = LoginRepository::new_with_client(Rc::new(api));

        let role = login_request(
            LoginRequest {
                username: "meera".into(),
                password: "Secret#123".into(),
            },
            &repo,
            set_state,
        )
        .await
        .unwrap();
        assert_eq!(role, Role::Hr);
        assert_eq!(state.get().display_name.as_deref(), Some("Meera Das"));
        assert!(store.token().is_some());

        logout(&repo, set_state);
        assert_eq!(state.get().status, AuthStatus::Unauthenticated);
        assert!(store.token().is_none());
        runtime.dispose();
    }
}
