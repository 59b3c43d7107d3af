use crate::api::{ApiClient, ApiError, WorkSession};
use crate::components::messages::MessageState;
use crate::pages::dashboard::repository::{self, Overview};
use crate::state::work_session::{
    perform_clock_event, refresh_current, use_work_session, ClockEvent, WorkSessionContext,
};
use chrono::{DateTime, Utc};
use leptos::*;

#[derive(Clone, Copy)]
pub struct OverviewViewModel {
    pub overview: Resource<(), Result<Overview, ApiError>>,
}

pub fn use_overview_view_model(include_sessions: bool) -> OverviewViewModel {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    let overview = create_resource(
        || (),
        move |_| {
            let api = api.clone();
            async move { repository::fetch_overview(&api, include_sessions).await }
        },
    );
    OverviewViewModel { overview }
}

#[derive(Clone, Copy)]
pub struct SessionCardViewModel {
    pub state: WorkSessionContext,
    pub clock_action: Action<ClockEvent, Result<ClockEvent, ApiError>>,
    pub messages: RwSignal<MessageState>,
}

impl SessionCardViewModel {
    pub fn dispatch(&self, event: ClockEvent) {
        if self.clock_action.pending().get_untracked() {
            return;
        }
        let status = self.state.0.with_untracked(|state| state.status());
        if !event.allowed_from(status) {
            self.messages
                .update(|m| m.set_error(format!("{} is not available right now.", event.label())));
            return;
        }
        self.clock_action.dispatch(event);
    }
}

pub fn use_session_card_view_model() -> SessionCardViewModel {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    let state = use_work_session();
    let (_, set_state) = state;
    let messages = create_rw_signal(MessageState::default());

    let api_for_load = api.clone();
    create_effect(move |_| {
        let api = api_for_load.clone();
        spawn_local(async move {
            if let Err(err) = refresh_current(&api, set_state).await {
                log::error!("failed to load the current work session: {}", err);
                messages.update(|m| m.set_api_error(&err));
            }
        });
    });

    let clock_action = create_action(move |event: &ClockEvent| {
        let api = api.clone();
        let event = *event;
        async move { perform_clock_event(&api, event, set_state).await }
    });

    create_effect(move |_| {
        if let Some(result) = clock_action.value().get() {
            match result {
                Ok(event) => messages.update(|m| m.set_success(event.done_message())),
                Err(err) => messages.update(|m| m.set_api_error(&err)),
            }
        }
    });

    SessionCardViewModel {
        state,
        clock_action,
        messages,
    }
}

/// Open session id and clock-out; history reloads when either changes.
pub type SessionKey = Option<(i64, Option<DateTime<Utc>>)>;

#[derive(Clone, Copy)]
pub struct SessionListViewModel {
    pub sessions: Resource<SessionKey, Result<Vec<WorkSession>, ApiError>>,
}

pub fn use_my_sessions_view_model() -> SessionListViewModel {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    let (state, _) = use_work_session();
    let sessions = create_resource(
        move || -> SessionKey { state.with(|s| s.current.as_ref().map(|c| (c.id, c.clock_out_time))) },
        move |_| {
            let api = api.clone();
            async move { repository::fetch_my_sessions(&api).await }
        },
    );
    SessionListViewModel { sessions }
}

pub fn use_team_sessions_view_model() -> SessionListViewModel {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    let sessions = create_resource(
        || -> SessionKey { None },
        move |_| {
            let api = api.clone();
            async move { repository::fetch_team_sessions(&api).await }
        },
    );
    SessionListViewModel { sessions }
}
