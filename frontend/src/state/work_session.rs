use crate::api::{ApiClient, ApiError, WorkSession};
use crate::utils::duration::{derive_status, LiveStatus};
use leptos::*;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkSessionState {
    pub current: Option<WorkSession>,
    pub loading: bool,
}

impl WorkSessionState {
    pub fn status(&self) -> LiveStatus {
        derive_status(self.current.as_ref())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockEvent {
    ClockIn,
    ClockOut,
    StartBreak,
    EndBreak,
}

impl ClockEvent {
    pub fn label(&self) -> &'static str {
        match self {
            ClockEvent::ClockIn => "Clock In",
            ClockEvent::ClockOut => "Clock Out",
            ClockEvent::StartBreak => "Start Break",
            ClockEvent::EndBreak => "End Break",
        }
    }

    pub fn done_message(&self) -> &'static str {
        match self {
            ClockEvent::ClockIn => "Clocked in.",
            ClockEvent::ClockOut => "Clocked out.",
            ClockEvent::StartBreak => "Break started.",
            ClockEvent::EndBreak => "Break ended.",
        }
    }

    /// Whether the action makes sense from the current live status.
    pub fn allowed_from(&self, status: LiveStatus) -> bool {
        match self {
            ClockEvent::ClockIn => matches!(status, LiveStatus::Inactive | LiveStatus::Completed),
            ClockEvent::ClockOut => status.is_live(),
            ClockEvent::StartBreak => status == LiveStatus::Working,
            ClockEvent::EndBreak => status == LiveStatus::OnBreak,
        }
    }
}

pub type WorkSessionContext = (ReadSignal<WorkSessionState>, WriteSignal<WorkSessionState>);

pub fn use_work_session() -> WorkSessionContext {
    match use_context::<WorkSessionContext>() {
        Some(ctx) => ctx,
        None => {
            let ctx = create_signal(WorkSessionState::default());
            provide_context(ctx);
            ctx
        }
    }
}

pub async fn refresh_current(
    api: &ApiClient,
    set_state: WriteSignal<WorkSessionState>,
) -> Result<(), ApiError> {
    set_state.update(|state| state.loading = true);
    let result = api.current_work_session().await;
    set_state.update(|state| {
        state.loading = false;
        if let Ok(current) = &result {
            state.current = current.clone();
        }
    });
    result.map(|_| ())
}

/// Sends the event, then reloads the open session so breaks and totals match the server.
pub async fn perform_clock_event(
    api: &ApiClient,
    event: ClockEvent,
    set_state: WriteSignal<WorkSessionState>,
) -> Result<ClockEvent, ApiError> {
    set_state.update(|state| state.loading = true);
    let sent = match event {
        ClockEvent::ClockIn => api.clock_in().await.map(Some),
        ClockEvent::ClockOut => api.clock_out().await.map(Some),
        ClockEvent::StartBreak => api.start_break().await.map(|_| None),
        ClockEvent::EndBreak => api.end_break().await.map(|_| None),
    };
    match sent {
        Ok(Some(session)) if event == ClockEvent::ClockOut => {
            set_state.update(|state| {
                state.current = Some(session);
                state.loading = false;
            });
            Ok(event)
        }
        Ok(_) => {
            refresh_current(api, set_state).await?;
            Ok(event)
        }
        Err(err) => {
            log::warn!("{} failed: {}", event.label(), err);
            set_state.update(|state| state.loading = false);
            Err(err)
        }
    }
}


#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::test_support::{MockServer, GET, POST};
    use serde_json::json;

    fn session(clock_out: Option<&str>, breaks: serde_json::Value) -> serde_json::Value {
        json!({
            "id": 1,
            "clockInTime": "2025-01-02T03:30:00Z",
            "clockOutTime": clock_out,
            "breaks": breaks
        })
    }

    #[tokio::test]
    async fn break_start_reloads_current_session() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/api/breaks/start");
            then.status(200).json_body(json!({ "id": 9, "startTime": "2025-01-02T06:00:00Z" }));
        });
        server.mock(|when, then| {
            when.method(GET).path("/api/work-sessions/active");
            then.status(200).json_body(session(
                None,
                json!([{ "id": 9, "startTime": "2025-01-02T06:00:00Z", "endTime": null }]),
            ));
        });

        let runtime = create_runtime();
        let (state, set_state) = create_signal(WorkSessionState::default());
        let api = ApiClient::new_with_base_url(server.url("/api"));

        perform_clock_event(&api, ClockEvent::StartBreak, set_state)
            .await
            .unwrap();
        assert_eq!(state.get().status(), LiveStatus::OnBreak);
        assert!(!state.get().loading);
        runtime.dispose();
    }

    #[tokio::test]
    async fn clock_out_keeps_returned_session() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/api/work-sessions/clock-out");
            then.status(200)
                .json_body(session(Some("2025-01-02T12:30:00Z"), json!([])));
        });

        let runtime = create_runtime();
        let (state, set_state) = create_signal(WorkSessionState::default());
        let api = ApiClient::new_with_base_url(server.url("/api"));

        perform_clock_event(&api, ClockEvent::ClockOut, set_state)
            .await
            .unwrap();
        assert_eq!(state.get().status(), LiveStatus::Completed);
        assert_eq!(server.hits(&GET, "/api/work-sessions/active"), 0);
        runtime.dispose();
    }

    #[tokio::test]
    async fn failed_event_clears_loading() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/api/work-sessions/clock-in");
            then.status(400).json_body(json!({ "message": "Already clocked in" }));
        });

        let runtime = create_runtime();
        let (state, set_state) = create_signal(WorkSessionState::default());
        let api = ApiClient::new_with_base_url(server.url("/api"));

        let err = perform_clock_event(&api, ClockEvent::ClockIn, set_state)
            .await
            .unwrap_err();
        assert_eq!(err.error, "Already clocked in");
        assert!(!state.get().loading);
        runtime.dispose();
    }
}
