use chrono::NaiveDate;
use leptos::*;

use crate::api::{ApiClient, ApiError, WorkSession};
use crate::components::messages::MessageState;
use crate::pages::attendance::utils::{default_range, RangeFormState};
use crate::pages::work_sessions::{repository, utils::SessionScope};
use crate::utils::time::today_in_display_tz;

#[derive(Clone, Copy)]
pub struct WorkSessionsViewModel {
    pub scope: SessionScope,
    pub sessions: Resource<u32, Result<Vec<WorkSession>, ApiError>>,
    pub reload: RwSignal<u32>,
    pub range: RangeFormState,
    pub applied_range: RwSignal<(Option<NaiveDate>, Option<NaiveDate>)>,
    pub messages: RwSignal<MessageState>,
}

impl WorkSessionsViewModel {
    /// The range filters the loaded list; nothing is refetched.
    pub fn apply_range(&self) {
        match self.range.to_range() {
            Ok(range) => {
                self.messages.update(MessageState::clear);
                self.applied_range.set(range);
            }
            Err(msg) => self.messages.update(|m| m.set_error(msg)),
        }
    }

    pub fn refresh(&self) {
        self.reload.update(|n| *n = n.wrapping_add(1));
    }
}

pub fn use_work_sessions_view_model(scope: SessionScope) -> WorkSessionsViewModel {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    let reload = create_rw_signal(0u32);
    let sessions = create_resource(
        move || reload.get(),
        move |_| {
            let api = api.clone();
            async move { repository::fetch_sessions(&api, scope).await }
        },
    );
    let (from, to) = default_range(today_in_display_tz());
    WorkSessionsViewModel {
        scope,
        sessions,
        reload,
        range: RangeFormState::new(from, to),
        applied_range: create_rw_signal((Some(from), Some(to))),
        messages: create_rw_signal(MessageState::default()),
    }
}
