use chrono::NaiveDate;
use leptos::*;

use crate::api::{ApiClient, ApiError, AttendanceRecord, MarkAttendanceRequest};
use crate::components::messages::MessageState;
use crate::pages::attendance::{
    repository::{self, AttendanceData},
    utils::{default_range, AttendanceScope, MarkFormState, RangeFormState},
};
use crate::utils::time::today_in_display_tz;

#[derive(Clone, Copy, PartialEq, Eq)]
pub struct AttendanceQuery {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub token: u32,
}

impl AttendanceQuery {
    pub fn with_range(self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Self {
            from,
            to,
            token: self.token.wrapping_add(1),
        }
    }

    pub fn refresh(self) -> Self {
        self.with_range(self.from, self.to)
    }
}

#[derive(Clone, Copy)]
pub struct AttendanceViewModel {
    pub scope: AttendanceScope,
    pub range: RangeFormState,
    pub query: RwSignal<AttendanceQuery>,
    pub data: Resource<AttendanceQuery, Result<AttendanceData, ApiError>>,
    pub mark_form: RwSignal<MarkFormState>,
    pub mark_action: Action<MarkAttendanceRequest, Result<AttendanceRecord, ApiError>>,
    pub messages: RwSignal<MessageState>,
}

impl AttendanceViewModel {
    pub fn apply_range(&self) {
        match self.range.to_range() {
            Ok((from, to)) => {
                self.messages.update(MessageState::clear);
                self.query.update(|q| *q = q.with_range(from, to));
            }
            Err(msg) => self.messages.update(|m| m.set_error(msg)),
        }
    }

    pub fn submit_mark(&self) {
        if !self.scope.can_mark() || self.mark_action.pending().get_untracked() {
            return;
        }
        match self.mark_form.get_untracked().to_request() {
            Ok(request) => self.mark_action.dispatch(request),
            Err(msg) => self.messages.update(|m| m.set_error(msg)),
        }
    }
}

pub fn use_attendance_view_model(scope: AttendanceScope) -> AttendanceViewModel {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    let today = today_in_display_tz();
    let (from, to) = default_range(today);
    let range = RangeFormState::new(from, to);
    let query = create_rw_signal(AttendanceQuery {
        from: Some(from),
        to: Some(to),
        token: 0,
    });
    let api_for_data = api.clone();
    let data = create_resource(
        move || query.get(),
        move |q| {
            let api = api_for_data.clone();
            async move { repository::fetch_attendance(&api, scope, q.from, q.to).await }
        },
    );
    let mark_form = create_rw_signal(MarkFormState::new(today));
    let messages = create_rw_signal(MessageState::default());
    let mark_action = create_action(move |request: &MarkAttendanceRequest| {
        let api = api.clone();
        let request = request.clone();
        async move { repository::mark_attendance(&api, &request).await }
    });

    create_effect(move |_| {
        if let Some(result) = mark_action.value().get() {
            match result {
                Ok(record) => {
                    let status = if record.present { "present" } else { "absent" };
                    messages.update(|m| m.set_success(format!("Marked {} for {}.", status, record.date)));
                    query.update(|q| *q = q.refresh());
                }
                Err(err) => {
                    log::error!("marking attendance failed: {}", err);
                    messages.update(|m| m.set_api_error(&err));
                }
            }
        }
    });

    AttendanceViewModel {
        scope,
        range,
        query,
        data,
        mark_form,
        mark_action,
        messages,
    }
}
