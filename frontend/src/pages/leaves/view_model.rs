use crate::api::{ApiClient, ApiError, ApplyLeaveRequest, Leave, LeaveStatus, ProofAttachment};
use crate::components::messages::MessageState;
use crate::pages::leaves::{
    repository::{self, replace_leave},
    utils::{FieldErrors, LeaveFormState, LeaveScope},
};
use crate::utils::upload::read_selected_file;
use leptos::*;

#[derive(Clone, Copy)]
pub struct LeavesViewModel {
    pub scope: LeaveScope,
    pub leaves: Resource<u32, Result<Vec<Leave>, ApiError>>,
    pub reload: RwSignal<u32>,
    pub form: RwSignal<LeaveFormState>,
    pub field_errors: RwSignal<FieldErrors>,
    pub proof: RwSignal<Option<ProofAttachment>>,
    pub status_filter: RwSignal<Option<LeaveStatus>>,
    pub messages: RwSignal<MessageState>,
    pub apply_action: Action<(ApplyLeaveRequest, Option<ProofAttachment>), Result<Leave, ApiError>>,
    pub status_action: Action<(i64, LeaveStatus), Result<Leave, ApiError>>,
}

impl LeavesViewModel {
    pub fn submit(&self) {
        if self.apply_action.pending().get_untracked() {
            return;
        }
        match self.form.get_untracked().validate() {
            Ok(request) => {
                self.field_errors.set(FieldErrors::new());
                self.apply_action
                    .dispatch((request, self.proof.get_untracked()));
            }
            Err(errors) => self.field_errors.set(errors),
        }
    }

    /// Reads the chosen proof file; a rejected file clears any earlier pick.
    pub fn pick_proof(&self, ev: ev::Event) {
        let proof = self.proof;
        let messages = self.messages;
        spawn_local(async move {
            match read_selected_file(&ev).await {
                Ok(file) => proof.set(file),
                Err(msg) => {
                    proof.set(None);
                    messages.update(|m| m.set_error(msg));
                }
            }
        });
    }

    pub fn change_status(&self, id: i64, status: LeaveStatus) {
        if !self.scope.can_review() || self.status_action.pending().get_untracked() {
            return;
        }
        let current = self
            .leaves
            .with_untracked(|loaded| match loaded {
                Some(Ok(list)) => list.iter().find(|l| l.id == id).map(|l| l.status),
                _ => None,
            });
        if current == Some(status) {
            return;
        }
        self.status_action.dispatch((id, status));
    }
}

pub fn use_leaves_view_model(scope: LeaveScope) -> LeavesViewModel {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    let reload = create_rw_signal(0u32);
    let api_for_list = api.clone();
    let leaves = create_resource(
        move || reload.get(),
        move |_| {
            let api = api_for_list.clone();
            async move { repository::fetch_leaves(&api, scope).await }
        },
    );
    let form = create_rw_signal(LeaveFormState::default());
    let field_errors = create_rw_signal(FieldErrors::new());
    let proof = create_rw_signal(None::<ProofAttachment>);
    let status_filter = create_rw_signal(None::<LeaveStatus>);
    let messages = create_rw_signal(MessageState::default());

    let api_for_apply = api.clone();
    let apply_action = create_action(
        move |(request, proof): &(ApplyLeaveRequest, Option<ProofAttachment>)| {
            let api = api_for_apply.clone();
            let request = request.clone();
            let proof = proof.clone();
            async move { repository::apply_leave(&api, &request, proof.as_ref()).await }
        },
    );
    let status_action = create_action(move |(id, status): &(i64, LeaveStatus)| {
        let api = api.clone();
        let (id, status) = (*id, *status);
        async move { repository::set_status(&api, id, status).await }
    });

    create_effect(move |_| {
        if let Some(result) = apply_action.value().get() {
            match result {
                Ok(leave) => {
                    form.set(LeaveFormState::default());
                    proof.set(None);
                    messages.update(|m| {
                        m.set_success(format!(
                            "Leave from {} to {} submitted.",
                            leave.start_date, leave.end_date
                        ))
                    });
                    reload.update(|n| *n = n.wrapping_add(1));
                }
                Err(err) => {
                    log::error!("leave application failed: {}", err);
                    messages.update(|m| m.set_api_error(&err));
                }
            }
        }
    });

    create_effect(move |_| {
        if let Some(result) = status_action.value().get() {
            match result {
                Ok(updated) => {
                    leaves.update(|loaded| {
                        if let Some(Ok(list)) = loaded {
                            replace_leave(list, &updated);
                        }
                    });
                    messages.update(|m| {
                        m.set_success(format!("Leave #{} is now {}.", updated.id, updated.status.label()))
                    });
                }
                Err(err) => {
                    log::error!("leave status change failed: {}", err);
                    messages.update(|m| m.set_api_error(&err));
                }
            }
        }
    });

    LeavesViewModel {
        scope,
        leaves,
        reload,
        form,
        field_errors,
        proof,
        status_filter,
        messages,
        apply_action,
        status_action,
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::{helpers::leave, ssr::with_resources_suppressed};

    #[test]
    fn invalid_form_is_not_sent() {
        with_resources_suppressed(|| {
            let vm = use_leaves_view_model(LeaveScope::Mine);
            vm.submit();
            assert!(vm.apply_action.value().get_untracked().is_none());
            assert!(vm.field_errors.get_untracked().contains_key("startDate"));
        });
    }

    #[test]
    fn employees_cannot_review_and_same_status_is_ignored() {
        with_resources_suppressed(|| {
            let mine = use_leaves_view_model(LeaveScope::Mine);
            mine.change_status(1, LeaveStatus::Approved);
            assert!(mine.status_action.input().get_untracked().is_none());

            let all = use_leaves_view_model(LeaveScope::All);
            all.leaves.set(Ok(vec![leave(1, LeaveStatus::Approved)]));
            all.change_status(1, LeaveStatus::Approved);
            assert!(all.status_action.input().get_untracked().is_none());
        });
    }
}
