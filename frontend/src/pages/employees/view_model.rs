use crate::api::{ApiClient, ApiError, Employee, EmployeePayload};
use crate::components::messages::MessageState;
use crate::pages::employees::{
    repository::{self, plan_shift_change, ReassignError, ShiftPlan},
    utils::{conflict_errors, Directory, EmployeeFormState, FieldErrors},
};
use leptos::*;

#[derive(Debug, Clone, PartialEq)]
pub enum SaveRequest {
    Create {
        payload: EmployeePayload,
        shift_id: Option<i64>,
    },
    Update {
        id: i64,
        payload: EmployeePayload,
        plan: ShiftPlan,
    },
}

#[derive(Clone, Copy)]
pub struct EmployeesViewModel {
    pub directory: Resource<u32, Result<Directory, ApiError>>,
    pub reload: RwSignal<u32>,
    pub form: RwSignal<Option<EmployeeFormState>>,
    pub field_errors: RwSignal<FieldErrors>,
    pub messages: RwSignal<MessageState>,
    pub save_action: Action<SaveRequest, Result<Employee, ReassignError>>,
    pub toggle_action: Action<(i64, bool), Result<Employee, ApiError>>,
    pub pending_toggle: RwSignal<Option<(i64, bool)>>,
}

impl EmployeesViewModel {
    fn loaded(&self) -> Option<Directory> {
        self.directory.get_untracked().and_then(Result::ok)
    }

    pub fn open_create(&self) {
        self.field_errors.set(FieldErrors::new());
        self.form.set(Some(EmployeeFormState::default()));
    }

    pub fn open_edit(&self, id: i64) {
        let Some(directory) = self.loaded() else {
            return;
        };
        if let Some(employee) = directory.employee(id) {
            let shift_id = directory.shift_id_for(employee);
            self.field_errors.set(FieldErrors::new());
            self.form
                .set(Some(EmployeeFormState::from_employee(employee, shift_id)));
        }
    }

    pub fn close(&self) {
        self.form.set(None);
        self.field_errors.set(FieldErrors::new());
    }

    /// Validates locally; nothing is sent while any field is invalid.
    pub fn submit(&self) {
        if self.save_action.pending().get_untracked() {
            return;
        }
        let Some(state) = self.form.get_untracked() else {
            return;
        };
        let payload = match state.validate() {
            Ok(payload) => payload,
            Err(errors) => {
                self.field_errors.set(errors);
                return;
            }
        };
        self.field_errors.set(FieldErrors::new());
        let request = match state.id {
            None => SaveRequest::Create {
                payload,
                shift_id: state.target_shift(),
            },
            Some(id) => {
                let links = self
                    .loaded()
                    .map(|directory| directory.links_for(id))
                    .unwrap_or_default();
                SaveRequest::Update {
                    id,
                    plan: plan_shift_change(&links, payload.role, state.target_shift()),
                    payload,
                }
            }
        };
        self.save_action.dispatch(request);
    }

    /// Deactivation asks first; activation goes straight through.
    pub fn request_toggle(&self, id: i64) {
        let Some(employee) = self.loaded().and_then(|d| d.employee(id).cloned()) else {
            return;
        };
        let next = !employee.active;
        if next {
            self.toggle_action.dispatch((id, true));
        } else {
            self.pending_toggle.set(Some((id, false)));
        }
    }

    pub fn confirm_toggle(&self) {
        if let Some(request) = self.pending_toggle.get_untracked() {
            self.pending_toggle.set(None);
            self.toggle_action.dispatch(request);
        }
    }
}

pub fn use_employees_view_model() -> EmployeesViewModel {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    let reload = create_rw_signal(0u32);
    let api_for_directory = api.clone();
    let directory = create_resource(
        move || reload.get(),
        move |_| {
            let api = api_for_directory.clone();
            async move { repository::fetch_directory(&api).await }
        },
    );

    let form = create_rw_signal(None::<EmployeeFormState>);
    let field_errors = create_rw_signal(FieldErrors::new());
    let messages = create_rw_signal(MessageState::default());
    let pending_toggle = create_rw_signal(None::<(i64, bool)>);

    let api_for_save = api.clone();
    let save_action = create_action(move |request: &SaveRequest| {
        let api = api_for_save.clone();
        let request = request.clone();
        async move {
            match request {
                SaveRequest::Create { payload, shift_id } => {
                    repository::create_employee(&api, &payload, shift_id).await
                }
                SaveRequest::Update { id, payload, plan } => {
                    repository::update_employee(&api, id, &payload, &plan).await
                }
            }
        }
    });

    let toggle_action = create_action(move |(id, active): &(i64, bool)| {
        let api = api.clone();
        let (id, active) = (*id, *active);
        async move { repository::set_active(&api, id, active).await }
    });

    create_effect(move |_| {
        if let Some(result) = save_action.value().get() {
            match result {
                Ok(employee) => {
                    form.set(None);
                    messages.update(|m| m.set_success(format!("Saved {}.", employee.full_name)));
                    reload.update(|n| *n += 1);
                }
                Err(err) => {
                    if let Some(errors) = conflict_errors(err.api_error()) {
                        field_errors.set(errors);
                    }
                    if err.is_partial() {
                        reload.update(|n| *n += 1);
                    }
                    messages.update(|m| m.set_error(err.to_string()));
                }
            }
        }
    });

    create_effect(move |_| {
        if let Some(result) = toggle_action.value().get() {
            match result {
                Ok(updated) => {
                    directory.update(|loaded| {
                        if let Some(Ok(dir)) = loaded {
                            if let Some(slot) = dir.employees.iter_mut().find(|e| e.id == updated.id) {
                                slot.active = updated.active;
                            }
                        }
                    });
                    let verb = if updated.active { "Activated" } else { "Deactivated" };
                    messages.update(|m| m.set_success(format!("{} {}.", verb, updated.full_name)));
                }
                Err(err) => {
                    log::error!("status change failed: {}", err);
                    messages.update(|m| m.set_api_error(&err));
                }
            }
        }
    });

    EmployeesViewModel {
        directory,
        reload,
        form,
        field_errors,
        messages,
        save_action,
        toggle_action,
        pending_toggle,
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::Role;
    use crate::test_support::{helpers::employee, ssr::with_resources_suppressed};

    #[test]
    fn invalid_form_is_not_submitted() {
        with_resources_suppressed(|| {
            let vm = use_employees_view_model();
            vm.open_create();
            vm.form.update(|f| {
                if let Some(f) = f {
                    f.full_name = "Priya Nair".into();
                    f.phone = "12345".into();
                }
            });
            vm.submit();
            assert!(vm.field_errors.get_untracked().contains_key("phone"));
            assert!(vm.save_action.value().get_untracked().is_none());
            assert!(vm.form.get_untracked().is_some());
        });
    }

    #[test]
    fn edit_prefills_from_loaded_directory() {
        with_resources_suppressed(|| {
            let vm = use_employees_view_model();
            let mut worker = employee(5, "Priya Nair", Role::Employee);
            worker.shift_id = Some(3);
            vm.directory.set(Ok(Directory {
                employees: vec![worker],
                ..Directory::default()
            }));
            vm.open_edit(5);
            let form = vm.form.get_untracked().unwrap();
            assert_eq!(form.id, Some(5));
            assert_eq!(form.shift_id, Some(3));
            assert!(form.password.is_empty());
        });
    }

    #[test]
    fn deactivation_waits_for_confirmation() {
        with_resources_suppressed(|| {
            let vm = use_employees_view_model();
            vm.directory.set(Ok(Directory {
                employees: vec![employee(5, "Priya Nair", Role::Employee)],
                ..Directory::default()
            }));
            vm.request_toggle(5);
            assert_eq!(vm.pending_toggle.get_untracked(), Some((5, false)));
        });
    }
}
