use crate::api::{ApiClient, ApiError, Shift, ShiftPayload};
use crate::components::messages::MessageState;
use crate::pages::employees::utils::FieldErrors;
use crate::pages::shifts::{
    repository::{self, ManagerShifts, ShiftCatalog},
    utils::ShiftFormState,
};
use leptos::*;

#[derive(Clone, Copy)]
pub struct ShiftsViewModel {
    pub catalog: Resource<u32, Result<ShiftCatalog, ApiError>>,
    pub reload: RwSignal<u32>,
    pub form: RwSignal<Option<ShiftFormState>>,
    pub field_errors: RwSignal<FieldErrors>,
    pub messages: RwSignal<MessageState>,
    pub save_action: Action<(Option<i64>, ShiftPayload), Result<Shift, ApiError>>,
    pub delete_action: Action<i64, Result<i64, ApiError>>,
    pub pending_delete: RwSignal<Option<i64>>,
}

impl ShiftsViewModel {
    pub fn open_create(&self) {
        self.field_errors.set(FieldErrors::new());
        self.form.set(Some(ShiftFormState::default()));
    }

    pub fn open_edit(&self, id: i64) {
        let shift = self.catalog.with_untracked(|loaded| match loaded {
            Some(Ok(catalog)) => catalog.shifts.iter().find(|s| s.id == id).cloned(),
            _ => None,
        });
        if let Some(shift) = shift {
            self.field_errors.set(FieldErrors::new());
            self.form.set(Some(ShiftFormState::from_shift(&shift)));
        }
    }

    pub fn close(&self) {
        self.form.set(None);
    }

    pub fn submit(&self) {
        if self.save_action.pending().get_untracked() {
            return;
        }
        let Some(state) = self.form.get_untracked() else {
            return;
        };
        match state.validate() {
            Ok(payload) => {
                self.field_errors.set(FieldErrors::new());
                self.save_action.dispatch((state.id, payload));
            }
            Err(errors) => self.field_errors.set(errors),
        }
    }

    pub fn confirm_delete(&self) {
        if let Some(id) = self.pending_delete.get_untracked() {
            self.pending_delete.set(None);
            self.delete_action.dispatch(id);
        }
    }
}

pub fn use_shifts_view_model() -> ShiftsViewModel {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    let reload = create_rw_signal(0u32);
    let api_for_catalog = api.clone();
    let catalog = create_resource(
        move || reload.get(),
        move |_| {
            let api = api_for_catalog.clone();
            async move { repository::fetch_catalog(&api).await }
        },
    );
    let form = create_rw_signal(None::<ShiftFormState>);
    let field_errors = create_rw_signal(FieldErrors::new());
    let messages = create_rw_signal(MessageState::default());
    let pending_delete = create_rw_signal(None::<i64>);

    let api_for_save = api.clone();
    let save_action = create_action(move |(id, payload): &(Option<i64>, ShiftPayload)| {
        let api = api_for_save.clone();
        let (id, payload) = (*id, payload.clone());
        async move { repository::save_shift(&api, id, &payload).await }
    });
    let delete_action = create_action(move |id: &i64| {
        let api = api.clone();
        let id = *id;
        async move { repository::delete_shift(&api, id).await }
    });

    create_effect(move |_| {
        if let Some(result) = save_action.value().get() {
            match result {
                Ok(shift) => {
                    form.set(None);
                    messages.update(|m| m.set_success(format!("Saved shift {}.", shift.name)));
                    reload.update(|n| *n += 1);
                }
                Err(err) => messages.update(|m| m.set_api_error(&err)),
            }
        }
    });

    create_effect(move |_| {
        if let Some(result) = delete_action.value().get() {
            match result {
                Ok(id) => {
                    catalog.update(|loaded| {
                        if let Some(Ok(catalog)) = loaded {
                            catalog.shifts.retain(|s| s.id != id);
                        }
                    });
                    messages.update(|m| m.set_success("Shift deleted."));
                }
                Err(err) => {
                    log::error!("shift delete failed: {}", err);
                    messages.update(|m| m.set_api_error(&err));
                }
            }
        }
    });

    ShiftsViewModel {
        catalog,
        reload,
        form,
        field_errors,
        messages,
        save_action,
        delete_action,
        pending_delete,
    }
}

pub fn use_manager_shifts() -> Resource<(), Result<ManagerShifts, ApiError>> {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    create_resource(
        || (),
        move |_| {
            let api = api.clone();
            async move { repository::fetch_manager_shifts(&api).await }
        },
    )
}
