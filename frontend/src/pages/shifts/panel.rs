use crate::components::{
    common::Button,
    confirm_dialog::ConfirmDialog,
    data_table::DataTable,
    layout::{ErrorMessage, Layout, LoadingSpinner, PageHeader},
    messages::Messages,
};
use crate::pages::shifts::{
    components::{ShiftForm, ShiftStaffList},
    utils::{shift_rows, SHIFT_COLUMNS},
    view_model::{use_manager_shifts, use_shifts_view_model},
};
use leptos::*;

#[component]
pub fn ShiftsPage() -> impl IntoView {
    let vm = use_shifts_view_model();
    let managers = Signal::derive(move || {
        vm.catalog.with(|loaded| match loaded {
            Some(Ok(catalog)) => catalog.managers.clone(),
            _ => Vec::new(),
        })
    });
    let rows = Signal::derive(move || {
        vm.catalog.with(|loaded| match loaded {
            Some(Ok(catalog)) => shift_rows(&catalog.shifts, &catalog.managers),
            _ => Vec::new(),
        })
    });
    let actions = Callback::new(move |row_id: String| {
        let Ok(id) = row_id.parse::<i64>() else {
            return ().into_view();
        };
        view! {
            <div class="flex justify-end gap-3">
                <button type="button" class="text-action-primary-bg hover:underline" on:click=move |_| vm.open_edit(id)>
                    "Edit"
                </button>
                <button type="button" class="text-status-error-text hover:underline" on:click=move |_| vm.pending_delete.set(Some(id))>
                    "Delete"
                </button>
            </div>
        }
        .into_view()
    });

    view! {
        <Layout>
            <PageHeader title="Shifts" subtitle="Working windows and the managers who run them" />
            <div class="space-y-4">
                <Messages messages=vm.messages />
                <div class="flex justify-end">
                    <Button on:click=move |_| vm.open_create()>"Add shift"</Button>
                </div>
                <Show when=move || vm.form.with(Option::is_some)>
                    <ShiftForm
                        form=vm.form
                        errors=vm.field_errors
                        managers=managers
                        pending=vm.save_action.pending()
                        on_submit=Callback::new(move |_| vm.submit())
                        on_cancel=Callback::new(move |_| vm.close())
                    />
                </Show>
                {move || match vm.catalog.get() {
                    None => view! { <LoadingSpinner /> }.into_view(),
                    Some(Err(err)) => view! { <ErrorMessage message=err.error /> }.into_view(),
                    Some(Ok(_)) => view! {
                        <DataTable
                            columns=SHIFT_COLUMNS.to_vec()
                            rows=rows
                            export_name="shifts"
                            row_actions=actions
                            empty_message="No shifts defined."
                        />
                    }.into_view(),
                }}
                <ConfirmDialog
                    is_open=Signal::derive(move || vm.pending_delete.get().is_some())
                    title="Delete shift"
                    message="Employees assigned to this shift will lose the assignment."
                    confirm_label="Delete"
                    on_confirm=Callback::new(move |_| vm.confirm_delete())
                    on_cancel=Callback::new(move |_| vm.pending_delete.set(None))
                    pending=vm.delete_action.pending()
                    destructive=true
                />
            </div>
        </Layout>
    }
}

#[component]
pub fn ManagerShiftsPage() -> impl IntoView {
    let shifts = use_manager_shifts();
    view! {
        <Layout>
            <PageHeader title="My Shifts" subtitle="Shifts you manage and who is on them" />
            <div class="grid grid-cols-1 gap-4 md:grid-cols-2">
                <ShiftStaffList shifts=shifts />
            </div>
        </Layout>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::Role;
    use crate::test_support::{helpers::provide_role, ssr::render_to_string};

    #[test]
    fn shifts_page_renders_header() {
        let html = render_to_string(|| {
            provide_role(Role::Admin);
            view! { <ShiftsPage /> }
        });
        assert!(html.contains("Add shift"));
    }
}
