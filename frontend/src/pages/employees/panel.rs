use crate::components::{
    common::Button, confirm_dialog::ConfirmDialog, layout::{Layout, PageHeader}, messages::Messages,
};
use crate::pages::employees::{
    components::{EmployeeForm, EmployeeTable},
    view_model::use_employees_view_model,
};
use leptos::*;

/// Employee directory with editor. Shared by the admin page and the HR console.
#[component]
pub fn EmployeesSection() -> impl IntoView {
    let vm = use_employees_view_model();
    let shifts = Signal::derive(move || {
        vm.directory
            .with(|loaded| match loaded {
                Some(Ok(dir)) => dir.shifts.clone(),
                _ => Vec::new(),
            })
    });
    let pending_name = Signal::derive(move || {
        let id = vm.pending_toggle.get().map(|(id, _)| id);
        vm.directory.with(|loaded| match (loaded, id) {
            (Some(Ok(dir)), Some(id)) => dir.employee(id).map(|e| e.full_name.clone()),
            _ => None,
        })
    });

    view! {
        <div class="space-y-4">
            <Messages messages=vm.messages />
            <div class="flex justify-end">
                <Button on:click=move |_| vm.open_create()>"Add employee"</Button>
            </div>
            <Show when=move || vm.form.with(Option::is_some)>
                <EmployeeForm
                    form=vm.form
                    errors=vm.field_errors
                    shifts=shifts
                    pending=vm.save_action.pending()
                    on_submit=Callback::new(move |_| vm.submit())
                    on_cancel=Callback::new(move |_| vm.close())
                />
            </Show>
            <EmployeeTable
                directory=vm.directory
                on_edit=Callback::new(move |id| vm.open_edit(id))
                on_toggle=Callback::new(move |id| vm.request_toggle(id))
                busy=vm.toggle_action.pending()
            />
            <ConfirmDialog
                is_open=Signal::derive(move || vm.pending_toggle.get().is_some())
                title="Deactivate employee"
                message=Signal::derive(move || {
                    format!(
                        "{} will no longer be able to sign in.",
                        pending_name.get().unwrap_or_else(|| "This employee".into())
                    )
                })
                confirm_label="Deactivate"
                pending=vm.toggle_action.pending()
                on_confirm=Callback::new(move |_| vm.confirm_toggle())
                on_cancel=Callback::new(move |_| vm.pending_toggle.set(None))
                destructive=true
            />
        </div>
    }
}

#[component]
pub fn EmployeesPage() -> impl IntoView {
    view! {
        <Layout>
            <PageHeader title="Employees" subtitle="Accounts, roles and shift assignments" />
            <EmployeesSection />
        </Layout>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::Role;
    use crate::test_support::{helpers::provide_role, ssr::render_to_string};

    #[test]
    fn employees_page_renders_header_and_add_button() {
        let html = render_to_string(|| {
            provide_role(Role::Admin);
            view! { <EmployeesPage /> }
        });
        assert!(html.contains("Employees"));
        assert!(html.contains("Add employee"));
        assert!(!html.contains("New employee"));
    }
}
