use crate::api::ApiError;
use crate::components::{
    data_table::DataTable,
    layout::{ErrorMessage, LoadingSpinner},
};
use crate::pages::employees::utils::{employee_rows, Directory, EMPLOYEE_COLUMNS};
use leptos::*;

#[component]
pub fn EmployeeTable(
    directory: Resource<u32, Result<Directory, ApiError>>,
    on_edit: Callback<i64>,
    on_toggle: Callback<i64>,
    #[prop(into)] busy: Signal<bool>,
) -> impl IntoView {
    let rows = Signal::derive(move || {
        directory.with(|loaded| match loaded {
            Some(Ok(dir)) => employee_rows(dir),
            _ => Vec::new(),
        })
    });
    let is_active = move |id: i64| {
        directory.with_untracked(|loaded| match loaded {
            Some(Ok(dir)) => dir.employee(id).map(|e| e.active).unwrap_or(false),
            _ => false,
        })
    };
    let actions = Callback::new(move |row_id: String| {
        let Ok(id) = row_id.parse::<i64>() else {
            return ().into_view();
        };
        let toggle_label = if is_active(id) { "Deactivate" } else { "Activate" };
        view! {
            <div class="flex justify-end gap-3">
                <button type="button" class="text-action-primary-bg hover:underline" on:click=move |_| on_edit.call(id)>
                    "Edit"
                </button>
                <button
                    type="button"
                    class="text-fg-muted hover:underline disabled:opacity-50"
                    disabled=move || busy.get()
                    on:click=move |_| on_toggle.call(id)
                >
                    {toggle_label}
                </button>
            </div>
        }
        .into_view()
    });

    view! {
        {move || match directory.get() {
            None => view! { <LoadingSpinner /> }.into_view(),
            Some(Err(err)) => view! { <ErrorMessage message=err.error /> }.into_view(),
            Some(Ok(_)) => view! {
                <DataTable
                    columns=EMPLOYEE_COLUMNS.to_vec()
                    rows=rows
                    export_name="employees"
                    row_actions=actions
                    empty_message="No employees yet."
                />
            }.into_view(),
        }}
    }
}
