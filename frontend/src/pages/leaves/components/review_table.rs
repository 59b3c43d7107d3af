use crate::api::{ApiError, Leave, LeaveStatus};
use crate::components::{
    data_table::DataTable,
    layout::{ErrorMessage, LoadingSpinner},
};
use crate::pages::leaves::utils::{
    action_label, filter_by_status, leave_columns, leave_rows, status_actions,
};
use leptos::*;

fn action_class(status: LeaveStatus) -> &'static str {
    match status {
        LeaveStatus::Approved => "text-status-success-text hover:underline disabled:opacity-40 disabled:no-underline",
        LeaveStatus::Rejected => "text-status-error-text hover:underline disabled:opacity-40 disabled:no-underline",
        LeaveStatus::Pending => "text-fg-muted hover:underline disabled:opacity-40 disabled:no-underline",
    }
}

/// Leave table; passing `on_status` adds the review buttons.
#[component]
pub fn LeaveTable(
    leaves: Resource<u32, Result<Vec<Leave>, ApiError>>,
    status_filter: RwSignal<Option<LeaveStatus>>,
    include_employee: bool,
    #[prop(optional)] on_status: Option<Callback<(i64, LeaveStatus)>>,
    #[prop(into)] busy: Signal<bool>,
) -> impl IntoView {
    let rows = Signal::derive(move || {
        let filter = status_filter.get();
        leaves.with(|loaded| match loaded {
            Some(Ok(list)) => leave_rows(&filter_by_status(list, filter), include_employee),
            _ => Vec::new(),
        })
    });
    let current_status = move |id: i64| {
        leaves.with_untracked(|loaded| match loaded {
            Some(Ok(list)) => list.iter().find(|l| l.id == id).map(|l| l.status),
            _ => None,
        })
    };
    let actions = on_status.map(|on_status| {
        Callback::new(move |row_id: String| {
            let Some((id, current)) = row_id
                .parse::<i64>()
                .ok()
                .and_then(|id| current_status(id).map(|status| (id, status)))
            else {
                return ().into_view();
            };
            let buttons = status_actions(current)
                .into_iter()
                .map(|(status, enabled)| {
                    view! {
                        <button
                            type="button"
                            class=action_class(status)
                            disabled=move || !enabled || busy.get()
                            on:click=move |_| on_status.call((id, status))
                        >
                            {action_label(status)}
                        </button>
                    }
                })
                .collect_view();
            view! { <div class="flex justify-end gap-3">{buttons}</div> }.into_view()
        })
    });

    view! {
        <div class="space-y-3">
            <div class="flex items-center gap-2 text-sm">
                <label for="leave-filter" class="text-fg-muted">"Status"</label>
                <select
                    id="leave-filter"
                    class="border border-border rounded-md px-2 py-1 text-sm"
                    on:change=move |ev| {
                        let value = event_target_value(&ev);
                        status_filter.set(LeaveStatus::ALL.into_iter().find(|s| s.as_str() == value));
                    }
                >
                    <option value="">"All"</option>
                    {LeaveStatus::ALL
                        .into_iter()
                        .map(|status| view! {
                            <option value=status.as_str() selected=move || status_filter.get() == Some(status)>
                                {status.label()}
                            </option>
                        })
                        .collect_view()}
                </select>
            </div>
            {move || match leaves.get() {
                None => view! { <LoadingSpinner /> }.into_view(),
                Some(Err(err)) => view! { <ErrorMessage message=err.error /> }.into_view(),
                Some(Ok(_)) => match actions {
                    Some(actions) => view! {
                        <DataTable
                            columns=leave_columns(include_employee)
                            rows=rows
                            export_name="leaves"
                            row_actions=actions
                            empty_message="No leave requests."
                        />
                    }.into_view(),
                    None => view! {
                        <DataTable
                            columns=leave_columns(include_employee)
                            rows=rows
                            export_name="leaves"
                            empty_message="No leave requests."
                        />
                    }.into_view(),
                },
            }}
        </div>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::{helpers::leave, ssr::render_to_string};

    #[test]
    fn review_rows_offer_all_three_actions() {
        let html = render_to_string(|| {
            let leaves = create_resource(|| 0u32, |_| async { Ok::<Vec<Leave>, ApiError>(Vec::new()) });
            leaves.set(Ok(vec![leave(1, LeaveStatus::Pending)]));
            view! {
                <LeaveTable
                    leaves=leaves
                    status_filter=create_rw_signal(None)
                    include_employee=true
                    on_status=Callback::new(|_| ())
                    busy=Signal::derive(|| false)
                />
            }
        });
        assert!(html.contains("Priya Nair"));
        assert!(html.contains("Mark pending"));
        assert_eq!(html.matches("Approve").count(), 2);
    }

    #[test]
    fn history_rows_have_no_actions() {
        let html = render_to_string(|| {
            let leaves = create_resource(|| 0u32, |_| async { Ok::<Vec<Leave>, ApiError>(Vec::new()) });
            leaves.set(Ok(vec![leave(1, LeaveStatus::Approved)]));
            view! {
                <LeaveTable
                    leaves=leaves
                    status_filter=create_rw_signal(None)
                    include_employee=false
                    busy=Signal::derive(|| false)
                />
            }
        });
        assert!(html.contains("2025-02-03"));
        assert!(!html.contains("Mark pending"));
    }
}
