use crate::api::ApiError;
use crate::components::{
    empty_state::EmptyState,
    layout::{ErrorMessage, LoadingSpinner},
};
use crate::pages::shifts::{repository::ManagerShifts, utils::staff_by_shift};
use crate::utils::time::format_time_of_day;
use leptos::*;

#[component]
pub fn ShiftStaffList(shifts: Resource<(), Result<ManagerShifts, ApiError>>) -> impl IntoView {
    view! {
        {move || match shifts.get() {
            None => view! { <LoadingSpinner /> }.into_view(),
            Some(Err(err)) => view! { <ErrorMessage message=err.error /> }.into_view(),
            Some(Ok(mine)) if mine.shifts.is_empty() => view! {
                <EmptyState title="No shifts" description="You are not managing any shifts yet." />
            }.into_view(),
            Some(Ok(mine)) => staff_by_shift(&mine.shifts, &mine.links)
                .into_iter()
                .map(|entry| {
                    let count = entry.staff.len();
                    view! {
                        <div class="bg-surface-elevated shadow rounded-lg p-4 space-y-2">
                            <div class="flex items-center justify-between">
                                <h3 class="text-base font-semibold text-fg">{entry.shift.name.clone()}</h3>
                                <span class="text-sm text-fg-muted">
                                    {format!(
                                        "{} - {}",
                                        format_time_of_day(entry.shift.start_time),
                                        format_time_of_day(entry.shift.end_time)
                                    )}
                                </span>
                            </div>
                            <p class="text-xs text-fg-muted">{format!("{} assigned", count)}</p>
                            <ul class="text-sm text-fg list-disc pl-5">
                                {entry.staff.into_iter().map(|name| view! { <li>{name}</li> }).collect_view()}
                            </ul>
                        </div>
                    }
                })
                .collect_view(),
        }}
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::EmployeeShift;
    use crate::test_support::{helpers::shift, ssr::render_to_string};

    #[test]
    fn lists_staff_under_each_shift() {
        let html = render_to_string(|| {
            let shifts = create_resource(|| (), |_| async { Ok::<_, ApiError>(ManagerShifts::default()) });
            shifts.set(Ok(ManagerShifts {
                manager_id: 2,
                shifts: vec![shift(1, "Day", Some(2))],
                links: vec![EmployeeShift {
                    id: 1,
                    employee_id: 10,
                    shift_id: 1,
                    employee_name: Some("Zoya Khan".into()),
                    shift_name: None,
                }],
            }));
            view! { <ShiftStaffList shifts=shifts /> }
        });
        assert!(html.contains("Zoya Khan"));
        assert!(html.contains("1 assigned"));
        assert!(html.contains("9:00 AM - 6:00 PM"));
    }
}
