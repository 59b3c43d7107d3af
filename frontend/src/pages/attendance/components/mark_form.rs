use crate::components::common::{Button, ButtonVariant};
use crate::pages::attendance::{repository::RosterEntry, utils::MarkFormState};
use leptos::{ev::SubmitEvent, *};

const INPUT_CLASS: &str = "mt-1 w-full border border-border rounded-md px-3 py-2 text-sm";

#[component]
pub fn MarkAttendanceForm(
    form: RwSignal<MarkFormState>,
    #[prop(into)] roster: Signal<Vec<RosterEntry>>,
    #[prop(into)] pending: Signal<bool>,
    on_submit: Callback<()>,
) -> impl IntoView {
    view! {
        <form
            class="bg-surface-elevated shadow rounded-lg p-4 grid grid-cols-1 md:grid-cols-4 gap-4 items-end"
            on:submit=move |ev: SubmitEvent| {
                ev.prevent_default();
                on_submit.call(());
            }
        >
            <div class="md:col-span-2">
                <label for="mark-employee" class="block text-sm font-medium text-fg">"Employee"</label>
                <select
                    id="mark-employee"
                    class=INPUT_CLASS
                    on:change=move |ev| {
                        let id = event_target_value(&ev).parse::<i64>().ok();
                        form.update(|f| f.employee_id = id);
                    }
                >
                    <option value="">"Select..."</option>
                    {move || roster
                        .get()
                        .into_iter()
                        .map(|entry| {
                            let id = entry.id;
                            view! {
                                <option value=id.to_string() selected=move || form.with(|f| f.employee_id == Some(id))>
                                    {entry.name}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
            </div>
            <div>
                <label for="mark-date" class="block text-sm font-medium text-fg">"Date"</label>
                <input
                    id="mark-date"
                    type="date"
                    class=INPUT_CLASS
                    prop:value=move || form.with(|f| f.date.clone())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        form.update(|f| f.date = value);
                    }
                />
            </div>
            <div class="flex items-center gap-2">
                <Button
                    variant=ButtonVariant::Success
                    attr:type="submit"
                    loading=pending
                    on:click=move |_| form.update(|f| f.present = true)
                >
                    "Present"
                </Button>
                <Button
                    variant=ButtonVariant::Danger
                    attr:type="submit"
                    loading=pending
                    on:click=move |_| form.update(|f| f.present = false)
                >
                    "Absent"
                </Button>
            </div>
        </form>
    }
}
