use crate::api::Employee;
use crate::components::common::{Button, ButtonVariant};
use crate::pages::employees::utils::FieldErrors;
use crate::pages::shifts::utils::ShiftFormState;
use leptos::{ev::SubmitEvent, *};

const INPUT_CLASS: &str = "mt-1 w-full border border-border rounded-md px-3 py-2 text-sm";

#[component]
pub fn ShiftForm(
    form: RwSignal<Option<ShiftFormState>>,
    errors: RwSignal<FieldErrors>,
    #[prop(into)] managers: Signal<Vec<Employee>>,
    #[prop(into)] pending: Signal<bool>,
    on_submit: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let edit = move |apply: fn(&mut ShiftFormState, String), value: String| {
        form.update(|f| {
            if let Some(f) = f {
                apply(f, value);
            }
        })
    };
    let value_of = move |read: fn(&ShiftFormState) -> String| {
        form.with(|f| f.as_ref().map(read).unwrap_or_default())
    };
    let error = move |key: &'static str| move || {
        errors
            .with(|e| e.get(key).cloned())
            .map(|msg| view! { <p class="mt-1 text-xs text-status-error-text">{msg}</p> })
    };
    let selected_manager = move || form.with(|f| f.as_ref().and_then(|f| f.manager_id));

    view! {
        <form
            class="bg-surface-elevated shadow rounded-lg p-6 space-y-4"
            on:submit=move |ev: SubmitEvent| {
                ev.prevent_default();
                on_submit.call(());
            }
        >
            <h3 class="text-lg font-medium text-fg">
                {move || if form.with(|f| f.as_ref().and_then(|f| f.id).is_some()) { "Edit shift" } else { "New shift" }}
            </h3>
            <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                <div>
                    <label for="shift-name" class="block text-sm font-medium text-fg">"Name"</label>
                    <input id="shift-name" class=INPUT_CLASS
                        prop:value=move || value_of(|f| f.name.clone())
                        on:input=move |ev| edit(|f, v| f.name = v, event_target_value(&ev)) />
                    {error("name")}
                </div>
                <div>
                    <label for="shift-manager" class="block text-sm font-medium text-fg">"Manager"</label>
                    <select id="shift-manager" class=INPUT_CLASS
                        on:change=move |ev| {
                            let id = event_target_value(&ev).parse::<i64>().ok();
                            form.update(|f| {
                                if let Some(f) = f {
                                    f.manager_id = id;
                                }
                            });
                        }
                    >
                        <option value="">"Unassigned"</option>
                        {move || managers
                            .get()
                            .into_iter()
                            .map(|manager| {
                                let id = manager.id;
                                view! {
                                    <option value=id.to_string() selected=move || selected_manager() == Some(id)>
                                        {manager.full_name}
                                    </option>
                                }
                            })
                            .collect_view()}
                    </select>
                </div>
                <div>
                    <label for="shift-start" class="block text-sm font-medium text-fg">"Start"</label>
                    <input id="shift-start" type="time" class=INPUT_CLASS
                        prop:value=move || value_of(|f| f.start_time.clone())
                        on:input=move |ev| edit(|f, v| f.start_time = v, event_target_value(&ev)) />
                    {error("startTime")}
                </div>
                <div>
                    <label for="shift-end" class="block text-sm font-medium text-fg">"End"</label>
                    <input id="shift-end" type="time" class=INPUT_CLASS
                        prop:value=move || value_of(|f| f.end_time.clone())
                        on:input=move |ev| edit(|f, v| f.end_time = v, event_target_value(&ev)) />
                    {error("endTime")}
                </div>
            </div>
            <div class="flex justify-end gap-2">
                <Button variant=ButtonVariant::Secondary attr:type="button" on:click=move |_| on_cancel.call(())>
                    "Cancel"
                </Button>
                <Button attr:type="submit" loading=pending>"Save shift"</Button>
            </div>
        </form>
    }
}
