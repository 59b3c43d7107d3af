use crate::api::ProofAttachment;
use crate::components::common::{Button, ButtonVariant};
use crate::pages::leaves::utils::{FieldErrors, LeaveFormState, LEAVE_TYPES};
use leptos::{ev::SubmitEvent, *};

const INPUT_CLASS: &str = "mt-1 w-full border border-border rounded-md px-3 py-2 text-sm";

fn field_error(errors: RwSignal<FieldErrors>, name: &'static str) -> impl IntoView {
    move || {
        errors.with(|e| e.get(name).cloned()).map(|msg| {
            view! { <p class="mt-1 text-xs text-status-error-text">{msg}</p> }
        })
    }
}

#[component]
pub fn LeaveApplyForm(
    form: RwSignal<LeaveFormState>,
    errors: RwSignal<FieldErrors>,
    proof: RwSignal<Option<ProofAttachment>>,
    #[prop(into)] pending: Signal<bool>,
    on_submit: Callback<()>,
    on_pick_proof: Callback<ev::Event>,
) -> impl IntoView {
    let edit = move |apply: fn(&mut LeaveFormState, String), name: &'static str| {
        move |ev: ev::Event| {
            let value = event_target_value(&ev);
            form.update(|f| apply(f, value));
            errors.update(|e| {
                e.remove(name);
            });
        }
    };
    let day_count = move || match form.with(LeaveFormState::day_count) {
        Some(1) => "1 day".to_string(),
        Some(days) => format!("{} days", days),
        None => "-".to_string(),
    };

    view! {
        <form
            class="bg-surface-elevated shadow rounded-lg p-6 space-y-4"
            on:submit=move |ev: SubmitEvent| {
                ev.prevent_default();
                on_submit.call(());
            }
        >
            <h3 class="text-lg font-medium text-fg">"Apply for leave"</h3>
            <div class="grid grid-cols-1 md:grid-cols-4 gap-4">
                <div>
                    <label for="leave-type" class="block text-sm font-medium text-fg">"Type"</label>
                    <select id="leave-type" class=INPUT_CLASS on:change=edit(|f, v| f.leave_type = v, "leaveType")>
                        {LEAVE_TYPES
                            .iter()
                            .map(|&(value, label)| {
                                view! {
                                    <option value=value selected=move || form.with(|f| f.leave_type == value)>
                                        {label}
                                    </option>
                                }
                            })
                            .collect_view()}
                    </select>
                    {field_error(errors, "leaveType")}
                </div>
                <div>
                    <label for="leave-start" class="block text-sm font-medium text-fg">"From"</label>
                    <input id="leave-start" type="date" class=INPUT_CLASS
                        prop:value=move || form.with(|f| f.start_date.clone())
                        on:input=edit(|f, v| f.start_date = v, "startDate") />
                    {field_error(errors, "startDate")}
                </div>
                <div>
                    <label for="leave-end" class="block text-sm font-medium text-fg">"To"</label>
                    <input id="leave-end" type="date" class=INPUT_CLASS
                        prop:value=move || form.with(|f| f.end_date.clone())
                        on:input=edit(|f, v| f.end_date = v, "endDate") />
                    {field_error(errors, "endDate")}
                </div>
                <div>
                    <span class="block text-sm font-medium text-fg">"Days"</span>
                    <p id="leave-days" class="mt-3 text-sm text-fg">{day_count}</p>
                </div>
            </div>
            <div>
                <label for="leave-description" class="block text-sm font-medium text-fg">"Description"</label>
                <textarea id="leave-description" rows="3" class=INPUT_CLASS
                    prop:value=move || form.with(|f| f.description.clone())
                    on:input=edit(|f, v| f.description = v, "description")></textarea>
                {field_error(errors, "description")}
            </div>
            <div>
                <label for="leave-proof" class="block text-sm font-medium text-fg">"Proof (optional)"</label>
                <input id="leave-proof" type="file" accept="image/*,application/pdf" class="mt-1 text-sm"
                    on:change=move |ev| on_pick_proof.call(ev) />
                <p class="mt-1 text-xs text-fg-muted">
                    {move || proof.with(|p| match p {
                        Some(file) => format!("Attached {}", file.file_name),
                        None => "Image or PDF, up to 5 MB".to_string(),
                    })}
                </p>
            </div>
            <div class="flex justify-end">
                <Button variant=ButtonVariant::Primary attr:type="submit" loading=pending>
                    "Submit request"
                </Button>
            </div>
        </form>
    }
}
