use crate::api::{Role, Shift};
use crate::components::common::{Button, ButtonVariant};
use crate::pages::employees::utils::{EmployeeFormState, FieldErrors};
use leptos::{ev::SubmitEvent, *};

const INPUT_CLASS: &str = "mt-1 w-full border border-border rounded-md px-3 py-2 text-sm";

type Getter = fn(&EmployeeFormState) -> String;
type Setter = fn(&mut EmployeeFormState, String);

#[component]
fn TextField(
    form: RwSignal<Option<EmployeeFormState>>,
    errors: RwSignal<FieldErrors>,
    name: &'static str,
    label: &'static str,
    get: Getter,
    set: Setter,
    #[prop(optional)] input_type: Option<&'static str>,
    #[prop(optional)] hint: Option<&'static str>,
) -> impl IntoView {
    let error = move || errors.with(|e| e.get(name).cloned());
    view! {
        <div>
            <label for=name class="block text-sm font-medium text-fg">{label}</label>
            <input
                id=name
                name=name
                type=input_type.unwrap_or("text")
                class=INPUT_CLASS
                prop:value=move || form.with(|f| f.as_ref().map(get).unwrap_or_default())
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    form.update(|f| {
                        if let Some(f) = f {
                            set(f, value);
                        }
                    });
                    errors.update(|e| {
                        e.remove(name);
                    });
                }
            />
            {hint.map(|text| view! { <p class="mt-1 text-xs text-fg-muted">{text}</p> })}
            {move || error().map(|msg| view! { <p class="mt-1 text-xs text-status-error-text">{msg}</p> })}
        </div>
    }
}

#[component]
pub fn EmployeeForm(
    form: RwSignal<Option<EmployeeFormState>>,
    errors: RwSignal<FieldErrors>,
    #[prop(into)] shifts: Signal<Vec<Shift>>,
    #[prop(into)] pending: Signal<bool>,
    on_submit: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let is_create = move || form.with(|f| f.as_ref().map(EmployeeFormState::is_create).unwrap_or(true));
    let role = move || form.with(|f| f.as_ref().map(|f| f.role).unwrap_or(Role::Employee));
    let submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        on_submit.call(());
    };

    view! {
        <form class="bg-surface-elevated shadow rounded-lg p-6 space-y-4" on:submit=submit>
            <h3 class="text-lg font-medium text-fg">
                {move || if is_create() { "New employee" } else { "Edit employee" }}
            </h3>
            <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                <TextField form=form errors=errors name="fullName" label="Full name"
                    get={|f| f.full_name.clone()} set={|f, v| f.full_name = v} />
                <TextField form=form errors=errors name="username" label="Username"
                    get={|f| f.username.clone()} set={|f, v| f.username = v}
                    hint="4-20 letters, digits or underscores" />
                <TextField form=form errors=errors name="email" label="Email" input_type="email"
                    get={|f| f.email.clone()} set={|f, v| f.email = v} />
                <TextField form=form errors=errors name="phone" label="Phone" input_type="tel"
                    get={|f| f.phone.clone()} set={|f, v| f.phone = v}
                    hint="10 digits" />
                <TextField form=form errors=errors name="department" label="Department"
                    get={|f| f.department.clone()} set={|f, v| f.department = v} />
                <TextField form=form errors=errors name="designation" label="Designation"
                    get={|f| f.designation.clone()} set={|f, v| f.designation = v} />
                <TextField form=form errors=errors name="password" label="Password" input_type="password"
                    get={|f| f.password.clone()} set={|f, v| f.password = v}
                    hint="Leave blank to keep the current password when editing" />
                <div>
                    <label for="role" class="block text-sm font-medium text-fg">"Role"</label>
                    <select
                        id="role"
                        class=INPUT_CLASS
                        on:change=move |ev| {
                            if let Some(role) = Role::parse(&event_target_value(&ev)) {
                                form.update(|f| {
                                    if let Some(f) = f {
                                        f.role = role;
                                    }
                                });
                            }
                        }
                    >
                        {Role::ALL
                            .into_iter()
                            .map(|option| view! {
                                <option value=option.as_str() selected=move || role() == option>
                                    {option.label()}
                                </option>
                            })
                            .collect_view()}
                    </select>
                </div>
                <Show when=move || role() == Role::Employee>
                    <div>
                        <label for="shift" class="block text-sm font-medium text-fg">"Shift"</label>
                        <select
                            id="shift"
                            class=INPUT_CLASS
                            on:change=move |ev| {
                                let shift_id = event_target_value(&ev).parse::<i64>().ok();
                                form.update(|f| {
                                    if let Some(f) = f {
                                        f.shift_id = shift_id;
                                    }
                                });
                            }
                        >
                            <option value="">"No shift"</option>
                            {move || shifts
                                .get()
                                .into_iter()
                                .map(|shift| {
                                    let id = shift.id;
                                    let selected = move || form.with(|f| f.as_ref().and_then(|f| f.shift_id) == Some(id));
                                    view! { <option value=id.to_string() selected=selected>{shift.name}</option> }
                                })
                                .collect_view()}
                        </select>
                    </div>
                </Show>
                <label class="inline-flex items-center gap-2 text-sm text-fg">
                    <input
                        type="checkbox"
                        prop:checked=move || form.with(|f| f.as_ref().map(|f| f.active).unwrap_or(true))
                        on:change=move |ev| {
                            let checked = event_target_checked(&ev);
                            form.update(|f| {
                                if let Some(f) = f {
                                    f.active = checked;
                                }
                            });
                        }
                    />
                    "Active"
                </label>
            </div>
            <div class="flex justify-end gap-2">
                <Button variant=ButtonVariant::Secondary attr:type="button" on:click=move |_| on_cancel.call(())>
                    "Cancel"
                </Button>
                <Button attr:type="submit" loading=pending>
                    {move || if is_create() { "Create" } else { "Save changes" }}
                </Button>
            </div>
        </form>
    }
}
