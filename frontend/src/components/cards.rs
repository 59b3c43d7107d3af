use leptos::*;

#[component]
pub fn StatCard(
    #[prop(into)] label: String,
    #[prop(into)] value: Signal<String>,
    #[prop(optional, into)] hint: Option<String>,
) -> impl IntoView {
    view! {
        <div class="bg-surface-elevated overflow-hidden shadow rounded-lg px-4 py-5 sm:p-6">
            <dt class="text-sm font-medium text-fg-muted truncate">{label}</dt>
            <dd class="mt-1 text-3xl font-semibold text-fg">{move || value.get()}</dd>
            {hint.map(|hint| view! { <p class="mt-1 text-xs text-fg-muted">{hint}</p> })}
        </div>
    }
}
