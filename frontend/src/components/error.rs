use crate::api::ApiError;
use leptos::*;
use serde_json::Value;

/// Flattens validation details into readable lines. Accepts either a list of messages or a
/// `{ field: message }` object.
pub fn detail_lines(details: Option<&Value>) -> Vec<String> {
    let Some(details) = details else {
        return Vec::new();
    };
    let source = details.get("errors").unwrap_or(details);
    match source {
        Value::Array(items) => items
            .iter()
            .filter_map(|item| item.as_str().map(str::to_string))
            .collect(),
        Value::Object(map) => map
            .iter()
            .filter_map(|(field, msg)| msg.as_str().map(|msg| format!("{}: {}", field, msg)))
            .collect(),
        _ => Vec::new(),
    }
}

#[component]
pub fn InlineErrorMessage(
    #[prop(into)] error: Signal<Option<ApiError>>,
    #[prop(optional)] on_dismiss: Option<Callback<()>>,
) -> impl IntoView {
    view! {
        <Show when=move || error.with(Option::is_some) fallback=|| ()>
            <div
                class="bg-status-error-bg border border-status-error-border text-status-error-text px-4 py-3 rounded space-y-1 my-2"
                role="alert"
            >
                <div class="flex justify-between gap-2">
                    <div class="font-bold">{move || error.get().map(|e| e.error).unwrap_or_default()}</div>
                    {on_dismiss.map(|dismiss| view! {
                        <button
                            type="button"
                            aria-label="Dismiss"
                            class="text-sm opacity-75 hover:opacity-100"
                            on:click=move |_| dismiss.call(())
                        >
                            "✕"
                        </button>
                    })}
                </div>
                {move || {
                    let lines = error.with(|e| detail_lines(e.as_ref().and_then(|e| e.details.as_ref())));
                    (!lines.is_empty()).then(|| view! {
                        <ul class="list-disc list-inside text-sm">
                            {lines.into_iter().map(|line| view! { <li>{line}</li> }).collect_view()}
                        </ul>
                    })
                }}
            </div>
        </Show>
    }
}
