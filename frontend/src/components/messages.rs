use leptos::*;

use crate::api::ApiError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageState {
    pub success: Option<String>,
    pub error: Option<String>,
}

impl MessageState {
    pub fn clear(&mut self) {
        self.success = None;
        self.error = None;
    }

    pub fn set_success(&mut self, message: impl Into<String>) {
        self.success = Some(message.into());
        self.error = None;
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
        self.success = None;
    }

    pub fn set_api_error(&mut self, error: &ApiError) {
        self.set_error(error.error.clone());
    }
}

/// Dismissible success/error banner pair.
#[component]
pub fn Messages(messages: RwSignal<MessageState>) -> impl IntoView {
    view! {
        {move || messages.get().success.map(|msg| view! {
            <div class="flex justify-between bg-status-success-bg border border-status-success-border text-status-success-text px-4 py-3 rounded mb-4" role="status">
                <span class="text-sm">{msg}</span>
                <button type="button" aria-label="Dismiss" on:click=move |_| messages.update(MessageState::clear)>"✕"</button>
            </div>
        })}
        {move || messages.get().error.map(|msg| view! {
            <div class="flex justify-between bg-status-error-bg border border-status-error-border text-status-error-text px-4 py-3 rounded mb-4" role="alert">
                <span class="text-sm">{msg}</span>
                <button type="button" aria-label="Dismiss" on:click=move |_| messages.update(MessageState::clear)>"✕"</button>
            </div>
        })}
    }
}


#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn renders_current_message() {
        let html = render_to_string(move || {
            let messages = create_rw_signal(MessageState::default());
            messages.update(|m| m.set_success("Shift saved"));
            view! { <Messages messages=messages /> }
        });
        assert!(html.contains("Shift saved"));
        assert!(!html.contains("role=\"alert\""));
    }
}
