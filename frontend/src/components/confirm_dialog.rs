use crate::components::common::{Button, ButtonVariant};
use leptos::{ev::KeyboardEvent, *};

/// Modal yes/no prompt. Escape and the backdrop both cancel.
#[component]
pub fn ConfirmDialog(
    #[prop(into)] is_open: MaybeSignal<bool>,
    title: &'static str,
    #[prop(into)] message: MaybeSignal<String>,
    on_confirm: Callback<()>,
    on_cancel: Callback<()>,
    #[prop(default = "Confirm")] confirm_label: &'static str,
    #[prop(optional, into)] pending: MaybeSignal<bool>,
    #[prop(optional)] destructive: bool,
) -> impl IntoView {
    let message = Signal::derive(move || message.get());
    let confirm_variant = if destructive {
        ButtonVariant::Danger
    } else {
        ButtonVariant::Primary
    };
    let on_key = move |ev: KeyboardEvent| {
        if ev.key() == "Escape" {
            ev.prevent_default();
            on_cancel.call(());
        }
    };

    view! {
        <Show when=move || is_open.get()>
            <div class="fixed inset-0 z-[70] flex items-center justify-center p-4">
                <div class="absolute inset-0 bg-overlay-backdrop" on:click=move |_| on_cancel.call(())></div>
                <div
                    class="relative w-full max-w-md rounded-lg bg-surface-elevated shadow-xl border border-border p-6 space-y-4"
                    role="alertdialog"
                    aria-modal="true"
                    aria-labelledby="confirm-title"
                    tabindex="-1"
                    on:keydown=on_key
                >
                    <h2 id="confirm-title" class="text-lg font-semibold text-fg">{title}</h2>
                    <p class="text-sm text-fg-muted">{move || message.get()}</p>
                    <div class="flex justify-end gap-2">
                        <Button variant=ButtonVariant::Secondary on:click=move |_| on_cancel.call(())>
                            "Cancel"
                        </Button>
                        <Button variant=confirm_variant loading=pending on:click=move |_| on_confirm.call(())>
                            {confirm_label}
                        </Button>
                    </div>
                </div>
            </div>
        </Show>
    }
}
