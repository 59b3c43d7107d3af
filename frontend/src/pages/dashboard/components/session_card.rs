use crate::components::{
    common::{Badge, Button, ButtonVariant, Tone},
    layout::LoadingSpinner,
    messages::Messages,
};
use crate::pages::dashboard::view_model::use_session_card_view_model;
use crate::state::work_session::ClockEvent;
use crate::utils::{
    duration::{current_break_elapsed, format_duration, session_totals, DurationStyle, LiveStatus},
    time::{display_time_zone, format_optional_clock},
    timer::use_ticker,
};
use leptos::*;

const EVENTS: [ClockEvent; 4] = [
    ClockEvent::ClockIn,
    ClockEvent::StartBreak,
    ClockEvent::EndBreak,
    ClockEvent::ClockOut,
];

pub fn status_tone(status: LiveStatus) -> Tone {
    match status {
        LiveStatus::Working => Tone::Success,
        LiveStatus::OnBreak => Tone::Warning,
        LiveStatus::Completed => Tone::Info,
        LiveStatus::Inactive => Tone::Neutral,
    }
}

fn event_variant(event: ClockEvent) -> ButtonVariant {
    match event {
        ClockEvent::ClockIn => ButtonVariant::Success,
        ClockEvent::ClockOut => ButtonVariant::Danger,
        ClockEvent::StartBreak | ClockEvent::EndBreak => ButtonVariant::Secondary,
    }
}

/// The signed-in user's open session with live counters and clock/break controls.
#[component]
pub fn CurrentSessionCard() -> impl IntoView {
    let vm = use_session_card_view_model();
    let (state, _) = vm.state;
    let tz = display_time_zone();

    let status = create_memo(move |_| state.with(|s| s.status()));
    let live = Signal::derive(move || status.get().is_live());
    let on_break = Signal::derive(move || status.get() == LiveStatus::OnBreak);
    let now = use_ticker(live);
    let break_now = use_ticker(on_break);

    let totals = move || {
        state.with(|s| {
            s.current
                .as_ref()
                .map(|session| session_totals(session, now.get()))
                .unwrap_or_default()
        })
    };
    let break_elapsed = move || {
        state.with(|s| {
            s.current
                .as_ref()
                .and_then(|session| current_break_elapsed(session, break_now.get()))
        })
    };
    let clock_in = move || {
        state.with(|s| format_optional_clock(s.current.as_ref().and_then(|c| c.clock_in_time), tz))
    };
    let clock_out = move || {
        state.with(|s| s.current.as_ref().and_then(|c| c.clock_out_time))
            .map(|at| format_optional_clock(Some(at), tz))
    };
    let busy = Signal::derive(move || vm.clock_action.pending().get() || state.with(|s| s.loading));

    view! {
        <div class="bg-surface-elevated shadow rounded-lg p-6 space-y-4">
            <div class="flex items-center justify-between">
                <h3 class="text-base font-semibold text-fg">"Current Session"</h3>
                <Badge
                    label=Signal::derive(move || status.get().label().to_string())
                    tone=Signal::derive(move || status_tone(status.get()))
                />
            </div>
            <Messages messages=vm.messages />
            <Show
                when=move || status.get() != LiveStatus::Inactive
                fallback=|| view! { <p class="text-sm text-fg-muted">"You are not clocked in."</p> }
            >
                <dl class="grid grid-cols-2 gap-4 text-sm">
                    <div>
                        <dt class="text-fg-muted">"Clocked in"</dt>
                        <dd class="font-medium text-fg">{clock_in}</dd>
                    </div>
                    {move || clock_out().map(|at| view! {
                        <div>
                            <dt class="text-fg-muted">"Clocked out"</dt>
                            <dd class="font-medium text-fg">{at}</dd>
                        </div>
                    })}
                    <div>
                        <dt class="text-fg-muted">"Working"</dt>
                        <dd class="font-mono text-2xl text-fg">
                            {move || format_duration(totals().working, DurationStyle::Clock)}
                        </dd>
                    </div>
                    <div>
                        <dt class="text-fg-muted">"Breaks"</dt>
                        <dd class="font-mono text-2xl text-fg">
                            {move || format_duration(totals().break_total, DurationStyle::Clock)}
                        </dd>
                    </div>
                </dl>
                {move || break_elapsed().map(|elapsed| view! {
                    <p class="text-sm text-status-warning-text">
                        "On break for " {format_duration(elapsed, DurationStyle::Clock)}
                    </p>
                })}
            </Show>
            <div class="flex flex-wrap gap-2">
                <Show when=move || busy.get()>
                    <LoadingSpinner />
                </Show>
                {EVENTS
                    .into_iter()
                    .map(|event| {
                        view! {
                            <Show when=move || event.allowed_from(status.get())>
                                <Button
                                    variant=event_variant(event)
                                    disabled=busy
                                    on:click=move |_| vm.dispatch(event)
                                >
                                    {event.label()}
                                </Button>
                            </Show>
                        }
                    })
                    .collect_view()}
            </div>
        </div>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::state::work_session::WorkSessionState;
    use crate::test_support::helpers::{instant, open_session};
    use crate::test_support::ssr::render_to_string;
    use crate::api::BreakRecord;

    #[test]
    fn on_break_session_offers_end_break_and_clock_out() {
        let html = render_to_string(|| {
            let mut session = open_session(1, instant(3, 30, 0));
            session.breaks.push(BreakRecord {
                id: Some(3),
                start_time: Some(instant(6, 0, 0)),
                end_time: None,
            });
            provide_context(create_signal(WorkSessionState {
                current: Some(session),
                loading: false,
            }));
            view! { <CurrentSessionCard /> }
        });
        assert!(html.contains("On Break"));
        assert!(html.contains("End Break"));
        assert!(html.contains("Clock Out"));
        assert!(!html.contains("Start Break"));
        assert!(!html.contains("Clock In<"));
        assert!(html.contains("On break for "));
    }

    #[test]
    fn idle_card_offers_clock_in_only() {
        let html = render_to_string(|| view! { <CurrentSessionCard /> });
        assert!(html.contains("You are not clocked in."));
        assert!(html.contains("Clock In"));
        assert!(!html.contains("Clock Out"));
    }

    #[test]
    fn tones_follow_status() {
        assert_eq!(status_tone(LiveStatus::Working), Tone::Success);
        assert_eq!(status_tone(LiveStatus::OnBreak), Tone::Warning);
        assert_eq!(status_tone(LiveStatus::Inactive), Tone::Neutral);
    }
}
