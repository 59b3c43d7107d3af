use chrono::{DateTime, Utc};
use gloo_timers::callback::Interval;
use leptos::*;

pub const TICK_MS: u32 = 1_000;

/// A signal carrying "now", refreshed every second while `active` is true.
///
/// The interval lives inside an effect, so it is only ever created in the browser
/// and is dropped (cancelled) as soon as `active` turns false or the owner is disposed.
pub fn use_ticker(active: Signal<bool>) -> ReadSignal<DateTime<Utc>> {
    let (now, set_now) = create_signal(Utc::now());
    let handle = store_value(None::<Interval>);

    create_effect(move |_| {
        if active.get() {
            set_now.set(Utc::now());
            if handle.with_value(Option::is_none) {
                let interval = Interval::new(TICK_MS, move || set_now.set(Utc::now()));
                handle.set_value(Some(interval));
            }
        } else {
            handle.set_value(None);
        }
    });

    on_cleanup(move || {
        handle.try_update_value(|slot| {
            slot.take();
        });
    });

    now
}
