pub mod api;
pub mod components;
pub mod config;
pub mod pages;
pub mod router;
pub mod state;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_support;

/// Browser entry point: logging, runtime config, then the router.
pub fn start_app() {
    console_error_panic_hook::set_once();
    let level = if cfg!(debug_assertions) {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    if console_log::init_with_level(level).is_err() {
        web_sys::console::warn_1(&"logger already initialised".into());
    }
    log::info!("starting EMS frontend");

    leptos::spawn_local(async {
        config::init().await;
        log::debug!("runtime config initialised");
    });

    router::mount_app();
}
