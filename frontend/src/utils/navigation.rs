use std::{cell::RefCell, rc::Rc};

pub const LOGIN_PATH: &str = "/login";

/// Hard (full page) navigation.
pub trait Navigator {
    fn current_path(&self) -> Option<String>;
    fn go_to(&self, path: &str);
}

#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    #[cfg(target_arch = "wasm32")]
    fn current_path(&self) -> Option<String> {
        web_sys::window()?.location().pathname().ok()
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn current_path(&self) -> Option<String> {
        None
    }

    #[cfg(target_arch = "wasm32")]
    fn go_to(&self, path: &str) {
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_href(path);
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn go_to(&self, path: &str) {
        log::debug!("navigation to {} skipped outside the browser", path);
    }
}

/// Records navigations instead of performing them.
#[derive(Clone, Debug, Default)]
pub struct RecordingNavigator {
    path: Rc<RefCell<Option<String>>>,
    visited: Rc<RefCell<Vec<String>>>,
}

impl RecordingNavigator {
    pub fn at(path: &str) -> Self {
        let navigator = Self::default();
        *navigator.path.borrow_mut() = Some(path.to_string());
        navigator
    }

    pub fn visited(&self) -> Vec<String> {
        self.visited.borrow().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn current_path(&self) -> Option<String> {
        self.path.borrow().clone()
    }

    fn go_to(&self, path: &str) {
        *self.path.borrow_mut() = Some(path.to_string());
        self.visited.borrow_mut().push(path.to_string());
    }
}

/// Navigates with the browser location, skipping the redirect when already there.
pub fn redirect_to(path: &str) {
    redirect_with(&BrowserNavigator, path);
}

pub fn redirect_with(navigator: &dyn Navigator, path: &str) {
    if navigator.current_path().as_deref() == Some(path) {
        return;
    }
    navigator.go_to(path);
}
