mod attendance;
mod auth;
pub mod client;
mod employees;
mod leaves;
mod shifts;
pub mod types;
mod work_sessions;

pub use client::*;
pub use types::*;

#[cfg(all(test, not(target_arch = "wasm32")))]
pub mod test_support;
