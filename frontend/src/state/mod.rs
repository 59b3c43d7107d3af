pub mod auth;
pub mod session;
pub mod work_session;
