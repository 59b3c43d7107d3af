pub mod repository;

mod panel;

pub use panel::ProfilePage;
