mod panel;

pub use panel::{HrPage, HrTab};
