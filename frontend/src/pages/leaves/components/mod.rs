pub mod apply_form;
pub mod review_table;

pub use apply_form::LeaveApplyForm;
pub use review_table::LeaveTable;
