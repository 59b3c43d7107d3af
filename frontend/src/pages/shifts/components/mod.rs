pub mod form;
pub mod staff;

pub use form::ShiftForm;
pub use staff::ShiftStaffList;
