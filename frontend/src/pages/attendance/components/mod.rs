pub mod days;
pub mod mark_form;

pub use days::ShiftDaySummary;
pub use mark_form::MarkAttendanceForm;
