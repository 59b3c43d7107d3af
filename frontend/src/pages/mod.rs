pub mod attendance;
pub mod dashboard;
pub mod employees;
pub mod hr;
pub mod leaves;
pub mod login;
pub mod profile;
pub mod shifts;
pub mod work_sessions;

pub use attendance::AttendancePage;
pub use dashboard::{AdminDashboardPage, EmployeeDashboardPage, ManagerDashboardPage};
pub use employees::EmployeesPage;
pub use hr::HrPage;
pub use leaves::LeavesPage;
pub use login::LoginPage;
pub use profile::ProfilePage;
pub use shifts::{ManagerShiftsPage, ShiftsPage};
pub use work_sessions::WorkSessionsPage;
