pub mod overview;
pub mod recent_sessions;
pub mod session_card;
pub mod team_status;

pub use overview::OverviewSection;
pub use recent_sessions::RecentSessions;
pub use session_card::CurrentSessionCard;
pub use team_status::TeamStatusSection;
