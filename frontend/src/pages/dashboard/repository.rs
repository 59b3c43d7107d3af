use serde::{Deserialize, Serialize};

use crate::api::{ApiClient, ApiError, Employee, Leave, WorkSession};
use crate::pages::work_sessions::utils::sort_newest_first;

pub const RECENT_SESSION_LIMIT: usize = 5;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Overview {
    pub employees: Vec<Employee>,
    pub leaves: Vec<Leave>,
    pub sessions: Vec<WorkSession>,
}

impl Overview {
    pub fn active_employees(&self) -> usize {
        self.employees.iter().filter(|e| e.active).count()
    }
}

/// Organisation-wide figures. HR does not read work sessions, so they are optional.
pub async fn fetch_overview(api: &ApiClient, include_sessions: bool) -> Result<Overview, ApiError> {
    let employees = api.list_employees().await?;
    let leaves = api.list_leaves().await?;
    let sessions = if include_sessions {
        api.list_work_sessions().await?
    } else {
        Vec::new()
    };
    Ok(Overview {
        employees,
        leaves,
        sessions,
    })
}

pub async fn fetch_my_sessions(api: &ApiClient) -> Result<Vec<WorkSession>, ApiError> {
    let mut sessions = api.my_work_sessions().await?;
    sort_newest_first(&mut sessions);
    Ok(sessions)
}

pub async fn fetch_team_sessions(api: &ApiClient) -> Result<Vec<WorkSession>, ApiError> {
    api.team_work_sessions().await
}
