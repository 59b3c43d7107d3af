use serde_json::json;

use super::{
    client::ApiClient,
    types::{ApiError, BreakRecord, WorkSession},
};

impl ApiClient {
    pub async fn list_work_sessions(&self) -> Result<Vec<WorkSession>, ApiError> {
        self.get_json("/work-sessions").await
    }

    pub async fn my_work_sessions(&self) -> Result<Vec<WorkSession>, ApiError> {
        self.get_json("/work-sessions/me").await
    }

    /// Sessions of the staff assigned to the calling manager's shifts.
    pub async fn team_work_sessions(&self) -> Result<Vec<WorkSession>, ApiError> {
        self.get_json("/work-sessions/team").await
    }

    /// The caller's open session; the API answers 404 (or an empty body) when there is none.
    pub async fn current_work_session(&self) -> Result<Option<WorkSession>, ApiError> {
        match self.get_json::<Option<WorkSession>>("/work-sessions/active").await {
            Ok(session) => Ok(session),
            Err(err) if err.status == Some(404) => Ok(None),
            Err(err) if err.code == "UNKNOWN" => {
                log::debug!("treating unreadable active session as none: {}", err);
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    pub async fn clock_in(&self) -> Result<WorkSession, ApiError> {
        self.post_json("/work-sessions/clock-in", &json!({})).await
    }

    pub async fn clock_out(&self) -> Result<WorkSession, ApiError> {
        self.post_json("/work-sessions/clock-out", &json!({})).await
    }

    pub async fn start_break(&self) -> Result<BreakRecord, ApiError> {
        self.post_json("/breaks/start", &json!({})).await
    }

    pub async fn end_break(&self) -> Result<BreakRecord, ApiError> {
        self.post_json("/breaks/end", &json!({})).await
    }
}
