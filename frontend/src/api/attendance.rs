use chrono::NaiveDate;
use reqwest::Method;

use super::{
    client::ApiClient,
    types::{ApiError, AttendanceRecord, MarkAttendanceRequest},
};

impl ApiClient {
    /// All attendance, optionally limited to an inclusive date range.
    pub async fn list_attendance(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<AttendanceRecord>, ApiError> {
        let path = "/attendance";
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(from) = from {
            query.push(("from", from.format("%Y-%m-%d").to_string()));
        }
        if let Some(to) = to {
            query.push(("to", to.format("%Y-%m-%d").to_string()));
        }
        let builder = self.request(Method::GET, path).await.query(&query);
        self.send_json(path, builder).await
    }

    pub async fn my_attendance(&self) -> Result<Vec<AttendanceRecord>, ApiError> {
        self.get_json("/attendance/me").await
    }

    pub async fn mark_attendance(
        &self,
        request: &MarkAttendanceRequest,
    ) -> Result<AttendanceRecord, ApiError> {
        self.post_json("/attendance/mark", request).await
    }
}
