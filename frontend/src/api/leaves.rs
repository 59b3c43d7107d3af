use reqwest::{
    multipart::{Form, Part},
    Method,
};
use serde_json::json;

use super::{
    client::ApiClient,
    types::{ApiError, ApplyLeaveRequest, Leave, LeaveStatus, ProofAttachment},
};

fn leave_form(
    request: &ApplyLeaveRequest,
    proof: Option<&ProofAttachment>,
) -> Result<Form, ApiError> {
    let mut form = Form::new()
        .text("leaveType", request.leave_type.clone())
        .text("startDate", request.start_date.format("%Y-%m-%d").to_string())
        .text("endDate", request.end_date.format("%Y-%m-%d").to_string())
        .text("days", request.days.to_string())
        .text("description", request.description.clone());
    if let Some(proof) = proof {
        let part = Part::bytes(proof.bytes.clone())
            .file_name(proof.file_name.clone())
            .mime_str(&proof.mime_type)
            .map_err(|e| ApiError::validation(format!("Unsupported file type: {}", e)))?;
        form = form.part("proofImage", part);
    }
    Ok(form)
}

impl ApiClient {
    pub async fn list_leaves(&self) -> Result<Vec<Leave>, ApiError> {
        self.get_json("/leaves").await
    }

    pub async fn my_leaves(&self) -> Result<Vec<Leave>, ApiError> {
        self.get_json("/leaves/me").await
    }

    /// Sent as multipart so the optional proof image travels with the form fields.
    pub async fn apply_leave(
        &self,
        request: &ApplyLeaveRequest,
        proof: Option<&ProofAttachment>,
    ) -> Result<Leave, ApiError> {
        let path = "/leaves";
        let form = leave_form(request, proof)?;
        let builder = self.request(Method::POST, path).await.multipart(form);
        self.send_json(path, builder).await
    }

    pub async fn update_leave_status(&self, id: i64, status: LeaveStatus) -> Result<Leave, ApiError> {
        self.put_json(
            &format!("/leaves/{}/status", id),
            &json!({ "status": status.as_str() }),
        )
        .await
    }
}
