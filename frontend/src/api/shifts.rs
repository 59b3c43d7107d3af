use super::{
    client::ApiClient,
    types::{ApiError, Shift, ShiftPayload},
};

impl ApiClient {
    pub async fn list_shifts(&self) -> Result<Vec<Shift>, ApiError> {
        self.get_json("/shifts").await
    }

    pub async fn create_shift(&self, payload: &ShiftPayload) -> Result<Shift, ApiError> {
        self.post_json("/shifts", payload).await
    }

    pub async fn update_shift(&self, id: i64, payload: &ShiftPayload) -> Result<Shift, ApiError> {
        self.put_json(&format!("/shifts/{}", id), payload).await
    }

    pub async fn delete_shift(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/shifts/{}", id)).await
    }
}
