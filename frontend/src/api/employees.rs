use serde_json::json;

use super::{
    client::ApiClient,
    types::{ApiError, AssignShiftRequest, Employee, EmployeePayload, EmployeeShift},
};

impl ApiClient {
    pub async fn list_employees(&self) -> Result<Vec<Employee>, ApiError> {
        self.get_json("/employees").await
    }

    pub async fn get_employee(&self, id: i64) -> Result<Employee, ApiError> {
        self.get_json(&format!("/employees/{}", id)).await
    }

    pub async fn create_employee(&self, payload: &EmployeePayload) -> Result<Employee, ApiError> {
        self.post_json("/employees", payload).await
    }

    pub async fn update_employee(
        &self,
        id: i64,
        payload: &EmployeePayload,
    ) -> Result<Employee, ApiError> {
        self.put_json(&format!("/employees/{}", id), payload).await
    }

    pub async fn set_employee_active(&self, id: i64, active: bool) -> Result<Employee, ApiError> {
        self.patch_json(&format!("/employees/{}/status", id), &json!({ "active": active }))
            .await
    }

    pub async fn list_employee_shifts(&self) -> Result<Vec<EmployeeShift>, ApiError> {
        self.get_json("/employee-shifts").await
    }

    pub async fn employee_shifts_for(&self, employee_id: i64) -> Result<Vec<EmployeeShift>, ApiError> {
        self.get_json(&format!("/employee-shifts/employee/{}", employee_id))
            .await
    }

    pub async fn assign_shift(&self, request: &AssignShiftRequest) -> Result<EmployeeShift, ApiError> {
        self.post_json("/employee-shifts", request).await
    }

    pub async fn delete_employee_shift(&self, link_id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/employee-shifts/{}", link_id)).await
    }
}
