use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::api::{ApiClient, ApiError, Employee, EmployeeShift, Role, Shift, ShiftPayload};
use crate::pages::shifts::utils::{managed_shifts, team_member_ids};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShiftCatalog {
    pub shifts: Vec<Shift>,
    pub managers: Vec<Employee>,
}

pub async fn fetch_catalog(api: &ApiClient) -> Result<ShiftCatalog, ApiError> {
    let shifts = api.list_shifts().await?;
    let managers = api
        .list_employees()
        .await?
        .into_iter()
        .filter(|employee| employee.role == Role::Manager)
        .collect();
    Ok(ShiftCatalog { shifts, managers })
}

pub async fn save_shift(api: &ApiClient, id: Option<i64>, payload: &ShiftPayload) -> Result<Shift, ApiError> {
    match id {
        Some(id) => api.update_shift(id, payload).await,
        None => api.create_shift(payload).await,
    }
}

pub async fn delete_shift(api: &ApiClient, id: i64) -> Result<i64, ApiError> {
    api.delete_shift(id).await.map(|_| id)
}

/// The signed-in manager's shifts and the links onto them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ManagerShifts {
    pub manager_id: i64,
    pub shifts: Vec<Shift>,
    pub links: Vec<EmployeeShift>,
}

impl ManagerShifts {
    pub fn member_ids(&self) -> BTreeSet<i64> {
        team_member_ids(self.manager_id, &self.shifts, &self.links)
    }
}

pub async fn fetch_manager_shifts(api: &ApiClient) -> Result<ManagerShifts, ApiError> {
    let me = api.get_me().await?;
    let shifts = managed_shifts(me.id, &api.list_shifts().await?);
    let shift_ids: BTreeSet<i64> = shifts.iter().map(|s| s.id).collect();
    let links = api
        .list_employee_shifts()
        .await?
        .into_iter()
        .filter(|link| shift_ids.contains(&link.shift_id))
        .collect();
    Ok(ManagerShifts {
        manager_id: me.id,
        shifts,
        links,
    })
}
