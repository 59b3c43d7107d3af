use std::fmt;

use thiserror::Error;

use crate::api::{
    ApiClient, ApiError, AssignShiftRequest, Employee, EmployeePayload, EmployeeShift, Role,
};
use crate::pages::employees::utils::Directory;

pub async fn fetch_directory(api: &ApiClient) -> Result<Directory, ApiError> {
    let employees = api.list_employees().await?;
    let shifts = api.list_shifts().await?;
    let links = api.list_employee_shifts().await?;
    Ok(Directory {
        employees,
        shifts,
        links,
    })
}

/// One server call in a save that spans several endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveStep {
    CreateEmployee,
    DeleteShiftLink(i64),
    UpdateEmployee,
    AssignShift(i64),
}

impl fmt::Display for SaveStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveStep::CreateEmployee => f.write_str("create employee"),
            SaveStep::DeleteShiftLink(id) => write!(f, "remove shift link #{}", id),
            SaveStep::UpdateEmployee => f.write_str("update employee"),
            SaveStep::AssignShift(id) => write!(f, "assign shift #{}", id),
        }
    }
}

fn describe(steps: &[SaveStep]) -> String {
    steps
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// The server has no combined endpoint, so a failure after the first call
/// leaves earlier calls applied. That case gets its own variant.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReassignError {
    #[error("{0}")]
    Failed(ApiError),
    #[error("Saved partially ({}): {failed_step} failed: {error}", describe(.completed))]
    PartiallyApplied {
        completed: Vec<SaveStep>,
        failed_step: SaveStep,
        error: ApiError,
    },
}

impl ReassignError {
    pub fn api_error(&self) -> &ApiError {
        match self {
            ReassignError::Failed(error) => error,
            ReassignError::PartiallyApplied { error, .. } => error,
        }
    }

    pub fn is_partial(&self) -> bool {
        matches!(self, ReassignError::PartiallyApplied { .. })
    }
}

/// Calls needed around the employee update to move them to `target_shift`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShiftPlan {
    pub remove_links: Vec<i64>,
    pub assign: Option<i64>,
}

pub fn plan_shift_change(current: &[EmployeeShift], role: Role, target_shift: Option<i64>) -> ShiftPlan {
    let target = if role == Role::Employee { target_shift } else { None };
    let unchanged = match (current, target) {
        ([], None) => true,
        ([only], Some(shift_id)) => only.shift_id == shift_id,
        _ => false,
    };
    if unchanged {
        return ShiftPlan::default();
    }
    ShiftPlan {
        remove_links: current.iter().map(|link| link.id).collect(),
        assign: target,
    }
}

struct StepLog {
    completed: Vec<SaveStep>,
}

impl StepLog {
    fn new() -> Self {
        Self {
            completed: Vec::new(),
        }
    }

    fn record<T>(&mut self, step: SaveStep, result: Result<T, ApiError>) -> Result<T, ReassignError> {
        match result {
            Ok(value) => {
                self.completed.push(step);
                Ok(value)
            }
            Err(error) if self.completed.is_empty() => Err(ReassignError::Failed(error)),
            Err(error) => {
                log::error!(
                    "employee save stopped at '{}' after {} step(s): {}",
                    step,
                    self.completed.len(),
                    error
                );
                Err(ReassignError::PartiallyApplied {
                    completed: std::mem::take(&mut self.completed),
                    failed_step: step,
                    error,
                })
            }
        }
    }
}

/// Creates the employee, then links the shift when one was chosen.
pub async fn create_employee(
    api: &ApiClient,
    payload: &EmployeePayload,
    shift_id: Option<i64>,
) -> Result<Employee, ReassignError> {
    let mut log = StepLog::new();
    let mut employee = log.record(SaveStep::CreateEmployee, api.create_employee(payload).await)?;
    if let Some(shift_id) = shift_id.filter(|_| payload.role == Role::Employee) {
        let request = AssignShiftRequest {
            employee_id: employee.id,
            shift_id,
        };
        log.record(SaveStep::AssignShift(shift_id), api.assign_shift(&request).await)?;
        employee.shift_id = Some(shift_id);
    }
    Ok(employee)
}

/// Delete old shift links, update the employee, then assign the new shift.
pub async fn update_employee(
    api: &ApiClient,
    id: i64,
    payload: &EmployeePayload,
    plan: &ShiftPlan,
) -> Result<Employee, ReassignError> {
    let mut log = StepLog::new();
    for link_id in &plan.remove_links {
        log.record(
            SaveStep::DeleteShiftLink(*link_id),
            api.delete_employee_shift(*link_id).await,
        )?;
    }
    let mut employee = log.record(SaveStep::UpdateEmployee, api.update_employee(id, payload).await)?;
    if let Some(shift_id) = plan.assign {
        let request = AssignShiftRequest {
            employee_id: id,
            shift_id,
        };
        log.record(SaveStep::AssignShift(shift_id), api.assign_shift(&request).await)?;
        employee.shift_id = Some(shift_id);
    }
    Ok(employee)
}

pub async fn set_active(api: &ApiClient, id: i64, active: bool) -> Result<Employee, ApiError> {
    api.set_employee_active(id, active).await
}
