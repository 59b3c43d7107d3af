use crate::api::{ApiClient, ApiError, ApplyLeaveRequest, Leave, LeaveStatus, ProofAttachment};
use crate::pages::leaves::utils::{sort_newest_first, LeaveScope};
use crate::pages::shifts::repository::fetch_manager_shifts;

pub async fn fetch_leaves(api: &ApiClient, scope: LeaveScope) -> Result<Vec<Leave>, ApiError> {
    let mut leaves = match scope {
        LeaveScope::Mine => api.my_leaves().await?,
        LeaveScope::All => api.list_leaves().await?,
        LeaveScope::Team => {
            let members = fetch_manager_shifts(api).await?.member_ids();
            api.list_leaves()
                .await?
                .into_iter()
                .filter(|leave| members.contains(&leave.employee_id))
                .collect()
        }
    };
    sort_newest_first(&mut leaves);
    Ok(leaves)
}

pub async fn apply_leave(
    api: &ApiClient,
    request: &ApplyLeaveRequest,
    proof: Option<&ProofAttachment>,
) -> Result<Leave, ApiError> {
    api.apply_leave(request, proof).await
}

pub async fn set_status(api: &ApiClient, id: i64, status: LeaveStatus) -> Result<Leave, ApiError> {
    api.update_leave_status(id, status).await
}

/// Replaces the stored copy of `updated`, keeping list order.
pub fn replace_leave(leaves: &mut [Leave], updated: &Leave) -> bool {
    match leaves.iter_mut().find(|leave| leave.id == updated.id) {
        Some(slot) => {
            *slot = updated.clone();
            true
        }
        None => false,
    }
}
