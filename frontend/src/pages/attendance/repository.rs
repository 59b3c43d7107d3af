use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::api::{ApiClient, ApiError, AttendanceRecord, MarkAttendanceRequest};
use crate::pages::attendance::utils::{filter_to_members, AttendanceScope};
use crate::pages::shifts::repository::fetch_manager_shifts;

/// Someone attendance can be marked for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttendanceData {
    pub records: Vec<AttendanceRecord>,
    pub roster: Vec<RosterEntry>,
}

pub async fn fetch_attendance(
    api: &ApiClient,
    scope: AttendanceScope,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Result<AttendanceData, ApiError> {
    match scope {
        AttendanceScope::Mine => {
            let records = api
                .my_attendance()
                .await?
                .into_iter()
                .filter(|r| from.map_or(true, |f| r.date >= f) && to.map_or(true, |t| r.date <= t))
                .collect();
            Ok(AttendanceData {
                records,
                roster: Vec::new(),
            })
        }
        AttendanceScope::All => {
            let records = api.list_attendance(from, to).await?;
            let mut roster: Vec<RosterEntry> = api
                .list_employees()
                .await?
                .into_iter()
                .filter(|e| e.active)
                .map(|e| RosterEntry {
                    id: e.id,
                    name: e.full_name,
                })
                .collect();
            roster.sort_by(|a, b| a.name.cmp(&b.name));
            Ok(AttendanceData { records, roster })
        }
        AttendanceScope::Team => {
            let team = fetch_manager_shifts(api).await?;
            let members = team.member_ids();
            let records = filter_to_members(api.list_attendance(from, to).await?, &members);
            let mut roster: Vec<RosterEntry> = team
                .links
                .iter()
                .map(|link| RosterEntry {
                    id: link.employee_id,
                    name: link
                        .employee_name
                        .clone()
                        .unwrap_or_else(|| format!("Employee #{}", link.employee_id)),
                })
                .collect();
            roster.sort_by(|a, b| a.name.cmp(&b.name));
            roster.dedup_by_key(|entry| entry.id);
            Ok(AttendanceData { records, roster })
        }
    }
}

pub async fn mark_attendance(
    api: &ApiClient,
    request: &MarkAttendanceRequest,
) -> Result<AttendanceRecord, ApiError> {
    api.mark_attendance(request).await
}
