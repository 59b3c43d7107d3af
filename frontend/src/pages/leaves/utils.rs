use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::{
    api::{ApplyLeaveRequest, Leave, LeaveStatus, Role},
    components::{
        common::Tone,
        data_table::{Column, TableRowData},
    },
    pages::attendance::utils::parse_date_input,
};

pub const DESCRIPTION_MAX: usize = 500;

pub const LEAVE_TYPES: [(&str, &str); 5] = [
    ("CASUAL", "Casual"),
    ("SICK", "Sick"),
    ("EARNED", "Earned"),
    ("MATERNITY", "Maternity"),
    ("UNPAID", "Unpaid"),
];

pub type FieldErrors = BTreeMap<&'static str, String>;

/// Whose leave requests a page lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaveScope {
    All,
    Team,
    Mine,
}

impl LeaveScope {
    pub fn for_role(role: Role) -> Self {
        match role {
            Role::Admin | Role::Hr => LeaveScope::All,
            Role::Manager => LeaveScope::Team,
            Role::Employee => LeaveScope::Mine,
        }
    }

    pub fn can_review(&self) -> bool {
        !matches!(self, LeaveScope::Mine)
    }
}

pub fn leave_type_label(code: &str) -> String {
    LEAVE_TYPES
        .iter()
        .find(|(value, _)| value.eq_ignore_ascii_case(code))
        .map(|(_, label)| label.to_string())
        .unwrap_or_else(|| code.to_string())
}

/// Calendar days from `start` to `end`, both included.
pub fn inclusive_days(start: NaiveDate, end: NaiveDate) -> Option<i64> {
    (end >= start).then(|| (end - start).num_days() + 1)
}

pub fn leave_days(leave: &Leave) -> i64 {
    leave
        .days
        .or_else(|| inclusive_days(leave.start_date, leave.end_date))
        .unwrap_or(0)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaveFormState {
    pub leave_type: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
}

impl Default for LeaveFormState {
    fn default() -> Self {
        Self {
            leave_type: LEAVE_TYPES[0].0.to_string(),
            start_date: String::new(),
            end_date: String::new(),
            description: String::new(),
        }
    }
}

impl LeaveFormState {
    /// Day count shown next to the date inputs while the user types.
    pub fn day_count(&self) -> Option<i64> {
        let start = parse_date_input(&self.start_date, "").ok().flatten()?;
        let end = parse_date_input(&self.end_date, "").ok().flatten()?;
        inclusive_days(start, end)
    }

    pub fn validate(&self) -> Result<ApplyLeaveRequest, FieldErrors> {
        let mut errors = FieldErrors::new();
        if !LEAVE_TYPES.iter().any(|(value, _)| *value == self.leave_type) {
            errors.insert("leaveType", "Choose a leave type".into());
        }
        let start = match parse_date_input(&self.start_date, "Start date must be YYYY-MM-DD") {
            Ok(Some(date)) => Some(date),
            Ok(None) => {
                errors.insert("startDate", "Start date is required".into());
                None
            }
            Err(msg) => {
                errors.insert("startDate", msg);
                None
            }
        };
        let end = match parse_date_input(&self.end_date, "End date must be YYYY-MM-DD") {
            Ok(Some(date)) => Some(date),
            Ok(None) => {
                errors.insert("endDate", "End date is required".into());
                None
            }
            Err(msg) => {
                errors.insert("endDate", msg);
                None
            }
        };
        let description = self.description.trim();
        if description.is_empty() {
            errors.insert("description", "Tell us why you need the leave".into());
        } else if description.chars().count() > DESCRIPTION_MAX {
            errors.insert(
                "description",
                format!("Keep the description under {} characters", DESCRIPTION_MAX),
            );
        }

        let days = match (start, end) {
            (Some(start), Some(end)) => match inclusive_days(start, end) {
                Some(days) => Some(days),
                None => {
                    errors.insert("endDate", "End date cannot be before the start date".into());
                    None
                }
            },
            _ => None,
        };

        match (start, end, days) {
            (Some(start_date), Some(end_date), Some(days)) if errors.is_empty() => Ok(ApplyLeaveRequest {
                leave_type: self.leave_type.clone(),
                start_date,
                end_date,
                days,
                description: description.to_string(),
            }),
            _ => Err(errors),
        }
    }
}

pub fn status_tone(status: LeaveStatus) -> Tone {
    match status {
        LeaveStatus::Pending => Tone::Warning,
        LeaveStatus::Approved => Tone::Success,
        LeaveStatus::Rejected => Tone::Danger,
    }
}

/// Review buttons for a request; only the status it already holds is disabled.
pub fn status_actions(current: LeaveStatus) -> Vec<(LeaveStatus, bool)> {
    LeaveStatus::ALL
        .iter()
        .map(|status| (*status, *status != current))
        .collect()
}

pub fn action_label(status: LeaveStatus) -> &'static str {
    match status {
        LeaveStatus::Pending => "Mark pending",
        LeaveStatus::Approved => "Approve",
        LeaveStatus::Rejected => "Reject",
    }
}

pub fn filter_by_status(leaves: &[Leave], status: Option<LeaveStatus>) -> Vec<Leave> {
    leaves
        .iter()
        .filter(|leave| status.map_or(true, |s| leave.status == s))
        .cloned()
        .collect()
}

pub fn count_by_status(leaves: &[Leave], status: LeaveStatus) -> usize {
    leaves.iter().filter(|leave| leave.status == status).count()
}

/// Latest start date first; ties fall back to the newer id.
pub fn sort_newest_first(leaves: &mut [Leave]) {
    leaves.sort_by(|a, b| b.start_date.cmp(&a.start_date).then(b.id.cmp(&a.id)));
}

pub fn leave_columns(include_employee: bool) -> Vec<Column> {
    let mut columns = Vec::with_capacity(7);
    if include_employee {
        columns.push(Column::new("employee", "Employee"));
    }
    columns.extend([
        Column::new("type", "Type"),
        Column::new("from", "From"),
        Column::new("to", "To"),
        Column::new("days", "Days"),
        Column::new("description", "Description"),
        Column::new("status", "Status"),
    ]);
    columns
}

pub fn leave_rows(leaves: &[Leave], include_employee: bool) -> Vec<TableRowData> {
    leaves
        .iter()
        .map(|leave| {
            let mut cells = Vec::with_capacity(7);
            if include_employee {
                cells.push(
                    leave
                        .employee_name
                        .clone()
                        .unwrap_or_else(|| format!("Employee #{}", leave.employee_id)),
                );
            }
            cells.push(leave_type_label(&leave.leave_type));
            cells.push(leave.start_date.format("%Y-%m-%d").to_string());
            cells.push(leave.end_date.format("%Y-%m-%d").to_string());
            cells.push(leave_days(leave).to_string());
            cells.push(leave.description.clone().unwrap_or_default());
            cells.push(leave.status.label().to_string());
            TableRowData::new(leave.id, cells)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::leave;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 2, d).unwrap()
    }

    fn filled_form() -> LeaveFormState {
        LeaveFormState {
            leave_type: "SICK".into(),
            start_date: "2025-02-03".into(),
            end_date: "2025-02-05".into(),
            description: "  Fever  ".into(),
        }
    }

    #[test]
    fn day_count_includes_both_ends() {
        assert_eq!(inclusive_days(date(3), date(3)), Some(1));
        assert_eq!(inclusive_days(date(3), date(5)), Some(3));
        assert_eq!(inclusive_days(date(5), date(3)), None);
        assert_eq!(filled_form().day_count(), Some(3));
        assert_eq!(LeaveFormState::default().day_count(), None);
    }

    #[test]
    fn valid_form_builds_request() {
        let request = filled_form().validate().unwrap();
        assert_eq!(request.days, 3);
        assert_eq!(request.description, "Fever");
        assert_eq!(request.start_date, date(3));
    }

    #[test]
    fn reversed_dates_and_blank_fields_are_rejected() {
        let mut form = filled_form();
        form.end_date = "2025-02-01".into();
        form.description = " ".into();
        let errors = form.validate().unwrap_err();
        assert_eq!(errors["endDate"], "End date cannot be before the start date");
        assert!(errors.contains_key("description"));

        let errors = LeaveFormState::default().validate().unwrap_err();
        assert_eq!(errors["startDate"], "Start date is required");
        assert_eq!(errors["endDate"], "End date is required");
    }

    #[test]
    fn only_the_current_status_is_disabled() {
        let actions = status_actions(LeaveStatus::Rejected);
        assert_eq!(
            actions,
            vec![
                (LeaveStatus::Pending, true),
                (LeaveStatus::Approved, true),
                (LeaveStatus::Rejected, false),
            ]
        );
    }

    #[test]
    fn rows_fall_back_to_derived_days_and_type_label() {
        let mut custom = leave(2, LeaveStatus::Approved);
        custom.leave_type = "STUDY".into();
        custom.days = Some(4);
        let rows = leave_rows(&[leave(1, LeaveStatus::Pending), custom], true);
        assert_eq!(
            rows[0].cells,
            vec!["Priya Nair", "Sick", "2025-02-03", "2025-02-04", "2", "Flu", "Pending"]
        );
        assert_eq!(rows[1].cells[1], "STUDY");
        assert_eq!(rows[1].cells[4], "4");
        assert_eq!(leave_rows(&[leave(1, LeaveStatus::Pending)], false)[0].cells.len(), 6);
    }

    #[test]
    fn sorting_and_filtering() {
        let mut early = leave(1, LeaveStatus::Pending);
        early.start_date = date(1);
        let mut leaves = vec![early, leave(2, LeaveStatus::Approved), leave(3, LeaveStatus::Pending)];
        sort_newest_first(&mut leaves);
        assert_eq!(leaves.iter().map(|l| l.id).collect::<Vec<_>>(), vec![3, 2, 1]);
        assert_eq!(filter_by_status(&leaves, Some(LeaveStatus::Pending)).len(), 2);
        assert_eq!(filter_by_status(&leaves, None).len(), 3);
        assert_eq!(count_by_status(&leaves, LeaveStatus::Approved), 1);
    }
}
