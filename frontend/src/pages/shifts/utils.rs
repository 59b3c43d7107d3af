use std::collections::BTreeSet;

use chrono::{Duration, NaiveTime};

use crate::{
    api::{parse_time_of_day, Employee, EmployeeShift, Shift, ShiftPayload},
    components::data_table::{Column, TableRowData},
    pages::employees::utils::FieldErrors,
    utils::{
        duration::{format_duration, DurationStyle},
        time::format_time_of_day,
    },
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftFormState {
    pub id: Option<i64>,
    pub name: String,
    pub start_time: String,
    pub end_time: String,
    pub manager_id: Option<i64>,
}

impl Default for ShiftFormState {
    fn default() -> Self {
        Self {
            id: None,
            name: String::new(),
            start_time: "09:00".into(),
            end_time: "18:00".into(),
            manager_id: None,
        }
    }
}

impl ShiftFormState {
    pub fn from_shift(shift: &Shift) -> Self {
        Self {
            id: Some(shift.id),
            name: shift.name.clone(),
            start_time: shift.start_time.format("%H:%M").to_string(),
            end_time: shift.end_time.format("%H:%M").to_string(),
            manager_id: shift.manager_id,
        }
    }

    pub fn validate(&self) -> Result<ShiftPayload, FieldErrors> {
        let mut errors = FieldErrors::new();
        let name = self.name.trim();
        if name.is_empty() {
            errors.insert("name", "Shift name is required".into());
        }
        let start = parse_time_of_day(&self.start_time);
        let end = parse_time_of_day(&self.end_time);
        if start.is_none() {
            errors.insert("startTime", "Enter a start time".into());
        }
        if end.is_none() {
            errors.insert("endTime", "Enter an end time".into());
        }
        if start.is_some() && start == end {
            errors.insert("endTime", "End time must differ from start time".into());
        }
        match (start, end) {
            (Some(start_time), Some(end_time)) if errors.is_empty() => Ok(ShiftPayload {
                name: name.to_string(),
                start_time,
                end_time,
                manager_id: self.manager_id,
            }),
            _ => Err(errors),
        }
    }
}

/// Shift length; an end before the start runs past midnight.
pub fn shift_length(start: NaiveTime, end: NaiveTime) -> Duration {
    let span = end - start;
    if span < Duration::zero() {
        span + Duration::days(1)
    } else {
        span
    }
}

pub const SHIFT_COLUMNS: [Column; 5] = [
    Column::new("name", "Name"),
    Column::new("start", "Start"),
    Column::new("end", "End"),
    Column::new("length", "Length"),
    Column::new("manager", "Manager"),
];

pub fn manager_label(shift: &Shift, managers: &[Employee]) -> String {
    shift
        .manager_id
        .and_then(|id| managers.iter().find(|m| m.id == id))
        .map(|m| m.full_name.clone())
        .or_else(|| shift.manager_name.clone())
        .unwrap_or_else(|| "-".into())
}

pub fn shift_rows(shifts: &[Shift], managers: &[Employee]) -> Vec<TableRowData> {
    shifts
        .iter()
        .map(|shift| {
            TableRowData::new(
                shift.id,
                vec![
                    shift.name.clone(),
                    format_time_of_day(shift.start_time),
                    format_time_of_day(shift.end_time),
                    format_duration(
                        shift_length(shift.start_time, shift.end_time),
                        DurationStyle::HoursMinutes,
                    ),
                    manager_label(shift, managers),
                ],
            )
        })
        .collect()
}

pub fn managed_shifts(manager_id: i64, shifts: &[Shift]) -> Vec<Shift> {
    shifts
        .iter()
        .filter(|shift| shift.manager_id == Some(manager_id))
        .cloned()
        .collect()
}

/// Employees linked to any shift the manager runs.
pub fn team_member_ids(manager_id: i64, shifts: &[Shift], links: &[EmployeeShift]) -> BTreeSet<i64> {
    let shift_ids: BTreeSet<i64> = managed_shifts(manager_id, shifts)
        .iter()
        .map(|shift| shift.id)
        .collect();
    links
        .iter()
        .filter(|link| shift_ids.contains(&link.shift_id))
        .map(|link| link.employee_id)
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShiftStaff {
    pub shift: Shift,
    pub staff: Vec<String>,
}

pub fn staff_by_shift(shifts: &[Shift], links: &[EmployeeShift]) -> Vec<ShiftStaff> {
    shifts
        .iter()
        .map(|shift| {
            let mut staff: Vec<String> = links
                .iter()
                .filter(|link| link.shift_id == shift.id)
                .map(|link| {
                    link.employee_name
                        .clone()
                        .unwrap_or_else(|| format!("Employee #{}", link.employee_id))
                })
                .collect();
            staff.sort();
            ShiftStaff {
                shift: shift.clone(),
                staff,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Role;
    use crate::test_support::helpers::{employee, shift};

    fn link(id: i64, employee_id: i64, shift_id: i64, name: Option<&str>) -> EmployeeShift {
        EmployeeShift {
            id,
            employee_id,
            shift_id,
            employee_name: name.map(str::to_string),
            shift_name: None,
        }
    }

    #[test]
    fn overnight_shift_wraps_midnight() {
        let start = NaiveTime::from_hms_opt(22, 0, 0).unwrap();
        let end = NaiveTime::from_hms_opt(6, 0, 0).unwrap();
        assert_eq!(shift_length(start, end), Duration::hours(8));
        assert_eq!(shift_length(end, start), Duration::hours(16));
    }

    #[test]
    fn form_validation() {
        let form = ShiftFormState {
            name: " ".into(),
            start_time: "9am".into(),
            ..ShiftFormState::default()
        };
        let errors = form.validate().unwrap_err();
        assert!(errors.contains_key("name"));
        assert!(errors.contains_key("startTime"));

        let same = ShiftFormState {
            name: "Broken".into(),
            end_time: "09:00".into(),
            ..ShiftFormState::default()
        };
        assert!(same.validate().unwrap_err().contains_key("endTime"));

        let ok = ShiftFormState {
            name: "Night".into(),
            start_time: "22:00".into(),
            end_time: "06:00".into(),
            manager_id: Some(2),
            ..ShiftFormState::default()
        };
        let payload = ok.validate().unwrap();
        assert_eq!(payload.manager_id, Some(2));
        assert_eq!(ShiftFormState::from_shift(&shift(1, "Day", None)).start_time, "09:00");
    }

    #[test]
    fn rows_show_manager_and_length() {
        let managers = vec![employee(2, "Meera Iyer", Role::Manager)];
        let rows = shift_rows(&[shift(1, "Day", Some(2)), shift(2, "Spare", None)], &managers);
        assert_eq!(rows[0].cells, vec!["Day", "9:00 AM", "6:00 PM", "9h 0m", "Meera Iyer"]);
        assert_eq!(rows[1].cells[4], "-");
    }

    #[test]
    fn team_is_everyone_on_managed_shifts() {
        let shifts = vec![shift(1, "Day", Some(2)), shift(2, "Night", Some(9)), shift(3, "Swing", Some(2))];
        let links = vec![
            link(1, 10, 1, Some("Zoya")),
            link(2, 11, 2, None),
            link(3, 12, 3, None),
            link(4, 13, 1, Some("Anil")),
        ];
        assert_eq!(team_member_ids(2, &shifts, &links), BTreeSet::from([10, 12, 13]));

        let staffed = staff_by_shift(&managed_shifts(2, &shifts), &links);
        assert_eq!(staffed.len(), 2);
        assert_eq!(staffed[0].staff, vec!["Anil", "Zoya"]);
        assert_eq!(staffed[1].staff, vec!["Employee #12"]);
    }
}
