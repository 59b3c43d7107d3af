use std::collections::{BTreeMap, BTreeSet};

use chrono::{Duration, NaiveDate};
use leptos::*;

use crate::{
    api::{AttendanceRecord, MarkAttendanceRequest, Role},
    components::data_table::{Column, TableRowData},
    utils::time::{format_time_of_day, shift_day_for},
};

pub const DEFAULT_RANGE_DAYS: i64 = 7;

/// Whose attendance a page shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttendanceScope {
    All,
    Team,
    Mine,
}

impl AttendanceScope {
    pub fn for_role(role: Role) -> Self {
        match role {
            Role::Admin | Role::Hr => AttendanceScope::All,
            Role::Manager => AttendanceScope::Team,
            Role::Employee => AttendanceScope::Mine,
        }
    }

    pub fn can_mark(&self) -> bool {
        !matches!(self, AttendanceScope::Mine)
    }
}

#[derive(Clone, Copy)]
pub struct RangeFormState {
    from: RwSignal<String>,
    to: RwSignal<String>,
}

impl RangeFormState {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Self {
        Self {
            from: create_rw_signal(from.format("%Y-%m-%d").to_string()),
            to: create_rw_signal(to.format("%Y-%m-%d").to_string()),
        }
    }

    pub fn from_signal(&self) -> RwSignal<String> {
        self.from
    }

    pub fn to_signal(&self) -> RwSignal<String> {
        self.to
    }

    pub fn to_range(&self) -> Result<(Option<NaiveDate>, Option<NaiveDate>), String> {
        let from = parse_date_input(&self.from.get_untracked(), "Start date must be YYYY-MM-DD")?;
        let to = parse_date_input(&self.to.get_untracked(), "End date must be YYYY-MM-DD")?;
        if let (Some(f), Some(t)) = (from, to) {
            if f > t {
                return Err("Start date must not be after the end date".into());
            }
        }
        Ok((from, to))
    }
}

pub fn parse_date_input(value: &str, error_message: &str) -> Result<Option<NaiveDate>, String> {
    if value.trim().is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map(Some)
        .map_err(|_| error_message.into())
}

pub fn default_range(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let from = today
        .checked_sub_signed(Duration::days(DEFAULT_RANGE_DAYS - 1))
        .unwrap_or(today);
    (from, today)
}

/// Marks taken before 06:00 count toward the previous day's shift.
pub fn record_shift_day(record: &AttendanceRecord) -> NaiveDate {
    match record.time {
        Some(time) => shift_day_for(record.date.and_time(time)),
        None => record.date,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AttendanceDay {
    pub day: NaiveDate,
    pub present: usize,
    pub absent: usize,
    pub records: Vec<AttendanceRecord>,
}

/// Newest shift day first; records inside a day sorted by employee name.
pub fn group_by_shift_day(records: &[AttendanceRecord]) -> Vec<AttendanceDay> {
    let mut days: BTreeMap<NaiveDate, Vec<AttendanceRecord>> = BTreeMap::new();
    for record in records {
        days.entry(record_shift_day(record))
            .or_default()
            .push(record.clone());
    }
    days.into_iter()
        .rev()
        .map(|(day, mut records)| {
            records.sort_by(|a, b| employee_label(a).cmp(&employee_label(b)));
            let present = records.iter().filter(|r| r.present).count();
            AttendanceDay {
                day,
                present,
                absent: records.len() - present,
                records,
            }
        })
        .collect()
}

pub fn filter_to_members(records: Vec<AttendanceRecord>, members: &BTreeSet<i64>) -> Vec<AttendanceRecord> {
    records
        .into_iter()
        .filter(|record| members.contains(&record.employee_id))
        .collect()
}

/// Present share as a whole percentage; zero records is 0%.
pub fn attendance_rate(records: &[AttendanceRecord]) -> u32 {
    if records.is_empty() {
        return 0;
    }
    let present = records.iter().filter(|r| r.present).count();
    ((present as f64 / records.len() as f64) * 100.0).round() as u32
}

fn employee_label(record: &AttendanceRecord) -> String {
    record
        .employee_name
        .clone()
        .unwrap_or_else(|| format!("Employee #{}", record.employee_id))
}

pub fn attendance_columns(include_employee: bool) -> Vec<Column> {
    let mut columns = Vec::with_capacity(4);
    if include_employee {
        columns.push(Column::new("employee", "Employee"));
    }
    columns.extend([
        Column::new("day", "Shift Day"),
        Column::new("time", "Marked At"),
        Column::new("status", "Status"),
    ]);
    columns
}

pub fn attendance_rows(records: &[AttendanceRecord], include_employee: bool) -> Vec<TableRowData> {
    records
        .iter()
        .map(|record| {
            let mut cells = Vec::with_capacity(4);
            if include_employee {
                cells.push(employee_label(record));
            }
            cells.push(record_shift_day(record).format("%Y-%m-%d").to_string());
            cells.push(
                record
                    .time
                    .map(format_time_of_day)
                    .unwrap_or_else(|| "-".into()),
            );
            cells.push(if record.present { "Present" } else { "Absent" }.to_string());
            TableRowData::new(record.id, cells)
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkFormState {
    pub employee_id: Option<i64>,
    pub date: String,
    pub present: bool,
}

impl MarkFormState {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            employee_id: None,
            date: today.format("%Y-%m-%d").to_string(),
            present: true,
        }
    }

    pub fn to_request(&self) -> Result<MarkAttendanceRequest, String> {
        let employee_id = self.employee_id.ok_or("Choose an employee")?;
        let date = parse_date_input(&self.date, "Date must be YYYY-MM-DD")?.ok_or("Choose a date")?;
        Ok(MarkAttendanceRequest {
            employee_id,
            date,
            present: self.present,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::attendance;
    use chrono::NaiveTime;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, d).unwrap()
    }

    #[test]
    fn early_morning_marks_belong_to_previous_shift_day() {
        let mut late = attendance(1, 5, date(3), true);
        late.time = NaiveTime::from_hms_opt(2, 30, 0);
        assert_eq!(record_shift_day(&late), date(2));

        let mut boundary = attendance(2, 5, date(3), true);
        boundary.time = NaiveTime::from_hms_opt(6, 0, 0);
        assert_eq!(record_shift_day(&boundary), date(3));

        let mut untimed = attendance(3, 5, date(3), false);
        untimed.time = None;
        assert_eq!(record_shift_day(&untimed), date(3));
    }

    #[test]
    fn groups_count_present_and_absent_newest_first() {
        let mut night = attendance(3, 7, date(3), true);
        night.time = NaiveTime::from_hms_opt(1, 0, 0);
        let records = vec![
            attendance(1, 5, date(2), true),
            attendance(2, 6, date(2), false),
            night,
            attendance(4, 5, date(3), true),
        ];
        let groups = group_by_shift_day(&records);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].day, date(3));
        assert_eq!(groups[0].records.len(), 1);
        assert_eq!(groups[1].day, date(2));
        assert_eq!((groups[1].present, groups[1].absent), (2, 1));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn range_validation() {
        crate::test_support::ssr::with_runtime(|| {
            let range = RangeFormState::new(date(1), date(7));
            assert_eq!(range.to_range(), Ok((Some(date(1)), Some(date(7)))));
            range.from_signal().set("2025-01-09".into());
            assert!(range.to_range().is_err());
            range.to_signal().set(String::new());
            assert_eq!(range.to_range(), Ok((Some(date(9)), None)));
            range.from_signal().set("09/01/2025".into());
            assert_eq!(range.to_range(), Err("Start date must be YYYY-MM-DD".to_string()));
        });
        assert_eq!(default_range(date(7)), (date(1), date(7)));
    }

    #[test]
    fn mark_form_requires_employee() {
        let mut form = MarkFormState::new(date(2));
        assert_eq!(form.to_request(), Err("Choose an employee".to_string()));
        form.employee_id = Some(5);
        form.present = false;
        let request = form.to_request().unwrap();
        assert_eq!(request.date, date(2));
        assert!(!request.present);
    }

    #[test]
    fn rows_and_rate() {
        let records = vec![attendance(1, 5, date(2), true), attendance(2, 6, date(2), false)];
        let rows = attendance_rows(&records, true);
        assert_eq!(rows[0].cells, vec!["Employee 5", "2025-01-02", "9:05 AM", "Present"]);
        assert_eq!(attendance_columns(false).len(), 3);
        assert_eq!(attendance_rate(&records), 50);
        assert_eq!(attendance_rate(&[]), 0);
        assert_eq!(
            filter_to_members(records, &BTreeSet::from([6])).len(),
            1
        );
        assert_eq!(AttendanceScope::for_role(Role::Hr), AttendanceScope::All);
        assert!(!AttendanceScope::Mine.can_mark());
    }
}
