use chrono::{DateTime, Duration, NaiveDate, Utc};
use chrono_tz::Tz;

use crate::{
    api::{Role, WorkSession},
    components::data_table::{Column, TableRowData},
    utils::{
        duration::{derive_status, format_duration, session_totals, DurationStyle, LiveStatus},
        time::{format_optional_clock, parse_iso_duration, shift_day_for_instant},
    },
};

const EMPLOYEE_COLUMN: Column = Column::new("employee", "Employee");
const SESSION_COLUMNS: [Column; 6] = [
    Column::new("day", "Shift Day"),
    Column::new("clock_in", "Clock In"),
    Column::new("clock_out", "Clock Out"),
    Column::new("working", "Working"),
    Column::new("breaks", "Breaks"),
    Column::new("status", "Status"),
];

pub fn session_columns(include_employee: bool) -> Vec<Column> {
    let mut columns = Vec::with_capacity(SESSION_COLUMNS.len() + 1);
    if include_employee {
        columns.push(EMPLOYEE_COLUMN);
    }
    columns.extend(SESSION_COLUMNS);
    columns
}

/// Server status when it sent one, otherwise the status derived from the timestamps.
pub fn status_label(session: &WorkSession) -> String {
    match session.status {
        Some(status) => status.label().to_string(),
        None => derive_status(Some(session)).label().to_string(),
    }
}

/// Working and break time. Finished sessions prefer the server's totals.
pub fn session_durations(session: &WorkSession, now: DateTime<Utc>) -> (Duration, Duration) {
    let totals = session_totals(session, now);
    if derive_status(Some(session)) == LiveStatus::Completed {
        let working = session
            .total_duration
            .as_deref()
            .map(|raw| parse_iso_duration(Some(raw)).to_duration())
            .unwrap_or(totals.working);
        let breaks = session
            .total_break_duration
            .as_deref()
            .map(|raw| parse_iso_duration(Some(raw)).to_duration())
            .unwrap_or(totals.break_total);
        (working, breaks)
    } else {
        (totals.working, totals.break_total)
    }
}

pub fn session_row(
    session: &WorkSession,
    now: DateTime<Utc>,
    tz: Tz,
    include_employee: bool,
) -> TableRowData {
    let (working, breaks) = session_durations(session, now);
    let mut cells = Vec::with_capacity(7);
    if include_employee {
        cells.push(
            session
                .employee_name
                .clone()
                .or_else(|| session.employee_id.map(|id| format!("#{}", id)))
                .unwrap_or_else(|| "-".into()),
        );
    }
    cells.push(
        session
            .clock_in_time
            .map(|at| shift_day_for_instant(at, tz).format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "-".into()),
    );
    cells.push(format_optional_clock(session.clock_in_time, tz));
    cells.push(format_optional_clock(session.clock_out_time, tz));
    cells.push(format_duration(working, DurationStyle::HoursMinutes));
    cells.push(format_duration(breaks, DurationStyle::HoursMinutes));
    cells.push(status_label(session));
    TableRowData::new(session.id, cells)
}

/// Newest first by clock-in.
pub fn sort_newest_first(sessions: &mut [WorkSession]) {
    sessions.sort_by(|a, b| b.clock_in_time.cmp(&a.clock_in_time));
}

/// Whose sessions a history page lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionScope {
    All,
    Team,
    Mine,
}

impl SessionScope {
    pub fn for_role(role: Role) -> Self {
        match role {
            Role::Admin | Role::Hr => SessionScope::All,
            Role::Manager => SessionScope::Team,
            Role::Employee => SessionScope::Mine,
        }
    }
}

/// Keeps sessions whose shift day falls inside the optional bounds.
pub fn within_shift_days(
    sessions: &[WorkSession],
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    tz: Tz,
) -> Vec<WorkSession> {
    sessions
        .iter()
        .filter(|session| match session.clock_in_time {
            Some(at) => {
                let day = shift_day_for_instant(at, tz);
                from.map_or(true, |f| day >= f) && to.map_or(true, |t| day <= t)
            }
            None => from.is_none() && to.is_none(),
        })
        .cloned()
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    pub count: usize,
    pub working: Duration,
    pub breaks: Duration,
}

impl SessionSummary {
    pub fn average(&self) -> Duration {
        match i32::try_from(self.count) {
            Ok(count) if count > 0 => self.working / count,
            _ => Duration::zero(),
        }
    }
}

pub fn summarize(sessions: &[WorkSession], now: DateTime<Utc>) -> SessionSummary {
    sessions.iter().fold(
        SessionSummary {
            count: 0,
            working: Duration::zero(),
            breaks: Duration::zero(),
        },
        |acc, session| {
            let (working, breaks) = session_durations(session, now);
            SessionSummary {
                count: acc.count + 1,
                working: acc.working + working,
                breaks: acc.breaks + breaks,
            }
        },
    )
}
