use std::collections::BTreeMap;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use chrono_tz::Tz;

use crate::{
    api::{Employee, Leave, LeaveStatus, Role, WorkSession},
    components::charts::BarDatum,
    utils::{
        duration::{derive_status, format_duration, session_totals, DurationStyle, LiveStatus},
        time::{format_optional_clock, shift_day_for_instant},
    },
};

pub fn headcount_by_role(employees: &[Employee]) -> Vec<BarDatum> {
    Role::ALL
        .iter()
        .map(|role| BarDatum {
            label: role.label().to_string(),
            value: employees.iter().filter(|e| e.role == *role).count() as f64,
        })
        .collect()
}

pub fn pending_leave_count(leaves: &[Leave]) -> usize {
    leaves
        .iter()
        .filter(|leave| leave.status == LeaveStatus::Pending)
        .count()
}

pub fn live_session_count(sessions: &[WorkSession]) -> usize {
    sessions
        .iter()
        .filter(|s| derive_status(Some(s)).is_live())
        .count()
}

/// Working hours per shift day for the `days` shift days ending at `today`.
pub fn daily_working_hours(
    sessions: &[WorkSession],
    today: NaiveDate,
    days: u32,
    tz: Tz,
    now: DateTime<Utc>,
) -> Vec<BarDatum> {
    let mut totals: BTreeMap<NaiveDate, Duration> = (0..days)
        .filter_map(|offset| today.checked_sub_signed(Duration::days(offset as i64)))
        .map(|day| (day, Duration::zero()))
        .collect();
    for session in sessions {
        let Some(clock_in) = session.clock_in_time else {
            continue;
        };
        let day = shift_day_for_instant(clock_in, tz);
        if let Some(total) = totals.get_mut(&day) {
            *total = *total + session_totals(session, now).working;
        }
    }
    totals
        .into_iter()
        .map(|(day, total)| BarDatum {
            label: day.format("%a %d %b").to_string(),
            value: (total.num_minutes() as f64 / 60.0 * 10.0).round() / 10.0,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamStatusRow {
    pub employee: String,
    pub status: LiveStatus,
    pub clock_in: String,
    pub working: String,
}

/// Latest session per employee, live ones first.
pub fn team_status_rows(sessions: &[WorkSession], now: DateTime<Utc>, tz: Tz) -> Vec<TeamStatusRow> {
    let mut latest: BTreeMap<String, &WorkSession> = BTreeMap::new();
    for session in sessions {
        let key = session
            .employee_name
            .clone()
            .or_else(|| session.employee_id.map(|id| format!("#{}", id)))
            .unwrap_or_else(|| format!("Session {}", session.id));
        let newer = latest
            .get(&key)
            .map(|current| session.clock_in_time > current.clock_in_time)
            .unwrap_or(true);
        if newer {
            latest.insert(key, session);
        }
    }
    let mut rows: Vec<TeamStatusRow> = latest
        .into_iter()
        .map(|(employee, session)| TeamStatusRow {
            employee,
            status: derive_status(Some(session)),
            clock_in: format_optional_clock(session.clock_in_time, tz),
            working: format_duration(session_totals(session, now).working, DurationStyle::Clock),
        })
        .collect();
    rows.sort_by_key(|row| !row.status.is_live());
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{employee, instant, leave, open_session};
    use chrono::TimeZone;
    use chrono_tz::Asia::Kolkata;

    #[test]
    fn headcount_covers_every_role() {
        let employees = vec![
            employee(1, "A", Role::Admin),
            employee(2, "B", Role::Employee),
            employee(3, "C", Role::Employee),
        ];
        let counts = headcount_by_role(&employees);
        assert_eq!(counts.len(), 4);
        assert_eq!(counts[0].value, 1.0);
        assert_eq!(counts[1].value, 0.0);
        assert_eq!(counts[3].value, 2.0);
    }

    #[test]
    fn counts_pending_leaves_and_live_sessions() {
        let leaves = vec![
            leave(1, LeaveStatus::Pending),
            leave(2, LeaveStatus::Approved),
            leave(3, LeaveStatus::Pending),
        ];
        assert_eq!(pending_leave_count(&leaves), 2);

        let mut closed = open_session(2, instant(3, 30, 0));
        closed.clock_out_time = Some(instant(5, 0, 0));
        let sessions = vec![open_session(1, instant(3, 30, 0)), closed];
        assert_eq!(live_session_count(&sessions), 1);
    }

    #[test]
    fn daily_hours_bucket_by_shift_day() {
        let today = NaiveDate::from_ymd_opt(2025, 1, 2).unwrap();
        let mut early = open_session(1, Utc.with_ymd_and_hms(2025, 1, 1, 20, 0, 0).unwrap());
        early.clock_out_time = Some(Utc.with_ymd_and_hms(2025, 1, 1, 22, 0, 0).unwrap());
        let mut day = open_session(2, instant(3, 30, 0));
        day.clock_out_time = Some(instant(7, 30, 0));
        let bars = daily_working_hours(&[early, day], today, 3, Kolkata, instant(12, 0, 0));
        assert_eq!(bars.len(), 3);
        // 01:30 IST on the 2nd belongs to the 1st.
        assert_eq!(bars[1].value, 2.0);
        assert_eq!(bars[2].value, 4.0);
        assert_eq!(bars[0].value, 0.0);
    }

    #[test]
    fn team_rows_keep_latest_session_per_person() {
        let mut yesterday = open_session(1, Utc.with_ymd_and_hms(2025, 1, 1, 3, 30, 0).unwrap());
        yesterday.clock_out_time = Some(Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap());
        let today = open_session(2, instant(3, 30, 0));
        let mut other = open_session(3, instant(3, 0, 0));
        other.employee_name = Some("Arjun Rao".into());
        other.clock_out_time = Some(instant(4, 0, 0));

        let rows = team_status_rows(&[yesterday, today, other], instant(4, 30, 0), Kolkata);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].employee, "Priya Nair");
        assert_eq!(rows[0].status, LiveStatus::Working);
        assert_eq!(rows[0].working, "01:00:00");
        assert_eq!(rows[1].status, LiveStatus::Completed);
    }
}
