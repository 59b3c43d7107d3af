use chrono::{DateTime, Duration, Utc};

use crate::api::{BreakRecord, WorkSession};

/// Elapsed, break and working time for one session at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionTotals {
    pub elapsed: Duration,
    pub break_total: Duration,
    pub working: Duration,
}

impl Default for SessionTotals {
    fn default() -> Self {
        Self {
            elapsed: Duration::zero(),
            break_total: Duration::zero(),
            working: Duration::zero(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiveStatus {
    Inactive,
    Working,
    OnBreak,
    Completed,
}

impl LiveStatus {
    pub fn label(&self) -> &'static str {
        match self {
            LiveStatus::Inactive => "Inactive",
            LiveStatus::Working => "Working",
            LiveStatus::OnBreak => "On Break",
            LiveStatus::Completed => "Completed",
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self, LiveStatus::Working | LiveStatus::OnBreak)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationStyle {
    /// `HH:MM:SS`
    Clock,
    /// `Xh Ym`
    HoursMinutes,
    /// `7.50`
    DecimalHours,
}

fn non_negative(value: Duration) -> Duration {
    value.max(Duration::zero())
}

fn break_length(record: &BreakRecord, upper: DateTime<Utc>) -> Duration {
    match record.start_time {
        Some(start) => non_negative(record.end_time.unwrap_or(upper) - start),
        None => Duration::zero(),
    }
}

/// Session totals at `now`. Open breaks and open sessions run up to clock-out
/// when there is one, otherwise up to `now`.
pub fn session_totals(session: &WorkSession, now: DateTime<Utc>) -> SessionTotals {
    let Some(clock_in) = session.clock_in_time else {
        return SessionTotals::default();
    };
    let upper = session.clock_out_time.unwrap_or(now);
    let elapsed = non_negative(upper - clock_in);
    let break_total = session
        .breaks
        .iter()
        .map(|record| break_length(record, upper))
        .fold(Duration::zero(), |acc, item| acc + item);
    SessionTotals {
        elapsed,
        break_total,
        working: non_negative(elapsed - break_total),
    }
}

/// Length of the break currently running, if the session is on one.
pub fn current_break_elapsed(session: &WorkSession, now: DateTime<Utc>) -> Option<Duration> {
    if session.clock_out_time.is_some() {
        return None;
    }
    session
        .open_break()
        .map(|record| break_length(record, now))
}

pub fn derive_status(session: Option<&WorkSession>) -> LiveStatus {
    match session {
        None => LiveStatus::Inactive,
        Some(s) if s.clock_in_time.is_none() => LiveStatus::Inactive,
        Some(s) if s.clock_out_time.is_some() => LiveStatus::Completed,
        Some(s) if s.open_break().is_some() => LiveStatus::OnBreak,
        Some(_) => LiveStatus::Working,
    }
}

pub fn format_duration(value: Duration, style: DurationStyle) -> String {
    let value = non_negative(value);
    match style {
        DurationStyle::Clock => super::time::format_hms(value),
        DurationStyle::HoursMinutes => super::time::format_hours_minutes(value),
        DurationStyle::DecimalHours => format!("{:.2}", value.num_seconds() as f64 / 3600.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 2, 3, 30, 0).unwrap()
    }

    fn at(seconds: i64) -> DateTime<Utc> {
        t0() + Duration::seconds(seconds)
    }

    fn session(breaks: Vec<BreakRecord>, clock_out: Option<i64>) -> WorkSession {
        WorkSession {
            id: 1,
            clock_in_time: Some(t0()),
            clock_out_time: clock_out.map(at),
            breaks,
            ..WorkSession::default()
        }
    }

    fn brk(start: Option<i64>, end: Option<i64>) -> BreakRecord {
        BreakRecord {
            id: None,
            start_time: start.map(at),
            end_time: end.map(at),
        }
    }

    #[test]
    fn running_session_counts_up_to_now() {
        let totals = session_totals(&session(vec![], None), at(90));
        assert_eq!(format_duration(totals.working, DurationStyle::Clock), "00:01:30");
        assert_eq!(totals.break_total, Duration::zero());
    }

    #[test]
    fn closed_break_is_subtracted_from_completed_session() {
        let s = session(vec![brk(Some(10), Some(40))], Some(100));
        let totals = session_totals(&s, at(5_000));
        assert_eq!(totals.elapsed, Duration::seconds(100));
        assert_eq!(totals.break_total, Duration::seconds(30));
        assert_eq!(totals.working, Duration::seconds(70));
        assert_eq!(derive_status(Some(&s)), LiveStatus::Completed);
    }

    #[test]
    fn open_break_runs_to_now_while_session_is_live() {
        let s = session(vec![brk(Some(10), Some(40)), brk(Some(60), None)], None);
        let totals = session_totals(&s, at(100));
        assert_eq!(totals.break_total, Duration::seconds(70));
        assert_eq!(totals.working, Duration::seconds(30));
        assert_eq!(current_break_elapsed(&s, at(100)), Some(Duration::seconds(40)));
        assert_eq!(derive_status(Some(&s)), LiveStatus::OnBreak);
    }

    #[test]
    fn open_break_after_clock_out_is_completed() {
        let s = session(vec![brk(Some(20), None)], Some(50));
        assert_eq!(derive_status(Some(&s)), LiveStatus::Completed);
        assert_eq!(current_break_elapsed(&s, at(80)), None);
        assert_eq!(session_totals(&s, at(80)).working, Duration::seconds(20));
    }

    #[test]
    fn break_without_start_contributes_nothing() {
        let s = session(vec![brk(None, Some(40))], Some(100));
        assert_eq!(session_totals(&s, at(100)).working, Duration::seconds(100));
    }

    #[test]
    fn working_time_never_goes_negative() {
        let s = session(vec![brk(Some(-500), Some(50))], Some(60));
        assert_eq!(session_totals(&s, at(60)).working, Duration::zero());
    }

    #[test]
    fn missing_session_is_inactive() {
        assert_eq!(derive_status(None), LiveStatus::Inactive);
        let mut s = session(vec![], None);
        s.clock_in_time = None;
        assert_eq!(derive_status(Some(&s)), LiveStatus::Inactive);
        assert_eq!(session_totals(&s, at(10)), SessionTotals::default());
        assert_eq!(derive_status(Some(&session(vec![], None))), LiveStatus::Working);
    }

    #[test]
    fn duration_styles() {
        let value = Duration::seconds(27_000);
        assert_eq!(format_duration(value, DurationStyle::Clock), "07:30:00");
        assert_eq!(format_duration(value, DurationStyle::HoursMinutes), "7h 30m");
        assert_eq!(format_duration(value, DurationStyle::DecimalHours), "7.50");
    }
}
