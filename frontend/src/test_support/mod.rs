#[cfg(all(test, not(target_arch = "wasm32")))]
pub mod ssr;

#[cfg(test)]
pub mod helpers {
    use crate::api::{
        AttendanceRecord, BreakRecord, Employee, Leave, LeaveStatus, Role, Shift, WorkSession,
        WorkSessionStatus,
    };
    use crate::state::auth::{AuthContext, AuthState, AuthStatus};
    use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
    use leptos::*;

    pub fn provide_auth_status(status: AuthStatus) -> AuthContext {
        let (auth, set_auth) = create_signal(AuthState {
            status,
            display_name: Some("Test User".into()),
        });
        provide_context((auth, set_auth));
        (auth, set_auth)
    }

    pub fn provide_role(role: Role) -> AuthContext {
        provide_auth_status(AuthStatus::Authenticated(role))
    }

    pub fn instant(h: u32, m: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 2, h, m, s).unwrap()
    }

    pub fn employee(id: i64, name: &str, role: Role) -> Employee {
        Employee {
            id,
            full_name: name.into(),
            username: name.to_ascii_lowercase().replace(' ', "_"),
            email: Some(format!("{}@example.com", id)),
            phone: Some("9876543210".into()),
            role,
            department: Some("Engineering".into()),
            designation: Some("Developer".into()),
            active: true,
            shift_id: None,
            shift_name: None,
        }
    }

    pub fn shift(id: i64, name: &str, manager_id: Option<i64>) -> Shift {
        Shift {
            id,
            name: name.into(),
            start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
            manager_id,
            manager_name: None,
        }
    }

    pub fn attendance(id: i64, employee_id: i64, date: NaiveDate, present: bool) -> AttendanceRecord {
        AttendanceRecord {
            id,
            employee_id,
            employee_name: Some(format!("Employee {}", employee_id)),
            date,
            time: NaiveTime::from_hms_opt(9, 5, 0),
            present,
        }
    }

    pub fn leave(id: i64, status: LeaveStatus) -> Leave {
        Leave {
            id,
            employee_id: 5,
            employee_name: Some("Priya Nair".into()),
            leave_type: "SICK".into(),
            start_date: NaiveDate::from_ymd_opt(2025, 2, 3).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 2, 4).unwrap(),
            days: None,
            description: Some("Flu".into()),
            proof_image: None,
            status,
        }
    }

    pub fn open_session(id: i64, clock_in: DateTime<Utc>) -> WorkSession {
        WorkSession {
            id,
            employee_id: Some(5),
            employee_name: Some("Priya Nair".into()),
            clock_in_time: Some(clock_in),
            status: Some(WorkSessionStatus::Working),
            ..WorkSession::default()
        }
    }

    pub fn closed_break(start: DateTime<Utc>, end: DateTime<Utc>) -> BreakRecord {
        BreakRecord {
            id: None,
            start_time: Some(start),
            end_time: Some(end),
        }
    }
}
