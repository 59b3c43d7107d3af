use serde::{Deserialize, Serialize};

use crate::api::{ApiClient, ApiError, Role, UserProfile};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileData {
    pub profile: UserProfile,
    pub shifts: Vec<String>,
}

/// The signed-in user, plus shift names for employees.
pub async fn fetch_profile(api: &ApiClient) -> Result<ProfileData, ApiError> {
    let profile = api.get_me().await?;
    let shifts = if profile.role == Role::Employee {
        api.employee_shifts_for(profile.id)
            .await?
            .into_iter()
            .map(|link| link.shift_name.unwrap_or_else(|| format!("Shift #{}", link.shift_id)))
            .collect()
    } else {
        Vec::new()
    };
    Ok(ProfileData { profile, shifts })
}

/// Label/value pairs shown on the profile card; blanks become "-".
pub fn profile_fields(profile: &UserProfile) -> Vec<(&'static str, String)> {
    let or_dash = |value: &Option<String>| {
        value
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or("-")
            .to_string()
    };
    vec![
        ("Full name", or_dash(&profile.full_name)),
        ("Username", profile.username.clone()),
        ("Email", or_dash(&profile.email)),
        ("Phone", or_dash(&profile.phone)),
        ("Role", profile.role.label().to_string()),
        ("Department", or_dash(&profile.department)),
        ("Designation", or_dash(&profile.designation)),
    ]
}


#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::test_support::{MockServer, GET};
    use serde_json::json;

    #[tokio::test]
    async fn employees_see_their_shift_names() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/users/me");
            then.status(200).json_body(json!({ "id": 5, "username": "priya", "role": "EMPLOYEE" }));
        });
        server.mock(|when, then| {
            when.method(GET).path("/api/employee-shifts/employee/5");
            then.status(200).json_body(json!([
                { "id": 1, "employeeId": 5, "shiftId": 2, "shiftName": "Night" },
                { "id": 2, "employeeId": 5, "shiftId": 3 }
            ]));
        });
        let api = ApiClient::new_with_base_url(server.url("/api"));

        let data = fetch_profile(&api).await.unwrap();
        assert_eq!(data.shifts, vec!["Night".to_string(), "Shift #3".to_string()]);
    }

    #[tokio::test]
    async fn managers_skip_the_shift_lookup() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/users/me");
            then.status(200).json_body(json!({ "id": 2, "username": "meera", "role": "MANAGER" }));
        });
        let api = ApiClient::new_with_base_url(server.url("/api"));

        let data = fetch_profile(&api).await.unwrap();
        assert!(data.shifts.is_empty());
        assert_eq!(server.requests().len(), 1);
    }
}
