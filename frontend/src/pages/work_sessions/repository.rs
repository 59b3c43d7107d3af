use crate::api::{ApiClient, ApiError, WorkSession};
use crate::pages::work_sessions::utils::{sort_newest_first, SessionScope};

pub async fn fetch_sessions(api: &ApiClient, scope: SessionScope) -> Result<Vec<WorkSession>, ApiError> {
    let mut sessions = match scope {
        SessionScope::All => api.list_work_sessions().await?,
        SessionScope::Team => api.team_work_sessions().await?,
        SessionScope::Mine => api.my_work_sessions().await?,
    };
    sort_newest_first(&mut sessions);
    Ok(sessions)
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::test_support::{MockServer, GET};
    use serde_json::json;

    #[tokio::test]
    async fn each_scope_reads_its_own_endpoint() {
        let server = MockServer::start();
        for path in ["/api/work-sessions", "/api/work-sessions/team", "/api/work-sessions/me"] {
            server.mock(|when, then| {
                when.method(GET).path(path);
                then.status(200).json_body(json!([
                    { "id": 1, "clockInTime": "2025-01-01T03:30:00Z", "clockOutTime": "2025-01-01T12:00:00Z" },
                    { "id": 2, "clockInTime": "2025-01-02T03:30:00Z" }
                ]));
            });
        }
        let api = ApiClient::new_with_base_url(server.url("/api"));

        for scope in [SessionScope::All, SessionScope::Team, SessionScope::Mine] {
            let sessions = fetch_sessions(&api, scope).await.unwrap();
            assert_eq!(sessions[0].id, 2);
        }
        assert_eq!(server.hits(&GET, "/api/work-sessions"), 1);
        assert_eq!(server.hits(&GET, "/api/work-sessions/team"), 1);
        assert_eq!(server.hits(&GET, "/api/work-sessions/me"), 1);
    }

    #[tokio::test]
    async fn forbidden_is_reported() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/work-sessions/team");
            then.status(403).json_body(json!({ "error": "Access denied" }));
        });
        let api = ApiClient::new_with_base_url(server.url("/api"));

        let err = fetch_sessions(&api, SessionScope::Team).await.unwrap_err();
        assert_eq!(err.status, Some(403));
        assert_eq!(err.error, "Access denied");
    }
}
