use std::rc::Rc;

use crate::{
    api::{ApiClient, ApiError, LoginRequest},
    state::session::Session,
    utils::jwt,
};

#[derive(Clone)]
pub struct LoginRepository {
    client: Rc<ApiClient>,
}

impl Default for LoginRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl LoginRepository {
    pub fn new() -> Self {
        Self::new_with_client(Rc::new(ApiClient::new()))
    }

    pub fn new_with_client(client: Rc<ApiClient>) -> Self {
        Self { client }
    }

    /// Logs in and persists the session. The token's role claim wins over the body's role.
    pub async fn login(&self, request: LoginRequest) -> Result<Session, ApiError> {
        let response = self.client.login(&request).await?;
        let role = jwt::read_role(&response.token)
            .or(response.role)
            .ok_or_else(|| ApiError::unknown("The server returned an unrecognised role"))?;
        let display_name = response
            .name
            .filter(|name| !name.trim().is_empty())
            .or_else(|| jwt::read_subject(&response.token))
            .unwrap_or_else(|| request.username.clone());
        let session = Session {
            token: response.token,
            role,
            display_name,
        };
        self.client
            .session()
            .save(&session)
            .map_err(ApiError::unknown)?;
        log::info!("signed in as {} ({})", session.display_name, role);
        Ok(session)
    }

    pub fn logout(&self) {
        self.client.session().clear();
        log::info!("signed out");
    }
}
