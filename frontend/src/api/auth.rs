use super::{
    client::{ApiClient, LOGIN_ENDPOINT},
    types::{ApiError, LoginRequest, LoginResponse, UserProfile},
};

impl ApiClient {
    /// Exchanges credentials for a token. Persisting the session is the caller's job.
    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        let response: LoginResponse = self.post_json(LOGIN_ENDPOINT, request).await?;
        if response.token.trim().is_empty() {
            return Err(ApiError::unknown("Login response did not include a token"));
        }
        Ok(response)
    }

    pub async fn get_me(&self) -> Result<UserProfile, ApiError> {
        self.get_json("/users/me").await
    }
}
