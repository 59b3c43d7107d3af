use std::rc::Rc;

use reqwest::{Client, Method, RequestBuilder};
use serde::{de::DeserializeOwned, Serialize};

use crate::{
    api::types::ApiError,
    config,
    state::session::SessionStore,
    utils::navigation::{redirect_with, BrowserNavigator, Navigator, LOGIN_PATH},
};

pub const LOGIN_ENDPOINT: &str = "/auth/login";

/// Status and body of a finished exchange, before any decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Shared REST client. Every request carries the stored bearer token; a 401 from anything
/// but the login endpoint ends the local session and sends the browser to `/login`.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Option<String>,
    session: SessionStore,
    navigator: Rc<dyn Navigator>,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: None,
            session: SessionStore::browser(),
            navigator: Rc::new(BrowserNavigator),
        }
    }

    pub fn new_with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: Some(base_url.into()),
            ..Self::new()
        }
    }

    pub fn with_session(mut self, session: SessionStore) -> Self {
        self.session = session;
        self
    }

    pub fn with_navigator(mut self, navigator: Rc<dyn Navigator>) -> Self {
        self.navigator = navigator;
        self
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    async fn resolved_base_url(&self) -> String {
        match &self.base_url {
            Some(base) => base.clone(),
            None => config::await_api_base_url().await,
        }
    }

    pub(crate) async fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let base_url = self.resolved_base_url().await;
        let builder = self.client.request(method, format!("{}{}", base_url, path));
        match self.session.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    fn handle_unauthorized(&self, path: &str) {
        log::warn!("{} answered 401, ending session", path);
        self.session.clear();
        redirect_with(self.navigator.as_ref(), LOGIN_PATH);
    }

    async fn execute(&self, request: reqwest::Request) -> Result<RawResponse, ApiError> {
        if let Some(mocked) = mocked_response(&request) {
            return mocked;
        }
        let response = self
            .client
            .execute(request)
            .await
            .map_err(|e| ApiError::request_failed(format!("Request failed: {}", e)))?;
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| ApiError::request_failed(format!("Failed to read response: {}", e)))?;
        Ok(RawResponse {
            status,
            body: body.to_vec(),
        })
    }

    /// Sends the request; non-2xx statuses come back as `ApiError`.
    pub(crate) async fn send(
        &self,
        path: &str,
        builder: RequestBuilder,
    ) -> Result<RawResponse, ApiError> {
        let request = builder
            .build()
            .map_err(|e| ApiError::request_failed(format!("Invalid request: {}", e)))?;
        let method = request.method().clone();
        let raw = self.execute(request).await?;
        if raw.status == 401 && !path.contains(LOGIN_ENDPOINT) {
            self.handle_unauthorized(path);
            return Err(ApiError::unauthorized());
        }
        if !raw.is_success() {
            let error = ApiError::from_status(raw.status, &raw.body);
            log::debug!("{} {} failed: {} ({})", method, path, error, error.code);
            return Err(error);
        }
        Ok(raw)
    }

    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        path: &str,
        builder: RequestBuilder,
    ) -> Result<T, ApiError> {
        let raw = self.send(path, builder).await?;
        serde_json::from_slice(&raw.body)
            .map_err(|e| ApiError::unknown(format!("Failed to parse response: {}", e)))
    }

    pub(crate) async fn send_empty(
        &self,
        path: &str,
        builder: RequestBuilder,
    ) -> Result<(), ApiError> {
        self.send(path, builder).await.map(|_| ())
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let builder = self.request(Method::GET, path).await;
        self.send_json(path, builder).await
    }

    pub(crate) async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let builder = self.request(Method::POST, path).await.json(body);
        self.send_json(path, builder).await
    }

    pub(crate) async fn put_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let builder = self.request(Method::PUT, path).await.json(body);
        self.send_json(path, builder).await
    }

    pub(crate) async fn patch_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let builder = self.request(Method::PATCH, path).await.json(body);
        self.send_json(path, builder).await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let builder = self.request(Method::DELETE, path).await;
        self.send_empty(path, builder).await
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
fn mocked_response(request: &reqwest::Request) -> Option<Result<RawResponse, ApiError>> {
    super::test_support::dispatch(request)
}

#[cfg(not(all(test, not(target_arch = "wasm32"))))]
fn mocked_response(_request: &reqwest::Request) -> Option<Result<RawResponse, ApiError>> {
    None
}
