//! In-process stand-in for the REST API, used by `#[tokio::test]` client tests.

use std::{
    cell::RefCell,
    collections::HashMap,
    rc::Rc,
    sync::atomic::{AtomicUsize, Ordering},
};

use reqwest::Method;
use serde_json::Value;

use super::{client::RawResponse, ApiError};

pub const GET: Method = Method::GET;
pub const POST: Method = Method::POST;
pub const PUT: Method = Method::PUT;
pub const PATCH: Method = Method::PATCH;
pub const DELETE: Method = Method::DELETE;

thread_local! {
    static SERVERS: RefCell<HashMap<String, MockServer>> = RefCell::new(HashMap::new());
}

/// Routes a request to the mock server whose base URL prefixes it.
pub fn dispatch(request: &reqwest::Request) -> Option<Result<RawResponse, ApiError>> {
    let url = request.url().as_str().to_string();
    let server = SERVERS.with(|servers| {
        servers
            .borrow()
            .iter()
            .find(|(base, _)| url.starts_with(base.as_str()))
            .map(|(_, server)| server.clone())
    })?;
    Some(server.respond(request))
}

/// What the mock saw for one request.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: Option<Value>,
}

#[derive(Clone)]
struct Route {
    method: Method,
    path: String,
    status: u16,
    body: Vec<u8>,
}

#[derive(Clone)]
pub struct MockServer {
    base: String,
    routes: Rc<RefCell<Vec<Route>>>,
    requests: Rc<RefCell<Vec<RecordedRequest>>>,
}

impl MockServer {
    pub fn start() -> Self {
        static NEXT_ID: AtomicUsize = AtomicUsize::new(1);
        let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
        let server = Self {
            base: format!("http://mock-{}.test", id),
            routes: Rc::new(RefCell::new(Vec::new())),
            requests: Rc::new(RefCell::new(Vec::new())),
        };
        SERVERS.with(|servers| {
            servers
                .borrow_mut()
                .insert(server.base.clone(), server.clone());
        });
        server
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    pub fn mock<F>(&self, f: F)
    where
        F: FnOnce(&mut When, &mut Then),
    {
        let mut when = When::default();
        let mut then = Then::default();
        f(&mut when, &mut then);
        let body = match (then.body, then.text) {
            (Some(json), _) => json.to_string().into_bytes(),
            (None, Some(text)) => text.into_bytes(),
            (None, None) => Vec::new(),
        };
        self.routes.borrow_mut().push(Route {
            method: when.method.unwrap_or(Method::GET),
            path: when.path.unwrap_or_else(|| "/".into()),
            status: then.status.unwrap_or(200),
            body,
        });
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.borrow().clone()
    }

    pub fn hits(&self, method: &Method, path: &str) -> usize {
        self.requests
            .borrow()
            .iter()
            .filter(|r| r.method == *method && r.path == path)
            .count()
    }

    fn respond(&self, request: &reqwest::Request) -> Result<RawResponse, ApiError> {
        let path = request.url().path().to_string();
        let header = |name: reqwest::header::HeaderName| {
            request
                .headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        self.requests.borrow_mut().push(RecordedRequest {
            method: request.method().clone(),
            path: path.clone(),
            query: request.url().query().map(str::to_string),
            authorization: header(reqwest::header::AUTHORIZATION),
            content_type: header(reqwest::header::CONTENT_TYPE),
            body: request
                .body()
                .and_then(|body| body.as_bytes())
                .and_then(|bytes| serde_json::from_slice(bytes).ok()),
        });

        let routes = self.routes.borrow();
        routes
            .iter()
            .rev()
            .find(|route| route.method == *request.method() && route.path == path)
            .map(|route| RawResponse {
                status: route.status,
                body: route.body.clone(),
            })
            .ok_or_else(|| {
                ApiError::request_failed(format!("No mock for {} {}", request.method(), path))
            })
    }
}

#[derive(Default)]
pub struct When {
    method: Option<Method>,
    path: Option<String>,
}

impl When {
    pub fn method(&mut self, method: Method) -> &mut Self {
        self.method = Some(method);
        self
    }

    pub fn path(&mut self, path: &str) -> &mut Self {
        self.path = Some(path.to_string());
        self
    }
}

#[derive(Default)]
pub struct Then {
    status: Option<u16>,
    body: Option<Value>,
    text: Option<String>,
}

impl Then {
    pub fn status(&mut self, status: u16) -> &mut Self {
        self.status = Some(status);
        self
    }

    pub fn json_body(&mut self, body: Value) -> &mut Self {
        self.body = Some(body);
        self
    }

    pub fn text_body(&mut self, body: &str) -> &mut Self {
        self.text = Some(body.to_string());
        self
    }
}
