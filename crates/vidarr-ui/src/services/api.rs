//! HTTP client helpers (REST).
//!
//! # Design
//! - One client per app boot; the CSRF token is set after the session
//!   bootstrap via interior mutability so the instance never rebuilds.
//! - Every call sends session cookies (`credentials: include`); mutating
//!   calls additionally echo the CSRF token.
//! - Error bodies are parsed defensively: a non-JSON or empty body becomes
//!   an empty envelope rather than a parse failure.

use crate::services::error::ApiError;
use gloo::utils::window;
use gloo_net::http::{Request, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::cell::RefCell;
use vidarr_api_models::ErrorBody;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{AbortSignal, RequestCredentials, RequestInit, Url};

/// Shared REST client for the portal API.
#[derive(Debug, Default)]
pub(crate) struct ApiClient {
    base_url: String,
    csrf_token: RefCell<Option<String>>,
}

impl ApiClient {
    /// Create a client rooted at `base_url` (no trailing slash).
    pub(crate) fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            csrf_token: RefCell::new(None),
        }
    }

    /// Record the CSRF token returned by the session bootstrap.
    pub(crate) fn set_csrf_token(&self, token: impl Into<String>) {
        *self.csrf_token.borrow_mut() = Some(token.into());
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url.trim_end_matches('/'))
    }

    fn with_csrf(&self, builder: Request) -> Request {
        let builder = builder.credentials(RequestCredentials::Include);
        match self.csrf_token.borrow().as_deref() {
            Some(token) => builder.header("X-Csrf-Token", token),
            None => builder,
        }
    }

    /// GET a JSON payload.
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = Request::get(&self.url(path))
            .credentials(RequestCredentials::Include)
            .send()
            .await
            .map_err(|err| ApiError::Transport(err.to_string()))?;
        parse_json(response).await
    }

    /// GET a JSON payload, abortable through `signal`. Uses the raw fetch
    /// API so the abort signal can be attached to the request.
    pub(crate) async fn get_json_with_signal<T: DeserializeOwned>(
        &self,
        path: &str,
        signal: &AbortSignal,
    ) -> Result<T, ApiError> {
        let init = RequestInit::new();
        init.set_method("GET");
        init.set_credentials(RequestCredentials::Include);
        init.set_signal(Some(signal));
        let request = web_sys::Request::new_with_str_and_init(&self.url(path), &init)
            .map_err(|err| ApiError::Transport(format!("{err:?}")))?;
        let response = JsFuture::from(window().fetch_with_request(&request))
            .await
            .map_err(|err| ApiError::Transport(format!("{err:?}")))?;
        let response: web_sys::Response = response
            .dyn_into()
            .map_err(|_| ApiError::Transport("fetch returned a non-response".to_string()))?;
        let status = response.status();
        let text_promise = response
            .text()
            .map_err(|err| ApiError::Transport(format!("{err:?}")))?;
        let text = JsFuture::from(text_promise)
            .await
            .map_err(|err| ApiError::Transport(format!("{err:?}")))?
            .as_string()
            .unwrap_or_default();
        if !response.ok() {
            let body = serde_json::from_str::<ErrorBody>(&text).unwrap_or_default();
            return Err(ApiError::from_response(status, body));
        }
        serde_json::from_str::<T>(&text).map_err(|err| ApiError::Transport(err.to_string()))
    }

    /// POST a JSON body and parse a JSON response.
    pub(crate) async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self
            .with_csrf(Request::post(&self.url(path)))
            .json(body)
            .map_err(|err| ApiError::Transport(err.to_string()))?
            .send()
            .await
            .map_err(|err| ApiError::Transport(err.to_string()))?;
        parse_json(response).await
    }

    /// POST without a body, ignoring any response payload.
    pub(crate) async fn post_empty(&self, path: &str) -> Result<(), ApiError> {
        let response = self
            .with_csrf(Request::post(&self.url(path)))
            .send()
            .await
            .map_err(|err| ApiError::Transport(err.to_string()))?;
        ensure_ok(response).await
    }

    /// PUT a JSON body and parse a JSON response.
    pub(crate) async fn put_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self
            .with_csrf(Request::put(&self.url(path)))
            .json(body)
            .map_err(|err| ApiError::Transport(err.to_string()))?
            .send()
            .await
            .map_err(|err| ApiError::Transport(err.to_string()))?;
        parse_json(response).await
    }

    /// DELETE, ignoring any response payload.
    pub(crate) async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let response = self
            .with_csrf(Request::delete(&self.url(path)))
            .send()
            .await
            .map_err(|err| ApiError::Transport(err.to_string()))?;
        ensure_ok(response).await
    }
}

async fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    if !response.ok() {
        return Err(classify(response).await);
    }
    response
        .json::<T>()
        .await
        .map_err(|err| ApiError::Transport(err.to_string()))
}

async fn ensure_ok(response: Response) -> Result<(), ApiError> {
    if response.ok() {
        Ok(())
    } else {
        Err(classify(response).await)
    }
}

async fn classify(response: Response) -> ApiError {
    let status = response.status();
    let body = response
        .json::<ErrorBody>()
        .await
        .unwrap_or_default();
    ApiError::from_response(status, body)
}

/// API base URL derived from the page location, mapping the dev-server port
/// onto the API port so `trunk serve` works against a local backend.
pub(crate) fn api_base_url() -> String {
    let href = window()
        .location()
        .href()
        .unwrap_or_else(|_| "http://localhost:8080".to_string());

    if let Ok(url) = Url::new(&href) {
        let protocol = url.protocol();
        let host = url.hostname();
        let port = url.port();
        let mapped_port = match port.as_str() {
            "" => None,
            "8080" => Some("5055".to_string()),
            other => Some(other.to_string()),
        };

        let mut base = format!("{protocol}//{host}");
        if let Some(port) = mapped_port {
            base.push(':');
            base.push_str(&port);
        }
        return base;
    }

    "http://localhost:5055".to_string()
}
