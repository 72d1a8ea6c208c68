use std::rc::Rc;

use reqwest::{header::AUTHORIZATION, Client, Method};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::{
    api::types::ApiError,
    config,
    identity::{classify_path, IdentityKind},
    messages,
    utils::navigation::{default_navigator, Navigator},
};

/// What the gateway needs from the session layer.
pub trait AuthPort {
    /// Token of the identity currently logged in as `kind`, if any.
    fn bearer_token(&self, kind: IdentityKind) -> Option<String>;
    /// Runs the logout cascade of `kind` after the server rejected its token.
    /// Returns `false` when that identity was already logged out.
    fn on_unauthorized(&self, kind: IdentityKind) -> bool;
}

/// Port used when no session layer is wired in. Requests go out unauthenticated.
#[derive(Debug, Clone, Copy, Default)]
pub struct Anonymous;

impl AuthPort for Anonymous {
    fn bearer_token(&self, _kind: IdentityKind) -> Option<String> {
        None
    }

    fn on_unauthorized(&self, _kind: IdentityKind) -> bool {
        false
    }
}

enum Credentials<'a> {
    Session,
    Token(&'a str),
}

/// The single chokepoint for REST calls: attaches the right bearer token,
/// turns responses into `Result<T, ApiError>` and handles 401s.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Option<String>,
    auth: Rc<dyn AuthPort>,
    navigator: Rc<dyn Navigator>,
}

impl ApiClient {
    pub fn new(auth: Rc<dyn AuthPort>) -> Self {
        Self {
            client: Client::new(),
            base_url: None,
            auth,
            navigator: default_navigator(),
        }
    }

    pub fn new_with_base_url(base_url: impl Into<String>, auth: Rc<dyn AuthPort>) -> Self {
        Self {
            base_url: Some(base_url.into()),
            ..Self::new(auth)
        }
    }

    pub fn with_navigator(mut self, navigator: Rc<dyn Navigator>) -> Self {
        self.navigator = navigator;
        self
    }

    pub fn navigator(&self) -> Rc<dyn Navigator> {
        Rc::clone(&self.navigator)
    }

    async fn resolved_base_url(&self) -> String {
        if let Some(base) = &self.base_url {
            base.clone()
        } else {
            config::await_api_base_url().await
        }
    }

    async fn send<B, T>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        query: &[(&str, String)],
        credentials: Credentials<'_>,
    ) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let kind = classify_path(path);
        let base_url = self.resolved_base_url().await;
        let mut request = self
            .client
            .request(method.clone(), format!("{}{}", base_url, path));

        // Probes with an explicit token leave 401 handling to their caller.
        let intercept = matches!(credentials, Credentials::Session);
        let token = match credentials {
            Credentials::Session => self.auth.bearer_token(kind),
            Credentials::Token(token) => Some(token.to_string()),
        };
        if let Some(token) = token {
            request = request.header(AUTHORIZATION, format!("Bearer {}", token));
        }
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|err| {
            log::warn!("{} {} failed: {}", method, path, err);
            ApiError::connection(messages::CONNECTION_FAILED)
        })?;

        let status = response.status().as_u16();
        let text = response.text().await.unwrap_or_default();
        let payload = if text.trim().is_empty() {
            Some(Value::Null)
        } else {
            serde_json::from_str::<Value>(&text).ok()
        };

        if status == 401 && intercept {
            self.handle_unauthorized(kind, path);
        }

        if !(200..300).contains(&status) {
            return Err(ApiError::from_response(status, payload));
        }

        let payload = payload.ok_or_else(|| ApiError::decode(messages::UNEXPECTED_RESPONSE))?;
        serde_json::from_value(payload).map_err(|err| {
            log::warn!("{} {} returned an unexpected body: {}", method, path, err);
            ApiError::decode(messages::UNEXPECTED_RESPONSE)
        })
    }

    fn handle_unauthorized(&self, kind: IdentityKind, path: &str) {
        if !self.auth.on_unauthorized(kind) {
            log::debug!("401 on {}, {} session already ended", path, kind.label());
            return;
        }
        log::info!("401 on {}, ended the {} session", path, kind.label());
        let login = kind.login_path();
        if self.navigator.current_path() != login {
            self.navigator.navigate(login);
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send::<(), T>(Method::GET, path, None, &[], Credentials::Session)
            .await
    }

    pub async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        self.send::<(), T>(Method::GET, path, None, query, Credentials::Session)
            .await
    }

    /// GET authorized by an explicit token rather than the live session. A 401
    /// is returned to the caller without touching any session.
    pub async fn get_with_token<T: DeserializeOwned>(
        &self,
        path: &str,
        token: &str,
    ) -> Result<T, ApiError> {
        self.send::<(), T>(Method::GET, path, None, &[], Credentials::Token(token))
            .await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(Method::POST, path, Some(body), &[], Credentials::Session)
            .await
    }

    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send::<(), T>(Method::POST, path, None, &[], Credentials::Session)
            .await
    }

    /// POST without a body, parameters in the query string.
    pub async fn post_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        self.send::<(), T>(Method::POST, path, None, query, Credentials::Session)
            .await
    }

    pub async fn patch<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(Method::PATCH, path, Some(body), &[], Credentials::Session)
            .await
    }

    pub async fn patch_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send::<(), T>(Method::PATCH, path, None, &[], Credentials::Session)
            .await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send::<(), T>(Method::DELETE, path, None, &[], Credentials::Session)
            .await
    }
}
