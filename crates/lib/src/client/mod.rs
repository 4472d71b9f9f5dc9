//! HTTP client for a running Userdesk server.
//!
//! Wraps `reqwest` with typed calls for each route. A failed call surfaces the
//! server's `message` text through [`ClientError::Api`].

use std::time::Duration;

use reqwest::{RequestBuilder, header::AUTHORIZATION};
use serde::de::DeserializeOwned;
use url::Url;

use crate::{
    Result,
    auth::{SessionToken, bearer_header},
    server::messages::{HealthResponse, LoginRequest, LoginResponse, MessageBody, UserEnvelope},
    user::{NewUser, User, UserPatch},
};

mod errors;

pub use errors::ClientError;

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: Url,
    token: Option<SessionToken>,
}

impl ApiClient {
    /// Client for the server at `base_url`, e.g. `http://127.0.0.1:5000`.
    pub fn new(base_url: &str) -> Result<Self> {
        Self::build(base_url, reqwest::Client::builder())
    }

    /// Like [`ApiClient::new`] with a per-request timeout.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        Self::build(base_url, reqwest::Client::builder().timeout(timeout))
    }

    fn build(base_url: &str, builder: reqwest::ClientBuilder) -> Result<Self> {
        let invalid = |reason: String| ClientError::InvalidUrl {
            url: base_url.to_string(),
            reason,
        };
        let base = Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme '{}'", base.scheme())).into());
        }
        let http = builder.build().map_err(|e| ClientError::Request {
            reason: e.to_string(),
        })?;
        Ok(Self {
            http,
            base,
            token: None,
        })
    }

    pub fn with_token(mut self, token: impl Into<SessionToken>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Log in and keep the returned token for later calls.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<SessionToken> {
        let body = LoginRequest {
            username: Some(username.to_string()),
            password: Some(password.to_string()),
        };
        let response: LoginResponse = self
            .send(self.http.post(self.endpoint(&["login"])).json(&body))
            .await?;
        self.token = Some(response.token.clone());
        Ok(response.token)
    }

    pub async fn health(&self) -> Result<HealthResponse> {
        self.send(self.http.get(self.endpoint(&["health"]))).await
    }

    pub async fn list_users(&self) -> Result<Vec<User>> {
        self.send(self.authed(self.http.get(self.endpoint(&["items"]))))
            .await
    }

    pub async fn get_user(&self, id: &str) -> Result<User> {
        self.send(self.authed(self.http.get(self.endpoint(&["items", id]))))
            .await
    }

    pub async fn create_user(&self, new_user: &NewUser) -> Result<User> {
        let envelope: UserEnvelope = self
            .send(self.authed(self.http.post(self.endpoint(&["items"])).json(new_user)))
            .await?;
        Ok(envelope.user)
    }

    pub async fn update_user(&self, id: &str, patch: &UserPatch) -> Result<User> {
        let envelope: UserEnvelope = self
            .send(self.authed(self.http.put(self.endpoint(&["items", id])).json(patch)))
            .await?;
        Ok(envelope.user)
    }

    pub async fn delete_user(&self, id: &str) -> Result<()> {
        let _: MessageBody = self
            .send(self.authed(self.http.delete(self.endpoint(&["items", id]))))
            .await?;
        Ok(())
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        // http(s) URLs always have a path, checked in `build`.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn authed(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.header(AUTHORIZATION, bearer_header(token)),
            None => request,
        }
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request.send().await.map_err(|e| ClientError::Request {
            reason: e.to_string(),
        })?;

        let status = response.status();
        if !status.is_success() {
            let message = match response.json::<MessageBody>().await {
                Ok(body) => body.message,
                Err(_) => status.to_string(),
            };
            tracing::debug!(status = status.as_u16(), %message, "Server returned error");
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            }
            .into());
        }

        response.json::<T>().await.map_err(|e| {
            ClientError::Decode {
                reason: e.to_string(),
            }
            .into()
        })
    }
}
