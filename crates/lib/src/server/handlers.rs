//! Route handlers and the error-to-response mapping.

use std::convert::Infallible;

use axum::{
    Json,
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Request, State, rejection::JsonRejection},
    http::{
        HeaderMap, StatusCode,
        header::{AUTHORIZATION, CONTENT_TYPE},
        request::Parts,
    },
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use tracing::Instrument;
use uuid::Uuid;

use crate::{
    Error,
    auth::{AuthError, bearer_token},
    constants::*,
    service::UserService,
    store::StoreError,
    user::{NewUser, User, UserPatch},
};

use super::messages::{HealthResponse, LoginRequest, LoginResponse, MessageBody, UserEnvelope};

/// Error returned from a handler, rendered as `{ "message": ... }`.
#[derive(Debug)]
pub(crate) enum ApiError {
    Core(Error),
    InvalidBody(JsonRejection),
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        ApiError::Core(err)
    }
}

impl ApiError {
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            ApiError::Core(Error::Auth(err)) => match err {
                AuthError::InvalidCredentials => {
                    (StatusCode::UNAUTHORIZED, MSG_INVALID_CREDENTIALS.into())
                }
                AuthError::MissingToken => (StatusCode::UNAUTHORIZED, MSG_TOKEN_REQUIRED.into()),
                AuthError::InvalidToken => (StatusCode::FORBIDDEN, MSG_INVALID_TOKEN.into()),
                other => (StatusCode::INTERNAL_SERVER_ERROR, other.to_string()),
            },
            ApiError::Core(Error::Store(err)) => match err {
                StoreError::MissingFields => (StatusCode::BAD_REQUEST, MSG_FIELDS_REQUIRED.into()),
                StoreError::DuplicateEmail { .. } => {
                    (StatusCode::CONFLICT, MSG_DUPLICATE_EMAIL.into())
                }
                StoreError::NotFound { .. } => (StatusCode::NOT_FOUND, MSG_NOT_FOUND.into()),
            },
            ApiError::Core(other) => (StatusCode::INTERNAL_SERVER_ERROR, other.to_string()),
            ApiError::InvalidBody(_) => (StatusCode::BAD_REQUEST, MSG_INVALID_BODY.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        match &self {
            ApiError::InvalidBody(rejection) => {
                tracing::debug!(%rejection, "Rejected request body");
            }
            ApiError::Core(err) if status.is_server_error() => {
                tracing::error!(error = %err, "Request failed");
            }
            ApiError::Core(err) => {
                tracing::debug!(error = %err, module = err.module(), "Request refused");
            }
        }
        (status, Json(MessageBody::new(message))).into_response()
    }
}

type ApiResult<T> = std::result::Result<T, ApiError>;

/// Token taken from the `Authorization` header, if any.
pub(crate) struct BearerToken(Option<String>);

impl BearerToken {
    fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

impl<S: Send + Sync> FromRequestParts<S> for BearerToken {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(bearer_token)
            .map(str::to_string);
        Ok(BearerToken(token))
    }
}

/// JSON body that falls back to `T::default()` when there is nothing to parse.
///
/// A request without a JSON content type, or with an empty body, yields the default.
/// Only a JSON body that fails to parse or match `T` is rejected.
pub(crate) struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Default,
{
    type Rejection = JsonRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !has_json_content_type(req.headers()) {
            return Ok(JsonBody(T::default()));
        }
        let bytes = Bytes::from_request(req, state).await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(JsonBody(T::default()));
        }
        let Json(value) = Json::<T>::from_bytes(&bytes)?;
        Ok(JsonBody(value))
    }
}

/// `application/json` or any `application/*+json` media type.
fn has_json_content_type(headers: &HeaderMap) -> bool {
    let Some(essence) = headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
    else {
        return false;
    };
    let essence = essence.trim().to_ascii_lowercase();
    essence == "application/json"
        || (essence.starts_with("application/") && essence.ends_with("+json"))
}

/// Wrap each request in a span carrying a fresh request id.
pub(crate) async fn trace_request(request: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4();
    let span = tracing::info_span!(
        "request",
        %request_id,
        method = %request.method(),
        path = %request.uri().path(),
    );
    async move {
        let response = next.run(request).await;
        tracing::info!(status = response.status().as_u16(), "Handled request");
        response
    }
    .instrument(span)
    .await
}

/// Handler for GET /health
pub(crate) async fn handle_health(State(service): State<UserService>) -> Json<HealthResponse> {
    let store = service.store();
    Json(HealthResponse {
        status: "healthy".to_string(),
        users: store.len().await,
        time: store.clock().now_rfc3339(),
    })
}

/// Handler for POST /login
///
/// A missing or unparsable body is treated as empty credentials.
pub(crate) async fn handle_login(
    State(service): State<UserService>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Json<LoginResponse>> {
    let LoginRequest { username, password } = body.map(|Json(b)| b).unwrap_or_default();
    let token = service.login(
        username.as_deref().unwrap_or_default(),
        password.as_deref().unwrap_or_default(),
    )?;
    Ok(Json(LoginResponse {
        message: MSG_LOGIN_OK.to_string(),
        token,
    }))
}

/// Handler for GET /items
pub(crate) async fn handle_list(
    State(service): State<UserService>,
    token: BearerToken,
) -> ApiResult<Json<Vec<User>>> {
    Ok(Json(service.list(token.as_deref()).await?))
}

/// Handler for GET /items/{id}
pub(crate) async fn handle_get(
    State(service): State<UserService>,
    token: BearerToken,
    Path(id): Path<String>,
) -> ApiResult<Json<User>> {
    Ok(Json(service.get(token.as_deref(), &id).await?))
}

/// Handler for POST /items
pub(crate) async fn handle_create(
    State(service): State<UserService>,
    token: BearerToken,
    body: Result<JsonBody<NewUser>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<UserEnvelope>)> {
    // Token check comes before body validation.
    service.gate().authorize(token.as_deref())?;
    let JsonBody(new_user) = body.map_err(ApiError::InvalidBody)?;
    let user = service.create(token.as_deref(), new_user).await?;
    Ok((
        StatusCode::CREATED,
        Json(UserEnvelope {
            message: MSG_CREATED.to_string(),
            user,
        }),
    ))
}

/// Handler for PUT /items/{id}
pub(crate) async fn handle_update(
    State(service): State<UserService>,
    token: BearerToken,
    Path(id): Path<String>,
    body: Result<JsonBody<UserPatch>, JsonRejection>,
) -> ApiResult<Json<UserEnvelope>> {
    service.gate().authorize(token.as_deref())?;
    let JsonBody(patch) = body.map_err(ApiError::InvalidBody)?;
    let user = service.update(token.as_deref(), &id, patch).await?;
    Ok(Json(UserEnvelope {
        message: MSG_UPDATED.to_string(),
        user,
    }))
}

/// Handler for DELETE /items/{id}
pub(crate) async fn handle_delete(
    State(service): State<UserService>,
    token: BearerToken,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageBody>> {
    service.delete(token.as_deref(), &id).await?;
    Ok(Json(MessageBody::new(MSG_DELETED)))
}
