//! HTTP surface for the user service.
//!
//! Routes:
//!
//! | Method | Path          | Auth   | Success                       |
//! |--------|---------------|--------|-------------------------------|
//! | POST   | `/login`      | none   | 200 `{message, token}`        |
//! | GET    | `/health`     | none   | 200 `{status, users, time}`   |
//! | GET    | `/items`      | bearer | 200 `[User...]`               |
//! | GET    | `/items/{id}` | bearer | 200 `User`                    |
//! | POST   | `/items`      | bearer | 201 `{message, user}`         |
//! | PUT    | `/items/{id}` | bearer | 200 `{message, user}`         |
//! | DELETE | `/items/{id}` | bearer | 200 `{message}`               |
//!
//! Every failure is a `{ "message": ... }` body with a fixed text per error kind.
//! Cross-origin requests are allowed on every route, preflights included.

use std::{net::SocketAddr, sync::Arc};

use axum::{
    Router,
    middleware,
    routing::{get, post},
};
use tokio::{sync::oneshot, task::JoinHandle};
use tower_http::cors::CorsLayer;

use crate::{
    Result,
    auth::{AccessGate, Credentials, SessionToken},
    clock::{Clock, SystemClock},
    constants::{DEFAULT_HOST, DEFAULT_PORT, DEFAULT_TOKEN},
    service::UserService,
    store::UserStore,
};

mod errors;
mod handlers;
pub mod messages;

pub use errors::ServerError;

/// Settings for [`ApiServer::start`].
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    /// `0` picks a free port.
    pub port: u16,
    pub credentials: Credentials,
    pub token: SessionToken,
    /// Start with the three seed records instead of an empty store.
    pub seed: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            credentials: Credentials::default(),
            token: DEFAULT_TOKEN.to_string(),
            seed: true,
        }
    }
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Build the gate and store this configuration describes.
    pub fn build_service(&self, clock: Arc<dyn Clock>) -> Result<UserService> {
        let gate = AccessGate::new(self.credentials.clone(), self.token.clone())?;
        let store = if self.seed {
            UserStore::seeded(clock)
        } else {
            UserStore::with_clock(clock)
        };
        Ok(UserService::new(gate, store))
    }
}

/// Build the router over a service handle.
pub fn router(service: UserService) -> Router {
    Router::new()
        .route("/health", get(handlers::handle_health))
        .route("/login", post(handlers::handle_login))
        .route(
            "/items",
            get(handlers::handle_list).post(handlers::handle_create),
        )
        .route(
            "/items/{id}",
            get(handlers::handle_get)
                .put(handlers::handle_update)
                .delete(handlers::handle_delete),
        )
        .layer(CorsLayer::permissive())
        .layer(middleware::from_fn(handlers::trace_request))
        .with_state(service)
}

/// A running HTTP server.
///
/// Dropping it without calling [`ApiServer::stop`] still signals shutdown, but does not
/// wait for in-flight requests.
pub struct ApiServer {
    service: UserService,
    local_addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<std::io::Result<()>>>,
}

impl ApiServer {
    /// Bind according to `config` and start serving on the system clock.
    pub async fn start(config: &ServerConfig) -> Result<Self> {
        let service = config.build_service(Arc::new(SystemClock))?;
        Self::start_with_service(&config.address(), service).await
    }

    /// Bind `address` and serve an existing service handle.
    ///
    /// Returns once the listener is bound, so the reported address is usable
    /// immediately.
    pub async fn start_with_service(address: &str, service: UserService) -> Result<Self> {
        let listener = tokio::net::TcpListener::bind(address)
            .await
            .map_err(|e| bind_error(address, e))?;
        let local_addr = listener.local_addr()?;

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let app = router(service.clone());

        let task = tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = shutdown_rx.await;
                })
                .await
        });

        tracing::info!(%local_addr, "Server listening");
        Ok(Self {
            service,
            local_addr,
            shutdown: Some(shutdown_tx),
            task: Some(task),
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Base URL such as `http://127.0.0.1:5000`.
    pub fn url(&self) -> String {
        format!("http://{}", self.local_addr)
    }

    pub fn service(&self) -> &UserService {
        &self.service
    }

    /// Trigger graceful shutdown and wait for the serving task to finish.
    pub async fn stop(mut self) -> Result<()> {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(task) = self.task.take() {
            let outcome = task
                .await
                .map_err(|e| e.to_string())
                .and_then(|served| served.map_err(|e| e.to_string()));
            if let Err(reason) = outcome {
                return Err(ServerError::Runtime { reason }.into());
            }
        }
        tracing::info!(local_addr = %self.local_addr, "Server stopped");
        Ok(())
    }
}

impl Drop for ApiServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

fn bind_error(address: &str, err: std::io::Error) -> ServerError {
    if err.kind() == std::io::ErrorKind::AddrInUse {
        ServerError::AddressInUse {
            address: address.to_string(),
        }
    } else {
        ServerError::Bind {
            address: address.to_string(),
            reason: err.to_string(),
        }
    }
}
