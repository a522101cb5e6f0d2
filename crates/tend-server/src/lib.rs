//! HTTP server for the Tend routine store.
//!
//! Routes are served both at the root and below `/api`:
//!
//! ```text
//! GET    /routines                               list
//! POST   /routines                               create   (201)
//! GET    /routines/{id}                          fetch
//! PUT    /routines/{id}                          replace
//! DELETE /routines/{id}                          delete   (204)
//! PATCH  /routines/{routineId}/steps/{stepId}    set completion
//! GET    /healthz                                liveness
//! ```
//!
//! Errors use the body `{ "error": "<code>", "message": "<text>" }`.

use std::{future::Future, io, net::SocketAddr};

use axum::{
    routing::{get, patch},
    Router,
};
use log::info;
use tend_core::RoutineStore;
use tokio::net::TcpListener;

pub mod errors;
pub mod handlers;

/// Shared state of all handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub store: RoutineStore,
}

/// Builds the router with every route mounted at `/` and `/api`.
pub fn build_router(state: AppState) -> Router {
    let routes = Router::new()
        .route(
            "/routines",
            get(handlers::list_routines).post(handlers::create_routine),
        )
        .route(
            "/routines/{id}",
            get(handlers::get_routine)
                .put(handlers::replace_routine)
                .delete(handlers::delete_routine),
        )
        .route(
            "/routines/{routine_id}/steps/{step_id}",
            patch(handlers::set_step_completion),
        );

    Router::new()
        .route("/healthz", get(handlers::health))
        .nest("/api", routes.clone())
        .merge(routes)
        .with_state(state)
}

/// Binds `addr` and serves until SIGINT or SIGTERM.
pub async fn serve(addr: SocketAddr, store: RoutineStore) -> io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    serve_listener(listener, store, shutdown_signal()).await
}

/// Serves on an already bound listener until `shutdown` resolves.
pub async fn serve_listener<F>(listener: TcpListener, store: RoutineStore, shutdown: F) -> io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    info!("Routine API listening on http://{}", listener.local_addr()?);

    axum::serve(listener, build_router(AppState { store }))
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("Routine API shutdown complete");
    Ok(())
}

#[cfg(unix)]
async fn shutdown_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    let (mut sigint, mut sigterm) = match (
        signal(SignalKind::interrupt()),
        signal(SignalKind::terminate()),
    ) {
        (Ok(sigint), Ok(sigterm)) => (sigint, sigterm),
        (Err(e), _) | (_, Err(e)) => {
            log::error!("Failed to install signal handlers: {e}");
            return std::future::pending().await;
        }
    };

    tokio::select! {
        _ = sigint.recv() => info!("Received SIGINT, shutting down gracefully..."),
        _ = sigterm.recv() => info!("Received SIGTERM, shutting down gracefully..."),
    }
}

#[cfg(not(unix))]
async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Received Ctrl-C, shutting down gracefully...");
    }
}
