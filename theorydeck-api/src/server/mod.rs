// Server module - HTTP server setup and routing
pub mod auth;
pub mod extract;
pub mod handlers;
pub mod state;

use axum::{
    routing::{get, patch, post},
    Router,
};
use std::net::SocketAddr;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use self::state::AppState;

/// Create the Axum application router with all routes and middleware
pub fn create_app(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/users", post(handlers::users::register).get(handlers::users::list_users))
        .route("/users/:id", patch(handlers::users::update_user))
        .route(
            "/theories",
            get(handlers::theories::list_theories).post(handlers::theories::create_theory),
        )
        .route(
            "/theories/:theory",
            get(handlers::theories::get_theory)
                .patch(handlers::theories::update_theory)
                .delete(handlers::theories::delete_theory),
        )
        .route("/theories/:theory/status", patch(handlers::theories::set_theory_status))
        .route("/evidence-cards", post(handlers::evidence::create_card))
        .route(
            "/evidence-cards/:id",
            patch(handlers::evidence::update_card).delete(handlers::evidence::delete_card),
        )
        .route(
            "/evidence-cards/:id/vote",
            post(handlers::votes::submit_vote).delete(handlers::votes::remove_vote),
        )
        .route("/evidence", post(handlers::evidence::create_card))
        .route("/votes", post(handlers::votes::submit_vote_by_body))
        .route(
            "/reports",
            post(handlers::reports::create_report).get(handlers::reports::list_reports),
        )
        .route("/reports/:id", patch(handlers::reports::resolve_report))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Run the server on the specified address until Ctrl+C is received
pub async fn run_server(app: Router, addr: SocketAddr) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server listening on {}", addr);
    info!("- Theories endpoint: http://{}/theories", addr);
    info!("- Health endpoint: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received, draining connections");
}
