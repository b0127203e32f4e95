//! Markwave Web Server
//!
//! Axum-based HTTP surface for the referral backend.

pub mod routes;
pub mod state;

use axum::{
    routing::{get, post},
    Router,
};
use markwave_core::ReferralStore;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    // Permissive CORS: the form-and-table frontend is served from a
    // different origin during development.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(routes::health::health))
        .route("/users/", post(routes::users::create_user))
        .route("/users/referrals", get(routes::users::list_referrals))
        .route("/users/customers", get(routes::users::list_customers))
        .route("/users/verify", post(routes::users::verify_user))
        .route("/purchases/", post(routes::purchases::create_purchase))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Run the web server.
pub async fn run_server(store: Arc<dyn ReferralStore>, port: u16) -> anyhow::Result<()> {
    let state = AppState::new(store);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port)).await?;
    tracing::info!("Web server listening on http://127.0.0.1:{}", port);

    axum::serve(listener, app).await?;
    Ok(())
}
