use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

pub mod error;
pub mod holds;
pub mod state;
pub mod worker;

pub use state::AppState;

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .merge(holds::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
