use axum::{routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

pub mod handlers;
pub mod state;

pub use state::AppState;

pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/api/topics", get(handlers::list_topics))
        .route("/api/news", get(handlers::top_headlines))
        .route("/api/news/:topic", get(handlers::topic))
        .layer(cors)
        .with_state(Arc::new(state))
}

pub async fn serve(state: AppState, addr: SocketAddr) -> ng_core::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("🌐 Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, create_app(state)).await?;
    Ok(())
}

pub mod prelude {
    pub use crate::AppState;
    pub use ng_core::{Error, PageView, Result};
}
