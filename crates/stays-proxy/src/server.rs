use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::info;

use stays_common::liteapi::LiteApiClient;

use crate::routes::{packages, proxy};

/// Shared handler state. Holds nothing mutable: every request is independent.
#[derive(Clone)]
pub struct AppState {
    pub liteapi: Arc<LiteApiClient>,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/hotels", get(proxy::search_hotels))
        .route("/hotel/{id}", get(proxy::hotel_details))
        .route("/rates", post(proxy::rates))
        .route("/hotels/rates", post(proxy::hotel_rates))
        .route("/hotels/min-rates", post(proxy::min_rates))
        .route("/rates/prebook", post(proxy::prebook))
        .route("/rates/book", post(proxy::book))
        .route("/bookings", get(proxy::list_bookings))
        .route(
            "/bookings/{id}",
            get(proxy::booking_details).delete(proxy::cancel_booking),
        )
        .route("/data/cities", get(proxy::cities))
        .route("/data/countries", get(proxy::countries))
        .route("/data/facilities", get(proxy::facilities))
        .route("/data/reviews", get(proxy::reviews))
        .route("/packages", get(packages::list_packages))
        .route("/packages/{id}", get(packages::package_details))
        .route("/destinations", get(packages::destinations))
        .route("/rates/minimum", post(packages::minimum_rates))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Resolves on Ctrl+C, or SIGTERM on unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutdown signal received");
}
