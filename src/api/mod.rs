// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! HTTP surface: transaction submission/listing and monthly reports.

pub mod error;
pub mod handlers;

use crate::config::Settings;
use crate::db::Store;
use anyhow::{Context, Result};
use axum::Router;
use axum::http::{HeaderValue, header};
use axum::routing::get;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub strict_types: bool,
}

pub fn app(state: AppState, allowed_origins: &[String]) -> Router {
    Router::new()
        .route(
            "/transactions/",
            get(handlers::list_transactions).post(handlers::create_transaction),
        )
        .route(
            "/transactions",
            get(handlers::list_transactions).post(handlers::create_transaction),
        )
        .route("/reports/monthly/:year/:month", get(handlers::monthly_report))
        .route("/reports/download/:year/:month", get(handlers::download_report))
        .layer(cors(allowed_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Credentials are allowed, so methods and headers mirror the request
/// instead of using a wildcard.
fn cors(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!(origin = %o, "skipping invalid CORS origin");
                None
            }
        })
        .collect();
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
        .expose_headers([header::CONTENT_DISPOSITION])
}

pub async fn serve(settings: Settings) -> Result<()> {
    let store = Store::open(&settings.db_path)
        .with_context(|| format!("Open DB at {}", settings.db_path.display()))?;
    let state = AppState {
        store,
        strict_types: settings.strict_types,
    };
    let router = app(state, &settings.allowed_origins);

    let listener = tokio::net::TcpListener::bind(settings.bind)
        .await
        .with_context(|| format!("Bind {}", settings.bind))?;
    tracing::info!(
        addr = %settings.bind,
        db = %settings.db_path.display(),
        origins = ?settings.allowed_origins,
        strict_types = settings.strict_types,
        "listening"
    );
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;
    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "could not listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}
