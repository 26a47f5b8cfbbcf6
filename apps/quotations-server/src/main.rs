//! Quotations server.
//!
//! Run with: cargo run -p quotations-server -- --public-dir public
//!
//! The API lives under `/api`; everything else is served from the public
//! directory. TLS is expected to be terminated in front of this process.

mod config;

use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use clap::Parser;
use quotations_core::QuotationStorage;
use quotations_session::{QuotationService, storage::MemoryStorage};
use quotations_transport::http::create_router;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = Config::parse();

    let service = QuotationService::new(MemoryStorage::new())
        .with_id_policy(config.id_policy.into_policy());
    tracing::info!(id_policy = service.id_policy_name(), "Quotation service ready");

    let app = build_app(Arc::new(service), &config);

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;
    tracing::info!("Server listening on http://{}", config.bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

fn build_app<S>(service: Arc<QuotationService<S>>, config: &Config) -> Router
where
    S: QuotationStorage + 'static,
{
    Router::new()
        .nest("/api", create_router(service))
        .fallback_service(ServeDir::new(&config.public_dir))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    use super::*;

    fn app_with_public(dir: &std::path::Path) -> Router {
        let config = Config::try_parse_from([
            "quotations-server",
            "--public-dir",
            dir.to_str().unwrap(),
        ])
        .unwrap();
        build_app(
            Arc::new(QuotationService::new(MemoryStorage::new())),
            &config,
        )
    }

    async fn get(app: &Router, uri: &str) -> (StatusCode, String) {
        let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let resp = app.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_api_is_mounted_under_prefix() {
        let app = app_with_public(std::path::Path::new("does-not-exist"));

        let (status, body) = get(&app, "/api/quotations?session=s1").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Noam Chomsky"));

        let (status, _) = get(&app, "/quotations?session=s1").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_serves_index_from_public_dir() {
        let dir = std::env::temp_dir().join(format!("quotations-public-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("index.html"), "<h1>quotations</h1>").unwrap();

        let app = app_with_public(&dir);
        let (status, body) = get(&app, "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "<h1>quotations</h1>");

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
