use std::sync::Arc;

use anyhow::Result;
use axum::{
    Router,
    http::{HeaderName, HeaderValue, Method, header},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use formforge::{
    config::Config,
    generator::{FormGenerator, GeminiGenerator},
    routes::AppState,
};

fn cors_layer(origin: &str) -> Result<CorsLayer> {
    Ok(CorsLayer::new()
        .allow_origin(HeaderValue::from_str(origin)?)
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
            HeaderName::from_static("x-requested-with"),
        ]))
}

pub async fn serve(
    config: Config,
    host_override: Option<String>,
    port_override: Option<u16>,
) -> Result<()> {
    tracing::info!("Starting formforge server...");

    let host = host_override.unwrap_or(config.server.host.to_owned());
    let port = port_override.unwrap_or(config.server.port);

    // write pool first, it creates the file and switches it to WAL
    let write_pool = formforge::db::create_write_pool(&config.database.url).await?;
    let read_pool =
        formforge::db::create_read_pool(&config.database.url, config.database.max_connections)
            .await?;

    if config.gemini.api_key.is_empty() {
        tracing::warn!("gemini.api_key is not set, form generation requests will fail");
    }

    let generator: Arc<dyn FormGenerator> = Arc::new(GeminiGenerator::new(config.gemini.clone()));
    let cors_origin = config.cors.origin.to_owned();

    let state = AppState::new(
        config,
        formforge_shared::State {
            read_db: read_pool.clone(),
            write_db: write_pool.clone(),
        },
        generator,
    );

    let mut app: Router = formforge::routes::router(state);

    if let Some(origin) = cors_origin {
        tracing::info!(%origin, "CORS enabled");
        app = app.layer(cors_layer(&origin)?);
    }

    let app = app.layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Closing database pools...");
    read_pool.close().await;
    write_pool.close().await;

    tracing::info!("Graceful shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
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
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal");
        },
    }

    tracing::info!("Starting graceful shutdown...");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cors_layer_accepts_origin() {
        assert!(cors_layer("http://localhost:5173").is_ok());
        assert!(cors_layer("bad\norigin").is_err());
    }
}
