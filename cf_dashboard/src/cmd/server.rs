use crate::{
    cmd::{codeforces_client, text_generator},
    modules::handlers::{contests, dashboard, liveness, problems, study_plan, AppState},
};
use anyhow::Result;
use axum::{extract::Extension, routing, Router, Server};
use cf_dashboard_libs::study_plan::TextGenerator;
use clap::Args;
use http::{header::CONTENT_TYPE, Method};
use std::{net::SocketAddr, sync::Arc};
use tower_http::cors::{Any, CorsLayer};

#[derive(Debug, Args)]
pub struct ServerArgs {
    #[arg(long)]
    port: Option<u16>,
}

pub async fn run(args: ServerArgs) -> Result<()> {
    let client = codeforces_client()?;
    tracing::info!("Use Codeforces API at {}", client.base_url());
    let generator = text_generator()?;

    let state = AppState {
        api: Arc::new(client),
        generator: generator.map(|g| Arc::new(g) as Arc<dyn TextGenerator>),
    };
    let app = create_router(state);
    let port = match args.port {
        Some(port) => port,
        None => {
            tracing::warn!("API server will be launched at default port number 8000");
            8000u16
        }
    };
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Server start at port {}", port);
    Server::bind(&addr)
        .serve(app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/dashboard/:handle", routing::get(dashboard))
        .route("/api/contests", routing::get(contests))
        .route("/api/problems", routing::get(problems))
        .route("/api/plan/:handle", routing::get(study_plan))
        .route("/api/liveness", routing::get(liveness))
        .layer(Extension(Arc::new(state)))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET])
                .allow_headers([CONTENT_TYPE]),
        )
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
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
                tracing::error!("Failed to install signal handler: {}", e);
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

    tracing::info!("Shutdown signal received, starting graceful shutdown.");
}
