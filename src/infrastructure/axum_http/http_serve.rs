use std::{net::SocketAddr, sync::Arc, time::Duration};

use anyhow::Result;
use axum::{
    Router,
    http::{
        Method,
        header::{AUTHORIZATION, CONTENT_TYPE},
    },
    routing::get,
};
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

use crate::{
    config::config_model::{DotEnvyConfig, Server},
    domain::{clock::Clock, repositories::promo_codes::PromoCodeRepository},
    infrastructure::axum_http::{default_routers, routers},
};

pub fn build_router<R, C>(server: &Server, promo_code_repository: Arc<R>, clock: Arc<C>) -> Result<Router>
where
    R: PromoCodeRepository + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
{
    let app = Router::new()
        .fallback(default_routers::not_found)
        .nest(
            "/api/v1/promo-codes",
            routers::promo_codes::routes(Arc::clone(&promo_code_repository), Arc::clone(&clock)),
        )
        .nest(
            "/api/v1/admin/promo-codes",
            routers::admin_promo_codes::routes(promo_code_repository, clock),
        )
        .route("/api/v1/health-check", get(default_routers::health_check))
        .layer(TimeoutLayer::new(Duration::from_secs(server.timeout)))
        .layer(RequestBodyLimitLayer::new(
            (server.body_limit * 1024 * 1024).try_into()?,
        ))
        .layer(
            CorsLayer::new()
                .allow_methods([Method::GET, Method::POST])
                .allow_headers([AUTHORIZATION, CONTENT_TYPE])
                .allow_origin(Any),
        )
        .layer(TraceLayer::new_for_http());

    Ok(app)
}

pub async fn start<R, C>(
    config: Arc<DotEnvyConfig>,
    promo_code_repository: Arc<R>,
    clock: Arc<C>,
) -> Result<()>
where
    R: PromoCodeRepository + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
{
    let app = build_router(&config.server, promo_code_repository, clock)?;

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    let listener = TcpListener::bind(addr).await?;

    info!("Server is running on port {}", config.server.port);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "Failed to install CTRL+C signal handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received ctrl+C signal"),
        _ = terminate => info!("Received terminate signal"),
    }
}
