//! LSS Analytics server binary.

use std::sync::Arc;

use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use lss_analytics::adapters::{
    app_router, default_parsers, exporter_for, AppState, BcryptHasher, CsvUserStore,
    SessionRegistry, SessionTokenSigner,
};
use lss_analytics::application::ScreenRouter;
use lss_analytics::config::AppConfig;
use lss_analytics::domain::report::ExportFormat;

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    if config.is_production() {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;
    init_tracing(&config);

    let users = Arc::new(CsvUserStore::new(&config.storage.users_file));
    let hasher = Arc::new(BcryptHasher::new(config.auth.bcrypt_cost));
    let router = ScreenRouter::new(
        users,
        hasher,
        default_parsers(),
        vec![exporter_for(ExportFormat::Csv), exporter_for(ExportFormat::Pdf)],
        config.limits.capacity(),
        config.limits.preview_rows,
    );
    let signer = SessionTokenSigner::new(config.auth.secret_key.clone());

    let sessions = SessionRegistry::new(
        config.session.idle_timeout(),
        config.session.max_sessions,
    );
    let state = AppState::new(router, sessions, signer);

    let registry = state.sessions.clone();
    let mut sweep = tokio::time::interval(config.session.sweep_interval());
    tokio::spawn(async move {
        loop {
            sweep.tick().await;
            registry.sweep();
        }
    });

    let app = app_router(state)
        .layer(TimeoutLayer::new(config.server.request_timeout()))
        .layer(TraceLayer::new_for_http());

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(
        %addr,
        users_file = %config.storage.users_file.display(),
        "LSS Analytics listening"
    );
    axum::serve(listener, app).await?;

    Ok(())
}
