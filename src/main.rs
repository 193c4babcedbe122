use anyhow::Context;
use axum::extract::State;
use dotenv::dotenv;
use std::env;
use std::sync::Arc;
use tracing::info;

mod api;
mod app_env;
mod db;
mod domain;
mod dto;
mod entity;
mod external_connections;
mod logging;
mod persistence;
mod routes;
mod routing_utils;

/// Data which is shared between every request handler
pub struct SharedData {
    pub ext_cxn: persistence::ExternalConnectivity,
}

pub type AppState = State<Arc<SharedData>>;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenv().ok();
    let otel_exporters = logging::exporters_from_env()?;
    let env_filter = logging::init_env_filter()?;
    logging::setup_logging_and_tracing(env_filter, otel_exporters);

    let db_url = env::var(app_env::DB_URL)
        .with_context(|| format!("reading the {} environment variable", app_env::DB_URL))?;
    let sqlx_db_connection = db::connect_sqlx(&db_url).await?;
    db::ensure_schema(&sqlx_db_connection).await?;

    let host = env::var(app_env::SERVER_HOST).unwrap_or_else(|_| app_env::DEFAULT_SERVER_HOST.to_owned());
    let port = match env::var(app_env::SERVER_PORT) {
        Ok(raw_port) => raw_port.parse::<u16>().with_context(|| {
            format!("parsing {}={raw_port} as a port number", app_env::SERVER_PORT)
        })?,
        Err(_) => app_env::DEFAULT_SERVER_PORT,
    };

    let shared_data = Arc::new(SharedData {
        ext_cxn: persistence::ExternalConnectivity::new(sqlx_db_connection),
    });
    let router = routes::build_router(shared_data);

    let listener = tokio::net::TcpListener::bind((host.as_str(), port))
        .await
        .with_context(|| format!("binding to {host}:{port}"))?;
    info!("Starting server on {host}:{port}");
    axum::serve(listener, router)
        .await
        .context("running the HTTP server")?;

    Ok(())
}
