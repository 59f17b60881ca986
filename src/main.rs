use actix_web::{App, HttpServer, web};
use clap::Parser;
use std::path::Path;
use tracing::info;
use tracing_subscriber::{
    filter::LevelFilter, layer::SubscriberExt, registry::LookupSpan, util::SubscriberInitExt, Layer,
};

mod api;
mod cli;
mod config;
mod db;
mod shutdown;
mod slug;
mod storage;

use crate::api::{application::ApplicationService, job::JobService, validation};
use crate::cli::{Cli, Command};
use crate::shutdown::ShutdownCoordinator;
use crate::storage::ResumeStorage;

/// Daily rolling file receiving events at `level` and above
fn file_layer<S>(log_dir: &Path, name: &str, level: LevelFilter) -> impl Layer<S>
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    tracing_subscriber::fmt::layer()
        .with_writer(tracing_appender::rolling::daily(log_dir, name))
        .with_ansi(false)
        .with_filter(level)
}

/// Console output plus one rolling file per level in `log_dir`,
/// e.g. logs/info.log.2024-12-22
fn init_tracing(log_dir: &Path) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info".into());

    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stdout)
        .with_ansi(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer(log_dir, "info.log", LevelFilter::INFO))
        .with(file_layer(log_dir, "warn.log", LevelFilter::WARN))
        .with(file_layer(log_dir, "error.log", LevelFilter::ERROR))
        .with(file_layer(log_dir, "debug.log", LevelFilter::DEBUG))
        .init();
}

fn startup_error(context: &str, e: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::other(format!("{}: {}", context, e))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let cli = Cli::parse();

    let config::Config {
        database_url,
        max_payload_size,
        max_db_connections,
        log_dir,
        media_root,
        host,
        port,
    } = config::Config::from_env().map_err(|e| startup_error("Failed to load configuration", e))?;

    std::fs::create_dir_all(&log_dir)?;
    init_tracing(&log_dir);

    info!("Starting job-board application");
    info!("  - Max payload size: {} bytes", max_payload_size);
    info!("  - Max database connections: {}", max_db_connections);
    info!("  - Media root: {}", media_root.display());

    let pool = db::connection::get_connection(&database_url, max_db_connections)
        .await
        .map_err(|e| startup_error("Failed to connect to database", e))?;

    db::migrations::run_migrations(&pool)
        .await
        .map_err(|e| startup_error("Failed to run database migrations", e))?;

    if cli.command() == Command::Migrate {
        pool.close().await;
        return Ok(());
    }

    std::fs::create_dir_all(&media_root)?;
    let storage = ResumeStorage::new(media_root);

    let server_pool = pool.clone();
    let server = HttpServer::new(move || {
        let job_service = web::Data::new(JobService::new(server_pool.clone()));
        let application_service = web::Data::new(ApplicationService::new(
            server_pool.clone(),
            storage.clone(),
        ));

        App::new()
            .app_data(web::Data::new(server_pool.clone()))
            .app_data(job_service)
            .app_data(application_service)
            .app_data(web::PayloadConfig::default().limit(max_payload_size))
            .app_data(validation::multipart_config(max_payload_size))
            .app_data(validation::json_config())
            .app_data(validation::query_config())
            .app_data(validation::path_config())
            .configure(api::configure)
    });

    info!("Server starting on http://{}:{}", host, port);

    let server = server.bind((host.as_str(), port))?.run();
    let server_handle = server.handle();
    let server_task = tokio::spawn(server);

    ShutdownCoordinator::new(server_handle, server_task, pool)
        .wait_for_shutdown()
        .await
}
