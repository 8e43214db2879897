mod config;
mod handlers;
mod models;
mod services;
mod utils;

use std::sync::Arc;

use actix_web::{middleware, web, App, HttpServer};
use anyhow::Context;
use config::Config;
use services::{GitHubClient, IssueCreator};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Load configuration; nothing listens until this succeeds
    let config = Config::from_env().context("Failed to load configuration")?;
    let server_address = config.server_address();

    log::info!("Starting tag watch server...");
    log::info!("Configuration loaded successfully");

    let issues: Arc<dyn IssueCreator> =
        Arc::new(GitHubClient::new(&config).context("Failed to build GitHub client")?);
    let issues = web::Data::from(issues);
    let config = web::Data::new(config);

    log::info!("Webhook server running on http://{server_address}/webhook");

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(config.clone())
            .app_data(issues.clone())
            .route("/webhook", web::post().to(handlers::github_webhook))
    })
    .bind(&server_address)
    .with_context(|| format!("Failed to bind {server_address}"))?
    .run()
    .await?;

    Ok(())
}
