use anyhow::{Context, Result};
use axum::middleware::from_fn;
use dotenvy::dotenv;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

mod components;
mod config;
mod controllers;
mod errors;
mod middleware;
mod models;
mod pdf;
mod prop_val;
mod routes;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,propsheet=debug".into()),
        )
        .init();

    let config = config::Config::from_env()?;
    let db = create_pg_pool(&config).await?;
    sqlx::migrate!()
        .run(&db)
        .await
        .context("failed to apply migrations")?;

    let state = models::AppState {
        store: Arc::new(prop_val::db_ops::PgStore::new(db)),
        pdf: Arc::new(pdf::WkHtmlToPdf::new(&config.wkhtmltopdf)),
    };
    let app = routes::get_routes()
        .layer(from_fn(middleware::html_headers))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    tracing::info!("listening on {}", config.listen_addr);
    axum::Server::bind(&config.listen_addr)
        .serve(app.into_make_service())
        .await
        .context("server exited")?;

    Ok(())
}

async fn create_pg_pool(
    config: &config::Config,
) -> Result<sqlx::Pool<sqlx::Postgres>> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await
        .context("pool to be able to connect")
}
