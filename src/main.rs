use actix_cors::Cors;
use actix_files::Files;
use actix_web::{App, HttpServer, web};
use anyhow::Result;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing_subscriber::EnvFilter;

use prize_draw::{AppState, SystemClock, config, configure, connection};

#[actix_web::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let config = config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let db_conn = connection::conn(&config.database_path)?;
    let state = web::Data::new(AppState::new(
        Arc::new(Mutex::new(db_conn)),
        Arc::new(SystemClock),
    ));

    let static_dir = config.static_dir.clone();
    tracing::info!("🎟️ Backend listening on {}:{}", config.host, config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .app_data(state.clone())
            .configure(configure)
            .service(Files::new("/static", &static_dir))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
    .inspect_err(|e| {
        tracing::error!("serving error: {:?}", e);
    })?;

    Ok(())
}
