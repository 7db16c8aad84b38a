use anyhow::{Context, Result};
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_path: String,
    pub static_dir: String,
}

pub fn load() -> Result<Config> {
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

    let port = match env::var("PORT") {
        Ok(raw) => raw
            .parse::<u16>()
            .with_context(|| format!("PORT must be a valid port number, got {:?}", raw))?,
        Err(_) => 4000,
    };

    let database_path =
        env::var("DRAWS_DB_PATH").unwrap_or_else(|_| "data/draws.db".to_string());

    let static_dir = env::var("STATIC_DIR").unwrap_or_else(|_| "public".to_string());

    Ok(Config {
        host,
        port,
        database_path,
        static_dir,
    })
}
