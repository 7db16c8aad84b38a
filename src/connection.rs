use anyhow::{Context, Result};
use rusqlite::Connection;
use std::fs;
use std::path::Path;

pub fn conn(database_path: &str) -> Result<Connection> {
    if let Some(parent) = Path::new(database_path).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
    }

    let conn = Connection::open(database_path)
        .with_context(|| format!("Failed to open database at {}", database_path))?;

    // Initialize the database tables
    crate::database::create_tables(&conn)?;

    tracing::info!("📁 Database ready at {}", database_path);
    Ok(conn)
}

/// Fresh store that lives as long as the returned connection.
pub fn in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory()?;
    crate::database::create_tables(&conn)?;
    Ok(conn)
}
