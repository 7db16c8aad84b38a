use crate::types::{DrawRow, DrawUpdate, ParticipantRow, PaymentRow};
use rusqlite::types::Value as SqlValue;
use rusqlite::{Connection, Result, Row, params};
use serde_json::Value;

pub fn create_tables(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS draws (
            id TEXT PRIMARY KEY,
            title TEXT,
            price INTEGER,
            datetime TEXT,
            description TEXT,
            status TEXT,
            winner_json TEXT,
            created_at TEXT
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS participants (
            id TEXT PRIMARY KEY,
            name TEXT,
            phone TEXT,
            draw_id TEXT,
            method TEXT,
            status TEXT,
            created_at TEXT
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS payments (
            id TEXT PRIMARY KEY,
            provider TEXT,
            value TEXT,
            notes TEXT,
            created_at TEXT
        )",
        [],
    )?;

    Ok(())
}

/// Converts a dynamically typed cell without rejecting unexpected affinities.
fn cell_to_json(cell: SqlValue) -> Value {
    match cell {
        SqlValue::Null => Value::Null,
        SqlValue::Integer(i) => Value::from(i),
        SqlValue::Real(f) => serde_json::Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        SqlValue::Text(text) => Value::String(text),
        SqlValue::Blob(bytes) => Value::String(String::from_utf8_lossy(&bytes).into_owned()),
    }
}

fn draw_from_row(row: &Row<'_>) -> Result<DrawRow> {
    Ok(DrawRow {
        id: row.get(0)?,
        title: row.get(1)?,
        price: cell_to_json(row.get(2)?),
        datetime: row.get(3)?,
        description: row.get(4)?,
        status: row.get(5)?,
        winner_json: row.get(6)?,
        created_at: row.get(7)?,
    })
}

fn participant_from_row(row: &Row<'_>) -> Result<ParticipantRow> {
    Ok(ParticipantRow {
        id: row.get(0)?,
        name: row.get(1)?,
        phone: row.get(2)?,
        draw_id: row.get(3)?,
        method: row.get(4)?,
        status: row.get(5)?,
        created_at: row.get(6)?,
    })
}

// Draws

pub fn insert_draw(conn: &Connection, draw: &DrawRow) -> Result<()> {
    conn.execute(
        "INSERT INTO draws (id, title, price, datetime, description, status, winner_json, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            draw.id,
            draw.title,
            draw.price.as_i64(),
            draw.datetime,
            draw.description,
            draw.status,
            draw.winner_json,
            draw.created_at,
        ],
    )?;
    Ok(())
}

pub fn get_all_draws(conn: &Connection) -> Result<Vec<DrawRow>> {
    let mut stmt = conn.prepare(
        "SELECT id, title, price, datetime, description, status, winner_json, created_at
         FROM draws ORDER BY created_at DESC, rowid DESC",
    )?;
    let draw_iter = stmt.query_map([], draw_from_row)?;

    let mut results = Vec::new();
    for draw in draw_iter {
        results.push(draw?);
    }
    Ok(results)
}

/// Overwrites every mutable column. Returns the number of rows touched.
pub fn update_draw(conn: &Connection, id: &str, update: &DrawUpdate) -> Result<usize> {
    conn.execute(
        "UPDATE draws
         SET title = ?1, price = ?2, datetime = ?3, description = ?4, status = ?5, winner_json = ?6
         WHERE id = ?7",
        params![
            update.title,
            update.price,
            update.datetime,
            update.description,
            update.status.as_str(),
            update.winner_json,
            id,
        ],
    )
}

pub fn set_draw_winner(conn: &Connection, id: &str, winner_json: &str) -> Result<usize> {
    conn.execute(
        "UPDATE draws SET winner_json = ?1 WHERE id = ?2",
        params![winner_json, id],
    )
}

// Participants

pub fn insert_participant(conn: &Connection, participant: &ParticipantRow) -> Result<()> {
    conn.execute(
        "INSERT INTO participants (id, name, phone, draw_id, method, status, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            participant.id,
            participant.name,
            participant.phone,
            participant.draw_id,
            participant.method,
            participant.status,
            participant.created_at,
        ],
    )?;
    Ok(())
}

pub fn get_all_participants(conn: &Connection) -> Result<Vec<ParticipantRow>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, phone, draw_id, method, status, created_at
         FROM participants ORDER BY created_at DESC, rowid DESC",
    )?;
    let participant_iter = stmt.query_map([], participant_from_row)?;

    let mut results = Vec::new();
    for participant in participant_iter {
        results.push(participant?);
    }
    Ok(results)
}

/// Participants of `draw_id` with the given status, in registration order.
pub fn get_participants_by_status(
    conn: &Connection,
    draw_id: &str,
    status: &str,
) -> Result<Vec<ParticipantRow>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, phone, draw_id, method, status, created_at
         FROM participants WHERE draw_id = ?1 AND status = ?2 ORDER BY rowid",
    )?;
    let participant_iter = stmt.query_map(params![draw_id, status], participant_from_row)?;

    let mut results = Vec::new();
    for participant in participant_iter {
        results.push(participant?);
    }
    Ok(results)
}

pub fn update_participant(
    conn: &Connection,
    id: &str,
    status: &str,
    name: Option<&str>,
    phone: Option<&str>,
) -> Result<usize> {
    conn.execute(
        "UPDATE participants SET status = ?1, name = ?2, phone = ?3 WHERE id = ?4",
        params![status, name, phone, id],
    )
}

// Payment methods

pub fn insert_payment(conn: &Connection, payment: &PaymentRow) -> Result<()> {
    conn.execute(
        "INSERT INTO payments (id, provider, value, notes, created_at) VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            payment.id,
            payment.provider,
            payment.value,
            payment.notes,
            payment.created_at,
        ],
    )?;
    Ok(())
}

pub fn get_all_payments(conn: &Connection) -> Result<Vec<PaymentRow>> {
    let mut stmt = conn.prepare(
        "SELECT id, provider, value, notes, created_at
         FROM payments ORDER BY created_at DESC, rowid DESC",
    )?;
    let payment_iter = stmt.query_map([], |row| {
        Ok(PaymentRow {
            id: row.get(0)?,
            provider: row.get(1)?,
            value: row.get(2)?,
            notes: row.get(3)?,
            created_at: row.get(4)?,
        })
    })?;

    let mut results = Vec::new();
    for payment in payment_iter {
        results.push(payment?);
    }
    Ok(results)
}

pub fn delete_payment(conn: &Connection, id: &str) -> Result<usize> {
    conn.execute("DELETE FROM payments WHERE id = ?1", [id])
}
