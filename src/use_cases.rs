use rusqlite::{Connection, TransactionBehavior};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};
use uuid::Uuid;

use crate::database::*;
use crate::error::ApiError;
use crate::types::*;
use crate::utils::{Clock, format_timestamp, pick_index, random_seed};

pub type SharedConnection = Arc<Mutex<Connection>>;

/// Treats an empty string the same as an absent field.
fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// `null`, `false`, `0`, `""` mean "no winner" and clear the column.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

pub struct DrawUseCase {
    connection: SharedConnection,
    clock: Arc<dyn Clock>,
}

impl DrawUseCase {
    pub fn new(connection: SharedConnection, clock: Arc<dyn Clock>) -> Self {
        Self { connection, clock }
    }

    pub async fn list(&self) -> Result<Vec<DrawRow>, ApiError> {
        let conn = self.connection.lock().await;
        Ok(get_all_draws(&conn)?)
    }

    pub async fn create(&self, request: CreateDrawRequest) -> Result<String, ApiError> {
        let draw = DrawRow {
            id: Uuid::new_v4().to_string(),
            title: request.title,
            price: Value::from(request.price.unwrap_or(0)),
            datetime: Some(present(request.datetime).unwrap_or_default()),
            description: Some(present(request.description).unwrap_or_default()),
            status: DrawStatus::Inactive.as_str().to_string(),
            winner_json: None,
            created_at: format_timestamp(&self.clock.now()),
        };

        let conn = self.connection.lock().await;
        insert_draw(&conn, &draw)?;

        info!("🎁 Created draw {}", draw.id);
        Ok(draw.id)
    }

    pub async fn update(&self, id: &str, request: UpdateDrawRequest) -> Result<(), ApiError> {
        let status = match present(request.status) {
            Some(raw) => raw.parse::<DrawStatus>().inspect_err(|_| {
                warn!("Rejected draw update {}: unknown status {:?}", id, raw);
            })?,
            None => DrawStatus::Inactive,
        };

        let winner_json = request
            .winner
            .filter(is_truthy)
            .map(|winner| serde_json::to_string(&winner))
            .transpose()?;

        let update = DrawUpdate {
            title: request.title,
            price: request.price,
            datetime: request.datetime,
            description: request.description,
            status,
            winner_json,
        };

        let conn = self.connection.lock().await;
        let affected = update_draw(&conn, id, &update)?;

        info!("✏️ Updated draw {} ({} row(s))", id, affected);
        Ok(())
    }

    /// Picks a confirmed participant of the draw and records it as the winner.
    ///
    /// The participant read and the winner write share one immediate
    /// transaction, and the connection lock is held throughout, so concurrent
    /// picks on the same draw are serialized.
    pub async fn pick_winner(
        &self,
        id: &str,
        seed: Option<String>,
    ) -> Result<WinnerRecord, ApiError> {
        let seed = present(seed).unwrap_or_else(random_seed);

        let mut conn = self.connection.lock().await;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let pool = get_participants_by_status(&tx, id, ParticipantStatus::Confirmed.as_str())?;

        let now = self.clock.now();
        let Some(index) = pick_index(&seed, now.timestamp_millis(), pool.len()) else {
            warn!("No confirmed participants for draw {}", id);
            return Err(ApiError::NoParticipants);
        };
        let chosen = &pool[index];

        let winner = WinnerRecord {
            id: chosen.id.clone(),
            name: chosen.name.clone(),
            phone: chosen.phone.clone(),
            seed,
            at: format_timestamp(&now),
        };

        set_draw_winner(&tx, id, &serde_json::to_string(&winner)?)?;
        tx.commit()?;

        info!(
            "🏆 Draw {} winner {} (index {} of {})",
            id,
            winner.id,
            index,
            pool.len()
        );
        Ok(winner)
    }
}

pub struct ParticipantUseCase {
    connection: SharedConnection,
    clock: Arc<dyn Clock>,
}

impl ParticipantUseCase {
    pub fn new(connection: SharedConnection, clock: Arc<dyn Clock>) -> Self {
        Self { connection, clock }
    }

    pub async fn list(&self) -> Result<Vec<ParticipantRow>, ApiError> {
        let conn = self.connection.lock().await;
        Ok(get_all_participants(&conn)?)
    }

    pub async fn create(&self, request: CreateParticipantRequest) -> Result<String, ApiError> {
        let (Some(name), Some(phone), Some(draw_id)) = (
            present(request.name),
            present(request.phone),
            present(request.draw_id),
        ) else {
            warn!("Rejected participant: name, phone or draw_id missing");
            return Err(ApiError::validation("missing"));
        };

        let participant = ParticipantRow {
            id: Uuid::new_v4().to_string(),
            name: Some(name),
            phone: Some(phone),
            draw_id,
            method: present(request.method).unwrap_or_else(|| "manual".to_string()),
            status: ParticipantStatus::Pending.as_str().to_string(),
            created_at: format_timestamp(&self.clock.now()),
        };

        let conn = self.connection.lock().await;
        insert_participant(&conn, &participant)?;

        info!(
            "🙋 Registered participant {} for draw {}",
            participant.id, participant.draw_id
        );
        Ok(participant.id)
    }

    pub async fn update(&self, id: &str, request: UpdateParticipantRequest) -> Result<(), ApiError> {
        let status = match present(request.status) {
            Some(raw) => raw.parse::<ParticipantStatus>().inspect_err(|_| {
                warn!("Rejected participant update {}: unknown status {:?}", id, raw);
            })?,
            None => ParticipantStatus::Pending,
        };
        let name = present(request.name);
        let phone = present(request.phone);

        let conn = self.connection.lock().await;
        let affected = update_participant(
            &conn,
            id,
            status.as_str(),
            name.as_deref(),
            phone.as_deref(),
        )?;

        info!(
            "✏️ Participant {} set to {} ({} row(s))",
            id,
            status.as_str(),
            affected
        );
        Ok(())
    }
}

pub struct PaymentUseCase {
    connection: SharedConnection,
    clock: Arc<dyn Clock>,
}

impl PaymentUseCase {
    pub fn new(connection: SharedConnection, clock: Arc<dyn Clock>) -> Self {
        Self { connection, clock }
    }

    pub async fn list(&self) -> Result<Vec<PaymentRow>, ApiError> {
        let conn = self.connection.lock().await;
        Ok(get_all_payments(&conn)?)
    }

    pub async fn create(&self, request: CreatePaymentRequest) -> Result<String, ApiError> {
        let payment = PaymentRow {
            id: Uuid::new_v4().to_string(),
            provider: request.provider,
            value: request.value,
            notes: present(request.notes).unwrap_or_default(),
            created_at: format_timestamp(&self.clock.now()),
        };

        let conn = self.connection.lock().await;
        insert_payment(&conn, &payment)?;

        info!("💳 Added payment method {}", payment.id);
        Ok(payment.id)
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        let conn = self.connection.lock().await;
        let affected = delete_payment(&conn, id)?;

        info!("🗑️ Deleted payment method {} ({} row(s))", id, affected);
        Ok(())
    }
}
