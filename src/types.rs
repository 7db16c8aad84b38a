use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;

use crate::error::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawStatus {
    Inactive,
    Active,
    Closed,
}

impl DrawStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DrawStatus::Inactive => "inactive",
            DrawStatus::Active => "active",
            DrawStatus::Closed => "closed",
        }
    }
}

impl FromStr for DrawStatus {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "inactive" => Ok(DrawStatus::Inactive),
            "active" => Ok(DrawStatus::Active),
            "closed" => Ok(DrawStatus::Closed),
            _ => Err(ApiError::validation("invalid status")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParticipantStatus {
    Pending,
    Confirmed,
    Rejected,
}

impl ParticipantStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParticipantStatus::Pending => "pending",
            ParticipantStatus::Confirmed => "confirmed",
            ParticipantStatus::Rejected => "rejected",
        }
    }
}

impl FromStr for ParticipantStatus {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ParticipantStatus::Pending),
            "confirmed" => Ok(ParticipantStatus::Confirmed),
            "rejected" => Ok(ParticipantStatus::Rejected),
            _ => Err(ApiError::validation("invalid status")),
        }
    }
}

// Request bodies

#[derive(Deserialize, Debug, Default)]
pub struct CreateDrawRequest {
    pub title: Option<String>,
    pub price: Option<i64>,
    pub datetime: Option<String>,
    pub description: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
pub struct UpdateDrawRequest {
    pub title: Option<String>,
    pub price: Option<i64>,
    pub datetime: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    /// Stored verbatim as JSON text; any shape is accepted.
    pub winner: Option<Value>,
}

#[derive(Deserialize, Debug, Default)]
pub struct PickRequest {
    pub seed: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
pub struct CreateParticipantRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub draw_id: Option<String>,
    pub method: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
pub struct UpdateParticipantRequest {
    pub status: Option<String>,
    pub name: Option<String>,
    pub phone: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
pub struct CreatePaymentRequest {
    pub provider: Option<String>,
    pub value: Option<String>,
    pub notes: Option<String>,
}

/// Outcome of a pick, stored as JSON text in `draws.winner_json`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct WinnerRecord {
    pub id: String,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub seed: String,
    pub at: String,
}

// Table rows

#[derive(Debug, Serialize, Clone)]
pub struct DrawRow {
    pub id: String,
    pub title: Option<String>,
    /// Whatever the column holds: integer, real, text or null.
    pub price: Value,
    pub datetime: Option<String>,
    pub description: Option<String>,
    pub status: String,
    pub winner_json: Option<String>,
    pub created_at: String,
}

/// Full replacement of a draw's mutable columns.
#[derive(Debug, Clone)]
pub struct DrawUpdate {
    pub title: Option<String>,
    pub price: Option<i64>,
    pub datetime: Option<String>,
    pub description: Option<String>,
    pub status: DrawStatus,
    pub winner_json: Option<String>,
}

#[derive(Debug, Serialize, Clone)]
pub struct ParticipantRow {
    pub id: String,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub draw_id: String,
    pub method: String,
    pub status: String,
    pub created_at: String,
}

#[derive(Debug, Serialize, Clone)]
pub struct PaymentRow {
    pub id: String,
    pub provider: Option<String>,
    pub value: Option<String>,
    pub notes: String,
    pub created_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draw_status_accepts_known_values_only() {
        assert_eq!("active".parse::<DrawStatus>().unwrap(), DrawStatus::Active);
        assert_eq!("closed".parse::<DrawStatus>().unwrap(), DrawStatus::Closed);
        assert!("Active".parse::<DrawStatus>().is_err());
        assert!("finished".parse::<DrawStatus>().is_err());
    }

    #[test]
    fn participant_status_round_trips_through_str() {
        for status in [
            ParticipantStatus::Pending,
            ParticipantStatus::Confirmed,
            ParticipantStatus::Rejected,
        ] {
            assert_eq!(status.as_str().parse::<ParticipantStatus>().unwrap(), status);
        }
        assert!("paid".parse::<ParticipantStatus>().is_err());
    }

    #[test]
    fn winner_record_tolerates_missing_contact_fields() {
        let winner: WinnerRecord =
            serde_json::from_str(r#"{"id":"p1","seed":"abc","at":"2024-01-01T00:00:00.000Z"}"#)
                .unwrap();
        assert_eq!(winner.name, None);
        assert_eq!(winner.phone, None);
    }
}
