use actix_web::error::InternalError;
use actix_web::{HttpMessage, HttpRequest, HttpResponse, Responder, delete, get, post, put, web};
use serde_json::json;
use std::sync::Arc;
use tracing::warn;

use crate::error::ApiError;
use crate::types::{
    CreateDrawRequest, CreateParticipantRequest, CreatePaymentRequest, PickRequest,
    UpdateDrawRequest, UpdateParticipantRequest,
};
use crate::use_cases::{DrawUseCase, ParticipantUseCase, PaymentUseCase, SharedConnection};
use crate::utils::Clock;

/// Request bodies above this size are rejected.
pub const JSON_LIMIT: usize = 5 * 1024 * 1024;

pub struct AppState {
    pub draws: DrawUseCase,
    pub participants: ParticipantUseCase,
    pub payments: PaymentUseCase,
}

impl AppState {
    pub fn new(connection: SharedConnection, clock: Arc<dyn Clock>) -> Self {
        Self {
            draws: DrawUseCase::new(Arc::clone(&connection), Arc::clone(&clock)),
            participants: ParticipantUseCase::new(Arc::clone(&connection), Arc::clone(&clock)),
            payments: PaymentUseCase::new(connection, clock),
        }
    }
}

/// Registers the JSON API and the health probe.
pub fn configure(cfg: &mut web::ServiceConfig) {
    let json_config = web::JsonConfig::default()
        .limit(JSON_LIMIT)
        .error_handler(|err, _req| {
            let response = HttpResponse::BadRequest().json(json!({ "error": err.to_string() }));
            InternalError::from_response(err, response).into()
        });

    cfg.app_data(json_config)
        .app_data(web::PayloadConfig::default().limit(JSON_LIMIT))
        .service(list_draws)
        .service(create_draw)
        .service(update_draw)
        .service(pick_winner)
        .service(list_participants)
        .service(create_participant)
        .service(update_participant)
        .service(list_payments)
        .service(create_payment)
        .service(delete_payment)
        .service(health);
}

#[get("/health")]
async fn health() -> impl Responder {
    HttpResponse::Ok().json(json!({ "ok": true }))
}

// --- Draws ---

#[get("/api/draws")]
async fn list_draws(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let rows = state.draws.list().await?;
    Ok(HttpResponse::Ok().json(rows))
}

#[post("/api/draws")]
async fn create_draw(
    state: web::Data<AppState>,
    req: web::Json<CreateDrawRequest>,
) -> Result<HttpResponse, ApiError> {
    let id = state.draws.create(req.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({ "ok": true, "id": id })))
}

#[put("/api/draws/{id}")]
async fn update_draw(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: web::Json<UpdateDrawRequest>,
) -> Result<HttpResponse, ApiError> {
    state.draws.update(&path, req.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({ "ok": true })))
}

/// Reads the optional pick body. An empty or non-JSON body means "no seed";
/// a JSON body that does not parse is rejected like on every other route.
fn pick_request(req: &HttpRequest, body: &[u8]) -> Result<PickRequest, ApiError> {
    let is_json = req.content_type().contains("json");
    if body.is_empty() || !is_json {
        return Ok(PickRequest::default());
    }

    serde_json::from_slice(body).map_err(|e| {
        warn!("Rejected pick body: {}", e);
        ApiError::validation(format!("Json deserialize error: {}", e))
    })
}

#[post("/api/draws/{id}/pick")]
async fn pick_winner(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: HttpRequest,
    body: web::Bytes,
) -> Result<HttpResponse, ApiError> {
    let seed = pick_request(&req, &body)?.seed;
    let winner = state.draws.pick_winner(&path, seed).await?;
    Ok(HttpResponse::Ok().json(json!({ "ok": true, "winner": winner })))
}

// --- Participants ---

#[get("/api/participants")]
async fn list_participants(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let rows = state.participants.list().await?;
    Ok(HttpResponse::Ok().json(rows))
}

#[post("/api/participants")]
async fn create_participant(
    state: web::Data<AppState>,
    req: web::Json<CreateParticipantRequest>,
) -> Result<HttpResponse, ApiError> {
    let id = state.participants.create(req.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({ "ok": true, "id": id })))
}

#[put("/api/participants/{id}")]
async fn update_participant(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: web::Json<UpdateParticipantRequest>,
) -> Result<HttpResponse, ApiError> {
    state.participants.update(&path, req.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({ "ok": true })))
}

// --- Payment methods ---

#[get("/api/payments")]
async fn list_payments(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let rows = state.payments.list().await?;
    Ok(HttpResponse::Ok().json(rows))
}

#[post("/api/payments")]
async fn create_payment(
    state: web::Data<AppState>,
    req: web::Json<CreatePaymentRequest>,
) -> Result<HttpResponse, ApiError> {
    let id = state.payments.create(req.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({ "ok": true, "id": id })))
}

#[delete("/api/payments/{id}")]
async fn delete_payment(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    state.payments.delete(&path).await?;
    Ok(HttpResponse::Ok().json(json!({ "ok": true })))
}
