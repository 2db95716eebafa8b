//! HTTP + WebSocket API for styling sessions
//!
//! Endpoints:
//! - GET /health - Health check
//! - POST /session/new - Create session
//! - GET /session/{id} - Session status
//! - GET /session/{id}/render - Current render
//! - POST /session/{id}/parameter - Isolated parameter update
//! - POST /session/{id}/adjustments - Replace slider deltas
//! - POST /session/{id}/body - Initialize persistent body (once)
//! - POST /session/{id}/body/regenerate - Always 403
//! - GET /session/{id}/history - Change audit log
//! - WS /ws/{id} - Live renders
//!
//! Every mutation holds the sessions write lock for its whole duration.

use axum::{
    extract::{Path, State, WebSocketUpgrade, ws::{Message, WebSocket}},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::{broadcast, RwLock};

use crate::core::{Canvas, StylingSession, TwinGeometry, TwinRender};
use crate::error::TwinError;
use crate::types::{
    Adjustments, BodyPose, BodyProportions, BodyRatios, BodyShape, ChangeRecord, DesignState,
    LightingState, OutfitDesign, OutfitType, ParameterUpdate, PersistentBodyState,
};

/// Live render channel depth per session
const UPDATE_CHANNEL_CAPACITY: usize = 100;

/// Session state
#[derive(Debug)]
pub struct Session {
    pub id: String,
    pub styling: StylingSession,
    pub update_tx: broadcast::Sender<TwinRender>,
}

/// App state
pub struct AppState {
    pub sessions: RwLock<HashMap<String, Session>>,
    pub geometry: TwinGeometry,
    next_seq: AtomicU64,
}

/// Create new session request; ratios win over shape
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct NewSessionRequest {
    pub shape: Option<BodyShape>,
    pub ratios: Option<BodyRatios>,
    pub outfit_type: Option<OutfitType>,
    pub outfit: Option<OutfitDesign>,
}

/// Create new session response
#[derive(Debug, Serialize)]
pub struct NewSessionResponse {
    pub session_id: String,
    pub websocket_url: String,
    pub shape: BodyShape,
}

/// Session status response
#[derive(Debug, Serialize)]
pub struct SessionStatusResponse {
    pub session_id: String,
    pub shape: BodyShape,
    pub ratios: BodyRatios,
    pub outfit: OutfitDesign,
    pub design_state: Option<DesignState>,
    pub body: Option<PersistentBodyState>,
    pub adjustments: Adjustments,
    pub history_len: usize,
}

/// Initialize body request
#[derive(Debug, Deserialize)]
pub struct InitBodyRequest {
    pub base_image: String,
    #[serde(default)]
    pub pose: BodyPose,
    #[serde(default)]
    pub lighting: LightingState,
    #[serde(default)]
    pub proportions: BodyProportions,
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub sessions_active: usize,
}

/// Error body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<TwinError>,
}

/// Request failure
#[derive(Debug)]
pub enum ApiError {
    SessionNotFound(String),
    Twin(TwinError),
}

impl From<TwinError> for ApiError {
    fn from(err: TwinError) -> Self {
        ApiError::Twin(err)
    }
}

/// HTTP status for each manager error
pub fn status_for(err: &TwinError) -> StatusCode {
    match err {
        TwinError::NotInitialized { .. } => StatusCode::PRECONDITION_FAILED,
        TwinError::AlreadyInitialized => StatusCode::CONFLICT,
        TwinError::IsolationViolation { .. } => StatusCode::CONFLICT,
        TwinError::ForbiddenOperation { .. } => StatusCode::FORBIDDEN,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::SessionNotFound(id) => (
                StatusCode::NOT_FOUND,
                ErrorResponse {
                    code: "E404_SESSION_NOT_FOUND",
                    message: format!("no session {}", id),
                    detail: None,
                },
            ),
            ApiError::Twin(err) => (
                status_for(&err),
                ErrorResponse {
                    code: err.code(),
                    message: err.to_string(),
                    detail: Some(err),
                },
            ),
        };
        (status, Json(body)).into_response()
    }
}

/// Create the API router
pub fn create_router(canvas: Canvas) -> Router {
    let state = Arc::new(AppState {
        sessions: RwLock::new(HashMap::new()),
        geometry: TwinGeometry::with_canvas(canvas),
        next_seq: AtomicU64::new(0),
    });

    Router::new()
        .route("/health", get(health))
        .route("/session/new", post(create_session))
        .route("/session/:id", get(get_session))
        .route("/session/:id/render", get(get_render))
        .route("/session/:id/parameter", post(update_parameter))
        .route("/session/:id/adjustments", post(set_adjustments))
        .route("/session/:id/body", post(initialize_body))
        .route("/session/:id/body/regenerate", post(regenerate_body))
        .route("/session/:id/history", get(get_history))
        .route("/ws/:id", get(websocket_handler))
        .with_state(state)
}

/// Health check endpoint
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let sessions = state.sessions.read().await;
    Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
        sessions_active: sessions.len(),
    })
}

/// Create new session
async fn create_session(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NewSessionRequest>,
) -> Json<NewSessionResponse> {
    let ratios = req
        .ratios
        .or_else(|| req.shape.map(|s| s.default_ratios()))
        .unwrap_or_default();
    let outfit = req
        .outfit
        .unwrap_or_else(|| OutfitDesign::new(req.outfit_type.unwrap_or(OutfitType::SareeBlouse)));

    let styling = StylingSession::new(state.geometry, ratios, outfit);
    let shape = styling.shape();
    let session_id = generate_session_id(state.next_seq.fetch_add(1, Ordering::Relaxed));
    let (tx, _) = broadcast::channel(UPDATE_CHANNEL_CAPACITY);

    let mut sessions = state.sessions.write().await;
    sessions.insert(
        session_id.clone(),
        Session {
            id: session_id.clone(),
            styling,
            update_tx: tx,
        },
    );
    tracing::info!(%session_id, %shape, "session created");

    Json(NewSessionResponse {
        websocket_url: format!("/ws/{}", session_id),
        session_id,
        shape,
    })
}

/// Get session status
async fn get_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<SessionStatusResponse>, ApiError> {
    let sessions = state.sessions.read().await;
    let session = sessions.get(&id).ok_or_else(|| ApiError::SessionNotFound(id.clone()))?;
    let styling = &session.styling;

    Ok(Json(SessionStatusResponse {
        session_id: session.id.clone(),
        shape: styling.shape(),
        ratios: styling.ratios(),
        outfit: styling.outfit().clone(),
        design_state: styling.design_state(),
        body: styling.body_state(),
        adjustments: styling.adjustments(),
        history_len: styling.history().len(),
    }))
}

/// Current render
async fn get_render(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<TwinRender>, ApiError> {
    let sessions = state.sessions.read().await;
    let session = sessions.get(&id).ok_or(ApiError::SessionNotFound(id))?;
    Ok(Json(session.styling.render()))
}

/// Apply one isolated parameter update
async fn update_parameter(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(update): Json<ParameterUpdate>,
) -> Result<Json<TwinRender>, ApiError> {
    let mut sessions = state.sessions.write().await;
    let session = sessions.get_mut(&id).ok_or(ApiError::SessionNotFound(id))?;

    let render = session.styling.apply(update)?;
    let _ = session.update_tx.send(render.clone());
    Ok(Json(render))
}

/// Replace slider deltas
async fn set_adjustments(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(adjustments): Json<Adjustments>,
) -> Result<Json<TwinRender>, ApiError> {
    let mut sessions = state.sessions.write().await;
    let session = sessions.get_mut(&id).ok_or(ApiError::SessionNotFound(id))?;

    let render = session.styling.set_adjustments(adjustments);
    let _ = session.update_tx.send(render.clone());
    Ok(Json(render))
}

/// Initialize the persistent body
async fn initialize_body(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<InitBodyRequest>,
) -> Result<Json<PersistentBodyState>, ApiError> {
    let mut sessions = state.sessions.write().await;
    let session = sessions.get_mut(&id).ok_or(ApiError::SessionNotFound(id))?;

    let body = session
        .styling
        .initialize_body(req.base_image, req.pose, req.lighting, req.proportions)?;
    let _ = session.update_tx.send(session.styling.render());
    Ok(Json(body))
}

/// Regenerate is never allowed
async fn regenerate_body(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let sessions = state.sessions.read().await;
    let session = sessions.get(&id).ok_or(ApiError::SessionNotFound(id))?;
    session.styling.regenerate_body()?;
    Ok(StatusCode::NO_CONTENT)
}

/// Change audit log, oldest first
async fn get_history(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<ChangeRecord>>, ApiError> {
    let sessions = state.sessions.read().await;
    let session = sessions.get(&id).ok_or(ApiError::SessionNotFound(id))?;
    Ok(Json(session.styling.history()))
}

/// WebSocket handler for live renders
async fn websocket_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ws: WebSocketUpgrade,
) -> Result<impl IntoResponse, ApiError> {
    let sessions = state.sessions.read().await;
    let session = sessions.get(&id).ok_or(ApiError::SessionNotFound(id))?;
    let rx = session.update_tx.subscribe();
    drop(sessions);

    Ok(ws.on_upgrade(move |socket| async move {
        handle_websocket(socket, rx).await;
    }))
}

/// Next broadcast value; a lagging receiver skips ahead instead of stopping.
/// `None` once every sender is gone.
async fn next_update<T: Clone>(rx: &mut broadcast::Receiver<T>) -> Option<T> {
    loop {
        match rx.recv().await {
            Ok(value) => return Some(value),
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "websocket client lagged, dropping stale renders");
            }
            Err(broadcast::error::RecvError::Closed) => return None,
        }
    }
}

/// Forward renders until the client goes away
async fn handle_websocket(mut socket: WebSocket, mut rx: broadcast::Receiver<TwinRender>) {
    while let Some(render) = next_update(&mut rx).await {
        let json = match serde_json::to_string(&render) {
            Ok(json) => json,
            Err(err) => {
                tracing::warn!("failed to encode render: {}", err);
                continue;
            }
        };
        if socket.send(Message::Text(json)).await.is_err() {
            break;
        }
    }
}

/// Generate session ID
fn generate_session_id(seq: u64) -> String {
    let nanos = chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default();
    format!("session_{:x}_{}", nanos, seq)
}

/// Run the API server
pub async fn run_server(addr: &str, canvas: Canvas) -> Result<(), Box<dyn std::error::Error>> {
    let router = create_router(canvas);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, width = canvas.width, height = canvas.height, "twinfit API listening");
    axum::serve(listener, router).await?;
    Ok(())
}
