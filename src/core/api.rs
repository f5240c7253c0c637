//! HTTP + WebSocket API for discovery sessions
//!
//! Endpoints:
//! - POST /session/new - Create session
//! - GET /session/{id} - Session status
//! - POST /session/{id}/swipe - Swipe left or right
//! - POST /session/{id}/rewind - Undo last swipe
//! - POST /session/{id}/crush - Send a crush
//! - POST /session/{id}/boost - Boost profile
//! - POST /session/{id}/tier - Change subscription tier
//! - POST /session/{id}/batch - Supply next page of candidates
//! - GET /session/{id}/matches - Mutual matches
//! - WS /ws/{id} - Live updates
//! - GET /health - Health check

use axum::{
    extract::{Path, State, WebSocketUpgrade, ws::{Message, WebSocket}},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};
use tracing::{info, warn};

use crate::core::{sample_deck, validate_deck, Discovery, Entitlements, TracingSink};
use crate::types::{Candidate, Match, ReasonCode, SessionOutput, SubscriptionTier, SwipeDirection};

/// Session state
#[derive(Debug)]
pub struct ApiSession {
    pub discovery: Discovery,
    pub update_tx: broadcast::Sender<SessionOutput>,
}

impl ApiSession {
    /// Snapshot, broadcast to WebSocket listeners, wrap as response
    fn respond(&self, reason: ReasonCode) -> ActionResponse {
        let output = self.discovery.output(reason);
        let _ = self.update_tx.send(output.clone());
        ActionResponse {
            code: reason.code().to_string(),
            description: reason.description().to_string(),
            upsell: reason.is_upsell(),
            output,
        }
    }
}

/// App state
pub struct AppState {
    pub sessions: RwLock<HashMap<String, ApiSession>>,
    pub entitlements: Entitlements,
    counter: AtomicU64,
}

/// Create new session request
#[derive(Debug, Default, Deserialize)]
pub struct NewSessionRequest {
    pub tier: Option<String>,
    pub candidates: Option<Vec<Candidate>>,
}

/// Create new session response
#[derive(Debug, Serialize)]
pub struct NewSessionResponse {
    pub session_id: String,
    pub websocket_url: String,
    pub output: SessionOutput,
}

#[derive(Debug, Deserialize)]
pub struct SwipeRequest {
    pub direction: SwipeDirection,
}

#[derive(Debug, Deserialize)]
pub struct TierRequest {
    pub tier: String,
}

#[derive(Debug, Deserialize)]
pub struct BatchRequest {
    pub candidates: Vec<Candidate>,
}

/// Response to every session operation
#[derive(Debug, Serialize)]
pub struct ActionResponse {
    pub code: String,
    pub description: String,
    /// Caller should route to the upgrade screen
    pub upsell: bool,
    pub output: SessionOutput,
}

#[derive(Debug, Serialize)]
pub struct MatchesResponse {
    pub session_id: String,
    pub matches: Vec<Match>,
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub sessions_active: usize,
}

type Shared = Arc<AppState>;

/// Create the API router
pub fn create_router(entitlements: Entitlements) -> Router {
    let state = Arc::new(AppState {
        sessions: RwLock::new(HashMap::new()),
        entitlements,
        counter: AtomicU64::new(0),
    });

    Router::new()
        .route("/health", get(health))
        .route("/session/new", post(create_session))
        .route("/session/:id", get(get_session))
        .route("/session/:id/swipe", post(swipe))
        .route("/session/:id/rewind", post(rewind))
        .route("/session/:id/crush", post(crush))
        .route("/session/:id/boost", post(boost))
        .route("/session/:id/tier", post(change_tier))
        .route("/session/:id/batch", post(load_batch))
        .route("/session/:id/matches", get(get_matches))
        .route("/ws/:id", get(websocket_handler))
        .with_state(state)
}

/// Health check endpoint
async fn health(State(state): State<Shared>) -> Json<HealthResponse> {
    let sessions = state.sessions.read().await;
    Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
        sessions_active: sessions.len(),
    })
}

fn parse_tier(raw: Option<&str>) -> Result<SubscriptionTier, StatusCode> {
    match raw {
        None => Ok(SubscriptionTier::Free),
        Some(s) => s.parse().map_err(|e| {
            warn!(error = %e, "rejecting tier");
            StatusCode::BAD_REQUEST
        }),
    }
}

/// Create new session
async fn create_session(
    State(state): State<Shared>,
    Json(req): Json<NewSessionRequest>,
) -> Result<Json<NewSessionResponse>, StatusCode> {
    let tier = parse_tier(req.tier.as_deref())?;
    let candidates = req.candidates.unwrap_or_else(sample_deck);
    validate_deck(&candidates).map_err(|_| StatusCode::UNPROCESSABLE_ENTITY)?;

    let session_id = generate_session_id(&state.counter);
    let (tx, _) = broadcast::channel(100);

    let mut discovery = Discovery::new(candidates, tier, state.entitlements);
    discovery.add_sink(Box::new(TracingSink));
    let output = discovery.output(ReasonCode::D004_SESSION_STARTED);

    let session = ApiSession { discovery, update_tx: tx };
    state.sessions.write().await.insert(session_id.clone(), session);
    info!(session = %session_id, %tier, "session created");

    Ok(Json(NewSessionResponse {
        websocket_url: format!("/ws/{}", session_id),
        session_id,
        output,
    }))
}

/// Get session status
async fn get_session(
    State(state): State<Shared>,
    Path(id): Path<String>,
) -> Result<Json<SessionOutput>, StatusCode> {
    let sessions = state.sessions.read().await;
    let session = sessions.get(&id).ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(session.discovery.output(ReasonCode::D004_STATUS)))
}

/// Run a mutation against one session
async fn with_session<F>(state: &AppState, id: &str, op: F) -> Result<Json<ActionResponse>, StatusCode>
where
    F: FnOnce(&mut Discovery) -> ReasonCode,
{
    let mut sessions = state.sessions.write().await;
    let session = sessions.get_mut(id).ok_or(StatusCode::NOT_FOUND)?;
    let reason = op(&mut session.discovery);
    Ok(Json(session.respond(reason)))
}

async fn swipe(
    State(state): State<Shared>,
    Path(id): Path<String>,
    Json(req): Json<SwipeRequest>,
) -> Result<Json<ActionResponse>, StatusCode> {
    with_session(&state, &id, |d| {
        let before = d.matches().len();
        let reason = d.swipe(req.direction).reason();
        if d.matches().len() > before {
            ReasonCode::D005_MATCHED
        } else {
            reason
        }
    })
    .await
}

async fn rewind(
    State(state): State<Shared>,
    Path(id): Path<String>,
) -> Result<Json<ActionResponse>, StatusCode> {
    with_session(&state, &id, |d| d.rewind().reason()).await
}

async fn crush(
    State(state): State<Shared>,
    Path(id): Path<String>,
) -> Result<Json<ActionResponse>, StatusCode> {
    with_session(&state, &id, |d| d.crush().reason()).await
}

async fn boost(
    State(state): State<Shared>,
    Path(id): Path<String>,
) -> Result<Json<ActionResponse>, StatusCode> {
    with_session(&state, &id, |d| d.boost().reason()).await
}

async fn change_tier(
    State(state): State<Shared>,
    Path(id): Path<String>,
    Json(req): Json<TierRequest>,
) -> Result<Json<ActionResponse>, StatusCode> {
    let tier = parse_tier(Some(&req.tier))?;
    with_session(&state, &id, |d| {
        d.change_tier(tier);
        ReasonCode::D004_TIER_CHANGED
    })
    .await
}

async fn load_batch(
    State(state): State<Shared>,
    Path(id): Path<String>,
    Json(req): Json<BatchRequest>,
) -> Result<Json<ActionResponse>, StatusCode> {
    validate_deck(&req.candidates).map_err(|_| StatusCode::UNPROCESSABLE_ENTITY)?;
    with_session(&state, &id, |d| {
        d.load_batch(req.candidates);
        ReasonCode::D004_BATCH_LOADED
    })
    .await
}

async fn get_matches(
    State(state): State<Shared>,
    Path(id): Path<String>,
) -> Result<Json<MatchesResponse>, StatusCode> {
    let sessions = state.sessions.read().await;
    let session = sessions.get(&id).ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(MatchesResponse {
        session_id: id,
        matches: session.discovery.matches().to_vec(),
    }))
}

/// WebSocket handler for live updates
async fn websocket_handler(
    State(state): State<Shared>,
    Path(id): Path<String>,
    ws: WebSocketUpgrade,
) -> Result<impl IntoResponse, StatusCode> {
    let sessions = state.sessions.read().await;
    let session = sessions.get(&id).ok_or(StatusCode::NOT_FOUND)?;
    let rx = session.update_tx.subscribe();
    drop(sessions);

    Ok(ws.on_upgrade(move |socket| async move {
        handle_websocket(socket, rx).await;
    }))
}

/// Forward session snapshots until the client goes away
async fn handle_websocket(mut socket: WebSocket, mut rx: broadcast::Receiver<SessionOutput>) {
    while let Ok(update) = rx.recv().await {
        let json = serde_json::to_string(&update).unwrap_or_default();
        if socket.send(Message::Text(json)).await.is_err() {
            break;
        }
    }
}

/// Hash of wall clock + counter, first 8 bytes as hex
fn generate_session_id(counter: &AtomicU64) -> String {
    let seq = counter.fetch_add(1, Ordering::Relaxed);
    let nanos = chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default();

    let mut hasher = Sha256::new();
    hasher.update(nanos.to_le_bytes());
    hasher.update(seq.to_le_bytes());
    let digest = hasher.finalize();

    let hex: String = digest[..8].iter().map(|b| format!("{:02x}", b)).collect();
    format!("session_{}", hex)
}

/// Run the API server
pub async fn run_server(addr: &str, entitlements: Entitlements) -> Result<(), Box<dyn std::error::Error>> {
    let router = create_router(entitlements);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "discovery API listening");
    println!("Swipedeck API running on {}", addr);
    println!("  POST /session/new          - Create session");
    println!("  GET  /session/:id          - Get status");
    println!("  POST /session/:id/swipe    - Swipe {{\"direction\":\"left|right\"}}");
    println!("  POST /session/:id/rewind   - Undo last swipe");
    println!("  POST /session/:id/crush    - Send a crush");
    println!("  POST /session/:id/boost    - Boost profile");
    println!("  POST /session/:id/tier     - Change tier");
    println!("  POST /session/:id/batch    - Load more candidates");
    println!("  GET  /session/:id/matches  - Mutual matches");
    println!("  WS   /ws/:id               - Live updates");
    println!("  GET  /health               - Health check");
    axum::serve(listener, router).await?;
    Ok(())
}
