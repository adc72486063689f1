//! Axum web server with WebSocket streaming of playback frames.

use std::collections::HashMap;
use std::sync::Arc;

use algoviz_core::{
    AlgorithmInfo, Catalog, DriverCommand, DriverHandle, EngineError, Frame, PlaybackDriver, PlaybackStatus, Update,
};
use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Query, State,
    },
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast::error::RecvError;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{debug, info, warn};

use crate::config::VisConfig;
use crate::error::{Result, VisError};

/// Shared application state.
pub struct AppState {
    catalog: Arc<Catalog>,
    driver: DriverHandle,
}

/// Visualization server.
pub struct VisServer {
    state: Arc<AppState>,
}

impl VisServer {
    /// Create a server and spawn its playback driver.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(catalog: Arc<Catalog>, config: &VisConfig) -> Self {
        let driver = PlaybackDriver::spawn(catalog.clone(), config.engine());
        Self {
            state: Arc::new(AppState { catalog, driver }),
        }
    }

    /// Handle to the driver behind this server.
    pub fn driver(&self) -> &DriverHandle {
        &self.state.driver
    }

    /// Build the router for the server.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/", get(index_handler))
            // API routes
            .route("/api/algorithms", get(algorithms_handler))
            .route("/api/load", post(load_handler))
            .route("/api/frame", get(frame_handler))
            .route("/api/status", get(status_handler))
            .route("/api/playback/toggle", post(toggle_handler))
            .route("/api/playback/step", post(step_handler))
            .route("/api/playback/reset", post(reset_handler))
            .route("/api/playback/speed", post(speed_handler))
            .route("/api/command", post(command_handler))
            .route("/api/press", post(press_handler))
            // WebSocket for real-time updates
            .route("/ws", get(ws_handler))
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Run the server on the given port.
    pub async fn serve(self, port: u16) -> Result<()> {
        let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
        let listener = tokio::net::TcpListener::bind(addr).await?;
        info!("Visualization server running on http://localhost:{}", port);
        axum::serve(listener, self.router()).await?;
        Ok(())
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for VisError {
    fn into_response(self) -> Response {
        let status = match &self {
            VisError::Engine(EngineError::UnknownAlgorithm(_)) => StatusCode::NOT_FOUND,
            VisError::Engine(EngineError::DriverStopped) => StatusCode::SERVICE_UNAVAILABLE,
            VisError::Engine(e) if e.is_configuration() => StatusCode::BAD_REQUEST,
            VisError::Usage(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = Json(ErrorBody {
            error: self.to_string(),
        });
        (status, body).into_response()
    }
}

type ApiResult = std::result::Result<Json<PlaybackStatus>, VisError>;

async fn apply(state: &AppState, command: DriverCommand) -> ApiResult {
    debug!(?command, "api command");
    Ok(Json(state.driver.send(command).await?))
}

async fn index_handler() -> Html<&'static str> {
    Html(include_str!("../static/index.html"))
}

async fn algorithms_handler(State(state): State<Arc<AppState>>) -> Json<Vec<AlgorithmInfo>> {
    Json(state.catalog.iter().cloned().collect())
}

#[derive(Deserialize)]
struct LoadRequest {
    id: String,
    #[serde(default)]
    size: Option<usize>,
}

async fn load_handler(State(state): State<Arc<AppState>>, Json(req): Json<LoadRequest>) -> ApiResult {
    apply(&state, DriverCommand::Load { id: req.id, size: req.size }).await
}

async fn frame_handler(State(state): State<Arc<AppState>>) -> Json<Option<Frame>> {
    Json(state.driver.latest().frame)
}

async fn status_handler(State(state): State<Arc<AppState>>) -> Json<PlaybackStatus> {
    Json(state.driver.latest().status)
}

async fn toggle_handler(State(state): State<Arc<AppState>>) -> ApiResult {
    apply(&state, DriverCommand::TogglePlay).await
}

async fn step_handler(State(state): State<Arc<AppState>>) -> ApiResult {
    apply(&state, DriverCommand::Step).await
}

#[derive(Deserialize)]
struct ResetQuery {
    size: Option<usize>,
}

async fn reset_handler(State(state): State<Arc<AppState>>, Query(query): Query<ResetQuery>) -> ApiResult {
    apply(&state, DriverCommand::Reset { size: query.size }).await
}

/// Either a period or an inverted slider position.
#[derive(Deserialize)]
#[serde(untagged)]
enum SpeedRequest {
    Millis { ms: u64 },
    Slider { slider: u64 },
}

async fn speed_handler(State(state): State<Arc<AppState>>, Json(req): Json<SpeedRequest>) -> ApiResult {
    let command = match req {
        SpeedRequest::Millis { ms } => DriverCommand::SetSpeed { ms },
        SpeedRequest::Slider { slider } => DriverCommand::SetSlider { position: slider },
    };
    apply(&state, command).await
}

#[derive(Deserialize)]
struct CommandRequest {
    name: String,
    #[serde(default)]
    args: Vec<i64>,
}

async fn command_handler(State(state): State<Arc<AppState>>, Json(req): Json<CommandRequest>) -> ApiResult {
    apply(&state, DriverCommand::RunCommand { name: req.name, args: req.args }).await
}

#[derive(Deserialize)]
struct PressRequest {
    button: String,
    #[serde(default)]
    inputs: HashMap<String, i64>,
}

async fn press_handler(State(state): State<Arc<AppState>>, Json(req): Json<PressRequest>) -> ApiResult {
    apply(&state, DriverCommand::Press { button: req.button, inputs: req.inputs }).await
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum WsMessage {
    Update {
        frame: Option<Frame>,
        status: PlaybackStatus,
    },
    Status(PlaybackStatus),
    Error { error: String },
}

impl WsMessage {
    fn update(update: Update) -> Self {
        WsMessage::Update {
            frame: update.frame,
            status: update.status,
        }
    }
}

async fn send_json(socket: &mut WebSocket, message: &WsMessage) -> bool {
    match serde_json::to_string(message) {
        Ok(json) => socket.send(Message::Text(json.into())).await.is_ok(),
        Err(e) => {
            warn!(error = %e, "failed to encode websocket message");
            true
        }
    }
}

async fn ws_handler(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_ws(socket, state))
}

async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
    let mut updates = state.driver.subscribe();

    // Send the current frame before streaming
    if !send_json(&mut socket, &WsMessage::update(state.driver.latest())).await {
        return;
    }

    loop {
        tokio::select! {
            update = updates.recv() => match update {
                Ok(update) => {
                    if !send_json(&mut socket, &WsMessage::update(update)).await {
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    debug!(skipped, "websocket client lagging");
                }
                Err(RecvError::Closed) => break,
            },
            message = socket.recv() => match message {
                Some(Ok(Message::Text(text))) => {
                    let reply = handle_ws_command(&state, text.as_str()).await;
                    if !send_json(&mut socket, &reply).await {
                        break;
                    }
                }
                Some(Ok(Message::Close(_))) | None | Some(Err(_)) => break,
                Some(Ok(_)) => {}
            },
        }
    }
}

async fn handle_ws_command(state: &AppState, text: &str) -> WsMessage {
    let command = match serde_json::from_str::<DriverCommand>(text) {
        Ok(command) => command,
        Err(e) => {
            return WsMessage::Error {
                error: VisError::from(e).to_string(),
            }
        }
    };
    match state.driver.send(command).await {
        Ok(status) => WsMessage::Status(status),
        Err(e) => WsMessage::Error { error: e.to_string() },
    }
}
