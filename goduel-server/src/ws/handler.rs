use std::sync::atomic::{AtomicU64, Ordering};

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{Path, State, WebSocketUpgrade};
use axum::response::Response;
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;

use crate::AppState;
use crate::error::AppError;
use crate::models::session::ConnId;
use crate::ws::game_channel;

/// Match id used by clients for local, server-less play.
pub const OFFLINE_MATCH_ID: &str = "offline";

static NEXT_CONN_ID: AtomicU64 = AtomicU64::new(1);

/// WebSocket upgrade handler: GET /ws/{match_id}
pub async fn ws_upgrade(
    State(state): State<AppState>,
    Path(match_id): Path<String>,
    ws: WebSocketUpgrade,
) -> Result<Response, AppError> {
    if match_id == OFFLINE_MATCH_ID {
        return Err(AppError::BadRequest(
            "match id is reserved for local play".to_string(),
        ));
    }

    Ok(ws.on_upgrade(move |socket| handle_socket(socket, state, match_id)))
}

async fn handle_socket(socket: WebSocket, state: AppState, match_id: String) {
    let conn: ConnId = NEXT_CONN_ID.fetch_add(1, Ordering::Relaxed);
    let (mut ws_sink, mut ws_stream) = socket.split();

    // Create a channel for sending messages back to this client
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();

    let session = state.registry.join(&match_id, conn, tx.clone()).await;
    tracing::debug!("WebSocket opened: match={match_id} conn={conn}");

    // Spawn task to forward messages from the channel to the WebSocket
    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if ws_sink.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    });

    // Process incoming messages
    while let Some(Ok(msg)) = ws_stream.next().await {
        match msg {
            Message::Text(text) => {
                game_channel::handle_message(&session, conn, text.as_str(), &tx).await;
            }
            Message::Close(_) => break,
            _ => {}
        }
    }

    // Cleanup
    session.lock().await.leave(conn);
    send_task.abort();

    tracing::debug!("WebSocket closed: match={match_id} conn={conn}");
}
