use crate::error::SessionError;
use crate::models::message::{ClientMessage, ServerMessage};
use crate::models::session::ConnId;
use crate::ws::registry::{SharedSession, WsSender};

fn reply(tx: &WsSender, message: &ServerMessage) {
    if tx.send(message.to_json()).is_err() {
        tracing::debug!("Reply dropped, socket already closed");
    }
}

/// Handle one text frame from a socket.
///
/// Replies to seat and state requests go to the sender. An accepted move is
/// broadcast verbatim to every socket in the session, followed by the result
/// if it ended the game. Rejections go to the sender only.
pub async fn handle_message(session: &SharedSession, conn: ConnId, text: &str, tx: &WsSender) {
    let message = match serde_json::from_str::<ClientMessage>(text) {
        Ok(m) => m,
        Err(e) => {
            tracing::warn!("Malformed frame from conn={conn}: {e}");
            reply(tx, &ServerMessage::rejected(SessionError::Malformed(e.to_string()), None));
            return;
        }
    };

    let mut session = session.lock().await;
    match message {
        ClientMessage::Seat { request } => {
            let response = session.request_seat(conn, request);
            reply(tx, &response);
        }
        ClientMessage::State { request_state } => {
            let response = session.request_state(conn, &request_state);
            reply(tx, &response);
        }
        ClientMessage::Move { token, content } => match session.handle_move(&token, &content) {
            Ok(finished) => {
                tracing::debug!("Match {}: {content}", session.match_id());
                session.broadcast(&ServerMessage::Content { content });

                if finished && let Some(result) = session.results() {
                    tracing::info!("Match {} finished: {result}", session.match_id());
                    session.broadcast(&ServerMessage::Result { result });
                }
            }
            Err(e) => {
                tracing::warn!(
                    "Match {}: rejected {content:?} from conn={conn}: {e}",
                    session.match_id()
                );
                reply(tx, &ServerMessage::rejected(e, Some(content)));
            }
        },
    }
}
