use std::collections::HashMap;

use chrono::{DateTime, Utc};
use goduel_engine::{Engine, GoError, ScoringRules, Stone, Turn};
use serde::Serialize;
use serde_json::Value;

use crate::config::Config;
use crate::error::SessionError;
use crate::models::message::ServerMessage;
use crate::models::time_controls::TimeControls;
use crate::token;
use crate::ws::registry::WsSender;

/// Identifies one socket within the process.
pub type ConnId = u64;

#[derive(Debug, Clone)]
pub struct Seat {
    pub token: String,
    /// Claimed by a client. Stays set once the game has started.
    pub connected: bool,
    /// Socket currently bound to the seat, if any.
    pub holder: Option<ConnId>,
}

impl Seat {
    fn new() -> Self {
        Seat {
            token: token::generate_token(),
            connected: false,
            holder: None,
        }
    }
}

/// Lobby row for a session waiting for its second player.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenSession {
    pub player_name: String,
    pub board_size: [u8; 2],
    pub already_picked: Stone,
    pub scoring_rules: ScoringRules,
    pub time_controls: Option<TimeControls>,
    pub match_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchSummary {
    pub match_id: String,
    pub started: bool,
    pub finished: bool,
    pub moves: Vec<String>,
    pub turn: Stone,
    pub result: Option<String>,
}

/// One match: the authoritative engine, both seats and the sockets
/// watching it.
#[derive(Debug)]
pub struct GameSession {
    match_id: String,
    player_name: String,
    engine: Engine,
    black: Seat,
    white: Seat,
    started: bool,
    time_controls: Option<TimeControls>,
    connections: HashMap<ConnId, WsSender>,
    last_activity: DateTime<Utc>,
    finished_at: Option<DateTime<Utc>>,
}

impl GameSession {
    pub fn new(match_id: &str, config: &Config) -> Self {
        let size = config.board_size;
        GameSession {
            match_id: match_id.to_string(),
            player_name: token::generate_name(),
            engine: Engine::with_rules(size, size, config.scoring_rules, config.komi),
            black: Seat::new(),
            white: Seat::new(),
            started: false,
            time_controls: config.time_controls,
            connections: HashMap::new(),
            last_activity: Utc::now(),
            finished_at: None,
        }
    }

    pub fn match_id(&self) -> &str {
        &self.match_id
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_finished(&self) -> bool {
        self.engine.is_finished()
    }

    pub fn seat(&self, stone: Stone) -> &Seat {
        match stone {
            Stone::Black => &self.black,
            Stone::White => &self.white,
        }
    }

    fn seat_mut(&mut self, stone: Stone) -> &mut Seat {
        match stone {
            Stone::Black => &mut self.black,
            Stone::White => &mut self.white,
        }
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    pub fn last_activity(&self) -> DateTime<Utc> {
        self.last_activity
    }

    pub fn finished_at(&self) -> Option<DateTime<Utc>> {
        self.finished_at
    }

    fn touch(&mut self) {
        self.last_activity = Utc::now();
    }

    // -- Connections --

    pub fn join(&mut self, conn: ConnId, sender: WsSender) {
        self.connections.insert(conn, sender);
        self.touch();
    }

    /// Drop a socket. A seat it held before the game started is released
    /// and gets a fresh token.
    pub fn leave(&mut self, conn: ConnId) {
        self.connections.remove(&conn);
        self.touch();

        let started = self.started;
        for seat in [&mut self.black, &mut self.white] {
            if seat.holder != Some(conn) {
                continue;
            }
            seat.holder = None;
            if !started {
                seat.connected = false;
                seat.token = token::generate_token();
            }
        }
    }

    /// Send a frame to every socket in the session.
    pub fn broadcast(&self, message: &ServerMessage) {
        let text = message.to_json();
        for (conn, sender) in &self.connections {
            if sender.send(text.clone()).is_err() {
                tracing::debug!("Match {}: conn={conn} already gone", self.match_id);
            }
        }
    }

    // -- Client requests --

    /// Grant the requested seat, or the other one if it is taken.
    pub fn request_seat(&mut self, conn: ConnId, requested: Stone) -> ServerMessage {
        if self.started {
            return ServerMessage::AlreadyStarted {};
        }
        self.touch();

        let player = if self.seat(requested).connected {
            requested.opp()
        } else {
            requested
        };

        let seat = self.seat_mut(player);
        seat.connected = true;
        seat.holder = Some(conn);
        let token = seat.token.clone();

        if self.black.connected && self.white.connected {
            self.started = true;
            tracing::info!("Match {} started", self.match_id);
        }

        ServerMessage::Seat { player, token }
    }

    /// The transcript. A seat token as payload binds that seat to `conn`.
    pub fn request_state(&mut self, conn: ConnId, payload: &Value) -> ServerMessage {
        self.touch();

        if let Some(token) = payload.as_str() {
            for stone in [Stone::Black, Stone::White] {
                let seat = self.seat_mut(stone);
                if seat.token == token {
                    seat.connected = true;
                    seat.holder = Some(conn);
                }
            }
            if !self.started && self.black.connected && self.white.connected {
                self.started = true;
                tracing::info!("Match {} started", self.match_id);
            }
        }

        ServerMessage::State {
            state: self.engine.serialize_state(),
        }
    }

    /// Authorize and apply a transcript entry. Returns whether the game is
    /// now finished. Nothing changes on error.
    pub fn handle_move(&mut self, token: &str, entry: &str) -> Result<bool, SessionError> {
        if !self.started {
            return Err(SessionError::NotStarted);
        }

        let player = Turn::player_marker(entry)?;
        if self.seat(player).token != token {
            return Err(SessionError::InvalidToken);
        }
        if self.engine.is_finished() {
            return Err(GoError::GameOver.into());
        }
        if self.engine.current_turn_stone() != player {
            return Err(GoError::OutOfTurn.into());
        }

        let finished = self.engine.process_message(entry)?;
        self.touch();
        if finished {
            self.finished_at = Some(self.last_activity);
        }
        Ok(finished)
    }

    pub fn results(&self) -> Option<String> {
        self.engine.results()
    }

    // -- Queries --

    /// The lobby row, if exactly one seat is claimed and the game has not
    /// started.
    pub fn open_listing(&self) -> Option<OpenSession> {
        if self.started {
            return None;
        }
        let already_picked = match (self.black.connected, self.white.connected) {
            (true, false) => Stone::Black,
            (false, true) => Stone::White,
            _ => return None,
        };

        Some(OpenSession {
            player_name: self.player_name.clone(),
            board_size: [self.engine.cols(), self.engine.rows()],
            already_picked,
            scoring_rules: self.engine.scoring_rules(),
            time_controls: self.time_controls,
            match_id: self.match_id.clone(),
        })
    }

    pub fn summary(&self) -> MatchSummary {
        MatchSummary {
            match_id: self.match_id.clone(),
            started: self.started,
            finished: self.engine.is_finished(),
            moves: self.engine.serialize_state(),
            turn: self.engine.current_turn_stone(),
            result: self.engine.results(),
        }
    }

    /// Nobody connected, and either finished for longer than the retention
    /// period or idle for too long. A session with sockets attached is never
    /// evictable.
    pub fn is_evictable(&self, now: DateTime<Utc>, config: &Config) -> bool {
        if !self.connections.is_empty() {
            return false;
        }
        if let Some(finished_at) = self.finished_at
            && now - finished_at >= config.finished_retention
        {
            return true;
        }
        now - self.last_activity >= config.session_idle
    }
}
