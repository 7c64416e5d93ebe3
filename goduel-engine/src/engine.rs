use std::collections::HashSet;

use crate::Point;
use crate::error::GoError;
use crate::goban::{Captures, Goban};
use crate::scoring::{self, GameScore, ScoringRules};
use crate::stone::Stone;
use crate::turn::{Move, Turn};

pub const DEFAULT_BOARD_SIZE: u8 = 19;
pub const DEFAULT_KOMI: f64 = 6.5;

/// Where the game stands after an entry is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    BlackToPlay,
    WhiteToPlay,
    Done,
}

/// One game of Go: the board, whose turn it is, and the transcript that
/// produced them.
///
/// The transcript is the only authoritative history. Replaying it through
/// [`Engine::deserialize_state`] on a fresh engine reproduces the board,
/// prisoners and turn exactly.
#[derive(Debug, Clone)]
pub struct Engine {
    cols: u8,
    rows: u8,
    komi: f64,
    rules: ScoringRules,
    goban: Goban,
    turn: Stone,
    in_progress: bool,
    moves: Vec<Turn>,
    /// Every whole-board position reached so far, for positional superko.
    positions: HashSet<String>,
    winner: Option<Stone>,
    final_score: Option<GameScore>,
}

impl Engine {
    pub fn new(cols: u8, rows: u8) -> Self {
        Self::with_rules(cols, rows, ScoringRules::default(), DEFAULT_KOMI)
    }

    pub fn with_rules(cols: u8, rows: u8, rules: ScoringRules, komi: f64) -> Self {
        let goban = Goban::with_dimensions(cols, rows);
        let positions = HashSet::from([goban.snapshot()]);
        Engine {
            cols,
            rows,
            komi,
            rules,
            goban,
            turn: Stone::Black,
            in_progress: true,
            moves: Vec::new(),
            positions,
            winner: None,
            final_score: None,
        }
    }

    /// Build an engine by replaying transcript entries onto an empty board.
    pub fn from_transcript<S: AsRef<str>>(
        cols: u8,
        rows: u8,
        rules: ScoringRules,
        komi: f64,
        transcript: &[S],
    ) -> Result<Self, GoError> {
        let mut engine = Self::with_rules(cols, rows, rules, komi);
        for entry in transcript {
            engine.process_message(entry.as_ref())?;
        }
        Ok(engine)
    }

    /// Return to the empty starting position, keeping size and rules.
    pub fn reset(&mut self) {
        *self = Self::with_rules(self.cols, self.rows, self.rules, self.komi);
    }

    // -- Accessors --

    pub fn cols(&self) -> u8 {
        self.cols
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    pub fn komi(&self) -> f64 {
        self.komi
    }

    pub fn scoring_rules(&self) -> ScoringRules {
        self.rules
    }

    pub fn goban(&self) -> &Goban {
        &self.goban
    }

    pub fn board(&self) -> &[i8] {
        self.goban.board()
    }

    pub fn captures(&self) -> &Captures {
        self.goban.captures()
    }

    pub fn prisoners(&self, stone: Stone) -> u32 {
        self.goban.captures().get(stone)
    }

    pub fn stone_at(&self, point: Point) -> Option<Stone> {
        self.goban.stone_at(point)
    }

    pub fn current_turn_stone(&self) -> Stone {
        self.turn
    }

    pub fn moves(&self) -> &[Turn] {
        &self.moves
    }

    pub fn is_finished(&self) -> bool {
        !self.in_progress
    }

    pub fn winner(&self) -> Option<Stone> {
        self.winner
    }

    pub fn final_score(&self) -> Option<&GameScore> {
        self.final_score.as_ref()
    }

    pub fn stage(&self) -> Stage {
        if !self.in_progress {
            Stage::Done
        } else {
            match self.turn {
                Stone::Black => Stage::BlackToPlay,
                Stone::White => Stage::WhiteToPlay,
            }
        }
    }

    // -- Game actions --

    /// Place a stone for the side to move.
    ///
    /// Checked in order: game over, on board, occupied, captures, self
    /// capture, positional superko. The engine is unchanged on any error.
    pub fn place(&mut self, point: Point) -> Result<(), GoError> {
        if !self.in_progress {
            return Err(GoError::GameOver);
        }

        let goban = self.goban.play(point, self.turn)?;
        let snapshot = goban.snapshot();
        if self.positions.contains(&snapshot) {
            return Err(GoError::Superko);
        }

        self.goban = goban;
        self.positions.insert(snapshot);
        self.moves.push(Turn::play(self.turn, point));
        self.turn = self.turn.opp();
        Ok(())
    }

    /// Pass for the side to move. A pass directly after another pass ends
    /// the game and triggers scoring. Does nothing once the game is over.
    pub fn pass(&mut self) {
        if !self.in_progress {
            return;
        }

        let ends_game = self.moves.last().is_some_and(Turn::is_pass);
        self.moves.push(Turn::pass(self.turn));
        if ends_game {
            self.end(None);
        } else {
            self.turn = self.turn.opp();
        }
    }

    pub fn resign(&mut self, stone: Stone) -> Result<(), GoError> {
        if !self.in_progress {
            return Err(GoError::GameOver);
        }
        self.moves.push(Turn::resign(stone));
        self.end(Some(stone.opp()));
        Ok(())
    }

    pub fn timeout(&mut self, stone: Stone) -> Result<(), GoError> {
        if !self.in_progress {
            return Err(GoError::GameOver);
        }
        self.moves.push(Turn::timeout(stone));
        self.end(Some(stone.opp()));
        Ok(())
    }

    /// Finish the game. Without an explicit winner the position is scored.
    pub fn end(&mut self, winner: Option<Stone>) {
        self.in_progress = false;
        match winner {
            Some(w) => self.winner = Some(w),
            None => {
                let score = scoring::score(&self.goban, self.rules, self.komi);
                self.winner = score.winner();
                self.final_score = Some(score);
            }
        }
    }

    /// Apply one transcript entry. Plays and passes must come from the side
    /// to move; either side may resign or run out of time.
    pub fn apply(&mut self, turn: &Turn) -> Result<Stage, GoError> {
        if !self.in_progress {
            return Err(GoError::GameOver);
        }

        match turn.kind {
            Move::Play | Move::Pass if turn.stone != self.turn => {
                return Err(GoError::OutOfTurn);
            }
            Move::Play => {
                let point = turn.pos.ok_or(GoError::NotOnBoard)?;
                self.place(point)?;
            }
            Move::Pass => self.pass(),
            Move::Resign => self.resign(turn.stone)?,
            Move::Timeout => self.timeout(turn.stone)?,
        }

        Ok(self.stage())
    }

    /// Parse and apply a transcript entry string. Returns whether the game
    /// is now finished.
    pub fn process_message(&mut self, entry: &str) -> Result<bool, GoError> {
        let turn: Turn = entry.parse()?;
        self.apply(&turn)?;
        Ok(self.is_finished())
    }

    // -- Serialization --

    /// The transcript as wire strings.
    pub fn serialize_state(&self) -> Vec<String> {
        self.moves.iter().map(Turn::to_string).collect()
    }

    /// Reset and replay `transcript`. On error the engine keeps its previous
    /// state.
    pub fn deserialize_state<S: AsRef<str>>(&mut self, transcript: &[S]) -> Result<(), GoError> {
        *self = Self::from_transcript(self.cols, self.rows, self.rules, self.komi, transcript)?;
        Ok(())
    }

    /// Human-readable outcome of a finished game.
    pub fn results(&self) -> Option<String> {
        if self.in_progress {
            return None;
        }

        let last = self.moves.last()?;
        if last.is_resign() {
            return Some(format!("{} wins by resignation", last.stone.opp()));
        }
        if last.is_timeout() {
            return Some(format!("{} wins by time", last.stone.opp()));
        }

        let score = self.final_score.as_ref()?;
        Some(match score.winner() {
            Some(w) => format!(
                "{w} wins, {} to {}",
                score.total(w),
                score.total(w.opp())
            ),
            None => format!(
                "Draw, {} to {}",
                score.black_total(),
                score.white_total()
            ),
        })
    }
}
