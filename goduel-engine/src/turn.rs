use std::fmt;
use std::str::FromStr;

use crate::Point;
use crate::error::EntryError;
use crate::stone::Stone;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Play,
    Pass,
    Resign,
    Timeout,
}

impl FromStr for Move {
    type Err = EntryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "play" => Ok(Move::Play),
            "pass" => Ok(Move::Pass),
            "resign" => Ok(Move::Resign),
            "timeout" => Ok(Move::Timeout),
            _ => Err(EntryError::UnknownAction(s.to_string())),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Play => write!(f, "play"),
            Move::Pass => write!(f, "pass"),
            Move::Resign => write!(f, "resign"),
            Move::Timeout => write!(f, "timeout"),
        }
    }
}

/// One transcript entry.
///
/// The string form is the wire and storage format:
/// `"B 3 4"`, `"W pass"`, `"B resign"`, `"W timeout"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub kind: Move,
    pub stone: Stone,
    pub pos: Option<Point>,
}

impl Turn {
    pub fn play(stone: Stone, point: Point) -> Self {
        Turn {
            kind: Move::Play,
            stone,
            pos: Some(point),
        }
    }

    pub fn pass(stone: Stone) -> Self {
        Turn {
            kind: Move::Pass,
            stone,
            pos: None,
        }
    }

    pub fn resign(stone: Stone) -> Self {
        Turn {
            kind: Move::Resign,
            stone,
            pos: None,
        }
    }

    pub fn timeout(stone: Stone) -> Self {
        Turn {
            kind: Move::Timeout,
            stone,
            pos: None,
        }
    }

    pub fn is_pass(&self) -> bool {
        self.kind == Move::Pass
    }

    pub fn is_resign(&self) -> bool {
        self.kind == Move::Resign
    }

    pub fn is_timeout(&self) -> bool {
        self.kind == Move::Timeout
    }

    /// Read only the leading player marker of an entry string.
    pub fn player_marker(entry: &str) -> Result<Stone, EntryError> {
        let marker = entry.split(' ').next().unwrap_or_default();
        if marker.is_empty() {
            return Err(EntryError::Empty);
        }
        marker
            .parse()
            .map_err(|_| EntryError::UnknownPlayer(marker.to_string()))
    }
}

impl FromStr for Turn {
    type Err = EntryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let stone = Turn::player_marker(s)?;
        let mut parts = s.split(' ').skip(1);
        let action = parts.next().ok_or(EntryError::MissingAction)?;

        let turn = match action.parse::<Move>() {
            Ok(Move::Pass) => Turn::pass(stone),
            Ok(Move::Resign) => Turn::resign(stone),
            Ok(Move::Timeout) => Turn::timeout(stone),
            Ok(Move::Play) | Err(_) => {
                if !action.starts_with(|c: char| c.is_ascii_digit()) {
                    return Err(EntryError::UnknownAction(action.to_string()));
                }
                let col = parse_coord(action)?;
                let row = parse_coord(parts.next().ok_or(EntryError::MissingAction)?)?;
                Turn::play(stone, (col, row))
            }
        };

        let rest: Vec<&str> = parts.collect();
        if !rest.is_empty() {
            return Err(EntryError::TrailingInput(rest.join(" ")));
        }
        Ok(turn)
    }
}

fn parse_coord(s: &str) -> Result<u8, EntryError> {
    let padded = s.len() > 1 && s.starts_with('0');
    if s.is_empty() || padded || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(EntryError::InvalidCoordinate(s.to_string()));
    }
    s.parse()
        .map_err(|_| EntryError::InvalidCoordinate(s.to_string()))
}

impl fmt::Display for Turn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.kind, self.pos) {
            (Move::Play, Some((col, row))) => write!(f, "{} {col} {row}", self.stone.letter()),
            (kind, _) => write!(f, "{} {kind}", self.stone.letter()),
        }
    }
}
