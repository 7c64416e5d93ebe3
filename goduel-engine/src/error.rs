use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoError {
    GameOver,
    NotOnBoard,
    Occupied,
    Suicide,
    Superko,
    OutOfTurn,
    InvalidEntry(EntryError),
}

impl fmt::Display for GoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GoError::GameOver => write!(f, "game over"),
            GoError::NotOnBoard => write!(f, "not on board"),
            GoError::Occupied => write!(f, "occupied"),
            GoError::Suicide => write!(f, "no self capture"),
            GoError::Superko => write!(f, "superko"),
            GoError::OutOfTurn => write!(f, "out of turn"),
            GoError::InvalidEntry(e) => write!(f, "invalid entry: {e}"),
        }
    }
}

impl std::error::Error for GoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GoError::InvalidEntry(e) => Some(e),
            _ => None,
        }
    }
}

impl From<EntryError> for GoError {
    fn from(e: EntryError) -> Self {
        GoError::InvalidEntry(e)
    }
}

/// Why a transcript entry string failed to parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryError {
    Empty,
    UnknownPlayer(String),
    MissingAction,
    UnknownAction(String),
    InvalidCoordinate(String),
    TrailingInput(String),
}

impl fmt::Display for EntryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryError::Empty => write!(f, "empty entry"),
            EntryError::UnknownPlayer(p) => write!(f, "unknown player marker {p:?}"),
            EntryError::MissingAction => write!(f, "missing action after player marker"),
            EntryError::UnknownAction(a) => write!(f, "unknown action {a:?}"),
            EntryError::InvalidCoordinate(c) => write!(f, "invalid coordinate {c:?}"),
            EntryError::TrailingInput(t) => write!(f, "unexpected trailing input {t:?}"),
        }
    }
}

impl std::error::Error for EntryError {}
