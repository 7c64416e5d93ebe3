use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A player's colour. An empty intersection is `None` wherever an
/// `Option<Stone>` is used.
///
/// On the wire a stone is its single-letter marker, `"B"` or `"W"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stone {
    #[serde(rename = "B")]
    Black,
    #[serde(rename = "W")]
    White,
}

impl Stone {
    pub fn from_int(v: i8) -> Option<Self> {
        match v.signum() {
            1 => Some(Stone::Black),
            -1 => Some(Stone::White),
            _ => None,
        }
    }

    pub fn to_int(self) -> i8 {
        match self {
            Stone::Black => 1,
            Stone::White => -1,
        }
    }

    pub fn opp(self) -> Self {
        match self {
            Stone::Black => Stone::White,
            Stone::White => Stone::Black,
        }
    }

    pub fn letter(self) -> &'static str {
        match self {
            Stone::Black => "B",
            Stone::White => "W",
        }
    }
}

impl FromStr for Stone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "B" => Ok(Stone::Black),
            "W" => Ok(Stone::White),
            _ => Err(format!("invalid player marker: {s}")),
        }
    }
}

impl fmt::Display for Stone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stone::Black => write!(f, "Black"),
            Stone::White => write!(f, "White"),
        }
    }
}
