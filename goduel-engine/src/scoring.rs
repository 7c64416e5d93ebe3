use serde::Serialize;
use serde_repr::{Deserialize_repr, Serialize_repr};

use crate::goban::Goban;
use crate::stone::Stone;

/// How final scores are counted. Serialized as its ordinal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize_repr, Deserialize_repr)]
#[repr(u8)]
pub enum ScoringRules {
    /// Surrounded empty points plus prisoners.
    #[default]
    Territory = 0,
    /// Surrounded empty points plus stones on the board.
    Area = 1,
}

impl std::str::FromStr for ScoringRules {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "territory" => Ok(ScoringRules::Territory),
            "area" => Ok(ScoringRules::Area),
            _ => Err(format!("unknown scoring rules: {s}")),
        }
    }
}

/// Assign each empty point to the colour that alone borders its region.
///
/// Returns one entry per point in board order: `1` Black, `-1` White, `0`
/// neutral or occupied. Every stone on the board counts as alive.
pub fn estimate_territory(goban: &Goban) -> Vec<i8> {
    let cols = goban.cols();
    let rows = goban.rows();
    let board = goban.board();
    let size = board.len();

    let mut ownership = vec![0i8; size];
    let mut visited = vec![false; size];

    for y in 0..rows {
        for x in 0..cols {
            let idx = y as usize * cols as usize + x as usize;
            if visited[idx] || board[idx] != 0 {
                continue;
            }

            let mut region = Vec::new();
            let mut border_colors: u8 = 0; // bit 0 = Black seen, bit 1 = White seen
            let mut stack = vec![(x, y)];

            while let Some(p) = stack.pop() {
                let pi = p.1 as usize * cols as usize + p.0 as usize;
                if visited[pi] {
                    continue;
                }
                visited[pi] = true;
                region.push(pi);

                for n in goban.neighbors(p) {
                    let ni = n.1 as usize * cols as usize + n.0 as usize;
                    match Stone::from_int(board[ni]) {
                        Some(Stone::Black) => border_colors |= 1,
                        Some(Stone::White) => border_colors |= 2,
                        None if !visited[ni] => stack.push(n),
                        None => {}
                    }
                }
            }

            let owner = match border_colors {
                1 => 1i8,
                2 => -1i8,
                _ => 0i8,
            };

            for &pi in &region {
                ownership[pi] = owner;
            }
        }
    }

    ownership
}

/// Per-colour score breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlayerPoints {
    pub territory: u32,
    pub prisoners: u32,
    pub stones: u32,
}

/// Full score breakdown for both players under one rule set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GameScore {
    pub black: PlayerPoints,
    pub white: PlayerPoints,
    pub komi: f64,
    pub rules: ScoringRules,
}

impl GameScore {
    fn points(&self, p: &PlayerPoints) -> u32 {
        match self.rules {
            ScoringRules::Territory => p.territory + p.prisoners,
            ScoringRules::Area => p.territory + p.stones,
        }
    }

    pub fn black_total(&self) -> f64 {
        self.points(&self.black) as f64
    }

    pub fn white_total(&self) -> f64 {
        self.points(&self.white) as f64 + self.komi
    }

    pub fn total(&self, stone: Stone) -> f64 {
        match stone {
            Stone::Black => self.black_total(),
            Stone::White => self.white_total(),
        }
    }

    /// The colour with the higher total, or `None` on a draw.
    pub fn winner(&self) -> Option<Stone> {
        let diff = self.black_total() - self.white_total();
        if diff > 0.0 {
            Some(Stone::Black)
        } else if diff < 0.0 {
            Some(Stone::White)
        } else {
            None
        }
    }
}

/// Count the final position. White receives `komi`.
pub fn score(goban: &Goban, rules: ScoringRules, komi: f64) -> GameScore {
    let ownership = estimate_territory(goban);
    let black_territory = ownership.iter().filter(|&&o| o == 1).count() as u32;
    let white_territory = ownership.iter().filter(|&&o| o == -1).count() as u32;

    GameScore {
        black: PlayerPoints {
            territory: black_territory,
            prisoners: goban.captures().get(Stone::Black),
            stones: goban.stone_count(Stone::Black),
        },
        white: PlayerPoints {
            territory: white_territory,
            prisoners: goban.captures().get(Stone::White),
            stones: goban.stone_count(Stone::White),
        },
        komi,
        rules,
    }
}
