use std::collections::VecDeque;
use std::fmt;

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::Point;
use crate::error::GoError;
use crate::position::PositionSet;
use crate::stone::Stone;

/// Prisoners taken, indexed by the capturing colour.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Captures {
    pub black: u32,
    pub white: u32,
}

impl Captures {
    pub fn get(&self, stone: Stone) -> u32 {
        match stone {
            Stone::Black => self.black,
            Stone::White => self.white,
        }
    }

    fn add(&mut self, stone: Stone, count: u32) {
        match stone {
            Stone::Black => self.black += count,
            Stone::White => self.white += count,
        }
    }
}

/// A maximal set of same-coloured, orthogonally connected stones.
/// An empty intersection yields a group with no stones and no colour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub stones: Vec<Point>,
    pub stone: Option<Stone>,
}

impl Group {
    pub fn len(&self) -> usize {
        self.stones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stones.is_empty()
    }
}

/// The Go board stored as a flat row-major array (`row * cols + col`).
#[derive(Debug, Clone, PartialEq)]
pub struct Goban {
    board: Vec<i8>,
    cols: u8,
    rows: u8,
    captures: Captures,
}

impl Goban {
    /// Build from rows of cells: `1` Black, `-1` White, `0` empty.
    ///
    /// Panics if the rows differ in length.
    pub fn new(matrix: Vec<Vec<i8>>) -> Self {
        let rows = matrix.len();
        let cols = matrix.first().map_or(0, Vec::len);
        assert!(
            matrix.iter().all(|r| r.len() == cols),
            "malformed board matrix: ragged rows"
        );

        Goban {
            board: matrix.concat(),
            cols: cols as u8,
            rows: rows as u8,
            captures: Captures::default(),
        }
    }

    pub fn with_dimensions(cols: u8, rows: u8) -> Self {
        Goban::new(vec![vec![0; cols as usize]; rows as usize])
    }

    // -- Accessors --

    pub fn board(&self) -> &[i8] {
        &self.board
    }

    pub fn cols(&self) -> u8 {
        self.cols
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    pub fn captures(&self) -> &Captures {
        &self.captures
    }

    /// `None` for an empty or off-board point.
    pub fn stone_at(&self, point: Point) -> Option<Stone> {
        self.index(point).and_then(|i| Stone::from_int(self.board[i]))
    }

    pub fn on_board(&self, point: Point) -> bool {
        self.index(point).is_some()
    }

    pub fn is_empty(&self) -> bool {
        !self.board.iter().any(|&cell| cell != 0)
    }

    pub fn stone_count(&self, stone: Stone) -> u32 {
        let v = stone.to_int();
        self.board.iter().filter(|&&s| s == v).count() as u32
    }

    /// Canonical whole-board string: one line per row, `B`, `W` or `.` per point.
    pub fn snapshot(&self) -> String {
        self.to_string()
    }

    // -- Game actions --

    /// Place a stone and resolve captures. Returns a new Goban with the move
    /// applied; `self` is never modified.
    ///
    /// Every adjacent opponent group left without liberties is removed before
    /// the mover's own liberties are checked.
    pub fn play(&self, point: Point, stone: Stone) -> Result<Goban, GoError> {
        if !self.on_board(point) {
            return Err(GoError::NotOnBoard);
        }

        if self.stone_at(point).is_some() {
            return Err(GoError::Occupied);
        }

        let dead_groups = self.groups_captured_by(point, stone);

        let mut goban = self.clone();
        goban.put(point, stone.to_int());
        for group in &dead_groups {
            goban.capture(group);
        }

        let own = goban.group(point);
        if goban.liberties(&own, None) == 0 {
            return Err(GoError::Suicide);
        }

        Ok(goban)
    }

    /// Opponent groups next to `point` that a stone placed there would capture.
    fn groups_captured_by(&self, point: Point, stone: Stone) -> Vec<Group> {
        let mut seen = PositionSet::new(self.cols, self.rows);
        let mut dead = Vec::new();

        for n in self.neighbors(point) {
            if self.stone_at(n) != Some(stone.opp()) || seen.contains(n) {
                continue;
            }
            let group = self.group(n);
            for &p in &group.stones {
                seen.insert(p);
            }
            if self.liberties(&group, Some(point)) == 0 {
                dead.push(group);
            }
        }

        dead
    }

    /// Remove a group from the board and credit its stones to the opposing
    /// colour's prisoners. Does not check that the group is actually dead.
    pub fn capture(&mut self, group: &Group) {
        let Some(stone) = group.stone else {
            return;
        };

        for &pt in &group.stones {
            self.put(pt, 0);
        }
        self.captures.add(stone.opp(), group.len() as u32);
    }

    // -- Graph algorithms --

    /// Orthogonal neighbours, clipped at the edges: left, right, up, down.
    pub fn neighbors(&self, (col, row): Point) -> ArrayVec<Point, 4> {
        [
            col.checked_sub(1).map(|c| (c, row)),
            col.checked_add(1).map(|c| (c, row)),
            row.checked_sub(1).map(|r| (col, r)),
            row.checked_add(1).map(|r| (col, r)),
        ]
        .into_iter()
        .flatten()
        .filter(|&p| self.on_board(p))
        .collect()
    }

    /// Breadth-first flood fill of the group containing `point`.
    pub fn group(&self, point: Point) -> Group {
        let Some(stone) = self.stone_at(point) else {
            return Group {
                stones: Vec::new(),
                stone: None,
            };
        };

        let mut visited = PositionSet::new(self.cols, self.rows);
        let mut frontier = VecDeque::from([point]);
        visited.insert(point);

        while let Some(p) = frontier.pop_front() {
            for n in self.neighbors(p) {
                if self.stone_at(n) == Some(stone) && visited.insert(n) {
                    frontier.push_back(n);
                }
            }
        }

        Group {
            stones: visited.into_points(),
            stone: Some(stone),
        }
    }

    /// Count the distinct empty points adjacent to a group. `exclude` is
    /// treated as already filled, for evaluating a stone about to be placed there.
    pub fn liberties(&self, group: &Group, exclude: Option<Point>) -> usize {
        let mut seen = PositionSet::new(self.cols, self.rows);
        if let Some(p) = exclude {
            seen.insert(p);
        }

        let mut count = 0;
        for &p in &group.stones {
            for n in self.neighbors(p) {
                if self.stone_at(n).is_none() && seen.insert(n) {
                    count += 1;
                }
            }
        }
        count
    }

    // -- Internal helpers --

    #[inline]
    fn index(&self, (col, row): Point) -> Option<usize> {
        (col < self.cols && row < self.rows)
            .then(|| row as usize * self.cols as usize + col as usize)
    }

    fn put(&mut self, point: Point, cell: i8) {
        if let Some(i) = self.index(point) {
            self.board[i] = cell;
        }
    }
}

impl fmt::Display for Goban {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            if row > 0 {
                writeln!(f)?;
            }
            for col in 0..self.cols {
                let c = match self.stone_at((col, row)) {
                    Some(Stone::Black) => 'B',
                    Some(Stone::White) => 'W',
                    None => '.',
                };
                write!(f, "{c}")?;
            }
        }
        Ok(())
    }
}
