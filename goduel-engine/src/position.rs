use crate::Point;

/// A set of board points with value semantics.
///
/// Membership is keyed by the flat index `row * cols + col`, so lookups are
/// O(1) and two equal points are always the same member. Insertion order is
/// kept for iteration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionSet {
    cols: u8,
    rows: u8,
    present: Vec<bool>,
    points: Vec<Point>,
}

impl PositionSet {
    pub fn new(cols: u8, rows: u8) -> Self {
        PositionSet {
            cols,
            rows,
            present: vec![false; cols as usize * rows as usize],
            points: Vec::new(),
        }
    }

    /// Insert a point. Returns `false` if it was already present or lies off the board.
    pub fn insert(&mut self, point: Point) -> bool {
        let Some(i) = self.key(point) else {
            return false;
        };
        if self.present[i] {
            return false;
        }
        self.present[i] = true;
        self.points.push(point);
        true
    }

    pub fn contains(&self, point: Point) -> bool {
        self.key(point).is_some_and(|i| self.present[i])
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Point> + '_ {
        self.points.iter().copied()
    }

    pub fn into_points(self) -> Vec<Point> {
        self.points
    }

    #[inline]
    fn key(&self, (col, row): Point) -> Option<usize> {
        (col < self.cols && row < self.rows)
            .then(|| row as usize * self.cols as usize + col as usize)
    }
}
