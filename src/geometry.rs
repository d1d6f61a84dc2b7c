/// A point on the integer grid.
///
/// `y` grows downward when rendered, so `(0, 0)` is the top left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Coordinate {
    pub x: i32,
    pub y: i32,
}

impl Coordinate {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move by `(dx, dy)`, each of which is -1, 0 or 1.
    ///
    /// Callers only step toward a point on the grid, so the result stays in range.
    fn step(self, (dx, dy): (i32, i32)) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl From<(i32, i32)> for Coordinate {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// How a segment travels across the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovementType {
    Horizontal,
    Vertical,
    /// `|dx| == |dy|`, both nonzero.
    Diagonal45,
    /// Both deltas nonzero and of different magnitude.
    OtherDiagonal,
}

impl MovementType {
    /// Classify a movement from its deltas.
    ///
    /// A zero-length movement counts as horizontal.
    pub fn classify(dx: i64, dy: i64) -> Self {
        if dy == 0 {
            MovementType::Horizontal
        } else if dx == 0 {
            MovementType::Vertical
        } else if dx.abs() == dy.abs() {
            MovementType::Diagonal45
        } else {
            MovementType::OtherDiagonal
        }
    }

    pub fn is_orthogonal(self) -> bool {
        matches!(self, MovementType::Horizontal | MovementType::Vertical)
    }
}

/// A straight line between two grid points, both ends inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineSegment {
    pub start: Coordinate,
    pub end: Coordinate,
}

impl LineSegment {
    pub fn new(start: impl Into<Coordinate>, end: impl Into<Coordinate>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// `end - start` on each axis. Widened so that any two `i32` points fit.
    pub fn delta(&self) -> (i64, i64) {
        (
            i64::from(self.end.x) - i64::from(self.start.x),
            i64::from(self.end.y) - i64::from(self.start.y),
        )
    }

    pub fn movement(&self) -> MovementType {
        let (dx, dy) = self.delta();
        MovementType::classify(dx, dy)
    }

    /// Iterate over every grid point covered by this segment, `start` first.
    ///
    /// Returns `None` for [`MovementType::OtherDiagonal`] segments, which do not
    /// land on the unit grid at every step.
    pub fn points(&self) -> Option<Points> {
        let (dx, dy) = self.delta();
        (MovementType::classify(dx, dy) != MovementType::OtherDiagonal).then(|| Points {
            next: Some(self.start),
            end: self.end,
            step: (dx.signum() as i32, dy.signum() as i32),
            remaining: dx.unsigned_abs().max(dy.unsigned_abs()),
        })
    }
}

/// Iterator over the points of an axis-aligned or 45 degree [`LineSegment`].
#[derive(Debug, Clone)]
pub struct Points {
    next: Option<Coordinate>,
    end: Coordinate,
    step: (i32, i32),
    /// Steps left after `next`.
    remaining: u64,
}

impl Iterator for Points {
    type Item = Coordinate;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = if self.remaining == 0 {
            debug_assert_eq!(current, self.end, "stepping must finish on the end point");
            None
        } else {
            self.remaining -= 1;
            Some(current.step(self.step))
        };
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = match self.next {
            // up to 2^32 points, which may not fit in a 32 bit `usize`
            Some(_) => usize::try_from(self.remaining + 1).ok(),
            None => Some(0),
        };
        (remaining.unwrap_or(usize::MAX), remaining)
    }
}
