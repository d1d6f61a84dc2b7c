use std::{fmt, ops::Index};

use itertools::{Itertools, MinMaxResult};

use crate::{accumulator::OverlapMap, geometry::Coordinate};

/// A dense picture of an [`OverlapMap`], cropped to the visited points.
///
/// For indexing operations on this diagram, `(0, 0)` is the top left corner of
/// the bounding box, which is not necessarily the grid origin.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Diagram {
    origin: Coordinate,
    width: usize,
    height: usize,
    cells: Vec<u32>,
}

/// Largest picture [`Diagram::from_overlaps`] will allocate.
pub const MAX_CELLS: usize = 1 << 24;

fn span(result: MinMaxResult<i32>) -> Option<(i32, i32)> {
    match result {
        MinMaxResult::NoElements => None,
        MinMaxResult::OneElement(value) => Some((value, value)),
        MinMaxResult::MinMax(min, max) => Some((min, max)),
    }
}

impl Diagram {
    /// Build the picture of every visited point.
    ///
    /// Fails rather than allocating when the bounding box holds more than
    /// [`MAX_CELLS`] cells.
    pub fn from_overlaps(overlaps: &OverlapMap) -> Result<Self, DiagramError> {
        let (Some((min_x, max_x)), Some((min_y, max_y))) = (
            span(overlaps.keys().map(|point| point.x).minmax()),
            span(overlaps.keys().map(|point| point.y).minmax()),
        ) else {
            return Ok(Self::default());
        };

        // any two i32 values are at most 2^32 - 1 apart
        let width = (i64::from(max_x) - i64::from(min_x)) as u64 + 1;
        let height = (i64::from(max_y) - i64::from(min_y)) as u64 + 1;
        let too_large = DiagramError::TooLarge { width, height };
        let cell_count = width
            .checked_mul(height)
            .and_then(|cells| usize::try_from(cells).ok())
            .filter(|&cells| cells <= MAX_CELLS)
            .ok_or(too_large)?;

        // both dimensions are now at most MAX_CELLS
        let (width, height) = (width as usize, height as usize);
        let mut diagram = Diagram {
            origin: Coordinate::new(min_x, min_y),
            width,
            height,
            cells: vec![0; cell_count],
        };
        for (point, &count) in overlaps {
            let x = (i64::from(point.x) - i64::from(min_x)) as usize;
            let y = (i64::from(point.y) - i64::from(min_y)) as usize;
            diagram.cells[(y * width) + x] = count;
        }
        Ok(diagram)
    }

    /// The grid point shown in the top left corner.
    pub fn origin(&self) -> Coordinate {
        self.origin
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Get the internal index where the desired value is stored,
    /// or `None` if it is out of bounds.
    fn idx(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.width && y < self.height).then_some((y * self.width) + x)
    }

    pub fn get(&self, x: usize, y: usize) -> Option<u32> {
        self.idx(x, y).map(|idx| self.cells[idx])
    }
}

impl Index<(usize, usize)> for Diagram {
    type Output = u32;

    fn index(&self, (x, y): (usize, usize)) -> &Self::Output {
        let idx = self
            .idx(x, y)
            .unwrap_or_else(|| panic!("({x}, {y}) is outside the diagram"));
        &self.cells[idx]
    }
}

impl fmt::Display for Diagram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.width == 0 {
            return Ok(());
        }
        for row in self.cells.chunks(self.width) {
            for &count in row {
                let cell = match count {
                    0 => '.',
                    1..=9 => char::from_digit(count, 10).unwrap_or('#'),
                    _ => '#',
                };
                write!(f, "{cell}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DiagramError {
    #[error("a {width}x{height} diagram exceeds the limit of {max} cells", max = MAX_CELLS)]
    TooLarge { width: u64, height: u64 },
}
