mod accumulator;
mod diagram;
mod geometry;
mod parse;
mod source;

pub use accumulator::{DiagonalPolicy, LineGridAccumulator, OverlapMap};
pub use diagram::{Diagram, DiagramError, MAX_CELLS};
pub use geometry::{Coordinate, LineSegment, MovementType, Points};
pub use parse::ParseError;
pub use source::{accumulate_file, accumulate_reader, read_segments, SourceError};
