use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
};

use log::debug;

use crate::{
    accumulator::{DiagonalPolicy, LineGridAccumulator},
    geometry::LineSegment,
    parse::ParseError,
};

/// Read one [`LineSegment`] per non-blank line of `reader`, in order.
///
/// Items are yielded lazily; nothing is buffered beyond the current line.
pub fn read_segments<R: BufRead>(
    reader: R,
) -> impl Iterator<Item = Result<LineSegment, SourceError>> {
    reader
        .lines()
        .enumerate()
        .filter_map(|(idx, line)| {
            let line_no = idx + 1;
            let line = match line {
                Ok(line) => line,
                Err(source) => return Some(Err(SourceError::Io { line_no, source })),
            };
            if line.trim().is_empty() {
                return None;
            }
            Some(
                line.parse::<LineSegment>()
                    .map_err(|source| SourceError::Parse { line_no, source }),
            )
        })
}

/// Feed every segment in `reader` to a fresh accumulator.
///
/// Returns once the end of input has been reached, or at the first line which
/// cannot be read or parsed.
pub fn accumulate_reader<R: BufRead>(
    reader: R,
    policy: DiagonalPolicy,
) -> Result<LineGridAccumulator, SourceError> {
    let mut accumulator = LineGridAccumulator::new(policy);
    let mut segment_count = 0_usize;
    for segment in read_segments(reader) {
        accumulator.add_segment(segment?);
        segment_count += 1;
    }
    debug!(
        "input exhausted after {segment_count} segments; {} points visited",
        accumulator.len()
    );
    Ok(accumulator)
}

/// Open `path` and [`accumulate_reader`] over its contents.
pub fn accumulate_file(
    path: impl AsRef<Path>,
    policy: DiagonalPolicy,
) -> Result<LineGridAccumulator, SourceError> {
    let path = path.as_ref();
    debug!("reading segments from {}", path.display());
    let file = File::open(path).map_err(|source| SourceError::Open {
        path: path.display().to_string(),
        source,
    })?;
    accumulate_reader(BufReader::new(file), policy)
}

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("could not open \"{path}\"")]
    Open {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("failed to read line {line_no}")]
    Io {
        line_no: usize,
        #[source]
        source: io::Error,
    },
    #[error("malformed input on line {line_no}")]
    Parse {
        line_no: usize,
        #[source]
        source: ParseError,
    },
}
