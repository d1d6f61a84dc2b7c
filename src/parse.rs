use std::{num::ParseIntError, str::FromStr, sync::OnceLock};

use regex::{Captures, Regex};

use crate::geometry::{Coordinate, LineSegment};

const PAIR: &str = r"(-?\d+)\s*,\s*(-?\d+)";

fn pair_regex() -> &'static Regex {
    static PAIR_RE: OnceLock<Regex> = OnceLock::new();
    PAIR_RE.get_or_init(|| Regex::new(PAIR).expect("pair pattern is valid"))
}

fn whole_pair_regex() -> &'static Regex {
    static WHOLE_PAIR_RE: OnceLock<Regex> = OnceLock::new();
    WHOLE_PAIR_RE.get_or_init(|| {
        Regex::new(&format!(r"^\s*{PAIR}\s*$")).expect("whole pair pattern is valid")
    })
}

fn parse_int(value: &str) -> Result<i32, ParseError> {
    value.parse().map_err(|source| ParseError::Integer {
        value: value.to_owned(),
        source,
    })
}

fn coordinate_from(captures: &Captures) -> Result<Coordinate, ParseError> {
    Ok(Coordinate::new(
        parse_int(&captures[1])?,
        parse_int(&captures[2])?,
    ))
}

impl FromStr for Coordinate {
    type Err = ParseError;

    /// Parse `"x,y"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let captures = whole_pair_regex()
            .captures(s)
            .ok_or_else(|| ParseError::Malformed(s.to_owned()))?;
        coordinate_from(&captures)
    }
}

impl FromStr for LineSegment {
    type Err = ParseError;

    /// Parse `"x1,y1 -> x2,y2"`.
    ///
    /// Any non-numeric delimiter between the two pairs is accepted, but there
    /// must be exactly two pairs on the line.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let pairs = pair_regex().captures_iter(s).collect::<Vec<_>>();
        let [start, end] = &pairs[..] else {
            return Err(ParseError::Malformed(s.to_owned()));
        };
        Ok(LineSegment {
            start: coordinate_from(start)?,
            end: coordinate_from(end)?,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("expected two `x,y` pairs but found: \"{0}\"")]
    Malformed(String),
    #[error("coordinate `{value}` does not fit in an i32")]
    Integer {
        value: String,
        #[source]
        source: ParseIntError,
    },
}
