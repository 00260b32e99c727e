//! Reads `x y` coordinate files as written by the dataset generator and the
//! skyline engine.
//!
//! Each non-blank line is split on whitespace. Lines with exactly two tokens
//! become a point, lines with any other token count are skipped without
//! complaint. A two-token line whose tokens are not numbers fails the read.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::num::ParseFloatError;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::point::{Point2D, PointSet};

#[derive(Debug, Error)]
pub enum ReadError {
    /// The file is missing, unreadable, or otherwise refused by the OS.
    #[error("cannot open {}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("line {line}: read failed")]
    Io {
        line: usize,
        #[source]
        source: io::Error,
    },
    #[error("line {line}: `{token}` is not a number")]
    UnparsableNumber {
        line: usize,
        token: String,
        #[source]
        source: ParseFloatError,
    },
}

pub fn read_points<R: BufRead>(reader: R) -> Result<PointSet, ReadError> {
    let mut points = PointSet::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| ReadError::Io {
            line: index + 1,
            source,
        })?;
        if let Some(point) = parse_line(index + 1, &line)? {
            points.push(point);
        }
    }
    Ok(points)
}

/// The file handle lives only for the duration of this call and is closed on
/// every return path.
pub fn read_point_file(path: impl AsRef<Path>) -> Result<PointSet, ReadError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| ReadError::Open {
        path: path.to_owned(),
        source,
    })?;
    read_points(BufReader::new(file))
}

fn parse_line(line: usize, text: &str) -> Result<Option<Point2D>, ReadError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }

    let mut tokens = text.split_whitespace();
    let (x, y) = match (tokens.next(), tokens.next(), tokens.next()) {
        (Some(x), Some(y), None) => (x, y),
        _ => return Ok(None),
    };

    let number = |token: &str| {
        token.parse::<f64>().map_err(|source| ReadError::UnparsableNumber {
            line,
            token: token.to_owned(),
            source,
        })
    };
    Ok(Some(Point2D::new(number(x)?, number(y)?)))
}
