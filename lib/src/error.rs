//! All kinds of errors in this crate.

use crate::cells::Coord;
use displaydoc::Display;
use rayon::ThreadPoolBuildError;
use std::{io, path::PathBuf};
use thiserror::Error;

/// All kinds of errors in this crate.
#[derive(Debug, Display, Error)]
pub enum Error {
    /// Pattern file {0:?} not found.
    NotFound(PathBuf),
    /// Unable to read or write {path:?}: {source}
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Malformed pattern: {0}
    Format(#[from] FormatError),
    /// Cell {coord:?} is outside the {width}x{height} grid.
    OutOfBounds {
        coord: Coord,
        width: usize,
        height: usize,
    },
    /// A {cols}x{rows} pattern placed at {coord:?} does not fit in the {width}x{height} grid.
    PatternOutOfBounds {
        coord: Coord,
        cols: usize,
        rows: usize,
        width: usize,
        height: usize,
    },
    /// Row {row} of the layout has {found} cells, expected {expected}.
    JaggedLayout {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// Width / height / cell size / worker count should be positive.
    NonPositiveError,
    /// Unable to start the worker pool: {0}
    ThreadPool(#[from] ThreadPoolBuildError),
}

/// Errors when decoding an RLE pattern.
///
/// Line numbers are 1-indexed.
#[derive(Clone, Debug, PartialEq, Eq, Display, Error)]
pub enum FormatError {
    /// The input has no `x = .., y = ..` header.
    MissingHeader,
    /// Line {0}: pattern data before the `x = .., y = ..` header.
    DataBeforeHeader(usize),
    /// Line {line}: invalid header {text:?}.
    InvalidHeader { line: usize, text: String },
    /// Line {line}: only the B3/S23 rule is supported, found {rule:?}.
    UnsupportedRule { line: usize, rule: String },
    /// Line {line}: unexpected character {found:?} in pattern data.
    InvalidTag { line: usize, found: char },
    /// Line {0}: run count is not followed by a cell or a row end.
    DanglingCount(usize),
    /// Line {line}: declared size {width}x{height} is too large.
    TooLarge {
        line: usize,
        width: usize,
        height: usize,
    },
    /// Line {line}: pattern data exceeds the declared size {width}x{height}.
    Overflow {
        line: usize,
        width: usize,
        height: usize,
    },
}
