//! Patterns that can be placed in a grid.

use crate::error::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A named rectangular matrix of cells.
///
/// The layout is a list of rows, so `at(row, col)` reads the cell in the
/// `row`th line of an RLE file and the `col`th column of that line.
/// All rows have the same length. A pattern never changes after
/// it is built.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Pattern {
    name: String,
    author: Option<String>,
    comments: Vec<String>,
    layout: Vec<Vec<bool>>,
}

impl Pattern {
    /// Creates a pattern from its rows.
    ///
    /// Returns an error if the rows have different lengths.
    pub fn new<S: ToString>(name: S, layout: Vec<Vec<bool>>) -> Result<Self, Error> {
        if let Some(first) = layout.first() {
            let expected = first.len();
            if let Some((row, r)) = layout
                .iter()
                .enumerate()
                .find(|(_, r)| r.len() != expected)
            {
                return Err(Error::JaggedLayout {
                    row,
                    expected,
                    found: r.len(),
                });
            }
        }
        Ok(Pattern {
            name: single_line(name.to_string()),
            author: None,
            comments: Vec::new(),
            layout,
        })
    }

    /// Creates a pattern from rows of `b'0'`s and `b'1'`s.
    pub fn from_bits<S: ToString, R: AsRef<[u8]>>(name: S, rows: &[R]) -> Result<Self, Error> {
        Pattern::new(name, bits(rows))
    }

    /// Sets the author.
    pub fn set_author(mut self, author: Option<String>) -> Self {
        self.author = author.map(single_line);
        self
    }

    /// Sets the comments.
    pub fn set_comments(mut self, comments: Vec<String>) -> Self {
        self.comments = comments.into_iter().map(single_line).collect();
        self
    }

    /// The glider, the smallest spaceship.
    pub fn glider() -> Self {
        Pattern::from_rows("Glider", bits(&[b"010", b"001", b"111"]))
    }

    /// The lightweight spaceship, moving to the left,
    /// with an empty row below it to make it square.
    pub fn lwss() -> Self {
        Pattern::from_rows(
            "LWSS",
            bits(&[b"01001", b"10000", b"10001", b"11110", b"00000"]),
        )
    }

    /// Creates a pattern from rows already known to have the same length.
    pub(crate) fn from_rows<S: ToString>(name: S, layout: Vec<Vec<bool>>) -> Self {
        debug_assert!(layout.windows(2).all(|w| w[0].len() == w[1].len()));
        Pattern {
            name: single_line(name.to_string()),
            author: None,
            comments: Vec::new(),
            layout,
        }
    }

    /// The name of the pattern.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The author of the pattern, from the `#O` line of an RLE file.
    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    /// Comments, from the `#C` lines of an RLE file.
    pub fn comments(&self) -> &[String] {
        &self.comments
    }

    /// The rows of the pattern.
    pub fn layout(&self) -> &[Vec<bool>] {
        &self.layout
    }

    /// Number of rows.
    ///
    /// Patterns decoded from RLE are square, so this is also
    /// the number of columns.
    pub fn size(&self) -> usize {
        self.layout.len()
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.layout.len()
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.layout.first().map_or(0, Vec::len)
    }

    /// Whether the pattern is square.
    pub fn is_square(&self) -> bool {
        self.rows() == self.cols()
    }

    /// Whether the cell at `(row, col)` is alive.
    ///
    /// # Panics
    ///
    /// Panics if `(row, col)` is outside the pattern.
    pub fn at(&self, row: usize, col: usize) -> bool {
        self.layout[row][col]
    }

    /// Number of living cells.
    pub fn population(&self) -> usize {
        self.layout.iter().flatten().filter(|&&c| c).count()
    }
}

/// Line breaks become spaces, and surrounding whitespace is trimmed,
/// so that the text fits on one `#` line of an RLE file.
fn single_line(text: String) -> String {
    if text.contains(['\r', '\n']) || text.trim().len() != text.len() {
        text.replace(['\r', '\n'], " ").trim().to_string()
    } else {
        text
    }
}

fn bits<R: AsRef<[u8]>>(rows: &[R]) -> Vec<Vec<bool>> {
    rows.iter()
        .map(|r| r.as_ref().iter().map(|&c| c == b'1').collect())
        .collect()
}
