//! Encoding a pattern as RLE text.

use super::io_error;
use crate::{error::Error, pattern::Pattern, rule::RULE_STRING};
use std::{fmt::Write, fs, path::Path};

/// Lines of runs are wrapped before they exceed this length.
pub const MAX_LINE_LEN: usize = 70;

/// Encodes a pattern as RLE text.
///
/// The header declares the actual width and height of the pattern.
/// Every row is written in full, trailing dead cells included,
/// so that decoding the text gives back the same layout
/// whenever the pattern is square.
pub fn encode(pattern: &Pattern) -> String {
    let mut str = String::new();
    writeln!(str, "#N {}", pattern.name()).unwrap();
    if let Some(author) = pattern.author() {
        writeln!(str, "#O {}", author).unwrap();
    }
    for comment in pattern.comments() {
        writeln!(str, "#C {}", comment).unwrap();
    }
    writeln!(
        str,
        "x = {}, y = {}, rule = {}",
        pattern.cols(),
        pattern.rows(),
        RULE_STRING
    )
    .unwrap();

    let mut line = String::new();
    let mut push = |token: &str| {
        if !line.is_empty() && line.len() + token.len() > MAX_LINE_LEN {
            str.push_str(&line);
            str.push('\n');
            line.clear();
        }
        line.push_str(token);
    };

    let rows = pattern.layout();
    for (y, row) in rows.iter().enumerate() {
        for (alive, n) in runs(row) {
            push(&token(n, if alive { 'o' } else { 'b' }));
        }
        if y + 1 < rows.len() {
            push("$");
        }
    }
    push("!");

    str.push_str(&line);
    str.push('\n');
    str
}

/// Encodes a pattern and writes it to a file.
pub fn encode_file<P: AsRef<Path>>(pattern: &Pattern, path: P) -> Result<(), Error> {
    let path = path.as_ref();
    fs::write(path, encode(pattern)).map_err(|e| io_error(path, e))
}

/// Splits a row into runs of cells with the same state.
fn runs(row: &[bool]) -> Vec<(bool, usize)> {
    let mut runs: Vec<(bool, usize)> = Vec::new();
    for &cell in row {
        match runs.last_mut() {
            Some((state, n)) if *state == cell => *n += 1,
            _ => runs.push((cell, 1)),
        }
    }
    runs
}

fn token(n: usize, tag: char) -> String {
    if n == 1 {
        tag.to_string()
    } else {
        format!("{}{}", n, tag)
    }
}
