//! Decoding RLE text into a pattern.

use super::io_error;
use crate::{
    error::{Error, FormatError},
    pattern::Pattern,
    rule,
};
use log::debug;
use std::{fs, path::Path};

/// The name of a decoded pattern without a `#N` line.
pub const DEFAULT_NAME: &str = "Unknown Pattern";

/// The largest width or height a decoded pattern may declare.
pub const MAX_SIDE: usize = 4096;

/// Decodes a pattern from RLE text.
///
/// The pattern is named by its `#N` line, or [`DEFAULT_NAME`].
pub fn decode(text: &str) -> Result<Pattern, Error> {
    decode_named(text, DEFAULT_NAME)
}

/// Decodes a pattern from an RLE file.
///
/// Without a `#N` line, the pattern is named after the file,
/// with the last 4 characters (the `.rle` extension) removed.
pub fn decode_file<P: AsRef<Path>>(path: P) -> Result<Pattern, Error> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| io_error(path, e))?;
    decode_named(&text, &fallback_name(path))
}

fn fallback_name(path: &Path) -> String {
    let file_name = path
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let len = file_name.chars().count();
    if len > 4 {
        file_name.chars().take(len - 4).collect()
    } else {
        file_name
    }
}

/// Decodes a pattern from RLE text,
/// naming it `fallback_name` if there is no `#N` line.
///
/// The decoded pattern is always square: its side is the larger of the
/// declared width and height. Every row is padded with dead cells on the
/// right. Missing rows are added one by one, alternately at the bottom and
/// at the top, starting at the bottom. A declared width or height larger
/// than [`MAX_SIDE`] is an error.
pub fn decode_named(text: &str, fallback_name: &str) -> Result<Pattern, Error> {
    let mut decoder = Decoder::default();
    for (i, line) in text.lines().enumerate() {
        decoder.feed(i + 1, line.trim_end_matches('\r'))?;
        if decoder.done {
            break;
        }
    }
    let pattern = decoder.finish(fallback_name)?;
    debug!(
        "Decoded {:?}, {}x{}",
        pattern.name(),
        pattern.cols(),
        pattern.rows()
    );
    Ok(pattern)
}

/// The declared size of the pattern.
#[derive(Clone, Copy, Debug)]
struct Header {
    width: usize,
    height: usize,
}

#[derive(Debug, Default)]
struct Decoder {
    name: Option<String>,
    author: Option<String>,
    comments: Vec<String>,
    header: Option<Header>,

    /// Decoded rows, one for each declared row.
    rows: Vec<Vec<bool>>,
    /// The row being decoded.
    row: usize,
    /// A run count waiting for its tag.
    count: Option<usize>,

    /// The last line fed to the decoder.
    line: usize,
    /// Whether the terminating `!` has been read.
    done: bool,
}

impl Decoder {
    fn feed(&mut self, line_no: usize, line: &str) -> Result<(), FormatError> {
        self.line = line_no;
        if let Some(info) = line.strip_prefix('#') {
            self.info(info);
            return Ok(());
        }
        match self.header {
            Some(header) => self.data(header, line),
            None => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    Ok(())
                } else if trimmed.starts_with('x') {
                    let header = parse_header(line_no, trimmed)?;
                    self.rows = vec![Vec::new(); header.height];
                    self.header = Some(header);
                    Ok(())
                } else {
                    Err(FormatError::DataBeforeHeader(line_no))
                }
            }
        }
    }

    /// Reads a `#` line. Unknown kinds are ignored.
    fn info(&mut self, info: &str) {
        let mut chars = info.chars();
        let kind = chars.next();
        let text = chars.as_str().trim();
        match kind {
            Some('N') => self.name = Some(text.to_string()),
            Some('O') => self.author = Some(text.to_string()),
            Some('C') | Some('c') => self.comments.push(text.to_string()),
            _ => (),
        }
    }

    /// Reads a line of runs.
    fn data(&mut self, header: Header, line: &str) -> Result<(), FormatError> {
        let overflow = FormatError::Overflow {
            line: self.line,
            width: header.width,
            height: header.height,
        };
        for c in line.chars() {
            match c {
                '0'..='9' => {
                    let digit = c as usize - '0' as usize;
                    let count = self.count.unwrap_or(0);
                    let count = count
                        .checked_mul(10)
                        .and_then(|n| n.checked_add(digit))
                        .ok_or_else(|| overflow.clone())?;
                    self.count = Some(count);
                }
                'b' | 'o' => {
                    let n = self.count.take().unwrap_or(1);
                    let row = self.rows.get_mut(self.row).ok_or_else(|| overflow.clone())?;
                    if row.len().checked_add(n).map_or(true, |end| end > header.width) {
                        return Err(overflow);
                    }
                    row.extend(std::iter::repeat(c == 'o').take(n));
                }
                '$' => {
                    let n = self.count.take().unwrap_or(1);
                    self.row = self.row.saturating_add(n);
                }
                '!' => {
                    if self.count.is_some() {
                        return Err(FormatError::DanglingCount(self.line));
                    }
                    self.done = true;
                    return Ok(());
                }
                c if c.is_whitespace() => (),
                found => {
                    return Err(FormatError::InvalidTag {
                        line: self.line,
                        found,
                    })
                }
            }
        }
        Ok(())
    }

    /// Pads the rows into a square and builds the pattern.
    fn finish(self, fallback_name: &str) -> Result<Pattern, FormatError> {
        let header = self.header.ok_or(FormatError::MissingHeader)?;
        if self.count.is_some() {
            return Err(FormatError::DanglingCount(self.line));
        }

        let side = header.width.max(header.height);
        let mut rows = self.rows;
        for row in rows.iter_mut() {
            row.resize(side, false);
        }
        for i in 0..side - rows.len() {
            if i % 2 == 0 {
                rows.push(vec![false; side]);
            } else {
                rows.insert(0, vec![false; side]);
            }
        }

        let name = self.name.unwrap_or_else(|| fallback_name.to_string());
        Ok(Pattern::from_rows(name, rows)
            .set_author(self.author)
            .set_comments(self.comments))
    }
}

/// Parses `x = <width>, y = <height>`, optionally followed by `, rule = <rule>`.
fn parse_header(line_no: usize, text: &str) -> Result<Header, FormatError> {
    let invalid = || FormatError::InvalidHeader {
        line: line_no,
        text: text.to_string(),
    };
    let mut parts = text.split(',');

    let mut number = |key: &str| {
        parts
            .next()
            .and_then(|part| value_of(part, key))
            .and_then(|value| value.parse::<usize>().ok())
            .ok_or_else(invalid)
    };
    let width = number("x")?;
    let height = number("y")?;
    if width.max(height) > MAX_SIDE {
        return Err(FormatError::TooLarge {
            line: line_no,
            width,
            height,
        });
    }

    if let Some(part) = parts.next() {
        let rule_string = value_of(part, "rule").ok_or_else(invalid)?;
        if !rule::is_classic(rule_string) {
            return Err(FormatError::UnsupportedRule {
                line: line_no,
                rule: rule_string.to_string(),
            });
        }
    }
    if parts.next().is_some() {
        return Err(invalid());
    }

    Ok(Header { width, height })
}

/// The value of `<key> = <value>`, or `None` if the key is different.
fn value_of<'a>(part: &'a str, key: &str) -> Option<&'a str> {
    let (k, v) = part.split_once('=')?;
    (k.trim() == key).then(|| v.trim())
}
