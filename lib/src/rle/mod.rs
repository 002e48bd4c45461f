//! Reading and writing patterns in the
//! [RLE](https://conwaylife.com/wiki/Rle) format.
//!
//! ```text
//! #N Glider
//! x = 3, y = 3, rule = B3/S23
//! bob$2bo$3o!
//! ```
//!
//! * `o` is a living cell, `b` is a dead cell;
//! * `$` ends a row;
//! * a number before `o`, `b` or `$` repeats it;
//! * `!` ends the pattern.

mod decode;
mod encode;

use crate::{error::Error, pattern::Pattern};
use log::{debug, warn};
use std::{
    fs, io,
    path::{Path, PathBuf},
};

pub use decode::{decode, decode_file, decode_named, DEFAULT_NAME, MAX_SIDE};
pub use encode::{encode, encode_file, MAX_LINE_LEN};

/// Wraps an I/O error on `path`.
///
/// A missing file becomes an [`Error::NotFound`].
fn io_error(path: &Path, source: io::Error) -> Error {
    if source.kind() == io::ErrorKind::NotFound {
        Error::NotFound(path.to_path_buf())
    } else {
        Error::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Decodes every file in a directory, in the order of their file names.
///
/// Files that cannot be read or decoded are skipped with a warning.
/// Returns an error only if the directory itself cannot be read.
pub fn load_dir<P: AsRef<Path>>(dir: P) -> Result<Vec<Pattern>, Error> {
    let dir = dir.as_ref();
    let mut paths = fs::read_dir(dir)
        .map_err(|e| io_error(dir, e))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file())
        .collect::<Vec<PathBuf>>();
    paths.sort();

    let mut patterns = Vec::with_capacity(paths.len());
    for path in paths {
        match decode_file(&path) {
            Ok(pattern) => {
                debug!("Loaded {:?} from {:?}", pattern.name(), path);
                patterns.push(pattern);
            }
            Err(e) => warn!("Skipping {:?}: {}", path, e),
        }
    }
    Ok(patterns)
}
