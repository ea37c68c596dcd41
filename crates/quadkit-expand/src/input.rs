//! Line-by-line streaming over large N-Quads files.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{ExpandError, Result};

const READ_BUFFER_BYTES: usize = 1 << 20;

/// Call `f` on every line of `path` (terminator included) and return the
/// number of lines read.
///
/// The line buffer is reused between calls, so `f` only borrows it.
pub fn for_each_line<F>(path: &Path, mut f: F) -> Result<u64>
where
    F: FnMut(&str) -> Result<()>,
{
    let file = File::open(path).map_err(|source| ExpandError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = BufReader::with_capacity(READ_BUFFER_BYTES, file);
    let mut line = String::new();
    let mut count = 0u64;

    loop {
        line.clear();
        let read = reader
            .read_line(&mut line)
            .map_err(|source| ExpandError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        if read == 0 {
            break;
        }
        count += 1;
        f(&line)?;
    }

    Ok(count)
}
