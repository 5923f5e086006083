use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// Reads the raw markup document into memory. The only side effect is the
/// read itself; there are no retries.
pub fn read_document(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })
}
