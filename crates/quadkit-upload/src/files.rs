//! Locating `.nq` files and naming them for the endpoint.

use std::path::{Path, PathBuf};

use crate::error::{Result, UploadError};

/// All `*.nq` files directly inside `folder`, sorted by path.
pub fn list_nq_files(folder: &Path) -> Result<Vec<PathBuf>> {
    if !folder.is_dir() {
        return Err(UploadError::FolderNotFound {
            path: folder.to_path_buf(),
        });
    }

    let mut files = Vec::new();
    for entry in std::fs::read_dir(folder)? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "nq") {
            files.push(path);
        }
    }
    files.sort();

    if files.is_empty() {
        return Err(UploadError::NoFiles {
            path: folder.to_path_buf(),
        });
    }
    Ok(files)
}

/// URI the endpoint should `LOAD` for `path`.
///
/// With a `base_uri` the file name is appended to it (the folder as the
/// endpoint sees it); otherwise the local absolute path becomes a
/// `file://` URI.
pub fn file_uri(path: &Path, base_uri: Option<&str>) -> Result<String> {
    match base_uri {
        Some(base) => {
            let name = path.file_name().ok_or_else(|| UploadError::Read {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "no file name"),
            })?;
            Ok(format!(
                "{}/{}",
                base.trim_end_matches('/'),
                name.to_string_lossy()
            ))
        }
        None => {
            let absolute = std::fs::canonicalize(path).map_err(|source| UploadError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            Ok(format!("file://{}", absolute.display()))
        }
    }
}
