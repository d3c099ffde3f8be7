//! Plain-text document loading for batch runs.

use crate::classifier::Document;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

const SUPPORTED_EXTENSIONS: &[&str] = &["txt", "md"];

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("failed to read directory '{}': {source}", path.display())]
    Directory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read document '{}': {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Load one document; its name is the file name.
pub fn load_file(path: impl AsRef<Path>) -> Result<Document, IngestError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| IngestError::File {
        path: path.to_path_buf(),
        source,
    })?;
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(Document::new(name, text))
}

/// Load every `.txt` and `.md` file under `root`, ordered by relative path.
///
/// Documents are named by their path relative to `root` with `/` separators, so
/// names stay unique across subdirectories. Files that cannot be read as UTF-8
/// are skipped with a warning.
pub fn load_directory(root: impl AsRef<Path>) -> Result<Vec<Document>, IngestError> {
    let root = root.as_ref();
    let mut files = Vec::new();
    collect_files(root, &mut files)?;
    files.sort();

    let mut documents = Vec::with_capacity(files.len());
    for path in files {
        let name = relative_name(root, &path);
        match fs::read_to_string(&path) {
            Ok(text) => documents.push(Document::new(name, text)),
            Err(err) => warn!(document = %name, error = %err, "skipping unreadable document"),
        }
    }
    Ok(documents)
}

fn collect_files(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), IngestError> {
    let entries = fs::read_dir(dir).map_err(|source| IngestError::Directory {
        path: dir.to_path_buf(),
        source,
    })?;

    for entry in entries {
        let entry = entry.map_err(|source| IngestError::Directory {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.is_dir() {
            collect_files(&path, files)?;
        } else if is_supported(&path) {
            files.push(path);
        }
    }
    Ok(())
}

fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| ext.eq_ignore_ascii_case(supported))
        })
        .unwrap_or(false)
}

fn relative_name(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|component| component.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
