// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mapwright-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mapwright and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Map documents on disk.
//!
//! Documents are single pretty-printed JSON files. Writes go through a temp file in the same
//! directory and are renamed into place, so readers never observe a half-written document.

use std::fmt;
use std::fs;
use std::io::{self, Write as _};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::model::{DocIssue, MapDoc};

#[derive(Debug)]
pub enum StoreError {
    Io {
        path: PathBuf,
        source: io::Error,
    },
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    SymlinkRefused {
        path: PathBuf,
    },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "io error at {path:?}: {source}"),
            Self::Json { path, source } => write!(f, "json error at {path:?}: {source}"),
            Self::SymlinkRefused { path } => {
                write!(f, "refusing to write through symlink at {path:?}")
            }
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            Self::SymlinkRefused { .. } => None,
        }
    }
}

/// Reads and parses the document at `path`. Structural issues are logged, not rejected.
pub fn load_document(path: &Path) -> Result<MapDoc, StoreError> {
    let text = fs::read_to_string(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let doc = parse_document_at(&text, path)?;
    tracing::debug!(path = %path.display(), rooms = doc.rooms.len(), "loaded map document");
    Ok(doc)
}

/// Parses a document from a JSON string. Errors carry an empty path.
pub fn parse_document(text: &str) -> Result<MapDoc, StoreError> {
    parse_document_at(text, Path::new(""))
}

fn parse_document_at(text: &str, path: &Path) -> Result<MapDoc, StoreError> {
    let doc: MapDoc = serde_json::from_str(text).map_err(|source| StoreError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    for issue in doc.validate() {
        warn_issue(&issue, path);
    }
    Ok(doc)
}

fn warn_issue(issue: &DocIssue, path: &Path) {
    tracing::warn!(path = %path.display(), "{issue}");
}

/// Pretty JSON with a trailing newline, as written by `save_document`.
pub fn document_to_string(doc: &MapDoc) -> Result<String, serde_json::Error> {
    let json = serde_json::to_string_pretty(doc)?;
    Ok(format!("{json}\n"))
}

/// JSON Schema of the document format, pretty-printed with a trailing newline.
pub fn document_schema_json() -> Result<String, serde_json::Error> {
    let schema = schemars::schema_for!(MapDoc);
    let json = serde_json::to_string_pretty(&schema)?;
    Ok(format!("{json}\n"))
}

/// Writes `doc` to `path` atomically (temp file plus rename). Refuses to follow a symlink.
pub fn save_document(path: &Path, doc: &MapDoc) -> Result<(), StoreError> {
    let contents = document_to_string(doc).map_err(|source| StoreError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    write_atomic(path, contents.as_bytes())?;
    tracing::debug!(path = %path.display(), rooms = doc.rooms.len(), "saved map document");
    Ok(())
}

/// Writes a rendered export (SVG, ASCII, schema) with the same atomic, symlink-refusing path
/// as `save_document`.
pub fn save_export(path: &Path, text: &str) -> Result<(), StoreError> {
    write_atomic(path, text.as_bytes())?;
    tracing::debug!(path = %path.display(), bytes = text.len(), "saved export");
    Ok(())
}

fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), StoreError> {
    match fs::symlink_metadata(path) {
        Ok(md) if md.file_type().is_symlink() => {
            return Err(StoreError::SymlinkRefused {
                path: path.to_path_buf(),
            });
        }
        Ok(_) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(source) => {
            return Err(StoreError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    }

    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let Some(file_name) = path.file_name() else {
        return Err(StoreError::Io {
            path: path.to_path_buf(),
            source: io::Error::new(io::ErrorKind::InvalidInput, "path has no file name"),
        });
    };

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let tmp_path = parent.join(format!(
        ".mapwright.tmp.{}.{}",
        file_name.to_string_lossy(),
        nanos
    ));

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&tmp_path)
        .map_err(|source| StoreError::Io {
            path: tmp_path.clone(),
            source,
        })?;

    file.write_all(contents).map_err(|source| StoreError::Io {
        path: tmp_path.clone(),
        source,
    })?;
    file.sync_all().map_err(|source| StoreError::Io {
        path: tmp_path.clone(),
        source,
    })?;
    drop(file);

    if let Err(source) = rename_overwrite(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(StoreError::Io {
            path: path.to_path_buf(),
            source,
        });
    }

    Ok(())
}

fn rename_overwrite(from: &Path, to: &Path) -> io::Result<()> {
    #[cfg(windows)]
    {
        match fs::rename(from, to) {
            Ok(()) => Ok(()),
            Err(err)
                if matches!(
                    err.kind(),
                    io::ErrorKind::AlreadyExists | io::ErrorKind::PermissionDenied
                ) =>
            {
                let _ = fs::remove_file(to);
                fs::rename(from, to)
            }
            Err(err) => Err(err),
        }
    }

    #[cfg(not(windows))]
    {
        fs::rename(from, to)
    }
}

#[cfg(test)]
mod tests {
    use std::env;
    use std::path::{Path, PathBuf};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::{
        document_schema_json, load_document, parse_document, save_document, save_export, StoreError,
    };
    use crate::model::fixtures::temple_doc;

    static TEMP_DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

    struct TempDir {
        path: PathBuf,
    }

    impl TempDir {
        fn new(prefix: &str) -> Self {
            let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_nanos();
            let counter = TEMP_DIR_COUNTER.fetch_add(1, Ordering::Relaxed);
            let mut path = env::temp_dir();
            path.push(format!("mapwright-{prefix}-{}-{nanos}-{counter}", std::process::id()));
            std::fs::create_dir_all(&path).unwrap();
            Self { path }
        }

        fn path(&self) -> &Path {
            &self.path
        }
    }

    impl Drop for TempDir {
        fn drop(&mut self) {
            let _ = std::fs::remove_dir_all(&self.path);
        }
    }

    #[test]
    fn save_then_load_round_trips() {
        let tmp = TempDir::new("roundtrip");
        let path = tmp.path().join("map.json");
        let doc = temple_doc();

        save_document(&path, &doc).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.ends_with("}\n"));
        assert_eq!(load_document(&path).unwrap(), doc);

        // Overwrite in place, no temp files left behind.
        save_document(&path, &doc).unwrap();
        let entries = std::fs::read_dir(tmp.path()).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[test]
    fn missing_file_reports_path() {
        let tmp = TempDir::new("missing");
        let path = tmp.path().join("nope.json");
        let err = load_document(&path).unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
        assert!(err.to_string().contains("nope.json"));
    }

    #[test]
    fn malformed_json_is_a_json_error() {
        let err = parse_document("{\"rooms\": 3}").unwrap_err();
        assert!(matches!(err, StoreError::Json { .. }));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn schema_describes_rooms_and_meta() {
        let schema: serde_json::Value =
            serde_json::from_str(&document_schema_json().unwrap()).unwrap();
        let properties = &schema["properties"];
        assert!(properties.get("rooms").is_some());
        assert!(properties.get("meta").is_some());
    }

    #[cfg(unix)]
    #[test]
    fn refuses_to_write_through_symlink() {
        let tmp = TempDir::new("symlink");
        let target = tmp.path().join("real.json");
        std::fs::write(&target, "{}").unwrap();
        let link = tmp.path().join("link.json");
        std::os::unix::fs::symlink(&target, &link).unwrap();

        let err = save_document(&link, &temple_doc()).unwrap_err();
        assert!(matches!(err, StoreError::SymlinkRefused { .. }));
        let err = save_export(&link, "<svg/>").unwrap_err();
        assert!(matches!(err, StoreError::SymlinkRefused { .. }));
        assert_eq!(std::fs::read_to_string(&target).unwrap(), "{}");
    }

    #[test]
    fn save_export_replaces_existing_file() {
        let tmp = TempDir::new("export");
        let path = tmp.path().join("map.svg");
        std::fs::write(&path, "old").unwrap();

        save_export(&path, "<svg/>\n").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "<svg/>\n");
        assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 1);
    }
}
