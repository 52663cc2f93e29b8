//! Transport collaborator boundary
//!
//! The engine never talks to the network itself. A [`Transport`] receives a
//! serialized payload and a canonical path; [`DirectoryTransport`] is the
//! local-filesystem implementation used by the CLI and the tests.

use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::error::TransportError;

/// Acknowledgement of a completed upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadAck {
    pub path: String,
    pub bytes: usize,
}

/// Remote storage addressed by canonical paths
pub trait Transport: Send + Sync {
    fn upload(&self, payload: &[u8], canonical_path: &str) -> Result<UploadAck, TransportError>;
    fn download(&self, canonical_path: &str) -> Result<Vec<u8>, TransportError>;
}

/// Stores remote files under a local root directory
#[derive(Debug, Clone)]
pub struct DirectoryTransport {
    root: PathBuf,
}

impl DirectoryTransport {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a canonical path below the root.
    ///
    /// Rejects absolute paths, drive-letter paths and `..` components.
    pub fn resolve(&self, canonical_path: &str) -> Result<PathBuf, TransportError> {
        let invalid = || TransportError::InvalidPath(canonical_path.to_string());

        if canonical_path.is_empty()
            || canonical_path.starts_with('/')
            || canonical_path.contains('\\')
            || canonical_path.contains(':')
        {
            return Err(invalid());
        }

        let relative = Path::new(canonical_path);
        let mut resolved = self.root.clone();
        for component in relative.components() {
            match component {
                Component::Normal(part) => resolved.push(part),
                Component::CurDir => {}
                _ => return Err(invalid()),
            }
        }
        if resolved == self.root {
            return Err(invalid());
        }
        Ok(resolved)
    }
}

impl Transport for DirectoryTransport {
    fn upload(&self, payload: &[u8], canonical_path: &str) -> Result<UploadAck, TransportError> {
        let target = self.resolve(canonical_path)?;
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&target, payload)?;
        tracing::debug!(path = %target.display(), bytes = payload.len(), "stored upload");
        Ok(UploadAck {
            path: canonical_path.to_string(),
            bytes: payload.len(),
        })
    }

    fn download(&self, canonical_path: &str) -> Result<Vec<u8>, TransportError> {
        let target = self.resolve(canonical_path)?;
        fs::read(&target).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => TransportError::NotFound(canonical_path.to_string()),
            _ => TransportError::Io(e),
        })
    }
}
