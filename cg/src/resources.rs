//! Sample resource files
//!
//! Text, JSON, prompt documents and images are read by path relative to one
//! resource directory. A missing file is reported as `ResourceError::NotFound`
//! so samples can tell it apart from other I/O failures.

use std::io;
use std::path::{Path, PathBuf};

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

use crate::llm::ImageSource;

/// Errors from reading resource files
#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("Resource not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Failed to read resource {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid JSON in resource {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unsupported image type: {path} (expected png, jpg, gif or webp)")]
    UnsupportedImage { path: PathBuf },
}

impl ResourceError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ResourceError::NotFound { .. })
    }
}

/// Resource directory handle
#[derive(Debug, Clone)]
pub struct Resources {
    dir: PathBuf,
}

impl Resources {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Full path of a resource
    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    pub fn read_bytes(&self, name: &str) -> Result<Vec<u8>, ResourceError> {
        let path = self.path(name);
        debug!(path = %path.display(), "Resources::read_bytes: called");
        std::fs::read(&path).map_err(|e| io_error(path, e))
    }

    pub fn read_text(&self, name: &str) -> Result<String, ResourceError> {
        let path = self.path(name);
        debug!(path = %path.display(), "Resources::read_text: called");
        std::fs::read_to_string(&path).map_err(|e| io_error(path, e))
    }

    pub fn read_json<T: DeserializeOwned>(&self, name: &str) -> Result<T, ResourceError> {
        let text = self.read_text(name)?;
        serde_json::from_str(&text).map_err(|source| ResourceError::Json {
            path: self.path(name),
            source,
        })
    }

    /// Read an image and wrap it as an inline base64 image source
    pub fn image_source(&self, name: &str) -> Result<ImageSource, ResourceError> {
        let path = self.path(name);
        let media_type = media_type_for(&path).ok_or_else(|| ResourceError::UnsupportedImage { path: path.clone() })?;
        let bytes = self.read_bytes(name)?;
        debug!(%media_type, size = %bytes.len(), "Resources::image_source: encoded");
        Ok(ImageSource::Base64 {
            media_type: media_type.to_string(),
            data: STANDARD.encode(bytes),
        })
    }
}

fn io_error(path: PathBuf, source: io::Error) -> ResourceError {
    if source.kind() == io::ErrorKind::NotFound {
        ResourceError::NotFound { path }
    } else {
        ResourceError::Io { path, source }
    }
}

/// Image media type from the file extension
pub fn media_type_for(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}
