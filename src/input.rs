//! Input artifacts: a single HTML page or a zipped static site

use crate::error::{Result, ScormError};
use std::fmt;
use std::path::Path;

/// Local file header signature of a zip archive
const ZIP_LOCAL_MAGIC: &[u8; 4] = b"PK\x03\x04";

/// End-of-central-directory signature (an empty zip starts with this)
const ZIP_EMPTY_MAGIC: &[u8; 4] = b"PK\x05\x06";

/// What kind of upload an input is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Html,
    Zip,
}

impl InputKind {
    /// Classify an input by name, optional media type, and leading bytes.
    ///
    /// Name and media type win over content sniffing; content is only
    /// consulted for the zip signatures.
    pub fn detect(name: &str, media_type: Option<&str>, bytes: &[u8]) -> Option<Self> {
        let lower = name.to_ascii_lowercase();
        if lower.ends_with(".html") || lower.ends_with(".htm") {
            return Some(InputKind::Html);
        }
        if lower.ends_with(".zip") {
            return Some(InputKind::Zip);
        }

        if let Some(media_type) = media_type {
            let essence = media_type
                .split(';')
                .next()
                .unwrap_or("")
                .trim()
                .to_ascii_lowercase();
            match essence.as_str() {
                "text/html" => return Some(InputKind::Html),
                "application/zip" | "application/x-zip-compressed" => {
                    return Some(InputKind::Zip)
                }
                _ => {}
            }
        }

        if bytes.starts_with(ZIP_LOCAL_MAGIC) || bytes.starts_with(ZIP_EMPTY_MAGIC) {
            return Some(InputKind::Zip);
        }

        None
    }
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputKind::Html => f.write_str("html"),
            InputKind::Zip => f.write_str("zip"),
        }
    }
}

/// A selected input file. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputArtifact {
    kind: InputKind,
    name: String,
    bytes: Vec<u8>,
}

impl InputArtifact {
    /// Build an artifact, detecting its kind from the name and content
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Result<Self> {
        Self::with_media_type(name, None, bytes)
    }

    /// Build an artifact with a media type reported by the caller
    pub fn with_media_type(
        name: impl Into<String>,
        media_type: Option<&str>,
        bytes: Vec<u8>,
    ) -> Result<Self> {
        let name = name.into();
        let kind = InputKind::detect(&name, media_type, &bytes).ok_or_else(|| {
            ScormError::UnsupportedFileType(match media_type {
                Some(mt) => format!("{} ({})", name, mt),
                None => name.clone(),
            })
        })?;

        Ok(Self { kind, name, bytes })
    }

    /// Read an input file from disk
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| ScormError::UnsupportedFileType(path.display().to_string()))?;
        let bytes = std::fs::read(path)?;
        Self::new(name, bytes)
    }

    pub fn kind(&self) -> InputKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
