/// Name of the generated manifest at the package root
pub const MANIFEST_PATH: &str = "imsmanifest.xml";

/// Extensions copied as opaque bytes rather than decoded as text
pub const BINARY_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "webp", "svg", "ico", "mp3", "wav", "ogg", "mp4", "webm", "mov",
    "woff", "woff2", "ttf", "otf", "eot", "pdf", "zip",
];

/// Extensions whose payload is already compressed; deflating them again is wasted work
const PRECOMPRESSED_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "webp", "mp3", "ogg", "mp4", "webm", "mov", "woff", "woff2",
    "pdf", "zip",
];

/// Finder resource-fork sidecars (`__MACOSX/.../._name`), never decoded as text
pub fn is_macos_metadata(path: &str) -> bool {
    path.starts_with("__MACOSX/")
}

/// Lowercased extension of the last path segment, if any
pub fn extension(path: &str) -> Option<String> {
    let segment = path.rsplit('/').next().unwrap_or(path);
    let idx = segment.rfind('.')?;
    let ext = &segment[idx + 1..];
    if ext.is_empty() {
        None
    } else {
        Some(ext.to_ascii_lowercase())
    }
}

/// True when the entry is copied byte-for-byte without text decoding
pub fn is_binary_path(path: &str) -> bool {
    extension(path).is_some_and(|ext| BINARY_EXTENSIONS.contains(&ext.as_str()))
}

/// True for `.html` / `.htm` entries (case-insensitive)
pub fn is_html_path(path: &str) -> bool {
    matches!(extension(path).as_deref(), Some("html" | "htm"))
}

/// True when the entry's format already carries its own compression
pub fn is_precompressed_path(path: &str) -> bool {
    extension(path).is_some_and(|ext| PRECOMPRESSED_EXTENSIONS.contains(&ext.as_str()))
}

/// Payload of an archive entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryContent {
    /// Directory marker, no payload
    Directory,
    /// UTF-8 text
    Text(String),
    /// Opaque bytes
    Binary(Vec<u8>),
}

impl EntryContent {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            EntryContent::Directory => &[],
            EntryContent::Text(text) => text.as_bytes(),
            EntryContent::Binary(bytes) => bytes,
        }
    }
}

/// One entry of a parsed archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// Path relative to the archive root, exactly as stored
    pub path: String,
    pub content: EntryContent,
}

impl ArchiveEntry {
    pub fn text(path: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: EntryContent::Text(text.into()),
        }
    }

    pub fn binary(path: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            path: path.into(),
            content: EntryContent::Binary(bytes),
        }
    }

    pub fn directory(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: EntryContent::Directory,
        }
    }

    pub fn is_directory(&self) -> bool {
        matches!(self.content, EntryContent::Directory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension() {
        assert_eq!(extension("a/b/Logo.PNG").as_deref(), Some("png"));
        assert_eq!(extension("dir.v2/README"), None);
        assert_eq!(extension("trailing."), None);
    }

    #[test]
    fn test_classification() {
        assert!(is_binary_path("fonts/icon.woff2"));
        assert!(is_binary_path("img/diagram.svg"));
        assert!(!is_binary_path("css/site.css"));
        assert!(is_html_path("lesson/Index.HTM"));
        assert!(!is_html_path("lesson/index.html.bak"));
        assert!(!is_precompressed_path("img/diagram.svg"));
        assert!(is_precompressed_path("media/intro.mp4"));
        assert!(is_macos_metadata("__MACOSX/site/._style.css"));
        assert!(!is_macos_metadata("site/__MACOSX/notes.txt"));
    }
}
