use crate::archive::format::{is_precompressed_path, EntryContent};
use crate::config::CompressionMode;
use crate::error::{Result, ScormError};
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

/// In-memory zip builder for the output package
///
/// Every entry gets the same fixed timestamp so identical inputs produce
/// identical bytes.
pub struct PackageWriter {
    writer: ZipWriter<Cursor<Vec<u8>>>,
    compression: CompressionMode,
    paths: Vec<String>,
}

impl PackageWriter {
    pub fn new(compression: CompressionMode) -> Self {
        Self {
            writer: ZipWriter::new(Cursor::new(Vec::new())),
            compression,
            paths: Vec::new(),
        }
    }

    /// Add a text entry
    pub fn put_text(&mut self, path: &str, text: &str) -> Result<()> {
        self.put_bytes(path, text.as_bytes())
    }

    /// Add an opaque byte entry
    pub fn put_bytes(&mut self, path: &str, data: &[u8]) -> Result<()> {
        let method = self.select_compression(path);
        tracing::debug!(path = %path, size = data.len(), ?method, "writing package entry");

        self.writer
            .start_file(path, Self::options(method))
            .map_err(|e| ScormError::ConversionFailed(format!("{}: {}", path, e)))?;
        self.writer
            .write_all(data)
            .map_err(|e| ScormError::ConversionFailed(format!("{}: {}", path, e)))?;
        self.paths.push(path.to_string());
        Ok(())
    }

    /// Add a directory marker
    pub fn put_directory(&mut self, path: &str) -> Result<()> {
        self.writer
            .add_directory(path, Self::options(CompressionMethod::Stored))
            .map_err(|e| ScormError::ConversionFailed(format!("{}: {}", path, e)))?;
        self.paths.push(path.to_string());
        Ok(())
    }

    /// Add an entry of any kind
    pub fn put(&mut self, path: &str, content: &EntryContent) -> Result<()> {
        match content {
            EntryContent::Directory => self.put_directory(path),
            EntryContent::Text(text) => self.put_text(path, text),
            EntryContent::Binary(bytes) => self.put_bytes(path, bytes),
        }
    }

    /// Paths written so far, in write order
    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    /// Finish the central directory and return the archive bytes
    pub fn serialize(self) -> Result<(Vec<u8>, Vec<String>)> {
        let cursor = self
            .writer
            .finish()
            .map_err(|e| ScormError::ConversionFailed(e.to_string()))?;
        Ok((cursor.into_inner(), self.paths))
    }

    fn options(method: CompressionMethod) -> SimpleFileOptions {
        SimpleFileOptions::default()
            .compression_method(method)
            .last_modified_time(DateTime::default())
    }

    /// Select compression for an entry based on mode and file type
    fn select_compression(&self, path: &str) -> CompressionMethod {
        match self.compression {
            CompressionMode::Stored => CompressionMethod::Stored,
            CompressionMode::Deflated => CompressionMethod::Deflated,
            CompressionMode::Auto if is_precompressed_path(path) => CompressionMethod::Stored,
            CompressionMode::Auto => CompressionMethod::Deflated,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use zip::ZipArchive;

    #[test]
    fn test_write_and_read_back() {
        let mut writer = PackageWriter::new(CompressionMode::Auto);
        writer.put_directory("img/").unwrap();
        writer.put_bytes("img/a.png", &[1, 2, 3]).unwrap();
        writer.put_text("index.html", "<html></html>").unwrap();
        let (bytes, paths) = writer.serialize().unwrap();

        assert_eq!(paths, vec!["img/", "img/a.png", "index.html"]);

        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(archive.len(), 3);

        let png = archive.by_name("img/a.png").unwrap();
        assert_eq!(png.compression(), CompressionMethod::Stored);
        drop(png);

        let mut html = archive.by_name("index.html").unwrap();
        assert_eq!(html.compression(), CompressionMethod::Deflated);
        let mut text = String::new();
        html.read_to_string(&mut text).unwrap();
        assert_eq!(text, "<html></html>");
    }

    #[test]
    fn test_output_is_deterministic() {
        let build = || {
            let mut writer = PackageWriter::new(CompressionMode::Deflated);
            writer.put_text("a.txt", "same content").unwrap();
            writer.serialize().unwrap().0
        };
        assert_eq!(build(), build());
    }

    #[test]
    fn test_duplicate_path_fails() {
        let mut writer = PackageWriter::new(CompressionMode::Stored);
        writer.put_text("a.txt", "one").unwrap();
        let err = writer.put_text("a.txt", "two").unwrap_err();
        assert!(matches!(err, ScormError::ConversionFailed(_)));
    }
}
