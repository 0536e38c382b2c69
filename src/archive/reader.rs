use crate::archive::format::{is_binary_path, is_macos_metadata, ArchiveEntry, EntryContent};
use crate::error::{Result, ScormError};
use std::collections::HashMap;
use std::io::{Cursor, Read};
use zip::ZipArchive;

/// Upper bound on the buffer reserved up front from an entry's declared size
const INITIAL_READ_CAPACITY: u64 = 64 * 1024;

/// Fully decoded zip archive with O(1) path lookup
///
/// Entries keep central-directory order, which is the enumeration order
/// used to break ties during entry selection.
#[derive(Debug, Clone, Default)]
pub struct SourceArchive {
    entries: Vec<ArchiveEntry>,
    index: HashMap<String, usize>,
}

impl SourceArchive {
    /// Parse a zip archive held in memory
    ///
    /// Text-class entries must be valid UTF-8. Entries larger than
    /// `max_entry_size` (declared or actual) are rejected.
    pub fn parse(bytes: &[u8], max_entry_size: u64) -> Result<Self> {
        let mut archive = ZipArchive::new(Cursor::new(bytes))
            .map_err(|e| ScormError::ArchiveReadError(e.to_string()))?;

        let mut source = SourceArchive::default();
        for i in 0..archive.len() {
            let mut file = archive
                .by_index(i)
                .map_err(|e| ScormError::ArchiveReadError(e.to_string()))?;
            let path = file.name().to_string();

            if file.enclosed_name().is_none() {
                return Err(ScormError::ArchiveReadError(format!(
                    "unsafe entry path: {}",
                    path
                )));
            }

            if file.is_dir() {
                source.push(ArchiveEntry::directory(path))?;
                continue;
            }

            if file.size() > max_entry_size {
                return Err(ScormError::ArchiveReadError(format!(
                    "entry {} declares {} bytes, limit is {}",
                    path,
                    file.size(),
                    max_entry_size
                )));
            }

            // Headers can lie about size; never read past the limit
            let mut data = Vec::with_capacity(file.size().min(INITIAL_READ_CAPACITY) as usize);
            (&mut file)
                .take(max_entry_size.saturating_add(1))
                .read_to_end(&mut data)
                .map_err(|e| ScormError::ArchiveReadError(format!("{}: {}", path, e)))?;
            if data.len() as u64 > max_entry_size {
                return Err(ScormError::ArchiveReadError(format!(
                    "entry {} exceeds the {} byte limit",
                    path, max_entry_size
                )));
            }

            let content = if is_binary_path(&path) || is_macos_metadata(&path) {
                EntryContent::Binary(data)
            } else {
                let text = String::from_utf8(data)
                    .map_err(|_| ScormError::EncodingError { path: path.clone() })?;
                EntryContent::Text(text)
            };

            tracing::debug!(
                path = %path,
                binary = matches!(content, EntryContent::Binary(_)),
                "read archive entry"
            );
            source.push(ArchiveEntry { path, content })?;
        }

        Ok(source)
    }

    fn push(&mut self, entry: ArchiveEntry) -> Result<()> {
        if self.index.contains_key(&entry.path) {
            return Err(ScormError::ArchiveReadError(format!(
                "duplicate entry path: {}",
                entry.path
            )));
        }
        self.index.insert(entry.path.clone(), self.entries.len());
        self.entries.push(entry);
        Ok(())
    }

    /// All entries in enumeration order, directories included
    pub fn entries(&self) -> &[ArchiveEntry] {
        &self.entries
    }

    /// Non-directory entry paths in enumeration order
    pub fn file_paths(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(|e| !e.is_directory())
            .map(|e| e.path.as_str())
    }

    pub fn get(&self, path: &str) -> Option<&ArchiveEntry> {
        self.index.get(path).map(|&i| &self.entries[i])
    }

    pub fn contains(&self, path: &str) -> bool {
        self.index.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Take ownership of the entries, consuming the archive
    pub fn into_entries(self) -> Vec<ArchiveEntry> {
        self.entries
    }
}
