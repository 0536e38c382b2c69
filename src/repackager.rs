use crate::archive::{
    select_entry, ArchiveEntry, EntryContent, PackageWriter, SourceArchive, MANIFEST_PATH,
};
use crate::config::{IdentifierStrategy, PackagerConfig};
use crate::error::{Result, ScormError};
use crate::input::{InputArtifact, InputKind};
use crate::manifest::PackageManifest;
use crate::naming::{content_id, derive_title, output_file_name, random_id};
use crate::runtime::inject_with;
use std::path::{Path, PathBuf};

/// Entry path used when the input is a single HTML page
pub const SINGLE_PAGE_ENTRY: &str = "index.html";

/// A finished SCORM package, fully serialized
#[derive(Debug, Clone)]
pub struct OutputPackage {
    /// Suggested download name, `<slug>_scorm_1.2.zip`
    pub file_name: String,

    /// Path of the SCO entry inside the archive
    pub entry_path: String,

    pub manifest: PackageManifest,

    /// Every path in the archive, in write order
    pub paths: Vec<String>,

    /// The zip archive
    pub bytes: Vec<u8>,
}

impl OutputPackage {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Write the archive into `dir` under `file_name` and return its path
    pub fn write_to_dir<P: AsRef<Path>>(&self, dir: P) -> Result<PathBuf> {
        let path = dir.as_ref().join(&self.file_name);
        std::fs::write(&path, &self.bytes)?;
        Ok(path)
    }
}

/// Turns an input artifact into a SCORM 1.2 package
#[derive(Debug, Clone, Default)]
pub struct Repackager {
    config: PackagerConfig,
}

impl Repackager {
    /// Validate `config` and build a repackager around it
    ///
    /// Runtime options are baked into a `<script>` block and the prefix into
    /// XML identifiers, so an unchecked config is never accepted here.
    pub fn new(config: PackagerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PackagerConfig {
        &self.config
    }

    /// Build the package for `input`
    ///
    /// Either the whole archive is produced or an error is returned; there is
    /// no partial output.
    pub fn repackage(&self, input: &InputArtifact) -> Result<OutputPackage> {
        tracing::info!(
            name = %input.name(),
            kind = %input.kind(),
            size = input.len(),
            "converting input"
        );

        let (mut entries, entry_path) = match input.kind() {
            InputKind::Html => {
                let text = std::str::from_utf8(input.bytes()).map_err(|_| {
                    ScormError::EncodingError {
                        path: SINGLE_PAGE_ENTRY.to_string(),
                    }
                })?;
                (
                    vec![ArchiveEntry::text(SINGLE_PAGE_ENTRY, text)],
                    SINGLE_PAGE_ENTRY.to_string(),
                )
            }
            InputKind::Zip => {
                let source = SourceArchive::parse(input.bytes(), self.config.max_entry_size)?;
                let entry_path = select_entry(source.file_paths())
                    .ok_or(ScormError::NoEntryPointFound)?
                    .to_string();
                (source.into_entries(), entry_path)
            }
        };
        tracing::debug!(entry = %entry_path, "selected entry point");

        let manifest = self.build_manifest(input, &entry_path);
        let mut writer = PackageWriter::new(self.config.compression);

        for entry in entries.iter_mut() {
            if entry.path == MANIFEST_PATH {
                tracing::warn!("replacing imsmanifest.xml found in input");
                continue;
            }
            if entry.path == entry_path {
                let original = match &entry.content {
                    EntryContent::Text(text) => text.as_str(),
                    _ => {
                        return Err(ScormError::ConversionFailed(format!(
                            "entry point {} is not a text file",
                            entry_path
                        )))
                    }
                };
                entry.content = EntryContent::Text(inject_with(original, &self.config.runtime));
            }
            writer.put(&entry.path, &entry.content)?;
        }
        writer.put_text(MANIFEST_PATH, &manifest.to_xml())?;

        let (bytes, paths) = writer.serialize()?;
        let package = OutputPackage {
            file_name: output_file_name(input.name()),
            entry_path,
            manifest,
            paths,
            bytes,
        };

        tracing::info!(
            file = %package.file_name,
            entry = %package.entry_path,
            entries = package.paths.len(),
            size = package.len(),
            "package created"
        );
        Ok(package)
    }

    fn build_manifest(&self, input: &InputArtifact, entry_path: &str) -> PackageManifest {
        let prefix = &self.config.identifier_prefix;
        let identifier = match self.config.identifier {
            IdentifierStrategy::Random => random_id(prefix),
            IdentifierStrategy::ContentHash => content_id(prefix, input.bytes()),
        };
        let title = derive_title(input.name(), &self.config.default_title);

        let mut manifest = PackageManifest::new(identifier, title, entry_path);
        manifest.escape_title = self.config.escape_title;
        if self.config.randomize_item_ids {
            manifest = manifest.with_random_item_ids();
        }
        manifest
    }
}

/// Repackage `input` with the default configuration
pub fn repackage(input: &InputArtifact) -> Result<OutputPackage> {
    Repackager::default().repackage(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Read};
    use zip::ZipArchive;

    fn read_entry(bytes: &[u8], path: &str) -> String {
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut file = archive.by_name(path).unwrap();
        let mut text = String::new();
        file.read_to_string(&mut text).unwrap();
        text
    }

    #[test]
    fn test_single_page() {
        let html = "<html><body><h1>Hi</h1></body></html>";
        let input = InputArtifact::new("My Course!!.html", html.as_bytes().to_vec()).unwrap();
        let output = repackage(&input).unwrap();

        assert_eq!(output.file_name, "my_course_scorm_1.2.zip");
        assert_eq!(output.entry_path, "index.html");
        assert_eq!(output.manifest.title, "My Course!!");
        assert_eq!(output.paths, vec!["index.html", "imsmanifest.xml"]);
        assert_eq!(read_entry(&output.bytes, "index.html"), crate::runtime::inject(html));
    }

    #[test]
    fn test_empty_title_falls_back() {
        let input = InputArtifact::new(".html", b"<p>x</p>".to_vec()).unwrap();
        let output = repackage(&input).unwrap();

        assert_eq!(output.manifest.title, "SCORM Activity");
        assert_eq!(output.file_name, "scorm_activity_scorm_1.2.zip");
    }

    #[test]
    fn test_invalid_utf8_page() {
        let input = InputArtifact::new("page.html", vec![0xc3, 0x28]).unwrap();
        let err = repackage(&input).unwrap_err();

        assert!(matches!(err, ScormError::EncodingError { .. }));
    }

    #[test]
    fn test_content_hash_identifier_is_deterministic() {
        let config = PackagerConfig {
            identifier: IdentifierStrategy::ContentHash,
            ..PackagerConfig::default()
        };
        let repackager = Repackager::new(config).unwrap();
        let input = InputArtifact::new("a.html", b"<body></body>".to_vec()).unwrap();

        let first = repackager.repackage(&input).unwrap();
        let second = repackager.repackage(&input).unwrap();

        assert!(first.manifest.identifier.starts_with("scorm_pkg-"));
        assert_eq!(first.bytes, second.bytes);
    }

    #[test]
    fn test_new_rejects_script_breaking_flag() {
        let mut config = PackagerConfig::default();
        config.runtime.auto_complete_flag = "x</script><script>alert(1)//".to_string();

        let err = Repackager::new(config).unwrap_err();
        assert!(matches!(err, ScormError::InvalidConfig(_)));
    }

    #[test]
    fn test_new_rejects_zero_attempts() {
        let mut config = PackagerConfig::default();
        config.runtime.max_attempts = 0;

        let err = Repackager::new(config).unwrap_err();
        assert!(matches!(err, ScormError::InvalidConfig(_)));
    }

    #[test]
    fn test_new_rejects_numeric_prefix() {
        let config = PackagerConfig {
            identifier_prefix: "2024course".to_string(),
            ..PackagerConfig::default()
        };
        assert!(matches!(
            Repackager::new(config).unwrap_err(),
            ScormError::InvalidConfig(_)
        ));
    }

    #[test]
    fn test_write_to_dir() {
        let dir = tempfile::tempdir().unwrap();
        let input = InputArtifact::new("Lesson.html", b"<body></body>".to_vec()).unwrap();
        let output = repackage(&input).unwrap();

        let path = output.write_to_dir(dir.path()).unwrap();
        assert_eq!(path.file_name().unwrap(), "lesson_scorm_1.2.zip");
        assert_eq!(std::fs::read(path).unwrap(), output.bytes);
    }
}
