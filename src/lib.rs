//! scorm-pack: package an HTML page or a zipped static site as SCORM 1.2
//!
//! A conversion:
//! - detects whether the input is a single page or a zip archive
//! - picks the SCO entry page (`index.html`, else the shortest `.html` path)
//! - injects a SCORM 1.2 runtime script that talks to the LMS `API` object
//! - copies every other entry unchanged and adds `imsmanifest.xml`
//!
//! # Example
//!
//! ```no_run
//! use scorm_pack::{InputArtifact, Repackager, PackagerConfig};
//!
//! let input = InputArtifact::from_path("course/My Course.html")?;
//! let output = Repackager::new(PackagerConfig::default())?.repackage(&input)?;
//!
//! // my_course_scorm_1.2.zip
//! output.write_to_dir(".")?;
//! # Ok::<(), scorm_pack::error::ScormError>(())
//! ```

// Core modules
pub mod archive;
pub mod config;
pub mod error;
pub mod input;
pub mod manifest;
pub mod naming;
pub mod repackager;
pub mod runtime;
pub mod session;

// Re-export commonly used types
pub use archive::{
    select_entry, ArchiveEntry, EntryContent, PackageWriter, SourceArchive, BINARY_EXTENSIONS,
    MANIFEST_PATH,
};
pub use config::{CompressionMode, IdentifierStrategy, PackagerConfig, RuntimeOptions};
pub use error::{Result, ScormError};
pub use input::{InputArtifact, InputKind};
pub use manifest::PackageManifest;
pub use naming::{output_file_name, random_id, safe_slug};
pub use repackager::{repackage, OutputPackage, Repackager, SINGLE_PAGE_ENTRY};
pub use runtime::{inject, inject_with, RUNTIME_MARKER};
pub use session::ConversionSession;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_basics() {
        // Ensure core types are accessible
        let _config = PackagerConfig::default();
        let _session = ConversionSession::default();
        assert_eq!(MANIFEST_PATH, "imsmanifest.xml");
    }
}
