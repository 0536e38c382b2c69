mod format;
mod reader;
mod select;
mod writer;

pub use format::{
    extension, is_binary_path, is_html_path, is_macos_metadata, is_precompressed_path,
    ArchiveEntry, EntryContent, BINARY_EXTENSIONS, MANIFEST_PATH,
};
pub use reader::SourceArchive;
pub use select::select_entry;
pub use writer::PackageWriter;
