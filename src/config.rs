//! Packager configuration
//!
//! Every field has a default, so an empty TOML document is a valid
//! configuration:
//!
//! ```toml
//! default_title = "Untitled Course"
//! identifier = "content-hash"
//! compression = "deflated"
//!
//! [runtime]
//! max_attempts = 40
//! ```

use crate::error::{Result, ScormError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default ceiling for a single archive entry (256 MiB)
pub const DEFAULT_MAX_ENTRY_SIZE: u64 = 256 * 1024 * 1024;

/// How the package identifier is produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IdentifierStrategy {
    /// Prefix + timestamp + random suffix, unique per conversion
    #[default]
    Random,
    /// Prefix + SHA-256 of the input bytes, stable across conversions
    ContentHash,
}

/// Compression applied to entries of the output archive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompressionMode {
    /// Store already-compressed media, deflate everything else
    #[default]
    Auto,
    Deflated,
    Stored,
}

/// Tunables baked into the injected runtime script
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct RuntimeOptions {
    /// Maximum `parent` hops walked while looking for the LMS API
    pub max_parent_hops: u32,

    /// Delay between initialization attempts
    pub retry_interval_ms: u32,

    /// Initialization attempts before giving up
    pub max_attempts: u32,

    /// Global the hosted page sets to `true` to complete on unload
    pub auto_complete_flag: String,
}

impl Default for RuntimeOptions {
    fn default() -> Self {
        Self {
            max_parent_hops: 30,
            retry_interval_ms: 250,
            max_attempts: 20,
            auto_complete_flag: "SCORM_AUTO_COMPLETE".to_string(),
        }
    }
}

impl RuntimeOptions {
    fn validate(&self) -> Result<()> {
        if self.max_parent_hops == 0 {
            return Err(ScormError::InvalidConfig(
                "runtime.max_parent_hops must be at least 1".to_string(),
            ));
        }
        if self.retry_interval_ms == 0 || self.max_attempts == 0 {
            return Err(ScormError::InvalidConfig(
                "runtime retry interval and attempt count must be non-zero".to_string(),
            ));
        }
        if !is_js_identifier(&self.auto_complete_flag) {
            return Err(ScormError::InvalidConfig(format!(
                "runtime.auto_complete_flag is not a JavaScript identifier: {:?}",
                self.auto_complete_flag
            )));
        }
        Ok(())
    }
}

/// Top-level packager configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackagerConfig {
    /// Course title used when none can be derived from the input name
    pub default_title: String,

    /// Prefix for generated package identifiers
    pub identifier_prefix: String,

    pub identifier: IdentifierStrategy,

    /// Randomize organization/item/resource identifiers per conversion
    pub randomize_item_ids: bool,

    /// Escape XML-special characters in the course title
    pub escape_title: bool,

    pub compression: CompressionMode,

    /// Largest uncompressed entry accepted from an input archive
    pub max_entry_size: u64,

    pub runtime: RuntimeOptions,
}

impl Default for PackagerConfig {
    fn default() -> Self {
        Self {
            default_title: "SCORM Activity".to_string(),
            identifier_prefix: "scorm_pkg".to_string(),
            identifier: IdentifierStrategy::Random,
            randomize_item_ids: false,
            escape_title: true,
            compression: CompressionMode::Auto,
            max_entry_size: DEFAULT_MAX_ENTRY_SIZE,
            runtime: RuntimeOptions::default(),
        }
    }
}

impl PackagerConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: PackagerConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file from disk
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Check invariants that serde cannot express
    pub fn validate(&self) -> Result<()> {
        if self.default_title.trim().is_empty() {
            return Err(ScormError::InvalidConfig(
                "default_title must not be empty".to_string(),
            ));
        }
        if !is_xml_id_prefix(&self.identifier_prefix) {
            return Err(ScormError::InvalidConfig(format!(
                "identifier_prefix must match [A-Za-z_][A-Za-z0-9_.-]*: {:?}",
                self.identifier_prefix
            )));
        }
        if self.max_entry_size == 0 {
            return Err(ScormError::InvalidConfig(
                "max_entry_size must be non-zero".to_string(),
            ));
        }
        self.runtime.validate()
    }
}

/// Manifest identifiers are XML IDs, so they must start like an NCName
fn is_xml_id_prefix(prefix: &str) -> bool {
    let mut chars = prefix.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

fn is_js_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}
