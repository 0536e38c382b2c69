//! SCORM 1.2 `imsmanifest.xml` generation
//!
//! # Manifest Scope
//!
//! The generated manifest describes exactly one organization with one item
//! launching one SCO resource. Both the resource `href` and its nested
//! `file href` point at the entry page:
//!
//! ```text
//! manifest (identifier)
//! ├── metadata            (ADL SCORM 1.2)
//! ├── organizations
//! │   └── organization    (title)
//! │       └── item        (title, -> resource)
//! └── resources
//!     └── resource        (adlcp:scormtype="sco", href)
//!         └── file        (href)
//! ```
//!
//! # Usage
//!
//! ```
//! use scorm_pack::manifest::PackageManifest;
//!
//! let manifest = PackageManifest::new("pkg-1", "Intro & Basics", "index.html");
//! let xml = manifest.to_xml();
//! assert!(xml.contains(r#"href="index.html""#));
//! assert!(xml.contains("Intro &amp; Basics"));
//! ```

use crate::error::{Result, ScormError};
use crate::naming::random_id;
use quick_xml::escape::escape;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Organization identifier used unless randomized
pub const DEFAULT_ORGANIZATION_ID: &str = "B0";

/// Item identifier used unless randomized
pub const DEFAULT_ITEM_ID: &str = "I1";

/// Resource identifier used unless randomized
pub const DEFAULT_RESOURCE_ID: &str = "R1";

/// Package description rendered into `imsmanifest.xml`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageManifest {
    /// Package identifier, unique per conversion
    pub identifier: String,

    pub organization_id: String,

    pub item_id: String,

    pub resource_id: String,

    /// Course title shown by the LMS
    pub title: String,

    /// Path of the SCO entry page relative to the archive root
    pub entry_href: String,

    /// Escape XML-special characters in `title` when rendering
    #[serde(default = "default_escape_title")]
    pub escape_title: bool,
}

fn default_escape_title() -> bool {
    true
}

impl PackageManifest {
    /// Create a manifest with the fixed `B0`/`I1`/`R1` identifiers
    pub fn new(
        identifier: impl Into<String>,
        title: impl Into<String>,
        entry_href: impl Into<String>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            organization_id: DEFAULT_ORGANIZATION_ID.to_string(),
            item_id: DEFAULT_ITEM_ID.to_string(),
            resource_id: DEFAULT_RESOURCE_ID.to_string(),
            title: title.into(),
            entry_href: entry_href.into(),
            escape_title: true,
        }
    }

    /// Replace the organization/item/resource identifiers with fresh ones
    pub fn with_random_item_ids(mut self) -> Self {
        self.organization_id = random_id("ORG");
        self.item_id = random_id("ITEM");
        self.resource_id = random_id("RES");
        self
    }

    /// Render without escaping the title (legacy output)
    pub fn with_unescaped_title(mut self) -> Self {
        self.escape_title = false;
        self
    }

    /// Render the manifest as XML text
    ///
    /// Identifiers and the entry path are always escaped; the title is escaped
    /// unless `escape_title` is off.
    pub fn to_xml(&self) -> String {
        let title: Cow<'_, str> = if self.escape_title {
            escape(self.title.as_str())
        } else {
            Cow::Borrowed(self.title.as_str())
        };
        let href = escape(self.entry_href.as_str());

        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<manifest identifier="{identifier}" version="1.2"
  xmlns="http://www.imsproject.org/xsd/imscp_rootv1p1p2"
  xmlns:adlcp="http://www.adlnet.org/xsd/adlcp_rootv1p2"
  xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
  xsi:schemaLocation="http://www.imsproject.org/xsd/imscp_rootv1p1p2 imscp_rootv1p1p2.xsd http://www.adlnet.org/xsd/adlcp_rootv1p2 adlcp_rootv1p2.xsd">

  <metadata>
    <schema>ADL SCORM</schema>
    <schemaversion>1.2</schemaversion>
  </metadata>

  <organizations default="{organization}">
    <organization identifier="{organization}">
      <title>{title}</title>
      <item identifier="{item}" identifierref="{resource}" isvisible="true">
        <title>{title}</title>
      </item>
    </organization>
  </organizations>

  <resources>
    <resource identifier="{resource}" type="webcontent" adlcp:scormtype="sco" href="{href}">
      <file href="{href}"/>
    </resource>
  </resources>

</manifest>
"#,
            identifier = escape(self.identifier.as_str()),
            organization = escape(self.organization_id.as_str()),
            item = escape(self.item_id.as_str()),
            resource = escape(self.resource_id.as_str()),
            title = title,
            href = href,
        )
    }

    /// Serialize the manifest model to JSON
    pub fn to_json(&self) -> Result<Vec<u8>> {
        serde_json::to_vec_pretty(self).map_err(ScormError::from)
    }

    /// Parse the manifest model from JSON
    pub fn from_json(data: &[u8]) -> Result<Self> {
        serde_json::from_slice(data).map_err(ScormError::from)
    }
}

/// Render `manifest` as `imsmanifest.xml` text
pub fn generate(manifest: &PackageManifest) -> String {
    manifest.to_xml()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_creation() {
        let manifest = PackageManifest::new("pkg-1", "Course", "index.html");

        assert_eq!(manifest.organization_id, "B0");
        assert_eq!(manifest.item_id, "I1");
        assert_eq!(manifest.resource_id, "R1");
        assert!(manifest.escape_title);
    }

    #[test]
    fn test_href_appears_twice() {
        let xml = generate(&PackageManifest::new("pkg-1", "Intro & Basics", "index.html"));

        assert_eq!(xml.matches(r#"href="index.html""#).count(), 2);
        assert_eq!(xml.matches("<title>Intro &amp; Basics</title>").count(), 2);
        assert!(xml.contains(r#"<manifest identifier="pkg-1" version="1.2""#));
        assert!(xml.contains(r#"adlcp:scormtype="sco""#));
    }

    #[test]
    fn test_unescaped_title() {
        let manifest =
            PackageManifest::new("pkg-1", "Intro & Basics", "index.html").with_unescaped_title();
        let xml = manifest.to_xml();

        assert_eq!(xml.matches("<title>Intro & Basics</title>").count(), 2);
    }

    #[test]
    fn test_nested_entry_href() {
        let xml = PackageManifest::new("pkg-1", "Course", "lesson/index.html").to_xml();

        assert!(xml.contains(r#"href="lesson/index.html">"#));
        assert!(xml.contains(r#"<file href="lesson/index.html"/>"#));
    }

    #[test]
    fn test_random_item_ids() {
        let manifest = PackageManifest::new("pkg-1", "Course", "index.html").with_random_item_ids();
        let xml = manifest.to_xml();

        assert!(manifest.organization_id.starts_with("ORG-"));
        assert!(xml.contains(&format!(r#"default="{}""#, manifest.organization_id)));
        assert!(xml.contains(&format!(r#"identifierref="{}""#, manifest.resource_id)));
    }

    #[test]
    fn test_json_roundtrip() {
        let manifest = PackageManifest::new("pkg-1", "Course", "index.html");

        let json = manifest.to_json().unwrap();
        let parsed = PackageManifest::from_json(&json).unwrap();

        assert_eq!(parsed, manifest);
    }
}
