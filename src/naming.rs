//! Output names, course titles, and package identifiers

use rand::Rng;
use sha2::{Digest, Sha256};
use std::time::{SystemTime, UNIX_EPOCH};

/// Slug used when a name has no usable characters
pub const FALLBACK_SLUG: &str = "scorm_activity";

/// Suffix appended to the slug of every produced package
pub const OUTPUT_SUFFIX: &str = "_scorm_1.2.zip";

/// Remove the final extension from a file name.
///
/// Only a trailing `.ext` with a non-empty extension that contains no `/` is
/// removed, so `"notes."` and `"dir.v2/page"` are returned unchanged.
pub fn strip_extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(idx) => {
            let ext = &name[idx + 1..];
            if ext.is_empty() || ext.contains('/') {
                name
            } else {
                &name[..idx]
            }
        }
        None => name,
    }
}

/// Filesystem-safe, lowercase slug of a file name (extension removed)
pub fn safe_slug(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in strip_extension(name).chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.ends_with('_') {
            slug.push('_');
        }
    }

    let trimmed = slug.trim_matches('_');
    if trimmed.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Download name for the package built from `input_name`
pub fn output_file_name(input_name: &str) -> String {
    format!("{}{}", safe_slug(input_name), OUTPUT_SUFFIX)
}

/// Course title derived from an input file name
///
/// Falls back to `fallback` when nothing remains after the extension is
/// stripped.
pub fn derive_title(input_name: &str, fallback: &str) -> String {
    let base = input_name.rsplit(['/', '\\']).next().unwrap_or(input_name);
    let title = strip_extension(base).trim();
    if title.is_empty() {
        fallback.to_string()
    } else {
        title.to_string()
    }
}

/// Best-effort unique identifier: prefix, milliseconds since epoch, random suffix
pub fn random_id(prefix: &str) -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    let suffix: u32 = rand::thread_rng().gen();
    format!("{}-{:x}-{:08x}", prefix, millis, suffix)
}

/// Identifier derived from content, stable for identical input bytes
pub fn content_id(prefix: &str, data: &[u8]) -> String {
    let digest = hex::encode(Sha256::digest(data));
    format!("{}-{}", prefix, &digest[..16])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_slug_examples() {
        assert_eq!(safe_slug(""), "scorm_activity");
        assert_eq!(safe_slug("My Course!!.html"), "my_course");
        assert_eq!(safe_slug("__init__.zip"), "init");
        assert_eq!(safe_slug("Résumé Tips.htm"), "r_sum_tips");
        assert_eq!(safe_slug("!!!.html"), "scorm_activity");
    }

    #[test]
    fn test_safe_slug_idempotent() {
        for name in ["My Course!!.html", "a.b.c", "  spaced  out  ", "x", "Ünïcødé", "."] {
            let once = safe_slug(name);
            assert_eq!(safe_slug(&format!("{}.html", once)), once, "input {:?}", name);
        }
    }

    #[test]
    fn test_strip_extension() {
        assert_eq!(strip_extension("archive.tar.gz"), "archive.tar");
        assert_eq!(strip_extension("notes."), "notes.");
        assert_eq!(strip_extension("README"), "README");
        assert_eq!(strip_extension(".html"), "");
        assert_eq!(strip_extension("dir.v2/page"), "dir.v2/page");
    }

    #[test]
    fn test_output_file_name() {
        assert_eq!(output_file_name("Intro Course.html"), "intro_course_scorm_1.2.zip");
    }

    #[test]
    fn test_derive_title() {
        assert_eq!(derive_title("Intro & Basics.html", "SCORM Activity"), "Intro & Basics");
        assert_eq!(derive_title(".html", "SCORM Activity"), "SCORM Activity");
        assert_eq!(derive_title("uploads/site.zip", "SCORM Activity"), "site");
    }

    #[test]
    fn test_random_id_shape() {
        let a = random_id("pkg");
        let b = random_id("pkg");
        assert!(a.starts_with("pkg-"));
        assert_eq!(a.split('-').count(), 3);
        assert_ne!(a, b);
    }

    #[test]
    fn test_content_id_stable() {
        assert_eq!(content_id("pkg", b"abc"), content_id("pkg", b"abc"));
        assert_ne!(content_id("pkg", b"abc"), content_id("pkg", b"abd"));
        assert_eq!(content_id("pkg", b"abc"), "pkg-ba7816bf8f01cfea");
    }
}
