//! Choosing the SCO entry point of a zipped site
//!
//! 1. A file named `index.html` (any case) wins; the shallowest one if there
//!    are several, then the shortest path, then enumeration order.
//! 2. Otherwise the `.html`/`.htm` file with the shortest path wins, ties
//!    going to the first one enumerated.
//! 3. Otherwise there is no entry point.
//!
//! Anything under `__MACOSX/` is resource-fork noise and never selected.

use crate::archive::format::{is_html_path, is_macos_metadata};

const ENTRY_FILE_NAME: &str = "index.html";

fn depth(path: &str) -> usize {
    path.matches('/').count()
}

fn is_index(path: &str) -> bool {
    path.rsplit('/')
        .next()
        .is_some_and(|name| name.eq_ignore_ascii_case(ENTRY_FILE_NAME))
}

/// Pick the entry point among `paths` (non-directory entries, enumeration order)
pub fn select_entry<'a, I>(paths: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let candidates: Vec<&str> = paths
        .into_iter()
        .filter(|p| !is_macos_metadata(p) && is_html_path(p))
        .collect();

    // min_by_key returns the first minimum, which gives enumeration-order ties
    candidates
        .iter()
        .copied()
        .filter(|p| is_index(p))
        .min_by_key(|p| (depth(p), p.len()))
        .or_else(|| candidates.iter().copied().min_by_key(|p| p.len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefers_index() {
        let paths = ["assets/logo.png", "lesson/index.html", "lesson/style.css", "a.html"];
        assert_eq!(select_entry(paths), Some("lesson/index.html"));
    }

    #[test]
    fn test_prefers_shallowest_index() {
        let paths = ["deep/er/index.html", "INDEX.HTML", "x/index.html"];
        assert_eq!(select_entry(paths), Some("INDEX.HTML"));
    }

    #[test]
    fn test_shortest_html_without_index() {
        let paths = ["a/page.html", "b.html"];
        assert_eq!(select_entry(paths), Some("b.html"));
    }

    #[test]
    fn test_tie_goes_to_first_enumerated() {
        let paths = ["z.htm", "a.htm"];
        assert_eq!(select_entry(paths), Some("z.htm"));
    }

    #[test]
    fn test_ignores_macos_metadata() {
        let paths = ["__MACOSX/._index.html", "__MACOSX/index.html", "site/home.html"];
        assert_eq!(select_entry(paths), Some("site/home.html"));
    }

    #[test]
    fn test_no_html() {
        let paths = ["readme.txt", "img/logo.png"];
        assert_eq!(select_entry(paths), None);
    }

    #[test]
    fn test_index_suffix_is_not_index() {
        let paths = ["a/myindex.html", "bb/c.html"];
        assert_eq!(select_entry(paths), Some("bb/c.html"));
    }
}
