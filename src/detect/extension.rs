//! Extension extraction from a path, file name or URL.
//!
//! Pure string work, no I/O. Query strings and fragments are cut first so
//! `…/test.txt?v=1` reads as `txt`, then only the last path segment is
//! considered so dots in directory names are ignored.

/// Extension of `name`, lowercased. Empty when there is none.
///
/// ```rust
/// use convertapi_detect::detect::extension::extract_extension;
///
/// assert_eq!(extract_extension("https://host/a/Test.TXT?x=1#top"), "txt");
/// assert_eq!(extract_extension("archive.tar.gz"), "gz");
/// assert_eq!(extract_extension("README"), "");
/// ```
pub fn extract_extension(name: &str) -> String {
    let segment = last_segment(strip_suffix(name));
    match segment.rsplit_once('.') {
        Some((_, ext)) => ext.to_lowercase(),
        None => String::new(),
    }
}

/// Everything before the first `?` or `#`.
fn strip_suffix(name: &str) -> &str {
    match name.find(['?', '#']) {
        Some(idx) => &name[..idx],
        None => name,
    }
}

/// Final component after `/` or `\`.
fn last_segment(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}
