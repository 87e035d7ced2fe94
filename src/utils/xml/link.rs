use std::path::{Component, Path, PathBuf};

/// Classification of an `href`/`src` value.
///
/// | Input | Kind |
/// |-------|------|
/// | `` | `Empty` |
/// | `#intro` | `Fragment` |
/// | `https://example.com`, `mailto:x@y`, `//cdn.net/a` | `External` |
/// | `Foo.html` | `Bare` |
/// | `guide/Foo.html`, `/Foo.html`, `../Foo.html` | `Path` |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    Empty,
    Fragment,
    External,
    Bare,
    Path,
}

pub fn classify_link(value: &str) -> LinkKind {
    match value.bytes().next() {
        None => LinkKind::Empty,
        Some(b'#') => LinkKind::Fragment,
        _ if value.starts_with("//") || is_external_link(value) => LinkKind::External,
        _ if value.contains('/') => LinkKind::Path,
        _ => LinkKind::Bare,
    }
}

/// Check if a link is external (has a scheme like http:, mailto:, etc.)
#[inline]
pub fn is_external_link(link: &str) -> bool {
    link.find(':').is_some_and(|pos| {
        pos > 0
            && link[..pos]
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
    })
}

/// Split `path?query#fragment` into the path and the untouched suffix.
#[inline]
pub fn split_suffix(href: &str) -> (&str, &str) {
    match href.find(['?', '#']) {
        Some(pos) => href.split_at(pos),
        None => (href, ""),
    }
}

/// Lexically normalize a root-relative path.
///
/// Returns `None` when the path would climb above the root.
pub fn normalize_relative(path: &str) -> Option<PathBuf> {
    let mut parts: Vec<&std::ffi::OsStr> = Vec::new();
    for component in Path::new(path).components() {
        match component {
            Component::Normal(part) => parts.push(part),
            Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
            Component::ParentDir => {
                parts.pop()?;
            }
        }
    }
    if parts.is_empty() {
        return None;
    }
    Some(parts.iter().collect())
}

/// Render a relative path as an href, always using `/`.
pub fn to_href(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
