//! Logical path and URL utilities.
//!
//! Logical paths and URL paths always use `/` separators regardless of the
//! host platform, so these helpers work on strings rather than `Path`.

use std::sync::LazyLock;
use url::Url;

/// Placeholder origin used to parse host-relative URLs such as `/static/a.css`.
static LOCAL_ORIGIN: LazyLock<Url> =
    LazyLock::new(|| Url::parse("http://localhost/").expect("static origin URL is valid"));

/// Collapse `.`, `..` and repeated slashes in a `/`-separated path.
///
/// # Examples
/// ```ignore
/// assert_eq!(normpath("styles/../lib/./util.css"), "lib/util.css");
/// assert_eq!(normpath("/static//css/"), "/static/css");
/// assert_eq!(normpath(""), ".");
/// ```
pub fn normpath(path: &str) -> String {
    let absolute = path.starts_with('/');
    let mut parts: Vec<&str> = Vec::new();
    for part in path.split('/') {
        match part {
            "" | "." => {}
            ".." => {
                if parts.last().is_some_and(|last| *last != "..") {
                    parts.pop();
                } else if !absolute {
                    parts.push("..");
                }
            }
            other => parts.push(other),
        }
    }

    let joined = parts.join("/");
    match (absolute, joined.is_empty()) {
        (true, _) => format!("/{joined}"),
        (false, true) => ".".into(),
        (false, false) => joined,
    }
}

/// Join a relative path onto a base directory; absolute `path` wins.
pub fn join(base: &str, path: &str) -> String {
    if path.starts_with('/') || base.is_empty() {
        path.to_string()
    } else if base.ends_with('/') {
        format!("{base}{path}")
    } else {
        format!("{base}/{path}")
    }
}

/// Everything before the final `/` (empty for a bare filename).
pub fn dirname(path: &str) -> &str {
    match path.rfind('/') {
        Some(0) => "/",
        Some(idx) => path[..idx].trim_end_matches('/'),
        None => "",
    }
}

/// Everything after the final `/`.
pub fn basename(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Path of `path` relative to the directory `start`.
///
/// Both arguments must be either absolute or relative to the same base.
///
/// # Examples
/// ```ignore
/// assert_eq!(relpath("/static/lib/util.css", "/static/styles"), "../lib/util.css");
/// assert_eq!(relpath("img/a.png", "img"), "a.png");
/// ```
pub fn relpath(path: &str, start: &str) -> String {
    let path = normpath(path);
    let start = normpath(start);
    let path_parts: Vec<&str> = segments(&path).collect();
    let start_parts: Vec<&str> = segments(&start).collect();

    let common = path_parts
        .iter()
        .zip(&start_parts)
        .take_while(|(a, b)| a == b)
        .count();

    let rel: Vec<&str> = std::iter::repeat_n("..", start_parts.len() - common)
        .chain(path_parts[common..].iter().copied())
        .collect();

    if rel.is_empty() {
        ".".into()
    } else {
        rel.join("/")
    }
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty() && *s != ".")
}

/// Rewrite `target` as a reference relative to the document at `base`.
///
/// Both URLs may be absolute or host-relative. When scheme, host or port
/// differ no relative form exists and `target` is returned unchanged.
///
/// # Examples
/// ```ignore
/// assert_eq!(
///     relative_url("/static/lib/util.css", "/static/styles/app.css"),
///     "../lib/util.css"
/// );
/// ```
pub fn relative_url(target: &str, base: &str) -> String {
    let (Ok(target_url), Ok(base_url)) = (LOCAL_ORIGIN.join(target), LOCAL_ORIGIN.join(base))
    else {
        return target.to_string();
    };

    let same_origin = target_url.scheme() == base_url.scheme()
        && target_url.host_str() == base_url.host_str()
        && target_url.port_or_known_default() == base_url.port_or_known_default();
    if !same_origin {
        return target.to_string();
    }

    relpath(target_url.path(), dirname(base_url.path()))
}

/// Check if a link is external (has a URL scheme like http:, data:, etc.)
///
/// A valid scheme must:
/// - Have at least 1 character before the colon
/// - Only contain ASCII alphanumeric or `+`, `-`, `.`
#[inline]
pub fn is_external_link(link: &str) -> bool {
    link.find(':').is_some_and(|pos| {
        pos > 0
            && link[..pos]
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
    })
}
