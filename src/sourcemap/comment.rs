//! `sourceMappingURL` comments.

use regex::Regex;
use std::sync::OnceLock;

use crate::package::AssetKind;

/// Trailing `sourceMappingURL` comment in either comment syntax.
fn comment_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r#"(?:/\*(?:\s*\r?\n(?://)?)?(?:[#@] sourceMappingURL=([^\s'"]*))\s*\*/|//(?:[#@] sourceMappingURL=([^\s'"]*)))\s*$"#,
        )
        .unwrap()
    })
}

/// Map reference named by a trailing `sourceMappingURL` comment.
pub fn extract(content: &str) -> Option<&str> {
    let caps = comment_re().captures(content)?;
    caps.get(1)
        .or_else(|| caps.get(2))
        .map(|m| m.as_str())
        .filter(|s| !s.is_empty())
}

/// Remove a trailing `sourceMappingURL` comment.
pub fn strip(content: &str) -> String {
    comment_re().replace(content, "").into_owned()
}

/// Directive appended to packed content, in the comment syntax of `kind`.
pub fn directive(kind: AssetKind, map_basename: &str) -> String {
    match kind {
        AssetKind::Script => format!("\n//# sourceMappingURL={map_basename}"),
        AssetKind::Style => format!("\n/*# sourceMappingURL={map_basename} */"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract() {
        assert_eq!(extract("var a;\n//# sourceMappingURL=a.js.map"), Some("a.js.map"));
        assert_eq!(extract("var a;\n//@ sourceMappingURL=old.map\n"), Some("old.map"));
        assert_eq!(extract("a{}\n/*# sourceMappingURL=a.css.map */"), Some("a.css.map"));
        assert_eq!(extract("a{}\n/*\n//# sourceMappingURL=x.map */"), Some("x.map"));
        assert_eq!(extract("var a = 1;"), None);
        assert_eq!(extract("//# sourceMappingURL=a.map\nvar a;"), None);
    }

    #[test]
    fn test_strip() {
        assert_eq!(strip("a{}\n/*# sourceMappingURL=a.css.map */\n"), "a{}\n");
        assert_eq!(strip("var a;//# sourceMappingURL=a.js.map"), "var a;");
        assert_eq!(strip("var a;"), "var a;");
    }

    #[test]
    fn test_directive() {
        assert_eq!(
            directive(AssetKind::Script, "app.js.map"),
            "\n//# sourceMappingURL=app.js.map"
        );
        assert_eq!(
            directive(AssetKind::Style, "app.css.map"),
            "\n/*# sourceMappingURL=app.css.map */"
        );
    }
}
