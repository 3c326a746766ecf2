//! The navigation path and its lexical resolution.

use std::fmt;

/// Deepest meaningful path: database, collection, document id.
pub const MAX_DEPTH: usize = 3;

/// Position in the hierarchy: `[database, collection, documentKey]`.
///
/// Only paths of at most `MAX_DEPTH` segments can be listed. `cd` may still
/// land deeper, since segments past the collection are never validated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationPath {
    segments: Vec<String>,
}

impl NavigationPath {
    /// The root path (no segments).
    pub fn root() -> Self {
        Self::default()
    }

    /// Builds a path from raw segments.
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// Number of segments.
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// First segment, the database name (or pattern).
    pub fn database(&self) -> Option<&str> {
        self.segment(0)
    }

    /// Second segment, the collection name (or pattern).
    pub fn collection(&self) -> Option<&str> {
        self.segment(1)
    }

    /// Third segment, the document identifier as typed.
    pub fn document_key(&self) -> Option<&str> {
        self.segment(2)
    }

    fn segment(&self, index: usize) -> Option<&str> {
        self.segments.get(index).map(String::as_str)
    }

    /// Applies a `cd` target lexically, without touching the server.
    ///
    /// The target is split on `/`. `..` pops a segment (no-op at root), `.`
    /// and empty components are dropped, anything else is appended. A leading
    /// `/` is therefore just an empty component, not a jump to root.
    pub fn resolve(&self, target: &str) -> Self {
        let mut candidate = self.clone();
        for component in target.split('/') {
            match component {
                ".." => {
                    candidate.segments.pop();
                }
                "." | "" => {}
                other => candidate.segments.push(other.to_string()),
            }
        }
        candidate
    }
}

impl fmt::Display for NavigationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            write!(f, "/")
        } else {
            write!(f, "{}", self.segments.join("/"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(segments: &[&str]) -> NavigationPath {
        NavigationPath::from_segments(segments.iter().copied())
    }

    #[test]
    fn test_root_path() {
        let root = NavigationPath::root();
        assert!(root.is_root());
        assert_eq!(root.depth(), 0);
        assert_eq!(root.database(), None);
        assert_eq!(root.to_string(), "/");
    }

    #[test]
    fn test_segment_accessors() {
        let p = path(&["shop", "orders", "6512abf0c1d2e3f405162738"]);
        assert_eq!(p.database(), Some("shop"));
        assert_eq!(p.collection(), Some("orders"));
        assert_eq!(p.document_key(), Some("6512abf0c1d2e3f405162738"));
        assert_eq!(p.to_string(), "shop/orders/6512abf0c1d2e3f405162738");
    }

    #[test]
    fn test_resolve_appends_components() {
        assert_eq!(NavigationPath::root().resolve("admin"), path(&["admin"]));
        assert_eq!(path(&["admin"]).resolve("logs"), path(&["admin", "logs"]));
        assert_eq!(
            NavigationPath::root().resolve("admin/logs"),
            path(&["admin", "logs"])
        );
    }

    #[test]
    fn test_resolve_parent_pops_one_level() {
        for depth in 1..=MAX_DEPTH {
            let p = path(&["a", "b", "c"][..depth]);
            let up = p.resolve("..");
            assert_eq!(up.depth(), depth - 1);
            assert_eq!(up.segments(), &p.segments()[..depth - 1]);
        }
    }

    #[test]
    fn test_resolve_parent_at_root_is_noop() {
        assert_eq!(NavigationPath::root().resolve(".."), NavigationPath::root());
        assert_eq!(
            NavigationPath::root().resolve("../../.."),
            NavigationPath::root()
        );
    }

    #[test]
    fn test_resolve_drops_dot_and_empty_components() {
        assert_eq!(
            path(&["admin"]).resolve("./logs//."),
            path(&["admin", "logs"])
        );
        assert_eq!(path(&["admin"]).resolve(""), path(&["admin"]));
    }

    #[test]
    fn test_leading_slash_is_relative() {
        assert_eq!(path(&["admin"]).resolve("/logs"), path(&["admin", "logs"]));
    }

    #[test]
    fn test_resolve_mixed_components() {
        assert_eq!(
            path(&["shop", "orders"]).resolve("../customers"),
            path(&["shop", "customers"])
        );
        assert_eq!(
            path(&["shop", "orders"]).resolve("../../admin/logs"),
            path(&["admin", "logs"])
        );
    }

    #[test]
    fn test_resolve_never_rejects_deep_targets() {
        let candidate = NavigationPath::root().resolve("a/b/c/d");
        assert_eq!(candidate.depth(), 4);
    }

    #[test]
    fn test_resolve_keeps_patterns_verbatim() {
        assert_eq!(
            NavigationPath::root().resolve("adm.*"),
            path(&["adm.*"])
        );
    }
}
