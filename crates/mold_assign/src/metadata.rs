use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

// -----------------------------------------------------------------------------
// Metadata

/// What an assignment did, by path.
///
/// Paths are built with [`KeyPath`]: target paths use declared field names
/// (`Server.Port`), source paths use the keys found in the source
/// (`server[port]`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    /// Target paths that were written.
    pub keys: Vec<String>,
    /// Source paths that had no matching target.
    pub unused: Vec<String>,
    /// Target paths that had no matching source.
    pub unset: Vec<String>,
}

impl Metadata {
    #[inline]
    pub const fn new() -> Self {
        Self {
            keys: Vec::new(),
            unused: Vec::new(),
            unset: Vec::new(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty() && self.unused.is_empty() && self.unset.is_empty()
    }

    pub fn clear(&mut self) {
        self.keys.clear();
        self.unused.clear();
        self.unset.clear();
    }
}

// -----------------------------------------------------------------------------
// KeyPath

/// The location of a value inside a target or source tree.
///
/// Record children are joined with `.`, mapping and sequence children with
/// `[key]`. The root is the empty path, and the first child of the root is
/// just its name.
///
/// ```
/// use mold_assign::KeyPath;
///
/// let root = KeyPath::root();
/// let path = root.field("servers").index(0).field("port");
/// assert_eq!(path.as_str(), "servers[0].port");
/// assert_eq!(root.entry("extra").as_str(), "extra");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct KeyPath(String);

impl KeyPath {
    #[inline]
    pub const fn root() -> Self {
        Self(String::new())
    }

    /// The path of a record field.
    #[inline]
    pub fn field(&self, name: &str) -> Self {
        self.join(name, false)
    }

    /// The path of a mapping entry.
    #[inline]
    pub fn entry(&self, key: &str) -> Self {
        self.join(key, true)
    }

    /// The path of a sequence element.
    #[inline]
    pub fn index(&self, index: usize) -> Self {
        self.join(&index.to_string(), true)
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    fn join(&self, key: &str, bracket: bool) -> Self {
        if self.0.is_empty() {
            return Self(String::from(key));
        }
        if key.is_empty() {
            return self.clone();
        }
        if bracket {
            Self(format!("{}[{key}]", self.0))
        } else {
            Self(format!("{}.{key}", self.0))
        }
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for KeyPath {
    #[inline]
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<KeyPath> for String {
    #[inline]
    fn from(path: KeyPath) -> Self {
        path.0
    }
}

#[cfg(test)]
mod tests {
    use super::{KeyPath, Metadata};
    use alloc::string::String;

    #[test]
    fn joins() {
        let root = KeyPath::root();
        assert!(root.is_root());
        assert_eq!(root.field("Vfoo").as_str(), "Vfoo");

        let vbar = root.entry("vbar");
        assert_eq!(vbar.entry("extra").as_str(), "vbar[extra]");
        assert_eq!(vbar.field("Vstring").as_str(), "vbar.Vstring");
        assert_eq!(vbar.entry("").as_str(), "vbar");
        assert_eq!(String::from(vbar.index(2)), "vbar[2]");
    }

    #[test]
    fn metadata_clear() {
        let mut metadata = Metadata::new();
        assert!(metadata.is_empty());
        metadata.keys.push(String::from("a"));
        assert!(!metadata.is_empty());
        metadata.clear();
        assert_eq!(metadata, Metadata::default());
    }
}
