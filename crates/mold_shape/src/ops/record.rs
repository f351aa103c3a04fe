use alloc::vec::Vec;

use crate::Shape;

// -----------------------------------------------------------------------------
// FieldDecl

/// The declaration of one record field.
///
/// Tags are `(key, text)` pairs, e.g. `("json", "name,omitempty")` for
/// `#[shape(json = "name,omitempty")]`. The derive macro builds these in a
/// `const` context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDecl {
    name: &'static str,
    tags: &'static [(&'static str, &'static str)],
    embedded: bool,
}

impl FieldDecl {
    /// Creates a plain field without tags.
    #[inline]
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            tags: &[],
            embedded: false,
        }
    }

    #[inline]
    pub const fn with_tags(mut self, tags: &'static [(&'static str, &'static str)]) -> Self {
        self.tags = tags;
        self
    }

    /// Marks the field as embedded: its own fields are promoted to the
    /// parent when the record is flattened.
    #[inline]
    pub const fn with_embedded(mut self, embedded: bool) -> Self {
        self.embedded = embedded;
        self
    }

    /// The declared field name.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub const fn tags(&self) -> &'static [(&'static str, &'static str)] {
        self.tags
    }

    #[inline]
    pub const fn is_embedded(&self) -> bool {
        self.embedded
    }

    /// Returns the text of the tag `key`, if declared.
    ///
    /// ```
    /// use mold_shape::ops::FieldDecl;
    ///
    /// const DECL: FieldDecl = FieldDecl::new("port").with_tags(&[("json", "p,omitempty")]);
    /// assert_eq!(DECL.tag("json"), Some("p,omitempty"));
    /// assert_eq!(DECL.tag("yaml"), None);
    /// ```
    pub fn tag(&self, key: &str) -> Option<&'static str> {
        self.tags
            .iter()
            .find(|(name, _)| *name == key)
            .map(|&(_, text)| text)
    }
}

// -----------------------------------------------------------------------------
// Record

/// A record with named fields, usually implemented by `#[derive(Shape)]`.
///
/// Field indices follow declaration order and match
/// [`Record::field_decls`].
pub trait Record: Shape {
    fn field_decls(&self) -> &'static [FieldDecl];

    fn field(&self, index: usize) -> Option<&dyn Shape>;

    fn field_mut(&mut self, index: usize) -> Option<&mut dyn Shape>;

    /// Borrows every field mutably at once, in declaration order.
    fn fields_mut(&mut self) -> Vec<&mut dyn Shape>;

    #[inline]
    fn field_len(&self) -> usize {
        self.field_decls().len()
    }

    /// Returns the field with the declared name `name`.
    fn field_by_name(&self, name: &str) -> Option<&dyn Shape> {
        let index = self.field_decls().iter().position(|f| f.name() == name)?;
        self.field(index)
    }
}
