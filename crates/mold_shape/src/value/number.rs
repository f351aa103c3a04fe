use alloc::string::String;
use core::fmt;
use core::num::{ParseFloatError, ParseIntError};

use crate::impls::impl_clone_shape;
use crate::ops::TextSlot;
use crate::{Shape, ShapeMut, ShapeRef};

/// Numeric text, kept verbatim until a target asks for a number.
///
/// Decoders that preserve the textual form of numbers produce this type. It
/// converts into integer and float targets through its own accessors, and
/// it is written into as text.
///
/// ```
/// use mold_shape::Number;
///
/// let n = Number::new("42");
/// assert_eq!(n.as_i64(), Ok(42));
/// assert_eq!(n.as_f64(), Ok(42.0));
/// assert!(Number::new("4.2").as_i64().is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Number(String);

impl Number {
    #[inline]
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn into_string(self) -> String {
        self.0
    }

    /// Parses the text as a decimal `i64`.
    #[inline]
    pub fn as_i64(&self) -> Result<i64, ParseIntError> {
        self.0.parse()
    }

    /// Parses the text as a decimal `u64`.
    #[inline]
    pub fn as_u64(&self) -> Result<u64, ParseIntError> {
        self.0.parse()
    }

    #[inline]
    pub fn as_f64(&self) -> Result<f64, ParseFloatError> {
        self.0.parse()
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Number {
    #[inline]
    fn from(text: String) -> Self {
        Self(text)
    }
}

impl From<&str> for Number {
    #[inline]
    fn from(text: &str) -> Self {
        Self(String::from(text))
    }
}

impl TextSlot for Number {
    #[inline]
    fn as_str(&self) -> &str {
        &self.0
    }

    fn set_text(&mut self, text: &str) {
        self.0.clear();
        self.0.push_str(text);
    }
}

impl Shape for Number {
    #[inline]
    fn shape_ref(&self) -> ShapeRef<'_> {
        ShapeRef::Number(self)
    }

    #[inline]
    fn shape_mut(&mut self) -> ShapeMut<'_> {
        ShapeMut::Str(self)
    }

    impl_clone_shape!();
}
