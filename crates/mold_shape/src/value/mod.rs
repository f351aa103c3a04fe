//! The dynamic value tree.

// -----------------------------------------------------------------------------
// Modules

mod number;
mod serde;

// -----------------------------------------------------------------------------
// Exports

pub use number::Number;

use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::ops::Dynamic;
use crate::{Shape, ShapeError, ShapeMut, ShapeRef};

/// The mapping type used by [`Value::Map`].
pub type ValueMap = BTreeMap<String, Value>;

// -----------------------------------------------------------------------------
// Value

/// A loosely typed value.
///
/// `Value` is both the usual source of an assignment (parsed configuration,
/// JSON, ...) and the polymorphic slot of a target: a `Value` field accepts
/// a value of any shape. Values that have no dedicated variant are kept in
/// [`Value::Boxed`].
///
/// ```
/// use mold_shape::Value;
///
/// let value: Value = [("name", Value::from("mold")), ("port", Value::from(80_u16))]
///     .into_iter()
///     .collect();
///
/// assert_eq!(value.get("name").and_then(Value::as_str), Some("mold"));
/// assert_eq!(value.get("port").and_then(Value::as_u64), Some(80));
/// assert!(value.get("none").is_none());
/// ```
#[derive(Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    Str(String),
    Number(Number),
    List(Vec<Value>),
    Map(ValueMap),
    Boxed(Box<dyn Shape>),
}

impl Value {
    /// Clones any shape into a value.
    ///
    /// See [`Value::from_boxed`].
    #[inline]
    pub fn from_shape(value: &dyn Shape) -> Self {
        Self::from_boxed(value.clone_shape())
    }

    /// Wraps a boxed shape.
    ///
    /// Types that have a variant of their own (`bool`, `i64`, `u64`, `f64`,
    /// `String`, [`Number`], `Vec<Value>`, [`ValueMap`] and `Value` itself)
    /// are moved into it. Empty optional and dynamic slots become
    /// [`Value::Null`]. Everything else is kept boxed.
    pub fn from_boxed(value: Box<dyn Shape>) -> Self {
        macro_rules! rewrap {
            ($value:ident, $($ty:ty => $variant:expr),* $(,)?) => {$(
                let $value = match $value.take::<$ty>() {
                    Ok(inner) => return $variant(inner),
                    Err(other) => other,
                };
            )*};
        }

        rewrap!(
            value,
            Value => core::convert::identity,
            bool => Value::Bool,
            i64 => Value::Int,
            u64 => Value::Uint,
            f64 => Value::Float,
            String => Value::Str,
            Number => Value::Number,
            Vec<Value> => Value::List,
            ValueMap => Value::Map,
        );

        match value.shape_ref() {
            ShapeRef::Optional(None) | ShapeRef::Dynamic(None) => Value::Null,
            _ => Value::Boxed(value),
        }
    }

    /// Returns the held value as a shape, `None` for [`Value::Null`].
    pub fn as_shape(&self) -> Option<&dyn Shape> {
        match self {
            Value::Null => None,
            Value::Bool(v) => Some(v),
            Value::Int(v) => Some(v),
            Value::Uint(v) => Some(v),
            Value::Float(v) => Some(v),
            Value::Str(v) => Some(v),
            Value::Number(v) => Some(v),
            Value::List(v) => Some(v),
            Value::Map(v) => Some(v),
            Value::Boxed(v) => Some(&**v),
        }
    }

    pub fn as_shape_mut(&mut self) -> Option<&mut dyn Shape> {
        match self {
            Value::Null => None,
            Value::Bool(v) => Some(v),
            Value::Int(v) => Some(v),
            Value::Uint(v) => Some(v),
            Value::Float(v) => Some(v),
            Value::Str(v) => Some(v),
            Value::Number(v) => Some(v),
            Value::List(v) => Some(v),
            Value::Map(v) => Some(v),
            Value::Boxed(v) => Some(&mut **v),
        }
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the value as `i64` if it is an integer that fits.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            Value::Uint(v) => i64::try_from(*v).ok(),
            Value::Number(n) => n.as_i64().ok(),
            _ => None,
        }
    }

    /// Returns the value as `u64` if it is a non-negative integer.
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::Int(v) => u64::try_from(*v).ok(),
            Value::Uint(v) => Some(*v),
            Value::Number(n) => n.as_u64().ok(),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(v) => Some(*v as f64),
            Value::Uint(v) => Some(*v as f64),
            Value::Float(v) => Some(*v),
            Value::Number(n) => n.as_f64().ok(),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(v) => Some(v),
            Value::Number(n) => Some(n.as_str()),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&Vec<Value>> {
        match self {
            Value::List(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&ValueMap> {
        match self {
            Value::Map(v) => Some(v),
            _ => None,
        }
    }

    /// Looks up `key` in a [`Value::Map`].
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_map().and_then(|map| map.get(key))
    }
}

// -----------------------------------------------------------------------------
// Standard traits

impl Clone for Value {
    fn clone(&self) -> Self {
        match self {
            Value::Null => Value::Null,
            Value::Bool(v) => Value::Bool(*v),
            Value::Int(v) => Value::Int(*v),
            Value::Uint(v) => Value::Uint(*v),
            Value::Float(v) => Value::Float(*v),
            Value::Str(v) => Value::Str(v.clone()),
            Value::Number(v) => Value::Number(v.clone()),
            Value::List(v) => Value::List(v.clone()),
            Value::Map(v) => Value::Map(v.clone()),
            Value::Boxed(v) => Value::Boxed(v.clone_shape()),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("Null"),
            Value::Bool(v) => f.debug_tuple("Bool").field(v).finish(),
            Value::Int(v) => f.debug_tuple("Int").field(v).finish(),
            Value::Uint(v) => f.debug_tuple("Uint").field(v).finish(),
            Value::Float(v) => f.debug_tuple("Float").field(v).finish(),
            Value::Str(v) => f.debug_tuple("Str").field(v).finish(),
            Value::Number(v) => f.debug_tuple("Number").field(&v.as_str()).finish(),
            Value::List(v) => f.debug_tuple("List").field(v).finish(),
            Value::Map(v) => f.debug_tuple("Map").field(v).finish(),
            Value::Boxed(v) => f.debug_tuple("Boxed").field(v).finish(),
        }
    }
}

/// Structural equality, see [`deep_eq`](crate::deep_eq).
impl PartialEq for Value {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        crate::deep_eq(self, other)
    }
}

// -----------------------------------------------------------------------------
// Shape

impl Shape for Value {
    #[inline]
    fn shape_ref(&self) -> ShapeRef<'_> {
        ShapeRef::Dynamic(self.as_shape())
    }

    #[inline]
    fn shape_mut(&mut self) -> ShapeMut<'_> {
        ShapeMut::Dynamic(self)
    }

    #[inline]
    fn clone_shape(&self) -> Box<dyn Shape> {
        Box::new(self.clone())
    }
}

impl Dynamic for Value {
    #[inline]
    fn get(&self) -> Option<&dyn Shape> {
        self.as_shape()
    }

    #[inline]
    fn get_mut(&mut self) -> Option<&mut dyn Shape> {
        self.as_shape_mut()
    }

    #[inline]
    fn accepts(&self, _value: &dyn Shape) -> bool {
        true
    }

    fn set_boxed(&mut self, value: Box<dyn Shape>) -> Result<(), ShapeError> {
        *self = Value::from_boxed(value);
        Ok(())
    }

    #[inline]
    fn clear(&mut self) {
        *self = Value::Null;
    }
}

// -----------------------------------------------------------------------------
// Conversions

macro_rules! impl_from {
    ($($ty:ty => $variant:ident as $target:ty),* $(,)?) => {$(
        impl From<$ty> for Value {
            #[inline]
            fn from(value: $ty) -> Self {
                Value::$variant(value as $target)
            }
        }
    )*};
}

impl_from!(
    i8 => Int as i64, i16 => Int as i64, i32 => Int as i64, i64 => Int as i64, isize => Int as i64,
    u8 => Uint as u64, u16 => Uint as u64, u32 => Uint as u64, u64 => Uint as u64, usize => Uint as u64,
    f32 => Float as f64, f64 => Float as f64,
);

impl From<bool> for Value {
    #[inline]
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<String> for Value {
    #[inline]
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<&str> for Value {
    #[inline]
    fn from(value: &str) -> Self {
        Value::Str(String::from(value))
    }
}

impl From<Number> for Value {
    #[inline]
    fn from(value: Number) -> Self {
        Value::Number(value)
    }
}

impl From<Vec<Value>> for Value {
    #[inline]
    fn from(value: Vec<Value>) -> Self {
        Value::List(value)
    }
}

impl From<ValueMap> for Value {
    #[inline]
    fn from(value: ValueMap) -> Self {
        Value::Map(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    #[inline]
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Value::Map(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Value::List(iter.into_iter().collect())
    }
}
