use alloc::boxed::Box;
use core::any::{Any, TypeId};
use core::{error, fmt};

use crate::ops::{Array, Dynamic, FuncSlot, List, Map, Optional, Record};
use crate::ops::{FloatSlot, IntSlot, TextSlot, UintSlot};
use crate::value::Number;

// -----------------------------------------------------------------------------
// ShapeKind

/// The closed set of shapes a value can have.
///
/// This is what the assigner dispatches on. Error messages print it with
/// [`Display`](fmt::Display) in lower case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Bool,
    Int,
    Uint,
    Float,
    Str,
    Number,
    Record,
    Map,
    List,
    Array,
    Optional,
    Dynamic,
    Func,
    Opaque,
}

impl ShapeKind {
    /// Returns `true` for booleans, numbers and text.
    #[inline]
    pub const fn is_scalar(self) -> bool {
        matches!(
            self,
            Self::Bool | Self::Int | Self::Uint | Self::Float | Self::Str | Self::Number
        )
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Uint => "uint",
            Self::Float => "float",
            Self::Str => "string",
            Self::Number => "number",
            Self::Record => "record",
            Self::Map => "map",
            Self::List => "list",
            Self::Array => "array",
            Self::Optional => "optional",
            Self::Dynamic => "dynamic",
            Self::Func => "func",
            Self::Opaque => "opaque",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

// -----------------------------------------------------------------------------
// ShapeRef

/// An immutable view of a value, by shape.
///
/// Signed integers are widened to `i64`, unsigned ones to `u64` and floats to
/// `f64`. Containers hand out their sub-trait object.
pub enum ShapeRef<'a> {
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    Str(&'a str),
    Number(&'a Number),
    Record(&'a dyn Record),
    Map(&'a dyn Map),
    List(&'a dyn List),
    Array(&'a dyn Array),
    /// A nullable slot, `None` when empty.
    Optional(Option<&'a dyn Shape>),
    /// A polymorphic slot, `None` when empty.
    Dynamic(Option<&'a dyn Shape>),
    /// A function pointer; the payload is the value itself.
    Func(&'a dyn Shape),
    Opaque,
}

impl ShapeRef<'_> {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Self::Bool(_) => ShapeKind::Bool,
            Self::Int(_) => ShapeKind::Int,
            Self::Uint(_) => ShapeKind::Uint,
            Self::Float(_) => ShapeKind::Float,
            Self::Str(_) => ShapeKind::Str,
            Self::Number(_) => ShapeKind::Number,
            Self::Record(_) => ShapeKind::Record,
            Self::Map(_) => ShapeKind::Map,
            Self::List(_) => ShapeKind::List,
            Self::Array(_) => ShapeKind::Array,
            Self::Optional(_) => ShapeKind::Optional,
            Self::Dynamic(_) => ShapeKind::Dynamic,
            Self::Func(_) => ShapeKind::Func,
            Self::Opaque => ShapeKind::Opaque,
        }
    }
}

impl fmt::Debug for ShapeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => f.debug_tuple("Bool").field(v).finish(),
            Self::Int(v) => f.debug_tuple("Int").field(v).finish(),
            Self::Uint(v) => f.debug_tuple("Uint").field(v).finish(),
            Self::Float(v) => f.debug_tuple("Float").field(v).finish(),
            Self::Str(v) => f.debug_tuple("Str").field(v).finish(),
            Self::Number(v) => f.debug_tuple("Number").field(v).finish(),
            other => f.pad(other.kind().as_str()),
        }
    }
}

// -----------------------------------------------------------------------------
// ShapeMut

/// A mutable view of a value, by shape.
///
/// `Opaque` marks values that can be read but not written through a view,
/// such as `&'static str`.
pub enum ShapeMut<'a> {
    Bool(&'a mut bool),
    Int(&'a mut dyn IntSlot),
    Uint(&'a mut dyn UintSlot),
    Float(&'a mut dyn FloatSlot),
    Str(&'a mut dyn TextSlot),
    Record(&'a mut dyn Record),
    Map(&'a mut dyn Map),
    List(&'a mut dyn List),
    Array(&'a mut dyn Array),
    Optional(&'a mut dyn Optional),
    Dynamic(&'a mut dyn Dynamic),
    Func(&'a mut dyn FuncSlot),
    Opaque,
}

impl ShapeMut<'_> {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Self::Bool(_) => ShapeKind::Bool,
            Self::Int(_) => ShapeKind::Int,
            Self::Uint(_) => ShapeKind::Uint,
            Self::Float(_) => ShapeKind::Float,
            Self::Str(_) => ShapeKind::Str,
            Self::Record(_) => ShapeKind::Record,
            Self::Map(_) => ShapeKind::Map,
            Self::List(_) => ShapeKind::List,
            Self::Array(_) => ShapeKind::Array,
            Self::Optional(_) => ShapeKind::Optional,
            Self::Dynamic(_) => ShapeKind::Dynamic,
            Self::Func(_) => ShapeKind::Func,
            Self::Opaque => ShapeKind::Opaque,
        }
    }
}

// -----------------------------------------------------------------------------
// Shape

/// A value whose structure can be inspected and written at run time.
///
/// # Type identification
///
/// [`Any::type_id`] on a `Box<dyn Shape>` reports the box. Use
/// [`Shape::ty_id`] to get the id of the value inside:
///
/// ```
/// use core::any::TypeId;
/// use mold_shape::Shape;
///
/// let x: Box<dyn Shape> = Box::new(7_u16);
/// assert_eq!(x.ty_id(), TypeId::of::<u16>());
/// assert_eq!(x.downcast_ref::<u16>(), Some(&7));
/// ```
///
/// # Implementing
///
/// Records should use [`derive::Shape`](crate::derive::Shape). A manual
/// implementation returns the view variant that matches the value and
/// implements the corresponding trait from [`ops`](crate::ops).
pub trait Shape: Any + Send + Sync {
    /// Returns the read view of this value.
    fn shape_ref(&self) -> ShapeRef<'_>;

    /// Returns the write view of this value.
    fn shape_mut(&mut self) -> ShapeMut<'_>;

    /// Clones the value into a new box.
    fn clone_shape(&self) -> Box<dyn Shape>;

    /// Returns the [`TypeId`] of the underlying type.
    #[inline]
    fn ty_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    /// Returns the full name of the underlying type.
    #[inline]
    fn type_name(&self) -> &'static str {
        core::any::type_name::<Self>()
    }

    #[inline]
    fn kind(&self) -> ShapeKind {
        self.shape_ref().kind()
    }
}

impl dyn Shape {
    /// Returns `true` if the underlying value is of type `T`.
    #[inline]
    pub fn is<T: Shape>(&self) -> bool {
        self.ty_id() == TypeId::of::<T>()
    }

    #[inline]
    pub fn downcast_ref<T: Shape>(&self) -> Option<&T> {
        let any: &dyn Any = self;
        any.downcast_ref::<T>()
    }

    #[inline]
    pub fn downcast_mut<T: Shape>(&mut self) -> Option<&mut T> {
        let any: &mut dyn Any = self;
        any.downcast_mut::<T>()
    }

    /// Moves the value out of the box if it is a `T`.
    pub fn take<T: Shape>(self: Box<Self>) -> Result<T, Box<dyn Shape>> {
        if !self.is::<T>() {
            return Err(self);
        }
        let any: Box<dyn Any> = self;
        match any.downcast::<T>() {
            Ok(value) => Ok(*value),
            Err(_) => unreachable!("type id was checked above"),
        }
    }
}

impl fmt::Debug for dyn Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:?})", self.type_name(), self.shape_ref())
    }
}

// -----------------------------------------------------------------------------
// ShapeError

/// Error returned when a boxed value is handed to a slot of another type.
#[derive(Debug)]
pub struct ShapeError {
    pub expected: &'static str,
    pub found: &'static str,
}

impl ShapeError {
    #[inline]
    pub fn mismatch<T: ?Sized>(found: &dyn Shape) -> Self {
        Self {
            expected: core::any::type_name::<T>(),
            found: found.type_name(),
        }
    }
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expected a value of type `{}`, found `{}`", self.expected, self.found)
    }
}

impl error::Error for ShapeError {}
