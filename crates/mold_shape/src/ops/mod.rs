//! The sub-traits handed out by [`ShapeRef`] and [`ShapeMut`].
//!
//! ## Menu
//!
//! - Scalar slots: [`IntSlot`], [`UintSlot`], [`FloatSlot`], [`TextSlot`].
//! - [`Record`]: named fields with [`FieldDecl`] metadata (e.g. a derived struct).
//! - [`Sequence`], [`List`], [`Array`]: `Vec<T>` and `[T; N]`.
//! - [`Map`]: `BTreeMap<K, V>`, `HashMap<K, V, S>`.
//! - [`Optional`]: `Option<T>`.
//! - [`Dynamic`]: a slot that can hold a value of any shape, i.e. [`Value`].
//! - [`FuncSlot`]: function pointers.
//!
//! [`ShapeRef`]: crate::ShapeRef
//! [`ShapeMut`]: crate::ShapeMut
//! [`Value`]: crate::Value

// -----------------------------------------------------------------------------
// Modules

mod dynamic;
mod func;
mod map;
mod optional;
mod record;
mod scalar;
mod sequence;

// -----------------------------------------------------------------------------
// Exports

pub use dynamic::Dynamic;
pub use func::FuncSlot;
pub use map::Map;
pub use optional::Optional;
pub use record::{FieldDecl, Record};
pub use scalar::{FloatSlot, IntSlot, TextSlot, UintSlot};
pub use sequence::{Array, List, Sequence};
