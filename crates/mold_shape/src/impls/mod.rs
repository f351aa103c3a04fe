//! [`Shape`](crate::Shape) implementations for standard types.
//!
//! ## Implemented Menu
//!
//! - scalar: `bool`, `i8`-`i64`, `isize`, `u8`-`u64`, `usize`, `f32`, `f64`
//! - text: `String`, `&'static str` (read only)
//! - containers: `Box<T>`, `Option<T>`, `Vec<T>`, `[T; N]`
//! - maps: `BTreeMap<K, V>`, `hashbrown::HashMap<K, V, S>`,
//!   `std::collections::HashMap<K, V, S>` (`std` feature)
//! - functions: `fn(..) -> R` with up to three arguments
//!
//! [`Value`](crate::Value) and [`Number`](crate::Number) are implemented
//! next to their definitions.
//!
//! Element, key and value types of containers must be `Default + Clone`,
//! so that the assigner can create fresh elements and clone shapes.

// -----------------------------------------------------------------------------
// Modules

mod array;
mod boxed;
mod func;
mod map;
mod option;
mod scalar;
mod text;
mod vec;

// -----------------------------------------------------------------------------
// Helpers

/// Implements [`Shape::clone_shape`](crate::Shape::clone_shape) with `Clone`.
macro_rules! impl_clone_shape {
    () => {
        #[inline]
        fn clone_shape(&self) -> ::alloc::boxed::Box<dyn $crate::Shape> {
            ::alloc::boxed::Box::new(::core::clone::Clone::clone(self))
        }
    };
}

pub(crate) use impl_clone_shape;
