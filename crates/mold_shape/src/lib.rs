//! Run-time shape inspection for the `mold` assigner.
//!
//! Every value that can take part in an assignment implements [`Shape`].
//! A shape exposes a read view ([`ShapeRef`]) and a write view ([`ShapeMut`]);
//! the views hand out the matching sub-trait object ([`ops::Record`],
//! [`ops::Map`], [`ops::List`], ...) so callers can walk a value without
//! knowing its concrete type.
//!
//! Standard types are implemented in [`impls`], user records use
//! [`derive::Shape`], and [`Value`] is the dynamic tree used for loosely
//! typed data.
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// Extern Self

// The derive macro emits `::mold_shape::...` paths, the alias makes them
// valid inside this crate as well.
extern crate self as mold_shape;

// -----------------------------------------------------------------------------
// no_std support

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod helpers;
mod shape;

pub mod impls;
pub mod ops;
pub mod serde;
pub mod value;

// -----------------------------------------------------------------------------
// Top-Level exports

pub mod __macro_exports;

pub use helpers::{deep_eq, display_key, is_empty_value, is_zero_value, zero_out};
pub use mold_shape_derive as derive;
pub use shape::{Shape, ShapeError, ShapeKind, ShapeMut, ShapeRef};
pub use value::{Number, Value, ValueMap};
