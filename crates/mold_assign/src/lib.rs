//! The assignment engine.
//!
//! An [`Assigner`] copies a *source* value into a *target* value, converting
//! on the way. The target decides the outcome: its shape selects the
//! conversion, records are filled field by field, mappings are merged and
//! sequences resized. Children that fail do not stop their siblings; every
//! failure is collected into one [`AssignError`].
//!
//! ```
//! use mold_assign::assign;
//! use mold_shape::Value;
//!
//! let mut ports: Vec<u16> = Vec::new();
//! let source = Value::from(vec![Value::from(80_u16), Value::from(443_u16)]);
//! assign(&mut ports, &source).unwrap();
//! assert_eq!(ports, [80, 443]);
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// no_std support

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod assigner;
mod config;
mod error;
mod map;
mod metadata;
mod num;
mod record;
mod scalar;
mod seq;
mod slot;

// -----------------------------------------------------------------------------
// Exports

pub use assigner::{Assigner, assign, assign_with};
pub use config::{AssignConfig, DecodeHook};
pub use error::{AssignError, ErrorList};
pub use metadata::{KeyPath, Metadata};
