//! Small utilities shared by the `mold` crates.
//!
//! - [`hash`]: hash containers with a fixed, seed-stable hasher.
//! - [`case`]: naming-convention converters used to derive external field names.
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// No STD Support

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

pub mod case;
pub mod hash;
