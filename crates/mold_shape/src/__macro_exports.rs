//! Items used by the code that `#[derive(Shape)]` generates.
//! Not public API.

pub use alloc::boxed::Box;
pub use alloc::vec::Vec;
pub use core::option::Option;
