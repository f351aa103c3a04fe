#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

pub use mold_assign as assign;
pub use mold_shape as shape;
pub use mold_utils as utils;

pub use mold_assign::{AssignConfig, AssignError, Assigner, DecodeHook, Metadata, assign, assign_with};
pub use mold_shape::{Shape, Value};
