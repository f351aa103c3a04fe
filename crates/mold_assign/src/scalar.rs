use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::any::TypeId;
use core::fmt::Display;

use mold_shape::ops::{FloatSlot, IntSlot, Sequence, TextSlot, UintSlot};
use mold_shape::{Shape, ShapeKind, ShapeRef, display_key};

use crate::num::{self, NumError};
use crate::{AssignError, Assigner, KeyPath};

// -----------------------------------------------------------------------------
// Errors

pub(crate) fn unconvertible(path: &KeyPath, expected: &'static str, source: &dyn Shape) -> AssignError {
    AssignError::UnconvertibleType {
        path: path.to_string(),
        expected,
        found: source.type_name(),
        value: display_key(source),
    }
}

fn parse_error(path: &KeyPath, kind: ShapeKind, text: &str, err: impl Display) -> AssignError {
    AssignError::Parse {
        path: path.to_string(),
        kind,
        message: format!("parsing {text:?}: {err}"),
    }
}

// -----------------------------------------------------------------------------
// Text parsing

/// Empty text reads as zero.
#[inline]
fn or_zero(text: &str) -> &str {
    if text.is_empty() { "0" } else { text }
}

fn int_from_text(text: &str, bits: u32, path: &KeyPath) -> Result<i64, AssignError> {
    let text = or_zero(text);
    num::parse_int(text, bits).map_err(|err| parse_error(path, ShapeKind::Int, text, err))
}

fn uint_from_text(text: &str, bits: u32, path: &KeyPath) -> Result<u64, AssignError> {
    let text = or_zero(text);
    num::parse_uint(text, bits).map_err(|err| parse_error(path, ShapeKind::Uint, text, err))
}

fn float_from_text(text: &str, bits: u32, path: &KeyPath) -> Result<f64, AssignError> {
    let text = or_zero(text);
    num::parse_float(text, bits).map_err(|err| parse_error(path, ShapeKind::Float, text, err))
}

fn bool_from_text(text: &str, path: &KeyPath) -> Result<bool, AssignError> {
    match num::parse_bool(text) {
        Some(value) => Ok(value),
        None if text.is_empty() => Ok(false),
        None => Err(parse_error(path, ShapeKind::Bool, text, NumError::Syntax)),
    }
}

/// Shortest decimal form, without exponent.
fn format_float(value: f64) -> String {
    if value == f64::INFINITY {
        String::from("+Inf")
    } else if value == f64::NEG_INFINITY {
        String::from("-Inf")
    } else {
        value.to_string()
    }
}

fn is_bytes(seq: &dyn Sequence) -> bool {
    seq.item_type() == TypeId::of::<u8>()
}

fn bytes_to_text(seq: &dyn Sequence) -> String {
    let bytes: Vec<u8> = (0..seq.len())
        .filter_map(|index| seq.get(index))
        .filter_map(|byte| match byte.shape_ref() {
            ShapeRef::Uint(value) => Some(value as u8),
            _ => None,
        })
        .collect();
    String::from_utf8_lossy(&bytes).into_owned()
}

// -----------------------------------------------------------------------------
// Scalar targets

impl Assigner<'_, '_> {
    pub(crate) fn assign_bool(
        &mut self,
        slot: &mut bool,
        expected: &'static str,
        target_key: &KeyPath,
        source: &dyn Shape,
        source_key: &KeyPath,
    ) -> Result<(), AssignError> {
        let weak = self.config.weakly_typed_input;

        *slot = match source.shape_ref() {
            ShapeRef::Bool(value) => value,
            ShapeRef::Int(value) if weak => value != 0,
            ShapeRef::Uint(value) if weak => value != 0,
            ShapeRef::Float(value) if weak => value != 0.0,
            ShapeRef::Str(text) if weak => bool_from_text(text, source_key)?,
            ShapeRef::Number(number) if weak => bool_from_text(number.as_str(), source_key)?,
            _ => return Err(unconvertible(target_key, expected, source)),
        };
        Ok(())
    }

    pub(crate) fn assign_int(
        &mut self,
        slot: &mut dyn IntSlot,
        expected: &'static str,
        target_key: &KeyPath,
        source: &dyn Shape,
    ) -> Result<(), AssignError> {
        let weak = self.config.weakly_typed_input;

        let value = match source.shape_ref() {
            ShapeRef::Int(value) => value,
            ShapeRef::Uint(value) => value as i64,
            ShapeRef::Float(value) => value as i64,
            ShapeRef::Bool(value) if weak => i64::from(value),
            ShapeRef::Str(text) if weak => int_from_text(text, slot.bits(), target_key)?,
            ShapeRef::Number(number) if weak => int_from_text(number.as_str(), slot.bits(), target_key)?,
            ShapeRef::Number(number) => number
                .as_i64()
                .map_err(|err| parse_error(target_key, ShapeKind::Int, number.as_str(), err))?,
            _ => return Err(unconvertible(target_key, expected, source)),
        };
        slot.set(value);
        Ok(())
    }

    pub(crate) fn assign_uint(
        &mut self,
        slot: &mut dyn UintSlot,
        expected: &'static str,
        target_key: &KeyPath,
        source: &dyn Shape,
    ) -> Result<(), AssignError> {
        let weak = self.config.weakly_typed_input;
        let overflow = |value: String| AssignError::UintOverflow {
            path: target_key.to_string(),
            value,
        };

        let value = match source.shape_ref() {
            ShapeRef::Int(value) if value < 0 && !weak => return Err(overflow(value.to_string())),
            ShapeRef::Int(value) => value as u64,
            ShapeRef::Uint(value) => value,
            ShapeRef::Float(value) if value < 0.0 && !weak => return Err(overflow(format!("{value:.6}"))),
            // Negative values wrap like their integer part would.
            ShapeRef::Float(value) if value < 0.0 => value as i64 as u64,
            ShapeRef::Float(value) => value as u64,
            ShapeRef::Bool(value) if weak => u64::from(value),
            ShapeRef::Str(text) if weak => uint_from_text(text, slot.bits(), target_key)?,
            ShapeRef::Number(number) if weak => uint_from_text(number.as_str(), slot.bits(), target_key)?,
            ShapeRef::Number(number) => num::parse_uint(number.as_str(), 64)
                .map_err(|err| parse_error(target_key, ShapeKind::Uint, number.as_str(), err))?,
            _ => return Err(unconvertible(target_key, expected, source)),
        };
        slot.set(value);
        Ok(())
    }

    pub(crate) fn assign_float(
        &mut self,
        slot: &mut dyn FloatSlot,
        expected: &'static str,
        target_key: &KeyPath,
        source: &dyn Shape,
    ) -> Result<(), AssignError> {
        let weak = self.config.weakly_typed_input;

        let value = match source.shape_ref() {
            ShapeRef::Int(value) => value as f64,
            ShapeRef::Uint(value) => value as f64,
            ShapeRef::Float(value) => value,
            ShapeRef::Bool(value) if weak => f64::from(u8::from(value)),
            ShapeRef::Str(text) if weak => float_from_text(text, slot.bits(), target_key)?,
            ShapeRef::Number(number) if weak => float_from_text(number.as_str(), slot.bits(), target_key)?,
            ShapeRef::Number(number) => num::parse_float(number.as_str(), 64)
                .map_err(|err| parse_error(target_key, ShapeKind::Float, number.as_str(), err))?,
            _ => return Err(unconvertible(target_key, expected, source)),
        };

        if value.is_finite() {
            slot.set(value);
        } else if weak {
            slot.set(0.0);
        } else {
            return Err(AssignError::NonFiniteFloat {
                path: target_key.to_string(),
            });
        }
        Ok(())
    }

    pub(crate) fn assign_text(
        &mut self,
        slot: &mut dyn TextSlot,
        expected: &'static str,
        target_key: &KeyPath,
        source: &dyn Shape,
    ) -> Result<(), AssignError> {
        let weak = self.config.weakly_typed_input;

        match source.shape_ref() {
            ShapeRef::Str(text) => slot.set_text(text),
            ShapeRef::Number(number) => slot.set_text(number.as_str()),
            ShapeRef::Bool(value) if weak => slot.set_text(if value { "1" } else { "0" }),
            ShapeRef::Int(value) if weak => slot.set_text(&value.to_string()),
            ShapeRef::Uint(value) if weak => slot.set_text(&value.to_string()),
            ShapeRef::Float(value) if weak => slot.set_text(&format_float(value)),
            ShapeRef::List(list) if weak && is_bytes(list) => slot.set_text(&bytes_to_text(list)),
            ShapeRef::Array(array) if weak && is_bytes(array) => slot.set_text(&bytes_to_text(array)),
            _ => return Err(unconvertible(target_key, expected, source)),
        }
        Ok(())
    }
}
