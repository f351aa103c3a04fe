use alloc::string::ToString;
use core::any::TypeId;

use mold_shape::ops::{Array, List, Sequence};
use mold_shape::{Shape, ShapeRef, zero_out};

use crate::{AssignError, Assigner, ErrorList, KeyPath};

// -----------------------------------------------------------------------------
// Items

/// The items of a source, as seen by a sequence target.
pub(crate) enum Items<'a> {
    Seq(&'a dyn Sequence),
    /// A single value lifted into a sequence.
    One(&'a dyn Shape),
    /// Text read as bytes.
    Bytes(&'a [u8]),
}

impl<'a> Items<'a> {
    pub fn len(&self) -> usize {
        match self {
            Self::Seq(seq) => seq.len(),
            Self::One(_) => 1,
            Self::Bytes(bytes) => bytes.len(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, index: usize) -> Option<&'a dyn Shape> {
        match *self {
            Self::Seq(seq) => seq.get(index),
            Self::One(value) => (index == 0).then_some(value),
            Self::Bytes(bytes) => bytes.get(index).map(|byte| byte as &dyn Shape),
        }
    }
}

fn expected_sequence(target_key: &KeyPath, source: &dyn Shape) -> AssignError {
    AssignError::ExpectedSequence {
        path: target_key.to_string(),
        found: source.kind(),
    }
}

// -----------------------------------------------------------------------------
// Sequence targets

impl Assigner<'_, '_> {
    /// Resizes `target` to the length of the source and assigns each item.
    pub(crate) fn assign_list(
        &mut self,
        target: &mut dyn List,
        target_key: &KeyPath,
        source: &dyn Shape,
        source_key: &KeyPath,
    ) -> Result<(), AssignError> {
        let items = match source.shape_ref() {
            ShapeRef::List(list) => Items::Seq(list),
            ShapeRef::Array(array) => Items::Seq(array),
            _ if !self.config.weakly_typed_input => return Err(expected_sequence(target_key, source)),
            ShapeRef::Map(map) if map.is_empty() => {
                target.truncate(0);
                return Ok(());
            }
            ShapeRef::Str(text) if target.item_type() == TypeId::of::<u8>() => Items::Bytes(text.as_bytes()),
            _ => Items::One(source),
        };

        target.truncate(items.len());

        let mut errors = ErrorList::new();
        for index in 0..items.len() {
            while target.len() <= index {
                target.push_default();
            }

            let (Some(slot), Some(item)) = (target.get_mut(index), items.get(index)) else {
                continue;
            };
            if let Err(err) = self.assign_value(slot, &target_key.index(index), item, &source_key.index(index)) {
                errors.push(err);
            }
        }

        if !errors.is_empty() {
            log::debug!("{} error(s) assigning list `{target_key}`", errors.len());
        }
        errors.into_result()
    }

    /// Assigns each item in place and resets the elements past the end of
    /// the source.
    pub(crate) fn assign_array(
        &mut self,
        target: &mut dyn Array,
        target_key: &KeyPath,
        source: &dyn Shape,
        source_key: &KeyPath,
    ) -> Result<(), AssignError> {
        let items = match source.shape_ref() {
            ShapeRef::List(list) => Items::Seq(list),
            ShapeRef::Array(array) => Items::Seq(array),
            _ if !self.config.weakly_typed_input => return Err(expected_sequence(target_key, source)),
            ShapeRef::Map(map) if map.is_empty() => {
                zero_out(target);
                return Ok(());
            }
            ShapeRef::Map(_) => return Err(expected_sequence(target_key, source)),
            _ => Items::One(source),
        };

        if items.len() > target.len() {
            return Err(AssignError::LengthExceeded {
                path: target_key.to_string(),
                expected: target.len(),
                found: items.len(),
            });
        }

        let mut errors = ErrorList::new();
        for index in 0..items.len() {
            let (Some(slot), Some(item)) = (target.get_mut(index), items.get(index)) else {
                continue;
            };
            if let Err(err) = self.assign_value(slot, &target_key.index(index), item, &source_key.index(index)) {
                errors.push(err);
            }
        }

        for index in items.len()..target.len() {
            if let Some(slot) = target.get_mut(index) {
                zero_out(slot);
            }
        }

        if !errors.is_empty() {
            log::debug!("{} error(s) assigning array `{target_key}`", errors.len());
        }
        errors.into_result()
    }
}
