use alloc::boxed::Box;

use crate::{Shape, ShapeError};

/// A polymorphic slot that holds a value of some other shape.
///
/// [`Value`](crate::Value) is the standard implementation and accepts
/// everything.
pub trait Dynamic: Shape {
    /// Returns the held value, `None` when the slot is empty.
    fn get(&self) -> Option<&dyn Shape>;

    fn get_mut(&mut self) -> Option<&mut dyn Shape>;

    /// Returns `true` if `value` can be stored with [`Dynamic::set_boxed`].
    fn accepts(&self, value: &dyn Shape) -> bool;

    /// Replaces the held value.
    fn set_boxed(&mut self, value: Box<dyn Shape>) -> Result<(), ShapeError>;

    /// Empties the slot.
    fn clear(&mut self);
}
