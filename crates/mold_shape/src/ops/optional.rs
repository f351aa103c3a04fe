use alloc::boxed::Box;

use crate::{Shape, ShapeError};

/// A nullable slot, implemented for `Option<T>`.
pub trait Optional: Shape {
    /// Returns the contained value, if any.
    fn get(&self) -> Option<&dyn Shape>;

    fn get_mut(&mut self) -> Option<&mut dyn Shape>;

    /// Creates a default value of the contained type, detached from the slot.
    fn new_value(&self) -> Box<dyn Shape>;

    /// Stores a value built with [`Optional::new_value`].
    fn set_boxed(&mut self, value: Box<dyn Shape>) -> Result<(), ShapeError>;

    /// Fills an empty slot with the default value and returns the content.
    fn get_or_insert_default(&mut self) -> &mut dyn Shape;

    /// Empties the slot.
    fn clear(&mut self);

    #[inline]
    fn is_none(&self) -> bool {
        self.get().is_none()
    }
}
