use core::any::TypeId;

use crate::Shape;

/// Read access shared by [`List`] and [`Array`].
pub trait Sequence: Shape {
    fn len(&self) -> usize;

    fn get(&self, index: usize) -> Option<&dyn Shape>;

    /// The [`TypeId`] of the element type.
    fn item_type(&self) -> TypeId;

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A sequence of variable length, implemented for `Vec<T>`.
pub trait List: Sequence {
    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Shape>;

    /// Shortens the list to `len` elements; no-op if already shorter.
    fn truncate(&mut self, len: usize);

    /// Appends a default element.
    fn push_default(&mut self);
}

/// A sequence of fixed length, implemented for `[T; N]`.
pub trait Array: Sequence {
    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Shape>;
}
