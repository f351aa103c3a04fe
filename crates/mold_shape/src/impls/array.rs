use core::any::TypeId;

use crate::impls::impl_clone_shape;
use crate::ops::{Array, Sequence};
use crate::{Shape, ShapeMut, ShapeRef};

impl<T: Shape + Clone, const N: usize> Shape for [T; N] {
    #[inline]
    fn shape_ref(&self) -> ShapeRef<'_> {
        ShapeRef::Array(self)
    }

    #[inline]
    fn shape_mut(&mut self) -> ShapeMut<'_> {
        ShapeMut::Array(self)
    }

    impl_clone_shape!();
}

impl<T: Shape + Clone, const N: usize> Sequence for [T; N] {
    #[inline]
    fn len(&self) -> usize {
        N
    }

    #[inline]
    fn get(&self, index: usize) -> Option<&dyn Shape> {
        self.as_slice().get(index).map(|item| item as &dyn Shape)
    }

    #[inline]
    fn item_type(&self) -> TypeId {
        TypeId::of::<T>()
    }
}

impl<T: Shape + Clone, const N: usize> Array for [T; N] {
    #[inline]
    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Shape> {
        self.as_mut_slice()
            .get_mut(index)
            .map(|item| item as &mut dyn Shape)
    }
}
