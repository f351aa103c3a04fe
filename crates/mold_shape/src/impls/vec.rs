use alloc::vec::Vec;
use core::any::TypeId;

use crate::impls::impl_clone_shape;
use crate::ops::{List, Sequence};
use crate::{Shape, ShapeMut, ShapeRef};

impl<T: Shape + Default + Clone> Shape for Vec<T> {
    #[inline]
    fn shape_ref(&self) -> ShapeRef<'_> {
        ShapeRef::List(self)
    }

    #[inline]
    fn shape_mut(&mut self) -> ShapeMut<'_> {
        ShapeMut::List(self)
    }

    impl_clone_shape!();
}

impl<T: Shape + Default + Clone> Sequence for Vec<T> {
    #[inline]
    fn len(&self) -> usize {
        Vec::len(self)
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

impl<T: Shape + Default + Clone> List for Vec<T> {
    #[inline]
    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Shape> {
        self.as_mut_slice()
            .get_mut(index)
            .map(|item| item as &mut dyn Shape)
    }

    #[inline]
    fn truncate(&mut self, len: usize) {
        Vec::truncate(self, len);
    }

    #[inline]
    fn push_default(&mut self) {
        self.push(T::default());
    }
}
