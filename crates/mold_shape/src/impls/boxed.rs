use alloc::boxed::Box;

use crate::impls::impl_clone_shape;
use crate::{Shape, ShapeMut, ShapeRef};

// Boxes are transparent: the views are those of the boxed value.
impl<T: Shape + Clone> Shape for Box<T> {
    #[inline]
    fn shape_ref(&self) -> ShapeRef<'_> {
        (**self).shape_ref()
    }

    #[inline]
    fn shape_mut(&mut self) -> ShapeMut<'_> {
        (**self).shape_mut()
    }

    impl_clone_shape!();
}
