use alloc::boxed::Box;

use crate::impls::impl_clone_shape;
use crate::ops::Optional;
use crate::{Shape, ShapeError, ShapeMut, ShapeRef};

impl<T: Shape + Default + Clone> Shape for Option<T> {
    #[inline]
    fn shape_ref(&self) -> ShapeRef<'_> {
        ShapeRef::Optional(self.as_ref().map(|value| value as &dyn Shape))
    }

    #[inline]
    fn shape_mut(&mut self) -> ShapeMut<'_> {
        ShapeMut::Optional(self)
    }

    impl_clone_shape!();
}

impl<T: Shape + Default + Clone> Optional for Option<T> {
    #[inline]
    fn get(&self) -> Option<&dyn Shape> {
        self.as_ref().map(|value| value as &dyn Shape)
    }

    #[inline]
    fn get_mut(&mut self) -> Option<&mut dyn Shape> {
        self.as_mut().map(|value| value as &mut dyn Shape)
    }

    fn new_value(&self) -> Box<dyn Shape> {
        Box::new(T::default())
    }

    fn set_boxed(&mut self, value: Box<dyn Shape>) -> Result<(), ShapeError> {
        let value = value
            .take::<T>()
            .map_err(|value| ShapeError::mismatch::<T>(&*value))?;
        *self = Some(value);
        Ok(())
    }

    fn get_or_insert_default(&mut self) -> &mut dyn Shape {
        self.get_or_insert_with(T::default)
    }

    #[inline]
    fn clear(&mut self) {
        *self = None;
    }
}
