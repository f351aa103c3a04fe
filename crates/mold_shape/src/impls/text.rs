use alloc::string::String;

use crate::impls::impl_clone_shape;
use crate::ops::TextSlot;
use crate::{Shape, ShapeMut, ShapeRef};

impl TextSlot for String {
    #[inline]
    fn as_str(&self) -> &str {
        String::as_str(self)
    }

    fn set_text(&mut self, text: &str) {
        self.clear();
        self.push_str(text);
    }
}

impl Shape for String {
    #[inline]
    fn shape_ref(&self) -> ShapeRef<'_> {
        ShapeRef::Str(String::as_str(self))
    }

    #[inline]
    fn shape_mut(&mut self) -> ShapeMut<'_> {
        ShapeMut::Str(self)
    }

    impl_clone_shape!();
}

impl Shape for &'static str {
    #[inline]
    fn shape_ref(&self) -> ShapeRef<'_> {
        ShapeRef::Str(self)
    }

    /// Static text cannot be written through a view.
    #[inline]
    fn shape_mut(&mut self) -> ShapeMut<'_> {
        ShapeMut::Opaque
    }

    impl_clone_shape!();
}
