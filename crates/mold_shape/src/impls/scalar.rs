use crate::impls::impl_clone_shape;
use crate::ops::{FloatSlot, IntSlot, UintSlot};
use crate::{Shape, ShapeMut, ShapeRef};

impl Shape for bool {
    #[inline]
    fn shape_ref(&self) -> ShapeRef<'_> {
        ShapeRef::Bool(*self)
    }

    #[inline]
    fn shape_mut(&mut self) -> ShapeMut<'_> {
        ShapeMut::Bool(self)
    }

    impl_clone_shape!();
}

macro_rules! impl_shape_for_int {
    ($($ty:ty),* $(,)?) => {$(
        impl IntSlot for $ty {
            #[inline]
            fn bits(&self) -> u32 {
                <$ty>::BITS
            }

            #[inline]
            fn get(&self) -> i64 {
                *self as i64
            }

            #[inline]
            fn set(&mut self, value: i64) {
                *self = value as $ty;
            }
        }

        impl Shape for $ty {
            #[inline]
            fn shape_ref(&self) -> ShapeRef<'_> {
                ShapeRef::Int(*self as i64)
            }

            #[inline]
            fn shape_mut(&mut self) -> ShapeMut<'_> {
                ShapeMut::Int(self)
            }

            impl_clone_shape!();
        }
    )*};
}

macro_rules! impl_shape_for_uint {
    ($($ty:ty),* $(,)?) => {$(
        impl UintSlot for $ty {
            #[inline]
            fn bits(&self) -> u32 {
                <$ty>::BITS
            }

            #[inline]
            fn get(&self) -> u64 {
                *self as u64
            }

            #[inline]
            fn set(&mut self, value: u64) {
                *self = value as $ty;
            }
        }

        impl Shape for $ty {
            #[inline]
            fn shape_ref(&self) -> ShapeRef<'_> {
                ShapeRef::Uint(*self as u64)
            }

            #[inline]
            fn shape_mut(&mut self) -> ShapeMut<'_> {
                ShapeMut::Uint(self)
            }

            impl_clone_shape!();
        }
    )*};
}

macro_rules! impl_shape_for_float {
    ($($ty:ty => $bits:literal),* $(,)?) => {$(
        impl FloatSlot for $ty {
            #[inline]
            fn bits(&self) -> u32 {
                $bits
            }

            #[inline]
            fn get(&self) -> f64 {
                *self as f64
            }

            #[inline]
            fn set(&mut self, value: f64) {
                *self = value as $ty;
            }
        }

        impl Shape for $ty {
            #[inline]
            fn shape_ref(&self) -> ShapeRef<'_> {
                ShapeRef::Float(*self as f64)
            }

            #[inline]
            fn shape_mut(&mut self) -> ShapeMut<'_> {
                ShapeMut::Float(self)
            }

            impl_clone_shape!();
        }
    )*};
}

impl_shape_for_int!(i8, i16, i32, i64, isize);
impl_shape_for_uint!(u8, u16, u32, u64, usize);
impl_shape_for_float!(f32 => 32, f64 => 64);
