use crate::ops::FuncSlot;
use crate::{Shape, ShapeMut, ShapeRef};

macro_rules! impl_shape_for_fn {
    ($($arg:ident),*) => {
        impl<R: 'static $(, $arg: 'static)*> Shape for fn($($arg),*) -> R {
            #[inline]
            fn shape_ref(&self) -> ShapeRef<'_> {
                ShapeRef::Func(self)
            }

            #[inline]
            fn shape_mut(&mut self) -> ShapeMut<'_> {
                ShapeMut::Func(self)
            }

            #[inline]
            fn clone_shape(&self) -> ::alloc::boxed::Box<dyn Shape> {
                ::alloc::boxed::Box::new(*self)
            }
        }

        impl<R: 'static $(, $arg: 'static)*> FuncSlot for fn($($arg),*) -> R {
            fn set_from(&mut self, value: &dyn Shape) -> bool {
                match value.downcast_ref::<Self>() {
                    Some(func) => {
                        *self = *func;
                        true
                    }
                    None => false,
                }
            }
        }
    };
}

impl_shape_for_fn!();
impl_shape_for_fn!(A0);
impl_shape_for_fn!(A0, A1);
impl_shape_for_fn!(A0, A1, A2);

#[cfg(test)]
mod tests {
    use crate::{Shape, ShapeMut};

    fn one() -> i32 {
        1
    }

    fn two() -> i32 {
        2
    }

    fn text() -> &'static str {
        "x"
    }

    #[test]
    fn copies_same_type_only() {
        let mut slot: fn() -> i32 = one;
        let source: fn() -> i32 = two;
        let other: fn() -> &'static str = text;

        let ShapeMut::Func(func) = slot.shape_mut() else {
            panic!("expected a function slot");
        };
        assert!(!func.set_from(&other));
        assert!(func.set_from(&source));
        assert_eq!(slot(), 2);
    }
}
