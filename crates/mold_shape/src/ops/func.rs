use crate::Shape;

/// A function pointer slot.
///
/// Functions are only copied between slots of the exact same type.
pub trait FuncSlot {
    /// Copies `value` into the slot if it has the slot's type.
    ///
    /// Returns `false` and leaves the slot untouched otherwise.
    fn set_from(&mut self, value: &dyn Shape) -> bool;
}
