/// A signed integer of any width.
///
/// `set` truncates to the slot width, like an `as` cast.
pub trait IntSlot {
    /// Width in bits.
    fn bits(&self) -> u32;
    fn get(&self) -> i64;
    fn set(&mut self, value: i64);
}

/// An unsigned integer of any width.
///
/// `set` truncates to the slot width, like an `as` cast.
pub trait UintSlot {
    /// Width in bits.
    fn bits(&self) -> u32;
    fn get(&self) -> u64;
    fn set(&mut self, value: u64);
}

/// A 32 or 64 bit float.
pub trait FloatSlot {
    /// Width in bits.
    fn bits(&self) -> u32;
    fn get(&self) -> f64;
    fn set(&mut self, value: f64);
}

/// A text value.
pub trait TextSlot {
    fn as_str(&self) -> &str;
    fn set_text(&mut self, text: &str);
}
