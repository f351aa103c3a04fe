use alloc::boxed::Box;

use crate::{Shape, ShapeError};

/// A key-value mapping.
///
/// Keys and values are created detached with [`Map::new_key`] and
/// [`Map::new_value`], written through their views, and then moved in with
/// [`Map::insert_boxed`].
pub trait Map: Shape {
    fn len(&self) -> usize;

    /// Looks up `key`. Keys of another type are never found.
    fn get(&self, key: &dyn Shape) -> Option<&dyn Shape>;

    /// Iterates the entries; ordered for sorted maps.
    fn iter(&self) -> Box<dyn Iterator<Item = (&dyn Shape, &dyn Shape)> + '_>;

    /// Creates a default value of the key type.
    fn new_key(&self) -> Box<dyn Shape>;

    /// Creates a default value of the value type.
    fn new_value(&self) -> Box<dyn Shape>;

    /// Inserts an entry, replacing the previous value of the key.
    fn insert_boxed(&mut self, key: Box<dyn Shape>, value: Box<dyn Shape>) -> Result<(), ShapeError>;

    /// Removes every entry.
    fn clear(&mut self);

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
