use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use core::hash::{BuildHasher, Hash};

use crate::impls::impl_clone_shape;
use crate::ops::Map;
use crate::{Shape, ShapeError, ShapeMut, ShapeRef};

macro_rules! impl_shape_for_map {
    ($ty:ty, [$($generics:tt)*], [$($bounds:tt)*] $(,)?) => {
        impl<$($generics)*> Shape for $ty
        where
            $($bounds)*
        {
            #[inline]
            fn shape_ref(&self) -> ShapeRef<'_> {
                ShapeRef::Map(self)
            }

            #[inline]
            fn shape_mut(&mut self) -> ShapeMut<'_> {
                ShapeMut::Map(self)
            }

            impl_clone_shape!();
        }

        impl<$($generics)*> Map for $ty
        where
            $($bounds)*
        {
            #[inline]
            fn len(&self) -> usize {
                Self::len(self)
            }

            fn get(&self, key: &dyn Shape) -> Option<&dyn Shape> {
                key.downcast_ref::<K>()
                    .and_then(|key| Self::get(self, key))
                    .map(|value| value as &dyn Shape)
            }

            fn iter(&self) -> Box<dyn Iterator<Item = (&dyn Shape, &dyn Shape)> + '_> {
                Box::new(Self::iter(self).map(|(k, v)| (k as &dyn Shape, v as &dyn Shape)))
            }

            fn new_key(&self) -> Box<dyn Shape> {
                Box::new(K::default())
            }

            fn new_value(&self) -> Box<dyn Shape> {
                Box::new(V::default())
            }

            fn insert_boxed(
                &mut self,
                key: Box<dyn Shape>,
                value: Box<dyn Shape>,
            ) -> Result<(), ShapeError> {
                let key = key
                    .take::<K>()
                    .map_err(|key| ShapeError::mismatch::<K>(&*key))?;
                let value = value
                    .take::<V>()
                    .map_err(|value| ShapeError::mismatch::<V>(&*value))?;
                Self::insert(self, key, value);
                Ok(())
            }

            #[inline]
            fn clear(&mut self) {
                Self::clear(self);
            }
        }
    };
}

impl_shape_for_map!(
    BTreeMap<K, V>,
    [K, V],
    [K: Shape + Ord + Default + Clone, V: Shape + Default + Clone],
);

impl_shape_for_map!(
    mold_utils::hash::hashbrown::HashMap<K, V, S>,
    [K, V, S],
    [
        K: Shape + Eq + Hash + Default + Clone,
        V: Shape + Default + Clone,
        S: BuildHasher + Default + Clone + Send + Sync + 'static,
    ],
);

#[cfg(feature = "std")]
impl_shape_for_map!(
    std::collections::HashMap<K, V, S>,
    [K, V, S],
    [
        K: Shape + Eq + Hash + Default + Clone,
        V: Shape + Default + Clone,
        S: BuildHasher + Default + Clone + Send + Sync + 'static,
    ],
);

#[cfg(test)]
mod tests {
    use crate::ops::Map;
    use alloc::boxed::Box;
    use alloc::collections::BTreeMap;
    use alloc::string::String;
    use mold_utils::hash::HashMap;

    #[test]
    fn insert_and_get() {
        let mut map: BTreeMap<String, i32> = BTreeMap::new();
        Map::insert_boxed(&mut map, Box::new(String::from("a")), Box::new(1_i32)).unwrap();
        assert!(Map::insert_boxed(&mut map, Box::new(1_u8), Box::new(1_i32)).is_err());

        let key = String::from("a");
        let value = Map::get(&map, &key).unwrap();
        assert_eq!(value.downcast_ref::<i32>(), Some(&1));
        assert!(Map::get(&map, &1_u8).is_none());
    }

    #[test]
    fn fixed_state_map() {
        let mut map: HashMap<u32, String> = HashMap::default();
        Map::insert_boxed(&mut map, Box::new(7_u32), Box::new(String::from("x"))).unwrap();
        assert_eq!(Map::len(&map), 1);
        assert_eq!(Map::iter(&map).count(), 1);
        Map::clear(&mut map);
        assert!(Map::is_empty(&map));
    }
}
