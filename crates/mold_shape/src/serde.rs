//! Serialization of any [`Shape`] through `serde`.

use core::fmt;

use serde_core::ser::{Error, SerializeStruct};
use serde_core::{Serialize, Serializer};

use crate::{Shape, ShapeRef};

/// Serializes a borrowed [`Shape`] by walking its read view.
///
/// Records become structs with their declared field names, maps become
/// maps, lists and arrays become sequences, empty slots become `none`.
/// Numeric text is written as a number when it parses as one.
/// Function slots and opaque values cannot be serialized.
///
/// ```
/// use mold_shape::serde::ShapeSerializer;
///
/// let list = vec![1_u8, 2, 3];
/// let json = serde_json::to_string(&ShapeSerializer::new(&list)).unwrap();
/// assert_eq!(json, "[1,2,3]");
/// ```
#[derive(Clone, Copy)]
pub struct ShapeSerializer<'a> {
    value: &'a dyn Shape,
}

impl<'a> ShapeSerializer<'a> {
    #[inline]
    pub fn new(value: &'a dyn Shape) -> Self {
        Self { value }
    }
}

impl fmt::Debug for ShapeSerializer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ShapeSerializer").field(&self.value).finish()
    }
}

impl Serialize for ShapeSerializer<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.value.shape_ref() {
            ShapeRef::Bool(v) => serializer.serialize_bool(v),
            ShapeRef::Int(v) => serializer.serialize_i64(v),
            ShapeRef::Uint(v) => serializer.serialize_u64(v),
            ShapeRef::Float(v) => serializer.serialize_f64(v),
            ShapeRef::Str(v) => serializer.serialize_str(v),
            ShapeRef::Number(n) => {
                if let Ok(v) = n.as_i64() {
                    serializer.serialize_i64(v)
                } else if let Ok(v) = n.as_u64() {
                    serializer.serialize_u64(v)
                } else if let Ok(v) = n.as_f64() {
                    serializer.serialize_f64(v)
                } else {
                    serializer.serialize_str(n.as_str())
                }
            }
            ShapeRef::Record(record) => {
                let decls = record.field_decls();
                let mut state = serializer.serialize_struct(record.type_name(), decls.len())?;
                for (index, decl) in decls.iter().enumerate() {
                    if let Some(field) = record.field(index) {
                        state.serialize_field(decl.name(), &ShapeSerializer::new(field))?;
                    }
                }
                state.end()
            }
            ShapeRef::Map(map) => serializer.collect_map(
                map.iter()
                    .map(|(k, v)| (ShapeSerializer::new(k), ShapeSerializer::new(v))),
            ),
            ShapeRef::List(list) => serializer.collect_seq(
                (0..list.len())
                    .filter_map(|i| list.get(i))
                    .map(ShapeSerializer::new),
            ),
            ShapeRef::Array(array) => serializer.collect_seq(
                (0..array.len())
                    .filter_map(|i| array.get(i))
                    .map(ShapeSerializer::new),
            ),
            ShapeRef::Optional(None) | ShapeRef::Dynamic(None) => serializer.serialize_none(),
            ShapeRef::Optional(Some(inner)) => {
                serializer.serialize_some(&ShapeSerializer::new(inner))
            }
            ShapeRef::Dynamic(Some(inner)) => ShapeSerializer::new(inner).serialize(serializer),
            ShapeRef::Func(_) | ShapeRef::Opaque => Err(S::Error::custom(format_args!(
                "type `{}` cannot be serialized",
                self.value.type_name()
            ))),
        }
    }
}
