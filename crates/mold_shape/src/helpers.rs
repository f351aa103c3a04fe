use alloc::string::{String, ToString};
use core::fmt::Write;

use crate::ops::Sequence;
use crate::{Shape, ShapeMut, ShapeRef};

// -----------------------------------------------------------------------------
// Zero and empty values

/// Returns `true` if `value` is the zero value of its type.
///
/// Records and arrays are zero when all their members are. Lists, maps and
/// text are zero when empty; optional and dynamic slots when they hold
/// nothing. Function slots are never zero.
pub fn is_zero_value(value: &dyn Shape) -> bool {
    match value.shape_ref() {
        ShapeRef::Bool(v) => !v,
        ShapeRef::Int(v) => v == 0,
        ShapeRef::Uint(v) => v == 0,
        ShapeRef::Float(v) => v == 0.0,
        ShapeRef::Str(v) => v.is_empty(),
        ShapeRef::Number(n) => n.as_str().is_empty(),
        ShapeRef::Record(record) => {
            (0..record.field_len()).all(|i| record.field(i).is_none_or(is_zero_value))
        }
        ShapeRef::Array(array) => all_items(array, is_zero_value),
        ShapeRef::List(list) => list.is_empty(),
        ShapeRef::Map(map) => map.is_empty(),
        ShapeRef::Optional(inner) | ShapeRef::Dynamic(inner) => inner.is_none(),
        ShapeRef::Func(_) | ShapeRef::Opaque => false,
    }
}

/// Returns `true` if `value` counts as empty for `omitempty`.
///
/// Unlike [`is_zero_value`], records are never empty and arrays are empty
/// only when their length is zero.
pub fn is_empty_value(value: &dyn Shape) -> bool {
    match value.shape_ref() {
        ShapeRef::Bool(v) => !v,
        ShapeRef::Int(v) => v == 0,
        ShapeRef::Uint(v) => v == 0,
        ShapeRef::Float(v) => v == 0.0,
        ShapeRef::Str(v) => v.is_empty(),
        ShapeRef::Number(n) => n.as_str().is_empty(),
        ShapeRef::Array(array) => array.is_empty(),
        ShapeRef::List(list) => list.is_empty(),
        ShapeRef::Map(map) => map.is_empty(),
        ShapeRef::Optional(inner) | ShapeRef::Dynamic(inner) => inner.is_none(),
        ShapeRef::Record(_) | ShapeRef::Func(_) | ShapeRef::Opaque => false,
    }
}

fn all_items(seq: &dyn Sequence, f: impl Fn(&dyn Shape) -> bool) -> bool {
    (0..seq.len()).all(|i| seq.get(i).is_none_or(&f))
}

// -----------------------------------------------------------------------------
// Structural equality

fn unwrap_dynamic(mut value: &dyn Shape) -> Option<&dyn Shape> {
    loop {
        match value.shape_ref() {
            ShapeRef::Dynamic(Some(inner)) => value = inner,
            ShapeRef::Dynamic(None) => return None,
            _ => return Some(value),
        }
    }
}

fn seq_eq(a: &dyn Sequence, b: &dyn Sequence) -> bool {
    a.len() == b.len()
        && (0..a.len()).all(|i| match (a.get(i), b.get(i)) {
            (Some(x), Some(y)) => deep_eq(x, y),
            (None, None) => true,
            _ => false,
        })
}

/// Compares two values structurally.
///
/// Dynamic slots are compared by what they hold. Otherwise both sides must
/// have the same type, and are then compared member by member. Function
/// slots never compare equal.
///
/// ```
/// use mold_shape::{Value, deep_eq};
///
/// assert!(deep_eq(&vec![1_i32, 2], &vec![1_i32, 2]));
/// assert!(deep_eq(&Value::Int(3), &3_i64));
/// assert!(!deep_eq(&3_i32, &3_i64));
/// ```
pub fn deep_eq(a: &dyn Shape, b: &dyn Shape) -> bool {
    let (a, b) = match (unwrap_dynamic(a), unwrap_dynamic(b)) {
        (Some(a), Some(b)) => (a, b),
        (None, None) => return true,
        _ => return false,
    };

    if a.ty_id() != b.ty_id() {
        return false;
    }

    match (a.shape_ref(), b.shape_ref()) {
        (ShapeRef::Bool(x), ShapeRef::Bool(y)) => x == y,
        (ShapeRef::Int(x), ShapeRef::Int(y)) => x == y,
        (ShapeRef::Uint(x), ShapeRef::Uint(y)) => x == y,
        (ShapeRef::Float(x), ShapeRef::Float(y)) => x == y,
        (ShapeRef::Str(x), ShapeRef::Str(y)) => x == y,
        (ShapeRef::Number(x), ShapeRef::Number(y)) => x == y,
        (ShapeRef::Record(x), ShapeRef::Record(y)) => {
            (0..x.field_len()).all(|i| match (x.field(i), y.field(i)) {
                (Some(p), Some(q)) => deep_eq(p, q),
                (None, None) => true,
                _ => false,
            })
        }
        (ShapeRef::Map(x), ShapeRef::Map(y)) => {
            x.len() == y.len()
                && x.iter()
                    .all(|(key, value)| y.get(key).is_some_and(|other| deep_eq(value, other)))
        }
        (ShapeRef::List(x), ShapeRef::List(y)) => seq_eq(x, y),
        (ShapeRef::Array(x), ShapeRef::Array(y)) => seq_eq(x, y),
        (ShapeRef::Optional(x), ShapeRef::Optional(y)) => match (x, y) {
            (Some(p), Some(q)) => deep_eq(p, q),
            (None, None) => true,
            _ => false,
        },
        _ => false,
    }
}

// -----------------------------------------------------------------------------
// Reset

/// Resets `value` to the zero value of its type.
///
/// Maps and lists are emptied, optional and dynamic slots cleared, records
/// and arrays reset member by member. Function slots and opaque values are
/// left alone.
pub fn zero_out(value: &mut dyn Shape) {
    match value.shape_mut() {
        ShapeMut::Bool(v) => *v = false,
        ShapeMut::Int(slot) => slot.set(0),
        ShapeMut::Uint(slot) => slot.set(0),
        ShapeMut::Float(slot) => slot.set(0.0),
        ShapeMut::Str(slot) => slot.set_text(""),
        ShapeMut::Record(record) => record.fields_mut().into_iter().for_each(zero_out),
        ShapeMut::Map(map) => map.clear(),
        ShapeMut::List(list) => list.truncate(0),
        ShapeMut::Array(array) => {
            for index in 0..array.len() {
                if let Some(item) = array.get_mut(index) {
                    zero_out(item);
                }
            }
        }
        ShapeMut::Optional(slot) => slot.clear(),
        ShapeMut::Dynamic(slot) => slot.clear(),
        ShapeMut::Func(_) | ShapeMut::Opaque => {}
    }
}

// -----------------------------------------------------------------------------
// Display

/// Renders a value the way it appears in key paths, e.g. `vbar[extra]`.
///
/// Scalars print plainly, empty slots as `<nil>`, sequences as `[a b]`,
/// records as `{a b}` and maps as `map[k:v]`.
pub fn display_key(value: &dyn Shape) -> String {
    match value.shape_ref() {
        ShapeRef::Str(v) => String::from(v),
        ShapeRef::Number(n) => String::from(n.as_str()),
        _ => {
            let mut out = String::new();
            write_key(&mut out, value);
            out
        }
    }
}

fn write_seq(out: &mut String, seq: &dyn Sequence) {
    out.push('[');
    for index in 0..seq.len() {
        if index != 0 {
            out.push(' ');
        }
        if let Some(item) = seq.get(index) {
            write_key(out, item);
        }
    }
    out.push(']');
}

fn write_key(out: &mut String, value: &dyn Shape) {
    match value.shape_ref() {
        ShapeRef::Bool(v) => out.push_str(if v { "true" } else { "false" }),
        ShapeRef::Int(v) => out.push_str(&v.to_string()),
        ShapeRef::Uint(v) => out.push_str(&v.to_string()),
        ShapeRef::Float(v) => {
            let _ = write!(out, "{v}");
        }
        ShapeRef::Str(v) => out.push_str(v),
        ShapeRef::Number(n) => out.push_str(n.as_str()),
        ShapeRef::Record(record) => {
            out.push('{');
            for index in 0..record.field_len() {
                if index != 0 {
                    out.push(' ');
                }
                if let Some(field) = record.field(index) {
                    write_key(out, field);
                }
            }
            out.push('}');
        }
        ShapeRef::Map(map) => {
            out.push_str("map[");
            for (index, (key, item)) in map.iter().enumerate() {
                if index != 0 {
                    out.push(' ');
                }
                write_key(out, key);
                out.push(':');
                write_key(out, item);
            }
            out.push(']');
        }
        ShapeRef::List(list) => write_seq(out, list),
        ShapeRef::Array(array) => write_seq(out, array),
        ShapeRef::Optional(Some(inner)) | ShapeRef::Dynamic(Some(inner)) => write_key(out, inner),
        ShapeRef::Optional(None) | ShapeRef::Dynamic(None) => out.push_str("<nil>"),
        ShapeRef::Func(_) | ShapeRef::Opaque => out.push_str(value.type_name()),
    }
}

#[cfg(test)]
mod tests {
    use super::{deep_eq, display_key, is_empty_value, is_zero_value, zero_out};
    use crate::{Value, ValueMap};
    use alloc::collections::BTreeMap;
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;

    #[test]
    fn zero_and_empty() {
        assert!(is_zero_value(&0_u32));
        assert!(is_zero_value(&[0_i8; 3]));
        assert!(!is_zero_value(&[0_i8, 1, 0]));
        assert!(is_zero_value(&None::<String>));
        assert!(is_zero_value(&Value::Null));
        assert!(!is_zero_value(&Value::Int(0)));

        assert!(is_empty_value(&String::new()));
        assert!(is_empty_value(&Vec::<u8>::new()));
        assert!(!is_empty_value(&[0_i8; 3]));
        assert!(!is_empty_value(&Some(0_i32)));
    }

    #[test]
    fn deep_eq_compares_types() {
        let mut a = BTreeMap::new();
        a.insert(String::from("k"), vec![1_u8, 2]);
        let b = a.clone();
        assert!(deep_eq(&a, &b));

        let mut c = a.clone();
        c.insert(String::from("k"), vec![1_u8]);
        assert!(!deep_eq(&a, &c));

        assert!(deep_eq(&Value::Null, &Value::Null));
        assert!(!deep_eq(&Value::Null, &Some(1_i32)));
        assert!(!deep_eq(&f64::NAN, &f64::NAN));
    }

    #[test]
    fn zero_out_resets() {
        let mut list = vec![1_i32, 2];
        zero_out(&mut list);
        assert!(list.is_empty());

        let mut array = [String::from("a"), String::from("b")];
        zero_out(&mut array);
        assert_eq!(array, [String::new(), String::new()]);

        let mut value = Value::from(3);
        zero_out(&mut value);
        assert!(value.is_null());
    }

    #[test]
    fn key_rendering() {
        assert_eq!(display_key(&String::from("extra")), "extra");
        assert_eq!(display_key(&3_i32), "3");
        assert_eq!(display_key(&1.5_f64), "1.5");
        assert_eq!(display_key(&Value::Bool(true)), "true");
        assert_eq!(display_key(&vec![1_u8, 2]), "[1 2]");
        assert_eq!(display_key(&None::<i32>), "<nil>");

        let map: ValueMap = [(String::from("a"), Value::from(1))].into_iter().collect();
        assert_eq!(display_key(&map), "map[a:1]");
    }
}
