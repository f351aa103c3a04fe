use alloc::string::ToString;

use mold_shape::Shape;
use mold_shape::ops::{Dynamic, Optional};

use crate::{AssignError, Assigner, KeyPath};

impl Assigner<'_, '_> {
    /// Assigns into the content of an optional slot.
    ///
    /// An empty slot gets a detached default value that is only stored once
    /// the assignment succeeded. The key is recorded by the inner
    /// assignment.
    pub(crate) fn assign_optional(
        &mut self,
        slot: &mut dyn Optional,
        target_key: &KeyPath,
        source: &dyn Shape,
        source_key: &KeyPath,
    ) -> Result<(), AssignError> {
        if let Some(inner) = slot.get_mut() {
            return self.assign_value(inner, target_key, source, source_key);
        }

        let mut value = slot.new_value();
        self.assign_value(&mut *value, target_key, source, source_key)?;
        slot.set_boxed(value)
            .map_err(|err| AssignError::from_shape_error(target_key, err))
    }

    /// Assigns into a polymorphic slot.
    ///
    /// A filled slot is assigned through the value it holds, so a held
    /// record or mapping is merged. An empty slot takes a copy of the
    /// source if it accepts it.
    ///
    /// Returns whether the caller should record the key.
    pub(crate) fn assign_dynamic(
        &mut self,
        slot: &mut dyn Dynamic,
        target_key: &KeyPath,
        source: &dyn Shape,
        source_key: &KeyPath,
    ) -> Result<bool, AssignError> {
        if let Some(held) = slot.get_mut() {
            self.assign_value(held, target_key, source, source_key)?;
            return Ok(false);
        }

        if !slot.accepts(source) {
            return Err(AssignError::TypeMismatch {
                path: target_key.to_string(),
                expected: slot.type_name(),
                found: source.type_name(),
            });
        }
        slot.set_boxed(source.clone_shape())
            .map_err(|err| AssignError::from_shape_error(target_key, err))?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;

    use mold_shape::Value;
    use mold_shape::derive::Shape;

    use crate::{AssignConfig, AssignError};

    #[derive(Debug, Default, Clone, PartialEq, Shape)]
    struct Pair {
        a: i32,
        b: i32,
    }

    fn json(text: &str) -> Value {
        serde_json::from_str(text).unwrap()
    }

    #[test]
    fn optional_slots() {
        let mut target: Option<i32> = None;
        crate::assign(&mut target, &Value::from(5)).unwrap();
        assert_eq!(target, Some(5));

        // A failed assignment leaves an empty slot empty.
        let mut target: Option<i32> = None;
        assert!(crate::assign(&mut target, &Value::from("x")).is_err());
        assert_eq!(target, None);

        let mut target = Some(Pair { a: 1, b: 2 });
        crate::assign(&mut target, &json(r#"{"b":3}"#)).unwrap();
        assert_eq!(target, Some(Pair { a: 1, b: 3 }));
    }

    #[test]
    fn optional_null() {
        let mut target = Some(1_i32);
        crate::assign(&mut target, &Value::Null).unwrap();
        assert_eq!(target, Some(1));

        let config = AssignConfig::default().with_zero_fields(true);
        crate::Assigner::new(&config)
            .assign(&mut target, &Value::Null)
            .unwrap();
        assert_eq!(target, None);
    }

    #[test]
    fn dynamic_slots() {
        let source = Pair { a: 1, b: 2 };
        let mut target = Value::Null;
        crate::assign(&mut target, &source).unwrap();
        assert!(matches!(&target, Value::Boxed(boxed) if boxed.downcast_ref::<Pair>() == Some(&source)));

        let mut target = json(r#"{"a":1}"#);
        crate::assign(&mut target, &json(r#"{"b":2}"#)).unwrap();
        assert_eq!(target, json(r#"{"a":1,"b":2}"#));

        // A held record merges the mapping into its fields.
        let mut target = Value::Boxed(Box::new(Pair { a: 1, b: 2 }));
        crate::assign(&mut target, &json(r#"{"b":3}"#)).unwrap();
        assert!(matches!(&target, Value::Boxed(boxed) if boxed.downcast_ref::<Pair>() == Some(&Pair { a: 1, b: 3 })));

        // A held scalar keeps its type.
        let mut target = Value::from(1_i64);
        assert!(crate::assign(&mut target, &Value::from("x")).is_err());
        crate::assign(&mut target, &Value::from(2.5)).unwrap();
        assert_eq!(target, Value::Int(2));
    }

    #[test]
    fn function_slots() {
        fn one() -> i32 {
            1
        }
        fn two() -> i32 {
            2
        }
        fn name() -> &'static str {
            "name"
        }

        let mut slot: fn() -> i32 = one;
        crate::assign(&mut slot, &(two as fn() -> i32)).unwrap();
        assert_eq!(slot(), 2);

        let err = crate::assign(&mut slot, &(name as fn() -> &'static str)).unwrap_err();
        assert!(matches!(err, AssignError::TypeMismatch { .. }));
        assert_eq!(slot(), 2);
    }
}
