use alloc::boxed::Box;
use alloc::string::ToString;

use mold_shape::ops::{Map, Record};
use mold_shape::{Shape, ShapeKind, ShapeMut, ShapeRef, ValueMap, display_key};

use crate::assigner::{coerce_key, present};
use crate::seq::Items;
use crate::{AssignError, Assigner, ErrorList, KeyPath};

impl Assigner<'_, '_> {
    pub(crate) fn assign_map(
        &mut self,
        target: &mut dyn Map,
        target_key: &KeyPath,
        source: &dyn Shape,
        source_key: &KeyPath,
    ) -> Result<(), AssignError> {
        let weak = self.config.weakly_typed_input;

        match source.shape_ref() {
            ShapeRef::Map(map) => self.map_from_map(target, target_key, map, source_key),
            ShapeRef::Record(record) => self.map_from_record(target, target_key, record, source_key),
            ShapeRef::List(list) if weak => self.map_from_items(target, target_key, Items::Seq(list), source_key),
            ShapeRef::Array(array) if weak => self.map_from_items(target, target_key, Items::Seq(array), source_key),
            other => Err(AssignError::ExpectedMap {
                path: target_key.to_string(),
                found: other.kind(),
            }),
        }
    }

    /// Merges `source` into `target`. An empty source empties the target.
    fn map_from_map(
        &mut self,
        target: &mut dyn Map,
        target_key: &KeyPath,
        source: &dyn Map,
        source_key: &KeyPath,
    ) -> Result<(), AssignError> {
        if source.is_empty() {
            target.clear();
            return Ok(());
        }

        let mut errors = ErrorList::new();
        for (key, value) in source.iter() {
            let name = display_key(key);
            let entry_key = target_key.entry(&name);
            let value_key = source_key.entry(&name);
            if self.skip_key(&entry_key, &value_key) {
                continue;
            }

            let mut new_key = target.new_key();
            if let Err(err) = coerce_key(&mut *new_key, key) {
                errors.push(err);
                continue;
            }

            let mut element = target.new_value();
            if let Err(err) = self.assign_value(&mut *element, &entry_key, value, &value_key) {
                errors.push(err);
                continue;
            }

            if let Err(err) = target.insert_boxed(new_key, element) {
                errors.push(AssignError::from_shape_error(&entry_key, err));
            }
        }

        if !errors.is_empty() {
            log::debug!("{} error(s) assigning map `{target_key}`", errors.len());
        }
        errors.into_result()
    }

    /// Writes one entry per flattened field of `source`.
    ///
    /// Nested records become nested [`ValueMap`]s in dynamic values; mapping
    /// and record values are assigned recursively.
    pub(crate) fn map_from_record(
        &mut self,
        target: &mut dyn Map,
        target_key: &KeyPath,
        source: &dyn Record,
        source_key: &KeyPath,
    ) -> Result<(), AssignError> {
        let mut errors = ErrorList::new();

        for field in self.flatten_ref(source).into_fields() {
            let entry_key = target_key.entry(&field.external);
            let field_key = source_key.field(field.name);

            if self.skip_key(&entry_key, &field_key) {
                continue;
            }

            let mut key = target.new_key();
            if let Err(err) = coerce_key(&mut *key, &field.external) {
                errors.push(err);
                continue;
            }

            let mut element = target.new_value();
            let nested = match present(field.slot).map(|value| value.shape_ref()) {
                Some(ShapeRef::Record(nested)) => Some(nested),
                _ => None,
            };

            let written = match nested {
                Some(nested) => match element.kind() {
                    ShapeKind::Dynamic => self.nested_value_map(&mut *element, &entry_key, nested, &field_key),
                    ShapeKind::Map | ShapeKind::Record | ShapeKind::Optional => {
                        self.assign_value(&mut *element, &entry_key, field.slot, &field_key)
                    }
                    _ => {
                        log::warn!(
                            "record field `{field_key}` cannot be stored in `{}`",
                            element.type_name()
                        );
                        self.add_unused(&field_key);
                        continue;
                    }
                },
                None => self.assign_value(&mut *element, &entry_key, field.slot, &field_key),
            };
            if let Err(err) = written {
                errors.push(err);
                continue;
            }

            if let Err(err) = target.insert_boxed(key, element) {
                errors.push(AssignError::from_shape_error(&entry_key, err));
            }
        }

        if !errors.is_empty() {
            log::debug!("{} error(s) assigning map `{target_key}`", errors.len());
        }
        errors.into_result()
    }

    /// Stores a nested record as a [`ValueMap`] in a dynamic slot.
    fn nested_value_map(
        &mut self,
        element: &mut dyn Shape,
        entry_key: &KeyPath,
        nested: &dyn Record,
        field_key: &KeyPath,
    ) -> Result<(), AssignError> {
        let mut map = ValueMap::new();
        self.map_from_record(&mut map, entry_key, nested, field_key)?;

        if let ShapeMut::Dynamic(slot) = element.shape_mut() {
            if !slot.accepts(&map) {
                return Err(AssignError::TypeMismatch {
                    path: entry_key.to_string(),
                    expected: slot.type_name(),
                    found: core::any::type_name::<ValueMap>(),
                });
            }
            slot.set_boxed(Box::new(map))
                .map_err(|err| AssignError::from_shape_error(entry_key, err))?;
        }
        self.add_key(entry_key);
        Ok(())
    }

    /// Assigns every item to the whole target, folding a list of partial
    /// mappings into one.
    pub(crate) fn map_from_items(
        &mut self,
        target: &mut dyn Map,
        target_key: &KeyPath,
        items: Items<'_>,
        source_key: &KeyPath,
    ) -> Result<(), AssignError> {
        if items.is_empty() {
            target.clear();
            return Ok(());
        }

        let target: &mut dyn Shape = target;
        for index in 0..items.len() {
            if let Some(item) = items.get(index) {
                self.assign_value(target, target_key, item, &source_key.index(index))?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use alloc::collections::BTreeMap;
    use alloc::string::String;
    use alloc::vec::Vec;

    use mold_shape::derive::Shape;
    use mold_shape::{Value, ValueMap};

    use crate::{AssignConfig, AssignError, Assigner, Metadata};

    #[derive(Debug, Default, Clone, Shape)]
    struct Inner {
        vstring: String,
    }

    #[derive(Debug, Default, Clone, Shape)]
    struct Source {
        name: String,
        #[shape(json = ",omitempty")]
        note: String,
        nested: Inner,
    }

    fn json(text: &str) -> Value {
        serde_json::from_str(text).unwrap()
    }

    fn map_of(entries: &[(&str, u64)]) -> ValueMap {
        entries
            .iter()
            .map(|&(key, value)| (String::from(key), Value::from(value)))
            .collect()
    }

    #[test]
    fn merges_entries() {
        let mut target = map_of(&[("a", 1), ("b", 2)]);
        crate::assign(&mut target, &json(r#"{"b":3,"c":4}"#)).unwrap();
        assert_eq!(target, map_of(&[("a", 1), ("b", 3), ("c", 4)]));
    }

    #[test]
    fn empty_source_empties() {
        let mut target = map_of(&[("a", 1)]);
        crate::assign(&mut target, &json("{}")).unwrap();
        assert!(target.is_empty());

        let mut target = map_of(&[("a", 1)]);
        crate::assign(&mut target, &Value::Null).unwrap();
        assert_eq!(target.len(), 1);
    }

    #[test]
    fn converts_keys() {
        let mut target: BTreeMap<u8, String> = BTreeMap::new();
        crate::assign(&mut target, &json(r#"{"1":"one","2":"two"}"#)).unwrap();
        assert_eq!(target.get(&1).map(String::as_str), Some("one"));
        assert_eq!(target.get(&2).map(String::as_str), Some("two"));

        let mut target: BTreeMap<u8, String> = BTreeMap::new();
        let err = crate::assign(&mut target, &json(r#"{"x":"bad","3":"ok"}"#)).unwrap_err();
        let messages = err.messages();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].contains("\"x\""));
        assert_eq!(target.len(), 1);
        assert_eq!(target.get(&3).map(String::as_str), Some("ok"));
    }

    #[test]
    fn entry_errors_name_the_key() {
        let mut target: BTreeMap<String, i32> = BTreeMap::new();
        let err = crate::assign(&mut target, &json(r#"{"a":"x","b":2}"#)).unwrap_err();

        let messages = err.messages();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].starts_with("'a' expected type 'i32'"));
        assert_eq!(target.get("b"), Some(&2));
        assert!(!target.contains_key("a"));
    }

    #[test]
    fn from_record() {
        let source = Source {
            name: String::from("n"),
            note: String::new(),
            nested: Inner {
                vstring: String::from("v"),
            },
        };
        let mut target = ValueMap::new();
        let mut metadata = Metadata::default();

        let config = AssignConfig::default();
        Assigner::new(&config)
            .with_metadata(&mut metadata)
            .assign(&mut target, &source)
            .unwrap();

        // Empty `omitempty` fields are left out.
        assert_eq!(target.len(), 2);
        assert_eq!(target.get("name"), Some(&Value::from("n")));
        let nested = target.get("nested").and_then(Value::as_map).unwrap();
        assert_eq!(nested.get("vstring"), Some(&Value::from("v")));

        assert!(metadata.unused.is_empty());
        let mut keys = metadata.keys;
        keys.sort();
        assert_eq!(keys, ["name", "nested", "nested[vstring]"]);
    }

    #[test]
    fn from_record_into_typed_maps() {
        let source = Source {
            name: String::from("n"),
            ..Source::default()
        };

        // Nested records cannot be stored as text.
        let mut texts: BTreeMap<String, String> = BTreeMap::new();
        let mut metadata = Metadata::default();
        let config = AssignConfig::default();
        Assigner::new(&config)
            .with_metadata(&mut metadata)
            .assign(&mut texts, &source)
            .unwrap();
        assert_eq!(texts.len(), 1);
        assert_eq!(metadata.unused, ["nested"]);

        let mut nested: BTreeMap<String, BTreeMap<String, String>> = BTreeMap::new();
        let err = crate::assign(&mut nested, &source).unwrap_err();
        assert!(matches!(
            err.messages().as_slice(),
            [message] if message.starts_with("'name' expected a map")
        ));
        assert_eq!(nested.get("nested").map(BTreeMap::len), Some(1));
    }

    #[test]
    fn folds_sequences_of_maps() {
        let source = json(r#"[{"a":1},{"b":2},{"a":3}]"#);

        let mut target = ValueMap::new();
        let config = AssignConfig::default().with_weakly_typed_input(true);
        Assigner::new(&config).assign(&mut target, &source).unwrap();
        assert_eq!(target, map_of(&[("a", 3), ("b", 2)]));

        let mut target = ValueMap::new();
        let err = crate::assign(&mut target, &source).unwrap_err();
        assert!(matches!(err, AssignError::ExpectedMap { .. }));

        let mut target = map_of(&[("a", 1)]);
        Assigner::new(&config)
            .assign(&mut target, &Value::from(Vec::<Value>::new()))
            .unwrap();
        assert!(target.is_empty());
    }
}
