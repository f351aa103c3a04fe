use alloc::string::String;

use mold_shape::{Shape, ShapeMut, ShapeRef, Value, deep_eq, zero_out};
use mold_utils::hash::HashSet;

use crate::{AssignConfig, AssignError, KeyPath, Metadata};

// -----------------------------------------------------------------------------
// Entry points

/// Assigns `source` to `target` with the default configuration.
///
/// ```
/// use mold_assign::assign;
/// use mold_shape::Value;
///
/// let mut port = 0_u16;
/// assign(&mut port, &Value::from(8080)).unwrap();
/// assert_eq!(port, 8080);
///
/// // Text is only converted with weak typing.
/// assert!(assign(&mut port, &Value::from("80")).is_err());
/// ```
pub fn assign(target: &mut dyn Shape, source: &dyn Shape) -> Result<(), AssignError> {
    let config = AssignConfig::default();
    Assigner::new(&config).assign(target, source)
}

/// Assigns `source` to `target` with a configuration adjusted by
/// `configure`.
///
/// `configure` receives a fresh copy of the default configuration.
///
/// ```
/// use mold_assign::assign_with;
/// use mold_shape::Value;
///
/// let mut port = 0_u16;
/// assign_with(&mut port, &Value::from("80"), |config| {
///     config.weakly_typed_input = true;
/// })
/// .unwrap();
/// assert_eq!(port, 80);
/// ```
pub fn assign_with(
    target: &mut dyn Shape,
    source: &dyn Shape,
    configure: impl FnOnce(&mut AssignConfig),
) -> Result<(), AssignError> {
    let mut config = AssignConfig::default();
    configure(&mut config);
    Assigner::new(&config).assign(target, source)
}

/// Converts a mapping key or a field name into a key of another type.
pub(crate) fn coerce_key(target: &mut dyn Shape, source: &dyn Shape) -> Result<(), AssignError> {
    static WEAK: AssignConfig = AssignConfig::WEAK;

    let root = KeyPath::root();
    Assigner::new(&WEAK).assign_value(target, &root, source, &root)
}

// -----------------------------------------------------------------------------
// Assigner

/// Assigns values under a fixed configuration, optionally reporting
/// [`Metadata`].
///
/// An assigner can be reused; metadata accumulates over calls.
///
/// ```
/// use mold_assign::{AssignConfig, Assigner, Metadata};
/// use mold_shape::{Value, ValueMap};
///
/// let mut target = ValueMap::new();
/// let source: Value = [("a", 1), ("b", 2)].into_iter().collect();
///
/// let config = AssignConfig::default().with_skip_keys(["b"]);
/// let mut metadata = Metadata::default();
/// Assigner::new(&config)
///     .with_metadata(&mut metadata)
///     .assign(&mut target, &source)
///     .unwrap();
///
/// assert_eq!(target.len(), 1);
/// assert_eq!(metadata.keys, ["a"]);
/// assert_eq!(metadata.unused, ["b"]);
/// ```
pub struct Assigner<'c, 'm> {
    pub(crate) config: &'c AssignConfig,
    skip_keys: HashSet<&'c str>,
    metadata: Option<&'m mut Metadata>,
}

impl<'c, 'm> Assigner<'c, 'm> {
    pub fn new(config: &'c AssignConfig) -> Self {
        Self {
            config,
            skip_keys: config.skip_keys.iter().map(String::as_str).collect(),
            metadata: None,
        }
    }

    /// Reports what the following assignments do into `metadata`.
    #[inline]
    pub fn with_metadata(mut self, metadata: &'m mut Metadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    #[inline]
    pub fn config(&self) -> &'c AssignConfig {
        self.config
    }

    /// Assigns `source` to `target`.
    ///
    /// Fails with [`AssignError::InvalidTarget`] when `target` cannot be
    /// written through its shape, e.g. a `&'static str`.
    pub fn assign(&mut self, target: &mut dyn Shape, source: &dyn Shape) -> Result<(), AssignError> {
        if matches!(target.shape_mut(), ShapeMut::Opaque) {
            return Err(AssignError::InvalidTarget(target.type_name()));
        }

        let root = KeyPath::root();
        self.assign_value(target, &root, source, &root)
    }

    /// The recursive step: every child of a container goes through here.
    pub(crate) fn assign_value(
        &mut self,
        target: &mut dyn Shape,
        target_key: &KeyPath,
        source: &dyn Shape,
        source_key: &KeyPath,
    ) -> Result<(), AssignError> {
        if self.skip_key(target_key, source_key) {
            return Ok(());
        }

        let Some(source) = present(source) else {
            self.assign_absent(target, target_key);
            return Ok(());
        };

        let hooked: Value;
        let source = match self.config.decode_hook {
            Some(hook) => match hook(source.kind(), target.kind(), source) {
                Ok(None) => source,
                Ok(Some(value)) => {
                    hooked = value;
                    let Some(source) = present(&hooked) else {
                        self.assign_absent(target, target_key);
                        return Ok(());
                    };
                    source
                }
                Err(message) => {
                    return Err(AssignError::Hook {
                        path: String::from(target_key.as_str()),
                        message,
                    });
                }
            },
            None => source,
        };

        if self.config.skip_same_values && deep_eq(target, source) {
            log::trace!("`{target_key}` already holds the value of `{source_key}`");
            self.add_unused(source_key);
            self.add_unset(target_key);
            return Ok(());
        }

        log::trace!(
            "assign `{target_key}` ({}) from `{source_key}` ({})",
            target.type_name(),
            source.type_name(),
        );

        if self.dispatch(target, target_key, source, source_key)? {
            self.add_key(target_key);
        }
        Ok(())
    }

    /// Routes by the shape of the target.
    ///
    /// Returns whether the caller should record `target_key`; handlers that
    /// recurse into the same path record it themselves.
    fn dispatch(
        &mut self,
        target: &mut dyn Shape,
        target_key: &KeyPath,
        source: &dyn Shape,
        source_key: &KeyPath,
    ) -> Result<bool, AssignError> {
        let expected = target.type_name();

        match target.shape_mut() {
            ShapeMut::Bool(slot) => self.assign_bool(slot, expected, target_key, source, source_key)?,
            ShapeMut::Int(slot) => self.assign_int(slot, expected, target_key, source)?,
            ShapeMut::Uint(slot) => self.assign_uint(slot, expected, target_key, source)?,
            ShapeMut::Float(slot) => self.assign_float(slot, expected, target_key, source)?,
            ShapeMut::Str(slot) => self.assign_text(slot, expected, target_key, source)?,
            ShapeMut::Record(record) => self.assign_record(record, target_key, source, source_key)?,
            ShapeMut::Map(map) => self.assign_map(map, target_key, source, source_key)?,
            ShapeMut::List(list) => self.assign_list(list, target_key, source, source_key)?,
            ShapeMut::Array(array) => self.assign_array(array, target_key, source, source_key)?,
            ShapeMut::Optional(slot) => {
                self.assign_optional(slot, target_key, source, source_key)?;
                return Ok(false);
            }
            ShapeMut::Dynamic(slot) => {
                return self.assign_dynamic(slot, target_key, source, source_key);
            }
            ShapeMut::Func(slot) => {
                if !slot.set_from(source) {
                    return Err(AssignError::TypeMismatch {
                        path: String::from(target_key.as_str()),
                        expected,
                        found: source.type_name(),
                    });
                }
            }
            ShapeMut::Opaque => {
                return Err(AssignError::UnsupportedType {
                    path: String::from(target_key.as_str()),
                    type_name: expected,
                });
            }
        }
        Ok(true)
    }

    /// An absent source leaves the target alone, unless zero fields are
    /// enabled.
    fn assign_absent(&mut self, target: &mut dyn Shape, target_key: &KeyPath) {
        if !self.config.zero_fields {
            return;
        }

        log::trace!("zero `{target_key}`");
        if let ShapeMut::Optional(slot) = target.shape_mut() {
            slot.clear();
            return;
        }
        zero_out(target);
        self.add_key(target_key);
    }

    // -------------------------------------------------------------------------
    // Skip keys and metadata

    /// Returns `true` if either path is configured to be skipped, and
    /// records both as untouched.
    pub(crate) fn skip_key(&mut self, target_key: &KeyPath, source_key: &KeyPath) -> bool {
        if target_key.is_root() || source_key.is_root() {
            return false;
        }
        if !self.skip_keys.contains(target_key.as_str()) && !self.skip_keys.contains(source_key.as_str()) {
            return false;
        }

        log::trace!("skip `{target_key}` from `{source_key}`");
        self.add_unused(source_key);
        self.add_unset(target_key);
        true
    }

    pub(crate) fn add_key(&mut self, target_key: &KeyPath) {
        if let Some(metadata) = self.metadata.as_deref_mut()
            && !target_key.is_root()
        {
            metadata.keys.push(String::from(target_key.as_str()));
        }
    }

    pub(crate) fn add_unused(&mut self, source_key: &KeyPath) {
        if let Some(metadata) = self.metadata.as_deref_mut()
            && !source_key.is_root()
        {
            metadata.unused.push(String::from(source_key.as_str()));
        }
    }

    pub(crate) fn add_unset(&mut self, target_key: &KeyPath) {
        if let Some(metadata) = self.metadata.as_deref_mut()
            && !target_key.is_root()
        {
            metadata.unset.push(String::from(target_key.as_str()));
        }
    }
}

/// Unwraps filled optional and dynamic slots; empty ones are absent.
pub(crate) fn present(mut source: &dyn Shape) -> Option<&dyn Shape> {
    loop {
        match source.shape_ref() {
            ShapeRef::Optional(Some(inner)) | ShapeRef::Dynamic(Some(inner)) => source = inner,
            ShapeRef::Optional(None) | ShapeRef::Dynamic(None) => return None,
            _ => return Some(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;

    use mold_shape::derive::Shape;
    use mold_shape::{ShapeKind, Value};

    use super::{Assigner, assign};
    use crate::{AssignConfig, AssignError, Metadata};

    #[derive(Debug, Default, Clone, PartialEq, Shape)]
    struct Pair {
        a: i32,
        b: i32,
    }

    #[derive(Debug, Default, Clone, PartialEq, Shape)]
    struct Slots {
        opt: Option<i32>,
        list: Vec<String>,
    }

    fn json(text: &str) -> Value {
        serde_json::from_str(text).unwrap()
    }

    #[test]
    fn unwritable_targets() {
        let mut text: &'static str = "x";
        assert_eq!(
            assign(&mut text, &Value::from("y")),
            Err(AssignError::InvalidTarget("&str"))
        );

        let mut texts: Vec<&'static str> = Vec::new();
        let err = assign(&mut texts, &json(r#"["a"]"#)).unwrap_err();
        assert_eq!(err.messages(), ["0: unsupported type: &str"]);
    }

    #[test]
    fn skip_same_values() {
        let mut target = Pair { a: 1, b: 2 };
        let source = Pair { a: 1, b: 3 };
        let mut metadata = Metadata::default();

        let config = AssignConfig::default().with_skip_same_values(true);
        Assigner::new(&config)
            .with_metadata(&mut metadata)
            .assign(&mut target, &source)
            .unwrap();

        assert_eq!(target, source);
        assert_eq!(metadata.keys, ["b"]);
        assert_eq!(metadata.unused, ["a"]);
        assert_eq!(metadata.unset, ["a"]);
    }

    #[test]
    fn zero_fields() {
        let source = json(r#"{"opt":null,"list":null}"#);
        let mut target = Slots {
            opt: Some(1),
            list: vec![String::from("x")],
        };
        let mut metadata = Metadata::default();

        let config = AssignConfig::default().with_zero_fields(true);
        Assigner::new(&config)
            .with_metadata(&mut metadata)
            .assign(&mut target, &source)
            .unwrap();

        assert_eq!(target, Slots::default());
        assert_eq!(metadata.keys, ["list"]);
    }

    #[test]
    fn metadata_accumulates() {
        let config = AssignConfig::default();
        let mut metadata = Metadata::default();
        let mut first = Pair::default();
        let mut second = Pair::default();
        {
            let mut assigner = Assigner::new(&config).with_metadata(&mut metadata);
            assigner.assign(&mut first, &json(r#"{"a":1}"#)).unwrap();
            assigner.assign(&mut second, &json(r#"{"b":2,"c":3}"#)).unwrap();
        }

        assert_eq!(first, Pair { a: 1, b: 0 });
        assert_eq!(second, Pair { a: 0, b: 2 });
        assert_eq!(metadata.keys, ["a", "b"]);
        assert_eq!(metadata.unused, ["c"]);
        assert_eq!(metadata.unset, ["b", "a"]);
    }

    fn text_to_five(from: ShapeKind, to: ShapeKind, _: &dyn mold_shape::Shape) -> Result<Option<Value>, String> {
        if from == ShapeKind::Str && to != ShapeKind::Str {
            return Ok(Some(Value::from(5)));
        }
        Ok(None)
    }

    fn reject_negative(_: ShapeKind, _: ShapeKind, source: &dyn mold_shape::Shape) -> Result<Option<Value>, String> {
        if source.downcast_ref::<i64>().is_some_and(|value| *value < 0) {
            return Err(String::from("negative values are not allowed"));
        }
        if source.downcast_ref::<String>().is_some_and(String::is_empty) {
            return Ok(Some(Value::Null));
        }
        Ok(None)
    }

    #[test]
    fn decode_hook_rewrites_sources() {
        let config = AssignConfig::default().with_decode_hook(text_to_five);
        let mut target = Pair::default();
        Assigner::new(&config)
            .assign(&mut target, &json(r#"{"a":"WHAT","b":7}"#))
            .unwrap();
        assert_eq!(target, Pair { a: 5, b: 7 });

        let mut slots = Slots::default();
        Assigner::new(&config)
            .assign(&mut slots, &json(r#"{"opt":"x","list":["y"]}"#))
            .unwrap();
        assert_eq!(slots.opt, Some(5));
        assert_eq!(slots.list, ["y"]);
    }

    #[test]
    fn decode_hook_errors_and_nulls() {
        let config = AssignConfig::default().with_decode_hook(reject_negative);
        let mut target = Pair { a: 1, b: 2 };
        let mut metadata = Metadata::default();
        let err = Assigner::new(&config)
            .with_metadata(&mut metadata)
            .assign(&mut target, &json(r#"{"a":-3,"b":""}"#))
            .unwrap_err();

        assert_eq!(err.messages(), ["error decoding 'a': negative values are not allowed"]);
        assert_eq!(target, Pair { a: 1, b: 2 });
        assert!(metadata.keys.is_empty());
    }

    #[test]
    fn weak_and_strict_differ() {
        let source = json(r#"{"a":"4","b":true}"#);

        let mut target = Pair::default();
        let err = assign(&mut target, &source).unwrap_err();
        assert_eq!(err.messages().len(), 2);

        let mut target = Pair::default();
        super::assign_with(&mut target, &source, |config| config.weakly_typed_input = true).unwrap();
        assert_eq!(target, Pair { a: 4, b: 1 });
    }
}
