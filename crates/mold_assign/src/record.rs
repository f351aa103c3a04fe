use alloc::collections::VecDeque;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use mold_shape::ops::{FieldDecl, Map, Record};
use mold_shape::{Shape, ShapeKind, ShapeMut, ShapeRef, display_key, is_zero_value};
use mold_utils::hash::{HashMap, HashSet};

use crate::assigner::coerce_key;
use crate::{AssignError, Assigner, ErrorList, KeyPath};

// -----------------------------------------------------------------------------
// Flattening

/// One field of a flattened record.
pub(crate) struct FieldInfo<S> {
    /// The declared name.
    pub name: &'static str,
    /// The name looked up in mappings.
    pub external: String,
    pub slot: S,
}

/// The fields of a record and of the records it embeds, by declared name.
///
/// The first field seen under a name wins: outer fields shadow embedded
/// ones, earlier declarations shadow later ones.
pub(crate) struct Flattened<S> {
    fields: Vec<Option<FieldInfo<S>>>,
    index: HashMap<&'static str, usize>,
}

impl<S> Flattened<S> {
    fn new() -> Self {
        Self {
            fields: Vec::new(),
            index: HashMap::default(),
        }
    }

    fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    fn push(&mut self, field: FieldInfo<S>) {
        self.index.insert(field.name, self.fields.len());
        self.fields.push(Some(field));
    }

    /// Removes the field `name`.
    pub fn take(&mut self, name: &str) -> Option<FieldInfo<S>> {
        let index = *self.index.get(name)?;
        self.fields[index].take()
    }

    /// The remaining fields, in the order they were found.
    pub fn into_fields(self) -> impl Iterator<Item = FieldInfo<S>> {
        self.fields.into_iter().flatten()
    }
}

/// The external name and options of a field, `None` if it is skipped.
struct Tag {
    external: String,
    omitempty: bool,
}

enum Embedded {
    Record,
    OptionalRecord,
    Plain,
}

fn embedded_kind(field: &mut dyn Shape) -> Embedded {
    match field.shape_mut() {
        ShapeMut::Record(_) => Embedded::Record,
        ShapeMut::Optional(slot) => {
            let kind = match slot.get() {
                Some(inner) => inner.kind(),
                None => slot.new_value().kind(),
            };
            if kind == ShapeKind::Record {
                Embedded::OptionalRecord
            } else {
                Embedded::Plain
            }
        }
        _ => Embedded::Plain,
    }
}

impl Assigner<'_, '_> {
    /// Reads the external name and options from the configured tag.
    ///
    /// The tag text is `name[,option...]`. An empty name is derived with the
    /// converter, `-` skips the field unless ignored fields are included.
    /// Untagged fields are skipped when so configured, embedded ones never.
    fn parse_tag(&self, decl: &FieldDecl) -> Option<Tag> {
        let text = decl.tag(&self.config.tag_name);
        if text.is_none() && self.config.ignore_untagged_fields && !decl.is_embedded() {
            return None;
        }
        let mut pieces = text.unwrap_or_default().split(',');

        let external = match pieces.next().unwrap_or_default() {
            "" => (self.config.converter)(decl.name()),
            "-" if self.config.include_ignore_fields => (self.config.converter)(decl.name()),
            "-" => return None,
            name => String::from(name),
        };
        let omitempty = pieces.any(|piece| piece == "omitempty");

        Some(Tag { external, omitempty })
    }

    /// Flattens a target record. Empty embedded optional records are
    /// filled with their default so their fields can be written.
    pub(crate) fn flatten_mut<'a>(&self, root: &'a mut dyn Record) -> Flattened<&'a mut dyn Shape> {
        let mut flat = Flattened::new();
        let mut queue: VecDeque<&'a mut dyn Record> = VecDeque::new();
        queue.push_back(root);

        while let Some(record) = queue.pop_front() {
            let decls = record.field_decls();
            for (decl, field) in decls.iter().zip(record.fields_mut()) {
                let Some(tag) = self.parse_tag(decl) else {
                    continue;
                };
                if tag.omitempty && is_zero_value(field) {
                    continue;
                }

                if decl.is_embedded() {
                    match embedded_kind(field) {
                        Embedded::Record => {
                            if let ShapeMut::Record(inner) = field.shape_mut() {
                                queue.push_back(inner);
                            }
                            continue;
                        }
                        Embedded::OptionalRecord => {
                            if let ShapeMut::Optional(slot) = field.shape_mut()
                                && let ShapeMut::Record(inner) = slot.get_or_insert_default().shape_mut()
                            {
                                queue.push_back(inner);
                            }
                            continue;
                        }
                        Embedded::Plain => {}
                    }
                }

                if flat.contains(decl.name()) {
                    continue;
                }
                flat.push(FieldInfo {
                    name: decl.name(),
                    external: tag.external,
                    slot: field,
                });
            }
        }
        flat
    }

    /// Flattens a source record. Empty embedded optional records
    /// contribute nothing.
    pub(crate) fn flatten_ref<'a>(&self, root: &'a dyn Record) -> Flattened<&'a dyn Shape> {
        let mut flat = Flattened::new();
        let mut queue: VecDeque<&'a dyn Record> = VecDeque::new();
        queue.push_back(root);

        while let Some(record) = queue.pop_front() {
            for (index, decl) in record.field_decls().iter().enumerate() {
                let Some(field) = record.field(index) else {
                    continue;
                };
                let Some(tag) = self.parse_tag(decl) else {
                    continue;
                };
                if tag.omitempty && is_zero_value(field) {
                    continue;
                }

                if decl.is_embedded() {
                    match field.shape_ref() {
                        ShapeRef::Record(inner) => {
                            queue.push_back(inner);
                            continue;
                        }
                        ShapeRef::Optional(Some(inner)) => {
                            if let ShapeRef::Record(inner) = inner.shape_ref() {
                                queue.push_back(inner);
                                continue;
                            }
                        }
                        ShapeRef::Optional(None) => continue,
                        _ => {}
                    }
                }

                if flat.contains(decl.name()) {
                    continue;
                }
                flat.push(FieldInfo {
                    name: decl.name(),
                    external: tag.external,
                    slot: field,
                });
            }
        }
        flat
    }

    // -------------------------------------------------------------------------
    // Record targets

    pub(crate) fn assign_record(
        &mut self,
        target: &mut dyn Record,
        target_key: &KeyPath,
        source: &dyn Shape,
        source_key: &KeyPath,
    ) -> Result<(), AssignError> {
        match source.shape_ref() {
            ShapeRef::Map(map) => self.record_from_map(target, target_key, map, source_key),
            ShapeRef::Record(record) => self.record_from_record(target, target_key, record, source_key),
            other => Err(AssignError::ExpectedMap {
                path: target_key.to_string(),
                found: other.kind(),
            }),
        }
    }

    fn record_from_map(
        &mut self,
        target: &mut dyn Record,
        target_key: &KeyPath,
        source: &dyn Map,
        source_key: &KeyPath,
    ) -> Result<(), AssignError> {
        let key_kind = source.new_key().kind();
        if !matches!(key_kind, ShapeKind::Str | ShapeKind::Dynamic) {
            return Err(AssignError::InvalidKeyType {
                path: target_key.to_string(),
                found: key_kind,
            });
        }

        let mut errors = ErrorList::new();
        let mut consumed: HashSet<String> = HashSet::default();
        let mut unset = Vec::new();

        for field in self.flatten_mut(target).into_fields() {
            let mut key = source.new_key();
            if let Err(err) = coerce_key(&mut *key, &field.external) {
                errors.push(err);
                continue;
            }

            let field_key = target_key.field(field.name);
            let found = match source.get(&*key) {
                Some(value) => Some((field.external, value)),
                None => self.match_key(source, &field.external, &consumed),
            };
            let Some((matched, value)) = found else {
                self.add_unset(&field_key);
                unset.push(field_key.to_string());
                continue;
            };

            let value_key = source_key.entry(&matched);
            if let Err(err) = self.assign_value(field.slot, &field_key, value, &value_key) {
                errors.push(err);
            }
            consumed.insert(matched);
        }

        let mut unused = Vec::new();
        for (key, _) in source.iter() {
            let key = display_key(key);
            if !consumed.contains(&key) {
                self.add_unused(&source_key.entry(&key));
                unused.push(key);
            }
        }
        self.check_leftovers(&mut errors, target_key, unused, unset);

        if !errors.is_empty() {
            log::debug!("{} error(s) assigning record `{target_key}`", errors.len());
        }
        errors.into_result()
    }

    /// Finds a key through the configured name matcher, skipping keys that
    /// already went to a field.
    fn match_key<'s>(
        &self,
        source: &'s dyn Map,
        external: &str,
        consumed: &HashSet<String>,
    ) -> Option<(String, &'s dyn Shape)> {
        let matches = self.config.match_name?;
        source.iter().find_map(|(key, value)| {
            let key = display_key(key);
            (!consumed.contains(&key) && matches(&key, external)).then_some((key, value))
        })
    }

    /// Turns leftover source keys and unset fields into errors when so
    /// configured.
    fn check_leftovers(
        &self,
        errors: &mut ErrorList,
        target_key: &KeyPath,
        mut unused: Vec<String>,
        mut unset: Vec<String>,
    ) {
        if self.config.error_unused && !unused.is_empty() {
            unused.sort();
            errors.push(AssignError::UnusedKeys {
                path: target_key.to_string(),
                keys: unused,
            });
        }
        if self.config.error_unset && !unset.is_empty() {
            unset.sort();
            errors.push(AssignError::UnsetFields {
                path: target_key.to_string(),
                fields: unset,
            });
        }
    }

    fn record_from_record(
        &mut self,
        target: &mut dyn Record,
        target_key: &KeyPath,
        source: &dyn Record,
        source_key: &KeyPath,
    ) -> Result<(), AssignError> {
        let mut errors = ErrorList::new();
        let mut sources = self.flatten_ref(source);
        let mut unset = Vec::new();

        for field in self.flatten_mut(target).into_fields() {
            let field_key = target_key.field(field.name);
            let Some(source_field) = sources.take(field.name) else {
                self.add_unset(&field_key);
                unset.push(field_key.to_string());
                continue;
            };

            let value_key = source_key.field(source_field.name);
            if let Err(err) = self.assign_value(field.slot, &field_key, source_field.slot, &value_key) {
                errors.push(err);
            }
        }

        let mut unused = Vec::new();
        for field in sources.into_fields() {
            self.add_unused(&source_key.field(field.name));
            unused.push(String::from(field.name));
        }
        self.check_leftovers(&mut errors, target_key, unused, unset);

        if !errors.is_empty() {
            log::debug!("{} error(s) assigning record `{target_key}`", errors.len());
        }
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec::Vec;
    use alloc::format;

    use mold_shape::derive::Shape;
    use mold_shape::{Value, ValueMap};

    use crate::{AssignConfig, AssignError, Assigner, Metadata};

    #[derive(Debug, Default, Clone, PartialEq, Shape)]
    struct Inner {
        vstring: String,
    }

    #[derive(Debug, Default, Clone, PartialEq, Shape)]
    struct Outer {
        vfoo: String,
        vbar: Inner,
    }

    #[derive(Debug, Default, Clone, PartialEq, Shape)]
    struct Base {
        name: String,
        port: u16,
    }

    #[derive(Debug, Default, Clone, PartialEq, Shape)]
    struct Server {
        #[shape(embed)]
        base: Base,
        name: String,
    }

    #[derive(Debug, Default, Clone, PartialEq, Shape)]
    struct Lazy {
        #[shape(embed)]
        base: Option<Base>,
        #[shape(json = "tls")]
        secure: bool,
    }

    #[derive(Debug, Default, Clone, PartialEq, Shape)]
    struct Tagged {
        #[shape(json = "-")]
        secret: String,
        #[shape(json = "label_text")]
        label: String,
        http_port: u16,
    }

    #[derive(Debug, Default, Clone, PartialEq, Shape)]
    struct Matched {
        #[shape(json = "first_match")]
        first_match: String,
        second_match: String,
        #[shape(json = "no_match")]
        no_match: String,
    }

    fn json(text: &str) -> Value {
        serde_json::from_str(text).unwrap()
    }

    fn sorted(mut keys: Vec<String>) -> Vec<String> {
        keys.sort();
        keys
    }

    #[test]
    fn reports_metadata() {
        let source = json(r#"{"vfoo":"foo","vbar":{"vstring":"foo","extra":"x"}}"#);
        let mut target = Outer::default();
        let mut metadata = Metadata::default();

        let config = AssignConfig::default();
        Assigner::new(&config)
            .with_metadata(&mut metadata)
            .assign(&mut target, &source)
            .unwrap();

        assert_eq!(target.vfoo, "foo");
        assert_eq!(target.vbar.vstring, "foo");
        assert_eq!(sorted(metadata.keys), ["vbar", "vbar.vstring", "vfoo"]);
        assert_eq!(metadata.unused, ["vbar[extra]"]);
        assert!(metadata.unset.is_empty());
    }

    #[test]
    fn copies_are_stable() {
        let source = Outer {
            vfoo: String::from("foo"),
            vbar: Inner {
                vstring: String::from("bar"),
            },
        };

        let mut first = Outer::default();
        crate::assign(&mut first, &source).unwrap();
        let mut second = Outer::default();
        crate::assign(&mut second, &first).unwrap();

        assert_eq!(first, source);
        assert_eq!(second, first);
    }

    #[test]
    fn missing_fields_are_unset() {
        let source = json(r#"{"vfoo":"foo"}"#);
        let mut target = Outer {
            vbar: Inner {
                vstring: String::from("kept"),
            },
            ..Outer::default()
        };
        let mut metadata = Metadata::default();

        let config = AssignConfig::default();
        Assigner::new(&config)
            .with_metadata(&mut metadata)
            .assign(&mut target, &source)
            .unwrap();

        assert_eq!(target.vbar.vstring, "kept");
        assert_eq!(metadata.keys, ["vfoo"]);
        assert_eq!(metadata.unset, ["vbar"]);
    }

    #[test]
    fn embedded_fields_are_promoted() {
        let source = json(r#"{"name":"outer","port":8080}"#);
        let mut target = Server::default();
        let mut metadata = Metadata::default();

        let config = AssignConfig::default();
        Assigner::new(&config)
            .with_metadata(&mut metadata)
            .assign(&mut target, &source)
            .unwrap();

        // The outer `name` shadows the embedded one.
        assert_eq!(target.name, "outer");
        assert_eq!(target.base.name, "");
        assert_eq!(target.base.port, 8080);
        assert_eq!(sorted(metadata.keys), ["name", "port"]);
    }

    #[test]
    fn embedded_optional_is_allocated() {
        let source = json(r#"{"port":443,"tls":true}"#);
        let mut target = Lazy::default();
        crate::assign(&mut target, &source).unwrap();

        assert!(target.secure);
        assert_eq!(
            target.base,
            Some(Base {
                name: String::new(),
                port: 443,
            })
        );
    }

    #[test]
    fn tags_and_converter() {
        let source = json(r#"{"secret":"s","label_text":"l","httpPort":9}"#);
        let mut target = Tagged::default();
        let mut metadata = Metadata::default();

        let config = AssignConfig::default();
        Assigner::new(&config)
            .with_metadata(&mut metadata)
            .assign(&mut target, &source)
            .unwrap();

        assert_eq!(target.secret, "");
        assert_eq!(target.label, "l");
        assert_eq!(target.http_port, 9);
        assert_eq!(metadata.unused, ["secret"]);

        let mut target = Tagged::default();
        crate::assign_with(&mut target, &source, |config| {
            config.include_ignore_fields = true;
        })
        .unwrap();
        assert_eq!(target.secret, "s");
    }

    #[test]
    fn other_tag_name() {
        #[derive(Debug, Default, Clone, Shape)]
        struct Conf {
            #[shape(json = "a", yaml = "b")]
            value: i32,
        }

        let source = json(r#"{"a":1,"b":2}"#);
        let mut target = Conf::default();
        crate::assign_with(&mut target, &source, |config| {
            config.tag_name = "yaml".into();
        })
        .unwrap();
        assert_eq!(target.value, 2);
    }

    #[test]
    fn collects_field_errors() {
        #[derive(Debug, Default, Clone, Shape)]
        struct Flags {
            enabled: bool,
            count: i32,
            name: String,
        }

        let source = json(r#"{"enabled":1,"count":true,"name":"ok"}"#);
        let mut target = Flags::default();
        let err = crate::assign(&mut target, &source).unwrap_err();

        let messages = err.messages();
        assert_eq!(messages.len(), 2);
        assert!(messages.iter().any(|m| m.starts_with("'enabled' expected type 'bool'")));
        assert!(messages.iter().any(|m| m.starts_with("'count' expected type 'i32'")));
        assert_eq!(target.name, "ok");
        assert_eq!(target.count, 0);
        assert!(format!("{err}").starts_with("2 error(s) decoding:"));
    }

    #[test]
    fn record_from_record() {
        #[derive(Debug, Default, Clone, Shape)]
        struct Wide {
            name: String,
            port: u32,
            extra: bool,
        }

        let source = Wide {
            name: String::from("a"),
            port: 80,
            extra: true,
        };
        let mut target = Base::default();
        let mut metadata = Metadata::default();

        let config = AssignConfig::default();
        Assigner::new(&config)
            .with_metadata(&mut metadata)
            .assign(&mut target, &source)
            .unwrap();

        assert_eq!(target.name, "a");
        assert_eq!(target.port, 80);
        assert_eq!(metadata.unused, ["extra"]);
    }

    #[test]
    fn rejects_non_mapping_sources() {
        let mut target = Outer::default();
        let err = crate::assign(&mut target, &Value::from("text")).unwrap_err();
        assert!(matches!(err, AssignError::ExpectedMap { .. }));

        let source: alloc::collections::BTreeMap<i32, Value> = [(1, Value::from("x"))].into_iter().collect();
        let err = crate::assign(&mut target, &source).unwrap_err();
        assert!(matches!(err, AssignError::InvalidKeyType { .. }));
    }

    #[test]
    fn null_leaves_fields_alone() {
        let source = json(r#"{"vfoo":null}"#);
        let mut target = Outer {
            vfoo: String::from("kept"),
            ..Outer::default()
        };
        crate::assign(&mut target, &source).unwrap();
        assert_eq!(target.vfoo, "kept");

        crate::assign_with(&mut target, &source, |config| config.zero_fields = true).unwrap();
        assert_eq!(target.vfoo, "");
    }

    #[test]
    fn skips_configured_keys() {
        let source = json(r#"{"vfoo":"foo","vbar":{"vstring":"bar"}}"#);
        let mut target = Outer::default();
        let mut metadata = Metadata::default();

        let config = AssignConfig::default().with_skip_keys(["vbar.vstring"]);
        Assigner::new(&config)
            .with_metadata(&mut metadata)
            .assign(&mut target, &source)
            .unwrap();

        assert_eq!(target.vfoo, "foo");
        assert_eq!(target.vbar.vstring, "");
        assert_eq!(metadata.unset, ["vbar.vstring"]);
        assert_eq!(metadata.unused, ["vbar[vstring]"]);
    }

    #[test]
    fn unused_keys_fail_when_configured() {
        let config = AssignConfig::default().with_error_unused(true);

        let mut target = Inner::default();
        let err = Assigner::new(&config)
            .assign(&mut target, &json(r#"{"vstring":"hello","foo":"bar"}"#))
            .unwrap_err();
        assert_eq!(err.messages(), ["'' has invalid keys: foo"]);
        assert_eq!(target.vstring, "hello");

        let mut target = Outer::default();
        let err = Assigner::new(&config)
            .assign(&mut target, &json(r#"{"vfoo":"x","vbar":{"vstring":"y","extra":1,"another":2}}"#))
            .unwrap_err();
        assert_eq!(err.messages(), ["'vbar' has invalid keys: another, extra"]);

        let mut target = Inner::default();
        Assigner::new(&config)
            .assign(&mut target, &json(r#"{"vstring":"hello"}"#))
            .unwrap();
    }

    #[test]
    fn unset_fields_fail_when_configured() {
        let config = AssignConfig::default().with_error_unset(true);

        let mut target = Base::default();
        let err = Assigner::new(&config)
            .assign(&mut target, &json(r#"{"name":"a","foo":"bar"}"#))
            .unwrap_err();
        assert_eq!(err.messages(), ["'' has unset fields: port"]);
        assert_eq!(target.name, "a");

        let source = Base {
            name: String::from("a"),
            port: 1,
        };
        let mut target = Inner::default();
        let err = crate::assign_with(&mut target, &source, |config| {
            config.error_unused = true;
            config.error_unset = true;
        })
        .unwrap_err();
        assert_eq!(
            err.messages(),
            ["'' has invalid keys: name, port", "'' has unset fields: vstring"]
        );
    }

    #[test]
    fn match_name_falls_back() {
        let source = json(r#"{"first_match":"one","secondmatch":"two","NO_MATCH":"three"}"#);

        let mut target = Matched::default();
        let mut metadata = Metadata::default();
        let config = AssignConfig::default();
        Assigner::new(&config)
            .with_metadata(&mut metadata)
            .assign(&mut target, &source)
            .unwrap();
        assert_eq!(target.first_match, "one");
        assert_eq!(target.second_match, "");
        assert_eq!(target.no_match, "");
        assert_eq!(sorted(metadata.unused), ["NO_MATCH", "secondmatch"]);

        let mut target = Matched::default();
        let mut metadata = Metadata::default();
        let config = AssignConfig::default().with_match_name(mold_utils::case::equal_fold);
        Assigner::new(&config)
            .with_metadata(&mut metadata)
            .assign(&mut target, &source)
            .unwrap();
        assert_eq!(target.first_match, "one");
        assert_eq!(target.second_match, "two");
        assert_eq!(target.no_match, "three");
        assert_eq!(sorted(metadata.keys), ["first_match", "no_match", "second_match"]);
        assert!(metadata.unused.is_empty());
    }

    #[test]
    fn untagged_fields_can_be_ignored() {
        let source = json(r#"{"label_text":"l","httpPort":9}"#);
        let config = AssignConfig::default().with_ignore_untagged_fields(true);

        let mut target = Tagged::default();
        let mut metadata = Metadata::default();
        Assigner::new(&config)
            .with_metadata(&mut metadata)
            .assign(&mut target, &source)
            .unwrap();
        assert_eq!(target.label, "l");
        assert_eq!(target.http_port, 0);
        assert_eq!(metadata.unused, ["httpPort"]);

        let tagged = Tagged {
            secret: String::from("s"),
            label: String::from("l"),
            http_port: 9,
        };
        let mut map = ValueMap::new();
        Assigner::new(&config).assign(&mut map, &tagged).unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map["label_text"], Value::from("l"));
    }
}
