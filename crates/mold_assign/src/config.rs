use alloc::borrow::Cow;
use alloc::string::String;
use alloc::vec::Vec;

use mold_shape::{Shape, ShapeKind, Value};
use mold_utils::case::to_lower_camel;

/// Rewrites a source before it is assigned.
///
/// Called with the kind of the source, the kind of the target and the
/// source itself. `Ok(None)` keeps the source and `Ok(Some(value))` assigns
/// `value` in its place. A [`Value::Null`] replacement counts as absent.
/// `Err` fails the path with the message.
pub type DecodeHook = fn(ShapeKind, ShapeKind, &dyn Shape) -> Result<Option<Value>, String>;

// -----------------------------------------------------------------------------
// AssignConfig

/// Options of an [`Assigner`](crate::Assigner).
///
/// A configuration is read-only while an assignment runs. Build one with
/// [`AssignConfig::default`] and the `with_*` methods, or adjust a copy of
/// the defaults through [`assign_with`](crate::assign_with).
///
/// ```
/// use mold_assign::AssignConfig;
/// use mold_utils::case::to_snake;
///
/// let config = AssignConfig::default()
///     .with_weakly_typed_input(true)
///     .with_tag_name("yaml")
///     .with_converter(to_snake)
///     .with_skip_keys(["secret"]);
///
/// assert!(config.weakly_typed_input);
/// assert_eq!(config.tag_name, "yaml");
/// assert_eq!((config.converter)("httpPort"), "http_port");
/// ```
#[derive(Debug, Clone)]
pub struct AssignConfig {
    /// Enables the relaxed conversions: text to numbers and booleans,
    /// numbers and booleans to text, scalars lifted into sequences, and
    /// so on.
    pub weakly_typed_input: bool,
    /// The field tag that holds the external name, e.g. `json` for
    /// `#[shape(json = "name,omitempty")]`.
    pub tag_name: Cow<'static, str>,
    /// Derives the external name of a field without one.
    pub converter: fn(&str) -> String,
    /// Includes fields tagged `-` under their converted name.
    pub include_ignore_fields: bool,
    /// Target or source paths that are never assigned, e.g. `server.port`
    /// or `servers[0]`.
    pub skip_keys: Vec<String>,
    /// Leaves targets alone when the source is structurally equal to them.
    pub skip_same_values: bool,
    /// Resets the target to its zero value when the source is an explicit
    /// null, instead of leaving it untouched.
    pub zero_fields: bool,
    /// Runs on every present source before it is assigned.
    pub decode_hook: Option<DecodeHook>,
    /// Fails a record assignment when the source has keys that match no
    /// field.
    pub error_unused: bool,
    /// Fails a record assignment when fields have no source key.
    pub error_unset: bool,
    /// Matches a mapping key against an external field name when there is
    /// no exact match. Called as `match_name(key, name)`.
    pub match_name: Option<fn(&str, &str) -> bool>,
    /// Ignores fields without a tag, embedded fields excepted.
    pub ignore_untagged_fields: bool,
}

impl AssignConfig {
    /// The default configuration: strict typing, `json` tags and
    /// lower camel case names.
    pub const DEFAULT: Self = Self {
        weakly_typed_input: false,
        tag_name: Cow::Borrowed("json"),
        converter: to_lower_camel,
        include_ignore_fields: false,
        skip_keys: Vec::new(),
        skip_same_values: false,
        zero_fields: false,
        decode_hook: None,
        error_unused: false,
        error_unset: false,
        match_name: None,
        ignore_untagged_fields: false,
    };

    /// The configuration used to convert mapping keys.
    pub(crate) const WEAK: Self = Self {
        weakly_typed_input: true,
        tag_name: Cow::Borrowed("json"),
        converter: to_lower_camel,
        include_ignore_fields: false,
        skip_keys: Vec::new(),
        skip_same_values: false,
        zero_fields: false,
        decode_hook: None,
        error_unused: false,
        error_unset: false,
        match_name: None,
        ignore_untagged_fields: false,
    };

    #[inline]
    pub fn with_weakly_typed_input(mut self, enabled: bool) -> Self {
        self.weakly_typed_input = enabled;
        self
    }

    #[inline]
    pub fn with_tag_name(mut self, tag_name: impl Into<Cow<'static, str>>) -> Self {
        self.tag_name = tag_name.into();
        self
    }

    #[inline]
    pub fn with_converter(mut self, converter: fn(&str) -> String) -> Self {
        self.converter = converter;
        self
    }

    #[inline]
    pub fn with_include_ignore_fields(mut self, enabled: bool) -> Self {
        self.include_ignore_fields = enabled;
        self
    }

    /// Replaces the skipped paths.
    pub fn with_skip_keys<I, K>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        self.skip_keys = keys.into_iter().map(Into::into).collect();
        self
    }

    #[inline]
    pub fn with_skip_same_values(mut self, enabled: bool) -> Self {
        self.skip_same_values = enabled;
        self
    }

    #[inline]
    pub fn with_zero_fields(mut self, enabled: bool) -> Self {
        self.zero_fields = enabled;
        self
    }

    #[inline]
    pub fn with_decode_hook(mut self, hook: DecodeHook) -> Self {
        self.decode_hook = Some(hook);
        self
    }

    #[inline]
    pub fn with_error_unused(mut self, enabled: bool) -> Self {
        self.error_unused = enabled;
        self
    }

    #[inline]
    pub fn with_error_unset(mut self, enabled: bool) -> Self {
        self.error_unset = enabled;
        self
    }

    /// Sets the fallback key matcher, e.g.
    /// [`equal_fold`](mold_utils::case::equal_fold) for case-insensitive keys.
    #[inline]
    pub fn with_match_name(mut self, matcher: fn(&str, &str) -> bool) -> Self {
        self.match_name = Some(matcher);
        self
    }

    #[inline]
    pub fn with_ignore_untagged_fields(mut self, enabled: bool) -> Self {
        self.ignore_untagged_fields = enabled;
        self
    }
}

impl Default for AssignConfig {
    #[inline]
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::AssignConfig;

    #[test]
    fn defaults() {
        let config = AssignConfig::default();
        assert!(!config.weakly_typed_input);
        assert_eq!(config.tag_name, "json");
        assert_eq!((config.converter)("VjsonInt"), "vjsonInt");
        assert!(config.skip_keys.is_empty());
        assert!(config.decode_hook.is_none());
        assert!(config.match_name.is_none());
        assert!(!config.error_unused && !config.error_unset);
        assert!(!config.ignore_untagged_fields);

        assert!(AssignConfig::WEAK.weakly_typed_input);
        assert_eq!(AssignConfig::WEAK.tag_name, "json");
    }
}
