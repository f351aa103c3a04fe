use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

use mold_shape::{ShapeError, ShapeKind};
use thiserror::Error;

use crate::KeyPath;

// -----------------------------------------------------------------------------
// AssignError

/// An error raised while assigning a value.
///
/// Each variant carries the path it happened at. Records, mappings and
/// sequences keep going when a child fails and report every failure at once
/// as [`AssignError::Multiple`].
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum AssignError {
    #[error("target must be a writable value, got `{0}`")]
    InvalidTarget(&'static str),

    #[error("'{path}' expected type '{expected}', got unconvertible type '{found}', value: '{value}'")]
    UnconvertibleType {
        path: String,
        expected: &'static str,
        found: &'static str,
        value: String,
    },

    #[error("cannot parse '{path}', {value} overflows uint")]
    UintOverflow { path: String, value: String },

    #[error("cannot parse '{path}' as {kind}: {message}")]
    Parse {
        path: String,
        kind: ShapeKind,
        message: String,
    },

    #[error("error decoding '{path}': NaN or Inf values are not allowed")]
    NonFiniteFloat { path: String },

    #[error("'{path}' expected a map, got '{found}'")]
    ExpectedMap { path: String, found: ShapeKind },

    #[error("'{path}': source data must be an array or slice, got {found}")]
    ExpectedSequence { path: String, found: ShapeKind },

    #[error("'{path}' needs a map with string keys, has '{found}' keys")]
    InvalidKeyType { path: String, found: ShapeKind },

    #[error("'{path}': expected source data to have length less or equal to {expected}, got {found}")]
    LengthExceeded {
        path: String,
        expected: usize,
        found: usize,
    },

    #[error("{path}: unsupported type: {type_name}")]
    UnsupportedType {
        path: String,
        type_name: &'static str,
    },

    #[error("'{path}' expected type '{expected}', got '{found}'")]
    TypeMismatch {
        path: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("error decoding '{path}': {message}")]
    Hook { path: String, message: String },

    #[error("'{path}' has invalid keys: {}", keys.join(", "))]
    UnusedKeys { path: String, keys: Vec<String> },

    #[error("'{path}' has unset fields: {}", fields.join(", "))]
    UnsetFields { path: String, fields: Vec<String> },

    #[error("{0}")]
    Multiple(ErrorList),
}

impl AssignError {
    /// The messages of this error, one per failure.
    ///
    /// ```
    /// use mold_assign::assign;
    /// use mold_shape::Value;
    ///
    /// let mut flags: Vec<bool> = Vec::new();
    /// let source = Value::from(vec![Value::from(true), Value::from(1), Value::from("x")]);
    /// let err = assign(&mut flags, &source).unwrap_err();
    ///
    /// assert_eq!(err.messages().len(), 2);
    /// assert!(err.messages()[0].starts_with("'1' expected type 'bool'"));
    /// ```
    pub fn messages(&self) -> Vec<String> {
        match self {
            Self::Multiple(list) => list.iter().map(ToString::to_string).collect(),
            other => alloc::vec![other.to_string()],
        }
    }

    pub(crate) fn from_shape_error(path: &KeyPath, err: ShapeError) -> Self {
        Self::TypeMismatch {
            path: path.to_string(),
            expected: err.expected,
            found: err.found,
        }
    }
}

// -----------------------------------------------------------------------------
// ErrorList

/// An ordered list of failures, displayed as one message per line.
///
/// Pushing an [`AssignError::Multiple`] appends its entries instead of
/// nesting the list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorList(Vec<AssignError>);

impl ErrorList {
    #[inline]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, err: AssignError) {
        match err {
            AssignError::Multiple(list) => self.0.extend(list.0),
            other => self.0.push(other),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'_, AssignError> {
        self.0.iter()
    }

    #[inline]
    pub fn as_slice(&self) -> &[AssignError] {
        &self.0
    }

    /// `Ok` when empty, the list as [`AssignError::Multiple`] otherwise.
    pub fn into_result(self) -> Result<(), AssignError> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(AssignError::Multiple(self))
        }
    }
}

impl fmt::Display for ErrorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} error(s) decoding:", self.0.len())?;
        for err in &self.0 {
            write!(f, "\n* {err}")?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a ErrorList {
    type Item = &'a AssignError;
    type IntoIter = core::slice::Iter<'a, AssignError>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for ErrorList {
    type Item = AssignError;
    type IntoIter = alloc::vec::IntoIter<AssignError>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
