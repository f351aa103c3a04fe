//! Naming-convention converters.
//!
//! A converter maps a declared (Rust) field name to the external name used
//! when the field is looked up in a mapping. All converters here share the
//! signature `fn(&str) -> String` so they can be stored as plain function
//! pointers.

use alloc::string::String;
use alloc::vec::Vec;

/// Split an identifier into words.
///
/// Word boundaries are `_`, `-` and whitespace, a lower-case letter or digit
/// followed by an upper-case letter, and the last capital of an acronym that
/// is followed by a lower-case letter (`HTTPServer` -> `HTTP`, `Server`).
fn split_words(name: &str) -> Vec<&str> {
    let mut words = Vec::new();
    let chars: Vec<(usize, char)> = name.char_indices().collect();
    let mut start: Option<usize> = None;

    for (pos, &(index, ch)) in chars.iter().enumerate() {
        if ch == '_' || ch == '-' || ch.is_whitespace() {
            if let Some(begin) = start.take() {
                words.push(&name[begin..index]);
            }
            continue;
        }

        if let Some(begin) = start
            && ch.is_uppercase()
        {
            let prev = chars[pos - 1].1;
            let next_is_lower = chars
                .get(pos + 1)
                .is_some_and(|&(_, next)| next.is_lowercase());

            if prev.is_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_uppercase() && next_is_lower)
            {
                words.push(&name[begin..index]);
                start = Some(index);
            }
            continue;
        }

        if start.is_none() {
            start = Some(index);
        }
    }

    if let Some(begin) = start {
        words.push(&name[begin..]);
    }

    words
}

fn push_capitalized(out: &mut String, word: &str) {
    let mut chars = word.chars();
    if let Some(first) = chars.next() {
        out.extend(first.to_uppercase());
        out.extend(chars.flat_map(char::to_lowercase));
    }
}

/// Convert a name to `lowerCamelCase`.
///
/// This is the default converter of the assigner.
///
/// # Examples
///
/// ```
/// use mold_utils::case::to_lower_camel;
///
/// assert_eq!(to_lower_camel("vstring"), "vstring");
/// assert_eq!(to_lower_camel("json_number"), "jsonNumber");
/// assert_eq!(to_lower_camel("VRenamed"), "vRenamed");
/// assert_eq!(to_lower_camel("HTTPServer"), "httpServer");
/// ```
pub fn to_lower_camel(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for (index, word) in split_words(name).into_iter().enumerate() {
        if index == 0 {
            out.extend(word.chars().flat_map(char::to_lowercase));
        } else {
            push_capitalized(&mut out, word);
        }
    }
    out
}

/// Convert a name to `snake_case`.
///
/// # Examples
///
/// ```
/// use mold_utils::case::to_snake;
///
/// assert_eq!(to_snake("jsonNumber"), "json_number");
/// assert_eq!(to_snake("HTTPServer"), "http_server");
/// ```
pub fn to_snake(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (index, word) in split_words(name).into_iter().enumerate() {
        if index != 0 {
            out.push('_');
        }
        out.extend(word.chars().flat_map(char::to_lowercase));
    }
    out
}

/// Keep the declared name unchanged.
pub fn identity(name: &str) -> String {
    String::from(name)
}

/// Compare two names ignoring case.
///
/// A name matcher for keys that differ from the external name only in case.
///
/// ```
/// use mold_utils::case::equal_fold;
///
/// assert!(equal_fold("NO_MATCH", "no_match"));
/// assert!(!equal_fold("no_match", "nomatch"));
/// ```
pub fn equal_fold(key: &str, name: &str) -> bool {
    key.chars()
        .flat_map(char::to_lowercase)
        .eq(name.chars().flat_map(char::to_lowercase))
}

#[cfg(test)]
mod tests {
    use super::{equal_fold, split_words, to_lower_camel, to_snake};
    use alloc::vec;

    #[test]
    fn words() {
        assert_eq!(split_words("v_renamed"), vec!["v", "renamed"]);
        assert_eq!(split_words("VjsonInt"), vec!["Vjson", "Int"]);
        assert_eq!(split_words("value2Go"), vec!["value2", "Go"]);
        assert_eq!(split_words("__a--b  c"), vec!["a", "b", "c"]);
        assert!(split_words("").is_empty());
    }

    #[test]
    fn lower_camel() {
        assert_eq!(to_lower_camel("v_renamed"), "vRenamed");
        assert_eq!(to_lower_camel("vjson_uint64"), "vjsonUint64");
        assert_eq!(to_lower_camel("Vfoo"), "vfoo");
        assert_eq!(to_lower_camel("ID"), "id");
    }

    #[test]
    fn snake() {
        assert_eq!(to_snake("VjsonInt"), "vjson_int");
        assert_eq!(to_snake("already_snake"), "already_snake");
    }

    #[test]
    fn folded_equality() {
        assert!(equal_fold("SecondMatch", "secondmatch"));
        assert!(equal_fold("Straße", "STRAßE"));
        assert!(!equal_fold("first", "first_match"));
    }
}
