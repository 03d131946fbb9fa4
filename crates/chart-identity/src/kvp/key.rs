use std::{fmt::Display, ops::Deref, str::FromStr, sync::LazyLock};

use regex::Regex;
use snafu::{ensure, Snafu};

const KEY_PREFIX_MAX_LEN: usize = 253;
const KEY_NAME_MAX_LEN: usize = 63;

// Lazily initialized regular expressions
static KEY_PREFIX_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z](\.?[a-zA-Z0-9-])*\.[a-zA-Z]{2,}\.?$")
        .expect("failed to compile key prefix regex")
});

static KEY_NAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9A-Z]([a-z0-9A-Z-_.]*[a-z0-9A-Z]+)?$")
        .expect("failed to compile key name regex")
});

/// The error type for key parsing/validation operations.
#[derive(Debug, PartialEq, Snafu)]
pub enum KeyError {
    /// Indicates that the input is empty. A key must at least contain a
    /// name, the prefix is optional.
    #[snafu(display("key input cannot be empty"))]
    EmptyInput,

    /// Indicates that the input contains more than one slash. Valid keys
    /// contain at most a single prefix, like `app.kubernetes.io/name`.
    #[snafu(display("key prefixes cannot be nested, only use a single slash"))]
    NestedPrefix,

    /// Indicates that the prefix segment exceeds the maximum length of 253
    /// ASCII characters.
    #[snafu(display("prefix segment of key exceeds the maximum length - expected 253 characters or less, got {length}"))]
    PrefixTooLong { length: usize },

    /// Indicates that the prefix segment violates the Kubernetes format.
    #[snafu(display("prefix segment of key violates kubernetes format"))]
    PrefixInvalid,

    /// Indicates that the name segment exceeds the maximum length of 63
    /// ASCII characters.
    #[snafu(display("name segment of key exceeds the maximum length - expected 63 characters or less, got {length}"))]
    NameTooLong { length: usize },

    /// Indicates that the name segment violates the Kubernetes format.
    #[snafu(display("name segment of key violates kubernetes format"))]
    NameInvalid,
}

/// A validated label key with the format `(<PREFIX>/)<NAME>`.
///
/// Instances of this struct are always valid. [`Key`] implements [`Deref`],
/// which enables read-only access to the inner value. No associated
/// functions allow unvalidated mutation.
#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Key(String);

impl FromStr for Key {
    type Err = KeyError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let input = input.trim();
        ensure!(!input.is_empty(), EmptyInputSnafu);

        // Split the input up into the optional prefix and name
        let (prefix, name) = match input.split('/').collect::<Vec<_>>()[..] {
            [name] => (None, name),
            [prefix, name] => (Some(prefix), name),
            _ => return NestedPrefixSnafu.fail(),
        };

        if let Some(prefix) = prefix {
            ensure!(
                prefix.len() <= KEY_PREFIX_MAX_LEN,
                PrefixTooLongSnafu {
                    length: prefix.len()
                }
            );
            ensure!(
                prefix.is_ascii() && KEY_PREFIX_REGEX.is_match(prefix),
                PrefixInvalidSnafu
            );
        }

        ensure!(
            name.len() <= KEY_NAME_MAX_LEN,
            NameTooLongSnafu { length: name.len() }
        );
        ensure!(
            name.is_ascii() && KEY_NAME_REGEX.is_match(name),
            NameInvalidSnafu
        );

        Ok(Self(input.to_string()))
    }
}

impl TryFrom<&str> for Key {
    type Error = KeyError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::from_str(value)
    }
}

impl Deref for Key {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::borrow::Borrow<str> for Key {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl Display for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Key {
    /// Retrieves the optional prefix segment of the key.
    pub fn prefix(&self) -> Option<&str> {
        self.0.split_once('/').map(|(prefix, _)| prefix)
    }

    /// Retrieves the name segment of the key.
    pub fn name(&self) -> &str {
        self.0.split_once('/').map_or(self.0.as_str(), |(_, name)| name)
    }
}

#[cfg(test)]
mod test {
    use rstest::rstest;

    use super::*;

    #[test]
    fn key_with_prefix() {
        let key = Key::from_str("app.kubernetes.io/name").unwrap();

        assert_eq!(key.prefix(), Some("app.kubernetes.io"));
        assert_eq!(key.name(), "name");
        assert_eq!(key.to_string(), "app.kubernetes.io/name");
    }

    #[test]
    fn key_without_prefix() {
        let key = Key::from_str("name").unwrap();

        assert_eq!(key.prefix(), None);
        assert_eq!(key.name(), "name");
    }

    #[rstest]
    #[case("foo/bar/baz", KeyError::NestedPrefix)]
    #[case("", KeyError::EmptyInput)]
    #[case("foo./name", KeyError::PrefixInvalid)]
    #[case("foo-", KeyError::NameInvalid)]
    fn invalid_key(#[case] input: &str, #[case] error: KeyError) {
        let err = Key::from_str(input).unwrap_err();
        assert_eq!(err, error);
    }

    #[test]
    fn overlong_segments() {
        let err = Key::from_str(&format!("{}/name", "a.bc".repeat(80))).unwrap_err();
        assert_eq!(err, KeyError::PrefixTooLong { length: 320 });

        let err = Key::from_str(&"a".repeat(64)).unwrap_err();
        assert_eq!(err, KeyError::NameTooLong { length: 64 });
    }
}
