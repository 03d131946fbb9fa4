use std::{
    fmt::{Debug, Display},
    ops::Deref,
    str::FromStr,
    sync::LazyLock,
};

use regex::Regex;
use snafu::{ensure, Snafu};

const LABEL_VALUE_MAX_LEN: usize = 63;

static LABEL_VALUE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9A-Z]([a-z0-9A-Z-_.]*[a-z0-9A-Z]+)?$")
        .expect("failed to compile label value regex")
});

/// The error type for label value parsing/validation operations.
#[derive(Debug, PartialEq, Snafu)]
pub enum LabelValueError {
    /// Indicates that the label value exceeds the maximum length of 63
    /// ASCII characters.
    #[snafu(display(
        "value exceeds the maximum length - expected 63 characters or less, got {length}"
    ))]
    ValueTooLong { length: usize },

    /// Indicates that the label value contains non-ASCII characters which
    /// the Kubernetes spec does not permit.
    #[snafu(display("value contains non-ascii characters"))]
    ValueNotAscii,

    /// Indicates that the label value violates the Kubernetes format.
    #[snafu(display("value violates kubernetes format"))]
    ValueInvalid,
}

/// A validated Kubernetes label value.
///
/// Instances of this struct are always valid. Unlike keys, values are
/// allowed to be empty.
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct LabelValue(String);

impl Debug for LabelValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

impl FromStr for LabelValue {
    type Err = LabelValueError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        ensure!(
            input.len() <= LABEL_VALUE_MAX_LEN,
            ValueTooLongSnafu {
                length: input.len()
            }
        );

        ensure!(input.is_ascii(), ValueNotAsciiSnafu);

        // Empty values are legal, everything else must match the format
        ensure!(
            input.is_empty() || LABEL_VALUE_REGEX.is_match(input),
            ValueInvalidSnafu
        );

        Ok(Self(input.to_string()))
    }
}

impl Deref for LabelValue {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for LabelValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
