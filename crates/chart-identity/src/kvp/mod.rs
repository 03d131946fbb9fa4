//! Validated Kubernetes label key/value pairs.
//!
//! Keys and values are restricted in length and character set, see
//! <https://kubernetes.io/docs/concepts/overview/working-with-objects/labels/>.
//! Both are parsed into always-valid wrapper types, so a constructed
//! [`Label`] or [`Labels`] set can be handed to a manifest renderer without
//! further checks.

use std::fmt::Display;

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};
use snafu::{ResultExt, Snafu};

pub mod consts;

mod key;
mod value;

pub use key::{Key, KeyError};
pub use value::{LabelValue, LabelValueError};

/// The error type for label parsing/validating operations.
#[derive(Debug, PartialEq, Snafu)]
pub enum LabelError {
    /// Indicates that the key failed to parse. See [`KeyError`] for the
    /// possible causes.
    #[snafu(display("failed to parse key {key:?} of label"))]
    InvalidKey { source: KeyError, key: String },

    /// Indicates that the value failed to parse.
    #[snafu(display("failed to parse value {value:?} for key {key}"))]
    InvalidValue {
        source: LabelValueError,
        key: Key,
        value: String,
    },
}

/// A validated Kubernetes label.
///
/// ```
/// # use chart_identity::kvp::Label;
/// let label = Label::try_from(("app.kubernetes.io/name", "gameplay-mcp")).unwrap();
/// assert_eq!(label.to_string(), "app.kubernetes.io/name=gameplay-mcp");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Label {
    pub key: Key,
    pub value: LabelValue,
}

impl TryFrom<(&str, &str)> for Label {
    type Error = LabelError;

    fn try_from((key, value): (&str, &str)) -> Result<Self, Self::Error> {
        let key = key.parse::<Key>().context(InvalidKeySnafu { key })?;
        let value = value
            .parse::<LabelValue>()
            .context(InvalidValueSnafu {
                key: key.clone(),
                value,
            })?;

        Ok(Self { key, value })
    }
}

impl Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

/// An ordered set of validated Kubernetes labels.
///
/// Insertion order is preserved, unlike in a sorted map. Label helpers emit
/// their entries in a fixed order and serialization must reproduce exactly
/// that order to stay deterministic.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Labels(IndexMap<Key, LabelValue>);

impl Labels {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a label, replacing the value of an already present key while
    /// keeping its position.
    pub fn insert(&mut self, label: Label) -> &mut Self {
        self.0.insert(label.key, label.value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&LabelValue> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the labels in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, Key, LabelValue> {
        self.0.iter()
    }

    /// Parses and collects raw `(key, value)` tuples, keeping their order.
    pub fn try_from_iter<'a>(
        iter: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<Self, LabelError> {
        iter.into_iter().map(Label::try_from).collect()
    }

    /// Clones `self` into a type without validation wrappers, ready for use
    /// in the `metadata.labels` field of a rendered manifest.
    pub fn to_unvalidated(&self) -> IndexMap<String, String> {
        self.0
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }
}

impl FromIterator<Label> for Labels {
    fn from_iter<T: IntoIterator<Item = Label>>(iter: T) -> Self {
        let mut labels = Self::new();
        for label in iter {
            labels.insert(label);
        }
        labels
    }
}

impl Extend<Label> for Labels {
    fn extend<T: IntoIterator<Item = Label>>(&mut self, iter: T) {
        for label in iter {
            self.insert(label);
        }
    }
}

impl Serialize for Labels {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(&**key, &**value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod test {
    use snafu::Report;

    use super::*;

    #[test]
    fn try_from_tuple() {
        let label = Label::try_from(("app.kubernetes.io/name", "gameplay-mcp")).unwrap();

        assert_eq!(label.key, "app.kubernetes.io/name".parse::<Key>().unwrap());
        assert_eq!(
            label.value,
            "gameplay-mcp".parse::<LabelValue>().unwrap()
        );
    }

    #[test]
    fn insertion_order_is_preserved() {
        let labels = Labels::try_from_iter([
            ("app.kubernetes.io/name", "gameplay-mcp"),
            ("app.kubernetes.io/instance", "prod"),
        ])
        .unwrap();

        let keys = labels.iter().map(|(key, _)| key.to_string()).collect::<Vec<_>>();
        assert_eq!(
            keys,
            ["app.kubernetes.io/name", "app.kubernetes.io/instance"]
        );
    }

    #[test]
    fn insert_keeps_position_of_existing_key() {
        let mut labels = Labels::try_from_iter([("a", "1"), ("b", "2")]).unwrap();
        labels.insert(Label::try_from(("a", "3")).unwrap());

        let entries = labels
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect::<Vec<_>>();
        assert_eq!(
            entries,
            [
                ("a".to_owned(), "3".to_owned()),
                ("b".to_owned(), "2".to_owned())
            ]
        );
    }

    #[test]
    fn serializes_in_insertion_order() {
        let labels = Labels::try_from_iter([
            ("app.kubernetes.io/name", "mcp-gateway"),
            ("app.kubernetes.io/instance", "prod"),
        ])
        .unwrap();

        let yaml = serde_yaml::to_string(&labels).unwrap();
        assert_eq!(
            yaml,
            "app.kubernetes.io/name: mcp-gateway\napp.kubernetes.io/instance: prod\n"
        );
    }

    #[test]
    fn to_unvalidated() {
        let labels = Labels::try_from_iter([("app.kubernetes.io/name", "x")]).unwrap();
        let map = labels.to_unvalidated();

        assert_eq!(map.len(), 1);
        assert_eq!(
            map.get("app.kubernetes.io/name").map(String::as_str),
            Some("x")
        );
    }

    #[test]
    fn key_error_report() {
        let err = Label::try_from(("app.kübernetes.io/name", "x")).unwrap_err();
        let report = Report::from_error(err);
        println!("{report}");
    }

    #[test]
    fn value_error() {
        let err = Label::try_from(("app.kubernetes.io/name", "präsent")).unwrap_err();
        assert!(matches!(err, LabelError::InvalidValue { .. }));
    }
}
