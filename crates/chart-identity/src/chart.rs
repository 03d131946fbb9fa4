//! The chart/component abstraction.
//!
//! Deployments of the same application ship several structurally identical
//! charts which differ only in the prefix of their template helpers and in
//! whether they define identity labels. [`Chart`] captures exactly that:
//! one shared resolution implementation, parameterized by a helper prefix
//! used purely for diagnostics, with label composition as an opt-in
//! capability.

use snafu::{ResultExt, Snafu};
use tracing::instrument;

use crate::{
    kvp::{
        consts::{K8S_APP_INSTANCE_KEY, K8S_APP_NAME_KEY},
        Label, LabelError, Labels,
    },
    name,
    values::ChartValues,
};

/// The error type for chart-level resolution operations.
#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("failed to resolve chart name"))]
    ResolveName { source: name::Error },

    #[snafu(display("failed to build identity label {key:?}"))]
    BuildLabel {
        source: LabelError,
        key: &'static str,
    },
}

/// One deployable chart/component.
///
/// The helper prefix (e.g. `gameplay-mcp` or `mcp-gateway`) names the chart
/// in diagnostics and mirrors the prefix its template helpers carry. It
/// never influences the resolution logic.
#[derive(Clone, Debug)]
pub struct Chart {
    helper_prefix: String,
    values: ChartValues,
    compose_labels: bool,
}

impl Chart {
    /// Creates a chart without the identity label capability.
    pub fn new(helper_prefix: impl Into<String>, values: ChartValues) -> Self {
        Self {
            helper_prefix: helper_prefix.into(),
            values,
            compose_labels: false,
        }
    }

    /// Enables the identity label capability for this chart. Charts which
    /// don't declare it return [`None`] from [`Chart::identity_labels`].
    pub fn with_identity_labels(mut self) -> Self {
        self.compose_labels = true;
        self
    }

    pub fn helper_prefix(&self) -> &str {
        &self.helper_prefix
    }

    pub fn values(&self) -> &ChartValues {
        &self.values
    }

    /// Resolves the base name of this chart, see [`name::base_name`].
    #[instrument(level = "debug", skip(self), fields(chart = %self.helper_prefix))]
    pub fn base_name(&self) -> Result<String, Error> {
        name::base_name(&self.values).context(ResolveNameSnafu)
    }

    /// Resolves the fully-qualified name of this chart, see
    /// [`name::full_name`].
    #[instrument(level = "debug", skip(self), fields(chart = %self.helper_prefix))]
    pub fn full_name(&self) -> Result<String, Error> {
        name::full_name(&self.values).context(ResolveNameSnafu)
    }

    /// Resolves the service-identity name of this chart, see
    /// [`name::service_account_name`].
    #[instrument(level = "debug", skip(self), fields(chart = %self.helper_prefix))]
    pub fn service_account_name(&self) -> Result<String, Error> {
        name::service_account_name(&self.values).context(ResolveNameSnafu)
    }

    /// Composes the identity label set of this chart.
    ///
    /// Produces exactly two entries, in this order:
    ///
    /// 1. `app.kubernetes.io/name` with the resolved base name
    /// 2. `app.kubernetes.io/instance` with the release name
    ///
    /// Returns [`None`] for charts which don't declare the capability.
    /// Callers must not assume its presence.
    #[instrument(level = "debug", skip(self), fields(chart = %self.helper_prefix))]
    pub fn identity_labels(&self) -> Option<Result<Labels, Error>> {
        self.compose_labels.then(|| self.compose_identity_labels())
    }

    fn compose_identity_labels(&self) -> Result<Labels, Error> {
        let base_name = self.base_name()?;

        let mut labels = Labels::new();
        labels.insert(
            Label::try_from((K8S_APP_NAME_KEY, base_name.as_str())).context(BuildLabelSnafu {
                key: K8S_APP_NAME_KEY,
            })?,
        );
        labels.insert(
            Label::try_from((K8S_APP_INSTANCE_KEY, self.values.release_name.as_str())).context(
                BuildLabelSnafu {
                    key: K8S_APP_INSTANCE_KEY,
                },
            )?,
        );

        Ok(labels)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn gateway_values() -> ChartValues {
        ChartValues {
            chart_name: "mcp-gateway".to_owned(),
            release_name: "prod".to_owned(),
            ..ChartValues::default()
        }
    }

    #[test]
    fn identity_labels_content_and_order() {
        let chart = Chart::new("mcp-gateway", gateway_values()).with_identity_labels();
        let labels = chart.identity_labels().unwrap().unwrap();

        let entries = labels
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect::<Vec<_>>();
        assert_eq!(
            entries,
            [
                (
                    "app.kubernetes.io/name".to_owned(),
                    "mcp-gateway".to_owned()
                ),
                ("app.kubernetes.io/instance".to_owned(), "prod".to_owned())
            ]
        );
    }

    #[test]
    fn labels_use_resolved_base_name() {
        let mut values = gateway_values();
        values.name_override = Some("renamed".to_owned());

        let chart = Chart::new("mcp-gateway", values).with_identity_labels();
        let labels = chart.identity_labels().unwrap().unwrap();

        assert_eq!(
            labels.get("app.kubernetes.io/name").map(|v| &**v),
            Some("renamed")
        );
    }

    #[test]
    fn labels_are_an_optional_capability() {
        let chart = Chart::new("gameplay-mcp", gateway_values());
        assert!(chart.identity_labels().is_none());
    }

    #[test]
    fn names_delegate_to_resolver() {
        let mut values = gateway_values();
        values.fullname_override = Some("custom-full".to_owned());

        let chart = Chart::new("mcp-gateway", values);

        assert_eq!(chart.base_name().unwrap(), "mcp-gateway");
        assert_eq!(chart.full_name().unwrap(), "custom-full");
        assert_eq!(chart.service_account_name().unwrap(), "custom-full");
    }

    #[test]
    fn missing_chart_name_surfaces() {
        let chart = Chart::new("mcp-gateway", ChartValues::default()).with_identity_labels();

        let err = chart.identity_labels().unwrap().unwrap_err();
        assert!(matches!(err, Error::ResolveName { .. }));
    }
}
