//! The configuration value all name and label resolution is computed from.
//!
//! The shape follows a Helm `values.yaml` file merged with the chart
//! metadata the templates would otherwise read from `Chart.yaml`. Keys this
//! library does not interpret (image coordinates, ports, environment
//! variables and the like belong to the packaging layer) are carried along
//! opaquely.

use serde::{Deserialize, Serialize};
use snafu::{ResultExt, Snafu};

/// The error type for chart value deserialization.
#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("failed to deserialize chart values"))]
    DeserializeValues { source: serde_yaml::Error },
}

/// The merged configuration of one chart/component.
///
/// All resolution functions take this value by reference and are pure over
/// it. Optional fields which are present but empty are treated as "not
/// provided" everywhere.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChartValues {
    /// The default identity name of the chart. Mandatory and non-empty
    /// unless an explicit name override is supplied.
    pub chart_name: String,

    /// Explicit override of the base name.
    pub name_override: Option<String>,

    /// Explicit override of the fully-qualified name.
    pub fullname_override: Option<String>,

    /// The instance identifier of this deployment of the chart.
    pub release_name: String,

    /// Explicit override of the service-identity name. Passed through
    /// verbatim by the resolver, see
    /// [`name::service_account_name`](crate::name::service_account_name).
    pub service_account_name: Option<String>,

    /// All other keys and values.
    #[serde(flatten)]
    pub data: serde_yaml::Value,
}

impl ChartValues {
    /// Deserializes chart values from a YAML document.
    pub fn from_yaml(input: &str) -> Result<Self, Error> {
        serde_yaml::from_str(input).context(DeserializeValuesSnafu)
    }
}
