//! Override/default resolution of chart names.
//!
//! Kubernetes resource names must fit into an RFC 1123 label, which limits
//! them to 63 characters. Resolved names are cut down to that length with a
//! plain prefix cut and a dash exposed at the cut point is stripped, so the
//! result stays a legal name.

use snafu::{ensure, Snafu};
use tracing::instrument;

use crate::values::ChartValues;

/// Maximum length of a Kubernetes resource name (RFC 1123 label).
pub const RFC_1123_LABEL_MAX_LENGTH: usize = 63;

/// The error type for name resolution.
#[derive(Debug, PartialEq, Snafu)]
pub enum Error {
    /// Indicates that a mandatory chart value is absent or empty. Absent
    /// *overrides* are never an error, only the default name source is
    /// required.
    #[snafu(display("required chart value {field:?} is missing or empty"))]
    MissingRequiredField { field: &'static str },
}

/// Resolves the base name of the chart.
///
/// An explicit, non-empty `nameOverride` wins over the chart name. The
/// result is cut to [`RFC_1123_LABEL_MAX_LENGTH`] characters and stripped
/// of a trailing dash.
#[instrument(level = "trace", skip(values), fields(chart_name = %values.chart_name))]
pub fn base_name(values: &ChartValues) -> Result<String, Error> {
    let name = match provided(&values.name_override) {
        Some(name_override) => {
            tracing::trace!(name_override, "using explicit name override");
            name_override
        }
        None => {
            ensure!(
                !values.chart_name.is_empty(),
                MissingRequiredFieldSnafu {
                    field: "chartName"
                }
            );
            &values.chart_name
        }
    };

    Ok(shorten(name).to_owned())
}

/// Resolves the fully-qualified name of the chart.
///
/// An explicit, non-empty `fullnameOverride` wins. Without one the
/// fully-qualified name collapses to [`base_name`]. There is no
/// release-name concatenation step, matching the charts this library
/// replaces rather than the more common `release-chart` convention.
#[instrument(level = "trace", skip(values), fields(chart_name = %values.chart_name))]
pub fn full_name(values: &ChartValues) -> Result<String, Error> {
    match provided(&values.fullname_override) {
        Some(fullname_override) => {
            tracing::trace!(fullname_override, "using explicit fullname override");
            Ok(shorten(fullname_override).to_owned())
        }
        None => base_name(values),
    }
}

/// Resolves the service-identity name of the chart.
///
/// An explicit, non-empty `serviceAccountName` is returned verbatim,
/// without the length cut. Without one the name falls back to
/// [`full_name`], which already guarantees a legal name.
#[instrument(level = "trace", skip(values), fields(chart_name = %values.chart_name))]
pub fn service_account_name(values: &ChartValues) -> Result<String, Error> {
    match provided(&values.service_account_name) {
        Some(account_name) => Ok(account_name.to_owned()),
        None => full_name(values),
    }
}

/// Cuts `name` down to at most [`RFC_1123_LABEL_MAX_LENGTH`] characters and
/// strips one trailing dash such a cut can expose.
fn shorten(name: &str) -> &str {
    let cut = match name.char_indices().nth(RFC_1123_LABEL_MAX_LENGTH) {
        Some((at, _)) => &name[..at],
        None => name,
    };

    cut.strip_suffix('-').unwrap_or(cut)
}

/// Returns the inner value only if it is set and non-empty.
fn provided(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|value| !value.is_empty())
}
