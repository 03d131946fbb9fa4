//! Resolution of canonical, Kubernetes-compatible resource names and
//! identity labels for Helm-deployed components.
//!
//! A [`values::ChartValues`] value carries the user-supplied overrides and
//! chart metadata. The [`name`] module applies the override/default chain
//! and the platform length limit to produce legal resource names, and the
//! [`chart`] module bundles everything into a single component abstraction
//! with optional identity label composition on top of the validated
//! key/value machinery in [`kvp`].

pub mod chart;
pub mod kvp;
pub mod name;
pub mod values;

pub use chart::Chart;
pub use values::ChartValues;
