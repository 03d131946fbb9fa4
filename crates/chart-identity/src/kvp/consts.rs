//! Well-known label keys used by standard Kubernetes conventions.

use const_format::concatcp;

/// The well-known Kubernetes app key prefix.
const K8S_APP_KEY_PREFIX: &str = "app.kubernetes.io/";

/// The well-known Kubernetes app name key `app.kubernetes.io/name`. It is
/// used to label the application with a name, e.g. `mcp-gateway`.
pub const K8S_APP_NAME_KEY: &str = concatcp!(K8S_APP_KEY_PREFIX, "name");

/// The well-known Kubernetes app instance key `app.kubernetes.io/instance`.
/// It is used to identify the instance of an application, e.g. `prod`.
pub const K8S_APP_INSTANCE_KEY: &str = concatcp!(K8S_APP_KEY_PREFIX, "instance");
