//! Fixed application topology
//!
//! The namespace, manifest order, and rollout targets are deliberately static:
//! the tool deploys exactly one known topology, and the apply order encodes
//! its dependencies (namespace first, cache tier before the API tier that
//! consumes it, routing and autoscaling last).

use std::path::{Path, PathBuf};
use std::time::Duration;

/// Namespace everything in the topology lives in
pub const NAMESPACE: &str = "api-stack";

/// Cache-tier deployment name
pub const CACHE_DEPLOYMENT: &str = "redis-cache";

/// API-tier deployment name
pub const API_DEPLOYMENT: &str = "api-server";

/// Default directory holding the manifests, relative to the working directory
pub const DEFAULT_MANIFEST_DIR: &str = "k8s";

/// Per-deployment rollout readiness bound
pub const ROLLOUT_TIMEOUT: Duration = Duration::from_secs(300);

/// Sleep between namespace-deletion probes
pub const DELETION_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Overall bound on waiting for the namespace to disappear
pub const DELETION_TIMEOUT: Duration = Duration::from_secs(300);

/// Manifest file names in their single total apply order
pub const MANIFEST_ORDER: [&str; 10] = [
    "00-namespace.yaml",
    "01-configmap.yaml",
    "02-secret.yaml",
    "03-redis-deployment.yaml",
    "04-redis-service.yaml",
    "05-api-deployment.yaml",
    "06-api-service.yaml",
    "07-ingress.yaml",
    "08-hpa.yaml",
    "09-networkpolicy.yaml",
];

/// One declarative resource definition to apply
#[derive(Debug, Clone)]
pub struct ResourceDefinition {
    pub name: String,
    pub path: PathBuf,
}

/// Resolve the ordered manifest list against a manifest directory
pub fn manifests(dir: &Path) -> Vec<ResourceDefinition> {
    MANIFEST_ORDER
        .iter()
        .map(|name| ResourceDefinition {
            name: (*name).to_string(),
            path: dir.join(name),
        })
        .collect()
}

/// A deployment whose rollout must complete before the run succeeds
#[derive(Debug, Clone)]
pub struct DeploymentTarget {
    pub name: &'static str,
    pub namespace: &'static str,
    pub timeout: Duration,
}

/// Rollout targets in evaluation order: cache tier first, since the API tier
/// depends on it
pub fn rollout_targets() -> [DeploymentTarget; 2] {
    [
        DeploymentTarget {
            name: CACHE_DEPLOYMENT,
            namespace: NAMESPACE,
            timeout: ROLLOUT_TIMEOUT,
        },
        DeploymentTarget {
            name: API_DEPLOYMENT,
            namespace: NAMESPACE,
            timeout: ROLLOUT_TIMEOUT,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_order_is_stable() {
        let defs = manifests(Path::new("k8s"));
        assert_eq!(defs.len(), 10);
        assert_eq!(defs[0].name, "00-namespace.yaml");
        assert_eq!(defs[9].name, "09-networkpolicy.yaml");
        // Cache tier is applied before the API tier that depends on it.
        let redis = defs.iter().position(|d| d.name.contains("redis-deployment"));
        let api = defs.iter().position(|d| d.name.contains("api-deployment"));
        assert!(redis.unwrap() < api.unwrap());
    }

    #[test]
    fn test_manifest_paths_join_dir() {
        let defs = manifests(Path::new("/tmp/m"));
        assert_eq!(defs[3].path, Path::new("/tmp/m/03-redis-deployment.yaml"));
    }

    #[test]
    fn test_rollout_targets_cache_tier_first() {
        let targets = rollout_targets();
        assert_eq!(targets[0].name, CACHE_DEPLOYMENT);
        assert_eq!(targets[1].name, API_DEPLOYMENT);
        assert!(targets.iter().all(|t| t.namespace == NAMESPACE));
        assert!(targets.iter().all(|t| t.timeout == ROLLOUT_TIMEOUT));
    }
}
