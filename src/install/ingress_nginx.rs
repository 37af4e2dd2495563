//! Conditional ingress-nginx installation
//!
//! The deploy path needs an ingress controller for the ingress manifest to do
//! anything. If one is missing we try a helm install, but the outcome is
//! best-effort: the cluster is not re-probed afterwards, and nothing here ever
//! aborts the run. The tagged outcome is surfaced in the deploy summary so
//! the operator knows exactly what happened.

use crate::k8s::{exec, ControlPlane};
use crate::utils::prereqs::{Prerequisite, StackPrereqs};
use std::fmt;

/// Namespace the ingress controller lives in
pub const NAMESPACE: &str = "ingress-nginx";

const HELM_REPO: &str = "https://kubernetes.github.io/ingress-nginx";

/// What happened to the ingress controller during the prerequisite check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngressOutcome {
    /// The ingress-nginx namespace already existed
    AlreadyPresent,
    /// Helm install exited successfully (not re-verified against the cluster)
    Installed,
    /// Helm install was attempted but exited non-zero; the run continues
    InstallUnverified,
    /// No helm binary available; manual instructions were printed
    SkippedNoHelm,
}

impl fmt::Display for IngressOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::AlreadyPresent => "already present",
            Self::Installed => "installed via helm",
            Self::InstallUnverified => "install attempted, unverified",
            Self::SkippedNoHelm => "skipped (helm not found)",
        };
        write!(f, "{}", text)
    }
}

/// Make sure an ingress controller is around, installing one if we can
pub fn ensure(cp: &dyn ControlPlane) -> IngressOutcome {
    ensure_with(cp, &StackPrereqs::helm())
}

fn ensure_with(cp: &dyn ControlPlane, helm: &dyn Prerequisite) -> IngressOutcome {
    match cp.namespace_exists(NAMESPACE) {
        Ok(true) => {
            crate::log_info!("ingress-nginx namespace already exists, skipping installation");
            return IngressOutcome::AlreadyPresent;
        }
        Ok(false) => {}
        Err(e) => {
            // Probe failure is not fatal; assume absent and try to remediate.
            crate::log_warn!("Could not probe for ingress-nginx namespace: {}", e);
        }
    }

    if helm.check().is_err() {
        crate::log_warn!("ingress-nginx is not installed and helm was not found");
        println!();
        println!("{}", helm.install_hint());
        println!("Then install the ingress controller manually and re-run deploy:");
        println!("  helm repo add ingress-nginx {}", HELM_REPO);
        println!(
            "  helm install ingress-nginx ingress-nginx/ingress-nginx \\\n    \
             --namespace {} --create-namespace",
            NAMESPACE
        );
        println!();
        return IngressOutcome::SkippedNoHelm;
    }

    crate::log_info!("Installing ingress-nginx via helm...");

    // Repo may already be registered; that failure mode is uninteresting.
    exec::run("helm", &["repo", "add", "ingress-nginx", HELM_REPO]).ok();
    exec::run("helm", &["repo", "update"]).ok();

    let install = exec::run(
        "helm",
        &[
            "upgrade",
            "--install",
            "ingress-nginx",
            "ingress-nginx/ingress-nginx",
            "--namespace",
            NAMESPACE,
            "--create-namespace",
        ],
    );

    match install {
        Ok(out) if out.succeeded => {
            crate::log_info!("ingress-nginx installed");
            IngressOutcome::Installed
        }
        Ok(out) => {
            crate::log_warn!(
                "ingress-nginx install did not complete cleanly: {}",
                out.diagnostic()
            );
            crate::log_warn!("Continuing; the ingress resource may stay unsatisfied");
            IngressOutcome::InstallUnverified
        }
        Err(e) => {
            crate::log_warn!("Could not run helm: {}", e);
            IngressOutcome::InstallUnverified
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::k8s::fake::FakeControlPlane;
    use crate::utils::prereqs::CommandPrereq;

    #[test]
    fn test_missing_installer_skips_without_running_anything() {
        // Detection goes through the shared Prerequisite seam, so an absent
        // installer yields the skipped outcome and its hint, never an install.
        let cp = FakeControlPlane::default();
        let absent = CommandPrereq::new("nonexistent-tool-xyz", "Test hint");
        assert_eq!(ensure_with(&cp, &absent), IngressOutcome::SkippedNoHelm);
    }

    #[test]
    fn test_existing_namespace_short_circuits() {
        let cp = FakeControlPlane {
            namespaces: vec![NAMESPACE.to_string()],
            ..Default::default()
        };
        assert_eq!(ensure(&cp), IngressOutcome::AlreadyPresent);
    }

    #[test]
    fn test_outcome_display() {
        assert_eq!(IngressOutcome::SkippedNoHelm.to_string(), "skipped (helm not found)");
        assert_eq!(
            IngressOutcome::InstallUnverified.to_string(),
            "install attempted, unverified"
        );
    }
}
