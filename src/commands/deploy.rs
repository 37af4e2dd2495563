//! Deploy command implementation
//!
//! Pipeline: prerequisite check → ordered manifest apply (fail-fast) →
//! sequential rollout waits (cache tier, then API tier) → status report.
//! Nothing is rolled back on failure; whatever applied stays applied.

use anyhow::Result;
use colored::Colorize;
use std::path::Path;

use crate::commands::status;
use crate::config::topology::{self, DeploymentTarget, ResourceDefinition};
use crate::k8s::{ControlPlane, KubectlClient};
use crate::utils::errors::OrchestrationError;
use crate::utils::prereqs::{self, ClusterContext, Prerequisite, StackPrereqs};
use crate::utils::progress::WaitProgress;

/// Handle the deploy command
pub fn run(manifest_dir: &Path) -> Result<()> {
    if let Err(e) = StackPrereqs::kubectl().check() {
        return Err(OrchestrationError::FatalPrerequisite(format!(
            "{}. {}",
            e,
            StackPrereqs::kubectl().install_hint()
        ))
        .into());
    }

    crate::log_info!("Deploying the api-stack topology from {}", manifest_dir.display());

    let cp = KubectlClient::new();
    let defs = topology::manifests(manifest_dir);
    let ctx = execute(&cp, &defs)?;

    status::report(&cp, topology::NAMESPACE);
    print_summary(&ctx);

    Ok(())
}

/// Run the deploy pipeline against any control plane
pub fn execute(
    cp: &dyn ControlPlane,
    defs: &[ResourceDefinition],
) -> Result<ClusterContext, OrchestrationError> {
    let ctx = prereqs::check_cluster(cp)?;

    apply_manifests(cp, defs)?;

    for target in topology::rollout_targets() {
        wait_for_rollout(cp, &target)?;
    }

    Ok(ctx)
}

/// Apply every definition in declared order, stopping at the first failure.
///
/// Definition i+1 is never attempted until definition i has applied cleanly.
pub fn apply_manifests(
    cp: &dyn ControlPlane,
    defs: &[ResourceDefinition],
) -> Result<(), OrchestrationError> {
    for def in defs {
        if !def.path.exists() {
            return Err(OrchestrationError::ManifestMissing(def.path.clone()));
        }

        crate::log_info!("Applying {}...", def.name);

        let out = cp
            .apply_manifest(&def.path)
            .map_err(|e| OrchestrationError::ApplyFailed {
                name: def.name.clone(),
                path: def.path.clone(),
                detail: e.to_string(),
            })?;

        if !out.succeeded {
            return Err(OrchestrationError::ApplyFailed {
                name: def.name.clone(),
                path: def.path.clone(),
                detail: out.diagnostic(),
            });
        }
    }

    crate::log_info!("All {} manifests applied", defs.len());
    Ok(())
}

/// Block until one deployment's rollout completes or its bound elapses
pub fn wait_for_rollout(
    cp: &dyn ControlPlane,
    target: &DeploymentTarget,
) -> Result<(), OrchestrationError> {
    let wp = WaitProgress::new(&format!("deployment/{}", target.name), "ready");

    let out = cp
        .rollout_status("deployment", target.name, target.namespace, target.timeout)
        .map_err(|e| {
            OrchestrationError::FatalPrerequisite(format!("Failed to invoke kubectl: {}", e))
        })?;

    if out.succeeded {
        wp.finish_success("ready");
        Ok(())
    } else {
        wp.finish_error(&out.diagnostic());
        Err(OrchestrationError::RolloutTimeout {
            name: target.name.to_string(),
            namespace: target.namespace.to_string(),
            timeout: target.timeout,
        })
    }
}

fn print_summary(ctx: &ClusterContext) {
    println!();
    println!("{}", "==========================================".green());
    println!("{}", "Deployment completed successfully!".green().bold());
    println!("{}", "==========================================".green());
    println!();
    println!("  Cluster context:  {}", ctx.context_name);
    println!("  Namespace:        {}", topology::NAMESPACE);
    println!("  Ingress-nginx:    {}", ctx.ingress);
    println!(
        "  Metrics-server:   {}",
        if ctx.metrics_server_present {
            "present".to_string()
        } else {
            "absent (autoscaling inactive)".to_string()
        }
    );
    println!();
}
