//! Cleanup command implementation
//!
//! Tears down the api-stack namespace and everything inside it. The delete is
//! gated on an exact typed confirmation; declining is a normal exit, not an
//! error. The post-delete wait is bounded so stuck finalizers surface as a
//! failure instead of an infinite loop.

use anyhow::Result;
use colored::Colorize;
use std::thread;
use std::time::{Duration, Instant};

use crate::config::topology;
use crate::k8s::{ControlPlane, KubectlClient};
use crate::utils::errors::OrchestrationError;
use crate::utils::prereqs::{self, Prerequisite, StackPrereqs};
use crate::utils::progress::WaitProgress;
use crate::utils::prompt;

/// How a cleanup request ended
#[derive(Debug, PartialEq, Eq)]
pub enum CleanupOutcome {
    /// Operator declined the confirmation; nothing was touched
    Cancelled,
    /// Namespace deleted and confirmed gone
    Deleted,
}

/// Handle the cleanup command
pub fn run() -> Result<()> {
    if let Err(e) = StackPrereqs::kubectl().check() {
        return Err(OrchestrationError::FatalPrerequisite(format!(
            "{}. {}",
            e,
            StackPrereqs::kubectl().install_hint()
        ))
        .into());
    }

    let cp = KubectlClient::new();
    prereqs::check_connectivity(&cp)?;

    let context = cp.current_context().unwrap_or_else(|_| "unknown".to_string());
    println!();
    println!("Active cluster context: {}", context.bold());
    println!(
        "{}",
        format!(
            "WARNING: this deletes namespace '{}' and every resource inside it.",
            topology::NAMESPACE
        )
        .red()
        .bold()
    );
    println!();

    let answer = prompt::read_line(&format!(
        "Type '{}' to continue, anything else to cancel:",
        prompt::CONFIRM_TOKEN
    ))?;

    let outcome = teardown(
        &cp,
        &answer,
        topology::DELETION_POLL_INTERVAL,
        topology::DELETION_TIMEOUT,
    )?;

    match outcome {
        CleanupOutcome::Cancelled => {
            crate::log_info!("Cleanup cancelled; nothing was deleted");
        }
        CleanupOutcome::Deleted => {
            print_remaining_namespaces(&cp);
            crate::log_info!("Cleanup complete!");
        }
    }

    Ok(())
}

/// Confirmation-gated teardown against any control plane.
///
/// Anything but the exact confirmation token cancels without a single delete
/// call. Deleting an already-absent namespace is success.
pub fn teardown(
    cp: &dyn ControlPlane,
    answer: &str,
    poll_interval: Duration,
    bound: Duration,
) -> Result<CleanupOutcome, OrchestrationError> {
    if !prompt::is_confirmed(answer) {
        return Ok(CleanupOutcome::Cancelled);
    }

    crate::log_info!("Deleting namespace {} (cascading)...", topology::NAMESPACE);

    let out = cp
        .delete_namespace(topology::NAMESPACE, true)
        .map_err(|e| OrchestrationError::DeletionFailed {
            namespace: topology::NAMESPACE.to_string(),
            detail: e.to_string(),
        })?;

    if !out.succeeded {
        return Err(OrchestrationError::DeletionFailed {
            namespace: topology::NAMESPACE.to_string(),
            detail: out.diagnostic(),
        });
    }

    wait_namespace_gone(cp, topology::NAMESPACE, poll_interval, bound)?;
    Ok(CleanupOutcome::Deleted)
}

/// Poll until the namespace no longer exists, bounded.
///
/// Probe errors count as "still present": the namespace's truth lives in the
/// control plane, and a flaky probe must not be mistaken for deletion.
pub fn wait_namespace_gone(
    cp: &dyn ControlPlane,
    namespace: &str,
    poll_interval: Duration,
    bound: Duration,
) -> Result<(), OrchestrationError> {
    let start = Instant::now();
    let wp = WaitProgress::new(&format!("namespace/{}", namespace), "gone");

    loop {
        match cp.namespace_exists(namespace) {
            Ok(false) => {
                wp.finish_success("deleted");
                return Ok(());
            }
            Ok(true) => {}
            Err(e) => {
                crate::log_warn!("Namespace probe failed ({}), retrying", e);
            }
        }

        if start.elapsed() >= bound {
            wp.finish_error("still present");
            return Err(OrchestrationError::DeletionTimeout {
                namespace: namespace.to_string(),
                waited: bound,
            });
        }

        wp.update(&format!(
            "still terminating ({}s elapsed)",
            start.elapsed().as_secs()
        ));
        thread::sleep(poll_interval);
    }
}

/// Best-effort listing of what is left on the cluster
fn print_remaining_namespaces(cp: &dyn ControlPlane) {
    match cp.get_resources("namespaces", "") {
        Ok(out) if out.succeeded => {
            println!();
            println!("Remaining namespaces:");
            println!("{}", out.stdout.trim_end());
        }
        _ => crate::log_warn!("Could not list remaining namespaces"),
    }
}
