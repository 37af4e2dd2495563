//! stack-dev CLI - deploy and tear down the api-stack demo application

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use stack_dev::install::ingress_nginx;
use stack_dev::utils::{Prerequisite, StackPrereqs};
use stack_dev::{log_error, log_info, log_warn};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "stack-dev")]
#[command(author, version, about = "Deploy and tear down the api-stack demo application", long_about = None)]
struct Cli {
    /// Verbose output (can be used multiple times: -v, -vv)
    /// default: INFO, -v: DEBUG, -vv: TRACE
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Deploy the full topology (prereqs, manifests, rollout wait, status)
    Deploy {
        /// Directory containing the ordered manifests
        #[arg(long, default_value = "k8s")]
        manifests: PathBuf,
    },

    /// Delete the api-stack namespace after interactive confirmation
    Cleanup,

    /// Check prerequisites without changing anything
    Check,

    /// Show the current resource inventory
    Status,

    /// Generate shell completion scripts
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Show version information
    Version,
}

fn main() {
    let cli = Cli::parse();

    // Set up logging based on verbosity level
    let log_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)),
        )
        .with_target(false)
        .without_time()
        .init();

    let result = match cli.command {
        Commands::Deploy { manifests } => stack_dev::commands::deploy::run(&manifests),
        Commands::Cleanup => stack_dev::commands::cleanup::run(),
        Commands::Check => handle_check_command(),
        Commands::Status => stack_dev::commands::status::run(),
        Commands::Completion { shell } => handle_completion_command(shell),
        Commands::Version => handle_version_command(),
    };

    if let Err(e) = result {
        log_error!("{:#}", e);
        if let Some(err) = e.downcast_ref::<stack_dev::utils::OrchestrationError>()
            && let Some(hint) = err.hint()
        {
            log_error!("Hint: {}", hint);
        }
        std::process::exit(1);
    }
}

fn handle_check_command() -> anyhow::Result<()> {
    log_info!("Checking prerequisites...");

    let kubectl = StackPrereqs::kubectl();
    let helm = StackPrereqs::helm();
    let prereqs: Vec<&dyn Prerequisite> = vec![&kubectl, &helm];

    let (found, missing) = StackPrereqs::check_all(&prereqs);

    for name in &found {
        log_info!("✓ {} found", name);
    }
    for (name, hint) in &missing {
        log_warn!("✗ {} not found. {}", name, hint);
    }

    // helm is only needed when the ingress controller is missing
    if missing.iter().any(|(name, _)| name == "kubectl") {
        anyhow::bail!("kubectl is required");
    }

    let cp = stack_dev::k8s::KubectlClient::new();
    let ctx = stack_dev::utils::prereqs::check_cluster(&cp)?;

    log_info!("Cluster context: {}", ctx.context_name);
    log_info!("Ingress-nginx ({}): {}", ingress_nginx::NAMESPACE, ctx.ingress);
    log_info!(
        "Metrics-server: {}",
        if ctx.metrics_server_present {
            "present"
        } else {
            "absent"
        }
    );
    log_info!("✓ All fatal prerequisites satisfied!");
    Ok(())
}

fn handle_completion_command(shell: Shell) -> anyhow::Result<()> {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "stack-dev", &mut io::stdout());
    Ok(())
}

fn handle_version_command() -> anyhow::Result<()> {
    println!("stack-dev {}", env!("CARGO_PKG_VERSION"));
    println!("Deploy/teardown CLI for the api-stack demo application");
    Ok(())
}
