//! kdelta - live Kubernetes resource tables with change highlighting
//!
//! Lists resources the way a k9s view does and shows which cells changed
//! since the previous refresh.

use anyhow::Result;
use clap::{Parser, Subcommand};

use kdelta::cli::{self, ConfigSubcommand, RunArgs};
use kdelta::config::ConfigLoader;

/// kdelta - live Kubernetes resource tables with change highlighting
#[derive(Parser, Debug)]
#[command(name = "kdelta")]
#[command(version)]
#[command(args_conflicts_with_subcommands = true)]
#[command(about = "Live Kubernetes resource tables with change highlighting", long_about = None)]
struct Args {
    /// Enable debug logging
    #[arg(long, short = 'd')]
    debug: bool,

    /// Configuration subcommand
    #[command(subcommand)]
    command: Option<Command>,

    /// Kinds to list (e.g. "role", "cm", "deploy")
    kinds: Vec<String>,

    /// Namespace to list in
    #[arg(long, short = 'n')]
    namespace: Option<String>,

    /// List across all namespaces
    #[arg(long, short = 'A')]
    all_namespaces: bool,

    /// Reconcile once, print and exit
    #[arg(long)]
    once: bool,

    /// Describe one object (`namespace/name` or `name`) of the first kind
    #[arg(long, value_name = "PATH", conflicts_with_all = ["yaml", "xray"])]
    describe: Option<String>,

    /// Print one object of the first kind as YAML
    #[arg(long, value_name = "PATH", conflicts_with = "xray")]
    yaml: Option<String>,

    /// Break one object of the first kind into its related items (role rules,
    /// deployment containers)
    #[arg(long, value_name = "PATH", visible_alias = "rbac")]
    xray: Option<String>,

    /// Restrict every list to read-only verbs
    #[arg(long)]
    read_only: bool,
}

/// Main commands
#[derive(Subcommand, Debug)]
enum Command {
    /// Configuration management
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(Command::Config { subcommand }) = args.command {
        return cli::handle_config_command(subcommand);
    }

    if let Some(log_path) = cli::init_logging(args.debug)? {
        eprintln!(
            "Debug logging enabled. Logs written to: {}",
            log_path.display()
        );
    }

    let config = ConfigLoader::load().unwrap_or_else(|e| {
        tracing::warn!("Failed to load configuration: {:#}, using defaults", e);
        ConfigLoader::load_defaults()
    });
    tracing::debug!(
        "Configuration loaded: readOnly={}, refreshRate={}s",
        config.read_only,
        config.refresh_rate
    );

    let run_args = RunArgs {
        kinds: args.kinds,
        namespace: args.namespace,
        all_namespaces: args.all_namespaces,
        once: args.once,
        read_only: args.read_only,
        describe: args.describe,
        yaml: args.yaml,
        xray: args.xray,
    };

    cli::run(run_args, config).await
}
