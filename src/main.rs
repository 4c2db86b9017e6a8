//! CLI entry point and command handlers for freightdesk.

mod cmd;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "freightdesk")]
#[command(version)]
#[command(about = "Market classification and role visibility for freight forwarding", long_about = None)]
#[command(
    after_help = "GETTING STARTED:\n    freightdesk init           Scaffold a project with starter criteria\n    freightdesk classify --all  Score every job order\n\n    Criteria, visibility rules, and the complex-tier threshold live in\n    .freightdesk/ and can be retuned without redeploying."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize freightdesk in the current directory
    ///
    /// TIP: Run 'freightdesk init' with no arguments for an interactive
    /// prompt. Starter criteria and visibility rules are written unless
    /// --minimal is given.
    Init {
        /// Override detected project name
        #[arg(long)]
        name: Option<String>,
        /// Overwrite existing .freightdesk/ directory
        #[arg(long)]
        force: bool,
        /// Only create config.md, no starter criteria or rules
        #[arg(long)]
        minimal: bool,
    },
    /// Add a new job order
    Add {
        /// Short description of the shipment
        description: String,
        /// Customer name
        #[arg(long)]
        customer: Option<String>,
        /// Origin port or city
        #[arg(long)]
        origin: Option<String>,
        /// Destination port or city
        #[arg(long)]
        destination: Option<String>,
        /// Set a cargo/route attribute (can be specified multiple times, format: key=value)
        #[arg(long = "attr", value_name = "KEY=VALUE")]
        attrs: Vec<String>,
    },
    /// List job orders
    List {
        /// Filter by market tier (simple, complex)
        #[arg(long)]
        market: Option<String>,
        /// Show only orders without a classification
        #[arg(long)]
        unclassified: bool,
        /// Show only the count of matching orders
        #[arg(long)]
        count: bool,
    },
    /// Show job order details
    Show {
        /// Order ID (full or partial)
        id: String,
        /// Show the full order body
        #[arg(long)]
        body: bool,
    },
    /// Classify job orders against the current criteria snapshot
    Classify {
        /// Order ID (full or partial)
        #[arg(value_name = "ID")]
        id: Option<String>,
        /// Classify every order
        #[arg(long)]
        all: bool,
        /// Emit JSON events instead of a report
        #[arg(long)]
        json: bool,
        /// Suppress non-error output
        #[arg(long)]
        quiet: bool,
    },
    /// Check whether a module or field is visible to a role
    Visibility {
        /// Module identifier (e.g. invoices, job_orders)
        module: String,
        /// Role name (omit with --anonymous)
        #[arg(value_name = "ROLE")]
        role: Option<String>,
        /// Specific field within the module
        #[arg(long)]
        field: Option<String>,
        /// Resolve for an unauthenticated viewer (always hidden)
        #[arg(long)]
        anonymous: bool,
    },
    /// Render the visibility matrix for a module
    Fields {
        /// Module identifier
        module: String,
        /// Limit to one role
        #[arg(long)]
        role: Option<String>,
    },
    /// Validate config, criteria, and visibility rules
    Lint,
    /// Watch the project and re-classify orders on change
    Watch {
        /// Run one poll iteration then exit
        #[arg(long)]
        once: bool,
        /// Override poll interval in milliseconds
        #[arg(long)]
        poll_interval: Option<u64>,
    },
    /// Show the effective merged configuration
    Config,
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
    /// Generate a man page
    Man {
        /// Output directory (default: current directory)
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
    /// Show version, commit, and build date
    Version,
}

fn main() -> Result<()> {
    // Spawn the real work on a thread with a larger stack size.
    // Windows defaults to a 1MB stack which is insufficient for this binary
    // in debug builds (Linux/macOS default to 8MB). Using 8MB here matches
    // the Linux default and prevents stack overflows on Windows CI.
    const STACK_SIZE: usize = 8 * 1024 * 1024; // 8 MB

    let thread = std::thread::Builder::new()
        .stack_size(STACK_SIZE)
        .spawn(run)
        .expect("failed to spawn main thread");

    match thread.join() {
        Ok(result) => result,
        Err(payload) => std::panic::resume_unwind(payload),
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Init {
            name,
            force,
            minimal,
        } => cmd::init::cmd_init(name, force, minimal),
        Commands::Add {
            description,
            customer,
            origin,
            destination,
            attrs,
        } => {
            cmd::ensure_initialized()?;
            cmd::order::cmd_add(
                &description,
                customer.as_deref(),
                origin.as_deref(),
                destination.as_deref(),
                &attrs,
            )
        }
        Commands::List {
            market,
            unclassified,
            count,
        } => {
            cmd::ensure_initialized()?;
            cmd::order::cmd_list(market.as_deref(), unclassified, count)
        }
        Commands::Show { id, body } => {
            cmd::ensure_initialized()?;
            cmd::order::cmd_show(&id, body)
        }
        Commands::Classify {
            id,
            all,
            json,
            quiet,
        } => {
            cmd::ensure_initialized()?;
            cmd::classify::cmd_classify(id.as_deref(), all, json, quiet)
        }
        Commands::Visibility {
            module,
            role,
            field,
            anonymous,
        } => {
            cmd::ensure_initialized()?;
            cmd::visibility::cmd_visibility(&module, role.as_deref(), field.as_deref(), anonymous)
        }
        Commands::Fields { module, role } => {
            cmd::ensure_initialized()?;
            cmd::visibility::cmd_fields(&module, role.as_deref())
        }
        Commands::Lint => {
            cmd::ensure_initialized()?;
            cmd::lint::cmd_lint()
        }
        Commands::Watch {
            once,
            poll_interval,
        } => cmd::watch::run_watch(once, poll_interval),
        Commands::Config => {
            cmd::ensure_initialized()?;
            cmd::config::cmd_config_show()
        }
        Commands::Completions { shell } => cmd::util::cmd_completions(shell),
        Commands::Man { out_dir } => cmd::util::cmd_man(out_dir.as_ref()),
        Commands::Version => cmd::util::cmd_version(),
    }
}
