//! allergen-tools: allergen catalog viewer
//!
//! Loads loosely structured product catalogs, filters them by allergen and
//! keeps the last catalog and the application shell available offline.

#![allow(clippy::too_many_lines, clippy::needless_pass_by_value)]

use allergen_tools::{
    cli::{self, ShellAction},
    config::{self, AppConfig, Validatable},
    model::FilterMode,
    pipeline::exit_codes,
    reports::ReportFormat,
};
use anyhow::{Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Build long version string with format support info
const fn build_long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        "\n\nAccepted catalog shapes:",
        "\n  [ products ], { \"products\": [...] }, { id: product }, single product",
        "\n\nOutput Formats:",
        "\n  tui, summary, table, json"
    )
}

#[derive(Parser)]
#[command(name = "allergen-tools")]
#[command(version, long_version = build_long_version())]
#[command(about = "Allergen catalog viewer", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Success
    1  Filter or lookup matched nothing
    2  Error occurred

EXAMPLES:
    # Load a catalog and browse it interactively
    allergen-tools view katalog.json

    # Products without gluten or milk, from the persisted catalog
    allergen-tools filter --allergen Gluten,Milch --mode suitable

    # Allergens of one product
    allergen-tools lookup \"Roggenbrot\"

    # Refresh the offline application shell
    allergen-tools shell update --origin https://allergene.example")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output (also respects `NO_COLOR` env)
    #[arg(long, global = true)]
    no_color: bool,

    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory of the persisted catalog
    #[arg(long, global = true, env = "ALLERGEN_TOOLS_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Neither read nor write the persisted catalog
    #[arg(long, global = true)]
    no_persist: bool,

    #[command(subcommand)]
    command: Commands,
}

// ============================================================================
// Command argument structs
// ============================================================================

/// Selection and output arguments shared by `view` and `filter`
#[derive(Args)]
struct FilterArgs {
    /// Catalog file to load (restores the persisted catalog if omitted)
    file: Option<PathBuf>,

    /// Allergens to select, matched exactly (comma-separated or repeated)
    #[arg(short, long = "allergen", value_delimiter = ',')]
    allergens: Vec<String>,

    /// Filter mode
    #[arg(short, long)]
    mode: Option<FilterMode>,

    /// Output format (auto detects TTY: tui if interactive, summary otherwise)
    #[arg(short, long)]
    output: Option<ReportFormat>,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,
}

/// Arguments shared by the `shell` actions
#[derive(Args)]
struct ShellArgs {
    /// Origin the shell is served from
    #[arg(long)]
    origin: Option<String>,

    /// Cache directory
    #[arg(long, env = "ALLERGEN_TOOLS_CACHE_DIR")]
    cache_dir: Option<PathBuf>,

    /// Never touch the network
    #[arg(long)]
    offline: bool,

    /// Cache version to install or serve
    #[arg(long = "cache-version")]
    cache_version: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Load or restore a catalog and browse it
    View(FilterArgs),

    /// Load a catalog file and persist it
    Load {
        /// Catalog file
        file: PathBuf,
    },

    /// Delete the persisted catalog
    Clear,

    /// Print the allergens of a catalog
    Allergens {
        /// Catalog file (restores the persisted catalog if omitted)
        file: Option<PathBuf>,

        /// Print a JSON array
        #[arg(long)]
        json: bool,
    },

    /// Print the products visible for a selection
    Filter(FilterArgs),

    /// Print the allergens of the product with this name or id
    Lookup {
        /// Product name or id (case-insensitive, exact)
        query: String,

        /// Catalog file (restores the persisted catalog if omitted)
        file: Option<PathBuf>,
    },

    /// Manage the offline application shell cache
    Shell {
        #[command(subcommand)]
        action: ShellCommand,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Generate JSON Schema for the config file format
    ConfigSchema {
        /// Write schema to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show, discover, or initialize configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ShellCommand {
    /// Cache the manifest assets and drop older versions
    Update(ShellArgs),
    /// Resolve one request the way the shell would
    Fetch {
        /// Absolute URL or path under the origin
        target: String,

        /// Treat the request as a page navigation
        #[arg(long)]
        navigate: bool,

        /// Write the body to a file instead of stdout
        #[arg(short = 'O', long)]
        output_file: Option<PathBuf>,

        #[command(flatten)]
        shell: ShellArgs,
    },
    /// Print cache version, state and size
    Status {
        /// Print JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        shell: ShellArgs,
    },
}

/// Sub-subcommands for the `config` command
#[derive(Subcommand)]
enum ConfigAction {
    /// Print current effective configuration (merged from defaults + file)
    Show,
    /// Print config file search paths and discovered config file
    Path,
    /// Generate an example .allergen-tools.yaml in the current directory
    Init,
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging; stdout stays reserved for reports
    let log_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();

    let exit_code = match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            exit_codes::ERROR
        }
    };
    std::process::exit(exit_code);
}

/// Load the config file and apply the global flags on top of it.
fn load_config(cli: &Cli) -> Result<AppConfig> {
    let mut builder = AppConfig::builder()
        .persist(!cli.no_persist)
        .no_color(cli.no_color || std::env::var_os("NO_COLOR").is_some());
    if let Some(dir) = &cli.data_dir {
        builder = builder.data_dir(dir);
    }
    let overrides = builder.build();

    let (config, loaded_from) = AppConfig::from_file_with_overrides(cli.config.as_deref(), &overrides);
    if let Some(path) = &loaded_from {
        tracing::debug!("Loaded config from {}", path.display());
    }

    let errors = config.validate();
    if !errors.is_empty() {
        let list: Vec<String> = errors.iter().map(ToString::to_string).collect();
        anyhow::bail!("invalid configuration:\n  {}", list.join("\n  "));
    }
    Ok(config)
}

fn apply_filter_args(config: &mut AppConfig, args: &FilterArgs) {
    if !args.allergens.is_empty() {
        config.filter.allergens = args
            .allergens
            .iter()
            .filter(|a| !a.is_empty())
            .cloned()
            .collect();
    }
    if let Some(mode) = args.mode {
        config.filter.mode = mode;
    }
    if let Some(format) = args.output {
        config.output.format = format;
    }
    if args.output_file.is_some() {
        config.output.file.clone_from(&args.output_file);
    }
}

fn apply_shell_args(config: &mut AppConfig, args: &ShellArgs) {
    if let Some(origin) = &args.origin {
        config.shell.manifest.origin = origin.trim_end_matches('/').to_string();
    }
    if args.cache_dir.is_some() {
        config.shell.cache_dir.clone_from(&args.cache_dir);
    }
    if args.offline {
        config.shell.offline = true;
    }
    if let Some(version) = &args.cache_version {
        config.shell.manifest.version.clone_from(version);
    }
}

fn run(cli: Cli) -> Result<i32> {
    match &cli.command {
        Commands::Completions { shell } => {
            generate(*shell, &mut Cli::command(), "allergen-tools", &mut io::stdout());
            return Ok(exit_codes::SUCCESS);
        }
        Commands::ConfigSchema { output } => {
            let schema = config::generate_json_schema()?;
            match output {
                Some(path) => {
                    std::fs::write(path, &schema)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    eprintln!("Schema written to {}", path.display());
                }
                None => println!("{schema}"),
            }
            return Ok(exit_codes::SUCCESS);
        }
        Commands::Config { action } => return run_config(&cli, action),
        _ => {}
    }

    let mut config = load_config(&cli)?;
    let quiet = cli.quiet;

    match cli.command {
        Commands::View(args) => {
            apply_filter_args(&mut config, &args);
            cli::run_view(&config, args.file.as_deref(), quiet)
        }
        Commands::Load { file } => cli::run_load(&config, &file, quiet),
        Commands::Clear => cli::run_clear(&config, quiet),
        Commands::Allergens { file, json } => cli::run_allergens(&config, file.as_deref(), json),
        Commands::Filter(args) => {
            apply_filter_args(&mut config, &args);
            cli::run_filter(&config, args.file.as_deref(), quiet)
        }
        Commands::Lookup { query, file } => cli::run_lookup(&config, &query, file.as_deref()),
        Commands::Shell { action } => {
            let (shell_args, action) = match action {
                ShellCommand::Update(shell) => (shell, ShellAction::Update),
                ShellCommand::Fetch {
                    target,
                    navigate,
                    output_file,
                    shell,
                } => (
                    shell,
                    ShellAction::Fetch {
                        target,
                        navigate,
                        output: output_file,
                    },
                ),
                ShellCommand::Status { json, shell } => (shell, ShellAction::Status { json }),
            };
            apply_shell_args(&mut config, &shell_args);
            cli::run_shell(&config.shell, action, quiet)
        }
        Commands::Completions { .. } | Commands::ConfigSchema { .. } | Commands::Config { .. } => {
            Ok(exit_codes::SUCCESS)
        }
    }
}

fn run_config(cli: &Cli, action: &ConfigAction) -> Result<i32> {
    match action {
        ConfigAction::Show => {
            let (config, loaded_from) = config::load_or_default(cli.config.as_deref());
            if let Some(path) = &loaded_from {
                eprintln!("# Loaded from: {}", path.display());
            } else {
                eprintln!("# No config file found; showing defaults");
            }
            let yaml = serde_yaml::to_string(&config).context("failed to serialize config")?;
            print!("{yaml}");
        }
        ConfigAction::Path => {
            let search_paths: [Option<String>; 3] = [
                std::env::current_dir()
                    .ok()
                    .map(|p| p.display().to_string()),
                config::file::user_config_dir().map(|p| p.display().to_string()),
                ::dirs::home_dir().map(|p| p.display().to_string()),
            ];
            eprintln!("Config file search paths (in order):");
            for path in search_paths.into_iter().flatten() {
                eprintln!("  {path}");
            }
            eprintln!();
            eprintln!("Recognized file names:");
            for name in config::file::CONFIG_FILE_NAMES {
                eprintln!("  {name}");
            }
            eprintln!();
            match config::discover_config_file(cli.config.as_deref()) {
                Some(path) => eprintln!("Active config file: {}", path.display()),
                None => eprintln!("No config file found."),
            }
        }
        ConfigAction::Init => {
            let target = std::env::current_dir()
                .context("cannot determine current directory")?
                .join(".allergen-tools.yaml");
            if target.exists() {
                anyhow::bail!(
                    "{} already exists. Remove it first to re-initialize.",
                    target.display()
                );
            }
            let content = config::generate_full_example_config();
            std::fs::write(&target, content)
                .with_context(|| format!("failed to write {}", target.display()))?;
            eprintln!("Created {}", target.display());
        }
    }
    Ok(exit_codes::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_filter_args_parse() {
        let cli = Cli::parse_from([
            "allergen-tools",
            "filter",
            "katalog.json",
            "--allergen",
            "Gluten,Milch,",
            "--mode",
            "contains",
        ]);
        let Commands::Filter(args) = cli.command else {
            panic!("expected filter");
        };
        let mut config = AppConfig::default();
        apply_filter_args(&mut config, &args);
        assert_eq!(config.filter.allergens, vec!["Gluten", "Milch"]);
        assert_eq!(config.filter.mode, FilterMode::Contains);
    }

    #[test]
    fn test_allergen_labels_are_kept_verbatim() {
        let cli = Cli::parse_from(["allergen-tools", "filter", "--allergen", " Gluten,Milch "]);
        let Commands::Filter(args) = cli.command else {
            panic!("expected filter");
        };
        let mut config = AppConfig::default();
        apply_filter_args(&mut config, &args);
        assert_eq!(config.filter.allergens, vec![" Gluten", "Milch "]);
    }

    #[test]
    fn test_shell_args_parse() {
        let cli = Cli::parse_from([
            "allergen-tools",
            "shell",
            "status",
            "--origin",
            "https://allergene.example/",
            "--offline",
        ]);
        let Commands::Shell {
            action: ShellCommand::Status { shell, json },
        } = cli.command
        else {
            panic!("expected shell status");
        };
        assert!(!json);
        let mut config = AppConfig::default();
        apply_shell_args(&mut config, &shell);
        assert_eq!(config.shell.manifest.origin, "https://allergene.example");
        assert!(config.shell.offline);
    }
}
