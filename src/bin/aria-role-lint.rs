//! Command-line interface for aria-role-lint
//!
//! Usage:
//!   aria-role-lint check `<paths>...` [--format `<format>`] [--config `<file>`]
//!                        [--ignore-non-dom] [--allow-role `<role>`]...
//!   aria-role-lint roles [--abstract]                      - List known roles
//!   aria-role-lint formats                                 - List output formats
//!
//! `check` exits with 0 when no problems were found, 1 when diagnostics were
//! reported and 2 when a file or the configuration could not be processed.
//! Set `RUST_LOG` (e.g. `RUST_LOG=debug`) to see what the linter is doing.

use aria_role_lint::aria::RoleRegistry;
use aria_role_lint::config::{ConfigError, LintConfig, Loader, PROJECT_CONFIG_FILE};
use aria_role_lint::lint::formats::FormatRegistry;
use aria_role_lint::lint::linter::collect_sources;
use aria_role_lint::lint::{FileReport, Linter};
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

const EXIT_PROBLEMS: u8 = 1;
const EXIT_ERROR: u8 = 2;

fn main() -> ExitCode {
    init_tracing();

    let matches = cli().get_matches();

    match matches.subcommand() {
        Some(("check", check_matches)) => handle_check_command(check_matches),
        Some(("roles", roles_matches)) => {
            handle_roles_command(roles_matches.get_flag("abstract"));
            ExitCode::SUCCESS
        }
        Some(("formats", _)) => {
            handle_formats_command();
            ExitCode::SUCCESS
        }
        _ => unreachable!(),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn cli() -> Command {
    Command::new("aria-role-lint")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Checks that JSX role attributes name valid, non-abstract ARIA roles")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("check")
                .about("Lint JSX files or directories")
                .arg(
                    Arg::new("paths")
                        .help("Files or directories to lint (directories are searched for .jsx, .tsx and .js files)")
                        .required(true)
                        .num_args(1..)
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format (see `formats`)")
                        .default_value("simple"),
                )
                .arg(
                    Arg::new("config")
                        .long("config")
                        .short('c')
                        .help("Configuration file layered over the defaults")
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    Arg::new("ignore-non-dom")
                        .long("ignore-non-dom")
                        .help("Only check DOM elements, skipping components")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("allow-role")
                        .long("allow-role")
                        .help("Accept this role token even if it is unknown or abstract")
                        .action(ArgAction::Append),
                ),
        )
        .subcommand(
            Command::new("roles")
                .about("List the roles in the bundled registry")
                .arg(
                    Arg::new("abstract")
                        .long("abstract")
                        .help("List abstract roles instead of concrete ones")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(Command::new("formats").about("List available output formats"))
}

/// Build the configuration: defaults, then `aria-role-lint.toml` in the
/// working directory, then `--config`, then flags
fn load_config(matches: &ArgMatches) -> Result<LintConfig, ConfigError> {
    let mut loader = Loader::new().with_optional_file(PROJECT_CONFIG_FILE);

    if let Some(path) = matches.get_one::<PathBuf>("config") {
        loader = loader.with_file(path);
    }
    if matches.get_flag("ignore-non-dom") {
        loader = loader.set_override("rules.aria_role.ignore_non_dom", true)?;
    }

    let mut config = loader.build()?;
    if let Some(roles) = matches.get_many::<String>("allow-role") {
        config
            .rules
            .aria_role
            .allowed_invalid_roles
            .extend(roles.cloned());
    }
    Ok(config)
}

/// Handle the check command
fn handle_check_command(matches: &ArgMatches) -> ExitCode {
    let config = match load_config(matches) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let registry = FormatRegistry::default();
    let format = matches
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or("simple");
    if !registry.contains(format) {
        eprintln!(
            "Unknown format '{}'. Available formats: {}",
            format,
            registry.names().collect::<Vec<_>>().join(", ")
        );
        return ExitCode::from(EXIT_ERROR);
    }

    let paths: Vec<PathBuf> = matches
        .get_many::<PathBuf>("paths")
        .map(|paths| paths.cloned().collect())
        .unwrap_or_default();
    let files = match collect_sources(&paths) {
        Ok(files) => files,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };
    tracing::debug!(files = files.len(), "collected sources");

    let linter = Linter::new(&config);
    let mut reports: Vec<FileReport> = Vec::new();
    let mut failed = false;
    for file in &files {
        match linter.lint_file(file) {
            Ok(report) => reports.push(report),
            Err(e) => {
                eprintln!("Error: {}", e);
                failed = true;
            }
        }
    }

    match registry.format(&reports, format) {
        Ok(output) => print!("{}", output),
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    }

    if failed {
        ExitCode::from(EXIT_ERROR)
    } else if reports.iter().all(FileReport::is_clean) {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(EXIT_PROBLEMS)
    }
}

/// Handle the roles command
fn handle_roles_command(show_abstract: bool) {
    let registry = RoleRegistry::bundled();
    let roles = if show_abstract {
        registry.abstract_roles()
    } else {
        registry.concrete_roles()
    };
    for role in roles {
        println!("{}", role);
    }
}

/// Handle the formats command
fn handle_formats_command() {
    let registry = FormatRegistry::default();
    println!("Available formats:\n");
    for formatter in registry.iter() {
        println!("  {}", formatter.name());
        println!("    {}", formatter.description());
    }
}
