mod commands;
mod output;

use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use simplelog::{Config, LevelFilter, WriteLogger};

use crate::output::{CliError, EXIT_OK, print_error, print_success};

/// Scores drive-profile questionnaires against occupation catalogs.
#[derive(Debug, Parser)]
#[command(name = "drivefit", version, propagate_version = true)]
struct Cli {
    /// Wrap output in the versioned JSON envelope.
    #[arg(long, global = true)]
    json: bool,

    /// Log verbosity on stderr (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[arg(short, long, global = true)]
    quiet: bool,

    /// Engine coefficients JSON; built-in defaults when absent.
    #[arg(long, env = "DRIVEFIT_CONFIG", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show the three drive vectors, satisfaction and routes.
    Profile {
        #[arg(long)]
        answers: PathBuf,
    },
    /// Rank every subtype in a catalog.
    Rank {
        #[arg(long)]
        answers: PathBuf,
        #[arg(long)]
        catalog: PathBuf,
        /// mismatch, drain or overall
        #[arg(long, default_value = "mismatch")]
        sort: String,
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Evaluate an ad-hoc job from DRIVE=VALUE demands.
    Custom {
        #[arg(long)]
        answers: PathBuf,
        #[arg(long)]
        name: String,
        #[arg(long)]
        major: Option<String>,
        #[arg(long = "demand", value_name = "DRIVE=VALUE")]
        demand: Vec<String>,
    },
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Command::Profile { .. } => "profile",
            Command::Rank { .. } => "rank",
            Command::Custom { .. } => "custom",
        }
    }
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => exit_on_parse_error(err),
    };

    init_logging(&cli);
    let name = cli.command.name();
    match run(&cli) {
        Ok(out) => {
            if cli.quiet && !cli.json {
                return;
            }
            print_success(cli.json, name, out);
            std::process::exit(EXIT_OK);
        }
        Err(err) => {
            let err = CliError::from_anyhow(name, err);
            print_error(cli.json, &err);
            std::process::exit(err.code);
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<output::Output> {
    let config = commands::load_config(cli.config.as_deref())?;
    match &cli.command {
        Command::Profile { answers } => commands::cmd_profile(&config, answers),
        Command::Rank {
            answers,
            catalog,
            sort,
            limit,
        } => commands::cmd_rank(&config, answers, catalog, sort, *limit),
        Command::Custom {
            answers,
            name,
            major,
            demand,
        } => commands::cmd_custom(&config, answers, name, major.as_deref(), demand),
    }
}

/// In json mode stderr carries the error envelope, so logging stays off
/// unless asked for.
fn init_logging(cli: &Cli) {
    let level = match (cli.quiet, cli.verbose) {
        (true, _) => LevelFilter::Error,
        (false, 0) if cli.json => LevelFilter::Off,
        (false, 0) => LevelFilter::Warn,
        (false, 1) => LevelFilter::Info,
        (false, 2) => LevelFilter::Debug,
        (false, _) => LevelFilter::Trace,
    };
    let _ = WriteLogger::init(level, Config::default(), std::io::stderr());
}

fn exit_on_parse_error(err: clap::Error) -> ! {
    if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
        let _ = err.print();
        std::process::exit(EXIT_OK);
    }
    let json_mode = std::env::args().any(|a| a == "--json");
    let message = err.render().to_string();
    let err = CliError::invalid("unknown", message.trim());
    print_error(json_mode, &err);
    std::process::exit(err.code);
}
