//! Test-bench oracle CLI.
//!
//! Reads simulation output from a file or stdin and checks every record the
//! selected oracle recognizes.

use clap::{Args, Parser, Subcommand};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use std::process::ExitCode;
use tb_oracle::config::ConfigOverrides;
use tb_oracle::{
    ArbiterOracle, CheckRunner, ConfigFile, Oracle, OracleResult, OutputFormat, RunConfig,
    RunSummary, ShiftPolicy, ShifterOracle,
};
use tracing::error;
use tracing_subscriber::EnvFilter;

/// Environment variable controlling log output.
const LOG_ENV_VAR: &str = "TB_ORACLE_LOG";

#[derive(Parser)]
#[command(name = "tb-oracle")]
#[command(about = "Reference-model checkers for shifter and arbiter test benches", long_about = None)]
#[command(version)]
struct Cli {
    /// Log more (-v debug, -vv trace); TB_ORACLE_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show version information
    Version,

    /// Check barrel shifter records: in=<bits> offset=<bits> out=<bits>
    Shifter(CheckArgs),

    /// Check round-robin arbiter records: r=<bits> p=<bits> res=<bits>
    Arbiter(CheckArgs),
}

#[derive(Args)]
struct CheckArgs {
    /// Simulation log to check (defaults to stdin)
    input: Option<PathBuf>,

    /// JSON config file with per-oracle settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Stop at the first wrong result
    #[arg(long, conflicts_with = "keep_going")]
    halt_on_mismatch: bool,

    /// Report every wrong result and keep reading
    #[arg(long)]
    keep_going: bool,

    /// Offset handling past the input width: modulo, reject or literal
    #[arg(long)]
    shift_policy: Option<ShiftPolicy>,

    /// Output format: text or json
    #[arg(long)]
    format: Option<OutputFormat>,
}

impl CheckArgs {
    fn overrides(&self) -> ConfigOverrides {
        let halt_on_mismatch = if self.halt_on_mismatch {
            Some(true)
        } else if self.keep_going {
            Some(false)
        } else {
            None
        };
        ConfigOverrides {
            halt_on_mismatch,
            shift_policy: self.shift_policy,
            format: self.format,
        }
    }

    /// Defaults, then the config file section, then flags.
    fn resolve(&self, oracle: &str, defaults: RunConfig) -> OracleResult<RunConfig> {
        let mut config = defaults;
        if let Some(path) = &self.config {
            let file = ConfigFile::load(path)?;
            if let Some(section) = file.section(oracle) {
                config = section.apply(config);
            }
        }
        Ok(self.overrides().apply(config))
    }

    fn open_input(&self) -> OracleResult<Box<dyn BufRead>> {
        Ok(match &self.input {
            Some(path) => Box::new(BufReader::new(File::open(path)?)),
            None => Box::new(BufReader::new(io::stdin())),
        })
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run_check<O: Oracle>(oracle: O, config: RunConfig, args: &CheckArgs) -> OracleResult<RunSummary> {
    let input = args.open_input()?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    CheckRunner::new(oracle, config).run(input, &mut out)
}

/// Resolve the configuration for one oracle subcommand, build the oracle
/// from it and run it. `section` names both the config-file section and
/// the subcommand in error messages.
fn check<O, F>(section: &str, args: &CheckArgs, defaults: RunConfig, make: F) -> ExitCode
where
    O: Oracle,
    F: FnOnce(&RunConfig) -> O,
{
    let result = args
        .resolve(section, defaults)
        .and_then(|config| run_check(make(&config), config, args));

    match result {
        Ok(summary) => ExitCode::from(summary.exit_code()),
        Err(err) => {
            error!(code = err.code(), "{}", err);
            eprintln!("tb-oracle {}: {}", section, err);
            ExitCode::from(RunSummary::EXIT_FAILURE)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Some(Commands::Version) => {
            println!("tb-oracle v{}", env!("CARGO_PKG_VERSION"));
            println!("Oracles: shifter, arbiter");
            ExitCode::SUCCESS
        }
        Some(Commands::Shifter(args)) => check("shifter", &args, RunConfig::shifter(), |config| {
            ShifterOracle::new(config.shift_policy)
        }),
        Some(Commands::Arbiter(args)) => {
            check("arbiter", &args, RunConfig::arbiter(), |_| ArbiterOracle::new())
        }
        None => {
            println!("tb-oracle v{}", env!("CARGO_PKG_VERSION"));
            println!("Use --help for usage information");
            ExitCode::SUCCESS
        }
    }
}
