use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser, Subcommand};
use lineforge::config::Config;
use lineforge::error::LfResult;
use std::process;
use tracing::{error, info, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON config file; explicit command-line flags override it
    #[arg(global = true, long)]
    config_file: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Reorder the production sequence to a local optimum
    Optimize(cmd::optimize::OptimizeArgs),
    /// Report the total production time of a sequence
    Evaluate(cmd::evaluate::EvaluateArgs),
    /// Write a random problem set
    Generate(cmd::generate::GenerateArgs),
}

fn resolve_config(cli_config: &Config, config_file: &Option<String>, matches: &ArgMatches) -> LfResult<Config> {
    match config_file {
        Some(path) => {
            info!("⚖️  Loading Config from: {}", path);
            let mut config = Config::load_from_file(path)?;
            config.merge_from_cli(cli_config, matches);
            Ok(config)
        }
        None => Ok(cli_config.clone()),
    }
}

fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    tracing_subscriber::fmt()
        .with_max_level(if cli.debug { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .init();

    info!("🚀 Initializing LineForge...");

    let result = match cli.command {
        Commands::Optimize(args) => matches
            .subcommand_matches("optimize")
            .ok_or_else(|| missing_subcommand("optimize"))
            .and_then(|sub| resolve_config(&args.config, &cli.config_file, sub))
            .and_then(|config| cmd::optimize::run(args, config)),
        Commands::Evaluate(args) => matches
            .subcommand_matches("evaluate")
            .ok_or_else(|| missing_subcommand("evaluate"))
            .and_then(|sub| resolve_config(&args.config, &cli.config_file, sub))
            .and_then(|config| cmd::evaluate::run(args, config)),
        Commands::Generate(args) => cmd::generate::run(args),
    };

    if let Err(e) = result {
        error!("❌ FATAL: {}", e);
        process::exit(1);
    }
}

fn missing_subcommand(name: &str) -> lineforge::error::LineForgeError {
    lineforge::error::LineForgeError::Config(format!("No matches recorded for '{}'", name))
}
