use crate::reports;
use clap::Args;
use lineforge::api;
use lineforge::config::{Config, ReportFormat};
use lineforge::error::LfResult;
use lineforge::optimizer::NoopObserver;
use lineforge::problem::Problem;
use tracing::warn;

#[derive(Args, Debug, Clone)]
pub struct OptimizeArgs {
    #[command(flatten)]
    pub config: Config,

    #[arg(short = 'f', long, default_value_t = ReportFormat::Table)]
    pub format: ReportFormat,
}

pub fn run(args: OptimizeArgs, config: Config) -> LfResult<()> {
    let problem = Problem::load(&config.data)?;

    match args.format {
        ReportFormat::Table => {
            print_header(&problem);
            let mut log = reports::SwapLog::new(&problem.lookup);
            let report = api::optimize(&problem, &config.search, &mut log)?;
            println!();
            reports::print_report(&report);
        }
        ReportFormat::Json => {
            if config.search.diagnostics.is_enabled() {
                warn!("⚠️  Diagnostics dump is not printed with --format json");
            }
            let report = api::optimize(&problem, &config.search, &mut NoopObserver)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(())
}

fn print_header(problem: &Problem) {
    reports::print_sequence(
        "Initial production sequence",
        &problem.lookup.decode(&problem.sequence),
    );
    println!("The initial total production time is {}", problem.total_cost());
    println!("{}", "_".repeat(41));
}
