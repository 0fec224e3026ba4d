use crate::reports;
use clap::Args;
use lineforge::api;
use lineforge::config::Config;
use lineforge::error::LfResult;
use lineforge::problem::Problem;

#[derive(Args, Debug, Clone)]
pub struct EvaluateArgs {
    #[command(flatten)]
    pub config: Config,

    /// Comma-separated job identifiers to score instead of the loaded sequence
    #[arg(short, long, value_delimiter = ',')]
    pub order: Option<Vec<String>>,

    /// Print the per-position cost breakdown
    #[arg(long, default_value_t = false)]
    pub breakdown: bool,
}

pub fn run(args: EvaluateArgs, config: Config) -> LfResult<()> {
    let problem = Problem::load(&config.data)?;

    let order: Vec<String> = match args.order {
        Some(ids) => ids.into_iter().map(|s| s.trim().to_string()).collect(),
        None => problem
            .lookup
            .decode(&problem.sequence)
            .into_iter()
            .map(str::to_string)
            .collect(),
    };

    let total = api::evaluate(&problem, &order)?;

    reports::print_sequence("Sequence", &order);
    if args.breakdown {
        let sequence = problem.lookup.encode(&order)?;
        reports::print_cost_breakdown(&problem.lookup, &problem.model, &sequence);
    }
    println!("Total production time: {}", total);
    Ok(())
}
