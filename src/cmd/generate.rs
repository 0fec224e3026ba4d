use clap::Args;
use lineforge::error::LfResult;
use lineforge::problem::Problem;
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Directory receiving the four CSV tables
    #[arg(short, long, default_value = "data")]
    pub out: PathBuf,

    #[arg(long, default_value_t = 8)]
    pub jobs: usize,

    #[arg(long, default_value_t = 40)]
    pub length: usize,

    #[arg(long, default_value_t = 20)]
    pub max_changeover: i64,

    #[arg(long, default_value_t = 10)]
    pub max_duration: i64,

    #[arg(short = 'S', long)]
    pub seed: Option<u64>,
}

pub fn run(args: GenerateArgs) -> LfResult<()> {
    let seed = args.seed.unwrap_or_else(|| fastrand::u64(..));
    info!("🎲 Generating problem set (seed {})", seed);

    let problem = Problem::random(
        seed,
        args.jobs,
        args.length,
        args.max_changeover,
        args.max_duration,
    )?;
    let paths = problem.write_to_dir(&args.out)?;

    println!("Seed: {}", seed);
    println!("Jobs: {}", paths.jobs.display());
    println!("Changeover: {}", paths.changeover.display());
    println!("Durations: {}", paths.durations.display());
    println!("Sequence: {}", paths.sequence.display());
    println!("Initial total production time: {}", problem.total_cost());
    Ok(())
}
