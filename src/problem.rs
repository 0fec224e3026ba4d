use crate::config::DataPaths;
use crate::error::{LfResult, LineForgeError};
use crate::jobs::JobLookup;
use crate::scorer::loader;
use crate::scorer::{CostModel, MAX_COST};
use std::fs::{self, File};
use std::path::Path;
use tracing::info;

/// A fully loaded, dimension-checked sequencing instance.
#[derive(Debug, Clone)]
pub struct Problem {
    pub lookup: JobLookup,
    pub model: CostModel,
    pub sequence: Vec<usize>,
}

impl Problem {
    pub fn new(lookup: JobLookup, model: CostModel, sequence: Vec<usize>) -> LfResult<Self> {
        if lookup.len() != model.job_count() {
            return Err(LineForgeError::Validation(format!(
                "Job table defines {} jobs but the cost tables cover {}",
                lookup.len(),
                model.job_count()
            )));
        }
        model.check_sequence(&sequence)?;

        Ok(Self {
            lookup,
            model,
            sequence,
        })
    }

    /// Loads the four input tables and cross-checks their dimensions.
    pub fn load(paths: &DataPaths) -> LfResult<Self> {
        let lookup = loader::load_job_lookup(&paths.jobs)?;
        let changeover = loader::load_changeover_matrix(&paths.changeover)?;
        let durations = loader::load_durations(&paths.durations)?;
        let sequence = loader::load_sequence(&paths.sequence, &lookup)?;

        if changeover.len() != lookup.len() {
            return Err(LineForgeError::Validation(format!(
                "Changeover matrix is {}x{} but {} jobs are defined",
                changeover.len(),
                changeover.len(),
                lookup.len()
            )));
        }
        if durations.len() != lookup.len() {
            return Err(LineForgeError::Validation(format!(
                "Durations list {} values but {} jobs are defined",
                durations.len(),
                lookup.len()
            )));
        }

        let model = CostModel::new(changeover, durations)?;
        let problem = Self::new(lookup, model, sequence)?;

        info!(
            "📦 Loaded {} job types, sequence of {} jobs",
            problem.lookup.len(),
            problem.sequence.len()
        );
        Ok(problem)
    }

    /// Reproducible random instance. Jobs are named `J0`, `J1`, ...
    pub fn random(
        seed: u64,
        job_count: usize,
        length: usize,
        max_changeover: i64,
        max_duration: i64,
    ) -> LfResult<Self> {
        if job_count == 0 {
            return Err(LineForgeError::Config(
                "A random problem needs at least one job type".to_string(),
            ));
        }
        let bounds = 0..=MAX_COST;
        if !bounds.contains(&max_changeover) || !bounds.contains(&max_duration) {
            return Err(LineForgeError::Config(format!(
                "Random cost bounds must lie in 0..={}",
                MAX_COST
            )));
        }

        let mut rng = fastrand::Rng::with_seed(seed);

        let names: Vec<String> = (0..job_count).map(|i| format!("J{}", i)).collect();
        let lookup = JobLookup::from_identifiers(&names)?;

        let changeover = (0..job_count)
            .map(|from| {
                (0..job_count)
                    .map(|to| {
                        if from == to {
                            0
                        } else {
                            rng.i64(0..=max_changeover)
                        }
                    })
                    .collect()
            })
            .collect();
        let durations = (0..job_count).map(|_| rng.i64(0..=max_duration)).collect();
        let sequence = (0..length).map(|_| rng.usize(0..job_count)).collect();

        let model = CostModel::new(changeover, durations)?;
        Self::new(lookup, model, sequence)
    }

    /// Writes the instance as the four CSV tables `load` reads back.
    pub fn write_to_dir<P: AsRef<Path>>(&self, dir: P) -> LfResult<DataPaths> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        let paths = DataPaths::in_dir(dir);

        let mut jobs = csv::Writer::from_writer(File::create(&paths.jobs)?);
        jobs.write_record(self.lookup.identifiers())?;
        jobs.write_record((0..self.lookup.len()).map(|i| i.to_string()))?;
        jobs.flush()?;

        let mut matrix = csv::Writer::from_writer(File::create(&paths.changeover)?);
        for row in self.model.changeover_rows() {
            matrix.write_record(row.iter().map(|c| c.to_string()))?;
        }
        matrix.flush()?;

        let mut durations = csv::Writer::from_writer(File::create(&paths.durations)?);
        durations.write_record(self.model.durations().iter().map(|d| d.to_string()))?;
        durations.flush()?;

        let mut sequence = csv::Writer::from_writer(File::create(&paths.sequence)?);
        sequence.write_record(self.lookup.decode(&self.sequence))?;
        sequence.flush()?;

        info!("💾 Wrote problem set to {}", dir.display());
        Ok(paths)
    }

    pub fn total_cost(&self) -> i64 {
        self.model.total_cost(&self.sequence)
    }
}
