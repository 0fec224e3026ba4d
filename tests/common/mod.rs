#![allow(dead_code)]

use lineforge::scorer::CostModel;
use std::fs::File;
use std::io::Write;
use std::path::Path;

pub const A: usize = 0;
pub const B: usize = 1;
pub const C: usize = 2;

/// Three-job line: A->B is expensive, B->A is cheap.
pub fn abc_model() -> CostModel {
    CostModel::new(
        vec![
            vec![0, 10, 3], // from A
            vec![2, 0, 1],  // from B
            vec![3, 1, 0],  // from C
        ],
        vec![5, 5, 5],
    )
    .unwrap()
}

/// Seeded random model, zero diagonal.
pub fn random_model(rng: &mut fastrand::Rng, jobs: usize, max_cost: i64) -> CostModel {
    let changeover = (0..jobs)
        .map(|from| {
            (0..jobs)
                .map(|to| if from == to { 0 } else { rng.i64(0..=max_cost) })
                .collect()
        })
        .collect();
    let durations = (0..jobs).map(|_| rng.i64(0..=max_cost)).collect();
    CostModel::new(changeover, durations).unwrap()
}

pub fn random_sequence(rng: &mut fastrand::Rng, jobs: usize, len: usize) -> Vec<usize> {
    (0..len).map(|_| rng.usize(0..jobs)).collect()
}

/// Delta of the swap at `i`, computed the slow way.
pub fn brute_force_delta(model: &CostModel, sequence: &[usize], i: usize) -> i64 {
    let mut swapped = sequence.to_vec();
    swapped.swap(i, i + 1);
    model.total_cost(&swapped) - model.total_cost(sequence)
}

pub fn is_local_optimum(model: &CostModel, sequence: &[usize]) -> bool {
    (0..sequence.len().saturating_sub(1)).all(|i| model.swap_delta(sequence, i) >= 0)
}

pub fn write_file(path: &Path, content: &str) {
    let mut f = File::create(path).unwrap();
    write!(f, "{}", content).unwrap();
}

/// Writes the ABC line (initial order A,B,C) into `dir` under the default
/// file names.
pub fn write_abc_dataset(dir: &Path) {
    write_file(&dir.join("job_index.csv"), "A,B,C\n0,1,2\n");
    write_file(&dir.join("changeover.csv"), "0,10,3\n2,0,1\n3,1,0\n");
    write_file(&dir.join("durations.csv"), "5,5,5\n");
    write_file(&dir.join("sequence.csv"), "A,B,C\n");
}
