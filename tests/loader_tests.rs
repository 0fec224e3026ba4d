mod common;

use common::{write_abc_dataset, write_file, A, B, C};
use lineforge::config::DataPaths;
use lineforge::error::LineForgeError;
use lineforge::jobs::JobLookup;
use lineforge::problem::Problem;
use lineforge::scorer::MAX_COST;
use lineforge::scorer::loader::{
    changeover_from_reader, durations_from_reader, job_lookup_from_reader, load_changeover_matrix,
    load_durations, load_job_lookup, sequence_from_reader,
};
use std::io::{Cursor, Write};
use tempfile::NamedTempFile;

fn abc_lookup() -> JobLookup {
    JobLookup::from_identifiers(&["A", "B", "C"]).unwrap()
}

// --- JOB TABLE ---

#[test]
fn test_job_table_maps_both_ways() {
    let lookup = job_lookup_from_reader(Cursor::new("Ab, Cd, Ef\n2, 0, 1\n")).unwrap();
    assert_eq!(lookup.len(), 3);
    assert_eq!(lookup.to_index("Ab").unwrap(), 2);
    assert_eq!(lookup.to_index("Cd").unwrap(), 0);
    assert_eq!(lookup.to_identifier(1), "Ef");
    assert_eq!(lookup.identifiers(), &["Cd", "Ef", "Ab"]);
}

#[test]
fn test_job_table_tolerates_trailing_comma() {
    let lookup = job_lookup_from_reader(Cursor::new("A,B,\n0,1,\n")).unwrap();
    assert_eq!(lookup.len(), 2);
}

#[test]
fn test_job_table_rejects_bad_shapes() {
    assert!(job_lookup_from_reader(Cursor::new("A,B\n")).is_err());
    assert!(job_lookup_from_reader(Cursor::new("A,B\n0\n")).is_err());
    assert!(job_lookup_from_reader(Cursor::new("A,B\n0,x\n")).is_err());
    assert!(job_lookup_from_reader(Cursor::new("A,B\n0,0\n")).is_err());
    assert!(job_lookup_from_reader(Cursor::new("A,A\n0,1\n")).is_err());
    assert!(job_lookup_from_reader(Cursor::new("A,B\n0,2\n")).is_err());
}

#[test]
fn test_job_table_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "X,Y").unwrap();
    writeln!(file, "1,0").unwrap();
    let lookup = load_job_lookup(file.path()).unwrap();
    assert_eq!(lookup.to_index("X").unwrap(), 1);
}

// --- COST TABLES ---

#[test]
fn test_changeover_matrix_parses_square_table() {
    let matrix = changeover_from_reader(Cursor::new("0,10,3\n2,0,1\n3,1,0\n")).unwrap();
    assert_eq!(matrix, vec![vec![0, 10, 3], vec![2, 0, 1], vec![3, 1, 0]]);
}

#[test]
fn test_changeover_matrix_skips_blank_lines() {
    let matrix = changeover_from_reader(Cursor::new("0, 4\n\n1, 0\n\n")).unwrap();
    assert_eq!(matrix, vec![vec![0, 4], vec![1, 0]]);
}

#[test]
fn test_changeover_matrix_rejects_bad_values() {
    let ragged = changeover_from_reader(Cursor::new("0,1\n1\n"));
    assert!(matches!(ragged, Err(LineForgeError::Validation(_))));

    let wide = changeover_from_reader(Cursor::new("0,1,2\n1,0,2\n"));
    assert!(wide.is_err());

    let negative = changeover_from_reader(Cursor::new("0,-1\n1,0\n"));
    assert!(matches!(negative, Err(LineForgeError::Validation(_))));

    let text = changeover_from_reader(Cursor::new("0,abc\n1,0\n"));
    assert!(text.is_err());

    let fractional = changeover_from_reader(Cursor::new("0,1.5\n1,0\n"));
    assert!(fractional.is_err());
}

#[test]
fn test_oversized_costs_are_rejected() {
    let huge = changeover_from_reader(Cursor::new(
        "0,9223372036854775807\n9223372036854775807,0\n",
    ));
    assert!(matches!(huge, Err(LineForgeError::Validation(_))));

    let just_over = format!("{},1\n", MAX_COST + 1);
    assert!(durations_from_reader(Cursor::new(just_over)).is_err());

    let at_cap = format!("0,{}\n{},0\n", MAX_COST, MAX_COST);
    assert_eq!(
        changeover_from_reader(Cursor::new(at_cap)).unwrap()[0][1],
        MAX_COST
    );
}

#[test]
fn test_problem_load_rejects_oversized_matrix() {
    let dir = tempfile::tempdir().unwrap();
    write_abc_dataset(dir.path());
    write_file(
        &dir.path().join("changeover.csv"),
        "0,9223372036854775807,3\n2,0,1\n3,1,0\n",
    );
    assert!(matches!(
        Problem::load(&DataPaths::in_dir(dir.path())),
        Err(LineForgeError::Validation(_))
    ));
}

#[test]
fn test_durations_single_row() {
    assert_eq!(
        durations_from_reader(Cursor::new("5, 5, 8\n")).unwrap(),
        vec![5, 5, 8]
    );
    assert!(durations_from_reader(Cursor::new("")).is_err());
    assert!(durations_from_reader(Cursor::new("1,2\n3,4\n")).is_err());
    assert!(durations_from_reader(Cursor::new("1,-2\n")).is_err());
}

#[test]
fn test_missing_file_is_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.csv");
    assert!(matches!(
        load_changeover_matrix(&missing),
        Err(LineForgeError::Config(_))
    ));
    assert!(matches!(
        load_durations(&missing),
        Err(LineForgeError::Config(_))
    ));
}

// --- SEQUENCE ---

#[test]
fn test_sequence_translates_identifiers() {
    let lookup = abc_lookup();
    let seq = sequence_from_reader(Cursor::new("C, A, B, A\n"), &lookup).unwrap();
    assert_eq!(seq, vec![C, A, B, A]);
}

#[test]
fn test_sequence_rejects_unknown_identifier() {
    let lookup = abc_lookup();
    let res = sequence_from_reader(Cursor::new("A,Z,B\n"), &lookup);
    assert!(matches!(res, Err(LineForgeError::UnknownJob(ref id)) if id == "Z"));
}

#[test]
fn test_empty_sequence_file_is_an_empty_line() {
    let lookup = abc_lookup();
    assert!(sequence_from_reader(Cursor::new(""), &lookup)
        .unwrap()
        .is_empty());
}

// --- FULL PROBLEM ---

#[test]
fn test_problem_load_reads_all_tables() {
    let dir = tempfile::tempdir().unwrap();
    write_abc_dataset(dir.path());

    let problem = Problem::load(&DataPaths::in_dir(dir.path())).unwrap();
    assert_eq!(problem.lookup.len(), 3);
    assert_eq!(problem.sequence, vec![A, B, C]);
    assert_eq!(problem.total_cost(), 26);
}

#[test]
fn test_problem_load_cross_checks_dimensions() {
    let dir = tempfile::tempdir().unwrap();
    write_abc_dataset(dir.path());
    write_file(&dir.path().join("durations.csv"), "5,5\n");
    assert!(Problem::load(&DataPaths::in_dir(dir.path())).is_err());

    write_abc_dataset(dir.path());
    write_file(&dir.path().join("changeover.csv"), "0,1\n1,0\n");
    assert!(Problem::load(&DataPaths::in_dir(dir.path())).is_err());
}
