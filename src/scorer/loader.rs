use crate::error::{LfResult, LineForgeError};
use crate::jobs::JobLookup;
use crate::scorer::MAX_COST;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

// All input tables are header-less CSV. Trailing empty cells (from a trailing
// comma) are dropped so hand-edited files load cleanly.
fn read_rows<R: Read>(reader: R) -> LfResult<Vec<Vec<String>>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    for result in rdr.records() {
        let rec = result?;
        let mut cells: Vec<String> = rec.iter().map(str::to_string).collect();
        while cells.last().is_some_and(|c| c.is_empty()) {
            cells.pop();
        }
        if !cells.is_empty() {
            rows.push(cells);
        }
    }
    Ok(rows)
}

fn open(path: &Path, what: &str) -> LfResult<File> {
    info!("📂 Loading {} from: {}", what, path.display());
    File::open(path).map_err(|e| {
        LineForgeError::Config(format!(
            "Could not open {} at '{}': {}",
            what,
            path.display(),
            e
        ))
    })
}

fn parse_cost(cell: &str, what: &str, row: usize, col: usize) -> LfResult<i64> {
    let value: i64 = cell.parse().map_err(|_| {
        LineForgeError::Validation(format!(
            "{} [row {}, col {}]: '{}' is not an integer",
            what, row, col, cell
        ))
    })?;
    if value < 0 {
        return Err(LineForgeError::Validation(format!(
            "{} [row {}, col {}]: negative value {}",
            what, row, col, value
        )));
    }
    if value > MAX_COST {
        return Err(LineForgeError::Validation(format!(
            "{} [row {}, col {}]: {} exceeds the maximum of {}",
            what, row, col, value, MAX_COST
        )));
    }
    Ok(value)
}

fn single_row(mut rows: Vec<Vec<String>>, what: &str) -> LfResult<Vec<String>> {
    match rows.len() {
        1 => Ok(rows.remove(0)),
        0 => Err(LineForgeError::Validation(format!("{} file is empty", what))),
        n => Err(LineForgeError::Validation(format!(
            "{} file must hold a single row, found {}",
            what, n
        ))),
    }
}

/// Reads the two-row job table: identifiers on the first row, their numeric
/// indices on the second.
pub fn job_lookup_from_reader<R: Read>(reader: R) -> LfResult<JobLookup> {
    let rows = read_rows(reader)?;
    if rows.len() != 2 {
        return Err(LineForgeError::Validation(format!(
            "Job table must hold exactly 2 rows (identifiers, indices), found {}",
            rows.len()
        )));
    }
    let (ids, idx) = (&rows[0], &rows[1]);
    if ids.len() != idx.len() {
        return Err(LineForgeError::Validation(format!(
            "Job table has {} identifiers but {} indices",
            ids.len(),
            idx.len()
        )));
    }

    let mut pairs = Vec::with_capacity(ids.len());
    for (col, (id, raw)) in ids.iter().zip(idx).enumerate() {
        let index: usize = raw.parse().map_err(|_| {
            LineForgeError::Validation(format!(
                "Job table [col {}]: index '{}' for '{}' is not a non-negative integer",
                col, raw, id
            ))
        })?;
        pairs.push((id.clone(), index));
    }

    let lookup = JobLookup::new(pairs)?;
    debug!("   -> {} job types", lookup.len());
    Ok(lookup)
}

pub fn load_job_lookup<P: AsRef<Path>>(path: P) -> LfResult<JobLookup> {
    job_lookup_from_reader(open(path.as_ref(), "Job Table")?)
}

/// Reads a square changeover matrix, one row per "from" job.
pub fn changeover_from_reader<R: Read>(reader: R) -> LfResult<Vec<Vec<i64>>> {
    let rows = read_rows(reader)?;
    let size = rows.len();

    let mut matrix = Vec::with_capacity(size);
    for (r, row) in rows.iter().enumerate() {
        if row.len() != size {
            return Err(LineForgeError::Validation(format!(
                "Changeover matrix row {} has {} columns, expected {}",
                r,
                row.len(),
                size
            )));
        }
        let parsed = row
            .iter()
            .enumerate()
            .map(|(c, cell)| parse_cost(cell, "Changeover matrix", r, c))
            .collect::<LfResult<Vec<i64>>>()?;
        matrix.push(parsed);
    }

    debug!("   -> {}x{} changeover matrix", size, size);
    Ok(matrix)
}

pub fn load_changeover_matrix<P: AsRef<Path>>(path: P) -> LfResult<Vec<Vec<i64>>> {
    changeover_from_reader(open(path.as_ref(), "Changeover Matrix")?)
}

/// Reads the single-row vector of processing times, indexed by job.
pub fn durations_from_reader<R: Read>(reader: R) -> LfResult<Vec<i64>> {
    let row = single_row(read_rows(reader)?, "Durations")?;
    row.iter()
        .enumerate()
        .map(|(c, cell)| parse_cost(cell, "Durations", 0, c))
        .collect()
}

pub fn load_durations<P: AsRef<Path>>(path: P) -> LfResult<Vec<i64>> {
    durations_from_reader(open(path.as_ref(), "Durations")?)
}

/// Reads the single-row production queue of job identifiers and translates
/// it to indices.
///
/// An empty file is an empty line, not an error.
pub fn sequence_from_reader<R: Read>(reader: R, lookup: &JobLookup) -> LfResult<Vec<usize>> {
    let rows = read_rows(reader)?;
    if rows.is_empty() {
        debug!("   -> empty sequence");
        return Ok(Vec::new());
    }
    let row = single_row(rows, "Sequence")?;
    let sequence = lookup.encode(&row)?;
    debug!("   -> sequence of {} jobs", sequence.len());
    Ok(sequence)
}

pub fn load_sequence<P: AsRef<Path>>(path: P, lookup: &JobLookup) -> LfResult<Vec<usize>> {
    sequence_from_reader(open(path.as_ref(), "Sequence")?, lookup)
}
