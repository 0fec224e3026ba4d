use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use lineforge::api::OptimizationReport;
use lineforge::jobs::JobLookup;
use lineforge::optimizer::{PassEvent, SearchObserver, SwapCandidate};
use lineforge::scorer::CostModel;

pub fn print_sequence(label: &str, ids: &[impl AsRef<str>]) {
    let joined: Vec<&str> = ids.iter().map(|s| s.as_ref()).collect();
    println!("{}: {}", label, joined.join(", "));
}

pub fn print_report(report: &OptimizationReport) {
    print_sequence("Final production sequence", &report.final_sequence);

    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("Initial").add_attribute(Attribute::Bold),
        Cell::new("Final").fg(Color::Cyan),
        Cell::new("Saved").fg(Color::Green),
        Cell::new("Passes"),
        Cell::new("Status"),
        Cell::new("Time (ms)"),
    ]);

    table.add_row(vec![
        Cell::new(report.initial_cost),
        Cell::new(report.final_cost).fg(Color::Cyan),
        Cell::new(report.improvement).fg(Color::Green),
        Cell::new(report.passes),
        Cell::new(report.termination),
        Cell::new(format!("{:.3}", report.elapsed_ms)),
    ]);

    for i in 0..4 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }
    println!("\n{}", table);

    println!(
        "Completed with {} passes in {:.3} msec execution time",
        report.passes, report.elapsed_ms
    );
    println!("Total production time: {}", report.final_cost);
}

/// Ranked dump of live swap candidates, best first.
pub fn print_ranked_queue(ranked: &[SwapCandidate]) {
    if ranked.is_empty() {
        println!("The queue is empty!\n");
        return;
    }

    let mut table = Table::new();
    table.load_preset(ASCII_FULL);
    table.add_row(vec![
        Cell::new("Rank").add_attribute(Attribute::Bold),
        Cell::new("Positions"),
        Cell::new("Delta").fg(Color::Green),
    ]);
    for (rank, c) in ranked.iter().enumerate() {
        table.add_row(vec![
            Cell::new(rank + 1).set_alignment(CellAlignment::Right),
            Cell::new(format!("{} <-> {}", c.position, c.position + 1)),
            Cell::new(c.delta).set_alignment(CellAlignment::Right),
        ]);
    }
    println!("{}\n", table);
}

/// Per-position cost breakdown for one sequence.
pub fn print_cost_breakdown(lookup: &JobLookup, model: &CostModel, sequence: &[usize]) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.add_row(vec![
        Cell::new("#").add_attribute(Attribute::Bold),
        Cell::new("Job"),
        Cell::new("Duration"),
        Cell::new("Changeover ->"),
        Cell::new("Running").fg(Color::Cyan),
    ]);

    let mut running = 0;
    for (pos, &job) in sequence.iter().enumerate() {
        let duration = model.duration(job);
        let setup = sequence
            .get(pos + 1)
            .map(|&next| model.changeover(job, next));
        running += duration + setup.unwrap_or(0);

        table.add_row(vec![
            Cell::new(pos),
            Cell::new(lookup.to_identifier(job)),
            Cell::new(duration),
            Cell::new(setup.map(|s| s.to_string()).unwrap_or_default()),
            Cell::new(running).fg(Color::Cyan),
        ]);
    }

    for i in [0, 2, 3, 4] {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }
    println!("{}", table);
}

/// Prints every accepted swap and, with diagnostics on, the ranked queue.
pub struct SwapLog<'a> {
    lookup: &'a JobLookup,
}

impl<'a> SwapLog<'a> {
    pub fn new(lookup: &'a JobLookup) -> Self {
        Self { lookup }
    }
}

impl SearchObserver for SwapLog<'_> {
    fn on_seeded(&mut self, _pending: usize, ranked: Option<&[SwapCandidate]>) {
        if let Some(ranked) = ranked {
            println!("Initial Swap Queue:");
            print_ranked_queue(ranked);
            println!("{}", "_".repeat(57));
        }
    }

    fn on_pass(&mut self, event: &PassEvent<'_>) -> bool {
        let Some(ranked) = event.ranked else {
            return true;
        };
        let swap = &event.swap;

        println!(
            "\nSwapping pair at indexes {} and {} to reduce production time by {}",
            swap.position,
            swap.position + 1,
            -swap.delta
        );
        println!("{}", self.lookup.decode(event.sequence).join(", "));
        println!("\nSwap Queue after pass {}:", swap.pass);
        print_ranked_queue(ranked);
        println!("{}", "_".repeat(57));
        true
    }
}
