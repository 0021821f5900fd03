//! CLI tool to load, adjust, sort, and rewrite a student records file.
//!
//! Usage:
//!   student-records <input.csv>
//!   student-records <input.csv> --bonus 5 --sort -o <output.csv>
//!
//! If no output file is specified, writes to stdout.

use clap::Parser;
use std::io::{self, Write};
use std::process;
use student_records::{HEADER, RecordCollection, TextFile};
use tracing_subscriber::EnvFilter;

/// Load student records from a semicolon-delimited file, optionally adjust
/// averages and sort by name, then write them back out.
///
/// The first input line is a header. Rows that cannot be parsed are skipped
/// and reported on stderr.
#[derive(Parser)]
#[command(name = "student-records")]
struct Cli {
    /// Input file (id;firstName;lastName;average, header line first)
    input: String,

    /// Write output to file instead of stdout
    #[arg(short, long)]
    output: Option<String>,

    /// Add this many points to every average, clamped to 0..=100
    #[arg(short, long, allow_negative_numbers = true)]
    bonus: Option<f64>,

    /// Sort by first name, then last name
    #[arg(short, long)]
    sort: bool,

    /// Do not write the header line
    #[arg(long)]
    no_header: bool,

    /// Show paths, record counts, and skipped rows on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    tracing::info!(
        input = %cli.input,
        output = cli.output.as_deref().unwrap_or("(stdout)"),
        "loading records"
    );

    let mut students = RecordCollection::new();
    let report = match students.load_from(&TextFile::new(&cli.input)) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Error reading input file: {e}");
            process::exit(1);
        }
    };

    if !report.is_clean() {
        eprintln!(
            "Skipped {} of {} rows",
            report.skipped.len(),
            report.loaded + report.skipped.len()
        );
    }
    for id in students.duplicate_ids() {
        tracing::warn!(id, "duplicate id");
    }

    if let Some(delta) = cli.bonus {
        if let Err(e) = students.bulk_adjust_average(delta) {
            eprintln!("Error adjusting averages: {e}");
            process::exit(1);
        }
        tracing::info!(delta, "adjusted averages");
    }

    if cli.sort {
        students.sort_by_order();
        tracing::info!("sorted by name");
    }

    let header = (!cli.no_header).then_some(HEADER);

    if let Some(out_path) = &cli.output {
        if let Err(e) = students.save_to(&TextFile::new(out_path), header) {
            eprintln!("Error writing output file: {e}");
            process::exit(1);
        }
    } else {
        let mut stdout = io::stdout().lock();
        let lines = header.map(str::to_string).into_iter().chain(students.render());
        for line in lines {
            if let Err(e) = writeln!(stdout, "{line}") {
                eprintln!("Error writing output: {e}");
                process::exit(1);
            }
        }
    }

    tracing::info!(
        loaded = report.loaded,
        skipped = report.skipped.len(),
        "records written"
    );
}
