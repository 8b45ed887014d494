//! churnscope: Employee Attrition Analysis CLI
//!
//! Renders the attrition report as an interactive dashboard, or as plain
//! text when stdout is not a terminal.

use std::io::{self, Write};

use anyhow::Result;
use clap::Parser;
use console::Term;

use churnscope::cli::{run_dashboard, Cli, OutputMode};
use churnscope::pipeline::{
    encode_attrition, get_column_names, load_dataset, DatasetStats, ReportError,
};
use churnscope::report::plain::write_report;
use churnscope::report::{compute_all, Preview};
use churnscope::utils::{
    create_spinner, finish_and_clear, finish_with_success, init_logging, print_banner,
    print_dataset_stats, print_encoding_warning, print_error, print_info,
};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let term = Term::stdout();
    let terminal_width = term.size_checked().map(|(_, cols)| cols);
    let config = cli.config(term.is_term(), terminal_width);
    tracing::debug!(?config, "resolved configuration");

    if cli.list_columns {
        let columns = match get_column_names(&config.input) {
            Ok(columns) => columns,
            Err(err) => exit_if_unavailable(err)?,
        };
        let mut stdout = io::stdout().lock();
        for name in columns {
            writeln!(stdout, "{}", name)?;
        }
        return Ok(());
    }

    print_banner(env!("CARGO_PKG_VERSION"), &config.input);

    // Step 1: Load dataset
    let spinner = create_spinner("Loading dataset...");
    let df = match load_dataset(&config.input, config.infer_schema_length) {
        Ok(df) => df,
        Err(err) => {
            finish_and_clear(&spinner);
            exit_if_unavailable(err)?
        }
    };
    finish_with_success(&spinner, "Dataset loaded");
    print_dataset_stats(&DatasetStats::from_frame(&df));

    // The preview shows the data as loaded, before the attrition flag is derived
    let preview = Preview::from_frame(&df, config.preview_rows);

    // Step 2: Derive the numeric attrition flag
    let table = encode_attrition(df, config.policy)?;
    print_encoding_warning(table.stats());

    // Step 3: Present
    match config.mode {
        OutputMode::Plain => {
            let mut stdout = io::stdout().lock();
            write_report(&mut stdout, &table, &preview, config.width)?;
        }
        OutputMode::Dashboard => {
            let spinner = create_spinner("Computing report...");
            let panels = compute_all(&table)?;
            finish_and_clear(&spinner);
            run_dashboard(&preview, &panels)?;
            print_info("Dashboard closed");
        }
    }

    Ok(())
}

/// A missing dataset stops the run with a styled message and exit status 1;
/// any other error is passed back to the caller.
fn exit_if_unavailable<T>(err: ReportError) -> Result<T> {
    if err.is_data_unavailable() {
        print_error(&err.to_string());
        std::process::exit(1);
    }
    Err(err.into())
}
