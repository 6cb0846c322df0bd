//! Canceled Report CLI
//!
//! Reads a JSON array of transactions and prints the canceled ones grouped
//! by year, newest first.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- transactions.txt > report.json
//! ```
//!
//! Without an argument, `transactions.txt` next to the executable is read.
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `warn` to control logging verbosity

use canceled_report::{load_path, CanceledReport, ReportConfig, Result};
use std::env;
use std::io;
use std::path::PathBuf;
use std::process;

const DEFAULT_INPUT: &str = "transactions.txt";

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let input_path = env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(default_input_path);

    let records = load_path(&input_path)?;
    let report = CanceledReport::build(&records, &ReportConfig::default());

    let stdout = io::stdout();
    let handle = stdout.lock();
    report.write_output(handle)?;

    Ok(())
}

/// `transactions.txt` in the executable's directory, or the working directory
/// if that cannot be determined.
fn default_input_path() -> PathBuf {
    env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(DEFAULT_INPUT)))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT))
}
