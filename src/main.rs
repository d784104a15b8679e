//! Patungan CLI
//!
//! Command-line interface for splitting a shared bill from a session
//! JSON file.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- session.json
//! cargo run -- --format csv session.json > split.csv
//! cargo run -- --payer Budi session.json
//! cargo run -- --contacts contacts.json session.json
//! ```
//!
//! The program reads the session file, computes each participant's share
//! of the bill, and writes the report to stdout. With `--contacts`, the
//! session's participant names are saved into the contact book after a
//! successful run.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (missing arguments, file not found, invalid session, etc.)

use patungan::cli;
use patungan::io::contacts::JsonContactStore;
use patungan::pipeline::process_session;
use std::process;

fn main() {
    // Parse command-line arguments using clap
    let args = cli::parse_args();

    // Compute the split and write the report to stdout
    let mut output = std::io::stdout();
    let names = match process_session(
        &args.session_file,
        &args.format,
        args.payer.as_deref(),
        &mut output,
    ) {
        Ok(names) => names,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    // Remember this session's participants for next time
    if let Some(path) = args.contacts {
        let store = JsonContactStore::new(path);
        if let Err(e) = store.upsert_names(names.iter().map(String::as_str)) {
            eprintln!("Warning: could not update contacts: {}", e);
        }
    }
}
