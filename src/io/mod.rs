//! I/O module
//!
//! Handles session persistence, contact storage, numeric parsing, and
//! report output.
//!
//! # Components
//!
//! - `session` - Session file loading, validation, and saving
//! - `contacts` - Persistent contact book keyed by name
//! - `numeric` - Locale-tolerant amount parsing
//! - `report` - Summary rendering (text, CSV, JSON)

pub mod contacts;
pub mod numeric;
pub mod report;
pub mod session;

pub use contacts::{ContactRepository, JsonContactStore};
pub use numeric::parse_amount;
pub use report::{write_csv_report, write_json_report, write_report, write_text_report};
pub use session::{load_session, save_session, SessionState};

use std::path::{Path, PathBuf};

/// Sibling path used for write-then-rename saves
///
/// Both persistent stores write to this first so a failed save never
/// truncates the existing file.
pub(crate) fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
