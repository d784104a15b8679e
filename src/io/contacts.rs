//! Contact book repository
//!
//! Frequent co-diners are kept in a small contact book that outlives any
//! single session. Access goes through the [`ContactRepository`] trait so
//! the UI layer stays decoupled from where contacts actually live; the
//! shipped implementation is a JSON file next to the user's sessions.

use crate::types::{Contact, SplitError};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::PathBuf;

/// Storage abstraction for the reusable contact book
///
/// Implementations must make `save` atomic from the caller's point of
/// view: a failed save leaves the previously stored contacts readable.
pub trait ContactRepository {
    /// Load all stored contacts
    ///
    /// A missing store is an empty contact book, not an error.
    fn load(&self) -> Result<Vec<Contact>, SplitError>;

    /// Replace the stored contacts with the given list
    fn save(&self, contacts: &[Contact]) -> Result<(), SplitError>;
}

/// JSON-file-backed contact store
///
/// The wire format is a plain JSON array of `{ "name": ... }` objects.
#[derive(Debug, Clone)]
pub struct JsonContactStore {
    path: PathBuf,
}

impl JsonContactStore {
    /// Create a store backed by the given file path
    ///
    /// The file does not need to exist yet; it is created on first save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonContactStore { path: path.into() }
    }

    /// Merge names into the book, keeping existing entries
    ///
    /// Loads the current book, appends every name not already present
    /// (exact match after trimming), and saves the result. Returns the
    /// number of newly added contacts.
    pub fn upsert_names<'a>(
        &self,
        names: impl IntoIterator<Item = &'a str>,
    ) -> Result<usize, SplitError> {
        let mut contacts = self.load()?;
        let mut added = 0;

        for name in names {
            let name = name.trim();
            if name.is_empty() {
                continue;
            }
            if contacts.iter().all(|c| c.name != name) {
                contacts.push(Contact::new(name));
                added += 1;
            }
        }

        if added > 0 {
            self.save(&contacts)?;
        }
        Ok(added)
    }
}

impl ContactRepository for JsonContactStore {
    fn load(&self) -> Result<Vec<Contact>, SplitError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let file = File::open(&self.path)?;
        let contacts = serde_json::from_reader(BufReader::new(file))?;
        Ok(contacts)
    }

    fn save(&self, contacts: &[Contact]) -> Result<(), SplitError> {
        // Write to a sibling temp file first so a failed save never
        // truncates the existing book.
        let tmp_path = super::temp_sibling(&self.path);
        {
            let file = File::create(&tmp_path)?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, contacts)?;
            writer.write_all(b"\n")?;
            writer.flush()?;
        }
        std::fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}
