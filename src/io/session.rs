//! Session persistence shim
//!
//! A [`SessionState`] is the complete snapshot of one bill-splitting
//! session: participants, items, and every cost parameter. The JSON wire
//! shape uses camelCase field names throughout, so exported sessions
//! load back unchanged.
//!
//! # Import validation
//!
//! [`load_session`] validates the snapshot at the boundary: schema
//! problems (missing fields, unknown `type` tags) and value problems
//! (negative amounts, zero quantities, ids that name no participant)
//! both reject the import as a whole. A malformed file is never
//! partially applied, and the engine never sees unvalidated data.
//!
//! # State ownership
//!
//! The engine is pure; this snapshot is the single mutable state object
//! the surrounding layer owns. Mutators bump `revision` so callers can
//! tell when a recompute is due, and removal cascades keep the snapshot
//! internally consistent (no item ever points at a removed participant).

use crate::types::{
    BillItem, DiscountDetails, Participant, ParticipantId, ServiceTaxDetails, SplitError, Summary,
};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Complete snapshot of one bill-splitting session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    /// People sharing the bill, in display order
    pub participants: Vec<Participant>,

    /// Receipt lines with discounts and sharing assignments
    pub items: Vec<BillItem>,

    /// PPN (VAT) rate on the 0-100 scale
    #[serde(deserialize_with = "crate::io::numeric::deserialize_amount")]
    pub ppn: f64,

    /// Service charge settings
    pub service_tax: ServiceTaxDetails,

    /// Flat delivery fee
    #[serde(deserialize_with = "crate::io::numeric::deserialize_amount")]
    pub delivery_fee: f64,

    /// Discount applied to the whole bill's item total
    pub global_discount: DiscountDetails,

    /// Round each final share up to a multiple of this (0 = off)
    pub rounding: u64,

    /// Designated payer for settlement transactions
    #[serde(default)]
    pub payer_id: Option<ParticipantId>,

    /// Bumped on every mutation; not persisted
    ///
    /// Lets a reactive caller detect stale summaries without diffing
    /// the whole snapshot.
    #[serde(skip)]
    pub revision: u64,
}

impl SessionState {
    /// An empty session with all charges zeroed
    pub fn new() -> Self {
        SessionState {
            participants: Vec::new(),
            items: Vec::new(),
            ppn: 0.0,
            service_tax: ServiceTaxDetails::none(),
            delivery_fee: 0.0,
            global_discount: DiscountDetails::none(),
            rounding: 0,
            payer_id: None,
            revision: 0,
        }
    }

    /// Add a participant and return the generated id
    ///
    /// The name is trimmed; ids are `p-<n>` with `n` chosen to avoid
    /// collisions with ids already in the session (including imported
    /// ones).
    pub fn add_participant(&mut self, name: &str) -> ParticipantId {
        let mut n = self.participants.len();
        let id = loop {
            let candidate = format!("p-{n}");
            if self.participants.iter().all(|p| p.id != candidate) {
                break candidate;
            }
            n += 1;
        };
        self.participants.push(Participant::new(&id, name.trim()));
        self.revision += 1;
        id
    }

    /// Remove a participant, cascading into items and the payer slot
    ///
    /// The id is stripped from every item's `shared_by` list, and the
    /// payer designation is cleared if it pointed at the removed
    /// participant. Removing an unknown id is a no-op.
    pub fn remove_participant(&mut self, id: &str) {
        let before = self.participants.len();
        self.participants.retain(|p| p.id != id);
        if self.participants.len() == before {
            return;
        }

        for item in &mut self.items {
            item.shared_by.retain(|sharer| sharer != id);
        }
        if self.payer_id.as_deref() == Some(id) {
            self.payer_id = None;
        }
        self.revision += 1;
    }

    /// Add an item to the session
    pub fn add_item(&mut self, item: BillItem) {
        self.items.push(item);
        self.revision += 1;
    }

    /// Remove an item by id; unknown ids are a no-op
    pub fn remove_item(&mut self, id: &str) {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        if self.items.len() != before {
            self.revision += 1;
        }
    }

    /// Designate (or clear) the payer for settlement transactions
    pub fn set_payer(&mut self, payer_id: Option<ParticipantId>) {
        self.payer_id = payer_id;
        self.revision += 1;
    }

    /// Compute the split for the current snapshot
    ///
    /// Convenience wrapper over [`crate::core::compute_split`] with this
    /// session's parameters. `None` when the session has no participants.
    pub fn compute(&self) -> Option<Summary> {
        crate::core::compute_split(
            &self.participants,
            &self.items,
            self.ppn,
            &self.service_tax,
            self.delivery_fee,
            &self.global_discount,
            self.rounding,
            self.payer_id.as_deref(),
        )
    }

    /// Validate values the schema alone cannot express
    ///
    /// # Errors
    ///
    /// Returns `SplitError::Validation` naming the offending field when:
    /// - any amount is negative or non-finite
    /// - any item quantity is zero
    /// - a `sharedBy` entry or `payerId` names no session participant
    /// - two participants or two items share an id
    pub fn validate(&self) -> Result<(), SplitError> {
        require_amount("ppn", self.ppn)?;
        require_amount("deliveryFee", self.delivery_fee)?;
        require_amount("serviceTax.value", self.service_tax.value)?;
        require_amount("globalDiscount.value", self.global_discount.value)?;

        for (i, participant) in self.participants.iter().enumerate() {
            let duplicate = self.participants[..i]
                .iter()
                .any(|other| other.id == participant.id);
            if duplicate {
                return Err(SplitError::validation(
                    format!("participants[{i}].id"),
                    format!("duplicate participant id '{}'", participant.id),
                ));
            }
        }

        for (i, item) in self.items.iter().enumerate() {
            require_amount(&format!("items[{i}].price"), item.price)?;
            require_amount(&format!("items[{i}].discount.value"), item.discount.value)?;

            if item.quantity == 0 {
                return Err(SplitError::validation(
                    format!("items[{i}].quantity"),
                    "must be at least 1",
                ));
            }
            if self.items[..i].iter().any(|other| other.id == item.id) {
                return Err(SplitError::validation(
                    format!("items[{i}].id"),
                    format!("duplicate item id '{}'", item.id),
                ));
            }
            for sharer in &item.shared_by {
                if !self.participants.iter().any(|p| &p.id == sharer) {
                    return Err(SplitError::validation(
                        format!("items[{i}].sharedBy"),
                        format!("unknown participant id '{sharer}'"),
                    ));
                }
            }
        }

        if let Some(payer_id) = &self.payer_id {
            if !self.participants.iter().any(|p| &p.id == payer_id) {
                return Err(SplitError::validation(
                    "payerId",
                    format!("unknown participant id '{payer_id}'"),
                ));
            }
        }

        Ok(())
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

fn require_amount(field: &str, value: f64) -> Result<(), SplitError> {
    if !value.is_finite() {
        return Err(SplitError::validation(field, "must be a finite number"));
    }
    if value < 0.0 {
        return Err(SplitError::validation(field, "must be non-negative"));
    }
    Ok(())
}

/// Load and validate a session snapshot from a JSON file
///
/// # Arguments
///
/// * `path` - Path to the session JSON file
///
/// # Returns
///
/// * `Ok(SessionState)` - the validated snapshot
/// * `Err(SplitError)` - file missing, malformed JSON, or failed
///   validation; nothing is partially applied
pub fn load_session(path: &Path) -> Result<SessionState, SplitError> {
    if !path.exists() {
        return Err(SplitError::file_not_found(path.display().to_string()));
    }
    let file = File::open(path)?;
    let session: SessionState = serde_json::from_reader(BufReader::new(file))?;
    session.validate()?;
    Ok(session)
}

/// Save a session snapshot as pretty-printed JSON
///
/// Writes to a sibling temp file and renames it into place, so a failed
/// save never truncates an existing session file.
///
/// # Arguments
///
/// * `session` - The snapshot to persist
/// * `path` - Destination file, created or replaced
pub fn save_session(session: &SessionState, path: &Path) -> Result<(), SplitError> {
    let tmp_path = super::temp_sibling(path);
    {
        let file = File::create(&tmp_path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, session)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
    }
    std::fs::rename(&tmp_path, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DiscountKind;
    use rstest::rstest;
    use std::io::Write as _;
    use tempfile::NamedTempFile;

    fn create_temp_json(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    const VALID_SESSION: &str = r#"{
        "participants": [
            { "id": "p-0", "name": "Budi" },
            { "id": "p-1", "name": "Sari" }
        ],
        "items": [
            {
                "id": "i-0",
                "description": "Nasi Goreng",
                "price": 25000,
                "quantity": 2,
                "discount": { "type": "percentage", "value": 10 },
                "sharedBy": ["p-0", "p-1"]
            }
        ],
        "ppn": 11,
        "serviceTax": { "type": "percentage", "value": 5 },
        "deliveryFee": 16000,
        "globalDiscount": { "type": "amount", "value": 0 },
        "rounding": 1000,
        "payerId": "p-0"
    }"#;

    #[test]
    fn test_load_valid_session() {
        let file = create_temp_json(VALID_SESSION);
        let session = load_session(file.path()).unwrap();

        assert_eq!(session.participants.len(), 2);
        assert_eq!(session.items[0].quantity, 2);
        assert_eq!(session.items[0].discount.kind, DiscountKind::Percentage);
        assert_eq!(session.ppn, 11.0);
        assert_eq!(session.rounding, 1000);
        assert_eq!(session.payer_id.as_deref(), Some("p-0"));
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_session(Path::new("nonexistent-session.json"));
        assert!(matches!(result, Err(SplitError::FileNotFound { .. })));
    }

    #[rstest]
    #[case::not_json("this is not json")]
    #[case::missing_items(r#"{ "participants": [], "ppn": 0 }"#)]
    #[case::bad_discount_tag(
        r#"{
            "participants": [], "items": [], "ppn": 0,
            "serviceTax": { "type": "half-off", "value": 5 },
            "deliveryFee": 0,
            "globalDiscount": { "type": "amount", "value": 0 },
            "rounding": 0
        }"#
    )]
    fn test_load_rejects_schema_violations(#[case] content: &str) {
        let file = create_temp_json(content);
        let result = load_session(file.path());
        assert!(matches!(result, Err(SplitError::Schema { .. })));
    }

    fn minimal_session() -> SessionState {
        let mut session = SessionState::new();
        session.add_participant("Budi");
        session.add_participant("Sari");
        session
    }

    fn plain_item(id: &str, shared_by: &[&str]) -> BillItem {
        BillItem {
            id: id.to_string(),
            description: "Es Teh".to_string(),
            price: 5_000.0,
            quantity: 1,
            discount: DiscountDetails::none(),
            shared_by: shared_by.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_validate_accepts_minimal_session() {
        assert!(minimal_session().validate().is_ok());
    }

    #[rstest]
    #[case::negative_ppn(|s: &mut SessionState| s.ppn = -1.0, "ppn")]
    #[case::negative_fee(|s: &mut SessionState| s.delivery_fee = -5.0, "deliveryFee")]
    #[case::nan_discount(
        |s: &mut SessionState| s.global_discount = DiscountDetails::amount(f64::NAN),
        "globalDiscount.value"
    )]
    #[case::zero_quantity(
        |s: &mut SessionState| {
            let mut item = plain_item("i-0", &["p-0"]);
            item.quantity = 0;
            s.items.push(item);
        },
        "items[0].quantity"
    )]
    #[case::dangling_sharer(
        |s: &mut SessionState| s.items.push(plain_item("i-0", &["p-99"])),
        "items[0].sharedBy"
    )]
    #[case::dangling_payer(
        |s: &mut SessionState| s.payer_id = Some("p-99".to_string()),
        "payerId"
    )]
    #[case::duplicate_item_id(
        |s: &mut SessionState| {
            s.items.push(plain_item("i-0", &["p-0"]));
            s.items.push(plain_item("i-0", &["p-1"]));
        },
        "items[1].id"
    )]
    fn test_validate_rejects(
        #[case] mutate: impl FnOnce(&mut SessionState),
        #[case] expected_field: &str,
    ) {
        let mut session = minimal_session();
        mutate(&mut session);

        match session.validate() {
            Err(SplitError::Validation { field, .. }) => assert_eq!(field, expected_field),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_remove_participant_cascades() {
        let mut session = minimal_session();
        session.items.push(plain_item("i-0", &["p-0", "p-1"]));
        session.set_payer(Some("p-1".to_string()));

        session.remove_participant("p-1");

        assert_eq!(session.participants.len(), 1);
        assert_eq!(session.items[0].shared_by, vec!["p-0".to_string()]);
        assert_eq!(session.payer_id, None);
        assert!(session.validate().is_ok());
    }

    #[test]
    fn test_remove_unknown_participant_is_noop() {
        let mut session = minimal_session();
        let revision = session.revision;
        session.remove_participant("p-99");
        assert_eq!(session.revision, revision);
        assert_eq!(session.participants.len(), 2);
    }

    #[test]
    fn test_add_participant_avoids_id_collisions() {
        let mut session = SessionState::new();
        session
            .participants
            .push(Participant::new("p-0", "Imported"));

        let id = session.add_participant("Budi");
        assert_ne!(id, "p-0");
        assert_eq!(session.participants.len(), 2);
        assert!(session.validate().is_ok());
    }

    #[test]
    fn test_mutators_bump_revision() {
        let mut session = SessionState::new();
        assert_eq!(session.revision, 0);

        let id = session.add_participant("Budi");
        session.add_item(plain_item("i-0", &[]));
        session.set_payer(Some(id.clone()));
        session.remove_item("i-0");
        session.remove_participant(&id);

        assert_eq!(session.revision, 5);
    }

    #[test]
    fn test_save_load_round_trip() {
        let mut session = minimal_session();
        session.items.push(plain_item("i-0", &["p-0", "p-1"]));
        session.ppn = 11.0;
        session.rounding = 500;

        let file = NamedTempFile::new().unwrap();
        save_session(&session, file.path()).unwrap();
        let loaded = load_session(file.path()).unwrap();

        // revision is transient; everything else round-trips.
        let mut expected = session.clone();
        expected.revision = 0;
        assert_eq!(loaded, expected);
    }

    #[test]
    fn test_save_replaces_existing_file_without_leftovers() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("session.json");

        let mut session = minimal_session();
        save_session(&session, &path).unwrap();

        session.add_participant("Citra");
        save_session(&session, &path).unwrap();

        // The overwrite goes through a temp sibling and rename; the
        // sibling must not survive a successful save.
        assert!(!crate::io::temp_sibling(&path).exists());

        let loaded = load_session(&path).unwrap();
        assert_eq!(loaded.participants.len(), 3);
    }

    #[test]
    fn test_session_compute_matches_engine() {
        let mut session = minimal_session();
        session.items.push(plain_item("i-0", &["p-0", "p-1"]));

        let summary = session.compute().unwrap();
        assert_eq!(summary.participants.len(), 2);
        assert!((summary.total_item_expenses - 5_000.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_session_compute_returns_none() {
        assert!(SessionState::new().compute().is_none());
    }
}
