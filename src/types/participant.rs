//! Participant-related types for the patungan bill splitter
//!
//! This module defines the people involved in a bill-splitting session
//! and the reusable contact book entries kept between sessions.

use serde::{Deserialize, Serialize};

/// Participant identifier
///
/// Opaque string identity. Session files choose the format (UUIDs,
/// `p-0` style counters); the engine only ever compares them for
/// equality.
pub type ParticipantId = String;

/// A person sharing the current bill
///
/// Identity is the `id`; `name` is display-only and may duplicate across
/// participants without violating any invariant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Unique identifier within the session
    pub id: ParticipantId,

    /// Display name shown in reports and settlement instructions
    pub name: String,
}

impl Participant {
    /// Create a participant from an id and a display name
    pub fn new(id: impl Into<ParticipantId>, name: impl Into<String>) -> Self {
        Participant {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// A reusable contact book entry
///
/// Contacts live outside any session and carry only a display name.
/// They are managed by the [`crate::io::contacts::ContactRepository`]
/// so frequent co-diners don't have to be retyped every session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Display name of the contact
    pub name: String,
}

impl Contact {
    /// Create a contact with the given display name
    pub fn new(name: impl Into<String>) -> Self {
        Contact { name: name.into() }
    }
}
