//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `participant`: session participants and contact book entries
//! - `bill`: receipt items and discount/charge descriptors
//! - `summary`: the engine's output shape
//! - `error`: error types for everything outside the engine

pub mod bill;
pub mod error;
pub mod participant;
pub mod summary;

pub use bill::{BillItem, DiscountDetails, DiscountKind, ServiceTaxDetails};
pub use error::SplitError;
pub use participant::{Contact, Participant, ParticipantId};
pub use summary::{Summary, SummaryParticipant, Transaction};
