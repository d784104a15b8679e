//! Patungan Library
//! # Overview
//!
//! This library computes how to split a shared bill (patungan) among a
//! group of participants, including Indonesian VAT (PPN), service
//! charges, delivery fees, discounts, and rounding.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Participant, BillItem, Summary, etc.)
//! - [`cli`] - CLI arguments parsing
//! - [`core`] - Business logic components:
//!   - [`core::engine`] - The pure split computation
//!   - [`core::settlement`] - Who-pays-whom transfer derivation
//! - [`io`] - Session persistence, contact storage, numeric parsing,
//!   and report rendering
//! - [`pipeline`] - Orchestration of load, compute, and render
//!
//! # Split Flow
//!
//! A session describes participants, bill items (each shared by a subset
//! of the group), and bill-level charges. The engine:
//!
//! - **Allocates** each item's discounted cost evenly across its sharers
//! - **Distributes** PPN, service charge, delivery fee, and the global
//!   discount proportionally to each participant's item subtotal
//! - **Rounds** each share up to the configured cash unit
//! - **Settles** by directing every non-payer's rounded share to the
//!   designated payer
//!
//! # Summary Fields
//!
//! Each computed summary carries:
//! - `totalBill`: the exact amount owed before rounding
//! - `grandTotal`: the sum actually collected after rounding
//! - `roundingDifference`: the overshoot introduced by rounding up
//! - per-participant shares of every charge, plus settlement transfers

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod pipeline;
pub mod types;

pub use core::{build_transactions, compute_split};
pub use io::{load_session, parse_amount, save_session, write_report, SessionState};
pub use types::{
    BillItem, DiscountDetails, DiscountKind, Participant, ParticipantId, ServiceTaxDetails,
    SplitError, Summary, SummaryParticipant, Transaction,
};
