//! Engine output types
//!
//! The [`Summary`] is the complete result of one split computation:
//! aggregate totals, one [`SummaryParticipant`] per session participant,
//! and the list of settlement [`Transaction`]s toward the designated
//! payer. All of it is a plain value object; the presentation layer
//! renders it as text, CSV, or JSON without further computation.
//!
//! Serde field names are camelCase to match the session wire format
//! (`totalToPay`, `roundingDifference`, ...).

use crate::types::ParticipantId;
use serde::{Deserialize, Serialize};

/// Per-participant cost breakdown
///
/// Every shared cost (tax, service charge, delivery fee, global discount)
/// is allocated in proportion to the participant's share of total item
/// expenses. `final_share` is the exact pre-rounding obligation;
/// `total_to_pay` is what the participant actually hands over after the
/// optional round-up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryParticipant {
    /// Session participant id this row belongs to
    pub id: ParticipantId,

    /// Display name, copied from the participant
    pub name: String,

    /// Sum of this participant's item allocations (post item-discount)
    pub subtotal: f64,

    /// Proportional slice of the PPN (VAT) amount
    pub ppn_share: f64,

    /// Proportional slice of the service charge
    pub service_tax_share: f64,

    /// Proportional slice of the delivery fee
    pub delivery_fee_share: f64,

    /// Proportional slice of the global discount (subtracted)
    pub global_discount_share: f64,

    /// This participant's fraction of the total PPN, as a percentage
    ///
    /// Display figure: `ppn_share / ppn_amount * 100`, not a restatement
    /// of the global PPN rate. Zero when no PPN was charged.
    pub ppn_percentage_share: f64,

    /// This participant's fraction of the total service charge, as a percentage
    pub service_tax_percentage_share: f64,

    /// Exact obligation before rounding:
    /// `subtotal + ppn_share + service_tax_share + delivery_fee_share - global_discount_share`
    pub final_share: f64,

    /// Final amount after the optional round-up to the rounding unit
    pub total_to_pay: f64,
}

/// A settlement instruction: `from` pays `to` the given amount
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Display name of the paying participant
    pub from: String,

    /// Display name of the receiving participant (the designated payer)
    pub to: String,

    /// Amount to transfer (the payer's rounded `total_to_pay`)
    pub amount: f64,
}

/// The complete result of one split computation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    /// Sum of all allocated post-discount line totals
    ///
    /// Equals the sum of all participant subtotals by construction;
    /// orphaned items (empty `sharedBy`) never enter this figure.
    pub total_item_expenses: f64,

    /// PPN (VAT) charged on `total_item_expenses`
    pub ppn_amount: f64,

    /// Service charge, percentage-of-base or flat
    pub service_tax_amount: f64,

    /// Flat delivery fee
    pub delivery_fee: f64,

    /// Item-level discounts plus the global discount
    pub total_discount: f64,

    /// Authoritative unrounded total:
    /// `total_item_expenses + ppn_amount + service_tax_amount + delivery_fee - global discount`
    ///
    /// Always equals the sum of all `final_share`s within floating-point
    /// tolerance. May be negative; the engine does not reject that.
    pub total_bill: f64,

    /// Sum of all rounded `total_to_pay` figures
    pub grand_total: f64,

    /// `grand_total - total_bill`; the collective round-up surplus
    ///
    /// Non-negative whenever a rounding unit is in effect, zero otherwise.
    pub rounding_difference: f64,

    /// One row per session participant, in session order
    pub participants: Vec<SummaryParticipant>,

    /// Star-topology settlement toward the designated payer
    ///
    /// Empty when no payer is designated.
    pub transactions: Vec<Transaction>,
}
