//! Settlement transaction construction
//!
//! Turns the per-participant totals into concrete "who pays whom"
//! instructions. With a designated payer the settlement is a star: every
//! other participant owes their own rounded total directly to the payer.
//! There is exactly one transaction per debtor. No multi-party debt
//! matching is attempted here.

use crate::types::{SummaryParticipant, Transaction};

/// Build the settlement transaction list toward a designated payer
///
/// One transaction per non-payer participant whose `total_to_pay` is
/// positive, each for that participant's full rounded total.
///
/// # Arguments
///
/// * `rows` - The computed per-participant summary rows
/// * `payer_id` - The designated payer's participant id, if any
///
/// # Returns
///
/// The transaction list. Empty when:
/// - no payer is designated,
/// - the payer id matches no row (the engine stays total; upstream
///   validation is expected to catch this), or
/// - there are fewer than two participants
pub fn build_transactions(rows: &[SummaryParticipant], payer_id: Option<&str>) -> Vec<Transaction> {
    let Some(payer_id) = payer_id else {
        return Vec::new();
    };

    if rows.len() < 2 {
        return Vec::new();
    }

    let Some(payer) = rows.iter().find(|row| row.id == payer_id) else {
        return Vec::new();
    };

    rows.iter()
        .filter(|row| row.id != payer.id && row.total_to_pay > 0.0)
        .map(|row| Transaction {
            from: row.name.clone(),
            to: payer.name.clone(),
            amount: row.total_to_pay,
        })
        .collect()
}
