//! The split computation engine
//!
//! This module provides [`compute_split`], the stateless pure function at
//! the heart of the bill splitter. It consumes validated numeric input and
//! produces a deterministic, arithmetically consistent per-participant
//! breakdown plus the settlement transaction list.
//!
//! The engine enforces the arithmetic rules of the split:
//! - Item-level discounts come off each line before allocation
//! - Allocated lines are divided evenly across their `shared_by` set
//! - PPN, service charge, delivery fee, and the global discount are
//!   distributed in proportion to each participant's item consumption
//! - The optional rounding unit rounds each final share UP, never down,
//!   so rounding produces a surplus (a "tip"), never a shortfall
//!
//! # Purity
//!
//! `compute_split` has no I/O, no shared state, and no hidden caching.
//! It is cheap enough to call on every state transition; its cost is
//! linear in `items.len() + participants.len()`.

use crate::core::settlement::build_transactions;
use crate::types::{
    BillItem, DiscountDetails, Participant, ServiceTaxDetails, Summary, SummaryParticipant,
};

/// Compute the full bill split
///
/// Implements the split in one pass over the items and one pass over the
/// participants:
///
/// 1. Discount each line (`price * quantity` minus the item discount) and
///    divide it evenly across its `shared_by` participants
/// 2. Charge PPN and the service charge on the allocated total, add the
///    delivery fee, subtract the global discount
/// 3. Allocate all shared costs proportionally to item consumption
/// 4. Round each final share up to the rounding unit (when set)
/// 5. Build star-topology settlement transactions toward the payer
///
/// # Arguments
///
/// * `participants` - The people sharing the bill
/// * `items` - Receipt lines with per-item discounts and sharing sets
/// * `ppn_percent` - PPN (VAT) rate on the 0-100 scale
/// * `service_tax` - Service charge, percentage-of-base or flat amount
/// * `delivery_fee` - Flat delivery fee
/// * `global_discount` - Discount on the whole bill's item total
/// * `rounding_unit` - Round each final share up to a multiple of this
///   (0 disables rounding; the UI offers 0/100/500/1000)
/// * `payer_id` - Designated payer for settlement transactions, if any
///
/// # Returns
///
/// * `Some(Summary)` with the full breakdown
/// * `None` when `participants` is empty (nothing to show, not an error)
///
/// # Numeric behavior
///
/// All arithmetic is plain `f64`; callers should compare results with
/// cent-level tolerance. When no item cost was allocated at all
/// (`total_item_expenses == 0`), every proportional share is 0 rather
/// than NaN. A negative bill (oversized discounts) is NOT rejected; it
/// propagates into the summary as-is.
#[allow(clippy::too_many_arguments)]
pub fn compute_split(
    participants: &[Participant],
    items: &[BillItem],
    ppn_percent: f64,
    service_tax: &ServiceTaxDetails,
    delivery_fee: f64,
    global_discount: &DiscountDetails,
    rounding_unit: u64,
    payer_id: Option<&str>,
) -> Option<Summary> {
    if participants.is_empty() {
        return None;
    }

    // Per-item discounting and even allocation across the sharing set.
    // Items with an empty shared_by set are orphaned: their discount is
    // still counted in the aggregate, but no participant bears their
    // cost and they never enter total_item_expenses.
    let mut subtotals = vec![0.0_f64; participants.len()];
    let mut total_item_discount = 0.0;

    for item in items {
        total_item_discount += item.discount_amount();

        if item.shared_by.is_empty() {
            continue;
        }

        let per_person = item.line_after_discount() / item.shared_by.len() as f64;
        for sharer in &item.shared_by {
            // Ids that name no session participant are skipped; the
            // divisor stays shared_by.len() so the dangling slice simply
            // evaporates. Session import rejects such ids upfront.
            if let Some(index) = participants.iter().position(|p| &p.id == sharer) {
                subtotals[index] += per_person;
            }
        }
    }

    let total_item_expenses: f64 = subtotals.iter().sum();

    // Shared charges are based on the post-item-discount, pre-global-
    // discount item total.
    let global_discount_amount = global_discount.resolve(total_item_expenses);
    let total_discount = total_item_discount + global_discount_amount;
    let ppn_amount = total_item_expenses * ppn_percent / 100.0;
    let service_tax_amount = service_tax.resolve(total_item_expenses);

    let total_bill =
        total_item_expenses + ppn_amount + service_tax_amount + delivery_fee
            - global_discount_amount;

    // Proportional allocation, then the per-person round-up.
    let mut summary_participants = Vec::with_capacity(participants.len());
    let mut grand_total = 0.0;

    for (participant, &subtotal) in participants.iter().zip(&subtotals) {
        let proportion = if total_item_expenses == 0.0 {
            0.0
        } else {
            subtotal / total_item_expenses
        };

        let ppn_share = ppn_amount * proportion;
        let service_tax_share = service_tax_amount * proportion;
        let delivery_fee_share = delivery_fee * proportion;
        let global_discount_share = global_discount_amount * proportion;

        let final_share =
            subtotal + ppn_share + service_tax_share + delivery_fee_share - global_discount_share;

        let total_to_pay = if rounding_unit > 0 && final_share > 0.0 {
            let unit = rounding_unit as f64;
            (final_share / unit).ceil() * unit
        } else {
            final_share
        };
        grand_total += total_to_pay;

        summary_participants.push(SummaryParticipant {
            id: participant.id.clone(),
            name: participant.name.clone(),
            subtotal,
            ppn_share,
            service_tax_share,
            delivery_fee_share,
            global_discount_share,
            ppn_percentage_share: percentage_of(ppn_share, ppn_amount),
            service_tax_percentage_share: percentage_of(service_tax_share, service_tax_amount),
            final_share,
            total_to_pay,
        });
    }

    let transactions = build_transactions(&summary_participants, payer_id);

    Some(Summary {
        total_item_expenses,
        ppn_amount,
        service_tax_amount,
        delivery_fee,
        total_discount,
        total_bill,
        grand_total,
        rounding_difference: grand_total - total_bill,
        participants: summary_participants,
        transactions,
    })
}

/// A participant's slice of an aggregate amount, expressed as a percentage
///
/// Returns 0 when the aggregate is 0 so summaries never carry NaN.
fn percentage_of(share: f64, aggregate: f64) -> f64 {
    if aggregate == 0.0 {
        0.0
    } else {
        share / aggregate * 100.0
    }
}
