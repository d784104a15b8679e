//! Bill line items and charge/discount descriptors
//!
//! This module defines the priced items on the receipt and the tagged
//! value type used for both discounts and the service charge. The serde
//! shapes follow the session wire format (camelCase fields, a `type`
//! tag of `"percentage"` or `"amount"`), so exported sessions load
//! unchanged.

use crate::io::numeric::deserialize_amount;
use crate::types::ParticipantId;
use serde::{Deserialize, Serialize};

/// How a [`DiscountDetails`] value is interpreted
///
/// `Percentage` is computed against the relevant base (an item's
/// pre-discount line total, or the bill's total item expenses for the
/// global discount). `Amount` is a flat value in currency units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountKind {
    /// Value is a percentage of the base (e.g. 10 means 10%)
    Percentage,

    /// Value is a flat currency amount
    Amount,
}

/// A tagged discount value
///
/// Used both per-item (`BillItem::discount`) and globally for the whole
/// bill. The `value` must be a non-negative finite number; upstream
/// validation enforces this before the engine runs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiscountDetails {
    /// Discriminant: percentage-of-base or flat amount
    #[serde(rename = "type")]
    pub kind: DiscountKind,

    /// Percentage (0-100 scale) or flat amount, depending on `kind`
    #[serde(deserialize_with = "deserialize_amount")]
    pub value: f64,
}

impl DiscountDetails {
    /// A percentage discount (e.g. `percentage(10.0)` is 10% off the base)
    pub fn percentage(value: f64) -> Self {
        DiscountDetails {
            kind: DiscountKind::Percentage,
            value,
        }
    }

    /// A flat amount discount in currency units
    pub fn amount(value: f64) -> Self {
        DiscountDetails {
            kind: DiscountKind::Amount,
            value,
        }
    }

    /// No discount at all (flat zero)
    pub fn none() -> Self {
        DiscountDetails::amount(0.0)
    }

    /// Resolve this discount against a base amount
    ///
    /// Percentage discounts are computed as `base * value / 100`; flat
    /// discounts return `value` unchanged. A flat discount larger than
    /// the base is NOT clamped; the caller's line total goes negative.
    pub fn resolve(&self, base: f64) -> f64 {
        match self.kind {
            DiscountKind::Percentage => base * self.value / 100.0,
            DiscountKind::Amount => self.value,
        }
    }
}

impl Default for DiscountDetails {
    fn default() -> Self {
        DiscountDetails::none()
    }
}

/// Service charge descriptor
///
/// Same wire shape and resolution rule as a discount, but semantically
/// additive: it is added to the bill rather than subtracted.
pub type ServiceTaxDetails = DiscountDetails;

/// A purchased line on the receipt
///
/// `price` is per single unit; the line total is `price * quantity`.
/// `shared_by` names the participants who bear the item's post-discount
/// cost, split evenly among them. An empty `shared_by` makes the item
/// orphaned: it contributes nothing to any participant's subtotal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillItem {
    /// Unique identifier within the session
    pub id: String,

    /// Free-text description ("Nasi Goreng", "Es Teh", ...)
    pub description: String,

    /// Price per single unit, non-negative
    #[serde(deserialize_with = "deserialize_amount")]
    pub price: f64,

    /// Number of units, at least 1
    pub quantity: u32,

    /// Item-level discount, applied to the full line total
    #[serde(default)]
    pub discount: DiscountDetails,

    /// Ids of the participants sharing this item's cost
    ///
    /// Order is irrelevant. The engine divides the post-discount line
    /// evenly by `shared_by.len()`; it does not enforce the UI's
    /// one-unit-per-sharer convention.
    pub shared_by: Vec<ParticipantId>,
}

impl BillItem {
    /// The pre-discount line total: `price * quantity`
    pub fn line_total(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }

    /// The item-level discount resolved against the line total
    pub fn discount_amount(&self) -> f64 {
        self.discount.resolve(self.line_total())
    }

    /// The line total after the item-level discount
    pub fn line_after_discount(&self) -> f64 {
        self.line_total() - self.discount_amount()
    }
}
