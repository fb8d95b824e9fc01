//! # Order Total Calculation
//!
//! The derived `total_cents` of an order as a pure function of its
//! *currently resolved* line items.
//!
//! ## Live Prices, Explicit Recomputation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    When Totals Are Computed                             │
//! │                                                                         │
//! │  create order          ──► resolve prices ──► order_total ──► persist  │
//! │  update order (lines)  ──► resolve prices ──► order_total ──► persist  │
//! │  update order (status) ──► total untouched                             │
//! │                                                                         │
//! │  Prices are looked up at computation time. A later price change on a   │
//! │  shop item affects future recomputations, never stored totals.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The caller resolves each line's shop item to its current price *before*
//! calling in here; an unresolvable reference aborts the whole operation
//! upstream. This function never sees a partial order, so a partial total
//! can never be persisted.

use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Priced Line
// =============================================================================

/// An order line after price resolution: the shop item's current unit
/// price paired with the requested quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricedLine {
    /// Live unit price of the referenced shop item.
    pub unit_price: Money,

    /// Quantity ordered. Validated (>= 1) before reaching here.
    pub quantity: i64,
}

impl PricedLine {
    /// The line's contribution to the order total.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Order Total
// =============================================================================

/// Computes an order's total: `Σ unit_price × quantity` over its lines.
///
/// Addition is commutative, so line order does not affect the result;
/// lines are summed in the given (ascending array) order anyway for
/// reproducibility.
///
/// ## Example
/// ```rust
/// use merx_core::money::Money;
/// use merx_core::totals::{order_total, PricedLine};
///
/// let lines = [
///     PricedLine { unit_price: Money::from_cents(1000), quantity: 2 },
///     PricedLine { unit_price: Money::from_cents(550), quantity: 1 },
/// ];
/// assert_eq!(order_total(&lines).cents(), 2550);
///
/// // Zero lines => zero total
/// assert!(order_total(&[]).is_zero());
/// ```
pub fn order_total(lines: &[PricedLine]) -> Money {
    lines
        .iter()
        .fold(Money::zero(), |total, line| total + line.line_total())
}

// =============================================================================
// Unit Tests
// =============================================================================
