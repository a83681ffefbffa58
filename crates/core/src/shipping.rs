//! Shipping cost policy.
//!
//! Shipping is a pure function of the cart subtotal: orders at or above
//! [`FREE_SHIPPING_THRESHOLD`] ship free, everything else pays the flat
//! [`SHIPPING_COST`]. An empty cart has nothing to ship.

use rust_decimal::Decimal;

/// Flat shipping fee, in store currency units.
pub const SHIPPING_COST: Decimal = Decimal::from_parts(300, 0, 0, false, 0);

/// Subtotal from which shipping is free.
pub const FREE_SHIPPING_THRESHOLD: Decimal = Decimal::from_parts(2000, 0, 0, false, 0);

/// Shipping cost for a given subtotal.
#[must_use]
pub fn shipping_cost(subtotal: Decimal) -> Decimal {
    if subtotal <= Decimal::ZERO || subtotal >= FREE_SHIPPING_THRESHOLD {
        Decimal::ZERO
    } else {
        SHIPPING_COST
    }
}

/// How much more the shopper has to add to qualify for free shipping.
///
/// Zero once the threshold is reached.
#[must_use]
pub fn remaining_for_free_shipping(subtotal: Decimal) -> Decimal {
    (FREE_SHIPPING_THRESHOLD - subtotal).max(Decimal::ZERO)
}
