//! Sale-price arithmetic, consolidated in one place.
//!
//! The storefront persists the *current* (possibly discounted) price plus a
//! sale fraction, so the full base price has to be reconstructed wherever it
//! is shown. Every view and every mutation goes through these functions —
//! there is exactly one copy of the formula.

/// Discount tiers the admin surface offers, as fractions of the base price.
pub const SALE_TIERS: [f64; 3] = [0.2, 0.3, 0.5];

/// Rounds to two decimal places, the precision prices are persisted at.
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Returns `true` for a fraction that denotes a real, displayable sale.
///
/// Exactly 0 means no discount; >= 1 would invert or divide-by-zero the
/// base reconstruction and is treated as "no sale" everywhere.
#[must_use]
pub fn is_active_sale(fraction: f64) -> bool {
    fraction > 0.0 && fraction < 1.0
}

/// Reconstructs the full base price from a current price and sale fraction:
/// `current / (1 - fraction)` when a sale is active, else `current`.
#[must_use]
pub fn reconstruct_base(current: f64, fraction: f64) -> f64 {
    if is_active_sale(fraction) {
        current / (1.0 - fraction)
    } else {
        current
    }
}

/// Current price for a base price with `fraction` discounted off, rounded
/// to two decimals at the point of mutation.
#[must_use]
pub fn sale_price(base: f64, fraction: f64) -> f64 {
    round2(base * (1.0 - fraction))
}

/// Value to store in the base-price cache the first time a product is seen:
/// the reconstructed base rounded to two decimals under an active sale,
/// otherwise the server price untouched.
#[must_use]
pub fn seed_base(price: f64, fraction: f64) -> f64 {
    if is_active_sale(fraction) {
        round2(reconstruct_base(price, fraction))
    } else {
        price
    }
}

#[cfg(test)]
#[path = "pricing_test.rs"]
mod tests;
