use super::*;

const EPS: f64 = 1e-9;

#[test]
fn round2_rounds_half_up_at_two_decimals() {
    assert!((round2(59.985) - 59.99).abs() < EPS);
    assert!((round2(40.0) - 40.0).abs() < EPS);
    assert!((round2(41.994) - 41.99).abs() < EPS);
}

#[test]
fn reconstruct_base_identity_when_fraction_is_zero() {
    assert!((reconstruct_base(39.99, 0.0) - 39.99).abs() < EPS);
}

#[test]
fn reconstruct_base_divides_out_active_fraction() {
    // 41.99 / 0.7 = 59.9857…, which displays as 59.99.
    assert!((round2(reconstruct_base(41.99, 0.3)) - 59.99).abs() < EPS);
    assert!((reconstruct_base(40.0, 0.2) - 50.0).abs() < EPS);
}

#[test]
fn reconstruct_base_guards_fraction_of_one_or_more() {
    assert!((reconstruct_base(10.0, 1.0) - 10.0).abs() < EPS);
    assert!((reconstruct_base(10.0, 1.5) - 10.0).abs() < EPS);
}

#[test]
fn reconstruct_base_holds_within_rounding_across_tiers() {
    for fraction in SALE_TIERS {
        for base in [0.99, 19.99, 50.0, 59.99, 129.5] {
            let current = sale_price(base, fraction);
            let rebuilt = round2(reconstruct_base(current, fraction));
            assert!(
                (rebuilt - base).abs() <= 0.01,
                "base {base} at fraction {fraction}: rebuilt {rebuilt}"
            );
        }
    }
}

#[test]
fn sale_price_rounds_at_the_mutation_point() {
    assert!((sale_price(50.0, 0.2) - 40.0).abs() < EPS);
    assert!((sale_price(59.99, 0.3) - 41.99).abs() < EPS);
    assert!((sale_price(59.99, 0.5) - 30.0).abs() < EPS);
}

#[test]
fn sale_price_with_zero_fraction_restores_the_base() {
    // Toggling a tier on and immediately off must land exactly on the
    // stored base, with no drift after one round trip.
    let base = 50.0;
    let discounted = sale_price(base, 0.2);
    assert!((discounted - 40.0).abs() < EPS);
    assert!((sale_price(base, 0.0) - base).abs() < EPS);
}

#[test]
fn seed_base_rounds_only_when_a_sale_is_active() {
    // Active sale: reconstruct and round.
    assert!((seed_base(41.99, 0.3) - 59.99).abs() < EPS);
    // No sale: the server price is taken as-is, unrounded.
    assert!((seed_base(39.994_99, 0.0) - 39.994_99).abs() < EPS);
}

#[test]
fn is_active_sale_boundaries() {
    assert!(!is_active_sale(0.0));
    assert!(is_active_sale(0.2));
    assert!(is_active_sale(0.999));
    assert!(!is_active_sale(1.0));
    assert!(!is_active_sale(-0.1));
}
