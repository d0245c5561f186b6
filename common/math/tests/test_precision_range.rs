// Behavior across precisions and at the extremes of the value range the
// pool sees: 9-decimal asset amounts against 27-decimal accumulators, and
// supplies in the hundreds of trillions.
// Run with: cargo test --test test_precision_range

use multiversx_sc::types::BigUint;
use multiversx_sc_scenario::api::StaticApi;

use common_constants::RAY;
use common_math::SharedMathModule;

pub struct MathTester;

impl multiversx_sc::contract_base::ContractBase for MathTester {
    type Api = StaticApi;
}

impl SharedMathModule for MathTester {}

fn units(tokens: u64) -> BigUint<StaticApi> {
    // 9-decimal asset
    BigUint::from(tokens) * BigUint::from(10u64).pow(9)
}

#[test]
fn test_mixed_precision_multiply() {
    let tester = MathTester;

    // 1000 tokens at 9 decimals times a 1.1 RAY factor
    let amount = tester.to_decimal(units(1_000), 9);
    let factor = tester.to_decimal_ray(BigUint::from(RAY) * 11u64 / 10u64);

    let result = tester.mul_half_up(&amount, &factor, 27);
    let nominal = tester.rescale_floor(&result, 9);

    assert_eq!(nominal.into_raw_units(), &units(1_100));
}

#[test]
fn test_identity_factor_is_lossless() {
    let tester = MathTester;

    let amount = tester.to_decimal(units(987_654_321), 9);
    let one = tester.ray();

    let scaled = tester.div_floor(&amount, &one, 27);
    let back = tester.mul_floor(&scaled, &one, 27);
    let nominal = tester.rescale_floor(&back, 9);

    assert_eq!(nominal.into_raw_units(), amount.into_raw_units());
}

#[test]
fn test_very_large_supply_survives_round_trip() {
    let tester = MathTester;

    // 500 trillion tokens, the underlying's order of magnitude after a long
    // run of expansions
    let amount = tester.to_decimal(units(500_000_000_000_000), 9);
    let factor = tester.to_decimal_ray(BigUint::from(RAY) * 3u64 / 2u64);

    let scaled = tester.div_floor(&amount, &factor, 27);
    let nominal = tester.rescale_floor(&tester.mul_floor(&scaled, &factor, 27), 9);

    // floor twice loses at most one raw unit
    let diff = amount.into_raw_units() - nominal.into_raw_units();
    assert!(diff <= BigUint::from(1u64));
}

#[test]
fn test_one_raw_unit_against_large_factor() {
    let tester = MathTester;

    // the smallest representable deposit against a 2.0 accumulator
    let amount = tester.to_decimal(BigUint::from(1u64), 9);
    let factor = tester.to_decimal_ray(BigUint::from(RAY) * 2u64);

    let scaled = tester.div_floor(&amount, &factor, 27);
    let nominal = tester.rescale_floor(&tester.mul_floor(&scaled, &factor, 27), 9);

    // credit floors to less than the deposit, never more
    assert!(nominal.into_raw_units() <= amount.into_raw_units());
}

#[test]
fn test_ray_precision_product_has_no_drift() {
    let tester = MathTester;

    // indexes stay near 1.0, their product must keep all 27 digits
    let a = tester.to_decimal_ray(BigUint::from(1_000_000_000_000_000_000_000_000_123u128));
    let b = tester.to_decimal_ray(BigUint::from(RAY));

    let product = tester.mul_half_up(&a, &b, 27);
    assert_eq!(product.into_raw_units(), a.into_raw_units());
}

#[test]
fn test_rescale_chain_precision() {
    let tester = MathTester;

    // 9 -> 27 -> 9 is exact for any value
    let amount = tester.to_decimal(units(123_456_789), 9);
    let up = tester.rescale_floor(&amount, 27);
    let down = tester.rescale_floor(&up, 9);

    assert_eq!(down.into_raw_units(), amount.into_raw_units());
    assert_eq!(up.scale(), 27);
}
