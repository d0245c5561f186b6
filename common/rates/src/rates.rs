#![no_std]

use common_constants::{RAY_PRECISION, SECONDS_PER_YEAR};
use common_structs::ReserveParams;

multiversx_sc::imports!();

/// Interest-rate collaborator of the balance engine.
///
/// Produces the per-second borrow rate from pool utilization through a
/// piecewise-linear model, the suppliers' deposit rate, and the compounded
/// interest factor used to advance the borrow index. The engine consumes
/// these values; it never derives them itself.
#[multiversx_sc::module]
pub trait InterestRates: common_math::SharedMathModule {
    /// Annual borrow rate for the given utilization, converted to a
    /// per-second RAY rate.
    ///
    /// Regions:
    /// - below `mid_utilization`: `base + u * slope1 / mid`
    /// - between mid and optimal: `base + slope1 + (u - mid) * slope2 / (optimal - mid)`
    /// - above optimal: `base + slope1 + slope2 + (u - optimal) * slope3 / (1 - optimal)`
    ///
    /// The annual rate is capped at `max_borrow_rate`.
    fn calc_borrow_rate(
        &self,
        utilization: ManagedDecimal<Self::Api, NumDecimals>,
        params: &ReserveParams<Self::Api>,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        let annual_rate = if utilization < params.mid_utilization {
            let ratio = self.div_half_up(&utilization, &params.mid_utilization, RAY_PRECISION);
            let contribution = self.mul_half_up(&ratio, &params.slope1, RAY_PRECISION);
            params.base_borrow_rate.clone() + contribution
        } else if utilization < params.optimal_utilization {
            let excess = utilization - params.mid_utilization.clone();
            let span = params.optimal_utilization.clone() - params.mid_utilization.clone();
            let ratio = self.div_half_up(&excess, &span, RAY_PRECISION);
            let contribution = self.mul_half_up(&ratio, &params.slope2, RAY_PRECISION);
            params.base_borrow_rate.clone() + params.slope1.clone() + contribution
        } else {
            let excess = utilization - params.optimal_utilization.clone();
            let span = self.ray() - params.optimal_utilization.clone();
            let ratio = self.div_half_up(&excess, &span, RAY_PRECISION);
            let contribution = self.mul_half_up(&ratio, &params.slope3, RAY_PRECISION);
            params.base_borrow_rate.clone()
                + params.slope1.clone()
                + params.slope2.clone()
                + contribution
        };

        let capped_rate = self.get_min(annual_rate, params.max_borrow_rate.clone());

        self.div_half_up(
            &capped_rate,
            &self.to_decimal(BigUint::from(SECONDS_PER_YEAR), 0),
            RAY_PRECISION,
        )
    }

    /// Deposit rate: `utilization * borrow_rate * (1 - reserve_factor)`.
    fn calc_deposit_rate(
        &self,
        utilization: ManagedDecimal<Self::Api, NumDecimals>,
        borrow_rate: ManagedDecimal<Self::Api, NumDecimals>,
        reserve_factor: ManagedDecimal<Self::Api, NumDecimals>,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        if utilization == self.ray_zero() {
            return self.ray_zero();
        }

        let gross = self.mul_half_up(&utilization, &borrow_rate, RAY_PRECISION);
        let supplier_share = self.bps() - reserve_factor;

        self.mul_half_up(&gross, &supplier_share, RAY_PRECISION)
    }

    /// Interest growth factor `e^(rate * time_passed)`, approximated by a
    /// fifth-order Taylor expansion. Accurate for the exponents this pool
    /// sees (rate * time well below 1 for any sane sync cadence; within
    /// tolerance even for multi-year gaps at moderate rates).
    fn calculate_compounded_interest(
        &self,
        rate: ManagedDecimal<Self::Api, NumDecimals>,
        time_passed: u64,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        if time_passed == 0 {
            return self.ray();
        }

        let x = self.mul_half_up(
            &rate,
            &self.to_decimal(BigUint::from(time_passed), 0),
            RAY_PRECISION,
        );

        let x2 = self.mul_half_up(&x, &x, RAY_PRECISION);
        let x3 = self.mul_half_up(&x2, &x, RAY_PRECISION);
        let x4 = self.mul_half_up(&x3, &x, RAY_PRECISION);
        let x5 = self.mul_half_up(&x4, &x, RAY_PRECISION);

        let two = self.to_decimal(BigUint::from(2u64), 0);
        let six = self.to_decimal(BigUint::from(6u64), 0);
        let twenty_four = self.to_decimal(BigUint::from(24u64), 0);
        let one_twenty = self.to_decimal(BigUint::from(120u64), 0);

        self.ray()
            + x
            + self.div_half_up(&x2, &two, RAY_PRECISION)
            + self.div_half_up(&x3, &six, RAY_PRECISION)
            + self.div_half_up(&x4, &twenty_four, RAY_PRECISION)
            + self.div_half_up(&x5, &one_twenty, RAY_PRECISION)
    }

    /// Advances the borrow index by the compounded interest factor. Returns
    /// the new index together with the old one, which the caller still needs
    /// to measure the accrued interest of the period.
    fn update_borrow_index(
        &self,
        old_borrow_index: ManagedDecimal<Self::Api, NumDecimals>,
        interest_factor: &ManagedDecimal<Self::Api, NumDecimals>,
    ) -> (
        ManagedDecimal<Self::Api, NumDecimals>,
        ManagedDecimal<Self::Api, NumDecimals>,
    ) {
        let new_borrow_index = self.mul_half_up(&old_borrow_index, interest_factor, RAY_PRECISION);

        (new_borrow_index, old_borrow_index)
    }

    /// Splits the interest accrued over a period between suppliers and the
    /// protocol treasury according to the reserve factor.
    fn split_accrued_interest(
        &self,
        reserve_factor: &ManagedDecimal<Self::Api, NumDecimals>,
        borrowed_scaled: &ManagedDecimal<Self::Api, NumDecimals>,
        new_borrow_index: &ManagedDecimal<Self::Api, NumDecimals>,
        old_borrow_index: &ManagedDecimal<Self::Api, NumDecimals>,
    ) -> (
        ManagedDecimal<Self::Api, NumDecimals>, // supplier_rewards_ray
        ManagedDecimal<Self::Api, NumDecimals>, // protocol_fee_ray
    ) {
        let old_total_debt = self.mul_half_up(borrowed_scaled, old_borrow_index, RAY_PRECISION);
        let new_total_debt = self.mul_half_up(borrowed_scaled, new_borrow_index, RAY_PRECISION);

        let accrued_interest_ray = new_total_debt - old_total_debt;

        let protocol_fee_ray =
            self.mul_half_up(&accrued_interest_ray, reserve_factor, RAY_PRECISION);
        let supplier_rewards_ray = accrued_interest_ray - protocol_fee_ray.clone();

        (supplier_rewards_ray, protocol_fee_ray)
    }

    /// Grows the supply index so the nominal value of the supply side
    /// increases by exactly `rewards_increase`. No-op on an empty book.
    fn update_supply_index(
        &self,
        total_supplied: ManagedDecimal<Self::Api, NumDecimals>,
        old_supply_index: ManagedDecimal<Self::Api, NumDecimals>,
        rewards_increase: ManagedDecimal<Self::Api, NumDecimals>,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        if total_supplied == self.to_decimal(BigUint::zero(), total_supplied.scale()) {
            return old_supply_index;
        }

        let rewards_ratio = self.div_half_up(&rewards_increase, &total_supplied, RAY_PRECISION);
        let rewards_factor = self.ray() + rewards_ratio;

        self.mul_half_up(&old_supply_index, &rewards_factor, RAY_PRECISION)
    }
}
