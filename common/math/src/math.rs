#![no_std]

use core::cmp::Ordering;

use common_constants::{BPS, BPS_PRECISION, RAY, RAY_PRECISION, WAD, WAD_PRECISION};

multiversx_sc::imports!();

/// Shared fixed-point helpers for `ManagedDecimal` values.
///
/// Indexes and the rebase adjustment factor live at RAY precision
/// (27 fractional digits); nominal token amounts live at the asset's own
/// decimals. Every conversion between the two goes through this module, with
/// an explicit rounding direction:
///
/// - `*_half_up` for rate math where no party is favored,
/// - `*_floor` / `*_ceil` where the direction is part of the accounting
///   policy (amounts owed to the holder round down, amounts owed to the
///   pool round up).
///
/// Multiplications and divisions are carried out on raw `BigUint` values at
/// the target precision, so intermediates never truncate.
#[multiversx_sc::module]
pub trait SharedMathModule {
    fn mul_half_up(
        &self,
        a: &ManagedDecimal<Self::Api, NumDecimals>,
        b: &ManagedDecimal<Self::Api, NumDecimals>,
        precision: NumDecimals,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        let scaled_a = a.rescale(precision);
        let scaled_b = b.rescale(precision);

        let product = scaled_a.into_raw_units() * scaled_b.into_raw_units();

        let scale = BigUint::from(10u64).pow(precision as u32);
        let half_scale = &scale / 2u64;

        self.to_decimal((product + half_scale) / scale, precision)
    }

    fn div_half_up(
        &self,
        a: &ManagedDecimal<Self::Api, NumDecimals>,
        b: &ManagedDecimal<Self::Api, NumDecimals>,
        precision: NumDecimals,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        let scaled_a = a.rescale(precision);
        let scaled_b = b.rescale(precision);

        let scale = BigUint::from(10u64).pow(precision as u32);
        let numerator = scaled_a.into_raw_units() * &scale;
        let denominator = scaled_b.into_raw_units();

        let half_denominator = denominator / 2u64;

        self.to_decimal((numerator + half_denominator) / denominator, precision)
    }

    /// Multiply rounding toward zero.
    fn mul_floor(
        &self,
        a: &ManagedDecimal<Self::Api, NumDecimals>,
        b: &ManagedDecimal<Self::Api, NumDecimals>,
        precision: NumDecimals,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        let scaled_a = a.rescale(precision);
        let scaled_b = b.rescale(precision);

        let product = scaled_a.into_raw_units() * scaled_b.into_raw_units();
        let scale = BigUint::from(10u64).pow(precision as u32);

        self.to_decimal(product / scale, precision)
    }

    /// Multiply rounding away from zero.
    fn mul_ceil(
        &self,
        a: &ManagedDecimal<Self::Api, NumDecimals>,
        b: &ManagedDecimal<Self::Api, NumDecimals>,
        precision: NumDecimals,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        let scaled_a = a.rescale(precision);
        let scaled_b = b.rescale(precision);

        let product = scaled_a.into_raw_units() * scaled_b.into_raw_units();
        let scale = BigUint::from(10u64).pow(precision as u32);
        let remainder_bump = &scale - 1u64;

        self.to_decimal((product + remainder_bump) / scale, precision)
    }

    /// Divide rounding toward zero.
    fn div_floor(
        &self,
        a: &ManagedDecimal<Self::Api, NumDecimals>,
        b: &ManagedDecimal<Self::Api, NumDecimals>,
        precision: NumDecimals,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        let scaled_a = a.rescale(precision);
        let scaled_b = b.rescale(precision);

        let scale = BigUint::from(10u64).pow(precision as u32);
        let numerator = scaled_a.into_raw_units() * &scale;
        let denominator = scaled_b.into_raw_units();

        self.to_decimal(numerator / denominator, precision)
    }

    /// Divide rounding away from zero.
    fn div_ceil(
        &self,
        a: &ManagedDecimal<Self::Api, NumDecimals>,
        b: &ManagedDecimal<Self::Api, NumDecimals>,
        precision: NumDecimals,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        let scaled_a = a.rescale(precision);
        let scaled_b = b.rescale(precision);

        let scale = BigUint::from(10u64).pow(precision as u32);
        let numerator = scaled_a.into_raw_units() * &scale;
        let denominator = scaled_b.into_raw_units();
        let remainder_bump = denominator - 1u64;

        self.to_decimal((numerator + remainder_bump) / denominator, precision)
    }

    fn rescale_half_up(
        &self,
        value: &ManagedDecimal<Self::Api, NumDecimals>,
        new_precision: NumDecimals,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        let old_precision = value.scale();
        let raw_value = value.into_raw_units();

        match new_precision.cmp(&old_precision) {
            Ordering::Equal => value.clone(),
            Ordering::Less => {
                let factor = BigUint::from(10u64).pow((old_precision - new_precision) as u32);
                let half_factor = &factor / 2u64;

                self.to_decimal((raw_value + &half_factor) / factor, new_precision)
            },
            Ordering::Greater => value.rescale(new_precision),
        }
    }

    fn rescale_floor(
        &self,
        value: &ManagedDecimal<Self::Api, NumDecimals>,
        new_precision: NumDecimals,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        let old_precision = value.scale();
        let raw_value = value.into_raw_units();

        match new_precision.cmp(&old_precision) {
            Ordering::Equal => value.clone(),
            Ordering::Less => {
                let factor = BigUint::from(10u64).pow((old_precision - new_precision) as u32);

                self.to_decimal(raw_value / &factor, new_precision)
            },
            Ordering::Greater => value.rescale(new_precision),
        }
    }

    fn rescale_ceil(
        &self,
        value: &ManagedDecimal<Self::Api, NumDecimals>,
        new_precision: NumDecimals,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        let old_precision = value.scale();
        let raw_value = value.into_raw_units();

        match new_precision.cmp(&old_precision) {
            Ordering::Equal => value.clone(),
            Ordering::Less => {
                let factor = BigUint::from(10u64).pow((old_precision - new_precision) as u32);
                let bump = &factor - 1u64;

                self.to_decimal((raw_value + &bump) / factor, new_precision)
            },
            Ordering::Greater => value.rescale(new_precision),
        }
    }

    fn to_decimal(
        &self,
        value: BigUint,
        precision: NumDecimals,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        ManagedDecimal::from_raw_units(value, precision)
    }

    fn to_decimal_ray(&self, value: BigUint) -> ManagedDecimal<Self::Api, NumDecimals> {
        self.to_decimal(value, RAY_PRECISION)
    }

    fn to_decimal_bps(&self, value: BigUint) -> ManagedDecimal<Self::Api, NumDecimals> {
        self.to_decimal(value, BPS_PRECISION)
    }

    fn to_decimal_wad(&self, value: BigUint) -> ManagedDecimal<Self::Api, NumDecimals> {
        self.to_decimal(value, WAD_PRECISION)
    }

    fn ray(&self) -> ManagedDecimal<Self::Api, NumDecimals> {
        self.to_decimal(BigUint::from(RAY), RAY_PRECISION)
    }

    fn ray_zero(&self) -> ManagedDecimal<Self::Api, NumDecimals> {
        self.to_decimal(BigUint::zero(), RAY_PRECISION)
    }

    fn wad(&self) -> ManagedDecimal<Self::Api, NumDecimals> {
        self.to_decimal(BigUint::from(WAD), WAD_PRECISION)
    }

    fn bps(&self) -> ManagedDecimal<Self::Api, NumDecimals> {
        self.to_decimal(BigUint::from(BPS as u64), BPS_PRECISION)
    }

    fn get_min(
        &self,
        a: ManagedDecimal<Self::Api, NumDecimals>,
        b: ManagedDecimal<Self::Api, NumDecimals>,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        if a < b {
            a
        } else {
            b
        }
    }
}
