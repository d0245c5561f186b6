multiversx_sc::imports!();

use common_constants::RAY_PRECISION;

/// Conversions between nominal token amounts and scaled book units.
///
/// Supply-side balances carry two accumulators: the supply index (interest)
/// and the rebase factor (elastic supply adjustments). Debt carries only the
/// borrow index. Rounding always favors the pool: crediting scaled units
/// rounds down, debiting scaled units rounds up, paying out nominal tokens
/// rounds down and quoting debt rounds up.
#[multiversx_sc::module]
pub trait ScalingModule: common_math::SharedMathModule {
    /// Effective supply accumulator, `supply_index * rebase_factor` at RAY.
    fn supply_accumulator(
        &self,
        supply_index: &ManagedDecimal<Self::Api, NumDecimals>,
        rebase_factor: &ManagedDecimal<Self::Api, NumDecimals>,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        self.mul_half_up(supply_index, rebase_factor, RAY_PRECISION)
    }

    /// Scaled units credited for a deposit of `nominal` tokens. Rounds down
    /// so a holder can never mint more claim than was paid in.
    fn scaled_supply_down(
        &self,
        nominal: &ManagedDecimal<Self::Api, NumDecimals>,
        supply_index: &ManagedDecimal<Self::Api, NumDecimals>,
        rebase_factor: &ManagedDecimal<Self::Api, NumDecimals>,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        let accumulator = self.supply_accumulator(supply_index, rebase_factor);
        self.div_floor(nominal, &accumulator, RAY_PRECISION)
    }

    /// Scaled units debited for an exact-amount withdrawal. Rounds up so the
    /// pool never releases more than the burned claim was worth.
    fn scaled_supply_up(
        &self,
        nominal: &ManagedDecimal<Self::Api, NumDecimals>,
        supply_index: &ManagedDecimal<Self::Api, NumDecimals>,
        rebase_factor: &ManagedDecimal<Self::Api, NumDecimals>,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        let accumulator = self.supply_accumulator(supply_index, rebase_factor);
        self.div_ceil(nominal, &accumulator, RAY_PRECISION)
    }

    /// Nominal value of a scaled supply balance, rounded down to asset
    /// decimals. Used for payouts and balance views.
    fn nominal_supply_down(
        &self,
        scaled: &ManagedDecimal<Self::Api, NumDecimals>,
        supply_index: &ManagedDecimal<Self::Api, NumDecimals>,
        rebase_factor: &ManagedDecimal<Self::Api, NumDecimals>,
        asset_decimals: usize,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        let accumulator = self.supply_accumulator(supply_index, rebase_factor);
        let nominal = self.mul_floor(scaled, &accumulator, RAY_PRECISION);
        self.rescale_floor(&nominal, asset_decimals)
    }

    /// Scaled debt recorded for a borrow of `nominal` tokens. Rounds up.
    fn scaled_debt_up(
        &self,
        nominal: &ManagedDecimal<Self::Api, NumDecimals>,
        borrow_index: &ManagedDecimal<Self::Api, NumDecimals>,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        self.div_ceil(nominal, borrow_index, RAY_PRECISION)
    }

    /// Scaled debt relieved by a repayment of `nominal` tokens. Rounds down.
    fn scaled_debt_down(
        &self,
        nominal: &ManagedDecimal<Self::Api, NumDecimals>,
        borrow_index: &ManagedDecimal<Self::Api, NumDecimals>,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        self.div_floor(nominal, borrow_index, RAY_PRECISION)
    }

    /// Nominal value of a scaled debt, rounded up to asset decimals. This is
    /// the amount a borrower owes.
    fn nominal_debt_up(
        &self,
        scaled: &ManagedDecimal<Self::Api, NumDecimals>,
        borrow_index: &ManagedDecimal<Self::Api, NumDecimals>,
        asset_decimals: usize,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        let nominal = self.mul_ceil(scaled, borrow_index, RAY_PRECISION);
        self.rescale_ceil(&nominal, asset_decimals)
    }
}
