multiversx_sc::imports!();
multiversx_sc::derive_imports!();

use crate::{scaling, storage};

use common_constants::RAY_PRECISION;
use common_errors::{ERROR_DEGENERATE_SUPPLY, ERROR_SUPPLY_NOT_OBSERVED};

/// Read-only endpoints over the pool state.
///
/// Balances are reported against the indexes and rebase factor as stored,
/// without accruing the interest of the current period.
#[multiversx_sc::module]
pub trait ViewModule:
    storage::Storage
    + common_math::SharedMathModule
    + common_rates::InterestRates
    + scaling::ScalingModule
{
    /// Nominal token balance a holder could withdraw right now.
    #[view(getNominalBalance)]
    fn get_nominal_balance(&self, holder: ManagedAddress) -> ManagedDecimal<Self::Api, NumDecimals> {
        let mapper = self.scaled_balance(&holder);
        let params = self.params().get();
        if mapper.is_empty() {
            return self.to_decimal(BigUint::zero(), params.asset_decimals);
        }

        self.nominal_supply_down(
            &mapper.get(),
            &self.supply_index().get(),
            &self.rebase_factor().get(),
            params.asset_decimals,
        )
    }

    /// Nominal amount a borrower currently owes.
    #[view(getNominalDebt)]
    fn get_nominal_debt(&self, borrower: ManagedAddress) -> ManagedDecimal<Self::Api, NumDecimals> {
        let mapper = self.scaled_debt(&borrower);
        let params = self.params().get();
        if mapper.is_empty() {
            return self.to_decimal(BigUint::zero(), params.asset_decimals);
        }

        self.nominal_debt_up(
            &mapper.get(),
            &self.borrow_index().get(),
            params.asset_decimals,
        )
    }

    /// Nominal value of the entire supply side.
    #[view(getTotalSupplied)]
    fn get_total_supplied(&self) -> ManagedDecimal<Self::Api, NumDecimals> {
        let params = self.params().get();
        self.nominal_supply_down(
            &self.supplied_scaled().get(),
            &self.supply_index().get(),
            &self.rebase_factor().get(),
            params.asset_decimals,
        )
    }

    /// Nominal value of the entire debt side.
    #[view(getTotalBorrowed)]
    fn get_total_borrowed(&self) -> ManagedDecimal<Self::Api, NumDecimals> {
        let params = self.params().get();
        self.nominal_debt_up(
            &self.borrowed_scaled().get(),
            &self.borrow_index().get(),
            params.asset_decimals,
        )
    }

    /// Ratio of borrowed to supplied nominal value, RAY.
    #[view(getCapitalUtilisation)]
    fn get_capital_utilisation(&self) -> ManagedDecimal<Self::Api, NumDecimals> {
        let supplied = self.get_total_supplied();
        let params = self.params().get();
        let zero = self.to_decimal(BigUint::zero(), params.asset_decimals);

        if supplied == zero {
            self.ray_zero()
        } else {
            let borrowed = self.get_total_borrowed();
            self.div_half_up(&borrowed, &supplied, RAY_PRECISION)
        }
    }

    /// Current per-second borrow rate, RAY.
    #[view(getBorrowRate)]
    fn get_borrow_rate(&self) -> ManagedDecimal<Self::Api, NumDecimals> {
        let params = self.params().get();
        let utilization = self.get_capital_utilisation();
        self.calc_borrow_rate(utilization, &params)
    }

    /// Current per-second deposit rate, RAY.
    #[view(getDepositRate)]
    fn get_deposit_rate(&self) -> ManagedDecimal<Self::Api, NumDecimals> {
        let params = self.params().get();
        let utilization = self.get_capital_utilisation();
        let borrow_rate = self.calc_borrow_rate(utilization.clone(), &params);
        self.calc_deposit_rate(utilization, borrow_rate, params.reserve_factor)
    }

    /// Liquid asset balance held by the pool contract.
    #[view(getReserves)]
    fn get_reserves(&self) -> ManagedDecimal<Self::Api, NumDecimals> {
        let params = self.params().get();
        let asset = self.pool_asset().get();
        let balance = self
            .blockchain()
            .get_sc_balance(&asset, 0);
        self.to_decimal(balance, params.asset_decimals)
    }

    /// Seconds elapsed since the last interest accrual.
    #[view(getDeltaTime)]
    fn get_delta_time(&self) -> u64 {
        self.blockchain().get_block_timestamp() - self.last_timestamp().get()
    }

    /// What a holder's nominal balance would be if the underlying total
    /// supply read `hypothetical_supply`, without mutating any state.
    #[view(getNominalBalanceAtSupply)]
    fn get_nominal_balance_at_supply(
        &self,
        holder: ManagedAddress,
        hypothetical_supply: BigUint,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        let params = self.params().get();
        let last_seen = self.last_seen_supply().get();
        let zero = self.to_decimal(BigUint::zero(), params.asset_decimals);

        require!(last_seen != zero, ERROR_SUPPLY_NOT_OBSERVED);

        let hypothetical = self.to_decimal(hypothetical_supply, params.asset_decimals);
        require!(hypothetical > zero, ERROR_DEGENERATE_SUPPLY);

        let mapper = self.scaled_balance(&holder);
        if mapper.is_empty() {
            return zero;
        }

        let delta = self.div_half_up(&hypothetical, &last_seen, RAY_PRECISION);
        let projected_factor =
            self.mul_half_up(&self.rebase_factor().get(), &delta, RAY_PRECISION);

        self.nominal_supply_down(
            &mapper.get(),
            &self.supply_index().get(),
            &projected_factor,
            params.asset_decimals,
        )
    }
}
