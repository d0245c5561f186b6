multiversx_sc::imports!();

use crate::{cache::Cache, engine, scaling, storage, sync, utils};

use common_errors::{
    ERROR_INSUFFICIENT_BALANCE, ERROR_INSUFFICIENT_LIQUIDITY, ERROR_NO_DEBT, ERROR_ZERO_AMOUNT,
};

/// Owner-facing endpoints of the pool.
///
/// The pool is driven by its owning controller, which performs all position
/// authorization and feeds a fresh reading of the underlying token's total
/// supply into every call. Each endpoint synchronizes the rebase factor
/// against that reading and accrues interest before touching any balance.
#[multiversx_sc::module]
pub trait LiquidityModule:
    storage::Storage
    + common_events::EventsModule
    + common_math::SharedMathModule
    + common_rates::InterestRates
    + scaling::ScalingModule
    + sync::RebaseSyncModule
    + engine::BalanceEngineModule
    + utils::UtilsModule
{
    /// Deposits the attached payment for `holder`. Scaled units credited are
    /// rounded down against the current supply accumulator.
    #[only_owner]
    #[payable("*")]
    #[endpoint(supply)]
    fn supply(
        &self,
        holder: ManagedAddress,
        observed_supply: BigUint,
    ) -> MultiValue3<
        ManagedDecimal<Self::Api, NumDecimals>,
        ManagedDecimal<Self::Api, NumDecimals>,
        ManagedDecimal<Self::Api, NumDecimals>,
    > {
        let mut cache = Cache::new(self);

        let observed = cache.get_decimal_value(&observed_supply);
        self.sync_rebase_factor(&mut cache, observed);
        self.global_sync(&mut cache);

        let payment = self.get_payment_amount(&cache);
        require!(payment > cache.zero, ERROR_ZERO_AMOUNT);

        let scaled = cache.scaled_supply_for_deposit(&payment);
        let (previous_nominal, new_nominal) = self.mint_scaled(&mut cache, &holder, &scaled);

        self.emit_market_update(&cache);

        (previous_nominal, new_nominal, cache.supplied_scaled.clone()).into()
    }

    /// Withdraws for `holder`. With no amount, or an amount at or above the
    /// holder's current nominal balance, the entire position is closed and
    /// the payout is the nominal value of the burned units. Otherwise the
    /// exact amount is paid and the scaled debit is rounded up.
    #[only_owner]
    #[endpoint(withdraw)]
    fn withdraw(
        &self,
        holder: ManagedAddress,
        observed_supply: BigUint,
        amount: OptionalValue<BigUint>,
    ) -> MultiValue3<
        ManagedDecimal<Self::Api, NumDecimals>,
        ManagedDecimal<Self::Api, NumDecimals>,
        ManagedDecimal<Self::Api, NumDecimals>,
    > {
        let mut cache = Cache::new(self);

        let observed = cache.get_decimal_value(&observed_supply);
        self.sync_rebase_factor(&mut cache, observed);
        self.global_sync(&mut cache);

        let balance_scaled = self.scaled_balance_of(&holder);
        require!(balance_scaled > self.ray_zero(), ERROR_INSUFFICIENT_BALANCE);

        let current_nominal = cache.nominal_supply(&balance_scaled);

        let (scaled_to_burn, payout) = match amount {
            OptionalValue::Some(requested) => {
                let requested = cache.get_decimal_value(&requested);
                require!(requested > cache.zero, ERROR_ZERO_AMOUNT);

                if requested >= current_nominal {
                    // full exit
                    (balance_scaled, current_nominal)
                } else {
                    let scaled = cache.scaled_supply_for_withdraw(&requested);
                    (scaled, requested)
                }
            },
            OptionalValue::None => (balance_scaled, current_nominal),
        };

        require!(cache.has_reserves(&payout), ERROR_INSUFFICIENT_LIQUIDITY);

        let (previous_nominal, new_nominal) =
            self.burn_scaled(&mut cache, &holder, &scaled_to_burn);
        self.send_asset(&cache, &payout, &holder);

        self.emit_market_update(&cache);

        (previous_nominal, new_nominal, cache.supplied_scaled.clone()).into()
    }

    /// Lends `amount` to `borrower`. Debt is recorded against the borrow
    /// index only; rebases never change what a borrower owes.
    #[only_owner]
    #[endpoint(borrow)]
    fn borrow(&self, borrower: ManagedAddress, amount: BigUint, observed_supply: BigUint) {
        let mut cache = Cache::new(self);

        let observed = cache.get_decimal_value(&observed_supply);
        self.sync_rebase_factor(&mut cache, observed);
        self.global_sync(&mut cache);

        let amount = cache.get_decimal_value(&amount);
        require!(amount > cache.zero, ERROR_ZERO_AMOUNT);
        require!(cache.has_reserves(&amount), ERROR_INSUFFICIENT_LIQUIDITY);

        let scaled = cache.scaled_debt_for_borrow(&amount);
        self.add_debt(&mut cache, &borrower, &scaled);
        self.send_asset(&cache, &amount, &borrower);

        self.emit_market_update(&cache);
    }

    /// Repays `borrower`'s debt with the attached payment. Overpayment is
    /// returned to the borrower.
    #[only_owner]
    #[payable("*")]
    #[endpoint(repay)]
    fn repay(&self, borrower: ManagedAddress, observed_supply: BigUint) {
        let mut cache = Cache::new(self);

        let observed = cache.get_decimal_value(&observed_supply);
        self.sync_rebase_factor(&mut cache, observed);
        self.global_sync(&mut cache);

        let payment = self.get_payment_amount(&cache);
        require!(payment > cache.zero, ERROR_ZERO_AMOUNT);

        let debt_scaled = self.scaled_debt_of(&borrower);
        require!(debt_scaled > self.ray_zero(), ERROR_NO_DEBT);

        let current_debt = cache.nominal_debt(&debt_scaled);

        if payment >= current_debt {
            let overpaid = payment - current_debt;
            self.remove_debt(&mut cache, &borrower, &debt_scaled);
            self.send_asset(&cache, &overpaid, &borrower);
        } else {
            let scaled_relief = cache.scaled_debt_for_repay(&payment);
            self.remove_debt(&mut cache, &borrower, &scaled_relief);
        }

        self.emit_market_update(&cache);
    }

    /// Moves `amount` nominal tokens of claim from one holder to another.
    /// The amount is converted to scaled units at the current multiplier
    /// with the debit rounded up; transferring the full nominal balance
    /// moves the entire scaled position. Pool totals are untouched.
    #[only_owner]
    #[endpoint(transferScaled)]
    fn transfer_scaled(
        &self,
        from: ManagedAddress,
        to: ManagedAddress,
        amount: BigUint,
        observed_supply: BigUint,
    ) {
        let mut cache = Cache::new(self);

        let observed = cache.get_decimal_value(&observed_supply);
        self.sync_rebase_factor(&mut cache, observed);
        self.global_sync(&mut cache);

        let amount = cache.get_decimal_value(&amount);
        require!(amount > cache.zero, ERROR_ZERO_AMOUNT);

        let from_scaled = self.scaled_balance_of(&from);
        let from_nominal = cache.nominal_supply(&from_scaled);
        require!(amount <= from_nominal, ERROR_INSUFFICIENT_BALANCE);

        let scaled = if amount == from_nominal {
            from_scaled
        } else {
            cache.scaled_supply_for_withdraw(&amount)
        };

        self.move_scaled(&mut cache, &from, &to, &scaled);

        self.emit_market_update(&cache);
    }

    /// Synchronizes the rebase factor against a fresh supply reading without
    /// touching any position. Idempotent within a rebase epoch.
    #[only_owner]
    #[endpoint(syncRebase)]
    fn sync_rebase(&self, observed_supply: BigUint) -> ManagedDecimal<Self::Api, NumDecimals> {
        let mut cache = Cache::new(self);

        let observed = cache.get_decimal_value(&observed_supply);
        self.sync_rebase_factor(&mut cache, observed);
        self.global_sync(&mut cache);

        self.emit_market_update(&cache);

        cache.rebase_factor.clone()
    }

    /// Pays the treasury's accrued share of borrow interest out to the
    /// configured treasury address, bounded by available reserves.
    #[only_owner]
    #[endpoint(claimRevenue)]
    fn claim_revenue(&self, observed_supply: BigUint) {
        let mut cache = Cache::new(self);

        let observed = cache.get_decimal_value(&observed_supply);
        self.sync_rebase_factor(&mut cache, observed);
        self.global_sync(&mut cache);

        if cache.treasury_scaled == self.ray_zero() {
            self.emit_market_update(&cache);
            return;
        }

        let revenue_nominal = cache.nominal_supply(&cache.treasury_scaled);
        let reserves = cache.get_reserves();
        let payout = self.get_min(revenue_nominal, reserves);

        if payout > cache.zero {
            let scaled_to_burn = self.get_min(
                cache.scaled_supply_for_withdraw(&payout),
                cache.treasury_scaled.clone(),
            );
            cache.treasury_scaled -= &scaled_to_burn;
            cache.supplied_scaled -= &scaled_to_burn;

            let treasury = cache.params.treasury.clone();
            self.send_asset(&cache, &payout, &treasury);
        }

        self.emit_market_update(&cache);
    }
}
