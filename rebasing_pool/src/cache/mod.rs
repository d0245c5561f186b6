use common_constants::RAY_PRECISION;
use common_structs::ReserveParams;

multiversx_sc::imports!();
multiversx_sc::derive_imports!();

/// In-memory snapshot of the pool state, read once per endpoint call and
/// written back to storage when dropped.
///
/// Scaled totals, indexes and the rebase factor are RAY precision. The last
/// seen underlying supply uses asset decimals.
pub struct Cache<'a, C>
where
    C: crate::storage::Storage,
{
    sc_ref: &'a C,
    /// Total scaled supply across all holders.
    pub supplied_scaled: ManagedDecimal<C::Api, NumDecimals>,
    /// Total scaled debt across all borrowers.
    pub borrowed_scaled: ManagedDecimal<C::Api, NumDecimals>,
    /// Scaled supply units held by the treasury from the reserve factor cut.
    pub treasury_scaled: ManagedDecimal<C::Api, NumDecimals>,
    /// Deposit interest accumulator.
    pub supply_index: ManagedDecimal<C::Api, NumDecimals>,
    /// Debt interest accumulator.
    pub borrow_index: ManagedDecimal<C::Api, NumDecimals>,
    /// Cumulative rebase factor.
    pub rebase_factor: ManagedDecimal<C::Api, NumDecimals>,
    /// Underlying total supply at the last synchronized rebase, asset decimals.
    pub last_seen_supply: ManagedDecimal<C::Api, NumDecimals>,
    /// Current block timestamp, seconds.
    pub timestamp: u64,
    /// Timestamp of the last index accrual.
    pub last_timestamp: u64,
    /// Reserve configuration.
    pub params: ReserveParams<C::Api>,
    /// Zero at asset decimals, for comparisons.
    pub zero: ManagedDecimal<C::Api, NumDecimals>,
}

impl<'a, C> Cache<'a, C>
where
    C: crate::storage::Storage + common_math::SharedMathModule,
{
    pub fn new(sc_ref: &'a C) -> Self {
        let params = sc_ref.params().get();
        Cache {
            zero: sc_ref.to_decimal(BigUint::zero(), params.asset_decimals),
            supplied_scaled: sc_ref.supplied_scaled().get(),
            borrowed_scaled: sc_ref.borrowed_scaled().get(),
            treasury_scaled: sc_ref.treasury_scaled().get(),
            supply_index: sc_ref.supply_index().get(),
            borrow_index: sc_ref.borrow_index().get(),
            rebase_factor: sc_ref.rebase_factor().get(),
            last_seen_supply: sc_ref.last_seen_supply().get(),
            timestamp: sc_ref.blockchain().get_block_timestamp(),
            last_timestamp: sc_ref.last_timestamp().get(),
            params,
            sc_ref,
        }
    }
}

impl<C> Drop for Cache<'_, C>
where
    C: crate::storage::Storage,
{
    fn drop(&mut self) {
        // commit the mutable fields back to storage
        self.sc_ref.supplied_scaled().set(&self.supplied_scaled);
        self.sc_ref.borrowed_scaled().set(&self.borrowed_scaled);
        self.sc_ref.treasury_scaled().set(&self.treasury_scaled);
        self.sc_ref.supply_index().set(&self.supply_index);
        self.sc_ref.borrow_index().set(&self.borrow_index);
        self.sc_ref.rebase_factor().set(&self.rebase_factor);
        self.sc_ref.last_seen_supply().set(&self.last_seen_supply);
        self.sc_ref.last_timestamp().set(self.last_timestamp);
    }
}

impl<C> Cache<'_, C>
where
    C: crate::storage::Storage + common_math::SharedMathModule + crate::scaling::ScalingModule,
{
    pub fn get_decimal_value(
        &self,
        value: &BigUint<C::Api>,
    ) -> ManagedDecimal<C::Api, NumDecimals> {
        self.sc_ref
            .to_decimal(value.clone(), self.params.asset_decimals)
    }

    /// Nominal value of the entire supply side of the book.
    pub fn total_supplied(&self) -> ManagedDecimal<C::Api, NumDecimals> {
        self.nominal_supply(&self.supplied_scaled)
    }

    /// Nominal value of the entire debt side of the book.
    pub fn total_borrowed(&self) -> ManagedDecimal<C::Api, NumDecimals> {
        self.nominal_debt(&self.borrowed_scaled)
    }

    /// Utilization ratio `borrowed / supplied` at RAY, zero on an empty book.
    pub fn get_utilization(&self) -> ManagedDecimal<C::Api, NumDecimals> {
        if self.supplied_scaled == self.sc_ref.ray_zero() {
            self.sc_ref.ray_zero()
        } else {
            let total_borrowed = self.total_borrowed();
            let total_supplied = self.total_supplied();
            self.sc_ref
                .div_half_up(&total_borrowed, &total_supplied, RAY_PRECISION)
        }
    }

    /// Tokens physically held by the pool, asset decimals. Rebases move this
    /// balance on the token side, so it is always read live.
    pub fn get_reserves(&self) -> ManagedDecimal<C::Api, NumDecimals> {
        let current_pool_balance = self
            .sc_ref
            .blockchain()
            .get_sc_balance(&self.params.asset_id, 0);
        self.get_decimal_value(&current_pool_balance)
    }

    pub fn has_reserves(&self, amount: &ManagedDecimal<C::Api, NumDecimals>) -> bool {
        self.get_reserves() >= *amount
    }

    pub fn is_same_asset(&self, asset: &EgldOrEsdtTokenIdentifier<C::Api>) -> bool {
        self.params.asset_id == *asset
    }

    pub fn scaled_supply_for_deposit(
        &self,
        nominal: &ManagedDecimal<C::Api, NumDecimals>,
    ) -> ManagedDecimal<C::Api, NumDecimals> {
        self.sc_ref
            .scaled_supply_down(nominal, &self.supply_index, &self.rebase_factor)
    }

    pub fn scaled_supply_for_withdraw(
        &self,
        nominal: &ManagedDecimal<C::Api, NumDecimals>,
    ) -> ManagedDecimal<C::Api, NumDecimals> {
        self.sc_ref
            .scaled_supply_up(nominal, &self.supply_index, &self.rebase_factor)
    }

    pub fn nominal_supply(
        &self,
        scaled: &ManagedDecimal<C::Api, NumDecimals>,
    ) -> ManagedDecimal<C::Api, NumDecimals> {
        self.sc_ref.nominal_supply_down(
            scaled,
            &self.supply_index,
            &self.rebase_factor,
            self.params.asset_decimals,
        )
    }

    pub fn scaled_debt_for_borrow(
        &self,
        nominal: &ManagedDecimal<C::Api, NumDecimals>,
    ) -> ManagedDecimal<C::Api, NumDecimals> {
        self.sc_ref.scaled_debt_up(nominal, &self.borrow_index)
    }

    pub fn scaled_debt_for_repay(
        &self,
        nominal: &ManagedDecimal<C::Api, NumDecimals>,
    ) -> ManagedDecimal<C::Api, NumDecimals> {
        self.sc_ref.scaled_debt_down(nominal, &self.borrow_index)
    }

    pub fn nominal_debt(
        &self,
        scaled: &ManagedDecimal<C::Api, NumDecimals>,
    ) -> ManagedDecimal<C::Api, NumDecimals> {
        self.sc_ref
            .nominal_debt_up(scaled, &self.borrow_index, self.params.asset_decimals)
    }
}
