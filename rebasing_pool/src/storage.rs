multiversx_sc::imports!();
multiversx_sc::derive_imports!();

use common_structs::ReserveParams;

/// Storage mappers for the pool's core state variables.
///
/// All scaled quantities, indexes and the rebase factor are kept as
/// `ManagedDecimal` values at RAY precision. Nominal token amounts use the
/// asset's own decimals.
#[multiversx_sc::module]
pub trait Storage {
    /// Returns the underlying asset managed by this pool.
    #[view(getPoolAsset)]
    #[storage_mapper("pool_asset")]
    fn pool_asset(&self) -> SingleValueMapper<EgldOrEsdtTokenIdentifier>;

    /// Returns the reserve configuration (rate model, reserve factor, decimals).
    #[view(getParams)]
    #[storage_mapper("params")]
    fn params(&self) -> SingleValueMapper<ReserveParams<Self::Api>>;

    /// Total scaled supply credited to all holders, RAY precision.
    #[view(getSuppliedScaled)]
    #[storage_mapper("supplied_scaled")]
    fn supplied_scaled(&self) -> SingleValueMapper<ManagedDecimal<Self::Api, NumDecimals>>;

    /// Total scaled debt across all borrowers, RAY precision.
    #[view(getBorrowedScaled)]
    #[storage_mapper("borrowed_scaled")]
    fn borrowed_scaled(&self) -> SingleValueMapper<ManagedDecimal<Self::Api, NumDecimals>>;

    /// Per-holder scaled deposit balance, RAY precision.
    #[view(getScaledBalance)]
    #[storage_mapper("scaled_balance")]
    fn scaled_balance(
        &self,
        holder: &ManagedAddress,
    ) -> SingleValueMapper<ManagedDecimal<Self::Api, NumDecimals>>;

    /// Per-borrower scaled debt, RAY precision.
    #[view(getScaledDebt)]
    #[storage_mapper("scaled_debt")]
    fn scaled_debt(
        &self,
        borrower: &ManagedAddress,
    ) -> SingleValueMapper<ManagedDecimal<Self::Api, NumDecimals>>;

    /// Current supply index (deposit interest accumulator), RAY precision.
    #[view(getSupplyIndex)]
    #[storage_mapper("supply_index")]
    fn supply_index(&self) -> SingleValueMapper<ManagedDecimal<Self::Api, NumDecimals>>;

    /// Current borrow index (debt interest accumulator), RAY precision.
    #[view(getBorrowIndex)]
    #[storage_mapper("borrow_index")]
    fn borrow_index(&self) -> SingleValueMapper<ManagedDecimal<Self::Api, NumDecimals>>;

    /// Cumulative rebase factor, RAY precision. Starts at 1.0 and is scaled
    /// by the supply ratio every time a rebase is synchronized.
    #[view(getRebaseFactor)]
    #[storage_mapper("rebase_factor")]
    fn rebase_factor(&self) -> SingleValueMapper<ManagedDecimal<Self::Api, NumDecimals>>;

    /// Last underlying total supply observed by the sync protocol, in asset
    /// decimals. Zero means no baseline has been recorded yet.
    #[view(getLastSeenSupply)]
    #[storage_mapper("last_seen_supply")]
    fn last_seen_supply(&self) -> SingleValueMapper<ManagedDecimal<Self::Api, NumDecimals>>;

    /// Protocol revenue accrued from the reserve factor cut, scaled units.
    #[view(getTreasuryScaled)]
    #[storage_mapper("treasury_scaled")]
    fn treasury_scaled(&self) -> SingleValueMapper<ManagedDecimal<Self::Api, NumDecimals>>;

    /// Timestamp of the last interest index update.
    #[view(getLastTimestamp)]
    #[storage_mapper("last_timestamp")]
    fn last_timestamp(&self) -> SingleValueMapper<u64>;
}
