#![no_std]

multiversx_sc::imports!();
multiversx_sc::derive_imports!();

pub use common_structs::*;

#[multiversx_sc::module]
pub trait EventsModule {
    #[event("reserve_params")]
    fn reserve_params_event(&self, #[indexed] params: &ReserveParams<Self::Api>);

    /// Snapshot of the pool after every mutating operation.
    #[event("update_market_state")]
    fn update_market_state_event(
        &self,
        #[indexed] timestamp: u64,
        #[indexed] supply_index: &ManagedDecimal<Self::Api, NumDecimals>,
        #[indexed] borrow_index: &ManagedDecimal<Self::Api, NumDecimals>,
        #[indexed] rebase_factor: &ManagedDecimal<Self::Api, NumDecimals>,
        #[indexed] supplied_scaled: &ManagedDecimal<Self::Api, NumDecimals>,
        #[indexed] borrowed_scaled: &ManagedDecimal<Self::Api, NumDecimals>,
        #[indexed] reserves: &ManagedDecimal<Self::Api, NumDecimals>,
    );

    /// Emitted on every receipt mint/burn/transfer so downstream rate logic
    /// can observe the previous and new nominal balance of the holder.
    #[event("balance_change")]
    fn balance_change_event(
        &self,
        #[indexed] holder: &ManagedAddress,
        #[indexed] previous_nominal: &ManagedDecimal<Self::Api, NumDecimals>,
        #[indexed] new_nominal: &ManagedDecimal<Self::Api, NumDecimals>,
        #[indexed] total_scaled: &ManagedDecimal<Self::Api, NumDecimals>,
    );

    #[event("debt_change")]
    fn debt_change_event(
        &self,
        #[indexed] borrower: &ManagedAddress,
        #[indexed] previous_debt: &ManagedDecimal<Self::Api, NumDecimals>,
        #[indexed] new_debt: &ManagedDecimal<Self::Api, NumDecimals>,
        #[indexed] borrowed_scaled: &ManagedDecimal<Self::Api, NumDecimals>,
    );

    /// Emitted whenever a synchronization absorbs an external rebase.
    #[event("rebase_sync")]
    fn rebase_sync_event(
        &self,
        #[indexed] observed_supply: &ManagedDecimal<Self::Api, NumDecimals>,
        #[indexed] delta: &ManagedDecimal<Self::Api, NumDecimals>,
        #[indexed] rebase_factor: &ManagedDecimal<Self::Api, NumDecimals>,
    );
}
