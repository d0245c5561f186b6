#![no_std]

multiversx_sc::imports!();
multiversx_sc::derive_imports!();

/// Static configuration of a reserve, stored once at init and updatable
/// through the upgrade endpoint.
///
/// Rates and utilization breakpoints are RAY-scaled annual values; the
/// reserve factor is BPS-scaled.
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, TypeAbi, Clone)]
pub struct ReserveParams<M: ManagedTypeApi> {
    pub asset_id: EgldOrEsdtTokenIdentifier<M>,
    pub max_borrow_rate: ManagedDecimal<M, NumDecimals>,
    pub base_borrow_rate: ManagedDecimal<M, NumDecimals>,
    pub slope1: ManagedDecimal<M, NumDecimals>,
    pub slope2: ManagedDecimal<M, NumDecimals>,
    pub slope3: ManagedDecimal<M, NumDecimals>,
    pub mid_utilization: ManagedDecimal<M, NumDecimals>,
    pub optimal_utilization: ManagedDecimal<M, NumDecimals>,
    pub reserve_factor: ManagedDecimal<M, NumDecimals>,
    pub asset_decimals: usize,
    /// Holder credited with the protocol's share of borrow interest.
    pub treasury: ManagedAddress<M>,
}
