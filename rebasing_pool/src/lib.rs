#![no_std]

multiversx_sc::imports!();
multiversx_sc::derive_imports!();

pub mod cache;
pub mod engine;
pub mod liquidity;
pub mod scaling;
pub mod storage;
pub mod sync;
pub mod utils;
pub mod view;

pub use common_events::*;
use common_structs::ReserveParams;

/// Lending pool for an elastic-supply collateral asset.
///
/// Deposits are booked in scaled units that stay constant across both
/// interest accrual and rebases of the underlying token; the nominal value
/// of a position is `scaled * supply_index * rebase_factor`. Debt is booked
/// against the borrow index alone, so rebases never change what borrowers
/// owe. The owning controller feeds a reading of the underlying token's
/// total supply into every call and the pool folds supply changes into the
/// rebase factor lazily.
#[multiversx_sc::contract]
pub trait RebasingPool:
    storage::Storage
    + common_events::EventsModule
    + common_math::SharedMathModule
    + common_rates::InterestRates
    + scaling::ScalingModule
    + sync::RebaseSyncModule
    + engine::BalanceEngineModule
    + liquidity::LiquidityModule
    + utils::UtilsModule
    + view::ViewModule
{
    /// Initializes the pool for one asset.
    ///
    /// Rates and utilization breakpoints are RAY-scaled, the reserve factor
    /// is BPS-scaled. Both indexes and the rebase factor start at 1.0; the
    /// underlying supply baseline stays unobserved until the first sync.
    #[init]
    fn init(
        &self,
        asset: &EgldOrEsdtTokenIdentifier,
        r_max: BigUint,
        r_base: BigUint,
        r_slope1: BigUint,
        r_slope2: BigUint,
        r_slope3: BigUint,
        u_mid: BigUint,
        u_optimal: BigUint,
        reserve_factor: BigUint,
        asset_decimals: usize,
        treasury: ManagedAddress,
    ) {
        let params = ReserveParams {
            asset_id: asset.clone(),
            max_borrow_rate: self.to_decimal_ray(r_max),
            base_borrow_rate: self.to_decimal_ray(r_base),
            slope1: self.to_decimal_ray(r_slope1),
            slope2: self.to_decimal_ray(r_slope2),
            slope3: self.to_decimal_ray(r_slope3),
            mid_utilization: self.to_decimal_ray(u_mid),
            optimal_utilization: self.to_decimal_ray(u_optimal),
            reserve_factor: self.to_decimal_bps(reserve_factor),
            asset_decimals,
            treasury,
        };

        self.pool_asset().set(asset);
        self.params().set(&params);
        self.reserve_params_event(&params);

        self.supply_index().set(self.ray());
        self.borrow_index().set(self.ray());
        self.rebase_factor().set(self.ray());

        self.supplied_scaled().set(self.ray_zero());
        self.borrowed_scaled().set(self.ray_zero());
        self.treasury_scaled().set(self.ray_zero());

        self.last_seen_supply()
            .set(self.to_decimal(BigUint::zero(), asset_decimals));

        let timestamp = self.blockchain().get_block_timestamp();
        self.last_timestamp().set(timestamp);
    }

    /// Updates the rate model and reserve factor. Balances, indexes and the
    /// rebase baseline are untouched.
    #[upgrade]
    fn upgrade(
        &self,
        r_max: BigUint,
        r_base: BigUint,
        r_slope1: BigUint,
        r_slope2: BigUint,
        r_slope3: BigUint,
        u_mid: BigUint,
        u_optimal: BigUint,
        reserve_factor: BigUint,
    ) {
        self.params().update(|params| {
            params.max_borrow_rate = self.to_decimal_ray(r_max);
            params.base_borrow_rate = self.to_decimal_ray(r_base);
            params.slope1 = self.to_decimal_ray(r_slope1);
            params.slope2 = self.to_decimal_ray(r_slope2);
            params.slope3 = self.to_decimal_ray(r_slope3);
            params.mid_utilization = self.to_decimal_ray(u_mid);
            params.optimal_utilization = self.to_decimal_ray(u_optimal);
            params.reserve_factor = self.to_decimal_bps(reserve_factor);
        });

        self.reserve_params_event(&self.params().get());
    }
}
