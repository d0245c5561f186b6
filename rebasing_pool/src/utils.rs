multiversx_sc::imports!();

use crate::{cache::Cache, scaling, storage};

use common_errors::ERROR_INVALID_ASSET;

/// Helper functions shared by the pool endpoints: interest accrual, payment
/// validation, transfers and market state events.
#[multiversx_sc::module]
pub trait UtilsModule:
    storage::Storage
    + common_events::EventsModule
    + common_math::SharedMathModule
    + common_rates::InterestRates
    + scaling::ScalingModule
{
    /// Accrues interest since the last update.
    ///
    /// Advances the borrow index by the compounded rate for the elapsed
    /// period, splits the accrued interest between suppliers and the
    /// treasury, then grows the supply index by the suppliers' share. The
    /// treasury cut is minted as scaled supply so it earns like any other
    /// deposit from that point on. The rebase factor is untouched here; it
    /// moves only through the sync protocol.
    fn global_sync(&self, cache: &mut Cache<Self>) {
        let delta = cache.timestamp - cache.last_timestamp;

        if delta > 0 {
            let borrow_rate = self.calc_borrow_rate(cache.get_utilization(), &cache.params);
            let interest_factor = self.calculate_compounded_interest(borrow_rate, delta);
            let (new_borrow_index, old_borrow_index) =
                self.update_borrow_index(cache.borrow_index.clone(), &interest_factor);

            let (supplier_rewards_ray, protocol_fee_ray) = self.split_accrued_interest(
                &cache.params.reserve_factor,
                &cache.borrowed_scaled,
                &new_borrow_index,
                &old_borrow_index,
            );

            let new_supply_index = self.update_supply_index(
                cache.total_supplied(),
                cache.supply_index.clone(),
                supplier_rewards_ray,
            );

            cache.supply_index = new_supply_index;
            cache.borrow_index = new_borrow_index;

            if protocol_fee_ray > self.ray_zero() {
                let fee_scaled = cache.scaled_supply_for_deposit(&protocol_fee_ray);
                cache.treasury_scaled += &fee_scaled;
                cache.supplied_scaled += &fee_scaled;
            }

            cache.last_timestamp = cache.timestamp;
        }
    }

    #[inline(always)]
    fn emit_market_update(&self, cache: &Cache<Self>) {
        let reserves = cache.get_reserves();
        self.update_market_state_event(
            cache.timestamp,
            &cache.supply_index,
            &cache.borrow_index,
            &cache.rebase_factor,
            &cache.supplied_scaled,
            &cache.borrowed_scaled,
            &reserves,
        );
    }

    /// Sends pool asset to a recipient, skipping empty transfers.
    #[inline]
    fn send_asset(
        &self,
        cache: &Cache<Self>,
        amount: &ManagedDecimal<Self::Api, NumDecimals>,
        to: &ManagedAddress,
    ) -> EgldOrEsdtTokenPayment<Self::Api> {
        let payment = EgldOrEsdtTokenPayment::new(
            cache.params.asset_id.clone(),
            0,
            amount.into_raw_units().clone(),
        );

        self.tx().to(to).payment(&payment).transfer_if_not_empty();

        payment
    }

    /// Extracts the incoming payment and checks it is the pool asset.
    fn get_payment_amount(&self, cache: &Cache<Self>) -> ManagedDecimal<Self::Api, NumDecimals> {
        let (asset, amount) = self.call_value().egld_or_single_fungible_esdt();

        require!(cache.is_same_asset(&asset), ERROR_INVALID_ASSET);

        cache.get_decimal_value(&amount)
    }
}
