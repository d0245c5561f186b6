multiversx_sc::imports!();

use crate::{cache::Cache, scaling, storage};
use common_constants::RAY_PRECISION;
use common_errors::ERROR_DEGENERATE_SUPPLY;

/// Rebase synchronization.
///
/// The underlying token changes every wallet balance in place when it
/// rebases, so the pool cannot observe the event directly. Instead every
/// state-touching call feeds in a fresh reading of the token's total supply
/// and this module folds the change into the cumulative rebase factor:
///
/// `delta = observed_supply / last_seen_supply`
/// `rebase_factor' = rebase_factor * delta`
///
/// The first reading only records a baseline. Re-observing the same supply
/// is a no-op, so synchronization is idempotent within a rebase epoch.
#[multiversx_sc::module]
pub trait RebaseSyncModule:
    storage::Storage
    + common_math::SharedMathModule
    + common_events::EventsModule
    + scaling::ScalingModule
{
    /// Folds an observed underlying total supply into the rebase factor.
    /// Returns the applied delta at RAY (1.0 when nothing changed).
    fn sync_rebase_factor(
        &self,
        cache: &mut Cache<Self>,
        observed_supply: ManagedDecimal<Self::Api, NumDecimals>,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        require!(observed_supply > cache.zero, ERROR_DEGENERATE_SUPPLY);

        if cache.last_seen_supply == cache.zero {
            // first observation, baseline only
            cache.last_seen_supply = observed_supply;
            return self.ray();
        }

        if observed_supply == cache.last_seen_supply {
            return self.ray();
        }

        let delta = self.div_half_up(&observed_supply, &cache.last_seen_supply, RAY_PRECISION);
        cache.rebase_factor = self.mul_half_up(&cache.rebase_factor, &delta, RAY_PRECISION);
        cache.last_seen_supply = observed_supply;

        self.rebase_sync_event(&cache.last_seen_supply, &delta, &cache.rebase_factor);

        delta
    }
}
