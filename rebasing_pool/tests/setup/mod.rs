use crate::constants::*;

use multiversx_sc::codec::multi_types::OptionalValue;
use multiversx_sc::types::{BigUint, EgldOrEsdtTokenIdentifier};
use multiversx_sc_scenario::{
    api::StaticApi,
    imports::{ExpectError, TestAddress},
    ScenarioTxWhitebox, ScenarioWorld,
};

use rebasing_pool::liquidity::LiquidityModule;
use rebasing_pool::storage::Storage;
use rebasing_pool::view::ViewModule;
use rebasing_pool::RebasingPool;

pub struct PoolSetup {
    pub world: ScenarioWorld,
    pub timestamp: u64,
}

impl PoolSetup {
    /// Deploys the pool for the AMPL-like token and seeds the owner (acting
    /// as the controller) with funds to route on behalf of test users.
    pub fn new() -> Self {
        let mut world = ScenarioWorld::new();
        world.register_contract(POOL_PATH, rebasing_pool::ContractBuilder);

        world.current_block().block_timestamp(0);

        world
            .account(OWNER_ADDRESS)
            .nonce(1)
            .esdt_balance(AMPL_TOKEN, units::<StaticApi>(1_000_000_000))
            .esdt_balance(OTHER_TOKEN, units::<StaticApi>(1_000_000_000));
        world.account(TREASURY_ADDRESS).nonce(1);
        world.account(LENDER_1).nonce(1);
        world.account(LENDER_2).nonce(1);
        world.account(BORROWER).nonce(1);

        world
            .tx()
            .from(OWNER_ADDRESS)
            .raw_deploy()
            .code(POOL_PATH)
            .new_address(POOL_ADDRESS)
            .whitebox(rebasing_pool::contract_obj, |sc| {
                sc.init(
                    &EgldOrEsdtTokenIdentifier::esdt(AMPL_TOKEN.to_token_identifier()),
                    ray_pct(R_MAX_PCT),
                    ray_pct(R_BASE_PCT),
                    ray_pct(R_SLOPE1_PCT),
                    ray_pct(R_SLOPE2_PCT),
                    ray_pct(R_SLOPE3_PCT),
                    ray_pct(U_MID_PCT),
                    ray_pct(U_OPTIMAL_PCT),
                    BigUint::from(RESERVE_FACTOR_BPS),
                    AMPL_DECIMALS,
                    TREASURY_ADDRESS.to_managed_address(),
                );
            });

        PoolSetup {
            world,
            timestamp: 0,
        }
    }

    pub fn advance_time(&mut self, seconds: u64) {
        self.timestamp += seconds;
        self.world.current_block().block_timestamp(self.timestamp);
    }

    pub fn supply(&mut self, holder: TestAddress, tokens: u64, observed_tokens: u64) {
        self.world
            .tx()
            .from(OWNER_ADDRESS)
            .to(POOL_ADDRESS)
            .single_esdt(
                &AMPL_TOKEN.to_token_identifier(),
                0,
                &units::<StaticApi>(tokens),
            )
            .whitebox(rebasing_pool::contract_obj, |sc| {
                sc.supply(holder.to_managed_address(), units(observed_tokens));
            });
    }

    pub fn supply_wrong_token_expect(
        &mut self,
        holder: TestAddress,
        tokens: u64,
        observed_tokens: u64,
        error_message: &str,
    ) {
        self.world
            .tx()
            .from(OWNER_ADDRESS)
            .to(POOL_ADDRESS)
            .single_esdt(
                &OTHER_TOKEN.to_token_identifier(),
                0,
                &units::<StaticApi>(tokens),
            )
            .returns(ExpectError(4, error_message))
            .whitebox(rebasing_pool::contract_obj, |sc| {
                sc.supply(holder.to_managed_address(), units(observed_tokens));
            });
    }

    pub fn withdraw(
        &mut self,
        holder: TestAddress,
        observed_tokens: u64,
        amount_tokens: Option<u64>,
    ) {
        self.world
            .tx()
            .from(OWNER_ADDRESS)
            .to(POOL_ADDRESS)
            .whitebox(rebasing_pool::contract_obj, |sc| {
                let amount = match amount_tokens {
                    Some(tokens) => OptionalValue::Some(units(tokens)),
                    None => OptionalValue::None,
                };
                sc.withdraw(
                    holder.to_managed_address(),
                    units(observed_tokens),
                    amount,
                );
            });
    }

    pub fn withdraw_expect(
        &mut self,
        holder: TestAddress,
        observed_tokens: u64,
        amount_tokens: Option<u64>,
        error_message: &str,
    ) {
        self.world
            .tx()
            .from(OWNER_ADDRESS)
            .to(POOL_ADDRESS)
            .returns(ExpectError(4, error_message))
            .whitebox(rebasing_pool::contract_obj, |sc| {
                let amount = match amount_tokens {
                    Some(tokens) => OptionalValue::Some(units(tokens)),
                    None => OptionalValue::None,
                };
                sc.withdraw(
                    holder.to_managed_address(),
                    units(observed_tokens),
                    amount,
                );
            });
    }

    pub fn borrow(
        &mut self,
        borrower: TestAddress,
        tokens: u64,
        observed_tokens: u64,
    ) {
        self.world
            .tx()
            .from(OWNER_ADDRESS)
            .to(POOL_ADDRESS)
            .whitebox(rebasing_pool::contract_obj, |sc| {
                sc.borrow(
                    borrower.to_managed_address(),
                    units(tokens),
                    units(observed_tokens),
                );
            });
    }

    pub fn repay(
        &mut self,
        borrower: TestAddress,
        tokens: u64,
        observed_tokens: u64,
    ) {
        self.world
            .tx()
            .from(OWNER_ADDRESS)
            .to(POOL_ADDRESS)
            .single_esdt(
                &AMPL_TOKEN.to_token_identifier(),
                0,
                &units::<StaticApi>(tokens),
            )
            .whitebox(rebasing_pool::contract_obj, |sc| {
                sc.repay(borrower.to_managed_address(), units(observed_tokens));
            });
    }

    pub fn transfer(
        &mut self,
        from: TestAddress,
        to: TestAddress,
        tokens: u64,
        observed_tokens: u64,
    ) {
        self.world
            .tx()
            .from(OWNER_ADDRESS)
            .to(POOL_ADDRESS)
            .whitebox(rebasing_pool::contract_obj, |sc| {
                sc.transfer_scaled(
                    from.to_managed_address(),
                    to.to_managed_address(),
                    units(tokens),
                    units(observed_tokens),
                );
            });
    }

    pub fn transfer_expect(
        &mut self,
        from: TestAddress,
        to: TestAddress,
        tokens: u64,
        observed_tokens: u64,
        error_message: &str,
    ) {
        self.world
            .tx()
            .from(OWNER_ADDRESS)
            .to(POOL_ADDRESS)
            .returns(ExpectError(4, error_message))
            .whitebox(rebasing_pool::contract_obj, |sc| {
                sc.transfer_scaled(
                    from.to_managed_address(),
                    to.to_managed_address(),
                    units(tokens),
                    units(observed_tokens),
                );
            });
    }

    pub fn sync(&mut self, observed_tokens: u64) {
        self.world
            .tx()
            .from(OWNER_ADDRESS)
            .to(POOL_ADDRESS)
            .whitebox(rebasing_pool::contract_obj, |sc| {
                sc.sync_rebase(units(observed_tokens));
            });
    }

    pub fn sync_expect(&mut self, observed_tokens: u64, error_message: &str) {
        self.world
            .tx()
            .from(OWNER_ADDRESS)
            .to(POOL_ADDRESS)
            .returns(ExpectError(4, error_message))
            .whitebox(rebasing_pool::contract_obj, |sc| {
                sc.sync_rebase(units(observed_tokens));
            });
    }

    /// Simulates a rebase of the underlying: the token adjusts the pool's
    /// wallet balance in place, then the next call observes the new total
    /// supply.
    pub fn rebase(&mut self, pool_balance_tokens: u64, observed_tokens: u64) {
        self.set_pool_balance(pool_balance_tokens);
        self.sync(observed_tokens);
    }

    pub fn set_pool_balance(&mut self, tokens: u64) {
        self.world.set_esdt_balance(
            POOL_ADDRESS.to_managed_address(),
            &AMPL_TOKEN.as_bytes(),
            units::<StaticApi>(tokens),
        );
    }

    pub fn assert_nominal_balance(
        &mut self,
        holder: TestAddress,
        expected_tokens: u64,
    ) {
        self.world
            .query()
            .to(POOL_ADDRESS)
            .whitebox(rebasing_pool::contract_obj, |sc| {
                let nominal = sc.get_nominal_balance(holder.to_managed_address());
                assert_eq!(nominal.into_raw_units(), &units(expected_tokens));
            });
    }

    /// Balance check with a tolerance in raw units, for paths where the
    /// directional rounding may shave dust.
    pub fn assert_nominal_balance_approx(
        &mut self,
        holder: TestAddress,
        expected_tokens: u64,
        tolerance_raw: u64,
    ) {
        self.world
            .query()
            .to(POOL_ADDRESS)
            .whitebox(rebasing_pool::contract_obj, |sc| {
                let nominal = sc.get_nominal_balance(holder.to_managed_address());
                let expected = units(expected_tokens);
                let actual = nominal.into_raw_units().clone();
                let diff = if actual >= expected {
                    actual - expected
                } else {
                    expected - actual
                };
                assert!(diff <= BigUint::from(tolerance_raw));
            });
    }

    pub fn assert_nominal_debt(
        &mut self,
        borrower: TestAddress,
        expected_tokens: u64,
    ) {
        self.world
            .query()
            .to(POOL_ADDRESS)
            .whitebox(rebasing_pool::contract_obj, |sc| {
                let debt = sc.get_nominal_debt(borrower.to_managed_address());
                assert_eq!(debt.into_raw_units(), &units(expected_tokens));
            });
    }

    pub fn assert_total_supplied(&mut self, expected_tokens: u64) {
        self.world
            .query()
            .to(POOL_ADDRESS)
            .whitebox(rebasing_pool::contract_obj, |sc| {
                let total = sc.get_total_supplied();
                assert_eq!(total.into_raw_units(), &units(expected_tokens));
            });
    }

    pub fn assert_rebase_factor_fraction(&mut self, numerator: u64, denominator: u64) {
        self.world
            .query()
            .to(POOL_ADDRESS)
            .whitebox(rebasing_pool::contract_obj, |sc| {
                let factor = sc.rebase_factor().get();
                let expected = BigUint::from(RAY) * numerator / denominator;
                assert_eq!(factor.into_raw_units(), &expected);
            });
    }

    pub fn assert_wallet(
        &mut self,
        holder: TestAddress,
        expected_tokens: u64,
    ) {
        self.world
            .check_account(holder)
            .esdt_balance(AMPL_TOKEN, units::<StaticApi>(expected_tokens));
    }

    pub fn assert_pool_wallet(&mut self, expected_tokens: u64) {
        self.world
            .check_account(POOL_ADDRESS)
            .esdt_balance(AMPL_TOKEN, units::<StaticApi>(expected_tokens));
    }

    /// Scaled units recorded for a holder; `None` expects the mapper to be
    /// cleared entirely.
    pub fn assert_scaled_balance_raw(
        &mut self,
        holder: TestAddress,
        expected_raw: Option<u128>,
    ) {
        self.world
            .query()
            .to(POOL_ADDRESS)
            .whitebox(rebasing_pool::contract_obj, |sc| {
                let mapper = sc.scaled_balance(&holder.to_managed_address());
                match expected_raw {
                    Some(raw) => {
                        assert_eq!(mapper.get().into_raw_units(), &BigUint::from(raw));
                    },
                    None => {
                        assert!(mapper.is_empty());
                    },
                }
            });
    }
}
