use multiversx_sc::api::ManagedTypeApi;
use multiversx_sc::types::{BigUint, TestAddress, TestSCAddress};
use multiversx_sc_scenario::imports::{MxscPath, TestTokenIdentifier};

pub const RAY: u128 = 1_000_000_000_000_000_000_000_000_000;
pub const SECONDS_PER_YEAR: u64 = 31_556_926;

// elastic-supply collateral token, 9 decimals like the original AMPL
pub const AMPL_TOKEN: TestTokenIdentifier = TestTokenIdentifier::new("AMPL-abcdef");
pub const AMPL_DECIMALS: usize = 9;

// an unrelated token the pool must refuse
pub const OTHER_TOKEN: TestTokenIdentifier = TestTokenIdentifier::new("WEGLD-bd4d79");

// underlying total supply at genesis, in whole tokens
pub const INITIAL_TOTAL_SUPPLY: u64 = 50_000_000;

pub const R_MAX_PCT: u64 = 100; // 100%
pub const R_BASE_PCT: u64 = 2; // 2%
pub const R_SLOPE1_PCT: u64 = 10; // 10%
pub const R_SLOPE2_PCT: u64 = 100; // 100%
pub const R_SLOPE3_PCT: u64 = 200; // 200%
pub const U_MID_PCT: u64 = 60; // 60%
pub const U_OPTIMAL_PCT: u64 = 90; // 90%
pub const RESERVE_FACTOR_BPS: u64 = 2_500; // 25%

pub const OWNER_ADDRESS: TestAddress = TestAddress::new("owner");
pub const TREASURY_ADDRESS: TestAddress = TestAddress::new("treasury");
pub const LENDER_1: TestAddress = TestAddress::new("lender1");
pub const LENDER_2: TestAddress = TestAddress::new("lender2");
pub const BORROWER: TestAddress = TestAddress::new("borrower");

pub const POOL_ADDRESS: TestSCAddress = TestSCAddress::new("rebasing-pool");
pub const POOL_PATH: MxscPath = MxscPath::new("output/rebasing-pool.mxsc.json");

/// Whole tokens to raw 9-decimal units.
pub fn units<M: ManagedTypeApi>(tokens: u64) -> BigUint<M> {
    BigUint::from(tokens) * BigUint::from(10u64).pow(AMPL_DECIMALS as u32)
}

/// Percentage as a RAY-scaled fraction.
pub fn ray_pct<M: ManagedTypeApi>(pct: u64) -> BigUint<M> {
    BigUint::from(RAY) * BigUint::from(pct) / BigUint::from(100u64)
}
