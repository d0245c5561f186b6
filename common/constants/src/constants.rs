#![no_std]

/// Fixed-point unit for indexes, rates and the rebase adjustment factor.
pub const RAY: u128 = 1_000_000_000_000_000_000_000_000_000;
pub const RAY_PRECISION: usize = 27;

pub const WAD: u128 = 1_000_000_000_000_000_000;
pub const WAD_PRECISION: usize = 18;

/// Basis points, used for the reserve factor.
pub const BPS: usize = 10_000; // 100%
pub const BPS_PRECISION: usize = 4;

pub const SECONDS_PER_YEAR: u64 = 31_556_926;
