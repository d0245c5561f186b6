#![no_std]

pub static ERROR_INSUFFICIENT_BALANCE: &[u8] = b"Amount exceeds the holder's balance.";

pub static ERROR_ZERO_AMOUNT: &[u8] = b"Amount must be greater than zero.";

pub static ERROR_DEGENERATE_SUPPLY: &[u8] =
    b"Underlying total supply reading is zero, cannot synchronize.";

pub static ERROR_INSUFFICIENT_LIQUIDITY: &[u8] = b"Not enough liquidity in the pool reserves.";

pub static ERROR_INVALID_ASSET: &[u8] = b"Token sent is not the pool asset.";

pub static ERROR_NO_DEBT: &[u8] = b"No outstanding debt for this account.";

pub static ERROR_SUPPLY_NOT_OBSERVED: &[u8] =
    b"Underlying supply has never been observed for this pool.";
