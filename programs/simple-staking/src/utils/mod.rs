pub mod math;
pub use math::*;

pub mod token;
pub use token::*;

use crate::error::ErrorCode;
use anchor_lang::prelude::*;

/// Current cluster time in whole seconds.
///
/// The ledger works on unsigned timestamps; a negative `unix_timestamp`
/// is rejected rather than wrapped.
pub fn current_timestamp() -> Result<u64> {
    let clock = Clock::get()?;
    u64::try_from(clock.unix_timestamp).map_err(|_| error!(ErrorCode::InvalidTimestamp))
}
