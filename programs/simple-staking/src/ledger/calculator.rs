//! Fixed-point reward math

use crate::{utils::mul_div_floor, PRECISION};

/// Pure reward arithmetic over `PRECISION`-scaled accumulators.
///
/// Every division truncates toward zero. The truncated remainder is not
/// carried, so a staker can be short by at most one unit per settlement.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RewardCalculator;

impl RewardCalculator {
    /// Increase of the per-share accumulator after `elapsed` seconds at
    /// `reward_per_second`, spread over `total_staked`.
    ///
    /// Returns `None` for an empty pool or when the result does not fit.
    pub fn reward_per_share_delta(
        elapsed: u64,
        reward_per_second: u64,
        total_staked: u64,
    ) -> Option<u128> {
        // u64 * u64 always fits in u128
        let reward = u128::from(elapsed) * u128::from(reward_per_second);
        mul_div_floor(reward, PRECISION, u128::from(total_staked))
    }

    /// Reward a stake of `amount` has earned since inception at the given
    /// accumulator value: `amount * acc_reward_per_share / PRECISION`.
    pub fn accumulated_reward(amount: u64, acc_reward_per_share: u128) -> Option<u128> {
        mul_div_floor(u128::from(amount), acc_reward_per_share, PRECISION)
    }

    /// Reward accrued since the debt checkpoint, floored at zero and capped
    /// at `u64::MAX`.
    ///
    /// Only a `u128` overflow of the accumulated reward yields `None`; a cap
    /// never blocks settlement, so principal stays withdrawable.
    pub fn pending_reward(
        amount: u64,
        acc_reward_per_share: u128,
        reward_debt: u128,
    ) -> Option<u64> {
        let accumulated = Self::accumulated_reward(amount, acc_reward_per_share)?;
        Some(u64::try_from(accumulated.saturating_sub(reward_debt)).unwrap_or(u64::MAX))
    }
}
