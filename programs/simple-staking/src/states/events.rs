use crate::states::RewardSettlement;
use anchor_lang::prelude::*;

//
// ──────────────────────────────────────────────────────────────────────────────
// Events: Emitted for off-chain indexers/clients to track ledger changes
// ──────────────────────────────────────────────────────────────────────────────
//

/// Emitted once when the pool is created.
#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct PoolInitialized {
    /// Deployer allowed to fund rewards.
    pub admin: Pubkey,
    /// Mint of the staked (and reward) asset.
    pub staked_mint: Pubkey,
    /// Custody vault.
    pub vault: Pubkey,
    pub reward_per_second: u64,
    pub start_time: u64,
    pub settlement: RewardSettlement,
}

/// Emitted when the admin tops up the reward reserve.
#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct RewardsFunded {
    pub admin: Pubkey,
    pub amount: u64,
    /// Cumulative reserve deposited, including this call.
    pub total_reward_funded: u64,
}

/// Emitted after a stake.
///
/// `reward_settled` is what accrued since the user's previous interaction;
/// `reward_paid` is what was transferred in this call (zero under deferred
/// settlement).
#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct Staked {
    pub user: Pubkey,
    pub amount: u64,
    pub reward_settled: u64,
    pub reward_paid: u64,
    /// User's staked balance after the call.
    pub user_amount: u64,
    pub total_staked: u64,
    pub acc_reward_per_share: u128,
}

/// Emitted after an unstake; fields as in [`Staked`].
#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct Unstaked {
    pub user: Pubkey,
    pub amount: u64,
    pub reward_settled: u64,
    pub reward_paid: u64,
    pub user_amount: u64,
    pub total_staked: u64,
    pub acc_reward_per_share: u128,
}

/// Emitted after a harvest, including harvests that paid nothing.
#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct Harvested {
    pub user: Pubkey,
    pub reward_paid: u64,
    /// Cumulative reward the user has received.
    pub total_harvested: u64,
    pub acc_reward_per_share: u128,
}
