use anchor_lang::prelude::*;

declare_id!("2JmW4st8PKodRoKHKYs1LPePpQqyaXyVq3dJc3dGpyrt");

/// PDA seed of the program authority that owns the custody vault.
pub const AUTH_SEED: &str = "vault_and_reward_auth";
/// Fixed-point scale of `Pool::acc_reward_per_share`.
pub const PRECISION: u128 = 1_000_000_000_000;

pub mod error;
pub mod instructions;
pub mod ledger;
pub mod states;
pub mod utils;

use instructions::*;
use states::RewardSettlement;

#[program]
pub mod simple_staking {

    use super::*;

    pub fn initialize_pool(
        ctx: Context<InitializePool>,
        reward_per_second: u64,
        start_time: u64,
        settlement: RewardSettlement,
    ) -> Result<()> {
        instructions::initialize_pool(ctx, reward_per_second, start_time, settlement)
    }

    pub fn fund_rewards(ctx: Context<FundRewards>, amount: u64) -> Result<()> {
        instructions::fund_rewards(ctx, amount)
    }

    pub fn stake(ctx: Context<Stake>, amount: u64) -> Result<()> {
        instructions::stake(ctx, amount)
    }

    pub fn unstake(ctx: Context<Unstake>, amount: u64) -> Result<()> {
        instructions::unstake(ctx, amount)
    }

    pub fn harvest(ctx: Context<Harvest>) -> Result<()> {
        instructions::harvest(ctx)
    }

    pub fn pending_reward(ctx: Context<PendingReward>) -> Result<u64> {
        instructions::pending_reward(ctx)
    }
}
