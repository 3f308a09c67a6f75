use crate::{error::ErrorCode, ledger::RewardCalculator, states::UserInfo};
use anchor_lang::prelude::*;

//
// ──────────────────────────────────────────────────────────────────────────────
// Pool Account
// ──────────────────────────────────────────────────────────────────────────────
//

/// PDA seed string used to derive the (single) pool account.
pub const POOL_SEED: &str = "pool";
/// PDA seed string used to derive the pool's custody vault.
pub const POOL_VAULT_SEED: &str = "pool_vault";

/// What happens to reward settled by `stake`/`unstake`.
///
/// Either way the settled amount is locked in for the user before their
/// balance changes; the policies only differ in when tokens move.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RewardSettlement {
    /// Settled reward is credited to `UserInfo::unclaimed_reward` and paid
    /// on the next `harvest`.
    #[default]
    Deferred,
    /// Settled reward is transferred to the user inside the same call.
    Immediate,
}

/// Pool-wide accounting state.
///
/// Written only by the reward ledger. Invariants:
/// - `total_staked` equals the sum of every `UserInfo::amount`.
/// - `acc_reward_per_share` and `last_accrual_time` never decrease.
/// - `last_accrual_time >= start_time`.
#[account]
#[derive(Default, Debug)]
pub struct Pool {
    /// PDA bump for this account.
    pub bump: u8,

    /// PDA bump of the program authority that owns the vault.
    pub authority_bump: u8,

    /// Deployer; the only signer allowed to fund rewards.
    pub admin: Pubkey,

    /// Mint of the staked asset. Rewards are paid in the same mint.
    pub staked_mint: Pubkey,

    /// Program-owned token account holding principal and reward reserve.
    pub vault: Pubkey,

    /// Reward emitted per second, shared pro-rata by all stakers.
    pub reward_per_second: u64,

    /// UNIX timestamp (seconds) before which nothing accrues.
    pub start_time: u64,

    /// UNIX timestamp (seconds) the accumulator was last brought forward to.
    pub last_accrual_time: u64,

    /// Cumulative reward per staked unit since inception, scaled by `PRECISION`.
    pub acc_reward_per_share: u128,

    /// Sum of all users' staked amounts.
    pub total_staked: u64,

    /// Payout policy for reward settled on balance changes.
    pub settlement: RewardSettlement,

    /// Reward reserve deposited through `fund_rewards`.
    pub total_reward_funded: u64,

    /// Reward transferred to users so far.
    pub total_reward_paid: u64,
}

impl Pool {
    /// Fixed serialized size of the account (for allocation at initialization).
    ///
    /// Breakdown:
    /// - 8: account discriminator
    /// - 1 + 1: bumps
    /// - 32 * 3: three Pubkeys
    /// - 8 * 3: rate and two timestamps
    /// - 16: accumulator
    /// - 8: total staked
    /// - 1: settlement policy
    /// - 8 * 2: funded / paid counters
    pub const LEN: usize = 8 + 1 + 1 + 32 * 3 + 8 * 3 + 16 + 8 + 1 + 8 * 2;

    /// Earliest instant from which unaccounted reward is measured.
    fn accrual_floor(&self) -> u64 {
        self.last_accrual_time.max(self.start_time)
    }

    /// Value `acc_reward_per_share` would have if the pool accrued at `now`.
    ///
    /// Does not touch state. Time at or before the accrual floor, and any
    /// interval with nothing staked, leave the accumulator unchanged.
    pub fn projected_acc_reward_per_share(&self, now: u64) -> Result<u128> {
        let floor = self.accrual_floor();
        if now <= floor || self.total_staked == 0 {
            return Ok(self.acc_reward_per_share);
        }
        let delta = RewardCalculator::reward_per_share_delta(
            now - floor,
            self.reward_per_second,
            self.total_staked,
        )
        .ok_or(ErrorCode::MathOverflow)?;
        Ok(self
            .acc_reward_per_share
            .checked_add(delta)
            .ok_or(ErrorCode::MathOverflow)?)
    }

    /// Reward `user` could harvest at `now`, without accruing.
    pub fn pending_reward(&self, user: &UserInfo, now: u64) -> Result<u64> {
        let acc_reward_per_share = self.projected_acc_reward_per_share(now)?;
        let accrued =
            RewardCalculator::pending_reward(user.amount, acc_reward_per_share, user.reward_debt)
                .ok_or(ErrorCode::MathOverflow)?;
        Ok(user.unclaimed_reward.saturating_add(accrued))
    }

    /// Like [`Pool::pending_reward`], for an address that may have no record.
    pub fn pending_reward_for(&self, user: Option<&UserInfo>, now: u64) -> Result<u64> {
        match user {
            Some(user) => self.pending_reward(user, now),
            None => Ok(0),
        }
    }

    /// Brings the accumulator forward to `now`.
    ///
    /// Once past `start_time`, `last_accrual_time` moves to `now` even when
    /// the pool is empty, so reward time does not bank while nobody stakes.
    pub fn accrue(&mut self, now: u64) -> Result<()> {
        if now <= self.accrual_floor() {
            return Ok(());
        }
        self.acc_reward_per_share = self.projected_acc_reward_per_share(now)?;
        self.last_accrual_time = now;
        Ok(())
    }
}
