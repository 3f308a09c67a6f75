use anchor_lang::prelude::*;

//
// ──────────────────────────────────────────────────────────────────────────────
// UserInfo Account
// ──────────────────────────────────────────────────────────────────────────────
//

/// PDA seed string used to derive each staker's record.
pub const USER_INFO_SEED: &str = "user_info";

/// Stake and reward checkpoint for a single staker.
///
/// Derived from `USER_INFO_SEED + owner`, created on the first stake and
/// never closed. A zeroed record is equivalent to no record.
#[account]
#[derive(Default, Debug)]
pub struct UserInfo {
    /// PDA bump for this account.
    pub bump: u8,

    /// Staker this record belongs to.
    pub owner: Pubkey,

    /// Currently staked amount.
    pub amount: u64,

    /// `amount * acc_reward_per_share / PRECISION` at the last interaction.
    /// Reward up to that point is either paid or held in `unclaimed_reward`.
    pub reward_debt: u128,

    /// Reward settled on a balance change but not transferred yet.
    pub unclaimed_reward: u64,

    /// Reward transferred to this staker so far.
    pub total_harvested: u64,
}

impl UserInfo {
    /// Fixed serialized size of the account (for allocation at initialization).
    ///
    /// Breakdown:
    /// - 8: account discriminator
    /// - 1: bump
    /// - 32: owner pubkey
    /// - 8: amount
    /// - 16: reward debt
    /// - 8 * 2: unclaimed / harvested
    pub const LEN: usize = 8 + 1 + 32 + 8 + 16 + 8 * 2;
}
