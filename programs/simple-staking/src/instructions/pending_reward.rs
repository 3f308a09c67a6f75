use crate::error::ErrorCode;
use crate::states::*;
use crate::utils::current_timestamp;
use anchor_lang::prelude::*;

/// Read-only view of an address's claimable reward.
///
/// Any address may be queried. One that never staked has no `user_info`
/// account yet and reads as zero.
#[derive(Accounts)]
pub struct PendingReward<'info> {
    /// CHECK: Only used as a PDA seed for `user_info`.
    pub user: UncheckedAccount<'info>,

    #[account(
        seeds = [POOL_SEED.as_bytes()],
        bump = pool.bump,
    )]
    pub pool: Account<'info, Pool>,

    /// CHECK: Address pinned by seeds; deserialized as `UserInfo` only when
    /// the account exists.
    #[account(
        seeds = [
            USER_INFO_SEED.as_bytes(),
            user.key().as_ref()
        ],
        bump,
    )]
    pub user_info: UncheckedAccount<'info>,
}

/// Returns (via return data) what `harvest` would pay `user` right now.
pub fn pending_reward(ctx: Context<PendingReward>) -> Result<u64> {
    let now = current_timestamp()?;
    let info = &ctx.accounts.user_info;
    let user_info = if info.data_is_empty() {
        None
    } else {
        require_keys_eq!(*info.owner, crate::ID, ErrorCode::InvalidOwner);
        let data = info.try_borrow_data()?;
        Some(UserInfo::try_deserialize(&mut &data[..])?)
    };
    ctx.accounts
        .pool
        .pending_reward_for(user_info.as_ref(), now)
}
