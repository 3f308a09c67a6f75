use crate::error::ErrorCode;
use crate::states::*;
use crate::utils::transfer_from_user_to_pool_vault;
use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

/// Admin top-up of the reward reserve held in the pool vault.
#[derive(Accounts)]
pub struct FundRewards<'info> {
    #[account(
        address = pool.admin @ ErrorCode::InvalidOwner
    )]
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [POOL_SEED.as_bytes()],
        bump = pool.bump,
    )]
    pub pool: Account<'info, Pool>,

    #[account(
        address = pool.staked_mint @ ErrorCode::InvalidMint,
        mint::token_program = token_program,
    )]
    pub staked_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(mut, address = pool.vault @ ErrorCode::InvalidVault)]
    pub vault: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        token::mint = staked_mint,
        token::authority = admin,
        token::token_program = token_program,
    )]
    pub admin_token: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,
}

pub fn fund_rewards(ctx: Context<FundRewards>, amount: u64) -> Result<()> {
    require_gt!(amount, 0, ErrorCode::InvalidAmount);

    transfer_from_user_to_pool_vault(
        ctx.accounts.admin.to_account_info(),
        ctx.accounts.admin_token.to_account_info(),
        ctx.accounts.vault.to_account_info(),
        ctx.accounts.staked_mint.to_account_info(),
        ctx.accounts.token_program.to_account_info(),
        amount,
        ctx.accounts.staked_mint.decimals,
    )?;

    let pool = &mut ctx.accounts.pool;
    pool.total_reward_funded = pool
        .total_reward_funded
        .checked_add(amount)
        .ok_or(ErrorCode::MathOverflow)?;
    msg!(
        "Rewards funded: amount={}, total_reward_funded={}",
        amount,
        pool.total_reward_funded
    );

    emit!(RewardsFunded {
        admin: ctx.accounts.admin.key(),
        amount,
        total_reward_funded: pool.total_reward_funded,
    });
    Ok(())
}
