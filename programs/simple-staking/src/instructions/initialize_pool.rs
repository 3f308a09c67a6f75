use crate::states::*;
use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};
use std::ops::DerefMut;

/// Accounts context for `initialize_pool`.
///
/// This handler:
/// - Creates the pool account holding the accounting state.
/// - Creates the custody vault for `staked_mint`, owned by the program
///   authority PDA. The same vault holds principal and reward reserve.
#[derive(Accounts)]
pub struct InitializePool<'info> {
    /// Deployer; pays for the accounts and becomes the pool admin.
    #[account(mut)]
    pub admin: Signer<'info>,

    /// Program authority PDA that owns the vault.
    ///
    /// CHECK: PDA derivation enforced via seeds. Not read as an account; used as Pubkey.
    #[account(
        seeds = [crate::AUTH_SEED.as_bytes()],
        bump,
    )]
    pub authority: UncheckedAccount<'info>,

    /// The single pool account.
    #[account(
        init,
        seeds = [POOL_SEED.as_bytes()],
        bump,
        payer = admin,
        space = Pool::LEN
    )]
    pub pool: Account<'info, Pool>,

    /// Mint of the staked (and reward) asset.
    #[account(mint::token_program = token_program)]
    pub staked_mint: Box<InterfaceAccount<'info, Mint>>,

    /// Program-owned custody vault.
    #[account(
        init,
        seeds = [POOL_VAULT_SEED.as_bytes(), pool.key().as_ref()],
        bump,
        payer = admin,
        token::mint = staked_mint,
        token::authority = authority,
        token::token_program = token_program,
    )]
    pub vault: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Token program interface (required for vault creation).
    pub token_program: Interface<'info, TokenInterface>,

    /// Solana System Program.
    pub system_program: Program<'info, System>,
}

/// Initializes the pool with its immutable construction parameters.
///
/// # Parameters
/// - `reward_per_second`: emission rate shared by all stakers.
/// - `start_time`: UNIX timestamp before which nothing accrues. Staking is
///   allowed before it.
/// - `settlement`: whether stake/unstake pay settled reward immediately or
///   defer it to the next harvest.
pub fn initialize_pool(
    ctx: Context<InitializePool>,
    reward_per_second: u64,
    start_time: u64,
    settlement: RewardSettlement,
) -> Result<()> {
    let pool = ctx.accounts.pool.deref_mut();
    pool.bump = ctx.bumps.pool;
    pool.authority_bump = ctx.bumps.authority;
    pool.admin = ctx.accounts.admin.key();
    pool.staked_mint = ctx.accounts.staked_mint.key();
    pool.vault = ctx.accounts.vault.key();
    pool.reward_per_second = reward_per_second;
    pool.start_time = start_time;
    pool.last_accrual_time = start_time;
    pool.settlement = settlement;
    msg!(
        "Pool initialized: reward_per_second={}, start_time={}",
        reward_per_second,
        start_time
    );

    emit!(PoolInitialized {
        admin: pool.admin,
        staked_mint: pool.staked_mint,
        vault: pool.vault,
        reward_per_second,
        start_time,
        settlement,
    });
    Ok(())
}
