use crate::error::ErrorCode;
use crate::ledger::RewardLedger;
use crate::states::*;
use crate::utils::{current_timestamp, ensure_principal_covered, VaultTransfer};
use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

/// Accounts required to stake into the pool.
///
/// Flow summary:
/// 1) Accrue the pool up to the current clock.
/// 2) Settle the staker's reward accrued so far (credited, or paid under
///    immediate settlement).
/// 3) Pull `amount` from the staker's token account into the vault.
/// 4) Update balances and the reward debt checkpoint.
/// 5) Emit `Staked`.
#[derive(Accounts)]
pub struct Stake<'info> {
    /// Staker paying the principal (and rent for a new `user_info`).
    #[account(mut)]
    pub owner: Signer<'info>,

    #[account(
        mut,
        seeds = [POOL_SEED.as_bytes()],
        bump = pool.bump,
    )]
    pub pool: Account<'info, Pool>,

    /// Per-user staking record (created lazily).
    #[account(
        init_if_needed,
        seeds = [
            USER_INFO_SEED.as_bytes(),
            owner.key().as_ref()
        ],
        bump,
        payer = owner,
        space = UserInfo::LEN
    )]
    pub user_info: Account<'info, UserInfo>,

    /// Program authority PDA (vault owner).
    ///
    /// CHECK: PDA derivation enforced by seeds; used only as a signer.
    #[account(
        seeds = [crate::AUTH_SEED.as_bytes()],
        bump = pool.authority_bump,
    )]
    pub authority: UncheckedAccount<'info>,

    #[account(
        address = pool.staked_mint @ ErrorCode::InvalidMint,
        mint::token_program = token_program,
    )]
    pub staked_mint: Box<InterfaceAccount<'info, Mint>>,

    /// Custody vault receiving the principal.
    #[account(mut, address = pool.vault @ ErrorCode::InvalidVault)]
    pub vault: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Staker's token account; source of principal, destination of rewards.
    #[account(
        mut,
        token::mint = staked_mint,
        token::authority = owner,
        token::token_program = token_program,
    )]
    pub owner_token: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,

    pub system_program: Program<'info, System>,
}

pub fn stake(ctx: Context<Stake>, amount: u64) -> Result<()> {
    let now = current_timestamp()?;

    let mut assets = VaultTransfer {
        owner: ctx.accounts.owner.to_account_info(),
        owner_token: ctx.accounts.owner_token.to_account_info(),
        vault: ctx.accounts.vault.to_account_info(),
        vault_balance: ctx.accounts.vault.amount,
        authority: ctx.accounts.authority.to_account_info(),
        authority_bump: ctx.accounts.pool.authority_bump,
        mint: ctx.accounts.staked_mint.to_account_info(),
        mint_decimals: ctx.accounts.staked_mint.decimals,
        token_program: ctx.accounts.token_program.to_account_info(),
    };

    let user_info = &mut ctx.accounts.user_info;
    if user_info.owner == Pubkey::default() {
        user_info.owner = ctx.accounts.owner.key();
        user_info.bump = ctx.bumps.user_info;
    }

    let settlement =
        RewardLedger::new(&mut ctx.accounts.pool).stake(user_info, amount, now, &mut assets)?;
    ensure_principal_covered(&mut ctx.accounts.vault, &ctx.accounts.pool)?;

    let user_info = &ctx.accounts.user_info;
    let pool = &ctx.accounts.pool;
    msg!(
        "Staked {}: user_amount={}, total_staked={}, reward_paid={}",
        amount,
        user_info.amount,
        pool.total_staked,
        settlement.reward_paid
    );

    emit!(Staked {
        user: user_info.owner,
        amount,
        reward_settled: settlement.reward_settled,
        reward_paid: settlement.reward_paid,
        user_amount: user_info.amount,
        total_staked: pool.total_staked,
        acc_reward_per_share: pool.acc_reward_per_share,
    });
    Ok(())
}
