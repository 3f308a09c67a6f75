use crate::error::ErrorCode;
use crate::ledger::RewardLedger;
use crate::states::*;
use crate::utils::{current_timestamp, ensure_principal_covered, VaultTransfer};
use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

/// Claim all reward accrued by the caller.
///
/// Reward math overview:
/// - Global index: `pool.acc_reward_per_share` accumulates reward per staked
///   unit, scaled by `PRECISION`.
/// - Per-user checkpoint: `user_info.reward_debt` is the index value already
///   accounted for against the current balance.
/// - Claimable = `unclaimed_reward + amount * acc / PRECISION - reward_debt`.
///
/// Funds movement:
/// - Reward moves from the vault to the caller's token account. The vault
///   must still cover all principal afterwards.
#[derive(Accounts)]
pub struct Harvest<'info> {
    pub owner: Signer<'info>,

    #[account(
        mut,
        seeds = [POOL_SEED.as_bytes()],
        bump = pool.bump,
    )]
    pub pool: Account<'info, Pool>,

    #[account(
        mut,
        seeds = [
            USER_INFO_SEED.as_bytes(),
            owner.key().as_ref()
        ],
        bump = user_info.bump,
        constraint = user_info.owner == owner.key() @ ErrorCode::InvalidOwner,
    )]
    pub user_info: Account<'info, UserInfo>,

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

    #[account(mut, address = pool.vault @ ErrorCode::InvalidVault)]
    pub vault: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        token::mint = staked_mint,
        token::authority = owner,
        token::token_program = token_program,
    )]
    pub owner_token: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,
}

pub fn harvest(ctx: Context<Harvest>) -> Result<()> {
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

    let settlement = RewardLedger::new(&mut ctx.accounts.pool).harvest(
        &mut ctx.accounts.user_info,
        now,
        &mut assets,
    )?;
    ensure_principal_covered(&mut ctx.accounts.vault, &ctx.accounts.pool)?;

    let user_info = &ctx.accounts.user_info;
    msg!("Harvested {}", settlement.reward_paid);

    emit!(Harvested {
        user: user_info.owner,
        reward_paid: settlement.reward_paid,
        total_harvested: user_info.total_harvested,
        acc_reward_per_share: ctx.accounts.pool.acc_reward_per_share,
    });
    Ok(())
}
