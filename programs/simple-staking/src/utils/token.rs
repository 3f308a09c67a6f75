use crate::{error::ErrorCode, ledger::AssetTransfer, states::Pool};
use anchor_lang::prelude::*;
use anchor_spl::token_interface::{self, TokenAccount, TransferChecked};

/// Moves `amount` from a user-owned token account into a program vault.
/// The user signs the CPI directly.
pub fn transfer_from_user_to_pool_vault<'a>(
    authority: AccountInfo<'a>,
    from: AccountInfo<'a>,
    to_vault: AccountInfo<'a>,
    mint: AccountInfo<'a>,
    token_program: AccountInfo<'a>,
    amount: u64,
    mint_decimals: u8,
) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }
    token_interface::transfer_checked(
        CpiContext::new(
            token_program,
            TransferChecked {
                from,
                to: to_vault,
                authority,
                mint,
            },
        ),
        amount,
        mint_decimals,
    )
}

/// Moves `amount` out of a program vault; the vault authority PDA signs
/// with `signer_seeds`.
pub fn transfer_from_pool_vault_to_user<'a>(
    authority: AccountInfo<'a>,
    from_vault: AccountInfo<'a>,
    to: AccountInfo<'a>,
    mint: AccountInfo<'a>,
    token_program: AccountInfo<'a>,
    amount: u64,
    mint_decimals: u8,
    signer_seeds: &[&[&[u8]]],
) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }
    token_interface::transfer_checked(
        CpiContext::new_with_signer(
            token_program,
            TransferChecked {
                from: from_vault,
                to,
                authority,
                mint,
            },
            signer_seeds,
        ),
        amount,
        mint_decimals,
    )
}

/// [`AssetTransfer`] backed by the pool vault and one user's token account.
///
/// Each instruction builds one of these for its signer. `pull` and `push`
/// only ever move tokens between `owner_token` and `vault`, so any other
/// address is rejected. `vault_balance` mirrors the vault's token amount
/// across the CPIs of a single instruction.
pub struct VaultTransfer<'info> {
    pub owner: AccountInfo<'info>,
    pub owner_token: AccountInfo<'info>,
    pub vault: AccountInfo<'info>,
    pub vault_balance: u64,
    pub authority: AccountInfo<'info>,
    pub authority_bump: u8,
    pub mint: AccountInfo<'info>,
    pub mint_decimals: u8,
    pub token_program: AccountInfo<'info>,
}

impl<'info> AssetTransfer for VaultTransfer<'info> {
    fn pull(&mut self, from: &Pubkey, amount: u64) -> Result<()> {
        require_keys_eq!(*from, *self.owner.key, ErrorCode::InvalidOwner);
        transfer_from_user_to_pool_vault(
            self.owner.clone(),
            self.owner_token.clone(),
            self.vault.clone(),
            self.mint.clone(),
            self.token_program.clone(),
            amount,
            self.mint_decimals,
        )
        .map_err(|_| error!(ErrorCode::TransferFailed))?;
        self.vault_balance = self
            .vault_balance
            .checked_add(amount)
            .ok_or(ErrorCode::MathOverflow)?;
        Ok(())
    }

    fn push(&mut self, to: &Pubkey, amount: u64) -> Result<()> {
        require_keys_eq!(*to, *self.owner.key, ErrorCode::InvalidOwner);
        require_gte!(self.vault_balance, amount, ErrorCode::TransferFailed);
        transfer_from_pool_vault_to_user(
            self.authority.clone(),
            self.vault.clone(),
            self.owner_token.clone(),
            self.mint.clone(),
            self.token_program.clone(),
            amount,
            self.mint_decimals,
            &[&[crate::AUTH_SEED.as_bytes(), &[self.authority_bump]]],
        )
        .map_err(|_| error!(ErrorCode::TransferFailed))?;
        self.vault_balance = self
            .vault_balance
            .checked_sub(amount)
            .ok_or(ErrorCode::MathOverflow)?;
        Ok(())
    }
}

/// Re-reads the vault after the instruction's CPIs and checks that custody
/// still covers every staker's principal, i.e. rewards were paid out of the
/// funded reserve only.
pub fn ensure_principal_covered(
    vault: &mut InterfaceAccount<'_, TokenAccount>,
    pool: &Pool,
) -> Result<()> {
    vault.reload()?;
    require_gte!(
        vault.amount,
        pool.total_staked,
        ErrorCode::InsufficientRewardReserve
    );
    Ok(())
}
