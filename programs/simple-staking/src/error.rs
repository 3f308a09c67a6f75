use anchor_lang::prelude::*;

#[error_code]
pub enum ErrorCode {
    #[msg("Amount must be greater than zero")]
    InvalidAmount,

    #[msg("Unstake amount exceeds the staked balance")]
    InsufficientStake,

    #[msg("Asset transfer failed")]
    TransferFailed,

    #[msg("Reward payout would consume staked principal")]
    InsufficientRewardReserve,

    #[msg("Math operation overflowed or underflowed")]
    MathOverflow,

    #[msg("Invalid timestamp conversion")]
    InvalidTimestamp,

    #[msg("Signer is not the owner of this account")]
    InvalidOwner,

    #[msg("Invalid vault account")]
    InvalidVault,

    #[msg("Invalid staked mint account")]
    InvalidMint,
}
