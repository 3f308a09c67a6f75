use anchor_lang::prelude::*;

/// Custody capability the ledger delegates token movement to.
///
/// The ledger decides *what* moves; implementors decide *how*. A failed
/// movement must return an error (conventionally `ErrorCode::TransferFailed`),
/// in which case the ledger commits none of the operation's state changes.
pub trait AssetTransfer {
    /// Moves `amount` of the staked asset from `from` into custody.
    fn pull(&mut self, from: &Pubkey, amount: u64) -> Result<()>;

    /// Moves `amount` out of custody to `to`. Used for returning principal
    /// and for paying rewards.
    fn push(&mut self, to: &Pubkey, amount: u64) -> Result<()>;
}
