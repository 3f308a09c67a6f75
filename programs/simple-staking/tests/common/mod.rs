#![allow(dead_code)]

use anchor_lang::prelude::*;
use simple_staking::{
    error::ErrorCode,
    ledger::AssetTransfer,
    states::{Pool, RewardSettlement, UserInfo},
};
use std::collections::HashMap;

/// Pool start used by every scenario.
pub const START: u64 = 1_000_000;

/// In-memory stand-in for the token program: wallet balances plus the pool's
/// custody. Funds never appear or vanish, so the sum of all balances is fixed.
#[derive(Debug, Default)]
pub struct Bank {
    pub balances: HashMap<Pubkey, u64>,
    pub custody: u64,
}

impl Bank {
    /// A bank whose custody already holds `reserve` of funded reward.
    pub fn with_reserve(reserve: u64) -> Self {
        Self {
            custody: reserve,
            ..Self::default()
        }
    }

    pub fn balance(&self, who: &Pubkey) -> u64 {
        self.balances.get(who).copied().unwrap_or_default()
    }

    /// Opens a wallet holding `funds` and returns an empty staker record for it.
    pub fn open(&mut self, funds: u64) -> UserInfo {
        let owner = Pubkey::new_unique();
        self.balances.insert(owner, funds);
        UserInfo {
            owner,
            ..UserInfo::default()
        }
    }
}

impl AssetTransfer for Bank {
    fn pull(&mut self, from: &Pubkey, amount: u64) -> Result<()> {
        let balance = self.balances.entry(*from).or_default();
        require_gte!(*balance, amount, ErrorCode::TransferFailed);
        *balance -= amount;
        self.custody += amount;
        Ok(())
    }

    fn push(&mut self, to: &Pubkey, amount: u64) -> Result<()> {
        require_gte!(self.custody, amount, ErrorCode::TransferFailed);
        self.custody -= amount;
        *self.balances.entry(*to).or_default() += amount;
        Ok(())
    }
}

pub fn pool(reward_per_second: u64, settlement: RewardSettlement) -> Pool {
    Pool {
        reward_per_second,
        start_time: START,
        last_accrual_time: START,
        settlement,
        ..Pool::default()
    }
}

/// Reward the pool emits over `[from, to]` while something is staked.
pub fn emitted(reward_per_second: u64, from: u64, to: u64) -> u64 {
    let from = from.max(START);
    let to = to.max(START);
    (to - from) * reward_per_second
}
