//! Time-weighted reward ledger.
//!
//! Every mutating operation runs the same pipeline:
//! `accrue -> settle_pending -> apply_delta -> reset_debt`, with token
//! movement delegated to an [`AssetTransfer`]. Changes are staged on copies
//! of the pool and user records and written back only after every transfer
//! of the operation has succeeded.

pub mod calculator;
pub use calculator::*;

pub mod transfer;
pub use transfer::*;

use crate::{
    error::ErrorCode,
    states::{Pool, RewardSettlement, UserInfo},
};
use anchor_lang::prelude::*;

/// Reward movement caused by a single ledger operation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Settlement {
    /// Reward accrued since the user's previous interaction.
    pub reward_settled: u64,
    /// Reward transferred to the user by this operation.
    pub reward_paid: u64,
}

/// Balance change applied to a staker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum StakeDelta {
    Deposit(u64),
    Withdraw(u64),
}

/// Accounting engine over a single [`Pool`].
///
/// Callers serialize access: the ledger holds the only mutable reference to
/// the pool for the duration of an operation.
pub struct RewardLedger<'a> {
    pool: &'a mut Pool,
}

impl<'a> RewardLedger<'a> {
    pub fn new(pool: &'a mut Pool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &Pool {
        &*self.pool
    }

    /// Reward `user` could harvest at `now`. Read-only.
    ///
    /// Equals what [`RewardLedger::harvest`] would pay at the same instant.
    pub fn pending_reward(&self, user: &UserInfo, now: u64) -> Result<u64> {
        self.pool.pending_reward(user, now)
    }

    /// Pulls `amount` from `user.owner` into custody and adds it to their stake.
    pub fn stake<T: AssetTransfer>(
        &mut self,
        user: &mut UserInfo,
        amount: u64,
        now: u64,
        assets: &mut T,
    ) -> Result<Settlement> {
        require_gt!(amount, 0, ErrorCode::InvalidAmount);

        let mut pool = self.pool.clone();
        let mut staged = user.clone();

        pool.accrue(now)?;
        let reward_settled = settle_pending(&pool, &mut staged)?;
        assets.pull(&staged.owner, amount)?;
        apply_delta(&mut pool, &mut staged, StakeDelta::Deposit(amount))?;
        let reward_paid = match pool.settlement {
            RewardSettlement::Immediate => pay_unclaimed(&mut pool, &mut staged, assets)?,
            RewardSettlement::Deferred => 0,
        };
        reset_debt(&pool, &mut staged)?;

        self.commit(pool, staged, user);
        Ok(Settlement {
            reward_settled,
            reward_paid,
        })
    }

    /// Removes `amount` from the user's stake and returns it from custody.
    pub fn unstake<T: AssetTransfer>(
        &mut self,
        user: &mut UserInfo,
        amount: u64,
        now: u64,
        assets: &mut T,
    ) -> Result<Settlement> {
        require_gt!(amount, 0, ErrorCode::InvalidAmount);
        require_gte!(user.amount, amount, ErrorCode::InsufficientStake);

        let mut pool = self.pool.clone();
        let mut staged = user.clone();

        pool.accrue(now)?;
        let reward_settled = settle_pending(&pool, &mut staged)?;
        let reward_paid = match pool.settlement {
            RewardSettlement::Immediate => pay_unclaimed(&mut pool, &mut staged, assets)?,
            RewardSettlement::Deferred => 0,
        };
        apply_delta(&mut pool, &mut staged, StakeDelta::Withdraw(amount))?;
        assets.push(&staged.owner, amount)?;
        reset_debt(&pool, &mut staged)?;

        self.commit(pool, staged, user);
        Ok(Settlement {
            reward_settled,
            reward_paid,
        })
    }

    /// Pays out everything the user has accrued. Paying zero is not an error.
    pub fn harvest<T: AssetTransfer>(
        &mut self,
        user: &mut UserInfo,
        now: u64,
        assets: &mut T,
    ) -> Result<Settlement> {
        let mut pool = self.pool.clone();
        let mut staged = user.clone();

        pool.accrue(now)?;
        let reward_settled = settle_pending(&pool, &mut staged)?;
        let reward_paid = pay_unclaimed(&mut pool, &mut staged, assets)?;
        reset_debt(&pool, &mut staged)?;

        self.commit(pool, staged, user);
        Ok(Settlement {
            reward_settled,
            reward_paid,
        })
    }

    fn commit(&mut self, pool: Pool, staged: UserInfo, user: &mut UserInfo) {
        *self.pool = pool;
        *user = staged;
    }
}

/// Moves reward accrued since the last checkpoint into `unclaimed_reward`.
fn settle_pending(pool: &Pool, user: &mut UserInfo) -> Result<u64> {
    let accrued =
        RewardCalculator::pending_reward(user.amount, pool.acc_reward_per_share, user.reward_debt)
            .ok_or(ErrorCode::MathOverflow)?;
    user.unclaimed_reward = user.unclaimed_reward.saturating_add(accrued);
    Ok(accrued)
}

fn apply_delta(pool: &mut Pool, user: &mut UserInfo, delta: StakeDelta) -> Result<()> {
    match delta {
        StakeDelta::Deposit(amount) => {
            user.amount = user.amount.checked_add(amount).ok_or(ErrorCode::MathOverflow)?;
            pool.total_staked = pool
                .total_staked
                .checked_add(amount)
                .ok_or(ErrorCode::MathOverflow)?;
        }
        StakeDelta::Withdraw(amount) => {
            user.amount = user
                .amount
                .checked_sub(amount)
                .ok_or(ErrorCode::InsufficientStake)?;
            pool.total_staked = pool
                .total_staked
                .checked_sub(amount)
                .ok_or(ErrorCode::MathOverflow)?;
        }
    }
    Ok(())
}

/// Re-checkpoints the user against the current accumulator and balance.
fn reset_debt(pool: &Pool, user: &mut UserInfo) -> Result<()> {
    user.reward_debt =
        RewardCalculator::accumulated_reward(user.amount, pool.acc_reward_per_share)
            .ok_or(ErrorCode::MathOverflow)?;
    Ok(())
}

/// Transfers the user's whole `unclaimed_reward`, returning the amount paid.
fn pay_unclaimed<T: AssetTransfer>(
    pool: &mut Pool,
    user: &mut UserInfo,
    assets: &mut T,
) -> Result<u64> {
    let reward = user.unclaimed_reward;
    if reward == 0 {
        return Ok(0);
    }
    assets.push(&user.owner, reward)?;
    user.unclaimed_reward = 0;
    user.total_harvested = user
        .total_harvested
        .checked_add(reward)
        .ok_or(ErrorCode::MathOverflow)?;
    pool.total_reward_paid = pool
        .total_reward_paid
        .checked_add(reward)
        .ok_or(ErrorCode::MathOverflow)?;
    Ok(reward)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PRECISION;
    use anchor_lang::error::Error;
    use std::collections::HashMap;

    const START: u64 = 1_000_000;

    /// In-memory custody that records balances and can be told to fail.
    #[derive(Default)]
    struct Bank {
        balances: HashMap<Pubkey, u64>,
        custody: u64,
        fail_pulls: bool,
        fail_pushes: bool,
    }

    impl Bank {
        fn balance(&self, who: &Pubkey) -> u64 {
            self.balances.get(who).copied().unwrap_or_default()
        }
    }

    impl AssetTransfer for Bank {
        fn pull(&mut self, from: &Pubkey, amount: u64) -> Result<()> {
            let balance = self.balances.entry(*from).or_default();
            if self.fail_pulls || *balance < amount {
                return Err(error!(ErrorCode::TransferFailed));
            }
            *balance -= amount;
            self.custody += amount;
            Ok(())
        }

        fn push(&mut self, to: &Pubkey, amount: u64) -> Result<()> {
            if self.fail_pushes || self.custody < amount {
                return Err(error!(ErrorCode::TransferFailed));
            }
            self.custody -= amount;
            *self.balances.entry(*to).or_default() += amount;
            Ok(())
        }
    }

    fn pool(settlement: RewardSettlement) -> Pool {
        Pool {
            reward_per_second: 1,
            start_time: START,
            last_accrual_time: START,
            settlement,
            ..Pool::default()
        }
    }

    fn user(bank: &mut Bank, funds: u64) -> UserInfo {
        let owner = Pubkey::new_unique();
        bank.balances.insert(owner, funds);
        UserInfo {
            owner,
            ..UserInfo::default()
        }
    }

    fn funded_bank() -> Bank {
        Bank {
            custody: 1_000_000,
            ..Bank::default()
        }
    }

    #[test]
    fn stake_moves_principal_and_updates_totals() {
        let mut bank = funded_bank();
        let mut pool = pool(RewardSettlement::Deferred);
        let mut alice = user(&mut bank, 5_000);

        let settlement = RewardLedger::new(&mut pool)
            .stake(&mut alice, 1_000, START - 10, &mut bank)
            .unwrap();

        assert_eq!(settlement, Settlement::default());
        assert_eq!(alice.amount, 1_000);
        assert_eq!(alice.reward_debt, 0);
        assert_eq!(pool.total_staked, 1_000);
        assert_eq!(bank.balance(&alice.owner), 4_000);
    }

    #[test]
    fn zero_amounts_are_rejected() {
        let mut bank = funded_bank();
        let mut pool = pool(RewardSettlement::Deferred);
        let mut alice = user(&mut bank, 5_000);
        let mut ledger = RewardLedger::new(&mut pool);

        let err = ledger.stake(&mut alice, 0, START, &mut bank).unwrap_err();
        assert_eq!(err, Error::from(ErrorCode::InvalidAmount));
        let err = ledger.unstake(&mut alice, 0, START, &mut bank).unwrap_err();
        assert_eq!(err, Error::from(ErrorCode::InvalidAmount));
    }

    #[test]
    fn unstake_more_than_staked_is_rejected() {
        let mut bank = funded_bank();
        let mut pool = pool(RewardSettlement::Deferred);
        let mut alice = user(&mut bank, 5_000);
        let mut ledger = RewardLedger::new(&mut pool);
        ledger.stake(&mut alice, 100, START, &mut bank).unwrap();

        let before = alice.clone();
        let err = ledger
            .unstake(&mut alice, 101, START + 5, &mut bank)
            .unwrap_err();
        assert_eq!(err, Error::from(ErrorCode::InsufficientStake));
        assert_eq!(alice.amount, before.amount);
        assert_eq!(ledger.pool().last_accrual_time, START);
    }

    #[test]
    fn failed_pull_leaves_state_untouched() {
        let mut bank = funded_bank();
        let mut pool = pool(RewardSettlement::Deferred);
        let mut alice = user(&mut bank, 5_000);
        RewardLedger::new(&mut pool)
            .stake(&mut alice, 1_000, START, &mut bank)
            .unwrap();

        bank.fail_pulls = true;
        let pool_before = pool.clone();
        let alice_before = alice.clone();
        let err = RewardLedger::new(&mut pool)
            .stake(&mut alice, 500, START + 100, &mut bank)
            .unwrap_err();

        assert_eq!(err, Error::from(ErrorCode::TransferFailed));
        assert_eq!(pool.acc_reward_per_share, pool_before.acc_reward_per_share);
        assert_eq!(pool.last_accrual_time, pool_before.last_accrual_time);
        assert_eq!(pool.total_staked, pool_before.total_staked);
        assert_eq!(alice.amount, alice_before.amount);
        assert_eq!(alice.unclaimed_reward, alice_before.unclaimed_reward);
        assert_eq!(alice.reward_debt, alice_before.reward_debt);
    }

    #[test]
    fn failed_reward_push_leaves_state_untouched() {
        let mut bank = funded_bank();
        let mut pool = pool(RewardSettlement::Deferred);
        let mut alice = user(&mut bank, 5_000);
        RewardLedger::new(&mut pool)
            .stake(&mut alice, 1_000, START, &mut bank)
            .unwrap();

        bank.fail_pushes = true;
        let err = RewardLedger::new(&mut pool)
            .harvest(&mut alice, START + 50, &mut bank)
            .unwrap_err();

        assert_eq!(err, Error::from(ErrorCode::TransferFailed));
        assert_eq!(pool.acc_reward_per_share, 0);
        assert_eq!(pool.last_accrual_time, START);
        assert_eq!(alice.unclaimed_reward, 0);
        assert_eq!(alice.total_harvested, 0);
    }

    #[test]
    fn deferred_settlement_keeps_reward_across_balance_changes() {
        let mut bank = funded_bank();
        let mut pool = pool(RewardSettlement::Deferred);
        let mut alice = user(&mut bank, 5_000);
        let mut ledger = RewardLedger::new(&mut pool);

        ledger.stake(&mut alice, 1_000, START, &mut bank).unwrap();
        let settlement = ledger.stake(&mut alice, 1_000, START + 10, &mut bank).unwrap();
        assert_eq!(settlement.reward_settled, 10);
        assert_eq!(settlement.reward_paid, 0);
        assert_eq!(alice.unclaimed_reward, 10);

        let settlement = ledger.unstake(&mut alice, 2_000, START + 20, &mut bank).unwrap();
        assert_eq!(settlement.reward_settled, 10);
        assert_eq!(alice.amount, 0);
        assert_eq!(alice.unclaimed_reward, 20);
        assert_eq!(ledger.pending_reward(&alice, START + 100).unwrap(), 20);

        let settlement = ledger.harvest(&mut alice, START + 100, &mut bank).unwrap();
        assert_eq!(settlement.reward_paid, 20);
        assert_eq!(bank.balance(&alice.owner), 5_020);
        assert_eq!(ledger.pool().total_reward_paid, 20);
    }

    #[test]
    fn immediate_settlement_pays_on_top_up_and_withdrawal() {
        let mut bank = funded_bank();
        let mut pool = pool(RewardSettlement::Immediate);
        let mut alice = user(&mut bank, 5_000);
        let mut ledger = RewardLedger::new(&mut pool);

        ledger.stake(&mut alice, 1_000, START, &mut bank).unwrap();
        let settlement = ledger.stake(&mut alice, 1_000, START + 10, &mut bank).unwrap();
        assert_eq!(settlement.reward_paid, 10);
        assert_eq!(alice.unclaimed_reward, 0);
        assert_eq!(bank.balance(&alice.owner), 3_010);

        let settlement = ledger.unstake(&mut alice, 500, START + 20, &mut bank).unwrap();
        assert_eq!(settlement.reward_paid, 10);
        assert_eq!(alice.amount, 1_500);
        assert_eq!(bank.balance(&alice.owner), 3_520);
        assert_eq!(alice.total_harvested, 20);
        assert_eq!(ledger.pending_reward(&alice, START + 20).unwrap(), 0);
    }

    #[test]
    fn harvest_twice_pays_once() {
        let mut bank = funded_bank();
        let mut pool = pool(RewardSettlement::Deferred);
        let mut alice = user(&mut bank, 5_000);
        let mut ledger = RewardLedger::new(&mut pool);
        ledger.stake(&mut alice, 100, START, &mut bank).unwrap();

        let first = ledger.harvest(&mut alice, START + 7, &mut bank).unwrap();
        let second = ledger.harvest(&mut alice, START + 7, &mut bank).unwrap();
        assert_eq!(first.reward_paid, 7);
        assert_eq!(second, Settlement::default());
    }

    #[test]
    fn harvest_with_nothing_staked_is_a_no_op() {
        let mut bank = funded_bank();
        let mut pool = pool(RewardSettlement::Deferred);
        let mut alice = user(&mut bank, 0);

        let settlement = RewardLedger::new(&mut pool)
            .harvest(&mut alice, START + 100, &mut bank)
            .unwrap();
        assert_eq!(settlement, Settlement::default());
        assert_eq!(alice.reward_debt, 0);
    }

    #[test]
    fn pending_is_zero_until_start() {
        let mut bank = funded_bank();
        let mut pool = pool(RewardSettlement::Deferred);
        let mut alice = user(&mut bank, 5_000);
        let mut ledger = RewardLedger::new(&mut pool);
        ledger.stake(&mut alice, 1_000, START - 500, &mut bank).unwrap();

        assert_eq!(ledger.pending_reward(&alice, START - 1).unwrap(), 0);
        assert_eq!(ledger.pending_reward(&alice, START).unwrap(), 0);
        assert_eq!(ledger.pending_reward(&alice, START + 1).unwrap(), 1);
    }

    #[test]
    fn pending_query_does_not_mutate_pool() {
        let mut bank = funded_bank();
        let mut pool = pool(RewardSettlement::Deferred);
        let mut alice = user(&mut bank, 5_000);
        let mut ledger = RewardLedger::new(&mut pool);
        ledger.stake(&mut alice, 1_000, START, &mut bank).unwrap();

        ledger.pending_reward(&alice, START + 1_000).unwrap();
        assert_eq!(ledger.pool().acc_reward_per_share, 0);
        assert_eq!(ledger.pool().last_accrual_time, START);
    }

    #[test]
    fn truncation_forfeits_at_most_one_unit() {
        let mut bank = funded_bank();
        let mut pool = pool(RewardSettlement::Deferred);
        let mut alice = user(&mut bank, 10);
        let mut bob = user(&mut bank, 10);
        let mut ledger = RewardLedger::new(&mut pool);
        ledger.stake(&mut alice, 1, START, &mut bank).unwrap();
        ledger.stake(&mut bob, 2, START, &mut bank).unwrap();

        // 10 reward over 3 units: 3.33.. and 6.66..
        let a = ledger.harvest(&mut alice, START + 10, &mut bank).unwrap();
        let b = ledger.harvest(&mut bob, START + 10, &mut bank).unwrap();
        assert_eq!(a.reward_paid, 3);
        assert_eq!(b.reward_paid, 6);
        assert_eq!(ledger.pool().acc_reward_per_share, 10 * PRECISION / 3);
    }

    #[test]
    fn oversized_reward_does_not_lock_principal() {
        let mut bank = funded_bank();
        let mut pool = Pool {
            reward_per_second: u64::MAX,
            ..pool(RewardSettlement::Deferred)
        };
        let mut alice = user(&mut bank, 10);
        let mut ledger = RewardLedger::new(&mut pool);
        ledger.stake(&mut alice, 1, START, &mut bank).unwrap();

        // 10 seconds at u64::MAX per second does not fit in a u64.
        let settlement = ledger
            .unstake(&mut alice, 1, START + 10, &mut bank)
            .unwrap();
        assert_eq!(settlement.reward_settled, u64::MAX);
        assert_eq!(alice.amount, 0);
        assert_eq!(alice.unclaimed_reward, u64::MAX);
        assert_eq!(bank.balance(&alice.owner), 10);
        assert_eq!(ledger.pending_reward(&alice, START + 20).unwrap(), u64::MAX);
    }
}
