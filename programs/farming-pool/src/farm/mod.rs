//! Reward accrual ledger.
//!
//! [`Farm`] applies every pool operation against explicitly passed state:
//! the singleton [`PoolState`], the caller's [`UserInfo`], a [`TokenLedger`]
//! and the block height read from a [`BlockSource`].
//!
//! Each operation works on staged copies of the pool and user records:
//! 1) bring the staged pool current (`PoolState::update`),
//! 2) check every precondition, reward reserve included,
//! 3) move tokens, pulls into custody before payouts out of it,
//! 4) commit the staged records only once every transfer succeeded.
//!
//! A failed operation therefore leaves both records untouched. Token
//! movements already performed by a failing call are reverted by the host
//! (the runtime on-chain, [`simulator::FarmSimulator`] off-chain).

pub mod access;
pub mod clock;
pub mod token;

#[cfg(not(target_os = "solana"))]
pub mod simulator;

pub use access::*;
pub use clock::*;
pub use token::*;

use crate::error::ErrorCode;
use crate::math::FeeSplit;
use crate::states::*;
use anchor_lang::prelude::*;

/// Configures a blank pool and returns its creation event.
pub fn initialize_pool(
    pool: &mut PoolState,
    owner: Pubkey,
    config: &PoolConfig,
    start_block: u64,
) -> Result<FarmEvent> {
    pool.configure(owner, config, start_block)?;
    Ok(FarmEvent::PoolInitialized(PoolInitialized {
        owner,
        stake_mint: pool.stake_mint,
        reward_mint: pool.reward_mint,
        reward_per_block: pool.reward_per_block,
        min_reward_rate: pool.min_reward_rate,
        max_reward_rate: pool.max_reward_rate,
        withdrawal_fee_bps: pool.withdrawal_fee_bps,
        start_block,
    }))
}

pub struct Farm<'a, L: TokenLedger> {
    pool: &'a mut PoolState,
    ledger: &'a mut L,
    current_block: u64,
}

impl<'a, L: TokenLedger> Farm<'a, L> {
    pub fn new<B: BlockSource + ?Sized>(
        pool: &'a mut PoolState,
        ledger: &'a mut L,
        blocks: &B,
    ) -> Result<Self> {
        let current_block = blocks.current_block()?;
        Ok(Farm {
            pool,
            ledger,
            current_block,
        })
    }

    pub fn pool(&self) -> &PoolState {
        &*self.pool
    }

    pub fn current_block(&self) -> u64 {
        self.current_block
    }

    /// Reward `user` would receive if it harvested at the current block.
    pub fn pending_rewards(&self, user: &UserInfo) -> Result<u64> {
        self.pool.pending_rewards(user, self.current_block)
    }

    /// Stakes `amount` for `caller`, paying out any reward accrued so far.
    ///
    /// A blank record is bound to `caller`. `amount == 0` only harvests.
    pub fn deposit(
        &mut self,
        caller: &Pubkey,
        user: &mut UserInfo,
        amount: u64,
    ) -> Result<Vec<FarmEvent>> {
        if user.is_registered() {
            require_keys_eq!(user.owner, *caller, ErrorCode::Unauthorized);
        }

        let mut pool = self.pool.clone();
        let mut position = user.clone();
        position.owner = *caller;
        pool.update(self.current_block)?;

        let reward = pool.settled_reward(&position)?;
        self.ensure_reward_reserve(reward)?;

        if amount > 0 {
            self.ledger.transfer_from(caller, Vault::Stake, amount)?;
        }
        let mut events = Vec::with_capacity(2);
        if reward > 0 {
            self.ledger.transfer(Vault::Reward, caller, reward)?;
            events.push(harvested(caller, reward));
        }

        position.amount = position
            .amount
            .checked_add(amount)
            .ok_or(error!(ErrorCode::MathOverflow))?;
        pool.total_staked = pool
            .total_staked
            .checked_add(amount)
            .ok_or(error!(ErrorCode::MathOverflow))?;
        if amount > 0 {
            position.is_staking = true;
        }
        position.reward_debt = pool.reward_debt_for(position.amount)?;

        events.push(FarmEvent::Deposited(Deposited {
            user: *caller,
            amount,
            user_amount: position.amount,
            total_staked: pool.total_staked,
        }));
        *self.pool = pool;
        *user = position;
        Ok(events)
    }

    /// Unstakes `amount`, settling rewards and retaining the withdrawal fee.
    pub fn withdraw(
        &mut self,
        caller: &Pubkey,
        user: &mut UserInfo,
        amount: u64,
    ) -> Result<Vec<FarmEvent>> {
        ensure_owned_by(user, caller)?;
        require_gte!(user.amount, amount, ErrorCode::InsufficientStake);

        let mut pool = self.pool.clone();
        let mut position = user.clone();
        pool.update(self.current_block)?;

        let reward = pool.settled_reward(&position)?;
        self.ensure_reward_reserve(reward)?;

        let split = FeeSplit::for_withdrawal(amount, pool.withdrawal_fee_bps)
            .ok_or(error!(ErrorCode::MathOverflow))?;
        position.amount -= amount;
        pool.total_staked = pool
            .total_staked
            .checked_sub(amount)
            .ok_or(error!(ErrorCode::MathOverflow))?;
        pool.collected_fees = pool
            .collected_fees
            .checked_add(split.fee)
            .ok_or(error!(ErrorCode::MathOverflow))?;

        let mut events = Vec::with_capacity(2);
        if split.net_amount > 0 {
            self.ledger.transfer(Vault::Stake, caller, split.net_amount)?;
        }
        if reward > 0 {
            self.ledger.transfer(Vault::Reward, caller, reward)?;
            events.push(harvested(caller, reward));
        }

        position.is_staking = position.amount > 0;
        position.reward_debt = pool.reward_debt_for(position.amount)?;

        events.push(FarmEvent::Withdrawn(Withdrawn {
            user: *caller,
            amount,
            fee: split.fee,
            net_amount: split.net_amount,
            total_staked: pool.total_staked,
        }));
        *self.pool = pool;
        *user = position;
        Ok(events)
    }

    /// Pays out pending reward without touching the stake.
    ///
    /// Nothing pending is not an error: the call succeeds without a transfer.
    pub fn harvest(&mut self, caller: &Pubkey, user: &mut UserInfo) -> Result<Vec<FarmEvent>> {
        ensure_owned_by(user, caller)?;

        let mut pool = self.pool.clone();
        let mut position = user.clone();
        pool.update(self.current_block)?;

        let reward = pool.settled_reward(&position)?;
        self.ensure_reward_reserve(reward)?;

        let mut events = Vec::with_capacity(1);
        if reward > 0 {
            self.ledger.transfer(Vault::Reward, caller, reward)?;
            events.push(harvested(caller, reward));
        }
        position.reward_debt = pool.reward_debt_for(position.amount)?;

        *self.pool = pool;
        *user = position;
        Ok(events)
    }

    /// Returns the full principal without a fee and forfeits pending reward.
    ///
    /// The forfeited amount stays in the reward vault.
    pub fn emergency_withdraw(
        &mut self,
        caller: &Pubkey,
        user: &mut UserInfo,
    ) -> Result<Vec<FarmEvent>> {
        ensure_owned_by(user, caller)?;

        let mut pool = self.pool.clone();
        let mut position = user.clone();
        pool.update(self.current_block)?;

        // Reported only; never paid.
        let forfeited_reward = pool.settled_reward(&position).unwrap_or(0);
        let amount = position.amount;
        pool.total_staked = pool
            .total_staked
            .checked_sub(amount)
            .ok_or(error!(ErrorCode::MathOverflow))?;

        if amount > 0 {
            self.ledger.transfer(Vault::Stake, caller, amount)?;
        }

        position.amount = 0;
        position.reward_debt = 0;
        position.is_staking = false;

        *self.pool = pool;
        *user = position;
        Ok(vec![FarmEvent::EmergencyWithdrawn(EmergencyWithdrawn {
            user: *caller,
            amount,
            forfeited_reward,
        })])
    }

    /// Changes the emission rate. Blocks elapsed so far accrue at the old rate.
    pub fn set_reward_per_block(&mut self, cap: &OwnerCap, rate: u64) -> Result<Vec<FarmEvent>> {
        cap.check(&*self.pool)?;
        if !self.pool.is_valid_reward_rate(rate) {
            msg!(
                "Reward rate {} outside [{}, {}]",
                rate,
                self.pool.min_reward_rate,
                self.pool.max_reward_rate
            );
            return err!(ErrorCode::InvalidRewardRate);
        }

        let mut pool = self.pool.clone();
        pool.update(self.current_block)?;
        let old_rate = pool.reward_per_block;
        pool.reward_per_block = rate;

        *self.pool = pool;
        Ok(vec![FarmEvent::RewardRateUpdated(RewardRateUpdated {
            old_rate,
            new_rate: rate,
            effective_block: self.current_block,
        })])
    }

    /// Changes the fee applied to subsequent withdrawals.
    pub fn set_withdrawal_fee(
        &mut self,
        cap: &OwnerCap,
        withdrawal_fee_bps: u16,
    ) -> Result<Vec<FarmEvent>> {
        cap.check(&*self.pool)?;
        require!(
            crate::math::is_valid_fee_bps(withdrawal_fee_bps),
            ErrorCode::InvalidWithdrawalFee
        );

        let mut pool = self.pool.clone();
        pool.update(self.current_block)?;
        let old_fee_bps = pool.withdrawal_fee_bps;
        pool.withdrawal_fee_bps = withdrawal_fee_bps;

        *self.pool = pool;
        Ok(vec![FarmEvent::WithdrawalFeeUpdated(WithdrawalFeeUpdated {
            old_fee_bps,
            new_fee_bps: withdrawal_fee_bps,
        })])
    }

    /// Hands the owner role to `new_owner`. Outstanding capabilities stop working.
    pub fn transfer_ownership(
        &mut self,
        cap: &OwnerCap,
        new_owner: Pubkey,
    ) -> Result<Vec<FarmEvent>> {
        cap.check(&*self.pool)?;
        require_keys_neq!(new_owner, Pubkey::default(), ErrorCode::InvalidOwner);

        let mut pool = self.pool.clone();
        pool.update(self.current_block)?;
        let previous_owner = pool.owner;
        pool.owner = new_owner;

        *self.pool = pool;
        Ok(vec![FarmEvent::OwnershipTransferred(OwnershipTransferred {
            previous_owner,
            new_owner,
        })])
    }

    /// Sends every collected fee to the owner. No-op when nothing was collected.
    pub fn withdraw_fees(&mut self, cap: &OwnerCap) -> Result<Vec<FarmEvent>> {
        cap.check(&*self.pool)?;

        let mut pool = self.pool.clone();
        pool.update(self.current_block)?;
        let amount = pool.collected_fees;
        if amount == 0 {
            *self.pool = pool;
            return Ok(Vec::new());
        }

        self.ledger.transfer(Vault::Stake, cap.owner(), amount)?;
        pool.collected_fees = 0;

        *self.pool = pool;
        Ok(vec![FarmEvent::FeesWithdrawn(FeesWithdrawn {
            owner: *cap.owner(),
            amount,
        })])
    }

    fn ensure_reward_reserve(&self, reward: u64) -> Result<()> {
        if reward == 0 {
            return Ok(());
        }
        let reserve = self.ledger.balance_of(Vault::Reward);
        if reserve < reward {
            msg!("Reward reserve {} cannot cover {}", reserve, reward);
            return err!(ErrorCode::InsufficientRewardReserve);
        }
        Ok(())
    }
}

fn ensure_owned_by(user: &UserInfo, caller: &Pubkey) -> Result<()> {
    require!(user.is_registered(), ErrorCode::UserNotFound);
    require_keys_eq!(user.owner, *caller, ErrorCode::Unauthorized);
    Ok(())
}

fn harvested(caller: &Pubkey, reward: u64) -> FarmEvent {
    FarmEvent::RewardsHarvested(RewardsHarvested {
        user: *caller,
        reward,
    })
}
