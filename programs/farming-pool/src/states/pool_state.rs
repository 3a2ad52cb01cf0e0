use crate::error::ErrorCode;
use crate::math::{is_valid_fee_bps, pending_reward, RewardIndex};
use crate::states::UserInfo;
use anchor_lang::prelude::*;

//
// ──────────────────────────────────────────────────────────────────────────────
// PoolState Account
// ──────────────────────────────────────────────────────────────────────────────
//

/// PDA seed string used to derive the singleton pool account.
pub const POOL_STATE_SEED: &str = "pool_state";

/// Global accounting for the farm.
///
/// Written once by `initialize_pool`, then only through the reward ledger
/// (`crate::farm::Farm`), which brings `acc_reward_per_share` current before any
/// per-user change is applied.
#[account]
#[derive(Default, Debug, PartialEq)]
pub struct PoolState {
    /// PDA bump for this account.
    pub bump: u8,

    /// Address allowed to change rates and fees and collect fees.
    pub owner: Pubkey,

    /// Mint of the token users stake.
    pub stake_mint: Pubkey,

    /// Mint of the token paid as reward.
    pub reward_mint: Pubkey,

    /// Program-owned vault holding staked principal and collected fees.
    pub stake_vault: Pubkey,

    /// Program-owned vault holding the reward reserve.
    pub reward_vault: Pubkey,

    /// Sum of every `UserInfo::amount`.
    pub total_staked: u64,

    /// Current emission per block; always within `[min_reward_rate, max_reward_rate]`.
    pub reward_per_block: u64,

    pub min_reward_rate: u64,

    pub max_reward_rate: u64,

    /// Cumulative reward per unit of stake since inception, scaled by `PRECISION`.
    pub acc_reward_per_share: u128,

    /// Block at which `acc_reward_per_share` was last brought current.
    pub last_reward_block: u64,

    /// Fee taken on principal withdrawal, in basis points.
    pub withdrawal_fee_bps: u16,

    /// Fees owed to the owner, held in the stake vault.
    pub collected_fees: u64,
}

/// Mandatory construction parameters of a pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PoolConfig {
    pub reward_per_block: u64,
    pub min_reward_rate: u64,
    pub max_reward_rate: u64,
    pub withdrawal_fee_bps: u16,
}

impl PoolConfig {
    /// Rate must sit inside its bounds and the fee must not exceed 100%.
    pub fn validate(&self) -> Result<()> {
        require!(
            self.min_reward_rate <= self.reward_per_block
                && self.reward_per_block <= self.max_reward_rate,
            ErrorCode::InvalidRewardRate
        );
        require!(
            is_valid_fee_bps(self.withdrawal_fee_bps),
            ErrorCode::InvalidWithdrawalFee
        );
        Ok(())
    }
}

impl PoolState {
    /// Fixed serialized size of the account.
    ///
    /// Breakdown:
    /// - 8: account discriminator
    /// - 1: bump
    /// - 32 * 5: five Pubkeys
    /// - 8 * 4: total staked, rate and its bounds
    /// - 16: reward index
    /// - 8: last reward block
    /// - 2: fee bps
    /// - 8: collected fees
    pub const LEN: usize = 8 + 1 + 32 * 5 + 8 * 4 + 16 + 8 + 2 + 8;

    pub fn reward_index(&self) -> RewardIndex {
        RewardIndex::from_raw(self.acc_reward_per_share)
    }

    pub fn is_valid_reward_rate(&self, rate: u64) -> bool {
        self.min_reward_rate <= rate && rate <= self.max_reward_rate
    }

    /// Writes the construction parameters and starts accrual at `start_block`.
    ///
    /// Mints and vaults are bound separately by the caller.
    pub fn configure(&mut self, owner: Pubkey, config: &PoolConfig, start_block: u64) -> Result<()> {
        config.validate()?;
        self.owner = owner;
        self.reward_per_block = config.reward_per_block;
        self.min_reward_rate = config.min_reward_rate;
        self.max_reward_rate = config.max_reward_rate;
        self.withdrawal_fee_bps = config.withdrawal_fee_bps;
        self.total_staked = 0;
        self.acc_reward_per_share = 0;
        self.collected_fees = 0;
        self.last_reward_block = start_block;
        Ok(())
    }

    /// Reward index as it would stand at `current_block`, without committing it.
    pub fn projected_index(&self, current_block: u64) -> Result<RewardIndex> {
        let elapsed = current_block
            .checked_sub(self.last_reward_block)
            .ok_or(error!(ErrorCode::BlockHeightRegressed))?;
        self.reward_index()
            .accrue(elapsed, self.reward_per_block, self.total_staked)
            .ok_or(error!(ErrorCode::MathOverflow))
    }

    /// Brings `acc_reward_per_share` current at `current_block`.
    ///
    /// While nothing is staked only the checkpoint moves, so emission for
    /// those blocks is never credited to anyone.
    pub fn update(&mut self, current_block: u64) -> Result<()> {
        let index = self.projected_index(current_block)?;
        self.acc_reward_per_share = index.raw();
        self.last_reward_block = current_block;
        Ok(())
    }

    /// Reward `amount` of stake is entitled to at the current index.
    pub fn reward_debt_for(&self, amount: u64) -> Result<u128> {
        self.reward_index()
            .entitlement(amount)
            .ok_or(error!(ErrorCode::MathOverflow))
    }

    /// Reward settled so far for `user` against the committed index.
    pub fn settled_reward(&self, user: &UserInfo) -> Result<u64> {
        pending_reward(user.amount, self.reward_index(), user.reward_debt)
            .ok_or(error!(ErrorCode::MathOverflow))
    }

    /// Pending reward for `user` as of `current_block`. Read-only.
    pub fn pending_rewards(&self, user: &UserInfo, current_block: u64) -> Result<u64> {
        let index = self.projected_index(current_block)?;
        pending_reward(user.amount, index, user.reward_debt)
            .ok_or(error!(ErrorCode::MathOverflow))
    }
}
