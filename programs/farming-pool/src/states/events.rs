use anchor_lang::prelude::*;

//
// ──────────────────────────────────────────────────────────────────────────────
// Events: Emitted for off-chain indexers/clients to track pool state changes
// ──────────────────────────────────────────────────────────────────────────────
//

/// Emitted once when the pool is created.
#[event]
#[derive(Clone, Debug, PartialEq)]
pub struct PoolInitialized {
    pub owner: Pubkey,
    pub stake_mint: Pubkey,
    pub reward_mint: Pubkey,
    pub reward_per_block: u64,
    pub min_reward_rate: u64,
    pub max_reward_rate: u64,
    pub withdrawal_fee_bps: u16,
    /// Block from which rewards start accruing.
    pub start_block: u64,
}

/// Emitted when stake is added (including zero-amount deposits used to harvest).
#[event]
#[derive(Clone, Debug, PartialEq)]
pub struct Deposited {
    pub user: Pubkey,
    /// Principal pulled from the user in this call.
    pub amount: u64,
    /// User's staked principal after the deposit.
    pub user_amount: u64,
    /// Pool-wide stake after the deposit.
    pub total_staked: u64,
}

/// Emitted when principal leaves the pool through `withdraw`.
#[event]
#[derive(Clone, Debug, PartialEq)]
pub struct Withdrawn {
    pub user: Pubkey,
    /// Principal removed from the user's stake.
    pub amount: u64,
    /// Portion retained as withdrawal fee.
    pub fee: u64,
    /// Portion returned to the user (`amount - fee`).
    pub net_amount: u64,
    pub total_staked: u64,
}

/// Emitted whenever a non-zero reward is paid out.
#[event]
#[derive(Clone, Debug, PartialEq)]
pub struct RewardsHarvested {
    pub user: Pubkey,
    pub reward: u64,
}

/// Emitted on the forfeiture-based exit.
#[event]
#[derive(Clone, Debug, PartialEq)]
pub struct EmergencyWithdrawn {
    pub user: Pubkey,
    /// Full principal returned, no fee applied.
    pub amount: u64,
    /// Pending reward given up; it stays in the reward vault.
    pub forfeited_reward: u64,
}

#[event]
#[derive(Clone, Debug, PartialEq)]
pub struct RewardRateUpdated {
    pub old_rate: u64,
    pub new_rate: u64,
    /// Block up to which the old rate was applied.
    pub effective_block: u64,
}

#[event]
#[derive(Clone, Debug, PartialEq)]
pub struct WithdrawalFeeUpdated {
    pub old_fee_bps: u16,
    pub new_fee_bps: u16,
}

#[event]
#[derive(Clone, Debug, PartialEq)]
pub struct OwnershipTransferred {
    pub previous_owner: Pubkey,
    pub new_owner: Pubkey,
}

#[event]
#[derive(Clone, Debug, PartialEq)]
pub struct FeesWithdrawn {
    pub owner: Pubkey,
    pub amount: u64,
}

/// One entry of the pool's append-only event log.
///
/// Ledger operations return these instead of logging directly, so the
/// on-chain handlers can `emit!` them and off-chain hosts can record them.
#[derive(Clone, Debug, PartialEq)]
pub enum FarmEvent {
    PoolInitialized(PoolInitialized),
    Deposited(Deposited),
    Withdrawn(Withdrawn),
    RewardsHarvested(RewardsHarvested),
    EmergencyWithdrawn(EmergencyWithdrawn),
    RewardRateUpdated(RewardRateUpdated),
    WithdrawalFeeUpdated(WithdrawalFeeUpdated),
    OwnershipTransferred(OwnershipTransferred),
    FeesWithdrawn(FeesWithdrawn),
}

impl FarmEvent {
    /// Writes the event to the program log as Anchor event data.
    pub fn emit(self) {
        match self {
            FarmEvent::PoolInitialized(event) => emit!(event),
            FarmEvent::Deposited(event) => emit!(event),
            FarmEvent::Withdrawn(event) => emit!(event),
            FarmEvent::RewardsHarvested(event) => emit!(event),
            FarmEvent::EmergencyWithdrawn(event) => emit!(event),
            FarmEvent::RewardRateUpdated(event) => emit!(event),
            FarmEvent::WithdrawalFeeUpdated(event) => emit!(event),
            FarmEvent::OwnershipTransferred(event) => emit!(event),
            FarmEvent::FeesWithdrawn(event) => emit!(event),
        }
    }
}
