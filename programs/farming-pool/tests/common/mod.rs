#![allow(dead_code)]

use anchor_lang::prelude::Pubkey;
use farming_pool::farm::simulator::{FarmSimulator, MemoryLedger};
use farming_pool::farm::Vault;
use farming_pool::states::{FarmEvent, PoolConfig};

/// One whole token at 9 decimals.
pub const ONE: u64 = 1_000_000_000;

pub const START_BLOCK: u64 = 1_000;

pub const REWARD_RESERVE: u64 = 1_000_000 * ONE;

pub fn config() -> PoolConfig {
    PoolConfig {
        reward_per_block: 100 * ONE,
        min_reward_rate: 50 * ONE,
        max_reward_rate: 200 * ONE,
        withdrawal_fee_bps: 250,
    }
}

/// Pool with a funded reward vault and distinct stake/reward tokens.
pub fn setup() -> (FarmSimulator, Pubkey) {
    setup_with(MemoryLedger::new(), REWARD_RESERVE)
}

pub fn setup_with(mut ledger: MemoryLedger, reward_reserve: u64) -> (FarmSimulator, Pubkey) {
    let owner = Pubkey::new_unique();
    ledger.fund_vault(Vault::Reward, reward_reserve);
    let sim = FarmSimulator::new(owner, config(), ledger, START_BLOCK).unwrap();
    (sim, owner)
}

/// New address holding `balance` stake tokens, all approved for the pool.
pub fn staker(sim: &mut FarmSimulator, balance: u64) -> Pubkey {
    let user = Pubkey::new_unique();
    sim.ledger_mut().mint_to(&user, Vault::Stake, balance);
    sim.ledger_mut().approve(&user, balance);
    user
}

/// Sum of every reward paid out so far.
pub fn rewards_paid(sim: &FarmSimulator) -> u64 {
    sim.events()
        .iter()
        .map(|event| match event {
            FarmEvent::RewardsHarvested(e) => e.reward,
            _ => 0,
        })
        .sum()
}
