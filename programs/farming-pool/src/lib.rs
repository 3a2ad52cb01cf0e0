use anchor_lang::prelude::*;

declare_id!("FarmPoo1sTake5s6Yq2dD2JqXkFvGm1p3tAq6mC9hR7d");

pub const AUTH_SEED: &str = "farm_vault_auth";
pub const STAKE_VAULT_SEED: &str = "stake_vault";
pub const REWARD_VAULT_SEED: &str = "reward_vault";

/// Scale applied to `acc_reward_per_share`.
pub const PRECISION: u128 = 1_000_000_000_000;

pub mod error;
pub mod farm;
pub mod instructions;
pub mod math;
pub mod states;
pub mod utils;

use instructions::*;

#[program]
pub mod farming_pool {

    use super::*;

    pub fn initialize_pool(
        ctx: Context<InitializePool>,
        reward_per_block: u64,
        min_reward_rate: u64,
        max_reward_rate: u64,
        withdrawal_fee_bps: u16,
    ) -> Result<()> {
        instructions::initialize_pool(
            ctx,
            reward_per_block,
            min_reward_rate,
            max_reward_rate,
            withdrawal_fee_bps,
        )
    }

    pub fn deposit(ctx: Context<Deposit>, amount: u64) -> Result<()> {
        instructions::deposit(ctx, amount)
    }

    pub fn withdraw(ctx: Context<UserAction>, amount: u64) -> Result<()> {
        instructions::withdraw(ctx, amount)
    }

    pub fn harvest(ctx: Context<UserAction>) -> Result<()> {
        instructions::harvest(ctx)
    }

    pub fn emergency_withdraw(ctx: Context<UserAction>) -> Result<()> {
        instructions::emergency_withdraw(ctx)
    }

    pub fn pending_rewards(ctx: Context<PendingRewards>) -> Result<u64> {
        instructions::pending_rewards(ctx)
    }

    pub fn set_reward_per_block(ctx: Context<UpdateConfig>, rate: u64) -> Result<()> {
        instructions::set_reward_per_block(ctx, rate)
    }

    pub fn set_withdrawal_fee(ctx: Context<UpdateConfig>, withdrawal_fee_bps: u16) -> Result<()> {
        instructions::set_withdrawal_fee(ctx, withdrawal_fee_bps)
    }

    pub fn transfer_ownership(ctx: Context<UpdateConfig>, new_owner: Pubkey) -> Result<()> {
        instructions::transfer_ownership(ctx, new_owner)
    }

    pub fn withdraw_fees(ctx: Context<WithdrawFees>) -> Result<()> {
        instructions::withdraw_fees(ctx)
    }
}
