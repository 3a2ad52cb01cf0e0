use crate::farm::{self, BlockSource};
use crate::states::*;
use crate::{REWARD_VAULT_SEED, STAKE_VAULT_SEED};
use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};
use std::ops::DerefMut;

/// Accounts context for `initialize_pool`.
///
/// Creates the singleton pool account and the two program-owned vaults. The
/// stake and reward mints may be the same token; principal and rewards still
/// live in separate vaults.
#[derive(Accounts)]
pub struct InitializePool<'info> {
    /// Pool owner; pays for every account created here.
    #[account(mut)]
    pub owner: Signer<'info>,

    /// Vault authority PDA.
    ///
    /// CHECK: PDA derivation enforced via seeds. Used only as token authority.
    #[account(
        seeds = [crate::AUTH_SEED.as_bytes()],
        bump,
    )]
    pub authority: UncheckedAccount<'info>,

    #[account(
        init,
        seeds = [POOL_STATE_SEED.as_bytes()],
        bump,
        payer = owner,
        space = PoolState::LEN
    )]
    pub pool_state: Account<'info, PoolState>,

    /// Token users stake.
    pub stake_mint: Box<InterfaceAccount<'info, Mint>>,

    /// Token paid out as reward.
    pub reward_mint: Box<InterfaceAccount<'info, Mint>>,

    /// Custody of staked principal and collected fees.
    #[account(
        init,
        seeds = [STAKE_VAULT_SEED.as_bytes()],
        bump,
        payer = owner,
        token::mint = stake_mint,
        token::authority = authority,
        token::token_program = token_program,
    )]
    pub stake_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Reward reserve; funded by plain token transfers into this account.
    #[account(
        init,
        seeds = [REWARD_VAULT_SEED.as_bytes()],
        bump,
        payer = owner,
        token::mint = reward_mint,
        token::authority = authority,
        token::token_program = token_program,
    )]
    pub reward_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,

    pub system_program: Program<'info, System>,
}

/// Creates the pool with the signer as owner. Accrual starts at the current slot.
///
/// # Errors
/// - `InvalidRewardRate`: `reward_per_block` outside `[min_reward_rate, max_reward_rate]`.
/// - `InvalidWithdrawalFee`: `withdrawal_fee_bps` above 10000.
pub fn initialize_pool(
    ctx: Context<InitializePool>,
    reward_per_block: u64,
    min_reward_rate: u64,
    max_reward_rate: u64,
    withdrawal_fee_bps: u16,
) -> Result<()> {
    let config = PoolConfig {
        reward_per_block,
        min_reward_rate,
        max_reward_rate,
        withdrawal_fee_bps,
    };
    let start_block = Clock::get()?.current_block()?;

    let pool_state = ctx.accounts.pool_state.deref_mut();
    pool_state.bump = ctx.bumps.pool_state;
    pool_state.stake_mint = ctx.accounts.stake_mint.key();
    pool_state.reward_mint = ctx.accounts.reward_mint.key();
    pool_state.stake_vault = ctx.accounts.stake_vault.key();
    pool_state.reward_vault = ctx.accounts.reward_vault.key();

    let event = farm::initialize_pool(pool_state, ctx.accounts.owner.key(), &config, start_block)?;
    msg!("Farming pool initialized at block {}", start_block);
    event.emit();
    Ok(())
}
