use crate::error::ErrorCode;
use crate::farm::{Farm, NoTransfers, OwnerCap};
use crate::states::*;
use anchor_lang::prelude::*;
use std::ops::DerefMut;

/// Accounts context for the owner-only configuration instructions.
///
/// # Accounts
/// - `owner`: must equal `pool_state.owner`.
/// - `pool_state`: pool whose rate, fee or owner is changed.
#[derive(Accounts)]
pub struct UpdateConfig<'info> {
    #[account(
        constraint = owner.key() == pool_state.owner @ ErrorCode::Unauthorized
    )]
    pub owner: Signer<'info>,

    #[account(
        mut,
        seeds = [POOL_STATE_SEED.as_bytes()],
        bump = pool_state.bump,
    )]
    pub pool_state: Account<'info, PoolState>,
}

fn apply(
    ctx: Context<UpdateConfig>,
    op: impl FnOnce(&mut Farm<'_, NoTransfers>, &OwnerCap) -> Result<Vec<FarmEvent>>,
) -> Result<()> {
    let cap = OwnerCap::authorize(&ctx.accounts.pool_state, &ctx.accounts.owner.key())?;
    let mut ledger = NoTransfers;
    let mut farm = Farm::new(
        ctx.accounts.pool_state.deref_mut(),
        &mut ledger,
        &Clock::get()?,
    )?;
    op(&mut farm, &cap)?
        .into_iter()
        .for_each(|event| event.emit());
    Ok(())
}

/// Changes the emission rate.
///
/// Accrual up to the current block is settled at the old rate first, so the
/// change is never retroactive.
///
/// # Errors
/// - `InvalidRewardRate`: `rate` outside `[min_reward_rate, max_reward_rate]`.
pub fn set_reward_per_block(ctx: Context<UpdateConfig>, rate: u64) -> Result<()> {
    apply(ctx, |farm, cap| farm.set_reward_per_block(cap, rate))
}

/// Changes the fee, in basis points, applied to later withdrawals.
pub fn set_withdrawal_fee(ctx: Context<UpdateConfig>, withdrawal_fee_bps: u16) -> Result<()> {
    apply(ctx, |farm, cap| farm.set_withdrawal_fee(cap, withdrawal_fee_bps))
}

/// Hands the owner role to `new_owner`.
pub fn transfer_ownership(ctx: Context<UpdateConfig>, new_owner: Pubkey) -> Result<()> {
    apply(ctx, |farm, cap| farm.transfer_ownership(cap, new_owner))
}
