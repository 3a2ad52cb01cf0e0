use crate::farm::BlockSource;
use crate::states::*;
use anchor_lang::prelude::*;

/// Read-only view of a staker's claimable reward.
#[derive(Accounts)]
pub struct PendingRewards<'info> {
    /// CHECK: only used to derive `user_info`.
    pub user: UncheckedAccount<'info>,

    #[account(
        seeds = [POOL_STATE_SEED.as_bytes()],
        bump = pool_state.bump,
    )]
    pub pool_state: Account<'info, PoolState>,

    #[account(
        seeds = [
            USER_INFO_SEED.as_bytes(),
            user.key().as_ref()
        ],
        bump = user_info.bump,
    )]
    pub user_info: Account<'info, UserInfo>,
}

/// Returns the reward `user` would receive by harvesting now. Writes nothing.
pub fn pending_rewards(ctx: Context<PendingRewards>) -> Result<u64> {
    let current_block = Clock::get()?.current_block()?;
    let pending = ctx
        .accounts
        .pool_state
        .pending_rewards(&ctx.accounts.user_info, current_block)?;
    msg!("Pending reward for {}: {}", ctx.accounts.user.key(), pending);
    Ok(pending)
}
