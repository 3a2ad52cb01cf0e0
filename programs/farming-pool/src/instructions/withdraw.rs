use crate::farm::Farm;
use crate::instructions::UserAction;
use anchor_lang::prelude::*;
use std::ops::DerefMut;

/// Unstakes `amount`, paying pending reward and retaining the withdrawal fee.
///
/// The fee (`amount * withdrawal_fee_bps / 10000`, rounded down) stays in the
/// stake vault and is credited to `collected_fees`. `withdraw(0)` only harvests.
///
/// # Errors
/// - `InsufficientStake`: `amount` exceeds the staked balance.
/// - `InsufficientRewardReserve`: the reward vault cannot cover pending reward.
pub fn withdraw(ctx: Context<UserAction>, amount: u64) -> Result<()> {
    let bump = [ctx.bumps.authority];
    let seeds: &[&[u8]] = &[crate::AUTH_SEED.as_bytes(), &bump];
    let signer_seeds = &[seeds];
    let owner = ctx.accounts.owner.key();
    let mut ledger = ctx.accounts.ledger(signer_seeds);

    let mut farm = Farm::new(
        ctx.accounts.pool_state.deref_mut(),
        &mut ledger,
        &Clock::get()?,
    )?;
    let events = farm.withdraw(&owner, ctx.accounts.user_info.deref_mut(), amount)?;
    msg!("Withdrew {} for {}", amount, owner);
    events.into_iter().for_each(|event| event.emit());
    Ok(())
}
