use crate::farm::Farm;
use crate::instructions::UserAction;
use anchor_lang::prelude::*;
use std::ops::DerefMut;

/// Returns the caller's whole principal with no fee and forfeits pending reward.
///
/// Forfeited reward stays in the reward vault. Does not depend on the reward
/// reserve, so it succeeds even when the vault is empty.
pub fn emergency_withdraw(ctx: Context<UserAction>) -> Result<()> {
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
    let events = farm.emergency_withdraw(&owner, ctx.accounts.user_info.deref_mut())?;
    msg!("Emergency withdrawal for {}", owner);
    events.into_iter().for_each(|event| event.emit());
    Ok(())
}
