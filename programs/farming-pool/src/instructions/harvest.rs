use crate::farm::Farm;
use crate::instructions::UserAction;
use anchor_lang::prelude::*;
use std::ops::DerefMut;

/// Pays out pending reward without changing the stake.
///
/// With nothing pending the call succeeds and moves no tokens.
pub fn harvest(ctx: Context<UserAction>) -> Result<()> {
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
    let events = farm.harvest(&owner, ctx.accounts.user_info.deref_mut())?;
    events.into_iter().for_each(|event| event.emit());
    Ok(())
}
