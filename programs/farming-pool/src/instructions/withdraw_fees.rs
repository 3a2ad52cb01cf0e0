use crate::error::ErrorCode;
use crate::farm::{Farm, OwnerCap, Vault};
use crate::states::*;
use crate::utils::{CpiTokenLedger, VaultAccounts};
use anchor_lang::prelude::*;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};
use std::ops::DerefMut;

#[derive(Accounts)]
pub struct WithdrawFees<'info> {
    #[account(
        mut,
        constraint = owner.key() == pool_state.owner @ ErrorCode::Unauthorized
    )]
    pub owner: Signer<'info>,

    #[account(
        mut,
        seeds = [POOL_STATE_SEED.as_bytes()],
        bump = pool_state.bump,
        has_one = stake_vault @ ErrorCode::InvalidVault,
        has_one = stake_mint,
    )]
    pub pool_state: Account<'info, PoolState>,

    /// Vault authority PDA.
    ///
    /// CHECK: PDA derivation enforced by seeds; used only as a signer.
    #[account(
        seeds = [crate::AUTH_SEED.as_bytes()],
        bump,
    )]
    pub authority: UncheckedAccount<'info>,

    /// Holds the collected fees alongside staked principal.
    #[account(mut)]
    pub stake_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    pub stake_mint: Box<InterfaceAccount<'info, Mint>>,

    /// Owner's stake-token ATA; created on demand.
    #[account(
        init_if_needed,
        payer = owner,
        associated_token::mint = stake_mint,
        associated_token::authority = owner,
        associated_token::token_program = token_program,
    )]
    pub owner_stake_token: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,

    pub associated_token_program: Program<'info, AssociatedToken>,

    pub system_program: Program<'info, System>,
}

/// Sends every collected withdrawal fee to the owner and resets the tally.
///
/// Nothing collected is a no-op.
pub fn withdraw_fees(ctx: Context<WithdrawFees>) -> Result<()> {
    let bump = [ctx.bumps.authority];
    let seeds: &[&[u8]] = &[crate::AUTH_SEED.as_bytes(), &bump];
    let signer_seeds = &[seeds];
    let owner = ctx.accounts.owner.key();
    let cap = OwnerCap::authorize(&ctx.accounts.pool_state, &owner)?;

    let mut ledger = CpiTokenLedger::new(
        owner,
        ctx.accounts.authority.to_account_info(),
        ctx.accounts.token_program.to_account_info(),
        signer_seeds,
    )
    .with_vault(
        Vault::Stake,
        VaultAccounts {
            vault: ctx.accounts.stake_vault.to_account_info(),
            mint: ctx.accounts.stake_mint.to_account_info(),
            decimals: ctx.accounts.stake_mint.decimals,
            balance: ctx.accounts.stake_vault.amount,
            holder_token: ctx.accounts.owner_stake_token.to_account_info(),
        },
    );

    let mut farm = Farm::new(
        ctx.accounts.pool_state.deref_mut(),
        &mut ledger,
        &Clock::get()?,
    )?;
    let events = farm.withdraw_fees(&cap)?;
    events.into_iter().for_each(|event| event.emit());
    Ok(())
}
