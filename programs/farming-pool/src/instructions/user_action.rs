use crate::error::ErrorCode;
use crate::farm::Vault;
use crate::states::*;
use crate::utils::{CpiTokenLedger, VaultAccounts};
use anchor_lang::prelude::*;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

/// Accounts shared by `withdraw`, `harvest` and `emergency_withdraw`.
///
/// The staker's record must already exist.
#[derive(Accounts)]
pub struct UserAction<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,

    #[account(
        mut,
        seeds = [POOL_STATE_SEED.as_bytes()],
        bump = pool_state.bump,
        has_one = stake_vault @ ErrorCode::InvalidVault,
        has_one = reward_vault @ ErrorCode::InvalidVault,
        has_one = stake_mint,
        has_one = reward_mint,
    )]
    pub pool_state: Account<'info, PoolState>,

    #[account(
        mut,
        seeds = [
            USER_INFO_SEED.as_bytes(),
            owner.key().as_ref()
        ],
        bump = user_info.bump,
    )]
    pub user_info: Account<'info, UserInfo>,

    /// Vault authority PDA.
    ///
    /// CHECK: PDA derivation enforced by seeds; used only as a signer.
    #[account(
        seeds = [crate::AUTH_SEED.as_bytes()],
        bump,
    )]
    pub authority: UncheckedAccount<'info>,

    #[account(mut)]
    pub stake_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(mut)]
    pub reward_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    pub stake_mint: Box<InterfaceAccount<'info, Mint>>,

    pub reward_mint: Box<InterfaceAccount<'info, Mint>>,

    /// Receives returned principal.
    #[account(
        mut,
        token::mint = stake_mint,
        constraint = owner_stake_token.owner == owner.key() @ ErrorCode::InvalidTokenAccount,
    )]
    pub owner_stake_token: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Receives harvested rewards; created on demand.
    #[account(
        init_if_needed,
        payer = owner,
        associated_token::mint = reward_mint,
        associated_token::authority = owner,
        associated_token::token_program = token_program,
    )]
    pub owner_reward_token: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,

    pub associated_token_program: Program<'info, AssociatedToken>,

    pub system_program: Program<'info, System>,
}

impl<'info> UserAction<'info> {
    /// Ledger paying out of both vaults to the signer. Pulls are not possible.
    pub(crate) fn ledger<'a>(
        &self,
        signer_seeds: &'a [&'a [&'a [u8]]],
    ) -> CpiTokenLedger<'a, 'info> {
        CpiTokenLedger::new(
            self.owner.key(),
            self.authority.to_account_info(),
            self.token_program.to_account_info(),
            signer_seeds,
        )
        .with_vault(
            Vault::Stake,
            VaultAccounts {
                vault: self.stake_vault.to_account_info(),
                mint: self.stake_mint.to_account_info(),
                decimals: self.stake_mint.decimals,
                balance: self.stake_vault.amount,
                holder_token: self.owner_stake_token.to_account_info(),
            },
        )
        .with_vault(
            Vault::Reward,
            VaultAccounts {
                vault: self.reward_vault.to_account_info(),
                mint: self.reward_mint.to_account_info(),
                decimals: self.reward_mint.decimals,
                balance: self.reward_vault.amount,
                holder_token: self.owner_reward_token.to_account_info(),
            },
        )
    }
}
