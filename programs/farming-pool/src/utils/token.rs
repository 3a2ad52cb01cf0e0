use crate::error::ErrorCode;
use crate::farm::{TokenLedger, Vault};
use anchor_lang::prelude::*;
use anchor_spl::token_interface::{self, TransferChecked};

/// Pulls `amount` from a user-owned token account into a pool vault.
/// The user must sign the enclosing transaction.
pub fn transfer_from_user_to_pool_vault<'info>(
    authority: AccountInfo<'info>,
    from: AccountInfo<'info>,
    to_vault: AccountInfo<'info>,
    mint: AccountInfo<'info>,
    token_program: AccountInfo<'info>,
    amount: u64,
    mint_decimals: u8,
) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }
    token_interface::transfer_checked(
        CpiContext::new(
            token_program,
            TransferChecked {
                from,
                to: to_vault,
                authority,
                mint,
            },
        ),
        amount,
        mint_decimals,
    )
}

/// Pays `amount` out of a pool vault, signing as the vault authority PDA.
pub fn transfer_from_pool_vault_to_user<'info>(
    authority: AccountInfo<'info>,
    from_vault: AccountInfo<'info>,
    to: AccountInfo<'info>,
    mint: AccountInfo<'info>,
    token_program: AccountInfo<'info>,
    amount: u64,
    mint_decimals: u8,
    signer_seeds: &[&[&[u8]]],
) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }
    token_interface::transfer_checked(
        CpiContext::new_with_signer(
            token_program,
            TransferChecked {
                from: from_vault,
                to,
                authority,
                mint,
            },
            signer_seeds,
        ),
        amount,
        mint_decimals,
    )
}

/// One pool vault together with the counterpart account of the instruction's holder.
pub struct VaultAccounts<'info> {
    pub vault: AccountInfo<'info>,
    pub mint: AccountInfo<'info>,
    pub decimals: u8,
    /// Vault balance as loaded at the start of the instruction.
    pub balance: u64,
    /// Holder's token account for `mint`.
    pub holder_token: AccountInfo<'info>,
}

/// [`TokenLedger`] backed by SPL token CPIs.
///
/// Only the instruction's holder can be paid or pulled from, through the
/// token accounts handed in with [`VaultAccounts`]. Balances are tracked
/// locally after each transfer since loaded token accounts are not reloaded.
pub struct CpiTokenLedger<'a, 'info> {
    holder: Pubkey,
    holder_signer: Option<AccountInfo<'info>>,
    authority: AccountInfo<'info>,
    token_program: AccountInfo<'info>,
    signer_seeds: &'a [&'a [&'a [u8]]],
    stake: Option<VaultAccounts<'info>>,
    reward: Option<VaultAccounts<'info>>,
}

impl<'a, 'info> CpiTokenLedger<'a, 'info> {
    pub fn new(
        holder: Pubkey,
        authority: AccountInfo<'info>,
        token_program: AccountInfo<'info>,
        signer_seeds: &'a [&'a [&'a [u8]]],
    ) -> Self {
        CpiTokenLedger {
            holder,
            holder_signer: None,
            authority,
            token_program,
            signer_seeds,
            stake: None,
            reward: None,
        }
    }

    /// Lets the ledger pull from the holder, who signed the transaction.
    pub fn with_holder_signer(mut self, signer: AccountInfo<'info>) -> Self {
        self.holder_signer = Some(signer);
        self
    }

    pub fn with_vault(mut self, vault: Vault, accounts: VaultAccounts<'info>) -> Self {
        match vault {
            Vault::Stake => self.stake = Some(accounts),
            Vault::Reward => self.reward = Some(accounts),
        }
        self
    }

    fn accounts(&self, vault: Vault) -> Result<&VaultAccounts<'info>> {
        match vault {
            Vault::Stake => self.stake.as_ref(),
            Vault::Reward => self.reward.as_ref(),
        }
        .ok_or(error!(ErrorCode::InvalidVault))
    }

    fn accounts_mut(&mut self, vault: Vault) -> Result<&mut VaultAccounts<'info>> {
        match vault {
            Vault::Stake => self.stake.as_mut(),
            Vault::Reward => self.reward.as_mut(),
        }
        .ok_or(error!(ErrorCode::InvalidVault))
    }
}

impl<'a, 'info> TokenLedger for CpiTokenLedger<'a, 'info> {
    fn balance_of(&self, vault: Vault) -> u64 {
        self.accounts(vault).map(|a| a.balance).unwrap_or_default()
    }

    fn transfer(&mut self, vault: Vault, to: &Pubkey, amount: u64) -> Result<()> {
        require_keys_eq!(*to, self.holder, ErrorCode::InvalidTokenAccount);
        let accounts = self.accounts(vault)?;
        let remaining = accounts
            .balance
            .checked_sub(amount)
            .ok_or(error!(ErrorCode::TransferFailed))?;
        transfer_from_pool_vault_to_user(
            self.authority.clone(),
            accounts.vault.clone(),
            accounts.holder_token.clone(),
            accounts.mint.clone(),
            self.token_program.clone(),
            amount,
            accounts.decimals,
            self.signer_seeds,
        )
        .map_err(|e| {
            msg!("Vault payout of {} failed: {:?}", amount, e);
            error!(ErrorCode::TransferFailed)
        })?;
        self.accounts_mut(vault)?.balance = remaining;
        Ok(())
    }

    fn transfer_from(&mut self, from: &Pubkey, vault: Vault, amount: u64) -> Result<()> {
        require_keys_eq!(*from, self.holder, ErrorCode::InvalidTokenAccount);
        let signer = self
            .holder_signer
            .clone()
            .ok_or(error!(ErrorCode::TransferFailed))?;
        let accounts = self.accounts(vault)?;
        let balance = accounts
            .balance
            .checked_add(amount)
            .ok_or(error!(ErrorCode::MathOverflow))?;
        transfer_from_user_to_pool_vault(
            signer,
            accounts.holder_token.clone(),
            accounts.vault.clone(),
            accounts.mint.clone(),
            self.token_program.clone(),
            amount,
            accounts.decimals,
        )
        .map_err(|e| {
            msg!("Stake pull of {} failed: {:?}", amount, e);
            error!(ErrorCode::TransferFailed)
        })?;
        self.accounts_mut(vault)?.balance = balance;
        Ok(())
    }
}
