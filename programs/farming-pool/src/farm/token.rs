use anchor_lang::prelude::*;

/// Token accounts held in pool custody.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Vault {
    /// Staked principal plus collected withdrawal fees.
    Stake,
    /// Reward reserve funded by the operator.
    Reward,
}

/// Fungible-token ledger the pool moves balances through.
///
/// Any `Err` aborts the calling operation; implementations must not apply a
/// transfer partially.
pub trait TokenLedger {
    /// Balance currently held in `vault`.
    fn balance_of(&self, vault: Vault) -> u64;

    /// Moves `amount` out of `vault` to the wallet of `to`.
    fn transfer(&mut self, vault: Vault, to: &Pubkey, amount: u64) -> Result<()>;

    /// Pulls `amount` from the wallet of `from` into `vault`. `from` must have
    /// authorized the pull.
    fn transfer_from(&mut self, from: &Pubkey, vault: Vault, amount: u64) -> Result<()>;
}

/// Ledger for operations that never move tokens, such as configuration updates.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoTransfers;

impl TokenLedger for NoTransfers {
    fn balance_of(&self, _vault: Vault) -> u64 {
        0
    }

    fn transfer(&mut self, _vault: Vault, _to: &Pubkey, _amount: u64) -> Result<()> {
        err!(crate::error::ErrorCode::InvalidVault)
    }

    fn transfer_from(&mut self, _from: &Pubkey, _vault: Vault, _amount: u64) -> Result<()> {
        err!(crate::error::ErrorCode::InvalidVault)
    }
}
