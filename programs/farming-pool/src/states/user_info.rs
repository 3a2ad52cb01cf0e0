use anchor_lang::prelude::*;

//
// ──────────────────────────────────────────────────────────────────────────────
// UserInfo Account
// ──────────────────────────────────────────────────────────────────────────────
//

/// PDA seed string used to derive each staker's record.
pub const USER_INFO_SEED: &str = "user_info";

/// Staking position of a single address.
///
/// Derived from `USER_INFO_SEED + owner`. Created blank on first deposit and
/// bound to the depositor; `amount` and `reward_debt` are only ever written by
/// the reward ledger together with the shared `PoolState`.
#[account]
#[derive(Default, Debug, PartialEq)]
pub struct UserInfo {
    /// PDA bump for this account.
    pub bump: u8,

    /// Staking address this record belongs to (default until first deposit).
    pub owner: Pubkey,

    /// Currently staked principal.
    pub amount: u64,

    /// `amount * acc_reward_per_share / PRECISION` at the last interaction.
    /// Subtracted from the full entitlement so settled rewards are never paid twice.
    pub reward_debt: u128,

    /// True while `amount > 0`.
    pub is_staking: bool,
}

impl UserInfo {
    /// Fixed serialized size of the account.
    ///
    /// Breakdown:
    /// - 8: account discriminator
    /// - 1: bump
    /// - 32: owner pubkey
    /// - 8: amount
    /// - 16: reward debt
    /// - 1: staking flag
    pub const LEN: usize = 8 + 1 + 32 + 8 + 16 + 1;

    pub fn is_registered(&self) -> bool {
        self.owner != Pubkey::default()
    }
}
