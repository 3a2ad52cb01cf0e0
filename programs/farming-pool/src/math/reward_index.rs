//! Fixed-point reward-per-share accounting.
//!
//! Every quantity is an integer. `RewardIndex` holds rewards per unit of stake
//! scaled by [`PRECISION`]; products are taken in 256 bits so that
//! `amount * index` and `reward * PRECISION` never wrap before the division.

use crate::PRECISION;
use uint::construct_uint;

construct_uint! {
    pub struct U256(4);
}

/// Cumulative reward earned per unit of stake since pool inception,
/// scaled by `PRECISION`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RewardIndex(u128);

impl RewardIndex {
    pub const ZERO: RewardIndex = RewardIndex(0);

    pub const fn from_raw(raw: u128) -> Self {
        RewardIndex(raw)
    }

    pub const fn raw(self) -> u128 {
        self.0
    }

    /// Index after emitting `reward_per_block` for `elapsed_blocks` blocks,
    /// shared over `total_staked`. Unchanged while nothing is staked.
    pub fn accrue(
        self,
        elapsed_blocks: u64,
        reward_per_block: u64,
        total_staked: u64,
    ) -> Option<RewardIndex> {
        if total_staked == 0 || elapsed_blocks == 0 {
            return Some(self);
        }
        let reward = U256::from(elapsed_blocks).checked_mul(U256::from(reward_per_block))?;
        let delta = reward
            .checked_mul(U256::from(PRECISION))?
            .checked_div(U256::from(total_staked))?;
        let delta = u128::try_from(delta).ok()?;
        self.0.checked_add(delta).map(RewardIndex)
    }

    /// `floor(amount * index / PRECISION)`.
    pub fn entitlement(self, amount: u64) -> Option<u128> {
        let scaled = U256::from(amount)
            .checked_mul(U256::from(self.0))?
            .checked_div(U256::from(PRECISION))?;
        u128::try_from(scaled).ok()
    }
}

/// Reward accrued by `amount` of stake since its debt snapshot was taken.
pub fn pending_reward(amount: u64, index: RewardIndex, reward_debt: u128) -> Option<u64> {
    let owed = index.entitlement(amount)?.checked_sub(reward_debt)?;
    u64::try_from(owed).ok()
}
