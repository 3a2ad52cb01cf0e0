use crate::error::ErrorCode;
use crate::states::PoolState;
use anchor_lang::prelude::*;

/// Capability proving the holder signed as the pool owner.
///
/// Only obtainable through [`OwnerCap::authorize`]; administrative ledger
/// operations require one and re-check it against the pool they mutate.
#[derive(Debug)]
pub struct OwnerCap {
    owner: Pubkey,
}

impl OwnerCap {
    pub fn authorize(pool: &PoolState, signer: &Pubkey) -> Result<OwnerCap> {
        if pool.owner != *signer {
            msg!("{} is not the pool owner", signer);
            return err!(ErrorCode::Unauthorized);
        }
        Ok(OwnerCap { owner: *signer })
    }

    pub fn owner(&self) -> &Pubkey {
        &self.owner
    }

    /// Fails if ownership moved since the capability was issued.
    pub(crate) fn check(&self, pool: &PoolState) -> Result<()> {
        require_keys_eq!(self.owner, pool.owner, ErrorCode::Unauthorized);
        Ok(())
    }
}
