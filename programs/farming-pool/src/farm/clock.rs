use anchor_lang::prelude::*;

/// Monotonically non-decreasing block counter used for accrual timing.
pub trait BlockSource {
    fn current_block(&self) -> Result<u64>;
}

/// On-chain accrual is measured in slots.
impl BlockSource for Clock {
    fn current_block(&self) -> Result<u64> {
        Ok(self.slot)
    }
}

/// A height read ahead of time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct BlockHeight(pub u64);

impl BlockSource for BlockHeight {
    fn current_block(&self) -> Result<u64> {
        Ok(self.0)
    }
}
