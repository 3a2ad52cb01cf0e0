pub mod fees;
pub use fees::*;

pub mod reward_index;
pub use reward_index::*;
