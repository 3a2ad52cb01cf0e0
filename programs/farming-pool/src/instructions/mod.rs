pub mod initialize_pool;
pub use initialize_pool::*;

pub mod deposit;
pub use deposit::*;

pub mod user_action;
pub use user_action::*;

pub mod withdraw;
pub use withdraw::*;

pub mod harvest;
pub use harvest::*;

pub mod emergency_withdraw;
pub use emergency_withdraw::*;

pub mod pending_rewards;
pub use pending_rewards::*;

pub mod update_configs;
pub use update_configs::*;

pub mod withdraw_fees;
pub use withdraw_fees::*;
