pub mod events;
pub use events::*;

pub mod pool_state;
pub use pool_state::*;

pub mod user_info;
pub use user_info::*;
