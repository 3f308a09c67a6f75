pub mod initialize_pool;
pub use initialize_pool::*;

pub mod fund_rewards;
pub use fund_rewards::*;

pub mod stake;
pub use stake::*;

pub mod unstake;
pub use unstake::*;

pub mod harvest;
pub use harvest::*;

pub mod pending_reward;
pub use pending_reward::*;
