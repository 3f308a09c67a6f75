pub mod pool;
pub use pool::*;

pub mod events;
pub use events::*;

pub mod user_info;
pub use user_info::*;
