pub mod task;
pub mod transcript;

pub use task::*;
pub use transcript::reconstruct;
