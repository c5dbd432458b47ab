pub mod source;
pub mod walker;

pub use source::{BlockSource, MemoryBlockSource};
pub use walker::{HeaderChain, Order, StopPolicy, Termination, walk_chain};

/// Default hard cap on a target walk, so an unreachable target still terminates.
pub const DEFAULT_WALK_CAP: usize = 10_000;
