//! Update intake
//!
//! Long-polls the Bot API and hands each update to the event router.

mod long_poller;

pub use long_poller::{LongPoller, LongPollerConfig, UpdateSource};
