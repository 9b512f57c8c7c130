//! Collaborator traits (ports)

mod scanner;
mod transport;

pub use scanner::{EmojiScanner, ScanResult};
pub use transport::{Transport, TransportResult};
