mod provider;
mod sha256;

pub use provider::{HashProvider, HashSink};
pub use sha256::Sha256Hasher;
