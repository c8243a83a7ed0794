use sha2::{Digest, Sha256};

use super::provider::{HashProvider, HashSink};

/// SHA-256 hash provider, the default digest of the invocation
/// protocol. 32-byte digests.
pub struct Sha256Hasher;

struct Sha256Sink(Sha256);

impl HashSink for Sha256Sink {
    fn update(&mut self, data: &[u8]) {
        self.0.update(data);
    }

    fn finalize(self: Box<Self>) -> Vec<u8> {
        self.0.finalize().to_vec()
    }
}

impl HashProvider for Sha256Hasher {
    fn sink(&self) -> Box<dyn HashSink> {
        Box::new(Sha256Sink(Sha256::new()))
    }

    fn hash_once(&self, msg: &[u8]) -> Vec<u8> {
        Sha256::digest(msg).to_vec()
    }

    fn algorithm(&self) -> &str {
        "sha256"
    }
}
