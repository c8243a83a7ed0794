/// Stateful hash object accepting repeated writes, finalized exactly
/// once to produce a digest.
pub trait HashSink: Send {
    fn update(&mut self, data: &[u8]);

    fn finalize(self: Box<Self>) -> Vec<u8>;
}

/// Pluggable hashing capability injected into the invocation client.
///
/// Swapping the provider changes the protocol's digest algorithm
/// without touching invocation logic. Providers are stateless
/// factories; sinks are cheap and created per message.
pub trait HashProvider: Send + Sync {
    /// A fresh incremental sink.
    fn sink(&self) -> Box<dyn HashSink>;

    /// One-shot digest. Must equal writing `msg` into a fresh sink and
    /// finalizing it.
    fn hash_once(&self, msg: &[u8]) -> Vec<u8> {
        let mut sink = self.sink();
        sink.update(msg);
        sink.finalize()
    }

    /// Algorithm identifier string (e.g. "sha256").
    fn algorithm(&self) -> &str;
}
