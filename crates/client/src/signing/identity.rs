/// Trait for authenticating a view invocation to the remote node.
///
/// Implementations are sync — signing is CPU-bound. For async backends
/// (e.g. KMS), use `spawn_blocking`.
pub trait SigningIdentity: Send + Sync {
    /// Sign a message digest. Returns raw signature bytes.
    fn sign(&self, digest: &[u8]) -> anyhow::Result<Vec<u8>>;

    /// Bytes identifying the caller to the remote node.
    fn identity_bytes(&self) -> Vec<u8>;

    /// Algorithm identifier string (e.g. "secp256k1").
    fn algorithm(&self) -> &str;

    /// Certificate and PKCS#8 key PEM pair presented on the TLS
    /// channel, when this identity can authenticate the channel itself.
    fn tls_credential(&self) -> Option<(Vec<u8>, Vec<u8>)> {
        None
    }
}
