use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Parameters for the mandatory-TLS channel to a node.
///
/// Pure assembly — no I/O happens here. Bad paths and unreachable
/// addresses surface at channel-open time.
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    /// Node address, `host:port`.
    pub address: String,
    /// Always true: this client offers no plaintext path.
    pub tls_enabled: bool,
    /// CA certificate the node's TLS certificate is verified against.
    pub tls_root_cert: PathBuf,
    /// Bound on establishing the channel (TCP connect + TLS handshake).
    pub connect_timeout: Duration,
    /// Bound on the response wait after sending; unbounded when unset.
    pub response_timeout: Option<Duration>,
}

impl ConnectionConfig {
    pub fn new(address: impl Into<String>, tls_root_cert: impl Into<PathBuf>) -> Self {
        Self {
            address: address.into(),
            tls_enabled: true,
            tls_root_cert: tls_root_cert.into(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            response_timeout: None,
        }
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_response_timeout(mut self, timeout: Duration) -> Self {
        self.response_timeout = Some(timeout);
        self
    }

    /// Host part of the address, used for TLS server-name verification.
    pub fn host(&self) -> &str {
        self.address
            .rsplit_once(':')
            .map(|(host, _)| host)
            .unwrap_or(&self.address)
    }
}
