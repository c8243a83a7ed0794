use std::fs;
use std::sync::Arc;

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::debug;

use crate::connection::ConnectionConfig;
use crate::error::ClientError;
use crate::hashing::HashProvider;
use crate::protocol::{ClientMessage, FrameError, NodeMessage, read_message, write_message};
use crate::signing::SigningIdentity;

/// Result of one view invocation: a raw byte sequence, or any other
/// structured value.
#[derive(Debug)]
pub enum ViewResult {
    Bytes(Vec<u8>),
    Value(serde_json::Value),
}

/// Client for invoking a view on a remote node over an authenticated
/// TLS channel.
///
/// One attempt per call, no retry: any failure in any phase is
/// terminal and returned to the caller. Instances hold no per-call
/// state, so calls are independent.
pub struct ViewClient {
    config: ConnectionConfig,
    identity: Arc<dyn SigningIdentity>,
    hasher: Arc<dyn HashProvider>,
}

impl ViewClient {
    pub fn new(
        config: ConnectionConfig,
        identity: Arc<dyn SigningIdentity>,
        hasher: Arc<dyn HashProvider>,
    ) -> Self {
        Self {
            config,
            identity,
            hasher,
        }
    }

    /// Invoke `function` on the configured node and classify the
    /// response.
    ///
    /// The channel is scoped to the call: acquired right before the
    /// request is sent and released on every exit path.
    pub async fn call_view(
        &self,
        function: &str,
        input: Option<&[u8]>,
    ) -> Result<ViewResult, ClientError> {
        if self.config.address.is_empty() {
            return Err(ClientError::MissingParameter("endpoint"));
        }
        if function.is_empty() {
            return Err(ClientError::MissingParameter("function name"));
        }

        let mut channel = self.connect().await?;
        let result = self.exchange(&mut channel, function, input).await;
        // Release the channel on every exit path; a shutdown failure
        // cannot change the already-known outcome.
        let _ = channel.shutdown().await;
        result
    }

    /// The transport-agnostic core of [`call_view`]: one request out,
    /// one response in, classified.
    ///
    /// [`call_view`]: ViewClient::call_view
    pub async fn exchange<T>(
        &self,
        channel: &mut T,
        function: &str,
        input: Option<&[u8]>,
    ) -> Result<ViewResult, ClientError>
    where
        T: AsyncRead + AsyncWrite + Unpin,
    {
        let request = self.build_request(function, input)?;
        write_message(channel, &request)
            .await
            .map_err(transport_fault)?;
        debug!(function, "call sent, awaiting response");

        let response: NodeMessage = match self.config.response_timeout {
            Some(limit) => timeout(limit, read_message(channel))
                .await
                .map_err(|_| {
                    ClientError::Transport(format!("no response within {limit:?}"))
                })?
                .map_err(transport_fault)?,
            None => read_message(channel).await.map_err(transport_fault)?,
        };

        match response {
            NodeMessage::Bytes { data } => BASE64
                .decode(&data)
                .map(ViewResult::Bytes)
                .map_err(|e| ClientError::Decode(format!("byte result is not base64: {e}"))),
            NodeMessage::Value { value } => Ok(ViewResult::Value(value)),
            NodeMessage::Error { message } => Err(ClientError::Application(message)),
        }
    }

    fn build_request(
        &self,
        function: &str,
        input: Option<&[u8]>,
    ) -> Result<ClientMessage, ClientError> {
        let mut sink = self.hasher.sink();
        sink.update(function.as_bytes());
        if let Some(payload) = input {
            sink.update(payload);
        }
        let digest = sink.finalize();

        let signature = self
            .identity
            .sign(&digest)
            .map_err(|e| ClientError::IdentityLoad(format!("signing request digest: {e:#}")))?;

        Ok(ClientMessage::Call {
            function: function.to_string(),
            input: input.map(|payload| BASE64.encode(payload)),
            identity: hex::encode(self.identity.identity_bytes()),
            signature: hex::encode(signature),
            algorithm: self.identity.algorithm().to_string(),
        })
    }

    async fn connect(&self) -> Result<tokio_native_tls::TlsStream<TcpStream>, ClientError> {
        let connector = self.tls_connector()?;
        let address = self.config.address.clone();
        let host = self.config.host().to_string();

        let establish = async {
            let tcp = TcpStream::connect(&address)
                .await
                .map_err(|e| ClientError::Transport(format!("connecting to {address}: {e}")))?;
            debug!(%address, "tcp connected, starting tls handshake");
            connector
                .connect(&host, tcp)
                .await
                .map_err(|e| ClientError::Transport(format!("tls handshake with {address}: {e}")))
        };

        match timeout(self.config.connect_timeout, establish).await {
            Ok(outcome) => outcome,
            Err(_) => Err(ClientError::ConnectionTimeout {
                address: self.config.address.clone(),
                timeout: self.config.connect_timeout,
            }),
        }
    }

    /// TLS is mandatory: the connector always verifies the node
    /// against the configured trust root, and presents the caller's
    /// identity when it carries a TLS credential.
    fn tls_connector(&self) -> Result<tokio_native_tls::TlsConnector, ClientError> {
        let root = &self.config.tls_root_cert;
        let root_pem = fs::read(root).map_err(|e| {
            ClientError::Transport(format!("reading TLS root certificate {}: {e}", root.display()))
        })?;
        let root_cert = native_tls::Certificate::from_pem(&root_pem).map_err(|e| {
            ClientError::Transport(format!("parsing TLS root certificate {}: {e}", root.display()))
        })?;

        let mut builder = native_tls::TlsConnector::builder();
        builder.add_root_certificate(root_cert);

        if let Some((cert_pem, key_pem)) = self.identity.tls_credential() {
            let tls_identity = native_tls::Identity::from_pkcs8(&cert_pem, &key_pem)
                .map_err(|e| ClientError::IdentityLoad(format!("building TLS credential: {e}")))?;
            builder.identity(tls_identity);
        }

        let connector = builder
            .build()
            .map_err(|e| ClientError::Transport(format!("building TLS connector: {e}")))?;
        Ok(tokio_native_tls::TlsConnector::from(connector))
    }
}

fn transport_fault(error: FrameError) -> ClientError {
    match error {
        FrameError::Io(e) => ClientError::Transport(e.to_string()),
        FrameError::TooLarge(len) => {
            ClientError::Decode(format!("response frame too large: {len} bytes"))
        }
        FrameError::Malformed(e) => ClientError::Decode(e.to_string()),
    }
}
