use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::client::ViewClient;
use crate::connection::ConnectionConfig;
use crate::error::ClientError;
use crate::hashing::Sha256Hasher;
use crate::input::resolve_input;
use crate::render::render;
use crate::signing::X509Identity;

/// Options for one view invocation, as collected by the CLI layer.
#[derive(Debug, Clone)]
pub struct ViewOptions {
    /// Node to connect to, `host:port`.
    pub endpoint: Option<String>,
    /// View function name.
    pub function: Option<String>,
    /// Literal input, base64 or as-is.
    pub input: Option<String>,
    /// Read the payload from standard input instead.
    pub stdin: bool,
    pub tls_ca_cert: PathBuf,
    pub identity_cert: PathBuf,
    pub identity_key: PathBuf,
    pub connect_timeout: Option<Duration>,
    pub response_timeout: Option<Duration>,
}

/// The view command: validates options, resolves the payload, runs one
/// invocation and writes the rendered result to the injected sink.
///
/// The sink and the caller's exit-code handling stay outside — the
/// command neither touches a global stream nor terminates the process.
pub struct ViewCommand<W> {
    out: W,
}

impl<W: Write> ViewCommand<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub async fn execute(&mut self, options: ViewOptions) -> Result<(), ClientError> {
        self.execute_with_stdin(options, io::stdin()).await
    }

    /// Like [`execute`], with the input stream injected.
    ///
    /// [`execute`]: ViewCommand::execute
    pub async fn execute_with_stdin<R: Read>(
        &mut self,
        options: ViewOptions,
        stdin: R,
    ) -> Result<(), ClientError> {
        let endpoint = options
            .endpoint
            .filter(|endpoint| !endpoint.is_empty())
            .ok_or(ClientError::MissingParameter("endpoint"))?;
        let function = options
            .function
            .filter(|function| !function.is_empty())
            .ok_or(ClientError::MissingParameter("function name"))?;

        let payload = resolve_input(options.stdin, options.input.as_deref(), stdin)?;
        debug!(
            %endpoint,
            %function,
            payload_len = payload.as_ref().map(Vec::len),
            "invoking view"
        );

        let identity = X509Identity::load(&options.identity_cert, &options.identity_key)?;

        let mut config = ConnectionConfig::new(endpoint, options.tls_ca_cert);
        if let Some(connect_timeout) = options.connect_timeout {
            config = config.with_connect_timeout(connect_timeout);
        }
        if let Some(response_timeout) = options.response_timeout {
            config = config.with_response_timeout(response_timeout);
        }

        let client = ViewClient::new(config, Arc::new(identity), Arc::new(Sha256Hasher));
        let result = client.call_view(&function, payload.as_deref()).await?;

        writeln!(self.out, "{}", render(&result))
            .map_err(|e| ClientError::Transport(format!("writing rendered result: {e}")))?;
        Ok(())
    }
}
