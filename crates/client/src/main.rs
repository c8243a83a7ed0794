use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use viewcall::{ViewCommand, ViewOptions};

/// Invoke a view on a remote node over an authenticated TLS channel.
#[derive(Parser)]
#[command(name = "viewcall", version, about)]
struct Args {
    /// Sets the endpoint of the node to connect to (host:port).
    #[clap(long)]
    endpoint: Option<String>,
    /// Sets the input to the view function, encoded either as base64, or as-is.
    #[clap(long)]
    input: Option<String>,
    /// Sets the function name to be invoked.
    #[clap(long)]
    function: Option<String>,
    /// Sets standard input as the input stream.
    #[clap(long)]
    stdin: bool,
    /// CA certificate the node's TLS certificate is verified against.
    #[clap(long, env = "VIEW_TLS_CA_CERT")]
    tls_ca_cert: PathBuf,
    /// Certificate PEM of the caller's signing identity.
    #[clap(long, env = "VIEW_IDENTITY_CERT")]
    identity_cert: PathBuf,
    /// Private key PEM of the caller's signing identity.
    #[clap(long, env = "VIEW_IDENTITY_KEY")]
    identity_key: PathBuf,
    /// Seconds allowed for establishing the channel.
    #[clap(long)]
    connect_timeout_secs: Option<u64>,
    /// Seconds allowed for the response; waits indefinitely when unset.
    #[clap(long)]
    response_timeout_secs: Option<u64>,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let options = ViewOptions {
        endpoint: args.endpoint,
        function: args.function,
        input: args.input,
        stdin: args.stdin,
        tls_ca_cert: args.tls_ca_cert,
        identity_cert: args.identity_cert,
        identity_key: args.identity_key,
        connect_timeout: args.connect_timeout_secs.map(Duration::from_secs),
        response_timeout: args.response_timeout_secs.map(Duration::from_secs),
    };

    let mut command = ViewCommand::new(io::stdout());
    match command.execute(options).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{error}");
            ExitCode::FAILURE
        }
    }
}
