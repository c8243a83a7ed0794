use std::io;
use std::time::Duration;

/// Errors surfaced by input resolution and view invocation.
///
/// Every variant is terminal for the call it came from: there is no
/// retry and no partial result anywhere in this client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("{0} must be specified")]
    MissingParameter(&'static str),
    #[error("failed reading input from stdin: {0}")]
    InputRead(#[source] io::Error),
    #[error("failed to load signing identity: {0}")]
    IdentityLoad(String),
    #[error("connection to {address} not established within {timeout:?}")]
    ConnectionTimeout { address: String, timeout: Duration },
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("remote error: {0}")]
    Application(String),
    #[error("failed to decode response: {0}")]
    Decode(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_parameter_names_the_field() {
        let error = ClientError::MissingParameter("endpoint");
        assert_eq!(error.to_string(), "endpoint must be specified");
    }

    #[test]
    fn connection_timeout_reports_address_and_bound() {
        let error = ClientError::ConnectionTimeout {
            address: "node1:7051".into(),
            timeout: Duration::from_secs(10),
        };
        let text = error.to_string();
        assert!(text.contains("node1:7051"));
        assert!(text.contains("10s"));
    }

    #[test]
    fn application_error_carries_remote_message() {
        let error = ClientError::Application("view not found".into());
        assert!(error.to_string().contains("view not found"));
    }
}
