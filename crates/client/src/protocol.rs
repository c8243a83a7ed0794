use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

const MAX_MESSAGE_SIZE: u32 = 10 * 1024 * 1024; // 10 MB

/// Client → node messages.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ClientMessage {
    /// Invoke a view by name.
    Call {
        function: String,
        /// Invocation payload, standard base64. Absent means the view
        /// is invoked with no argument.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        input: Option<String>,
        /// Caller identity bytes, hex.
        identity: String,
        /// Signature over the digest of function ‖ payload, hex.
        signature: String,
        algorithm: String,
    },
}

/// Node → client messages.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum NodeMessage {
    /// Raw byte-sequence result, standard base64.
    Bytes { data: String },
    /// Any other structured result.
    Value { value: serde_json::Value },
    /// Remote-reported failure.
    Error { message: String },
}

/// Frame-level failures, kept apart so the caller can classify
/// transport faults separately from malformed responses.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    #[error("stream error: {0}")]
    Io(#[from] std::io::Error),
    #[error("frame too large: {0} bytes (max {MAX_MESSAGE_SIZE})")]
    TooLarge(u32),
    #[error("malformed frame: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Write a length-prefixed JSON message.
pub async fn write_message<W, T>(writer: &mut W, msg: &T) -> Result<(), FrameError>
where
    W: AsyncWrite + Unpin,
    T: Serialize,
{
    let payload = serde_json::to_vec(msg)?;
    let len = payload.len() as u32;
    writer.write_all(&len.to_be_bytes()).await?;
    writer.write_all(&payload).await?;
    writer.flush().await?;
    Ok(())
}

/// Read a length-prefixed JSON message.
pub async fn read_message<R, T>(reader: &mut R) -> Result<T, FrameError>
where
    R: AsyncRead + Unpin,
    T: DeserializeOwned,
{
    let mut len_buf = [0u8; 4];
    reader.read_exact(&mut len_buf).await?;
    let len = u32::from_be_bytes(len_buf);

    if len > MAX_MESSAGE_SIZE {
        return Err(FrameError::TooLarge(len));
    }

    let mut payload = vec![0u8; len as usize];
    reader.read_exact(&mut payload).await?;
    Ok(serde_json::from_slice(&payload)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::duplex;

    #[tokio::test]
    async fn roundtrip_call_message() {
        let (mut client, mut server) = duplex(1024);

        let msg = ClientMessage::Call {
            function: "init".to_string(),
            input: Some("aGVsbG8=".to_string()),
            identity: "deadbeef".to_string(),
            signature: "cafebabe".to_string(),
            algorithm: "secp256k1".to_string(),
        };
        write_message(&mut client, &msg).await.unwrap();
        drop(client);

        let received: ClientMessage = read_message(&mut server).await.unwrap();
        let ClientMessage::Call {
            function,
            input,
            identity,
            signature,
            algorithm,
        } = received;
        assert_eq!(function, "init");
        assert_eq!(input.as_deref(), Some("aGVsbG8="));
        assert_eq!(identity, "deadbeef");
        assert_eq!(signature, "cafebabe");
        assert_eq!(algorithm, "secp256k1");
    }

    #[tokio::test]
    async fn call_without_input_omits_the_field() {
        let (mut client, mut server) = duplex(1024);

        let msg = ClientMessage::Call {
            function: "query".to_string(),
            input: None,
            identity: String::new(),
            signature: String::new(),
            algorithm: "secp256k1".to_string(),
        };
        write_message(&mut client, &msg).await.unwrap();
        drop(client);

        let mut len_buf = [0u8; 4];
        server.read_exact(&mut len_buf).await.unwrap();
        let mut payload = vec![0u8; u32::from_be_bytes(len_buf) as usize];
        server.read_exact(&mut payload).await.unwrap();
        let text = String::from_utf8(payload).unwrap();
        assert!(!text.contains("input"));

        let received: ClientMessage = serde_json::from_str(&text).unwrap();
        let ClientMessage::Call { input, .. } = received;
        assert_eq!(input, None);
    }

    #[tokio::test]
    async fn roundtrip_node_messages() {
        let (mut client, mut server) = duplex(4096);

        for msg in [
            NodeMessage::Bytes {
                data: "b2s=".to_string(),
            },
            NodeMessage::Value {
                value: serde_json::json!({"count": 3}),
            },
            NodeMessage::Error {
                message: "view not found".to_string(),
            },
        ] {
            write_message(&mut server, &msg).await.unwrap();
        }
        drop(server);

        match read_message(&mut client).await.unwrap() {
            NodeMessage::Bytes { data } => assert_eq!(data, "b2s="),
            other => panic!("expected Bytes, got {other:?}"),
        }
        match read_message(&mut client).await.unwrap() {
            NodeMessage::Value { value } => assert_eq!(value["count"], 3),
            other => panic!("expected Value, got {other:?}"),
        }
        match read_message(&mut client).await.unwrap() {
            NodeMessage::Error { message } => assert_eq!(message, "view not found"),
            other => panic!("expected Error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn oversized_frame_is_rejected() {
        let (mut client, mut server) = duplex(64);

        let len = (MAX_MESSAGE_SIZE + 1).to_be_bytes();
        client.write_all(&len).await.unwrap();
        drop(client);

        let error = read_message::<_, NodeMessage>(&mut server).await.unwrap_err();
        assert!(matches!(error, FrameError::TooLarge(_)));
    }

    #[tokio::test]
    async fn garbage_frame_is_malformed() {
        let (mut client, mut server) = duplex(64);

        let garbage = b"not json";
        client
            .write_all(&(garbage.len() as u32).to_be_bytes())
            .await
            .unwrap();
        client.write_all(garbage).await.unwrap();
        drop(client);

        let error = read_message::<_, NodeMessage>(&mut server).await.unwrap_err();
        assert!(matches!(error, FrameError::Malformed(_)));
    }

    #[tokio::test]
    async fn truncated_stream_is_an_io_error() {
        let (mut client, mut server) = duplex(64);

        client.write_all(&8u32.to_be_bytes()).await.unwrap();
        client.write_all(b"shor").await.unwrap();
        drop(client);

        let error = read_message::<_, NodeMessage>(&mut server).await.unwrap_err();
        assert!(matches!(error, FrameError::Io(_)));
    }
}
