use std::io::Read;

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};

use crate::error::ClientError;

/// Resolves the invocation payload from its possible sources.
///
/// Precedence is strict: when `use_stdin` is set the whole stream is
/// consumed and any literal is ignored; otherwise a literal is tried as
/// standard base64 and falls back to its raw bytes; no literal means
/// the view is invoked with no argument.
///
/// A base64 decode failure is a policy signal, not an error — only a
/// stdin read failure produces [`ClientError::InputRead`].
pub fn resolve_input<R: Read>(
    use_stdin: bool,
    literal: Option<&str>,
    mut stdin: R,
) -> Result<Option<Vec<u8>>, ClientError> {
    if use_stdin {
        let mut raw = Vec::new();
        stdin
            .read_to_end(&mut raw)
            .map_err(ClientError::InputRead)?;
        return Ok(Some(raw));
    }

    let Some(literal) = literal else {
        return Ok(None);
    };

    match BASE64.decode(literal) {
        Ok(decoded) => Ok(Some(decoded)),
        Err(_) => Ok(Some(literal.as_bytes().to_vec())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Cursor};

    fn no_stdin() -> Cursor<Vec<u8>> {
        Cursor::new(Vec::new())
    }

    #[test]
    fn valid_base64_literal_decodes() {
        let payload = resolve_input(false, Some("aGVsbG8="), no_stdin()).unwrap();
        assert_eq!(payload, Some(b"hello".to_vec()));
    }

    #[test]
    fn invalid_base64_literal_falls_back_to_raw_bytes() {
        let payload = resolve_input(false, Some("not base64!"), no_stdin()).unwrap();
        assert_eq!(payload, Some(b"not base64!".to_vec()));
    }

    #[test]
    fn absent_literal_resolves_to_no_payload() {
        let payload = resolve_input(false, None, no_stdin()).unwrap();
        assert_eq!(payload, None);
    }

    #[test]
    fn stdin_flag_consumes_the_whole_stream() {
        let payload = resolve_input(true, None, Cursor::new(b"raw-bytes".to_vec())).unwrap();
        assert_eq!(payload, Some(b"raw-bytes".to_vec()));
    }

    #[test]
    fn stdin_takes_precedence_over_literal() {
        let payload = resolve_input(true, Some("ignored"), Cursor::new(b"raw-bytes".to_vec()))
            .unwrap();
        assert_eq!(payload, Some(b"raw-bytes".to_vec()));
    }

    #[test]
    fn empty_stdin_resolves_to_empty_payload() {
        let payload = resolve_input(true, None, no_stdin()).unwrap();
        assert_eq!(payload, Some(Vec::new()));
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "stream cut"))
        }
    }

    #[test]
    fn stdin_read_failure_is_an_input_read_error() {
        let error = resolve_input(true, None, FailingReader).unwrap_err();
        assert!(matches!(error, ClientError::InputRead(_)));
    }
}
