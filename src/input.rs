//! Reading of already decoded envelopes, one JSON object per line

use std::io::BufRead;

use thiserror::Error;
use tracing::warn;

use crate::model::Messaging;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to read line {line}: {source}")]
    Io {
        line: usize,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid envelope at line {line}: {source}")]
    InvalidEnvelope {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Iterates over the envelopes of `reader`
///
/// Blank lines are skipped. Lines which are not valid UTF-8 are reported as invalid envelopes.
/// Line numbers in errors start at 1.
pub fn envelopes(reader: impl BufRead) -> impl Iterator<Item = Result<Messaging, InputError>> {
    reader
        .split(b'\n')
        .enumerate()
        .filter_map(|(idx, line)| {
            let line_no = idx + 1;
            match line {
                Ok(line) if line.trim_ascii().is_empty() => None,
                Ok(line) => Some(serde_json::from_slice(&line).map_err(|source| {
                    InputError::InvalidEnvelope {
                        line: line_no,
                        source,
                    }
                })),
                Err(source) => Some(Err(InputError::Io {
                    line: line_no,
                    source,
                })),
            }
        })
}

/// Like [`envelopes`], but logs and skips invalid envelopes
///
/// I/O errors are still returned.
pub fn valid_envelopes(
    reader: impl BufRead,
) -> impl Iterator<Item = Result<Messaging, InputError>> {
    envelopes(reader).filter(|res| match res {
        Err(e @ InputError::InvalidEnvelope { .. }) => {
            warn!(error = %e, "skipping invalid envelope");
            false
        }
        _ => true,
    })
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    const INPUT: &str = r#"{"sender":{"id":"s"},"recipient":{"id":"r"},"timestamp":0,"read":{"mid":"m9"}}

{"sender":{"id":"s"}}
{"sender":{"id":"s"},"recipient":{"id":"r"},"timestamp":1,"message":{"mid":"m1"}}
"#;

    #[test]
    fn test_envelopes() {
        let results: Vec<_> = envelopes(Cursor::new(INPUT)).collect();
        assert_eq!(results.len(), 3);

        let first = results[0].as_ref().unwrap();
        assert_eq!(first.read.as_ref().unwrap().mid, "m9");

        match &results[1] {
            Err(InputError::InvalidEnvelope { line, .. }) => assert_eq!(*line, 3),
            res => panic!("unexpected result: {res:?}"),
        }

        let last = results[2].as_ref().unwrap();
        assert_eq!(last.timestamp, 1);
        assert_eq!(last.message.as_ref().unwrap().mid, "m1");
    }

    #[test]
    fn test_valid_envelopes() {
        let valid: Vec<_> = valid_envelopes(Cursor::new(INPUT))
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(valid.len(), 2);
    }

    #[test]
    fn test_invalid_utf8_line_is_invalid_envelope() {
        let mut input = Vec::new();
        input.extend_from_slice(
            br#"{"sender":{"id":"s"},"recipient":{"id":"r"},"timestamp":0}"#,
        );
        input.extend_from_slice(b"\n\xff\xfe garbage\r\n");
        input.extend_from_slice(
            br#"{"sender":{"id":"s"},"recipient":{"id":"r"},"timestamp":2}"#,
        );

        let results: Vec<_> = envelopes(Cursor::new(&input)).collect();
        assert_eq!(results.len(), 3);
        match &results[1] {
            Err(InputError::InvalidEnvelope { line, .. }) => assert_eq!(*line, 2),
            res => panic!("unexpected result: {res:?}"),
        }

        let valid: Vec<_> = valid_envelopes(Cursor::new(&input))
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(valid.len(), 2);
        assert_eq!(valid[1].timestamp, 2);
    }

    #[test]
    fn test_crlf_line_endings() {
        let input = "{\"sender\":{\"id\":\"s\"},\"recipient\":{\"id\":\"r\"},\"timestamp\":3}\r\n\r\n";
        let valid: Vec<_> = envelopes(Cursor::new(input))
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(valid.len(), 1);
        assert_eq!(valid[0].timestamp, 3);
    }
}
