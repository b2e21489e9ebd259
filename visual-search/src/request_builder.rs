//! Builds exactly one outbound query payload from the active input mode.
//!
//! Pure validation + assembly; no I/O happens here. Whether a payload may
//! be built at all (e.g., no search already in flight) is the caller's
//! concern.

use crate::error_handler::ValidationError;
use crate::query_input::{InputMode, QueryInput};

/// The outbound query, mirroring the active [`InputMode`].
///
/// Exactly one variant is constructible at a time: FILE mode yields the
/// binary transfer, URL mode the JSON reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryPayload {
    /// Binary file transfer (multipart `file` part).
    File {
        /// Raw image bytes.
        bytes: Vec<u8>,
        /// Declared media type of the part.
        mime_type: String,
        /// File name attached to the part.
        file_name: String,
    },
    /// JSON body `{ "url": "<string>" }`.
    Url {
        /// The query image URL, whitespace-trimmed.
        url: String,
    },
}

/// Assembles the payload for the active mode.
///
/// # Errors
/// Returns [`ValidationError::MissingInput`] when the active mode's
/// required field is empty: FILE mode needs a previously selected file
/// (raw bytes, not merely a preview), URL mode a non-blank string.
pub fn build(input: &QueryInput) -> Result<QueryPayload, ValidationError> {
    match input.mode() {
        InputMode::File => {
            let file = input
                .selected_file()
                .ok_or(ValidationError::MissingInput("select an image first"))?;
            Ok(QueryPayload::File {
                bytes: file.bytes.clone(),
                mime_type: file.mime_type.clone(),
                file_name: file.file_name.clone(),
            })
        }
        InputMode::Url => {
            let url = input.image_url().trim();
            if url.is_empty() {
                return Err(ValidationError::MissingInput("enter an image URL"));
            }
            Ok(QueryPayload::Url {
                url: url.to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query_input::SelectedFile;

    #[test]
    fn file_mode_without_selection_is_missing_input() {
        let input = QueryInput::new(InputMode::File);
        assert!(matches!(
            build(&input),
            Err(ValidationError::MissingInput(_))
        ));
    }

    #[test]
    fn url_mode_rejects_blank_input() {
        let mut input = QueryInput::new(InputMode::Url);
        assert!(matches!(
            build(&input),
            Err(ValidationError::MissingInput(_))
        ));

        input.set_url("   \t ");
        assert!(matches!(
            build(&input),
            Err(ValidationError::MissingInput(_))
        ));
    }

    #[test]
    fn url_payload_is_trimmed() {
        let mut input = QueryInput::new(InputMode::Url);
        input.set_url("  https://example.com/x.jpg ");
        assert_eq!(
            build(&input).unwrap(),
            QueryPayload::Url {
                url: "https://example.com/x.jpg".to_string()
            }
        );
    }

    #[test]
    fn file_payload_carries_the_raw_bytes() {
        let mut input = QueryInput::new(InputMode::File);
        let _ = input
            .set_file(SelectedFile {
                bytes: vec![1, 2, 3],
                mime_type: "image/jpeg".into(),
                file_name: "q.jpg".into(),
            })
            .unwrap();

        match build(&input).unwrap() {
            QueryPayload::File {
                bytes,
                mime_type,
                file_name,
            } => {
                assert_eq!(bytes, vec![1, 2, 3]);
                assert_eq!(mime_type, "image/jpeg");
                assert_eq!(file_name, "q.jpg");
            }
            other => panic!("expected file payload, got {other:?}"),
        }
    }
}
