//! Query input state: which of the two mutually exclusive input modes is
//! active, and the data belonging to each.
//!
//! Invariants:
//! - At most one of {selected file, image URL} is non-empty after any
//!   [`QueryInput::set_mode`] call. The clearing lives here, not at call
//!   sites.
//! - A preview derivation started by [`QueryInput::set_file`] is applied
//!   only if the input has not changed underneath it (epoch check); a stale
//!   derivation is discarded. Last completion wins.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use tracing::{debug, trace};

use crate::error_handler::ValidationError;
use crate::models::PreviewReference;

/// The two mutually exclusive ways to supply a query image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// A local file selected by the user.
    File,
    /// A remote image URL entered by the user.
    Url,
}

/// A file chosen as the query image: raw bytes plus what we know about it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    /// Raw image bytes.
    pub bytes: Vec<u8>,
    /// Declared media type (e.g., `image/png`).
    pub mime_type: String,
    /// Original file name, used for the multipart part.
    pub file_name: String,
}

/// Owns the active [`InputMode`] and the per-mode data.
#[derive(Debug)]
pub struct QueryInput {
    mode: InputMode,
    selected_file: Option<SelectedFile>,
    image_url: String,
    preview: Option<PreviewReference>,
    /// Bumped on every mode switch and file selection; pending preview
    /// derivations carry the epoch they were issued under.
    epoch: u64,
}

impl Default for QueryInput {
    /// Starts in FILE mode.
    fn default() -> Self {
        Self::new(InputMode::File)
    }
}

impl QueryInput {
    /// Creates an input in the given starting mode.
    pub fn new(mode: InputMode) -> Self {
        Self {
            mode,
            selected_file: None,
            image_url: String::new(),
            preview: None,
            epoch: 0,
        }
    }

    /// Currently active mode.
    pub fn mode(&self) -> InputMode {
        self.mode
    }

    /// The selected file, if FILE mode has one.
    pub fn selected_file(&self) -> Option<&SelectedFile> {
        self.selected_file.as_ref()
    }

    /// The URL text, stored verbatim.
    pub fn image_url(&self) -> &str {
        &self.image_url
    }

    /// Preview of the currently selected query, if one is ready.
    pub fn preview(&self) -> Option<&PreviewReference> {
        self.preview.as_ref()
    }

    /// Switches the active mode, clearing the other mode's state.
    ///
    /// Switching to FILE clears the URL text; switching to URL clears the
    /// selected file and its preview. Switching to the mode already active
    /// is a no-op.
    pub fn set_mode(&mut self, new_mode: InputMode) {
        if self.mode == new_mode {
            return;
        }
        debug!(?new_mode, "switching input mode");
        self.mode = new_mode;
        self.epoch += 1;
        match new_mode {
            InputMode::File => {
                self.image_url.clear();
            }
            InputMode::Url => {
                self.selected_file = None;
                self.preview = None;
            }
        }
    }

    /// Stores a selected file and hands back the pending preview
    /// derivation.
    ///
    /// # Errors
    /// Returns [`ValidationError::InvalidFileType`] when the declared media
    /// type does not start with `image/`; state is left unchanged.
    pub fn set_file(&mut self, file: SelectedFile) -> Result<PendingPreview, ValidationError> {
        if !file.mime_type.starts_with("image/") {
            return Err(ValidationError::InvalidFileType {
                mime_type: file.mime_type,
            });
        }

        self.epoch += 1;
        let pending = PendingPreview {
            epoch: self.epoch,
            bytes: file.bytes.clone(),
            mime_type: file.mime_type.clone(),
        };
        debug!(file = %file.file_name, size = file.bytes.len(), "query file selected");
        self.selected_file = Some(file);
        Ok(pending)
    }

    /// Stores the URL text verbatim; no validation beyond the non-blank
    /// check at build time. The URL-mode preview is the literal text.
    pub fn set_url(&mut self, text: &str) {
        self.image_url = text.to_string();
        self.preview = if text.is_empty() {
            None
        } else {
            Some(PreviewReference::Url(text.to_string()))
        };
    }

    /// Applies a completed preview derivation.
    ///
    /// Returns `false` and leaves state untouched when the derivation is
    /// stale, i.e. the mode was switched or a newer file was selected
    /// after it was issued.
    pub fn apply_preview(&mut self, derived: DerivedPreview) -> bool {
        if derived.epoch != self.epoch {
            trace!(
                issued = derived.epoch,
                current = self.epoch,
                "discarding stale preview derivation"
            );
            return false;
        }
        self.preview = Some(derived.preview);
        true
    }
}

/// A preview derivation issued by [`QueryInput::set_file`] but not yet run.
///
/// Encoding is the component's single suspension point; the caller awaits
/// [`PendingPreview::derive`] and feeds the result back through
/// [`QueryInput::apply_preview`].
#[derive(Debug)]
pub struct PendingPreview {
    epoch: u64,
    bytes: Vec<u8>,
    mime_type: String,
}

impl PendingPreview {
    /// Encodes the file into a `data:` URI.
    pub async fn derive(self) -> DerivedPreview {
        let encoded = STANDARD.encode(&self.bytes);
        DerivedPreview {
            epoch: self.epoch,
            preview: PreviewReference::DataUri(format!(
                "data:{};base64,{}",
                self.mime_type, encoded
            )),
        }
    }
}

/// The outcome of a preview derivation, tagged with its issue epoch.
#[derive(Debug)]
pub struct DerivedPreview {
    epoch: u64,
    preview: PreviewReference,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png() -> SelectedFile {
        SelectedFile {
            bytes: vec![0x89, b'P', b'N', b'G'],
            mime_type: "image/png".into(),
            file_name: "photo.png".into(),
        }
    }

    #[test]
    fn rejects_non_image_file() {
        let mut input = QueryInput::new(InputMode::File);
        let err = input
            .set_file(SelectedFile {
                bytes: b"%PDF-1.4".to_vec(),
                mime_type: "application/pdf".into(),
                file_name: "doc.pdf".into(),
            })
            .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidFileType { .. }));
        assert!(input.selected_file().is_none());
    }

    #[test]
    fn mode_switch_keeps_at_most_one_side_populated() {
        let mut input = QueryInput::new(InputMode::File);
        let _ = input.set_file(png()).unwrap();
        assert!(input.selected_file().is_some());

        input.set_mode(InputMode::Url);
        assert!(input.selected_file().is_none());
        assert!(input.preview().is_none());

        input.set_url("https://example.com/x.jpg");
        assert_eq!(input.image_url(), "https://example.com/x.jpg");

        input.set_mode(InputMode::File);
        assert!(input.image_url().is_empty());
        assert!(input.selected_file().is_none());
    }

    #[test]
    fn switching_to_same_mode_is_a_no_op() {
        let mut input = QueryInput::new(InputMode::Url);
        input.set_url("https://example.com/a.png");
        input.set_mode(InputMode::Url);
        assert_eq!(input.image_url(), "https://example.com/a.png");
    }

    #[tokio::test]
    async fn preview_derivation_yields_data_uri() {
        let mut input = QueryInput::new(InputMode::File);
        let pending = input.set_file(png()).unwrap();
        let derived = pending.derive().await;
        assert!(input.apply_preview(derived));

        let preview = input.preview().unwrap();
        assert!(preview.as_str().starts_with("data:image/png;base64,"));
    }

    #[tokio::test]
    async fn stale_preview_is_discarded_after_mode_switch() {
        let mut input = QueryInput::new(InputMode::File);
        let pending = input.set_file(png()).unwrap();

        // Mode changes before the derivation completes.
        input.set_mode(InputMode::Url);
        let derived = pending.derive().await;
        assert!(!input.apply_preview(derived));
        assert!(input.preview().is_none());
    }

    #[tokio::test]
    async fn newer_selection_wins_over_older_derivation() {
        let mut input = QueryInput::new(InputMode::File);
        let first = input.set_file(png()).unwrap();
        let second = input
            .set_file(SelectedFile {
                bytes: vec![0xFF, 0xD8],
                mime_type: "image/jpeg".into(),
                file_name: "other.jpg".into(),
            })
            .unwrap();

        // Completion order is reversed; only the newest application sticks.
        assert!(input.apply_preview(second.derive().await));
        assert!(!input.apply_preview(first.derive().await));
        let preview = input.preview().unwrap();
        assert!(preview.as_str().starts_with("data:image/jpeg;base64,"));
    }

    #[test]
    fn url_preview_is_the_literal_url() {
        let mut input = QueryInput::new(InputMode::Url);
        input.set_url("https://example.com/x.jpg");
        assert_eq!(
            input.preview().map(|p| p.as_str()),
            Some("https://example.com/x.jpg")
        );

        input.set_url("");
        assert!(input.preview().is_none());
    }
}
