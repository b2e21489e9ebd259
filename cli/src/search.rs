use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use tracing::debug;

use visual_search::MatcherError;
use visual_search::config::config_from_env;
use visual_search::config::search_config::SearchConfig;
use visual_search::query_input::{InputMode, SelectedFile};
use visual_search::search_session::SearchSession;

use crate::render;

#[derive(Args, Debug)]
pub struct SearchFileArgs {
    /// Path to the query image
    #[arg(value_name = "FILE", value_hint = clap::ValueHint::FilePath)]
    pub file: PathBuf,

    /// Hide matches below this similarity percentage (0-100)
    #[arg(long = "min-similarity", default_value_t = 0)]
    pub min_similarity: i64,
}

#[derive(Args, Debug)]
pub struct SearchUrlArgs {
    /// URL of the query image
    #[arg(value_name = "URL")]
    pub url: String,

    /// Hide matches below this similarity percentage (0-100)
    #[arg(long = "min-similarity", default_value_t = 0)]
    pub min_similarity: i64,
}

/// Runs a FILE-mode search end to end.
pub async fn execute_file(args: SearchFileArgs) -> Result<()> {
    let cfg = config_from_env()?;
    let mut session = SearchSession::new(&cfg)?;
    session.set_threshold(args.min_similarity)?;

    session.input_mut().set_mode(InputMode::File);

    let bytes = tokio::fs::read(&args.file)
        .await
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    let file_name = args
        .file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "query".to_string());
    let mime_type = mime_for_path(&args.file);
    debug!(file = %file_name, %mime_type, size = bytes.len(), "selecting query file");

    let pending = session.input_mut().set_file(SelectedFile {
        bytes,
        mime_type,
        file_name,
    })?;
    let derived = pending.derive().await;
    session.input_mut().apply_preview(derived);

    submit_and_render(&cfg, &mut session).await
}

/// Runs a URL-mode search end to end.
pub async fn execute_url(args: SearchUrlArgs) -> Result<()> {
    let cfg = config_from_env()?;
    let mut session = SearchSession::new(&cfg)?;
    session.set_threshold(args.min_similarity)?;

    session.input_mut().set_mode(InputMode::Url);
    session.input_mut().set_url(&args.url);

    submit_and_render(&cfg, &mut session).await
}

async fn submit_and_render(cfg: &SearchConfig, session: &mut SearchSession) -> Result<()> {
    let outcome = session.submit().await.map(|_| ());
    match outcome {
        // Remote failures are already in the session state and render as
        // the error banner; only local validation problems abort here.
        Ok(()) | Err(MatcherError::Search(_)) => {
            render::render_session(cfg, session.state());
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

/// Declares a media type from the file extension, over the set the
/// service accepts. Anything else is left for the image check to reject.
fn mime_for_path(path: &Path) -> String {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_image_extensions_map_to_image_types() {
        assert_eq!(mime_for_path(Path::new("a/photo.PNG")), "image/png");
        assert_eq!(mime_for_path(Path::new("q.jpeg")), "image/jpeg");
        assert_eq!(mime_for_path(Path::new("anim.gif")), "image/gif");
        assert_eq!(mime_for_path(Path::new("pic.webp")), "image/webp");
    }

    #[test]
    fn unknown_extensions_are_not_claimed_as_images() {
        assert_eq!(mime_for_path(Path::new("doc.pdf")), "application/octet-stream");
        assert_eq!(mime_for_path(Path::new("no_extension")), "application/octet-stream");
    }
}
