//! Renders the session state. Reads only; exactly one of the results list,
//! the no-results message, or the error banner is shown per run.

use colored::Colorize;

use visual_search::config::search_config::SearchConfig;
use visual_search::models::{MatchResult, PreviewReference};
use visual_search::session_state::{SessionState, SessionView};

/// Prints the outcome of a completed submission.
pub fn render_session(cfg: &SearchConfig, state: &SessionState) {
    match state.view() {
        SessionView::Idle => {
            println!("{}", "No search has been run yet.".dimmed());
        }
        SessionView::ErrorBanner { message, retained } => {
            println!("{} {}", "error:".red().bold(), message.red());
            if !retained.is_empty() {
                println!();
                println!(
                    "{}",
                    "Results from the previous search are still valid:".dimmed()
                );
                render_preview(state.query_preview());
                render_matches(cfg, &retained);
            }
        }
        SessionView::NoMatches => {
            render_preview(state.query_preview());
            println!("{}", "No similar products found.".yellow());
        }
        SessionView::FilteredOut { total } => {
            render_preview(state.query_preview());
            println!(
                "{}",
                "No products match the current filter criteria".yellow()
            );
            println!(
                "{}",
                format!(
                    "Try lowering the similarity threshold ({} hidden by filter)",
                    total
                )
                .dimmed()
            );
        }
        SessionView::Results { visible, total } => {
            render_preview(state.query_preview());
            println!(
                "{}",
                format!("Similar Products Found: {}", visible.len())
                    .bold()
                    .underline()
            );
            render_matches(cfg, &visible);
            println!();
            print!("Showing {} of {} results", visible.len(), total);
            let hidden = total - visible.len();
            if hidden > 0 {
                print!("{}", format!("  ({hidden} hidden by filter)").yellow());
            }
            println!();
        }
    }
}

fn render_preview(preview: Option<&PreviewReference>) {
    match preview {
        Some(PreviewReference::Url(url)) => {
            println!("Query image: {}", url.cyan());
        }
        Some(PreviewReference::DataUri(uri)) => {
            // Inline previews are whole files; show the size, not the bytes.
            println!(
                "Query image: {}",
                format!("inline preview ({} chars)", uri.len()).cyan()
            );
        }
        None => {}
    }
    println!();
}

fn render_matches(cfg: &SearchConfig, matches: &[&MatchResult]) {
    for (index, m) in matches.iter().enumerate() {
        let score = format!("{:5.1}%", m.similarity);
        // High-confidence matches get the success color.
        let score = if m.similarity >= 80.0 {
            score.green().bold()
        } else {
            score.blue()
        };

        let badge = if index == 0 {
            format!(" {}", "Best Match".on_green().white().bold())
        } else {
            String::new()
        };

        println!(
            "{:>3}. {}  Product #{}{}",
            index + 1,
            score,
            m.product_id.bold(),
            badge
        );
        println!(
            "     gallery {}  {}",
            m.gallery_image_id,
            cfg.image_endpoint(&m.image_path).dimmed()
        );
    }
}
