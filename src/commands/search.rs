use std::sync::Arc;

use serde_json::json;
use tokio::sync::oneshot;

use super::{CommandOutput, connect, ensure_loaded, print_json};
use crate::display::news_table;
use crate::error::{NewsdeskError, Result};
use crate::screens::SearchOverlay;
use crate::sync::{DebounceOutcome, Debouncer, SuggestionFetcher};

/// Run a search and load up to `pages` pages of results
pub async fn cmd_search(terms: &[String], pages: u32, output_json: bool) -> Result<()> {
    let text = terms.join(" ");
    if text.trim().is_empty() {
        return Err(NewsdeskError::Validation(
            "search needs at least one keyword".to_string(),
        ));
    }

    let (backend, config) = connect()?;
    let overlay = SearchOverlay::new(backend, &config);
    overlay.open();

    ensure_loaded(overlay.commit(&text).await, || overlay.load_error())?;
    let mut loaded = 1;
    while loaded < pages.max(1) && overlay.snapshot().has_more {
        ensure_loaded(overlay.load_more().await, || overlay.load_error())?;
        loaded += 1;
    }

    let items = overlay.items();
    let has_more = overlay.snapshot().has_more;
    let keywords = overlay.query().tokens().to_vec();
    overlay.close();

    if output_json {
        return print_json(&json!({
            "keywords": keywords,
            "items": items,
            "has_more": has_more,
        }));
    }

    if items.is_empty() {
        println!("No results for '{text}'.");
        return Ok(());
    }

    println!("{}", news_table(&items));
    let more = if has_more { " (more available)" } else { "" };
    println!("\n{} result(s){more}", items.len());
    Ok(())
}

/// Print suggestions for partial input, after the debounce delay
pub async fn cmd_suggest(text: &str, output_json: bool) -> Result<()> {
    let (backend, config) = connect()?;
    let debouncer = Debouncer::new(config.debounce_delay());
    let fetcher = Arc::new(SuggestionFetcher::new());

    let (tx, rx) = oneshot::channel();
    let lookup = Arc::clone(&fetcher);
    let outcome = debouncer.notify(text, move |text| async move {
        let suggestions = lookup.fetch(backend.as_ref(), &text).await;
        let _ = tx.send(suggestions.unwrap_or_default());
    });

    if outcome == DebounceOutcome::Cleared {
        return Err(NewsdeskError::Validation(
            "nothing to suggest for empty input".to_string(),
        ));
    }

    let suggestions = rx
        .await
        .map_err(|_| NewsdeskError::Other("suggestion lookup was cancelled".to_string()))?;

    let text_output = if suggestions.is_empty() {
        "No suggestions.".to_string()
    } else {
        suggestions.join("\n")
    };
    CommandOutput::new(json!(suggestions))
        .with_text(text_output)
        .print(output_json)
}
