use jiff::Timestamp;
use owo_colors::OwoColorize;
use serde_json::json;

use super::{CommandOutput, connect, ensure_loaded, print_json, toast_error};
use crate::api::NewsBackend;
use crate::display::{format_news_detail, format_status_colored, news_table};
use crate::error::Result;
use crate::query::NewsFilter;
use crate::screens::NewsFeed;
use crate::sync::PollOutcome;
use crate::toast::Toast;
use crate::types::{Category, ItemId, ItemStatus};

/// Options for `news ls`
#[derive(Debug, Clone, Default)]
pub struct NewsLsOptions {
    pub from: Option<Timestamp>,
    pub to: Option<Timestamp>,
    pub status: Option<ItemStatus>,
    /// Pages to load (at least one)
    pub pages: u32,
    pub json: bool,
}

/// List news items, loading up to `pages` pages
pub async fn cmd_news_ls(options: NewsLsOptions) -> Result<()> {
    let (backend, config) = connect()?;
    let feed = NewsFeed::new(backend, &config);

    let mut filter = NewsFilter::new().with_range(options.from, options.to);
    if let Some(status) = options.status {
        filter = filter.with_status(status);
    }

    ensure_loaded(feed.set_filter(filter).await, || feed.load_error())?;
    let mut loaded = 1;
    while loaded < options.pages.max(1) && feed.snapshot().has_more {
        ensure_loaded(feed.load_more().await, || feed.load_error())?;
        loaded += 1;
    }

    let items = feed.items();
    if options.json {
        return print_json(&json!({
            "items": items,
            "has_more": feed.snapshot().has_more,
            "pagination": feed.pager().pagination(),
        }));
    }

    if items.is_empty() {
        println!("No news items found.");
        return Ok(());
    }

    println!("{}", news_table(&items));
    match feed.pager().pagination() {
        Some(p) => println!("\n{} of {} item(s)", items.len(), p.total),
        None => println!("\n{} item(s)", items.len()),
    }
    Ok(())
}

/// Show one news item
pub async fn cmd_news_show(id: &str, output_json: bool) -> Result<()> {
    let (backend, _config) = connect()?;
    let item = backend.get_news(&ItemId::from(id)).await?;

    CommandOutput::new(json!(item))
        .with_text(format_news_detail(&item).trim_end().to_string())
        .print(output_json)
}

/// Submit an article; with `follow`, wait for the backend to process it
pub async fn cmd_news_add(
    url: &str,
    category: Category,
    follow: bool,
    output_json: bool,
) -> Result<()> {
    let (backend, config) = connect()?;
    let feed = NewsFeed::new(backend, &config);

    let (item, toast) = feed.create(url, category).await.map_err(toast_error)?;
    if !output_json {
        println!("{toast}");
        println!("{} {}", format_status_colored(item.status), item.id.cyan());
    }

    if !follow || item.status.is_terminal() {
        if output_json {
            print_json(&json!({ "item": item }))?;
        }
        return Ok(());
    }

    if !output_json {
        eprintln!(
            "{}",
            Toast::info(format!(
                "Waiting for the backend to process the article (checking every {}s, up to {} times)...",
                config.poll.interval_secs, config.poll.max_attempts
            ))
        );
    }

    let outcome = feed.wait_for_poll().await;
    let current = feed
        .items()
        .into_iter()
        .find(|i| i.id == item.id)
        .unwrap_or(item);

    let (result, text) = match outcome {
        Some(PollOutcome::Settled(status)) => (
            json!({ "settled": true, "status": status }),
            format!(
                "{} {}",
                format_status_colored(status),
                if current.title.is_empty() {
                    current.id.to_string()
                } else {
                    current.title.clone()
                }
            ),
        ),
        Some(PollOutcome::Exhausted { attempts }) => (
            json!({ "settled": false, "attempts": attempts }),
            Toast::warning(format!(
                "Still pending after {attempts} checks; run `newsdesk news show {}` later",
                current.id
            ))
            .to_string(),
        ),
        None => (
            json!({ "settled": false }),
            Toast::warning("Polling was interrupted").to_string(),
        ),
    };

    CommandOutput::new(json!({ "item": current, "poll": result }))
        .with_text(text)
        .print(output_json)
}

/// Delete a news item
pub async fn cmd_news_rm(id: &str, output_json: bool) -> Result<()> {
    let (backend, config) = connect()?;
    let feed = NewsFeed::new(backend, &config);
    let id = ItemId::from(id);

    let ((), toast) = feed.delete(&id).await.map_err(toast_error)?;

    CommandOutput::new(json!({ "action": "news_rm", "id": id, "success": true }))
        .with_text(format!("{toast} ({})", id.cyan()))
        .print(output_json)
}
