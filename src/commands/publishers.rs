use owo_colors::OwoColorize;
use serde_json::json;

use super::{CommandOutput, connect, ensure_loaded, print_json, toast_error};
use crate::display::publisher_table;
use crate::error::Result;
use crate::screens::PublisherList;

/// List publishers, loading up to `pages` pages
pub async fn cmd_publishers_ls(pages: u32, output_json: bool) -> Result<()> {
    let (backend, config) = connect()?;
    let list = PublisherList::new(backend, &config);

    ensure_loaded(list.load().await, || list.load_error())?;
    let mut loaded = 1;
    while loaded < pages.max(1) && list.snapshot().has_more {
        ensure_loaded(list.load_more().await, || list.load_error())?;
        loaded += 1;
    }

    let publishers = list.items();
    if output_json {
        return print_json(&json!({
            "publishers": publishers,
            "has_more": list.snapshot().has_more,
            "pagination": list.pager().pagination(),
        }));
    }

    if publishers.is_empty() {
        println!("No publishers found.");
        return Ok(());
    }

    println!("{}", publisher_table(&publishers));
    println!("\n{} publisher(s)", publishers.len());
    Ok(())
}

/// Register a publisher
pub async fn cmd_publishers_add(
    name: &str,
    domain: &str,
    description: Option<&str>,
    output_json: bool,
) -> Result<()> {
    let (backend, config) = connect()?;
    let list = PublisherList::new(backend, &config);

    let (publisher, toast) = list
        .create(name, domain, description)
        .await
        .map_err(toast_error)?;

    let text = format!(
        "{toast}\n{} {} ({})",
        publisher.id.cyan(),
        publisher.name,
        publisher.domain
    );
    CommandOutput::new(json!(publisher))
        .with_text(text)
        .print(output_json)
}
