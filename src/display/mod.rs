//! Terminal rendering for news items and publishers.

use jiff::Timestamp;
use owo_colors::{OwoColorize, Stream};
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::types::{ItemStatus, NewsItem, Publisher};

const TITLE_WIDTH: usize = 60;
const DESCRIPTION_WIDTH: usize = 50;

pub fn format_status_colored(status: ItemStatus) -> String {
    format_status_colored_with_format(status, |s| format!("[{s}]"))
}

pub fn format_status_colored_with_format<F>(status: ItemStatus, format_fn: F) -> String
where
    F: Fn(&str) -> String,
{
    let badge = format_fn(status.as_wire());
    match status {
        ItemStatus::Pending => badge
            .if_supports_color(Stream::Stdout, |b| b.yellow())
            .to_string(),
        ItemStatus::Synced => badge
            .if_supports_color(Stream::Stdout, |b| b.green())
            .to_string(),
        ItemStatus::Failed => badge
            .if_supports_color(Stream::Stdout, |b| b.red())
            .to_string(),
    }
}

pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{truncated}...")
    }
}

/// Date part of a timestamp (UTC), or `-`
pub fn format_date(ts: Option<Timestamp>) -> String {
    ts.map(|t| t.strftime("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// A row in the news table
#[derive(Debug, Tabled)]
pub struct NewsRow {
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "Status")]
    pub status: String,
    #[tabled(rename = "Published")]
    pub published: String,
    #[tabled(rename = "Title")]
    pub title: String,
}

impl From<&NewsItem> for NewsRow {
    fn from(item: &NewsItem) -> Self {
        let title = if item.title.is_empty() {
            item.url.clone().unwrap_or_else(|| "(untitled)".to_string())
        } else {
            item.title.clone()
        };
        Self {
            id: item.id.to_string(),
            status: item.status.to_string(),
            published: format_date(item.published_at),
            title: truncate_string(&title, TITLE_WIDTH),
        }
    }
}

/// A row in the publisher table
#[derive(Debug, Tabled)]
pub struct PublisherRow {
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Domain")]
    pub domain: String,
    #[tabled(rename = "Description")]
    pub description: String,
}

impl From<&Publisher> for PublisherRow {
    fn from(publisher: &Publisher) -> Self {
        Self {
            id: publisher.id.to_string(),
            name: publisher.name.clone(),
            domain: publisher.domain.clone(),
            description: publisher
                .description
                .as_deref()
                .map(|d| truncate_string(d, DESCRIPTION_WIDTH))
                .unwrap_or_else(|| "-".to_string()),
        }
    }
}

pub fn news_table(items: &[NewsItem]) -> String {
    let rows: Vec<NewsRow> = items.iter().map(NewsRow::from).collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table.to_string()
}

pub fn publisher_table(publishers: &[Publisher]) -> String {
    let rows: Vec<PublisherRow> = publishers.iter().map(PublisherRow::from).collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table.to_string()
}

/// Multi-line detail view of one article
pub fn format_news_detail(item: &NewsItem) -> String {
    let mut out = String::new();
    let title = if item.title.is_empty() {
        "(not scraped yet)"
    } else {
        item.title.as_str()
    };
    out.push_str(&format!(
        "{} {}\n",
        format_status_colored(item.status),
        title.if_supports_color(Stream::Stdout, |t| t.bold())
    ));
    out.push_str(&format!("id:        {}\n", item.id));
    if let Some(url) = &item.url {
        out.push_str(&format!("url:       {url}\n"));
    }
    if let Some(publisher) = &item.publisher {
        out.push_str(&format!("publisher: {publisher}\n"));
    }
    if let Some(author) = &item.author {
        out.push_str(&format!("author:    {author}\n"));
    }
    out.push_str(&format!("published: {}\n", format_date(item.published_at)));
    if let Some(content) = item.content.as_deref().filter(|c| !c.is_empty()) {
        out.push('\n');
        out.push_str(content);
        out.push('\n');
    }
    out
}
