//! Scripted in-memory backend for driving the screens in tests.

use std::collections::VecDeque;
use std::time::Duration;

use parking_lot::Mutex;

use newsdesk::api::{ApiError, ErrorCode, NewsBackend};
use newsdesk::error::{NewsdeskError, Result};
use newsdesk::query::{NewsFilter, PageDescriptor, Query};
use newsdesk::types::{
    CreateNews, CreatePublisher, ItemId, ItemStatus, NewsItem, Page, Pagination, Publisher,
};

/// One recorded backend call
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Suggestions(Vec<String>),
    Search {
        keywords: Vec<String>,
        page: u32,
        size: u32,
    },
    List {
        filter: NewsFilter,
        page: u32,
        size: u32,
    },
    GetNews(ItemId),
    CreateNews(CreateNews),
    DeleteNews(ItemId),
    ListPublishers {
        page: u32,
        size: u32,
    },
    CreatePublisher(CreatePublisher),
}

/// A queued answer: optional latency, then success or an HTTP status
struct Scripted<T> {
    delay: Duration,
    result: std::result::Result<T, Failure>,
}

#[derive(Clone)]
enum Failure {
    Status(u16, Option<ErrorCode>),
    Transport,
}

impl Failure {
    fn into_error(self) -> NewsdeskError {
        match self {
            Failure::Status(status, None) => ApiError::new(status).into(),
            Failure::Status(status, Some(code)) => {
                ApiError::new(status).with_detail(code, "rejected").into()
            }
            Failure::Transport => NewsdeskError::Other("connection refused".to_string()),
        }
    }
}

async fn answer<T>(scripted: Option<Scripted<T>>, fallback: impl FnOnce() -> T) -> Result<T> {
    match scripted {
        Some(s) => {
            if !s.delay.is_zero() {
                tokio::time::sleep(s.delay).await;
            }
            s.result.map_err(Failure::into_error)
        }
        None => Ok(fallback()),
    }
}

/// Backend whose answers are queued up front; every call is recorded.
///
/// Empty queues answer with an empty page / empty list. Status lookups
/// without a scripted answer report the item as still pending.
#[derive(Default)]
pub struct ScriptedBackend {
    calls: Mutex<Vec<Call>>,
    suggestions: Mutex<VecDeque<Scripted<Vec<String>>>>,
    search: Mutex<VecDeque<Scripted<Page<NewsItem>>>>,
    list: Mutex<VecDeque<Scripted<Page<NewsItem>>>>,
    statuses: Mutex<VecDeque<Scripted<NewsItem>>>,
    created_news: Mutex<VecDeque<Scripted<NewsItem>>>,
    deletions: Mutex<VecDeque<Scripted<()>>>,
    publishers: Mutex<VecDeque<Scripted<Page<Publisher>>>>,
    created_publishers: Mutex<VecDeque<Scripted<Publisher>>>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.lock().iter().filter(|c| pred(c)).count()
    }

    pub fn status_checks(&self, id: &str) -> usize {
        self.count(|c| matches!(c, Call::GetNews(got) if got.as_str() == id))
    }

    fn record(&self, call: Call) {
        self.calls.lock().push(call);
    }

    // ------------------------------------------------------------------
    // Scripting
    // ------------------------------------------------------------------

    pub fn suggest(&self, list: &[&str], delay: Duration) -> &Self {
        self.suggestions.lock().push_back(Scripted {
            delay,
            result: Ok(list.iter().map(|s| s.to_string()).collect()),
        });
        self
    }

    pub fn suggest_failure(&self, status: u16) -> &Self {
        self.suggestions.lock().push_back(Scripted {
            delay: Duration::ZERO,
            result: Err(Failure::Status(status, None)),
        });
        self
    }

    pub fn search_page(&self, page: Page<NewsItem>, delay: Duration) -> &Self {
        self.search.lock().push_back(Scripted {
            delay,
            result: Ok(page),
        });
        self
    }

    pub fn list_page(&self, page: Page<NewsItem>, delay: Duration) -> &Self {
        self.list.lock().push_back(Scripted {
            delay,
            result: Ok(page),
        });
        self
    }

    pub fn list_failure(&self, status: u16) -> &Self {
        self.list.lock().push_back(Scripted {
            delay: Duration::ZERO,
            result: Err(Failure::Status(status, None)),
        });
        self
    }

    pub fn list_transport_failure(&self) -> &Self {
        self.list.lock().push_back(Scripted {
            delay: Duration::ZERO,
            result: Err(Failure::Transport),
        });
        self
    }

    /// Queue one status lookup answer per entry
    pub fn statuses(&self, id: &str, statuses: &[ItemStatus]) -> &Self {
        let mut queue = self.statuses.lock();
        for status in statuses {
            let mut item = NewsItem::new(id, "", *status);
            if status.is_terminal() {
                item.title = format!("Scraped article {id}");
                item.author = Some("Wire desk".to_string());
            }
            queue.push_back(Scripted {
                delay: Duration::ZERO,
                result: Ok(item),
            });
        }
        self
    }

    pub fn status_failure(&self, status: u16) -> &Self {
        self.statuses.lock().push_back(Scripted {
            delay: Duration::ZERO,
            result: Err(Failure::Status(status, None)),
        });
        self
    }

    pub fn create_news_ok(&self, item: NewsItem) -> &Self {
        self.created_news.lock().push_back(Scripted {
            delay: Duration::ZERO,
            result: Ok(item),
        });
        self
    }

    pub fn create_news_failure(&self, status: u16, code: Option<ErrorCode>) -> &Self {
        self.created_news.lock().push_back(Scripted {
            delay: Duration::ZERO,
            result: Err(Failure::Status(status, code)),
        });
        self
    }

    pub fn delete_failure(&self, status: u16) -> &Self {
        self.deletions.lock().push_back(Scripted {
            delay: Duration::ZERO,
            result: Err(Failure::Status(status, None)),
        });
        self
    }

    pub fn publisher_page(&self, page: Page<Publisher>) -> &Self {
        self.publishers.lock().push_back(Scripted {
            delay: Duration::ZERO,
            result: Ok(page),
        });
        self
    }

    pub fn create_publisher_ok(&self, publisher: Publisher) -> &Self {
        self.created_publishers.lock().push_back(Scripted {
            delay: Duration::ZERO,
            result: Ok(publisher),
        });
        self
    }

    pub fn create_publisher_failure(&self, status: u16) -> &Self {
        self.created_publishers.lock().push_back(Scripted {
            delay: Duration::ZERO,
            result: Err(Failure::Status(status, None)),
        });
        self
    }
}

impl NewsBackend for ScriptedBackend {
    async fn suggestions(&self, query: &Query) -> Result<Vec<String>> {
        self.record(Call::Suggestions(query.tokens().to_vec()));
        let next = self.suggestions.lock().pop_front();
        answer(next, Vec::new).await
    }

    async fn search_news(&self, query: &Query, page: PageDescriptor) -> Result<Page<NewsItem>> {
        self.record(Call::Search {
            keywords: query.tokens().to_vec(),
            page: page.page(),
            size: page.size(),
        });
        let next = self.search.lock().pop_front();
        answer(next, || Page::new(Vec::new())).await
    }

    async fn list_news(&self, filter: &NewsFilter, page: PageDescriptor) -> Result<Page<NewsItem>> {
        self.record(Call::List {
            filter: filter.clone(),
            page: page.page(),
            size: page.size(),
        });
        let next = self.list.lock().pop_front();
        answer(next, || Page::new(Vec::new())).await
    }

    async fn get_news(&self, id: &ItemId) -> Result<NewsItem> {
        self.record(Call::GetNews(id.clone()));
        let next = self.statuses.lock().pop_front();
        let id = id.clone();
        answer(next, move || NewsItem::new(id, "", ItemStatus::Pending)).await
    }

    async fn create_news(&self, request: &CreateNews) -> Result<NewsItem> {
        self.record(Call::CreateNews(request.clone()));
        let next = self.created_news.lock().pop_front();
        let url = request.url.clone();
        answer(next, move || {
            let mut item = NewsItem::new("new", "", ItemStatus::Pending);
            item.url = Some(url);
            item
        })
        .await
    }

    async fn delete_news(&self, id: &ItemId) -> Result<()> {
        self.record(Call::DeleteNews(id.clone()));
        let next = self.deletions.lock().pop_front();
        answer(next, || ()).await
    }

    async fn list_publishers(&self, page: PageDescriptor) -> Result<Page<Publisher>> {
        self.record(Call::ListPublishers {
            page: page.page(),
            size: page.size(),
        });
        let next = self.publishers.lock().pop_front();
        answer(next, || Page::new(Vec::new())).await
    }

    async fn create_publisher(&self, request: &CreatePublisher) -> Result<Publisher> {
        self.record(Call::CreatePublisher(request.clone()));
        let next = self.created_publishers.lock().pop_front();
        let request = request.clone();
        answer(next, move || Publisher {
            id: ItemId::from("p-new"),
            name: request.name,
            domain: request.domain,
            description: request.description,
            created_at: None,
        })
        .await
    }
}

/// News items with ids `start..end`, all synced
pub fn news_items(start: u64, end: u64) -> Vec<NewsItem> {
    (start..end)
        .map(|i| NewsItem::new(i, format!("Story {i}"), ItemStatus::Synced))
        .collect()
}

/// A page carrying pagination metadata
pub fn page_of<T>(items: Vec<T>, page: u32, size: u32, total: u64) -> Page<T> {
    let total_pages = total.div_ceil(u64::from(size)) as u32;
    Page::new(items).with_pagination(Pagination {
        page,
        size,
        total,
        total_pages,
    })
}
