use super::pager::PagerSnapshot;

/// Distance in pixels from the bottom at which the news feed asks for more
pub const FEED_SCROLL_THRESHOLD: f64 = 300.0;

/// Threshold used by every other paginated view
pub const DEFAULT_SCROLL_THRESHOLD: f64 = 100.0;

/// Scroll position of a scrollable region
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollMetrics {
    pub scroll_height: f64,
    pub scroll_top: f64,
    pub client_height: f64,
}

impl ScrollMetrics {
    pub fn new(scroll_height: f64, scroll_top: f64, client_height: f64) -> Self {
        Self {
            scroll_height,
            scroll_top,
            client_height,
        }
    }

    pub fn distance_to_bottom(&self) -> f64 {
        self.scroll_height - self.scroll_top - self.client_height
    }
}

/// Decides whether a scroll event should request the next page
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollTrigger {
    threshold: f64,
}

impl ScrollTrigger {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Fire when near the bottom, nothing is loading, more pages exist and
    /// there is already something on screen.
    pub fn should_fire(&self, metrics: &ScrollMetrics, pager: &PagerSnapshot) -> bool {
        metrics.distance_to_bottom() <= self.threshold
            && !pager.loading
            && !pager.loading_more
            && pager.has_more
            && pager.len > 0
    }
}

impl Default for ScrollTrigger {
    fn default() -> Self {
        Self::new(DEFAULT_SCROLL_THRESHOLD)
    }
}
