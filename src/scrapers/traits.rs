use crate::error::ScrapeError;
use async_trait::async_trait;
use std::time::Duration;

/// Capability to open pages of a directory site.
///
/// Implemented by the headless browser, the plain HTTP fetcher and the test
/// fixtures, so the listing pipeline never depends on a concrete runtime.
#[async_trait(?Send)]
pub trait PageSource {
    /// Navigate to `url`, failing once `timeout` elapses
    async fn open(&self, url: &str, timeout: Duration) -> Result<Box<dyn Page>, ScrapeError>;

    /// Get the name of the page source engine
    fn engine_name(&self) -> &'static str;
}

/// A loaded page. Dropping it releases the underlying tab or document.
pub trait Page {
    /// Wait until at least one element matches `selector`
    fn wait_for(&self, selector: &str, timeout: Duration) -> Result<(), ScrapeError>;

    /// All elements matching `selector`, in document order
    fn query_all(&self, selector: &str) -> Result<Vec<Box<dyn Element + '_>>, ScrapeError>;

    /// First element whose own text contains `text`
    fn find_by_text(&self, text: &str) -> Result<Option<Box<dyn Element + '_>>, ScrapeError>;
}

pub trait Element {
    fn text(&self) -> Result<String, ScrapeError>;

    fn attr(&self, name: &str) -> Result<Option<String>, ScrapeError>;

    /// First descendant matching `selector`
    fn query(&self, selector: &str) -> Result<Option<Box<dyn Element + '_>>, ScrapeError>;

    /// Text of the next sibling element, if there is one
    fn next_sibling_text(&self) -> Result<Option<String>, ScrapeError>;
}
