//! In-memory page source for pipeline tests.

use crate::error::ScrapeError;
use crate::scrapers::html::HtmlPage;
use crate::scrapers::traits::{Element, Page, PageSource};
use async_trait::async_trait;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

/// Serves canned HTML by exact URL; unknown URLs time out.
#[derive(Default)]
pub struct FixturePageSource {
    pages: HashMap<String, String>,
    opened: RefCell<Vec<String>>,
    live_pages: Rc<Cell<usize>>,
}

impl FixturePageSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), html.to_string());
        self
    }

    /// URLs requested so far, in order
    pub fn opened(&self) -> Vec<String> {
        self.opened.borrow().clone()
    }

    /// Pages opened but not yet dropped
    pub fn live_pages(&self) -> usize {
        self.live_pages.get()
    }
}

#[async_trait(?Send)]
impl PageSource for FixturePageSource {
    async fn open(&self, url: &str, timeout: Duration) -> Result<Box<dyn Page>, ScrapeError> {
        self.opened.borrow_mut().push(url.to_string());
        let html = self.pages.get(url).ok_or_else(|| ScrapeError::Timeout {
            what: url.to_string(),
            timeout,
        })?;

        self.live_pages.set(self.live_pages.get() + 1);
        Ok(Box::new(TrackedPage {
            inner: HtmlPage::parse(html),
            live_pages: Rc::clone(&self.live_pages),
        }))
    }

    fn engine_name(&self) -> &'static str {
        "fixture"
    }
}

struct TrackedPage {
    inner: HtmlPage,
    live_pages: Rc<Cell<usize>>,
}

impl Page for TrackedPage {
    fn wait_for(&self, selector: &str, timeout: Duration) -> Result<(), ScrapeError> {
        self.inner.wait_for(selector, timeout)
    }

    fn query_all(&self, selector: &str) -> Result<Vec<Box<dyn Element + '_>>, ScrapeError> {
        self.inner.query_all(selector)
    }

    fn find_by_text(&self, text: &str) -> Result<Option<Box<dyn Element + '_>>, ScrapeError> {
        self.inner.find_by_text(text)
    }
}

impl Drop for TrackedPage {
    fn drop(&mut self) {
        self.live_pages.set(self.live_pages.get() - 1);
    }
}

/// Result card markup in the directory's layout
pub fn card(
    name: &str,
    href: &str,
    phone: Option<&str>,
    address: Option<&str>,
    accredited: bool,
) -> String {
    let phone = phone
        .map(|p| format!(r#"<a href="tel:{p}">{p}</a>"#))
        .unwrap_or_default();
    let address = address
        .map(|a| format!(r#"<p class="text-size-5 text-gray-70">{a}</p>"#))
        .unwrap_or_default();
    let badge = if accredited {
        r#"<img alt="Accredited Business" src="/seal.png">"#
    } else {
        ""
    };
    format!(
        r#"<div class="card result-card">
             <h3 class="result-business-name"><a href="{href}">{name}</a></h3>
             {phone}{address}{badge}
           </div>"#
    )
}

pub fn results_page(cards: &[String]) -> String {
    format!("<html><body><main>{}</main></body></html>", cards.concat())
}

pub fn detail_page(contact: &str) -> String {
    format!(
        "<html><body><dl><dt>Principal Contact</dt><dd>{contact}</dd></dl></body></html>"
    )
}
