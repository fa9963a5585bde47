use crate::error::ScrapeError;
use crate::scrapers::traits::{Element, Page, PageSource};
use async_trait::async_trait;
use headless_chrome::util::Timeout;
use headless_chrome::{Browser, LaunchOptions, Tab};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

const NEXT_SIBLING_TEXT_JS: &str =
    "function() { return this.nextElementSibling ? this.nextElementSibling.innerText : null; }";

/// Page source driving a headless Chrome instance.
///
/// One browser process lives as long as this value; each opened page gets its
/// own tab, closed when the page is dropped.
pub struct ChromePageSource {
    browser: Browser,
    user_agent: String,
}

impl ChromePageSource {
    /// Launch headless Chrome
    pub fn launch(user_agent: &str) -> Result<Self, ScrapeError> {
        info!("Launching headless Chrome...");

        let options = LaunchOptions::default_builder()
            .headless(true)
            .build()
            .map_err(|e| ScrapeError::Setup(format!("failed to build launch options: {e}")))?;

        let browser = Browser::new(options)
            .map_err(|e| ScrapeError::Setup(format!("failed to launch Chrome browser: {e:#}")))?;

        Ok(Self {
            browser,
            user_agent: user_agent.to_string(),
        })
    }
}

#[async_trait(?Send)]
impl PageSource for ChromePageSource {
    async fn open(&self, url: &str, timeout: Duration) -> Result<Box<dyn Page>, ScrapeError> {
        let navigation_error = |e: anyhow::Error| ScrapeError::Navigation {
            url: url.to_string(),
            reason: format!("{e:#}"),
        };

        let tab = self.browser.new_tab().map_err(navigation_error)?;
        // Owned from here on, so every early return closes the tab.
        let page = ChromePage { tab };

        page.tab.set_default_timeout(timeout);
        page.tab
            .set_user_agent(&self.user_agent, None, None)
            .map_err(navigation_error)?;

        debug!("Navigating to {}", url);
        page.tab
            .navigate_to(url)
            .and_then(|tab| tab.wait_until_navigated())
            .map_err(|e| navigation_failure(url, timeout, e))?;

        Ok(Box::new(page))
    }

    fn engine_name(&self) -> &'static str {
        "chrome"
    }
}

pub struct ChromePage {
    tab: Arc<Tab>,
}

impl Page for ChromePage {
    fn wait_for(&self, selector: &str, timeout: Duration) -> Result<(), ScrapeError> {
        self.tab
            .wait_for_element_with_custom_timeout(selector, timeout)
            .map(|_| ())
            .map_err(|_| ScrapeError::Timeout {
                what: selector.to_string(),
                timeout,
            })
    }

    fn query_all(&self, selector: &str) -> Result<Vec<Box<dyn Element + '_>>, ScrapeError> {
        // find_elements errors when nothing matches
        let elements = self.tab.find_elements(selector).unwrap_or_default();
        Ok(elements
            .into_iter()
            .map(|el| Box::new(ChromeElement(el)) as Box<dyn Element + '_>)
            .collect())
    }

    fn find_by_text(&self, text: &str) -> Result<Option<Box<dyn Element + '_>>, ScrapeError> {
        Ok(self
            .tab
            .find_element_by_xpath(&label_xpath(text))
            .ok()
            .map(|el| Box::new(ChromeElement(el)) as Box<dyn Element + '_>))
    }
}

impl Drop for ChromePage {
    fn drop(&mut self) {
        if let Err(e) = self.tab.close(false) {
            warn!("Failed to close tab: {:#}", e);
        }
    }
}

pub struct ChromeElement<'a>(headless_chrome::Element<'a>);

impl ChromeElement<'_> {
    fn extraction_error(field: &'static str) -> impl Fn(anyhow::Error) -> ScrapeError {
        move |e| {
            debug!("Element read failed: {:#}", e);
            ScrapeError::Extraction { field }
        }
    }
}

impl Element for ChromeElement<'_> {
    fn text(&self) -> Result<String, ScrapeError> {
        self.0
            .get_inner_text()
            .map_err(Self::extraction_error("text"))
    }

    fn attr(&self, name: &str) -> Result<Option<String>, ScrapeError> {
        self.0
            .get_attribute_value(name)
            .map_err(Self::extraction_error("attribute"))
    }

    fn query(&self, selector: &str) -> Result<Option<Box<dyn Element + '_>>, ScrapeError> {
        // A missing child surfaces as an error from the protocol
        Ok(self
            .0
            .find_element(selector)
            .ok()
            .map(|el| Box::new(ChromeElement(el)) as Box<dyn Element + '_>))
    }

    fn next_sibling_text(&self) -> Result<Option<String>, ScrapeError> {
        let result = self
            .0
            .call_js_fn(NEXT_SIBLING_TEXT_JS, vec![], false)
            .map_err(Self::extraction_error("sibling text"))?;

        Ok(result
            .value
            .and_then(|value| value.as_str().map(str::to_string)))
    }
}

/// Classify a failed navigation: only an expired wait is a timeout
fn navigation_failure(url: &str, timeout: Duration, e: anyhow::Error) -> ScrapeError {
    if e.downcast_ref::<Timeout>().is_some() {
        ScrapeError::Timeout {
            what: url.to_string(),
            timeout,
        }
    } else {
        ScrapeError::Navigation {
            url: url.to_string(),
            reason: format!("{e:#}"),
        }
    }
}

/// First rendered body element whose own text contains `text`
fn label_xpath(text: &str) -> String {
    format!(
        "//body//*[not(self::script or self::style or self::noscript or self::template)]\
         [not(ancestor::script or ancestor::style or ancestor::noscript or ancestor::template)]\
         [text()[contains(., {})]]",
        xpath_literal(text)
    )
}

/// Quote `text` as an XPath string literal
fn xpath_literal(text: &str) -> String {
    if !text.contains('\'') {
        format!("'{text}'")
    } else if !text.contains('"') {
        format!("\"{text}\"")
    } else {
        let parts: Vec<String> = text.split('\'').map(|p| format!("'{p}'")).collect();
        format!("concat({})", parts.join(", \"'\", "))
    }
}
