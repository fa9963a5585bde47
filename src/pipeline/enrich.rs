use crate::error::ScrapeError;
use crate::models::DetailFields;
use crate::scrapers::traits::{Page, PageSource};
use crate::scrapers::types::ScrapeSettings;
use tracing::{debug, warn};

/// Visits listing detail pages to pick up fields the result cards lack
pub struct DetailEnricher<'a> {
    source: &'a dyn PageSource,
    settings: &'a ScrapeSettings,
}

impl<'a> DetailEnricher<'a> {
    pub fn new(source: &'a dyn PageSource, settings: &'a ScrapeSettings) -> Self {
        Self { source, settings }
    }

    /// Read the principal contact from `url`.
    ///
    /// Never fails: any problem is logged and yields empty fields.
    pub async fn enrich(&self, url: &str) -> DetailFields {
        let page = match self.source.open(url, self.settings.detail_timeout).await {
            Ok(page) => page,
            Err(e) => {
                warn!("Error visiting detail page {}: {}", url, e);
                return DetailFields::default();
            }
        };

        tokio::time::sleep(self.settings.detail_settle).await;

        let principal_contact = match self.read_principal_contact(page.as_ref()) {
            Ok(contact) => contact,
            Err(e) => {
                warn!("Error reading detail page {}: {}", url, e);
                None
            }
        };
        if principal_contact.is_none() {
            debug!("No principal contact on {}", url);
        }

        self.settings.detail_delay.pause().await;
        drop(page);

        DetailFields { principal_contact }
    }

    fn read_principal_contact(&self, page: &dyn Page) -> Result<Option<String>, ScrapeError> {
        let Some(label) = page.find_by_text(&self.settings.profile.contact_label)? else {
            return Ok(None);
        };
        Ok(label
            .next_sibling_text()?
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty()))
    }
}
