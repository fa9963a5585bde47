use crate::error::ScrapeError;
use crate::models::{Accreditation, ListingRecord, RawCardFields};
use crate::pipeline::dedup::SeenKeys;
use crate::pipeline::enrich::DetailEnricher;
use crate::pipeline::normalize::normalize;
use crate::scrapers::traits::{Element, PageSource};
use crate::scrapers::types::{ScrapeSettings, SiteProfile};
use tracing::{debug, info, warn};
use url::Url;

/// Counters reported at the end of a run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunStats {
    pub pages: u32,
    pub cards: usize,
    pub skipped: usize,
    pub duplicates: usize,
    pub accepted: usize,
}

/// Walks the paginated search results of a directory and collects listings
pub struct ListingAcquirer<'a> {
    source: &'a dyn PageSource,
    settings: &'a ScrapeSettings,
}

impl<'a> ListingAcquirer<'a> {
    pub fn new(source: &'a dyn PageSource, settings: &'a ScrapeSettings) -> Self {
        Self { source, settings }
    }

    /// Scrape up to `max_pages` result pages starting at `start_url`.
    ///
    /// Stops early at the first page that fails to load or shows no cards.
    /// Only an unparseable `start_url` is an error.
    pub async fn acquire(&self, start_url: &str) -> Result<Vec<ListingRecord>, ScrapeError> {
        let start = Url::parse(start_url).map_err(|source| ScrapeError::InvalidUrl {
            url: start_url.to_string(),
            source,
        })?;

        let profile = &self.settings.profile;
        let enricher = DetailEnricher::new(self.source, self.settings);
        let mut seen = SeenKeys::new();
        let mut listings = Vec::new();
        let mut stats = RunStats::default();

        for page_num in 1..=self.settings.max_pages {
            let url = page_url(&start, page_num);
            info!("Fetching: {}", url);

            let page = match self.source.open(url.as_str(), self.settings.page_timeout).await {
                Ok(page) => page,
                Err(e) if e.is_unavailable() => {
                    info!("No more pages after {}: {}", page_num - 1, e);
                    break;
                }
                Err(e) => {
                    warn!("Could not load page {}: {}", page_num, e);
                    break;
                }
            };

            if let Err(e) = page.wait_for(&profile.listing_marker, self.settings.marker_timeout) {
                info!("No listings found on page {} ({})", page_num, e);
                break;
            }

            let cards = match page.query_all(&profile.card) {
                Ok(cards) => cards,
                Err(e) => {
                    warn!("Could not query cards on page {}: {}", page_num, e);
                    break;
                }
            };
            if cards.is_empty() {
                info!("No listings found on page {}", page_num);
                break;
            }

            info!("Found {} cards on page {}", cards.len(), page_num);
            stats.pages += 1;

            for (idx, card) in cards.iter().enumerate() {
                stats.cards += 1;

                let raw = match extract_card(card.as_ref(), &start, profile) {
                    Ok(raw) => raw,
                    Err(e) => {
                        warn!("Error scraping card {} on page {}: {}", idx, page_num, e);
                        stats.skipped += 1;
                        continue;
                    }
                };
                info!("Current scraping company: {}", raw.name);

                let detail = enricher.enrich(&raw.url).await;
                let record = normalize(&raw, &detail);

                if seen.is_new(&record) {
                    listings.push(record);
                    stats.accepted += 1;
                } else {
                    debug!("Skipping duplicate listing {}", record.url);
                    stats.duplicates += 1;
                }
            }

            drop(cards);
            drop(page);
            self.settings.page_delay.pause().await;
        }

        info!(
            pages = stats.pages,
            cards = stats.cards,
            skipped = stats.skipped,
            duplicates = stats.duplicates,
            accepted = stats.accepted,
            unique_keys = seen.len(),
            "Scrape finished"
        );

        Ok(listings)
    }
}

/// `start` with `page=<page_num>` appended to its query
pub fn page_url(start: &Url, page_num: u32) -> Url {
    let mut url = start.clone();
    url.query_pairs_mut()
        .append_pair("page", &page_num.to_string());
    url
}

/// Read one result card. Name and profile link are required.
pub fn extract_card(
    card: &dyn Element,
    base: &Url,
    profile: &SiteProfile,
) -> Result<RawCardFields, ScrapeError> {
    let link = card
        .query(&profile.name_link)?
        .ok_or(ScrapeError::Extraction { field: "name" })?;
    let name = link.text()?.trim().to_string();
    let href = link
        .attr("href")?
        .ok_or(ScrapeError::Extraction { field: "profile link" })?;
    let url = base
        .join(href.trim())
        .map_err(|source| ScrapeError::InvalidUrl {
            url: href.clone(),
            source,
        })?;

    let phone = card.query(&profile.phone)?.map(|el| el.text()).transpose()?;
    let address = card
        .query(&profile.address)?
        .map(|el| el.text())
        .transpose()?;
    let accreditation = if card.query(&profile.accredited_badge)?.is_some() {
        Accreditation::Accredited
    } else {
        Accreditation::NotAccredited
    };

    Ok(RawCardFields {
        name,
        url: url.to_string(),
        phone,
        address,
        accreditation: Some(accreditation),
    })
}

#[cfg(test)]
#[path = "acquire_test.rs"]
mod tests;
