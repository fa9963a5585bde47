use crate::pipeline::pacing::Pacing;
use std::time::Duration;

/// CSS selectors and labels describing the directory's markup
#[derive(Debug, Clone)]
pub struct SiteProfile {
    /// Marker that signals the result list has rendered
    pub listing_marker: String,
    /// One match per search-result card
    pub card: String,
    /// Link carrying the business name and profile href
    pub name_link: String,
    pub phone: String,
    pub address: String,
    /// Present only on accredited listings
    pub accredited_badge: String,
    /// Label preceding the contact name on a detail page
    pub contact_label: String,
}

impl Default for SiteProfile {
    fn default() -> Self {
        Self {
            listing_marker: ".result-card".to_string(),
            card: ".card.result-card".to_string(),
            name_link: "h3.result-business-name a".to_string(),
            phone: r#"a[href^="tel:"]"#.to_string(),
            address: "p.text-size-5.text-gray-70".to_string(),
            accredited_badge: r#"img[alt="Accredited Business"]"#.to_string(),
            contact_label: "Principal Contact".to_string(),
        }
    }
}

/// Bounds and pacing for one scrape run
#[derive(Debug, Clone)]
pub struct ScrapeSettings {
    /// Highest results page to request
    pub max_pages: u32,
    pub page_timeout: Duration,
    /// How long to wait for `SiteProfile::listing_marker`
    pub marker_timeout: Duration,
    pub detail_timeout: Duration,
    /// Pause after a detail page loads so scripted content can render
    pub detail_settle: Duration,
    /// Once per results page
    pub page_delay: Pacing,
    /// Once per detail page
    pub detail_delay: Pacing,
    pub profile: SiteProfile,
}

impl Default for ScrapeSettings {
    fn default() -> Self {
        Self {
            max_pages: 2,
            page_timeout: Duration::from_secs(10),
            marker_timeout: Duration::from_secs(5),
            detail_timeout: Duration::from_secs(60),
            detail_settle: Duration::from_secs(3),
            page_delay: Pacing::from_secs(2.0, 3.5),
            detail_delay: Pacing::from_secs(1.0, 2.0),
            profile: SiteProfile::default(),
        }
    }
}
