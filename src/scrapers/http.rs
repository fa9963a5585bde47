use crate::error::ScrapeError;
use crate::scrapers::html::HtmlPage;
use crate::scrapers::traits::{Page, PageSource};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// Page source that downloads server-rendered HTML without a browser.
///
/// Works for directories that render their result cards on the server; no
/// scripts run, so markers must be present in the initial response.
pub struct HttpPageSource {
    client: Client,
}

impl HttpPageSource {
    pub fn new(user_agent: &str) -> Result<Self, ScrapeError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(|e| ScrapeError::Setup(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client })
    }
}

#[async_trait(?Send)]
impl PageSource for HttpPageSource {
    async fn open(&self, url: &str, timeout: Duration) -> Result<Box<dyn Page>, ScrapeError> {
        debug!("Fetching URL: {}", url);

        let fetch_error = |e: reqwest::Error| {
            if e.is_timeout() {
                ScrapeError::Timeout {
                    what: url.to_string(),
                    timeout,
                }
            } else {
                ScrapeError::Navigation {
                    url: url.to_string(),
                    reason: e.to_string(),
                }
            }
        };

        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(fetch_error)?;

        if !response.status().is_success() {
            return Err(ScrapeError::Navigation {
                url: url.to_string(),
                reason: format!("status {}", response.status()),
            });
        }

        let html = response.text().await.map_err(fetch_error)?;
        debug!("Downloaded {} bytes of HTML", html.len());

        Ok(Box::new(HtmlPage::parse(&html)))
    }

    fn engine_name(&self) -> &'static str {
        "http"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn source() -> HttpPageSource {
        HttpPageSource::new("Mozilla/5.0").unwrap()
    }

    #[tokio::test]
    async fn open_parses_served_html() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"<div class="card result-card"><h3 class="result-business-name"><a href="/a">A</a></h3></div>"#,
            ))
            .mount(&server)
            .await;

        let page = source()
            .open(&format!("{}/search", server.uri()), Duration::from_secs(5))
            .await
            .unwrap();
        assert_eq!(page.query_all(".card.result-card").unwrap().len(), 1);
    }

    #[tokio::test]
    async fn error_status_is_a_navigation_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = source()
            .open(&format!("{}/search", server.uri()), Duration::from_secs(5))
            .await
            .err()
            .unwrap();
        assert!(matches!(err, ScrapeError::Navigation { .. }));
        assert!(err.is_unavailable());
    }

    #[tokio::test]
    async fn slow_response_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("<p>late</p>")
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let err = source()
            .open(&format!("{}/slow", server.uri()), Duration::from_millis(50))
            .await
            .err()
            .unwrap();
        assert!(matches!(err, ScrapeError::Timeout { .. }));
    }
}
