use crate::error::ScrapeError;
use crate::scrapers::traits::{Element, Page};
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;

fn parse_selector(selector: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(selector).map_err(|e| ScrapeError::Selector {
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}

fn is_unrendered(el: &ElementRef<'_>) -> bool {
    matches!(el.value().name(), "script" | "style" | "template" | "noscript")
}

/// False for script, style and similar elements and anything nested in them
fn is_rendered(el: &ElementRef<'_>) -> bool {
    !is_unrendered(el)
        && !el
            .ancestors()
            .filter_map(ElementRef::wrap)
            .any(|ancestor| is_unrendered(&ancestor))
}

/// Page backed by an already-downloaded HTML document.
///
/// Nothing renders after load, so waiting for a marker is a single check.
pub struct HtmlPage {
    document: Html,
}

impl HtmlPage {
    pub fn parse(html: &str) -> Self {
        Self {
            document: Html::parse_document(html),
        }
    }
}

impl Page for HtmlPage {
    fn wait_for(&self, selector: &str, timeout: Duration) -> Result<(), ScrapeError> {
        let sel = parse_selector(selector)?;
        if self.document.select(&sel).next().is_some() {
            Ok(())
        } else {
            Err(ScrapeError::Timeout {
                what: selector.to_string(),
                timeout,
            })
        }
    }

    fn query_all(&self, selector: &str) -> Result<Vec<Box<dyn Element + '_>>, ScrapeError> {
        let sel = parse_selector(selector)?;
        Ok(self
            .document
            .select(&sel)
            .map(|el| Box::new(HtmlElement(el)) as Box<dyn Element + '_>)
            .collect())
    }

    fn find_by_text(&self, text: &str) -> Result<Option<Box<dyn Element + '_>>, ScrapeError> {
        let body = parse_selector("body")?;
        let Some(body) = self.document.select(&body).next() else {
            return Ok(None);
        };

        // Only rendered text counts: head, script and style content is skipped
        let found = body
            .descendants()
            .filter_map(ElementRef::wrap)
            .filter(is_rendered)
            .find(|el| {
                el.children()
                    .filter_map(|child| child.value().as_text())
                    .any(|t| t.contains(text))
            });
        Ok(found.map(|el| Box::new(HtmlElement(el)) as Box<dyn Element + '_>))
    }
}

pub struct HtmlElement<'a>(ElementRef<'a>);

impl Element for HtmlElement<'_> {
    fn text(&self) -> Result<String, ScrapeError> {
        Ok(self.0.text().collect::<String>())
    }

    fn attr(&self, name: &str) -> Result<Option<String>, ScrapeError> {
        Ok(self.0.value().attr(name).map(str::to_string))
    }

    fn query(&self, selector: &str) -> Result<Option<Box<dyn Element + '_>>, ScrapeError> {
        let sel = parse_selector(selector)?;
        Ok(self
            .0
            .select(&sel)
            .next()
            .map(|el| Box::new(HtmlElement(el)) as Box<dyn Element + '_>))
    }

    fn next_sibling_text(&self) -> Result<Option<String>, ScrapeError> {
        Ok(self
            .0
            .next_siblings()
            .find_map(ElementRef::wrap)
            .map(|el| el.text().collect::<String>()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CARD_HTML: &str = r#"
        <html><body>
          <div class="card result-card">
            <h3 class="result-business-name"><a href="/us/ca/acme">Acme Billing</a></h3>
            <a href="tel:4155552671">(415) 555-2671</a>
          </div>
          <div class="card result-card">
            <h3 class="result-business-name"><a href="/us/ca/zed">Zed Claims</a></h3>
          </div>
          <dl>
            <dt>Principal Contact</dt>
            <dd>  Jane <b>Doe</b> </dd>
          </dl>
        </body></html>
    "#;

    #[test]
    fn query_all_returns_cards_in_document_order() {
        let page = HtmlPage::parse(CARD_HTML);
        let cards = page.query_all(".card.result-card").unwrap();
        assert_eq!(cards.len(), 2);

        let link = cards[1].query("h3.result-business-name a").unwrap().unwrap();
        assert_eq!(link.text().unwrap(), "Zed Claims");
        assert_eq!(link.attr("href").unwrap().as_deref(), Some("/us/ca/zed"));
    }

    #[test]
    fn query_returns_none_for_missing_child() {
        let page = HtmlPage::parse(CARD_HTML);
        let cards = page.query_all(".card.result-card").unwrap();
        assert!(cards[1].query(r#"a[href^="tel:"]"#).unwrap().is_none());
    }

    #[test]
    fn wait_for_missing_marker_times_out() {
        let page = HtmlPage::parse(CARD_HTML);
        assert!(page.wait_for(".result-card", Duration::from_secs(5)).is_ok());
        let err = page
            .wait_for(".no-such-thing", Duration::from_secs(5))
            .unwrap_err();
        assert!(matches!(err, ScrapeError::Timeout { .. }));
    }

    #[test]
    fn find_by_text_reads_next_sibling() {
        let page = HtmlPage::parse(CARD_HTML);
        let label = page.find_by_text("Principal Contact").unwrap().unwrap();
        let contact = label.next_sibling_text().unwrap().unwrap();
        assert_eq!(contact.trim(), "Jane Doe");
    }

    #[test]
    fn find_by_text_ignores_title_and_script_text() {
        let page = HtmlPage::parse(
            r#"<html>
                 <head><title>Acme | Principal Contact info</title></head>
                 <body>
                   <script>window.labels = ["Principal Contact"];</script>
                   <style>.x::after { content: "Principal Contact"; }</style>
                   <span>ignored</span>
                   <dl><dt>Principal Contact</dt><dd>Jane Doe</dd></dl>
                 </body>
               </html>"#,
        );
        let label = page.find_by_text("Principal Contact").unwrap().unwrap();
        assert_eq!(label.text().unwrap(), "Principal Contact");
        assert_eq!(label.next_sibling_text().unwrap().as_deref(), Some("Jane Doe"));
    }

    #[test]
    fn find_by_text_outside_body_is_not_found() {
        let page = HtmlPage::parse(
            "<html><head><title>Principal Contact</title></head><body><p>About</p></body></html>",
        );
        assert!(page.find_by_text("Principal Contact").unwrap().is_none());
    }

    #[test]
    fn invalid_selector_is_reported() {
        let page = HtmlPage::parse(CARD_HTML);
        let err = page.query_all("h3[").err().unwrap();
        assert!(matches!(err, ScrapeError::Selector { .. }));
    }
}
