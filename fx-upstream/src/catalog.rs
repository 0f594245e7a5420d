//! Catalog of quotable pairs, published by the provider as XML.
//!
//! The document has one root element whose direct children are the pairs:
//! the child's tag is the pair key and its text the description.
//!
//! ```xml
//! <xml>
//!   <USD-BRL>Dólar Americano/Real Brasileiro</USD-BRL>
//!   <EUR-BRL>Euro/Real Brasileiro</EUR-BRL>
//! </xml>
//! ```

use std::collections::BTreeMap;

use async_trait::async_trait;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use reqwest::Client;
use tracing::{debug, warn};

use fx_types::{CatalogError, CatalogSource, PairCatalog};

/// Where the provider publishes its catalog.
pub const DEFAULT_CATALOG_URL: &str = "https://economia.awesomeapi.com.br/xml/available";

/// Fetches the catalog document over HTTP on every call.
pub struct HttpCatalogSource {
    url: String,
    http: Client,
}

impl HttpCatalogSource {
    pub fn new(url: impl Into<String>, http: Client) -> Self {
        Self {
            url: url.into(),
            http,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl CatalogSource for HttpCatalogSource {
    async fn fetch_catalog(&self) -> Result<PairCatalog, CatalogError> {
        debug!(url = %self.url, "Fetching currency catalog");

        let response = self.http.get(&self.url).send().await.map_err(|e| {
            warn!(url = %self.url, error = %e, "Catalog request failed");
            CatalogError::Transport(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| CatalogError::Transport(e.to_string()))?;

        let catalog = parse_catalog_xml(&body)?;
        debug!(pairs = catalog.len(), "Currency catalog parsed");
        Ok(catalog)
    }
}

fn parse_error(msg: impl ToString) -> CatalogError {
    CatalogError::Parse(msg.to_string())
}

/// A pair element whose end tag has not been seen yet.
struct PendingPair {
    key: String,
    description: String,
    /// Set once a nested element starts; later text is not the description.
    text_closed: bool,
}

impl PendingPair {
    fn new(key: String) -> Self {
        Self {
            key,
            description: String::new(),
            text_closed: false,
        }
    }

    fn push_text(&mut self, text: &str) {
        if !self.text_closed {
            self.description.push_str(text);
        }
    }
}

fn close_text(current: &mut Option<PendingPair>) {
    if let Some(pair) = current.as_mut() {
        pair.text_closed = true;
    }
}

fn tag_name(element: &BytesStart<'_>) -> Result<String, CatalogError> {
    std::str::from_utf8(element.name().as_ref())
        .map(str::to_owned)
        .map_err(parse_error)
}

/// Parses a catalog document into pair key → description.
///
/// The description is the pair element's leading text, kept verbatim:
/// whitespace is preserved and anything after the first nested element is
/// not part of it. Elements nested below the pair level are ignored. A
/// document with a root but no children yields an empty catalog; deciding
/// whether that is acceptable is left to the caller.
pub fn parse_catalog_xml(xml: &str) -> Result<PairCatalog, CatalogError> {
    let mut reader = Reader::from_str(xml);

    let mut entries = BTreeMap::new();
    let mut depth = 0usize;
    let mut seen_root = false;
    let mut current: Option<PendingPair> = None;

    loop {
        match reader.read_event().map_err(parse_error)? {
            Event::Start(element) => {
                match depth {
                    0 if seen_root => return Err(parse_error("more than one root element")),
                    0 => seen_root = true,
                    1 => current = Some(PendingPair::new(tag_name(&element)?)),
                    _ => close_text(&mut current),
                }
                depth += 1;
            }
            Event::Empty(element) => match depth {
                0 if seen_root => return Err(parse_error("more than one root element")),
                0 => seen_root = true,
                1 => {
                    entries.insert(tag_name(&element)?, String::new());
                }
                _ => close_text(&mut current),
            },
            Event::Text(text) => {
                let text = text.unescape().map_err(parse_error)?;
                if depth == 0 && !text.trim().is_empty() {
                    return Err(parse_error("text outside the root element"));
                }
                if depth == 2 {
                    if let Some(pair) = current.as_mut() {
                        pair.push_text(&text);
                    }
                }
            }
            Event::CData(data) => {
                if depth == 2 {
                    if let Some(pair) = current.as_mut() {
                        pair.push_text(&String::from_utf8_lossy(&data));
                    }
                }
            }
            Event::End(_) => {
                if depth == 2 {
                    if let Some(pair) = current.take() {
                        entries.insert(pair.key, pair.description);
                    }
                }
                depth = depth.saturating_sub(1);
            }
            Event::Eof => break,
            // Declarations, comments, processing instructions, doctype
            _ => {}
        }
    }

    if !seen_root {
        return Err(parse_error("document has no root element"));
    }
    if depth != 0 {
        return Err(parse_error("unexpected end of document"));
    }

    Ok(PairCatalog::new(entries))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_pairs_and_descriptions() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
            <xml>
                <USD-BRL>Dólar Americano/Real Brasileiro</USD-BRL>
                <EUR-BRL>Euro/Real Brasileiro</EUR-BRL>
            </xml>"#;

        let catalog = parse_catalog_xml(xml).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(
            catalog.description("USD-BRL"),
            Some("Dólar Americano/Real Brasileiro")
        );
        assert!(catalog.allows("EUR", "BRL"));
    }

    #[test]
    fn test_unescapes_entities() {
        let xml = "<xml><BTC-USD>Bitcoin &amp; Dólar</BTC-USD></xml>";
        let catalog = parse_catalog_xml(xml).unwrap();
        assert_eq!(catalog.description("BTC-USD"), Some("Bitcoin & Dólar"));
    }

    #[test]
    fn test_self_closing_pair_has_empty_description() {
        let catalog = parse_catalog_xml("<xml><USD-BRL/></xml>").unwrap();
        assert_eq!(catalog.description("USD-BRL"), Some(""));
    }

    #[test]
    fn test_nested_elements_do_not_become_pairs() {
        let xml = "<xml><USD-BRL>Dólar<note>x</note></USD-BRL></xml>";
        let catalog = parse_catalog_xml(xml).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.description("USD-BRL"), Some("Dólar"));
    }

    #[test]
    fn test_text_after_nested_element_is_not_description() {
        let xml = "<xml><USD-BRL>A<n/>B</USD-BRL><EUR-BRL>C<n>x</n>D</EUR-BRL></xml>";
        let catalog = parse_catalog_xml(xml).unwrap();
        assert_eq!(catalog.description("USD-BRL"), Some("A"));
        assert_eq!(catalog.description("EUR-BRL"), Some("C"));
    }

    #[test]
    fn test_description_whitespace_is_kept() {
        let xml = "<xml>\n  <EUR-BRL>  padded  </EUR-BRL>\n</xml>\n";
        let catalog = parse_catalog_xml(xml).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.description("EUR-BRL"), Some("  padded  "));
    }

    #[test]
    fn test_empty_root_is_empty_catalog() {
        assert!(parse_catalog_xml("<xml></xml>").unwrap().is_empty());
        assert!(parse_catalog_xml("<xml/>").unwrap().is_empty());
    }

    #[test]
    fn test_rejects_garbage() {
        for bad in ["", "not xml at all", "<xml><USD-BRL>x</xml>", "<xml><USD-BRL>x"] {
            assert!(
                matches!(parse_catalog_xml(bad), Err(CatalogError::Parse(_))),
                "{bad:?} should fail"
            );
        }
    }
}
