use crate::error::FetchError;
use crate::results::Link;
use scraper::{ElementRef, Html, Selector};

/// Ids of the consent banners and search box stripped from every capture
pub const NOISE_ELEMENT_IDS: [&str; 4] = [
    "onetrust-banner-sdk",
    "bandeau",
    "standaloneSearchbox",
    "onetrust-consent-sdk",
];

/// Page headers stripped from every capture
pub const HEADER_SELECTOR: &str = "header, .header";

/// Removes noise elements from a rendered page and serializes what is left
///
/// Parsing is best effort: malformed markup is repaired by the HTML5 parser
/// and missing targets are simply not removed.
pub fn clean(raw_markup: &str) -> String {
    let mut doc = Html::parse_document(raw_markup);

    let id_selector = NOISE_ELEMENT_IDS
        .iter()
        .map(|id| format!("#{}", id))
        .collect::<Vec<_>>()
        .join(", ");

    let mut removed = 0;
    for selector in [id_selector.as_str(), HEADER_SELECTOR] {
        let Ok(selector) = Selector::parse(selector) else {
            continue;
        };
        let ids = doc.select(&selector).map(|e| e.id()).collect::<Vec<_>>();
        for id in ids {
            if let Some(mut node) = doc.tree.get_mut(id) {
                node.detach();
                removed += 1;
            }
        }
    }

    ::log::debug!("Markup cleaner removed {} elements", removed);
    doc.html()
}

/// Reads every element matching `selector` as a link
pub fn select_links(markup: &str, selector: &str) -> Result<Vec<Link>, FetchError> {
    let doc = Html::parse_document(markup);
    let selector = parse_selector(selector)?;

    Ok(doc.select(&selector).map(element_link).collect())
}

/// Reads one link per `container_selector` match from its first descendant
/// matching `link_selector`
///
/// Containers without a matching descendant are skipped.
pub fn select_nested_links(
    markup: &str,
    container_selector: &str,
    link_selector: &str,
) -> Result<Vec<Link>, FetchError> {
    let doc = Html::parse_document(markup);
    let containers = parse_selector(container_selector)?;
    let inner = parse_selector(link_selector)?;

    Ok(doc
        .select(&containers)
        .filter_map(|container| container.select(&inner).next())
        .map(element_link)
        .collect())
}

fn parse_selector(selector: &str) -> Result<Selector, FetchError> {
    Selector::parse(selector).map_err(|_| FetchError::InvalidSelector {
        selector: selector.to_string(),
    })
}

fn element_link(element: ElementRef<'_>) -> Link {
    let text = element
        .text()
        .collect::<Vec<_>>()
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    Link {
        href: element.value().attr("href").map(|s| s.to_string()),
        text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<html><head><title>Selfcare</title></head><body>
        <div id="onetrust-banner-sdk">We use cookies</div>
        <div id="onetrust-consent-sdk"><p>Consent</p></div>
        <div id="bandeau">Banner</div>
        <form id="standaloneSearchbox"><input name="q"></form>
        <header><nav>Top nav</nav></header>
        <div class="header">Logo</div>
        <div class="header sticky">Second header</div>
        <main><h1>How do I block my card?</h1><p>Call us.</p></main>
    </body></html>"#;

    #[test]
    fn test_clean_removes_banners_and_search() {
        let cleaned = clean(PAGE);
        for id in NOISE_ELEMENT_IDS {
            assert!(
                !cleaned.contains(id),
                "cleaned markup still contains id {}",
                id
            );
        }
        assert!(!cleaned.contains("We use cookies"));
        assert!(!cleaned.contains("<input"));
    }

    #[test]
    fn test_clean_removes_every_header() {
        let cleaned = clean(PAGE);
        assert!(!cleaned.contains("<header"));
        assert!(!cleaned.contains("Top nav"));
        assert!(!cleaned.contains("Logo"));
        assert!(!cleaned.contains("Second header"));
    }

    #[test]
    fn test_clean_keeps_content() {
        let cleaned = clean(PAGE);
        assert!(cleaned.contains("<h1>How do I block my card?</h1>"));
        assert!(cleaned.contains("<p>Call us.</p>"));
        assert!(cleaned.contains("<title>Selfcare</title>"));
    }

    #[test]
    fn test_clean_without_noise_only_normalizes() {
        let markup = "<html><head></head><body><p>Hello</p></body></html>";
        assert_eq!(clean(markup), markup);

        // Fragments gain the document skeleton and nothing else
        assert_eq!(
            clean("<p>Hello</p>"),
            "<html><head></head><body><p>Hello</p></body></html>"
        );
    }

    #[test]
    fn test_clean_tolerates_malformed_markup() {
        let cleaned = clean("<div id=\"bandeau\"><p>unclosed <b>bold</div><span>kept");
        assert!(!cleaned.contains("bandeau"));
        assert!(cleaned.contains("kept"));
        assert!(!clean("").is_empty());
    }

    #[test]
    fn test_select_links() {
        let markup = r#"<ul class="linkList categories">
            <li><a href="https://example.com/cards">  Cards
            </a></li>
            <li><a>No target</a></li>
        </ul>"#;
        let links = select_links(markup, "ul.linkList.categories a").unwrap();
        assert_eq!(links.len(), 2);
        assert_eq!(links[0], Link::new("https://example.com/cards", "Cards"));
        assert_eq!(links[1].href, None);
        assert_eq!(links[1].text, "No target");
    }

    #[test]
    fn test_select_nested_links_takes_first_match_per_container() {
        let markup = r#"
            <section class="subject ng-scope"><h2><a href="https://example.com/s1">Loans</a></h2>
                <h2><a href="https://example.com/ignored">Second</a></h2></section>
            <section class="subject ng-scope"><h3>No heading link</h3></section>
            <section class="subject ng-scope"><h2><a href="https://example.com/s2">Savings</a></h2></section>
        "#;
        let links = select_nested_links(markup, "section.subject.ng-scope", "h2 a").unwrap();
        assert_eq!(
            links,
            vec![
                Link::new("https://example.com/s1", "Loans"),
                Link::new("https://example.com/s2", "Savings"),
            ]
        );
    }

    #[test]
    fn test_invalid_selector_is_an_error() {
        let err = select_links("<p></p>", "a[").unwrap_err();
        assert!(matches!(err, FetchError::InvalidSelector { .. }));
    }
}
