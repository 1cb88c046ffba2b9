use url::Url;

/// URL schemes a capture is allowed to follow
pub const CAPTURABLE_SCHEMES: [&str; 2] = ["http", "https"];

/// Determine if a discovered href points at a page that can be captured
///
/// Missing, relative or unparsable hrefs are rejected, as is anything that is
/// not plain http(s) (`mailto:`, `javascript:`, `ftp:` ...).
pub fn is_capturable(href: Option<&str>) -> bool {
    let Some(href) = href else {
        return false;
    };
    if href.is_empty() {
        return false;
    }

    match Url::parse(href) {
        Ok(url) => CAPTURABLE_SCHEMES.contains(&url.scheme()),
        Err(e) => {
            ::log::trace!("Unparsable href {:?}: {}", href, e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_web_schemes_are_capturable() {
        assert!(is_capturable(Some("https://example.com/faq/question-1")));
        assert!(is_capturable(Some("http://example.com/")));
        assert!(is_capturable(Some("HTTPS://EXAMPLE.COM/upper")));
    }

    #[test]
    fn test_other_schemes_are_rejected() {
        assert!(!is_capturable(Some("ftp://example.com/file")));
        assert!(!is_capturable(Some("mailto:help@example.com")));
        assert!(!is_capturable(Some("javascript:void(0)")));
    }

    #[test]
    fn test_missing_or_relative_hrefs_are_rejected() {
        assert!(!is_capturable(None));
        assert!(!is_capturable(Some("")));
        assert!(!is_capturable(Some("/relative/path")));
        assert!(!is_capturable(Some("#anchor")));
    }
}
