// src/core/html.rs
// Small helpers over `scraper` so page specs read the same way everywhere.

use scraper::{ElementRef, Selector};

use crate::error::ConfigError;
use super::sanitize::normalize_ws;

/// Compile a CSS selector, mapping the parse error to a config error.
pub fn selector(css: &str) -> Result<Selector, ConfigError> {
    Selector::parse(css).map_err(|_| ConfigError::Selector { selector: s!(css) })
}

/// Visible text of an element, whitespace collapsed and trimmed.
pub fn text_of(el: ElementRef<'_>) -> String {
    let raw: String = el.text().collect();
    normalize_ws(&raw)
}

/// Direct element children with the given tag name (case-insensitive).
pub fn children_named<'a>(
    el: ElementRef<'a>,
    tag: &'a str,
) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    el.children()
        .filter_map(ElementRef::wrap)
        .filter(move |c| c.value().name().eq_ignore_ascii_case(tag))
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    #[test]
    fn text_of_collapses_whitespace() {
        let doc = Html::parse_fragment("<p>  user_a \n <b>x</b>&nbsp; </p>");
        let p = doc.select(&selector("p").unwrap()).next().unwrap();
        assert_eq!(text_of(p), "user_a x");
    }

    #[test]
    fn children_named_skips_nested() {
        let doc = Html::parse_document(
            "<table><tbody><tr><td>a<table><tr><td>inner</td></tr></table></td><td>b</td></tr></tbody></table>",
        );
        let tr = doc.select(&selector("tr").unwrap()).next().unwrap();
        assert_eq!(children_named(tr, "td").count(), 2);
    }

    #[test]
    fn bad_selector_is_config_error() {
        assert!(matches!(selector("td[["), Err(ConfigError::Selector { .. })));
    }
}
