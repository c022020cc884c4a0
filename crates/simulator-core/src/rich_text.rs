//! Trusted Rich Text
//!
//! Block bodies arrive as HTML and user replies as free text. Both pass
//! through an allow-list sanitiser before they reach `inner_html`.

use std::sync::OnceLock;

use ammonia::Builder;
use pulldown_cmark::{html::push_html, Options, Parser};

fn sanitizer() -> &'static Builder<'static> {
    static SANITIZER: OnceLock<Builder<'static>> = OnceLock::new();
    SANITIZER.get_or_init(|| {
        let mut builder = Builder::default();
        builder
            .add_generic_attributes(["class"])
            .link_rel(Some("noopener noreferrer"));
        builder
    })
}

/// HTML that is safe to inject into the page
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TrustedHtml(String);

impl TrustedHtml {
    /// Sanitise backend-provided HTML
    pub fn sanitize(raw: &str) -> Self {
        Self(sanitizer().clean(raw).to_string())
    }

    /// Render user-typed Markdown, then sanitise
    pub fn from_markdown(text: &str) -> Self {
        let parser = Parser::new_ext(text, Options::ENABLE_STRIKETHROUGH);
        let mut html = String::new();
        push_html(&mut html, parser);
        Self::sanitize(&html)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripts_and_handlers_removed() {
        let html = TrustedHtml::sanitize(r#"<p onclick="steal()">Hi <b>there</b><script>alert(1)</script></p>"#);
        assert_eq!(html.as_str(), "<p>Hi <b>there</b></p>");
    }

    #[test]
    fn test_javascript_links_removed() {
        let html = TrustedHtml::sanitize(r#"<a href="javascript:alert(1)">x</a>"#);
        assert!(!html.as_str().contains("javascript"));
    }

    #[test]
    fn test_markdown_reply() {
        let html = TrustedHtml::from_markdown("I think **B** <img src=x onerror=alert(1)>");
        assert!(html.as_str().contains("<strong>B</strong>"));
        assert!(!html.as_str().contains("onerror"));
    }
}
