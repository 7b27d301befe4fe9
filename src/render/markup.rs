//! The escaping boundary.
//!
//! [`Markup`] is HTML that is safe to place in a document as-is. Outside this module it can
//! only be produced by escaping text or by the renderer's own builders, so user and model
//! supplied strings cannot reach an output document unescaped.

use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Markup(String);

impl Markup {
    /// Escape plain text into markup.
    pub fn escape(text: &str) -> Self {
        Markup(escape_html(text))
    }

    /// Wrap HTML produced by the renderer or a fixed template string.
    pub(crate) fn raw(html: impl Into<String>) -> Self {
        Markup(html.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub(crate) fn push(&mut self, other: &Markup) {
        self.0.push_str(&other.0);
    }

    pub(crate) fn push_raw(&mut self, html: &str) {
        self.0.push_str(html);
    }
}

impl fmt::Display for Markup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromIterator<Markup> for Markup {
    fn from_iter<I: IntoIterator<Item = Markup>>(iter: I) -> Self {
        let mut out = Markup::default();
        for markup in iter {
            out.push(&markup);
        }
        out
    }
}

/// Escape `& < > " '` for use in element content and quoted attribute values.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len() + text.len() / 8);
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_all_special_characters() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#x27;Jerry&#x27;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_escape_is_not_idempotent_on_entities() {
        // Already-escaped text from a log is data, so it is escaped again
        assert_eq!(escape_html("&amp;"), "&amp;amp;");
    }

    #[test]
    fn test_collect_concatenates() {
        let markup: Markup = vec![Markup::escape("<a>"), Markup::raw("<br>")].into_iter().collect();
        assert_eq!(markup.as_str(), "&lt;a&gt;<br>");
    }
}
