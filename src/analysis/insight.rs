use serde::Serialize;
use std::fmt;

/// Byte range of `Insight::text` to be rendered with strong emphasis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EmphasisSpan {
    pub start: usize,
    pub end: usize,
}

/// A one-sentence observation.
///
/// The text is plain; emphasis lives in sorted, non-overlapping spans so
/// that the caller picks the markup (Markdown, HTML, terminal codes).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Insight {
    text: String,
    emphasis: Vec<EmphasisSpan>,
}

impl Insight {
    pub fn builder() -> InsightBuilder {
        InsightBuilder::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn emphasis(&self) -> &[EmphasisSpan] {
        &self.emphasis
    }

    pub fn emphasized(&self) -> impl Iterator<Item = &str> {
        self.emphasis
            .iter()
            .map(|span| &self.text[span.start..span.end])
    }

    /// Wraps every emphasized span with `open` and `close`.
    pub fn render(&self, open: &str, close: &str) -> String {
        let mut output = String::with_capacity(self.text.len() + self.emphasis.len() * 8);
        let mut cursor = 0;
        for span in &self.emphasis {
            output.push_str(&self.text[cursor..span.start]);
            output.push_str(open);
            output.push_str(&self.text[span.start..span.end]);
            output.push_str(close);
            cursor = span.end;
        }
        output.push_str(&self.text[cursor..]);
        output
    }

    pub fn to_markdown(&self) -> String {
        self.render("**", "**")
    }
}

impl fmt::Display for Insight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[derive(Debug, Default)]
pub struct InsightBuilder {
    text: String,
    emphasis: Vec<EmphasisSpan>,
}

impl InsightBuilder {
    pub fn plain(mut self, text: impl AsRef<str>) -> Self {
        self.text.push_str(text.as_ref());
        self
    }

    pub fn strong(mut self, text: impl AsRef<str>) -> Self {
        let text = text.as_ref();
        if text.is_empty() {
            return self;
        }
        let start = self.text.len();
        self.text.push_str(text);
        match self.emphasis.last_mut() {
            // adjacent strong parts merge into one span
            Some(last) if last.end == start => last.end = self.text.len(),
            _ => self.emphasis.push(EmphasisSpan {
                start,
                end: self.text.len(),
            }),
        }
        self
    }

    pub fn build(self) -> Insight {
        Insight {
            text: self.text,
            emphasis: self.emphasis,
        }
    }
}
