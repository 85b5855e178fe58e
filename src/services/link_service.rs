use std::sync::LazyLock;

use regex::bytes::{Captures, Regex};

static PAGE_REFERENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([A-Za-z0-9]+)\]").expect("page reference pattern is valid"));

/// Service turning stored page bodies into displayable markup
#[derive(Debug, Clone, Copy, Default)]
pub struct LinkService;

impl LinkService {
    /// Create a new link service
    pub fn new() -> Self {
        Self
    }

    /// Rewrite every `[Title]` reference into a link to that page's view.
    ///
    /// Single left-to-right pass, no existence check on the target. Bytes
    /// outside references are copied unchanged, including invalid UTF-8.
    pub fn transform(&self, body: &[u8]) -> Vec<u8> {
        PAGE_REFERENCE
            .replace_all(body, |caps: &Captures<'_>| {
                let title = &caps[1];
                let mut link = Vec::with_capacity(title.len() * 2 + 23);
                link.extend_from_slice(b"<a href='/view/");
                link.extend_from_slice(title);
                link.extend_from_slice(b"'>");
                link.extend_from_slice(title);
                link.extend_from_slice(b"</a>");
                link
            })
            .into_owned()
    }

    /// Turn each newline into a `<br>` tag.
    pub fn format_lines(&self, body: &[u8]) -> Vec<u8> {
        let mut out = Vec::with_capacity(body.len());
        for &b in body {
            if b == b'\n' {
                out.extend_from_slice(b"<br>");
            } else {
                out.push(b);
            }
        }
        out
    }

    /// Body as shown by the view page: links first, then line breaks.
    pub fn render_body(&self, body: &[u8]) -> Vec<u8> {
        self.format_lines(&self.transform(body))
    }
}
