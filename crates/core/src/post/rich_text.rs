//! Serializes CMS structured text into HTML.
//!
//! Output is wrapped in [`TrustedHtml`], the only type the page templates
//! print without escaping. Text and attribute values coming from the CMS are
//! escaped here; embed markup is passed through as-is.

use std::fmt;

use html_escape::{encode_double_quoted_attribute, encode_text};
use serde::Serialize;

use super::types::{BodyBlock, EmbedBlock, Image, Span, SpanKind, TextBlock};

/// HTML markup that may be emitted into a page unescaped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TrustedHtml(String);

impl TrustedHtml {
    /// Wraps markup from a source that is trusted to be sanitized upstream.
    pub fn from_trusted(markup: impl Into<String>) -> Self {
        Self(markup.into())
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
}

impl fmt::Display for TrustedHtml {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListKind {
    Unordered,
    Ordered,
}

impl ListKind {
    fn tag(self) -> &'static str {
        match self {
            ListKind::Unordered => "ul",
            ListKind::Ordered => "ol",
        }
    }
}

/// Converts an ordered sequence of blocks into one HTML fragment.
///
/// Consecutive list items are grouped into a single `<ul>` or `<ol>`.
pub fn serialize_blocks(blocks: &[BodyBlock]) -> TrustedHtml {
    let mut out = String::new();
    let mut open_list: Option<ListKind> = None;

    for block in blocks {
        let list_kind = match block {
            BodyBlock::ListItem(_) => Some(ListKind::Unordered),
            BodyBlock::OrderedListItem(_) => Some(ListKind::Ordered),
            _ => None,
        };

        if open_list != list_kind {
            if let Some(kind) = open_list {
                out.push_str(&format!("</{}>", kind.tag()));
            }
            if let Some(kind) = list_kind {
                out.push_str(&format!("<{}>", kind.tag()));
            }
            open_list = list_kind;
        }

        match block {
            BodyBlock::Paragraph(text) => wrap_text(&mut out, "p", text),
            BodyBlock::Heading1(text) => wrap_text(&mut out, "h1", text),
            BodyBlock::Heading2(text) => wrap_text(&mut out, "h2", text),
            BodyBlock::Heading3(text) => wrap_text(&mut out, "h3", text),
            BodyBlock::Heading4(text) => wrap_text(&mut out, "h4", text),
            BodyBlock::Heading5(text) => wrap_text(&mut out, "h5", text),
            BodyBlock::Heading6(text) => wrap_text(&mut out, "h6", text),
            BodyBlock::Preformatted(text) => wrap_text(&mut out, "pre", text),
            BodyBlock::ListItem(text) | BodyBlock::OrderedListItem(text) => {
                wrap_text(&mut out, "li", text)
            }
            BodyBlock::Image(image) => write_image(&mut out, image),
            BodyBlock::Embed(embed) => write_embed(&mut out, embed),
            BodyBlock::Unknown => {}
        }
    }

    if let Some(kind) = open_list {
        out.push_str(&format!("</{}>", kind.tag()));
    }

    TrustedHtml(out)
}

fn wrap_text(out: &mut String, tag: &str, block: &TextBlock) {
    out.push_str(&format!("<{tag}>"));
    write_spanned_text(out, &block.text, &block.spans);
    out.push_str(&format!("</{tag}>"));
}

fn write_image(out: &mut String, image: &Image) {
    out.push_str(&format!(
        r#"<p class="block-img"><img src="{}" alt="{}" /></p>"#,
        encode_double_quoted_attribute(&image.url),
        encode_double_quoted_attribute(image.alt.as_deref().unwrap_or("")),
    ));
}

fn write_embed(out: &mut String, embed: &EmbedBlock) {
    let Some(html) = embed.oembed.html.as_deref() else {
        return;
    };

    match embed.oembed.embed_url.as_deref() {
        Some(url) => out.push_str(&format!(
            r#"<div data-oembed="{}">"#,
            encode_double_quoted_attribute(url)
        )),
        None => out.push_str("<div data-oembed>"),
    }
    out.push_str(html);
    out.push_str("</div>");
}

fn open_tag(span: &Span) -> String {
    let data = span.data.as_ref();
    match span.kind {
        SpanKind::Strong => "<strong>".to_string(),
        SpanKind::Em => "<em>".to_string(),
        SpanKind::Hyperlink => {
            let url = data.and_then(|d| d.url.as_deref()).unwrap_or("");
            let mut tag = format!(r#"<a href="{}""#, encode_double_quoted_attribute(url));
            if let Some(target) = data.and_then(|d| d.target.as_deref()) {
                tag.push_str(&format!(
                    r#" target="{}" rel="noopener""#,
                    encode_double_quoted_attribute(target)
                ));
            }
            tag.push('>');
            tag
        }
        SpanKind::Label => {
            let label = data.and_then(|d| d.label.as_deref()).unwrap_or("");
            format!(r#"<span class="{}">"#, encode_double_quoted_attribute(label))
        }
        SpanKind::Unknown => String::new(),
    }
}

fn close_tag(span: &Span) -> &'static str {
    match span.kind {
        SpanKind::Strong => "</strong>",
        SpanKind::Em => "</em>",
        SpanKind::Hyperlink => "</a>",
        SpanKind::Label => "</span>",
        SpanKind::Unknown => "",
    }
}

/// Character index of a UTF-16 offset. Offsets inside a surrogate pair round
/// up to the next character; offsets past the end clamp to the length.
fn char_index(unit_starts: &[usize], offset: usize) -> usize {
    unit_starts.partition_point(|&start| start < offset)
}

fn write_segment(out: &mut String, segment: &str) {
    let escaped = encode_text(segment);
    out.push_str(&escaped.replace('\n', "<br />"));
}

/// Writes `text` with its spans applied.
///
/// Span offsets are UTF-16 code unit indices and are converted to character
/// indices here. Spans are clamped to the text, and overlapping spans are
/// closed and reopened so tags always nest.
fn write_spanned_text(out: &mut String, text: &str, spans: &[Span]) {
    let chars: Vec<char> = text.chars().collect();
    let unit_starts: Vec<usize> = chars
        .iter()
        .scan(0, |units, c| {
            let start = *units;
            *units += c.len_utf16();
            Some(start)
        })
        .collect();
    let len = chars.len();

    let mut spans: Vec<Span> = spans
        .iter()
        .filter(|span| span.kind != SpanKind::Unknown)
        .map(|span| Span {
            start: char_index(&unit_starts, span.start),
            end: char_index(&unit_starts, span.end),
            ..span.clone()
        })
        .filter(|span| span.start < span.end)
        .collect();

    if spans.is_empty() {
        write_segment(out, text);
        return;
    }

    // Outer spans first: earlier start, then longer.
    spans.sort_by(|a, b| a.start.cmp(&b.start).then(b.end.cmp(&a.end)));

    let mut boundaries: Vec<usize> = spans
        .iter()
        .flat_map(|span| [span.start, span.end])
        .chain([0, len])
        .collect();
    boundaries.sort_unstable();
    boundaries.dedup();

    let mut open: Vec<usize> = Vec::new();

    for window in boundaries.windows(2) {
        let (from, to) = (window[0], window[1]);

        let active: Vec<usize> = spans
            .iter()
            .enumerate()
            .filter(|(_, span)| span.start <= from && span.end >= to)
            .map(|(index, _)| index)
            .collect();

        let shared = open
            .iter()
            .zip(active.iter())
            .take_while(|(a, b)| a == b)
            .count();

        for &index in open[shared..].iter().rev() {
            out.push_str(close_tag(&spans[index]));
        }
        for &index in &active[shared..] {
            out.push_str(&open_tag(&spans[index]));
        }
        open = active;

        let segment: String = chars[from..to].iter().collect();
        write_segment(out, &segment);
    }

    for &index in open.iter().rev() {
        out.push_str(close_tag(&spans[index]));
    }
}
