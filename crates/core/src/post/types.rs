use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::serde::{deserialize_optional_timestamp, serialize_optional_timestamp};
use crate::storage::POSTS_DOCUMENT_TYPE;

/// Documents that omit their type are treated as posts.
fn default_document_type() -> String {
    POSTS_DOCUMENT_TYPE.to_string()
}

/// A published blog post as returned by the CMS.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub id: String,
    /// Unique slug used to look the post up.
    pub uid: String,
    #[serde(rename = "type", default = "default_document_type")]
    pub document_type: String,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_timestamp",
        serialize_with = "serialize_optional_timestamp"
    )]
    pub first_publication_date: Option<DateTime<FixedOffset>>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_timestamp",
        serialize_with = "serialize_optional_timestamp"
    )]
    pub last_publication_date: Option<DateTime<FixedOffset>>,
    pub data: PostData,
}

impl Document {
    /// Creates a post document with no sections and no publication date.
    pub fn new(
        uid: impl Into<String>,
        title: impl Into<String>,
        author: impl Into<String>,
        banner_url: impl Into<String>,
    ) -> Self {
        let uid = uid.into();
        Self {
            id: uid.clone(),
            uid,
            document_type: default_document_type(),
            first_publication_date: None,
            last_publication_date: None,
            data: PostData {
                title: title.into(),
                banner: Image {
                    url: banner_url.into(),
                    alt: None,
                },
                author: author.into(),
                content: Vec::new(),
            },
        }
    }

    /// Sets the first publication date.
    pub fn with_publication_date(mut self, date: DateTime<FixedOffset>) -> Self {
        self.first_publication_date = Some(date);
        self
    }

    /// Appends a section to the post content.
    pub fn with_section(mut self, section: Section) -> Self {
        self.data.content.push(section);
        self
    }
}

/// The custom fields of a post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostData {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub banner: Image,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub content: Vec<Section>,
}

/// An image field. Prismic sends `{}` for an empty image.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    #[serde(default)]
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

/// A titled group of body content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Section {
    #[serde(default)]
    pub heading: String,
    #[serde(default)]
    pub body: Vec<BodyBlock>,
}

impl Section {
    pub fn new(heading: impl Into<String>, body: Vec<BodyBlock>) -> Self {
        Self {
            heading: heading.into(),
            body,
        }
    }
}

/// A single rich text block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BodyBlock {
    #[serde(rename = "paragraph")]
    Paragraph(TextBlock),
    #[serde(rename = "heading1")]
    Heading1(TextBlock),
    #[serde(rename = "heading2")]
    Heading2(TextBlock),
    #[serde(rename = "heading3")]
    Heading3(TextBlock),
    #[serde(rename = "heading4")]
    Heading4(TextBlock),
    #[serde(rename = "heading5")]
    Heading5(TextBlock),
    #[serde(rename = "heading6")]
    Heading6(TextBlock),
    #[serde(rename = "preformatted")]
    Preformatted(TextBlock),
    #[serde(rename = "list-item")]
    ListItem(TextBlock),
    #[serde(rename = "o-list-item")]
    OrderedListItem(TextBlock),
    #[serde(rename = "image")]
    Image(Image),
    #[serde(rename = "embed")]
    Embed(EmbedBlock),
    #[serde(other)]
    Unknown,
}

impl BodyBlock {
    /// Shorthand for a paragraph without spans.
    pub fn paragraph(text: impl Into<String>) -> Self {
        BodyBlock::Paragraph(TextBlock::new(text))
    }

    /// Returns the plain text of the block. Blocks without text return "".
    pub fn text(&self) -> &str {
        self.text_block().map(|block| block.text.as_str()).unwrap_or("")
    }

    /// Returns the text payload for textual block kinds.
    pub fn text_block(&self) -> Option<&TextBlock> {
        match self {
            BodyBlock::Paragraph(block)
            | BodyBlock::Heading1(block)
            | BodyBlock::Heading2(block)
            | BodyBlock::Heading3(block)
            | BodyBlock::Heading4(block)
            | BodyBlock::Heading5(block)
            | BodyBlock::Heading6(block)
            | BodyBlock::Preformatted(block)
            | BodyBlock::ListItem(block)
            | BodyBlock::OrderedListItem(block) => Some(block),
            BodyBlock::Image(_) | BodyBlock::Embed(_) | BodyBlock::Unknown => None,
        }
    }
}

/// Text with inline formatting spans.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextBlock {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub spans: Vec<Span>,
}

impl TextBlock {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            spans: Vec::new(),
        }
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.spans.push(span);
        self
    }
}

/// Inline formatting over the character range `start..end` of a text block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    #[serde(rename = "type")]
    pub kind: SpanKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<SpanData>,
}

impl Span {
    pub fn new(kind: SpanKind, start: usize, end: usize) -> Self {
        Self {
            start,
            end,
            kind,
            data: None,
        }
    }

    pub fn hyperlink(start: usize, end: usize, url: impl Into<String>) -> Self {
        Self {
            start,
            end,
            kind: SpanKind::Hyperlink,
            data: Some(SpanData {
                url: Some(url.into()),
                ..SpanData::default()
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpanKind {
    Strong,
    Em,
    Hyperlink,
    Label,
    #[serde(other)]
    Unknown,
}

/// Extra payload of hyperlink and label spans.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpanData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedBlock {
    #[serde(default)]
    pub oembed: OEmbed,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OEmbed {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embed_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
}

/// The slug-bearing part of a document, as listed by type queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRef {
    #[serde(default)]
    pub id: String,
    /// Documents whose type has no UID field come back with `null`.
    #[serde(default)]
    pub uid: Option<String>,
    #[serde(rename = "type", default = "default_document_type")]
    pub document_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    fn prismic_post() -> serde_json::Value {
        serde_json::json!({
            "id": "YFzjyRIAACIA3Qh0",
            "uid": "como-utilizar-hooks",
            "type": "posts",
            "href": "https://spacetravelling.cdn.prismic.io/api/v2/documents/search",
            "tags": [],
            "first_publication_date": "2021-03-25T19:25:28+0000",
            "last_publication_date": "2021-03-25T19:27:35+0000",
            "slugs": ["como-utilizar-hooks"],
            "lang": "pt-br",
            "data": {
                "title": "Como utilizar Hooks",
                "banner": {
                    "dimensions": { "width": 1440, "height": 400 },
                    "alt": null,
                    "url": "https://images.prismic.io/spacetravelling/banner.png"
                },
                "author": "Joseph Oliveira",
                "content": [
                    {
                        "heading": "Proin et varius",
                        "body": [
                            {
                                "type": "paragraph",
                                "text": "Lorem ipsum dolor sit amet",
                                "spans": [
                                    { "start": 0, "end": 5, "type": "strong" },
                                    {
                                        "start": 6, "end": 11, "type": "hyperlink",
                                        "data": { "link_type": "Web", "url": "https://example.com" }
                                    }
                                ]
                            },
                            { "type": "list-item", "text": "Nullam dolor sapien", "spans": [] },
                            {
                                "type": "image",
                                "url": "https://images.prismic.io/spacetravelling/inline.png",
                                "alt": "diagram",
                                "dimensions": { "width": 800, "height": 600 }
                            },
                            { "type": "table", "rows": [] }
                        ]
                    }
                ]
            }
        })
    }

    #[test]
    fn test_deserialize_prismic_document() {
        let document: Document = serde_json::from_value(prismic_post()).unwrap();

        assert_eq!(document.uid, "como-utilizar-hooks");
        assert_eq!(document.document_type, "posts");
        assert_eq!(document.data.title, "Como utilizar Hooks");
        assert_eq!(document.data.author, "Joseph Oliveira");
        assert_eq!(
            document.data.banner.url,
            "https://images.prismic.io/spacetravelling/banner.png"
        );
        assert_eq!(document.data.banner.alt, None);
        assert_eq!(document.first_publication_date.unwrap().day(), 25);
        assert_eq!(document.data.content.len(), 1);
    }

    #[test]
    fn test_deserialize_body_blocks() {
        let document: Document = serde_json::from_value(prismic_post()).unwrap();
        let body = &document.data.content[0].body;

        assert_eq!(body.len(), 4);
        assert!(matches!(body[0], BodyBlock::Paragraph(_)));
        assert!(matches!(body[1], BodyBlock::ListItem(_)));
        assert!(matches!(body[2], BodyBlock::Image(_)));
        assert_eq!(body[3], BodyBlock::Unknown);

        let spans = &body[0].text_block().unwrap().spans;
        assert_eq!(spans[0].kind, SpanKind::Strong);
        assert_eq!(spans[1].kind, SpanKind::Hyperlink);
        assert_eq!(
            spans[1].data.as_ref().unwrap().url.as_deref(),
            Some("https://example.com")
        );
    }

    #[test]
    fn test_null_publication_date() {
        let mut value = prismic_post();
        value["first_publication_date"] = serde_json::Value::Null;

        let document: Document = serde_json::from_value(value).unwrap();

        assert_eq!(document.first_publication_date, None);
    }

    #[test]
    fn test_empty_banner() {
        let mut value = prismic_post();
        value["data"]["banner"] = serde_json::json!({});

        let document: Document = serde_json::from_value(value).unwrap();

        assert_eq!(document.data.banner, Image::default());
    }

    #[test]
    fn test_text_of_non_text_blocks_is_empty() {
        let image = BodyBlock::Image(Image {
            url: "https://example.com/a.png".to_string(),
            alt: None,
        });

        assert_eq!(image.text(), "");
        assert_eq!(BodyBlock::Unknown.text(), "");
        assert_eq!(BodyBlock::paragraph("hello").text(), "hello");
    }

    #[test]
    fn test_document_ref_without_uid() {
        let value = serde_json::json!({ "id": "abc", "uid": null, "type": "posts", "data": {} });

        let document: DocumentRef = serde_json::from_value(value).unwrap();

        assert_eq!(document.uid, None);
    }

    #[test]
    fn test_missing_type_defaults_to_posts() {
        let value = serde_json::json!({ "id": "abc", "uid": "hello", "data": {} });

        let document: Document = serde_json::from_value(value.clone()).unwrap();
        let reference: DocumentRef = serde_json::from_value(value).unwrap();

        assert_eq!(document.document_type, POSTS_DOCUMENT_TYPE);
        assert_eq!(reference.document_type, POSTS_DOCUMENT_TYPE);
    }

    #[test]
    fn test_document_builder() {
        let document = Document::new("hello", "Hello", "Ana", "https://example.com/b.png")
            .with_section(Section::new("Intro", vec![BodyBlock::paragraph("Hi")]));

        assert_eq!(document.document_type, "posts");
        assert_eq!(document.data.content.len(), 1);
        assert_eq!(document.first_publication_date, None);
    }
}
