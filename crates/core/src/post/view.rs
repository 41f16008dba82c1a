//! Builds the render model of a post page.

use chrono::{DateTime, FixedOffset, Locale};
use serde::Serialize;

use super::{
    error::PostError,
    reading_time::estimate_reading_time,
    rich_text::{serialize_blocks, TrustedHtml},
    types::{Document, Section},
};

/// Day, abbreviated month name and 4-digit year, e.g. `25 mar 2021`.
pub const PUBLICATION_DATE_FORMAT: &str = "%d %b %Y";

pub const DEFAULT_LOCALE: &str = "pt_BR";

pub const DEFAULT_SITE_NAME: &str = "spacetravelling";

/// Site-wide settings that shape every rendered post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub locale: Locale,
    pub site_name: String,
}

impl RenderOptions {
    /// Creates render options from a locale name such as `pt_BR` or `en_US`.
    pub fn new(locale: &str, site_name: impl Into<String>) -> Result<Self, PostError> {
        let locale =
            Locale::try_from(locale).map_err(|_| PostError::InvalidLocale(locale.to_string()))?;
        Ok(Self {
            locale,
            site_name: site_name.into(),
        })
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            locale: Locale::pt_BR,
            site_name: DEFAULT_SITE_NAME.to_string(),
        }
    }
}

/// A section ready for display: its heading and the markup of its blocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionView {
    pub heading: String,
    pub html: TrustedHtml,
}

impl From<&Section> for SectionView {
    fn from(section: &Section) -> Self {
        Self {
            heading: section.heading.clone(),
            html: serialize_blocks(&section.body),
        }
    }
}

/// Everything the post template needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostView {
    pub slug: String,
    /// Contents of the `<title>` element.
    pub page_title: String,
    pub title: String,
    pub publication_date: String,
    pub author: String,
    pub banner_url: String,
    pub reading_time_minutes: u64,
    pub sections: Vec<SectionView>,
}

/// The page to show for a slug.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "post", rename_all = "lowercase")]
pub enum PostPage {
    /// The post is not available yet; show the loading placeholder.
    Loading,
    Ready(PostView),
}

impl PostPage {
    pub fn is_loading(&self) -> bool {
        matches!(self, PostPage::Loading)
    }
}

/// Formats a publication date in the given locale.
pub fn format_publication_date(date: &DateTime<FixedOffset>, locale: Locale) -> String {
    date.format_localized(PUBLICATION_DATE_FORMAT, locale).to_string()
}

/// Builds the page for a post.
///
/// Returns [`PostPage::Loading`] while `is_fallback` is set, when there is no
/// document yet, or when the document has no publication date.
pub fn build_post_page(
    document: Option<&Document>,
    is_fallback: bool,
    options: &RenderOptions,
) -> PostPage {
    if is_fallback {
        return PostPage::Loading;
    }

    let Some(document) = document else {
        return PostPage::Loading;
    };

    let Some(published) = document.first_publication_date.as_ref() else {
        return PostPage::Loading;
    };

    let data = &document.data;

    PostPage::Ready(PostView {
        slug: document.uid.clone(),
        page_title: format!("{} | {}", data.title, options.site_name),
        title: data.title.clone(),
        publication_date: format_publication_date(published, options.locale),
        author: data.author.clone(),
        banner_url: data.banner.url.clone(),
        reading_time_minutes: estimate_reading_time(&data.content),
        sections: data.content.iter().map(SectionView::from).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::post::types::{BodyBlock, TextBlock};
    use crate::serde::parse_timestamp;

    fn published_post() -> Document {
        Document::new(
            "como-utilizar-hooks",
            "Como utilizar Hooks",
            "Joseph Oliveira",
            "https://images.prismic.io/spacetravelling/banner.png",
        )
        .with_publication_date(parse_timestamp("2021-03-25T19:25:28+0000").unwrap())
        .with_section(Section::new(
            "Proin et varius",
            vec![BodyBlock::paragraph("a".repeat(1080))],
        ))
        .with_section(Section::new(
            "Cras laoreet",
            vec![
                BodyBlock::ListItem(TextBlock::new("one")),
                BodyBlock::ListItem(TextBlock::new("two")),
            ],
        ))
    }

    fn ready(page: PostPage) -> PostView {
        match page {
            PostPage::Ready(view) => view,
            PostPage::Loading => panic!("expected a ready page"),
        }
    }

    #[test]
    fn test_fallback_shows_loading() {
        let document = published_post();
        let page = build_post_page(Some(&document), true, &RenderOptions::default());
        assert!(page.is_loading());
    }

    #[test]
    fn test_missing_document_shows_loading() {
        let page = build_post_page(None, false, &RenderOptions::default());
        assert_eq!(page, PostPage::Loading);
    }

    #[test]
    fn test_null_publication_date_shows_loading() {
        let mut document = published_post();
        document.first_publication_date = None;

        let page = build_post_page(Some(&document), false, &RenderOptions::default());

        assert_eq!(page, PostPage::Loading);
    }

    #[test]
    fn test_projected_fields_are_unchanged() {
        let document = published_post();
        let view = ready(build_post_page(
            Some(&document),
            false,
            &RenderOptions::default(),
        ));

        assert_eq!(view.title, document.data.title);
        assert_eq!(view.author, document.data.author);
        assert_eq!(view.banner_url, document.data.banner.url);
        assert_eq!(view.slug, document.uid);
    }

    #[test]
    fn test_page_title_includes_site_name() {
        let document = published_post();
        let view = ready(build_post_page(
            Some(&document),
            false,
            &RenderOptions::default(),
        ));
        assert_eq!(view.page_title, "Como utilizar Hooks | spacetravelling");
    }

    #[test]
    fn test_publication_date_in_portuguese() {
        let document = published_post();
        let view = ready(build_post_page(
            Some(&document),
            false,
            &RenderOptions::default(),
        ));
        assert_eq!(view.publication_date, "25 mar 2021");
    }

    #[test]
    fn test_publication_date_in_english() {
        let date = parse_timestamp("2021-04-05T10:00:00+0000").unwrap();
        assert_eq!(format_publication_date(&date, Locale::en_US), "05 Apr 2021");
    }

    #[test]
    fn test_reading_time_and_sections() {
        let document = published_post();
        let view = ready(build_post_page(
            Some(&document),
            false,
            &RenderOptions::default(),
        ));

        assert_eq!(view.reading_time_minutes, 1);
        assert_eq!(view.sections.len(), 2);
        assert_eq!(view.sections[0].heading, "Proin et varius");
        assert_eq!(view.sections[1].heading, "Cras laoreet");
        assert_eq!(
            view.sections[1].html.as_str(),
            "<ul><li>one</li><li>two</li></ul>"
        );
    }

    #[test]
    fn test_render_options_from_locale_name() {
        let options = RenderOptions::new("en_US", "blog").unwrap();
        assert_eq!(options.locale, Locale::en_US);
        assert_eq!(options.site_name, "blog");
    }

    #[test]
    fn test_render_options_rejects_unknown_locale() {
        let result = RenderOptions::new("xx_YY", "blog");
        assert_eq!(result, Err(PostError::InvalidLocale("xx_YY".to_string())));
    }
}
