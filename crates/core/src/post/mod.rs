mod error;
mod generation;
mod paths;
mod reading_time;
mod rich_text;
mod types;
mod view;

pub use error::PostError;
pub use generation::{
    is_stale, resolve_miss, FallbackMode, MissAction, DEFAULT_REVALIDATE_SECONDS,
};
pub use paths::{enumerate_static_paths, is_valid_slug, static_paths, StaticPath};
pub use reading_time::{count_characters, estimate_reading_time, CHARACTERS_PER_SECOND};
pub use rich_text::{serialize_blocks, TrustedHtml};
pub use types::{
    BodyBlock, Document, DocumentRef, EmbedBlock, Image, OEmbed, PostData, Section, Span,
    SpanData, SpanKind, TextBlock,
};
pub use view::{
    build_post_page, format_publication_date, PostPage, PostView, RenderOptions, SectionView,
    DEFAULT_LOCALE, DEFAULT_SITE_NAME, PUBLICATION_DATE_FORMAT,
};
