//! Pretty output formatting.

use spacetravelling_core::post::{
    count_characters, estimate_reading_time, format_publication_date, Document, RenderOptions,
    StaticPath,
};

/// Format the list of pages to pre-render.
pub fn format_paths(paths: &[StaticPath]) -> String {
    if paths.is_empty() {
        return "No posts found.".to_string();
    }
    let mut output = format!("PATHS ({})\n", paths.len());
    output.push_str(&"-".repeat(40));
    for path in paths {
        output.push_str(&format!("\n{}", path.url_path()));
    }
    output
}

/// Format a post for display.
pub fn format_document(document: &Document, options: &RenderOptions) -> String {
    let data = &document.data;
    let published = document
        .first_publication_date
        .as_ref()
        .map(|date| format_publication_date(date, options.locale))
        .unwrap_or_else(|| "unpublished".to_string());

    let mut output = format!(
        "{}\n  Slug: {}\n  Author: {}\n  Published: {}\n  Reading time: {} min ({} characters)\n  Banner: {}",
        data.title,
        document.uid,
        data.author,
        published,
        estimate_reading_time(&data.content),
        count_characters(&data.content),
        data.banner.url,
    );
    for section in &data.content {
        output.push_str(&format!(
            "\n  - {} ({} blocks)",
            section.heading,
            section.body.len()
        ));
    }
    output
}
