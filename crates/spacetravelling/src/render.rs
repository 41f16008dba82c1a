//! HTML rendering of post pages with Askama templates.

use askama::Template;
use spacetravelling_core::post::{PostPage, PostView, RenderOptions};

/// Seconds the loading placeholder waits before reloading itself.
pub const PLACEHOLDER_REFRESH_SECONDS: u32 = 2;

/// A published post.
#[derive(Template)]
#[template(path = "post.html")]
struct PostTemplate<'a> {
    site_name: &'a str,
    post: &'a PostView,
}

/// The loading placeholder shown while a post is being generated.
#[derive(Template)]
#[template(path = "loading.html")]
struct LoadingTemplate<'a> {
    site_name: &'a str,
    refresh_seconds: u32,
}

/// Renders a post page to a complete HTML document.
pub fn render_page(page: &PostPage, options: &RenderOptions) -> Result<String, askama::Error> {
    match page {
        PostPage::Ready(post) => PostTemplate {
            site_name: &options.site_name,
            post,
        }
        .render(),
        PostPage::Loading => render_placeholder(options),
    }
}

/// Renders the loading placeholder.
pub fn render_placeholder(options: &RenderOptions) -> Result<String, askama::Error> {
    LoadingTemplate {
        site_name: &options.site_name,
        refresh_seconds: PLACEHOLDER_REFRESH_SECONDS,
    }
    .render()
}
