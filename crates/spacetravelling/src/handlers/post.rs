//! Post page handler.
//!
//! Cached pages are always served straight from memory. A stale page is
//! still served while a background task regenerates it. Slugs that were
//! never generated follow the configured fallback mode.

use std::time::Duration;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
};
use spacetravelling_core::post::{is_stale, is_valid_slug, resolve_miss, MissAction};

use crate::{
    cache::PageContent, handlers::AppError, render::render_placeholder, state::AppState,
};

/// GET /post/{slug} - Serve a post page.
#[axum::debug_handler]
pub async fn show_post(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Response, AppError> {
    if !is_valid_slug(&slug) {
        return Ok(not_found());
    }

    if let Some(entry) = state.pages.get(&slug).await {
        if is_stale(entry.age(), state.revalidate) {
            tracing::debug!(%slug, age = ?entry.age(), "Serving stale page");
            state.ensure_regeneration(&slug);
        }
        return Ok(content_response(entry.content, state.revalidate));
    }

    match resolve_miss(state.fallback) {
        MissAction::NotFound => Ok(not_found()),
        MissAction::ServePlaceholder => {
            state.ensure_regeneration(&slug);
            placeholder(&state)
        }
        MissAction::RenderBlocking => match state.regenerate(&slug).await? {
            Some(content) => Ok(content_response(content, state.revalidate)),
            None => placeholder(&state),
        },
    }
}

fn content_response(content: PageContent, revalidate: Duration) -> Response {
    match content {
        PageContent::Html(html) => (
            [(
                header::CACHE_CONTROL,
                format!(
                    "s-maxage={}, stale-while-revalidate",
                    revalidate.as_secs()
                ),
            )],
            Html(html.to_string()),
        )
            .into_response(),
        PageContent::NotFound => not_found(),
    }
}

fn placeholder(state: &AppState) -> Result<Response, AppError> {
    let html = render_placeholder(&state.render_options)?;
    Ok(([(header::CACHE_CONTROL, "no-store")], Html(html)).into_response())
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "Post not found").into_response()
}
