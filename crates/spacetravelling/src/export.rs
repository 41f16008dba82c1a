//! Static export of every post to HTML files.

use std::path::{Path, PathBuf};

use anyhow::Context;
use spacetravelling_core::{
    post::{enumerate_static_paths, RenderOptions},
    storage::ContentRepository,
};

use crate::generate::{generate_page, Generated};

/// What an export produced.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ExportReport {
    /// Files written, relative to the output directory.
    pub written: Vec<PathBuf>,
    /// Slugs that were listed but had no page to write.
    pub skipped: Vec<String>,
}

/// Renders every listed post into `out_dir/post/{slug}/index.html`.
pub async fn export_site(
    repo: &dyn ContentRepository,
    options: &RenderOptions,
    out_dir: &Path,
) -> anyhow::Result<ExportReport> {
    let paths = enumerate_static_paths(repo)
        .await
        .context("Failed to list posts")?;

    let mut report = ExportReport::default();
    for path in paths {
        let html = match generate_page(repo, &path.slug, options)
            .await
            .with_context(|| format!("Failed to generate {}", path.url_path()))?
        {
            Generated::Page(html) => html,
            Generated::NotFound => {
                tracing::warn!(slug = %path.slug, "Listed post disappeared, skipping");
                report.skipped.push(path.slug);
                continue;
            }
            Generated::Unpublished => {
                tracing::warn!(slug = %path.slug, "Post has no publication date, skipping");
                report.skipped.push(path.slug);
                continue;
            }
        };

        let relative = path.output_file();
        let target = out_dir.join(&relative);
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        tokio::fs::write(&target, html)
            .await
            .with_context(|| format!("Failed to write {}", target.display()))?;

        tracing::info!(path = %target.display(), "Wrote page");
        report.written.push(relative);
    }

    Ok(report)
}
