//! The `launches` subcommand: an infinite-scroll session in the terminal.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use spacelaunch_lib::cache::MemoryCache;
use spacelaunch_lib::{
    validation, Applied, CachedClient, ImageLoader, ListPresenter, ListRow, PaginationController,
    ThumbnailSize, ThumbnailSlot,
};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::output::{
    print_json, print_launches_csv, print_launches_markdown, print_launches_table, OutputFormat,
};

/// Height of one row in the simulated list, in arbitrary units.
const ROW_HEIGHT: f64 = 44.0;

/// Fetches in a row that may add nothing before the session gives up.
const MAX_EMPTY_FETCHES: usize = 3;

const THUMBNAIL_CONCURRENCY: usize = 4;

#[derive(Args)]
pub struct LaunchesArgs {
    /// Stop once this many launches are loaded
    #[arg(long, default_value = "40")]
    pub limit: usize,

    /// Launches per page (server default when omitted)
    #[arg(long)]
    pub page_size: Option<u32>,

    /// Rows visible at once; more load when less than a screenful remains
    #[arg(long, default_value = "10")]
    pub viewport: u32,

    /// Write downsampled mission patches into this directory
    #[arg(long)]
    pub thumbnails: Option<PathBuf>,

    /// Thumbnail edge length in pixels
    #[arg(long, default_value = "40")]
    pub thumbnail_size: u32,
}

pub async fn run(args: &LaunchesArgs, client: CachedClient, format: &OutputFormat) -> Result<()> {
    let viewport_rows = validation::validate_viewport_rows(args.viewport)?;
    let thumbnail_size = validation::validate_thumbnail_edge(args.thumbnail_size)?;

    let mut controller = PaginationController::new(client);
    if let Some(page_size) = args.page_size {
        controller = controller.with_page_size(validation::validate_page_size(page_size)?);
    }
    let mut presenter = ListPresenter::new(controller, ROW_HEIGHT);
    let viewport_height = viewport_rows as f64 * ROW_HEIGHT;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg}")?);

    let mut offset = 0.0;
    let mut empty_fetches = 0usize;
    while presenter.row_count() < args.limit {
        if presenter.on_scroll(offset, viewport_height) {
            spinner.enable_steady_tick(Duration::from_millis(100));
            spinner.set_message(format!(
                "loading launches ({} so far)...",
                presenter.row_count()
            ));
        }
        let Some(applied) = presenter.settle().await else {
            // nothing in flight and nothing left to request
            break;
        };
        if presenter.take_refresh() {
            spinner.disable_steady_tick();
            spinner.set_message(format!("{} launches loaded", presenter.row_count()));
        }
        match applied {
            Applied::Appended { added, .. } if added > 0 => empty_fetches = 0,
            _ => empty_fetches += 1,
        }
        if empty_fetches >= MAX_EMPTY_FETCHES {
            tracing::warn!(
                "giving up after {} fetches that added no launches",
                empty_fetches
            );
            break;
        }
        // keep the viewport half a screen above the end of the content
        offset = (presenter.content_height() - viewport_height / 2.0).max(0.0);
    }
    spinner.finish_and_clear();
    presenter.dispose();

    let mut rows = presenter.rows();
    rows.truncate(args.limit);

    eprintln!(
        "{} launches ({})",
        rows.len(),
        if presenter.has_more() {
            "more available"
        } else {
            "end of list"
        }
    );

    if let Some(dir) = &args.thumbnails {
        let written = write_thumbnails(&rows, dir, thumbnail_size).await?;
        eprintln!("Wrote {} thumbnails to {}", written, dir.display());
    }

    match format {
        OutputFormat::Table => print_launches_table(&rows),
        OutputFormat::Json => print_json(&rows),
        OutputFormat::Csv => print_launches_csv(&rows)?,
        OutputFormat::Markdown => print_launches_markdown(&rows),
    }

    Ok(())
}

/// Loads every row's patch through its own slot and writes the ones that arrived.
async fn write_thumbnails(rows: &[ListRow], dir: &Path, size: ThumbnailSize) -> Result<usize> {
    std::fs::create_dir_all(dir)?;
    let loader = Arc::new(ImageLoader::new(MemoryCache::new(Duration::from_secs(300)))?);
    let semaphore = Arc::new(Semaphore::new(THUMBNAIL_CONCURRENCY));
    let mut join_set = JoinSet::new();

    for row in rows {
        let mut slot = ThumbnailSlot::new();
        let Some(ticket) = slot.prepare(row.thumbnail_url.as_deref(), size) else {
            continue;
        };
        let loader = Arc::clone(&loader);
        let sem = Arc::clone(&semaphore);
        let id = row.id.clone();
        join_set.spawn(async move {
            let _permit = sem.acquire_owned().await;
            let result = loader.load(&ticket.url, ticket.size).await;
            slot.complete(&ticket, result);
            (id, slot)
        });
    }

    let mut written = 0;
    while let Some(joined) = join_set.join_next().await {
        let (id, slot) = joined?;
        if let Some(thumbnail) = slot.image() {
            let path = dir.join(format!("{}.png", file_stem(&id)));
            std::fs::write(&path, thumbnail.png.as_slice())?;
            written += 1;
        }
    }
    Ok(written)
}

fn file_stem(id: &str) -> String {
    id.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
