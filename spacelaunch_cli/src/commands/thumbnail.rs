use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Args;
use spacelaunch_lib::cache::MemoryCache;
use spacelaunch_lib::{validation, ImageLoader};

#[derive(Args)]
pub struct ThumbnailArgs {
    /// Image URL (http or https)
    #[arg(long)]
    pub url: String,

    /// Edge length of the square thumbnail in pixels
    #[arg(long, default_value = "40")]
    pub size: u32,

    /// Output PNG path
    #[arg(long)]
    pub out: PathBuf,
}

pub async fn run(args: &ThumbnailArgs) -> Result<()> {
    let size = validation::validate_thumbnail_edge(args.size)?;
    let loader = ImageLoader::new(MemoryCache::new(Duration::from_secs(60)))?;
    let thumbnail = loader.load(&args.url, size).await?;
    std::fs::write(&args.out, thumbnail.png.as_slice())?;
    eprintln!(
        "Wrote {}x{} thumbnail to {}",
        size.width,
        size.height,
        args.out.display()
    );
    Ok(())
}
