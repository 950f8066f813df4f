pub mod builder;
pub mod cli;
pub mod export;
pub mod formatting;
pub mod logging;
pub mod report;
pub mod sources;
pub mod summary;

pub use builder::{RawSeries, Reading, ReportBuilder, ReportRow, Volume};

use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs;

pub(crate) async fn write_output_file(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }

    fs::write(path, bytes)
        .await
        .with_context(|| format!("failed to write {}", path.display()))?;

    Ok(())
}
