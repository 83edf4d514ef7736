//! `shop.json` writer.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use fnshop_core::ShopSnapshot;

pub(crate) const SNAPSHOT_FILE: &str = "shop.json";

/// Writes `snapshot` as pretty-printed UTF-8 JSON to `dir/shop.json`,
/// creating `dir` if needed. Returns the written path.
pub(crate) fn write_snapshot(dir: &Path, snapshot: &ShopSnapshot) -> anyhow::Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory {}", dir.display()))?;

    let json = serde_json::to_string_pretty(snapshot).context("failed to serialize snapshot")?;
    let path = dir.join(SNAPSHOT_FILE);
    std::fs::write(&path, json)
        .with_context(|| format!("failed to write {}", path.display()))?;

    Ok(path)
}
