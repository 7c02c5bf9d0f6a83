//! Publisher-side helpers behind the `scenery` binary.

pub mod airports;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use catalog::listing::{ListedFile, direct_download_url, manifest_from_listing};
use catalog::{DownloadManifest, format_size};
use foundation::{BucketCoord, DemCell};
use layers::{OverlayConfig, TileStatus, build_overlay};
use tracing::{debug, warn};

/// Regular files directly inside `dir`, with their sizes.
pub fn scan_archives(dir: &Path) -> io::Result<Vec<ListedFile>> {
    let mut out = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let meta = entry.metadata()?;
        if !meta.is_file() {
            continue;
        }
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            warn!("skipping non UTF-8 file name {:?}", entry.file_name());
            continue;
        };
        out.push(ListedFile::new(name, meta.len()));
    }
    Ok(out)
}

/// Manifest for the archives in `dir`, published under `base_url`.
pub fn build_manifest(dir: &Path, base_url: &str) -> io::Result<DownloadManifest> {
    let files = scan_archives(dir)?;
    debug!("found {} files in {}", files.len(), dir.display());
    let base = base_url.trim_end_matches('/');
    Ok(manifest_from_listing(files, |file| {
        direct_download_url(&format!("{base}/{}", file.name))
    }))
}

pub fn read_manifest(path: &Path) -> Result<DownloadManifest, Box<dyn std::error::Error>> {
    let raw = fs::read_to_string(path)?;
    Ok(DownloadManifest::from_json_str(&raw)?)
}

/// Overlap, in degrees, between a bucket and the DEM cells used to build it.
pub const DEM_MARGIN_DEG: f64 = 1.0;

/// DEM source files under `dir` (recursively) whose cell corner lies within
/// `bucket` grown by [`DEM_MARGIN_DEG`]. Sorted absolute paths.
pub fn find_dem_files(dir: &Path, bucket: BucketCoord) -> io::Result<Vec<PathBuf>> {
    let bounds = bucket.bounds_with_margin(DEM_MARGIN_DEG);
    let mut out = Vec::new();
    for entry in walkdir::WalkDir::new(dir) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        let is_dem = name
            .rsplit_once('.')
            .is_some_and(|(_, ext)| {
                ext.eq_ignore_ascii_case("tif") || ext.eq_ignore_ascii_case("hgt")
            });
        if !is_dem {
            continue;
        }
        let Some(cell) = DemCell::from_file_name(&name) else {
            warn!("skipping badly-formatted DEM name {}", entry.path().display());
            continue;
        };
        if bounds.contains(cell.lat as f64, cell.lon as f64) {
            out.push(std::path::absolute(entry.path())?);
        }
    }
    out.sort();
    debug!("{} DEM files for {bucket}", out.len());
    Ok(out)
}

/// One tab-separated line per drawn tile: bucket, size, date, status.
pub fn summary_lines(manifest: &DownloadManifest, config: &OverlayConfig<'_>) -> Vec<String> {
    let plan = build_overlay(manifest, config);
    for skipped in &plan.skipped {
        warn!("skipping manifest entry {:?}: {}", skipped.key, skipped.error);
    }

    plan.tiles
        .iter()
        .map(|tile| match (tile.status, manifest.get(&tile.bucket)) {
            (TileStatus::Unavailable, _) | (_, None) => {
                format!("{}\t-\t-\t{}", tile.bucket, tile.status.as_str())
            }
            (status, Some(entry)) => format!(
                "{}\t{}\t{}\t{}",
                tile.bucket,
                format_size(entry.size),
                entry.date.iso(),
                status.as_str()
            ),
        })
        .collect()
}
