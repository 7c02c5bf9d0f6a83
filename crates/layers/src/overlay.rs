//! Map overlay plan: one rectangle per bucket, with its style, tooltip and
//! click behavior, independent of any map widget.

use std::collections::HashSet;

use catalog::{CompactDate, DEFAULT_STALENESS_CUTOFF, DownloadManifest, Freshness, format_size};
use foundation::{BucketCoord, BucketError, LatLonBounds, union_all};

use crate::grid::AMERICAS_GRID;
use crate::symbology::{TileStatus, TileStyle};

/// Which tiles to draw besides the published ones.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CoveragePolicy<'a> {
    ManifestOnly,
    /// Also draw grid tiles missing from the manifest as placeholders.
    WithGrid(&'a [BucketCoord]),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct OverlayConfig<'a> {
    pub staleness_cutoff: CompactDate,
    pub coverage: CoveragePolicy<'a>,
}

impl Default for OverlayConfig<'static> {
    fn default() -> Self {
        Self {
            staleness_cutoff: DEFAULT_STALENESS_CUTOFF,
            coverage: CoveragePolicy::WithGrid(&AMERICAS_GRID),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TileAction {
    Download { url: String, filename: String },
    NotYetAvailable,
}

/// What a click on a tile should do in the host UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    Download { url: String, filename: String },
    Notice(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TileOverlay {
    pub bucket: String,
    pub coord: BucketCoord,
    pub bounds: LatLonBounds,
    pub status: TileStatus,
    pub tooltip: String,
    pub action: TileAction,
}

impl TileOverlay {
    pub fn style(&self) -> TileStyle {
        self.status.style()
    }

    pub fn click(&self) -> ClickOutcome {
        match &self.action {
            TileAction::Download { url, filename } => ClickOutcome::Download {
                url: url.clone(),
                filename: filename.clone(),
            },
            TileAction::NotYetAvailable => ClickOutcome::Notice(not_yet_available(&self.bucket)),
        }
    }
}

/// A manifest key that could not be placed on the map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntry {
    pub key: String,
    pub error: BucketError,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverlayPlan {
    /// Published tiles in manifest order, then placeholders in grid order.
    pub tiles: Vec<TileOverlay>,
    pub skipped: Vec<SkippedEntry>,
    /// Union of all tile bounds, for fitting the view.
    pub bounds: Option<LatLonBounds>,
}

pub fn not_yet_available(bucket: &str) -> String {
    format!("Scenery for {bucket} is not yet available.")
}

pub fn build_overlay(manifest: &DownloadManifest, config: &OverlayConfig<'_>) -> OverlayPlan {
    let mut plan = OverlayPlan::default();
    let mut published: HashSet<BucketCoord> = HashSet::new();

    for (key, entry) in manifest.iter() {
        let coord = match key.parse::<BucketCoord>() {
            Ok(c) => c,
            Err(error) => {
                plan.skipped.push(SkippedEntry {
                    key: key.to_string(),
                    error,
                });
                continue;
            }
        };
        published.insert(coord);

        let freshness = Freshness::classify(entry.date, config.staleness_cutoff);
        plan.tiles.push(TileOverlay {
            bucket: key.to_string(),
            coord,
            bounds: coord.bounds(),
            status: freshness.into(),
            tooltip: format!("{key} ({}, {})", format_size(entry.size), entry.date.iso()),
            action: TileAction::Download {
                url: entry.url.clone(),
                filename: entry.name.clone(),
            },
        });
    }

    if let CoveragePolicy::WithGrid(grid) = config.coverage {
        for coord in grid {
            if published.contains(coord) {
                continue;
            }
            let bucket = coord.name();
            plan.tiles.push(TileOverlay {
                tooltip: format!("{bucket} (not yet available)"),
                bucket,
                coord: *coord,
                bounds: coord.bounds(),
                status: TileStatus::Unavailable,
                action: TileAction::NotYetAvailable,
            });
        }
    }

    plan.bounds = union_all(plan.tiles.iter().map(|t| &t.bounds));
    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::DownloadEntry;
    use pretty_assertions::assert_eq;

    fn date(raw: &str) -> CompactDate {
        raw.parse().unwrap()
    }

    fn single_manifest() -> DownloadManifest {
        let mut m = DownloadManifest::new();
        m.insert(
            "w100n40",
            DownloadEntry {
                url: "a".to_string(),
                name: "b".to_string(),
                date: date("20240115"),
                size: 1_500_000,
            },
        );
        m
    }

    fn manifest_only(cutoff: &str) -> OverlayConfig<'static> {
        OverlayConfig {
            staleness_cutoff: date(cutoff),
            coverage: CoveragePolicy::ManifestOnly,
        }
    }

    #[test]
    fn fresh_tile_has_formatted_tooltip() {
        let plan = build_overlay(&single_manifest(), &manifest_only("20240108"));
        assert_eq!(plan.tiles.len(), 1);
        let tile = &plan.tiles[0];
        assert_eq!(tile.status, TileStatus::Fresh);
        assert_eq!(tile.style(), TileStyle::FRESH);
        assert_eq!(tile.tooltip, "w100n40 (1.43 MB, 2024-01-15)");
        assert_eq!(tile.bounds.corners(), [[40.0, -100.0], [50.0, -90.0]]);
        assert_eq!(
            tile.click(),
            ClickOutcome::Download {
                url: "a".to_string(),
                filename: "b".to_string()
            }
        );
    }

    #[test]
    fn later_cutoff_marks_tile_stale() {
        let plan = build_overlay(&single_manifest(), &manifest_only("20240201"));
        assert_eq!(plan.tiles[0].status, TileStatus::Stale);
        assert_eq!(plan.tiles[0].style(), TileStyle::STALE);
    }

    #[test]
    fn missing_grid_tile_gives_notice_not_download() {
        let grid = [BucketCoord::new(40, -100), BucketCoord::new(30, -100)];
        let config = OverlayConfig {
            staleness_cutoff: date("20240108"),
            coverage: CoveragePolicy::WithGrid(&grid),
        };
        let plan = build_overlay(&single_manifest(), &config);
        assert_eq!(plan.tiles.len(), 2);

        let placeholder = &plan.tiles[1];
        assert_eq!(placeholder.bucket, "w100n30");
        assert_eq!(placeholder.status, TileStatus::Unavailable);
        assert_eq!(placeholder.style(), TileStyle::UNAVAILABLE);
        match placeholder.click() {
            ClickOutcome::Notice(msg) => assert!(msg.contains("not yet available")),
            other => panic!("expected a notice, got {other:?}"),
        }
    }

    #[test]
    fn grid_matches_manifest_keys_by_coordinate() {
        let mut m = DownloadManifest::new();
        m.insert(
            "W100N40",
            DownloadEntry {
                url: "a".to_string(),
                name: "b".to_string(),
                date: date("20240115"),
                size: 10,
            },
        );
        let grid = [BucketCoord::new(40, -100)];
        let config = OverlayConfig {
            staleness_cutoff: date("20240108"),
            coverage: CoveragePolicy::WithGrid(&grid),
        };
        let plan = build_overlay(&m, &config);
        assert_eq!(plan.tiles.len(), 1);
        assert_eq!(plan.tiles[0].status, TileStatus::Fresh);
    }

    #[test]
    fn malformed_key_is_skipped_and_rest_renders() {
        let mut m = single_manifest();
        m.insert(
            "nowhere",
            DownloadEntry {
                url: "x".to_string(),
                name: "y".to_string(),
                date: date("20240115"),
                size: 1,
            },
        );
        m.insert(
            "w090n30",
            DownloadEntry {
                url: "c".to_string(),
                name: "d".to_string(),
                date: date("20231201"),
                size: 1,
            },
        );

        let plan = build_overlay(&m, &manifest_only("20240108"));
        let buckets: Vec<&str> = plan.tiles.iter().map(|t| t.bucket.as_str()).collect();
        assert_eq!(buckets, vec!["w100n40", "w090n30"]);
        assert_eq!(plan.skipped.len(), 1);
        assert_eq!(plan.skipped[0].key, "nowhere");
        assert_eq!(
            plan.skipped[0].error,
            BucketError::Hemisphere {
                position: 0,
                found: 'n'
            }
        );
    }

    #[test]
    fn bounds_cover_every_tile() {
        let plan = build_overlay(&single_manifest(), &OverlayConfig::default());
        assert_eq!(plan.tiles.len(), AMERICAS_GRID.len());
        let bounds = plan.bounds.unwrap();
        assert_eq!(bounds.corners(), [[20.0, -140.0], [70.0, -50.0]]);
    }

    #[test]
    fn empty_manifest_without_grid_has_no_bounds() {
        let plan = build_overlay(&DownloadManifest::new(), &manifest_only("20240108"));
        assert!(plan.tiles.is_empty());
        assert!(plan.bounds.is_none());
    }
}
