/// Stroke style of a bucket rectangle.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TileStyle {
    /// CSS color name.
    pub color: &'static str,
    /// Stroke width in pixels.
    pub weight: u32,
}

impl TileStyle {
    pub const FRESH: TileStyle = TileStyle::new("green", 1);
    pub const STALE: TileStyle = TileStyle::new("orange", 1);
    pub const UNAVAILABLE: TileStyle = TileStyle::new("red", 1);

    pub const fn new(color: &'static str, weight: u32) -> Self {
        Self { color, weight }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TileStatus {
    Fresh,
    Stale,
    /// On the static grid but not published yet.
    Unavailable,
}

impl TileStatus {
    pub fn style(&self) -> TileStyle {
        match self {
            TileStatus::Fresh => TileStyle::FRESH,
            TileStatus::Stale => TileStyle::STALE,
            TileStatus::Unavailable => TileStyle::UNAVAILABLE,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TileStatus::Fresh => "fresh",
            TileStatus::Stale => "stale",
            TileStatus::Unavailable => "unavailable",
        }
    }
}

impl From<catalog::Freshness> for TileStatus {
    fn from(freshness: catalog::Freshness) -> Self {
        match freshness {
            catalog::Freshness::Fresh => TileStatus::Fresh,
            catalog::Freshness::Stale => TileStatus::Stale,
        }
    }
}
