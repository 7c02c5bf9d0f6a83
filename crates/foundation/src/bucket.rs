//! Scenery bucket naming.
//!
//! A bucket is a 10°×10° tile identified by its lower-left corner. Its name is
//! longitude first, then latitude: `w130n50` is the tile spanning 130°W-120°W
//! and 50°N-60°N.

use std::fmt;
use std::str::FromStr;

use crate::bounds::LatLonBounds;
use crate::dem::DemCell;

/// Edge length of a bucket in degrees.
pub const BUCKET_SPAN_DEG: i32 = 10;

const NAME_LEN: usize = 7;

/// Lower-left corner of a bucket in integer degrees.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BucketCoord {
    pub lat: i32,
    pub lon: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BucketError {
    Length(usize),
    NotAscii,
    Hemisphere { position: usize, found: char },
    Digits(String),
}

impl fmt::Display for BucketError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BucketError::Length(len) => {
                write!(f, "bucket name must be {NAME_LEN} characters, got {len}")
            }
            BucketError::NotAscii => write!(f, "bucket name must be ASCII"),
            BucketError::Hemisphere { position, found } => {
                write!(f, "unexpected hemisphere letter {found:?} at position {position}")
            }
            BucketError::Digits(field) => write!(f, "expected digits, got {field:?}"),
        }
    }
}

impl std::error::Error for BucketError {}

impl BucketCoord {
    pub const fn new(lat: i32, lon: i32) -> Self {
        Self { lat, lon }
    }

    /// Bucket containing a position. Degrees are floored to the 10° grid, so
    /// -5° falls in the bucket starting at -10°. The north pole and the
    /// antimeridian fold into the last row/column.
    pub fn containing(lat_deg: f64, lon_deg: f64) -> Self {
        let snap = |deg: f64| ((deg / BUCKET_SPAN_DEG as f64).floor() as i32) * BUCKET_SPAN_DEG;
        Self {
            lat: snap(lat_deg).clamp(-90, 90 - BUCKET_SPAN_DEG),
            lon: snap(lon_deg).clamp(-180, 180 - BUCKET_SPAN_DEG),
        }
    }

    /// Canonical lowercase name, e.g. `w080n40`.
    pub fn name(&self) -> String {
        let lon_dir = if self.lon < 0 { 'w' } else { 'e' };
        let lat_dir = if self.lat < 0 { 's' } else { 'n' };
        format!(
            "{lon_dir}{:03}{lat_dir}{:02}",
            self.lon.unsigned_abs(),
            self.lat.unsigned_abs()
        )
    }

    pub fn bounds(&self) -> LatLonBounds {
        LatLonBounds::new(
            [self.lat as f64, self.lon as f64],
            [
                (self.lat + BUCKET_SPAN_DEG) as f64,
                (self.lon + BUCKET_SPAN_DEG) as f64,
            ],
        )
    }

    /// Bounds grown by `margin_deg` on every side, clamped to the globe.
    pub fn bounds_with_margin(&self, margin_deg: f64) -> LatLonBounds {
        let b = self.bounds();
        LatLonBounds::new(
            [
                (b.south() - margin_deg).max(-90.0),
                (b.west() - margin_deg).max(-180.0),
            ],
            [
                (b.north() + margin_deg).min(90.0),
                (b.east() + margin_deg).min(180.0),
            ],
        )
    }

    /// Names of the one-degree SRTM cells covering this bucket, south to north,
    /// west to east within each row.
    pub fn dem_cells(&self) -> Vec<String> {
        let mut out = Vec::with_capacity((BUCKET_SPAN_DEG * BUCKET_SPAN_DEG) as usize);
        for lat in self.lat..self.lat + BUCKET_SPAN_DEG {
            for lon in self.lon..self.lon + BUCKET_SPAN_DEG {
                out.push(DemCell::new(lat, lon).file_name());
            }
        }
        out
    }
}

impl fmt::Display for BucketCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl FromStr for BucketCoord {
    type Err = BucketError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        if !name.is_ascii() {
            return Err(BucketError::NotAscii);
        }
        let bytes = name.as_bytes();
        if bytes.len() != NAME_LEN {
            return Err(BucketError::Length(bytes.len()));
        }

        let lon_sign = match bytes[0].to_ascii_lowercase() {
            b'e' => 1,
            b'w' => -1,
            other => {
                return Err(BucketError::Hemisphere {
                    position: 0,
                    found: other as char,
                });
            }
        };
        let lat_sign = match bytes[4].to_ascii_lowercase() {
            b'n' => 1,
            b's' => -1,
            other => {
                return Err(BucketError::Hemisphere {
                    position: 4,
                    found: other as char,
                });
            }
        };

        let lon = parse_digits(&name[1..4])?;
        let lat = parse_digits(&name[5..7])?;
        Ok(Self {
            lat: lat_sign * lat,
            lon: lon_sign * lon,
        })
    }
}

fn parse_digits(field: &str) -> Result<i32, BucketError> {
    // `str::parse` would also accept a leading `+`.
    if !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err(BucketError::Digits(field.to_string()));
    }
    field
        .parse::<i32>()
        .map_err(|_| BucketError::Digits(field.to_string()))
}

/// Name of the bucket whose lower-left corner is `(lat, lon)`.
pub fn encode(lat: i32, lon: i32) -> String {
    BucketCoord::new(lat, lon).name()
}

/// `(lat, lon)` of the bucket named `name`, in any letter case.
pub fn decode(name: &str) -> Result<(i32, i32), BucketError> {
    let coord: BucketCoord = name.parse()?;
    Ok((coord.lat, coord.lon))
}
