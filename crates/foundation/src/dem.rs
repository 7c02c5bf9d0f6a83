//! One-degree elevation cells named like `N40W080.hgt`.

use std::fmt;

/// South-west corner of a one-degree DEM cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DemCell {
    pub lat: i32,
    pub lon: i32,
}

const DEM_EXTENSIONS: [&str; 2] = ["tif", "hgt"];

impl DemCell {
    pub const fn new(lat: i32, lon: i32) -> Self {
        Self { lat, lon }
    }

    /// Cell named by a source file such as `N40W080.hgt` or
    /// `n40w080_srtm.TIF`. The name must start with `[NS]dd[EW]ddd` and end
    /// in `.tif` or `.hgt`, in any letter case. `None` for anything else.
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let (stem, ext) = file_name.rsplit_once('.')?;
        if !DEM_EXTENSIONS.iter().any(|e| ext.eq_ignore_ascii_case(e)) {
            return None;
        }
        let head = stem.as_bytes().get(..7)?;

        let lat_sign = match head[0].to_ascii_uppercase() {
            b'N' => 1,
            b'S' => -1,
            _ => return None,
        };
        let lon_sign = match head[3].to_ascii_uppercase() {
            b'E' => 1,
            b'W' => -1,
            _ => return None,
        };
        let lat = digits(&head[1..3])?;
        let lon = digits(&head[4..7])?;
        Some(Self::new(lat_sign * lat, lon_sign * lon))
    }

    /// Canonical SRTM file name, e.g. `N40W080.hgt`.
    pub fn file_name(&self) -> String {
        format!("{self}.hgt")
    }
}

fn digits(field: &[u8]) -> Option<i32> {
    field.iter().try_fold(0i32, |acc, b| {
        b.is_ascii_digit().then(|| acc * 10 + i32::from(b - b'0'))
    })
}

impl fmt::Display for DemCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lat_dir = if self.lat < 0 { 'S' } else { 'N' };
        let lon_dir = if self.lon < 0 { 'W' } else { 'E' };
        write!(
            f,
            "{lat_dir}{:02}{lon_dir}{:03}",
            self.lat.unsigned_abs(),
            self.lon.unsigned_abs()
        )
    }
}
