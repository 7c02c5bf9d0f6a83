//! FlightGear scenery tile numbering.

use std::fmt;

/// Latitude band upper bounds and the tile width (degrees of longitude) used
/// below each bound.
const TILE_WIDTHS: [(f64, f64); 13] = [
    (-89.0, 12.0),
    (-86.0, 4.0),
    (-83.0, 2.0),
    (-76.0, 1.0),
    (-62.0, 0.5),
    (-22.0, 0.25),
    (22.0, 0.125),
    (62.0, 0.25),
    (76.0, 0.5),
    (83.0, 1.0),
    (86.0, 2.0),
    (89.0, 4.0),
    (90.0, 12.0),
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TileIndexError {
    LatitudeOutOfRange(f64),
    LongitudeOutOfRange(f64),
}

impl fmt::Display for TileIndexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TileIndexError::LatitudeOutOfRange(lat) => write!(f, "latitude out of range: {lat}"),
            TileIndexError::LongitudeOutOfRange(lon) => {
                write!(f, "longitude out of range: {lon}")
            }
        }
    }
}

impl std::error::Error for TileIndexError {}

/// Width in degrees of longitude of a tile at `lat`.
pub fn tile_width(lat: f64) -> f64 {
    TILE_WIDTHS
        .iter()
        .find(|(bound, _)| lat < *bound)
        .map(|(_, width)| *width)
        .unwrap_or(TILE_WIDTHS[TILE_WIDTHS.len() - 1].1)
}

/// Index of the scenery tile containing `(lat, lon)`.
///
/// Longitude 180 is the antimeridian and is numbered as -180.
pub fn tile_index(lat: f64, lon: f64) -> Result<u32, TileIndexError> {
    if !(-90.0..=90.0).contains(&lat) {
        return Err(TileIndexError::LatitudeOutOfRange(lat));
    }
    if !(-180.0..=180.0).contains(&lon) {
        return Err(TileIndexError::LongitudeOutOfRange(lon));
    }
    let lon = if lon == 180.0 { -180.0 } else { lon };

    let width = tile_width(lat);
    let base_y = lat.floor();
    let y = ((lat - base_y) * 8.0).trunc() as u32;
    let base_x = ((lon / width).floor() * width).floor();
    let x = ((lon - base_x) / width).floor() as u32;

    let lon_part = ((lon + 180.0) as u32) << 14;
    let lat_part = ((lat + 90.0) as u32) << 6;
    Ok(lon_part + lat_part + (y << 3) + x)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_follows_latitude_bands() {
        assert_eq!(tile_width(0.0), 0.125);
        assert_eq!(tile_width(37.5), 0.25);
        assert_eq!(tile_width(-70.0), 0.5);
        assert_eq!(tile_width(88.0), 4.0);
        assert_eq!(tile_width(89.5), 12.0);
        assert_eq!(tile_width(90.0), 12.0);
        assert_eq!(tile_width(-90.0), 12.0);
    }

    #[test]
    fn known_indices() {
        assert_eq!(tile_index(37.5, -122.25), Ok(942051));
        assert_eq!(tile_index(0.0, 0.0), Ok(2954880));
    }

    #[test]
    fn antimeridian_wraps_to_west() {
        assert_eq!(tile_index(0.0, 180.0), tile_index(0.0, -180.0));
        assert_eq!(tile_index(0.0, -180.0), Ok(90 << 6));
        let east_edge = tile_index(0.0, 179.9).unwrap();
        assert!(east_edge < 360 << 14);
        assert!(tile_index(0.0, 180.0).unwrap() < 360 << 14);
    }

    #[test]
    fn rejects_out_of_range() {
        assert_eq!(
            tile_index(91.0, 0.0),
            Err(TileIndexError::LatitudeOutOfRange(91.0))
        );
        assert_eq!(
            tile_index(0.0, -181.0),
            Err(TileIndexError::LongitudeOutOfRange(-181.0))
        );
        assert!(tile_index(f64::NAN, 0.0).is_err());
    }
}
