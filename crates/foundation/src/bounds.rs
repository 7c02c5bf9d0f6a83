/// Geographic bounding box in degrees, stored as `[lat, lon]` corners.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LatLonBounds {
    pub min: [f64; 2],
    pub max: [f64; 2],
}

impl LatLonBounds {
    pub fn new(min: [f64; 2], max: [f64; 2]) -> Self {
        LatLonBounds { min, max }
    }

    pub fn south(&self) -> f64 {
        self.min[0]
    }

    pub fn west(&self) -> f64 {
        self.min[1]
    }

    pub fn north(&self) -> f64 {
        self.max[0]
    }

    pub fn east(&self) -> f64 {
        self.max[1]
    }

    /// Smallest box containing both `self` and `other`.
    pub fn union(&self, other: &LatLonBounds) -> LatLonBounds {
        LatLonBounds {
            min: [self.min[0].min(other.min[0]), self.min[1].min(other.min[1])],
            max: [self.max[0].max(other.max[0]), self.max[1].max(other.max[1])],
        }
    }

    /// `[[south, west], [north, east]]`, the corner order map widgets expect.
    pub fn corners(&self) -> [[f64; 2]; 2] {
        [self.min, self.max]
    }

    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        lat >= self.min[0] && lat <= self.max[0] && lon >= self.min[1] && lon <= self.max[1]
    }
}

/// Folds an iterator of boxes into their union. `None` when empty.
pub fn union_all<'a, I>(boxes: I) -> Option<LatLonBounds>
where
    I: IntoIterator<Item = &'a LatLonBounds>,
{
    boxes
        .into_iter()
        .fold(None, |acc: Option<LatLonBounds>, b| match acc {
            Some(a) => Some(a.union(b)),
            None => Some(*b),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn union_covers_both_boxes() {
        let a = LatLonBounds::new([40.0, -100.0], [50.0, -90.0]);
        let b = LatLonBounds::new([20.0, -130.0], [30.0, -120.0]);
        let u = a.union(&b);
        assert_eq!(u.corners(), [[20.0, -130.0], [50.0, -90.0]]);
        assert!(u.contains(35.0, -110.0));
    }

    #[test]
    fn union_all_of_nothing_is_none() {
        let none: [LatLonBounds; 0] = [];
        assert!(union_all(&none).is_none());
    }

    #[test]
    fn union_all_single_box_is_identity() {
        let a = LatLonBounds::new([40.0, -100.0], [50.0, -90.0]);
        assert_eq!(union_all(&[a]), Some(a));
    }
}
