//! Integer node keys

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::{Vec3, MM_PER_M};

/// A point quantised to the integer millimetre grid
///
/// Two points map to the same node exactly when their keys are equal.
/// Keys order by (y, z, x), which is the node numbering order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PointKey {
    pub x: i64,
    pub y: i64,
    pub z: i64,
}

impl PointKey {
    /// Quantise a point given in metres
    pub fn from_metres(p: &Vec3) -> Self {
        Self {
            x: (p.x * MM_PER_M).round() as i64,
            y: (p.y * MM_PER_M).round() as i64,
            z: (p.z * MM_PER_M).round() as i64,
        }
    }

    /// Coordinates in millimetres
    pub fn to_mm(self) -> [f64; 3] {
        [self.x as f64, self.y as f64, self.z as f64]
    }
}

impl Ord for PointKey {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.y, self.z, self.x).cmp(&(other.y, other.z, other.x))
    }
}

impl PartialOrd for PointKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantise() {
        let key = PointKey::from_metres(&Vec3::new(1.0004, 2.4996, -0.0004));
        assert_eq!(key, PointKey { x: 1000, y: 2500, z: 0 });
        assert_eq!(key.to_mm(), [1000.0, 2500.0, 0.0]);
    }

    #[test]
    fn test_ordering_is_y_then_z_then_x() {
        let low = PointKey { x: 9000, y: 0, z: 0 };
        let high = PointKey { x: 0, y: 1, z: 0 };
        let mid = PointKey { x: 0, y: 0, z: 5 };
        let mut keys = vec![high, mid, low];
        keys.sort();
        assert_eq!(keys, vec![low, mid, high]);
    }
}
