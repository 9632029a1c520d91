//! Screen coordinates and the rectangle clicks are sampled from.

use std::fmt;

use rand::Rng;

use crate::error::{ClickerError, Result};

/// A screen coordinate in pixels.
///
/// The origin is the top-left corner of the primary display. Coordinates can
/// go negative on multi-display layouts where a display sits left of or
/// above the primary one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Axis-aligned rectangle that click targets are drawn from.
///
/// Built from any two opposite corners; the stored bounds are normalized so
/// `x_min <= x_max` and `y_min <= y_max` on both axes. A degenerate region
/// with equal corners is valid and always yields that exact point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    x_min: i32,
    y_min: i32,
    x_max: i32,
    y_max: i32,
}

impl Region {
    /// Build a region from two opposite corners, given in any order.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            x_min: a.x.min(b.x),
            y_min: a.y.min(b.y),
            x_max: a.x.max(b.x),
            y_max: a.y.max(b.y),
        }
    }

    /// Parse a region from an `x1,y1,x2,y2` command-line value.
    pub fn from_corner_spec(spec: &str) -> Result<Self> {
        let parts: Vec<&str> = spec.split(',').map(str::trim).collect();
        if parts.len() != 4 {
            return Err(ClickerError::config_validation(format!(
                "region must be 'x1,y1,x2,y2', got '{spec}'"
            )));
        }

        let mut coords = [0i32; 4];
        for (slot, part) in coords.iter_mut().zip(&parts) {
            *slot = part.parse().map_err(|_| {
                ClickerError::config_validation(format!("invalid region coordinate '{part}'"))
            })?;
        }

        Ok(Self::from_corners(
            Point::new(coords[0], coords[1]),
            Point::new(coords[2], coords[3]),
        ))
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x_min && p.x <= self.x_max && p.y >= self.y_min && p.y <= self.y_max
    }

    /// Sample a uniformly distributed point inside the region, bounds
    /// inclusive.
    pub fn sample_point(&self, rng: &mut impl Rng) -> Point {
        Point {
            x: rng.gen_range(self.x_min..=self.x_max),
            y: rng.gen_range(self.y_min..=self.y_max),
        }
    }

    pub fn width(&self) -> u32 {
        self.x_min.abs_diff(self.x_max)
    }

    pub fn height(&self) -> u32 {
        self.y_min.abs_diff(self.y_max)
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {})-({}, {})",
            self.x_min, self.y_min, self.x_max, self.y_max
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_corners_normalize_in_any_order() {
        let a = Point::new(300, 50);
        let b = Point::new(100, 250);

        let region = Region::from_corners(a, b);
        let swapped = Region::from_corners(b, a);

        assert_eq!(region, swapped);
        assert_eq!(region.width(), 200);
        assert_eq!(region.height(), 200);
        assert!(region.contains(Point::new(100, 50)));
        assert!(region.contains(Point::new(300, 250)));
        assert!(!region.contains(Point::new(99, 50)));
        assert!(!region.contains(Point::new(100, 251)));
    }

    #[test]
    fn test_sampled_points_stay_inside() {
        let region = Region::from_corners(Point::new(-20, 10), Point::new(40, 90));
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..1000 {
            let p = region.sample_point(&mut rng);
            assert!(region.contains(p), "{p} escaped {region}");
        }
    }

    #[test]
    fn test_degenerate_region_yields_its_corner() {
        let corner = Point::new(640, 480);
        let region = Region::from_corners(corner, corner);
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..10 {
            assert_eq!(region.sample_point(&mut rng), corner);
        }
    }

    #[test]
    fn test_corner_spec_parsing() {
        let region = Region::from_corner_spec("10, 20, 110, 220").unwrap();
        assert_eq!(
            region,
            Region::from_corners(Point::new(10, 20), Point::new(110, 220))
        );

        // Corner order does not matter here either.
        let swapped = Region::from_corner_spec("110,220,10,20").unwrap();
        assert_eq!(region, swapped);

        let negative = Region::from_corner_spec("-1920,0,-100,500").unwrap();
        assert!(negative.contains(Point::new(-1000, 250)));

        assert!(Region::from_corner_spec("1,2,3").is_err());
        assert!(Region::from_corner_spec("1,2,3,4,5").is_err());
        assert!(Region::from_corner_spec("a,b,c,d").is_err());
        assert!(Region::from_corner_spec("").is_err());
    }
}
