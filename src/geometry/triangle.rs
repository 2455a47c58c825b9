//! Plan triangle tests used by wind sector selection

use super::{round_to, Vec2};

/// Area of the triangle `abc` from its side lengths (Heron's formula)
pub fn heron_area(a: &Vec2, b: &Vec2, c: &Vec2) -> f64 {
    let ab = (b - a).norm();
    let bc = (c - b).norm();
    let ca = (a - c).norm();
    let s = (ab + bc + ca) / 2.0;
    // Collinear points can round slightly negative
    let product = s * (s - ab) * (s - bc) * (s - ca);
    product.max(0.0).sqrt()
}

/// Equal-areas test: `p` lies in `abc` when the three sub-triangles it forms
/// add up to the whole, compared at `decimals` places
pub fn point_in_triangle(a: &Vec2, b: &Vec2, c: &Vec2, p: &Vec2, decimals: i32) -> bool {
    let whole = heron_area(a, b, c);
    let parts = heron_area(a, b, p) + heron_area(a, c, p) + heron_area(b, c, p);
    round_to(parts, decimals) == round_to(whole, decimals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_heron_area() {
        let area = heron_area(&Vec2::new(0.0, 0.0), &Vec2::new(4.0, 0.0), &Vec2::new(0.0, 3.0));
        assert_relative_eq!(area, 6.0, epsilon = 1e-12);
    }

    #[test]
    fn test_point_in_triangle() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(4.0, 0.0);
        let c = Vec2::new(0.0, 3.0);
        assert!(point_in_triangle(&a, &b, &c, &Vec2::new(1.0, 1.0), 5));
        assert!(point_in_triangle(&a, &b, &c, &a, 5));
        assert!(point_in_triangle(&a, &b, &c, &Vec2::new(2.0, 0.0), 5));
        assert!(!point_in_triangle(&a, &b, &c, &Vec2::new(3.0, 3.0), 5));
        assert!(!point_in_triangle(&a, &b, &c, &Vec2::new(-0.5, -0.5), 5));
    }
}
