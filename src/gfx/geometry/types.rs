//! # Geometry Value Types
//!
//! Small `Copy` value types shared by the generators, the composite objects
//! and the render streams. Copying a value always yields an independent
//! instance.

use std::ops::{Add, AddAssign, Mul, Sub};

use rand::Rng;

/// A point or direction in 3D space.
///
/// Normals use the same type. They are not unit length: generators scale them
/// freely and only the direction is meaningful once the shader normalizes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Point3 {
    pub const ZERO: Point3 = Point3::new(0.0, 0.0, 0.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }

    /// Right-handed cross product `self × other`.
    pub fn cross(self, other: Point3) -> Point3 {
        Point3::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    pub fn dot(self, other: Point3) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Component-wise comparison within `epsilon`.
    pub fn approx_eq(self, other: Point3, epsilon: f32) -> bool {
        (self.x - other.x).abs() <= epsilon
            && (self.y - other.y).abs() <= epsilon
            && (self.z - other.z).abs() <= epsilon
    }

    /// Flattens points into `[x0, y0, z0, x1, ...]` for vertex upload.
    pub fn flatten(points: &[Point3]) -> Vec<f32> {
        points.iter().flat_map(|p| p.to_array()).collect()
    }
}

impl From<[f32; 3]> for Point3 {
    fn from(v: [f32; 3]) -> Self {
        Point3::new(v[0], v[1], v[2])
    }
}

impl From<Point3> for [f32; 3] {
    fn from(p: Point3) -> Self {
        p.to_array()
    }
}

impl Add for Point3 {
    type Output = Point3;

    fn add(self, rhs: Point3) -> Point3 {
        Point3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Point3 {
    fn add_assign(&mut self, rhs: Point3) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
    }
}

impl Sub for Point3 {
    type Output = Point3;

    fn sub(self, rhs: Point3) -> Point3 {
        Point3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f32> for Point3 {
    type Output = Point3;

    fn mul(self, rhs: f32) -> Point3 {
        Point3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

/// RGBA color with components nominally in `[0, 1]` (not checked).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Builds an opaque color from 8-bit channels.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0)
    }

    /// Uniformly random RGB with alpha fixed at 1.
    pub fn random_opaque<R: Rng>(rng: &mut R) -> Self {
        Self::new(rng.random(), rng.random(), rng.random(), 1.0)
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Flattens colors into `[r0, g0, b0, a0, r1, ...]`.
    pub fn flatten(colors: &[Color]) -> Vec<f32> {
        colors.iter().flat_map(|c| c.to_array()).collect()
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copy_is_independent() {
        let original = Point3::new(1.0, 2.0, 3.0);
        let mut copy = original;
        copy.x = 10.0;
        assert_eq!(original.x, 1.0);
        assert_eq!(copy.x, 10.0);
    }

    #[test]
    fn test_cross_product_is_right_handed() {
        let x = Point3::new(1.0, 0.0, 0.0);
        let y = Point3::new(0.0, 1.0, 0.0);
        assert_eq!(x.cross(y), Point3::new(0.0, 0.0, 1.0));
        assert_eq!(y.cross(x), Point3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn test_flatten_keeps_order() {
        let points = [Point3::new(1.0, 2.0, 3.0), Point3::new(4.0, 5.0, 6.0)];
        assert_eq!(Point3::flatten(&points), vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);

        let colors = [Color::new(0.1, 0.2, 0.3, 0.4)];
        assert_eq!(Color::flatten(&colors), vec![0.1, 0.2, 0.3, 0.4]);
    }

    #[test]
    fn test_random_color_is_opaque_and_in_range() {
        let mut rng = rand::rng();
        for _ in 0..100 {
            let color = Color::random_opaque(&mut rng);
            assert_eq!(color.a, 1.0);
            for channel in [color.r, color.g, color.b] {
                assert!((0.0..1.0).contains(&channel));
            }
        }
    }
}
