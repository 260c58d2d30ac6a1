use crate::{Float, Point3f, Vec3f};
use cgmath::{InnerSpace, Vector3};
use std::ops::{Add, Deref, Mul, Neg, Sub};

pub mod bounds;
pub mod transform;

pub use transform::Transform;

/// A ray `o + t*d` restricted to the parametric interval `[t_min, t_max)`.
///
/// `t_min` is almost always `0.0`; self-intersection avoidance is handled by
/// offsetting the origin (see [`crate::offset_ray_origin`]) rather than by
/// raising `t_min`, but keeping the field lets callers express an explicit
/// exclusion interval directly when they have one (e.g. shadow rays).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Point3f,
    pub dir: Vec3f,
    pub t_min: Float,
    pub t_max: Float,
    pub time: Float,
}

impl Ray {
    /// Convenience constructor for the common case: starts at `t_min = 0`,
    /// unbounded `t_max`, `time = 0`.
    pub fn new(origin: Point3f, dir: Vec3f) -> Self {
        Self { origin, dir, t_min: 0.0, t_max: crate::math::INFINITY, time: 0.0 }
    }

    pub fn with_t_max(origin: Point3f, dir: Vec3f, t_max: Float) -> Self {
        Self { origin, dir, t_min: 0.0, t_max, time: 0.0 }
    }

    pub fn at(&self, t: Float) -> Point3f {
        self.origin + self.dir * t
    }
}

/// The information needed to estimate how a camera ray's neighboring rays
/// (one pixel over in x and y) diverge, used to size texture filtering
/// footprints.
#[derive(Clone, Copy, Debug)]
pub struct Differential {
    pub rx_origin: Point3f,
    pub ry_origin: Point3f,
    pub rx_dir: Vec3f,
    pub ry_dir: Vec3f,
}

#[derive(Clone, Copy, Debug)]
pub struct RayDifferential {
    pub ray: Ray,
    pub diff: Option<Differential>,
}

impl RayDifferential {
    pub fn new(ray: Ray) -> Self {
        Self { ray, diff: None }
    }

    pub fn scale_differentials(&mut self, s: Float) {
        if let Some(diff) = &mut self.diff {
            diff.rx_origin = self.ray.origin + (diff.rx_origin - self.ray.origin) * s;
            diff.ry_origin = self.ray.origin + (diff.ry_origin - self.ray.origin) * s;
            diff.rx_dir = self.ray.dir + (diff.rx_dir - self.ray.dir) * s;
            diff.ry_dir = self.ray.dir + (diff.ry_dir - self.ray.dir) * s;
        }
    }
}

impl Deref for RayDifferential {
    type Target = Ray;
    fn deref(&self) -> &Ray {
        &self.ray
    }
}

/// A surface normal: a vector that transforms by the inverse transpose, kept
/// as a distinct type from `Vec3f` so the two can't be mixed up accidentally
/// (a normal transformed as if it were a regular vector becomes wrong under
/// non-uniform scale).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Normal3(pub Vec3f);

impl Normal3 {
    pub fn new(x: Float, y: Float, z: Float) -> Self {
        Normal3(Vec3f::new(x, y, z))
    }

    pub fn zero() -> Self {
        Normal3(Vec3f::new(0.0, 0.0, 0.0))
    }

    pub fn dot(&self, v: Vec3f) -> Float {
        self.0.dot(v)
    }

    pub fn normalize(self) -> Self {
        Normal3(self.0.normalize())
    }

    pub fn faceforward(&self, v: Vec3f) -> Vec3f {
        if self.0.dot(v) < 0.0 {
            -self.0
        } else {
            self.0
        }
    }
}

impl Deref for Normal3 {
    type Target = Vec3f;
    fn deref(&self) -> &Vec3f {
        &self.0
    }
}

impl From<Vec3f> for Normal3 {
    fn from(v: Vec3f) -> Self {
        Normal3(v)
    }
}

impl From<Normal3> for Vec3f {
    fn from(n: Normal3) -> Self {
        n.0
    }
}

impl Add for Normal3 {
    type Output = Normal3;
    fn add(self, rhs: Normal3) -> Normal3 {
        Normal3(self.0 + rhs.0)
    }
}

impl Sub for Normal3 {
    type Output = Normal3;
    fn sub(self, rhs: Normal3) -> Normal3 {
        Normal3(self.0 - rhs.0)
    }
}

impl Neg for Normal3 {
    type Output = Normal3;
    fn neg(self) -> Normal3 {
        Normal3(-self.0)
    }
}

impl Mul<Float> for Normal3 {
    type Output = Normal3;
    fn mul(self, rhs: Float) -> Normal3 {
        Normal3(self.0 * rhs)
    }
}

impl Mul<Normal3> for Float {
    type Output = Normal3;
    fn mul(self, rhs: Normal3) -> Normal3 {
        Normal3(rhs.0 * self)
    }
}

impl Mul<Vector3<Float>> for Normal3 {
    type Output = Float;
    fn mul(self, rhs: Vector3<Float>) -> Float {
        self.0.dot(rhs)
    }
}
