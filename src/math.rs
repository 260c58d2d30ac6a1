//! Scalar utilities, coordinate-frame helpers and Monte Carlo weighting functions
//! shared across the geometry, reflection and light transport modules.

use crate::{Float, Vec3f, Point2f, Vec2f};
use cgmath::{BaseFloat, InnerSpace, Point2, Point3, Vector2, Vector3};
use num::Bounded;

pub mod consts {
    use crate::Float;

    pub const PI: Float = std::f32::consts::PI;
    pub const FRAC_PI_2: Float = std::f32::consts::FRAC_PI_2;
    pub const FRAC_PI_4: Float = std::f32::consts::FRAC_PI_4;
    pub const FRAC_1_PI: Float = std::f32::consts::FRAC_1_PI;
    pub const INV_2_PI: Float = 1.0 / (2.0 * PI);
    pub const INV_4_PI: Float = 1.0 / (4.0 * PI);

    /// Fraction by which a shadow ray's `t_max` is shortened so it doesn't
    /// re-intersect the surface it's aimed at.
    pub const SHADOW_EPSILON: Float = 0.0001;
}

pub const INFINITY: Float = std::f32::INFINITY;

/// Squares its argument. Used throughout the optics code where `x * x` would
/// otherwise be repeated with a more complex sub-expression.
#[macro_export]
macro_rules! sq {
    ($x:expr) => {{
        let x = $x;
        x * x
    }};
}

/// Blanket bound for the scalar types used in bounds/vector math: anything
/// `cgmath`-numeric plus orderable and boundable.
pub trait Scalar: BaseFloat + Bounded + PartialOrd + Copy {}
impl<T: BaseFloat + Bounded + PartialOrd + Copy> Scalar for T {}

pub trait Lerp {
    fn lerp(self, a: Self, b: Self) -> Self;
}

impl Lerp for Float {
    fn lerp(self, a: Self, b: Self) -> Self {
        (1.0 - self) * a + self * b
    }
}

pub fn lerp(t: Float, a: Float, b: Float) -> Float {
    (1.0 - t) * a + t * b
}

/// Componentwise min/max used for `Point`/`Vector` reductions that cgmath
/// doesn't provide directly.
pub trait ComponentWiseExt: Sized {
    fn min(self, other: Self) -> Self;
    fn max(self, other: Self) -> Self;
}

impl ComponentWiseExt for Point3<Float> {
    fn min(self, other: Self) -> Self {
        Point3::new(self.x.min(other.x), self.y.min(other.y), self.z.min(other.z))
    }
    fn max(self, other: Self) -> Self {
        Point3::new(self.x.max(other.x), self.y.max(other.y), self.z.max(other.z))
    }
}

impl ComponentWiseExt for Point2<i32> {
    fn min(self, other: Self) -> Self {
        Point2::new(self.x.min(other.x), self.y.min(other.y))
    }
    fn max(self, other: Self) -> Self {
        Point2::new(self.x.max(other.x), self.y.max(other.y))
    }
}

impl ComponentWiseExt for Vector3<Float> {
    fn min(self, other: Self) -> Self {
        Vector3::new(self.x.min(other.x), self.y.min(other.y), self.z.min(other.z))
    }
    fn max(self, other: Self) -> Self {
        Vector3::new(self.x.max(other.x), self.y.max(other.y), self.z.max(other.z))
    }
}

/// Index (0, 1 or 2) of the largest-magnitude component, used to pick the
/// shear-transform axis in the watertight triangle intersection test and to
/// choose BVH split axes.
pub fn max_dimension(v: Vector3<Float>) -> usize {
    if v.x > v.y && v.x > v.z {
        0
    } else if v.y > v.z {
        1
    } else {
        2
    }
}

pub fn permute_vec(v: Vector3<Float>, x: usize, y: usize, z: usize) -> Vector3<Float> {
    Vector3::new(v[x], v[y], v[z])
}

pub fn permute_point(p: Point3<Float>, x: usize, y: usize, z: usize) -> Point3<Float> {
    Point3::new(p[x], p[y], p[z])
}

/// Builds an orthonormal basis `(v2, v3)` around a given unit vector `v1`,
/// using Duff et al.'s branchless construction.
pub fn coordinate_system(v1: Vec3f) -> (Vec3f, Vec3f) {
    let sign = if v1.z >= 0.0 { 1.0 } else { -1.0 };
    let a = -1.0 / (sign + v1.z);
    let b = v1.x * v1.y * a;
    let v2 = Vec3f::new(1.0 + sign * v1.x * v1.x * a, sign * b, -sign * v1.x);
    let v3 = Vec3f::new(b, sign + v1.y * v1.y * a, -v1.y);
    (v2, v3)
}

/// Flips `v` so that it lies in the same hemisphere as `n`.
pub fn faceforward(v: Vec3f, n: Vec3f) -> Vec3f {
    if v.dot(n) < 0.0 {
        -v
    } else {
        v
    }
}

pub fn abs_dot(a: Vec3f, b: Vec3f) -> Float {
    a.dot(b).abs()
}

/// Solves the 2x2 linear system `[a00 a01; a10 a11] * [x0; x1] = [b0; b1]`,
/// used to find texture-space partial derivatives from a set of world-space
/// ray differentials.
pub fn solve_linear_system_2x2(a: [[Float; 2]; 2], b: [Float; 2]) -> Option<(Float, Float)> {
    let det = a[0][0] * a[1][1] - a[0][1] * a[1][0];
    if det.abs() < 1e-10 {
        return None;
    }
    let x0 = (a[1][1] * b[0] - a[0][1] * b[1]) / det;
    let x1 = (a[0][0] * b[1] - a[1][0] * b[0]) / det;
    if x0.is_nan() || x1.is_nan() {
        return None;
    }
    Some((x0, x1))
}

/// Nudges a ray origin along the geometric normal by an amount proportional to
/// the intersection's accumulated floating point error, avoiding spurious
/// self-intersection on the next ray cast from this point.
pub fn offset_ray_origin(p: Point3<Float>, p_err: Vec3f, n: Vec3f, w: Vec3f) -> Point3<Float> {
    let d = abs_dot(n, p_err);
    let mut offset = n * d;
    if w.dot(n) < 0.0 {
        offset = -offset;
    }
    let mut po = p + offset;
    for i in 0..3 {
        if offset[i] > 0.0 {
            po[i] = crate::err_float::next_float_up(po[i]);
        } else if offset[i] < 0.0 {
            po[i] = crate::err_float::next_float_down(po[i]);
        }
    }
    po
}

pub fn spherical_theta(v: Vec3f) -> Float {
    v.z.max(-1.0).min(1.0).acos()
}

pub fn spherical_phi(v: Vec3f) -> Float {
    let p = v.y.atan2(v.x);
    if p < 0.0 {
        p + 2.0 * consts::PI
    } else {
        p
    }
}

/// Converts spherical coordinates (given by `sin_theta`/`cos_theta`/`phi`) back
/// into a cartesian direction in the local shading frame, the inverse of
/// [`spherical_theta`]/[`spherical_phi`].
pub fn spherical_direction(sin_theta: Float, cos_theta: Float, phi: Float) -> Vec3f {
    Vec3f::new(sin_theta * phi.cos(), sin_theta * phi.sin(), cos_theta)
}

/// Same as [`spherical_direction`] but expressed in an arbitrary basis `(x, y, z)`
/// rather than the canonical local frame.
pub fn spherical_direction_basis(
    sin_theta: Float,
    cos_theta: Float,
    phi: Float,
    x: Vec3f,
    y: Vec3f,
    z: Vec3f,
) -> Vec3f {
    x * (sin_theta * phi.cos()) + y * (sin_theta * phi.sin()) + z * cos_theta
}

/// The power heuristic used for multiple importance sampling, weighting a
/// sample drawn from a distribution with pdf `f_pdf` against `g_pdf` samples
/// of a competing strategy.
pub fn power_heuristic(nf: i32, f_pdf: Float, ng: i32, g_pdf: Float) -> Float {
    let f = nf as Float * f_pdf;
    let g = ng as Float * g_pdf;
    if f == 0.0 && g == 0.0 {
        return 0.0;
    }
    (f * f) / (f * f + g * g)
}

pub fn clamp<T: PartialOrd>(v: T, lo: T, hi: T) -> T {
    if v < lo {
        lo
    } else if v > hi {
        hi
    } else {
        v
    }
}

pub fn quadratic(a: Float, b: Float, c: Float) -> Option<(Float, Float)> {
    let discrim = (b as f64) * (b as f64) - 4.0 * (a as f64) * (c as f64);
    if discrim < 0.0 {
        return None;
    }
    let root_discrim = discrim.sqrt();
    let q = if b < 0.0 {
        -0.5 * (b as f64 - root_discrim)
    } else {
        -0.5 * (b as f64 + root_discrim)
    };
    let mut t0 = (q / a as f64) as Float;
    let mut t1 = (c as f64 / q) as Float;
    if t0 > t1 {
        std::mem::swap(&mut t0, &mut t1);
    }
    Some((t0, t1))
}

