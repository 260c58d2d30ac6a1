//! Monte Carlo sampling routines: disk/hemisphere/triangle warps used by
//! BSDFs and area lights, and the piecewise-constant 2D distribution used to
//! importance-sample environment maps.

use crate::{Point2f, Vec2f, Vec3f, Float, Point3f};
use std::f32;
use rand::Rng;

pub use crate::math::power_heuristic;

pub fn concentric_sample_disk(u: Point2f) -> Point2f {
    // map sample from [0, 1] to [-1, 1]
    let u_offset = 2.0 * u - Vec2f::new(1.0, 1.0);
    if u_offset == Point2f::new(0.0, 0.0) {
        return Point2f::new(0.0, 0.0);
    }

    let (theta, r) = if u_offset.x.abs() > u_offset.y.abs() {
        (f32::consts::FRAC_PI_4 * (u_offset.y / u_offset.x), u_offset.x)
    } else {
        (f32::consts::FRAC_PI_2 - f32::consts::FRAC_PI_4 * (u_offset.x / u_offset.y), u_offset.y)
    };

    r * Point2f::new(theta.cos(), theta.sin())
}

pub fn cosine_sample_hemisphere(u: Point2f) -> Vec3f {
    let d = concentric_sample_disk(u);
    let z = Float::sqrt(Float::max(0.0, 1.0 - d.x * d.x - d.y * d.y));
    Vec3f::new(d.x, d.y, z)
}

pub fn rejection_sample_shere(rng: &mut impl Rng, radius: Float) -> Point3f {
    let p = loop {
        let x = rng.gen_range(-radius, radius);
        let y = rng.gen_range(-radius, radius);
        let z = rng.gen_range(-radius, radius);
        let d = x * x + y * y + z * z;
        if d < radius * radius { break Point3f::new(x, y, z) }
    };
    p
}

/// Maps a uniform `[0,1)^2` sample to a direction uniformly distributed over
/// the unit sphere.
pub fn uniform_sample_sphere(u: Point2f) -> Vec3f {
    let z = 1.0 - 2.0 * u.x;
    let r = Float::sqrt(Float::max(0.0, 1.0 - z * z));
    let phi = 2.0 * f32::consts::PI * u.y;
    Vec3f::new(r * phi.cos(), r * phi.sin(), z)
}

/// Maps a uniform `[0,1)^2` sample to barycentric coordinates `(b0, b1)` for
/// a triangle (`b2 = 1 - b0 - b1`), uniformly distributed over its area.
pub fn uniform_sample_triangle(u: Point2f) -> [Float; 2] {
    let su0 = u.x.sqrt();
    [1.0 - su0, u.y * su0]
}

/// A piecewise-constant 1D probability distribution built from a discrete
/// function, supporting O(log n) continuous sampling via its CDF.
#[derive(Clone, Debug)]
pub struct Distribution1D {
    pub func: Vec<Float>,
    pub cdf: Vec<Float>,
    pub func_int: Float,
}

impl Distribution1D {
    pub fn new(func: &[Float]) -> Self {
        let n = func.len();
        let mut cdf = vec![0.0; n + 1];
        for i in 1..=n {
            cdf[i] = cdf[i - 1] + func[i - 1] / n as Float;
        }

        let func_int = cdf[n];
        if func_int == 0.0 {
            for i in 1..=n {
                cdf[i] = i as Float / n as Float;
            }
        } else {
            for i in 1..=n {
                cdf[i] /= func_int;
            }
        }

        Self { func: func.to_vec(), cdf, func_int }
    }

    pub fn count(&self) -> usize {
        self.func.len()
    }

    /// Returns `(sampled value in [0,1), pdf, offset into func)`.
    pub fn sample_continuous(&self, u: Float) -> (Float, Float, usize) {
        let offset = find_interval(&self.cdf, u);
        let mut du = u - self.cdf[offset];
        let denom = self.cdf[offset + 1] - self.cdf[offset];
        if denom > 0.0 {
            du /= denom;
        }

        let pdf = if self.func_int > 0.0 {
            self.func[offset] / self.func_int
        } else {
            0.0
        };

        let x = (offset as Float + du) / self.count() as Float;
        (x, pdf, offset)
    }

    pub fn pdf_at(&self, offset: usize) -> Float {
        if self.func_int > 0.0 {
            self.func[offset] / self.func_int
        } else {
            0.0
        }
    }
}

fn find_interval(cdf: &[Float], u: Float) -> usize {
    let mut first = 0usize;
    let mut len = cdf.len();
    while len > 0 {
        let half = len / 2;
        let middle = first + half;
        if cdf[middle] <= u {
            first = middle + 1;
            len -= half + 1;
        } else {
            len = half;
        }
    }
    first.saturating_sub(1).min(cdf.len().saturating_sub(2))
}

/// Piecewise-constant importance distribution over a 2D function sampled on
/// a `width x height` grid (row-major, as for a lat-long environment map):
/// one marginal distribution over rows and one conditional distribution per
/// row, matching pbrt's `Distribution2D`.
#[derive(Clone, Debug)]
pub struct Distribution2D {
    p_conditional_v: Vec<Distribution1D>,
    p_marginal: Distribution1D,
}

impl Distribution2D {
    pub fn new(func: &[Float], width: usize, height: usize) -> Self {
        assert_eq!(func.len(), width * height);
        let p_conditional_v: Vec<Distribution1D> = (0..height)
            .map(|v| Distribution1D::new(&func[v * width..(v + 1) * width]))
            .collect();

        let marginal_func: Vec<Float> = p_conditional_v.iter().map(|d| d.func_int).collect();
        let p_marginal = Distribution1D::new(&marginal_func);

        Self { p_conditional_v, p_marginal }
    }

    /// Returns `(sampled point in [0,1)^2, combined pdf)`.
    pub fn sample_continuous(&self, u: Point2f) -> (Point2f, Float) {
        let (d1, pdf1, v) = self.p_marginal.sample_continuous(u.y);
        let (d0, pdf0, _) = self.p_conditional_v[v].sample_continuous(u.x);
        (Point2f::new(d0, d1), pdf0 * pdf1)
    }

    pub fn pdf(&self, p: Point2f) -> Float {
        let width = self.p_conditional_v[0].count();
        let height = self.p_conditional_v.len();
        let iu = ((p.x * width as Float) as usize).min(width - 1);
        let iv = ((p.y * height as Float) as usize).min(height - 1);
        if self.p_marginal.func_int == 0.0 {
            0.0
        } else {
            self.p_conditional_v[iv].func[iu] / self.p_marginal.func_int
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_distribution1d_uniform() {
        let func = vec![1.0; 4];
        let dist = Distribution1D::new(&func);
        let (x, pdf, _) = dist.sample_continuous(0.5);
        assert!((x - 0.5).abs() < 1e-5);
        assert!((pdf - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_distribution2d_sample_in_bounds() {
        let func = vec![1.0, 2.0, 3.0, 4.0, 1.0, 1.0, 1.0, 1.0];
        let dist = Distribution2D::new(&func, 4, 2);
        let (p, pdf) = dist.sample_continuous(Point2f::new(0.3, 0.7));
        assert!(p.x >= 0.0 && p.x <= 1.0);
        assert!(p.y >= 0.0 && p.y <= 1.0);
        assert!(pdf >= 0.0);
    }
}
