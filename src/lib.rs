//! A physically-based, spectrally-agnostic light transport engine: ray/primitive
//! intersection, BSDF evaluation and sampling, multiple-importance-sampled direct
//! lighting, and whole-path integrators (Whitted, direct-lighting-only, unidirectional
//! path tracing), driven by a tile-parallel renderer.
//!
//! This crate is organized the way a pbrt-style renderer usually is: small geometric
//! primitives (`geometry`, `math`, `err_float`) at the bottom, shapes and the BVH built
//! on top of them, then materials/textures/lights, then the integrators and camera that
//! tie everything together, and finally the `render` module and `RenderContext`/`RenderParams`
//! that drive a whole image.

#[macro_use]
pub mod macros;
#[macro_use]
pub mod math;

pub mod err_float;
pub mod geometry;
pub mod interaction;
pub mod sampling;
pub mod spectrum;

pub mod shapes;
pub mod primitive;
pub mod mailbox;
pub mod bvh;

pub mod texture;
pub mod reflection;
pub mod fresnel;
pub mod material;
pub mod medium;
pub mod light;

pub mod camera;
pub mod film;
pub mod filter;
pub mod mipmap;

pub mod sampler;
pub mod scene;
pub mod integrator;
pub mod id_arena;

pub mod render;
pub mod error;

pub mod fast_rand;

pub use crate::math::{consts, Scalar, Lerp, lerp, ComponentWiseExt, INFINITY};
pub use crate::math::{
    faceforward, abs_dot, offset_ray_origin, solve_linear_system_2x2,
    spherical_theta, spherical_phi, spherical_direction, spherical_direction_basis,
    coordinate_system, max_dimension, permute_vec, permute_point,
};
pub use crate::geometry::{Ray, RayDifferential, Differential, Normal3, Transform};
pub use crate::geometry::transform::Transformable;
pub use crate::geometry::bounds::{Bounds2f, Bounds2i, Bounds3f};
pub use crate::interaction::SurfaceInteraction;
pub use crate::error::RenderError;
pub use crate::render::{RenderParams, RenderContext};

/// Scalar type used throughout the crate for coordinates, radiometric
/// quantities and parametric distances. A single type alias so that a future
/// switch to `f64` only touches this line.
pub type Float = f32;

pub type Vec2f = cgmath::Vector2<Float>;
pub type Vec3f = cgmath::Vector3<Float>;
pub type Point2f = cgmath::Point2<Float>;
pub type Point3f = cgmath::Point3<Float>;

pub type Vec2i = cgmath::Vector2<i32>;
pub type Point2i = cgmath::Point2<i32>;
