//! Top-level render configuration and entry point. Tile scheduling, the
//! `rayon` thread pool, and per-tile arenas are all owned by
//! [`crate::integrator::SamplerIntegrator`]; this module validates
//! configuration up front and gives a single fallible entry point, plus the
//! per-thread scratch (`RenderContext`) described by the render driver.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use bumpalo::Bump;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256Plus;

use crate::Float;
use crate::error::RenderError;
use crate::film::Film;
use crate::filter::BoxFilter;
use crate::integrator::{IntegratorRadiance, SamplerIntegrator};
use crate::mailbox::Mailbox;
use crate::sampler::Sampler;
use crate::scene::Scene;

#[derive(Clone, Copy, Debug)]
pub struct RenderParams {
    pub num_bsdf_samples: usize,
    pub max_bsdf_samples: usize,
    pub num_light_samples: usize,
    pub max_light_samples: usize,
    pub min_trace: Float,
    pub envlight_intens_frac: Float,
    pub max_depth: u16,
}

impl Default for RenderParams {
    fn default() -> Self {
        Self {
            num_bsdf_samples: 16,
            max_bsdf_samples: 64,
            num_light_samples: 16,
            max_light_samples: 64,
            min_trace: 1.0e-3,
            envlight_intens_frac: 0.5,
            max_depth: 5,
        }
    }
}

impl RenderParams {
    pub fn validate(self) -> Result<Self, RenderError> {
        if self.max_depth == 0 {
            return Err(RenderError::Configuration("max_depth must be greater than 0".into()));
        }
        if !(0.0..=1.0).contains(&self.envlight_intens_frac) {
            return Err(RenderError::Configuration("envlight_intens_frac must be in [0, 1]".into()));
        }
        if self.num_bsdf_samples > self.max_bsdf_samples {
            return Err(RenderError::Configuration("num_bsdf_samples exceeds max_bsdf_samples".into()));
        }
        if self.num_light_samples > self.max_light_samples {
            return Err(RenderError::Configuration("num_light_samples exceeds max_light_samples".into()));
        }
        Ok(self)
    }
}

/// Per-thread scratch for one render worker: an arena for per-path
/// allocations (BSDFs, IsecInfo), an intersection mailbox, and an RNG
/// stream seeded deterministically from `(tile_id, pixel_id)` so repeated
/// runs with the same seed, tiling and thread count are reproducible.
pub struct RenderContext {
    pub arena: Bump,
    pub mailbox: Mailbox,
    pub rng: Xoshiro256Plus,
    pub params: RenderParams,
}

impl RenderContext {
    pub fn new(params: RenderParams, tile_id: u64, pixel_id: u64) -> Self {
        let seed = tile_id.wrapping_mul(0x9E3779B97F4A7C15).wrapping_add(pixel_id);
        Self {
            arena: Bump::new(),
            mailbox: Mailbox::new(),
            rng: Xoshiro256Plus::seed_from_u64(seed),
            params,
        }
    }

    /// All per-path allocations die here, and the mailbox is cleared before
    /// the next top-level sample's intersection queries.
    pub fn reset_for_next_sample(&mut self) {
        self.arena.reset();
        self.mailbox.clear();
    }
}

/// Cooperative cancellation flag, polled once per tile boundary; cloning
/// shares the same underlying flag across worker threads.
#[derive(Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(false)))
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Validates `params`, then drives `integrator` over `scene`, writing into
/// `film` via a `rayon`-parallel tile walk. Scene-build problems
/// (degenerate primitives, unresolved materials) are expected to have been
/// caught already while constructing `scene`; this is the boundary where
/// configuration problems are reported as a single error before any work
/// starts.
pub fn render<R: IntegratorRadiance>(
    integrator: &mut SamplerIntegrator<R>,
    scene: &Scene,
    film: &Film<BoxFilter>,
    sampler: impl Sampler,
    params: RenderParams,
) -> anyhow::Result<()> {
    integrator.params = params.validate()?;
    integrator.render_parallel(scene, film, sampler);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_params_validate() {
        assert!(RenderParams::default().validate().is_ok());
    }

    #[test]
    fn zero_max_depth_is_rejected() {
        let params = RenderParams { max_depth: 0, ..RenderParams::default() };
        assert!(params.validate().is_err());
    }

    #[test]
    fn out_of_range_env_frac_is_rejected() {
        let params = RenderParams { envlight_intens_frac: 1.5, ..RenderParams::default() };
        assert!(params.validate().is_err());
    }
}
