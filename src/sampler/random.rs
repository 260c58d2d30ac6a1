use crate::{Point2i, Point2f, Float};
use rand_xoshiro::Xoshiro256Plus;
use rand::{SeedableRng, Rng};
use crate::sampler::{Sampler, SamplerState};

/// Samples every dimension with an independent uniform random draw; no
/// stratification, low-discrepancy sequence, or pixel-correlated pattern.
/// Requested sample arrays (`request_1d_array`/`request_2d_array`) are
/// refilled with fresh values whenever a new pixel starts.
pub struct RandomSampler {
    state: SamplerState,
    rng: Xoshiro256Plus,
}

impl RandomSampler {
    pub fn new_with_seed(samples_per_pixel: usize, seed: u64) -> Self {
        Self {
            state: SamplerState::new(samples_per_pixel),
            rng: Xoshiro256Plus::seed_from_u64(seed),
        }
    }
}

impl Sampler for RandomSampler {
    fn start_pixel(&mut self, pixel: Point2i) {
        self.state.start_pixel(pixel);
        self.state.fill_arrays(&mut self.rng);
    }

    fn start_next_sample(&mut self) -> bool {
        self.state.start_next_sample()
    }

    fn get_1d(&mut self) -> Float {
        self.rng.gen()
    }

    fn get_2d(&mut self) -> Point2f {
        Point2f::new(self.rng.gen(), self.rng.gen())
    }

    fn request_1d_array(&mut self, len: usize) {
        self.state.request_1d_array(len);
    }

    fn request_2d_array(&mut self, len: usize) {
        self.state.request_2d_array(len);
    }

    fn get_1d_array(&mut self, len: usize) -> &[Float] {
        self.state.get_1d_array(len)
    }

    fn get_2d_array(&mut self, len: usize) -> &[Point2f] {
        self.state.get_2d_array(len)
    }

    fn clone_with_seed(&self, seed: u64) -> Box<dyn Sampler> {
        Box::new(Self::new_with_seed(self.state.samples_per_pixel(), seed))
    }

    fn samples_per_pixel(&self) -> usize {
        self.state.samples_per_pixel()
    }

    fn set_sample_number(&mut self, sample_num: u64) -> bool {
        self.state.set_sample_number(sample_num)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn samples_land_in_unit_square() {
        let mut sampler = RandomSampler::new_with_seed(4, 0);
        sampler.start_pixel(Point2i::new(0, 0));
        for _ in 0..4 {
            let p = sampler.get_2d();
            assert!((0.0..1.0).contains(&p.x));
            assert!((0.0..1.0).contains(&p.y));
            sampler.start_next_sample();
        }
    }

    #[test]
    fn requested_array_has_correct_length() {
        let mut sampler = RandomSampler::new_with_seed(4, 1);
        sampler.request_2d_array(8);
        sampler.start_pixel(Point2i::new(0, 0));
        assert_eq!(sampler.get_2d_array(8).len(), 8);
    }
}
