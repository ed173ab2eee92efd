use rand::Rng;
use rand_distr::{Distribution, Normal, NormalError};
use shpb_common::Real;

/// Additive noise applied sample by sample to a simulated channel.
#[derive(Debug, Clone)]
pub enum Noise {
    Quiet,
    Uniform {
        max: Real,
    },
    /// Low-pass-ish dither: a uniform kick blended into the previous
    /// deviation, so consecutive samples stay correlated.
    SmoothUniform {
        max: Real,
        factor: Real,
        prev: Real,
    },
    Gaussian {
        normal: Normal<Real>,
    },
}

impl Noise {
    pub fn smooth_uniform(max: Real, factor: Real) -> Self {
        Self::SmoothUniform {
            max,
            factor,
            prev: Real::default(),
        }
    }

    pub fn gaussian(sd: Real) -> Result<Self, NormalError> {
        Ok(Self::Gaussian {
            normal: Normal::new(0.0, sd)?,
        })
    }

    pub fn noisify<R: Rng>(&mut self, value: Real, rng: &mut R) -> Real {
        match self {
            Self::Quiet => value,
            Self::Uniform { max } => value + *max * (2.0 * rng.random::<Real>() - 1.0),
            Self::SmoothUniform { max, factor, prev } => {
                *prev = *prev * (1.0 - *factor) + (2.0 * rng.random::<Real>() - 1.0) * *factor;
                value + *max * *prev
            }
            Self::Gaussian { normal } => value + normal.sample(rng),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn quiet_noise_is_the_identity() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(Noise::Quiet.noisify(0.25, &mut rng), 0.25);
    }

    #[test]
    fn uniform_noise_is_bounded() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut noise = Noise::Uniform { max: 0.1 };
        for _ in 0..1000 {
            let sample = noise.noisify(1.0, &mut rng);
            assert!((sample - 1.0).abs() <= 0.1);
        }
    }

    #[test]
    fn smooth_uniform_deviations_stay_correlated() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut noise = Noise::smooth_uniform(1.0, 0.1);
        let samples: Vec<Real> = (0..500).map(|_| noise.noisify(0.0, &mut rng)).collect();
        let max_jump = samples
            .windows(2)
            .map(|pair| (pair[1] - pair[0]).abs())
            .fold(0.0_f64, Real::max);
        // Each step blends at most a 0.1-weighted kick of unit magnitude.
        assert!(max_jump <= 0.2 + 1e-12);
    }

    #[test]
    fn invalid_gaussian_spread_is_rejected() {
        assert!(Noise::gaussian(-1.0).is_err());
    }
}
