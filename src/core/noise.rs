//! Smooth noise used to pick lateral path offsets

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Deterministic smooth scalar field
pub trait NoiseField {
    /// Sample at `t`; result lies in [0, 1]. Identical inputs give identical output.
    fn sample(&self, t: f64) -> f64;
}

const LATTICE_SIZE: usize = 4096;
const OCTAVES: usize = 4;
const FALLOFF: f64 = 0.5;

/// Octave value noise over a seeded random lattice, cosine-interpolated.
///
/// Successive octaves double in frequency and halve in amplitude; the sum
/// is normalised so the output stays within [0, 1].
#[derive(Clone, Debug)]
pub struct ValueNoise {
    lattice: Vec<f64>,
}

impl ValueNoise {
    pub fn new(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let lattice = (0..LATTICE_SIZE).map(|_| rng.gen::<f64>()).collect();
        Self { lattice }
    }

    #[inline]
    fn lattice_at(&self, i: i64) -> f64 {
        self.lattice[i.rem_euclid(LATTICE_SIZE as i64) as usize]
    }

    fn octave(&self, t: f64) -> f64 {
        let floor = t.floor();
        let frac = t - floor;
        let i = floor as i64;
        // Cosine ease gives a continuous first derivative at lattice points
        let w = 0.5 * (1.0 - (frac * std::f64::consts::PI).cos());
        let a = self.lattice_at(i);
        let b = self.lattice_at(i + 1);
        a + (b - a) * w
    }
}

impl NoiseField for ValueNoise {
    fn sample(&self, t: f64) -> f64 {
        let mut sum = 0.0;
        let mut norm = 0.0;
        let mut amplitude = FALLOFF;
        let mut frequency = 1.0;
        for _ in 0..OCTAVES {
            sum += self.octave(t * frequency) * amplitude;
            norm += amplitude;
            amplitude *= FALLOFF;
            frequency *= 2.0;
        }
        (sum / norm).clamp(0.0, 1.0)
    }
}

/// Linear interpolation between `a` and `b`
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Map `value` from [in_lo, in_hi] onto [out_lo, out_hi]
#[inline]
pub fn map_range(value: f64, in_lo: f64, in_hi: f64, out_lo: f64, out_hi: f64) -> f64 {
    out_lo + (value - in_lo) / (in_hi - in_lo) * (out_hi - out_lo)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_samples_stay_in_unit_range() {
        let noise = ValueNoise::new(42);
        for i in -500..500 {
            let v = noise.sample(i as f64 * 0.37);
            assert!((0.0..=1.0).contains(&v), "sample {} out of range: {}", i, v);
        }
    }

    #[test]
    fn test_same_seed_same_field() {
        let a = ValueNoise::new(9);
        let b = ValueNoise::new(9);
        for i in 0..100 {
            let t = i as f64 * 1.13;
            assert_eq!(a.sample(t).to_bits(), b.sample(t).to_bits());
        }
    }

    #[test]
    fn test_field_is_smooth() {
        let noise = ValueNoise::new(3);
        let mut prev = noise.sample(0.0);
        for i in 1..1000 {
            let v = noise.sample(i as f64 * 0.001);
            assert!((v - prev).abs() < 0.05, "jump at {}: {} -> {}", i, prev, v);
            prev = v;
        }
    }

    #[test]
    fn test_zero_coordinate_is_constant() {
        // noise_scale = 0 samples the same point every time
        let noise = ValueNoise::new(11);
        let first = noise.sample(0.0);
        assert_eq!(noise.sample(0.0 * 12345.0), first);
    }

    #[test]
    fn test_lerp_and_map_range() {
        assert_eq!(lerp(0.0, 10.0, 0.5), 5.0);
        assert_eq!(lerp(4.0, 4.0, 0.9), 4.0);
        assert_eq!(map_range(0.5, 0.0, 1.0, -2000.0, 2000.0), 0.0);
        assert_eq!(map_range(1.0, 0.0, 1.0, -1000.0, 1000.0), 1000.0);
    }
}
