//! Bounded random perturbation of telemetry values.
//!
//! Every function takes the random source explicitly. The engine passes its
//! own seeded `SmallRng`; tests pass a fixed-seed generator.

use rand::Rng;

/// Draw `u` uniformly from `[-1, 1]`.
#[inline]
fn unit<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.gen_range(-1.0..=1.0)
}

/// Clamp into `[lower, upper]`. NaN lands on `lower`.
#[inline]
fn clamp_into(value: f64, lower: f64, upper: f64) -> f64 {
    if value.is_nan() || value < lower {
        lower
    } else if value > upper {
        upper
    } else {
        value
    }
}

/// `value + u·amount`, `u ∈ [-1, 1]`. Unbounded.
pub fn jitter<R: Rng + ?Sized>(rng: &mut R, value: f64, amount: f64) -> f64 {
    value + unit(rng) * amount
}

/// `value − u·amount`, `u ∈ [-1, 1]`. Used for quantities that drain.
pub fn jitter_down<R: Rng + ?Sized>(rng: &mut R, value: f64, amount: f64) -> f64 {
    value - unit(rng) * amount
}

/// [`jitter`] clamped into `[lower, upper]`.
pub fn bounded_jitter<R: Rng + ?Sized>(
    rng: &mut R,
    value: f64,
    lower: f64,
    upper: f64,
    amount: f64,
) -> f64 {
    clamp_into(jitter(rng, value, amount), lower, upper)
}

/// [`jitter_down`] clamped into `[lower, upper]`.
pub fn bounded_jitter_down<R: Rng + ?Sized>(
    rng: &mut R,
    value: f64,
    lower: f64,
    upper: f64,
    amount: f64,
) -> f64 {
    clamp_into(jitter_down(rng, value, amount), lower, upper)
}

/// Snap `current` back to `baseline` once it has drifted more than `delta`.
///
/// A drift of exactly `delta` is kept.
#[inline]
pub fn reset_value(current: f64, baseline: f64, delta: f64) -> f64 {
    if (current - baseline).abs() > delta {
        baseline
    } else {
        current
    }
}

/// Uniform draw in `[a, b]` rounded to `precision` decimal digits.
///
/// Bounds given in reverse order are swapped.
pub fn generate_random<R: Rng + ?Sized>(rng: &mut R, a: f64, b: f64, precision: u32) -> f64 {
    let (low, high) = if a <= b { (a, b) } else { (b, a) };
    let value = if low < high {
        rng.gen_range(low..=high)
    } else {
        low
    };
    let scale = 10f64.powi(precision as i32);
    (value * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(0x5eed)
    }

    #[test]
    fn jitter_stays_within_amount() {
        let mut rng = rng();
        for _ in 0..1000 {
            let v = jitter(&mut rng, 10.0, 0.5);
            assert!((9.5..=10.5).contains(&v), "{v}");
            let d = jitter_down(&mut rng, 10.0, 0.5);
            assert!((9.5..=10.5).contains(&d), "{d}");
        }
    }

    #[test]
    fn jitter_is_deterministic_for_a_seed() {
        let a: Vec<f64> = {
            let mut rng = rng();
            (0..8).map(|_| jitter(&mut rng, 1.0, 1.0)).collect()
        };
        let b: Vec<f64> = {
            let mut rng = rng();
            (0..8).map(|_| jitter(&mut rng, 1.0, 1.0)).collect()
        };
        assert_eq!(a, b);
    }

    #[test]
    fn bounded_jitter_clamps_far_outside_values() {
        let mut rng = rng();
        assert_eq!(bounded_jitter(&mut rng, 1.0e9, 0.0, 10.0, 1.0), 10.0);
        assert_eq!(bounded_jitter(&mut rng, -1.0e9, 0.0, 10.0, 1.0), 0.0);
        assert_eq!(bounded_jitter_down(&mut rng, 500.0, 0.5, 99.9, 0.5), 99.9);
        assert_eq!(bounded_jitter(&mut rng, f64::NAN, 2.0, 3.0, 1.0), 2.0);
    }

    #[test]
    fn reset_value_boundary() {
        assert_eq!(reset_value(30.0, 24.5, 5.5), 30.0);
        assert_eq!(reset_value(30.1, 24.5, 5.5), 24.5);
        assert_eq!(reset_value(19.0, 24.5, 5.5), 19.0);
        assert_eq!(reset_value(18.9, 24.5, 5.5), 24.5);
        assert_eq!(reset_value(24.5, 24.5, 0.0), 24.5);
    }

    #[test]
    fn generate_random_rounds_and_bounds() {
        let mut rng = rng();
        for _ in 0..500 {
            let v = generate_random(&mut rng, 0.0, 20.0, 4);
            assert!((0.0..=20.0).contains(&v));
            let scaled = v * 10_000.0;
            assert!((scaled - scaled.round()).abs() < 1e-6);
        }
        assert_eq!(generate_random(&mut rng, 3.0, 3.0, 2), 3.0);
        let swapped = generate_random(&mut rng, 1.0, 0.0, 2);
        assert!((0.0..=1.0).contains(&swapped));
    }
}
