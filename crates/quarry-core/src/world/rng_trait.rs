//! RNG trait abstraction for the world and interaction logic
//!
//! Everything random (luck, scatter jitter, mob flapping) goes through this
//! trait so a session can run on a seeded RNG and tests can pin values.

/// Random number generator trait for world simulation
pub trait WorldRng {
    /// Generate random f32 in [0.0, 1.0)
    fn gen_f32(&mut self) -> f32;

    /// Generate a random integer in [0, max]
    fn gen_offset(&mut self, max: u32) -> u32;

    /// Luck roll for one swing, uniform in [0.0, 1.0)
    fn gen_luck(&mut self) -> f32 {
        self.gen_f32()
    }

    /// Uniform value in [-max, max]
    fn gen_jitter(&mut self, max: f32) -> f32 {
        (self.gen_f32() * 2.0 - 1.0) * max
    }

    /// Check if random value is less than probability threshold
    fn check_probability(&mut self, probability: f32) -> bool {
        self.gen_f32() < probability
    }
}

// Blanket implementation for any type implementing rand::Rng
impl<T: ?Sized + rand::Rng> WorldRng for T {
    fn gen_f32(&mut self) -> f32 {
        rand::Rng::r#gen(self)
    }

    fn gen_offset(&mut self, max: u32) -> u32 {
        rand::Rng::gen_range(self, 0..=max)
    }
}

/// An RNG that always returns the same luck; handy for pinning mining rolls
#[derive(Debug, Clone, Copy)]
pub struct FixedLuck(pub f32);

impl WorldRng for FixedLuck {
    fn gen_f32(&mut self) -> f32 {
        self.0
    }

    fn gen_offset(&mut self, _max: u32) -> u32 {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256StarStar;

    #[test]
    fn test_world_rng_gen_f32() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(12345);

        for _ in 0..100 {
            let val = rng.gen_f32();
            assert!(val >= 0.0);
            assert!(val < 1.0);
        }
    }

    #[test]
    fn test_world_rng_gen_offset_inclusive() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(12345);

        let mut seen = [false; 3];
        for _ in 0..200 {
            let val = rng.gen_offset(2);
            assert!(val <= 2);
            seen[val as usize] = true;
        }
        assert_eq!(seen, [true; 3]);
    }

    #[test]
    fn test_world_rng_jitter_bounds() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(9);
        for _ in 0..200 {
            assert!(rng.gen_jitter(40.0).abs() <= 40.0);
        }
    }

    #[test]
    fn test_world_rng_check_probability_extremes() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(12345);

        for _ in 0..100 {
            assert!(rng.check_probability(1.0));
            assert!(!rng.check_probability(0.0));
        }
    }

    #[test]
    fn test_world_rng_through_trait_object() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(42);
        let dyn_rng: &mut dyn WorldRng = &mut rng;
        let luck = dyn_rng.gen_luck();
        assert!((0.0..1.0).contains(&luck));
    }

    #[test]
    fn test_world_rng_deterministic() {
        let mut rng1 = Xoshiro256StarStar::seed_from_u64(42);
        let mut rng2 = Xoshiro256StarStar::seed_from_u64(42);

        for _ in 0..100 {
            assert_eq!(rng1.gen_f32(), rng2.gen_f32());
        }
    }

    #[test]
    fn test_fixed_luck() {
        let mut rng = FixedLuck(0.25);
        assert_eq!(rng.gen_luck(), 0.25);
        assert_eq!(rng.gen_offset(2), 0);
    }
}
